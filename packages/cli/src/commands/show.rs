use crate::config::Config;
use crate::project::Project;
use anyhow::{anyhow, Result};
use bricks_editor::Page;
use bricks_model::{walk_node, DepthMeter, KindCounter, Node, Tree, Visitor};
use bricks_registry::{RegistryError, RenderTable, TypeRegistry};
use clap::Args;
use colored::Colorize;

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Project file (defaults to the one in bricks.config.json)
    pub file: Option<String>,

    /// Only show the page with this name
    #[arg(short, long)]
    pub page: Option<String>,

    /// Print per-type block counts
    #[arg(short, long)]
    pub stats: bool,
}

pub fn show(args: ShowArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let path = config.project_path(cwd, args.file.as_deref())?;
    let project = Project::load(&path)?;

    let pages: Vec<&Page> = match &args.page {
        Some(name) => {
            let page = project
                .pages
                .iter()
                .find(|page| &page.name == name)
                .ok_or_else(|| anyhow!("No page named {:?} in {}", name, path.display()))?;
            vec![page]
        }
        None => project.pages.iter().collect(),
    };

    let registry = TypeRegistry::builtin();
    let renderers = text_renderers(&registry)?;

    for page in pages {
        let slug = page.settings.slug.as_deref().unwrap_or("-");
        println!(
            "{} {} {}",
            page.name.bright_white().bold(),
            format!("({:?}, {})", page.visibility, slug).dimmed(),
            page.id.dimmed()
        );

        if page.tree.is_empty() {
            println!("  {}", "(empty)".dimmed());
        }
        for line in outline(&page.tree, &renderers) {
            println!("  {}", line);
        }

        if args.stats {
            println!(
                "  {} blocks, {} levels deep",
                page.tree.node_count(),
                DepthMeter::measure(&page.tree)
            );
            for (kind, count) in KindCounter::count(&page.tree) {
                println!("    {:<12} {}", kind, count);
            }
        }
        println!();
    }

    Ok(())
}

/// One-line text rendering for every registered block type
pub fn text_renderers(registry: &TypeRegistry) -> Result<RenderTable<String>, RegistryError> {
    let mut table = RenderTable::new();

    for entry in registry.iter() {
        let label = entry.display_label.clone();
        let key = summary_prop(&entry.type_key);

        table.register(registry, &entry.type_key, move |node: &Node, selected: bool| {
            let summary = key
                .and_then(|key| node.prop(key))
                .map(|value| format!(" {:?}", truncate(&value.to_string(), 40)))
                .unwrap_or_default();
            let marker = if selected { "> " } else { "" };
            format!("{}{}{}", marker, label, summary)
        })?;
    }

    Ok(table)
}

/// Prop that best describes a block of `type_key` in one line
fn summary_prop(type_key: &str) -> Option<&'static str> {
    match type_key {
        "title" | "text" => Some("text"),
        "button" => Some("label"),
        "image" => Some("src"),
        "video" => Some("url"),
        _ => None,
    }
}

fn truncate(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((index, _)) => format!("{}...", &text[..index]),
        None => text.to_string(),
    }
}

/// Indented outline of a tree
pub fn outline(tree: &Tree, renderers: &RenderTable<String>) -> Vec<String> {
    let mut printer = OutlinePrinter {
        renderers,
        depth: 0,
        lines: Vec::new(),
    };
    printer.visit_tree(tree);
    printer.lines
}

struct OutlinePrinter<'a> {
    renderers: &'a RenderTable<String>,
    depth: usize,
    lines: Vec<String>,
}

impl Visitor for OutlinePrinter<'_> {
    fn visit_node(&mut self, node: &Node) {
        let text = self
            .renderers
            .render(node, false)
            .unwrap_or_else(|| format!("<{}>", node.kind()));
        self.lines
            .push(format!("{}{} [{}]", "  ".repeat(self.depth), text, node.id()));

        self.depth += 1;
        walk_node(self, node);
        self.depth -= 1;
    }
}
