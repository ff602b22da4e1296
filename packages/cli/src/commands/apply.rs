use crate::config::Config;
use crate::project::Project;
use anyhow::{anyhow, bail, Context, Result};
use bricks_editor::{EditSession, Mutation, PageSettings, Visibility};
use bricks_model::{NodeId, Tree};
use clap::Args;
use colored::Colorize;
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;
use tracing::debug;

#[derive(Debug, Args)]
pub struct ApplyArgs {
    /// Project file to edit
    pub file: String,

    /// JSON script: a list of steps
    pub script: String,

    /// Write the result here instead of back to the project file
    #[arg(short, long)]
    pub out: Option<String>,
}

/// One step of an edit script. Pages are referred to by name.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "step", rename_all = "camelCase")]
pub enum Step {
    Mutate {
        mutation: Mutation,
    },
    Undo,
    Redo,
    Select {
        #[serde(default)]
        node: Option<NodeId>,
    },
    AddPage {
        name: String,
    },
    SwitchPage {
        page: String,
    },
    RenamePage {
        page: String,
        name: String,
    },
    DuplicatePage {
        page: String,
    },
    DeletePage {
        page: String,
    },
    SetVisibility {
        page: String,
        visibility: Visibility,
    },
    UpdateSettings {
        page: String,
        settings: PageSettings,
    },
}

/// What a step did, for the report
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Changed,
    Created(String),
    Unchanged,
}

pub fn apply(args: ApplyArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let project_path = PathBuf::from(cwd).join(&args.file);
    let script_path = PathBuf::from(cwd).join(&args.script);

    let content = fs::read_to_string(&script_path)
        .with_context(|| format!("Cannot read {}", script_path.display()))?;
    let steps: Vec<Step> = serde_json::from_str(&content)
        .with_context(|| format!("Invalid script {}", script_path.display()))?;

    let mut session = Project::load(&project_path)?.into_session(&project_path, config.editor)?;

    println!("{}", "🔨 Applying edits...".bright_blue().bold());

    for (index, step) in steps.iter().enumerate() {
        let outcome = run_step(&mut session, step)
            .with_context(|| format!("Step {} failed", index + 1))?;
        let label = step_label(step);

        match outcome {
            Outcome::Changed => println!("  {} {}", "✓".green(), label),
            Outcome::Created(id) => println!("  {} {} → {}", "✓".green(), label, id.bright_white()),
            Outcome::Unchanged => {
                println!("  {} {} {}", "-".dimmed(), label, "(no change)".dimmed())
            }
        }
    }

    let out_path = args
        .out
        .map(|out| PathBuf::from(cwd).join(out))
        .unwrap_or(project_path);
    let version = session.version();
    Project::from_session(session).save(&out_path)?;

    println!();
    println!(
        "{} {} steps, version {} → {}",
        "✅".green(),
        steps.len(),
        version,
        out_path.display()
    );

    Ok(())
}

/// Run one step against the session
pub fn run_step(session: &mut EditSession, step: &Step) -> Result<Outcome> {
    debug!(?step, "Running step");

    let outcome = match step {
        Step::Mutate { mutation } => {
            let result = session.apply(mutation)?;
            match (result.changed, result.created) {
                (_, Some(id)) => Outcome::Created(id),
                (true, None) => Outcome::Changed,
                (false, None) => Outcome::Unchanged,
            }
        }
        Step::Undo => changed(session.undo()),
        Step::Redo => changed(session.redo()),
        Step::Select { node } => {
            match node {
                Some(id) => session.select(id.clone()),
                None => session.clear_selection(),
            }
            Outcome::Changed
        }
        Step::AddPage { name } => Outcome::Created(session.add_page(name.clone(), Tree::new())?),
        Step::SwitchPage { page } => {
            let id = page_id(session, page)?;
            session.switch_page(&id)?;
            Outcome::Changed
        }
        Step::RenamePage { page, name } => {
            let id = page_id(session, page)?;
            changed(session.rename_page(&id, name.clone()))
        }
        Step::DuplicatePage { page } => {
            let id = page_id(session, page)?;
            session
                .duplicate_page(&id)
                .map_or(Outcome::Unchanged, Outcome::Created)
        }
        Step::DeletePage { page } => {
            let id = page_id(session, page)?;
            if !session.delete_page(&id) {
                bail!("Cannot delete {:?}: a site keeps at least one page", page);
            }
            Outcome::Changed
        }
        Step::SetVisibility { page, visibility } => {
            let id = page_id(session, page)?;
            changed(session.set_visibility(&id, *visibility))
        }
        Step::UpdateSettings { page, settings } => {
            let id = page_id(session, page)?;
            changed(session.update_settings(&id, settings))
        }
    };

    Ok(outcome)
}

fn changed(flag: bool) -> Outcome {
    if flag {
        Outcome::Changed
    } else {
        Outcome::Unchanged
    }
}

fn page_id(session: &EditSession, name: &str) -> Result<String> {
    session
        .pages()
        .get_by_name(name)
        .map(|page| page.id.clone())
        .ok_or_else(|| anyhow!("No page named {:?}", name))
}

fn step_label(step: &Step) -> String {
    match step {
        Step::Mutate { mutation } => mutation.name().to_string(),
        Step::Undo => "Undo".to_string(),
        Step::Redo => "Redo".to_string(),
        Step::Select { node: Some(id) } => format!("Select {}", id),
        Step::Select { node: None } => "Clear selection".to_string(),
        Step::AddPage { name } => format!("Add page {:?}", name),
        Step::SwitchPage { page } => format!("Switch to {:?}", page),
        Step::RenamePage { page, name } => format!("Rename {:?} to {:?}", page, name),
        Step::DuplicatePage { page } => format!("Duplicate {:?}", page),
        Step::DeletePage { page } => format!("Delete {:?}", page),
        Step::SetVisibility { page, visibility } => format!("Set {:?} {:?}", page, visibility),
        Step::UpdateSettings { page, .. } => format!("Update settings of {:?}", page),
    }
}
