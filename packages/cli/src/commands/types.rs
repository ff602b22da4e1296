use anyhow::Result;
use bricks_registry::TypeRegistry;
use clap::Args;
use colored::Colorize;

#[derive(Debug, Args)]
pub struct TypesArgs {
    /// Also list every prop with its default value
    #[arg(short, long)]
    pub props: bool,
}

pub fn types(args: TypesArgs) -> Result<()> {
    let registry = TypeRegistry::builtin();

    for (category, entries) in registry.list_by_category() {
        println!("{}", category.to_string().bright_blue().bold());

        for entry in entries {
            let marker = if entry.accepts_children { " [container]" } else { "" };
            println!(
                "  {} {}{}",
                format!("{:<12}", entry.type_key).bright_white(),
                entry.display_label,
                marker.dimmed()
            );

            if args.props {
                for schema in &entry.props_schema {
                    println!(
                        "      {:<14} {:?} = {}",
                        schema.key,
                        schema.kind,
                        schema.default.to_string().dimmed()
                    );
                }
            }
        }
        println!();
    }

    Ok(())
}
