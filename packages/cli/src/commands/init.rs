use crate::config::{Config, DEFAULT_CONFIG_NAME};
use crate::project::Project;
use anyhow::Result;
use bricks_editor::PageSettings;
use bricks_model::props;
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Project file to create
    #[arg(default_value = "site.json")]
    pub file: String,

    /// Force overwrite existing files
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &str) -> Result<()> {
    let project_path = PathBuf::from(cwd).join(&args.file);

    // Check if project already exists
    if project_path.exists() && !args.force {
        println!("{} {} already exists", "⚠️".yellow(), args.file.bright_white());
        println!("Use --force to overwrite");
        return Ok(());
    }

    println!("{}", "📝 Initializing Bricks project...".bright_blue().bold());

    let config = Config::load(cwd)?;
    let mut session = Project::default().into_session(&project_path, config.editor.clone())?;

    session.insert_at_root("title", props([("text", "Welcome")]))?;
    session.insert_at_root("text", props([("text", "Start building your page.")]))?;
    let home = session.active_page_id().to_string();
    session.update_settings(&home, &PageSettings::default().with_title("Welcome").with_slug("/"));

    Project::from_session(session).save(&project_path)?;
    println!("  {} Created {}", "✓".green(), args.file);

    // Write config file
    let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);
    if !config_path.exists() || args.force {
        let config = Config {
            project: Some(args.file.clone()),
            ..config
        };
        fs::write(&config_path, serde_json::to_string_pretty(&config)?)?;
        println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);
    }

    println!();
    println!("{}", "✅ Project initialized!".green().bold());
    println!();
    println!("Next steps:");
    println!("  1. Run: bricks show {}", args.file);
    println!("  2. Write a script of edits and run: bricks apply {} script.json", args.file);

    Ok(())
}
