mod commands;
mod config;
mod project;

use clap::{ArgAction, Parser, Subcommand};
use colored::Colorize;
use commands::{apply, init, show, types, ApplyArgs, InitArgs, ShowArgs, TypesArgs};
use tracing_subscriber::EnvFilter;

/// Bricks CLI - inspect and edit block-based pages
#[derive(Parser, Debug)]
#[command(name = "bricks")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the block types that can be inserted
    Types(TypesArgs),

    /// Create a starter project
    Init(InitArgs),

    /// Print the pages of a project as an outline
    Show(ShowArgs),

    /// Replay a script of edits against a project
    Apply(ApplyArgs),
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = std::env::current_dir()
        .map_err(anyhow::Error::from)
        .and_then(|cwd| {
            let cwd = cwd.display().to_string();
            match cli.command {
                Command::Types(args) => types(args),
                Command::Init(args) => init(args, &cwd),
                Command::Show(args) => show(args, &cwd),
                Command::Apply(args) => apply(args, &cwd),
            }
        });

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
