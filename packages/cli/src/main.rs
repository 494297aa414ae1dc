mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{
    apply, delete, export, import, list, new, ApplyArgs, DeleteArgs, ExportArgs, ImportArgs,
    NewArgs,
};

/// Mailforge CLI - email template editing from the command line
#[derive(Parser, Debug)]
#[command(name = "mailforge")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create an empty template file
    New(NewArgs),

    /// Run a script of editor actions against a template
    Apply(ApplyArgs),

    /// Export a template view to standalone HTML
    Export(ExportArgs),

    /// Validate a template file and add it to the library
    Import(ImportArgs),

    /// List templates in the library
    List,

    /// Remove a template from the library
    Delete(DeleteArgs),
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = std::env::current_dir()
        .map_err(anyhow::Error::from)
        .and_then(|cwd| match cli.command {
            Command::New(args) => new(args, &cwd),
            Command::Apply(args) => apply(args, &cwd),
            Command::Export(args) => export(args, &cwd),
            Command::Import(args) => import(args, &cwd),
            Command::List => list(&cwd),
            Command::Delete(args) => delete(args, &cwd),
        });

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
