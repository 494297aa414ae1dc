use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use mailforge_document::Template;
use mailforge_storage::{export_file_name, export_template_json};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct NewArgs {
    /// Template name
    pub name: String,

    /// Output file (defaults to the name with spaces as underscores)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Overwrite an existing file
    #[arg(short, long)]
    pub force: bool,
}

pub fn new(args: NewArgs, cwd: &Path) -> Result<()> {
    let output = match args.output {
        Some(path) => cwd.join(path),
        None => cwd.join(export_file_name(&args.name, "json")),
    };

    if output.exists() && !args.force {
        return Err(anyhow!(
            "{} already exists. Use --force to overwrite",
            output.display()
        ));
    }

    let template = Template::named(args.name);
    fs::write(&output, export_template_json(&template)?)?;

    println!("{} Created {}", "✓".green(), output.display());
    println!("  id: {}", template.id.dimmed());
    Ok(())
}
