use super::open_library;
use crate::config::Config;
use anyhow::{anyhow, Context, Result};
use clap::Args;
use colored::Colorize;
use mailforge_storage::import_template;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct ImportArgs {
    /// Template JSON file
    pub file: PathBuf,
}

#[derive(Debug, Args)]
pub struct DeleteArgs {
    /// Template id
    pub id: String,
}

pub fn import(args: ImportArgs, cwd: &Path) -> Result<()> {
    let config = Config::load(cwd)?;
    let path = cwd.join(&args.file);
    let content = fs::read_to_string(&path)
        .with_context(|| format!("Cannot read {}", path.display()))?;
    let template = import_template(&content)?;

    let mut library = open_library(&config, cwd);
    library.save_template(&template);
    tracing::debug!("[Import] Saved {} from {}", template.id, path.display());

    println!(
        "{} Imported {} ({})",
        "✓".green(),
        template.name.bright_white(),
        template.id.dimmed()
    );
    Ok(())
}

pub fn list(cwd: &Path) -> Result<()> {
    let config = Config::load(cwd)?;
    let library = open_library(&config, cwd);
    let templates = library.all_templates();

    if templates.is_empty() {
        println!("{}", "No saved templates".yellow());
        return Ok(());
    }

    for template in &templates {
        println!(
            "{}  {}  {}",
            template.id.dimmed(),
            template.name.bright_white(),
            template.updated_at.format("%Y-%m-%d %H:%M")
        );
    }
    println!();
    println!(
        "{} templates, {} bytes stored",
        templates.len(),
        library.storage_size()
    );
    Ok(())
}

pub fn delete(args: DeleteArgs, cwd: &Path) -> Result<()> {
    let config = Config::load(cwd)?;
    let mut library = open_library(&config, cwd);

    let template = library
        .get_template(&args.id)
        .ok_or_else(|| anyhow!("Template not found: {}", args.id))?;
    library.delete_template(&args.id);
    library.clear_auto_saves(Some(&args.id));
    tracing::debug!("[Delete] Removed {} and its auto-saves", args.id);

    println!("{} Deleted {}", "✓".green(), template.name.bright_white());
    Ok(())
}
