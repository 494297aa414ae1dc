use super::read_template;
use crate::config::Config;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use mailforge_compiler_html::compile_to_html;
use mailforge_document::ViewMode;
use mailforge_storage::export_file_name;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Template JSON file
    pub template: PathBuf,

    /// View to export (desktop, mobile)
    #[arg(short, long)]
    pub view: Option<ViewMode>,

    /// Output file (defaults to the template name with `.html`)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output to stdout instead of a file
    #[arg(long)]
    pub stdout: bool,
}

pub fn export(args: ExportArgs, cwd: &Path) -> Result<()> {
    let config = Config::load(cwd)?;
    let template = read_template(&cwd.join(&args.template))?;
    let view = args.view.unwrap_or(config.default_view);

    let html = compile_to_html(&template, view, config.compile_options())?;

    if args.stdout {
        println!("{}", html);
        return Ok(());
    }

    let output = match args.output {
        Some(path) => cwd.join(path),
        None => cwd.join(export_file_name(&template.name, "html")),
    };
    if let Some(parent) = output.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&output, html)?;

    println!(
        "{} Exported {} ({}) → {}",
        "✓".green(),
        template.name.bright_white(),
        view,
        output.display()
    );
    Ok(())
}
