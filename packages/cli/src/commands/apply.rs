use super::{open_library, read_template};
use crate::config::Config;
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use mailforge_editor::{parse_script, Action, EditSession, History, Outcome, SessionAction};
use mailforge_storage::{export_template_json, AutoSaver};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct ApplyArgs {
    /// Template JSON file
    pub template: PathBuf,

    /// JSON array of editor actions
    pub script: PathBuf,

    /// Output file (defaults to overwriting the template)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn apply(args: ApplyArgs, cwd: &Path) -> Result<()> {
    let config = Config::load(cwd)?;
    let template_path = cwd.join(&args.template);
    let template = read_template(&template_path)?;

    let script_path = cwd.join(&args.script);
    let script = fs::read_to_string(&script_path)
        .with_context(|| format!("Cannot read script {}", script_path.display()))?;
    let actions = parse_script(&script)?;

    let mut session =
        EditSession::with_history(template, History::with_max_levels(config.history_depth))
            .with_view_mode(config.default_view);

    println!(
        "{} {} actions on {}",
        "Applying".bright_blue().bold(),
        actions.len(),
        session.template().name.bright_white()
    );

    let mut applied = 0;
    for action in actions {
        let label = action_label(&action);
        match session.perform(action) {
            Outcome::Applied => {
                tracing::debug!("[Apply] {} applied", label);
                applied += 1;
                println!("  {} {}", "✓".green(), label);
            }
            Outcome::Noop(reason) => {
                tracing::debug!("[Apply] {} noop: {}", label, reason);
                println!("  {} {} - {}", "–".yellow(), label, reason.to_string().dimmed());
            }
        }
    }

    let output = args.output.map_or(template_path, |path| cwd.join(path));
    fs::write(&output, export_template_json(session.template())?)?;

    let mut library = open_library(&config, cwd);
    let saved = AutoSaver::new().tick(&mut library, session.template());
    tracing::debug!(
        "[Apply] Wrote {} (library updated: {})",
        output.display(),
        saved
    );

    println!();
    println!(
        "{} {} applied, {} undo levels → {}",
        "✓".green(),
        applied,
        session.history().undo_levels(),
        output.display()
    );
    Ok(())
}

fn action_label(action: &Action) -> &'static str {
    match action {
        Action::Command(command) => command.name(),
        Action::Session(SessionAction::SetViewMode { .. }) => "SetViewMode",
        Action::Session(SessionAction::SetHoveredItem { .. }) => "SetHoveredItem",
        Action::Session(SessionAction::Select { .. }) => "Select",
        Action::Session(SessionAction::ClearSelection) => "ClearSelection",
        Action::Session(SessionAction::Undo) => "Undo",
        Action::Session(SessionAction::Redo) => "Redo",
    }
}
