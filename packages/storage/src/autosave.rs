//! Periodic auto-save of the open template

use crate::kv::KeyValueStore;
use crate::library::TemplateLibrary;
use mailforge_document::Template;
use std::future::Future;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;

/// Tracks the last persisted serialization so unchanged templates are skipped
#[derive(Debug, Default)]
pub struct AutoSaver {
    last_saved: Option<String>,
}

impl AutoSaver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Persist `template` if it changed since the last save
    ///
    /// Upserts it into the library, records it as the current template and,
    /// when auto-save is enabled, appends a snapshot. Returns whether a save
    /// happened.
    pub fn tick<S: KeyValueStore>(
        &mut self,
        library: &mut TemplateLibrary<S>,
        template: &Template,
    ) -> bool {
        let serialized = match serde_json::to_string(template) {
            Ok(serialized) => serialized,
            Err(err) => {
                tracing::error!("[AutoSave] Failed to serialize template: {}", err);
                return false;
            }
        };
        if self.last_saved.as_deref() == Some(serialized.as_str()) {
            return false;
        }

        library.save_template(template);
        library.save_current_template(template);
        if library.settings().auto_save {
            library.save_auto_save(template);
        }
        self.last_saved = Some(serialized);

        tracing::debug!("[AutoSave] Saved template {}", template.id);
        true
    }
}

/// Save the latest template from `templates` every `autoSaveInterval` seconds
///
/// Interval ticks are skipped while auto-save is disabled in settings. Once
/// `shutdown` resolves, a final save runs regardless. Returns the number of
/// saves performed.
pub async fn run_autosave<S, F>(
    library: &mut TemplateLibrary<S>,
    mut templates: watch::Receiver<Template>,
    shutdown: F,
) -> usize
where
    S: KeyValueStore,
    F: Future<Output = ()>,
{
    let settings = library.settings();
    let period = Duration::from_secs(settings.auto_save_interval.max(1));
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    tracing::info!(
        "[AutoSave] Running every {}s (enabled: {})",
        period.as_secs(),
        settings.auto_save
    );

    let mut saver = AutoSaver::new();
    let mut saves = 0;
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = &mut shutdown => {
                let template = templates.borrow_and_update().clone();
                if saver.tick(library, &template) {
                    saves += 1;
                }
                tracing::info!("[AutoSave] Stopped after {} saves", saves);
                return saves;
            }
            _ = interval.tick() => {
                if !library.settings().auto_save {
                    continue;
                }
                let template = templates.borrow_and_update().clone();
                if saver.tick(library, &template) {
                    saves += 1;
                }
            }
        }
    }
}
