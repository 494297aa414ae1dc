//! # Template Library
//!
//! Persisted templates, the last-open template, auto-save snapshots and
//! storage settings, all as JSON values in a [`KeyValueStore`].
//!
//! Persistence is best-effort: every public operation logs failures and
//! falls back to a neutral value (empty list, `None`, defaults). Nothing
//! here returns an error to the editor.

use crate::error::StorageResult;
use crate::kv::KeyValueStore;
use chrono::{DateTime, SecondsFormat, Utc};
use mailforge_document::Template;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

pub const TEMPLATES_KEY: &str = "templates";
pub const CURRENT_TEMPLATE_KEY: &str = "current_template";
pub const AUTO_SAVE_KEY: &str = "auto_save";
pub const SETTINGS_KEY: &str = "settings";

pub const ALL_KEYS: [&str; 4] = [
    TEMPLATES_KEY,
    CURRENT_TEMPLATE_KEY,
    AUTO_SAVE_KEY,
    SETTINGS_KEY,
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StorageSettings {
    pub auto_save: bool,
    /// Seconds between auto-save ticks
    pub auto_save_interval: u64,
    pub max_auto_saves: usize,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            auto_save: true,
            auto_save_interval: 30,
            max_auto_saves: 10,
        }
    }
}

/// Partial settings update; absent fields keep their stored value
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_save: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_save_interval: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_auto_saves: Option<usize>,
}

impl StorageSettings {
    pub fn merged(&self, patch: &SettingsPatch) -> Self {
        Self {
            auto_save: patch.auto_save.unwrap_or(self.auto_save),
            auto_save_interval: patch.auto_save_interval.unwrap_or(self.auto_save_interval),
            max_auto_saves: patch.max_auto_saves.unwrap_or(self.max_auto_saves),
        }
    }
}

/// One auto-save snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutoSaveEntry {
    pub template: Template,
    pub timestamp: DateTime<Utc>,
    /// `{templateId}_{timestamp}`
    pub id: String,
}

impl AutoSaveEntry {
    pub fn new(template: Template, timestamp: DateTime<Utc>) -> Self {
        let id = format!(
            "{}_{}",
            template.id,
            timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
        );
        Self {
            template,
            timestamp,
            id,
        }
    }
}

pub struct TemplateLibrary<S> {
    store: S,
}

impl<S: KeyValueStore> TemplateLibrary<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Insert or replace by template id
    pub fn save_template(&mut self, template: &Template) {
        let result = self.read_list::<Template>(TEMPLATES_KEY).and_then(|mut templates| {
            match templates.iter_mut().find(|t| t.id == template.id) {
                Some(existing) => *existing = template.clone(),
                None => templates.push(template.clone()),
            }
            self.write(TEMPLATES_KEY, &templates)
        });
        logged("save template", result, ());
    }

    pub fn get_template(&self, id: &str) -> Option<Template> {
        self.all_templates().into_iter().find(|t| t.id == id)
    }

    pub fn all_templates(&self) -> Vec<Template> {
        logged("read templates", self.read_list(TEMPLATES_KEY), Vec::new())
    }

    pub fn delete_template(&mut self, id: &str) {
        let result = self.read_list::<Template>(TEMPLATES_KEY).and_then(|mut templates| {
            templates.retain(|t| t.id != id);
            self.write(TEMPLATES_KEY, &templates)
        });
        logged("delete template", result, ());
    }

    pub fn save_current_template(&mut self, template: &Template) {
        let result = self.write(CURRENT_TEMPLATE_KEY, template);
        logged("save current template", result, ());
    }

    pub fn current_template(&self) -> Option<Template> {
        logged("read current template", self.read(CURRENT_TEMPLATE_KEY), None)
    }

    /// Append a snapshot, evicting the oldest beyond `max_auto_saves`
    pub fn save_auto_save(&mut self, template: &Template) {
        let max = self.settings().max_auto_saves;
        let result = self
            .read_list::<AutoSaveEntry>(AUTO_SAVE_KEY)
            .and_then(|mut entries| {
                entries.push(AutoSaveEntry::new(template.clone(), Utc::now()));
                if entries.len() > max {
                    entries.drain(..entries.len() - max);
                }
                self.write(AUTO_SAVE_KEY, &entries)
            });
        logged("save auto-save", result, ());
    }

    pub fn auto_saves(&self) -> Vec<AutoSaveEntry> {
        logged("read auto-saves", self.read_list(AUTO_SAVE_KEY), Vec::new())
    }

    /// Most recent snapshot of `template_id`; ties go to the later entry
    pub fn latest_auto_save(&self, template_id: &str) -> Option<Template> {
        self.auto_saves()
            .into_iter()
            .filter(|entry| entry.template.id == template_id)
            .max_by_key(|entry| entry.timestamp)
            .map(|entry| entry.template)
    }

    /// Drop snapshots of one template, or all of them
    pub fn clear_auto_saves(&mut self, template_id: Option<&str>) {
        let result = match template_id {
            Some(id) => self
                .read_list::<AutoSaveEntry>(AUTO_SAVE_KEY)
                .and_then(|mut entries| {
                    entries.retain(|entry| entry.template.id != id);
                    self.write(AUTO_SAVE_KEY, &entries)
                }),
            None => self.store.remove(AUTO_SAVE_KEY),
        };
        logged("clear auto-saves", result, ());
    }

    pub fn settings(&self) -> StorageSettings {
        logged(
            "read settings",
            self.read(SETTINGS_KEY).map(Option::unwrap_or_default),
            StorageSettings::default(),
        )
    }

    pub fn save_settings(&mut self, patch: &SettingsPatch) {
        let settings = self.settings().merged(patch);
        let result = self.write(SETTINGS_KEY, &settings);
        logged("save settings", result, ());
    }

    pub fn clear_all(&mut self) {
        for key in ALL_KEYS {
            let result = self.store.remove(key);
            logged("clear storage", result, ());
        }
    }

    /// Total bytes held under the library's keys
    pub fn storage_size(&self) -> usize {
        ALL_KEYS
            .iter()
            .map(|key| {
                logged("measure storage", self.store.get(key), None)
                    .map_or(0, |value| value.len())
            })
            .sum()
    }

    fn read<T: DeserializeOwned>(&self, key: &str) -> StorageResult<Option<T>> {
        match self.store.get(key)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    fn read_list<T: DeserializeOwned>(&self, key: &str) -> StorageResult<Vec<T>> {
        Ok(self.read(key)?.unwrap_or_default())
    }

    fn write<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> StorageResult<()> {
        let raw = serde_json::to_string(value)?;
        self.store.set(key, &raw)
    }
}

/// Log a failed storage operation and substitute `fallback`
fn logged<T>(operation: &str, result: StorageResult<T>, fallback: T) -> T {
    match result {
        Ok(value) => value,
        Err(err) => {
            tracing::error!("[Storage] Failed to {}: {}", operation, err);
            fallback
        }
    }
}
