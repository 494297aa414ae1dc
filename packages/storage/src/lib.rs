//! # Mailforge Storage
//!
//! Persistence for Mailforge templates.
//!
//! - [`KeyValueStore`]: string blobs by key, in memory or as files
//! - [`TemplateLibrary`]: saved templates, current template, auto-save
//!   snapshots and settings on top of a store
//! - [`run_autosave`]: interval-driven saving of the open template
//! - [`import_template`] / [`export_template_json`]: template files
//!
//! ## Usage
//!
//! ```rust,ignore
//! use mailforge_storage::{FileStore, TemplateLibrary};
//!
//! let mut library = TemplateLibrary::new(FileStore::new(".mailforge"));
//! library.save_template(&template);
//! let restored = library.get_template(&template.id);
//! ```

pub mod autosave;
mod error;
pub mod import;
pub mod kv;
pub mod library;

pub use autosave::{run_autosave, AutoSaver};
pub use error::{ImportError, StorageError, StorageResult};
pub use import::{export_file_name, export_template_json, import_template};
pub use kv::{FileStore, KeyValueStore, MemoryStore};
pub use library::{
    AutoSaveEntry, SettingsPatch, StorageSettings, TemplateLibrary, ALL_KEYS, AUTO_SAVE_KEY,
    CURRENT_TEMPLATE_KEY, SETTINGS_KEY, TEMPLATES_KEY,
};
