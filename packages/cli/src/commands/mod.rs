pub mod apply;
pub mod export;
pub mod library;
pub mod new;

pub use apply::{apply, ApplyArgs};
pub use export::{export, ExportArgs};
pub use library::{delete, import, list, DeleteArgs, ImportArgs};
pub use new::{new, NewArgs};

use crate::config::Config;
use anyhow::{Context, Result};
use mailforge_document::Template;
use mailforge_storage::{import_template, FileStore, TemplateLibrary};
use std::path::Path;

/// Read and validate a template file
pub fn read_template(path: &Path) -> Result<Template> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Cannot read template {}", path.display()))?;
    let template = import_template(&content)
        .with_context(|| format!("Invalid template {}", path.display()))?;
    Ok(template)
}

/// Library rooted at the configured data directory
pub fn open_library(config: &Config, cwd: &Path) -> TemplateLibrary<FileStore> {
    TemplateLibrary::new(FileStore::new(config.data_dir(cwd)))
}
