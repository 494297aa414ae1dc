use mailforge_compiler_html::CompileOptions;
use mailforge_document::ViewMode;
use mailforge_editor::DEFAULT_MAX_LEVELS;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_NAME: &str = "mailforge.config.json";

/// Mailforge configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// Directory holding the template library
    pub data_dir: String,

    /// View used when a command does not name one
    pub default_view: ViewMode,

    /// Undo levels kept while applying scripts
    pub history_depth: usize,

    /// HTML export options
    pub export: ExportConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExportConfig {
    pub pretty: bool,
    pub indent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: ".mailforge".to_string(),
            default_view: ViewMode::Desktop,
            history_depth: DEFAULT_MAX_LEVELS,
            export: ExportConfig::default(),
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            pretty: true,
            indent: "  ".to_string(),
        }
    }
}

impl Config {
    /// Load config from a directory, falling back to defaults
    pub fn load(cwd: &Path) -> anyhow::Result<Self> {
        let config_path = cwd.join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Absolute path to the library directory
    pub fn data_dir(&self, cwd: &Path) -> PathBuf {
        cwd.join(&self.data_dir)
    }

    pub fn compile_options(&self) -> CompileOptions {
        CompileOptions {
            pretty: self.export.pretty,
            indent: self.export.indent.clone(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let json = r#"{
            "dataDir": "library",
            "defaultView": "mobile",
            "historyDepth": 10,
            "export": { "pretty": false }
        }"#;

        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.data_dir, "library");
        assert_eq!(config.default_view, ViewMode::Mobile);
        assert_eq!(config.history_depth, 10);
        assert!(!config.export.pretty);
        assert_eq!(config.export.indent, "  ");
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.data_dir, ".mailforge");
        assert_eq!(config.default_view, ViewMode::Desktop);
        assert_eq!(config.history_depth, 50);
        assert!(config.compile_options().pretty);
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(Config::load(dir.path()).unwrap(), Config::default());

        std::fs::write(dir.path().join(DEFAULT_CONFIG_NAME), r#"{ "historyDepth": 5 }"#).unwrap();
        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.history_depth, 5);
        assert_eq!(config.data_dir(dir.path()), dir.path().join(".mailforge"));
    }
}
