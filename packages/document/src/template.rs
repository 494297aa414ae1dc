//! # Template Document
//!
//! The root aggregate and its content tree:
//!
//! ```text
//! Template
//!  └─ views
//!      ├─ desktop: TemplateView ─ Section* ─ Row* ─ Component*
//!      └─ mobile:  TemplateView ─ Section* ─ Row* ─ Component*
//! ```
//!
//! The two views are independent trees. Nothing is shared between them, so
//! editing one view never touches the other.

use crate::component::Component;
use crate::defaults::{DEFAULT_TEMPLATE_NAME, DEFAULT_TEMPLATE_VERSION};
use crate::style::{RowProperties, SectionProperties};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Canvas-wide settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TemplateSettings {
    pub width: u32,
    pub background_color: String,
    pub default_font: String,
}

/// Which of the two layout trees an operation targets
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Desktop,
    Mobile,
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewMode::Desktop => f.write_str("desktop"),
            ViewMode::Mobile => f.write_str("mobile"),
        }
    }
}

impl FromStr for ViewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "desktop" => Ok(ViewMode::Desktop),
            "mobile" => Ok(ViewMode::Mobile),
            other => Err(format!("Invalid view mode: {}. Use: desktop or mobile", other)),
        }
    }
}

/// Root document: the unit of save, load and export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub id: String,
    pub name: String,
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub settings: TemplateSettings,
    pub views: TemplateViews,
}

fn default_version() -> String {
    DEFAULT_TEMPLATE_VERSION.to_string()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateViews {
    pub desktop: TemplateView,
    pub mobile: TemplateView,
}

impl TemplateViews {
    pub fn get(&self, mode: ViewMode) -> &TemplateView {
        match mode {
            ViewMode::Desktop => &self.desktop,
            ViewMode::Mobile => &self.mobile,
        }
    }

    pub fn get_mut(&mut self, mode: ViewMode) -> &mut TemplateView {
        match mode {
            ViewMode::Desktop => &mut self.desktop,
            ViewMode::Mobile => &mut self.mobile,
        }
    }
}

/// Ordered list of sections for one viewport
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateView {
    pub sections: Vec<Section>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub id: String,
    pub name: String,
    #[serde(default = "default_visible")]
    pub visible: bool,
    #[serde(default)]
    pub locked: bool,
    #[serde(default)]
    pub properties: SectionProperties,
    #[serde(default)]
    pub rows: Vec<Row>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Row {
    pub id: String,
    pub name: String,
    #[serde(default = "default_visible")]
    pub visible: bool,
    #[serde(default)]
    pub locked: bool,
    #[serde(default)]
    pub properties: RowProperties,
    #[serde(default)]
    pub components: Vec<Component>,
}

fn default_visible() -> bool {
    true
}

impl Template {
    /// Fresh empty template with a new id and both views empty
    pub fn new() -> Self {
        Self::named(DEFAULT_TEMPLATE_NAME)
    }

    pub fn named(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            version: default_version(),
            created_at: now,
            updated_at: now,
            settings: TemplateSettings::default(),
            views: TemplateViews::default(),
        }
    }

    /// Refresh `updated_at` after a mutation
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn view(&self, mode: ViewMode) -> &TemplateView {
        self.views.get(mode)
    }

    pub fn view_mut(&mut self, mode: ViewMode) -> &mut TemplateView {
        self.views.get_mut(mode)
    }
}

impl Default for Template {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateView {
    pub fn find_section(&self, section_id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == section_id)
    }

    pub fn find_section_mut(&mut self, section_id: &str) -> Option<&mut Section> {
        self.sections.iter_mut().find(|s| s.id == section_id)
    }

    /// Find a row anywhere in this view
    pub fn find_row(&self, row_id: &str) -> Option<&Row> {
        self.sections
            .iter()
            .flat_map(|s| s.rows.iter())
            .find(|r| r.id == row_id)
    }

    /// Find a component anywhere in this view
    pub fn find_component(&self, component_id: &str) -> Option<&Component> {
        self.sections
            .iter()
            .flat_map(|s| s.rows.iter())
            .flat_map(|r| r.components.iter())
            .find(|c| c.id == component_id)
    }

    /// Id of the section containing `row_id`
    pub fn locate_row(&self, row_id: &str) -> Option<&str> {
        self.sections
            .iter()
            .find(|s| s.rows.iter().any(|r| r.id == row_id))
            .map(|s| s.id.as_str())
    }

    /// Ids of the section and row containing `component_id`
    pub fn locate_component(&self, component_id: &str) -> Option<(&str, &str)> {
        for section in &self.sections {
            for row in &section.rows {
                if row.components.iter().any(|c| c.id == component_id) {
                    return Some((section.id.as_str(), row.id.as_str()));
                }
            }
        }
        None
    }
}

impl Section {
    pub fn find_row(&self, row_id: &str) -> Option<&Row> {
        self.rows.iter().find(|r| r.id == row_id)
    }

    pub fn find_row_mut(&mut self, row_id: &str) -> Option<&mut Row> {
        self.rows.iter_mut().find(|r| r.id == row_id)
    }
}

impl Row {
    pub fn find_component(&self, component_id: &str) -> Option<&Component> {
        self.components.iter().find(|c| c.id == component_id)
    }

    pub fn find_component_mut(&mut self, component_id: &str) -> Option<&mut Component> {
        self.components.iter_mut().find(|c| c.id == component_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_template_is_empty() {
        let template = Template::new();
        assert_eq!(template.name, "New Template");
        assert_eq!(template.version, "1.0.0");
        assert_eq!(template.created_at, template.updated_at);
        assert!(template.views.desktop.sections.is_empty());
        assert!(template.views.mobile.sections.is_empty());
        assert_eq!(template.settings.width, 1200);
    }

    #[test]
    fn test_templates_get_distinct_ids() {
        assert_ne!(Template::new().id, Template::new().id);
    }

    #[test]
    fn test_camel_case_wire_format() {
        let template = Template::named("Launch");
        let value = serde_json::to_value(&template).unwrap();
        assert!(value.get("createdAt").is_some());
        assert!(value.get("updatedAt").is_some());
        assert_eq!(value["settings"]["defaultFont"], "Arial, sans-serif");
        assert!(value["views"]["desktop"]["sections"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_view_mode_parsing() {
        assert_eq!("mobile".parse::<ViewMode>(), Ok(ViewMode::Mobile));
        assert!("tablet".parse::<ViewMode>().is_err());
        assert_eq!(ViewMode::Desktop.to_string(), "desktop");
    }

    #[test]
    fn test_minimal_document_fills_defaults() {
        let json = r#"{
            "id": "t1",
            "name": "Imported",
            "views": { "desktop": { "sections": [
                { "id": "s1", "name": "Section 1", "rows": [] }
            ] } }
        }"#;

        let template: Template = serde_json::from_str(json).unwrap();
        assert_eq!(template.version, "1.0.0");
        assert!(template.views.mobile.sections.is_empty());
        let section = &template.views.desktop.sections[0];
        assert!(section.visible);
        assert!(!section.locked);
    }
}
