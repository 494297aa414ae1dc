//! Multi-column row presets used by the "add row template" command.

use crate::patch::merge_record;
use mailforge_document::{
    defaults, BoxStyle, Component, ComponentKind, ComponentType, IdGenerator, Row,
    RowProperties,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A named row layout with one component spec per column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RowPreset {
    #[serde(default)]
    pub name: String,
    #[serde(default = "default_columns")]
    pub columns: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_spacing: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub margin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(default)]
    pub components: Vec<PresetComponent>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresetComponent {
    #[serde(rename = "type")]
    pub component_type: ComponentType,
    /// Overrides merged over the type's default properties
    #[serde(default)]
    pub properties: Map<String, Value>,
}

fn default_columns() -> u32 {
    1
}

impl PresetComponent {
    pub fn text(content: &str) -> Self {
        let mut properties = Map::new();
        properties.insert("content".to_string(), Value::String(content.to_string()));
        Self {
            component_type: ComponentType::Text,
            properties,
        }
    }
}

impl RowPreset {
    pub const BUILTIN_IDS: [&'static str; 3] = ["single-column", "two-column", "three-column"];

    pub fn builtin(id: &str) -> Option<Self> {
        match id {
            "single-column" => Some(Self::single_column()),
            "two-column" => Some(Self::two_column()),
            "three-column" => Some(Self::three_column()),
            _ => None,
        }
    }

    pub fn single_column() -> Self {
        Self::layout(
            "Single Column",
            1,
            "0px",
            vec![PresetComponent::text(
                "This is a single column. Drag components here.",
            )],
        )
    }

    pub fn two_column() -> Self {
        Self::layout(
            "Two Column",
            2,
            "20px",
            vec![
                PresetComponent::text("Column 1"),
                PresetComponent::text("Column 2"),
            ],
        )
    }

    pub fn three_column() -> Self {
        Self::layout(
            "Three Column",
            3,
            "15px",
            vec![
                PresetComponent::text("Column 1"),
                PresetComponent::text("Column 2"),
                PresetComponent::text("Column 3"),
            ],
        )
    }

    fn layout(name: &str, columns: u32, spacing: &str, components: Vec<PresetComponent>) -> Self {
        Self {
            name: name.to_string(),
            columns,
            column_spacing: Some(spacing.to_string()),
            padding: Some("0px 0".to_string()),
            margin: Some("0px".to_string()),
            background_color: Some("transparent".to_string()),
            components,
        }
    }

    /// Build a row with fresh ids for the row and every component
    ///
    /// Component `i` of the preset gets `columnIndex = i`. Specs whose
    /// property overrides do not fit the component type are skipped.
    pub fn instantiate(&self, ids: &mut IdGenerator, existing_rows: usize) -> Row {
        let components = self
            .components
            .iter()
            .enumerate()
            .filter_map(|(index, spec)| spec.instantiate(ids, index))
            .collect();

        let name = if self.name.is_empty() {
            format!("Row {}", existing_rows + 1)
        } else {
            self.name.clone()
        };

        Row {
            id: ids.new_id(),
            name,
            visible: true,
            locked: false,
            properties: RowProperties {
                box_style: BoxStyle::spacing(
                    self.padding.as_deref().unwrap_or(""),
                    self.margin.as_deref().unwrap_or("0px"),
                    self.background_color.as_deref().unwrap_or("transparent"),
                ),
                columns: self.columns.max(1),
                column_spacing: Some(
                    self.column_spacing
                        .clone()
                        .unwrap_or_else(|| "0px".to_string()),
                ),
                ..Default::default()
            },
            components,
        }
    }
}

impl PresetComponent {
    fn instantiate(&self, ids: &mut IdGenerator, index: usize) -> Option<Component> {
        let mut kind = match ComponentKind::default_for(self.component_type) {
            ComponentKind::Text(props) => {
                merge_record(&props, &self.properties).map(ComponentKind::Text)
            }
            ComponentKind::Image(props) => {
                merge_record(&props, &self.properties).map(ComponentKind::Image)
            }
            ComponentKind::Button(props) => {
                merge_record(&props, &self.properties).map(ComponentKind::Button)
            }
        }
        .map_err(|reason| {
            tracing::debug!(
                "[RowPreset] Skipping {} component {}: {}",
                self.component_type,
                index,
                reason
            );
        })
        .ok()?;
        kind.set_column_index(index);

        Some(Component {
            id: ids.new_id(),
            name: format!("{} {}", self.component_type.display_name(), index + 1),
            visible: true,
            locked: false,
            kind,
            position: defaults::default_position(self.component_type),
        })
    }
}
