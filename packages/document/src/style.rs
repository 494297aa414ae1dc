//! Style records shared by sections, rows and components.
//!
//! Every field is optional: an absent value means "emit nothing" when the
//! record is turned into CSS declarations. Records serialize flat and in
//! camelCase so they can be flattened into the owning properties record.

use serde::{Deserialize, Serialize};

/// Box model and background properties common to every node
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BoxStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_repeat: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_width: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_height: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_height: Option<String>,
}

impl BoxStyle {
    /// Padding, margin and background colour only
    pub fn spacing(padding: &str, margin: &str, background_color: &str) -> Self {
        Self {
            padding: Some(padding.to_string()),
            margin: Some(margin.to_string()),
            background_color: Some(background_color.to_string()),
            ..Default::default()
        }
    }
}

/// Flexbox layout mode (only honoured when `display` is `flex`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FlexLayout {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flex_direction: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub justify_content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub align_items: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gap: Option<String>,
}

impl FlexLayout {
    pub fn is_flex(&self) -> bool {
        self.display.as_deref() == Some("flex")
    }
}

/// Font and text properties
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Typography {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_align: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_height: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_decoration: Option<String>,
}

/// Properties of a section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SectionProperties {
    #[serde(flatten)]
    pub box_style: BoxStyle,
    #[serde(flatten)]
    pub layout: FlexLayout,
}

/// Properties of a row; `columns` drives the derived column grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RowProperties {
    #[serde(flatten)]
    pub box_style: BoxStyle,
    #[serde(flatten)]
    pub layout: FlexLayout,
    pub columns: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column_spacing: Option<String>,
}

impl RowProperties {
    /// Column count used for layout; zero is treated as one
    pub fn column_count(&self) -> usize {
        self.columns.max(1) as usize
    }
}

impl Default for RowProperties {
    fn default() -> Self {
        Self {
            box_style: BoxStyle::default(),
            layout: FlexLayout::default(),
            columns: 1,
            column_spacing: None,
        }
    }
}
