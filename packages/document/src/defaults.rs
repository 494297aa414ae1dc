//! Default-value tables applied when nodes are created.

use crate::component::{ButtonProperties, ComponentType, ImageProperties, Position, TextProperties};
use crate::style::{BoxStyle, RowProperties, SectionProperties, Typography};
use crate::template::TemplateSettings;

pub const DEFAULT_TEMPLATE_NAME: &str = "New Template";
pub const DEFAULT_TEMPLATE_VERSION: &str = "1.0.0";

impl Default for TemplateSettings {
    fn default() -> Self {
        Self {
            width: 1200,
            background_color: "#ffffff".to_string(),
            default_font: "Arial, sans-serif".to_string(),
        }
    }
}

fn component_box() -> BoxStyle {
    BoxStyle {
        padding: Some(String::new()),
        margin: Some("0px".to_string()),
        ..Default::default()
    }
}

impl Default for TextProperties {
    fn default() -> Self {
        Self {
            box_style: component_box(),
            column_index: 0,
            content: "Enter your text here".to_string(),
            typography: Typography {
                font_size: Some("16px".to_string()),
                font_weight: Some("normal".to_string()),
                color: Some("#333333".to_string()),
                text_align: Some("left".to_string()),
                line_height: Some("1.5".to_string()),
                font_family: Some("Arial, sans-serif".to_string()),
                text_decoration: None,
            },
        }
    }
}

impl Default for ImageProperties {
    fn default() -> Self {
        Self {
            box_style: component_box(),
            column_index: 0,
            src: String::new(),
            alt: "Image description".to_string(),
            image_width: "100%".to_string(),
            image_height: "auto".to_string(),
        }
    }
}

impl Default for ButtonProperties {
    fn default() -> Self {
        Self {
            box_style: BoxStyle {
                border_radius: Some("4px".to_string()),
                ..component_box()
            },
            column_index: 0,
            button_text: "Click me".to_string(),
            link_url: "#".to_string(),
            button_background_color: "#007bff".to_string(),
            button_text_color: "#ffffff".to_string(),
            button_padding: "12px 24px".to_string(),
            typography: Typography::default(),
        }
    }
}

/// Default placement for a new component of the given kind
pub fn default_position(component_type: ComponentType) -> Position {
    match component_type {
        ComponentType::Button => Position {
            width: "auto".to_string(),
            ..Position::default()
        },
        ComponentType::Text | ComponentType::Image => Position::default(),
    }
}

/// Properties of a section created by "add section"
pub fn new_section_properties() -> SectionProperties {
    SectionProperties {
        box_style: BoxStyle::spacing("0px", "0px", "transparent"),
        ..Default::default()
    }
}

/// Properties of an empty row created by "add row"
pub fn new_row_properties() -> RowProperties {
    RowProperties {
        box_style: BoxStyle::spacing("", "0px", "transparent"),
        columns: 1,
        ..Default::default()
    }
}

/// Properties of the single-column row that wraps a component dropped on a section
pub fn wrapper_row_properties() -> RowProperties {
    RowProperties {
        box_style: BoxStyle::spacing("0px 0", "0px", "transparent"),
        columns: 1,
        column_spacing: Some("0px".to_string()),
        ..Default::default()
    }
}
