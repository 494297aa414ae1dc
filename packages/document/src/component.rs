//! # Components
//!
//! Leaf content nodes. A component's properties are a sum type keyed by its
//! kind, so a text component can never carry button fields and vice versa.
//!
//! On the wire a component keeps the flat record shape:
//!
//! ```text
//! { "id": "..", "type": "text", "name": "Text 1", "visible": true,
//!   "locked": false, "properties": { "content": "..", "columnIndex": 0, .. },
//!   "position": { "x": 0, "y": 0, "width": "100%", "height": "100%" } }
//! ```

use crate::style::{BoxStyle, Typography};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// The closed set of component kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentType {
    Text,
    Image,
    Button,
}

impl ComponentType {
    pub const ALL: [ComponentType; 3] = [
        ComponentType::Text,
        ComponentType::Image,
        ComponentType::Button,
    ];

    /// Display name used when naming new components
    pub fn display_name(&self) -> &'static str {
        match self {
            ComponentType::Text => "Text",
            ComponentType::Image => "Image",
            ComponentType::Button => "Button",
        }
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ComponentType::Text => "text",
            ComponentType::Image => "image",
            ComponentType::Button => "button",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextProperties {
    #[serde(flatten)]
    pub box_style: BoxStyle,
    pub column_index: usize,
    pub content: String,
    #[serde(flatten)]
    pub typography: Typography,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImageProperties {
    #[serde(flatten)]
    pub box_style: BoxStyle,
    pub column_index: usize,
    pub src: String,
    pub alt: String,
    #[serde(deserialize_with = "string_or_number")]
    pub image_width: String,
    #[serde(deserialize_with = "string_or_number")]
    pub image_height: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ButtonProperties {
    #[serde(flatten)]
    pub box_style: BoxStyle,
    pub column_index: usize,
    pub button_text: String,
    pub link_url: String,
    pub button_background_color: String,
    pub button_text_color: String,
    pub button_padding: String,
    #[serde(flatten)]
    pub typography: Typography,
}

/// Kind-specific properties of a component
#[derive(Debug, Clone, PartialEq)]
pub enum ComponentKind {
    Text(TextProperties),
    Image(ImageProperties),
    Button(ButtonProperties),
}

impl ComponentKind {
    /// Default properties for a freshly created component of `component_type`
    pub fn default_for(component_type: ComponentType) -> Self {
        match component_type {
            ComponentType::Text => ComponentKind::Text(TextProperties::default()),
            ComponentType::Image => ComponentKind::Image(ImageProperties::default()),
            ComponentType::Button => ComponentKind::Button(ButtonProperties::default()),
        }
    }

    pub fn component_type(&self) -> ComponentType {
        match self {
            ComponentKind::Text(_) => ComponentType::Text,
            ComponentKind::Image(_) => ComponentType::Image,
            ComponentKind::Button(_) => ComponentType::Button,
        }
    }

    pub fn box_style(&self) -> &BoxStyle {
        match self {
            ComponentKind::Text(props) => &props.box_style,
            ComponentKind::Image(props) => &props.box_style,
            ComponentKind::Button(props) => &props.box_style,
        }
    }

    pub fn column_index(&self) -> usize {
        match self {
            ComponentKind::Text(props) => props.column_index,
            ComponentKind::Image(props) => props.column_index,
            ComponentKind::Button(props) => props.column_index,
        }
    }

    pub fn set_column_index(&mut self, index: usize) {
        match self {
            ComponentKind::Text(props) => props.column_index = index,
            ComponentKind::Image(props) => props.column_index = index,
            ComponentKind::Button(props) => props.column_index = index,
        }
    }

    /// Flat JSON form of the properties record (without the `type` tag)
    pub fn properties_json(&self) -> Result<serde_json::Value, serde_json::Error> {
        match self {
            ComponentKind::Text(props) => serde_json::to_value(props),
            ComponentKind::Image(props) => serde_json::to_value(props),
            ComponentKind::Button(props) => serde_json::to_value(props),
        }
    }

    /// Rebuild a kind from its type tag and flat JSON properties
    pub fn from_properties_json(
        component_type: ComponentType,
        properties: serde_json::Value,
    ) -> Result<Self, serde_json::Error> {
        let properties = match properties {
            serde_json::Value::Null => serde_json::Value::Object(Default::default()),
            other => other,
        };

        Ok(match component_type {
            ComponentType::Text => ComponentKind::Text(serde_json::from_value(properties)?),
            ComponentType::Image => ComponentKind::Image(serde_json::from_value(properties)?),
            ComponentType::Button => ComponentKind::Button(serde_json::from_value(properties)?),
        })
    }
}

/// Free-form placement; superseded by the column layout but still carried
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    #[serde(deserialize_with = "string_or_number")]
    pub width: String,
    #[serde(deserialize_with = "string_or_number")]
    pub height: String,
}

impl Default for Position {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: "100%".to_string(),
            height: "100%".to_string(),
        }
    }
}

/// Content node placed in one column of a row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawComponent", into = "RawComponent")]
pub struct Component {
    pub id: String,
    pub name: String,
    pub visible: bool,
    pub locked: bool,
    pub kind: ComponentKind,
    pub position: Position,
}

impl Component {
    pub fn component_type(&self) -> ComponentType {
        self.kind.component_type()
    }

    pub fn column_index(&self) -> usize {
        self.kind.column_index()
    }
}

#[derive(Serialize, Deserialize)]
struct RawComponent {
    id: String,
    #[serde(rename = "type")]
    component_type: ComponentType,
    name: String,
    #[serde(default = "default_visible")]
    visible: bool,
    #[serde(default)]
    locked: bool,
    #[serde(default)]
    properties: serde_json::Value,
    #[serde(default)]
    position: Position,
}

fn default_visible() -> bool {
    true
}

impl TryFrom<RawComponent> for Component {
    type Error = serde_json::Error;

    fn try_from(raw: RawComponent) -> Result<Self, Self::Error> {
        Ok(Component {
            id: raw.id,
            name: raw.name,
            visible: raw.visible,
            locked: raw.locked,
            kind: ComponentKind::from_properties_json(raw.component_type, raw.properties)?,
            position: raw.position,
        })
    }
}

impl From<Component> for RawComponent {
    fn from(component: Component) -> Self {
        let component_type = component.component_type();
        // Serializing plain string/number records into a Value cannot fail
        let properties = component
            .kind
            .properties_json()
            .unwrap_or(serde_json::Value::Null);

        RawComponent {
            id: component.id,
            component_type,
            name: component.name,
            visible: component.visible,
            locked: component.locked,
            properties,
            position: component.position,
        }
    }
}

/// Accepts `"100%"` as well as `300` (becomes `"300px"`)
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Dimension {
        Text(String),
        Number(f64),
    }

    Ok(match Dimension::deserialize(deserializer)? {
        Dimension::Text(text) => text,
        Dimension::Number(n) if n.fract() == 0.0 => format!("{}px", n as i64),
        Dimension::Number(n) => format!("{}px", n),
    })
}
