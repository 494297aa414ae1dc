//! Partial updates applied by the `Update*` commands.
//!
//! Scalar fields replace the node's value when present. `properties` is a
//! shallow merge: each key in the patch overwrites the same key of the node's
//! properties record, other keys are kept. The merged record must still
//! deserialize into the node's typed properties, otherwise the patch is
//! rejected as a whole.

use crate::mutations::NoopReason;
use mailforge_document::{Component, ComponentKind, Position, Row, Section};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locked: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<Map<String, Value>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentPatch {
    #[serde(flatten)]
    pub node: NodePatch,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

impl NodePatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn visible(mut self, visible: bool) -> Self {
        self.visible = Some(visible);
        self
    }

    pub fn locked(mut self, locked: bool) -> Self {
        self.locked = Some(locked);
        self
    }

    /// Set one key of the properties record (`null` clears optional fields)
    pub fn property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties
            .get_or_insert_with(Map::new)
            .insert(key.into(), value.into());
        self
    }

    fn apply_flags(&self, name: &mut String, visible: &mut bool, locked: &mut bool) {
        if let Some(new_name) = &self.name {
            *name = new_name.clone();
        }
        if let Some(new_visible) = self.visible {
            *visible = new_visible;
        }
        if let Some(new_locked) = self.locked {
            *locked = new_locked;
        }
    }

    pub fn apply_to_section(&self, section: &Section) -> Result<Section, NoopReason> {
        let mut next = section.clone();
        self.apply_flags(&mut next.name, &mut next.visible, &mut next.locked);
        if let Some(properties) = &self.properties {
            next.properties = merge_record(&section.properties, properties)?;
        }
        Ok(next)
    }

    pub fn apply_to_row(&self, row: &Row) -> Result<Row, NoopReason> {
        let mut next = row.clone();
        self.apply_flags(&mut next.name, &mut next.visible, &mut next.locked);
        if let Some(properties) = &self.properties {
            next.properties = merge_record(&row.properties, properties)?;
            if next.properties.columns == 0 {
                return Err(NoopReason::InvalidPatch(
                    "columns must be at least 1".to_string(),
                ));
            }
        }
        Ok(next)
    }
}

impl ComponentPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_node(node: NodePatch) -> Self {
        Self {
            node,
            position: None,
        }
    }

    pub fn property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.node = self.node.property(key, value);
        self
    }

    pub fn position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    pub fn apply_to_component(&self, component: &Component) -> Result<Component, NoopReason> {
        let mut next = component.clone();
        self.node
            .apply_flags(&mut next.name, &mut next.visible, &mut next.locked);

        if let Some(properties) = &self.node.properties {
            let mut record = component.kind.properties_json().map_err(invalid)?;
            merge_into(&mut record, properties);
            next.kind = ComponentKind::from_properties_json(component.component_type(), record)
                .map_err(invalid)?;
        }

        if let Some(position) = &self.position {
            next.position = position.clone();
        }

        Ok(next)
    }
}

/// Shallow-merge `patch` over the JSON form of `current`
pub fn merge_record<T>(current: &T, patch: &Map<String, Value>) -> Result<T, NoopReason>
where
    T: Serialize + DeserializeOwned,
{
    let mut record = serde_json::to_value(current).map_err(invalid)?;
    merge_into(&mut record, patch);
    serde_json::from_value(record).map_err(invalid)
}

fn merge_into(record: &mut Value, patch: &Map<String, Value>) {
    if !record.is_object() {
        *record = Value::Object(Map::new());
    }
    if let Value::Object(fields) = record {
        for (key, value) in patch {
            fields.insert(key.clone(), value.clone());
        }
    }
}

fn invalid(err: serde_json::Error) -> NoopReason {
    NoopReason::InvalidPatch(err.to_string())
}
