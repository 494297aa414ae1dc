//! # Selection and Hover
//!
//! Selection is companion state kept next to the template, never inside it.
//! Each granularity implies its ancestors, so a selected component always
//! carries the ids of its row and section.

use mailforge_document::TemplateView;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Selection {
    #[default]
    None,
    Section {
        section_id: String,
    },
    Row {
        section_id: String,
        row_id: String,
    },
    Component {
        section_id: String,
        row_id: String,
        component_id: String,
    },
}

/// Granularity of a selectable node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Section,
    Row,
    Component,
}

/// Kinds the canvas can highlight on hover (columns are hoverable, not selectable)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HoverKind {
    Section,
    Row,
    Column,
    Component,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hover {
    pub id: String,
    pub kind: HoverKind,
}

impl Selection {
    pub fn section(section_id: impl Into<String>) -> Self {
        Selection::Section {
            section_id: section_id.into(),
        }
    }

    pub fn row(section_id: impl Into<String>, row_id: impl Into<String>) -> Self {
        Selection::Row {
            section_id: section_id.into(),
            row_id: row_id.into(),
        }
    }

    pub fn component(
        section_id: impl Into<String>,
        row_id: impl Into<String>,
        component_id: impl Into<String>,
    ) -> Self {
        Selection::Component {
            section_id: section_id.into(),
            row_id: row_id.into(),
            component_id: component_id.into(),
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Selection::None)
    }

    pub fn section_id(&self) -> Option<&str> {
        match self {
            Selection::None => None,
            Selection::Section { section_id }
            | Selection::Row { section_id, .. }
            | Selection::Component { section_id, .. } => Some(section_id),
        }
    }

    pub fn row_id(&self) -> Option<&str> {
        match self {
            Selection::Row { row_id, .. } | Selection::Component { row_id, .. } => Some(row_id),
            _ => None,
        }
    }

    pub fn component_id(&self) -> Option<&str> {
        match self {
            Selection::Component { component_id, .. } => Some(component_id),
            _ => None,
        }
    }

    /// Resolve `id` of `kind` to a full selection by scanning `view`
    ///
    /// Returns `None` when no such node exists in the view.
    pub fn resolve(view: &TemplateView, id: &str, kind: NodeKind) -> Option<Selection> {
        match kind {
            NodeKind::Section => view.find_section(id).map(|s| Selection::section(&s.id)),
            NodeKind::Row => view
                .locate_row(id)
                .map(|section_id| Selection::row(section_id, id)),
            NodeKind::Component => view
                .locate_component(id)
                .map(|(section_id, row_id)| Selection::component(section_id, row_id, id)),
        }
    }

    /// Drop whatever part of the selection no longer exists in `view`
    ///
    /// A missing component falls back to its row, a missing row to its
    /// section, a missing section to nothing.
    pub fn prune(&self, view: &TemplateView) -> Selection {
        let Some(section_id) = self.section_id() else {
            return Selection::None;
        };
        let Some(section) = view.find_section(section_id) else {
            return Selection::None;
        };

        let Some(row_id) = self.row_id() else {
            return Selection::section(section_id);
        };
        let Some(row) = section.find_row(row_id) else {
            return Selection::section(section_id);
        };

        match self.component_id() {
            Some(component_id) if row.find_component(component_id).is_some() => self.clone(),
            _ => Selection::row(section_id, row_id),
        }
    }
}
