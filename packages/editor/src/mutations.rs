//! # Template Mutations
//!
//! Structural and property commands over a [`Template`].
//!
//! ## Semantics
//!
//! Every command is a transform `(Template, Command) → Template`:
//!
//! - A command that references a missing section, row or component is a
//!   no-op. The input document comes back unchanged and the caller gets a
//!   [`NoopReason`] instead of an error.
//! - A command touching a locked node (or a node inside a locked container)
//!   is a no-op. `Toggle*Lock` is always allowed.
//! - Applied commands refresh `updated_at`.
//! - Add and duplicate commands select the node they created, ancestors
//!   included.
//!
//! ### Move
//! - Target index is clamped to the end of the sibling list
//! - Moving onto the current position is a no-op
//!
//! ### Duplicate
//! - Deep copy with a fresh id at every level and `" (Copy)"` appended to
//!   every copied name
//! - Sections and rows land right after the original, components at the end
//!   of their row

use crate::patch::{ComponentPatch, NodePatch};
use crate::presets::RowPreset;
use crate::selection::Selection;
use mailforge_document::{
    defaults, Component, ComponentKind, ComponentType, IdGenerator, Row, Section, Template,
    TemplateView, ViewMode,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structural and property commands
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Command {
    AddSection {
        view: ViewMode,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        at_index: Option<usize>,
    },
    RemoveSection {
        section_id: String,
        view: ViewMode,
    },
    UpdateSection {
        section_id: String,
        patch: NodePatch,
        view: ViewMode,
    },
    MoveSection {
        section_id: String,
        new_index: usize,
        view: ViewMode,
    },
    DuplicateSection {
        section_id: String,
        view: ViewMode,
    },
    ToggleSectionVisibility {
        section_id: String,
        view: ViewMode,
    },
    ToggleSectionLock {
        section_id: String,
        view: ViewMode,
    },

    AddRow {
        section_id: String,
        view: ViewMode,
    },
    RemoveRow {
        section_id: String,
        row_id: String,
        view: ViewMode,
    },
    UpdateRow {
        section_id: String,
        row_id: String,
        patch: NodePatch,
        view: ViewMode,
    },
    MoveRow {
        section_id: String,
        row_id: String,
        new_index: usize,
        view: ViewMode,
    },
    DuplicateRow {
        section_id: String,
        row_id: String,
        view: ViewMode,
    },
    ToggleRowVisibility {
        section_id: String,
        row_id: String,
        view: ViewMode,
    },
    ToggleRowLock {
        section_id: String,
        row_id: String,
        view: ViewMode,
    },

    /// Wrap a new component in a new single-column row appended to the section
    AddComponentToSection {
        section_id: String,
        component_type: ComponentType,
        view: ViewMode,
    },
    AddComponentToColumn {
        section_id: String,
        row_id: String,
        column_index: usize,
        component_type: ComponentType,
        view: ViewMode,
    },
    AddRowTemplate {
        section_id: String,
        preset: RowPreset,
        view: ViewMode,
    },
    RemoveComponent {
        section_id: String,
        row_id: String,
        component_id: String,
        view: ViewMode,
    },
    UpdateComponent {
        section_id: String,
        row_id: String,
        component_id: String,
        patch: ComponentPatch,
        view: ViewMode,
    },
    MoveComponent {
        section_id: String,
        row_id: String,
        component_id: String,
        new_index: usize,
        view: ViewMode,
    },
    DuplicateComponent {
        section_id: String,
        row_id: String,
        component_id: String,
        view: ViewMode,
    },
    ToggleComponentVisibility {
        section_id: String,
        row_id: String,
        component_id: String,
        view: ViewMode,
    },
    ToggleComponentLock {
        section_id: String,
        row_id: String,
        component_id: String,
        view: ViewMode,
    },
}

/// Why a command left the document unchanged
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
pub enum NoopReason {
    #[error("Section not found: {0}")]
    SectionNotFound(String),

    #[error("Row not found: {0}")]
    RowNotFound(String),

    #[error("Component not found: {0}")]
    ComponentNotFound(String),

    #[error("Node is locked: {0}")]
    Locked(String),

    #[error("Command produced no change")]
    Unchanged,

    #[error("Invalid patch: {0}")]
    InvalidPatch(String),

    #[error("Nothing to undo")]
    NothingToUndo,

    #[error("Nothing to redo")]
    NothingToRedo,

    #[error("Node not found in current view: {0}")]
    NotInView(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Outcome {
    Applied,
    Noop(NoopReason),
}

impl Outcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied)
    }
}

/// How the selection should follow a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionEffect {
    Keep,
    Select(Selection),
}

/// Result of applying one command
#[derive(Debug, Clone)]
pub struct Transition {
    pub template: Template,
    pub selection: SelectionEffect,
    pub outcome: Outcome,
}

/// Apply `command` to `template`, returning the next document
///
/// The input is never modified. On a no-op the returned template is a copy
/// of the input, `updated_at` included.
pub fn apply(template: &Template, command: &Command, ids: &mut IdGenerator) -> Transition {
    let mut next = template.clone();

    match command.apply_to(&mut next, ids) {
        Ok(selection) => {
            next.touch();
            Transition {
                template: next,
                selection,
                outcome: Outcome::Applied,
            }
        }
        Err(reason) => Transition {
            template: template.clone(),
            selection: SelectionEffect::Keep,
            outcome: Outcome::Noop(reason),
        },
    }
}

/// Which locks must be clear for an operation to proceed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Guard {
    /// Ignore locks
    Free,
    /// Ancestors must be unlocked (the node is a destination container's child)
    Container,
    /// Ancestors and the node itself must be unlocked
    Node,
}

impl Guard {
    fn for_ancestors(self) -> Guard {
        match self {
            Guard::Free => Guard::Free,
            Guard::Container | Guard::Node => Guard::Node,
        }
    }
}

fn locate_section<'a>(
    view: &'a mut TemplateView,
    section_id: &str,
    guard: Guard,
) -> Result<&'a mut Section, NoopReason> {
    let section = view
        .find_section_mut(section_id)
        .ok_or_else(|| NoopReason::SectionNotFound(section_id.to_string()))?;
    if guard == Guard::Node && section.locked {
        return Err(NoopReason::Locked(section.id.clone()));
    }
    Ok(section)
}

fn locate_row<'a>(
    view: &'a mut TemplateView,
    section_id: &str,
    row_id: &str,
    guard: Guard,
) -> Result<&'a mut Row, NoopReason> {
    let section = locate_section(view, section_id, guard.for_ancestors())?;
    let row = section
        .find_row_mut(row_id)
        .ok_or_else(|| NoopReason::RowNotFound(row_id.to_string()))?;
    if guard == Guard::Node && row.locked {
        return Err(NoopReason::Locked(row.id.clone()));
    }
    Ok(row)
}

fn locate_component<'a>(
    view: &'a mut TemplateView,
    section_id: &str,
    row_id: &str,
    component_id: &str,
    guard: Guard,
) -> Result<&'a mut Component, NoopReason> {
    let row = locate_row(view, section_id, row_id, guard.for_ancestors())?;
    let component = row
        .find_component_mut(component_id)
        .ok_or_else(|| NoopReason::ComponentNotFound(component_id.to_string()))?;
    if guard == Guard::Node && component.locked {
        return Err(NoopReason::Locked(component.id.clone()));
    }
    Ok(component)
}

/// Remove the item at `from` and reinsert it at `to`, clamped to the list end
fn move_within<T>(items: &mut Vec<T>, from: usize, to: usize) -> Result<(), NoopReason> {
    let target = to.min(items.len().saturating_sub(1));
    if target == from {
        return Err(NoopReason::Unchanged);
    }
    let item = items.remove(from);
    items.insert(target, item);
    Ok(())
}

/// Replace `node` with `updated` unless they are equal
fn replace_if_changed<T: PartialEq>(node: &mut T, updated: T) -> Result<(), NoopReason> {
    if *node == updated {
        return Err(NoopReason::Unchanged);
    }
    *node = updated;
    Ok(())
}

fn new_component(
    ids: &mut IdGenerator,
    component_type: ComponentType,
    column_index: usize,
    ordinal: usize,
) -> Component {
    let mut kind = ComponentKind::default_for(component_type);
    kind.set_column_index(column_index);

    Component {
        id: ids.new_id(),
        name: format!("{} {}", component_type.display_name(), ordinal),
        visible: true,
        locked: false,
        kind,
        position: defaults::default_position(component_type),
    }
}

fn copy_name(name: &str) -> String {
    format!("{} (Copy)", name)
}

fn duplicate_component(component: &Component, ids: &mut IdGenerator) -> Component {
    Component {
        id: ids.new_id(),
        name: copy_name(&component.name),
        ..component.clone()
    }
}

fn duplicate_row(row: &Row, ids: &mut IdGenerator) -> Row {
    let id = ids.new_id();
    Row {
        id,
        name: copy_name(&row.name),
        visible: row.visible,
        locked: row.locked,
        properties: row.properties.clone(),
        components: row
            .components
            .iter()
            .map(|component| duplicate_component(component, ids))
            .collect(),
    }
}

fn duplicate_section(section: &Section, ids: &mut IdGenerator) -> Section {
    let id = ids.new_id();
    Section {
        id,
        name: copy_name(&section.name),
        visible: section.visible,
        locked: section.locked,
        properties: section.properties.clone(),
        rows: section
            .rows
            .iter()
            .map(|row| duplicate_row(row, ids))
            .collect(),
    }
}

impl Command {
    /// View this command targets
    pub fn view(&self) -> ViewMode {
        match self {
            Command::AddSection { view, .. }
            | Command::RemoveSection { view, .. }
            | Command::UpdateSection { view, .. }
            | Command::MoveSection { view, .. }
            | Command::DuplicateSection { view, .. }
            | Command::ToggleSectionVisibility { view, .. }
            | Command::ToggleSectionLock { view, .. }
            | Command::AddRow { view, .. }
            | Command::RemoveRow { view, .. }
            | Command::UpdateRow { view, .. }
            | Command::MoveRow { view, .. }
            | Command::DuplicateRow { view, .. }
            | Command::ToggleRowVisibility { view, .. }
            | Command::ToggleRowLock { view, .. }
            | Command::AddComponentToSection { view, .. }
            | Command::AddComponentToColumn { view, .. }
            | Command::AddRowTemplate { view, .. }
            | Command::RemoveComponent { view, .. }
            | Command::UpdateComponent { view, .. }
            | Command::MoveComponent { view, .. }
            | Command::DuplicateComponent { view, .. }
            | Command::ToggleComponentVisibility { view, .. }
            | Command::ToggleComponentLock { view, .. } => *view,
        }
    }

    /// Debug name for logging
    pub fn name(&self) -> &'static str {
        match self {
            Command::AddSection { .. } => "AddSection",
            Command::RemoveSection { .. } => "RemoveSection",
            Command::UpdateSection { .. } => "UpdateSection",
            Command::MoveSection { .. } => "MoveSection",
            Command::DuplicateSection { .. } => "DuplicateSection",
            Command::ToggleSectionVisibility { .. } => "ToggleSectionVisibility",
            Command::ToggleSectionLock { .. } => "ToggleSectionLock",
            Command::AddRow { .. } => "AddRow",
            Command::RemoveRow { .. } => "RemoveRow",
            Command::UpdateRow { .. } => "UpdateRow",
            Command::MoveRow { .. } => "MoveRow",
            Command::DuplicateRow { .. } => "DuplicateRow",
            Command::ToggleRowVisibility { .. } => "ToggleRowVisibility",
            Command::ToggleRowLock { .. } => "ToggleRowLock",
            Command::AddComponentToSection { .. } => "AddComponentToSection",
            Command::AddComponentToColumn { .. } => "AddComponentToColumn",
            Command::AddRowTemplate { .. } => "AddRowTemplate",
            Command::RemoveComponent { .. } => "RemoveComponent",
            Command::UpdateComponent { .. } => "UpdateComponent",
            Command::MoveComponent { .. } => "MoveComponent",
            Command::DuplicateComponent { .. } => "DuplicateComponent",
            Command::ToggleComponentVisibility { .. } => "ToggleComponentVisibility",
            Command::ToggleComponentLock { .. } => "ToggleComponentLock",
        }
    }

    fn apply_to(
        &self,
        template: &mut Template,
        ids: &mut IdGenerator,
    ) -> Result<SelectionEffect, NoopReason> {
        let view = template.view_mut(self.view());

        match self {
            Command::AddSection { at_index, .. } => {
                let count = view.sections.len();
                let section = Section {
                    id: ids.new_id(),
                    name: format!("Section {}", count + 1),
                    visible: true,
                    locked: false,
                    properties: defaults::new_section_properties(),
                    rows: Vec::new(),
                };
                let selection = Selection::section(&section.id);
                let index = at_index.map_or(count, |index| index.min(count));
                view.sections.insert(index, section);
                Ok(SelectionEffect::Select(selection))
            }

            Command::RemoveSection { section_id, .. } => {
                locate_section(view, section_id, Guard::Node)?;
                view.sections.retain(|s| s.id != *section_id);
                Ok(SelectionEffect::Keep)
            }

            Command::UpdateSection {
                section_id, patch, ..
            } => {
                let section = locate_section(view, section_id, Guard::Node)?;
                let updated = patch.apply_to_section(section)?;
                replace_if_changed(section, updated)?;
                Ok(SelectionEffect::Keep)
            }

            Command::MoveSection {
                section_id,
                new_index,
                ..
            } => {
                locate_section(view, section_id, Guard::Node)?;
                let from = view
                    .sections
                    .iter()
                    .position(|s| s.id == *section_id)
                    .ok_or_else(|| NoopReason::SectionNotFound(section_id.clone()))?;
                move_within(&mut view.sections, from, *new_index)?;
                Ok(SelectionEffect::Keep)
            }

            Command::DuplicateSection { section_id, .. } => {
                let index = view
                    .sections
                    .iter()
                    .position(|s| s.id == *section_id)
                    .ok_or_else(|| NoopReason::SectionNotFound(section_id.clone()))?;
                let copy = duplicate_section(&view.sections[index], ids);
                let selection = Selection::section(&copy.id);
                view.sections.insert(index + 1, copy);
                Ok(SelectionEffect::Select(selection))
            }

            Command::ToggleSectionVisibility { section_id, .. } => {
                let section = locate_section(view, section_id, Guard::Node)?;
                section.visible = !section.visible;
                Ok(SelectionEffect::Keep)
            }

            Command::ToggleSectionLock { section_id, .. } => {
                let section = locate_section(view, section_id, Guard::Free)?;
                section.locked = !section.locked;
                Ok(SelectionEffect::Keep)
            }

            Command::AddRow { section_id, .. } => {
                let section = locate_section(view, section_id, Guard::Node)?;
                let row = Row {
                    id: ids.new_id(),
                    name: format!("Row {}", section.rows.len() + 1),
                    visible: true,
                    locked: false,
                    properties: defaults::new_row_properties(),
                    components: Vec::new(),
                };
                let selection = Selection::row(section_id, &row.id);
                section.rows.push(row);
                Ok(SelectionEffect::Select(selection))
            }

            Command::RemoveRow {
                section_id, row_id, ..
            } => {
                locate_row(view, section_id, row_id, Guard::Node)?;
                let section = locate_section(view, section_id, Guard::Free)?;
                section.rows.retain(|r| r.id != *row_id);
                Ok(SelectionEffect::Keep)
            }

            Command::UpdateRow {
                section_id,
                row_id,
                patch,
                ..
            } => {
                let row = locate_row(view, section_id, row_id, Guard::Node)?;
                let updated = patch.apply_to_row(row)?;
                replace_if_changed(row, updated)?;
                Ok(SelectionEffect::Keep)
            }

            Command::MoveRow {
                section_id,
                row_id,
                new_index,
                ..
            } => {
                locate_row(view, section_id, row_id, Guard::Node)?;
                let section = locate_section(view, section_id, Guard::Free)?;
                let from = section
                    .rows
                    .iter()
                    .position(|r| r.id == *row_id)
                    .ok_or_else(|| NoopReason::RowNotFound(row_id.clone()))?;
                move_within(&mut section.rows, from, *new_index)?;
                Ok(SelectionEffect::Keep)
            }

            Command::DuplicateRow {
                section_id, row_id, ..
            } => {
                locate_row(view, section_id, row_id, Guard::Container)?;
                let section = locate_section(view, section_id, Guard::Free)?;
                let index = section
                    .rows
                    .iter()
                    .position(|r| r.id == *row_id)
                    .ok_or_else(|| NoopReason::RowNotFound(row_id.clone()))?;
                let copy = duplicate_row(&section.rows[index], ids);
                let selection = Selection::row(section_id, &copy.id);
                section.rows.insert(index + 1, copy);
                Ok(SelectionEffect::Select(selection))
            }

            Command::ToggleRowVisibility {
                section_id, row_id, ..
            } => {
                let row = locate_row(view, section_id, row_id, Guard::Node)?;
                row.visible = !row.visible;
                Ok(SelectionEffect::Keep)
            }

            Command::ToggleRowLock {
                section_id, row_id, ..
            } => {
                let row = locate_row(view, section_id, row_id, Guard::Free)?;
                row.locked = !row.locked;
                Ok(SelectionEffect::Keep)
            }

            Command::AddComponentToSection {
                section_id,
                component_type,
                ..
            } => {
                let section = locate_section(view, section_id, Guard::Node)?;
                let component = new_component(ids, *component_type, 0, 1);
                let row = Row {
                    id: ids.new_id(),
                    name: format!("Row {}", section.rows.len() + 1),
                    visible: true,
                    locked: false,
                    properties: defaults::wrapper_row_properties(),
                    components: vec![component],
                };
                let selection =
                    Selection::component(section_id, &row.id, &row.components[0].id);
                section.rows.push(row);
                Ok(SelectionEffect::Select(selection))
            }

            Command::AddComponentToColumn {
                section_id,
                row_id,
                column_index,
                component_type,
                ..
            } => {
                let row = locate_row(view, section_id, row_id, Guard::Node)?;
                let component = new_component(
                    ids,
                    *component_type,
                    *column_index,
                    row.components.len() + 1,
                );
                let selection = Selection::component(section_id, row_id, &component.id);
                row.components.push(component);
                Ok(SelectionEffect::Select(selection))
            }

            Command::AddRowTemplate {
                section_id, preset, ..
            } => {
                let section = locate_section(view, section_id, Guard::Node)?;
                let row = preset.instantiate(ids, section.rows.len());
                let selection = Selection::row(section_id, &row.id);
                section.rows.push(row);
                Ok(SelectionEffect::Select(selection))
            }

            Command::RemoveComponent {
                section_id,
                row_id,
                component_id,
                ..
            } => {
                locate_component(view, section_id, row_id, component_id, Guard::Node)?;
                let row = locate_row(view, section_id, row_id, Guard::Free)?;
                row.components.retain(|c| c.id != *component_id);
                Ok(SelectionEffect::Keep)
            }

            Command::UpdateComponent {
                section_id,
                row_id,
                component_id,
                patch,
                ..
            } => {
                let component =
                    locate_component(view, section_id, row_id, component_id, Guard::Node)?;
                let updated = patch.apply_to_component(component)?;
                replace_if_changed(component, updated)?;
                Ok(SelectionEffect::Keep)
            }

            Command::MoveComponent {
                section_id,
                row_id,
                component_id,
                new_index,
                ..
            } => {
                locate_component(view, section_id, row_id, component_id, Guard::Node)?;
                let row = locate_row(view, section_id, row_id, Guard::Free)?;
                let from = row
                    .components
                    .iter()
                    .position(|c| c.id == *component_id)
                    .ok_or_else(|| NoopReason::ComponentNotFound(component_id.clone()))?;
                move_within(&mut row.components, from, *new_index)?;
                Ok(SelectionEffect::Keep)
            }

            Command::DuplicateComponent {
                section_id,
                row_id,
                component_id,
                ..
            } => {
                let original =
                    locate_component(view, section_id, row_id, component_id, Guard::Container)?;
                let copy = duplicate_component(original, ids);
                let selection = Selection::component(section_id, row_id, &copy.id);
                let row = locate_row(view, section_id, row_id, Guard::Free)?;
                row.components.push(copy);
                Ok(SelectionEffect::Select(selection))
            }

            Command::ToggleComponentVisibility {
                section_id,
                row_id,
                component_id,
                ..
            } => {
                let component =
                    locate_component(view, section_id, row_id, component_id, Guard::Node)?;
                component.visible = !component.visible;
                Ok(SelectionEffect::Keep)
            }

            Command::ToggleComponentLock {
                section_id,
                row_id,
                component_id,
                ..
            } => {
                let component =
                    locate_component(view, section_id, row_id, component_id, Guard::Free)?;
                component.locked = !component.locked;
                Ok(SelectionEffect::Keep)
            }
        }
    }
}
