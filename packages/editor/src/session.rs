//! # Edit Session
//!
//! Owned editing state for one template: the document, the active view,
//! selection, hover and undo history.
//!
//! Every user gesture maps to exactly one [`Action`] passed to
//! [`EditSession::perform`]. For document commands the order is always
//! mutate, commit to history, then update selection, so that undo restores
//! the selection that went with each state.

use crate::history::{History, Snapshot};
use crate::mutations::{self, Command, NoopReason, Outcome, SelectionEffect};
use crate::selection::{Hover, NodeKind, Selection};
use crate::EditorError;
use mailforge_document::{project, IdGenerator, Template, ViewMode, ViewProjection};
use serde::{Deserialize, Serialize};

/// Anything a UI layer can ask of the editor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Action {
    Command(Command),
    Session(SessionAction),
}

/// Actions that change editor state without touching the document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum SessionAction {
    SetViewMode {
        mode: ViewMode,
    },
    SetHoveredItem {
        #[serde(default)]
        hover: Option<Hover>,
    },
    Select {
        id: String,
        kind: NodeKind,
    },
    ClearSelection,
    Undo,
    Redo,
}

impl From<Command> for Action {
    fn from(command: Command) -> Self {
        Action::Command(command)
    }
}

impl From<SessionAction> for Action {
    fn from(action: SessionAction) -> Self {
        Action::Session(action)
    }
}

/// Parse a JSON array of actions
pub fn parse_script(json: &str) -> Result<Vec<Action>, EditorError> {
    Ok(serde_json::from_str(json)?)
}

pub struct EditSession {
    template: Template,
    view_mode: ViewMode,
    selection: Selection,
    hover: Option<Hover>,
    history: History,
    ids: IdGenerator,
}

impl EditSession {
    pub fn new(template: Template) -> Self {
        Self::with_history(template, History::new())
    }

    pub fn with_history(template: Template, mut history: History) -> Self {
        history.clear();
        history.commit(Snapshot::new(template.clone(), Selection::None));

        Self {
            template,
            view_mode: ViewMode::default(),
            selection: Selection::None,
            hover: None,
            history,
            ids: IdGenerator::random(),
        }
    }

    /// Use `ids` for every node created from now on
    pub fn with_id_generator(mut self, ids: IdGenerator) -> Self {
        self.ids = ids;
        self
    }

    pub fn with_view_mode(mut self, mode: ViewMode) -> Self {
        self.view_mode = mode;
        self
    }

    pub fn template(&self) -> &Template {
        &self.template
    }

    pub fn into_template(self) -> Template {
        self.template
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn hover(&self) -> Option<&Hover> {
        self.hover.as_ref()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Visible tree of the active view
    pub fn projection(&self) -> ViewProjection<'_> {
        project(&self.template, self.view_mode)
    }

    /// Single dispatch entry for every action
    pub fn perform(&mut self, action: Action) -> Outcome {
        match action {
            Action::Command(command) => self.dispatch(command),
            Action::Session(SessionAction::SetViewMode { mode }) => self.set_view_mode(mode),
            Action::Session(SessionAction::SetHoveredItem { hover }) => {
                self.set_hovered_item(hover)
            }
            Action::Session(SessionAction::Select { id, kind }) => self.select(&id, kind),
            Action::Session(SessionAction::ClearSelection) => self.clear_selection(),
            Action::Session(SessionAction::Undo) => {
                to_outcome(self.undo(), NoopReason::NothingToUndo)
            }
            Action::Session(SessionAction::Redo) => {
                to_outcome(self.redo(), NoopReason::NothingToRedo)
            }
        }
    }

    /// Apply one document command
    ///
    /// A selection change requested by a command that targets the inactive
    /// view is ignored.
    pub fn dispatch(&mut self, command: Command) -> Outcome {
        let transition = mutations::apply(&self.template, &command, &mut self.ids);

        if let Outcome::Noop(reason) = &transition.outcome {
            tracing::debug!("[{}] Noop: {}", command.name(), reason);
            return transition.outcome;
        }

        self.template = transition.template;

        let selection = match transition.selection {
            SelectionEffect::Select(selection) if command.view() == self.view_mode => selection,
            _ => self.selection.clone(),
        };
        let selection = selection.prune(self.template.view(self.view_mode));

        self.history
            .commit(Snapshot::new(self.template.clone(), selection.clone()));
        self.selection = selection;

        tracing::debug!("[{}] Applied", command.name());
        Outcome::Applied
    }

    /// Restore the previous snapshot, returning whether anything changed
    pub fn undo(&mut self) -> bool {
        let Some(snapshot) = self.history.undo() else {
            return false;
        };
        let snapshot = snapshot.clone();
        self.restore(snapshot);
        true
    }

    /// Re-apply the next undone snapshot, returning whether anything changed
    pub fn redo(&mut self) -> bool {
        let Some(snapshot) = self.history.redo() else {
            return false;
        };
        let snapshot = snapshot.clone();
        self.restore(snapshot);
        true
    }

    fn restore(&mut self, snapshot: Snapshot) {
        self.template = snapshot.template;
        self.selection = snapshot
            .selection
            .prune(self.template.view(self.view_mode));
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) -> Outcome {
        if mode == self.view_mode {
            return Outcome::Noop(NoopReason::Unchanged);
        }
        self.view_mode = mode;
        self.hover = None;
        self.update_selection(self.selection.prune(self.template.view(mode)));
        Outcome::Applied
    }

    /// Last hover wins; `None` clears it
    pub fn set_hovered_item(&mut self, hover: Option<Hover>) -> Outcome {
        if hover == self.hover {
            return Outcome::Noop(NoopReason::Unchanged);
        }
        self.hover = hover;
        Outcome::Applied
    }

    /// Select a node of the active view by id, resolving its ancestors
    pub fn select(&mut self, id: &str, kind: NodeKind) -> Outcome {
        match Selection::resolve(self.template.view(self.view_mode), id, kind) {
            Some(selection) => {
                self.update_selection(selection);
                Outcome::Applied
            }
            None => Outcome::Noop(NoopReason::NotInView(id.to_string())),
        }
    }

    pub fn clear_selection(&mut self) -> Outcome {
        if self.selection.is_none() {
            return Outcome::Noop(NoopReason::Unchanged);
        }
        self.update_selection(Selection::None);
        Outcome::Applied
    }

    /// Replace the document, discarding history, selection and hover
    pub fn load_template(&mut self, template: Template) {
        self.history.clear();
        self.history
            .commit(Snapshot::new(template.clone(), Selection::None));
        self.template = template;
        self.selection = Selection::None;
        self.hover = None;
    }

    fn update_selection(&mut self, selection: Selection) {
        self.history.reselect(selection.clone());
        self.selection = selection;
    }
}

fn to_outcome(changed: bool, reason: NoopReason) -> Outcome {
    if changed {
        Outcome::Applied
    } else {
        Outcome::Noop(reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::HoverKind;
    use mailforge_document::ComponentType;

    fn session() -> EditSession {
        EditSession::new(Template::new()).with_id_generator(IdGenerator::from_seed("t"))
    }

    fn add_section(view: ViewMode) -> Command {
        Command::AddSection {
            view,
            at_index: None,
        }
    }

    #[test]
    fn test_add_section_selects_it() {
        let mut session = session();
        assert_eq!(session.dispatch(add_section(ViewMode::Desktop)), Outcome::Applied);

        let section_id = session.template().views.desktop.sections[0].id.clone();
        assert_eq!(session.selection(), &Selection::section(section_id));
        assert_eq!(session.history().undo_levels(), 1);
    }

    #[test]
    fn test_other_view_command_keeps_selection() {
        let mut session = session();
        session.dispatch(add_section(ViewMode::Desktop));
        let before = session.selection().clone();

        session.dispatch(add_section(ViewMode::Mobile));
        assert_eq!(session.selection(), &before);
        assert_eq!(session.template().views.mobile.sections.len(), 1);
    }

    #[test]
    fn test_view_switch_prunes_selection() {
        let mut session = session();
        session.dispatch(add_section(ViewMode::Desktop));
        assert!(!session.selection().is_none());

        session.set_view_mode(ViewMode::Mobile);
        assert!(session.selection().is_none());
    }

    #[test]
    fn test_undo_restores_selection() {
        let mut session = session();
        session.dispatch(add_section(ViewMode::Desktop));
        let section_id = session.template().views.desktop.sections[0].id.clone();
        session.dispatch(Command::AddComponentToSection {
            section_id: section_id.clone(),
            component_type: ComponentType::Text,
            view: ViewMode::Desktop,
        });
        assert!(session.selection().component_id().is_some());

        assert!(session.undo());
        assert_eq!(session.selection(), &Selection::section(section_id));

        assert!(session.redo());
        assert!(session.selection().component_id().is_some());
        assert!(!session.redo());
    }

    #[test]
    fn test_select_unknown_id() {
        let mut session = session();
        assert_eq!(
            session.select("ghost", NodeKind::Component),
            Outcome::Noop(NoopReason::NotInView("ghost".to_string()))
        );
    }

    #[test]
    fn test_perform_session_actions() {
        let mut session = session();
        let hover = Hover {
            id: "s1".to_string(),
            kind: HoverKind::Column,
        };

        assert_eq!(
            session.perform(SessionAction::SetHoveredItem { hover: Some(hover.clone()) }.into()),
            Outcome::Applied
        );
        assert_eq!(session.hover(), Some(&hover));
        assert_eq!(
            session.perform(SessionAction::Undo.into()),
            Outcome::Noop(NoopReason::NothingToUndo)
        );
    }

    #[test]
    fn test_parse_script() {
        let actions = parse_script(
            r#"[
                { "type": "addSection", "view": "desktop" },
                { "type": "setViewMode", "mode": "mobile" },
                { "type": "select", "id": "x", "kind": "row" },
                { "type": "undo" }
            ]"#,
        )
        .unwrap();

        assert_eq!(actions.len(), 4);
        assert!(matches!(actions[0], Action::Command(Command::AddSection { .. })));
        assert_eq!(
            actions[1],
            Action::Session(SessionAction::SetViewMode {
                mode: ViewMode::Mobile
            })
        );
        assert_eq!(actions[3], Action::Session(SessionAction::Undo));
    }

    #[test]
    fn test_parse_script_rejects_unknown_action() {
        assert!(parse_script(r#"[{ "type": "explode" }]"#).is_err());
    }
}
