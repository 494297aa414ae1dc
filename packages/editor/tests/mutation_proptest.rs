//! Property-based tests for the command engine
//!
//! - Ids stay unique under any sequence of add/duplicate commands
//! - Commands aimed at ids absent from the document change nothing
//! - Undoing every step then redoing every step replays the same states

use mailforge_document::{duplicate_ids, ComponentType, IdGenerator, Template, ViewMode};
use mailforge_editor::{apply, Command, ComponentPatch, EditSession, NodePatch, Outcome, RowPreset};
use proptest::prelude::*;

/// Abstract step; node picks are resolved against the live document
#[derive(Debug, Clone)]
enum Step {
    AddSection(ViewMode),
    AddComponent(usize, ComponentType),
    AddToColumn(usize, usize, ComponentType),
    AddPreset(usize, usize),
    DuplicateSection(usize),
    DuplicateRow(usize, usize),
    DuplicateComponent(usize, usize, usize),
    MoveSection(usize, usize),
    ToggleSectionLock(usize),
    RemoveRow(usize, usize),
}

fn view_strategy() -> impl Strategy<Value = ViewMode> {
    prop_oneof![Just(ViewMode::Desktop), Just(ViewMode::Mobile)]
}

fn component_type_strategy() -> impl Strategy<Value = ComponentType> {
    prop_oneof![
        Just(ComponentType::Text),
        Just(ComponentType::Image),
        Just(ComponentType::Button),
    ]
}

fn step_strategy() -> impl Strategy<Value = Step> {
    let pick = 0usize..8;
    prop_oneof![
        3 => view_strategy().prop_map(Step::AddSection),
        3 => (pick.clone(), component_type_strategy()).prop_map(|(s, t)| Step::AddComponent(s, t)),
        2 => (pick.clone(), pick.clone(), component_type_strategy())
            .prop_map(|(s, r, t)| Step::AddToColumn(s, r, t)),
        1 => (pick.clone(), 0usize..3).prop_map(|(s, p)| Step::AddPreset(s, p)),
        1 => pick.clone().prop_map(Step::DuplicateSection),
        1 => (pick.clone(), pick.clone()).prop_map(|(s, r)| Step::DuplicateRow(s, r)),
        1 => (pick.clone(), pick.clone(), pick.clone())
            .prop_map(|(s, r, c)| Step::DuplicateComponent(s, r, c)),
        1 => (pick.clone(), pick.clone()).prop_map(|(s, i)| Step::MoveSection(s, i)),
        1 => pick.clone().prop_map(Step::ToggleSectionLock),
        1 => (pick.clone(), pick).prop_map(|(s, r)| Step::RemoveRow(s, r)),
    ]
}

/// Turn a step into a concrete command against the desktop view
fn resolve(template: &Template, step: &Step) -> Option<Command> {
    let view = ViewMode::Desktop;
    let sections = &template.views.desktop.sections;
    let section = |i: usize| sections.get(i % sections.len().max(1));
    let row = |s: usize, r: usize| {
        section(s).and_then(|section| {
            section
                .rows
                .get(r % section.rows.len().max(1))
                .map(|row| (section, row))
        })
    };

    let command = match step {
        Step::AddSection(mode) => Command::AddSection {
            view: *mode,
            at_index: None,
        },
        Step::AddComponent(s, component_type) => Command::AddComponentToSection {
            section_id: section(*s)?.id.clone(),
            component_type: *component_type,
            view,
        },
        Step::AddToColumn(s, r, component_type) => {
            let (section, row) = row(*s, *r)?;
            Command::AddComponentToColumn {
                section_id: section.id.clone(),
                row_id: row.id.clone(),
                column_index: 0,
                component_type: *component_type,
                view,
            }
        }
        Step::AddPreset(s, p) => Command::AddRowTemplate {
            section_id: section(*s)?.id.clone(),
            preset: RowPreset::builtin(RowPreset::BUILTIN_IDS[*p])?,
            view,
        },
        Step::DuplicateSection(s) => Command::DuplicateSection {
            section_id: section(*s)?.id.clone(),
            view,
        },
        Step::DuplicateRow(s, r) => {
            let (section, row) = row(*s, *r)?;
            Command::DuplicateRow {
                section_id: section.id.clone(),
                row_id: row.id.clone(),
                view,
            }
        }
        Step::DuplicateComponent(s, r, c) => {
            let (section, row) = row(*s, *r)?;
            let component = row.components.get(c % row.components.len().max(1))?;
            Command::DuplicateComponent {
                section_id: section.id.clone(),
                row_id: row.id.clone(),
                component_id: component.id.clone(),
                view,
            }
        }
        Step::MoveSection(s, i) => Command::MoveSection {
            section_id: section(*s)?.id.clone(),
            new_index: *i,
            view,
        },
        Step::ToggleSectionLock(s) => Command::ToggleSectionLock {
            section_id: section(*s)?.id.clone(),
            view,
        },
        Step::RemoveRow(s, r) => {
            let (section, row) = row(*s, *r)?;
            Command::RemoveRow {
                section_id: section.id.clone(),
                row_id: row.id.clone(),
                view,
            }
        }
    };
    Some(command)
}

fn run(steps: &[Step]) -> (EditSession, Vec<Template>) {
    let mut session =
        EditSession::new(Template::new()).with_id_generator(IdGenerator::from_seed("p"));
    let mut states = vec![session.template().clone()];

    for step in steps {
        if let Some(command) = resolve(session.template(), step) {
            if session.dispatch(command) == Outcome::Applied {
                states.push(session.template().clone());
            }
        }
    }
    (session, states)
}

/// Every command shape, aimed at ids that cannot exist
fn stale_commands() -> Vec<Command> {
    let view = ViewMode::Desktop;
    let s = || "missing-section".to_string();
    let r = || "missing-row".to_string();
    let c = || "missing-component".to_string();

    vec![
        Command::RemoveSection {
            section_id: s(),
            view,
        },
        Command::UpdateSection {
            section_id: s(),
            patch: NodePatch::new().name("x"),
            view,
        },
        Command::MoveSection {
            section_id: s(),
            new_index: 0,
            view,
        },
        Command::DuplicateSection {
            section_id: s(),
            view,
        },
        Command::ToggleSectionVisibility {
            section_id: s(),
            view,
        },
        Command::ToggleSectionLock {
            section_id: s(),
            view,
        },
        Command::AddRow {
            section_id: s(),
            view,
        },
        Command::RemoveRow {
            section_id: s(),
            row_id: r(),
            view,
        },
        Command::UpdateRow {
            section_id: s(),
            row_id: r(),
            patch: NodePatch::new().visible(false),
            view,
        },
        Command::MoveRow {
            section_id: s(),
            row_id: r(),
            new_index: 1,
            view,
        },
        Command::DuplicateRow {
            section_id: s(),
            row_id: r(),
            view,
        },
        Command::ToggleRowVisibility {
            section_id: s(),
            row_id: r(),
            view,
        },
        Command::ToggleRowLock {
            section_id: s(),
            row_id: r(),
            view,
        },
        Command::AddComponentToSection {
            section_id: s(),
            component_type: ComponentType::Text,
            view,
        },
        Command::AddComponentToColumn {
            section_id: s(),
            row_id: r(),
            column_index: 0,
            component_type: ComponentType::Image,
            view,
        },
        Command::AddRowTemplate {
            section_id: s(),
            preset: RowPreset::single_column(),
            view,
        },
        Command::RemoveComponent {
            section_id: s(),
            row_id: r(),
            component_id: c(),
            view,
        },
        Command::UpdateComponent {
            section_id: s(),
            row_id: r(),
            component_id: c(),
            patch: ComponentPatch::new().property("content", "x"),
            view,
        },
        Command::MoveComponent {
            section_id: s(),
            row_id: r(),
            component_id: c(),
            new_index: 0,
            view,
        },
        Command::DuplicateComponent {
            section_id: s(),
            row_id: r(),
            component_id: c(),
            view,
        },
        Command::ToggleComponentVisibility {
            section_id: s(),
            row_id: r(),
            component_id: c(),
            view,
        },
        Command::ToggleComponentLock {
            section_id: s(),
            row_id: r(),
            component_id: c(),
            view,
        },
    ]
}

#[cfg(test)]
mod proptest_tests {
    use super::*;

    proptest! {
        #[test]
        fn ids_stay_unique(steps in prop::collection::vec(step_strategy(), 1..40)) {
            let (session, _) = run(&steps);
            prop_assert!(duplicate_ids(session.template()).is_empty());
        }

        #[test]
        fn stale_ids_are_noops(steps in prop::collection::vec(step_strategy(), 0..20)) {
            let (session, _) = run(&steps);
            let template = session.template();
            let mut ids = IdGenerator::from_seed("stale");

            for command in stale_commands() {
                let transition = apply(template, &command, &mut ids);
                prop_assert!(!transition.outcome.is_applied(), "{} applied", command.name());
                prop_assert_eq!(&transition.template, template);
            }
        }

        #[test]
        fn undo_redo_replays_states(steps in prop::collection::vec(step_strategy(), 1..30)) {
            let (mut session, states) = run(&steps);
            // Only the last 50 states can be reached again
            let reachable = &states[states.len().saturating_sub(51)..];

            for expected in reachable.iter().rev().skip(1) {
                prop_assert!(session.undo());
                prop_assert_eq!(session.template(), expected);
            }
            prop_assert!(!session.undo());

            for expected in reachable.iter().skip(1) {
                prop_assert!(session.redo());
                prop_assert_eq!(session.template(), expected);
            }
            prop_assert!(!session.redo());
        }

        #[test]
        fn selection_points_into_view(steps in prop::collection::vec(step_strategy(), 1..40)) {
            let (session, _) = run(&steps);
            let selection = session.selection();
            let view = session.template().view(session.view_mode());
            prop_assert_eq!(&selection.prune(view), selection);
        }
    }
}
