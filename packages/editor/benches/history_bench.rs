use criterion::{black_box, criterion_group, criterion_main, Criterion};
use mailforge_document::{ComponentType, IdGenerator, Template, ViewMode};
use mailforge_editor::{Command, EditSession, History, RowPreset, Selection, Snapshot};

/// Template with `sections` sections, each holding a wrapped text and a three-column row
fn build_template(sections: usize) -> Template {
    let mut session =
        EditSession::new(Template::new()).with_id_generator(IdGenerator::from_seed("bench"));

    for _ in 0..sections {
        session.dispatch(Command::AddSection {
            view: ViewMode::Desktop,
            at_index: None,
        });
        let section_id = session
            .selection()
            .section_id()
            .map(str::to_string)
            .unwrap_or_default();
        session.dispatch(Command::AddComponentToSection {
            section_id: section_id.clone(),
            component_type: ComponentType::Text,
            view: ViewMode::Desktop,
        });
        session.dispatch(Command::AddRowTemplate {
            section_id,
            preset: RowPreset::three_column(),
            view: ViewMode::Desktop,
        });
    }

    session.into_template()
}

fn commit_distinct(c: &mut Criterion) {
    let template = build_template(10);

    c.bench_function("history_commit_distinct", |b| {
        b.iter(|| {
            let mut history = History::new();
            for i in 0..60 {
                let mut next = template.clone();
                next.name = format!("rev {}", i);
                history.commit(Snapshot::new(black_box(next), Selection::None));
            }
            history
        })
    });
}

fn commit_identical(c: &mut Criterion) {
    let template = build_template(10);
    let mut history = History::new();
    history.commit(Snapshot::new(template.clone(), Selection::None));

    c.bench_function("history_commit_identical", |b| {
        b.iter(|| history.commit(Snapshot::new(black_box(template.clone()), Selection::None)))
    });
}

fn dispatch_and_undo(c: &mut Criterion) {
    let template = build_template(10);

    c.bench_function("session_dispatch_undo", |b| {
        b.iter(|| {
            let mut session = EditSession::new(template.clone());
            session.dispatch(Command::AddSection {
                view: ViewMode::Desktop,
                at_index: Some(0),
            });
            session.undo()
        })
    });
}

criterion_group!(benches, commit_distinct, commit_identical, dispatch_and_undo);
criterion_main!(benches);
