use criterion::{black_box, criterion_group, criterion_main, Criterion};
use mailforge_compiler_html::{compile_to_html, CompileOptions};
use mailforge_document::{ComponentType, IdGenerator, Template, ViewMode};
use mailforge_editor::{Command, EditSession, RowPreset};

fn newsletter(sections: usize) -> Template {
    let mut session = EditSession::new(Template::named("Newsletter"))
        .with_id_generator(IdGenerator::from_seed("b"));

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
        for component_type in ComponentType::ALL {
            session.dispatch(Command::AddComponentToSection {
                section_id: section_id.clone(),
                component_type,
                view: ViewMode::Desktop,
            });
        }
        session.dispatch(Command::AddRowTemplate {
            section_id,
            preset: RowPreset::two_column(),
            view: ViewMode::Desktop,
        });
    }

    session.into_template()
}

fn compile_newsletter(c: &mut Criterion) {
    let template = newsletter(12);

    c.bench_function("compile_newsletter_pretty", |b| {
        b.iter(|| {
            compile_to_html(
                black_box(&template),
                ViewMode::Desktop,
                CompileOptions::default(),
            )
        })
    });

    let compact = CompileOptions {
        pretty: false,
        ..Default::default()
    };
    c.bench_function("compile_newsletter_compact", |b| {
        b.iter(|| compile_to_html(black_box(&template), ViewMode::Desktop, compact.clone()))
    });
}

criterion_group!(benches, compile_newsletter);
criterion_main!(benches);
