use crate::{compile_to_html, CompileError, CompileOptions};
use mailforge_document::{ComponentType, IdGenerator, Template, ViewMode};
use mailforge_editor::{
    Action, Command, ComponentPatch, EditSession, NodePatch, Outcome, RowPreset,
};

fn session() -> (EditSession, String) {
    let mut session = EditSession::new(Template::named("Spring Sale"))
        .with_id_generator(IdGenerator::from_seed("x"));
    session.dispatch(Command::AddSection {
        view: ViewMode::Desktop,
        at_index: None,
    });
    let section_id = session
        .selection()
        .section_id()
        .expect("section selected")
        .to_string();
    (session, section_id)
}

fn compile(template: &Template) -> String {
    compile_to_html(template, ViewMode::Desktop, CompileOptions::default())
        .expect("Failed to compile")
}

#[test]
fn test_compile_empty_template() {
    let template = Template::named("Empty");
    let html = compile(&template);

    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("<title>Empty</title>"));
    assert!(html.contains("max-width: 1200px;"));
    assert!(html.contains("@media (max-width: 600px) {"));
    assert!(html.contains("<div class=\"email-container\">"));
    assert!(!html.contains("class=\"section\""));
}

#[test]
fn test_compile_text_component() {
    let (mut session, section_id) = session();
    session.dispatch(Command::AddComponentToSection {
        section_id,
        component_type: ComponentType::Text,
        view: ViewMode::Desktop,
    });
    let selection = session.selection().clone();
    session.dispatch(Command::UpdateComponent {
        section_id: selection.section_id().unwrap().to_string(),
        row_id: selection.row_id().unwrap().to_string(),
        component_id: selection.component_id().unwrap().to_string(),
        patch: ComponentPatch::new().property("content", "<p>Hello <b>world</b></p>"),
        view: ViewMode::Desktop,
    });

    let html = compile(session.template());
    println!("Generated HTML:\n{}", html);

    assert!(html.contains(
        "<div class=\"section\" style=\"padding: 0px; margin: 0px; background-color: transparent\">"
    ));
    assert!(html.contains("<div class=\"row\""));
    assert!(html.contains("display: flex; flex-direction: row; gap: 0px"));
    assert!(html.contains("<div class=\"column\" style=\"flex: 1; min-width: 0;\">"));
    // Rich text passes through untouched
    assert!(html.contains("<p>Hello <b>world</b></p></div>"));
    assert!(html.contains("font-size: 16px; font-weight: normal; color: #333333"));
}

#[test]
fn test_hidden_row_is_excluded() {
    let (mut session, section_id) = session();
    session.dispatch(Command::AddComponentToSection {
        section_id: section_id.clone(),
        component_type: ComponentType::Text,
        view: ViewMode::Desktop,
    });
    let row_id = session.selection().row_id().unwrap().to_string();
    session.dispatch(Command::ToggleRowVisibility {
        section_id,
        row_id,
        view: ViewMode::Desktop,
    });

    let html = compile(session.template());
    assert!(html.contains("class=\"section\""));
    assert!(!html.contains("class=\"row\""));
    assert!(!html.contains("Enter your text here"));
}

#[test]
fn test_hidden_section_is_excluded() {
    let (mut session, section_id) = session();
    session.dispatch(Command::UpdateSection {
        section_id,
        patch: NodePatch::new().visible(false),
        view: ViewMode::Desktop,
    });

    let html = compile(session.template());
    assert!(!html.contains("class=\"section\""));
}

#[test]
fn test_columns_follow_column_index() {
    let (mut session, section_id) = session();
    session.dispatch(Command::AddRowTemplate {
        section_id,
        preset: RowPreset::three_column(),
        view: ViewMode::Desktop,
    });

    let html = compile(session.template());
    assert_eq!(html.matches("<div class=\"column\"").count(), 3);
    assert!(html.contains("gap: 15px"));

    let first = html.find("Column 1").unwrap();
    let second = html.find("Column 2").unwrap();
    let third = html.find("Column 3").unwrap();
    assert!(first < second && second < third);
}

#[test]
fn test_out_of_range_column_renders_in_first_column() {
    let (mut session, section_id) = session();
    let outcome = session.perform(Action::from(Command::AddRowTemplate {
        section_id: section_id.clone(),
        preset: RowPreset::two_column(),
        view: ViewMode::Desktop,
    }));
    assert_eq!(outcome, Outcome::Applied);
    let row_id = session.selection().row_id().unwrap().to_string();

    let outcome = session.perform(Action::from(Command::AddComponentToColumn {
        section_id,
        row_id: row_id.clone(),
        column_index: 5,
        component_type: ComponentType::Button,
        view: ViewMode::Desktop,
    }));
    assert_eq!(outcome, Outcome::Applied);

    // The stored index is kept as given
    let button_id = session.selection().component_id().unwrap();
    let button = session
        .template()
        .view(ViewMode::Desktop)
        .find_component(button_id)
        .unwrap();
    assert_eq!(button.column_index(), 5);

    let html = compile(session.template());
    assert_eq!(html.matches("<div class=\"column\"").count(), 2);

    let first_column = html.find("<div class=\"column\"").unwrap();
    let column_one = html.find("Column 1").unwrap();
    let button = html.find("Click me</a>").unwrap();
    let second_column = html.rfind("<div class=\"column\"").unwrap();
    let column_two = html.find("Column 2").unwrap();
    assert!(first_column < column_one);
    assert!(column_one < button);
    assert!(button < second_column);
    assert!(second_column < column_two);
}

#[test]
fn test_image_and_button_attributes_escaped() {
    let (mut session, section_id) = session();
    session.dispatch(Command::AddComponentToSection {
        section_id: section_id.clone(),
        component_type: ComponentType::Image,
        view: ViewMode::Desktop,
    });
    let image = session.selection().clone();
    session.dispatch(Command::UpdateComponent {
        section_id: section_id.clone(),
        row_id: image.row_id().unwrap().to_string(),
        component_id: image.component_id().unwrap().to_string(),
        patch: ComponentPatch::new()
            .property("src", "https://cdn.example.com/a.png?x=1&y=2")
            .property("alt", "\"Hero\"")
            .property("imageWidth", 320),
        view: ViewMode::Desktop,
    });

    session.dispatch(Command::AddComponentToSection {
        section_id,
        component_type: ComponentType::Button,
        view: ViewMode::Desktop,
    });

    let html = compile(session.template());
    assert!(html.contains("src=\"https://cdn.example.com/a.png?x=1&amp;y=2\""));
    assert!(html.contains("alt=\"&quot;Hero&quot;\""));
    assert!(html.contains("width: 320px; height: auto; max-width: 100%; display: block;"));
    assert!(html.contains("<a href=\"#\""));
    assert!(html.contains("background-color: #007bff; color: #ffffff; padding: 12px 24px"));
    assert!(html.contains("text-decoration: none; display: inline-block\">Click me</a>"));
}

#[test]
fn test_mobile_view_uses_full_width() {
    let mut template = Template::named("Mobile");
    template.settings.width = 640;

    let html = compile_to_html(&template, ViewMode::Mobile, CompileOptions::default()).unwrap();
    assert!(html.contains("max-width: 100%;"));
    assert!(!html.contains("640px"));
}

#[test]
fn test_title_escaped() {
    let template = Template::named("Tom & Jerry <Weekly>");
    let html = compile(&template);
    assert!(html.contains("<title>Tom &amp; Jerry &lt;Weekly&gt;</title>"));
}

#[test]
fn test_zero_width_rejected() {
    let mut template = Template::new();
    template.settings.width = 0;

    let result = compile_to_html(&template, ViewMode::Desktop, CompileOptions::default());
    assert!(matches!(result, Err(CompileError::InvalidSettings(_))));
}

#[test]
fn test_compact_output() {
    let template = Template::named("Compact");
    let options = CompileOptions {
        pretty: false,
        breakpoint_px: 480,
        ..Default::default()
    };

    let html = compile_to_html(&template, ViewMode::Desktop, options).unwrap();
    assert!(!html.contains('\n'));
    assert!(html.contains("@media (max-width: 480px) {"));
}

#[test]
fn test_template_from_json_compiles() {
    let template: Template = serde_json::from_str(
        r##"{
            "id": "t1",
            "name": "Imported",
            "views": {
                "desktop": { "sections": [ {
                    "id": "s1", "name": "Section 1", "visible": true, "locked": false,
                    "properties": { "backgroundColor": "#eeeeee" },
                    "rows": [ {
                        "id": "r1", "name": "Row 1", "visible": true, "locked": false,
                        "properties": { "columns": 2 },
                        "components": [ {
                            "id": "c1", "type": "text", "name": "Text 1",
                            "visible": true, "locked": false,
                            "properties": { "content": "Stray", "columnIndex": 7 },
                            "position": { "x": 0, "y": 0, "width": "100%", "height": "100%" }
                        } ]
                    } ]
                } ] },
                "mobile": { "sections": [] }
            }
        }"##,
    )
    .unwrap();

    let html = compile(&template);
    // Out-of-range column index falls back to the first column
    let first_column = html.find("<div class=\"column\"").unwrap();
    let stray = html.find("Stray").unwrap();
    let second_column = html.rfind("<div class=\"column\"").unwrap();
    assert!(first_column < stray && stray < second_column);
}
