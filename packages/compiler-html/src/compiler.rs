use crate::style::{box_declarations, style_declarations, Declarations};
use mailforge_document::{
    project, Component, ComponentKind, FlexLayout, ProjectedRow, ProjectedSection, Template,
    Typography, ViewMode,
};
use thiserror::Error;

/// Errors that can occur during HTML compilation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    #[error("Invalid template settings: {0}")]
    InvalidSettings(String),
}

/// Options for HTML compilation
#[derive(Debug, Clone)]
pub struct CompileOptions {
    /// Pretty print HTML
    pub pretty: bool,
    /// Indentation string
    pub indent: String,
    /// Viewport width below which rows collapse to a single column
    pub breakpoint_px: u32,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            pretty: true,
            indent: "  ".to_string(),
            breakpoint_px: 600,
        }
    }
}

struct Context {
    options: CompileOptions,
    depth: usize,
    buffer: String,
}

impl Context {
    fn new(options: CompileOptions) -> Self {
        Self {
            options,
            depth: 0,
            buffer: String::new(),
        }
    }

    fn add(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    fn add_line(&mut self, text: &str) {
        if self.options.pretty {
            self.add_indent();
        }
        self.add(text);
        if self.options.pretty {
            self.add("\n");
        }
    }

    fn add_indent(&mut self) {
        let indent = self.options.indent.clone();
        for _ in 0..self.depth {
            self.add(&indent);
        }
    }

    fn indent(&mut self) {
        self.depth += 1;
    }

    fn dedent(&mut self) {
        if self.depth > 0 {
            self.depth -= 1;
        }
    }

    /// `<div class=".." style="..">` then indent
    fn open_div(&mut self, class: Option<&str>, style: &str) {
        let mut tag = String::from("<div");
        if let Some(class) = class {
            tag.push_str(&format!(" class=\"{}\"", class));
        }
        if !style.is_empty() {
            tag.push_str(&format!(" style=\"{}\"", escape_html(style)));
        }
        tag.push('>');
        self.add_line(&tag);
        self.indent();
    }

    fn close_div(&mut self) {
        self.dedent();
        self.add_line("</div>");
    }

    fn get_output(self) -> String {
        self.buffer
    }
}

/// Compile one view of a template to a standalone HTML document
///
/// Hidden sections, rows and components are left out. Text content is
/// emitted as-is since it holds rich text markup.
pub fn compile_to_html(
    template: &Template,
    mode: ViewMode,
    options: CompileOptions,
) -> Result<String, CompileError> {
    if template.settings.width == 0 {
        return Err(CompileError::InvalidSettings(
            "width must be greater than 0".to_string(),
        ));
    }

    let mut ctx = Context::new(options);

    ctx.add_line("<!DOCTYPE html>");
    ctx.add_line("<html lang=\"en\">");
    ctx.indent();

    compile_head(template, mode, &mut ctx);

    ctx.add_line("<body>");
    ctx.indent();
    ctx.open_div(Some("email-container"), "");
    ctx.open_div(Some("email-content"), "");

    let projection = project(template, mode);
    for section in &projection.sections {
        compile_section(section, &mut ctx);
    }

    ctx.close_div();
    ctx.close_div();
    ctx.dedent();
    ctx.add_line("</body>");

    ctx.dedent();
    ctx.add_line("</html>");

    Ok(ctx.get_output())
}

fn compile_head(template: &Template, mode: ViewMode, ctx: &mut Context) {
    let settings = &template.settings;
    let container_width = match mode {
        ViewMode::Desktop => format!("{}px", settings.width),
        ViewMode::Mobile => "100%".to_string(),
    };

    ctx.add_line("<head>");
    ctx.indent();

    ctx.add_line("<meta charset=\"UTF-8\">");
    ctx.add_line("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">");
    ctx.add_line(&format!("<title>{}</title>", escape_html(&template.name)));

    ctx.add_line("<style>");
    ctx.indent();
    css_rule(
        ctx,
        "body",
        &[
            "margin: 0".to_string(),
            "padding: 0".to_string(),
            format!("font-family: {}", settings.default_font),
            "background-color: #f4f4f4".to_string(),
        ],
    );
    css_rule(
        ctx,
        ".email-container",
        &[
            format!("max-width: {}", container_width),
            "margin: 0 auto".to_string(),
            format!("background-color: {}", settings.background_color),
            "box-shadow: 0 0 10px rgba(0,0,0,0.1)".to_string(),
        ],
    );
    css_rule(
        ctx,
        "img",
        &[
            "max-width: 100%".to_string(),
            "height: auto".to_string(),
            "display: block".to_string(),
        ],
    );

    let breakpoint = ctx.options.breakpoint_px;
    ctx.add_line(&format!("@media (max-width: {}px) {{", breakpoint));
    ctx.indent();
    css_rule(
        ctx,
        ".email-container",
        &[
            "width: 100% !important".to_string(),
            "max-width: 100% !important".to_string(),
        ],
    );
    css_rule(ctx, ".row", &["flex-direction: column !important".to_string()]);
    css_rule(
        ctx,
        ".column",
        &[
            "width: 100% !important".to_string(),
            "min-width: 100% !important".to_string(),
        ],
    );
    ctx.dedent();
    ctx.add_line("}");

    ctx.dedent();
    ctx.add_line("</style>");

    ctx.dedent();
    ctx.add_line("</head>");
}

fn css_rule(ctx: &mut Context, selector: &str, declarations: &[String]) {
    ctx.add_line(&format!("{} {{", selector));
    ctx.indent();
    for declaration in declarations {
        ctx.add_line(&format!("{};", declaration));
    }
    ctx.dedent();
    ctx.add_line("}");
}

fn compile_section(section: &ProjectedSection, ctx: &mut Context) {
    let properties = &section.section.properties;
    let style = style_declarations(&properties.box_style, Some(&properties.layout), None);

    ctx.open_div(Some("section"), &style.to_css());
    for row in &section.rows {
        compile_row(row, ctx);
    }
    ctx.close_div();
}

fn compile_row(row: &ProjectedRow, ctx: &mut Context) {
    let properties = &row.row.properties;

    // Rows are always laid out as flex containers
    let layout = FlexLayout {
        display: Some("flex".to_string()),
        flex_direction: Some(
            properties
                .layout
                .flex_direction
                .clone()
                .unwrap_or_else(|| "row".to_string()),
        ),
        gap: Some(
            properties
                .layout
                .gap
                .as_deref()
                .and_then(non_empty)
                .or_else(|| properties.column_spacing.as_deref().and_then(non_empty))
                .unwrap_or("0px")
                .to_string(),
        ),
        ..properties.layout.clone()
    };
    let style = style_declarations(&properties.box_style, Some(&layout), None);

    ctx.open_div(Some("row"), &style.to_css());
    for column in &row.columns {
        ctx.open_div(Some("column"), "flex: 1; min-width: 0;");
        for component in column {
            compile_component(component, ctx);
        }
        ctx.close_div();
    }
    ctx.close_div();
}

fn compile_component(component: &Component, ctx: &mut Context) {
    let wrapper = wrapper_declarations(component);
    ctx.open_div(None, &wrapper.to_css());

    match &component.kind {
        ComponentKind::Text(props) => {
            let style = style_declarations(&props.box_style, None, Some(&props.typography));
            let content = if props.content.is_empty() {
                "Text content"
            } else {
                props.content.as_str()
            };
            ctx.add_line(&format!(
                "<div style=\"{}\">{}</div>",
                escape_html(&style.to_css()),
                content
            ));
        }

        ComponentKind::Image(props) => {
            let style = format!(
                "width: {}; height: {}; max-width: 100%; display: block;",
                non_empty(&props.image_width).unwrap_or("100%"),
                non_empty(&props.image_height).unwrap_or("auto"),
            );
            ctx.add_line(&format!(
                "<img src=\"{}\" alt=\"{}\" style=\"{}\" />",
                escape_html(&props.src),
                escape_html(non_empty(&props.alt).unwrap_or("Image")),
                escape_html(&style)
            ));
        }

        ComponentKind::Button(props) => {
            let mut style = Declarations::new();
            style
                .push("background-color", Some(props.button_background_color.as_str()))
                .push("color", Some(props.button_text_color.as_str()))
                .push("padding", Some(props.button_padding.as_str()))
                .push("border-radius", props.box_style.border_radius.as_deref())
                .push("font-size", props.typography.font_size.as_deref())
                .push("font-weight", props.typography.font_weight.as_deref())
                .push("font-family", props.typography.font_family.as_deref())
                .push("text-decoration", Some("none"))
                .push("display", Some("inline-block"));
            ctx.add_line(&format!(
                "<a href=\"{}\" style=\"{}\">{}</a>",
                escape_html(non_empty(&props.link_url).unwrap_or("#")),
                escape_html(&style.to_css()),
                escape_html(non_empty(&props.button_text).unwrap_or("Button"))
            ));
        }
    }

    ctx.close_div();
}

/// Spacing, background, border and alignment of a component's outer box
fn wrapper_declarations(component: &Component) -> Declarations {
    let box_style = component.kind.box_style();
    let mut decls = box_declarations(&mailforge_document::BoxStyle {
        padding: box_style.padding.clone(),
        margin: box_style.margin.clone(),
        background_color: box_style.background_color.clone(),
        border: box_style.border.clone(),
        border_radius: box_style.border_radius.clone(),
        ..Default::default()
    });

    let typography: Option<&Typography> = match &component.kind {
        ComponentKind::Text(props) => Some(&props.typography),
        ComponentKind::Button(props) => Some(&props.typography),
        ComponentKind::Image(_) => None,
    };
    decls.push(
        "text-align",
        typography.and_then(|t| t.text_align.as_deref()),
    );
    decls
}

fn non_empty(value: &str) -> Option<&str> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
