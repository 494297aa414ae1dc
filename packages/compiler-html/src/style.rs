//! Property record → inline CSS declarations

use mailforge_document::{BoxStyle, FlexLayout, Typography};

/// Ordered CSS declarations for one `style` attribute
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Declarations(Vec<(String, String)>);

impl Declarations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push `name: value`, skipping absent or empty values
    pub fn push(&mut self, name: &str, value: Option<&str>) -> &mut Self {
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            self.0.push((name.to_string(), value.to_string()));
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn extend(&mut self, other: Declarations) -> &mut Self {
        self.0.extend(other.0);
        self
    }

    /// `a: 1; b: 2`
    pub fn to_css(&self) -> String {
        self.0
            .iter()
            .map(|(name, value)| format!("{}: {}", name, value))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// Box model and background declarations
pub fn box_declarations(style: &BoxStyle) -> Declarations {
    let mut decls = Declarations::new();
    decls
        .push("padding", style.padding.as_deref())
        .push("margin", style.margin.as_deref())
        .push("background-color", style.background_color.as_deref())
        .push(
            "background-image",
            style
                .background_image
                .as_deref()
                .filter(|url| !url.is_empty())
                .map(|url| format!("url('{}')", url))
                .as_deref(),
        )
        .push("background-size", style.background_size.as_deref())
        .push("background-position", style.background_position.as_deref())
        .push("background-repeat", style.background_repeat.as_deref())
        .push("border", style.border.as_deref())
        .push("border-radius", style.border_radius.as_deref());

    if let Some(max_width) = style.max_width.as_deref().filter(|w| !w.is_empty()) {
        decls
            .push("max-width", Some(max_width))
            .push("margin-left", Some("auto"))
            .push("margin-right", Some("auto"));
    }

    decls
        .push("min-height", style.min_height.as_deref())
        .push("max-height", style.max_height.as_deref());
    decls
}

/// Flex declarations, emitted only for `display: flex`
pub fn flex_declarations(layout: &FlexLayout) -> Declarations {
    let mut decls = Declarations::new();
    if !layout.is_flex() {
        return decls;
    }
    decls
        .push("display", Some("flex"))
        .push("flex-direction", layout.flex_direction.as_deref())
        .push("justify-content", layout.justify_content.as_deref())
        .push("align-items", layout.align_items.as_deref())
        .push("gap", layout.gap.as_deref());
    decls
}

pub fn typography_declarations(typography: &Typography) -> Declarations {
    let mut decls = Declarations::new();
    decls
        .push("font-size", typography.font_size.as_deref())
        .push("font-weight", typography.font_weight.as_deref())
        .push("color", typography.color.as_deref())
        .push("text-align", typography.text_align.as_deref())
        .push("line-height", typography.line_height.as_deref())
        .push("font-family", typography.font_family.as_deref())
        .push("text-decoration", typography.text_decoration.as_deref());
    decls
}

/// Full declaration list in export order: box, flex, typography
pub fn style_declarations(
    style: &BoxStyle,
    layout: Option<&FlexLayout>,
    typography: Option<&Typography>,
) -> Declarations {
    let mut decls = box_declarations(style);
    if let Some(layout) = layout {
        decls.extend(flex_declarations(layout));
    }
    if let Some(typography) = typography {
        decls.extend(typography_declarations(typography));
    }
    decls
}
