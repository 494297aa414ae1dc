//! Template file import and export

use crate::error::ImportError;
use mailforge_document::{duplicate_ids, Template};
use serde_json::Value;

const REQUIRED_FIELDS: [&str; 3] = ["id", "name", "views"];

/// Parse an imported template file
///
/// `id`, `name` and `views` must be present and truthy; anything else
/// missing is filled with defaults.
pub fn import_template(json: &str) -> Result<Template, ImportError> {
    let result = parse_template(json);
    match &result {
        Ok(template) => {
            let duplicates = duplicate_ids(template);
            if !duplicates.is_empty() {
                tracing::warn!(
                    "[Import] Template {} has duplicate ids: {}",
                    template.id,
                    duplicates.join(", ")
                );
            }
        }
        Err(err) => tracing::warn!("[Import] Rejected template file: {}", err),
    }
    result
}

fn parse_template(json: &str) -> Result<Template, ImportError> {
    let value: Value =
        serde_json::from_str(json).map_err(|err| ImportError::InvalidJson(err.to_string()))?;

    let object = value
        .as_object()
        .ok_or_else(|| ImportError::Malformed("expected a JSON object".to_string()))?;

    for field in REQUIRED_FIELDS {
        if !object.get(field).is_some_and(is_truthy) {
            return Err(ImportError::MissingField(field));
        }
    }

    serde_json::from_value(value).map_err(|err| ImportError::Malformed(err.to_string()))
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Pretty-printed JSON for a template file
pub fn export_template_json(template: &Template) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(template)
}

/// `My Template` + `html` → `My_Template.html`
pub fn export_file_name(name: &str, extension: &str) -> String {
    let stem = name.split_whitespace().collect::<Vec<_>>().join("_");
    format!("{}.{}", stem, extension)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_round_trip() {
        let template = Template::named("Welcome");
        let json = export_template_json(&template).unwrap();
        assert!(json.contains("\n  \"id\""));

        let imported = import_template(&json).unwrap();
        assert_eq!(imported, template);
    }

    #[test]
    fn test_import_minimal_fills_defaults() {
        let imported = import_template(r#"{ "id": "t1", "name": "Bare", "views": {} }"#).unwrap();
        assert_eq!(imported.version, "1.0.0");
        assert_eq!(imported.settings.width, 1200);
        assert!(imported.views.desktop.sections.is_empty());
    }

    #[test]
    fn test_import_rejections() {
        assert!(matches!(
            import_template("{ not json"),
            Err(ImportError::InvalidJson(_))
        ));
        assert!(matches!(
            import_template("[1, 2]"),
            Err(ImportError::Malformed(_))
        ));
        assert_eq!(
            import_template(r#"{ "name": "No id", "views": {} }"#),
            Err(ImportError::MissingField("id"))
        );
        assert_eq!(
            import_template(r#"{ "id": "t1", "name": "", "views": {} }"#),
            Err(ImportError::MissingField("name"))
        );
        assert_eq!(
            import_template(r#"{ "id": "t1", "name": "x", "views": null }"#),
            Err(ImportError::MissingField("views"))
        );
        assert!(matches!(
            import_template(r#"{ "id": "t1", "name": "x", "views": { "desktop": 5 } }"#),
            Err(ImportError::Malformed(_))
        ));
    }

    #[test]
    fn test_export_file_name() {
        assert_eq!(export_file_name("My  Spring\tSale", "html"), "My_Spring_Sale.html");
        assert_eq!(export_file_name("plain", "json"), "plain.json");
    }
}
