//! Template text parsing
//!
//! Templates arrive as raw text in one of two formats. Parsing is two explicit,
//! ordered attempts:
//!
//! 1. Strict JSON.
//! 2. YAML, only if JSON failed with a *syntax* or *EOF* class error.
//!
//! A JSON data-class error is returned as-is. Whatever format wins, the
//! resulting [`TemplateTree`] is the only thing the resolver sees.

use crate::error::TemplateError;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

/// Format that accepted a template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TemplateFormat {
    /// Parsed as JSON
    Json,
    /// Parsed as YAML after JSON rejected the syntax
    Yaml,
}

/// Structured form of a template
///
/// Always a mapping at the top level. Section accessors return `None` when
/// the section is absent; shape checks belong to the resolver.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemplateTree {
    format: TemplateFormat,
    root: Map<String, Value>,
}

impl TemplateTree {
    /// Format the text was parsed from
    pub fn format(&self) -> TemplateFormat {
        self.format
    }

    /// Top-level mapping
    pub fn root(&self) -> &Map<String, Value> {
        &self.root
    }

    /// Look up a top-level section
    pub fn section(&self, name: &str) -> Option<&Value> {
        self.root.get(name)
    }

    /// Top-level `Description`, if it is a string
    pub fn description(&self) -> Option<&str> {
        self.root.get("Description").and_then(Value::as_str)
    }

    /// `Parameters` section
    pub fn parameters(&self) -> Option<&Value> {
        self.section("Parameters")
    }

    /// `Resources` section
    pub fn resources(&self) -> Option<&Value> {
        self.section("Resources")
    }

    /// `Outputs` section
    pub fn outputs(&self) -> Option<&Value> {
        self.section("Outputs")
    }
}

/// Parse template text into a [`TemplateTree`].
///
/// # Errors
///
/// - [`TemplateError::Syntax`] if neither JSON nor YAML accepts the text
/// - [`TemplateError::Json`] if JSON rejected the data rather than the syntax
/// - [`TemplateError::NotAMapping`] if the document is not a mapping
pub fn parse_template(text: &str) -> Result<TemplateTree, TemplateError> {
    let (format, value) = match serde_json::from_str::<Value>(text) {
        Ok(value) => (TemplateFormat::Json, value),
        Err(json_err) if is_syntax_class(&json_err) => {
            debug!(error = %json_err, "template is not JSON, trying YAML");
            match serde_yaml::from_str::<Value>(text) {
                Ok(value) => (TemplateFormat::Yaml, value),
                Err(yaml_err) => {
                    return Err(TemplateError::Syntax {
                        json: json_err.to_string(),
                        yaml: yaml_err.to_string(),
                    })
                }
            }
        }
        Err(json_err) => return Err(TemplateError::Json(json_err.to_string())),
    };

    match value {
        Value::Object(root) => Ok(TemplateTree { format, root }),
        other => Err(TemplateError::NotAMapping {
            found: kind_of(&other),
        }),
    }
}

fn is_syntax_class(err: &serde_json::Error) -> bool {
    use serde_json::error::Category;
    matches!(err.classify(), Category::Syntax | Category::Eof)
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "sequence",
        Value::Object(_) => "mapping",
    }
}
