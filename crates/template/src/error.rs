//! Error types for template parsing and resource resolution

use thiserror::Error;

/// Template text could not be turned into a structured tree.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TemplateError {
    /// Neither JSON nor YAML accepted the text
    #[error("template is neither valid JSON ({json}) nor valid YAML ({yaml})")]
    Syntax {
        /// JSON parser message
        json: String,
        /// YAML parser message
        yaml: String,
    },

    /// JSON accepted the syntax but rejected the data
    #[error("invalid JSON template: {0}")]
    Json(String),

    /// The document parsed but is not a mapping
    #[error("template must be a mapping at the top level, found {found}")]
    NotAMapping {
        /// Kind of value found at the top level
        found: &'static str,
    },
}

/// The resolver rejected a template or its parameters.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ResolveError {
    /// A declared parameter has no default and was not supplied
    #[error("parameter '{name}' must have a value")]
    MissingParameter {
        /// Parameter name
        name: String,
    },

    /// A template section has the wrong shape
    #[error("template section '{section}' is invalid: {reason}")]
    InvalidSection {
        /// Section name, e.g. `Resources`
        section: &'static str,
        /// What is wrong with it
        reason: String,
    },

    /// A resource declaration is malformed or its type is unsupported
    #[error("resource '{logical_id}' is invalid: {reason}")]
    InvalidResource {
        /// Logical id from the template
        logical_id: String,
        /// What is wrong with it
        reason: String,
    },

    /// An output refers to something that does not exist
    #[error("output '{output}' references unknown '{target}'")]
    UnresolvedReference {
        /// Output key
        output: String,
        /// Referenced name
        target: String,
    },

    /// Resolver-specific rejection
    #[error("{0}")]
    Rejected(String),
}
