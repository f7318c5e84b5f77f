//! Error types for schema construction and ingestion
//!
//! Validation failures are not errors: they are recorded in
//! [`ValidationResult`](crate::ValidationResult)s. The variants here cover
//! malformed schema definitions, unreadable input, and strict creation of a
//! tree that failed validation.

use std::fmt;

use serde_json::Value as JsonValue;

/// Main schema error type
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// A declared default does not satisfy its own constraints
    #[error("invalid default {default}: {}", .reasons.join("; "))]
    InvalidDefault {
        /// Rendered default value
        default: String,
        /// Validation messages for the default
        reasons: Vec<String>,
    },

    /// `min` is greater than `max`
    #[error("invalid bounds: min {min} is greater than max {max}")]
    InvalidBounds {
        /// Lower bound
        min: f64,
        /// Upper bound
        max: f64,
    },

    /// No primitive kinds were allowed
    #[error("constraints must allow at least one kind")]
    NoAllowedKinds,

    /// Two children of one group share a name
    #[error("duplicate child '{0}'")]
    DuplicateChild(String),

    /// A dependency rule refers to a field that is not an item of the group
    #[error("rule field '{0}' does not name an item of the group")]
    UnknownField(String),

    /// A path does not resolve inside the tree
    #[error("unknown path: {0}")]
    UnknownPath(String),

    /// Ingress data was not a mapping
    #[error("expected a mapping, found {0}")]
    NotAMapping(&'static str),

    /// Invalid JSON input
    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// Invalid YAML input
    #[error("invalid YAML: {0}")]
    InvalidYaml(#[from] serde_yaml::Error),

    /// Strict creation of a tree that failed validation
    #[error(transparent)]
    Validation(#[from] SchemaValidationError),
}

impl SchemaError {
    /// Check if the error is a validation failure of populated data, as
    /// opposed to a malformed schema or unreadable input
    #[inline]
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

/// A whole tree failed validation during strict creation
///
/// Carries the error tree produced by
/// [`GroupValidationResult::to_error_tree`](crate::GroupValidationResult::to_error_tree).
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaValidationError {
    tree: JsonValue,
}

impl SchemaValidationError {
    /// Wrap an error tree
    #[inline]
    #[must_use]
    pub fn new(tree: JsonValue) -> Self {
        Self { tree }
    }

    /// The error tree
    #[inline]
    #[must_use]
    pub fn tree(&self) -> &JsonValue {
        &self.tree
    }

    /// Take the error tree
    #[inline]
    #[must_use]
    pub fn into_tree(self) -> JsonValue {
        self.tree
    }
}

impl fmt::Display for SchemaValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "schema validation failed: {}", self.tree)
    }
}

impl std::error::Error for SchemaValidationError {}

/// Convenience result alias
pub type Result<T, E = SchemaError> = std::result::Result<T, E>;
