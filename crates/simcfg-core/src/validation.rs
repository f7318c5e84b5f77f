//! Validation results
//!
//! Validation never fails with `Err`: failures are data. A leaf produces a
//! [`ValidationResult`]; a group produces a [`GroupValidationResult`] that
//! also carries the result of every child, forming a tree that mirrors the
//! config tree.
//!
//! Failure messages and causes are kept in insertion-ordered sets, so the
//! same failure is never recorded twice in one result.

use std::fmt;

use indexmap::{IndexMap, IndexSet};
use serde_json::{Map, Value as JsonValue};

/// Key under which a group's own rule failures appear in an error tree
pub const GROUP_FAILURES_KEY: &str = "group";

/// Error-tree sentinel for a fully passing tree
pub const PASSED: &str = "Passed";

/// Which bound of a range a value violated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoundSide {
    /// `min`
    Lower,
    /// `max`
    Upper,
}

impl fmt::Display for BoundSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lower => f.write_str("lower"),
            Self::Upper => f.write_str("upper"),
        }
    }
}

/// A single recorded validation failure
///
/// Values and bounds are stored pre-rendered so the cause is `Eq + Hash`
/// and can live in an ordered set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, thiserror::Error)]
pub enum ValidationFailure {
    /// `null` given where null is not permitted
    #[error("Value null when allow_null is not permitted.")]
    NullNotAllowed,

    /// Value kind is not one of the allowed kinds
    #[error("Value {value} is of type {actual}, should be {expected}.")]
    TypeMismatch {
        /// Rendered value
        value: String,
        /// Kind of the value (`null` for a null value)
        actual: String,
        /// Allowed kinds joined with " or "
        expected: String,
    },

    /// NaN or an infinity
    #[error("Value {value} is not a finite number.")]
    NotFinite {
        /// Rendered value
        value: String,
    },

    /// Numeric value outside an inclusive bound
    #[error("Value {value} is {} the {side} bound {bound} (inclusive).", relation(.side))]
    OutOfRange {
        /// Rendered value
        value: String,
        /// Rendered bound
        bound: String,
        /// Which bound was crossed
        side: BoundSide,
    },

    /// A group-level dependency rule failed
    #[error("{} -> {description}", quote_fields(.fields))]
    DependencyViolation {
        /// Fields the rule refers to, in declaration order
        fields: Vec<String>,
        /// What the rule requires
        description: String,
    },
}

fn relation(side: &BoundSide) -> &'static str {
    match side {
        BoundSide::Lower => "less than",
        BoundSide::Upper => "greater than",
    }
}

fn quote_fields(fields: &[String]) -> String {
    fields
        .iter()
        .map(|f| format!("'{f}'"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Result of validating a single value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    passed: bool,
    fail_reasons: IndexSet<String>,
    fail_causes: IndexSet<ValidationFailure>,
}

impl ValidationResult {
    /// A passing result with no failures
    #[inline]
    #[must_use]
    pub fn passed() -> Self {
        Self {
            passed: true,
            fail_reasons: IndexSet::new(),
            fail_causes: IndexSet::new(),
        }
    }

    /// A failing result holding one failure
    #[must_use]
    pub fn failed(failure: ValidationFailure) -> Self {
        let mut result = Self::passed();
        result.add_failure(failure);
        result
    }

    /// Record a failure and mark the result as failed
    ///
    /// Duplicate messages and causes are ignored.
    pub fn add_failure(&mut self, failure: ValidationFailure) {
        self.passed = false;
        self.fail_reasons.insert(failure.to_string());
        self.fail_causes.insert(failure);
    }

    /// Whether validation passed
    #[inline]
    #[must_use]
    pub fn is_passed(&self) -> bool {
        self.passed
    }

    /// Failure messages in insertion order
    #[inline]
    #[must_use]
    pub fn fail_reasons(&self) -> &IndexSet<String> {
        &self.fail_reasons
    }

    /// Failure causes in insertion order
    #[inline]
    #[must_use]
    pub fn fail_causes(&self) -> &IndexSet<ValidationFailure> {
        &self.fail_causes
    }

    fn reasons_json(&self) -> JsonValue {
        JsonValue::Array(
            self.fail_reasons
                .iter()
                .cloned()
                .map(JsonValue::String)
                .collect(),
        )
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::passed()
    }
}

/// Validation of one child of a group
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeValidation {
    /// Result for a leaf item
    Item(ValidationResult),
    /// Result for a nested group
    Group(GroupValidationResult),
}

impl NodeValidation {
    /// Whether the child passed
    #[inline]
    #[must_use]
    pub fn is_passed(&self) -> bool {
        match self {
            Self::Item(v) => v.is_passed(),
            Self::Group(v) => v.is_passed(),
        }
    }

    /// The child's own failure messages
    #[must_use]
    pub fn fail_reasons(&self) -> &IndexSet<String> {
        match self {
            Self::Item(v) => v.fail_reasons(),
            Self::Group(v) => v.rules().fail_reasons(),
        }
    }
}

/// Result of validating a group and, recursively, its children
///
/// `is_passed() == group_rules_passed() && elements_passed()`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GroupValidationResult {
    rules: ValidationResult,
    element_validation: IndexMap<String, NodeValidation>,
}

impl GroupValidationResult {
    /// Empty, passing result
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a group-level rule failure
    pub fn add_failure(&mut self, failure: ValidationFailure) {
        self.rules.add_failure(failure);
    }

    /// Record the validation of a named child
    pub fn add_element_validation(&mut self, name: impl Into<String>, validation: NodeValidation) {
        self.element_validation.insert(name.into(), validation);
    }

    /// Whether the whole subtree passed
    #[inline]
    #[must_use]
    pub fn is_passed(&self) -> bool {
        self.group_rules_passed() && self.elements_passed()
    }

    /// Whether every dependency rule of this group passed
    #[inline]
    #[must_use]
    pub fn group_rules_passed(&self) -> bool {
        self.rules.is_passed()
    }

    /// Whether every child passed
    #[must_use]
    pub fn elements_passed(&self) -> bool {
        self.element_validation.values().all(NodeValidation::is_passed)
    }

    /// The group's own rule failures
    #[inline]
    #[must_use]
    pub fn rules(&self) -> &ValidationResult {
        &self.rules
    }

    /// Rule failure messages of this group (children excluded)
    #[inline]
    #[must_use]
    pub fn fail_reasons(&self) -> &IndexSet<String> {
        self.rules.fail_reasons()
    }

    /// Rule failure causes of this group (children excluded)
    #[inline]
    #[must_use]
    pub fn fail_causes(&self) -> &IndexSet<ValidationFailure> {
        self.rules.fail_causes()
    }

    /// Child results by name
    #[inline]
    #[must_use]
    pub fn element_validation(&self) -> &IndexMap<String, NodeValidation> {
        &self.element_validation
    }

    /// Number of failure messages in the whole subtree
    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.rules.fail_reasons().len()
            + self
                .element_validation
                .values()
                .map(|v| match v {
                    NodeValidation::Item(item) => item.fail_reasons().len(),
                    NodeValidation::Group(group) => group.failure_count(),
                })
                .sum::<usize>()
    }

    /// Errors-only mirror of the tree
    ///
    /// A passing tree collapses to `{name: "Passed"}`. Otherwise only the
    /// failing path is present: rule failures under `"group"`, failing
    /// items as a list of reasons, failing groups nested.
    #[must_use]
    pub fn to_error_tree(&self, name: &str) -> JsonValue {
        let body = self.error_body();
        let mut root = Map::new();
        if body.is_empty() {
            root.insert(name.to_string(), JsonValue::String(PASSED.to_string()));
        } else {
            root.insert(name.to_string(), JsonValue::Object(body));
        }
        JsonValue::Object(root)
    }

    fn error_body(&self) -> Map<String, JsonValue> {
        let mut body = Map::new();
        if !self.rules.is_passed() {
            body.insert(GROUP_FAILURES_KEY.to_string(), self.rules.reasons_json());
        }
        for (name, validation) in &self.element_validation {
            match validation {
                NodeValidation::Group(group) if !group.is_passed() => {
                    body.insert(name.clone(), JsonValue::Object(group.error_body()));
                }
                NodeValidation::Item(item) if !item.is_passed() => {
                    body.insert(name.clone(), item.reasons_json());
                }
                _ => {}
            }
        }
        body
    }

    /// Human readable YAML rendering of the error tree
    #[must_use]
    pub fn report(&self, name: &str) -> String {
        let mut out = String::from("Validation results\n------------------\n");
        match serde_yaml::to_string(&self.to_error_tree(name)) {
            Ok(yaml) => out.push_str(&yaml),
            Err(err) => {
                tracing::warn!("failed to render validation report: {err}");
                out.push_str(&self.to_error_tree(name).to_string());
            }
        }
        out
    }
}
