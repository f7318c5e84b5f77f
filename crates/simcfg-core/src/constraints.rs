//! Declarative constraints for a single value
//!
//! [`ItemConstraints`] states which kinds a value may take, whether it may
//! be null, its default, and inclusive numeric bounds. Constraints are
//! built once per schema definition and never mutated afterwards.
//!
//! # Example
//!
//! ```
//! use simcfg_core::{ItemConstraints, Value};
//!
//! let chance = ItemConstraints::float().min(0.0).max(1.0).default(0.5).build().unwrap();
//! assert!(chance.validate(&Value::Float(1.0)).is_passed());
//! assert!(!chance.validate(&Value::Float(1.0001)).is_passed());
//! assert!(!chance.validate(&Value::Bool(true)).is_passed());
//! ```

use std::collections::BTreeSet;

use serde_json::{json, Map, Value as JsonValue};

use crate::error::{Result, SchemaError};
use crate::validation::{BoundSide, ValidationFailure, ValidationResult};
use crate::value::{PrimitiveKind, Value};

/// Constraints on one config value
#[derive(Debug, Clone, PartialEq)]
pub struct ItemConstraints {
    allowed_kinds: BTreeSet<PrimitiveKind>,
    allow_null: bool,
    default: Option<Value>,
    min: Option<f64>,
    max: Option<f64>,
}

impl ItemConstraints {
    /// Start building constraints for the given kinds
    #[must_use]
    pub fn builder(kinds: impl IntoIterator<Item = PrimitiveKind>) -> ItemConstraintsBuilder {
        ItemConstraintsBuilder {
            allowed_kinds: kinds.into_iter().collect(),
            allow_null: false,
            default: None,
            min: None,
            max: None,
        }
    }

    /// Boolean constraints
    #[inline]
    #[must_use]
    pub fn boolean() -> ItemConstraintsBuilder {
        Self::builder([PrimitiveKind::Bool])
    }

    /// Integer constraints
    #[inline]
    #[must_use]
    pub fn integer() -> ItemConstraintsBuilder {
        Self::builder([PrimitiveKind::Int])
    }

    /// Float constraints; integers are accepted as floats
    #[inline]
    #[must_use]
    pub fn float() -> ItemConstraintsBuilder {
        Self::builder([PrimitiveKind::Float])
    }

    /// String constraints
    #[inline]
    #[must_use]
    pub fn string() -> ItemConstraintsBuilder {
        Self::builder([PrimitiveKind::Str])
    }

    /// Allowed kinds, in a stable order
    #[inline]
    #[must_use]
    pub fn allowed_kinds(&self) -> &BTreeSet<PrimitiveKind> {
        &self.allowed_kinds
    }

    /// Whether `null` is permitted
    #[inline]
    #[must_use]
    pub fn allow_null(&self) -> bool {
        self.allow_null
    }

    /// Declared default
    #[inline]
    #[must_use]
    pub fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    /// Inclusive lower bound
    #[inline]
    #[must_use]
    pub fn min(&self) -> Option<f64> {
        self.min
    }

    /// Inclusive upper bound
    #[inline]
    #[must_use]
    pub fn max(&self) -> Option<f64> {
        self.max
    }

    /// Check whether a kind satisfies the allowed kinds
    ///
    /// An int satisfies a float constraint. A bool never satisfies a
    /// numeric one.
    #[must_use]
    pub fn accepts_kind(&self, kind: PrimitiveKind) -> bool {
        if self.allowed_kinds.contains(&kind) {
            return true;
        }
        match kind {
            PrimitiveKind::Int => self.allowed_kinds.contains(&PrimitiveKind::Float),
            PrimitiveKind::Bool | PrimitiveKind::Float | PrimitiveKind::Str => false,
        }
    }

    /// Normalize a value before it is stored
    ///
    /// An int given to a float-only item becomes a float, so `1` and `1.0`
    /// store the same value.
    #[must_use]
    pub fn coerce(&self, value: Value) -> Value {
        match value {
            Value::Int(_)
                if !self.allowed_kinds.contains(&PrimitiveKind::Int)
                    && self.allowed_kinds.contains(&PrimitiveKind::Float) =>
            {
                value.as_number().map_or(value, Value::Float)
            }
            other => other,
        }
    }

    /// Validate a candidate value
    ///
    /// Every check runs; all failures are recorded.
    #[must_use]
    pub fn validate(&self, value: &Value) -> ValidationResult {
        let mut result = ValidationResult::passed();

        if value.is_null() && !self.allow_null {
            result.add_failure(ValidationFailure::NullNotAllowed);
        }

        let kind_ok = match value.kind() {
            Some(kind) => self.accepts_kind(kind),
            None => self.allow_null,
        };
        if !kind_ok {
            result.add_failure(ValidationFailure::TypeMismatch {
                value: value.to_string(),
                actual: value.kind().map_or("null", PrimitiveKind::as_str).to_string(),
                expected: self.expected_kinds(),
            });
        }

        if let Some(number) = value.as_number().filter(|n| !n.is_finite()) {
            result.add_failure(ValidationFailure::NotFinite {
                value: format!("{number:?}"),
            });
        } else if let Some(number) = value.as_number() {
            if let Some(min) = self.min {
                if number < min {
                    result.add_failure(ValidationFailure::OutOfRange {
                        value: value.to_string(),
                        bound: format_bound(min),
                        side: BoundSide::Lower,
                    });
                }
            }
            if let Some(max) = self.max {
                if number > max {
                    result.add_failure(ValidationFailure::OutOfRange {
                        value: value.to_string(),
                        bound: format_bound(max),
                        side: BoundSide::Upper,
                    });
                }
            }
        }

        result
    }

    /// Constraints as a mapping, for persistence and display
    #[must_use]
    pub fn to_dict(&self) -> JsonValue {
        let mut map = Map::new();
        map.insert(
            "allowed_kinds".to_string(),
            json!(self.allowed_kinds.iter().map(|k| k.as_str()).collect::<Vec<_>>()),
        );
        map.insert("allow_null".to_string(), JsonValue::Bool(self.allow_null));
        if let Some(default) = &self.default {
            map.insert("default".to_string(), default.to_json());
        }
        if let Some(min) = self.min {
            map.insert("min".to_string(), json!(min));
        }
        if let Some(max) = self.max {
            map.insert("max".to_string(), json!(max));
        }
        JsonValue::Object(map)
    }

    /// Canonical one-line summary used for structural identity
    #[must_use]
    pub fn summary(&self) -> String {
        let kinds = self
            .allowed_kinds
            .iter()
            .map(|k| k.as_str())
            .collect::<Vec<_>>()
            .join("|");
        let mut out = format!("kinds={kinds};null={}", self.allow_null);
        if let Some(default) = &self.default {
            out.push_str(&format!(";default={default}"));
        }
        if let Some(min) = self.min {
            out.push_str(&format!(";min={}", format_bound(min)));
        }
        if let Some(max) = self.max {
            out.push_str(&format!(";max={}", format_bound(max)));
        }
        out
    }

    fn expected_kinds(&self) -> String {
        let mut names: Vec<&str> = self.allowed_kinds.iter().map(|k| k.as_str()).collect();
        if self.allow_null {
            names.push("null");
        }
        names.join(" or ")
    }
}

/// Builder for [`ItemConstraints`]
#[derive(Debug, Clone)]
#[must_use]
pub struct ItemConstraintsBuilder {
    allowed_kinds: BTreeSet<PrimitiveKind>,
    allow_null: bool,
    default: Option<Value>,
    min: Option<f64>,
    max: Option<f64>,
}

impl ItemConstraintsBuilder {
    /// Permit `null`
    #[inline]
    pub fn allow_null(mut self, allow: bool) -> Self {
        self.allow_null = allow;
        self
    }

    /// Declare a default
    #[inline]
    pub fn default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Inclusive lower bound
    #[inline]
    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    /// Inclusive upper bound
    #[inline]
    pub fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    /// Finish, checking the declaration is self-consistent
    ///
    /// # Errors
    /// - [`SchemaError::NoAllowedKinds`] if no kind is allowed
    /// - [`SchemaError::InvalidBounds`] if `min > max`
    /// - [`SchemaError::InvalidDefault`] if an explicit default (including
    ///   `false`, `0` or `null`) fails the constraints
    pub fn build(self) -> Result<ItemConstraints> {
        if self.allowed_kinds.is_empty() {
            return Err(SchemaError::NoAllowedKinds);
        }
        if let (Some(min), Some(max)) = (self.min, self.max) {
            if min > max {
                return Err(SchemaError::InvalidBounds { min, max });
            }
        }

        let mut constraints = ItemConstraints {
            allowed_kinds: self.allowed_kinds,
            allow_null: self.allow_null,
            default: None,
            min: self.min,
            max: self.max,
        };
        constraints.default = self.default.map(|default| constraints.coerce(default));

        if let Some(default) = &constraints.default {
            let validation = constraints.validate(default);
            if !validation.is_passed() {
                return Err(SchemaError::InvalidDefault {
                    default: default.to_string(),
                    reasons: validation.fail_reasons().iter().cloned().collect(),
                });
            }
        }

        Ok(constraints)
    }
}

/// Render a bound without a trailing `.0` for whole numbers
#[allow(clippy::cast_possible_truncation)]
fn format_bound(bound: f64) -> String {
    if bound.is_finite() && bound.fract() == 0.0 && bound.abs() < 1e15 {
        format!("{}", bound as i64)
    } else {
        format!("{bound:?}")
    }
}
