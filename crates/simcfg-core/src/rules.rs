//! Group-level dependency rules
//!
//! A [`DependencyRule`] is a cross-field constraint evaluated by a
//! [`ConfigGroup`] against the live values of its items. Field names are
//! dotted paths relative to the owning group, so one rule may span
//! sub-groups (`"action_set.use_deceptive_nodes"`).
//!
//! Every rule produces one deterministic message of the form
//! `'<field>', '<field>' -> <description>`.

use crate::group::ConfigGroup;
use crate::validation::ValidationFailure;
use crate::value::Value;

/// Requirement placed on the dependent field of a conditional rule
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Predicate {
    /// Numeric and strictly greater than the bound
    GreaterThan(f64),
    /// Numeric and greater than or equal to the bound
    AtLeast(f64),
    /// Truthy (see [`Value::is_truthy`])
    Truthy,
    /// Anything but `null`
    NotNull,
}

impl Predicate {
    /// Check the predicate against a value
    #[must_use]
    pub fn holds(&self, value: &Value) -> bool {
        match self {
            Self::GreaterThan(bound) => value.as_number().is_some_and(|n| n > *bound),
            Self::AtLeast(bound) => value.as_number().is_some_and(|n| n >= *bound),
            Self::Truthy => value.is_truthy(),
            Self::NotNull => !value.is_null(),
        }
    }
}

/// A named cross-field constraint
#[derive(Debug, Clone, PartialEq)]
pub enum DependencyRule {
    /// Fails when every field is falsy
    AtLeastOneOf {
        /// Fields of which at least one must be enabled
        fields: Vec<String>,
        /// What the rule requires
        description: String,
    },

    /// Fails when exactly one of the two fields is enabled
    MutualRequirement {
        /// First field
        first: String,
        /// Second field
        second: String,
        /// What the rule requires
        description: String,
    },

    /// Fails when `trigger` is enabled and `dependent` fails `predicate`
    ConditionalRequirement {
        /// Enabling field
        trigger: String,
        /// Field that must then satisfy the predicate
        dependent: String,
        /// Requirement on `dependent`
        predicate: Predicate,
        /// What the rule requires
        description: String,
    },

    /// Fails when both fields are numeric and `lower > upper`
    Ordered {
        /// Field that must not exceed `upper`
        lower: String,
        /// Field that must not be below `lower`
        upper: String,
        /// What the rule requires
        description: String,
    },
}

impl DependencyRule {
    /// At least one of `fields` must be enabled
    #[must_use]
    pub fn at_least_one_of<I, S>(fields: I, description: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::AtLeastOneOf {
            fields: fields.into_iter().map(Into::into).collect(),
            description: description.into(),
        }
    }

    /// `first` and `second` must be enabled together or not at all
    #[must_use]
    pub fn mutual_requirement(
        first: impl Into<String>,
        second: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self::MutualRequirement {
            first: first.into(),
            second: second.into(),
            description: description.into(),
        }
    }

    /// If `trigger` is enabled, `dependent` must satisfy `predicate`
    #[must_use]
    pub fn conditional_requirement(
        trigger: impl Into<String>,
        dependent: impl Into<String>,
        predicate: Predicate,
        description: impl Into<String>,
    ) -> Self {
        Self::ConditionalRequirement {
            trigger: trigger.into(),
            dependent: dependent.into(),
            predicate,
            description: description.into(),
        }
    }

    /// `lower` must not exceed `upper`
    #[must_use]
    pub fn ordered(
        lower: impl Into<String>,
        upper: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self::Ordered {
            lower: lower.into(),
            upper: upper.into(),
            description: description.into(),
        }
    }

    /// Fields referenced by the rule, in declaration order
    #[must_use]
    pub fn fields(&self) -> Vec<&str> {
        match self {
            Self::AtLeastOneOf { fields, .. } => fields.iter().map(String::as_str).collect(),
            Self::MutualRequirement { first, second, .. } => vec![first.as_str(), second.as_str()],
            Self::ConditionalRequirement {
                trigger, dependent, ..
            } => vec![trigger.as_str(), dependent.as_str()],
            Self::Ordered { lower, upper, .. } => vec![lower.as_str(), upper.as_str()],
        }
    }

    /// What the rule requires
    #[must_use]
    pub fn description(&self) -> &str {
        match self {
            Self::AtLeastOneOf { description, .. }
            | Self::MutualRequirement { description, .. }
            | Self::ConditionalRequirement { description, .. }
            | Self::Ordered { description, .. } => description,
        }
    }

    /// Evaluate against a group's current values
    ///
    /// Returns the failure to record, or `None` when the rule holds.
    /// A field that does not resolve reads as `null`.
    #[must_use]
    pub fn evaluate(&self, group: &ConfigGroup) -> Option<ValidationFailure> {
        let read = |path: &str| group.value(path).cloned().unwrap_or_default();

        let holds = match self {
            Self::AtLeastOneOf { fields, .. } => fields.iter().any(|f| read(f.as_str()).is_truthy()),
            Self::MutualRequirement { first, second, .. } => {
                read(first.as_str()).is_truthy() == read(second.as_str()).is_truthy()
            }
            Self::ConditionalRequirement {
                trigger,
                dependent,
                predicate,
                ..
            } => !read(trigger.as_str()).is_truthy() || predicate.holds(&read(dependent.as_str())),
            Self::Ordered { lower, upper, .. } => {
                match (read(lower.as_str()).as_number(), read(upper.as_str()).as_number()) {
                    (Some(lo), Some(hi)) => lo <= hi,
                    _ => true,
                }
            }
        };

        if holds {
            None
        } else {
            Some(self.violation())
        }
    }

    /// The failure this rule records when violated
    #[must_use]
    pub fn violation(&self) -> ValidationFailure {
        ValidationFailure::DependencyViolation {
            fields: self.fields().into_iter().map(str::to_string).collect(),
            description: self.description().to_string(),
        }
    }
}
