//! Leaf config nodes
//!
//! A [`ConfigItem`] holds a value, optional documentation, optional
//! [`ItemConstraints`] and the cached [`ValidationResult`] for the current
//! value. Every write goes through [`ConfigItem::set_value`], which
//! revalidates before returning, so the cached result is never stale.

use std::hash::{Hash, Hasher};

use serde_json::{Map, Value as JsonValue};

use crate::constraints::ItemConstraints;
use crate::hash::ContentHash;
use crate::validation::ValidationResult;
use crate::value::Value;

/// A named leaf in a config tree (the name is the key in its parent)
#[derive(Debug, Clone)]
pub struct ConfigItem {
    value: Value,
    doc: Option<String>,
    constraints: Option<ItemConstraints>,
    validation: ValidationResult,
}

impl ConfigItem {
    /// Create an item starting at the constraints' default, or `null`
    #[must_use]
    pub fn new(constraints: ItemConstraints) -> Self {
        let value = constraints.default_value().cloned().unwrap_or_default();
        let validation = constraints.validate(&value);
        Self {
            value,
            doc: None,
            constraints: Some(constraints),
            validation,
        }
    }

    /// Create an item without constraints; it always passes validation
    #[must_use]
    pub fn unconstrained(value: impl Into<Value>) -> Self {
        Self {
            value: value.into(),
            doc: None,
            constraints: None,
            validation: ValidationResult::passed(),
        }
    }

    /// Attach documentation
    #[inline]
    #[must_use]
    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// Current value
    #[inline]
    #[must_use]
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Documentation, if any
    #[inline]
    #[must_use]
    pub fn doc(&self) -> Option<&str> {
        self.doc.as_deref()
    }

    /// Constraints, if any
    #[inline]
    #[must_use]
    pub fn constraints(&self) -> Option<&ItemConstraints> {
        self.constraints.as_ref()
    }

    /// Store a value and revalidate it
    ///
    /// Invalid values are stored too; check [`ConfigItem::validation`].
    /// An int written to a float-only item is stored as a float.
    pub fn set_value(&mut self, value: impl Into<Value>) {
        let value = value.into();
        self.value = match &self.constraints {
            Some(constraints) => constraints.coerce(value),
            None => value,
        };
        self.validation = self.compute_validation();
    }

    /// Reset to the declared default (or `null`)
    pub fn reset(&mut self) {
        let default = self
            .constraints
            .as_ref()
            .and_then(|c| c.default_value().cloned())
            .unwrap_or_default();
        self.set_value(default);
    }

    /// Cached validation of the current value
    #[inline]
    #[must_use]
    pub fn validation(&self) -> &ValidationResult {
        &self.validation
    }

    /// Validation of the current value
    ///
    /// Returns the cached result; an unconstrained item always passes.
    #[must_use]
    pub fn validate(&self) -> ValidationResult {
        if self.constraints.is_none() {
            return ValidationResult::passed();
        }
        self.validation.clone()
    }

    fn compute_validation(&self) -> ValidationResult {
        self.constraints
            .as_ref()
            .map_or_else(ValidationResult::passed, |c| c.validate(&self.value))
    }

    /// Boolean value, if the item holds one
    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        self.value.as_bool()
    }

    /// Integer value, if the item holds one
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        self.value.as_i64()
    }

    /// Numeric value of an int or float item
    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        self.value.as_number()
    }

    /// String value, if the item holds one
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        self.value.as_str()
    }

    /// Full representation: `{value, doc?, constraints?}`
    #[must_use]
    pub fn to_dict(&self) -> JsonValue {
        let mut map = Map::new();
        map.insert("value".to_string(), self.value.to_json());
        if let Some(doc) = &self.doc {
            map.insert("doc".to_string(), JsonValue::String(doc.clone()));
        }
        if let Some(constraints) = &self.constraints {
            map.insert("constraints".to_string(), constraints.to_dict());
        }
        JsonValue::Object(map)
    }

    /// Canonical string: the value plus a constraint summary
    #[must_use]
    pub fn canonical(&self) -> String {
        match &self.constraints {
            Some(c) => format!("ConfigItem(value={}, constraints={})", self.value, c.summary()),
            None => format!("ConfigItem(value={})", self.value),
        }
    }

    /// Hash of [`ConfigItem::canonical`]
    #[inline]
    #[must_use]
    pub fn content_hash(&self) -> ContentHash {
        ContentHash::of_canonical(&self.canonical())
    }
}

impl PartialEq for ConfigItem {
    fn eq(&self, other: &Self) -> bool {
        self.canonical() == other.canonical()
    }
}

impl Eq for ConfigItem {}

impl Hash for ConfigItem {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical().hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashSet;

    fn chance() -> ConfigItem {
        ConfigItem::new(ItemConstraints::float().min(0.0).max(1.0).default(0.5).build().unwrap())
    }

    #[test]
    fn starts_at_default() {
        let item = chance();
        assert_eq!(item.value(), &Value::Float(0.5));
        assert!(item.validation().is_passed());
    }

    #[test]
    fn no_default_starts_null_and_fails() {
        let item = ConfigItem::new(ItemConstraints::boolean().build().unwrap());
        assert!(item.value().is_null());
        assert!(!item.validation().is_passed());
    }

    #[test]
    fn set_value_revalidates() {
        let mut item = chance();
        item.set_value(2.0);
        assert_eq!(item.value(), &Value::Float(2.0));
        assert!(!item.validation().is_passed());

        item.set_value(0.25);
        assert!(item.validation().is_passed());
        assert!(item.validation().fail_reasons().is_empty());
    }

    #[test]
    fn repeated_invalid_writes_record_one_message() {
        let mut item = chance();
        for _ in 0..5 {
            item.set_value(7);
        }
        assert_eq!(item.validation().fail_reasons().len(), 1);
    }

    #[test]
    fn reset_restores_default() {
        let mut item = chance();
        item.set_value(0.9);
        item.reset();
        assert_eq!(item.value(), &Value::Float(0.5));
    }

    #[test]
    fn unconstrained_always_passes() {
        let mut item = ConfigItem::unconstrained("anything");
        item.set_value(Value::Null);
        assert!(item.validate().is_passed());
    }

    #[test]
    fn to_dict_shape() {
        let item = chance().with_doc("Chance of discovery");
        assert_eq!(
            item.to_dict(),
            json!({
                "value": 0.5,
                "doc": "Chance of discovery",
                "constraints": {
                    "allowed_kinds": ["float"],
                    "allow_null": false,
                    "default": 0.5,
                    "min": 0.0,
                    "max": 1.0
                }
            })
        );
    }

    #[test]
    fn equality_is_structural() {
        let mut a = chance();
        let mut b = chance().with_doc("doc is not part of identity");
        assert_eq!(a, b);

        a.set_value(0.1);
        assert_ne!(a, b);
        b.set_value(0.1);
        assert_eq!(a, b);
        assert_eq!(a.content_hash(), b.content_hash());

        let set: HashSet<ConfigItem> = [a, b].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn int_written_to_float_item_equals_float() {
        let mut a = ConfigItem::new(ItemConstraints::float().build().unwrap());
        let mut b = a.clone();
        a.set_value(1);
        b.set_value(1.0);
        assert_eq!(a.value(), &Value::Float(1.0));
        assert_eq!(a, b);
        assert_eq!(a.content_hash(), b.content_hash());
    }

    #[test]
    fn int_items_keep_ints() {
        let mut item = ConfigItem::new(ItemConstraints::integer().build().unwrap());
        item.set_value(3);
        assert_eq!(item.value(), &Value::Int(3));

        let mut loose = ConfigItem::unconstrained(0);
        loose.set_value(1);
        assert_eq!(loose.value(), &Value::Int(1));
    }

    #[test]
    fn nan_fails_validation() {
        let mut item = chance();
        item.set_value(f64::NAN);
        assert!(!item.validation().is_passed());
    }
}
