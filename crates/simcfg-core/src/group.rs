//! Composite config nodes
//!
//! A [`ConfigGroup`] owns a fixed, declared registry of named children
//! (items or nested groups) plus a list of [`DependencyRule`]s. The child
//! set is fixed when the group is built; only values change afterwards.
//!
//! Unlike items, groups do not revalidate on every write. Callers apply a
//! batch of values and then call [`ConfigGroup::validate`], so rules that
//! span several fields see the fully-updated tree. [`ConfigGroup::set_from_dict`]
//! does exactly that.
//!
//! # Example
//!
//! ```
//! use simcfg_core::{ConfigGroup, ConfigItem, DependencyRule, ItemConstraints};
//! use serde_json::json;
//!
//! let flag = || ConfigItem::new(ItemConstraints::boolean().default(false).build().unwrap());
//! let mut group = ConfigGroup::builder()
//!     .item("use_isolate_node", flag())
//!     .item("use_reconnect_node", flag())
//!     .rule(DependencyRule::mutual_requirement(
//!         "use_isolate_node",
//!         "use_reconnect_node",
//!         "isolate and reconnect must be enabled together",
//!     ))
//!     .build()
//!     .unwrap();
//!
//! let data = json!({"use_isolate_node": true});
//! group.set_from_dict(data.as_object().unwrap());
//! assert!(!group.is_passed());
//! ```

use std::hash::{Hash, Hasher};

use indexmap::map::Entry;
use indexmap::IndexMap;
use serde_json::{Map, Value as JsonValue};

use crate::error::{Result, SchemaError};
use crate::hash::ContentHash;
use crate::item::ConfigItem;
use crate::rules::DependencyRule;
use crate::validation::{GroupValidationResult, NodeValidation};
use crate::value::Value;

/// Separator for paths into a tree
pub const PATH_SEPARATOR: char = '.';

/// A child of a group
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ConfigNode {
    /// Leaf
    Item(ConfigItem),
    /// Nested group
    Group(ConfigGroup),
}

impl ConfigNode {
    /// Item view
    #[inline]
    #[must_use]
    pub fn as_item(&self) -> Option<&ConfigItem> {
        match self {
            Self::Item(item) => Some(item),
            Self::Group(_) => None,
        }
    }

    /// Group view
    #[inline]
    #[must_use]
    pub fn as_group(&self) -> Option<&ConfigGroup> {
        match self {
            Self::Group(group) => Some(group),
            Self::Item(_) => None,
        }
    }

    /// Whether the node's last validation passed
    #[must_use]
    pub fn is_passed(&self) -> bool {
        match self {
            Self::Item(item) => item.validation().is_passed(),
            Self::Group(group) => group.is_passed(),
        }
    }

    fn canonical(&self) -> String {
        match self {
            Self::Item(item) => item.canonical(),
            Self::Group(group) => group.canonical(),
        }
    }

    fn matches(&self, filter: NodeFilter) -> bool {
        matches!(
            (filter, self),
            (NodeFilter::All, _) | (NodeFilter::Items, Self::Item(_)) | (NodeFilter::Groups, Self::Group(_))
        )
    }
}

/// Which children [`ConfigGroup::children`] returns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NodeFilter {
    /// Leaves only
    Items,
    /// Nested groups only
    Groups,
    /// Everything
    #[default]
    All,
}

/// Options for [`ConfigGroup::to_dict`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToDictOptions {
    /// Emit bare values instead of `{value, doc, constraints}` wrappers,
    /// and drop group docs
    pub values_only: bool,
    /// Include items whose value is `null`
    pub include_none: bool,
}

impl ToDictOptions {
    /// Bare values, nulls included; the shape `set_from_dict` accepts
    #[inline]
    #[must_use]
    pub const fn values_only() -> Self {
        Self {
            values_only: true,
            include_none: true,
        }
    }

    /// Full representation with docs and constraints
    #[inline]
    #[must_use]
    pub const fn full() -> Self {
        Self {
            values_only: false,
            include_none: true,
        }
    }
}

impl Default for ToDictOptions {
    fn default() -> Self {
        Self::full()
    }
}

/// A named composite of items and nested groups
#[derive(Debug, Clone)]
pub struct ConfigGroup {
    doc: Option<String>,
    children: IndexMap<String, ConfigNode>,
    rules: Vec<DependencyRule>,
    validation: GroupValidationResult,
}

impl ConfigGroup {
    /// Start declaring a group
    #[inline]
    #[must_use]
    pub fn builder() -> ConfigGroupBuilder {
        ConfigGroupBuilder::default()
    }

    /// Documentation, if any
    #[inline]
    #[must_use]
    pub fn doc(&self) -> Option<&str> {
        self.doc.as_deref()
    }

    /// Declared dependency rules
    #[inline]
    #[must_use]
    pub fn rules(&self) -> &[DependencyRule] {
        &self.rules
    }

    /// Number of direct children
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Whether the group has no children
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Direct children matching `filter`, in declaration order
    pub fn children(&self, filter: NodeFilter) -> impl Iterator<Item = (&str, &ConfigNode)> + '_ {
        self.children
            .iter()
            .filter(move |(_, node)| node.matches(filter))
            .map(|(name, node)| (name.as_str(), node))
    }

    /// Direct child by name
    #[inline]
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ConfigNode> {
        self.children.get(name)
    }

    /// Node at a dotted path
    #[must_use]
    pub fn node(&self, path: &str) -> Option<&ConfigNode> {
        let (parent, last) = match path.rsplit_once(PATH_SEPARATOR) {
            Some((parent, last)) => (self.group(parent)?, last),
            None => (self, path),
        };
        parent.children.get(last)
    }

    fn node_mut(&mut self, path: &str) -> Option<&mut ConfigNode> {
        let (parent, last) = match path.rsplit_once(PATH_SEPARATOR) {
            Some((parent, last)) => (self.group_mut(parent)?, last),
            None => (self, path),
        };
        parent.children.get_mut(last)
    }

    /// Item at a dotted path
    #[inline]
    #[must_use]
    pub fn item(&self, path: &str) -> Option<&ConfigItem> {
        self.node(path).and_then(ConfigNode::as_item)
    }

    /// Mutable item at a dotted path
    #[must_use]
    pub fn item_mut(&mut self, path: &str) -> Option<&mut ConfigItem> {
        match self.node_mut(path)? {
            ConfigNode::Item(item) => Some(item),
            ConfigNode::Group(_) => None,
        }
    }

    /// Group at a dotted path
    #[must_use]
    pub fn group(&self, path: &str) -> Option<&ConfigGroup> {
        path.split(PATH_SEPARATOR)
            .try_fold(self, |group, segment| group.children.get(segment)?.as_group())
    }

    /// Mutable group at a dotted path
    #[must_use]
    pub fn group_mut(&mut self, path: &str) -> Option<&mut ConfigGroup> {
        let mut current = self;
        for segment in path.split(PATH_SEPARATOR) {
            current = match current.children.get_mut(segment)? {
                ConfigNode::Group(group) => group,
                ConfigNode::Item(_) => return None,
            };
        }
        Some(current)
    }

    /// Value of the item at a dotted path
    #[inline]
    #[must_use]
    pub fn value(&self, path: &str) -> Option<&Value> {
        self.item(path).map(ConfigItem::value)
    }

    /// Set the item at a dotted path
    ///
    /// The item revalidates itself; the group does not. Call
    /// [`ConfigGroup::validate`] once the batch of writes is done.
    ///
    /// # Errors
    /// Returns [`SchemaError::UnknownPath`] if the path does not name an item.
    pub fn set_value(&mut self, path: &str, value: impl Into<Value>) -> Result<()> {
        let item = self
            .item_mut(path)
            .ok_or_else(|| SchemaError::UnknownPath(path.to_string()))?;
        item.set_value(value);
        Ok(())
    }

    /// Assign values from a mapping, then validate the whole group
    ///
    /// Nested mappings recurse into groups of the same name; scalars are
    /// assigned to items. Unknown keys and shape mismatches are ignored.
    pub fn set_from_dict(&mut self, data: &Map<String, JsonValue>) -> &GroupValidationResult {
        self.apply_dict(data);
        self.validate()
    }

    /// Assign values from a mapping without validating the group
    pub fn apply_dict(&mut self, data: &Map<String, JsonValue>) {
        for (name, incoming) in data {
            match (self.children.get_mut(name), incoming) {
                (Some(ConfigNode::Group(group)), JsonValue::Object(nested)) => {
                    group.apply_dict(nested);
                }
                (Some(ConfigNode::Item(item)), scalar) if !scalar.is_object() => {
                    match Value::from_json(scalar) {
                        Some(value) => item.set_value(value),
                        None => tracing::warn!(field = %name, "skipping non-scalar value for item"),
                    }
                }
                (Some(_), _) => {
                    tracing::debug!(field = %name, "ignoring value whose shape does not match the schema");
                }
                (None, _) => tracing::debug!(field = %name, "ignoring unknown key"),
            }
        }
    }

    /// Reset every item in the tree to its default
    pub fn reset(&mut self) {
        for node in self.children.values_mut() {
            match node {
                ConfigNode::Item(item) => item.reset(),
                ConfigNode::Group(group) => group.reset(),
            }
        }
        self.validate();
    }

    /// Revalidate the tree and cache the result
    ///
    /// Children are validated first, then every rule is evaluated against
    /// the live values. All rule failures are reported, not only the first.
    pub fn validate(&mut self) -> &GroupValidationResult {
        let mut validation = self.validate_elements();

        for rule in &self.rules {
            if let Some(failure) = rule.evaluate(self) {
                validation.add_failure(failure);
            }
        }

        tracing::debug!(
            passed = validation.is_passed(),
            failures = validation.failure_count(),
            "validated config group"
        );
        self.validation = validation;
        &self.validation
    }

    fn validate_elements(&mut self) -> GroupValidationResult {
        let mut validation = GroupValidationResult::new();
        for (name, node) in &mut self.children {
            let element = match node {
                ConfigNode::Item(item) => NodeValidation::Item(item.validate()),
                ConfigNode::Group(group) => NodeValidation::Group(group.validate().clone()),
            };
            validation.add_element_validation(name.clone(), element);
        }
        validation
    }

    /// Result of the last [`ConfigGroup::validate`]
    #[inline]
    #[must_use]
    pub fn validation(&self) -> &GroupValidationResult {
        &self.validation
    }

    /// Whether the last validation passed
    #[inline]
    #[must_use]
    pub fn is_passed(&self) -> bool {
        self.validation.is_passed()
    }

    /// Errors-only mirror of the last validation
    #[inline]
    #[must_use]
    pub fn to_error_tree(&self, name: &str) -> JsonValue {
        self.validation.to_error_tree(name)
    }

    /// The group as a nested mapping
    #[must_use]
    pub fn to_dict(&self, options: ToDictOptions) -> JsonValue {
        let mut map = Map::new();
        if !options.values_only {
            if let Some(doc) = &self.doc {
                map.insert("doc".to_string(), JsonValue::String(doc.clone()));
            }
        }
        for (name, node) in &self.children {
            let entry = match node {
                ConfigNode::Item(item) if !options.include_none && item.value().is_null() => continue,
                ConfigNode::Item(item) if options.values_only => item.value().to_json(),
                ConfigNode::Item(item) => item.to_dict(),
                ConfigNode::Group(group) => group.to_dict(options),
            };
            map.insert(name.clone(), entry);
        }
        JsonValue::Object(map)
    }

    /// Canonical string over the doc and every child, in order
    #[must_use]
    pub fn canonical(&self) -> String {
        let mut parts = Vec::with_capacity(self.children.len() + 1);
        if let Some(doc) = &self.doc {
            parts.push(format!("doc={doc:?}"));
        }
        parts.extend(
            self.children
                .iter()
                .map(|(name, node)| format!("{name}={}", node.canonical())),
        );
        format!("ConfigGroup({})", parts.join(", "))
    }

    /// Hash of [`ConfigGroup::canonical`]
    #[inline]
    #[must_use]
    pub fn content_hash(&self) -> ContentHash {
        ContentHash::of_canonical(&self.canonical())
    }
}

impl PartialEq for ConfigGroup {
    fn eq(&self, other: &Self) -> bool {
        self.canonical() == other.canonical()
    }
}

impl Eq for ConfigGroup {}

impl Hash for ConfigGroup {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical().hash(state);
    }
}

/// Declares the fixed child registry of a [`ConfigGroup`]
///
/// The first declaration error is kept and reported by
/// [`ConfigGroupBuilder::build`].
#[derive(Debug, Default)]
#[must_use]
pub struct ConfigGroupBuilder {
    doc: Option<String>,
    children: IndexMap<String, ConfigNode>,
    rules: Vec<DependencyRule>,
    error: Option<SchemaError>,
}

impl ConfigGroupBuilder {
    /// Group documentation
    #[inline]
    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// Declare a leaf
    #[inline]
    pub fn item(self, name: impl Into<String>, item: ConfigItem) -> Self {
        self.child(name.into(), ConfigNode::Item(item))
    }

    /// Declare a nested group
    #[inline]
    pub fn group(self, name: impl Into<String>, group: ConfigGroup) -> Self {
        self.child(name.into(), ConfigNode::Group(group))
    }

    /// Declare a dependency rule
    #[inline]
    pub fn rule(mut self, rule: DependencyRule) -> Self {
        self.rules.push(rule);
        self
    }

    fn child(mut self, name: String, node: ConfigNode) -> Self {
        match self.children.entry(name) {
            Entry::Occupied(entry) => {
                if self.error.is_none() {
                    self.error = Some(SchemaError::DuplicateChild(entry.key().clone()));
                }
            }
            Entry::Vacant(entry) => {
                entry.insert(node);
            }
        }
        self
    }

    /// Finish the declaration and run a first validation
    ///
    /// # Errors
    /// - [`SchemaError::DuplicateChild`] if two children share a name
    /// - [`SchemaError::UnknownField`] if a rule names something that is
    ///   not an item of the group
    pub fn build(self) -> Result<ConfigGroup> {
        if let Some(error) = self.error {
            return Err(error);
        }

        let mut group = ConfigGroup {
            doc: self.doc,
            children: self.children,
            rules: Vec::new(),
            validation: GroupValidationResult::new(),
        };

        for rule in &self.rules {
            if let Some(missing) = rule.fields().into_iter().find(|f| group.item(f).is_none()) {
                return Err(SchemaError::UnknownField(missing.to_string()));
            }
        }
        group.rules = self.rules;
        group.validate();
        Ok(group)
    }
}
