//! Schema roots
//!
//! A [`SchemaRoot`] is a top-level [`ConfigGroup`] built from a
//! [`SchemaDefinition`], plus [`DocMetadata`] and a population state. It is
//! the serialization boundary: mappings, YAML and JSON come in through the
//! `create_*` constructors and go out through [`SchemaRoot::to_dict`].
//!
//! # Layouts
//!
//! A definition may declare a [`LegacyLayout`]. Ingress then accepts either
//! layout, chosen by a [`LayoutHint`]. With [`LayoutHint::Infer`] the
//! top-level keys are sniffed; an undecidable mapping is read as current.

use std::fmt::Debug;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use serde_json::{Map, Value as JsonValue};
use simcfg_core::{
    ConfigGroup, ContentHash, GroupValidationResult, Result, SchemaError, SchemaValidationError,
    ToDictOptions, Value,
};

use crate::doc_metadata::{DocMetadata, DOC_METADATA_KEY};
use crate::legacy::{LayoutDetection, LegacyLayout};

/// Name of the root node in error trees and reports
pub const ROOT_NAME: &str = "root";

/// A concrete schema: how to build its tree and how to read its legacy layout
pub trait SchemaDefinition: Debug + Clone + Send + Sync + 'static {
    /// Stable identifier, lowercase with underscores
    const SCHEMA_ID: &'static str;

    /// Build the tree with every item at its default
    ///
    /// # Errors
    /// Returns an error if the declaration itself is malformed.
    fn build() -> Result<ConfigGroup>;

    /// Rename table for the legacy layout, if the schema has one
    fn legacy_layout() -> Option<&'static LegacyLayout> {
        None
    }
}

/// Which layout an ingress mapping is in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayoutHint {
    /// Current nested layout
    Current,
    /// Legacy layout, translated before assignment
    Legacy,
    /// Sniff the top-level keys
    #[default]
    Infer,
}

impl LayoutHint {
    /// Map the `legacy` / `infer_legacy` flag pair
    ///
    /// An explicit `legacy` always wins over inference.
    #[must_use]
    pub const fn from_flags(legacy: Option<bool>, infer_legacy: bool) -> Self {
        match (legacy, infer_legacy) {
            (Some(true), _) => Self::Legacy,
            (Some(false), _) | (None, false) => Self::Current,
            (None, true) => Self::Infer,
        }
    }
}

/// Where a root is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopulationState {
    /// Defaults only, never populated from a mapping
    Unpopulated,
    /// Last validation passed
    Valid,
    /// Last validation failed
    Invalid,
    /// Written through [`SchemaRoot::set_value`] since the last validation
    Modified,
}

/// Options for [`SchemaRoot::to_dict`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RootDictOptions {
    /// Primitive-only output with `_doc_metadata`; implies `values_only`
    pub json_serializable: bool,
    /// Bare values instead of item wrappers
    pub values_only: bool,
    /// Include items whose value is `null`
    pub include_none: bool,
}

impl RootDictOptions {
    /// Bare values, nulls included
    #[must_use]
    pub const fn values_only() -> Self {
        Self {
            json_serializable: false,
            values_only: true,
            include_none: true,
        }
    }

    /// The storage form
    #[must_use]
    pub const fn json_serializable() -> Self {
        Self {
            json_serializable: true,
            values_only: true,
            include_none: true,
        }
    }
}

impl Default for RootDictOptions {
    fn default() -> Self {
        Self {
            json_serializable: false,
            values_only: false,
            include_none: true,
        }
    }
}

/// A populated (or default) instance of a schema
#[derive(Debug, Clone)]
pub struct SchemaRoot<D: SchemaDefinition> {
    group: ConfigGroup,
    metadata: DocMetadata,
    state: PopulationState,
    _definition: PhantomData<D>,
}

impl<D: SchemaDefinition> SchemaRoot<D> {
    /// A root at its defaults
    ///
    /// # Errors
    /// Returns an error if the schema declaration is malformed.
    pub fn new() -> Result<Self> {
        Ok(Self {
            group: D::build()?,
            metadata: DocMetadata::new(),
            state: PopulationState::Unpopulated,
            _definition: PhantomData,
        })
    }

    /// Build a root and populate it from a mapping
    ///
    /// Validation failures do not fail creation; inspect
    /// [`SchemaRoot::state`] or use [`SchemaRoot::create`].
    ///
    /// # Errors
    /// Returns an error if the schema declaration is malformed.
    pub fn create_from_mapping(data: &Map<String, JsonValue>, hint: LayoutHint) -> Result<Self> {
        let mut root = Self::new()?;
        root.set_from_dict(data, hint);
        Ok(root)
    }

    /// Like [`SchemaRoot::create_from_mapping`], optionally strict
    ///
    /// # Errors
    /// With `raise_errors`, returns [`SchemaError::Validation`] carrying the
    /// error tree when the populated root fails validation.
    pub fn create(data: &Map<String, JsonValue>, hint: LayoutHint, raise_errors: bool) -> Result<Self> {
        let root = Self::create_from_mapping(data, hint)?;
        if raise_errors && !root.is_passed() {
            tracing::warn!(
                schema = D::SCHEMA_ID,
                failures = root.validation().failure_count(),
                "strict creation failed validation"
            );
            return Err(SchemaValidationError::new(root.to_error_tree()).into());
        }
        Ok(root)
    }

    /// Build from an already-parsed document
    ///
    /// An empty document (`null`) is an empty mapping.
    ///
    /// # Errors
    /// Returns [`SchemaError::NotAMapping`] if the document is not a mapping.
    pub fn create_from_value(document: &JsonValue, hint: LayoutHint) -> Result<Self> {
        match document {
            JsonValue::Object(map) => Self::create_from_mapping(map, hint),
            JsonValue::Null => Self::create_from_mapping(&Map::new(), hint),
            other => Err(SchemaError::NotAMapping(json_kind(other))),
        }
    }

    /// Parse YAML and build
    ///
    /// # Errors
    /// Returns an error if the YAML is malformed or not a mapping.
    pub fn create_from_yaml(yaml: &str, hint: LayoutHint) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Self::create_from_mapping(&Map::new(), hint);
        }
        let document: JsonValue = serde_yaml::from_str(yaml)?;
        Self::create_from_value(&document, hint)
    }

    /// Parse JSON and build
    ///
    /// # Errors
    /// Returns an error if the JSON is malformed or not a mapping.
    pub fn create_from_json(json: &str, hint: LayoutHint) -> Result<Self> {
        let document: JsonValue = serde_json::from_str(json)?;
        Self::create_from_value(&document, hint)
    }

    /// Reset to defaults, then populate from a mapping and validate
    ///
    /// The outcome depends only on `data` and the resolved layout.
    pub fn set_from_dict(&mut self, data: &Map<String, JsonValue>, hint: LayoutHint) -> &GroupValidationResult {
        self.group.reset();
        self.update_from_dict(data, hint)
    }

    /// Merge a mapping over the current values and validate
    pub fn update_from_dict(&mut self, data: &Map<String, JsonValue>, hint: LayoutHint) -> &GroupValidationResult {
        if let Some(raw) = data.get(DOC_METADATA_KEY) {
            match DocMetadata::from_dict(raw) {
                Ok(metadata) => self.metadata = metadata,
                Err(err) => tracing::warn!(error = %err, "ignoring unreadable document metadata"),
            }
        }

        let legacy = Self::resolve_layout(data, hint);
        tracing::info!(schema = D::SCHEMA_ID, legacy, "populating schema root");

        match (legacy, D::legacy_layout()) {
            (true, Some(layout)) => self.group.apply_dict(&layout.translate(data)),
            (true, None) => {
                tracing::warn!(schema = D::SCHEMA_ID, "schema has no legacy layout, reading as current");
                self.group.apply_dict(data);
            }
            (false, _) => self.group.apply_dict(data),
        }
        self.validate()
    }

    fn resolve_layout(data: &Map<String, JsonValue>, hint: LayoutHint) -> bool {
        match hint {
            LayoutHint::Legacy => true,
            LayoutHint::Current => false,
            LayoutHint::Infer => match D::legacy_layout().map(|layout| layout.detect(data)) {
                Some(LayoutDetection::Legacy) => true,
                Some(LayoutDetection::Current) | None => false,
                Some(LayoutDetection::Undecidable) => {
                    tracing::warn!(
                        schema = D::SCHEMA_ID,
                        "cannot tell the layout from the section names, reading as current"
                    );
                    false
                }
            },
        }
    }

    /// Revalidate the tree and update the population state
    pub fn validate(&mut self) -> &GroupValidationResult {
        let passed = self.group.validate().is_passed();
        self.state = if passed {
            PopulationState::Valid
        } else {
            PopulationState::Invalid
        };
        self.group.validation()
    }

    /// Set one item by dotted path
    ///
    /// The state becomes [`PopulationState::Modified`] and group rules are
    /// not re-evaluated until [`SchemaRoot::validate`] runs.
    ///
    /// # Errors
    /// Returns [`SchemaError::UnknownPath`] if the path does not name an item.
    pub fn set_value(&mut self, path: &str, value: impl Into<Value>) -> Result<()> {
        self.group.set_value(path, value)?;
        self.state = PopulationState::Modified;
        Ok(())
    }

    /// Root group, read-only
    #[inline]
    #[must_use]
    pub fn group(&self) -> &ConfigGroup {
        &self.group
    }

    /// Value of the item at a dotted path
    #[inline]
    #[must_use]
    pub fn value(&self, path: &str) -> Option<&Value> {
        self.group.value(path)
    }

    /// Document identity
    #[inline]
    #[must_use]
    pub fn metadata(&self) -> &DocMetadata {
        &self.metadata
    }

    /// Document identity, mutable
    #[inline]
    pub fn metadata_mut(&mut self) -> &mut DocMetadata {
        &mut self.metadata
    }

    /// Lifecycle state
    #[inline]
    #[must_use]
    pub fn state(&self) -> PopulationState {
        self.state
    }

    /// Result of the last validation
    #[inline]
    #[must_use]
    pub fn validation(&self) -> &GroupValidationResult {
        self.group.validation()
    }

    /// Whether the tree is validated and passing
    ///
    /// `false` while the state is [`PopulationState::Modified`].
    #[inline]
    #[must_use]
    pub fn is_passed(&self) -> bool {
        self.state != PopulationState::Modified && self.group.is_passed()
    }

    /// Errors-only mirror of the tree, rooted at [`ROOT_NAME`]
    #[must_use]
    pub fn to_error_tree(&self) -> JsonValue {
        self.group.to_error_tree(ROOT_NAME)
    }

    /// YAML rendering of the error tree
    #[must_use]
    pub fn report(&self) -> String {
        self.group.validation().report(ROOT_NAME)
    }

    /// The root as a nested mapping
    #[must_use]
    pub fn to_dict(&self, options: RootDictOptions) -> JsonValue {
        let group_options = ToDictOptions {
            values_only: options.values_only || options.json_serializable,
            include_none: options.include_none,
        };
        let mut dict = self.group.to_dict(group_options);
        if options.json_serializable {
            if let JsonValue::Object(map) = &mut dict {
                map.insert(DOC_METADATA_KEY.to_string(), self.metadata.to_dict(true));
            }
        }
        dict
    }

    /// Storage form as pretty JSON
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.to_dict(RootDictOptions::json_serializable()))?)
    }

    /// Storage form as YAML
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(&self.to_dict(RootDictOptions::json_serializable()))?)
    }

    /// Canonical form of the tree; metadata is not part of it
    #[must_use]
    pub fn canonical(&self) -> String {
        format!("{}({})", D::SCHEMA_ID, self.group.canonical())
    }

    /// Hash of [`SchemaRoot::canonical`]
    #[must_use]
    pub fn content_hash(&self) -> ContentHash {
        ContentHash::of_canonical(&self.canonical())
    }
}

impl<D: SchemaDefinition> PartialEq for SchemaRoot<D> {
    fn eq(&self, other: &Self) -> bool {
        self.group == other.group
    }
}

impl<D: SchemaDefinition> Eq for SchemaRoot<D> {}

impl<D: SchemaDefinition> Hash for SchemaRoot<D> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.group.hash(state);
    }
}

fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "a sequence",
        JsonValue::Object(_) => "a mapping",
    }
}
