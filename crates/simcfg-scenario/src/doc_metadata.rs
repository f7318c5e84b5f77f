//! Document identity carried alongside a schema root
//!
//! [`DocMetadata`] is opaque to validation. It travels with the root so a
//! document store can track identity, timestamps and locking, and it is
//! excluded from structural equality.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use uuid::Uuid;

/// Key under which metadata appears in a serialized root
pub const DOC_METADATA_KEY: &str = "_doc_metadata";

/// Identity and bookkeeping for a stored document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocMetadata {
    uuid: Uuid,
    created_at: DateTime<Utc>,
    #[serde(default)]
    updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    author: Option<String>,
    #[serde(default)]
    locked: bool,
}

impl DocMetadata {
    /// Fresh metadata with a random id, created now
    #[must_use]
    pub fn new() -> Self {
        Self {
            uuid: Uuid::new_v4(),
            created_at: Utc::now(),
            updated_at: None,
            name: None,
            description: None,
            author: None,
            locked: false,
        }
    }

    /// Set the display name
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the description
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the author
    #[must_use]
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Document id
    #[inline]
    #[must_use]
    pub fn uuid(&self) -> Uuid {
        self.uuid
    }

    /// Creation time
    #[inline]
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Last modification time, if modified since creation
    #[inline]
    #[must_use]
    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    /// Display name
    #[inline]
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Free-text description
    #[inline]
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Author
    #[inline]
    #[must_use]
    pub fn author(&self) -> Option<&str> {
        self.author.as_deref()
    }

    /// Whether the store should reject changes to this document
    #[inline]
    #[must_use]
    pub fn locked(&self) -> bool {
        self.locked
    }

    /// Lock or unlock; enforcement belongs to the store
    pub fn set_locked(&mut self, locked: bool) {
        self.locked = locked;
    }

    /// Record a modification
    pub fn touch(&mut self) {
        self.updated_at = Some(Utc::now());
    }

    /// Primitive-only mapping with ISO-8601 timestamps
    ///
    /// Absent optional fields are emitted as `null` when `include_none`.
    #[must_use]
    pub fn to_dict(&self, include_none: bool) -> JsonValue {
        let iso = |t: DateTime<Utc>| t.to_rfc3339_opts(SecondsFormat::Micros, true);
        let optional = [
            ("updated_at", self.updated_at.map(iso)),
            ("name", self.name.clone()),
            ("description", self.description.clone()),
            ("author", self.author.clone()),
        ];

        let mut map = Map::new();
        map.insert("uuid".to_string(), JsonValue::String(self.uuid.to_string()));
        map.insert("created_at".to_string(), JsonValue::String(iso(self.created_at)));
        for (key, value) in optional {
            match value {
                Some(v) => {
                    map.insert(key.to_string(), JsonValue::String(v));
                }
                None if include_none => {
                    map.insert(key.to_string(), JsonValue::Null);
                }
                None => {}
            }
        }
        map.insert("locked".to_string(), JsonValue::Bool(self.locked));
        JsonValue::Object(map)
    }

    /// Restore metadata from [`DocMetadata::to_dict`] output
    ///
    /// # Errors
    /// Returns an error if the id or a timestamp does not parse.
    pub fn from_dict(value: &JsonValue) -> serde_json::Result<Self> {
        Self::deserialize(value)
    }
}

impl Default for DocMetadata {
    fn default() -> Self {
        Self::new()
    }
}
