//! Legacy layout detection and translation
//!
//! Older documents use a flat layout: a handful of upper-case sections,
//! each holding flat keys. A [`LegacyLayout`] carries the rename table from
//! `(section, key)` to the dotted path of the current schema, plus the
//! section names used to sniff which layout a mapping is in.
//!
//! Translation is best effort. Keys without a rename are dropped.

use std::collections::HashMap;

use serde_json::{Map, Value as JsonValue};
use simcfg_core::PATH_SEPARATOR;

/// Outcome of sniffing a mapping's layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutDetection {
    /// Only legacy section names were found
    Legacy,
    /// Only current section names were found
    Current,
    /// Neither or both; the caller has to decide
    Undecidable,
}

/// A fixed legacy-to-current rename table
#[derive(Debug, Clone)]
pub struct LegacyLayout {
    sections: Vec<(&'static str, &'static str)>,
    renames: HashMap<&'static str, HashMap<&'static str, &'static str>>,
}

impl LegacyLayout {
    /// Build from `(legacy section, current section)` pairs and
    /// `(legacy section, legacy key, current dotted path)` renames
    #[must_use]
    pub fn new(
        sections: &[(&'static str, &'static str)],
        renames: &[(&'static str, &'static str, &'static str)],
    ) -> Self {
        let mut table: HashMap<&'static str, HashMap<&'static str, &'static str>> = HashMap::new();
        for &(section, key, path) in renames {
            table.entry(section).or_default().insert(key, path);
        }
        Self {
            sections: sections.to_vec(),
            renames: table,
        }
    }

    /// Legacy section names, in declaration order
    pub fn legacy_sections(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.sections.iter().map(|(legacy, _)| *legacy)
    }

    /// Current section names, in declaration order
    pub fn current_sections(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.sections.iter().map(|(_, current)| *current)
    }

    /// Number of legacy keys with a rename
    #[must_use]
    pub fn len(&self) -> usize {
        self.renames.values().map(HashMap::len).sum()
    }

    /// Whether the table has no renames
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Current path for a legacy key
    #[must_use]
    pub fn rename(&self, section: &str, key: &str) -> Option<&'static str> {
        self.renames.get(section)?.get(key).copied()
    }

    /// Sniff the layout from the top-level keys
    #[must_use]
    pub fn detect(&self, data: &Map<String, JsonValue>) -> LayoutDetection {
        let legacy = self.legacy_sections().any(|s| data.contains_key(s));
        let current = self.current_sections().any(|s| data.contains_key(s));
        match (legacy, current) {
            (true, false) => LayoutDetection::Legacy,
            (false, true) => LayoutDetection::Current,
            _ => LayoutDetection::Undecidable,
        }
    }

    /// Restructure a legacy mapping into the current layout
    #[must_use]
    pub fn translate(&self, data: &Map<String, JsonValue>) -> Map<String, JsonValue> {
        let mut out = Map::new();
        let mut dropped = 0usize;

        for (section, body) in data {
            let Some(fields) = body.as_object() else {
                tracing::debug!(section = %section, "dropping non-mapping legacy entry");
                dropped += 1;
                continue;
            };
            for (key, value) in fields {
                match self.rename(section, key) {
                    Some(path) => insert_path(&mut out, path, value.clone()),
                    None => {
                        tracing::debug!(section = %section, key = %key, "dropping unmapped legacy key");
                        dropped += 1;
                    }
                }
            }
        }

        tracing::info!(dropped, "translated legacy layout");
        out
    }
}

fn insert_path(map: &mut Map<String, JsonValue>, path: &str, value: JsonValue) {
    match path.split_once(PATH_SEPARATOR) {
        None => {
            map.insert(path.to_string(), value);
        }
        Some((head, rest)) => {
            let entry = map
                .entry(head.to_string())
                .or_insert_with(|| JsonValue::Object(Map::new()));
            if let JsonValue::Object(inner) = entry {
                insert_path(inner, rest, value);
            }
        }
    }
}
