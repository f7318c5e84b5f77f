//! Scenario Schema
//!
//! Schema roots over [`simcfg_core`] trees, with document metadata, YAML
//! and JSON ingress, and translation of the flat legacy layout.
//!
//! # Core Concepts
//!
//! - [`SchemaDefinition`]: How a concrete schema builds its tree
//! - [`SchemaRoot<D>`]: Populated instance with [`DocMetadata`] and a [`PopulationState`]
//! - [`LegacyLayout`]: Rename table from the flat legacy layout
//! - [`Scenario`]: The concrete scenario schema
//!
//! # Example
//!
//! ```rust
//! use simcfg_scenario::{LayoutHint, Scenario};
//!
//! let yaml = "
//! BLUE:
//!   blue_uses_isolate_node: true
//!   blue_uses_reconnect_node: false
//! ";
//! let scenario = Scenario::create_from_yaml(yaml, LayoutHint::Infer)?;
//! assert!(!scenario.is_passed());
//! # Ok::<(), simcfg_core::SchemaError>(())
//! ```

#![warn(unreachable_pub)]

mod doc_metadata;
mod legacy;
mod root;
mod schema;

pub use doc_metadata::{DocMetadata, DOC_METADATA_KEY};
pub use legacy::{LayoutDetection, LegacyLayout};
pub use root::{
    LayoutHint, PopulationState, RootDictOptions, SchemaDefinition, SchemaRoot, ROOT_NAME,
};
pub use schema::{Scenario, ScenarioSchema};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
