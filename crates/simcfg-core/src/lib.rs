//! Simulation Config Core
//!
//! A self-describing, hierarchical configuration tree whose nodes carry
//! their own documentation, constraints and validation results.
//!
//! # Core Concepts
//!
//! - [`ConfigItem`]: Leaf holding a primitive [`Value`] plus optional [`ItemConstraints`]
//! - [`ConfigGroup`]: Fixed registry of named children and cross-field [`DependencyRule`]s
//! - [`ValidationResult`] / [`GroupValidationResult`]: Deduplicated failure records
//! - [`ContentHash`]: 32-byte Blake3 hash of a node's canonical form
//!
//! Items validate on every write. Groups validate on demand, after a batch
//! of values has been applied, so rules spanning several fields see the
//! whole update.
//!
//! # Example
//!
//! ```rust
//! use simcfg_core::{ConfigGroup, ConfigItem, ItemConstraints};
//!
//! let skill = ConfigItem::new(
//!     ItemConstraints::float().min(0.0).max(1.0).default(0.5).build()?,
//! )
//! .with_doc("Red agent attack skill");
//!
//! let mut attack = ConfigGroup::builder().item("skill", skill).build()?;
//! attack.set_value("skill", 1.5)?;
//! attack.validate();
//!
//! assert!(!attack.is_passed());
//! println!("{}", attack.validation().report("attack"));
//! # Ok::<(), simcfg_core::SchemaError>(())
//! ```

#![warn(unreachable_pub)]

mod constraints;
mod error;
mod group;
mod hash;
mod item;
mod rules;
mod validation;
mod value;

pub use constraints::{ItemConstraints, ItemConstraintsBuilder};
pub use error::{Result, SchemaError, SchemaValidationError};
pub use group::{ConfigGroup, ConfigGroupBuilder, ConfigNode, NodeFilter, ToDictOptions, PATH_SEPARATOR};
pub use hash::{ContentHash, HashError};
pub use item::ConfigItem;
pub use rules::{DependencyRule, Predicate};
pub use validation::{
    BoundSide, GroupValidationResult, NodeValidation, ValidationFailure, ValidationResult,
    GROUP_FAILURES_KEY, PASSED,
};
pub use value::{PrimitiveKind, Value};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
