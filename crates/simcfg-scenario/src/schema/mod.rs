//! The scenario schema
//!
//! Seven sections, each built by its own module:
//!
//! | section             | legacy section      | contents                                   |
//! |---------------------|---------------------|--------------------------------------------|
//! | `red`               | `RED`               | red agent actions, attack skill, zero days |
//! | `blue`              | `BLUE`              | blue agent actions and discovery chances   |
//! | `game_rules`        | `GAME_RULES`        | episode length and loss conditions         |
//! | `observation_space` | `OBSERVATION_SPACE` | what blue can observe                      |
//! | `on_reset`          | `RESET`             | what changes between episodes              |
//! | `rewards`           | `REWARDS`           | reward shaping                             |
//! | `miscellaneous`     | `MISCELLANEOUS`     | seeding and output                         |

mod blue;
mod game_rules;
mod legacy_keys;
mod misc;
mod observation;
mod red;
mod reset;
mod rewards;

use once_cell::sync::Lazy;
use simcfg_core::{ConfigGroup, ConfigItem, ItemConstraints, Result};

use crate::legacy::LegacyLayout;
use crate::root::{SchemaDefinition, SchemaRoot};

/// A scenario document
pub type Scenario = SchemaRoot<ScenarioSchema>;

static LEGACY_LAYOUT: Lazy<LegacyLayout> =
    Lazy::new(|| LegacyLayout::new(legacy_keys::SECTIONS, legacy_keys::RENAMES));

/// Definition of the scenario tree
#[derive(Debug, Clone, Copy, Default)]
pub struct ScenarioSchema;

impl SchemaDefinition for ScenarioSchema {
    const SCHEMA_ID: &'static str = "scenario";

    fn build() -> Result<ConfigGroup> {
        ConfigGroup::builder()
            .doc("All options to configure and represent a complete scenario")
            .group("red", red::build()?)
            .group("blue", blue::build()?)
            .group("game_rules", game_rules::build()?)
            .group("observation_space", observation::build()?)
            .group("on_reset", reset::build()?)
            .group("rewards", rewards::build()?)
            .group("miscellaneous", misc::build()?)
            .build()
    }

    fn legacy_layout() -> Option<&'static LegacyLayout> {
        Some(&LEGACY_LAYOUT)
    }
}

fn flag(default: bool, doc: &str) -> Result<ConfigItem> {
    let constraints = ItemConstraints::boolean().default(default).build()?;
    Ok(ConfigItem::new(constraints).with_doc(doc))
}

fn probability(default: f64, doc: &str) -> Result<ConfigItem> {
    bounded(0.0, 1.0, default, doc)
}

fn bounded(min: f64, max: f64, default: f64, doc: &str) -> Result<ConfigItem> {
    let constraints = ItemConstraints::float().min(min).max(max).default(default).build()?;
    Ok(ConfigItem::new(constraints).with_doc(doc))
}

fn real(default: f64, doc: &str) -> Result<ConfigItem> {
    let constraints = ItemConstraints::float().default(default).build()?;
    Ok(ConfigItem::new(constraints).with_doc(doc))
}

fn count(min: u8, default: i64, doc: &str) -> Result<ConfigItem> {
    let constraints = ItemConstraints::integer().min(f64::from(min)).default(default).build()?;
    Ok(ConfigItem::new(constraints).with_doc(doc))
}

fn text(default: &str, doc: &str) -> Result<ConfigItem> {
    let constraints = ItemConstraints::string().default(default).build()?;
    Ok(ConfigItem::new(constraints).with_doc(doc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use simcfg_core::NodeFilter;

    #[test]
    fn defaults_pass() {
        let scenario = Scenario::new().unwrap();
        assert!(scenario.is_passed(), "{}", scenario.report());
    }

    #[test]
    fn sections_in_order() {
        let group = ScenarioSchema::build().unwrap();
        let names: Vec<_> = group.children(NodeFilter::Groups).map(|(name, _)| name).collect();
        assert_eq!(
            names,
            vec![
                "red",
                "blue",
                "game_rules",
                "observation_space",
                "on_reset",
                "rewards",
                "miscellaneous"
            ]
        );
        assert_eq!(group.children(NodeFilter::Items).count(), 0);
    }

    #[test]
    fn every_legacy_rename_targets_an_item() {
        let group = ScenarioSchema::build().unwrap();
        for (section, key, path) in legacy_keys::RENAMES {
            assert!(
                group.item(path).is_some(),
                "{section}.{key} maps to missing item {path}"
            );
        }
    }

    #[test]
    fn every_item_has_a_legacy_key() {
        fn leaves(group: &ConfigGroup) -> usize {
            group.children(NodeFilter::Items).count()
                + group
                    .children(NodeFilter::Groups)
                    .filter_map(|(_, node)| node.as_group())
                    .map(leaves)
                    .sum::<usize>()
        }
        let group = ScenarioSchema::build().unwrap();
        assert_eq!(leaves(&group), legacy_keys::RENAMES.len());
        assert_eq!(ScenarioSchema::legacy_layout().unwrap().len(), legacy_keys::RENAMES.len());
    }

    #[test]
    fn every_legacy_section_is_fingerprinted() {
        let layout = ScenarioSchema::legacy_layout().unwrap();
        let sections: Vec<_> = layout.legacy_sections().collect();
        for (section, _, _) in legacy_keys::RENAMES {
            assert!(sections.contains(section));
        }
    }
}
