//! Miscellaneous section

use simcfg_core::{ConfigGroup, ConfigItem, ItemConstraints, Result};

use super::flag;

pub(super) fn build() -> Result<ConfigGroup> {
    let seed = ConfigItem::new(ItemConstraints::integer().allow_null(true).build()?)
        .with_doc("Seed for every random choice; unseeded when null");

    ConfigGroup::builder()
        .doc("Seeding and output")
        .item("random_seed", seed)
        .item(
            "output_timestep_data_to_json",
            flag(false, "Write per-step data to JSON")?,
        )
        .build()
}
