//! Reset section

use simcfg_core::{ConfigGroup, Result};

use super::flag;

pub(super) fn build() -> Result<ConfigGroup> {
    ConfigGroup::builder()
        .doc("What changes when the environment resets")
        .item(
            "randomise_vulnerabilities",
            flag(false, "Draw new node vulnerabilities on reset")?,
        )
        .item(
            "choose_new_high_value_nodes",
            flag(true, "Choose new high value nodes on reset")?,
        )
        .item("choose_new_entry_nodes", flag(true, "Choose new entry nodes on reset")?)
        .build()
}
