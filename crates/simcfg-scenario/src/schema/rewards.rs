//! Rewards section

use simcfg_core::{ConfigGroup, Result};

use super::{flag, real, text};

pub(super) fn build() -> Result<ConfigGroup> {
    ConfigGroup::builder()
        .doc("Reward shaping for the blue agent")
        .item("for_loss", real(-100.0, "Reward given when blue loses")?)
        .item(
            "for_reaching_max_steps",
            real(100.0, "Reward given when blue survives until max_steps")?,
        )
        .item(
            "end_rewards_are_multiplied_by_end_state",
            flag(true, "Scale end rewards by the state of the network")?,
        )
        .item(
            "reduce_negative_rewards_for_closer_fails",
            flag(true, "Reduce the loss penalty the longer blue survived")?,
        )
        .item("function", text("standard_rewards", "Name of the reward function")?)
        .build()
}
