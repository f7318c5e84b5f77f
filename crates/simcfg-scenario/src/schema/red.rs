//! Red agent section

use simcfg_core::{ConfigGroup, DependencyRule, Predicate, Result};

use super::{count, flag, probability};

const ACTIONS: [&str; 6] = [
    "use_spread",
    "use_random_infect",
    "use_basic_attack",
    "use_do_nothing",
    "use_move",
    "use_zero_day",
];

pub(super) fn build() -> Result<ConfigGroup> {
    ConfigGroup::builder()
        .doc("The configuration of the red agent")
        .group("action_set", action_set()?)
        .group("attack", attack()?)
        .group("natural_spreading", natural_spreading()?)
        .group(
            "spread",
            ConfigGroup::builder()
                .item("chance", probability(0.1, "Chance for red to spread to a connected node")?)
                .build()?,
        )
        .group(
            "random_infect",
            ConfigGroup::builder()
                .item("chance", probability(0.1, "Chance for red to compromise a random node")?)
                .build()?,
        )
        .group("zero_day", zero_day()?)
        .rule(DependencyRule::conditional_requirement(
            "action_set.use_zero_day",
            "zero_day.start_amount",
            Predicate::GreaterThan(0.0),
            "If red can use zero day attacks then start_amount must be greater than 0.",
        ))
        .build()
}

fn action_set() -> Result<ConfigGroup> {
    ConfigGroup::builder()
        .doc("The set of actions red may take")
        .item("use_spread", flag(false, "Red may spread to connected nodes")?)
        .item("use_random_infect", flag(false, "Red may compromise random nodes")?)
        .item("use_basic_attack", flag(true, "Red may attack a node it can reach")?)
        .item("use_do_nothing", flag(false, "Red may skip its turn")?)
        .item("use_move", flag(false, "Red may move between compromised nodes")?)
        .item("use_zero_day", flag(false, "Red may use zero day attacks")?)
        .rule(DependencyRule::at_least_one_of(
            ACTIONS,
            "Red must have at least one action selected.",
        ))
        .build()
}

fn attack() -> Result<ConfigGroup> {
    ConfigGroup::builder()
        .doc("How red attacks")
        .item("use_skill", flag(true, "Red's skill modifies its attack success")?)
        .item("skill", probability(0.5, "Red attack skill")?)
        .item("ignores_defences", flag(false, "Red ignores node vulnerability")?)
        .item("always_succeeds", flag(false, "Red attacks never fail")?)
        .build()
}

fn natural_spreading() -> Result<ConfigGroup> {
    ConfigGroup::builder()
        .doc("Spreading that happens without a red action")
        .item("enabled", flag(false, "Red spreads naturally each step")?)
        .item(
            "to_connected_node",
            probability(0.01, "Chance to spread to a connected node")?,
        )
        .item(
            "to_unconnected_node",
            probability(0.005, "Chance to spread to an unconnected node")?,
        )
        .build()
}

fn zero_day() -> Result<ConfigGroup> {
    ConfigGroup::builder()
        .doc("Zero day attacks")
        .item("start_amount", count(0, 1, "Zero days available at the start")?)
        .item(
            "days_required",
            count(0, 4, "Steps needed to accumulate another zero day")?,
        )
        .build()
}
