//! Game rules section

use simcfg_core::{ConfigGroup, DependencyRule, Predicate, Result};

use super::{count, flag, probability};

const LOSS_CONDITIONS: [&str; 4] = [
    "all_nodes_lost",
    "high_value_node_lost",
    "target_node_lost",
    "n_percent_nodes_lost",
];

pub(super) fn build() -> Result<ConfigGroup> {
    ConfigGroup::builder()
        .doc("The rules of the game")
        .item("max_steps", count(1, 500, "Maximum number of steps in an episode")?)
        .item(
            "grace_period",
            count(0, 0, "Steps at the start of an episode during which blue cannot lose")?,
        )
        .group("node_vulnerability", node_vulnerability()?)
        .group("blue_loss_condition", blue_loss_condition()?)
        .build()
}

fn node_vulnerability() -> Result<ConfigGroup> {
    ConfigGroup::builder()
        .doc("Range from which node vulnerabilities are drawn")
        .item("lower_bound", probability(0.2, "Lowest possible vulnerability")?)
        .item("upper_bound", probability(0.8, "Highest possible vulnerability")?)
        .rule(DependencyRule::ordered(
            "lower_bound",
            "upper_bound",
            "lower_bound must not be greater than upper_bound.",
        ))
        .build()
}

fn blue_loss_condition() -> Result<ConfigGroup> {
    ConfigGroup::builder()
        .doc("Conditions under which blue loses")
        .item("all_nodes_lost", flag(false, "Blue loses when every node is compromised")?)
        .item(
            "high_value_node_lost",
            flag(true, "Blue loses when a high value node is compromised")?,
        )
        .item("target_node_lost", flag(false, "Blue loses when the target node is compromised")?)
        .item(
            "n_percent_nodes_lost",
            flag(false, "Blue loses when a share of nodes is compromised")?,
        )
        .item("percent", probability(0.8, "Share of nodes that must be compromised")?)
        .rule(DependencyRule::at_least_one_of(
            LOSS_CONDITIONS,
            "At least one blue loss condition must be selected.",
        ))
        .rule(DependencyRule::conditional_requirement(
            "n_percent_nodes_lost",
            "percent",
            Predicate::GreaterThan(0.0),
            "If blue loses on a share of nodes lost then percent must be greater than 0.",
        ))
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn max_steps_must_be_positive() {
        let mut rules = build().unwrap();
        rules.set_value("max_steps", 0).unwrap();
        rules.validate();
        assert_eq!(
            rules.to_error_tree("game_rules"),
            json!({"game_rules": {"max_steps": ["Value 0 is less than the lower bound 1 (inclusive)."]}})
        );
    }

    #[test]
    fn vulnerability_bounds_are_ordered() {
        let mut rules = build().unwrap();
        rules.set_from_dict(
            json!({"node_vulnerability": {"lower_bound": 0.9, "upper_bound": 0.1}})
                .as_object()
                .unwrap(),
        );
        assert_eq!(
            rules.to_error_tree("game_rules"),
            json!({"game_rules": {"node_vulnerability": {"group": [
                "'lower_bound', 'upper_bound' -> lower_bound must not be greater than upper_bound."
            ]}}})
        );
    }

    #[test]
    fn n_percent_needs_a_percentage() {
        let mut rules = build().unwrap();
        rules.set_from_dict(
            json!({"blue_loss_condition": {
                "high_value_node_lost": false,
                "n_percent_nodes_lost": true,
                "percent": 0.0
            }})
            .as_object()
            .unwrap(),
        );
        let loss = rules.group("blue_loss_condition").unwrap();
        assert_eq!(loss.validation().fail_reasons().len(), 1);
        assert!(loss.validation().elements_passed());
    }
}
