//! Blue agent section

use simcfg_core::{ConfigGroup, DependencyRule, Predicate, Result};

use super::{bounded, count, flag, probability};

/// The eight blue actions, in declaration order
const ACTIONS: [&str; 8] = [
    "use_reduce_vulnerability",
    "use_restore_node",
    "use_make_node_safe",
    "use_scan",
    "use_isolate_node",
    "use_reconnect_node",
    "use_do_nothing",
    "use_deceptive_nodes",
];

pub(super) fn build() -> Result<ConfigGroup> {
    ConfigGroup::builder()
        .doc("The configuration of the blue agent")
        .group("action_set", action_set()?)
        .group("make_node_safe", make_node_safe()?)
        .group("deceptive_nodes", deceptive_nodes()?)
        .group("intrusion_discovery_chance", intrusion_discovery_chance()?)
        .group("attack_discovery", attack_discovery()?)
        .rule(DependencyRule::conditional_requirement(
            "action_set.use_deceptive_nodes",
            "deceptive_nodes.max_number",
            Predicate::GreaterThan(0.0),
            "If blue can use deceptive nodes then max_number must be greater than 0.",
        ))
        .build()
}

fn action_set() -> Result<ConfigGroup> {
    ConfigGroup::builder()
        .doc("The set of actions blue may take")
        .item("use_reduce_vulnerability", flag(true, "Blue may reduce the vulnerability of a node")?)
        .item("use_restore_node", flag(true, "Blue may restore a node to its initial state")?)
        .item("use_make_node_safe", flag(true, "Blue may fix a node without restoring it")?)
        .item("use_scan", flag(true, "Blue may scan for compromised nodes")?)
        .item("use_isolate_node", flag(true, "Blue may disconnect a node from the network")?)
        .item("use_reconnect_node", flag(true, "Blue may reconnect an isolated node")?)
        .item("use_do_nothing", flag(true, "Blue may skip its turn")?)
        .item("use_deceptive_nodes", flag(false, "Blue may place deceptive nodes")?)
        .rule(DependencyRule::at_least_one_of(
            ACTIONS,
            "Blue must have at least one action selected. If you want blue to do nothing set 'use_do_nothing' to True",
        ))
        .rule(DependencyRule::mutual_requirement(
            "use_isolate_node",
            "use_reconnect_node",
            "Blue should be able to reconnect or isolate nodes if the other is true",
        ))
        .build()
}

fn make_node_safe() -> Result<ConfigGroup> {
    ConfigGroup::builder()
        .doc("Effects of the make node safe action")
        .item(
            "modifies_vulnerability",
            flag(false, "Making a node safe changes its vulnerability")?,
        )
        .item(
            "vulnerability_change",
            bounded(-1.0, 1.0, 0.4, "Vulnerability change applied when a node is made safe")?,
        )
        .item(
            "gives_random_vulnerability",
            flag(true, "Making a node safe gives it a random vulnerability")?,
        )
        .build()
}

fn deceptive_nodes() -> Result<ConfigGroup> {
    ConfigGroup::builder()
        .doc("Deceptive node placement")
        .item(
            "max_number",
            count(0, 2, "Maximum number of deceptive nodes blue may place at once")?,
        )
        .item(
            "new_node_on_relocate",
            flag(true, "Relocating a deceptive node creates a new node")?,
        )
        .build()
}

fn node_chances(standard: f64, deceptive: f64, doc: &str) -> Result<ConfigGroup> {
    ConfigGroup::builder()
        .doc(doc)
        .item("standard_node", probability(standard, "Chance for a standard node")?)
        .item("deceptive_node", probability(deceptive, "Chance for a deceptive node")?)
        .build()
}

fn intrusion_discovery_chance() -> Result<ConfigGroup> {
    ConfigGroup::builder()
        .doc("Chances for blue to discover an intrusion")
        .group(
            "immediate",
            node_chances(0.5, 1.0, "Chance to discover an intrusion as it happens")?,
        )
        .group(
            "on_scan",
            node_chances(0.7, 1.0, "Chance to discover an intrusion when scanning")?,
        )
        .build()
}

fn attack_discovery() -> Result<ConfigGroup> {
    let failed = ConfigGroup::builder()
        .doc("Discovery of failed attacks")
        .item("use", flag(true, "Blue can discover failed attacks")?)
        .item("standard_node", probability(0.5, "Chance for a standard node")?)
        .item("deceptive_node", probability(1.0, "Chance for a deceptive node")?)
        .build()?;

    let known = ConfigGroup::builder()
        .doc("Discovery of succeeded attacks whose compromise is known")
        .item("use", flag(true, "Blue can discover the source of a known compromise")?)
        .item("standard_node", probability(0.3, "Chance for a standard node")?)
        .item("deceptive_node", probability(1.0, "Chance for a deceptive node")?)
        .build()?;

    let unknown = ConfigGroup::builder()
        .doc("Discovery of succeeded attacks whose compromise is not known")
        .item("use", flag(true, "Blue can discover the source of an unknown compromise")?)
        .item("standard_node", probability(0.1, "Chance for a standard node")?)
        .build()?;

    ConfigGroup::builder()
        .doc("Chances for blue to discover the source of an attack")
        .group("failed_attacks", failed)
        .group("succeeded_attacks_known_compromise", known)
        .group("succeeded_attacks_unknown_compromise", unknown)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn isolate_without_reconnect_fails_once() {
        let mut blue = build().unwrap();
        blue.set_from_dict(
            json!({"action_set": {"use_isolate_node": true, "use_reconnect_node": false}})
                .as_object()
                .unwrap(),
        );
        let action_set = blue.group("action_set").unwrap();
        assert!(!action_set.is_passed());
        assert_eq!(
            action_set.validation().fail_reasons().iter().collect::<Vec<_>>(),
            vec!["'use_isolate_node', 'use_reconnect_node' -> Blue should be able to reconnect or isolate nodes if the other is true"]
        );
    }

    #[test]
    fn deceptive_nodes_need_a_positive_maximum() {
        let mut blue = build().unwrap();
        blue.set_from_dict(
            json!({
                "action_set": {"use_deceptive_nodes": true},
                "deceptive_nodes": {"max_number": 0}
            })
            .as_object()
            .unwrap(),
        );
        assert!(!blue.validation().group_rules_passed());
        assert!(blue.validation().elements_passed());
        assert_eq!(
            blue.to_error_tree("blue"),
            json!({"blue": {"group": [
                "'action_set.use_deceptive_nodes', 'deceptive_nodes.max_number' -> If blue can use deceptive nodes then max_number must be greater than 0."
            ]}})
        );
    }

    #[test]
    fn vulnerability_change_range() {
        let mut blue = build().unwrap();
        blue.set_value("make_node_safe.vulnerability_change", -1.0).unwrap();
        blue.validate();
        assert!(blue.is_passed());

        blue.set_value("make_node_safe.vulnerability_change", -2).unwrap();
        blue.validate();
        assert_eq!(
            blue.to_error_tree("blue"),
            json!({"blue": {"make_node_safe": {"vulnerability_change": [
                "Value -2.0 is less than the lower bound -1 (inclusive)."
            ]}}})
        );
    }
}
