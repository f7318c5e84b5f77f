//! Observation space section

use simcfg_core::{ConfigGroup, DependencyRule, Result};

use super::flag;

const OBSERVATIONS: [&str; 9] = [
    "compromised_status",
    "vulnerabilities",
    "node_connections",
    "average_vulnerability",
    "graph_connectivity",
    "attacking_nodes",
    "attacked_nodes",
    "special_nodes",
    "red_agent_skill",
];

pub(super) fn build() -> Result<ConfigGroup> {
    ConfigGroup::builder()
        .doc("What the blue agent can observe of the network")
        .item("compromised_status", flag(true, "Which nodes are compromised")?)
        .item("vulnerabilities", flag(true, "Vulnerability score of each node")?)
        .item("node_connections", flag(true, "Adjacency of the network")?)
        .item("average_vulnerability", flag(false, "Mean vulnerability across all nodes")?)
        .item("graph_connectivity", flag(false, "Connectivity of the whole graph")?)
        .item("attacking_nodes", flag(true, "Nodes that attacked this step")?)
        .item("attacked_nodes", flag(true, "Nodes that were attacked this step")?)
        .item("special_nodes", flag(true, "Entry and high value nodes")?)
        .item("red_agent_skill", flag(true, "Skill of the red agent")?)
        .rule(DependencyRule::at_least_one_of(
            OBSERVATIONS,
            "At least one observation must be enabled; the observation space cannot be empty.",
        ))
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Map};

    #[test]
    fn defaults_pass() {
        assert!(build().unwrap().is_passed());
    }

    #[test]
    fn empty_observation_space_fails() {
        let mut space = build().unwrap();
        let none: Map<_, _> = OBSERVATIONS.iter().map(|o| ((*o).to_string(), json!(false))).collect();
        space.set_from_dict(&none);
        let tree = space.to_error_tree("observation_space");
        assert_eq!(tree["observation_space"].as_object().map(Map::len), Some(1));
        assert_eq!(tree["observation_space"]["group"].as_array().map(Vec::len), Some(1));

        space.set_value("graph_connectivity", true).unwrap();
        space.validate();
        assert!(space.is_passed());
    }
}
