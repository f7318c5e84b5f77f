//! Testing utilities for the simcfg workspace
//!
//! Scenario fixtures in both layouts, and helpers for inspecting error trees.

#![allow(missing_docs)]

use serde_json::{Map, Value as JsonValue};

/// A complete, valid scenario in the flat legacy layout.
///
/// Carries one unmapped key (`RED.red_chooses_target_at_random`) that
/// translation drops.
pub const LEGACY_YAML: &str = r"
RED:
  red_uses_spread_action: true
  red_uses_random_infect_action: false
  red_uses_basic_attack_action: true
  red_uses_do_nothing_action: false
  red_uses_move_action: false
  red_uses_zero_day_action: true
  red_uses_skill: true
  red_skill: 0.7
  red_ignores_defences: false
  red_always_succeeds: false
  red_can_naturally_spread: true
  chance_to_spread_to_connected_node: 0.01
  chance_to_spread_to_unconnected_node: 0.005
  chance_for_red_to_spread: 0.25
  chance_for_red_to_random_compromise: 0.15
  zero_day_start_amount: 2
  days_required_for_zero_day: 3
  red_chooses_target_at_random: true
BLUE:
  blue_uses_reduce_vulnerability: true
  blue_uses_restore_node: true
  blue_uses_make_node_safe: true
  blue_uses_scan: true
  blue_uses_isolate_node: true
  blue_uses_reconnect_node: true
  blue_uses_do_nothing: true
  blue_uses_deceptive_nodes: true
  making_node_safe_modifies_vulnerability: false
  vulnerability_change_during_node_patch: 0.4
  making_node_safe_gives_random_vulnerability: true
  max_number_deceptive_nodes: 2
  relocating_deceptive_nodes_generates_a_new_node: true
  chance_to_immediately_discover_intrusion: 0.5
  chance_to_immediately_discover_intrusion_deceptive_node: 1
  chance_to_discover_intrusion_on_scan: 0.7
  chance_to_discover_intrusion_on_scan_deceptive_node: 1
  can_discover_failed_attacks: true
  chance_to_discover_failed_attack: 0.5
  chance_to_discover_failed_attack_deceptive_node: 1
  can_discover_succeeded_attacks_if_compromise_is_discovered: true
  chance_to_discover_succeeded_attack_compromise_known: 0.3
  chance_to_discover_succeeded_attack_deceptive_node: 1
  can_discover_succeeded_attacks_if_compromise_is_not_discovered: true
  chance_to_discover_succeeded_attack_compromise_not_known: 0.1
GAME_RULES:
  max_steps: 1000
  grace_period_length: 5
  node_vulnerability_lower_bound: 0.2
  node_vulnerability_upper_bound: 0.8
  gr_loss_total_compromise: false
  gr_loss_hvn: true
  gr_loss_tn: false
  gr_loss_pc_nodes_compromised: true
  gr_loss_pc_node_compromised_pc: 0.8
OBSERVATION_SPACE:
  compromised_status: true
  vulnerabilities: true
  node_connections: true
  average_vulnerability: true
  graph_connectivity: false
  attacking_nodes: true
  attacked_nodes: false
  special_nodes: true
  red_agent_skill: false
RESET:
  randomise_vulnerabilities_on_reset: true
  choose_new_high_value_nodes_on_reset: false
  choose_new_entry_nodes_on_reset: true
REWARDS:
  rewards_for_loss: -50.0
  rewards_for_reaching_max_steps: 50.0
  end_rewards_are_multiplied_by_end_state: false
  reduce_negative_rewards_for_closer_fails: true
  reward_function: safe_gives_rewards
MISCELLANEOUS:
  random_seed: 1337
  output_timestep_data_to_json: false
";

/// The configuration of [`LEGACY_YAML`] in the current layout
pub const CURRENT_YAML: &str = r"
red:
  action_set:
    use_spread: true
    use_random_infect: false
    use_basic_attack: true
    use_do_nothing: false
    use_move: false
    use_zero_day: true
  attack:
    use_skill: true
    skill: 0.7
    ignores_defences: false
    always_succeeds: false
  natural_spreading:
    enabled: true
    to_connected_node: 0.01
    to_unconnected_node: 0.005
  spread:
    chance: 0.25
  random_infect:
    chance: 0.15
  zero_day:
    start_amount: 2
    days_required: 3
blue:
  action_set:
    use_reduce_vulnerability: true
    use_restore_node: true
    use_make_node_safe: true
    use_scan: true
    use_isolate_node: true
    use_reconnect_node: true
    use_do_nothing: true
    use_deceptive_nodes: true
  make_node_safe:
    modifies_vulnerability: false
    vulnerability_change: 0.4
    gives_random_vulnerability: true
  deceptive_nodes:
    max_number: 2
    new_node_on_relocate: true
  intrusion_discovery_chance:
    immediate:
      standard_node: 0.5
      deceptive_node: 1
    on_scan:
      standard_node: 0.7
      deceptive_node: 1
  attack_discovery:
    failed_attacks:
      use: true
      standard_node: 0.5
      deceptive_node: 1
    succeeded_attacks_known_compromise:
      use: true
      standard_node: 0.3
      deceptive_node: 1
    succeeded_attacks_unknown_compromise:
      use: true
      standard_node: 0.1
game_rules:
  max_steps: 1000
  grace_period: 5
  node_vulnerability:
    lower_bound: 0.2
    upper_bound: 0.8
  blue_loss_condition:
    all_nodes_lost: false
    high_value_node_lost: true
    target_node_lost: false
    n_percent_nodes_lost: true
    percent: 0.8
observation_space:
  compromised_status: true
  vulnerabilities: true
  node_connections: true
  average_vulnerability: true
  graph_connectivity: false
  attacking_nodes: true
  attacked_nodes: false
  special_nodes: true
  red_agent_skill: false
on_reset:
  randomise_vulnerabilities: true
  choose_new_high_value_nodes: false
  choose_new_entry_nodes: true
rewards:
  for_loss: -50.0
  for_reaching_max_steps: 50.0
  end_rewards_are_multiplied_by_end_state: false
  reduce_negative_rewards_for_closer_fails: true
  function: safe_gives_rewards
miscellaneous:
  random_seed: 1337
  output_timestep_data_to_json: false
";

/// Parse YAML into a mapping, panicking on anything else
pub fn yaml_mapping(yaml: &str) -> Map<String, JsonValue> {
    let value: JsonValue = serde_yaml::from_str(yaml).unwrap();
    mapping(value)
}

/// Unwrap a JSON object
pub fn mapping(value: JsonValue) -> Map<String, JsonValue> {
    match value {
        JsonValue::Object(map) => map,
        other => panic!("expected a mapping, got {other}"),
    }
}

pub fn legacy_mapping() -> Map<String, JsonValue> {
    yaml_mapping(LEGACY_YAML)
}

pub fn current_mapping() -> Map<String, JsonValue> {
    yaml_mapping(CURRENT_YAML)
}

/// Dotted paths to every leaf of an error tree
///
/// `{"root": {"blue": {"group": [..]}}}` yields `["root.blue.group"]`.
pub fn error_paths(tree: &JsonValue) -> Vec<String> {
    let mut paths = Vec::new();
    collect_paths(tree, "", &mut paths);
    paths
}

fn collect_paths(node: &JsonValue, prefix: &str, out: &mut Vec<String>) {
    match node {
        JsonValue::Object(map) => {
            for (key, child) in map {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                collect_paths(child, &path, out);
            }
        }
        _ => out.push(prefix.to_string()),
    }
}

/// Set a value at a dotted path inside a mapping, creating objects on the way
pub fn set_path(map: &mut Map<String, JsonValue>, path: &str, value: JsonValue) {
    match path.split_once('.') {
        None => {
            map.insert(path.to_string(), value);
        }
        Some((head, rest)) => {
            let entry = map
                .entry(head.to_string())
                .or_insert_with(|| JsonValue::Object(Map::new()));
            match entry {
                JsonValue::Object(inner) => set_path(inner, rest, value),
                other => panic!("{head} is not a mapping: {other}"),
            }
        }
    }
}
