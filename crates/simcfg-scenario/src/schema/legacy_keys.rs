//! Rename table for the flat legacy layout

pub(super) const SECTIONS: &[(&str, &str)] = &[
    ("RED", "red"),
    ("BLUE", "blue"),
    ("GAME_RULES", "game_rules"),
    ("OBSERVATION_SPACE", "observation_space"),
    ("RESET", "on_reset"),
    ("REWARDS", "rewards"),
    ("MISCELLANEOUS", "miscellaneous"),
];

#[rustfmt::skip]
pub(super) const RENAMES: &[(&str, &str, &str)] = &[
    // red
    ("RED", "red_uses_spread_action", "red.action_set.use_spread"),
    ("RED", "red_uses_random_infect_action", "red.action_set.use_random_infect"),
    ("RED", "red_uses_basic_attack_action", "red.action_set.use_basic_attack"),
    ("RED", "red_uses_do_nothing_action", "red.action_set.use_do_nothing"),
    ("RED", "red_uses_move_action", "red.action_set.use_move"),
    ("RED", "red_uses_zero_day_action", "red.action_set.use_zero_day"),
    ("RED", "red_uses_skill", "red.attack.use_skill"),
    ("RED", "red_skill", "red.attack.skill"),
    ("RED", "red_ignores_defences", "red.attack.ignores_defences"),
    ("RED", "red_always_succeeds", "red.attack.always_succeeds"),
    ("RED", "red_can_naturally_spread", "red.natural_spreading.enabled"),
    ("RED", "chance_to_spread_to_connected_node", "red.natural_spreading.to_connected_node"),
    ("RED", "chance_to_spread_to_unconnected_node", "red.natural_spreading.to_unconnected_node"),
    ("RED", "chance_for_red_to_spread", "red.spread.chance"),
    ("RED", "chance_for_red_to_random_compromise", "red.random_infect.chance"),
    ("RED", "zero_day_start_amount", "red.zero_day.start_amount"),
    ("RED", "days_required_for_zero_day", "red.zero_day.days_required"),
    // blue
    ("BLUE", "blue_uses_reduce_vulnerability", "blue.action_set.use_reduce_vulnerability"),
    ("BLUE", "blue_uses_restore_node", "blue.action_set.use_restore_node"),
    ("BLUE", "blue_uses_make_node_safe", "blue.action_set.use_make_node_safe"),
    ("BLUE", "blue_uses_scan", "blue.action_set.use_scan"),
    ("BLUE", "blue_uses_isolate_node", "blue.action_set.use_isolate_node"),
    ("BLUE", "blue_uses_reconnect_node", "blue.action_set.use_reconnect_node"),
    ("BLUE", "blue_uses_do_nothing", "blue.action_set.use_do_nothing"),
    ("BLUE", "blue_uses_deceptive_nodes", "blue.action_set.use_deceptive_nodes"),
    ("BLUE", "making_node_safe_modifies_vulnerability", "blue.make_node_safe.modifies_vulnerability"),
    ("BLUE", "vulnerability_change_during_node_patch", "blue.make_node_safe.vulnerability_change"),
    ("BLUE", "making_node_safe_gives_random_vulnerability", "blue.make_node_safe.gives_random_vulnerability"),
    ("BLUE", "max_number_deceptive_nodes", "blue.deceptive_nodes.max_number"),
    ("BLUE", "relocating_deceptive_nodes_generates_a_new_node", "blue.deceptive_nodes.new_node_on_relocate"),
    ("BLUE", "chance_to_immediately_discover_intrusion", "blue.intrusion_discovery_chance.immediate.standard_node"),
    ("BLUE", "chance_to_immediately_discover_intrusion_deceptive_node", "blue.intrusion_discovery_chance.immediate.deceptive_node"),
    ("BLUE", "chance_to_discover_intrusion_on_scan", "blue.intrusion_discovery_chance.on_scan.standard_node"),
    ("BLUE", "chance_to_discover_intrusion_on_scan_deceptive_node", "blue.intrusion_discovery_chance.on_scan.deceptive_node"),
    ("BLUE", "can_discover_failed_attacks", "blue.attack_discovery.failed_attacks.use"),
    ("BLUE", "chance_to_discover_failed_attack", "blue.attack_discovery.failed_attacks.standard_node"),
    ("BLUE", "chance_to_discover_failed_attack_deceptive_node", "blue.attack_discovery.failed_attacks.deceptive_node"),
    ("BLUE", "can_discover_succeeded_attacks_if_compromise_is_discovered", "blue.attack_discovery.succeeded_attacks_known_compromise.use"),
    ("BLUE", "chance_to_discover_succeeded_attack_compromise_known", "blue.attack_discovery.succeeded_attacks_known_compromise.standard_node"),
    ("BLUE", "chance_to_discover_succeeded_attack_deceptive_node", "blue.attack_discovery.succeeded_attacks_known_compromise.deceptive_node"),
    ("BLUE", "can_discover_succeeded_attacks_if_compromise_is_not_discovered", "blue.attack_discovery.succeeded_attacks_unknown_compromise.use"),
    ("BLUE", "chance_to_discover_succeeded_attack_compromise_not_known", "blue.attack_discovery.succeeded_attacks_unknown_compromise.standard_node"),
    // game rules
    ("GAME_RULES", "max_steps", "game_rules.max_steps"),
    ("GAME_RULES", "grace_period_length", "game_rules.grace_period"),
    ("GAME_RULES", "node_vulnerability_lower_bound", "game_rules.node_vulnerability.lower_bound"),
    ("GAME_RULES", "node_vulnerability_upper_bound", "game_rules.node_vulnerability.upper_bound"),
    ("GAME_RULES", "gr_loss_total_compromise", "game_rules.blue_loss_condition.all_nodes_lost"),
    ("GAME_RULES", "gr_loss_hvn", "game_rules.blue_loss_condition.high_value_node_lost"),
    ("GAME_RULES", "gr_loss_tn", "game_rules.blue_loss_condition.target_node_lost"),
    ("GAME_RULES", "gr_loss_pc_nodes_compromised", "game_rules.blue_loss_condition.n_percent_nodes_lost"),
    ("GAME_RULES", "gr_loss_pc_node_compromised_pc", "game_rules.blue_loss_condition.percent"),
    // observation space
    ("OBSERVATION_SPACE", "compromised_status", "observation_space.compromised_status"),
    ("OBSERVATION_SPACE", "vulnerabilities", "observation_space.vulnerabilities"),
    ("OBSERVATION_SPACE", "node_connections", "observation_space.node_connections"),
    ("OBSERVATION_SPACE", "average_vulnerability", "observation_space.average_vulnerability"),
    ("OBSERVATION_SPACE", "graph_connectivity", "observation_space.graph_connectivity"),
    ("OBSERVATION_SPACE", "attacking_nodes", "observation_space.attacking_nodes"),
    ("OBSERVATION_SPACE", "attacked_nodes", "observation_space.attacked_nodes"),
    ("OBSERVATION_SPACE", "special_nodes", "observation_space.special_nodes"),
    ("OBSERVATION_SPACE", "red_agent_skill", "observation_space.red_agent_skill"),
    // reset
    ("RESET", "randomise_vulnerabilities_on_reset", "on_reset.randomise_vulnerabilities"),
    ("RESET", "choose_new_high_value_nodes_on_reset", "on_reset.choose_new_high_value_nodes"),
    ("RESET", "choose_new_entry_nodes_on_reset", "on_reset.choose_new_entry_nodes"),
    // rewards
    ("REWARDS", "rewards_for_loss", "rewards.for_loss"),
    ("REWARDS", "rewards_for_reaching_max_steps", "rewards.for_reaching_max_steps"),
    ("REWARDS", "end_rewards_are_multiplied_by_end_state", "rewards.end_rewards_are_multiplied_by_end_state"),
    ("REWARDS", "reduce_negative_rewards_for_closer_fails", "rewards.reduce_negative_rewards_for_closer_fails"),
    ("REWARDS", "reward_function", "rewards.function"),
    // miscellaneous
    ("MISCELLANEOUS", "random_seed", "miscellaneous.random_seed"),
    ("MISCELLANEOUS", "output_timestep_data_to_json", "miscellaneous.output_timestep_data_to_json"),
];
