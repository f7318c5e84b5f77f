use pretty_assertions::assert_eq;
use proptest::prelude::*;
use serde_json::{json, Value as JsonValue};
use simcfg_core::{SchemaError, Value};
use simcfg_scenario::{
    LayoutDetection, LayoutHint, PopulationState, RootDictOptions, Scenario, ScenarioSchema,
    SchemaDefinition, DOC_METADATA_KEY,
};
use simcfg_test_utils::{current_mapping, error_paths, legacy_mapping, mapping, set_path};

const BLUE_ACTIONS: [&str; 8] = [
    "use_reduce_vulnerability",
    "use_restore_node",
    "use_make_node_safe",
    "use_scan",
    "use_isolate_node",
    "use_reconnect_node",
    "use_do_nothing",
    "use_deceptive_nodes",
];

const BLUE_AT_LEAST_ONE: &str = "'use_reduce_vulnerability', 'use_restore_node', 'use_make_node_safe', \
'use_scan', 'use_isolate_node', 'use_reconnect_node', 'use_do_nothing', 'use_deceptive_nodes' -> \
Blue must have at least one action selected. If you want blue to do nothing set 'use_do_nothing' to True";

const ISOLATE_RECONNECT: &str = "'use_isolate_node', 'use_reconnect_node' -> \
Blue should be able to reconnect or isolate nodes if the other is true";

fn fixture() -> Scenario {
    Scenario::create_from_mapping(&current_mapping(), LayoutHint::Current).unwrap()
}

fn blue_action_reasons(scenario: &Scenario) -> Vec<String> {
    scenario
        .group()
        .group("blue.action_set")
        .unwrap()
        .validation()
        .fail_reasons()
        .iter()
        .cloned()
        .collect()
}

#[test]
fn fixture_is_valid() {
    let scenario = fixture();
    assert_eq!(scenario.state(), PopulationState::Valid);
    assert_eq!(scenario.to_error_tree(), json!({"root": "Passed"}));
}

#[test]
fn defaults_round_trip() {
    let scenario = Scenario::new().unwrap();
    let data = scenario.to_dict(RootDictOptions::values_only());
    let copy = Scenario::create_from_value(&data, LayoutHint::Infer).unwrap();
    assert_eq!(copy, scenario);
}

#[test]
fn fixture_round_trips_through_every_format() {
    let scenario = fixture();

    let values = scenario.to_dict(RootDictOptions::values_only());
    assert_eq!(Scenario::create_from_value(&values, LayoutHint::Current).unwrap(), scenario);

    let json = scenario.to_json().unwrap();
    let from_json = Scenario::create_from_json(&json, LayoutHint::Infer).unwrap();
    assert_eq!(from_json, scenario);
    assert_eq!(from_json.metadata().uuid(), scenario.metadata().uuid());

    let yaml = scenario.to_yaml().unwrap();
    let from_yaml = Scenario::create_from_yaml(&yaml, LayoutHint::Infer).unwrap();
    assert_eq!(from_yaml, scenario);
    assert_eq!(from_yaml.content_hash(), scenario.content_hash());
}

#[test]
fn legacy_layout_matches_current_layout() {
    let legacy = Scenario::create_from_mapping(&legacy_mapping(), LayoutHint::Legacy).unwrap();
    let current = fixture();
    assert!(legacy.is_passed(), "{}", legacy.report());
    assert_eq!(legacy, current);
    assert_eq!(
        legacy.to_dict(RootDictOptions::values_only()),
        current.to_dict(RootDictOptions::values_only())
    );
}

#[test]
fn legacy_layout_is_inferred() {
    let layout = ScenarioSchema::legacy_layout().unwrap();
    assert_eq!(layout.detect(&legacy_mapping()), LayoutDetection::Legacy);
    assert_eq!(layout.detect(&current_mapping()), LayoutDetection::Current);

    let inferred = Scenario::create_from_mapping(&legacy_mapping(), LayoutHint::Infer).unwrap();
    assert_eq!(inferred, fixture());
}

#[test]
fn forcing_the_wrong_layout_ignores_everything() {
    let scenario = Scenario::create_from_mapping(&legacy_mapping(), LayoutHint::Current).unwrap();
    assert_eq!(scenario, Scenario::new().unwrap());
}

#[test]
fn undecidable_mapping_is_read_as_current() {
    let data = mapping(json!({
        "BLUE": {"blue_uses_scan": false},
        "red": {"attack": {"skill": 0.9}}
    }));
    let layout = ScenarioSchema::legacy_layout().unwrap();
    assert_eq!(layout.detect(&data), LayoutDetection::Undecidable);
    assert_eq!(layout.detect(&serde_json::Map::new()), LayoutDetection::Undecidable);

    let scenario = Scenario::create_from_mapping(&data, LayoutHint::Infer).unwrap();
    assert_eq!(scenario.value("red.attack.skill"), Some(&Value::Float(0.9)));
    assert_eq!(scenario.value("blue.action_set.use_scan"), Some(&Value::Bool(true)));
}

#[test]
fn isolate_without_reconnect() {
    let mut data = current_mapping();
    set_path(&mut data, "blue.action_set.use_isolate_node", json!(true));
    set_path(&mut data, "blue.action_set.use_reconnect_node", json!(false));
    let scenario = Scenario::create_from_mapping(&data, LayoutHint::Current).unwrap();

    assert!(!scenario.is_passed());
    assert_eq!(blue_action_reasons(&scenario), vec![ISOLATE_RECONNECT.to_string()]);

    set_path(&mut data, "blue.action_set.use_reconnect_node", json!(true));
    let scenario = Scenario::create_from_mapping(&data, LayoutHint::Current).unwrap();
    assert!(scenario.is_passed());
}

#[test]
fn no_blue_actions() {
    let mut data = current_mapping();
    for action in BLUE_ACTIONS {
        set_path(&mut data, &format!("blue.action_set.{action}"), json!(false));
    }
    let scenario = Scenario::create_from_mapping(&data, LayoutHint::Current).unwrap();
    assert_eq!(blue_action_reasons(&scenario), vec![BLUE_AT_LEAST_ONE.to_string()]);

    for action in BLUE_ACTIONS {
        let mut one = data.clone();
        set_path(&mut one, &format!("blue.action_set.{action}"), json!(true));
        let scenario = Scenario::create_from_mapping(&one, LayoutHint::Current).unwrap();
        assert!(
            !blue_action_reasons(&scenario).contains(&BLUE_AT_LEAST_ONE.to_string()),
            "enabling {action} should satisfy the action set"
        );
    }
}

#[test]
fn one_leaf_failure_adds_one_path() {
    let mut data = current_mapping();
    set_path(&mut data, "red.attack.skill", json!(1.5));
    let scenario = Scenario::create_from_mapping(&data, LayoutHint::Current).unwrap();

    assert_eq!(error_paths(&scenario.to_error_tree()), vec!["root.red.attack.skill"]);
    assert_eq!(
        scenario.to_error_tree(),
        json!({"root": {"red": {"attack": {"skill": [
            "Value 1.5 is greater than the upper bound 1 (inclusive)."
        ]}}}})
    );
}

#[test]
fn range_boundaries() {
    let mut scenario = fixture();
    for ok in [0.0, 1.0] {
        scenario.set_value("red.attack.skill", ok).unwrap();
        assert!(scenario.validate().is_passed());
    }

    scenario.set_value("red.attack.skill", -0.0001).unwrap();
    scenario.validate();
    assert_eq!(
        scenario.to_error_tree()["root"]["red"]["attack"]["skill"],
        json!(["Value -0.0001 is less than the lower bound 0 (inclusive)."])
    );

    scenario.set_value("red.attack.skill", 1.0001).unwrap();
    scenario.validate();
    assert_eq!(
        scenario.to_error_tree()["root"]["red"]["attack"]["skill"],
        json!(["Value 1.0001 is greater than the upper bound 1 (inclusive)."])
    );
}

#[test]
fn nan_skill_fails_and_is_not_reported_valid() {
    let mut scenario = fixture();
    scenario.set_value("red.attack.skill", f64::NAN).unwrap();
    scenario.validate();
    assert_eq!(scenario.state(), PopulationState::Invalid);
    assert_eq!(
        scenario.to_error_tree(),
        json!({"root": {"red": {"attack": {"skill": ["Value NaN is not a finite number."]}}}})
    );

    scenario.set_value("red.attack.skill", f64::INFINITY).unwrap();
    scenario.validate();
    assert!(!scenario.is_passed());
}

#[test]
fn whole_numbers_in_float_items_compare_equal() {
    let mut ints = current_mapping();
    set_path(&mut ints, "blue.intrusion_discovery_chance.immediate.deceptive_node", json!(1));
    set_path(&mut ints, "rewards.for_loss", json!(-100));
    let mut floats = current_mapping();
    set_path(&mut floats, "blue.intrusion_discovery_chance.immediate.deceptive_node", json!(1.0));
    set_path(&mut floats, "rewards.for_loss", json!(-100.0));

    let a = Scenario::create_from_mapping(&ints, LayoutHint::Current).unwrap();
    let b = Scenario::create_from_mapping(&floats, LayoutHint::Current).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.content_hash(), b.content_hash());
    assert_eq!(a.value("rewards.for_loss"), Some(&Value::Float(-100.0)));
    assert_eq!(a.value("game_rules.max_steps"), Some(&Value::Int(1000)));
}

#[test]
fn legacy_integers_match_current_floats() {
    let mut legacy = legacy_mapping();
    set_path(&mut legacy, "REWARDS.rewards_for_loss", json!(-50));
    let legacy = Scenario::create_from_mapping(&legacy, LayoutHint::Legacy).unwrap();
    assert_eq!(legacy, fixture());
}

#[test]
fn observation_space_is_translated_and_validated() {
    let legacy = Scenario::create_from_mapping(&legacy_mapping(), LayoutHint::Legacy).unwrap();
    assert_eq!(legacy.value("observation_space.average_vulnerability"), Some(&Value::Bool(true)));
    assert_eq!(legacy.value("observation_space.red_agent_skill"), Some(&Value::Bool(false)));

    let mut data = current_mapping();
    let observations = data["observation_space"].as_object().unwrap().clone();
    for key in observations.keys() {
        set_path(&mut data, &format!("observation_space.{key}"), json!(false));
    }
    let scenario = Scenario::create_from_mapping(&data, LayoutHint::Current).unwrap();
    assert_eq!(error_paths(&scenario.to_error_tree()), vec!["root.observation_space.group"]);
}

#[test]
fn repeated_invalid_writes_are_reported_once() {
    let mut scenario = fixture();
    for _ in 0..10 {
        scenario.set_value("game_rules.max_steps", 0).unwrap();
        scenario.validate();
    }
    let item = scenario.group().item("game_rules.max_steps").unwrap();
    assert_eq!(item.validation().fail_reasons().len(), 1);
    assert_eq!(scenario.validation().failure_count(), 1);
}

#[test]
fn strict_creation() {
    let mut data = current_mapping();
    set_path(&mut data, "game_rules.node_vulnerability.lower_bound", json!(0.9));
    set_path(&mut data, "game_rules.node_vulnerability.upper_bound", json!(0.1));

    let err = Scenario::create(&data, LayoutHint::Current, true).unwrap_err();
    assert!(err.is_validation());
    let SchemaError::Validation(inner) = err else {
        unreachable!()
    };
    assert_eq!(
        error_paths(inner.tree()),
        vec!["root.game_rules.node_vulnerability.group"]
    );

    let lenient = Scenario::create(&data, LayoutHint::Current, false).unwrap();
    assert_eq!(lenient.state(), PopulationState::Invalid);
    assert_eq!(lenient.value("game_rules.node_vulnerability.lower_bound"), Some(&Value::Float(0.9)));

    assert!(Scenario::create(&current_mapping(), LayoutHint::Current, true).is_ok());
}

#[test]
fn storage_form_carries_metadata() {
    let mut scenario = fixture();
    scenario.metadata_mut().set_locked(true);
    let stored = scenario.to_dict(RootDictOptions::json_serializable());

    let meta = &stored[DOC_METADATA_KEY];
    assert_eq!(meta["locked"], json!(true));
    assert!(meta["created_at"].is_string());
    assert_eq!(stored["red"]["attack"]["skill"], json!(0.7));

    let restored = Scenario::create_from_value(&stored, LayoutHint::Infer).unwrap();
    assert!(restored.metadata().locked());
    assert_eq!(restored, scenario);
}

#[test]
fn include_none_false_omits_null_seed() {
    let scenario = Scenario::new().unwrap();
    let options = RootDictOptions {
        include_none: false,
        ..RootDictOptions::values_only()
    };
    let dict = scenario.to_dict(options);
    assert!(dict["miscellaneous"].get("random_seed").is_none());
    assert_eq!(
        scenario.to_dict(RootDictOptions::values_only())["miscellaneous"]["random_seed"],
        JsonValue::Null
    );
}

#[test]
fn full_form_documents_items() {
    let dict = Scenario::new().unwrap().to_dict(RootDictOptions::default());
    let skill = &dict["red"]["attack"]["skill"];
    assert_eq!(skill["value"], json!(0.5));
    assert_eq!(skill["doc"], json!("Red attack skill"));
    assert_eq!(skill["constraints"]["min"], json!(0.0));
    assert_eq!(dict["red"]["doc"], json!("The configuration of the red agent"));
}

proptest! {
    #[test]
    fn prop_round_trip(
        skill in 0.0f64..=1.0,
        max_steps in 1i64..10_000,
        seed in proptest::option::of(any::<i64>()),
        flags in proptest::collection::vec(any::<bool>(), 3),
    ) {
        let mut data = current_mapping();
        set_path(&mut data, "red.attack.skill", json!(skill));
        set_path(&mut data, "game_rules.max_steps", json!(max_steps));
        set_path(&mut data, "miscellaneous.random_seed", json!(seed));
        set_path(&mut data, "on_reset.randomise_vulnerabilities", json!(flags[0]));
        set_path(&mut data, "blue.action_set.use_isolate_node", json!(flags[1]));
        set_path(&mut data, "blue.action_set.use_reconnect_node", json!(flags[2]));

        let original = Scenario::create_from_mapping(&data, LayoutHint::Current).unwrap();
        let values = original.to_dict(RootDictOptions::values_only());
        let copy = Scenario::create_from_value(&values, LayoutHint::Infer).unwrap();

        prop_assert_eq!(&copy, &original);
        prop_assert_eq!(copy.to_error_tree(), original.to_error_tree());
        prop_assert_eq!(original.is_passed(), flags[1] == flags[2]);
    }

    #[test]
    fn prop_set_from_dict_is_deterministic(skill in -1.0f64..2.0, flags in proptest::collection::vec(any::<bool>(), 8)) {
        let mut data = current_mapping();
        set_path(&mut data, "red.attack.skill", json!(skill));
        for (action, on) in BLUE_ACTIONS.iter().zip(&flags) {
            set_path(&mut data, &format!("blue.action_set.{action}"), json!(on));
        }

        let mut scenario = fixture();
        let first = scenario.set_from_dict(&data, LayoutHint::Current).clone();
        let first_state = scenario.state();
        let second = scenario.set_from_dict(&data, LayoutHint::Current).clone();
        let revalidated = scenario.validate().clone();

        prop_assert_eq!(&first, &second);
        prop_assert_eq!(&second, &revalidated);
        prop_assert_eq!(first_state, scenario.state());
    }
}
