use bn_core::BnError;
use bn_graph::network_from_json;

#[test]
fn children_may_be_listed_before_parents() {
    let json = r#"{
        "variables": [
            { "name": "umbrella", "parents": ["rain"],
              "cpt": [ { "given": [true], "p": 0.9 }, { "given": [false], "p": 0.01 } ] },
            { "name": "rain", "probability": 0.1 }
        ]
    }"#;
    let network = network_from_json(json).unwrap();
    let rain = network.var("rain").unwrap();
    let umbrella = network.var("umbrella").unwrap();
    assert!(rain < umbrella);
    assert_eq!(network.children(rain), &[umbrella]);
}

#[test]
fn parent_cycles_are_rejected() {
    let json = r#"{
        "variables": [
            { "name": "a", "parents": ["c"] },
            { "name": "b", "parents": ["a"] },
            { "name": "c", "parents": ["b"] }
        ]
    }"#;
    let err = network_from_json(json).unwrap_err();
    assert!(matches!(err, BnError::Graph(info) if info.code == "would-create-cycle"));
}

#[test]
fn unknown_parent_names_are_rejected() {
    let json = r#"{ "variables": [ { "name": "a", "parents": ["ghost"] } ] }"#;
    let err = network_from_json(json).unwrap_err();
    assert_eq!(err.code(), "unknown-parent");
}

#[test]
fn probability_shorthand_requires_a_root() {
    let json = r#"{
        "variables": [
            { "name": "rain", "probability": 0.1 },
            { "name": "wet", "parents": ["rain"], "probability": 0.5 }
        ]
    }"#;
    let err = network_from_json(json).unwrap_err();
    assert_eq!(err.code(), "cpt-arity");
}
