use bn_core::Query;
use bn_exact::exact_inference;
use bn_graph::{network_from_yaml, Network};

fn traffic() -> Network {
    network_from_yaml(include_str!("../../../networks/traffic.yaml")).unwrap()
}

fn alarm() -> Network {
    network_from_yaml(include_str!("../../../networks/alarm.yaml")).unwrap()
}

fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {expected} +/- {tolerance}, got {actual}"
    );
}

#[test]
fn traffic_given_umbrella() {
    let network = traffic();
    let traffic = network.var("traffic").unwrap();
    let umbrella = network.var("umbrella").unwrap();
    let week_end = network.var("weekEnd").unwrap();

    let single = Query::new().target(traffic, true).given(umbrella, true);
    assert_close(exact_inference(&network, &single).unwrap(), 0.632091, 0.001);

    let joint = Query::new()
        .target(traffic, true)
        .target(week_end, false)
        .given(umbrella, true);
    assert_close(exact_inference(&network, &joint).unwrap(), 0.604545, 0.001);
}

#[test]
fn burglary_given_calls() {
    let network = alarm();
    let burglary = network.var("burglary").unwrap();
    let alarm = network.var("alarm").unwrap();
    let john = network.var("johnCalls").unwrap();
    let mary = network.var("maryCalls").unwrap();

    let single = Query::new()
        .target(burglary, true)
        .given(john, true)
        .given(mary, false);
    assert_close(exact_inference(&network, &single).unwrap(), 0.0102303, 0.001);

    let joint = Query::new()
        .target(burglary, false)
        .target(alarm, true)
        .given(john, true)
        .given(mary, true);
    assert_close(exact_inference(&network, &joint).unwrap(), 0.325053, 0.001);
}

#[test]
fn repeated_queries_are_identical() {
    let network = alarm();
    let query = Query::new()
        .target(network.var("earthquake").unwrap(), true)
        .given(network.var("alarm").unwrap(), true);
    let first = exact_inference(&network, &query).unwrap();
    for _ in 0..5 {
        assert_eq!(exact_inference(&network, &query).unwrap(), first);
    }
}

#[test]
fn prior_without_evidence() {
    let network = traffic();
    let rain = network.var("rain").unwrap();
    let value = exact_inference(&network, &Query::new().target(rain, true)).unwrap();
    assert_close(value, 0.1, 1e-12);
}
