use bn_core::{bit, Assignment, BnError, Observation, Query, RngHandle, VarId};
use bn_exact::exact_inference;
use bn_graph::{gen_random_network, Network, NetworkBuilder};
use proptest::prelude::*;

/// Enumerates the full joint distribution.
fn brute_force(network: &Network, query: &Query) -> f64 {
    let n = network.len();
    let mut joint = 0.0;
    let mut evidence_mass = 0.0;
    for row in 0..1usize << n {
        let mut assignment = Assignment::new(n);
        for id in network.ids() {
            assignment.set(id, bit(row, id.index()));
        }
        if !assignment.satisfies(&query.evidence) {
            continue;
        }
        let p: f64 = network
            .ids()
            .map(|id| network.conditional(id, assignment.get(id), &assignment).unwrap())
            .product();
        evidence_mass += p;
        if assignment.satisfies(&query.targets) {
            joint += p;
        }
    }
    joint / evidence_mass
}

fn split_query(n: usize, roles: &[u8], values: &[bool]) -> Query {
    let mut query = Query::new();
    for index in 0..n {
        let obs = Observation::new(VarId::from_index(index), values[index]);
        match roles[index] {
            0 => query.targets.push(obs),
            1 => query.evidence.push(obs),
            _ => {}
        }
    }
    if query.targets.is_empty() {
        query.evidence.retain(|obs| obs.var.index() != 0);
        query.targets.push(Observation::new(VarId::from_index(0), values[0]));
    }
    query
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn elimination_matches_enumeration(
        seed in any::<u64>(),
        n in 1usize..8,
        roles in prop::collection::vec(0u8..3, 8),
        values in prop::collection::vec(any::<bool>(), 8),
    ) {
        let mut rng = RngHandle::from_seed(seed);
        let network = gen_random_network(n, 3, &mut rng).unwrap();
        let query = split_query(n, &roles, &values);
        let exact = exact_inference(&network, &query).unwrap();
        let expected = brute_force(&network, &query);
        prop_assert!((exact - expected).abs() < 1e-9, "exact {} vs enumeration {}", exact, expected);
    }

    #[test]
    fn single_target_posteriors_sum_to_one(
        seed in any::<u64>(),
        n in 2usize..9,
        target in 0usize..8,
        evidence_values in prop::collection::vec(any::<bool>(), 8),
    ) {
        let mut rng = RngHandle::from_seed(seed);
        let network = gen_random_network(n, 3, &mut rng).unwrap();
        let target = VarId::from_index(target % n);
        let evidence: Vec<Observation> = network
            .ids()
            .filter(|id| *id != target && id.index() % 2 == 1)
            .map(|id| Observation::new(id, evidence_values[id.index()]))
            .collect();
        let mut total = 0.0;
        for value in [true, false] {
            let query = Query { targets: vec![Observation::new(target, value)], evidence: evidence.clone() };
            total += exact_inference(&network, &query).unwrap();
        }
        prop_assert!((total - 1.0).abs() < 1e-9);
    }
}

fn deterministic_pair(p_child_if_true: f64, p_child_if_false: f64) -> Network {
    let mut builder = NetworkBuilder::new();
    let cause = builder.add_root("cause", 0.3).unwrap();
    let effect = builder.add_variable("effect", &[cause]).unwrap();
    builder.set_probability(effect, &[true], p_child_if_true).unwrap();
    builder.set_probability(effect, &[false], p_child_if_false).unwrap();
    builder.build()
}

#[test]
fn fully_determined_query_collapses_to_certainty() {
    let network = deterministic_pair(1.0, 0.0);
    let cause = network.var("cause").unwrap();
    let effect = network.var("effect").unwrap();
    let yes = Query::new().target(cause, true).given(effect, true);
    let no = Query::new().target(cause, false).given(effect, true);
    assert_eq!(exact_inference(&network, &yes).unwrap(), 1.0);
    assert_eq!(exact_inference(&network, &no).unwrap(), 0.0);
}

#[test]
fn impossible_evidence_is_reported() {
    let network = deterministic_pair(0.0, 0.0);
    let cause = network.var("cause").unwrap();
    let effect = network.var("effect").unwrap();
    let query = Query::new().target(cause, true).given(effect, true);
    let err = exact_inference(&network, &query).unwrap_err();
    assert!(matches!(err, BnError::Evidence(info) if info.code == "zero-evidence-probability"));
}

#[test]
fn incomplete_tables_are_reported() {
    let mut builder = NetworkBuilder::new();
    let cause = builder.add_root("cause", 0.3).unwrap();
    let effect = builder.add_variable("effect", &[cause]).unwrap();
    builder.set_probability(effect, &[true], 0.5).unwrap();
    let network = builder.build();
    let query = Query::new().target(cause, true);
    let err = exact_inference(&network, &query).unwrap_err();
    assert!(matches!(err, BnError::Model(info) if info.code == "missing-cpt-entry"));
}

#[test]
fn overlapping_observations_are_rejected() {
    let network = deterministic_pair(0.9, 0.1);
    let cause = network.var("cause").unwrap();
    let query = Query::new().target(cause, true).given(cause, true);
    let err = exact_inference(&network, &query).unwrap_err();
    assert!(matches!(err, BnError::Query(info) if info.code == "overlapping-observation"));
}
