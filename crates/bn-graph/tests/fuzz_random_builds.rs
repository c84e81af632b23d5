use bn_core::RngHandle;
use bn_graph::{canonical_hash, gen_random_network, network_from_json, network_to_json, Network};
use proptest::prelude::*;

fn check_invariants(network: &Network, max_parents: usize) {
    for id in network.ids() {
        let parents = network.parents(id);
        assert!(parents.len() <= max_parents);
        assert!(parents.iter().all(|parent| *parent < id));
        assert!(network.variable(id).cpt().is_complete());
        for parent in parents {
            assert!(network.children(*parent).contains(&id));
        }
        for child in network.children(id) {
            assert!(network.parents(*child).contains(&id));
        }
    }
}

proptest! {
    #[test]
    fn random_generators_respect_invariants(seed in any::<u64>(), n in 1usize..12, max_parents in 0usize..4) {
        let mut rng = RngHandle::from_seed(seed);
        let network = gen_random_network(n, max_parents, &mut rng).unwrap();
        prop_assert_eq!(network.len(), n);
        check_invariants(&network, max_parents);

        let json = network_to_json(&network).unwrap();
        let restored = network_from_json(&json).unwrap();
        prop_assert_eq!(canonical_hash(&network), canonical_hash(&restored));
    }
}
