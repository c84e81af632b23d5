use bn_core::VarId;
use bn_graph::Network;

/// Number of fill edges removing `var` would add between its parents.
///
/// Ordered pairs `(p1, p2)` of distinct parents where `p2` is not a parent
/// of `p1` are counted, then halved.
pub fn fill_in(network: &Network, var: VarId) -> usize {
    let parents = network.parents(var);
    let mut pairs = 0;
    for p1 in parents {
        for p2 in parents {
            if p1 != p2 && !network.parents(*p1).contains(p2) {
                pairs += 1;
            }
        }
    }
    pairs / 2
}

/// Min-fill elimination order over every variable of the network.
///
/// Variables are picked by smallest fill; ties go to the earliest declared.
/// Fill depends only on the static parent structure, so repeated minimum
/// selection reduces to a stable sort.
pub fn min_fill_order(network: &Network) -> Vec<VarId> {
    let mut order: Vec<(usize, VarId)> = network
        .ids()
        .map(|id| (fill_in(network, id), id))
        .collect();
    order.sort_by_key(|(fill, _)| *fill);
    order.into_iter().map(|(_, id)| id).collect()
}
