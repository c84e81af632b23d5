use bn_core::{BnError, RngHandle, VarId};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::network::{Network, NetworkBuilder};

/// Generates a random network with fully populated CPTs.
///
/// Variable `i` draws up to `max_parents` distinct parents among variables
/// `0..i`, so the result is acyclic. CPT entries are drawn uniformly from
/// `[0.05, 0.95]` to keep every evidence event possible.
pub fn gen_random_network(
    n_variables: usize,
    max_parents: usize,
    rng: &mut RngHandle,
) -> Result<Network, BnError> {
    let mut builder = NetworkBuilder::new();
    let mut declared: Vec<VarId> = Vec::with_capacity(n_variables);
    for index in 0..n_variables {
        let limit = max_parents.min(declared.len());
        let count = if limit == 0 {
            0
        } else {
            rng.inner_mut().gen_range(0..=limit)
        };
        let mut parents: Vec<VarId> = declared
            .choose_multiple(rng.inner_mut(), count)
            .copied()
            .collect();
        parents.sort();
        let id = builder.add_variable(format!("x{index}"), &parents)?;
        for row in 0..(1usize << parents.len()) {
            let given: Vec<bool> = (0..parents.len()).map(|pos| bn_core::bit(row, pos)).collect();
            let p = rng.inner_mut().gen_range(0.05..=0.95);
            builder.set_probability(id, &given, p)?;
        }
        declared.push(id);
    }
    Ok(builder.build())
}
