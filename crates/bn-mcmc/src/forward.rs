use bn_core::{Assignment, BnError, Observation, RngHandle};
use bn_graph::Network;

/// Draws every variable in declaration order from its CPT given the values
/// already drawn for its parents.
pub fn forward_sample_into(
    network: &Network,
    state: &mut Assignment,
    rng: &mut RngHandle,
) -> Result<(), BnError> {
    for id in network.ids() {
        let p_true = network.probability_true(id, state)?;
        state.set(id, rng.coin(p_true));
    }
    Ok(())
}

/// Draws a fresh ancestral sample.
pub fn forward_sample(network: &Network, rng: &mut RngHandle) -> Result<Assignment, BnError> {
    let mut state = Assignment::new(network.len());
    forward_sample_into(network, &mut state, rng)?;
    Ok(state)
}

/// Draws every non-evidence variable in declaration order with the evidence
/// held at its observed values.
///
/// Returns whether the sample has nonzero probability, that is whether every
/// evidence value is possible given the parents drawn for it.
pub fn clamped_sample_into(
    network: &Network,
    state: &mut Assignment,
    evidence: &[Observation],
    rng: &mut RngHandle,
) -> Result<bool, BnError> {
    state.clamp(evidence);
    let mut possible = true;
    for id in network.ids() {
        match evidence.iter().find(|obs| obs.var == id) {
            Some(obs) => possible &= network.conditional(id, obs.value, state)? > 0.0,
            None => {
                let p_true = network.probability_true(id, state)?;
                state.set(id, rng.coin(p_true));
            }
        }
    }
    Ok(possible)
}
