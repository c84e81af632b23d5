use bn_core::{Assignment, BnError, Query, RngHandle, VarId};
use bn_graph::Network;
use serde::{Deserialize, Serialize};
use tracing::{debug, info_span, trace};

use crate::config::{GibbsEstimator, SamplerConfig};
use crate::forward::clamped_sample_into;

/// Clamped draws attempted before the evidence is declared unreachable.
pub const MAX_START_ATTEMPTS: usize = 1_000;

/// Summary returned after a Gibbs sampling run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GibbsSummary {
    /// Estimated `P(targets | evidence)`.
    pub probability: f64,
    /// Sweeps executed, burn-in included.
    pub sweeps: usize,
    /// Leading sweeps that were not tallied.
    pub burn_in: usize,
    /// Sweeps that were tallied.
    pub tallied: usize,
    /// Tally accumulated under the chosen estimator.
    pub matches: usize,
    /// Tallying scheme.
    pub estimator: GibbsEstimator,
    /// Seed the run was started from.
    pub seed: u64,
}

/// Unnormalized weight of `var = value` given the rest of `state`.
fn blanket_weight(
    network: &Network,
    var: VarId,
    value: bool,
    state: &mut Assignment,
) -> Result<f64, BnError> {
    state.set(var, value);
    let mut weight = network.conditional(var, value, state)?;
    for child in network.children(var) {
        weight *= network.conditional(*child, state.get(*child), state)?;
    }
    Ok(weight)
}

/// `P(var = true | Markov blanket of var)` under the values in `state`.
///
/// `state[var]` is left unchanged.
pub fn blanket_probability(
    network: &Network,
    var: VarId,
    state: &mut Assignment,
) -> Result<f64, BnError> {
    let current = state.get(var);
    let weights = blanket_weight(network, var, true, state)
        .and_then(|w_true| Ok((w_true, blanket_weight(network, var, false, state)?)));
    state.set(var, current);
    let (w_true, w_false) = weights?;

    let normalizer = w_true + w_false;
    if normalizer <= 0.0 || !normalizer.is_finite() {
        return Err(BnError::evidence(
            "zero-blanket-weight",
            "both values of the variable are impossible given its Markov blanket",
        )
        .with_context("name", network.name(var)));
    }
    Ok(w_true / normalizer)
}

/// Draws a starting state with the evidence clamped and nonzero probability.
///
/// Normalized blanket resampling never leaves the nonzero-probability set,
/// so every later sweep stays well defined.
fn starting_state(
    network: &Network,
    query: &Query,
    rng: &mut RngHandle,
) -> Result<Assignment, BnError> {
    let mut state = Assignment::new(network.len());
    for attempt in 1..=MAX_START_ATTEMPTS {
        if clamped_sample_into(network, &mut state, &query.evidence, rng)? {
            trace!(attempt, "starting state drawn");
            return Ok(state);
        }
    }
    Err(BnError::estimation(
        "no-compatible-samples",
        "no starting state was consistent with the evidence",
    )
    .with_context("attempts", MAX_START_ATTEMPTS)
    .with_hint("check the evidence with exact inference"))
}

struct Tally {
    tallied: usize,
    matches: usize,
}

fn run_chain(
    network: &Network,
    query: &Query,
    sweeps: usize,
    burn_in: usize,
    estimator: GibbsEstimator,
    rng: &mut RngHandle,
) -> Result<Tally, BnError> {
    let mut state = starting_state(network, query, rng)?;

    let free: Vec<VarId> = network.ids().filter(|id| !query.is_evidence(*id)).collect();
    let mut tally = Tally {
        tallied: 0,
        matches: 0,
    };
    for sweep in 0..sweeps {
        for var in &free {
            let p_true = blanket_probability(network, *var, &mut state)?;
            state.set(*var, rng.coin(p_true));
        }
        if sweep < burn_in {
            continue;
        }
        tally.tallied += 1;
        tally.matches += match estimator {
            GibbsEstimator::Joint => usize::from(state.satisfies(&query.targets)),
            GibbsEstimator::PerVariable => query
                .targets
                .iter()
                .filter(|obs| state.get(obs.var) == obs.value)
                .count(),
        };
        trace!(sweep, matches = tally.matches, "sweep finished");
    }
    Ok(tally)
}

fn check_inputs(
    network: &Network,
    query: &Query,
    sweeps: usize,
    burn_in: usize,
) -> Result<(), BnError> {
    if sweeps <= burn_in {
        return Err(BnError::query(
            "zero-iterations",
            "sampling needs at least one tallied sweep",
        )
        .with_context("sweeps", sweeps)
        .with_context("burn_in", burn_in));
    }
    query.validate(network.len())?;
    network.validate_complete()
}

/// Estimates `P(targets | evidence)` with `iterations` Gibbs sweeps, no
/// burn-in and the joint estimator.
pub fn gibbs_inference(
    network: &Network,
    query: &Query,
    iterations: usize,
    rng: &mut RngHandle,
) -> Result<f64, BnError> {
    check_inputs(network, query, iterations, 0)?;
    let tally = run_chain(network, query, iterations, 0, GibbsEstimator::Joint, rng)?;
    Ok(tally.matches as f64 / tally.tallied as f64)
}

/// Runs `config.burn_in + config.iterations` sweeps from `seed`, tallying
/// the last `config.iterations` with the configured estimator.
pub fn run_gibbs(
    network: &Network,
    query: &Query,
    config: &SamplerConfig,
    seed: u64,
) -> Result<GibbsSummary, BnError> {
    let sweeps = config.burn_in + config.iterations;
    check_inputs(network, query, sweeps, config.burn_in)?;
    let estimator = config.gibbs.estimator;
    let span = info_span!("gibbs", sweeps, burn_in = config.burn_in, seed);
    let _guard = span.enter();

    let mut rng = RngHandle::from_seed(seed);
    let tally = run_chain(network, query, sweeps, config.burn_in, estimator, &mut rng)?;
    let summary = GibbsSummary {
        probability: tally.matches as f64 / tally.tallied as f64,
        sweeps,
        burn_in: config.burn_in,
        tallied: tally.tallied,
        matches: tally.matches,
        estimator,
        seed,
    };
    debug!(
        probability = summary.probability,
        tallied = summary.tallied,
        "gibbs run finished"
    );
    Ok(summary)
}
