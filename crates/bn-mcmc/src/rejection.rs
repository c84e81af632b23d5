use bn_core::{Assignment, BnError, Query, RngHandle};
use bn_graph::Network;
use serde::{Deserialize, Serialize};
use tracing::{debug, info_span};

use crate::config::SamplerConfig;
use crate::forward::forward_sample_into;

/// Summary returned after a rejection sampling run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RejectionSummary {
    /// Estimated `P(targets | evidence)`.
    pub probability: f64,
    /// Samples drawn.
    pub iterations: usize,
    /// Samples consistent with the evidence.
    pub compatible: usize,
    /// Compatible samples also consistent with the targets.
    pub compatible_query: usize,
    /// Fraction of samples kept.
    pub acceptance_rate: f64,
    /// Seed the run was started from.
    pub seed: u64,
}

struct Counts {
    compatible: usize,
    compatible_query: usize,
}

fn check_inputs(network: &Network, query: &Query, iterations: usize) -> Result<(), BnError> {
    if iterations == 0 {
        return Err(BnError::query(
            "zero-iterations",
            "sampling needs at least one iteration",
        ));
    }
    query.validate(network.len())?;
    network.validate_complete()
}

fn count_samples(
    network: &Network,
    query: &Query,
    iterations: usize,
    rng: &mut RngHandle,
) -> Result<Counts, BnError> {
    let mut state = Assignment::new(network.len());
    let mut counts = Counts {
        compatible: 0,
        compatible_query: 0,
    };
    for _ in 0..iterations {
        forward_sample_into(network, &mut state, rng)?;
        if state.satisfies(&query.evidence) {
            counts.compatible += 1;
            if state.satisfies(&query.targets) {
                counts.compatible_query += 1;
            }
        }
    }
    if counts.compatible == 0 {
        return Err(BnError::estimation(
            "no-compatible-samples",
            "no sample was consistent with the evidence",
        )
        .with_context("iterations", iterations)
        .with_hint("increase the iteration count or use exact inference"));
    }
    Ok(counts)
}

/// Estimates `P(targets | evidence)` as the fraction of evidence-consistent
/// ancestral samples that also match the targets.
pub fn approximate_inference(
    network: &Network,
    query: &Query,
    iterations: usize,
    rng: &mut RngHandle,
) -> Result<f64, BnError> {
    check_inputs(network, query, iterations)?;
    let counts = count_samples(network, query, iterations, rng)?;
    Ok(counts.compatible_query as f64 / counts.compatible as f64)
}

/// Runs rejection sampling with `config.iterations` samples from `seed`.
pub fn run_rejection(
    network: &Network,
    query: &Query,
    config: &SamplerConfig,
    seed: u64,
) -> Result<RejectionSummary, BnError> {
    check_inputs(network, query, config.iterations)?;
    let span = info_span!("rejection", iterations = config.iterations, seed);
    let _guard = span.enter();

    let mut rng = RngHandle::from_seed(seed);
    let counts = count_samples(network, query, config.iterations, &mut rng)?;
    let summary = RejectionSummary {
        probability: counts.compatible_query as f64 / counts.compatible as f64,
        iterations: config.iterations,
        compatible: counts.compatible,
        compatible_query: counts.compatible_query,
        acceptance_rate: counts.compatible as f64 / config.iterations as f64,
        seed,
    };
    debug!(
        probability = summary.probability,
        compatible = summary.compatible,
        "rejection run finished"
    );
    Ok(summary)
}
