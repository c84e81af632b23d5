#![deny(missing_docs)]
#![doc = "Seeded forward, rejection and Gibbs sampling over boolean Bayesian networks."]

/// YAML configuration schema and defaults.
pub mod config;
/// Deterministic seed derivation helpers.
pub mod determinism;
/// Ancestral sampling.
pub mod forward;
/// Single-site Gibbs sampling over Markov blankets.
pub mod gibbs;
/// Rejection sampling against the evidence.
pub mod rejection;

pub use config::{GibbsConfig, GibbsEstimator, SamplerConfig, SeedPolicy};
pub use forward::{clamped_sample_into, forward_sample, forward_sample_into};
pub use gibbs::{blanket_probability, gibbs_inference, run_gibbs, GibbsSummary};
pub use rejection::{approximate_inference, run_rejection, RejectionSummary};
