use std::fs;
use std::path::Path;

use bn_core::BnError;
use serde::{Deserialize, Serialize};

/// YAML-configurable parameters governing sampling runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamplerConfig {
    /// Samples drawn by rejection sampling, sweeps performed by Gibbs sampling.
    #[serde(default = "default_iterations")]
    pub iterations: usize,
    /// Initial Gibbs sweeps executed but not tallied.
    #[serde(default)]
    pub burn_in: usize,
    /// Number of independent runs averaged by the driver.
    #[serde(default = "default_runs")]
    pub runs: usize,
    /// Master seed and substream policy.
    #[serde(default)]
    pub seed_policy: SeedPolicy,
    /// Gibbs-specific settings.
    #[serde(default)]
    pub gibbs: GibbsConfig,
}

fn default_iterations() -> usize {
    10_000
}

fn default_runs() -> usize {
    1
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            iterations: default_iterations(),
            burn_in: 0,
            runs: default_runs(),
            seed_policy: SeedPolicy::default(),
            gibbs: GibbsConfig::default(),
        }
    }
}

impl SamplerConfig {
    /// Parses a configuration from YAML.
    pub fn from_yaml(yaml: &str) -> Result<Self, BnError> {
        serde_yaml::from_str(yaml)
            .map_err(|err| BnError::serde("deserialize-yaml", err.to_string()))
    }

    /// Serializes the configuration to YAML.
    pub fn to_yaml(&self) -> Result<String, BnError> {
        serde_yaml::to_string(self).map_err(|err| BnError::serde("serialize-yaml", err.to_string()))
    }

    /// Reads a YAML configuration file.
    pub fn load(path: &Path) -> Result<Self, BnError> {
        let contents = fs::read_to_string(path).map_err(|err| {
            BnError::serde("read-config", err.to_string()).with_context("path", path.display())
        })?;
        Self::from_yaml(&contents).map_err(|err| err.with_context("path", path.display()))
    }
}

/// Deterministic seeding configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedPolicy {
    /// Master seed from which every run seed is derived.
    #[serde(default = "default_master_seed")]
    pub master_seed: u64,
    /// Optional label echoed in reports.
    #[serde(default)]
    pub label: Option<String>,
}

fn default_master_seed() -> u64 {
    2024
}

impl Default for SeedPolicy {
    fn default() -> Self {
        Self {
            master_seed: default_master_seed(),
            label: None,
        }
    }
}

/// Gibbs sampler settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GibbsConfig {
    /// How sweeps are tallied against the targets.
    #[serde(default)]
    pub estimator: GibbsEstimator,
}

/// Tallying scheme used by the Gibbs sampler.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GibbsEstimator {
    /// A sweep counts when every target matches.
    #[default]
    Joint,
    /// Each matching target counts separately; the sum is divided by the
    /// number of tallied sweeps.
    PerVariable,
}
