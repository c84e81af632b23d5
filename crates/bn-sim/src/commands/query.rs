use std::error::Error;
use std::path::PathBuf;

use bn_core::{BnError, Observation, Query};
use bn_exact::exact_inference;
use bn_graph::{canonical_hash, load_network, Network};
use bn_mcmc::determinism::{stream_seed, GIBBS_STREAM, REJECTION_STREAM};
use bn_mcmc::{
    run_gibbs, run_rejection, GibbsEstimator, GibbsSummary, RejectionSummary, SamplerConfig,
};
use clap::{Args, ValueEnum};
use serde::Serialize;
use tracing::info;

#[derive(Args, Debug)]
pub struct QueryArgs {
    /// Network description (`.yaml`/`.yml` or JSON).
    #[arg(long)]
    pub network: PathBuf,
    /// Target values as `NAME=BOOL`.
    #[arg(long = "target", value_name = "NAME=BOOL", required = true)]
    pub targets: Vec<String>,
    /// Evidence values as `NAME=BOOL`.
    #[arg(long = "evidence", value_name = "NAME=BOOL")]
    pub evidence: Vec<String>,
    #[arg(long, value_enum, default_value_t = Method::All)]
    pub method: Method,
    /// Sampler configuration (YAML); flags below override its fields.
    #[arg(long)]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub iterations: Option<usize>,
    #[arg(long)]
    pub burn_in: Option<usize>,
    #[arg(long)]
    pub seed: Option<u64>,
    #[arg(long)]
    pub runs: Option<usize>,
    #[arg(long, value_enum)]
    pub estimator: Option<EstimatorArg>,
    /// Writes the report to a file instead of stdout.
    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Exact,
    Rejection,
    Gibbs,
    All,
}

impl Method {
    fn exact(self) -> bool {
        matches!(self, Method::Exact | Method::All)
    }

    fn rejection(self) -> bool {
        matches!(self, Method::Rejection | Method::All)
    }

    fn gibbs(self) -> bool {
        matches!(self, Method::Gibbs | Method::All)
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum EstimatorArg {
    Joint,
    PerVariable,
}

impl From<EstimatorArg> for GibbsEstimator {
    fn from(arg: EstimatorArg) -> Self {
        match arg {
            EstimatorArg::Joint => GibbsEstimator::Joint,
            EstimatorArg::PerVariable => GibbsEstimator::PerVariable,
        }
    }
}

#[derive(Serialize, Debug)]
struct NamedObservation {
    name: String,
    value: bool,
}

#[derive(Serialize, Debug)]
struct MethodReport<T> {
    mean: f64,
    runs: Vec<T>,
}

#[derive(Serialize, Debug)]
struct QueryReport {
    network_hash: String,
    targets: Vec<NamedObservation>,
    evidence: Vec<NamedObservation>,
    master_seed: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    seed_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    exact: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    rejection: Option<MethodReport<RejectionSummary>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    gibbs: Option<MethodReport<GibbsSummary>>,
}

pub fn run(args: &QueryArgs) -> Result<(), Box<dyn Error>> {
    let network = load_network(&args.network)?;
    let config = resolve_config(args)?;
    let query = Query {
        targets: parse_observations(&network, &args.targets)?,
        evidence: parse_observations(&network, &args.evidence)?,
    };
    info!(
        variables = network.len(),
        runs = config.runs,
        method = ?args.method,
        "answering query"
    );

    let exact = if args.method.exact() {
        Some(exact_inference(&network, &query)?)
    } else {
        None
    };
    let master_seed = config.seed_policy.master_seed;
    let rejection = if args.method.rejection() {
        let runs = (0..config.runs)
            .map(|run| {
                let seed = stream_seed(master_seed, run, REJECTION_STREAM);
                run_rejection(&network, &query, &config, seed)
            })
            .collect::<Result<Vec<_>, _>>()?;
        let mean = mean(runs.iter().map(|summary| summary.probability));
        Some(MethodReport { mean, runs })
    } else {
        None
    };
    let gibbs = if args.method.gibbs() {
        let runs = (0..config.runs)
            .map(|run| {
                let seed = stream_seed(master_seed, run, GIBBS_STREAM);
                run_gibbs(&network, &query, &config, seed)
            })
            .collect::<Result<Vec<_>, _>>()?;
        let mean = mean(runs.iter().map(|summary| summary.probability));
        Some(MethodReport { mean, runs })
    } else {
        None
    };

    let report = QueryReport {
        network_hash: canonical_hash(&network),
        targets: named(&network, &query.targets),
        evidence: named(&network, &query.evidence),
        master_seed,
        seed_label: config.seed_policy.label.clone(),
        exact,
        rejection,
        gibbs,
    };
    match &args.out {
        Some(path) => crate::write_json(path, &report)?,
        None => println!("{}", serde_json::to_string_pretty(&report)?),
    }
    Ok(())
}

fn resolve_config(args: &QueryArgs) -> Result<SamplerConfig, BnError> {
    let mut config = match &args.config {
        Some(path) => SamplerConfig::load(path)?,
        None => SamplerConfig::default(),
    };
    if let Some(iterations) = args.iterations {
        config.iterations = iterations;
    }
    if let Some(burn_in) = args.burn_in {
        config.burn_in = burn_in;
    }
    if let Some(seed) = args.seed {
        config.seed_policy.master_seed = seed;
    }
    if let Some(runs) = args.runs {
        config.runs = runs;
    }
    if let Some(estimator) = args.estimator {
        config.gibbs.estimator = estimator.into();
    }
    if config.runs == 0 {
        return Err(BnError::query("zero-runs", "at least one run is required"));
    }
    Ok(config)
}

/// Parses `NAME=BOOL` pairs against the network's variable names.
fn parse_observations(network: &Network, raw: &[String]) -> Result<Vec<Observation>, BnError> {
    raw.iter()
        .map(|pair| {
            let malformed = || {
                BnError::query("malformed-observation", "expected NAME=BOOL")
                    .with_context("input", pair)
            };
            let (name, value) = pair.split_once('=').ok_or_else(malformed)?;
            let value = match value.trim().to_ascii_lowercase().as_str() {
                "true" | "t" | "1" => true,
                "false" | "f" | "0" => false,
                _ => return Err(malformed()),
            };
            Ok(Observation::new(network.require(name.trim())?, value))
        })
        .collect()
}

fn named(network: &Network, observations: &[Observation]) -> Vec<NamedObservation> {
    observations
        .iter()
        .map(|obs| NamedObservation {
            name: network.name(obs.var).to_string(),
            value: obs.value,
        })
        .collect()
}

fn mean(values: impl ExactSizeIterator<Item = f64>) -> f64 {
    let count = values.len();
    values.sum::<f64>() / count as f64
}
