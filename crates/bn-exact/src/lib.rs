#![deny(missing_docs)]
#![doc = "Exact posterior inference over boolean Bayesian networks by variable elimination."]

mod builder;
mod eliminate;
mod factor;
mod normalize;
mod ordering;

use bn_core::{BnError, Query};
use bn_graph::Network;
use tracing::{debug, info_span};

pub use builder::create_factor;
pub use eliminate::{eliminate_var, multiply_all};
pub use factor::Factor;
pub use normalize::normalize;
pub use ordering::{fill_in, min_fill_order};

/// Computes `P(targets | evidence)` exactly.
///
/// One factor is built per variable with evidence folded in, hidden
/// variables are summed out walking the min-fill order from its end, and the
/// surviving product is normalized by the evidence mass.
pub fn exact_inference(network: &Network, query: &Query) -> Result<f64, BnError> {
    query.validate(network.len())?;
    let span = info_span!(
        "exact_inference",
        variables = network.len(),
        targets = query.targets.len(),
        evidence = query.evidence.len()
    );
    let _guard = span.enter();

    let mut factors = network
        .ids()
        .map(|id| create_factor(network, id, &query.evidence))
        .collect::<Result<Vec<_>, _>>()?;

    let order = min_fill_order(network);
    for var in order.iter().rev().copied() {
        if query.is_hidden(var) {
            factors = eliminate_var(var, factors);
            debug!(var = network.name(var), factors = factors.len(), "eliminated");
        }
    }

    let product = multiply_all(factors);
    debug!(width = product.scope().len(), "final product");
    let probability = normalize(&product, query)?;
    debug!(probability, "exact posterior");
    Ok(probability)
}
