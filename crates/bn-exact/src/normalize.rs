use bn_core::{BnError, Query};

use crate::factor::Factor;

/// Turns the final product into `P(targets | evidence)`.
///
/// The joint is the first row consistent with both targets and evidence;
/// the denominator sums every evidence-consistent row.
pub fn normalize(product: &Factor, query: &Query) -> Result<f64, BnError> {
    let rows = 0..product.table().len();
    let joint = rows
        .clone()
        .find(|index| {
            product.matches(*index, &query.evidence) && product.matches(*index, &query.targets)
        })
        .map(|index| product.value_at(index))
        .unwrap_or(0.0);
    let evidence_probability: f64 = rows
        .filter(|index| product.matches(*index, &query.evidence))
        .map(|index| product.value_at(index))
        .sum();

    if evidence_probability <= 0.0 || !evidence_probability.is_finite() {
        return Err(BnError::evidence(
            "zero-evidence-probability",
            "evidence has zero probability under the model",
        )
        .with_context("evidence", query.evidence.len())
        .with_hint("check the evidence against deterministic CPT entries"));
    }
    let ratio = joint / evidence_probability;
    if !ratio.is_finite() {
        return Err(BnError::evidence(
            "zero-evidence-probability",
            "posterior ratio is not finite",
        )
        .with_context("joint", joint)
        .with_context("evidence_probability", evidence_probability));
    }
    Ok(ratio)
}
