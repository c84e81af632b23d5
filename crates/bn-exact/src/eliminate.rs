use bn_core::VarId;
use tracing::trace;

use crate::factor::Factor;

/// Sums `var` out of the factor set.
///
/// Factors mentioning `var` are multiplied into one product which is then
/// marginalized; the others pass through untouched. Without any factor
/// mentioning `var` the set is returned as is.
pub fn eliminate_var(var: VarId, factors: Vec<Factor>) -> Vec<Factor> {
    let (mentioning, mut remaining): (Vec<Factor>, Vec<Factor>) =
        factors.into_iter().partition(|factor| factor.contains(var));
    let Some(product) = mentioning.into_iter().reduce(|acc, factor| acc.multiply(&factor)) else {
        return remaining;
    };
    trace!(
        var = var.as_raw(),
        width = product.scope().len(),
        "summing out variable"
    );
    remaining.push(product.sum_out(var));
    remaining
}

/// Multiplies every factor together, yielding the unit factor for an empty set.
pub fn multiply_all(factors: Vec<Factor>) -> Factor {
    factors
        .into_iter()
        .reduce(|acc, factor| acc.multiply(&factor))
        .unwrap_or_else(Factor::unit)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(raw: u32) -> VarId {
        VarId::from_raw(raw)
    }

    #[test]
    fn untouched_factors_pass_through() {
        let a = Factor::new(vec![v(0)], vec![0.3, 0.7]);
        let b = Factor::new(vec![v(1), v(0)], vec![0.9, 0.1, 0.2, 0.8]);
        let c = Factor::new(vec![v(2)], vec![0.5, 0.5]);
        let result = eliminate_var(v(1), vec![a.clone(), b, c.clone()]);
        assert_eq!(result.len(), 3);
        assert_eq!(result[0], a);
        assert_eq!(result[1], c);
        assert_eq!(result[2].scope(), &[v(0)]);
        assert!((result[2].value(&[false]) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn eliminating_an_absent_variable_is_a_no_op() {
        let a = Factor::new(vec![v(0)], vec![0.3, 0.7]);
        assert_eq!(eliminate_var(v(4), vec![a.clone()]), vec![a]);
    }

    #[test]
    fn empty_product_is_unit() {
        assert_eq!(multiply_all(Vec::new()), Factor::unit());
    }
}
