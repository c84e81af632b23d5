use bn_core::{bit, BnError, Observation, VarId};
use bn_graph::Network;

use crate::factor::Factor;

/// Builds the initial factor of `var` over `[var] ++ parents(var)`.
///
/// Rows contradicting an in-scope evidence entry are zeroed; evidence
/// variables stay in the scope. Every CPT entry is read, so an incomplete
/// table fails even when its rows would be zeroed.
pub fn create_factor(
    network: &Network,
    var: VarId,
    evidence: &[Observation],
) -> Result<Factor, BnError> {
    let parents = network.parents(var);
    let mut scope = Vec::with_capacity(parents.len() + 1);
    scope.push(var);
    scope.extend_from_slice(parents);

    let cpt = network.variable(var).cpt();
    let mut table = Vec::with_capacity(1usize << scope.len());
    for index in 0..1usize << scope.len() {
        let p_true = cpt
            .get(index >> 1)
            .map_err(|err| err.with_context("name", network.name(var)))?;
        let consistent = evidence.iter().all(|obs| {
            match scope.iter().position(|member| *member == obs.var) {
                Some(pos) => bit(index, pos) == obs.value,
                None => true,
            }
        });
        let value = match (consistent, bit(index, 0)) {
            (false, _) => 0.0,
            (true, true) => p_true,
            (true, false) => 1.0 - p_true,
        };
        table.push(value);
    }
    Ok(Factor::new(scope, table))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bn_graph::NetworkBuilder;

    fn rain_umbrella() -> Network {
        let mut builder = NetworkBuilder::new();
        let rain = builder.add_root("rain", 0.1).unwrap();
        let umbrella = builder.add_variable("umbrella", &[rain]).unwrap();
        builder.set_probability(umbrella, &[true], 0.9).unwrap();
        builder.set_probability(umbrella, &[false], 0.01).unwrap();
        builder.build()
    }

    #[test]
    fn factor_scope_starts_with_the_variable() {
        let network = rain_umbrella();
        let umbrella = network.var("umbrella").unwrap();
        let factor = create_factor(&network, umbrella, &[]).unwrap();
        assert_eq!(factor.scope(), &[umbrella, network.var("rain").unwrap()]);
        assert!((factor.value(&[true, true]) - 0.9).abs() < 1e-12);
        assert!((factor.value(&[false, false]) - 0.99).abs() < 1e-12);
    }

    #[test]
    fn evidence_zeroes_contradicting_rows() {
        let network = rain_umbrella();
        let rain = network.var("rain").unwrap();
        let umbrella = network.var("umbrella").unwrap();
        let factor = create_factor(&network, umbrella, &[Observation::new(rain, true)]).unwrap();
        assert_eq!(factor.value(&[true, false]), 0.0);
        assert_eq!(factor.value(&[false, false]), 0.0);
        assert!((factor.value(&[true, true]) - 0.9).abs() < 1e-12);
    }

    #[test]
    fn missing_entry_fails_fast() {
        let mut builder = NetworkBuilder::new();
        let rain = builder.add_root("rain", 0.1).unwrap();
        let umbrella = builder.add_variable("umbrella", &[rain]).unwrap();
        builder.set_probability(umbrella, &[true], 0.9).unwrap();
        let network = builder.build();
        let err = create_factor(&network, umbrella, &[]).unwrap_err();
        assert!(matches!(err, BnError::Model(info) if info.code == "missing-cpt-entry"));
    }
}
