use std::fs;
use std::path::Path;

use bn_core::{bit, BnError, VarId};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::acyclic::ancestral_order;
use crate::network::{Network, NetworkBuilder};

/// Serializable description of a whole network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkSpec {
    /// Variable declarations; parents may be listed after their children.
    pub variables: Vec<VariableSpec>,
}

/// Serializable description of one variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableSpec {
    /// Unique variable name.
    pub name: String,
    /// Parent names; their order fixes the CPT bit packing.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parents: Vec<String>,
    /// Shorthand for the single entry of a parentless variable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub probability: Option<f64>,
    /// Explicit CPT rows.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cpt: Vec<CptRow>,
}

/// One CPT row: `P(var = true | parents = given) = p`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CptRow {
    /// Parent values in parent order.
    pub given: Vec<bool>,
    /// Probability that the variable is true.
    pub p: f64,
}

impl NetworkSpec {
    /// Describes a frozen network. Unset CPT entries are omitted.
    pub fn from_network(network: &Network) -> Self {
        let variables = network
            .ids()
            .map(|id| {
                let variable = network.variable(id);
                let parents: Vec<String> = variable
                    .parents()
                    .iter()
                    .map(|parent| network.name(*parent).to_string())
                    .collect();
                let entries = variable.cpt().entries();
                let (probability, cpt) = if parents.is_empty() {
                    (entries.first().copied().flatten(), Vec::new())
                } else {
                    let rows = entries
                        .iter()
                        .enumerate()
                        .filter_map(|(index, entry)| {
                            entry.map(|p| CptRow {
                                given: (0..parents.len()).map(|pos| bit(index, pos)).collect(),
                                p,
                            })
                        })
                        .collect();
                    (None, rows)
                };
                VariableSpec {
                    name: variable.name().to_string(),
                    parents,
                    probability,
                    cpt,
                }
            })
            .collect();
        Self { variables }
    }

    /// Builds a frozen network, ordering declarations parents-first.
    pub fn into_network(self) -> Result<Network, BnError> {
        let mut positions: IndexMap<String, usize> = IndexMap::new();
        for (index, spec) in self.variables.iter().enumerate() {
            if positions.insert(spec.name.clone(), index).is_some() {
                return Err(
                    BnError::graph("duplicate-variable", "variable name already declared")
                        .with_context("name", &spec.name),
                );
            }
        }
        let mut parent_indices = Vec::with_capacity(self.variables.len());
        for spec in &self.variables {
            let mut indices = Vec::with_capacity(spec.parents.len());
            for parent in &spec.parents {
                let index = positions.get(parent).copied().ok_or_else(|| {
                    BnError::graph("unknown-parent", "parent is not declared")
                        .with_context("name", &spec.name)
                        .with_context("parent", parent)
                })?;
                indices.push(index);
            }
            parent_indices.push(indices);
        }
        let names: Vec<String> = self.variables.iter().map(|spec| spec.name.clone()).collect();
        let order = ancestral_order(&names, &parent_indices)?;

        let mut builder = NetworkBuilder::new();
        let mut ids: Vec<Option<VarId>> = vec![None; self.variables.len()];
        for index in order {
            let spec = &self.variables[index];
            let parents: Vec<VarId> = parent_indices[index]
                .iter()
                .filter_map(|parent| ids[*parent])
                .collect();
            let id = builder.add_variable(spec.name.clone(), &parents)?;
            if let Some(p) = spec.probability {
                if !parents.is_empty() {
                    return Err(BnError::model(
                        "cpt-arity",
                        "`probability` shorthand is only valid for parentless variables",
                    )
                    .with_context("name", &spec.name));
                }
                builder.set_prior(id, p)?;
            }
            for row in &spec.cpt {
                builder.set_probability(id, &row.given, row.p)?;
            }
            ids[index] = Some(id);
        }
        Ok(builder.build())
    }
}

/// Serializes the network to a JSON string.
pub fn network_to_json(network: &Network) -> Result<String, BnError> {
    serde_json::to_string_pretty(&NetworkSpec::from_network(network))
        .map_err(|err| BnError::serde("serialize-json", err.to_string()))
}

/// Restores a network from a JSON string.
pub fn network_from_json(json: &str) -> Result<Network, BnError> {
    let spec: NetworkSpec = serde_json::from_str(json)
        .map_err(|err| BnError::serde("deserialize-json", err.to_string()))?;
    spec.into_network()
}

/// Serializes the network to a YAML string.
pub fn network_to_yaml(network: &Network) -> Result<String, BnError> {
    serde_yaml::to_string(&NetworkSpec::from_network(network))
        .map_err(|err| BnError::serde("serialize-yaml", err.to_string()))
}

/// Restores a network from a YAML string.
pub fn network_from_yaml(yaml: &str) -> Result<Network, BnError> {
    let spec: NetworkSpec = serde_yaml::from_str(yaml)
        .map_err(|err| BnError::serde("deserialize-yaml", err.to_string()))?;
    spec.into_network()
}

/// Loads a network file; `.yaml`/`.yml` is read as YAML, anything else as JSON.
pub fn load_network(path: &Path) -> Result<Network, BnError> {
    let contents = fs::read_to_string(path).map_err(|err| {
        BnError::serde("read-network", err.to_string())
            .with_context("path", path.display())
    })?;
    let is_yaml = matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("yaml") | Some("yml")
    );
    let network = if is_yaml {
        network_from_yaml(&contents)
    } else {
        network_from_json(&contents)
    };
    network.map_err(|err| err.with_context("path", path.display()))
}
