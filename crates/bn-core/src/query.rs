//! Query descriptors and call-local variable assignments.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::BnError;
use crate::VarId;

/// A single `(variable, value)` pair used for targets and evidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Observation {
    /// Observed variable.
    pub var: VarId,
    /// Observed boolean value.
    pub value: bool,
}

impl Observation {
    /// Creates a new observation.
    pub fn new(var: VarId, value: bool) -> Self {
        Self { var, value }
    }
}

impl From<(VarId, bool)> for Observation {
    fn from((var, value): (VarId, bool)) -> Self {
        Self { var, value }
    }
}

/// Posterior query `P(targets | evidence)`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    /// Target values whose joint posterior is requested.
    pub targets: Vec<Observation>,
    /// Observed values conditioned upon.
    #[serde(default)]
    pub evidence: Vec<Observation>,
}

impl Query {
    /// Creates an empty query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a target observation.
    pub fn target(mut self, var: VarId, value: bool) -> Self {
        self.targets.push(Observation::new(var, value));
        self
    }

    /// Adds an evidence observation.
    pub fn given(mut self, var: VarId, value: bool) -> Self {
        self.evidence.push(Observation::new(var, value));
        self
    }

    /// Returns whether `var` is clamped by the evidence.
    pub fn is_evidence(&self, var: VarId) -> bool {
        self.evidence.iter().any(|obs| obs.var == var)
    }

    /// Returns whether `var` is one of the targets.
    pub fn is_target(&self, var: VarId) -> bool {
        self.targets.iter().any(|obs| obs.var == var)
    }

    /// Returns whether `var` is neither a target nor evidence.
    pub fn is_hidden(&self, var: VarId) -> bool {
        !self.is_target(var) && !self.is_evidence(var)
    }

    /// Checks the descriptor against a network holding `num_variables` variables.
    pub fn validate(&self, num_variables: usize) -> Result<(), BnError> {
        if self.targets.is_empty() {
            return Err(BnError::query(
                "empty-targets",
                "query must name at least one target variable",
            ));
        }
        let mut seen: BTreeMap<VarId, (bool, &'static str)> = BTreeMap::new();
        let tagged = self
            .targets
            .iter()
            .map(|obs| (obs, "target"))
            .chain(self.evidence.iter().map(|obs| (obs, "evidence")));
        for (obs, role) in tagged {
            if obs.var.index() >= num_variables {
                return Err(BnError::query("unknown-variable", "variable is not in the network")
                    .with_context("var", obs.var.as_raw())
                    .with_context("variables", num_variables));
            }
            match seen.get(&obs.var) {
                None => {
                    seen.insert(obs.var, (obs.value, role));
                }
                Some(&(_, previous)) if previous != role => {
                    return Err(BnError::query(
                        "overlapping-observation",
                        "variable appears in both targets and evidence",
                    )
                    .with_context("var", obs.var.as_raw()));
                }
                Some(&(value, _)) if value != obs.value => {
                    return Err(BnError::query(
                        "conflicting-observation",
                        "variable is observed with both values",
                    )
                    .with_context("var", obs.var.as_raw())
                    .with_context("role", role));
                }
                Some(_) => {}
            }
        }
        Ok(())
    }
}

/// Call-local boolean value per variable, indexed by [`VarId`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    values: Vec<bool>,
}

impl Assignment {
    /// Creates an all-false assignment over `len` variables.
    pub fn new(len: usize) -> Self {
        Self {
            values: vec![false; len],
        }
    }

    /// Returns the value assigned to `var`.
    pub fn get(&self, var: VarId) -> bool {
        self.values[var.index()]
    }

    /// Assigns `value` to `var`.
    pub fn set(&mut self, var: VarId, value: bool) {
        self.values[var.index()] = value;
    }

    /// Writes every observation into the assignment.
    pub fn clamp(&mut self, observations: &[Observation]) {
        for obs in observations {
            self.set(obs.var, obs.value);
        }
    }

    /// Returns whether every observation agrees with the assignment.
    pub fn satisfies(&self, observations: &[Observation]) -> bool {
        observations.iter().all(|obs| self.get(obs.var) == obs.value)
    }

    /// Returns the number of variables covered.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns whether the assignment covers no variables.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the raw values in identifier order.
    pub fn as_slice(&self) -> &[bool] {
        &self.values
    }
}
