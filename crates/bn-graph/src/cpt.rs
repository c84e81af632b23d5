use bn_core::{pack_bits, BnError};
use serde::{Deserialize, Serialize};

/// Conditional probability table of a boolean variable.
///
/// Entry `i` stores `P(var = true | parents)` for the parent assignment whose
/// bit `j` is the value of parent `j`. Entries start out unset; reading an
/// unset entry is an error rather than an implicit zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cpt {
    arity: usize,
    table: Vec<Option<f64>>,
}

impl Cpt {
    /// Creates an empty table for a variable with `arity` parents.
    pub fn new(arity: usize) -> Self {
        Self {
            arity,
            table: vec![None; 1usize << arity],
        }
    }

    /// Number of parents the table is indexed by.
    pub fn arity(&self) -> usize {
        self.arity
    }

    /// Number of parent assignments (`2^arity`).
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns whether the table has no entries (never true; a root has one).
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Stores `P(var = true | parent_values)`.
    pub fn set(&mut self, parent_values: &[bool], probability: f64) -> Result<(), BnError> {
        if parent_values.len() != self.arity {
            return Err(BnError::model(
                "cpt-arity",
                "parent assignment length does not match the number of parents",
            )
            .with_context("expected", self.arity)
            .with_context("actual", parent_values.len()));
        }
        self.set_index(pack_bits(parent_values), probability)
    }

    /// Stores `P(var = true | assignment #index)`.
    pub fn set_index(&mut self, index: usize, probability: f64) -> Result<(), BnError> {
        if !probability.is_finite() || !(0.0..=1.0).contains(&probability) {
            return Err(
                BnError::model("invalid-probability", "probability must lie in [0, 1]")
                    .with_context("probability", probability),
            );
        }
        let slot = self.table.get_mut(index).ok_or_else(|| {
            BnError::model("cpt-arity", "parent assignment index out of range")
                .with_context("index", index)
                .with_context("entries", 1usize << self.arity)
        })?;
        *slot = Some(probability);
        Ok(())
    }

    /// Reads `P(var = true | assignment #index)`.
    pub fn get(&self, index: usize) -> Result<f64, BnError> {
        self.table.get(index).copied().flatten().ok_or_else(|| {
            BnError::model("missing-cpt-entry", "conditional probability was never set")
                .with_context("index", index)
        })
    }

    /// Reads `P(var = true | parent_values)`.
    pub fn probability(&self, parent_values: &[bool]) -> Result<f64, BnError> {
        self.get(pack_bits(parent_values))
    }

    /// Returns whether every parent assignment has a probability.
    pub fn is_complete(&self) -> bool {
        self.table.iter().all(Option::is_some)
    }

    /// Indices of parent assignments that are still unset.
    pub fn missing(&self) -> Vec<usize> {
        self.table
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.is_none())
            .map(|(index, _)| index)
            .collect()
    }

    /// Raw entries in index order.
    pub fn entries(&self) -> &[Option<f64>] {
        &self.table
    }
}
