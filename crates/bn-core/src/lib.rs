#![deny(missing_docs)]
#![doc = "Core types, errors and the seeding policy shared by the boolean Bayesian network crates."]

use serde::{Deserialize, Serialize};

pub mod errors;
pub mod query;
pub mod rng;

pub use errors::{BnError, ErrorInfo};
pub use query::{Assignment, Observation, Query};
pub use rng::{derive_substream_seed, RngHandle};

/// Identifier for a variable within a frozen network.
///
/// Identifiers are dense arena indices assigned in declaration order, so a
/// variable's parents always carry smaller identifiers than the variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VarId(u32);

impl VarId {
    /// Creates a new identifier from its raw integer representation.
    pub fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw integer representation of the identifier.
    pub fn as_raw(&self) -> u32 {
        self.0
    }

    /// Returns the arena index of the identifier.
    pub fn index(&self) -> usize {
        self.0 as usize
    }

    /// Creates an identifier from an arena index.
    pub fn from_index(index: usize) -> Self {
        Self(index as u32)
    }
}

/// Packs a sequence of booleans into a table index (bit `i` = value `i`).
pub fn pack_bits(values: &[bool]) -> usize {
    values
        .iter()
        .enumerate()
        .fold(0usize, |index, (pos, &value)| index | (usize::from(value) << pos))
}

/// Reads bit `pos` of a packed table index.
pub fn bit(index: usize, pos: usize) -> bool {
    (index >> pos) & 1 == 1
}
