#![deny(missing_docs)]
#![doc = "Frozen boolean Bayesian network arena: variables, CPTs, derived child adjacency and the network description format."]

mod acyclic;
mod cpt;
mod generators;
mod hash;
mod network;
mod serialization;

pub use cpt::Cpt;
pub use generators::gen_random_network;
pub use hash::canonical_hash;
pub use network::{Network, NetworkBuilder, Variable};
pub use serialization::{
    load_network, network_from_json, network_from_yaml, network_to_json, network_to_yaml,
    CptRow, NetworkSpec, VariableSpec,
};
