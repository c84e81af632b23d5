use sha2::{Digest, Sha256};

use crate::network::Network;

/// Computes the canonical structural hash of a network.
///
/// Covers names, parent wiring and every CPT entry (unset entries included),
/// so two networks answer every query identically when their hashes match.
pub fn canonical_hash(network: &Network) -> String {
    let mut hasher = Sha256::new();
    hasher.update(b"bn-network:v1");
    hasher.update((network.len() as u64).to_le_bytes());
    for id in network.ids() {
        let variable = network.variable(id);
        update_bytes(variable.name().as_bytes(), &mut hasher);
        hasher.update((variable.parents().len() as u64).to_le_bytes());
        for parent in variable.parents() {
            hasher.update(parent.as_raw().to_le_bytes());
        }
        for entry in variable.cpt().entries() {
            match entry {
                Some(p) => {
                    hasher.update(b"some");
                    hasher.update(p.to_bits().to_le_bytes());
                }
                None => hasher.update(b"none"),
            }
        }
    }
    format!("{:x}", hasher.finalize())
}

fn update_bytes(bytes: &[u8], hasher: &mut Sha256) {
    hasher.update((bytes.len() as u64).to_le_bytes());
    hasher.update(bytes);
}
