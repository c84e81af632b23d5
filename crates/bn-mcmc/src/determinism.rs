use bn_core::derive_substream_seed;

/// Substream reserved for rejection sampling within a run.
pub const REJECTION_STREAM: u64 = 0;
/// Substream reserved for Gibbs sampling within a run.
pub const GIBBS_STREAM: u64 = 1;

/// Derives the deterministic seed used for a specific run.
pub fn run_seed(master_seed: u64, run_index: usize) -> u64 {
    derive_substream_seed(master_seed, run_index as u64)
}

/// Derives the seed of one sampler stream inside a run.
pub fn stream_seed(master_seed: u64, run_index: usize, stream: u64) -> u64 {
    derive_substream_seed(run_seed(master_seed, run_index), stream)
}
