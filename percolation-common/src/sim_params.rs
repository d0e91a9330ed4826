use serde::{Deserialize, Serialize};
use crate::config::SamplingStrategy;

/// Trial parameters derived from the configuration, used by every trial of a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrialParams {
    // Lattice
    pub grid_size: usize, // n
    pub num_sites: usize, // n * n

    // Monte Carlo
    pub trials: usize,
    pub seed: u64, // Master seed, per-trial seeds are derived from it
    pub parallel: bool,
    pub sampling: SamplingStrategy,
}
