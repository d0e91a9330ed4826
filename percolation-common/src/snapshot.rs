use serde::{Serialize, Deserialize};

/// Endpoints of the 95% confidence interval for the percolation threshold.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ConfidenceInterval {
    pub low: f64,
    pub high: f64,
}

/// Summary of a completed percolation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThresholdReport {
    /// Side length `n` of the simulated lattice.
    pub grid_size: usize,
    /// Number of independent trials.
    pub trials: usize,
    /// Master seed the run was derived from.
    pub seed: u64,
    /// Sample mean of the per-trial thresholds.
    pub mean: f64,
    /// Sample standard deviation (NaN for a single trial).
    pub stddev: f64,
    pub confidence_interval: ConfidenceInterval,
    /// True when the interval is undefined because only one trial ran.
    pub degenerate: bool,
    /// Fraction of open sites at the moment each trial first percolated.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub thresholds: Vec<f64>,
}
