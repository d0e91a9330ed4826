use serde::{Deserialize, Serialize};
use anyhow::Result;
use crate::sim_params::TrialParams;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

// Configuration for the lattice under study
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct GridConfig {
    /// Side length `n` of the n-by-n site lattice.
    pub size: i64,
}

// Configuration for the Monte Carlo trials
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct TrialsConfig {
    pub count: i64,
    #[serde(default)]
    pub seed: Option<u64>, // None = seed from OS entropy
    #[serde(default)]
    pub parallel: bool,
    #[serde(default = "default_sampling")]
    pub sampling: SamplingStrategy,
}

// Configuration for result output
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
}

/// How a trial chooses the next site to open.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SamplingStrategy {
    /// Draw uniform coordinates and skip ones that are already open.
    #[default]
    Rejection,
    /// Walk a uniformly shuffled permutation of all sites (sampling without replacement).
    Shuffle,
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

fn default_sampling() -> SamplingStrategy {
    SamplingStrategy::Rejection
}

impl FromStr for SamplingStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "rejection" => Ok(SamplingStrategy::Rejection),
            "shuffle" => Ok(SamplingStrategy::Shuffle),
            other => Err(format!("unknown sampling strategy '{}' (expected 'rejection' or 'shuffle')", other)),
        }
    }
}

impl fmt::Display for SamplingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SamplingStrategy::Rejection => write!(f, "rejection"),
            SamplingStrategy::Shuffle => write!(f, "shuffle"),
        }
    }
}

// Main percolation run configuration, loaded from a TOML file or built from CLI values.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct PercolationConfig {
    pub grid: GridConfig,
    pub trials: TrialsConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl PercolationConfig {
    /// Builds a configuration with default trial and output settings.
    /// The result is not validated; call [`PercolationConfig::validate`] before use.
    pub fn new(grid_size: i64, trials: i64) -> Self {
        PercolationConfig {
            grid: GridConfig { size: grid_size },
            trials: TrialsConfig {
                count: trials,
                seed: None,
                parallel: false,
                sampling: default_sampling(),
            },
            output: OutputConfig::default(),
        }
    }

    /// Loads the run configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();

        let config_str = std::fs::read_to_string(path_ref)
            .map_err(|e| anyhow::anyhow!("Failed to read config file '{}': {}", path_ref.display(), e))?;
        Self::from_toml_str(&config_str)
            .map_err(|e| anyhow::anyhow!("Invalid config in '{}': {}", path_ref.display(), e))
    }

    /// Parses and validates configuration text.
    pub fn from_toml_str(config_str: &str) -> Result<Self> {
        let config: PercolationConfig = toml::from_str(config_str)
            .map_err(|e| anyhow::anyhow!("Failed to parse TOML: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects non-positive grid sizes and trial counts.
    pub fn validate(&self) -> Result<()> {
        if self.grid.size <= 0 {
            anyhow::bail!("grid.size must be positive (got {}).", self.grid.size);
        }
        if self.trials.count <= 0 {
            anyhow::bail!("trials.count must be positive (got {}).", self.trials.count);
        }
        Ok(())
    }

    /// Converts the configuration into the parameters used at runtime.
    pub fn get_trial_params(&self, seed: u64) -> Result<TrialParams> {
        self.validate()?;
        let grid_size = usize::try_from(self.grid.size)?;
        let num_sites = grid_size
            .checked_mul(grid_size)
            .ok_or_else(|| anyhow::anyhow!("grid.size {} is too large: n * n overflows.", self.grid.size))?;
        Ok(TrialParams {
            grid_size,
            num_sites,
            trials: usize::try_from(self.trials.count)?,
            seed,
            parallel: self.trials.parallel,
            sampling: self.trials.sampling,
        })
    }
}
