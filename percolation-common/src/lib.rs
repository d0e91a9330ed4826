pub mod config;
pub mod sim_params;
pub mod snapshot;

// Re-export key types for easier use by dependent crates
pub use config::{PercolationConfig, GridConfig, TrialsConfig, OutputConfig, OutputFormat, SamplingStrategy};
pub use sim_params::TrialParams;
pub use snapshot::{ConfidenceInterval, ThresholdReport};
