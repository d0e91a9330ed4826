use crate::error::{PercolationError, Result};
use crate::percolation::Percolation;
use crate::stats;
use log::{debug, info, trace};
use percolation_common::{ConfidenceInterval, SamplingStrategy, ThresholdReport, TrialParams};
use rand::prelude::*;
use rand::seq::SliceRandom;
use rayon::prelude::*;
use std::cell::OnceCell;
use std::time::Instant;

/// Runs repeated percolation trials on an n-by-n lattice and summarizes
/// the thresholds they produce.
///
/// The thresholds are filled once during construction. Mean and standard
/// deviation are computed on first request and cached afterwards.
#[derive(Debug)]
pub struct PercolationStats {
    params: TrialParams,
    /// Fraction of open sites at the moment each trial first percolated, in trial order.
    thresholds: Vec<f64>,
    mean: OnceCell<f64>,
    stddev: OnceCell<f64>,
}

impl PercolationStats {
    /// Performs `trials` independent trials on an `n`-by-`n` grid, seeded from OS entropy.
    ///
    /// # Errors
    /// `InvalidArgument` if `n <= 0` or `trials <= 0`.
    pub fn new(n: i64, trials: i64) -> Result<Self> {
        let seed: u64 = rand::rng().random();
        Self::with_seed(n, trials, seed)
    }

    /// Same as [`PercolationStats::new`] but fully determined by `seed`.
    pub fn with_seed(n: i64, trials: i64, seed: u64) -> Result<Self> {
        if n <= 0 {
            return Err(PercolationError::InvalidArgument { name: "grid size", value: n });
        }
        if trials <= 0 {
            return Err(PercolationError::InvalidArgument { name: "trials", value: trials });
        }
        let grid_size = n as usize;
        let num_sites = grid_size
            .checked_mul(grid_size)
            .ok_or(PercolationError::InvalidArgument { name: "grid size", value: n })?;
        let params = TrialParams {
            grid_size,
            num_sites,
            trials: trials as usize,
            seed,
            parallel: false,
            sampling: SamplingStrategy::Rejection,
        };
        Self::from_params(&params)
    }

    /// Runs a batch described by `params`. Trials are sharded across the
    /// rayon pool when `params.parallel` is set; the resulting thresholds
    /// are identical to a sequential run with the same seed.
    pub fn from_params(params: &TrialParams) -> Result<Self> {
        if params.grid_size == 0 {
            return Err(PercolationError::InvalidArgument { name: "grid size", value: 0 });
        }
        if params.trials == 0 {
            return Err(PercolationError::InvalidArgument { name: "trials", value: 0 });
        }
        debug!("Trial parameters: {:?}", params);
        info!(
            "Running {} trials on a {}x{} grid ({} sampling, {}).",
            params.trials,
            params.grid_size,
            params.grid_size,
            params.sampling,
            if params.parallel { "parallel" } else { "sequential" }
        );
        let start_time = Instant::now();

        let run = |trial: usize| -> Result<f64> {
            let mut rng = StdRng::seed_from_u64(trial_seed(params.seed, trial));
            let threshold = run_trial(params.grid_size, &mut rng, params.sampling)?;
            trace!("Trial [{}/{}] threshold {:.6}", trial + 1, params.trials, threshold);
            Ok(threshold)
        };

        // Any failing trial aborts the whole run
        let thresholds = if params.parallel {
            (0..params.trials)
                .into_par_iter()
                .map(&run)
                .collect::<Result<Vec<f64>>>()?
        } else {
            (0..params.trials).map(&run).collect::<Result<Vec<f64>>>()?
        };

        info!(
            "Completed {} trials in {:.3} seconds.",
            params.trials,
            start_time.elapsed().as_secs_f64()
        );

        Ok(Self {
            params: params.clone(),
            thresholds,
            mean: OnceCell::new(),
            stddev: OnceCell::new(),
        })
    }

    /// Sample mean of percolation threshold.
    pub fn mean(&self) -> f64 {
        *self
            .mean
            .get_or_init(|| stats::mean(&self.thresholds).unwrap_or(f64::NAN))
    }

    /// Sample standard deviation of percolation threshold.
    /// NaN when only one trial ran (see [`PercolationStats::is_degenerate`]).
    pub fn stddev(&self) -> f64 {
        *self
            .stddev
            .get_or_init(|| stats::std_dev(&self.thresholds).unwrap_or(f64::NAN))
    }

    /// Low endpoint of 95% confidence interval.
    pub fn confidence_low(&self) -> f64 {
        self.confidence_interval().low
    }

    /// High endpoint of 95% confidence interval.
    pub fn confidence_high(&self) -> f64 {
        self.confidence_interval().high
    }

    pub fn confidence_interval(&self) -> ConfidenceInterval {
        let (low, high) = stats::confidence_interval(self.mean(), self.stddev(), self.thresholds.len());
        ConfidenceInterval { low, high }
    }

    /// True when the spread and interval are undefined because fewer than two trials ran.
    pub fn is_degenerate(&self) -> bool {
        self.thresholds.len() < 2
    }

    pub fn thresholds(&self) -> &[f64] {
        &self.thresholds
    }

    pub fn trials(&self) -> usize {
        self.params.trials
    }

    pub fn grid_size(&self) -> usize {
        self.params.grid_size
    }

    /// Collects the run summary into a serializable record.
    pub fn report(&self, include_thresholds: bool) -> ThresholdReport {
        ThresholdReport {
            grid_size: self.params.grid_size,
            trials: self.params.trials,
            seed: self.params.seed,
            mean: self.mean(),
            stddev: self.stddev(),
            confidence_interval: self.confidence_interval(),
            degenerate: self.is_degenerate(),
            thresholds: if include_thresholds { self.thresholds.clone() } else { Vec::new() },
        }
    }
}

/// Opens sites of a fresh `n`-by-`n` lattice until it percolates and
/// returns the fraction of sites that were open at that moment.
pub fn run_trial<R: Rng>(n: usize, rng: &mut R, sampling: SamplingStrategy) -> Result<f64> {
    let size = i64::try_from(n)
        .map_err(|_| PercolationError::InvalidArgument { name: "grid size", value: i64::MAX })?;
    let mut percolation = Percolation::new(size)?;

    match sampling {
        SamplingStrategy::Rejection => {
            while !percolation.percolates()? {
                let row = rng.random_range(1..=size);
                let col = rng.random_range(1..=size);
                if !percolation.is_open(row, col)? {
                    percolation.open(row, col)?;
                }
            }
        }
        SamplingStrategy::Shuffle => {
            // Percolation::new has already rejected sizes whose square overflows
            let mut order: Vec<usize> = (0..percolation.number_of_sites()).collect();
            order.shuffle(rng);
            for site in order {
                if percolation.percolates()? {
                    break;
                }
                percolation.open((site / n) as i64 + 1, (site % n) as i64 + 1)?;
            }
        }
    }

    Ok(percolation.open_fraction())
}

/// Derives an independent per-trial seed so results do not depend on
/// which worker runs which trial.
fn trial_seed(master_seed: u64, trial: usize) -> u64 {
    master_seed.wrapping_add((trial as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15))
}
