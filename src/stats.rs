//! Descriptive statistics for threshold samples.
//!
//! - **Mean**: Kahan compensated summation.
//! - **Variance/StdDev**: Welford's online algorithm with Bessel's
//!   correction (divisor `n − 1`).
//! - **Confidence interval**: normal approximation, `mean ± z·s/√n`.

/// Two-sided 95% quantile of the standard normal distribution.
pub const Z_95: f64 = 1.96;

/// Sums `data` with Kahan compensation.
pub fn kahan_sum(data: &[f64]) -> f64 {
    let mut sum = 0.0;
    let mut compensation = 0.0;
    for &x in data {
        let y = x - compensation;
        let t = sum + y;
        compensation = (t - sum) - y;
        sum = t;
    }
    sum
}

/// Arithmetic mean.
///
/// # Returns
/// - `None` if `data` is empty or contains any NaN/Inf.
pub fn mean(data: &[f64]) -> Option<f64> {
    if data.is_empty() {
        return None;
    }
    if !data.iter().all(|x| x.is_finite()) {
        return None;
    }
    Some(kahan_sum(data) / data.len() as f64)
}

/// Sample variance (denominator `n − 1`) by Welford's method.
///
/// # Returns
/// - `None` if `data.len() < 2` or contains NaN/Inf.
pub fn variance(data: &[f64]) -> Option<f64> {
    if data.len() < 2 {
        return None;
    }
    if !data.iter().all(|x| x.is_finite()) {
        return None;
    }
    let mut count = 0.0;
    let mut running_mean = 0.0;
    let mut m2 = 0.0;
    for &x in data {
        count += 1.0;
        let delta = x - running_mean;
        running_mean += delta / count;
        m2 += delta * (x - running_mean);
    }
    Some(m2 / (count - 1.0))
}

/// Sample standard deviation, `sqrt(variance(data))`.
pub fn std_dev(data: &[f64]) -> Option<f64> {
    variance(data).map(f64::sqrt)
}

/// Returns `(low, high)` of the 95% confidence interval for a sample of
/// size `n` with the given mean and standard deviation.
///
/// NaN inputs propagate to both endpoints.
pub fn confidence_interval(mean: f64, std_dev: f64, n: usize) -> (f64, f64) {
    let half_width = Z_95 * std_dev / (n as f64).sqrt();
    (mean - half_width, mean + half_width)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_basic() {
        assert_eq!(mean(&[1.0, 2.0, 3.0, 4.0, 5.0]), Some(3.0));
    }

    #[test]
    fn test_mean_edge_cases() {
        assert_eq!(mean(&[42.0]), Some(42.0));
        assert_eq!(mean(&[]), None);
        assert_eq!(mean(&[1.0, f64::NAN]), None);
        assert_eq!(mean(&[0.0, 0.0]), Some(0.0));
    }

    #[test]
    fn test_kahan_sum_small_terms() {
        let mut data = vec![1.0];
        data.extend(std::iter::repeat(1e-16).take(10_000));
        assert!((kahan_sum(&data) - (1.0 + 1e-12)).abs() < 1e-15);
    }

    #[test]
    fn test_variance_basic() {
        let v = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert!((variance(&v).unwrap() - 4.571428571428571).abs() < 1e-10);
        assert!((std_dev(&v).unwrap() - 4.571428571428571_f64.sqrt()).abs() < 1e-10);
    }

    #[test]
    fn test_variance_constant_is_zero() {
        assert!(variance(&[0.6; 50]).unwrap().abs() < 1e-15);
    }

    #[test]
    fn test_variance_needs_two_samples() {
        assert_eq!(variance(&[0.5]), None);
        assert_eq!(std_dev(&[]), None);
    }

    #[test]
    fn test_confidence_interval() {
        let (lo, hi) = confidence_interval(0.5, 0.1, 100);
        assert!((lo - (0.5 - 0.0196)).abs() < 1e-12);
        assert!((hi - (0.5 + 0.0196)).abs() < 1e-12);
    }

    #[test]
    fn test_confidence_interval_nan_propagates() {
        let (lo, hi) = confidence_interval(0.5, f64::NAN, 1);
        assert!(lo.is_nan());
        assert!(hi.is_nan());
    }
}
