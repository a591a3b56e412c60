// Statistics module - Distribution and correlation features
//
// Entropy, kurtosis and lagged autocorrelation describe how a window's
// amplitudes are distributed and how much structure repeats over short lags.
// Each one has a degenerate input (all-zero, zero-variance, too-short) whose
// handling is part of the contract, not an accident of floating point.

use crate::error::{AnalysisError, MetricKind};

/// Arithmetic mean shifted by the first sample
///
/// For a constant window the accumulated deviations are exactly zero, so the
/// returned mean equals the samples bit-for-bit.
fn shifted_mean(samples: &[f64]) -> f64 {
    let shift = samples[0];
    let deviation: f64 = samples.iter().map(|&s| s - shift).sum();
    shift + deviation / samples.len() as f64
}

/// Shannon entropy of the normalized absolute amplitudes
///
/// Formula: p_i = |s_i| / Σ|s|, entropy = -Σ p_i ln(p_i), skipping p_i = 0
///
/// # Errors
/// * `InvalidInput` for an empty window
/// * `UndefinedMetric` when every sample is zero (no distribution exists)
pub fn entropy(samples: &[f64]) -> Result<f64, AnalysisError> {
    if samples.is_empty() {
        return Err(AnalysisError::invalid_input("entropy", "window is empty"));
    }

    let total: f64 = samples.iter().map(|s| s.abs()).sum();
    if total == 0.0 {
        return Err(AnalysisError::undefined(
            MetricKind::Entropy,
            "sum of absolute amplitudes is zero",
        ));
    }

    Ok(samples
        .iter()
        .map(|s| s.abs() / total)
        .filter(|&p| p > 0.0)
        .map(|p| -p * p.ln())
        .sum())
}

/// Excess kurtosis over the population moments
///
/// When the variance is positive this is `m4 / var² - 3`. A zero-variance
/// window returns the raw fourth central moment instead, which is 0 for a
/// constant window.
///
/// # Errors
/// `InvalidInput` for an empty window.
pub fn kurtosis(samples: &[f64]) -> Result<f64, AnalysisError> {
    if samples.is_empty() {
        return Err(AnalysisError::invalid_input("kurtosis", "window is empty"));
    }

    let n = samples.len() as f64;
    let mean = shifted_mean(samples);

    let (variance, moment4) = samples.iter().fold((0.0, 0.0), |(var, m4), &s| {
        let diff = s - mean;
        let sq = diff * diff;
        (var + sq, m4 + sq * sq)
    });
    let variance = variance / n;
    let moment4 = moment4 / n;

    if variance > 0.0 {
        Ok(moment4 / (variance * variance) - 3.0)
    } else {
        Ok(moment4)
    }
}

/// Largest absolute lagged autocovariance for lags `1..=max_lag`
///
/// Formula: r(k) = Σ_{i<N-k} (s_i - μ)(s_{i+k} - μ) / (N - k)
///
/// The lag range is clamped to `1..=min(max_lag, N - 1)`, since a lag of
/// N or more has no overlapping samples. A single-sample window therefore
/// has no lag left to evaluate and yields 0.
///
/// # Errors
/// `InvalidInput` for an empty window or `max_lag == 0`.
pub fn autocorrelation_max(samples: &[f64], max_lag: usize) -> Result<f64, AnalysisError> {
    if samples.is_empty() {
        return Err(AnalysisError::invalid_input(
            "autocorrelation_max",
            "window is empty",
        ));
    }
    if max_lag == 0 {
        return Err(AnalysisError::invalid_input(
            "autocorrelation_max",
            "max_lag must be at least 1",
        ));
    }

    let n = samples.len();
    let mean = shifted_mean(samples);
    let centered: Vec<f64> = samples.iter().map(|&s| s - mean).collect();

    let best = (1..=max_lag.min(n.saturating_sub(1)))
        .map(|lag| {
            let sum: f64 = centered[..n - lag]
                .iter()
                .zip(&centered[lag..])
                .map(|(a, b)| a * b)
                .sum();
            (sum / (n - lag) as f64).abs()
        })
        .fold(0.0, f64::max);

    Ok(best)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entropy_uniform_window() {
        // Uniform |s| over N samples has entropy ln(N)
        let samples = [1.0, -1.0, 1.0, -1.0];
        let h = entropy(&samples).unwrap();
        assert!((h - 4.0_f64.ln()).abs() < 1e-12);
    }

    #[test]
    fn test_entropy_single_nonzero_is_valid_zero() {
        let samples = [0.0, 0.0, 3.0, 0.0];
        assert_eq!(entropy(&samples).unwrap(), 0.0);
    }

    #[test]
    fn test_entropy_all_zero_is_undefined() {
        let result = entropy(&[0.0; 16]);
        match result {
            Err(AnalysisError::UndefinedMetric { metric, .. }) => {
                assert_eq!(metric, MetricKind::Entropy)
            }
            other => panic!("Expected UndefinedMetric, got {:?}", other),
        }
    }

    #[test]
    fn test_entropy_is_scale_invariant() {
        let samples = [0.3, -1.2, 4.0, 0.0, 2.5];
        let scaled: Vec<f64> = samples.iter().map(|s| s * 17.0).collect();
        let h1 = entropy(&samples).unwrap();
        let h2 = entropy(&scaled).unwrap();
        assert!((h1 - h2).abs() < 1e-12);
    }

    #[test]
    fn test_kurtosis_constant_window_uses_raw_moment() {
        assert_eq!(kurtosis(&[0.1; 3]).unwrap(), 0.0);
        assert_eq!(kurtosis(&[-7.25; 1024]).unwrap(), 0.0);
    }

    #[test]
    fn test_kurtosis_two_point_distribution() {
        // Symmetric ±1: var = 1, m4 = 1, excess = 1 - 3 = -2
        let samples = [1.0, -1.0, 1.0, -1.0];
        assert!((kurtosis(&samples).unwrap() + 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_kurtosis_spike_is_heavy_tailed() {
        let mut samples = vec![0.0; 100];
        samples[50] = 10.0;
        assert!(kurtosis(&samples).unwrap() > 3.0);
    }

    #[test]
    fn test_kurtosis_empty_is_invalid() {
        assert!(kurtosis(&[]).is_err());
    }

    #[test]
    fn test_autocorrelation_constant_is_zero() {
        assert_eq!(autocorrelation_max(&[2.2; 50], 10).unwrap(), 0.0);
    }

    #[test]
    fn test_autocorrelation_alternating_signal() {
        // Mean 0; lag 1 products are all -1, lag 2 products all +1
        let samples: Vec<f64> = (0..20).map(|i| if i % 2 == 0 { 1.0 } else { -1.0 }).collect();
        let r = autocorrelation_max(&samples, 2).unwrap();
        assert!((r - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_autocorrelation_skips_lags_beyond_window() {
        // Only lag 1 has overlap for a two-sample window
        let r = autocorrelation_max(&[1.0, -1.0], 10).unwrap();
        assert!((r - 1.0).abs() < 1e-12);
        assert_eq!(autocorrelation_max(&[5.0], 10).unwrap(), 0.0);
    }

    #[test]
    fn test_autocorrelation_rejects_zero_lag() {
        assert!(autocorrelation_max(&[1.0, 2.0, 3.0], 0).is_err());
    }
}
