// FeatureExtractor - time-domain feature extraction for analysis windows
//
// This module extracts the window-level statistics used to judge whether a
// stretch of the series looks like an event or like noise.
//
// Module organization:
// - types: Data structures (FeatureSet struct)
// - temporal: Amplitude features (maximum, maximum rate of change)
// - statistics: Distribution features (entropy, kurtosis, autocorrelation)
// - mod.rs: Coordinator (FeatureExtractor)
//
// Features extracted:
// 1. Amplitude max: largest signed sample
// 2. Amplitude rate max: largest jump between consecutive samples
// 3. Entropy: Shannon entropy of normalized |s| (order vs. spread)
// 4. Kurtosis: excess kurtosis (tail heaviness, impulsiveness)
// 5. Autocorrelation max: strongest short-lag self-similarity

mod statistics;
mod temporal;
mod types;

pub use statistics::{autocorrelation_max, entropy, kurtosis};
pub use temporal::{amplitude_max, amplitude_rate_max};
pub use types::FeatureSet;

use crate::error::AnalysisError;

/// Minimum window length for full feature extraction
///
/// A one-sample window is still well defined: its rate of change, kurtosis
/// and autocorrelation are all 0.
pub const MIN_WINDOW_LEN: usize = 1;

/// FeatureExtractor coordinates the per-window feature pipeline
#[derive(Debug, Clone, Copy)]
pub struct FeatureExtractor {
    max_lag: usize,
}

impl FeatureExtractor {
    /// Create a new FeatureExtractor
    ///
    /// # Arguments
    /// * `max_lag` - Largest autocorrelation lag (must be >= 1)
    pub fn new(max_lag: usize) -> Result<Self, AnalysisError> {
        if max_lag == 0 {
            return Err(AnalysisError::invalid_input(
                "feature_extractor",
                "max_lag must be at least 1",
            ));
        }
        Ok(Self { max_lag })
    }

    pub fn max_lag(&self) -> usize {
        self.max_lag
    }

    /// Extract all features from a window
    ///
    /// An all-zero window still succeeds: its entropy is reported as `None`
    /// so the window carries the undefined marker instead of failing.
    ///
    /// # Errors
    /// `InvalidInput` if the window is empty.
    pub fn extract(&self, samples: &[f64]) -> Result<FeatureSet, AnalysisError> {
        if samples.len() < MIN_WINDOW_LEN {
            return Err(AnalysisError::invalid_input(
                "feature_extractor",
                format!(
                    "window has {} samples, need at least {}",
                    samples.len(),
                    MIN_WINDOW_LEN
                ),
            ));
        }

        Ok(FeatureSet {
            amplitude_max: amplitude_max(samples)?,
            amplitude_rate_max: amplitude_rate_max(samples)?,
            entropy: AnalysisError::into_undefined(entropy(samples))?,
            kurtosis: kurtosis(samples)?,
            autocorrelation_max: autocorrelation_max(samples, self.max_lag)?,
        })
    }
}
