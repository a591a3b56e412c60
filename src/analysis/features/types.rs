// Types module - Data structures for window features
//
// This module defines the per-window feature bundle produced by the
// FeatureExtractor and consumed by the eligibility predicate and reports.

use serde::{Deserialize, Serialize};

/// Features extracted from one analysis window
///
/// A pure function of the window's samples; no hidden state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureSet {
    /// Maximum signed sample value (not the absolute peak)
    ///
    /// A window that is strongly negative reports a low value here.
    pub amplitude_max: f64,

    /// Largest absolute difference between consecutive samples
    pub amplitude_rate_max: f64,

    /// Shannon entropy (nats) of the normalized absolute amplitudes
    ///
    /// `None` when every sample is exactly zero, which is distinct from a
    /// valid zero-entropy window holding a single non-zero sample.
    pub entropy: Option<f64>,

    /// Excess kurtosis, or the raw fourth central moment for zero variance
    pub kurtosis: f64,

    /// Largest absolute lagged autocovariance over the configured lag range
    pub autocorrelation_max: f64,
}
