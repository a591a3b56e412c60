// Temporal module - Amplitude features computed directly on samples
//
// These features capture the envelope of a window: how high it reaches and
// how abruptly it moves between consecutive samples.

use crate::error::AnalysisError;

/// Maximum sample value
///
/// Signed on purpose: a window dominated by negative excursions reports a
/// low maximum rather than its absolute peak.
///
/// # Errors
/// `InvalidInput` for an empty window.
pub fn amplitude_max(samples: &[f64]) -> Result<f64, AnalysisError> {
    let (&first, rest) = samples
        .split_first()
        .ok_or_else(|| AnalysisError::invalid_input("amplitude_max", "window is empty"))?;

    Ok(rest
        .iter()
        .fold(first, |max, &sample| if sample > max { sample } else { max }))
}

/// Largest `|s[i] - s[i-1]|` over consecutive samples
///
/// A single-sample window has no predecessor pair and yields 0.
///
/// # Errors
/// `InvalidInput` for an empty window.
pub fn amplitude_rate_max(samples: &[f64]) -> Result<f64, AnalysisError> {
    if samples.is_empty() {
        return Err(AnalysisError::invalid_input(
            "amplitude_rate_max",
            "window is empty",
        ));
    }

    Ok(samples
        .windows(2)
        .map(|pair| (pair[1] - pair[0]).abs())
        .fold(0.0, f64::max))
}
