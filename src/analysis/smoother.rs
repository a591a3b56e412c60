// ScalarSmoother - one-dimensional Kalman-style denoiser
//
// Models the window as a constant level observed through noise: a random
// walk with process variance Q measured with variance R. The state is
// created fresh for every call, so consecutive windows never share an
// estimate.

use serde::{Deserialize, Serialize};

use crate::config::SmootherConfig;
use crate::error::AnalysisError;

/// Estimate and estimate-variance of the scalar filter
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SmootherState {
    pub estimate: f64,
    pub variance: f64,
}

impl Default for SmootherState {
    fn default() -> Self {
        Self {
            estimate: 0.0,
            variance: 1.0,
        }
    }
}

/// Scalar recursive state estimator
#[derive(Debug, Clone, Copy)]
pub struct ScalarSmoother {
    process_noise: f64,
    measurement_noise: f64,
}

impl ScalarSmoother {
    /// Create a smoother from its noise model
    ///
    /// # Errors
    /// `InvalidInput` unless `Q >= 0` and `R > 0`, both finite.
    pub fn new(config: SmootherConfig) -> Result<Self, AnalysisError> {
        let SmootherConfig {
            process_noise,
            measurement_noise,
        } = config;

        if !(process_noise.is_finite() && process_noise >= 0.0) {
            return Err(AnalysisError::invalid_input(
                "smoother",
                format!("process noise {} must be finite and >= 0", process_noise),
            ));
        }
        if !(measurement_noise.is_finite() && measurement_noise > 0.0) {
            return Err(AnalysisError::invalid_input(
                "smoother",
                format!("measurement noise {} must be finite and > 0", measurement_noise),
            ));
        }

        Ok(Self {
            process_noise,
            measurement_noise,
        })
    }

    /// Advance the filter by one measurement
    pub fn step(&self, state: SmootherState, measurement: f64) -> SmootherState {
        // Predict
        let predicted_estimate = state.estimate;
        let predicted_variance = state.variance + self.process_noise;

        // Update
        let gain = predicted_variance / (predicted_variance + self.measurement_noise);
        SmootherState {
            estimate: predicted_estimate + gain * (measurement - predicted_estimate),
            variance: (1.0 - gain) * predicted_variance,
        }
    }

    /// Smooth a window starting from a fresh state
    ///
    /// The output has the input's length; `output[0]` is already the first
    /// corrected estimate, not the raw first sample.
    pub fn smooth(&self, samples: &[f64]) -> Vec<f64> {
        samples
            .iter()
            .scan(SmootherState::default(), |state, &sample| {
                *state = self.step(*state, sample);
                Some(state.estimate)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn smoother() -> ScalarSmoother {
        ScalarSmoother::new(SmootherConfig::default()).unwrap()
    }

    #[test]
    fn test_output_length_matches_input() {
        assert_eq!(smoother().smooth(&[1.0; 37]).len(), 37);
        assert!(smoother().smooth(&[]).is_empty());
    }

    #[test]
    fn test_first_output_is_corrected() {
        // p = 1.001, k = 1.001 / 2.001, x = k * 10
        let out = smoother().smooth(&[10.0]);
        let expected = 10.0 * 1.001 / 2.001;
        assert!((out[0] - expected).abs() < 1e-12);
        assert_ne!(out[0], 10.0);
    }

    #[test]
    fn test_second_step_matches_recursion() {
        let s = smoother();
        let first = s.step(SmootherState::default(), 4.0);
        let second = s.step(first, 4.0);
        let out = s.smooth(&[4.0, 4.0]);
        assert_eq!(out, vec![first.estimate, second.estimate]);
        assert!(second.variance < first.variance);
    }

    #[test]
    fn test_converges_to_constant_level() {
        let out = smoother().smooth(&[5.0; 2000]);
        assert!((out[1999] - 5.0).abs() < 0.05);
    }

    #[test]
    fn test_reduces_alternating_noise() {
        let samples: Vec<f64> = (0..500).map(|i| if i % 2 == 0 { 1.0 } else { -1.0 }).collect();
        let out = smoother().smooth(&samples);
        let tail_peak = out[400..].iter().fold(0.0_f64, |m, v| m.max(v.abs()));
        assert!(tail_peak < 0.5);
    }

    #[test]
    fn test_deterministic() {
        let samples = [0.3, -2.0, 7.5, 1.1];
        assert_eq!(smoother().smooth(&samples), smoother().smooth(&samples));
    }

    #[test]
    fn test_rejects_invalid_noise() {
        assert!(ScalarSmoother::new(SmootherConfig {
            process_noise: -1.0,
            measurement_noise: 1.0
        })
        .is_err());
        assert!(ScalarSmoother::new(SmootherConfig {
            process_noise: 0.001,
            measurement_noise: 0.0
        })
        .is_err());
    }
}
