// CalibratedThresholds - adaptive amplitude thresholds for one series
//
// Thresholds are derived from the series' own extrema: a fixed fraction of
// the largest absolute amplitude and of the largest sample-to-sample jump.
// The amplitude threshold in turn fixes the noise floor used by the SNR
// estimator.

use serde::{Deserialize, Serialize};

use crate::config::CalibrationConfig;
use crate::error::AnalysisError;

/// Thresholds derived from a full (pre-filtered) series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalibratedThresholds {
    /// Fraction of the maximum absolute amplitude
    pub amplitude: f64,
    /// Fraction of the maximum consecutive absolute difference
    pub amplitude_rate: f64,
    /// Amplitude separating signal from noise for SNR
    pub noise_floor: f64,
}

/// ThresholdCalibrator derives CalibratedThresholds from series extrema
#[derive(Debug, Clone, Copy)]
pub struct ThresholdCalibrator {
    config: CalibrationConfig,
}

impl ThresholdCalibrator {
    pub fn new(config: CalibrationConfig) -> Self {
        Self { config }
    }

    /// Calibrate thresholds in a single pass over the series
    ///
    /// # Returns
    /// * `amplitude` = fraction × max |s[i]|
    /// * `amplitude_rate` = fraction × max |s[i] − s[i−1]|
    /// * `noise_floor` = amplitude × noise_threshold_ratio
    ///
    /// # Errors
    /// `InvalidInput` for fewer than two samples (no difference exists).
    pub fn calibrate(&self, samples: &[f64]) -> Result<CalibratedThresholds, AnalysisError> {
        if samples.len() < 2 {
            return Err(AnalysisError::invalid_input(
                "calibration",
                format!("need at least 2 samples, got {}", samples.len()),
            ));
        }

        let mut max_amplitude = samples[0].abs();
        let mut max_rate = 0.0_f64;
        for pair in samples.windows(2) {
            max_amplitude = max_amplitude.max(pair[1].abs());
            max_rate = max_rate.max((pair[1] - pair[0]).abs());
        }

        let amplitude = self.config.fraction * max_amplitude;
        let thresholds = CalibratedThresholds {
            amplitude,
            amplitude_rate: self.config.fraction * max_rate,
            noise_floor: amplitude * self.config.noise_threshold_ratio,
        };

        log::debug!(
            "[Calibration] amplitude={} amplitude_rate={} noise_floor={}",
            thresholds.amplitude,
            thresholds.amplitude_rate,
            thresholds.noise_floor
        );
        Ok(thresholds)
    }
}

impl Default for ThresholdCalibrator {
    fn default() -> Self {
        Self::new(CalibrationConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calibrate_half_of_extrema() {
        let samples = [0.0, 2.0, -6.0, -5.0];
        let thresholds = ThresholdCalibrator::default().calibrate(&samples).unwrap();

        assert_eq!(thresholds.amplitude, 3.0);
        assert_eq!(thresholds.amplitude_rate, 4.0);
        assert!((thresholds.noise_floor - 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_calibrate_includes_first_sample() {
        let samples = [-10.0, 1.0, 1.0];
        let thresholds = ThresholdCalibrator::default().calibrate(&samples).unwrap();
        assert_eq!(thresholds.amplitude, 5.0);
    }

    #[test]
    fn test_calibrate_custom_fraction() {
        let calibrator = ThresholdCalibrator::new(CalibrationConfig {
            fraction: 0.25,
            noise_threshold_ratio: 0.5,
        });
        let thresholds = calibrator.calibrate(&[0.0, 8.0]).unwrap();
        assert_eq!(thresholds.amplitude, 2.0);
        assert_eq!(thresholds.amplitude_rate, 2.0);
        assert_eq!(thresholds.noise_floor, 1.0);
    }

    #[test]
    fn test_calibrate_requires_two_samples() {
        let calibrator = ThresholdCalibrator::default();
        assert!(matches!(
            calibrator.calibrate(&[1.0]),
            Err(AnalysisError::InvalidInput { .. })
        ));
        assert!(calibrator.calibrate(&[]).is_err());
    }

    #[test]
    fn test_calibrate_constant_series() {
        let thresholds = ThresholdCalibrator::default().calibrate(&[4.0; 100]).unwrap();
        assert_eq!(thresholds.amplitude, 2.0);
        assert_eq!(thresholds.amplitude_rate, 0.0);
    }
}
