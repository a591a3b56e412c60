// SignalToNoiseEstimator - threshold-partitioned power ratio
//
// Samples above the noise floor count as signal, the rest as noise. The
// ratio of their mean powers is reported in decibels.

use crate::error::{AnalysisError, MetricKind};

/// SNR estimator with a fixed amplitude threshold
#[derive(Debug, Clone, Copy)]
pub struct SignalToNoiseEstimator {
    threshold: f64,
}

impl SignalToNoiseEstimator {
    /// # Arguments
    /// * `threshold` - Amplitude above which `|s|` counts as signal
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// SNR in dB: `10·log10(mean signal power / mean noise power)`
    ///
    /// # Errors
    /// * `InvalidInput` for an empty sequence
    /// * `UndefinedMetric` if either partition is empty, a partition power
    ///   is not finite, or the noise power is exactly zero
    pub fn estimate(&self, samples: &[f64]) -> Result<f64, AnalysisError> {
        if samples.is_empty() {
            return Err(AnalysisError::invalid_input("snr", "sample sequence is empty"));
        }

        let mut signal_power = 0.0;
        let mut noise_power = 0.0;
        let mut signal_count = 0usize;
        let mut noise_count = 0usize;

        for &sample in samples {
            if sample.abs() > self.threshold {
                signal_power += sample * sample;
                signal_count += 1;
            } else {
                noise_power += sample * sample;
                noise_count += 1;
            }
        }

        if signal_count == 0 || noise_count == 0 {
            return Err(AnalysisError::undefined(
                MetricKind::Snr,
                format!(
                    "empty partition at threshold {} ({} signal, {} noise samples)",
                    self.threshold, signal_count, noise_count
                ),
            ));
        }
        if !(signal_power.is_finite() && noise_power.is_finite()) {
            return Err(AnalysisError::undefined(
                MetricKind::Snr,
                format!(
                    "partition powers are not finite (signal {}, noise {})",
                    signal_power, noise_power
                ),
            ));
        }
        if noise_power == 0.0 {
            return Err(AnalysisError::undefined(
                MetricKind::Snr,
                "noise power is zero",
            ));
        }

        let mean_signal = signal_power / signal_count as f64;
        let mean_noise = noise_power / noise_count as f64;
        Ok(10.0 * (mean_signal / mean_noise).log10())
    }
}
