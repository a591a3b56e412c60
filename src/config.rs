//! Configuration management for the screening pipeline
//!
//! Every numeric threshold the pipeline uses lives here, in one immutable
//! value that is handed to the analyzer. Defaults reproduce the reference
//! constants; any of them can be overridden from a JSON file.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::AnalysisError;

/// Complete analysis configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AnalysisConfig {
    pub scan: ScanConfig,
    pub smoother: SmootherConfig,
    pub calibration: CalibrationConfig,
    pub classifier: ClassifierConfig,
    pub ingest: IngestConfig,
}

/// Window partitioning parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Nominal window length in samples (the last window may be shorter)
    pub window_size: usize,
    /// Largest lag evaluated by the autocorrelation feature
    pub max_lag: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            window_size: 1024,
            max_lag: 10,
        }
    }
}

/// Scalar smoother noise model
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmootherConfig {
    /// Process-noise variance Q
    pub process_noise: f64,
    /// Measurement-noise variance R
    pub measurement_noise: f64,
}

impl Default for SmootherConfig {
    fn default() -> Self {
        Self {
            process_noise: 0.001,
            measurement_noise: 1.0,
        }
    }
}

/// Adaptive threshold derivation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalibrationConfig {
    /// Fraction of the observed extrema used as thresholds
    pub fraction: f64,
    /// Noise floor for SNR, as a fraction of the amplitude threshold
    pub noise_threshold_ratio: f64,
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self {
            fraction: 0.5,
            noise_threshold_ratio: 0.1,
        }
    }
}

/// Upper edges (Hz) of the frequency bands, in ascending order
///
/// Frequencies below `unreliable_below` are unreliable; each following band
/// includes its upper edge. Anything above `high_frequency` is out of range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BandTable {
    pub unreliable_below: f64,
    pub very_low: f64,
    pub low: f64,
    pub low_to_moderate: f64,
    pub moderate: f64,
    pub impulsive_noise: f64,
    pub ambient_noise: f64,
    pub high_frequency: f64,
}

impl BandTable {
    /// Band edges in ascending order
    pub fn edges(&self) -> [f64; 8] {
        [
            self.unreliable_below,
            self.very_low,
            self.low,
            self.low_to_moderate,
            self.moderate,
            self.impulsive_noise,
            self.ambient_noise,
            self.high_frequency,
        ]
    }
}

impl Default for BandTable {
    fn default() -> Self {
        Self {
            unreliable_below: 0.01,
            very_low: 0.05,
            low: 0.1,
            low_to_moderate: 0.5,
            moderate: 1.0,
            impulsive_noise: 2.0,
            ambient_noise: 5.0,
            high_frequency: 20.0,
        }
    }
}

/// Window eligibility thresholds (all conditions must hold)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EligibilityThresholds {
    /// amplitude_max must exceed this
    pub amplitude_min: f64,
    /// amplitude_rate_max must stay below this
    pub amplitude_rate_max: f64,
    /// entropy must stay below this (ordered signal)
    pub entropy_max: f64,
    /// kurtosis must exceed this (heavy tails)
    pub kurtosis_min: f64,
    /// autocorrelation_max must exceed this (repetitive pattern)
    pub autocorrelation_min: f64,
}

impl Default for EligibilityThresholds {
    fn default() -> Self {
        Self {
            amplitude_min: 0.5,
            amplitude_rate_max: 0.05,
            entropy_max: 2.0,
            kurtosis_min: 3.0,
            autocorrelation_min: 0.5,
        }
    }
}

/// Event classifier parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    pub bands: BandTable,
    /// Mean spectral magnitude above which the series is flagged as noisy
    pub strong_noise_mean: f64,
    pub eligibility: EligibilityThresholds,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            bands: BandTable::default(),
            strong_noise_mean: 50.0,
            eligibility: EligibilityThresholds::default(),
        }
    }
}

/// Input-side parameters used by the CSV loader and pre-filter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    /// Sampling rate assigned to loaded series (Hz)
    pub sample_rate: f64,
    /// Zero-based CSV column holding the amplitude
    pub value_column: usize,
    /// Low-pass pre-filter cutoff; `None` disables the pre-filter
    pub lowpass_cutoff: Option<f64>,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            sample_rate: 1000.0,
            value_column: 2,
            lowpass_cutoff: Some(0.1),
        }
    }
}

impl AnalysisConfig {
    /// Load configuration from JSON file
    ///
    /// # Returns
    /// The parsed configuration, or the defaults if the file doesn't exist
    /// or the JSON is invalid (a warning is logged in both cases).
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Self {
        match Self::try_load_from_file(&path) {
            Ok(config) => {
                log::info!("[Config] Loaded configuration from {:?}", path.as_ref());
                config
            }
            Err(err) => {
                log::warn!(
                    "[Config] Failed to load {:?}: {:#}. Using defaults.",
                    path.as_ref(),
                    err
                );
                Self::default()
            }
        }
    }

    /// Load configuration from JSON file, failing on any read or parse error
    pub fn try_load_from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        use anyhow::Context;

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("reading config {}", path.as_ref().display()))?;
        let config: Self = serde_json::from_str(&contents)
            .with_context(|| format!("parsing config {}", path.as_ref().display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the configuration is internally consistent
    pub fn validate(&self) -> Result<(), AnalysisError> {
        const OP: &str = "config";

        if self.scan.window_size == 0 {
            return Err(AnalysisError::invalid_input(OP, "window_size must be > 0"));
        }
        if self.scan.max_lag == 0 {
            return Err(AnalysisError::invalid_input(OP, "max_lag must be > 0"));
        }

        let smoother = self.smoother;
        if !(smoother.process_noise.is_finite() && smoother.process_noise >= 0.0) {
            return Err(AnalysisError::invalid_input(
                OP,
                format!("process_noise {} must be finite and >= 0", smoother.process_noise),
            ));
        }
        if !(smoother.measurement_noise.is_finite() && smoother.measurement_noise > 0.0) {
            return Err(AnalysisError::invalid_input(
                OP,
                format!(
                    "measurement_noise {} must be finite and > 0",
                    smoother.measurement_noise
                ),
            ));
        }

        let calibration = self.calibration;
        if !(calibration.fraction.is_finite() && calibration.fraction > 0.0) {
            return Err(AnalysisError::invalid_input(
                OP,
                format!("calibration fraction {} must be > 0", calibration.fraction),
            ));
        }
        if !(calibration.noise_threshold_ratio.is_finite()
            && calibration.noise_threshold_ratio >= 0.0)
        {
            return Err(AnalysisError::invalid_input(
                OP,
                format!(
                    "noise_threshold_ratio {} must be >= 0",
                    calibration.noise_threshold_ratio
                ),
            ));
        }

        let edges = self.classifier.bands.edges();
        if edges.windows(2).any(|pair| pair[0] >= pair[1]) || edges.iter().any(|e| !e.is_finite()) {
            return Err(AnalysisError::invalid_input(
                OP,
                format!("band edges must be finite and strictly increasing: {:?}", edges),
            ));
        }

        if !(self.ingest.sample_rate.is_finite() && self.ingest.sample_rate > 0.0) {
            return Err(AnalysisError::invalid_input(
                OP,
                format!("sample_rate {} must be > 0", self.ingest.sample_rate),
            ));
        }
        if let Some(cutoff) = self.ingest.lowpass_cutoff {
            if !(cutoff.is_finite() && cutoff > 0.0) {
                return Err(AnalysisError::invalid_input(
                    OP,
                    format!("lowpass_cutoff {} must be > 0", cutoff),
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AnalysisConfig::default();
        assert_eq!(config.scan.window_size, 1024);
        assert_eq!(config.scan.max_lag, 10);
        assert_eq!(config.smoother.process_noise, 0.001);
        assert_eq!(config.smoother.measurement_noise, 1.0);
        assert_eq!(config.classifier.strong_noise_mean, 50.0);
        assert_eq!(config.ingest.lowpass_cutoff, Some(0.1));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_json_roundtrip() {
        let config = AnalysisConfig::default();
        let json = serde_json::to_string_pretty(&config).unwrap();
        let parsed: AnalysisConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let parsed: AnalysisConfig =
            serde_json::from_str(r#"{ "scan": { "window_size": 256 } }"#).unwrap();
        assert_eq!(parsed.scan.window_size, 256);
        assert_eq!(parsed.scan.max_lag, 10);
        assert_eq!(parsed.classifier, ClassifierConfig::default());
    }

    #[test]
    fn test_validate_rejects_zero_window() {
        let mut config = AnalysisConfig::default();
        config.scan.window_size = 0;
        assert!(matches!(
            config.validate(),
            Err(AnalysisError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_unordered_bands() {
        let mut config = AnalysisConfig::default();
        config.classifier.bands.moderate = 0.2;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_measurement_noise() {
        let mut config = AnalysisConfig::default();
        config.smoother.measurement_noise = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_missing_file_falls_back_to_defaults() {
        let config = AnalysisConfig::load_from_file("/nonexistent/seismo_config.json");
        assert_eq!(config, AnalysisConfig::default());
        assert!(AnalysisConfig::try_load_from_file("/nonexistent/seismo_config.json").is_err());
    }
}
