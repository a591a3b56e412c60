// Classifier - heuristic rule-based event/noise classification
//
// This module implements the rule tables that turn spectral and window
// features into decisions:
//
// 1. Band classifier: dominant frequency -> one of nine ordered bands
// 2. Strong-noise flag: mean spectral magnitude above a fixed level
// 3. Window eligibility: five conjunctive feature conditions marking a
//    window as worth deeper study
//
// Every decision is a pure function of its inputs and the immutable
// ClassifierConfig; there is no memory between calls.

use serde::{Deserialize, Serialize};

use crate::analysis::features::FeatureSet;
use crate::analysis::spectrum::Spectrum;
use crate::config::{BandTable, ClassifierConfig};

/// Frequency band assigned to a dominant frequency
///
/// Variants are listed in ascending frequency order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BandLabel {
    /// Below the lowest band; too low to classify reliably
    Unreliable,
    /// Very-low-frequency seismic candidate
    VeryLowFrequencyCandidate,
    /// Low-frequency seismic candidate
    LowFrequencyCandidate,
    /// Low-to-moderate frequency seismic candidate
    LowToModerateCandidate,
    /// Moderate frequency seismic candidate
    ModerateCandidate,
    /// Impulsive or non-seismic vibration
    ImpulsiveNoise,
    /// Ambient noise or minor seismic noise
    MinorAmbientNoise,
    /// High-frequency noise or interference
    HighFrequencyInterference,
    /// Above every band (or not a number)
    OutOfRange,
}

impl BandLabel {
    /// All labels in table order
    pub const ALL: [BandLabel; 9] = [
        BandLabel::Unreliable,
        BandLabel::VeryLowFrequencyCandidate,
        BandLabel::LowFrequencyCandidate,
        BandLabel::LowToModerateCandidate,
        BandLabel::ModerateCandidate,
        BandLabel::ImpulsiveNoise,
        BandLabel::MinorAmbientNoise,
        BandLabel::HighFrequencyInterference,
        BandLabel::OutOfRange,
    ];

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            BandLabel::Unreliable => "unreliable",
            BandLabel::VeryLowFrequencyCandidate => "very-low-frequency candidate",
            BandLabel::LowFrequencyCandidate => "low-frequency candidate",
            BandLabel::LowToModerateCandidate => "low-to-moderate candidate",
            BandLabel::ModerateCandidate => "moderate candidate",
            BandLabel::ImpulsiveNoise => "impulsive/non-seismic noise",
            BandLabel::MinorAmbientNoise => "minor ambient noise",
            BandLabel::HighFrequencyInterference => "high-frequency interference",
            BandLabel::OutOfRange => "out of expected range",
        }
    }

    /// Whether the band corresponds to a candidate seismic event
    pub fn is_event_candidate(&self) -> bool {
        matches!(
            self,
            BandLabel::VeryLowFrequencyCandidate
                | BandLabel::LowFrequencyCandidate
                | BandLabel::LowToModerateCandidate
                | BandLabel::ModerateCandidate
        )
    }
}

impl std::fmt::Display for BandLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Series-level classification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// Frequency of the strongest spectral bin (Hz)
    pub dominant_frequency: f64,
    /// Band assigned to the dominant frequency
    pub band: BandLabel,
    /// Band is one of the four seismic candidate bands
    pub event_candidate: bool,
    /// Spectral bandwidth (Hz); `None` when the spectrum is negligible
    pub bandwidth: Option<f64>,
    /// Threshold-partitioned SNR (dB); `None` when undefined
    pub snr_db: Option<f64>,
    /// Mean spectral magnitude used for the strong-noise decision
    pub mean_magnitude: f64,
    /// Mean spectral magnitude exceeded the strong-noise level
    pub strong_noise: bool,
}

/// Map a dominant frequency onto the band table
///
/// Total over all inputs: below the first edge is `Unreliable`, the first
/// band includes both of its edges, every later band includes its upper edge
/// only, and anything else (including NaN) is `OutOfRange`.
pub fn classify_band(dominant_frequency: f64, bands: &BandTable) -> BandLabel {
    let edges = bands.edges();

    if dominant_frequency < edges[0] {
        return BandLabel::Unreliable;
    }

    edges[1..]
        .iter()
        .position(|&upper| dominant_frequency <= upper)
        .map(|i| BandLabel::ALL[i + 1])
        .unwrap_or(BandLabel::OutOfRange)
}

/// EventClassifier applies the rule tables to spectra and window features
#[derive(Debug, Clone, Copy)]
pub struct EventClassifier {
    config: ClassifierConfig,
}

impl EventClassifier {
    pub fn new(config: ClassifierConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Band of a dominant frequency under the configured table
    pub fn classify_band(&self, dominant_frequency: f64) -> BandLabel {
        classify_band(dominant_frequency, &self.config.bands)
    }

    /// Whether the mean spectral magnitude indicates strong noise
    pub fn is_strong_noise(&self, mean_magnitude: f64) -> bool {
        mean_magnitude > self.config.strong_noise_mean
    }

    /// Whether a window is apt for deeper study
    ///
    /// All five conditions must hold:
    /// 1. amplitude_max > amplitude_min
    /// 2. amplitude_rate_max < amplitude_rate_max threshold
    /// 3. entropy < entropy_max (an undefined entropy fails)
    /// 4. kurtosis > kurtosis_min
    /// 5. autocorrelation_max > autocorrelation_min
    pub fn is_window_eligible(&self, features: &FeatureSet) -> bool {
        let t = &self.config.eligibility;
        let ordered = features.entropy.is_some_and(|h| h < t.entropy_max);

        features.amplitude_max > t.amplitude_min
            && features.amplitude_rate_max < t.amplitude_rate_max
            && ordered
            && features.kurtosis > t.kurtosis_min
            && features.autocorrelation_max > t.autocorrelation_min
    }

    /// Classify a whole series from its spectrum and derived metrics
    ///
    /// Bandwidth and SNR are passed through as-is, so an undefined value
    /// stays `None` in the result rather than entering any decision.
    pub fn classify_series(
        &self,
        spectrum: &Spectrum,
        bandwidth: Option<f64>,
        snr_db: Option<f64>,
    ) -> ClassificationResult {
        let dominant_frequency = spectrum.dominant_frequency();
        let band = self.classify_band(dominant_frequency);
        let mean_magnitude = spectrum.mean_magnitude();
        let strong_noise = self.is_strong_noise(mean_magnitude);

        log::debug!(
            "[Classifier] dominant={:.4} Hz band={} mean_magnitude={:.3} strong_noise={}",
            dominant_frequency,
            band,
            mean_magnitude,
            strong_noise
        );

        ClassificationResult {
            dominant_frequency,
            band,
            event_candidate: band.is_event_candidate(),
            bandwidth,
            snr_db,
            mean_magnitude,
            strong_noise,
        }
    }
}

impl Default for EventClassifier {
    fn default() -> Self {
        Self::new(ClassifierConfig::default())
    }
}

#[cfg(test)]
#[path = "classifier_tests.rs"]
mod tests;
