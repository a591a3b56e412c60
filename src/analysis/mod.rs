// Analysis module - series screening pipeline
//
// This module orchestrates the complete analysis of one sample series and
// produces the report handed to the reporting layer.
//
// Architecture:
// - SeriesAnalyzer: owns the immutable configuration and stage objects
// - Pipeline: ThresholdCalibrator → SpectralAnalyzer → EventClassifier
//   → WindowScanner (FeatureExtractor + ScalarSmoother per window)
// - Output: SeriesReport with series-level classification and ordered
//   per-window diagnostics

use std::sync::atomic::AtomicBool;
use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::calibration::{CalibratedThresholds, ThresholdCalibrator};
use crate::config::AnalysisConfig;
use crate::error::{log_analysis_error, AnalysisError};
use crate::signal::Signal;

pub mod classifier;
pub mod features;
pub mod scanner;
pub mod smoother;
pub mod snr;
pub mod spectrum;

pub use classifier::{BandLabel, ClassificationResult, EventClassifier};
pub use features::{FeatureExtractor, FeatureSet};
pub use scanner::{ScanOutcome, WindowDiagnostics, WindowReport, WindowScanner, WindowStatus};
pub use smoother::{ScalarSmoother, SmootherState};
pub use snr::SignalToNoiseEstimator;
pub use spectrum::{SpectralAnalyzer, Spectrum};

/// Complete analysis of one series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesReport {
    pub sample_count: usize,
    pub sample_rate: f64,
    pub thresholds: CalibratedThresholds,
    pub classification: ClassificationResult,
    pub windows: Vec<WindowReport>,
    /// Number of windows flagged as apt for deeper study
    pub eligible_windows: usize,
    /// Window scan stopped early on request
    pub cancelled: bool,
}

impl SeriesReport {
    /// Drop smoothed sequences, keeping features and decisions only
    pub fn without_smoothed(mut self) -> Self {
        for window in &mut self.windows {
            if let WindowStatus::Analyzed(diagnostics) = &mut window.status {
                diagnostics.smoothed = Vec::new();
            }
        }
        self
    }

    /// Windows that failed analysis
    pub fn failed_windows(&self) -> impl Iterator<Item = &WindowReport> {
        self.windows.iter().filter(|w| w.error().is_some())
    }
}

/// SeriesAnalyzer runs the full screening pipeline on a Signal
pub struct SeriesAnalyzer {
    config: AnalysisConfig,
    calibrator: ThresholdCalibrator,
    spectral: SpectralAnalyzer,
    classifier: EventClassifier,
    scanner: WindowScanner,
}

impl SeriesAnalyzer {
    /// Create an analyzer from a validated configuration
    pub fn new(config: AnalysisConfig) -> Result<Self, AnalysisError> {
        config.validate()?;

        let classifier = EventClassifier::new(config.classifier);
        let scanner = WindowScanner::new(&config.scan, config.smoother, classifier)?;

        Ok(Self {
            calibrator: ThresholdCalibrator::new(config.calibration),
            spectral: SpectralAnalyzer::new(),
            classifier,
            scanner,
            config,
        })
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Analyze one series
    pub fn analyze(&self, signal: &Signal) -> Result<SeriesReport, AnalysisError> {
        self.analyze_with_cancel(signal, &AtomicBool::new(false))
    }

    /// Analyze one series, checking `cancel` between windows
    ///
    /// # Errors
    /// * `InvalidInput` for a series too short to calibrate (< 2 samples)
    /// * `ResourceExhausted` if the transform buffers cannot be allocated
    ///
    /// Undefined bandwidth or SNR do not fail the series; they are reported
    /// as `None` in the classification.
    pub fn analyze_with_cancel(
        &self,
        signal: &Signal,
        cancel: &AtomicBool,
    ) -> Result<SeriesReport, AnalysisError> {
        let started = Instant::now();
        tracing::debug!(
            "[SeriesAnalyzer] Analyzing {} samples at {} Hz ({:.2} s)",
            signal.len(),
            signal.sample_rate(),
            signal.duration_secs()
        );

        let thresholds = self.calibrator.calibrate(signal.samples())?;

        let spectrum = self.spectral.spectrum(signal)?;
        let bandwidth = AnalysisError::into_undefined(spectrum.bandwidth())?;
        let snr_db = AnalysisError::into_undefined(
            SignalToNoiseEstimator::new(thresholds.noise_floor).estimate(signal.samples()),
        )?;
        let classification = self.classifier.classify_series(&spectrum, bandwidth, snr_db);

        let ScanOutcome { windows, cancelled } = self.scanner.scan_with_cancel(signal, cancel)?;
        let eligible_windows = windows.iter().filter(|w| w.is_eligible()).count();

        tracing::info!(
            "[SeriesAnalyzer] dominant={:.4} Hz band=\"{}\" windows={} eligible={} in {:?}",
            classification.dominant_frequency,
            classification.band,
            windows.len(),
            eligible_windows,
            started.elapsed()
        );

        Ok(SeriesReport {
            sample_count: signal.len(),
            sample_rate: signal.sample_rate(),
            thresholds,
            classification,
            windows,
            eligible_windows,
            cancelled,
        })
    }

    /// Analyze independent series, isolating failures per series
    ///
    /// A failing series (including `ResourceExhausted`) is reported in its
    /// own slot and never stops the remaining series.
    pub fn analyze_batch(&self, signals: &[Signal]) -> Vec<Result<SeriesReport, AnalysisError>> {
        signals
            .iter()
            .enumerate()
            .map(|(i, signal)| {
                self.analyze(signal).inspect_err(|err| {
                    log_analysis_error(err, &format!("series {}", i));
                })
            })
            .collect()
    }
}
