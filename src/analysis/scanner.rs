// WindowScanner - per-window feature extraction and smoothing
//
// Partitions a Signal into fixed-size windows and analyzes each one
// independently: features, smoothed samples and the eligibility decision.
// Windows share nothing but read-only inputs, so the work fans out across
// threads and is gathered back in series order.

use std::sync::atomic::{AtomicBool, Ordering};

#[cfg(feature = "parallel")]
use rayon::iter::ParallelIterator;
use serde::{Deserialize, Serialize};

use crate::analysis::classifier::EventClassifier;
use crate::analysis::features::{FeatureExtractor, FeatureSet};
use crate::analysis::smoother::ScalarSmoother;
use crate::config::{ScanConfig, SmootherConfig};
use crate::error::{AnalysisError, ErrorCode};
use crate::iter_maybe_parallel;
use crate::parallel::available_workers;
use crate::signal::{Signal, Window};

/// Diagnostics of one successfully analyzed window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowDiagnostics {
    pub features: FeatureSet,
    /// Smoother output, one value per window sample
    pub smoothed: Vec<f64>,
    /// Window is apt for deeper study
    pub eligible: bool,
}

/// Outcome of a single window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowStatus {
    Analyzed(WindowDiagnostics),
    Failed(AnalysisError),
}

/// Report for one window of the series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowReport {
    pub index: usize,
    pub start: usize,
    pub end: usize,
    pub status: WindowStatus,
}

impl WindowReport {
    pub fn diagnostics(&self) -> Option<&WindowDiagnostics> {
        match &self.status {
            WindowStatus::Analyzed(diagnostics) => Some(diagnostics),
            WindowStatus::Failed(_) => None,
        }
    }

    pub fn error(&self) -> Option<&AnalysisError> {
        match &self.status {
            WindowStatus::Analyzed(_) => None,
            WindowStatus::Failed(err) => Some(err),
        }
    }

    pub fn is_eligible(&self) -> bool {
        self.diagnostics().is_some_and(|d| d.eligible)
    }
}

/// Ordered window reports of one scan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanOutcome {
    pub windows: Vec<WindowReport>,
    /// Scan stopped early; windows not yet started were skipped
    pub cancelled: bool,
}

/// WindowScanner orchestrates per-window analysis
#[derive(Debug, Clone, Copy)]
pub struct WindowScanner {
    window_size: usize,
    extractor: FeatureExtractor,
    smoother: ScalarSmoother,
    classifier: EventClassifier,
}

impl WindowScanner {
    pub fn new(
        scan: &ScanConfig,
        smoother: SmootherConfig,
        classifier: EventClassifier,
    ) -> Result<Self, AnalysisError> {
        if scan.window_size == 0 {
            return Err(AnalysisError::invalid_input(
                "window_scanner",
                "window_size must be > 0",
            ));
        }

        Ok(Self {
            window_size: scan.window_size,
            extractor: FeatureExtractor::new(scan.max_lag)?,
            smoother: ScalarSmoother::new(smoother)?,
            classifier,
        })
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// Analyze one window in isolation
    ///
    /// The smoother starts from a fresh state for every window; the trailing
    /// estimate of the previous window is not carried over.
    pub fn analyze_window(&self, window: &Window) -> Result<WindowDiagnostics, AnalysisError> {
        let features = self.extractor.extract(window.samples())?;
        let smoothed = self.smoother.smooth(window.samples());
        let eligible = self.classifier.is_window_eligible(&features);

        Ok(WindowDiagnostics {
            features,
            smoothed,
            eligible,
        })
    }

    /// Scan every window of a signal
    pub fn scan(&self, signal: &Signal) -> Result<ScanOutcome, AnalysisError> {
        self.scan_with_cancel(signal, &AtomicBool::new(false))
    }

    /// Scan with cooperative cancellation checked before each window
    ///
    /// Windows already running when `cancel` is raised finish normally, so
    /// every reported window is identical to an uncancelled scan.
    ///
    /// # Errors
    /// Only series-level failures; a failing window is reported in its own
    /// `WindowStatus::Failed` and the scan continues.
    pub fn scan_with_cancel(
        &self,
        signal: &Signal,
        cancel: &AtomicBool,
    ) -> Result<ScanOutcome, AnalysisError> {
        let bounds: Vec<(usize, (usize, usize))> = signal
            .window_bounds(self.window_size)?
            .into_iter()
            .enumerate()
            .collect();
        let total = bounds.len();
        tracing::debug!(
            "[WindowScanner] Scanning {} windows of {} samples on {} workers",
            total,
            self.window_size,
            available_workers()
        );

        let reports: Vec<Option<WindowReport>> = iter_maybe_parallel!(bounds)
            .map(|(index, (start, end))| {
                if cancel.load(Ordering::Relaxed) {
                    return None;
                }
                Some(self.scan_window(signal, index, start, end))
            })
            .collect();

        let cancelled = reports.iter().any(Option::is_none);
        let windows: Vec<WindowReport> = reports.into_iter().flatten().collect();

        if cancelled {
            tracing::info!(
                "[WindowScanner] Cancelled after {} of {} windows",
                windows.len(),
                total
            );
        }

        Ok(ScanOutcome { windows, cancelled })
    }

    fn scan_window(&self, signal: &Signal, index: usize, start: usize, end: usize) -> WindowReport {
        let status = match signal
            .window(index, start, end)
            .and_then(|window| self.analyze_window(&window))
        {
            Ok(diagnostics) => WindowStatus::Analyzed(diagnostics),
            Err(err) => {
                tracing::warn!(
                    "[WindowScanner] Window {} [{}, {}) failed: code={} {}",
                    index,
                    start,
                    end,
                    err.code(),
                    err.message()
                );
                WindowStatus::Failed(err)
            }
        };

        WindowReport {
            index,
            start,
            end,
            status,
        }
    }
}
