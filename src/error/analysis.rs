// Analysis error types and constants

use crate::error::ErrorCode;
use log::error;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Analysis error code constants
///
/// Error code range: 3001-3003
pub struct AnalysisErrorCodes {}

impl AnalysisErrorCodes {
    /// Empty or too-short input for the requested operation
    pub const INVALID_INPUT: i32 = 3001;

    /// Metric is mathematically undefined for the given input
    pub const UNDEFINED_METRIC: i32 = 3002;

    /// An intermediate buffer could not be allocated
    pub const RESOURCE_EXHAUSTED: i32 = 3003;
}

/// Metrics that may be undefined for a particular input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    /// Shannon entropy of normalized absolute amplitudes
    Entropy,
    /// Power-weighted spectral bandwidth
    Bandwidth,
    /// Signal-to-noise ratio in dB
    Snr,
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MetricKind::Entropy => "entropy",
            MetricKind::Bandwidth => "bandwidth",
            MetricKind::Snr => "snr",
        };
        f.write_str(name)
    }
}

/// Log an analysis error with structured context
///
/// The logging is non-blocking and will not panic on failure.
pub fn log_analysis_error(err: &AnalysisError, context: &str) {
    error!(
        "Analysis error in {}: code={}, component=SeriesAnalyzer, message={}",
        context,
        err.code(),
        err.message()
    );
}

/// Analysis-related errors
///
/// `UndefinedMetric` is not a numeric zero: callers that can tolerate an
/// undefined metric convert it into an explicit `None` with
/// [`AnalysisError::into_undefined`] instead of substituting NaN or 0.
///
/// Error code ranges: 3001-3003
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnalysisError {
    /// Sample sequence is empty or too short for the operation
    InvalidInput {
        operation: String,
        reason: String,
    },

    /// Metric has no defined value for this input
    UndefinedMetric { metric: MetricKind, reason: String },

    /// Allocation of an intermediate buffer failed
    ResourceExhausted { operation: String, requested: usize },
}

impl AnalysisError {
    pub(crate) fn invalid_input(operation: &str, reason: impl Into<String>) -> Self {
        AnalysisError::InvalidInput {
            operation: operation.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn undefined(metric: MetricKind, reason: impl Into<String>) -> Self {
        AnalysisError::UndefinedMetric {
            metric,
            reason: reason.into(),
        }
    }

    pub(crate) fn exhausted(operation: &str, requested: usize) -> Self {
        AnalysisError::ResourceExhausted {
            operation: operation.to_string(),
            requested,
        }
    }

    /// Whether this error marks an undefined metric
    pub fn is_undefined_metric(&self) -> bool {
        matches!(self, AnalysisError::UndefinedMetric { .. })
    }

    /// Collapse a metric result into an explicit undefined marker
    ///
    /// `UndefinedMetric` becomes `Ok(None)`; every other error is propagated.
    pub fn into_undefined(result: Result<f64, AnalysisError>) -> Result<Option<f64>, AnalysisError> {
        match result {
            Ok(value) => Ok(Some(value)),
            Err(AnalysisError::UndefinedMetric { metric, reason }) => {
                log::debug!("{} undefined: {}", metric, reason);
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }
}

impl ErrorCode for AnalysisError {
    fn code(&self) -> i32 {
        match self {
            AnalysisError::InvalidInput { .. } => AnalysisErrorCodes::INVALID_INPUT,
            AnalysisError::UndefinedMetric { .. } => AnalysisErrorCodes::UNDEFINED_METRIC,
            AnalysisError::ResourceExhausted { .. } => AnalysisErrorCodes::RESOURCE_EXHAUSTED,
        }
    }

    fn message(&self) -> String {
        match self {
            AnalysisError::InvalidInput { operation, reason } => {
                format!("Invalid input for {}: {}", operation, reason)
            }
            AnalysisError::UndefinedMetric { metric, reason } => {
                format!("Undefined {}: {}", metric, reason)
            }
            AnalysisError::ResourceExhausted {
                operation,
                requested,
            } => {
                format!(
                    "Failed to allocate {} elements for {}",
                    requested, operation
                )
            }
        }
    }
}

impl fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AnalysisError (code {}): {}", self.code(), self.message())
    }
}

impl std::error::Error for AnalysisError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analysis_error_codes() {
        assert_eq!(
            AnalysisError::invalid_input("entropy", "empty").code(),
            AnalysisErrorCodes::INVALID_INPUT
        );
        assert_eq!(
            AnalysisError::undefined(MetricKind::Snr, "no noise").code(),
            AnalysisErrorCodes::UNDEFINED_METRIC
        );
        assert_eq!(
            AnalysisError::exhausted("fft", 4096).code(),
            AnalysisErrorCodes::RESOURCE_EXHAUSTED
        );
    }

    #[test]
    fn test_analysis_error_messages() {
        let err = AnalysisError::invalid_input("kurtosis", "window is empty");
        assert_eq!(err.message(), "Invalid input for kurtosis: window is empty");

        let err = AnalysisError::undefined(MetricKind::Bandwidth, "negligible power");
        assert_eq!(err.message(), "Undefined bandwidth: negligible power");

        let err = AnalysisError::exhausted("window copy", 1024);
        assert!(err.message().contains("1024"));
    }

    #[test]
    fn test_analysis_error_display() {
        let err = AnalysisError::undefined(MetricKind::Entropy, "all zero");
        let display = format!("{}", err);
        assert!(display.contains("AnalysisError"));
        assert!(display.contains(&err.code().to_string()));
    }

    #[test]
    fn test_into_undefined_only_swallows_undefined_metric() {
        assert_eq!(AnalysisError::into_undefined(Ok(1.5)), Ok(Some(1.5)));
        assert_eq!(
            AnalysisError::into_undefined(Err(AnalysisError::undefined(
                MetricKind::Snr,
                "empty partition"
            ))),
            Ok(None)
        );

        let invalid = AnalysisError::invalid_input("snr", "empty");
        assert_eq!(
            AnalysisError::into_undefined(Err(invalid.clone())),
            Err(invalid)
        );
    }

    #[test]
    fn test_error_serializes_with_kind_tag() {
        let err = AnalysisError::undefined(MetricKind::Entropy, "all zero");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["kind"], "undefined_metric");
        assert_eq!(json["metric"], "entropy");
    }
}
