// Error types for the seismic screening pipeline
//
// This module defines the error taxonomy shared by every analysis stage,
// with numeric error codes so reports and exit paths can classify failures
// without string matching.

mod analysis;

pub use analysis::{log_analysis_error, AnalysisError, AnalysisErrorCodes, MetricKind};

/// Error codes for structured error reporting
///
/// This trait provides a standard way to get error codes and messages
/// from custom error types, enabling consistent error handling across
/// the library and CLI boundary.
pub trait ErrorCode {
    /// Get the numeric error code
    fn code(&self) -> i32;

    /// Get the human-readable error message
    fn message(&self) -> String;
}
