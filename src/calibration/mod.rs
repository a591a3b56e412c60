// Calibration module - adaptive threshold derivation
//
// The calibrator turns a series' empirical extrema into amplitude and
// amplitude-rate thresholds plus the noise floor used for SNR. Thresholds
// are recomputed for every series; nothing persists between invocations.

pub mod thresholds;

pub use thresholds::{CalibratedThresholds, ThresholdCalibrator};
