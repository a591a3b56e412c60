// Signal and Window - immutable sample series and owned analysis windows
//
// A Signal is the core input boundary: an already-materialized sample
// sequence plus its sampling rate. Windows are copied out of the Signal so
// per-window analysis never aliases the parent storage and can run on any
// thread.

use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;

/// Ordered amplitude samples with their sampling rate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    samples: Vec<f64>,
    sample_rate: f64,
}

impl Signal {
    /// Create a signal from raw samples
    ///
    /// # Errors
    /// `InvalidInput` if `samples` is empty, holds a NaN or infinite value,
    /// or `sample_rate` is not a finite positive number.
    pub fn new(samples: Vec<f64>, sample_rate: f64) -> Result<Self, AnalysisError> {
        if samples.is_empty() {
            return Err(AnalysisError::invalid_input(
                "signal",
                "sample sequence is empty",
            ));
        }
        if let Some(position) = samples.iter().position(|s| !s.is_finite()) {
            return Err(AnalysisError::invalid_input(
                "signal",
                format!(
                    "sample {} is not finite ({})",
                    position, samples[position]
                ),
            ));
        }
        if !(sample_rate.is_finite() && sample_rate > 0.0) {
            return Err(AnalysisError::invalid_input(
                "signal",
                format!("sampling rate {} must be finite and > 0", sample_rate),
            ));
        }

        Ok(Self {
            samples,
            sample_rate,
        })
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// Sampling rate in Hz
    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always false; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Duration covered by the series in seconds
    pub fn duration_secs(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate
    }

    /// Number of windows of `window_size` needed to cover the series
    pub fn window_count(&self, window_size: usize) -> usize {
        if window_size == 0 {
            0
        } else {
            self.samples.len().div_ceil(window_size)
        }
    }

    /// Sample ranges `[start, end)` of each window, in series order
    pub fn window_bounds(
        &self,
        window_size: usize,
    ) -> Result<Vec<(usize, usize)>, AnalysisError> {
        if window_size == 0 {
            return Err(AnalysisError::invalid_input(
                "window",
                "window size must be > 0",
            ));
        }

        let len = self.samples.len();
        let mut bounds = Vec::with_capacity(self.window_count(window_size));
        bounds.extend(
            (0..len)
                .step_by(window_size)
                .map(|start| (start, (start + window_size).min(len))),
        );
        Ok(bounds)
    }

    /// Copy the samples `[start, end)` into an owned window
    ///
    /// # Errors
    /// * `InvalidInput` if the range is empty or out of bounds
    /// * `ResourceExhausted` if the copy cannot be allocated
    pub fn window(&self, index: usize, start: usize, end: usize) -> Result<Window, AnalysisError> {
        if start >= end || end > self.samples.len() {
            return Err(AnalysisError::invalid_input(
                "window",
                format!(
                    "range [{}, {}) invalid for {} samples",
                    start,
                    end,
                    self.samples.len()
                ),
            ));
        }

        let source = &self.samples[start..end];
        let mut samples = Vec::new();
        samples
            .try_reserve_exact(source.len())
            .map_err(|_| AnalysisError::exhausted("window copy", source.len()))?;
        samples.extend_from_slice(source);

        Ok(Window {
            index,
            start,
            samples,
        })
    }
}

/// Contiguous owned slice of a Signal
#[derive(Debug, Clone, PartialEq)]
pub struct Window {
    index: usize,
    start: usize,
    samples: Vec<f64>,
}

impl Window {
    /// Ordinal position of the window within its series
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn start(&self) -> usize {
        self.start
    }

    /// Exclusive end offset in the parent series
    pub fn end(&self) -> usize {
        self.start + self.samples.len()
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signal_rejects_empty_samples() {
        let result = Signal::new(Vec::new(), 1000.0);
        assert!(matches!(result, Err(AnalysisError::InvalidInput { .. })));
    }

    #[test]
    fn test_signal_rejects_non_finite_samples() {
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let result = Signal::new(vec![1.0, bad, 2.0], 1000.0);
            assert!(matches!(result, Err(AnalysisError::InvalidInput { .. })));
        }
    }

    #[test]
    fn test_signal_rejects_bad_sample_rate() {
        assert!(Signal::new(vec![1.0], 0.0).is_err());
        assert!(Signal::new(vec![1.0], -5.0).is_err());
        assert!(Signal::new(vec![1.0], f64::NAN).is_err());
    }

    #[test]
    fn test_window_bounds_cover_series_with_short_tail() {
        let signal = Signal::new(vec![0.0; 2500], 1000.0).unwrap();
        let bounds = signal.window_bounds(1024).unwrap();
        assert_eq!(bounds, vec![(0, 1024), (1024, 2048), (2048, 2500)]);
        assert_eq!(signal.window_count(1024), 3);
    }

    #[test]
    fn test_window_bounds_rejects_zero_size() {
        let signal = Signal::new(vec![0.0; 10], 1000.0).unwrap();
        assert!(signal.window_bounds(0).is_err());
        assert_eq!(signal.window_count(0), 0);
    }

    #[test]
    fn test_window_is_an_owned_copy() {
        let signal = Signal::new((0..10).map(f64::from).collect(), 100.0).unwrap();
        let window = signal.window(1, 4, 8).unwrap();
        assert_eq!(window.samples(), &[4.0, 5.0, 6.0, 7.0]);
        assert_eq!(window.index(), 1);
        assert_eq!(window.start(), 4);
        assert_eq!(window.end(), 8);
        assert_ne!(window.samples().as_ptr(), signal.samples()[4..].as_ptr());
    }

    #[test]
    fn test_window_rejects_out_of_range() {
        let signal = Signal::new(vec![0.0; 10], 100.0).unwrap();
        assert!(signal.window(0, 5, 5).is_err());
        assert!(signal.window(0, 8, 11).is_err());
    }

    #[test]
    fn test_duration() {
        let signal = Signal::new(vec![0.0; 2000], 1000.0).unwrap();
        assert_eq!(signal.duration_secs(), 2.0);
    }
}
