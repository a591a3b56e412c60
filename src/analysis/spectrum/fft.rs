// FFT module - real-input forward transform
//
// Wraps rustfft so callers hand in real samples and get back the
// non-redundant half of the spectrum. Working buffers are plain Vecs owned
// by the call, reserved fallibly so an oversized series surfaces as
// ResourceExhausted instead of aborting the process.

use rustfft::{num_complex::Complex, FftPlanner};
use std::sync::{Mutex, PoisonError};

use crate::error::AnalysisError;

/// Number of non-redundant bins for an `n`-sample real transform
pub fn bin_count(n: usize) -> usize {
    n / 2 + 1
}

/// FFT processor that turns real sample sequences into complex half-spectra
pub struct FftProcessor {
    planner: Mutex<FftPlanner<f64>>,
}

impl FftProcessor {
    pub fn new() -> Self {
        Self {
            planner: Mutex::new(FftPlanner::new()),
        }
    }

    /// Forward transform of a real sequence of any length
    ///
    /// # Returns
    /// `⌊N/2⌋ + 1` complex bins, DC first
    ///
    /// # Errors
    /// * `InvalidInput` for an empty input
    /// * `ResourceExhausted` if the working buffer cannot be allocated
    pub fn forward(&self, samples: &[f64]) -> Result<Vec<Complex<f64>>, AnalysisError> {
        let n = samples.len();
        if n == 0 {
            return Err(AnalysisError::invalid_input("fft", "input is empty"));
        }

        let mut buffer: Vec<Complex<f64>> = Vec::new();
        buffer
            .try_reserve_exact(n)
            .map_err(|_| AnalysisError::exhausted("fft buffer", n))?;
        buffer.extend(samples.iter().map(|&s| Complex::new(s, 0.0)));

        let fft = {
            // Planning never leaves the planner half-updated, so a poisoned
            // lock is still usable.
            let mut planner = self.planner.lock().unwrap_or_else(PoisonError::into_inner);
            planner.plan_fft_forward(n)
        };
        fft.process(&mut buffer);

        buffer.truncate(bin_count(n));
        buffer.shrink_to_fit();
        Ok(buffer)
    }
}

impl Default for FftProcessor {
    fn default() -> Self {
        Self::new()
    }
}
