// Spectrum module - frequency-domain view of a whole series
//
// The SpectralAnalyzer runs one real-input forward transform per series and
// packages the result as a Spectrum: bin frequencies plus magnitudes, with
// the length always derived from the source sample count. Dominant
// frequency, bandwidth and the strong-noise mean are all read from it.
//
// References:
// - Peeters, G. (2004). A large set of audio features for sound description

mod fft;

pub use fft::{bin_count, FftProcessor};
pub use rustfft::num_complex::Complex;

use serde::Serialize;

use crate::error::{AnalysisError, MetricKind};
use crate::signal::Signal;

/// Total power below which a spectrum is treated as empty
pub const NEGLIGIBLE_POWER: f64 = 1e-10;

/// Elementwise magnitude of complex bins
pub fn real_spectrum(bins: &[Complex<f64>]) -> Vec<f64> {
    bins.iter().map(|c| c.norm()).collect()
}

/// Index of the largest magnitude; ties resolve to the lowest index
fn argmax(magnitudes: &[f64]) -> usize {
    let mut best_index = 0;
    let mut best = 0.0;
    for (i, &mag) in magnitudes.iter().enumerate() {
        if mag > best {
            best = mag;
            best_index = i;
        }
    }
    best_index
}

/// Power-weighted spread of frequency around the spectral centroid
///
/// Formula:
/// f_c = Σ(f_i × P_i) / ΣP_i
/// bandwidth = sqrt(Σ P_i × (f_i − f_c)² / ΣP_i)
///
/// # Errors
/// * `InvalidInput` if the slices are empty or differ in length
/// * `UndefinedMetric` if ΣP_i is below [`NEGLIGIBLE_POWER`] or not finite
pub fn bandwidth(power: &[f64], frequencies: &[f64]) -> Result<f64, AnalysisError> {
    if power.is_empty() || power.len() != frequencies.len() {
        return Err(AnalysisError::invalid_input(
            "bandwidth",
            format!(
                "{} power values for {} frequencies",
                power.len(),
                frequencies.len()
            ),
        ));
    }

    let total: f64 = power.iter().sum();
    if !total.is_finite() {
        return Err(AnalysisError::undefined(
            MetricKind::Bandwidth,
            format!("total spectral power {} is not finite", total),
        ));
    }
    if total < NEGLIGIBLE_POWER {
        return Err(AnalysisError::undefined(
            MetricKind::Bandwidth,
            format!("total spectral power {:e} is negligible", total),
        ));
    }

    let centroid = power
        .iter()
        .zip(frequencies)
        .map(|(p, f)| p * f)
        .sum::<f64>()
        / total;

    let spread = power
        .iter()
        .zip(frequencies)
        .map(|(p, f)| p * (f - centroid) * (f - centroid))
        .sum::<f64>();

    Ok((spread / total).sqrt())
}

/// Magnitude spectrum of a sample sequence
///
/// Only built through [`Spectrum::from_bins`], so the bin count always
/// matches the source length.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Spectrum {
    source_len: usize,
    sample_rate: f64,
    frequencies: Vec<f64>,
    magnitudes: Vec<f64>,
}

impl Spectrum {
    /// Build a spectrum from the half-spectrum bins of an `source_len`-sample
    /// transform
    pub fn from_bins(
        bins: &[Complex<f64>],
        source_len: usize,
        sample_rate: f64,
    ) -> Result<Self, AnalysisError> {
        if source_len == 0 || bins.len() != bin_count(source_len) {
            return Err(AnalysisError::invalid_input(
                "spectrum",
                format!(
                    "{} bins do not match a {}-sample transform",
                    bins.len(),
                    source_len
                ),
            ));
        }

        let bin_width = sample_rate / source_len as f64;
        let frequencies = (0..bins.len()).map(|i| i as f64 * bin_width).collect();

        Ok(Self {
            source_len,
            sample_rate,
            frequencies,
            magnitudes: real_spectrum(bins),
        })
    }

    /// Number of bins (`⌊N/2⌋ + 1`)
    pub fn len(&self) -> usize {
        self.magnitudes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.magnitudes.is_empty()
    }

    /// Sample count of the transformed sequence
    pub fn source_len(&self) -> usize {
        self.source_len
    }

    /// Frequency spacing between bins (Hz)
    pub fn bin_width(&self) -> f64 {
        self.sample_rate / self.source_len as f64
    }

    pub fn frequencies(&self) -> &[f64] {
        &self.frequencies
    }

    pub fn magnitudes(&self) -> &[f64] {
        &self.magnitudes
    }

    /// (frequency, magnitude) pairs in bin order
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.frequencies
            .iter()
            .copied()
            .zip(self.magnitudes.iter().copied())
    }

    /// Index of the strongest bin
    pub fn dominant_bin(&self) -> usize {
        argmax(&self.magnitudes)
    }

    /// Frequency of the strongest bin (Hz)
    pub fn dominant_frequency(&self) -> f64 {
        self.dominant_bin() as f64 * self.bin_width()
    }

    /// Spectral bandwidth using magnitudes as bin power
    pub fn bandwidth(&self) -> Result<f64, AnalysisError> {
        bandwidth(&self.magnitudes, &self.frequencies)
    }

    /// Mean bin magnitude
    pub fn mean_magnitude(&self) -> f64 {
        self.magnitudes.iter().sum::<f64>() / self.magnitudes.len() as f64
    }
}

/// SpectralAnalyzer computes whole-series spectra
#[derive(Default)]
pub struct SpectralAnalyzer {
    fft: FftProcessor,
}

impl SpectralAnalyzer {
    pub fn new() -> Self {
        Self {
            fft: FftProcessor::new(),
        }
    }

    /// Magnitude spectrum of a signal
    pub fn spectrum(&self, signal: &Signal) -> Result<Spectrum, AnalysisError> {
        let bins = self.fft.forward(signal.samples())?;
        Spectrum::from_bins(&bins, signal.len(), signal.sample_rate())
    }

    /// Frequency of the maximum-magnitude bin (Hz)
    ///
    /// `argmax(|X_k|) · sampling_rate / N`; ties resolve to the lowest bin.
    pub fn dominant_frequency(&self, signal: &Signal) -> Result<f64, AnalysisError> {
        Ok(self.spectrum(signal)?.dominant_frequency())
    }
}
