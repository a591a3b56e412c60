// Single-pole low-pass pre-filter
//
// y[0] = x[0]
// y[i] = α·x[i] + (1 − α)·y[i−1],  α = cutoff / (cutoff + 1)

/// Smooth a raw series before analysis
///
/// `cutoff` is a dimensionless smoothing control, not a frequency in Hz:
/// smaller values smooth harder.
pub fn lowpass(samples: &[f64], cutoff: f64) -> Vec<f64> {
    let alpha = cutoff / (cutoff + 1.0);

    let mut output = Vec::with_capacity(samples.len());
    let mut previous = match samples.first() {
        Some(&first) => first,
        None => return output,
    };
    output.push(previous);

    for &sample in &samples[1..] {
        previous = alpha * sample + (1.0 - alpha) * previous;
        output.push(previous);
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_sample_passes_through() {
        assert_eq!(lowpass(&[3.0, 0.0], 0.1)[0], 3.0);
    }

    #[test]
    fn test_empty_input() {
        assert!(lowpass(&[], 0.1).is_empty());
    }

    #[test]
    fn test_constant_input_is_unchanged() {
        assert_eq!(lowpass(&[2.0; 5], 0.1), vec![2.0; 5]);
    }

    #[test]
    fn test_step_response_rises_monotonically() {
        let mut step = vec![0.0];
        step.extend(std::iter::repeat(1.0).take(50));
        let out = lowpass(&step, 0.1);
        assert!(out.windows(2).all(|w| w[1] >= w[0]));
        assert!(out[50] < 1.0 && out[50] > 0.9);
    }
}
