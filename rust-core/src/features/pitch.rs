//! Dominant pitch detection
//!
//! Finds the strongest bin of a magnitude spectrum and refines its position
//! from the neighbouring bins.

/// How the peak bin position is refined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PeakInterpolation {
    /// Both ratios taken from the lower neighbour: `dL = dR = s[k-1] / s[k]`.
    /// The correction term `0.5 * (dR² - dL²)` is therefore always zero and
    /// the raw peak bin is reported.
    #[default]
    LeftNeighbor,

    /// `dL = s[k-1] / s[k]`, `dR = s[k+1] / s[k]`. Shifts the estimate toward
    /// the stronger neighbour.
    TwoSided,
}

/// Index of the strictly largest positive bin
///
/// Ties go to the lowest index. Bins `<= 0` (and NaN) are never selected,
/// so an all-zero spectrum yields `None`.
pub fn peak_bin(spectrum: &[f32]) -> Option<usize> {
    let mut max_value = 0.0f32;
    let mut max_bin = None;

    for (i, &value) in spectrum.iter().enumerate() {
        if value > max_value {
            max_value = value;
            max_bin = Some(i);
        }
    }

    max_bin
}

/// Fractional bin position of the peak
///
/// Interior peaks are refined with `interpolation`; a peak on the first or
/// last bin is returned as is. Silence gives 0.0.
pub fn refined_peak_position(spectrum: &[f32], interpolation: PeakInterpolation) -> f64 {
    let k = match peak_bin(spectrum) {
        Some(k) => k,
        None => return 0.0,
    };

    let mut position = k as f64;

    if k > 0 && k < spectrum.len() - 1 {
        // spectrum[k] > 0 by selection; a zero neighbour is a zero ratio
        let peak = spectrum[k] as f64;
        let d_left = spectrum[k - 1] as f64 / peak;
        let d_right = match interpolation {
            PeakInterpolation::LeftNeighbor => spectrum[k - 1] as f64 / peak,
            PeakInterpolation::TwoSided => spectrum[k + 1] as f64 / peak,
        };

        let shift = 0.5 * (d_right * d_right - d_left * d_left);
        if shift.is_finite() {
            position += shift;
        }
    }

    position
}

/// Dominant frequency in Hz
///
/// # Arguments
/// * `spectrum` - Magnitude spectrum, bin `i` at `i * hz_per_bin`
/// * `hz_per_bin` - Width of one bin in Hz
/// * `interpolation` - Peak refinement mode
///
/// # Returns
/// Refined peak bin times `hz_per_bin`, or 0.0 when no bin is positive
pub fn dominant_frequency(
    spectrum: &[f32],
    hz_per_bin: f64,
    interpolation: PeakInterpolation,
) -> f32 {
    (refined_peak_position(spectrum, interpolation) * hz_per_bin) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    const HZ_PER_BIN: f64 = 22050.0 / 1024.0;

    fn spike(len: usize, bin: usize, value: f32) -> Vec<f32> {
        let mut spectrum = vec![0.0f32; len];
        spectrum[bin] = value;
        spectrum
    }

    #[test]
    fn test_silence_returns_zero() {
        let spectrum = vec![0.0f32; 1024];

        assert_eq!(peak_bin(&spectrum), None);
        assert_eq!(dominant_frequency(&spectrum, HZ_PER_BIN, PeakInterpolation::LeftNeighbor), 0.0);
        assert_eq!(dominant_frequency(&spectrum, HZ_PER_BIN, PeakInterpolation::TwoSided), 0.0);
    }

    #[test]
    fn test_non_positive_bins_ignored() {
        let mut spectrum = vec![-1.0f32; 16];
        spectrum[3] = f32::NAN;
        assert_eq!(peak_bin(&spectrum), None);

        spectrum[7] = 0.25;
        assert_eq!(peak_bin(&spectrum), Some(7));
    }

    #[test]
    fn test_ties_resolve_to_lowest_bin() {
        let mut spectrum = vec![0.0f32; 64];
        spectrum[10] = 0.8;
        spectrum[20] = 0.8;
        spectrum[30] = 0.5;

        assert_eq!(peak_bin(&spectrum), Some(10));
    }

    #[test]
    fn test_single_spike_is_exact() {
        let spectrum = spike(1024, 100, 0.7);
        let freq = dominant_frequency(&spectrum, HZ_PER_BIN, PeakInterpolation::LeftNeighbor);

        assert_eq!(freq, (100.0 * HZ_PER_BIN) as f32);
        assert!((freq - 2153.3203).abs() < 0.01);
    }

    #[test]
    fn test_left_neighbor_correction_vanishes() {
        let mut spectrum = spike(1024, 100, 1.0);
        spectrum[99] = 0.6;
        spectrum[101] = 0.9;

        let position = refined_peak_position(&spectrum, PeakInterpolation::LeftNeighbor);
        assert_eq!(position, 100.0);
    }

    #[test]
    fn test_two_sided_shifts_toward_stronger_neighbor() {
        let mut spectrum = spike(1024, 100, 1.0);
        spectrum[99] = 0.5;
        spectrum[101] = 1.0 - f32::EPSILON;

        let position = refined_peak_position(&spectrum, PeakInterpolation::TwoSided);
        // 0.5 * (~1.0 - 0.25)
        assert!((position - 100.375).abs() < 1e-5);

        spectrum[99] = 0.9;
        spectrum[101] = 0.3;
        let position = refined_peak_position(&spectrum, PeakInterpolation::TwoSided);
        assert!(position < 100.0);
    }

    #[test]
    fn test_boundary_bins_not_interpolated() {
        let mut spectrum = spike(1024, 0, 1.0);
        spectrum[1] = 0.5;
        assert_eq!(refined_peak_position(&spectrum, PeakInterpolation::TwoSided), 0.0);

        let mut spectrum = spike(1024, 1023, 1.0);
        spectrum[1022] = 0.5;
        assert_eq!(refined_peak_position(&spectrum, PeakInterpolation::TwoSided), 1023.0);
        assert_eq!(
            dominant_frequency(&spectrum, HZ_PER_BIN, PeakInterpolation::LeftNeighbor),
            (1023.0 * HZ_PER_BIN) as f32
        );
    }

    #[test]
    fn test_single_bin_spectrum() {
        assert_eq!(refined_peak_position(&[0.4], PeakInterpolation::TwoSided), 0.0);
        assert_eq!(refined_peak_position(&[], PeakInterpolation::TwoSided), 0.0);
    }
}
