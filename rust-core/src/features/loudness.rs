//! Loudness estimation
//!
//! Time-domain RMS and its conversion to and from decibels

use crate::error::{AnalyzerError, Result};

/// Root-mean-square of a block of samples
///
/// Accumulates in f64 so long frames of small samples don't lose precision.
/// An all-zero block gives exactly 0.0; so does an empty one.
pub fn rms(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }

    let sum_sq: f64 = samples.iter().map(|&s| (s as f64) * (s as f64)).sum();
    (sum_sq / samples.len() as f64).sqrt() as f32
}

/// Convert an RMS level to decibels relative to `reference_voltage`
///
/// # Arguments
/// * `rms_value` - Linear level, must be finite and >= 0
/// * `reference_voltage` - Reference level, must be > 0 (commonly 0.1)
/// * `floor_db` - Lower bound of the result, must be finite
///
/// # Returns
/// `20 * log10(rms_value / reference_voltage)`, never below `floor_db`.
/// Silence returns `floor_db` rather than negative infinity.
pub fn decibels(rms_value: f32, reference_voltage: f32, floor_db: f32) -> Result<f32> {
    if reference_voltage.is_nan() || reference_voltage <= 0.0 {
        return Err(AnalyzerError::InvalidArgument(format!(
            "reference voltage must be positive (got {})",
            reference_voltage
        )));
    }

    if !floor_db.is_finite() {
        return Err(AnalyzerError::InvalidArgument(format!(
            "dB floor must be finite (got {})",
            floor_db
        )));
    }

    if !rms_value.is_finite() || rms_value < 0.0 {
        return Err(AnalyzerError::InvalidArgument(format!(
            "RMS value must be finite and non-negative (got {})",
            rms_value
        )));
    }

    if rms_value == 0.0 {
        return Ok(floor_db);
    }

    let db = 20.0 * (rms_value as f64 / reference_voltage as f64).log10();
    Ok((db as f32).max(floor_db))
}

/// Inverse of [`decibels`]: `10^(db / 20)`
///
/// Yields the ratio `rms / reference`, so multiplying by the reference
/// recovers the level passed to `decibels`. Saturates at `f32::MAX`, which
/// is reached above roughly 770 dB.
pub fn voltage_ratio(decibel_value: f32) -> f32 {
    10f64
        .powf(decibel_value as f64 / 20.0)
        .min(f32::MAX as f64) as f32
}
