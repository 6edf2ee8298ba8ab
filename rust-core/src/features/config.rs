//! Analyzer configuration

use super::pitch::PeakInterpolation;
use crate::error::{AnalyzerError, Result};

/// Reference voltage used for decibel conversion unless overridden
pub const DEFAULT_REFERENCE_VOLTAGE: f32 = 0.1;

/// Lowest loudness reported, in dB; silence maps here instead of -inf
pub const DEFAULT_DB_FLOOR: f32 = -120.0;

/// Spectral analyzer configuration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnalyzerConfig {
    /// Sample rate in Hz
    pub sample_rate: f64,

    /// Number of samples in the time buffer and bins in the spectrum
    /// (conventionally a power of 2)
    pub frame_size: usize,

    /// Reference level for RMS to dB conversion
    pub reference_voltage: f32,

    /// Loudness floor in dB
    pub db_floor: f32,

    /// Peak refinement used by pitch detection
    pub interpolation: PeakInterpolation,
}

impl AnalyzerConfig {
    /// Create a configuration from the two required values
    ///
    /// # Arguments
    /// * `sample_rate` - Sample rate in Hz
    /// * `frame_size` - Buffer length shared by time samples and spectrum
    pub fn new(sample_rate: f64, frame_size: usize) -> Self {
        Self {
            sample_rate,
            frame_size,
            reference_voltage: DEFAULT_REFERENCE_VOLTAGE,
            db_floor: DEFAULT_DB_FLOOR,
            interpolation: PeakInterpolation::default(),
        }
    }

    pub fn with_reference_voltage(mut self, reference_voltage: f32) -> Self {
        self.reference_voltage = reference_voltage;
        self
    }

    pub fn with_db_floor(mut self, db_floor: f32) -> Self {
        self.db_floor = db_floor;
        self
    }

    pub fn with_interpolation(mut self, interpolation: PeakInterpolation) -> Self {
        self.interpolation = interpolation;
        self
    }

    /// Check every field, returning `InvalidConfiguration` on the first bad one
    pub fn validate(&self) -> Result<()> {
        if !self.sample_rate.is_finite() || self.sample_rate <= 0.0 {
            return Err(AnalyzerError::InvalidConfiguration(format!(
                "sample rate must be a positive number of Hz (got {})",
                self.sample_rate
            )));
        }

        if self.frame_size == 0 {
            return Err(AnalyzerError::InvalidConfiguration(
                "frame size must be non-zero".to_string(),
            ));
        }

        if !self.reference_voltage.is_finite() || self.reference_voltage <= 0.0 {
            return Err(AnalyzerError::InvalidConfiguration(format!(
                "reference voltage must be positive (got {})",
                self.reference_voltage
            )));
        }

        if !self.db_floor.is_finite() {
            return Err(AnalyzerError::InvalidConfiguration(format!(
                "dB floor must be finite (got {})",
                self.db_floor
            )));
        }

        Ok(())
    }

    /// Nyquist frequency in Hz
    pub fn max_frequency_hz(&self) -> f64 {
        self.sample_rate / 2.0
    }

    /// Width of one spectrum bin in Hz
    pub fn hz_per_bin(&self) -> f64 {
        self.max_frequency_hz() / self.frame_size as f64
    }
}
