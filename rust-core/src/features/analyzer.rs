//! High-level spectral feature analyzer
//!
//! Combines loudness, pitch and band extraction over one analysis frame.
//! The analyzer never computes a spectrum itself: the caller supplies the
//! time samples and the matching magnitude spectrum every frame.

use super::bands::{Band, BandLayout, BAND_COUNT};
use super::config::AnalyzerConfig;
use super::loudness;
use super::pitch;
use crate::error::{check_len, AnalyzerError, Result};

/// Features extracted from one frame
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FeatureResult {
    /// RMS of the time samples (linear)
    pub loudness_rms: f32,

    /// RMS in dB relative to the configured reference, floored
    pub loudness_db: f32,

    /// Interpolated peak frequency in Hz (0 for silence)
    pub dominant_frequency_hz: f32,

    /// Mean magnitude per band, sub-bass first
    pub band_energies: [f32; BAND_COUNT],
}

impl FeatureResult {
    /// Energy of a single band
    pub fn band(&self, band: Band) -> f32 {
        self.band_energies[band.index()]
    }
}

/// Real-time spectral feature analyzer
///
/// Immutable after construction; every method takes `&self`, so one
/// analyzer can be shared across threads as long as each call gets its
/// own buffers.
#[derive(Debug, Clone)]
pub struct SpectralAnalyzer {
    config: AnalyzerConfig,
    hz_per_bin: f64,
    layout: BandLayout,
}

impl SpectralAnalyzer {
    /// Create new analyzer
    ///
    /// # Errors
    /// `InvalidConfiguration` if the sample rate is not positive or the
    /// frame size is zero
    pub fn new(config: AnalyzerConfig) -> Result<Self> {
        config.validate()?;

        let hz_per_bin = config.hz_per_bin();
        let layout = BandLayout::new(hz_per_bin, config.frame_size);

        log::debug!(
            "Spectral analyzer: {} Hz, {} bins, {:.3} Hz/bin, band cutoffs {:?}",
            config.sample_rate,
            config.frame_size,
            hz_per_bin,
            layout.cutoffs()
        );
        if layout.is_clamped() {
            log::warn!(
                "Band layout exceeds the spectrum at {} Hz / {} bins; \
                 upper bands clamped to bin {}",
                config.sample_rate,
                config.frame_size,
                layout.last_bin()
            );
        }

        Ok(Self {
            config,
            hz_per_bin,
            layout,
        })
    }

    /// Shorthand for `new(AnalyzerConfig::new(sample_rate, frame_size))`
    pub fn with_sample_rate(sample_rate: f64, frame_size: usize) -> Result<Self> {
        Self::new(AnalyzerConfig::new(sample_rate, frame_size))
    }

    /// Extract every feature from one frame
    ///
    /// Both buffers are length-checked before anything is computed.
    ///
    /// # Errors
    /// * `BufferSizeMismatch` if either buffer is not `frame_size` long
    /// * `InvalidArgument` if the time buffer holds a NaN or infinite sample
    pub fn analyze(&self, time_samples: &[f32], spectrum: &[f32]) -> Result<FeatureResult> {
        check_len("time", time_samples.len(), self.config.frame_size)?;
        check_len("spectrum", spectrum.len(), self.config.frame_size)?;

        let loudness_rms = checked_rms(time_samples)?;
        let loudness_db = loudness::decibels(
            loudness_rms,
            self.config.reference_voltage,
            self.config.db_floor,
        )?;

        Ok(FeatureResult {
            loudness_rms,
            loudness_db,
            dominant_frequency_hz: pitch::dominant_frequency(
                spectrum,
                self.hz_per_bin,
                self.config.interpolation,
            ),
            band_energies: self.layout.averages(spectrum),
        })
    }

    /// RMS of one frame of time samples
    ///
    /// Fails like [`Self::analyze`] on a wrong length or non-finite samples.
    pub fn rms(&self, time_samples: &[f32]) -> Result<f32> {
        check_len("time", time_samples.len(), self.config.frame_size)?;
        checked_rms(time_samples)
    }

    /// Decibels relative to `reference_voltage`, floored at the configured floor
    pub fn decibels(&self, rms_value: f32, reference_voltage: f32) -> Result<f32> {
        loudness::decibels(rms_value, reference_voltage, self.config.db_floor)
    }

    /// Decibels relative to the configured reference voltage
    ///
    /// Matches `loudness_db` from [`Self::analyze`] for the same RMS.
    pub fn loudness_db(&self, rms_value: f32) -> Result<f32> {
        self.decibels(rms_value, self.config.reference_voltage)
    }

    /// Inverse of [`Self::decibels`]
    pub fn voltage_ratio(&self, decibel_value: f32) -> f32 {
        loudness::voltage_ratio(decibel_value)
    }

    /// Dominant frequency in Hz of one spectrum frame
    pub fn dominant_frequency(&self, spectrum: &[f32]) -> Result<f32> {
        check_len("spectrum", spectrum.len(), self.config.frame_size)?;
        Ok(pitch::dominant_frequency(
            spectrum,
            self.hz_per_bin,
            self.config.interpolation,
        ))
    }

    /// Mean magnitude of each band of one spectrum frame
    pub fn band_energies(&self, spectrum: &[f32]) -> Result<[f32; BAND_COUNT]> {
        check_len("spectrum", spectrum.len(), self.config.frame_size)?;
        Ok(self.layout.averages(spectrum))
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    pub fn sample_rate(&self) -> f64 {
        self.config.sample_rate
    }

    pub fn frame_size(&self) -> usize {
        self.config.frame_size
    }

    /// Nyquist frequency in Hz
    pub fn max_frequency_hz(&self) -> f64 {
        self.config.max_frequency_hz()
    }

    pub fn hz_per_bin(&self) -> f64 {
        self.hz_per_bin
    }

    pub fn band_layout(&self) -> &BandLayout {
        &self.layout
    }

    /// Frequency of bin `bin` in Hz
    pub fn bin_frequency(&self, bin: usize) -> f64 {
        bin as f64 * self.hz_per_bin
    }

    /// Frequency of every spectrum bin in Hz
    pub fn frequency_bins_hz(&self) -> Vec<f64> {
        (0..self.config.frame_size)
            .map(|bin| self.bin_frequency(bin))
            .collect()
    }
}

/// RMS that rejects a frame whose level is NaN or infinite
fn checked_rms(time_samples: &[f32]) -> Result<f32> {
    let value = loudness::rms(time_samples);
    if !value.is_finite() {
        return Err(AnalyzerError::InvalidArgument(
            "time buffer contains NaN or infinite samples".to_string(),
        ));
    }
    Ok(value)
}
