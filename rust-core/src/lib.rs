//! Spectral Features - Perceptual Audio Feature Extraction
//! 
//! Loudness, dominant pitch and per-band energy from a frame of samples
//! and its magnitude spectrum, with optional Python bindings.

// Suppress PyO3 non-local impl warnings (harmless macro-generated code)
#![cfg_attr(feature = "python", allow(non_local_definitions))]

pub mod error;
pub mod features;

#[cfg(feature = "python")]
pub mod python_bindings;

pub use error::{AnalyzerError, Result};
pub use features::{
    AnalyzerConfig, Band, BandLayout, FeatureResult, PeakInterpolation, SpectralAnalyzer,
    BAND_COUNT,
};
