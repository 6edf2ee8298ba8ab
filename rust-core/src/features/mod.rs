//! Feature extraction over caller-supplied sample and spectrum buffers

pub mod config;
pub mod loudness;
pub mod pitch;
pub mod bands;
pub mod analyzer;

pub use config::AnalyzerConfig;
pub use loudness::{decibels, rms, voltage_ratio};
pub use pitch::{dominant_frequency, PeakInterpolation};
pub use bands::{Band, BandLayout, BAND_COUNT};
pub use analyzer::{FeatureResult, SpectralAnalyzer};
