//! Python bindings for spectral feature extraction

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use numpy::{PyArray1, PyReadonlyArray1};
use crate::features::{AnalyzerConfig, Band, FeatureResult, PeakInterpolation, SpectralAnalyzer};

/// Peak interpolation enum exposed to Python
#[pyclass(name = "PeakInterpolation")]
#[derive(Clone)]
pub enum PyPeakInterpolation {
    LeftNeighbor,
    TwoSided,
}

impl From<PyPeakInterpolation> for PeakInterpolation {
    fn from(py_interp: PyPeakInterpolation) -> Self {
        match py_interp {
            PyPeakInterpolation::LeftNeighbor => PeakInterpolation::LeftNeighbor,
            PyPeakInterpolation::TwoSided => PeakInterpolation::TwoSided,
        }
    }
}

/// Per-frame features exposed to Python
#[pyclass(name = "FeatureResult")]
#[derive(Clone)]
pub struct PyFeatureResult {
    #[pyo3(get)]
    pub loudness_rms: f32,
    #[pyo3(get)]
    pub loudness_db: f32,
    #[pyo3(get)]
    pub dominant_frequency_hz: f32,
    #[pyo3(get)]
    pub band_energies: Vec<f32>,
}

impl From<FeatureResult> for PyFeatureResult {
    fn from(result: FeatureResult) -> Self {
        Self {
            loudness_rms: result.loudness_rms,
            loudness_db: result.loudness_db,
            dominant_frequency_hz: result.dominant_frequency_hz,
            band_energies: result.band_energies.to_vec(),
        }
    }
}

#[pymethods]
impl PyFeatureResult {
    fn __repr__(&self) -> String {
        format!(
            "FeatureResult(loudness_db={:.2}, dominant_frequency_hz={:.2}, band_energies={:?})",
            self.loudness_db, self.dominant_frequency_hz, self.band_energies
        )
    }
}

fn as_slice<'a>(array: &'a PyReadonlyArray1<f32>, name: &str) -> PyResult<&'a [f32]> {
    array
        .as_slice()
        .map_err(|_| PyValueError::new_err(format!("{} must be a contiguous array", name)))
}

/// Spectral analyzer exposed to Python
#[pyclass(name = "SpectralAnalyzer")]
pub struct PySpectralAnalyzer {
    analyzer: SpectralAnalyzer,
}

#[pymethods]
impl PySpectralAnalyzer {
    /// Create a new spectral analyzer
    /// 
    /// Args:
    ///     sample_rate: Sample rate in Hz
    ///     frame_size: Length of the time buffer and of the spectrum
    ///     reference_voltage: Reference level for dB conversion (default: 0.1)
    ///     db_floor: Lowest reported loudness in dB (default: -120)
    ///     interpolation: Peak interpolation mode
    #[new]
    #[pyo3(signature = (
        sample_rate,
        frame_size,
        reference_voltage=0.1,
        db_floor=-120.0,
        interpolation=PyPeakInterpolation::LeftNeighbor,
    ))]
    fn new(
        sample_rate: f64,
        frame_size: usize,
        reference_voltage: f32,
        db_floor: f32,
        interpolation: PyPeakInterpolation,
    ) -> PyResult<Self> {
        let config = AnalyzerConfig::new(sample_rate, frame_size)
            .with_reference_voltage(reference_voltage)
            .with_db_floor(db_floor)
            .with_interpolation(interpolation.into());

        Ok(Self {
            analyzer: SpectralAnalyzer::new(config)?,
        })
    }
    
    /// Extract all features from one frame
    /// 
    /// Args:
    ///     samples: Time-domain samples as float32 numpy array
    ///     spectrum: Magnitude spectrum as float32 numpy array
    /// 
    /// Returns:
    ///     FeatureResult
    fn analyze(
        &self,
        samples: PyReadonlyArray1<f32>,
        spectrum: PyReadonlyArray1<f32>,
    ) -> PyResult<PyFeatureResult> {
        let result = self
            .analyzer
            .analyze(as_slice(&samples, "samples")?, as_slice(&spectrum, "spectrum")?)?;
        Ok(result.into())
    }

    /// RMS of one frame of samples
    fn rms(&self, samples: PyReadonlyArray1<f32>) -> PyResult<f32> {
        Ok(self.analyzer.rms(as_slice(&samples, "samples")?)?)
    }

    /// Convert RMS to dB relative to a reference level
    /// 
    /// Args:
    ///     rms_value: Linear level
    ///     reference_voltage: Reference level (default: the analyzer's own)
    #[pyo3(signature = (rms_value, reference_voltage=None))]
    fn decibels(&self, rms_value: f32, reference_voltage: Option<f32>) -> PyResult<f32> {
        let db = match reference_voltage {
            Some(reference) => self.analyzer.decibels(rms_value, reference)?,
            None => self.analyzer.loudness_db(rms_value)?,
        };
        Ok(db)
    }

    /// Convert dB back to a level ratio
    fn voltage_ratio(&self, decibel_value: f32) -> f32 {
        self.analyzer.voltage_ratio(decibel_value)
    }

    /// Dominant frequency of one spectrum in Hz
    fn dominant_frequency(&self, spectrum: PyReadonlyArray1<f32>) -> PyResult<f32> {
        Ok(self.analyzer.dominant_frequency(as_slice(&spectrum, "spectrum")?)?)
    }

    /// Mean magnitude of each of the 7 bands
    /// 
    /// Returns:
    ///     Band energies as numpy array, sub-bass first
    fn band_energies<'py>(
        &self,
        py: Python<'py>,
        spectrum: PyReadonlyArray1<f32>,
    ) -> PyResult<&'py PyArray1<f32>> {
        let energies = self.analyzer.band_energies(as_slice(&spectrum, "spectrum")?)?;
        Ok(PyArray1::from_slice(py, &energies))
    }

    /// Band names in result order
    #[staticmethod]
    fn band_names() -> Vec<&'static str> {
        Band::ALL.iter().map(|b| b.name()).collect()
    }

    /// Get frequency bins in Hz
    fn frequency_bins_hz<'py>(&self, py: Python<'py>) -> PyResult<&'py PyArray1<f64>> {
        Ok(PyArray1::from_vec(py, self.analyzer.frequency_bins_hz()))
    }

    /// Band cutoff bin indices
    fn band_cutoffs(&self) -> Vec<usize> {
        self.analyzer.band_layout().cutoffs().to_vec()
    }

    fn get_sample_rate(&self) -> f64 {
        self.analyzer.sample_rate()
    }

    fn get_frame_size(&self) -> usize {
        self.analyzer.frame_size()
    }

    fn get_hz_per_bin(&self) -> f64 {
        self.analyzer.hz_per_bin()
    }
}
