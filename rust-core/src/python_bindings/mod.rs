//! PyO3 bindings for Python integration

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use crate::error::AnalyzerError;

mod analyzer_bindings;

impl From<AnalyzerError> for PyErr {
    fn from(err: AnalyzerError) -> Self {
        PyValueError::new_err(err.to_string())
    }
}

/// Python module definition
#[pymodule]
fn spectral_features(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_class::<analyzer_bindings::PySpectralAnalyzer>()?;
    m.add_class::<analyzer_bindings::PyFeatureResult>()?;

    // Add PeakInterpolation enum
    m.add_class::<analyzer_bindings::PyPeakInterpolation>()?;

    Ok(())
}
