//! Error types for feature extraction

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalyzerError {
    #[error("Invalid analyzer configuration: {0}")]
    InvalidConfiguration(String),

    #[error("{buffer} buffer has {actual} samples, analyzer frame size is {expected}")]
    BufferSizeMismatch {
        buffer: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

pub type Result<T> = std::result::Result<T, AnalyzerError>;

/// Fail with `BufferSizeMismatch` unless `actual == expected`
pub(crate) fn check_len(buffer: &'static str, actual: usize, expected: usize) -> Result<()> {
    if actual != expected {
        return Err(AnalyzerError::BufferSizeMismatch {
            buffer,
            expected,
            actual,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_len() {
        assert!(check_len("time", 1024, 1024).is_ok());

        let err = check_len("spectrum", 512, 1024).unwrap_err();
        assert_eq!(
            err,
            AnalyzerError::BufferSizeMismatch {
                buffer: "spectrum",
                expected: 1024,
                actual: 512,
            }
        );
        assert_eq!(
            err.to_string(),
            "spectrum buffer has 512 samples, analyzer frame size is 1024"
        );
    }
}
