// ============================================================
// Layer 3 — Dataset Errors
// ============================================================
// Typed failures raised by the dataset adapter and its
// collaborators. The application and CLI layers wrap these
// in anyhow with extra context.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while assembling garment samples.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// A sample-type tag outside the five known kinds.
    #[error("invalid sample type: {0}")]
    InvalidSampleType(usize),

    /// Index past the end of the datapoint list.
    #[error("index {index} out of range for dataset of {len} datapoints")]
    IndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of datapoints.
        len: usize,
    },

    /// Sampling rates that do not form a categorical distribution.
    #[error("invalid sampling rates {rates:?}: {reason}")]
    InvalidSamplingRates {
        /// Rates as provided.
        rates: Vec<f64>,
        /// Why they were rejected.
        reason: String,
    },

    /// A configuration value outside its allowed range.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// A caption file without the field the drawn sample type needs.
    #[error("captions for '{datapoint}' have no '{field}' field")]
    MissingCaptionField {
        /// Datapoint name.
        datapoint: String,
        /// Missing key.
        field: &'static str,
    },

    /// Malformed sewing pattern specification.
    #[error("invalid pattern '{}': {reason}", path.display())]
    InvalidPattern {
        /// Specification file.
        path: PathBuf,
        /// What was wrong.
        reason: String,
    },

    /// Encodings that cannot be joined key-wise.
    #[error("cannot concatenate encodings: {0}")]
    EncodingMismatch(String),

    /// Garment tokenizer failure.
    #[error("tokenizer error: {0}")]
    Tokenizer(String),

    /// Image decode or preprocessing failure.
    #[error("image error at '{}': {reason}", path.display())]
    Image {
        /// Image file.
        path: PathBuf,
        /// Decoder message.
        reason: String,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(String),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl DatasetError {
    /// Creates an invalid sampling rates error.
    #[must_use]
    pub fn invalid_rates(rates: &[f64], reason: impl Into<String>) -> Self {
        Self::InvalidSamplingRates {
            rates: rates.to_vec(),
            reason: reason.into(),
        }
    }

    /// Creates an invalid config error.
    #[must_use]
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig(reason.into())
    }

    /// Creates an invalid pattern error.
    #[must_use]
    pub fn invalid_pattern(path: &Path, reason: impl Into<String>) -> Self {
        Self::InvalidPattern {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }

    /// Creates an image error.
    #[must_use]
    pub fn image(path: &Path, reason: impl Into<String>) -> Self {
        Self::Image {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }

    /// Creates a tokenizer error.
    #[must_use]
    pub fn tokenizer(reason: impl Into<String>) -> Self {
        Self::Tokenizer(reason.into())
    }
}

impl From<std::io::Error> for DatasetError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for DatasetError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Result type for dataset operations.
pub type Result<T> = std::result::Result<T, DatasetError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_sample_type_message() {
        let err = DatasetError::InvalidSampleType(7);
        assert_eq!(err.to_string(), "invalid sample type: 7");
    }

    #[test]
    fn test_invalid_rates_lists_values() {
        let err = DatasetError::invalid_rates(&[0.5, 0.6], "must sum to 1");
        let msg = err.to_string();
        assert!(msg.contains("0.6"));
        assert!(msg.contains("must sum to 1"));
    }

    #[test]
    fn test_missing_caption_field() {
        let err = DatasetError::MissingCaptionField {
            datapoint: "dress_01".into(),
            field: "occasion",
        };
        assert!(err.to_string().contains("dress_01"));
        assert!(err.to_string().contains("occasion"));
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: DatasetError = io_err.into();
        assert!(matches!(err, DatasetError::Io(_)));
    }

    #[test]
    fn test_from_serde_error() {
        let json_err = serde_json::from_str::<i32>("nope").unwrap_err();
        let err: DatasetError = json_err.into();
        assert!(matches!(err, DatasetError::Serialization(_)));
    }
}
