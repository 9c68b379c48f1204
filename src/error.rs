//! Error types for the harmonic analysis engine

use std::fmt;

/// Errors that can occur during harmonic analysis
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisError {
    /// Invalid input (no note intervals, zero resolution, zero meter)
    InvalidInput(String),

    /// MIDI decoding error
    DecodingError(String),

    /// File system error while reading a source or writing a sidecar
    IoError(String),

    /// Sidecar encoding/decoding error
    SerializationError(String),
}

impl fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            AnalysisError::DecodingError(msg) => write!(f, "Decoding error: {}", msg),
            AnalysisError::IoError(msg) => write!(f, "I/O error: {}", msg),
            AnalysisError::SerializationError(msg) => write!(f, "Serialization error: {}", msg),
        }
    }
}

impl std::error::Error for AnalysisError {}

impl From<std::io::Error> for AnalysisError {
    fn from(err: std::io::Error) -> Self {
        AnalysisError::IoError(err.to_string())
    }
}

impl From<midly::Error> for AnalysisError {
    fn from(err: midly::Error) -> Self {
        AnalysisError::DecodingError(err.to_string())
    }
}

impl From<serde_yaml::Error> for AnalysisError {
    fn from(err: serde_yaml::Error) -> Self {
        AnalysisError::SerializationError(err.to_string())
    }
}
