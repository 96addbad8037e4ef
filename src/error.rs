use std::fmt;

/// Result type for DDPG operations
pub type Result<T> = std::result::Result<T, DdpgError>;

/// Main error type for the crate
#[derive(Debug, Clone)]
pub enum DdpgError {
    /// Sampling or batching with nothing to draw from
    EmptyBuffer(String),

    /// Invalid dimensions for operations
    DimensionMismatch {
        expected: String,
        actual: String,
    },

    /// Invalid parameter value
    InvalidParameter {
        name: String,
        reason: String,
    },

    /// IO errors (file operations)
    IoError(String),

    /// Serialization/deserialization errors
    SerializationError(String),

    /// Numerical computation errors
    NumericalError(String),

    /// Logger could not be installed
    LoggingError(String),
}

impl fmt::Display for DdpgError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DdpgError::EmptyBuffer(msg) => write!(f, "Empty buffer: {}", msg),
            DdpgError::DimensionMismatch { expected, actual } => {
                write!(f, "Dimension mismatch: expected {}, got {}", expected, actual)
            }
            DdpgError::InvalidParameter { name, reason } => {
                write!(f, "Invalid parameter '{}': {}", name, reason)
            }
            DdpgError::IoError(msg) => write!(f, "IO error: {}", msg),
            DdpgError::SerializationError(msg) => write!(f, "Serialization error: {}", msg),
            DdpgError::NumericalError(msg) => write!(f, "Numerical error: {}", msg),
            DdpgError::LoggingError(msg) => write!(f, "Logging error: {}", msg),
        }
    }
}

impl std::error::Error for DdpgError {}

impl From<std::io::Error> for DdpgError {
    fn from(err: std::io::Error) -> Self {
        DdpgError::IoError(err.to_string())
    }
}

impl From<serde_json::Error> for DdpgError {
    fn from(err: serde_json::Error) -> Self {
        DdpgError::SerializationError(err.to_string())
    }
}

impl DdpgError {
    pub fn dimension_mismatch<S: Into<String>>(expected: S, actual: S) -> Self {
        DdpgError::DimensionMismatch {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    pub fn invalid_parameter<S: Into<String>>(name: S, reason: S) -> Self {
        DdpgError::InvalidParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }
}
