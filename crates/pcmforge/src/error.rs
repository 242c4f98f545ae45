//! Error types for the stream encoder.

use thiserror::Error;

/// Result type for stream operations.
pub type StreamResult<T> = Result<T, StreamError>;

/// Errors that can occur while configuring, rendering or finalizing a stream.
#[derive(Debug, Error)]
pub enum StreamError {
    /// I/O error on the underlying storage.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid sample rate.
    #[error("invalid sample rate: {rate}")]
    InvalidSampleRate {
        /// The invalid sample rate.
        rate: u32,
    },

    /// Bit depth other than 8 or 16.
    #[error("unsupported bit depth: {bits} (expected 8 or 16)")]
    UnsupportedBitDepth {
        /// The rejected bit depth.
        bits: u16,
    },

    /// Channel count other than 1 or 2.
    #[error("unsupported channel count: {channels} (expected 1 or 2)")]
    UnsupportedChannelCount {
        /// The rejected channel count.
        channels: u16,
    },

    /// Negative or non-finite duration.
    #[error("invalid duration: {duration} seconds")]
    InvalidDuration {
        /// The invalid duration.
        duration: f64,
    },

    /// Negative or non-finite frequency.
    #[error("invalid frequency: {freq} Hz")]
    InvalidFrequency {
        /// The invalid frequency.
        freq: f64,
    },

    /// Invalid parameter value.
    #[error("invalid parameter '{name}': {message}")]
    InvalidParameter {
        /// Parameter name.
        name: String,
        /// Error message.
        message: String,
    },

    /// Payload would overflow the 32-bit RIFF size fields.
    #[error("payload of {bytes} bytes exceeds the WAV size limit")]
    TooLong {
        /// Payload size that was requested.
        bytes: u64,
    },

    /// Malformed WAV header while parsing.
    #[error("malformed WAV header: {message}")]
    MalformedHeader {
        /// What was wrong with the header.
        message: String,
    },

    /// Score document could not be parsed.
    #[error("invalid score: {0}")]
    Score(#[from] serde_json::Error),
}

impl StreamError {
    /// Creates an invalid parameter error.
    pub fn invalid_param(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Creates a malformed header error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedHeader {
            message: message.into(),
        }
    }

    /// Stable error code for machine-readable diagnostics.
    pub fn code(&self) -> &'static str {
        match self {
            StreamError::Io(_) => "PCM_001",
            StreamError::InvalidSampleRate { .. } => "PCM_002",
            StreamError::UnsupportedBitDepth { .. } => "PCM_003",
            StreamError::UnsupportedChannelCount { .. } => "PCM_004",
            StreamError::InvalidDuration { .. } => "PCM_005",
            StreamError::InvalidFrequency { .. } => "PCM_006",
            StreamError::InvalidParameter { .. } => "PCM_007",
            StreamError::TooLong { .. } => "PCM_008",
            StreamError::MalformedHeader { .. } => "PCM_009",
            StreamError::Score(_) => "PCM_010",
        }
    }

    /// Returns true when the error came from the storage layer rather than
    /// from caller input.
    pub fn is_io(&self) -> bool {
        matches!(self, StreamError::Io(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_param_helper() {
        let err = StreamError::invalid_param("volume", "must be finite");
        assert!(err.to_string().contains("volume"));
        assert!(err.to_string().contains("must be finite"));
        assert_eq!(err.code(), "PCM_007");
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such dir");
        let err: StreamError = io.into();
        assert!(err.is_io());
        assert_eq!(err.code(), "PCM_001");
        assert!(err.to_string().contains("no such dir"));
    }

    #[test]
    fn test_validation_messages() {
        let err = StreamError::UnsupportedBitDepth { bits: 24 };
        assert!(err.to_string().contains("24"));
        assert!(!err.is_io());

        let err = StreamError::InvalidDuration { duration: -1.0 };
        assert!(err.to_string().contains("-1"));
    }
}
