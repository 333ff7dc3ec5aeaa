//! Error types for PCM synthesis and comparison.

use thiserror::Error;

/// Result type for PCM operations.
pub type PcmResult<T> = Result<T, PcmError>;

/// Errors raised before any synthesis or comparison work starts.
///
/// Comparison *failures* (differing bytes, excess length divergence) are not
/// errors; they are reported through the comparison reports.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PcmError {
    /// Bit depth outside {4, 8, 12, 16, 20, 24, 32}.
    #[error("unsupported bit depth: {bits} (expected one of 4, 8, 12, 16, 20, 24, 32)")]
    UnsupportedBitDepth {
        /// The rejected bit depth.
        bits: u32,
    },

    /// Channel count of zero.
    #[error("invalid channel count: {channels} (must be at least 1)")]
    InvalidChannels {
        /// The rejected channel count.
        channels: usize,
    },

    /// Lossy comparison requested for a depth other than 16 bits.
    #[error("lossy comparison only supports 16-bit, got {bits}-bit")]
    UnsupportedLossyBitDepth {
        /// The requested bit depth.
        bits: u32,
    },

    /// Invalid tolerance value.
    #[error("invalid tolerance '{name}': {message}")]
    InvalidTolerance {
        /// Tolerance field name.
        name: String,
        /// Error message.
        message: String,
    },

    /// Tolerance file could not be read or parsed.
    #[error("failed to load tolerances from {path}: {message}")]
    TolerancesFile {
        /// Path of the tolerance file.
        path: String,
        /// Underlying error message.
        message: String,
    },
}

impl PcmError {
    /// Creates an invalid tolerance error.
    pub fn invalid_tolerance(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidTolerance {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Stable machine-readable code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            PcmError::UnsupportedBitDepth { .. } => "PCM_001",
            PcmError::InvalidChannels { .. } => "PCM_002",
            PcmError::UnsupportedLossyBitDepth { .. } => "PCM_003",
            PcmError::InvalidTolerance { .. } => "PCM_004",
            PcmError::TolerancesFile { .. } => "PCM_005",
        }
    }
}
