//! JSON output types for machine-readable CLI output.
//!
//! Every command accepts `--json` and prints exactly one of these documents
//! to stdout instead of colored text.

use serde::{Deserialize, Serialize};

use pcmcheck_core::{ExactReport, LossyReport, NoiseParams, PcmError, PcmLayout};

/// Error codes for CLI operations.
///
/// Library errors pass their own `PCM_XXX` codes through unchanged.
pub mod error_codes {
    /// File could not be read
    pub const FILE_READ: &str = "CLI_001";
    /// File could not be written
    pub const FILE_WRITE: &str = "CLI_002";
}

/// A structured error in JSON output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JsonError {
    /// Stable error code (e.g., "CLI_001", "PCM_003")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// File involved (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl JsonError {
    /// Creates a new error with code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            file: None,
        }
    }

    /// Sets the file path for this error.
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }
}

impl From<&PcmError> for JsonError {
    fn from(err: &PcmError) -> Self {
        Self::new(err.code(), err.to_string())
    }
}

/// Output of `pcmcheck generate --json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateOutput {
    /// Whether the fixture was written
    pub success: bool,
    /// Destination path
    pub output: String,
    /// Parameters of the written file (after any stereo expansion)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<NoiseParams>,
    /// Size in bytes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bytes: Option<usize>,
    /// BLAKE3 hex digest
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
    /// Errors, if any
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<JsonError>,
}

impl GenerateOutput {
    pub fn success(output: String, params: NoiseParams, bytes: usize, hash: String) -> Self {
        Self {
            success: true,
            output,
            params: Some(params),
            bytes: Some(bytes),
            hash: Some(hash),
            errors: Vec::new(),
        }
    }

    pub fn failure(output: String, errors: Vec<JsonError>) -> Self {
        Self {
            success: false,
            output,
            params: None,
            bytes: None,
            hash: None,
            errors,
        }
    }
}

/// Mode-specific comparison report, tagged with the mode name.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum CompareReport {
    Exact(ExactReport),
    Lossy(LossyReport),
}

impl CompareReport {
    pub fn passed(&self) -> bool {
        match self {
            CompareReport::Exact(report) => report.passed(),
            CompareReport::Lossy(report) => report.passed(),
        }
    }
}

/// Output of `pcmcheck compare --json`.
#[derive(Debug, Clone, Serialize)]
pub struct CompareOutput {
    /// Whether the comparison passed
    pub passed: bool,
    /// Path of the expected buffer
    pub expected: String,
    /// Path of the actual buffer
    pub actual: String,
    /// BLAKE3 digest of the expected buffer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_hash: Option<String>,
    /// BLAKE3 digest of the actual buffer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_hash: Option<String>,
    /// Comparison details
    #[serde(flatten)]
    pub report: Option<CompareReport>,
    /// Errors, if any
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<JsonError>,
}

/// Output of `pcmcheck inspect --json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InspectOutput {
    /// Inspected path
    pub input: String,
    /// Layout the buffer was interpreted with
    pub layout: PcmLayout,
    /// Size in bytes
    pub bytes: usize,
    /// Whole frames in the buffer
    pub frames: usize,
    /// Whole samples in the buffer, across channels
    pub samples: usize,
    /// Whether the size is a whole number of frames
    pub well_formed: bool,
    /// Smallest decoded sample
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_sample: Option<i32>,
    /// Largest decoded sample
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_sample: Option<i32>,
    /// BLAKE3 hex digest
    pub hash: String,
}

/// One row of `pcmcheck formats --json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FormatEntry {
    pub bits: u32,
    pub bytes_per_sample: usize,
    pub raw_format: String,
    pub raw_codec: String,
}
