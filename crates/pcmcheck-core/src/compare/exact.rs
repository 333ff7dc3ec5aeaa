//! Byte-exact comparison for lossless codecs.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::diff::{find_frame_diffs, log_frame_diffs, FrameDiff};
use super::tolerances::CompareTolerances;
use crate::format::PcmLayout;

/// Lengths of two buffers that were compared over their common prefix only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LengthMismatch {
    /// Length of the expected buffer in bytes.
    pub expected_len: usize,
    /// Length of the actual buffer in bytes.
    pub actual_len: usize,
}

impl LengthMismatch {
    /// Absolute difference in bytes.
    pub fn diff(&self) -> usize {
        self.expected_len.abs_diff(self.actual_len)
    }
}

/// Result of an exact comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExactReport {
    /// Layout the buffers were interpreted with.
    pub layout: PcmLayout,
    /// Number of bytes compared (the shorter length).
    pub compared_bytes: usize,
    /// Number of bytes that differ.
    pub differing_bytes: usize,
    /// Offset of the first differing byte.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_diff_offset: Option<usize>,
    /// Set when the buffers had different lengths. Never fails the comparison.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length_mismatch: Option<LengthMismatch>,
    /// Leading differing frames.
    pub frame_diffs: Vec<FrameDiff>,
}

impl ExactReport {
    /// Whether every compared byte matched.
    pub fn passed(&self) -> bool {
        self.differing_bytes == 0
    }

    /// Frame index of the first differing byte.
    pub fn first_diff_frame(&self) -> Option<usize> {
        self.first_diff_offset
            .map(|offset| self.layout.frame_index(offset))
    }

    /// Differing bytes as a percentage of compared bytes.
    pub fn differing_percent(&self) -> f64 {
        if self.compared_bytes == 0 {
            return 0.0;
        }
        self.differing_bytes as f64 / self.compared_bytes as f64 * 100.0
    }

    /// Panic with the full report if any byte differs.
    pub fn assert_passed(&self, label: &str) {
        if !self.passed() {
            panic!("{}: {}", label, self);
        }
    }
}

impl fmt::Display for ExactReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.first_diff_offset, self.first_diff_frame()) {
            (Some(offset), Some(frame)) => write!(
                f,
                "PCM mismatch: {} differing bytes ({:.2}%), first diff at byte {} (sample {})",
                self.differing_bytes,
                self.differing_percent(),
                offset,
                frame
            )?,
            _ => write!(f, "PCM identical over {} bytes", self.compared_bytes)?,
        }

        if let Some(mismatch) = &self.length_mismatch {
            write!(
                f,
                "\n  length differs: expected={}, actual={} ({} trailing bytes not compared)",
                mismatch.expected_len,
                mismatch.actual_len,
                mismatch.diff()
            )?;
        }

        for diff in &self.frame_diffs {
            write!(f, "\n  {}", diff)?;
        }

        Ok(())
    }
}

/// Compares two buffers byte for byte using default tolerances.
///
/// Buffers of different lengths are compared over the shorter length; the
/// mismatch is recorded in [`ExactReport::length_mismatch`] but does not fail
/// the comparison.
///
/// # Example
///
/// ```rust
/// use pcmcheck_core::{compare_exact, BitDepth, PcmLayout};
///
/// let expected = vec![0u8, 1, 2, 3];
/// let mut actual = expected.clone();
/// actual[2] = 9;
///
/// let report = compare_exact(&expected, &actual, PcmLayout::mono(BitDepth::Sixteen));
/// assert!(!report.passed());
/// assert_eq!(report.first_diff_offset, Some(2));
/// assert_eq!(report.first_diff_frame(), Some(1));
/// ```
pub fn compare_exact(expected: &[u8], actual: &[u8], layout: PcmLayout) -> ExactReport {
    compare_exact_with(expected, actual, layout, &CompareTolerances::default())
}

/// Compares two buffers byte for byte with explicit tolerances.
///
/// Only `max_reported_diffs` is used; exact comparison tolerates nothing.
pub fn compare_exact_with(
    expected: &[u8],
    actual: &[u8],
    layout: PcmLayout,
    tolerances: &CompareTolerances,
) -> ExactReport {
    let compared_bytes = expected.len().min(actual.len());

    let length_mismatch = (expected.len() != actual.len()).then(|| LengthMismatch {
        expected_len: expected.len(),
        actual_len: actual.len(),
    });
    if let Some(mismatch) = &length_mismatch {
        warn!(
            expected_len = mismatch.expected_len,
            actual_len = mismatch.actual_len,
            compared_bytes,
            "exact comparison truncated to the shorter buffer"
        );
    }

    let mut differing_bytes = 0;
    let mut first_diff_offset = None;
    for (offset, (e, a)) in expected.iter().zip(actual).enumerate() {
        if e != a {
            differing_bytes += 1;
            first_diff_offset.get_or_insert(offset);
        }
    }

    let frame_diffs = if differing_bytes > 0 {
        find_frame_diffs(expected, actual, layout, tolerances.max_reported_diffs)
    } else {
        Vec::new()
    };

    let report = ExactReport {
        layout,
        compared_bytes,
        differing_bytes,
        first_diff_offset,
        length_mismatch,
        frame_diffs,
    };

    debug!(
        layout = %layout,
        compared_bytes,
        differing_bytes,
        passed = report.passed(),
        "exact comparison finished"
    );
    log_frame_diffs("exact comparison", &report.frame_diffs);

    report
}
