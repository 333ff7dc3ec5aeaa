//! Tolerance-bounded comparison for lossy codecs.
//!
//! Independent decoders of the same lossy stream round differently inside
//! their floating-point pipelines, so their 16-bit output may drift by a
//! couple of LSBs and by up to one decode frame in length. Anything beyond
//! the configured band is reported as a mismatch.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::diff::{find_frame_diffs, log_frame_diffs, FrameDiff};
use super::tolerances::CompareTolerances;
use crate::error::{PcmError, PcmResult};
use crate::format::{BitDepth, PcmLayout};

/// Outcome of a lossy comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LossyVerdict {
    /// Within tolerance.
    Pass,
    /// Lengths diverge by more than the tolerated frame. Samples were not compared.
    LengthMismatch,
    /// Too many samples differ by more than the tolerated delta.
    TooManyLargeDiffs,
}

/// Result of a lossy comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LossyReport {
    /// Verdict.
    pub verdict: LossyVerdict,
    /// Number of interleaved channels.
    pub channels: usize,
    /// Length of buffer A in bytes.
    pub len_a: usize,
    /// Length of buffer B in bytes.
    pub len_b: usize,
    /// Tolerated length difference in bytes.
    pub max_length_diff: usize,
    /// Number of 16-bit samples compared.
    pub compared_samples: usize,
    /// Samples whose absolute difference exceeds `max_sample_delta`.
    pub large_diffs: usize,
    /// Tolerated number of large diffs.
    pub max_large_diffs: usize,
    /// Tolerated per-sample absolute difference.
    pub max_sample_delta: u32,
    /// Largest absolute difference seen, reported whatever the verdict.
    pub max_diff: u32,
    /// Leading differing frames, listed when the ratio check fails.
    pub frame_diffs: Vec<FrameDiff>,
}

impl LossyReport {
    /// Whether the buffers are equivalent within tolerance.
    pub fn passed(&self) -> bool {
        self.verdict == LossyVerdict::Pass
    }

    /// Absolute length difference in bytes.
    pub fn length_diff(&self) -> usize {
        self.len_a.abs_diff(self.len_b)
    }

    /// Large diffs as a percentage of compared samples.
    pub fn large_diff_percent(&self) -> f64 {
        if self.compared_samples == 0 {
            return 0.0;
        }
        self.large_diffs as f64 / self.compared_samples as f64 * 100.0
    }

    /// Panic with the full report if the comparison failed.
    pub fn assert_passed(&self, label: &str) {
        if !self.passed() {
            panic!("{}: {}", label, self);
        }
    }
}

impl fmt::Display for LossyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.verdict {
            LossyVerdict::LengthMismatch => {
                return write!(
                    f,
                    "length mismatch: a={}, b={} (diff={} exceeds tolerance {})",
                    self.len_a,
                    self.len_b,
                    self.length_diff(),
                    self.max_length_diff
                );
            }
            LossyVerdict::TooManyLargeDiffs => write!(
                f,
                "lossy PCM mismatch: {} samples ({:.2}%) differ by more than +/-{}, max diff={}",
                self.large_diffs,
                self.large_diff_percent(),
                self.max_sample_delta,
                self.max_diff
            )?,
            LossyVerdict::Pass => write!(
                f,
                "lossy PCM within tolerance: {} of {} samples differ by more than +/-{} (limit {}), max diff={}",
                self.large_diffs,
                self.compared_samples,
                self.max_sample_delta,
                self.max_large_diffs,
                self.max_diff
            )?,
        }

        if self.length_diff() > 0 {
            write!(
                f,
                "\n  length diff: a={}, b={} (+/-{} bytes, within tolerance)",
                self.len_a,
                self.len_b,
                self.length_diff()
            )?;
        }

        for diff in &self.frame_diffs {
            write!(f, "\n  {}", diff)?;
        }

        Ok(())
    }
}

/// Compares two 16-bit buffers within the default codec tolerance.
///
/// Fails with [`PcmError::UnsupportedLossyBitDepth`] before doing any work
/// unless `layout` is 16-bit.
pub fn compare_lossy(a: &[u8], b: &[u8], layout: PcmLayout) -> PcmResult<LossyReport> {
    compare_lossy_with(a, b, layout, &CompareTolerances::default())
}

/// Compares two 16-bit buffers with explicit tolerances.
pub fn compare_lossy_with(
    a: &[u8],
    b: &[u8],
    layout: PcmLayout,
    tolerances: &CompareTolerances,
) -> PcmResult<LossyReport> {
    if layout.bit_depth() != BitDepth::Sixteen {
        return Err(PcmError::UnsupportedLossyBitDepth {
            bits: layout.bit_depth().bits(),
        });
    }
    tolerances.validate()?;

    let mut report = LossyReport {
        verdict: LossyVerdict::Pass,
        channels: layout.channels(),
        len_a: a.len(),
        len_b: b.len(),
        max_length_diff: tolerances.max_length_diff_bytes(layout.channels()),
        compared_samples: 0,
        large_diffs: 0,
        max_large_diffs: 0,
        max_sample_delta: tolerances.max_sample_delta,
        max_diff: 0,
        frame_diffs: Vec::new(),
    };

    let length_diff = report.length_diff();
    if length_diff > report.max_length_diff {
        report.verdict = LossyVerdict::LengthMismatch;
        debug!(
            len_a = report.len_a,
            len_b = report.len_b,
            length_diff,
            "lossy comparison failed on length"
        );
        return Ok(report);
    }
    if length_diff > 0 {
        info!(
            len_a = report.len_a,
            len_b = report.len_b,
            length_diff,
            "length diff within tolerance"
        );
    }

    for (sa, sb) in a.chunks_exact(2).zip(b.chunks_exact(2)) {
        let sample_a = i16::from_le_bytes([sa[0], sa[1]]) as i32;
        let sample_b = i16::from_le_bytes([sb[0], sb[1]]) as i32;
        let diff = sample_a.abs_diff(sample_b);

        report.compared_samples += 1;
        if diff > tolerances.max_sample_delta {
            report.large_diffs += 1;
        }
        report.max_diff = report.max_diff.max(diff);
    }

    report.max_large_diffs = tolerances.max_large_diffs(report.compared_samples);
    if report.large_diffs > report.max_large_diffs {
        report.verdict = LossyVerdict::TooManyLargeDiffs;
        report.frame_diffs = find_frame_diffs(a, b, layout, tolerances.max_reported_diffs);
    }

    debug!(
        compared_samples = report.compared_samples,
        large_diffs = report.large_diffs,
        max_diff = report.max_diff,
        passed = report.passed(),
        "lossy comparison finished"
    );
    log_frame_diffs("lossy comparison", &report.frame_diffs);

    Ok(report)
}
