//! Tolerance configuration shared by the comparators.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{PcmError, PcmResult};

/// Thresholds used by exact and lossy comparison.
///
/// Missing fields in a tolerance file take their default values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompareTolerances {
    /// Maximum number of differing frames listed in a report (default: 5)
    pub max_reported_diffs: usize,
    /// Largest per-sample absolute difference still treated as codec noise,
    /// in LSB units (default: 2)
    pub max_sample_delta: u32,
    /// Percentage of compared samples allowed to exceed `max_sample_delta`
    /// (default: 1)
    pub max_large_diff_percent: u32,
    /// Length divergence tolerated by lossy comparison, in samples per
    /// channel (default: 1152, one MP3/AAC decode frame)
    pub frame_tolerance_samples: usize,
}

impl Default for CompareTolerances {
    fn default() -> Self {
        Self {
            max_reported_diffs: 5,
            max_sample_delta: 2,
            max_large_diff_percent: 1,
            frame_tolerance_samples: 1152,
        }
    }
}

impl CompareTolerances {
    /// Parse tolerances from a JSON file.
    pub fn from_file(path: &Path) -> PcmResult<Self> {
        let file_error = |message: String| PcmError::TolerancesFile {
            path: path.display().to_string(),
            message,
        };
        let content = fs::read_to_string(path).map_err(|e| file_error(e.to_string()))?;
        let tolerances: Self =
            serde_json::from_str(&content).map_err(|e| file_error(e.to_string()))?;
        tolerances.validate()?;
        Ok(tolerances)
    }

    /// Checks that every threshold is usable.
    pub fn validate(&self) -> PcmResult<()> {
        if self.max_large_diff_percent > 100 {
            return Err(PcmError::invalid_tolerance(
                "max_large_diff_percent",
                format!("must be at most 100, got {}", self.max_large_diff_percent),
            ));
        }
        if self.frame_tolerance_samples.checked_mul(2).is_none() {
            return Err(PcmError::invalid_tolerance(
                "frame_tolerance_samples",
                format!(
                    "{} samples overflows a byte length",
                    self.frame_tolerance_samples
                ),
            ));
        }
        Ok(())
    }

    /// Byte length difference tolerated for 16-bit audio with `channels`
    /// interleaved channels.
    pub fn max_length_diff_bytes(&self, channels: usize) -> usize {
        self.frame_tolerance_samples
            .saturating_mul(channels)
            .saturating_mul(2)
    }

    /// Number of large diffs tolerated among `compared_samples` samples.
    pub fn max_large_diffs(&self, compared_samples: usize) -> usize {
        (compared_samples as u128 * self.max_large_diff_percent as u128 / 100) as usize
    }
}
