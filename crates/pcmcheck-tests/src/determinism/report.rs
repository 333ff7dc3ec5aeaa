//! Reporting across a matrix of fixture formats.

use std::fmt;

use pcmcheck_core::NoiseParams;

use crate::determinism::core::DeterminismResult;

/// Determinism result for one fixture format.
#[derive(Debug)]
pub struct DeterminismReportEntry {
    /// Fixture parameters that were generated.
    pub params: NoiseParams,
    /// Outcome for those parameters.
    pub result: DeterminismResult,
}

impl DeterminismReportEntry {
    /// Check if this entry passed determinism verification.
    pub fn passed(&self) -> bool {
        self.result.is_deterministic
    }

    fn label(&self) -> String {
        format!(
            "{} Hz {} {}s",
            self.params.sample_rate(),
            self.params.layout(),
            self.params.duration_secs()
        )
    }
}

/// Outcome of a determinism run over several fixture formats.
#[derive(Debug, Default)]
pub struct DeterminismReport {
    /// Individual entries, in run order.
    pub entries: Vec<DeterminismReportEntry>,
}

impl FromIterator<DeterminismReportEntry> for DeterminismReport {
    fn from_iter<I: IntoIterator<Item = DeterminismReportEntry>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl DeterminismReport {
    pub fn all_deterministic(&self) -> bool {
        self.entries.iter().all(DeterminismReportEntry::passed)
    }

    /// Formats whose runs diverged.
    pub fn failures(&self) -> impl Iterator<Item = &DeterminismReportEntry> {
        self.entries.iter().filter(|e| !e.passed())
    }

    /// Panics with the full report if any format diverged.
    pub fn assert_all_deterministic(&self) {
        if !self.all_deterministic() {
            panic!("fixture generation is not reproducible\n{}", self);
        }
    }
}

impl fmt::Display for DeterminismReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total = self.entries.len();
        writeln!(
            f,
            "{}/{} fixture formats reproducible",
            total - self.failures().count(),
            total
        )?;

        for entry in &self.entries {
            let status = if entry.passed() { "ok" } else { "DIVERGED" };
            writeln!(
                f,
                "  {:<8} {} -> {} bytes, blake3 {}",
                status,
                entry.label(),
                entry.result.output_size,
                &entry.result.hash[..16.min(entry.result.hash.len())]
            )?;

            if let Some(diff) = &entry.result.diff_info {
                writeln!(f, "           {}", diff)?;
            }
        }

        Ok(())
    }
}
