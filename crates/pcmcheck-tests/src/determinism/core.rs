//! Core determinism verification for byte-producing generators.

use std::fmt;

/// Result of a determinism verification.
#[derive(Debug, Clone)]
pub struct DeterminismResult {
    /// Whether all runs produced identical output.
    pub is_deterministic: bool,
    /// Number of runs performed.
    pub runs: usize,
    /// Size of the reference output in bytes.
    pub output_size: usize,
    /// BLAKE3 hash of the reference output.
    pub hash: String,
    /// First divergence found, if any.
    pub diff_info: Option<DiffInfo>,
}

/// First byte where a run diverged from the reference run.
#[derive(Debug, Clone)]
pub struct DiffInfo {
    /// Byte offset of the divergence.
    pub offset: usize,
    /// Reference byte, or `None` past the end of the reference output.
    pub expected: Option<u8>,
    /// Diverging byte, or `None` past the end of the diverging output.
    pub actual: Option<u8>,
    /// Which run (0-indexed) diverged.
    pub run_index: usize,
    /// Reference bytes around the offset.
    pub context: DiffContext,
}

/// Up to 8 reference bytes on each side of a divergence.
#[derive(Debug, Clone, Default)]
pub struct DiffContext {
    pub before: Vec<u8>,
    pub after: Vec<u8>,
}

fn fmt_byte(byte: Option<u8>) -> String {
    byte.map_or_else(|| "EOF".to_string(), |b| format!("0x{:02X}", b))
}

impl fmt::Display for DiffInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "run {} diverged at byte {}: expected {}, got {}",
            self.run_index,
            self.offset,
            fmt_byte(self.expected),
            fmt_byte(self.actual)
        )?;
        if !self.context.before.is_empty() || !self.context.after.is_empty() {
            write!(f, "\n  context: ")?;
            for b in &self.context.before {
                write!(f, "{:02X} ", b)?;
            }
            write!(f, "[{}]", fmt_byte(self.expected))?;
            for b in &self.context.after {
                write!(f, " {:02X}", b)?;
            }
        }
        Ok(())
    }
}

impl DeterminismResult {
    /// Panic with a detailed message if not deterministic.
    pub fn assert_deterministic(&self) {
        if let Some(diff) = &self.diff_info {
            panic!(
                "non-deterministic fixture output\n\
                 runs: {}\n\
                 size: {} bytes\n\
                 hash: {}\n\
                 {}",
                self.runs, self.output_size, self.hash, diff
            );
        }
    }
}

/// Runs `generate_fn` `runs` times and checks every output against the first.
///
/// # Panics
/// Panics if `runs < 2`.
pub fn verify_determinism<F, O>(generate_fn: F, runs: usize) -> DeterminismResult
where
    F: Fn() -> O,
    O: AsRef<[u8]>,
{
    assert!(runs >= 2, "Must run at least 2 times to verify determinism");

    let reference = generate_fn();
    let reference = reference.as_ref();

    let diff_info = (1..runs).find_map(|run_index| {
        let output = generate_fn();
        first_divergence(reference, output.as_ref(), run_index)
    });

    DeterminismResult {
        is_deterministic: diff_info.is_none(),
        runs,
        output_size: reference.len(),
        hash: compute_hash(reference),
        diff_info,
    }
}

/// Finds the first byte where `actual` departs from `expected`, including a
/// change in length.
pub(crate) fn first_divergence(expected: &[u8], actual: &[u8], run_index: usize) -> Option<DiffInfo> {
    let offset = match expected.iter().zip(actual).position(|(e, a)| e != a) {
        Some(offset) => offset,
        None if expected.len() == actual.len() => return None,
        None => expected.len().min(actual.len()),
    };

    Some(DiffInfo {
        offset,
        expected: expected.get(offset).copied(),
        actual: actual.get(offset).copied(),
        run_index,
        context: extract_context(expected, offset),
    })
}

/// Reference bytes around `offset`, clamped to the buffer.
pub(crate) fn extract_context(data: &[u8], offset: usize) -> DiffContext {
    let start = offset.saturating_sub(8).min(data.len());
    let end = offset.saturating_add(9).min(data.len());

    DiffContext {
        before: data[start..offset.min(data.len())].to_vec(),
        after: data.get(offset + 1..end).map(<[u8]>::to_vec).unwrap_or_default(),
    }
}

/// BLAKE3 hex digest of `data`.
pub fn compute_hash(data: &[u8]) -> String {
    pcmcheck_core::fixture_hash(data)
}
