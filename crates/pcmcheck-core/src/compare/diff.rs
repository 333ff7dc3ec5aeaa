//! Frame-level diff listing shared by both comparison modes.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::format::PcmLayout;

/// One frame that differs between two buffers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameDiff {
    /// Byte offset of the frame start.
    pub byte_offset: usize,
    /// Frame index (interleaved sample position).
    pub frame_index: usize,
    /// Frame bytes from the expected buffer.
    pub expected: Vec<u8>,
    /// Frame bytes from the actual buffer.
    pub actual: Vec<u8>,
}

impl fmt::Display for FrameDiff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "sample {} (byte {}): expected={:?}, actual={:?}",
            self.frame_index, self.byte_offset, self.expected, self.actual
        )
    }
}

/// Lists up to `max_diffs` differing frames over the common length.
///
/// Only whole frames are compared; a trailing partial frame is ignored. This
/// never decides pass or fail.
pub fn find_frame_diffs(
    expected: &[u8],
    actual: &[u8],
    layout: PcmLayout,
    max_diffs: usize,
) -> Vec<FrameDiff> {
    let frame_size = layout.frame_size();

    expected
        .chunks_exact(frame_size)
        .zip(actual.chunks_exact(frame_size))
        .enumerate()
        .filter(|(_, (e, a))| e != a)
        .take(max_diffs)
        .map(|(frame_index, (e, a))| FrameDiff {
            byte_offset: frame_index * frame_size,
            frame_index,
            expected: e.to_vec(),
            actual: a.to_vec(),
        })
        .collect()
}

/// Emits each diff as a debug event tagged with `label`.
pub(crate) fn log_frame_diffs(label: &str, diffs: &[FrameDiff]) {
    for diff in diffs {
        debug!(label = label, "{}", diff);
    }
}
