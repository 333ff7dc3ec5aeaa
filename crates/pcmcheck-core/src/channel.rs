//! Channel layout conversion for packed PCM.

use crate::format::BitDepth;

/// Duplicates every mono sample into both slots of a stereo frame.
///
/// The byte layout of each sample is preserved. Trailing bytes that do not
/// form a whole sample are dropped.
///
/// # Example
///
/// ```rust
/// use pcmcheck_core::{mono_to_stereo, BitDepth};
///
/// let mono = [0x01, 0x02, 0x03, 0x04];
/// let stereo = mono_to_stereo(&mono, BitDepth::Sixteen);
/// assert_eq!(stereo, vec![0x01, 0x02, 0x01, 0x02, 0x03, 0x04, 0x03, 0x04]);
/// ```
pub fn mono_to_stereo(mono: &[u8], bit_depth: BitDepth) -> Vec<u8> {
    let bps = bit_depth.bytes_per_sample();
    let mut stereo = Vec::with_capacity(mono.len() / bps * bps * 2);

    for sample in mono.chunks_exact(bps) {
        stereo.extend_from_slice(sample);
        stereo.extend_from_slice(sample);
    }

    stereo
}
