//! Deterministic white-noise fixture synthesis.
//!
//! Every sample position, across all channels, draws the next value from a
//! single [`Xorshift64`] sequence and quantizes it into a symmetric range that
//! stays clear of full scale, so downstream codecs never hit clipping edge
//! cases.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::PcmResult;
use crate::format::{BitDepth, PcmLayout};
use crate::rng::Xorshift64;

/// Parameters of a white-noise fixture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoiseParams {
    sample_rate: u32,
    layout: PcmLayout,
    duration_secs: u32,
}

impl NoiseParams {
    /// Validates raw parameters.
    ///
    /// Fails with [`PcmError::UnsupportedBitDepth`](crate::PcmError::UnsupportedBitDepth)
    /// for depths outside the supported set, and with
    /// [`PcmError::InvalidChannels`](crate::PcmError::InvalidChannels) for zero channels.
    pub fn new(sample_rate: u32, bits: u32, channels: usize, duration_secs: u32) -> PcmResult<Self> {
        Ok(Self::with_layout(
            sample_rate,
            PcmLayout::from_raw(bits, channels)?,
            duration_secs,
        ))
    }

    /// Parameters for an already validated layout.
    pub fn with_layout(sample_rate: u32, layout: PcmLayout, duration_secs: u32) -> Self {
        Self {
            sample_rate,
            layout,
            duration_secs,
        }
    }

    /// Sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn layout(&self) -> PcmLayout {
        self.layout
    }

    /// Duration in whole seconds.
    pub fn duration_secs(&self) -> u32 {
        self.duration_secs
    }

    /// Total number of samples across all channels.
    pub fn sample_count(&self) -> usize {
        self.sample_rate as usize * self.duration_secs as usize * self.layout.channels()
    }

    /// Exact length of the generated buffer in bytes.
    pub fn byte_len(&self) -> usize {
        self.sample_count() * self.layout.bytes_per_sample()
    }
}

/// Modulus and offset of the `(state % modulus) - offset` quantizer.
pub fn noise_range(bit_depth: BitDepth) -> (u64, i64) {
    match bit_depth {
        BitDepth::Four => (14, 7),
        BitDepth::Eight => (240, 120),
        BitDepth::Twelve => (4_000, 2_000),
        BitDepth::Sixteen => (60_000, 30_000),
        BitDepth::Twenty => (1_000_000, 500_000),
        BitDepth::TwentyFour => (14_000_000, 7_000_000),
        BitDepth::ThirtyTwo => (1_800_000_000, 900_000_000),
    }
}

/// Inclusive `(min, max)` of every value the synthesizer emits at `bit_depth`.
pub fn noise_bounds(bit_depth: BitDepth) -> (i32, i32) {
    let (modulus, offset) = noise_range(bit_depth);
    (-offset as i32, (modulus as i64 - offset - 1) as i32)
}

/// Generates interleaved little-endian white noise.
///
/// The buffer holds exactly `sample_rate * duration * channels` samples and
/// is byte-identical for identical parameters.
pub fn generate_white_noise(params: &NoiseParams) -> Vec<u8> {
    let bit_depth = params.layout.bit_depth();
    let bytes_per_sample = bit_depth.bytes_per_sample();
    let (modulus, offset) = noise_range(bit_depth);

    let mut rng = Xorshift64::fixture();
    let mut buf = vec![0u8; params.byte_len()];

    for slot in buf.chunks_exact_mut(bytes_per_sample) {
        // Bounded by the quantizer range, which fits i32 for every depth.
        let value = rng.next_centered(modulus, offset) as i32;
        bit_depth.write_sample(value, slot);
    }

    debug!(
        sample_rate = params.sample_rate,
        layout = %params.layout,
        duration_secs = params.duration_secs,
        bytes = buf.len(),
        "generated white noise fixture"
    );

    buf
}

/// BLAKE3 hex digest of a fixture, for golden-hash checks.
pub fn fixture_hash(pcm: &[u8]) -> String {
    blake3::hash(pcm).to_hex().to_string()
}
