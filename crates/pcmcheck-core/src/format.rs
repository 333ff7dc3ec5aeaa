//! PCM format parameters: bit depths, channel layout and transcoder tokens.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{PcmError, PcmResult};

/// Bits per sample supported by the synthesizer and comparators.
///
/// 4, 12 and 20-bit samples are not bit-packed: each occupies the same
/// number of bytes as the next byte-aligned depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum BitDepth {
    Four,
    Eight,
    Twelve,
    Sixteen,
    Twenty,
    TwentyFour,
    ThirtyTwo,
}

impl BitDepth {
    /// Every supported depth, smallest first.
    pub const ALL: [BitDepth; 7] = [
        BitDepth::Four,
        BitDepth::Eight,
        BitDepth::Twelve,
        BitDepth::Sixteen,
        BitDepth::Twenty,
        BitDepth::TwentyFour,
        BitDepth::ThirtyTwo,
    ];

    /// Looks up a depth by its bit count.
    pub fn from_bits(bits: u32) -> Option<Self> {
        match bits {
            4 => Some(BitDepth::Four),
            8 => Some(BitDepth::Eight),
            12 => Some(BitDepth::Twelve),
            16 => Some(BitDepth::Sixteen),
            20 => Some(BitDepth::Twenty),
            24 => Some(BitDepth::TwentyFour),
            32 => Some(BitDepth::ThirtyTwo),
            _ => None,
        }
    }

    /// Number of bits per sample.
    pub fn bits(self) -> u32 {
        match self {
            BitDepth::Four => 4,
            BitDepth::Eight => 8,
            BitDepth::Twelve => 12,
            BitDepth::Sixteen => 16,
            BitDepth::Twenty => 20,
            BitDepth::TwentyFour => 24,
            BitDepth::ThirtyTwo => 32,
        }
    }

    /// Bytes one sample occupies in a buffer.
    pub fn bytes_per_sample(self) -> usize {
        match self {
            BitDepth::Four | BitDepth::Eight => 1,
            BitDepth::Twelve | BitDepth::Sixteen => 2,
            BitDepth::Twenty | BitDepth::TwentyFour => 3,
            BitDepth::ThirtyTwo => 4,
        }
    }

    /// ffmpeg raw demuxer/muxer format name (`-f`).
    pub fn raw_format(self) -> &'static str {
        match self {
            BitDepth::Eight => "s8",
            BitDepth::TwentyFour => "s24le",
            BitDepth::ThirtyTwo => "s32le",
            _ => "s16le",
        }
    }

    /// ffmpeg PCM codec name (`-acodec`).
    pub fn raw_codec(self) -> &'static str {
        match self {
            BitDepth::Eight => "pcm_s8",
            BitDepth::TwentyFour => "pcm_s24le",
            BitDepth::ThirtyTwo => "pcm_s32le",
            _ => "pcm_s16le",
        }
    }

    /// Packs `value` little-endian into `out`, which must be exactly
    /// [`bytes_per_sample`](Self::bytes_per_sample) bytes long.
    pub fn write_sample(self, value: i32, out: &mut [u8]) {
        let bytes = value.to_le_bytes();
        out.copy_from_slice(&bytes[..self.bytes_per_sample()]);
    }

    /// Reads one packed sample and sign-extends it to `i32`.
    pub fn read_sample(self, bytes: &[u8]) -> i32 {
        match self.bytes_per_sample() {
            1 => bytes[0] as i8 as i32,
            2 => i16::from_le_bytes([bytes[0], bytes[1]]) as i32,
            // Shift the 24-bit value into the top of the word, then back down
            // arithmetically to recover the sign.
            3 => i32::from_le_bytes([0, bytes[0], bytes[1], bytes[2]]) >> 8,
            _ => i32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]),
        }
    }
}

impl TryFrom<u32> for BitDepth {
    type Error = PcmError;

    fn try_from(bits: u32) -> PcmResult<Self> {
        BitDepth::from_bits(bits).ok_or(PcmError::UnsupportedBitDepth { bits })
    }
}

impl From<BitDepth> for u32 {
    fn from(depth: BitDepth) -> u32 {
        depth.bits()
    }
}

impl fmt::Display for BitDepth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-bit", self.bits())
    }
}

/// Bytes per sample for an arbitrary bit count.
///
/// Supported depths use the fixed table; anything else falls back to
/// `bits / 8`, which is only meaningful for byte-aligned depths.
pub fn bytes_per_sample(bits: u32) -> usize {
    BitDepth::from_bits(bits).map_or(bits as usize / 8, BitDepth::bytes_per_sample)
}

/// Sample layout of an interleaved PCM buffer.
///
/// The channel count is always at least 1, including layouts read back from
/// JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawLayout")]
pub struct PcmLayout {
    bit_depth: BitDepth,
    channels: usize,
}

/// Unvalidated wire form of [`PcmLayout`].
#[derive(Deserialize)]
struct RawLayout {
    bit_depth: BitDepth,
    channels: usize,
}

impl TryFrom<RawLayout> for PcmLayout {
    type Error = PcmError;

    fn try_from(raw: RawLayout) -> PcmResult<Self> {
        PcmLayout::new(raw.bit_depth, raw.channels)
    }
}

impl PcmLayout {
    /// Creates a layout, rejecting a zero channel count.
    pub fn new(bit_depth: BitDepth, channels: usize) -> PcmResult<Self> {
        if channels == 0 {
            return Err(PcmError::InvalidChannels { channels });
        }
        Ok(Self {
            bit_depth,
            channels,
        })
    }

    /// Parses a raw bit count and channel count.
    pub fn from_raw(bits: u32, channels: usize) -> PcmResult<Self> {
        Self::new(BitDepth::try_from(bits)?, channels)
    }

    /// Mono layout.
    pub fn mono(bit_depth: BitDepth) -> Self {
        Self {
            bit_depth,
            channels: 1,
        }
    }

    /// Stereo layout.
    pub fn stereo(bit_depth: BitDepth) -> Self {
        Self {
            bit_depth,
            channels: 2,
        }
    }

    pub fn bit_depth(&self) -> BitDepth {
        self.bit_depth
    }

    /// Number of interleaved channels, never zero.
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Bytes per sample (per channel).
    pub fn bytes_per_sample(&self) -> usize {
        self.bit_depth.bytes_per_sample()
    }

    /// Bytes per frame (one sample for every channel).
    pub fn frame_size(&self) -> usize {
        self.bytes_per_sample() * self.channels
    }

    /// Number of complete frames in a buffer of `len` bytes.
    pub fn frame_count(&self, len: usize) -> usize {
        len / self.frame_size()
    }

    /// Frame index containing the byte at `offset`.
    pub fn frame_index(&self, offset: usize) -> usize {
        offset / self.bytes_per_sample() / self.channels
    }

    /// Whether `len` bytes hold a whole number of frames.
    pub fn is_well_formed(&self, len: usize) -> bool {
        len % self.frame_size() == 0
    }
}

impl fmt::Display for PcmLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} x {}ch", self.bit_depth, self.channels)
    }
}

/// Decodes every complete sample in `pcm` to a sign-extended `i32`.
pub fn decode_samples(pcm: &[u8], bit_depth: BitDepth) -> Vec<i32> {
    pcm.chunks_exact(bit_depth.bytes_per_sample())
        .map(|chunk| bit_depth.read_sample(chunk))
        .collect()
}
