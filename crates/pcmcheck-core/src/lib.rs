//! Deterministic PCM fixtures and sample comparison for codec test suites.
//!
//! This crate validates audio pipelines without real-world recordings:
//!
//! - **Synthesis**: [`generate_white_noise`] produces reproducible raw PCM at
//!   4, 8, 12, 16, 20, 24 or 32 bits, any channel count and sample rate.
//! - **Exact comparison**: [`compare_exact`] for lossless codecs.
//! - **Lossy comparison**: [`compare_lossy`] for 16-bit output of lossy
//!   decoders, tolerating small LSB drift and one frame of length divergence.
//!
//! All buffers are headerless, interleaved and little-endian.
//!
//! # Example
//!
//! ```rust
//! use pcmcheck_core::{compare_exact, generate_white_noise, mono_to_stereo, NoiseParams, PcmLayout};
//!
//! let params = NoiseParams::new(44_100, 24, 1, 1).unwrap();
//! let mono = generate_white_noise(&params);
//! let stereo = mono_to_stereo(&mono, params.layout().bit_depth());
//!
//! let decoded = stereo.clone(); // output of the decoder under test
//! let layout = PcmLayout::stereo(params.layout().bit_depth());
//! compare_exact(&stereo, &decoded, layout).assert_passed("alac round trip");
//! ```

pub mod channel;
pub mod compare;
pub mod error;
pub mod format;
pub mod rng;
pub mod synth;

// Re-export commonly used items
pub use channel::mono_to_stereo;
pub use compare::{
    compare_exact, compare_exact_with, compare_lossy, compare_lossy_with, find_frame_diffs,
    CompareTolerances, ExactReport, FrameDiff, LengthMismatch, LossyReport, LossyVerdict,
};
pub use error::{PcmError, PcmResult};
pub use format::{bytes_per_sample, decode_samples, BitDepth, PcmLayout};
pub use rng::{Xorshift64, FIXTURE_SEED};
pub use synth::{fixture_hash, generate_white_noise, noise_bounds, NoiseParams};
