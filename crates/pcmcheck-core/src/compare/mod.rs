//! PCM buffer comparison.
//!
//! Two fidelity contracts are supported:
//!
//! - **Exact** ([`compare_exact`]): byte-identical output, for lossless codecs.
//! - **Lossy** ([`compare_lossy`]): 16-bit output equivalent within a small
//!   per-sample delta, a bounded share of outliers and one decode frame of
//!   length divergence.
//!
//! Both produce a report instead of panicking; call `assert_passed` on the
//! report from inside a test to fail it with full diagnostics.
//!
//! ```rust
//! use pcmcheck_core::{compare_lossy, generate_white_noise, NoiseParams};
//!
//! let params = NoiseParams::new(8_000, 16, 2, 1).unwrap();
//! let reference = generate_white_noise(&params);
//!
//! let report = compare_lossy(&reference, &reference, params.layout()).unwrap();
//! report.assert_passed("decoder vs reference");
//! ```

mod diff;
mod exact;
mod lossy;
mod tolerances;

#[cfg(test)]
mod tests;

pub use diff::{find_frame_diffs, FrameDiff};
pub use exact::{compare_exact, compare_exact_with, ExactReport, LengthMismatch};
pub use lossy::{compare_lossy, compare_lossy_with, LossyReport, LossyVerdict};
pub use tolerances::CompareTolerances;
