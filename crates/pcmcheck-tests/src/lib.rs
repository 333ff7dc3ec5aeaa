//! pcmcheck end-to-end test infrastructure
//!
//! This crate hosts integration tests for the fixture synthesizer and the
//! comparators, plus a small framework for proving that fixture generation
//! is reproducible:
//!
//! - **Determinism**: byte-identical output across repeated runs
//! - **Comparison**: exact and lossy contracts on realistic buffers
//! - **Properties**: proptest checks over arbitrary fixture formats
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p pcmcheck-tests
//! ```
//!
//! ## Determinism Testing
//!
//! ```rust,ignore
//! use pcmcheck_tests::determinism::{verify_determinism, DeterminismFixture};
//!
//! let result = verify_determinism(|| generate_white_noise(&params), 3);
//! assert!(result.is_deterministic);
//!
//! DeterminismFixture::full_matrix().run().assert_all_deterministic();
//! ```

pub mod determinism;

// Re-export commonly used items
pub use determinism::{
    compute_hash, verify_determinism, DeterminismFixture, DeterminismReport, DeterminismResult,
};
