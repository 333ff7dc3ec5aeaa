//! Determinism testing for PCM fixtures.
//!
//! Fixture generation must be reproducible: the same parameters produce the
//! same bytes on every run and every platform, otherwise golden comparisons
//! against codec output are meaningless. This module verifies that property
//! for a single generator or across a matrix of fixture formats.

pub mod core;
pub mod fixture;
#[macro_use]
pub mod macros;
pub mod report;


pub use core::{compute_hash, verify_determinism, DeterminismResult, DiffContext, DiffInfo};
pub use fixture::DeterminismFixture;
pub use report::{DeterminismReport, DeterminismReportEntry};
