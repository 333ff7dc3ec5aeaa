//! pcmcheck CLI library.
//!
//! Command implementations behind the `pcmcheck` binary: fixture generation,
//! buffer comparison, buffer inspection and the bit-depth format table.

pub mod commands;
