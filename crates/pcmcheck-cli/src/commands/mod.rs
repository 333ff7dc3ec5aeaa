//! CLI command implementations

pub mod compare;
pub mod formats;
pub mod generate;
pub mod inspect;
pub mod json_output;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use pcmcheck_core::PcmLayout;

/// Reads a raw PCM file.
pub(crate) fn read_pcm(path: &str) -> Result<Vec<u8>> {
    fs::read(Path::new(path)).with_context(|| format!("Failed to read PCM file: {}", path))
}

/// Builds a layout from CLI arguments.
pub(crate) fn layout_from_args(bits: u32, channels: usize) -> Result<PcmLayout> {
    PcmLayout::from_raw(bits, channels).context("Invalid PCM layout")
}
