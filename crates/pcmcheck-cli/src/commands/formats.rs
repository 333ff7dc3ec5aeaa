//! Formats command implementation
//!
//! Prints the supported bit depths with their packed width and the ffmpeg
//! raw format and codec names used to encode or decode them.

use anyhow::Result;
use colored::Colorize;
use std::process::ExitCode;

use pcmcheck_core::BitDepth;

use super::json_output::FormatEntry;

/// One table row per supported bit depth, shallowest first.
pub fn format_table() -> Vec<FormatEntry> {
    BitDepth::ALL
        .iter()
        .map(|depth| FormatEntry {
            bits: depth.bits(),
            bytes_per_sample: depth.bytes_per_sample(),
            raw_format: depth.raw_format().to_string(),
            raw_codec: depth.raw_codec().to_string(),
        })
        .collect()
}

/// Run the formats command
pub fn run(json_output: bool) -> Result<ExitCode> {
    let table = format_table();

    if json_output {
        println!("{}", serde_json::to_string_pretty(&table)?);
        return Ok(ExitCode::SUCCESS);
    }

    println!(
        "{}",
        format!("{:>5}  {:>5}  {:<7}  {:<10}", "bits", "bytes", "format", "codec")
            .cyan()
            .bold()
    );
    for entry in &table {
        println!(
            "{:>5}  {:>5}  {:<7}  {:<10}",
            entry.bits, entry.bytes_per_sample, entry.raw_format, entry.raw_codec
        );
    }

    Ok(ExitCode::SUCCESS)
}
