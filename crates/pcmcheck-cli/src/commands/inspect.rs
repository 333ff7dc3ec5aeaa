//! Inspect command implementation
//!
//! Summarizes a raw PCM buffer: size, frame count, sample range and hash.

use anyhow::Result;
use colored::Colorize;
use std::process::ExitCode;

use pcmcheck_core::{decode_samples, fixture_hash, PcmLayout};

use super::json_output::InspectOutput;
use super::{layout_from_args, read_pcm};

/// Summarizes `pcm` as laid out by `layout`.
pub fn summarize(input: &str, pcm: &[u8], layout: PcmLayout) -> InspectOutput {
    let samples = decode_samples(pcm, layout.bit_depth());

    InspectOutput {
        input: input.to_string(),
        layout,
        bytes: pcm.len(),
        frames: layout.frame_count(pcm.len()),
        samples: samples.len(),
        well_formed: layout.is_well_formed(pcm.len()),
        min_sample: samples.iter().copied().min(),
        max_sample: samples.iter().copied().max(),
        hash: fixture_hash(pcm),
    }
}

/// Run the inspect command
pub fn run(input: &str, bits: u32, channels: usize, json_output: bool) -> Result<ExitCode> {
    let layout = layout_from_args(bits, channels)?;
    let pcm = read_pcm(input)?;
    let summary = summarize(input, &pcm, layout);

    if json_output {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(ExitCode::SUCCESS);
    }

    println!("{} {}", "PCM buffer:".cyan().bold(), input);
    println!("  {} {}", "Layout:".dimmed(), summary.layout);
    println!("  {} {} bytes", "Size:".dimmed(), summary.bytes);
    println!(
        "  {} {} ({} samples)",
        "Frames:".dimmed(),
        summary.frames,
        summary.samples
    );
    if let (Some(min), Some(max)) = (summary.min_sample, summary.max_sample) {
        println!("  {} [{}, {}]", "Range:".dimmed(), min, max);
    }
    println!("  {} {}", "BLAKE3:".dimmed(), summary.hash);

    if !summary.well_formed {
        println!(
            "{} {} trailing bytes do not form a whole frame",
            "warning:".yellow().bold(),
            summary.bytes % layout.frame_size()
        );
    }

    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pcmcheck_core::BitDepth;

    #[test]
    fn test_summarize_stereo_16bit() {
        let pcm: Vec<u8> = [100i16, -100, 5, 7]
            .iter()
            .flat_map(|s| s.to_le_bytes())
            .collect();
        let summary = summarize("x.pcm", &pcm, PcmLayout::stereo(BitDepth::Sixteen));

        assert_eq!(summary.frames, 2);
        assert_eq!(summary.samples, 4);
        assert!(summary.well_formed);
        assert_eq!(summary.min_sample, Some(-100));
        assert_eq!(summary.max_sample, Some(100));
    }

    #[test]
    fn test_summarize_partial_frame() {
        let summary = summarize("x.pcm", &[0; 7], PcmLayout::stereo(BitDepth::Sixteen));
        assert_eq!(summary.frames, 1);
        assert_eq!(summary.samples, 3);
        assert!(!summary.well_formed);
    }

    #[test]
    fn test_summarize_empty() {
        let summary = summarize("x.pcm", &[], PcmLayout::mono(BitDepth::Eight));
        assert_eq!(summary.frames, 0);
        assert_eq!(summary.min_sample, None);
        assert!(summary.well_formed);
    }
}
