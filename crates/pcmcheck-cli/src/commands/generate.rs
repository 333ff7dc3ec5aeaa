//! Generate command implementation
//!
//! Writes a deterministic white-noise fixture as raw interleaved PCM.

use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::path::Path;
use std::process::ExitCode;
use tracing::info;

use pcmcheck_core::{
    fixture_hash, generate_white_noise, mono_to_stereo, NoiseParams, PcmError, PcmLayout,
};

use super::json_output::{error_codes, GenerateOutput, JsonError};

/// Fixture request as given on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerateRequest {
    pub sample_rate: u32,
    pub bits: u32,
    pub channels: usize,
    pub duration_secs: u32,
    /// Generate mono, then duplicate every sample into a stereo frame.
    pub stereo_from_mono: bool,
}

/// Builds the fixture bytes and the parameters describing them.
///
/// With `stereo_from_mono` the requested channel count is ignored and the
/// result is always two channels.
pub fn build_fixture(request: &GenerateRequest) -> Result<(NoiseParams, Vec<u8>), PcmError> {
    let source_channels = if request.stereo_from_mono {
        1
    } else {
        request.channels
    };
    let source = NoiseParams::new(
        request.sample_rate,
        request.bits,
        source_channels,
        request.duration_secs,
    )?;
    let pcm = generate_white_noise(&source);

    if !request.stereo_from_mono {
        return Ok((source, pcm));
    }

    let bit_depth = source.layout().bit_depth();
    let stereo = NoiseParams::with_layout(
        source.sample_rate(),
        PcmLayout::stereo(bit_depth),
        source.duration_secs(),
    );
    Ok((stereo, mono_to_stereo(&pcm, bit_depth)))
}

/// Run the generate command
///
/// # Arguments
/// * `request` - Fixture parameters
/// * `output` - Destination file path
/// * `json_output` - Whether to output machine-readable JSON
///
/// # Returns
/// Exit code: 0 on success, 1 on error
pub fn run(request: &GenerateRequest, output: &str, json_output: bool) -> Result<ExitCode> {
    if json_output {
        run_json(request, output)
    } else {
        run_human(request, output)
    }
}

fn run_human(request: &GenerateRequest, output: &str) -> Result<ExitCode> {
    let (params, pcm) = build_fixture(request)?;
    write_fixture(output, &pcm)?;
    let hash = fixture_hash(&pcm);

    info!(output, bytes = pcm.len(), "wrote fixture");

    println!("{} {}", "Generated fixture:".green().bold(), output);
    println!(
        "  {} {} Hz, {}, {}s",
        "Format:".dimmed(),
        params.sample_rate(),
        params.layout(),
        params.duration_secs()
    );
    println!("  {} {} bytes", "Size:".dimmed(), pcm.len());
    println!("  {} {}", "BLAKE3:".dimmed(), hash);

    Ok(ExitCode::SUCCESS)
}

fn run_json(request: &GenerateRequest, output: &str) -> Result<ExitCode> {
    let result = match build_fixture(request) {
        Ok((params, pcm)) => match write_fixture(output, &pcm) {
            Ok(()) => GenerateOutput::success(
                output.to_string(),
                params,
                pcm.len(),
                fixture_hash(&pcm),
            ),
            Err(e) => GenerateOutput::failure(
                output.to_string(),
                vec![JsonError::new(error_codes::FILE_WRITE, format!("{:#}", e)).with_file(output)],
            ),
        },
        Err(e) => GenerateOutput::failure(output.to_string(), vec![JsonError::from(&e)]),
    };

    println!("{}", serde_json::to_string_pretty(&result)?);

    Ok(if result.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}

fn write_fixture(output: &str, pcm: &[u8]) -> Result<()> {
    let path = Path::new(output);
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    fs::write(path, pcm).with_context(|| format!("Failed to write fixture: {}", output))
}
