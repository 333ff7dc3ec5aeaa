//! Compare command implementation
//!
//! Compares a reference PCM buffer against decoder output, either byte for
//! byte or within the 16-bit lossy codec tolerance.

use anyhow::{Context, Result};
use clap::ValueEnum;
use colored::Colorize;
use std::path::Path;
use std::process::ExitCode;

use pcmcheck_core::{
    compare_exact_with, compare_lossy_with, fixture_hash, CompareTolerances, PcmLayout,
    PcmResult,
};

use super::json_output::{error_codes, CompareOutput, CompareReport, JsonError};
use super::{layout_from_args, read_pcm};

/// Comparison contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CompareMode {
    /// Byte-identical over the common length
    Exact,
    /// 16-bit only; small per-sample error and one frame of length slack
    Lossy,
}

/// Paths and format of one comparison.
#[derive(Debug, Clone)]
pub struct CompareRequest<'a> {
    pub expected: &'a str,
    pub actual: &'a str,
    pub bits: u32,
    pub channels: usize,
    pub mode: CompareMode,
    pub tolerances: Option<&'a str>,
}

/// Run the compare command
///
/// # Returns
/// Exit code: 0 when the buffers satisfy the contract, 1 otherwise
pub fn run(request: &CompareRequest<'_>, json_output: bool) -> Result<ExitCode> {
    if json_output {
        run_json(request)
    } else {
        run_human(request)
    }
}

/// Loads tolerances from `path`, or the defaults.
pub fn load_tolerances(path: Option<&str>) -> Result<CompareTolerances> {
    match path {
        Some(path) => CompareTolerances::from_file(Path::new(path))
            .with_context(|| format!("Failed to load tolerances: {}", path)),
        None => Ok(CompareTolerances::default()),
    }
}

/// Runs the selected comparison.
pub fn compare_buffers(
    expected: &[u8],
    actual: &[u8],
    layout: PcmLayout,
    mode: CompareMode,
    tolerances: &CompareTolerances,
) -> PcmResult<CompareReport> {
    Ok(match mode {
        CompareMode::Exact => {
            CompareReport::Exact(compare_exact_with(expected, actual, layout, tolerances))
        }
        CompareMode::Lossy => {
            CompareReport::Lossy(compare_lossy_with(expected, actual, layout, tolerances)?)
        }
    })
}

fn run_human(request: &CompareRequest<'_>) -> Result<ExitCode> {
    let layout = layout_from_args(request.bits, request.channels)?;
    let tolerances = load_tolerances(request.tolerances)?;
    let expected = read_pcm(request.expected)?;
    let actual = read_pcm(request.actual)?;

    println!("{}", "Comparing PCM:".cyan().bold());
    println!("  {} {}", "Expected:".dimmed(), request.expected);
    println!("  {} {}", "Actual:".dimmed(), request.actual);
    println!("  {} {}", "Layout:".dimmed(), layout);
    println!(
        "  {} {}",
        "Mode:".dimmed(),
        match request.mode {
            CompareMode::Exact => "exact",
            CompareMode::Lossy => "lossy",
        }
    );

    let report = compare_buffers(&expected, &actual, layout, request.mode, &tolerances)?;
    let summary = match &report {
        CompareReport::Exact(report) => report.to_string(),
        CompareReport::Lossy(report) => report.to_string(),
    };

    if report.passed() {
        println!("\n{} {}", "PASS".green().bold(), summary);
        Ok(ExitCode::SUCCESS)
    } else {
        println!("\n{} {}", "FAIL".red().bold(), summary);
        Ok(ExitCode::from(1))
    }
}

fn run_json(request: &CompareRequest<'_>) -> Result<ExitCode> {
    let mut output = CompareOutput {
        passed: false,
        expected: request.expected.to_string(),
        actual: request.actual.to_string(),
        expected_hash: None,
        actual_hash: None,
        report: None,
        errors: Vec::new(),
    };

    if let Err(error) = compare_json(request, &mut output) {
        output.errors.push(error);
    }

    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(if output.passed {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}

fn compare_json(request: &CompareRequest<'_>, output: &mut CompareOutput) -> Result<(), JsonError> {
    let layout =
        PcmLayout::from_raw(request.bits, request.channels).map_err(|e| JsonError::from(&e))?;

    let tolerances = match request.tolerances {
        Some(path) => CompareTolerances::from_file(Path::new(path))
            .map_err(|e| JsonError::from(&e).with_file(path))?,
        None => CompareTolerances::default(),
    };

    let read = |path: &str| {
        read_pcm(path).map_err(|e| {
            JsonError::new(error_codes::FILE_READ, format!("{:#}", e)).with_file(path)
        })
    };
    let expected = read(request.expected)?;
    let actual = read(request.actual)?;
    output.expected_hash = Some(fixture_hash(&expected));
    output.actual_hash = Some(fixture_hash(&actual));

    let report = compare_buffers(&expected, &actual, layout, request.mode, &tolerances)
        .map_err(|e| JsonError::from(&e))?;

    output.passed = report.passed();
    output.report = Some(report);
    Ok(())
}
