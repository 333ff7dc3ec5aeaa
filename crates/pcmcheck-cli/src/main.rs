//! pcmcheck CLI - PCM fixture generation and comparison for codec tests
//!
//! Generates deterministic white-noise fixtures, compares decoder output
//! against them, and lists the ffmpeg names for every supported bit depth.

use clap::{Parser, Subcommand};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use pcmcheck_cli::commands;
use pcmcheck_cli::commands::compare::{CompareMode, CompareRequest};
use pcmcheck_cli::commands::generate::GenerateRequest;

/// pcmcheck - PCM fixtures and comparators for codec testing
#[derive(Parser)]
#[command(name = "pcmcheck")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Log filter used when RUST_LOG is unset (e.g. "debug", "pcmcheck_core=trace")
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a deterministic white-noise fixture as raw PCM
    Generate {
        /// Sample rate in Hz
        #[arg(long, default_value_t = 44_100)]
        rate: u32,

        /// Bit depth (4, 8, 12, 16, 20, 24 or 32)
        #[arg(long, default_value_t = 16)]
        bits: u32,

        /// Number of interleaved channels
        #[arg(long, default_value_t = 1)]
        channels: usize,

        /// Duration in whole seconds
        #[arg(long, default_value_t = 1)]
        duration: u32,

        /// Generate mono and duplicate it into both stereo channels
        #[arg(long, conflicts_with = "channels")]
        stereo_from_mono: bool,

        /// Output file path
        #[arg(short, long)]
        output: String,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Compare decoder output against a reference buffer
    Compare {
        /// Reference PCM file
        #[arg(short, long)]
        expected: String,

        /// PCM file under test
        #[arg(short, long)]
        actual: String,

        /// Bit depth of both buffers
        #[arg(long, default_value_t = 16)]
        bits: u32,

        /// Channel count of both buffers
        #[arg(long, default_value_t = 2)]
        channels: usize,

        /// Comparison contract
        #[arg(long, value_enum, default_value_t = CompareMode::Exact)]
        mode: CompareMode,

        /// Path to tolerances config file (JSON)
        #[arg(long)]
        tolerances: Option<String>,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Summarize a raw PCM buffer
    Inspect {
        /// PCM file to inspect
        #[arg(short, long)]
        input: String,

        /// Bit depth of the buffer
        #[arg(long, default_value_t = 16)]
        bits: u32,

        /// Channel count of the buffer
        #[arg(long, default_value_t = 2)]
        channels: usize,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// List supported bit depths with their ffmpeg format and codec names
    Formats {
        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },
}

fn init_logging(log_level: &str) {
    // Logs go to stderr so `--json` output on stdout stays parseable.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    let result = match cli.command {
        Commands::Generate {
            rate,
            bits,
            channels,
            duration,
            stereo_from_mono,
            output,
            json,
        } => commands::generate::run(
            &GenerateRequest {
                sample_rate: rate,
                bits,
                channels,
                duration_secs: duration,
                stereo_from_mono,
            },
            &output,
            json,
        ),
        Commands::Compare {
            expected,
            actual,
            bits,
            channels,
            mode,
            tolerances,
            json,
        } => commands::compare::run(
            &CompareRequest {
                expected: &expected,
                actual: &actual,
                bits,
                channels,
                mode,
                tolerances: tolerances.as_deref(),
            },
            json,
        ),
        Commands::Inspect {
            input,
            bits,
            channels,
            json,
        } => commands::inspect::run(&input, bits, channels, json),
        Commands::Formats { json } => commands::formats::run(json),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}
