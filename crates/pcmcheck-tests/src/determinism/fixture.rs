//! Determinism checks across a matrix of fixture formats.

use pcmcheck_core::{generate_white_noise, BitDepth, NoiseParams, PcmLayout};

use crate::determinism::core::verify_determinism;
use crate::determinism::report::{DeterminismReport, DeterminismReportEntry};

/// Sample rates exercised by [`DeterminismFixture::full_matrix`].
pub const MATRIX_SAMPLE_RATES: [u32; 3] = [8_000, 44_100, 96_000];

/// Channel counts exercised by [`DeterminismFixture::full_matrix`].
pub const MATRIX_CHANNELS: [usize; 3] = [1, 2, 6];

/// Determinism test over several fixture formats.
///
/// # Example
///
/// ```rust
/// use pcmcheck_core::NoiseParams;
/// use pcmcheck_tests::DeterminismFixture;
///
/// let report = DeterminismFixture::new()
///     .add_params(NoiseParams::new(8_000, 16, 2, 1).unwrap())
///     .add_params(NoiseParams::new(8_000, 24, 1, 1).unwrap())
///     .runs(4)
///     .run();
///
/// assert!(report.all_deterministic());
/// ```
#[derive(Debug, Clone)]
pub struct DeterminismFixture {
    /// Formats to generate.
    pub params: Vec<NoiseParams>,
    /// Number of runs per format.
    pub runs: usize,
}

impl Default for DeterminismFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl DeterminismFixture {
    /// Create a new empty fixture.
    pub fn new() -> Self {
        Self {
            params: Vec::new(),
            runs: 3,
        }
    }

    /// Every supported bit depth at every matrix sample rate and channel
    /// count, one second each.
    pub fn full_matrix() -> Self {
        let mut fixture = Self::new();
        for depth in BitDepth::ALL {
            for &sample_rate in &MATRIX_SAMPLE_RATES {
                for &channels in &MATRIX_CHANNELS {
                    // Matrix channel counts are all non-zero.
                    if let Ok(layout) = PcmLayout::new(depth, channels) {
                        fixture
                            .params
                            .push(NoiseParams::with_layout(sample_rate, layout, 1));
                    }
                }
            }
        }
        fixture
    }

    /// Add one fixture format.
    pub fn add_params(mut self, params: NoiseParams) -> Self {
        self.params.push(params);
        self
    }

    /// Set the number of runs per format.
    pub fn runs(mut self, runs: usize) -> Self {
        assert!(runs >= 2, "Must run at least 2 times");
        self.runs = runs;
        self
    }

    /// Generate every format `runs` times and compare the outputs.
    pub fn run(&self) -> DeterminismReport {
        self.params
            .iter()
            .map(|params| DeterminismReportEntry {
                params: *params,
                result: verify_determinism(|| generate_white_noise(params), self.runs),
            })
            .collect()
    }
}
