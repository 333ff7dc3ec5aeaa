//! Test-generating macros for determinism checks.

/// Generates a `#[test]` that runs an expression several times and asserts
/// byte-identical output. The expression must yield something implementing
/// `AsRef<[u8]>`.
///
/// # Example
///
/// ```rust,ignore
/// use pcmcheck_tests::test_determinism;
///
/// test_determinism!(stereo_expansion, {
///     let mono = generate_white_noise(&NoiseParams::new(8_000, 16, 1, 1).unwrap());
///     mono_to_stereo(&mono, BitDepth::Sixteen)
/// });
///
/// test_determinism!(noise_24bit, runs = 5, {
///     generate_white_noise(&NoiseParams::new(8_000, 24, 2, 1).unwrap())
/// });
/// ```
#[macro_export]
macro_rules! test_determinism {
    ($name:ident, runs = $runs:expr, $generate:expr) => {
        #[test]
        fn $name() {
            $crate::verify_determinism(|| $generate, $runs).assert_deterministic();
        }
    };

    ($name:ident, $generate:expr) => {
        $crate::test_determinism!($name, runs = 3, $generate);
    };
}

/// Generates a `#[test]` that checks white-noise generation for one format
/// is deterministic and produces exactly the expected number of bytes.
///
/// # Example
///
/// ```rust,ignore
/// use pcmcheck_tests::test_fixture_determinism;
///
/// test_fixture_determinism!(noise_16bit_stereo, rate = 8_000, bits = 16, channels = 2, secs = 1);
/// ```
#[macro_export]
macro_rules! test_fixture_determinism {
    ($name:ident, rate = $rate:expr, bits = $bits:expr, channels = $channels:expr, secs = $secs:expr) => {
        #[test]
        fn $name() {
            let params = ::pcmcheck_core::NoiseParams::new($rate, $bits, $channels, $secs)
                .expect("fixture parameters should be valid");
            let result =
                $crate::verify_determinism(|| ::pcmcheck_core::generate_white_noise(&params), 3);
            result.assert_deterministic();
            assert_eq!(result.output_size, params.byte_len());
        }
    };
}
