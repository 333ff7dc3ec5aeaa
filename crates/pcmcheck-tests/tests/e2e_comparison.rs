//! End-to-end comparison tests.
//!
//! These stand in for a codec round trip: a generated fixture is passed
//! through a simulated decoder (bit-exact, lossy with bounded error, or
//! broken) and the comparators must reach the verdict a real test would.
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p pcmcheck-tests --test e2e_comparison
//! ```

use pcmcheck_core::{
    compare_exact, compare_exact_with, compare_lossy, compare_lossy_with, decode_samples,
    generate_white_noise, mono_to_stereo, BitDepth, CompareTolerances, LossyVerdict, NoiseParams,
    PcmError, PcmLayout, Xorshift64,
};
use pretty_assertions::assert_eq;

fn fixture(bits: u32, channels: usize) -> (Vec<u8>, PcmLayout) {
    let params = NoiseParams::new(8_000, bits, channels, 1).unwrap();
    (generate_white_noise(&params), params.layout())
}

/// Adds a pseudo-random error in `-max..=max` to every 16-bit sample.
fn lossy_decode(pcm: &[u8], max: i64, seed: u64) -> Vec<u8> {
    let mut rng = Xorshift64::new(seed);
    pcm.chunks_exact(2)
        .flat_map(|c| {
            let sample = i16::from_le_bytes([c[0], c[1]]) as i64;
            let jitter = rng.next_centered(max as u64 * 2 + 1, max);
            ((sample + jitter) as i16).to_le_bytes()
        })
        .collect()
}

// ============================================================================
// Bit-exact Codecs
// ============================================================================

#[test]
fn test_lossless_round_trip_every_depth() {
    for depth in BitDepth::ALL {
        let params = NoiseParams::with_layout(4_000, PcmLayout::mono(depth), 1);
        let mono = generate_white_noise(&params);
        let stereo = mono_to_stereo(&mono, depth);
        let decoded = stereo.clone();

        compare_exact(&stereo, &decoded, PcmLayout::stereo(depth))
            .assert_passed(&format!("{} round trip", depth));
    }
}

#[test]
fn test_single_flipped_bit_is_located() {
    let (expected, layout) = fixture(24, 2);
    let mut actual = expected.clone();
    // Frame 100, right channel, middle byte.
    let offset = 100 * layout.frame_size() + 3 + 1;
    actual[offset] ^= 0x10;

    let report = compare_exact(&expected, &actual, layout);
    assert!(!report.passed());
    assert_eq!(report.differing_bytes, 1);
    assert_eq!(report.first_diff_offset, Some(offset));
    assert_eq!(report.first_diff_frame(), Some(100));
    assert_eq!(report.frame_diffs.len(), 1);
    assert_eq!(report.frame_diffs[0].frame_index, 100);
    assert_eq!(report.frame_diffs[0].byte_offset, 600);
}

#[test]
fn test_exact_truncated_decoder_output() {
    let (expected, layout) = fixture(16, 2);
    let actual = expected[..expected.len() - 40].to_vec();

    let report = compare_exact(&expected, &actual, layout);
    assert!(report.passed());
    let mismatch = report.length_mismatch.expect("length mismatch is reported");
    assert_eq!(mismatch.diff(), 40);
    assert!(report.to_string().contains("40 trailing bytes not compared"));
}

#[test]
fn test_exact_reports_capped_frame_diffs() {
    let (expected, layout) = fixture(16, 1);
    let actual: Vec<u8> = expected.iter().map(|b| b.wrapping_add(1)).collect();
    let tolerances = CompareTolerances {
        max_reported_diffs: 3,
        ..CompareTolerances::default()
    };

    let report = compare_exact_with(&expected, &actual, layout, &tolerances);
    assert_eq!(report.differing_bytes, expected.len());
    assert_eq!(
        report
            .frame_diffs
            .iter()
            .map(|d| d.frame_index)
            .collect::<Vec<_>>(),
        vec![0, 1, 2]
    );
}

// ============================================================================
// Lossy Codecs
// ============================================================================

#[test]
fn test_lossy_within_two_lsb_passes() {
    let (expected, layout) = fixture(16, 2);
    let decoded = lossy_decode(&expected, 2, 99);

    let report = compare_lossy(&expected, &decoded, layout).unwrap();
    assert!(report.passed(), "{}", report);
    assert_eq!(report.large_diffs, 0);
    assert!(report.max_diff <= 2);
    assert_eq!(report.compared_samples, 16_000);
}

#[test]
fn test_lossy_heavy_distortion_fails() {
    let (expected, layout) = fixture(16, 2);
    let decoded = lossy_decode(&expected, 50, 7);

    let report = compare_lossy(&expected, &decoded, layout).unwrap();
    assert_eq!(report.verdict, LossyVerdict::TooManyLargeDiffs);
    assert!(report.large_diffs > report.max_large_diffs);
    assert_eq!(report.max_large_diffs, 160);
    assert_eq!(report.frame_diffs.len(), 5);
}

#[test]
fn test_lossy_encoder_padding_is_tolerated() {
    let (expected, layout) = fixture(16, 2);
    let mut decoded = expected.clone();
    decoded.extend(std::iter::repeat(0).take(1152 * 2 * 2));

    let report = compare_lossy(&expected, &decoded, layout).unwrap();
    assert!(report.passed());
    assert_eq!(report.length_diff(), 4608);

    decoded.extend([0, 0]);
    let report = compare_lossy(&expected, &decoded, layout).unwrap();
    assert_eq!(report.verdict, LossyVerdict::LengthMismatch);
    assert_eq!(report.compared_samples, 0);
}

#[test]
fn test_lossy_custom_tolerances_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tolerances.json");
    std::fs::write(&path, r#"{ "max_sample_delta": 60 }"#).unwrap();
    let tolerances = CompareTolerances::from_file(&path).unwrap();
    assert_eq!(tolerances.max_large_diff_percent, 1);

    let (expected, layout) = fixture(16, 2);
    let decoded = lossy_decode(&expected, 50, 7);

    let report = compare_lossy_with(&expected, &decoded, layout, &tolerances).unwrap();
    assert!(report.passed(), "{}", report);
    assert!(report.max_diff <= 50);
}

#[test]
fn test_lossy_rejects_non_16bit_fixture() {
    let (expected, layout) = fixture(24, 2);
    let err = compare_lossy(&expected, &expected, layout).unwrap_err();
    assert!(matches!(err, PcmError::UnsupportedLossyBitDepth { bits: 24 }));
}

#[test]
fn test_lossy_report_serializes() {
    let (expected, layout) = fixture(16, 1);
    let report = compare_lossy(&expected, &expected, layout).unwrap();

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["verdict"], "pass");
    assert_eq!(json["compared_samples"], 8_000);
}

#[test]
fn test_decoded_stereo_channels_match_mono_source() {
    let (mono, _) = fixture(16, 1);
    let stereo = mono_to_stereo(&mono, BitDepth::Sixteen);

    let samples = decode_samples(&stereo, BitDepth::Sixteen);
    let left: Vec<i32> = samples.iter().step_by(2).copied().collect();
    let right: Vec<i32> = samples.iter().skip(1).step_by(2).copied().collect();

    assert_eq!(left, right);
    assert_eq!(left, decode_samples(&mono, BitDepth::Sixteen));
}
