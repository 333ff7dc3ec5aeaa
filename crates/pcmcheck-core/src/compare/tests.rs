//! Tests for exact and lossy comparison.

use pretty_assertions::assert_eq;

use super::*;
use crate::format::{BitDepth, PcmLayout};
use crate::synth::{generate_white_noise, NoiseParams};
use crate::PcmError;

fn pcm16(samples: &[i16]) -> Vec<u8> {
    samples.iter().flat_map(|s| s.to_le_bytes()).collect()
}

fn noise16(samples: usize) -> Vec<i16> {
    let params = NoiseParams::new(samples as u32, 16, 1, 1).unwrap();
    generate_white_noise(&params)
        .chunks_exact(2)
        .map(|c| i16::from_le_bytes([c[0], c[1]]))
        .collect()
}

fn stereo16() -> PcmLayout {
    PcmLayout::stereo(BitDepth::Sixteen)
}

// ==========================================================================
// Exact comparison
// ==========================================================================

#[test]
fn test_exact_reflexive() {
    let params = NoiseParams::new(4_000, 24, 2, 1).unwrap();
    let pcm = generate_white_noise(&params);
    let copy = pcm.clone();

    let report = compare_exact(&pcm, &copy, params.layout());
    assert!(report.passed());
    assert_eq!(report.differing_bytes, 0);
    assert_eq!(report.first_diff_offset, None);
    assert!(report.frame_diffs.is_empty());
    assert!(report.length_mismatch.is_none());
    report.assert_passed("reflexive");
}

#[test]
fn test_exact_single_flipped_byte() {
    let params = NoiseParams::new(1_000, 16, 2, 1).unwrap();
    let expected = generate_white_noise(&params);
    let mut actual = expected.clone();
    actual[1_234] ^= 0x01;

    let report = compare_exact(&expected, &actual, params.layout());
    assert!(!report.passed());
    assert_eq!(report.differing_bytes, 1);
    assert_eq!(report.first_diff_offset, Some(1_234));
    // 1234 / 2 bytes / 2 channels
    assert_eq!(report.first_diff_frame(), Some(308));
    assert_eq!(report.frame_diffs.len(), 1);
    assert_eq!(report.frame_diffs[0].frame_index, 308);
    assert_eq!(report.frame_diffs[0].byte_offset, 1_232);
}

#[test]
fn test_exact_percent_and_display() {
    let expected = vec![0u8; 200];
    let mut actual = expected.clone();
    actual[10] = 1;
    actual[11] = 1;

    let report = compare_exact(&expected, &actual, PcmLayout::mono(BitDepth::Eight));
    assert_eq!(report.differing_bytes, 2);
    assert!((report.differing_percent() - 1.0).abs() < 1e-9);

    let display = report.to_string();
    assert!(display.contains("2 differing bytes (1.00%)"));
    assert!(display.contains("first diff at byte 10 (sample 10)"));
    assert!(display.contains("sample 11"));
}

#[test]
fn test_exact_reports_at_most_max_diffs() {
    let expected = vec![0u8; 64];
    let actual = vec![0xFFu8; 64];

    let report = compare_exact(&expected, &actual, stereo16());
    assert_eq!(report.differing_bytes, 64);
    assert_eq!(report.frame_diffs.len(), 5);

    let tolerances = CompareTolerances {
        max_reported_diffs: 2,
        ..Default::default()
    };
    let report = compare_exact_with(&expected, &actual, stereo16(), &tolerances);
    assert_eq!(report.frame_diffs.len(), 2);
}

#[test]
fn test_exact_length_mismatch_truncates() {
    let expected = vec![7u8; 100];
    let actual = vec![7u8; 120];

    let report = compare_exact(&expected, &actual, stereo16());
    assert!(report.passed());
    assert_eq!(report.compared_bytes, 100);
    assert_eq!(
        report.length_mismatch,
        Some(LengthMismatch {
            expected_len: 100,
            actual_len: 120
        })
    );
    assert!(report.to_string().contains("20 trailing bytes not compared"));
}

#[test]
fn test_exact_empty_buffers() {
    let report = compare_exact(&[], &[], stereo16());
    assert!(report.passed());
    assert_eq!(report.differing_percent(), 0.0);
}

#[test]
#[should_panic(expected = "decoder vs ffmpeg: PCM mismatch")]
fn test_exact_assert_panics_with_label() {
    let report = compare_exact(&[1, 2], &[1, 3], PcmLayout::mono(BitDepth::Eight));
    report.assert_passed("decoder vs ffmpeg");
}

// ==========================================================================
// Lossy comparison
// ==========================================================================

#[test]
fn test_lossy_rejects_non_16_bit() {
    for depth in BitDepth::ALL {
        if depth == BitDepth::Sixteen {
            continue;
        }
        let result = compare_lossy(&[0; 12], &[0; 12], PcmLayout::stereo(depth));
        assert_eq!(
            result,
            Err(PcmError::UnsupportedLossyBitDepth { bits: depth.bits() })
        );
    }
}

#[test]
fn test_lossy_identical_passes() {
    let samples = noise16(2_000);
    let report = compare_lossy(&pcm16(&samples), &pcm16(&samples), stereo16()).unwrap();
    assert!(report.passed());
    assert_eq!(report.compared_samples, 2_000);
    assert_eq!(report.max_diff, 0);
}

#[test]
fn test_lossy_delta_two_everywhere_passes() {
    let a = noise16(2_000);
    let b: Vec<i16> = a
        .iter()
        .enumerate()
        .map(|(i, &s)| if i % 2 == 0 { s + 2 } else { s - 2 })
        .collect();

    let report = compare_lossy(&pcm16(&a), &pcm16(&b), stereo16()).unwrap();
    assert!(report.passed(), "{}", report);
    assert_eq!(report.large_diffs, 0);
    assert_eq!(report.max_diff, 2);
}

#[test]
fn test_lossy_delta_three_over_one_percent_fails() {
    let a = noise16(1_000);
    let mut b = a.clone();
    for s in b.iter_mut().take(11) {
        *s += 3;
    }

    let report = compare_lossy(&pcm16(&a), &pcm16(&b), stereo16()).unwrap();
    assert_eq!(report.verdict, LossyVerdict::TooManyLargeDiffs);
    assert_eq!(report.large_diffs, 11);
    assert_eq!(report.max_large_diffs, 10);
    assert_eq!(report.max_diff, 3);
    assert_eq!(report.frame_diffs.len(), 5);
    assert!(report
        .to_string()
        .contains("11 samples (1.10%) differ by more than +/-2, max diff=3"));
}

#[test]
fn test_lossy_delta_three_under_one_percent_passes() {
    let a = noise16(1_000);
    let mut b = a.clone();
    for s in b.iter_mut().skip(100).take(9) {
        *s -= 3;
    }

    let report = compare_lossy(&pcm16(&a), &pcm16(&b), stereo16()).unwrap();
    assert!(report.passed(), "{}", report);
    assert_eq!(report.large_diffs, 9);
    assert_eq!(report.max_diff, 3);
    assert!(report.frame_diffs.is_empty());
}

#[test]
fn test_lossy_exactly_one_percent_passes() {
    let a = noise16(1_000);
    let mut b = a.clone();
    for s in b.iter_mut().take(10) {
        *s += 50;
    }

    let report = compare_lossy(&pcm16(&a), &pcm16(&b), stereo16()).unwrap();
    assert!(report.passed());
    assert_eq!(report.max_diff, 50);
}

#[test]
fn test_lossy_uses_signed_interpretation() {
    // -1 vs 1 is a delta of 2, not 65534.
    let a = pcm16(&[-1, -30_000, 5]);
    let b = pcm16(&[1, -29_998, 3]);

    let report = compare_lossy(&a, &b, PcmLayout::mono(BitDepth::Sixteen)).unwrap();
    assert_eq!(report.max_diff, 2);
    assert_eq!(report.large_diffs, 0);
}

#[test]
fn test_lossy_full_scale_delta_does_not_wrap() {
    let a = pcm16(&[30_000]);
    let b = pcm16(&[-30_000]);

    let report = compare_lossy(&a, &b, PcmLayout::mono(BitDepth::Sixteen)).unwrap();
    assert_eq!(report.max_diff, 60_000);
}

#[test]
fn test_lossy_frame_length_tolerance_boundary() {
    let a = vec![0u8; 8_000];

    let b = vec![0u8; 8_000 + 1152 * 2 * 2];
    let report = compare_lossy(&a, &b, stereo16()).unwrap();
    assert!(report.passed());
    assert_eq!(report.length_diff(), 4_608);
    assert!(report.to_string().contains("within tolerance"));

    let b = vec![0u8; 8_000 + 1152 * 2 * 2 + 1];
    let report = compare_lossy(&a, &b, stereo16()).unwrap();
    assert_eq!(report.verdict, LossyVerdict::LengthMismatch);
    assert_eq!(report.compared_samples, 0);
    assert_eq!(
        report.to_string(),
        "length mismatch: a=8000, b=12609 (diff=4609 exceeds tolerance 4608)"
    );
}

#[test]
fn test_lossy_length_tolerance_is_symmetric() {
    let a = vec![0u8; 10_000];
    let b = vec![0u8; 10_000 - 2_305];
    let report = compare_lossy(&a, &b, PcmLayout::mono(BitDepth::Sixteen)).unwrap();
    assert_eq!(report.verdict, LossyVerdict::LengthMismatch);
}

#[test]
fn test_lossy_custom_tolerances() {
    let a = noise16(100);
    let b: Vec<i16> = a.iter().map(|s| s + 4).collect();

    let strict = compare_lossy(&pcm16(&a), &pcm16(&b), stereo16()).unwrap();
    assert!(!strict.passed());

    let relaxed = CompareTolerances {
        max_sample_delta: 4,
        ..Default::default()
    };
    let report = compare_lossy_with(&pcm16(&a), &pcm16(&b), stereo16(), &relaxed).unwrap();
    assert!(report.passed());
}

#[test]
fn test_lossy_invalid_tolerances() {
    let tolerances = CompareTolerances {
        max_large_diff_percent: 101,
        ..Default::default()
    };
    let err = compare_lossy_with(&[], &[], stereo16(), &tolerances).unwrap_err();
    assert_eq!(err.code(), "PCM_004");
}

#[test]
fn test_lossy_overflowing_frame_tolerance_is_an_error() {
    let tolerances = CompareTolerances {
        frame_tolerance_samples: usize::MAX,
        ..Default::default()
    };
    let err = compare_lossy_with(&[0, 0], &[0, 0], stereo16(), &tolerances).unwrap_err();
    assert_eq!(
        err,
        PcmError::invalid_tolerance(
            "frame_tolerance_samples",
            format!("{} samples overflows a byte length", usize::MAX)
        )
    );
}

#[test]
fn test_lossy_huge_frame_tolerance_saturates() {
    let tolerances = CompareTolerances {
        frame_tolerance_samples: usize::MAX / 2,
        ..Default::default()
    };
    let report = compare_lossy_with(&[0, 0], &[0, 0, 0, 0], stereo16(), &tolerances).unwrap();
    assert!(report.passed());
    assert_eq!(report.max_length_diff, usize::MAX);
}

#[test]
#[should_panic(expected = "lossy PCM mismatch")]
fn test_lossy_assert_panics() {
    let a = pcm16(&[0; 10]);
    let b = pcm16(&[100; 10]);
    compare_lossy(&a, &b, PcmLayout::mono(BitDepth::Sixteen))
        .unwrap()
        .assert_passed("lossy");
}

#[test]
fn test_reports_serialize_to_json() {
    let report = compare_lossy(&pcm16(&[0, 0]), &pcm16(&[0, 9]), PcmLayout::mono(BitDepth::Sixteen))
        .unwrap();
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["verdict"], "too_many_large_diffs");
    assert_eq!(json["max_diff"], 9);

    let report = compare_exact(&[1, 2], &[1, 2], PcmLayout::mono(BitDepth::Eight));
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["layout"]["bit_depth"], 8);
    assert!(json.get("first_diff_offset").is_none());
}
