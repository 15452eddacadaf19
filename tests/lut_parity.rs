//! Integration tests for the W2A2 lookup-accumulate kernels
//!
//! Covers the documented numeric contract end to end: the worked single-block
//! example, zero inputs, the narrow-accumulator wraparound boundary, length
//! validation and determinism.

use tabular::error::TabularError;
use tabular::lut::{
    ACTIVATION_LEVELS, AccumMode, LANE_WIDTH, ProductTable, WEIGHT_LEVELS, detect_simd_backend,
    lut_dot_w2a2, lut_dot_w2a2_simd, pack_fields, unpack_field,
};

/// Naive wide reference: unpack every 2-bit field directly and sum level
/// products in i64, with no lane structure at all
fn naive_dot(weights: &[u8], activations: &[u8]) -> i64 {
    weights
        .iter()
        .zip(activations.iter())
        .map(|(&w, &x)| {
            (0..4)
                .map(|s| {
                    let wl = i64::from(WEIGHT_LEVELS[unpack_field(w, s) as usize]);
                    let al = i64::from(ACTIVATION_LEVELS[unpack_field(x, s) as usize]);
                    wl * al
                })
                .sum::<i64>()
        })
        .sum()
}

#[test]
fn worked_example_single_block() {
    // Lane width 32, N = 32: weight field 0 everywhere (level -1),
    // activation field 3 everywhere (level 3). Every lookup contributes -3;
    // each lane accumulates 4 * -3 = -12 with no wrap, and the reduction
    // yields 32 * -12 = -384.
    let table = ProductTable::w2a2();
    let weights = [0x00u8; 32];
    let activations = [0xFFu8; 32];
    for mode in [AccumMode::Wrap8, AccumMode::Wide32] {
        let dot = lut_dot_w2a2_simd(&weights, &activations, &table, mode).unwrap();
        assert_eq!(dot, -384);
        assert_eq!(i64::from(dot), naive_dot(&weights, &activations));
    }
}

#[test]
fn zero_input_scales_with_first_products() {
    // All-zero fields index the first level of each domain, so the result is
    // 4 * N * weight_levels[0] * activation_levels[0] (zero for the default
    // domains, nonzero once the first products are nonzero)
    let n = 4 * LANE_WIDTH;
    let zeros = vec![0u8; n];

    let default_table = ProductTable::w2a2();
    assert_eq!(
        lut_dot_w2a2_simd(&zeros, &zeros, &default_table, AccumMode::Wide32).unwrap(),
        0
    );

    let offset_table = ProductTable::new([2, 0, 0, 0], [3, 0, 0, 0]).unwrap();
    let expected = i32::try_from(4 * n).unwrap() * 2 * 3;
    assert_eq!(
        lut_dot_w2a2_simd(&zeros, &zeros, &offset_table, AccumMode::Wide32).unwrap(),
        expected
    );
}

#[test]
fn narrow_accumulation_wraps_past_lane_range() {
    // Maximum-magnitude product (+6) on every pass: five blocks stay inside
    // i8 range (120 per lane), six blocks wrap (144 -> -112 per lane). The
    // wide mode keeps the exact value throughout.
    let table = ProductTable::w2a2();

    let in_range = vec![0xFFu8; 5 * LANE_WIDTH];
    let narrow = lut_dot_w2a2_simd(&in_range, &in_range, &table, AccumMode::Wrap8).unwrap();
    assert_eq!(narrow, 32 * 120);
    assert_eq!(i64::from(narrow), naive_dot(&in_range, &in_range));

    let over = vec![0xFFu8; 6 * LANE_WIDTH];
    let wrapped = lut_dot_w2a2_simd(&over, &over, &table, AccumMode::Wrap8).unwrap();
    assert_eq!(wrapped, 32 * -112);
    let wide = lut_dot_w2a2_simd(&over, &over, &table, AccumMode::Wide32).unwrap();
    assert_eq!(i64::from(wide), naive_dot(&over, &over));
    assert_ne!(wrapped, wide);
}

#[test]
fn scalar_and_simd_paths_are_bit_exact() {
    let table = ProductTable::w2a2();
    // Mixed content across several blocks, including max-magnitude fields
    let weights: Vec<u8> = (0..8 * LANE_WIDTH)
        .map(|i| pack_fields([i as u8 & 3, (i >> 2) as u8 & 3, 3, (i >> 5) as u8 & 3]))
        .collect();
    let activations: Vec<u8> = (0..8 * LANE_WIDTH)
        .map(|i| pack_fields([3, i as u8 & 3, (i >> 3) as u8 & 3, 1]))
        .collect();

    for mode in [AccumMode::Wrap8, AccumMode::Wide32] {
        assert_eq!(
            lut_dot_w2a2(&weights, &activations, &table, mode).unwrap(),
            lut_dot_w2a2_simd(&weights, &activations, &table, mode).unwrap(),
            "scalar/{} divergence in mode {mode}",
            detect_simd_backend()
        );
    }
}

#[test]
fn malformed_lengths_are_rejected_up_front() {
    let table = ProductTable::w2a2();
    for n in [1usize, 31, 33, 63] {
        let weights = vec![0u8; n];
        let activations = vec![0u8; n];
        for result in [
            lut_dot_w2a2(&weights, &activations, &table, AccumMode::Wrap8),
            lut_dot_w2a2_simd(&weights, &activations, &table, AccumMode::Wrap8),
        ] {
            assert!(
                matches!(result, Err(TabularError::InvalidShape { .. })),
                "length {n} must be rejected"
            );
        }
    }
}

#[test]
fn identical_inputs_give_identical_results() {
    let table = ProductTable::w2a2();
    let weights: Vec<u8> = (0..2 * LANE_WIDTH).map(|i| (i * 29 + 17) as u8).collect();
    let activations: Vec<u8> = (0..2 * LANE_WIDTH).map(|i| (i * 43 + 5) as u8).collect();
    let results: Vec<i32> = (0..3)
        .map(|_| lut_dot_w2a2_simd(&weights, &activations, &table, AccumMode::Wrap8).unwrap())
        .collect();
    assert!(results.windows(2).all(|pair| pair[0] == pair[1]));
}
