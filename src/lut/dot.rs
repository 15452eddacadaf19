//! Lookup-accumulate dot-product kernels for W2A2 operands
//!
//! Computes the dot product of packed 2-bit weights against packed 2-bit
//! activations without multiplication instructions: each operand byte holds
//! four 2-bit level indices, and every (weight, activation) index pair is
//! resolved through the 16-entry [`ProductTable`].
//!
//! - [`lut_dot_w2a2`] - scalar reference kernel
//! - [`lut_dot_w2a2_simd`] - runtime-dispatched kernel (AVX2 / NEON)
//!
//! All paths are bit-exact with each other in every [`AccumMode`], including
//! `Wrap8` wraparound: each byte position owns one narrow counter across all
//! blocks in every backend.

use super::types::{
    AccumMode, FIELDS_PER_BYTE, LANE_WIDTH, ProductTable, combine_key, unpack_field,
};
use crate::error::{Result, TabularError};

/// Validate operand lengths before any computation
fn check_operands(weights: &[u8], activations: &[u8]) -> Result<()> {
    if weights.len() != activations.len() {
        return Err(TabularError::InvalidShape {
            reason: format!(
                "weight length {} does not match activation length {}",
                weights.len(),
                activations.len()
            ),
        });
    }
    if !weights.len().is_multiple_of(LANE_WIDTH) {
        return Err(TabularError::InvalidShape {
            reason: format!(
                "operand length {} is not a multiple of the lane width {LANE_WIDTH}",
                weights.len()
            ),
        });
    }
    Ok(())
}

/// Scalar reference kernel
///
/// Processes each aligned 32-byte block in four sub-lane passes; pass `s`
/// extracts the 2-bit fields at bits `[2s, 2s+1]` of every byte, combines
/// them into 4-bit table keys and accumulates the looked-up products.
///
/// With [`AccumMode::Wrap8`] the per-lane counters are `i8` and wrap exactly
/// like the vector kernels' byte lanes; the final reduction widens each
/// counter and sums them into one `i32`.
///
/// # Errors
///
/// Returns `InvalidShape` if the operands differ in length or the length is
/// not a multiple of [`LANE_WIDTH`]. Non-conforming input is never truncated
/// or padded.
pub fn lut_dot_w2a2(
    weights: &[u8],
    activations: &[u8],
    table: &ProductTable,
    mode: AccumMode,
) -> Result<i32> {
    check_operands(weights, activations)?;
    let dot = match mode {
        AccumMode::Wrap8 => dot_scalar_wrap8(weights, activations, table),
        AccumMode::Wide32 => dot_scalar_wide32(weights, activations, table),
    };
    Ok(dot)
}

fn dot_scalar_wrap8(weights: &[u8], activations: &[u8], table: &ProductTable) -> i32 {
    let lut = table.entries();
    // One narrow counter per byte lane, exactly as the vector kernels keep them
    let mut lanes = [0i8; LANE_WIDTH];
    for (wb, xb) in weights
        .chunks_exact(LANE_WIDTH)
        .zip(activations.chunks_exact(LANE_WIDTH))
    {
        for sublane in 0..FIELDS_PER_BYTE {
            for (lane, (&w, &x)) in lanes.iter_mut().zip(wb.iter().zip(xb.iter())) {
                let key = combine_key(unpack_field(w, sublane), unpack_field(x, sublane));
                *lane = lane.wrapping_add(lut[key as usize]);
            }
        }
    }
    lanes.iter().map(|&c| i32::from(c)).sum()
}

fn dot_scalar_wide32(weights: &[u8], activations: &[u8], table: &ProductTable) -> i32 {
    let lut = table.entries();
    let mut acc = 0i32;
    for (&w, &x) in weights.iter().zip(activations.iter()) {
        for sublane in 0..FIELDS_PER_BYTE {
            let key = combine_key(unpack_field(w, sublane), unpack_field(x, sublane));
            acc += i32::from(lut[key as usize]);
        }
    }
    acc
}

/// SIMD-accelerated kernel with runtime feature detection
///
/// Dispatches to AVX2 on x86_64 when available and to NEON on aarch64;
/// otherwise falls back to the scalar reference. Every backend produces the
/// same result as [`lut_dot_w2a2`] for the same inputs and mode, wraparound
/// included.
///
/// # Errors
///
/// Returns `InvalidShape` if the operands differ in length or the length is
/// not a multiple of [`LANE_WIDTH`].
pub fn lut_dot_w2a2_simd(
    weights: &[u8],
    activations: &[u8],
    table: &ProductTable,
    mode: AccumMode,
) -> Result<i32> {
    #[cfg(target_arch = "x86_64")]
    {
        if is_x86_feature_detected!("avx2") {
            check_operands(weights, activations)?;
            // SAFETY: AVX2 verified available at runtime; lengths validated above
            return Ok(unsafe { dot_avx2(weights, activations, table, mode) });
        }
    }

    #[cfg(target_arch = "aarch64")]
    {
        check_operands(weights, activations)?;
        // SAFETY: NEON is baseline on aarch64; lengths validated above
        return Ok(unsafe { dot_neon(weights, activations, table, mode) });
    }

    lut_dot_w2a2(weights, activations, table, mode)
}

/// AVX2 lookup-accumulate kernel
///
/// The 16-entry table is replicated into both 128-bit halves of a 256-bit
/// register because `_mm256_shuffle_epi8` indexes within each half
/// independently; every shuffle-addressable segment must see the full table.
///
/// # Safety
///
/// Requires AVX2. Operand lengths must be equal and a multiple of
/// [`LANE_WIDTH`].
#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "avx2")]
#[allow(unsafe_op_in_unsafe_fn)]
unsafe fn dot_avx2(
    weights: &[u8],
    activations: &[u8],
    table: &ProductTable,
    mode: AccumMode,
) -> i32 {
    #[allow(clippy::wildcard_imports)]
    use std::arch::x86_64::*;

    use super::simd::{hsum_epi32_256, sum_epi8_to_epi32};

    debug_assert_eq!(weights.len(), activations.len());
    debug_assert!(weights.len().is_multiple_of(LANE_WIDTH));

    let lut = _mm256_broadcastsi128_si256(_mm_loadu_si128(table.entries().as_ptr().cast()));

    let mut acc8 = _mm256_setzero_si256();
    let mut acc32 = _mm256_setzero_si256();

    for block in 0..weights.len() / LANE_WIDTH {
        let offset = block * LANE_WIDTH;
        let wv = _mm256_loadu_si256(weights.as_ptr().add(offset).cast());
        let xv = _mm256_loadu_si256(activations.as_ptr().add(offset).cast());

        // Four sub-lane passes, one per packed 2-bit field
        let products = [
            lookup_sublane::<0>(lut, wv, xv),
            lookup_sublane::<2>(lut, wv, xv),
            lookup_sublane::<4>(lut, wv, xv),
            lookup_sublane::<6>(lut, wv, xv),
        ];

        for p in products {
            match mode {
                AccumMode::Wrap8 => acc8 = _mm256_add_epi8(acc8, p),
                AccumMode::Wide32 => acc32 = _mm256_add_epi32(acc32, sum_epi8_to_epi32(p)),
            }
        }
    }

    match mode {
        AccumMode::Wrap8 => hsum_epi32_256(sum_epi8_to_epi32(acc8)),
        AccumMode::Wide32 => hsum_epi32_256(acc32),
    }
}

/// One AVX2 sub-lane pass: extract the 2-bit fields at `SHIFT`, combine them
/// into 4-bit keys and look up all 32 products at once
///
/// The 16-bit shifts drag bits across byte boundaries, but the `0b11` mask
/// keeps only the low 2 bits of each byte, which always originate from that
/// same byte for shifts up to 6.
#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "avx2")]
#[inline]
#[allow(unsafe_op_in_unsafe_fn)]
unsafe fn lookup_sublane<const SHIFT: i32>(
    lut: std::arch::x86_64::__m256i,
    wv: std::arch::x86_64::__m256i,
    xv: std::arch::x86_64::__m256i,
) -> std::arch::x86_64::__m256i {
    #[allow(clippy::wildcard_imports)]
    use std::arch::x86_64::*;

    let mask = _mm256_set1_epi8(0b11);
    let w_idx = _mm256_and_si256(_mm256_srli_epi16::<SHIFT>(wv), mask);
    let x_idx = _mm256_and_si256(_mm256_srli_epi16::<SHIFT>(xv), mask);
    // Weight index in the high 2 bits of the key, matching the table layout
    let key = _mm256_or_si256(_mm256_slli_epi16::<2>(w_idx), x_idx);
    _mm256_shuffle_epi8(lut, key)
}

/// NEON lookup-accumulate kernel
///
/// `vqtbl1q` indexes a 16-byte table, so each 32-byte block is processed as
/// two 16-byte halves against the same replicated table.
///
/// # Safety
///
/// Operand lengths must be equal and a multiple of [`LANE_WIDTH`].
#[cfg(target_arch = "aarch64")]
#[target_feature(enable = "neon")]
#[allow(unsafe_op_in_unsafe_fn)]
unsafe fn dot_neon(
    weights: &[u8],
    activations: &[u8],
    table: &ProductTable,
    mode: AccumMode,
) -> i32 {
    #[allow(clippy::wildcard_imports)]
    use std::arch::aarch64::*;

    debug_assert_eq!(weights.len(), activations.len());
    debug_assert!(weights.len().is_multiple_of(LANE_WIDTH));

    let lut = vld1q_s8(table.entries().as_ptr());

    let mut acc8_lo = vdupq_n_s8(0);
    let mut acc8_hi = vdupq_n_s8(0);
    let mut acc32_lo = vdupq_n_s32(0);
    let mut acc32_hi = vdupq_n_s32(0);

    for block in 0..weights.len() / LANE_WIDTH {
        let offset = block * LANE_WIDTH;
        let w_lo = vld1q_u8(weights.as_ptr().add(offset));
        let x_lo = vld1q_u8(activations.as_ptr().add(offset));
        let w_hi = vld1q_u8(weights.as_ptr().add(offset + 16));
        let x_hi = vld1q_u8(activations.as_ptr().add(offset + 16));

        accumulate_half(lut, w_lo, x_lo, mode, &mut acc8_lo, &mut acc32_lo);
        accumulate_half(lut, w_hi, x_hi, mode, &mut acc8_hi, &mut acc32_hi);
    }

    match mode {
        AccumMode::Wrap8 => {
            let lo = vaddvq_s32(vpaddlq_s16(vpaddlq_s8(acc8_lo)));
            let hi = vaddvq_s32(vpaddlq_s16(vpaddlq_s8(acc8_hi)));
            lo + hi
        },
        AccumMode::Wide32 => vaddvq_s32(acc32_lo) + vaddvq_s32(acc32_hi),
    }
}

/// Run the four sub-lane passes for one 16-byte half of a block
#[cfg(target_arch = "aarch64")]
#[target_feature(enable = "neon")]
#[inline]
#[allow(unsafe_op_in_unsafe_fn)]
unsafe fn accumulate_half(
    lut: std::arch::aarch64::int8x16_t,
    w: std::arch::aarch64::uint8x16_t,
    x: std::arch::aarch64::uint8x16_t,
    mode: AccumMode,
    acc8: &mut std::arch::aarch64::int8x16_t,
    acc32: &mut std::arch::aarch64::int32x4_t,
) {
    #[allow(clippy::wildcard_imports)]
    use std::arch::aarch64::*;

    let w_idx = sublane_indices(w);
    let x_idx = sublane_indices(x);
    for (&wi, &xi) in w_idx.iter().zip(x_idx.iter()) {
        // Weight index in the high 2 bits of the key, matching the table layout
        let key = vorrq_u8(vshlq_n_u8::<2>(wi), xi);
        let products = vqtbl1q_s8(lut, key);
        match mode {
            AccumMode::Wrap8 => *acc8 = vaddq_s8(*acc8, products),
            AccumMode::Wide32 => *acc32 = vpadalq_s16(*acc32, vpaddlq_s8(products)),
        }
    }
}

/// Extract the four per-sub-lane 2-bit index vectors from 16 packed bytes
#[cfg(target_arch = "aarch64")]
#[target_feature(enable = "neon")]
#[inline]
#[allow(unsafe_op_in_unsafe_fn)]
unsafe fn sublane_indices(
    v: std::arch::aarch64::uint8x16_t,
) -> [std::arch::aarch64::uint8x16_t; 4] {
    #[allow(clippy::wildcard_imports)]
    use std::arch::aarch64::*;

    let mask = vdupq_n_u8(0b11);
    [
        vandq_u8(v, mask),
        vandq_u8(vshrq_n_u8::<2>(v), mask),
        vandq_u8(vshrq_n_u8::<4>(v), mask),
        // The top field needs no mask, zeros shift in from above
        vshrq_n_u8::<6>(v),
    ]
}
