//! x86_64 SIMD reduction helpers
//!
//! Widening and horizontal-sum primitives shared by the AVX2 kernel in
//! [`crate::lut::dot`].

/// Widen 32 signed byte lanes to 8 i32 partial sums
///
/// Adjacent groups of four byte lanes collapse into one i32 lane, so the
/// result's horizontal sum equals the signed sum of all 32 input bytes.
#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "avx2")]
#[inline]
pub unsafe fn sum_epi8_to_epi32(v: std::arch::x86_64::__m256i) -> std::arch::x86_64::__m256i {
    use std::arch::x86_64::{
        _mm256_add_epi32, _mm256_castsi256_si128, _mm256_cvtepi8_epi16, _mm256_extracti128_si256,
        _mm256_madd_epi16, _mm256_set1_epi16,
    };
    // SAFETY: caller guarantees AVX2 per target_feature contract
    unsafe {
        let ones = _mm256_set1_epi16(1);
        let lo = _mm256_cvtepi8_epi16(_mm256_castsi256_si128(v));
        let hi = _mm256_cvtepi8_epi16(_mm256_extracti128_si256(v, 1));
        _mm256_add_epi32(_mm256_madd_epi16(lo, ones), _mm256_madd_epi16(hi, ones))
    }
}

/// Horizontal sum of 8 i32 lanes to a single i32
#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "avx2")]
#[inline]
pub unsafe fn hsum_epi32_256(v: std::arch::x86_64::__m256i) -> i32 {
    use std::arch::x86_64::{
        _mm256_castsi256_si128, _mm256_extracti128_si256, _mm_add_epi32, _mm_cvtsi128_si32,
        _mm_shuffle_epi32,
    };
    // SAFETY: caller guarantees AVX2 per target_feature contract
    unsafe {
        let sum128 = _mm_add_epi32(_mm256_castsi256_si128(v), _mm256_extracti128_si256(v, 1));
        let sum64 = _mm_add_epi32(sum128, _mm_shuffle_epi32(sum128, 0b10_11_00_01));
        let sum32 = _mm_add_epi32(sum64, _mm_shuffle_epi32(sum64, 0b00_00_10_10));
        _mm_cvtsi128_si32(sum32)
    }
}
