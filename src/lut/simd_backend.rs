//! Runtime SIMD backend detection
//!
//! The dispatch wrapper in [`crate::lut::dot`] picks a kernel with the same
//! checks; this enum exists so callers (and the CLI `info` command) can see
//! which path will run.

/// SIMD backend detected at runtime
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SimdBackend {
    /// AVX2 (256-bit)
    Avx2,
    /// ARM NEON (128-bit)
    Neon,
    /// Scalar fallback
    #[default]
    Scalar,
}

impl std::fmt::Display for SimdBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SimdBackend::Avx2 => write!(f, "AVX2"),
            SimdBackend::Neon => write!(f, "NEON"),
            SimdBackend::Scalar => write!(f, "Scalar"),
        }
    }
}

/// Detect the SIMD backend the dot kernels will dispatch to
#[must_use]
pub fn detect_simd_backend() -> SimdBackend {
    #[cfg(target_arch = "x86_64")]
    {
        if is_x86_feature_detected!("avx2") {
            return SimdBackend::Avx2;
        }
    }

    // NEON is baseline on aarch64
    #[cfg(target_arch = "aarch64")]
    {
        return SimdBackend::Neon;
    }

    SimdBackend::Scalar
}
