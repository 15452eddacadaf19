//! # Tabular
//!
//! Pure Rust table-lookup (LUT) kernels for low-bit quantized dot products.
//!
//! Tabular computes the dot product of 2-bit weights against 2-bit
//! activations (W2A2) without multiplication instructions: the sixteen
//! pairwise products of the two quantization domains are precomputed into a
//! 16-entry table, and the kernel resolves every packed operand byte through
//! four branch-free table lookups. On x86_64 the lookups run 32 lanes at a
//! time via `_mm256_shuffle_epi8`; on aarch64 via `vqtbl1q`; everywhere else
//! a bit-exact scalar path is used.
//!
//! ## Example
//!
//! ```rust
//! use tabular::lut::{AccumMode, ProductTable, lut_dot_w2a2};
//!
//! let table = ProductTable::w2a2();
//! // 32 packed bytes per operand = 128 scalar multiply-adds
//! let weights = [0x00u8; 32]; // weight field 0 everywhere -> level -1
//! let activations = [0xFFu8; 32]; // activation field 3 everywhere -> level 3
//! let dot = lut_dot_w2a2(&weights, &activations, &table, AccumMode::Wrap8).unwrap();
//! assert_eq!(dot, -384);
//! ```
//!
//! ## Accumulation width
//!
//! The reference design accumulates in single-byte lanes and widens only at
//! the final reduction; lanes wrap once their running sum leaves `i8` range.
//! That behavior is preserved as [`lut::AccumMode::Wrap8`] (the default) and
//! never silently widened; [`lut::AccumMode::Wide32`] is the opt-in
//! overflow-free mode.

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
// Clippy allows (MUST come after deny/warn to override them)
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)] // Allow technical terms without backticks

/// CLI command implementations (extracted for testability)
pub mod cli;
/// Error types and the crate-wide `Result` alias
pub mod error;
/// W2A2 table-lookup kernels: product table, packing model, dot kernels
pub mod lut;

pub use error::{Result, TabularError};
pub use lut::{
    AccumMode, ProductTable, SimdBackend, detect_simd_backend, lut_dot_w2a2, lut_dot_w2a2_simd,
};
