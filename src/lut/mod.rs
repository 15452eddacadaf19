//! Table-lookup kernels for W2A2 quantized dot products
//!
//! ## W2A2 packed format
//!
//! Both operands are sequences of packed bytes. Each byte carries four
//! independent 2-bit fields; sub-lane `s` (0..4) occupies bits `[2s, 2s+1]`
//! and indexes one level of a fixed 4-value quantization domain. The default
//! domains are `[-1, 0, 1, 2]` for weights and `[0, 1, 2, 3]` for
//! activations, so a 32-byte operand pair encodes 128 scalar multiply-adds.
//!
//! ## Kernel strategy
//!
//! Instead of multiplying, the kernel precomputes all 16 pairwise products
//! into a [`ProductTable`] and replaces every multiply-add with a table
//! lookup: combine the two 2-bit indices into a 4-bit key (weight index in
//! the high bits), gather `table[key]` across all lanes, and add the gathered
//! products into per-lane accumulators. A final horizontal reduction yields
//! one scalar. Accumulation width is an explicit parameter ([`AccumMode`]):
//! the narrow reference behavior wraps per-lane at `i8` range, the wide mode
//! trades that modular behavior for headroom.

pub mod dot;
pub mod simd;
pub mod simd_backend;
pub mod types;

pub use dot::{lut_dot_w2a2, lut_dot_w2a2_simd};
pub use simd_backend::{SimdBackend, detect_simd_backend};
pub use types::{
    ACTIVATION_LEVELS, AccumMode, FIELDS_PER_BYTE, LANE_WIDTH, LUT_SIZE, ProductTable,
    WEIGHT_LEVELS, combine_key, pack_fields, unpack_field,
};
