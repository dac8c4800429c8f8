//! Fast Walsh-Hadamard transform kernels.
//!
//! - [`fwht`]: single-vector butterfly network, out-of-place or in place
//! - [`rows`]: the same transform over every row of a matrix, rows split
//!   across rayon workers with disjoint output regions
//! - [`axes`]: transforms along arbitrary axes of a row-major tensor
//! - [`normalize`]: inverse transforms and orthonormal scaling
//!
//! All kernels are generic over [`Scalar`] (floats and signed integers) and
//! validate shapes before writing anything.

// Butterfly stages index pairs by bit arithmetic; iterators obscure the pairing.
#![allow(clippy::needless_range_loop)]

pub mod axes;
pub mod fwht;
pub mod normalize;
pub mod rows;
pub mod scalar;
pub mod validate;

pub use axes::{transform_axes, transform_axis, Axes};
pub use fwht::{hadamard_reference, transform_vector, transform_vector_in_place};
pub use normalize::{
    fht, fht1, fht_in_place, inverse_rows, inverse_vector, inverse_vector_in_place, Normalization,
};
pub use rows::{transform_rows, transform_rows_in_place, RowTransformer};
pub use scalar::{FloatScalar, Scalar};
pub use validate::{check_length, check_rows, check_vector, is_power_of_two};
