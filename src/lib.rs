//! Fast Hadamard transform.
//!
//! Facade over the workspace crates:
//! - `fht-kernels`: butterfly kernels (vector, row-parallel, multi-axis)
//! - `fht-core`: errors, configuration, logging
//!
//! ```
//! let mut out = [0.0f64; 4];
//! fht::transform_vector(4, &[1.0, 0.0, 0.0, 0.0], &mut out).unwrap();
//! assert_eq!(out, [1.0, 1.0, 1.0, 1.0]);
//! ```

pub use fht_core::{config, error, logging, AppConfig, BenchConfig, ElementType, FhtError, KernelConfig, Result};
pub use fht_kernels::{
    axes, check_length, check_rows, check_vector, fht, fht1, fht_in_place, hadamard_reference,
    inverse_rows, inverse_vector, inverse_vector_in_place, is_power_of_two, transform_axes,
    transform_axis, transform_rows, transform_rows_in_place, transform_vector,
    transform_vector_in_place, Axes, FloatScalar, Normalization, RowTransformer, Scalar,
};
