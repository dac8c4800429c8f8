//! Inverse transforms and the orthonormal multi-axis front end.
//!
//! The kernels are unnormalized: applying them twice multiplies by the
//! length. [`inverse_vector`] and [`inverse_rows`] divide that factor back
//! out. [`fht`] scales by `1/sqrt(n)` instead, which makes the transform
//! exactly self-inverse for float types.

use fht_core::Result;

use crate::axes::{transform_axes, Axes};
use crate::fwht::{transform_vector, transform_vector_in_place};
use crate::rows::transform_rows;
use crate::scalar::{FloatScalar, Scalar};

/// Output scaling applied by [`fht`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Normalization {
    /// Raw butterfly output (sums of `n` terms).
    Unnormalized,
    /// Divide by `sqrt(n)`, `n` being the product of transformed lengths.
    #[default]
    Orthonormal,
}

/// Inverse FWHT: transform, then divide every element by `length`.
///
/// Exact for integer inputs that came out of [`transform_vector`].
pub fn inverse_vector<T: Scalar>(length: usize, input: &[T], output: &mut [T]) -> Result<()> {
    transform_vector(length, input, output)?;
    divide_by_len(output, length);
    Ok(())
}

/// In-place variant of [`inverse_vector`].
pub fn inverse_vector_in_place<T: Scalar>(data: &mut [T]) -> Result<()> {
    transform_vector_in_place(data)?;
    let len = data.len();
    divide_by_len(data, len);
    Ok(())
}

/// Row-wise inverse FWHT.
pub fn inverse_rows<T: Scalar>(
    row_count: usize,
    row_length: usize,
    input: &[T],
    output: &mut [T],
) -> Result<()> {
    transform_rows(row_count, row_length, input, output)?;
    divide_by_len(output, row_length);
    Ok(())
}

fn divide_by_len<T: Scalar>(data: &mut [T], len: usize) {
    if len == 1 {
        return;
    }
    for v in data.iter_mut() {
        *v = v.div_len(len);
    }
}

/// In-place FWHT of a row-major tensor along `axes`, with optional
/// orthonormal scaling.
pub fn fht_in_place<T: FloatScalar>(
    data: &mut [T],
    shape: &[usize],
    axes: &Axes,
    normalization: Normalization,
) -> Result<()> {
    let axes = axes.resolve(shape.len());
    transform_axes(shape, &axes, data)?;

    if normalization == Normalization::Orthonormal {
        let n: usize = axes.iter().map(|&a| shape[a]).product();
        if n > 1 {
            let factor = 1.0 / (n as f64).sqrt();
            for v in data.iter_mut() {
                *v = v.scale(factor);
            }
        }
    }
    Ok(())
}

/// Allocating variant of [`fht_in_place`]; `data` is left untouched.
pub fn fht<T: FloatScalar>(
    data: &[T],
    shape: &[usize],
    axes: &Axes,
    normalization: Normalization,
) -> Result<Vec<T>> {
    let mut out = data.to_vec();
    fht_in_place(&mut out, shape, axes, normalization)?;
    Ok(out)
}

/// Orthonormal FWHT of a 1-D signal.
pub fn fht1<T: FloatScalar>(data: &[T]) -> Result<Vec<T>> {
    fht(data, &[data.len()], &Axes::All, Normalization::Orthonormal)
}
