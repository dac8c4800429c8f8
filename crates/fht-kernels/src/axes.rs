//! FWHT along chosen axes of a row-major tensor.
//!
//! A tensor is viewed as `outer × len × inner` around the transformed axis.
//! With `inner == 1` the axis is the fastest-varying one and the row driver
//! takes over. Otherwise each butterfly combines two whole `inner`-length
//! sub-rows, which keeps memory access contiguous without transposing.
//!
//! Transforming along every axis is the same as the flat 1-D transform of
//! the buffer, since the Sylvester-Hadamard matrix of size `a·b` is the
//! Kronecker product of the size-`a` and size-`b` matrices.

use rayon::prelude::*;
use tracing::debug;

use fht_core::{FhtError, Result};

use crate::rows::{rows_in_place, PARALLEL_THRESHOLD};
use crate::scalar::Scalar;
use crate::validate::{check_length, check_shape};

/// Which axes of a tensor to transform.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Axes {
    /// Every axis; equivalent to the flat transform of the whole buffer.
    #[default]
    All,
    /// Only the listed axes.
    Only(Vec<usize>),
}

impl Axes {
    pub fn single(axis: usize) -> Self {
        Axes::Only(vec![axis])
    }

    /// Concrete axis list for a tensor of rank `rank`.
    pub fn resolve(&self, rank: usize) -> Vec<usize> {
        match self {
            Axes::All => (0..rank).collect(),
            Axes::Only(axes) => axes.clone(),
        }
    }
}

/// In-place FWHT of `data` (row-major, dimensions `shape`) along `axis`.
///
/// # Errors
/// `InvalidAxis` if `axis >= shape.len()`, `InvalidDimension` if the axis
/// length is not a power of two, `BufferSizeMismatch` if `data.len()` is
/// not the product of `shape`.
pub fn transform_axis<T: Scalar>(shape: &[usize], axis: usize, data: &mut [T]) -> Result<()> {
    validate_axes(shape, &[axis], data.len())?;
    apply_axis(shape, axis, data);
    Ok(())
}

/// In-place FWHT along each axis in `axes`. All checks run before the
/// first axis is transformed.
pub fn transform_axes<T: Scalar>(shape: &[usize], axes: &[usize], data: &mut [T]) -> Result<()> {
    validate_axes(shape, axes, data.len())?;
    for &axis in axes {
        apply_axis(shape, axis, data);
    }
    Ok(())
}

fn validate_axes(shape: &[usize], axes: &[usize], data_len: usize) -> Result<()> {
    let rank = shape.len();
    for (i, &axis) in axes.iter().enumerate() {
        if axis >= rank || axes[..i].contains(&axis) {
            return Err(FhtError::InvalidAxis { axis, rank });
        }
        check_length(shape[axis])?;
    }
    check_shape(shape, data_len)
}

fn apply_axis<T: Scalar>(shape: &[usize], axis: usize, data: &mut [T]) {
    if data.is_empty() {
        return;
    }
    let len = shape[axis];
    let outer: usize = shape[..axis].iter().product();
    let inner: usize = shape[axis + 1..].iter().product();
    debug!(axis, outer, len, inner, "Transforming tensor axis");

    if inner == 1 {
        rows_in_place(len, outer >= PARALLEL_THRESHOLD, data);
        return;
    }

    let block = len * inner;
    if outer > 1 {
        data.par_chunks_exact_mut(block)
            .for_each(|b| lanes_in_place(b, len, inner));
    } else {
        lanes_in_place(data, len, inner);
    }
}

/// Butterfly over `len` sub-rows of `inner` elements each.
fn lanes_in_place<T: Scalar>(block: &mut [T], len: usize, inner: usize) {
    let mut stride = 1;
    while stride < len {
        for j in 0..len {
            if j & stride == 0 {
                let k = j | stride;
                let (lo, hi) = block.split_at_mut(k * inner);
                let low = &mut lo[j * inner..(j + 1) * inner];
                let high = &mut hi[..inner];
                for (x, y) in low.iter_mut().zip(high.iter_mut()) {
                    let temp = *x;
                    *x = temp + *y;
                    *y = temp - *y;
                }
            }
        }
        stride <<= 1;
    }
}
