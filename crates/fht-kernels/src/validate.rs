//! Upfront shape checks.
//!
//! Every public kernel entry point runs these before touching the output,
//! so a failed call never leaves a partially written buffer behind.

use fht_core::{FhtError, Result};

/// True when `n` is a transformable length (1, 2, 4, ...).
#[inline]
pub fn is_power_of_two(n: usize) -> bool {
    n.is_power_of_two()
}

/// Reject lengths that are zero or not an exact power of two.
pub fn check_length(length: usize) -> Result<()> {
    if !is_power_of_two(length) {
        return Err(FhtError::InvalidDimension { length });
    }
    Ok(())
}

/// Validate a single-vector transform: `length` and both buffer sizes.
pub fn check_vector(length: usize, input_len: usize, output_len: usize) -> Result<()> {
    check_length(length)?;
    if input_len != length || output_len != length {
        return Err(FhtError::BufferSizeMismatch {
            expected: length,
            input: input_len,
            output: output_len,
        });
    }
    Ok(())
}

/// Validate a row-batched transform against `row_count × row_length`.
pub fn check_rows(
    row_count: usize,
    row_length: usize,
    input_len: usize,
    output_len: usize,
) -> Result<()> {
    check_length(row_length)?;
    let expected = row_count.saturating_mul(row_length);
    if row_count.checked_mul(row_length).is_none() || input_len != expected || output_len != expected
    {
        return Err(FhtError::BufferSizeMismatch {
            expected,
            input: input_len,
            output: output_len,
        });
    }
    Ok(())
}

/// Number of elements described by a row-major `shape`.
pub fn element_count(shape: &[usize]) -> Option<usize> {
    shape.iter().try_fold(1usize, |acc, &d| acc.checked_mul(d))
}

/// Validate an in-place tensor buffer against its shape.
pub fn check_shape(shape: &[usize], data_len: usize) -> Result<()> {
    let expected = element_count(shape).unwrap_or(usize::MAX);
    if expected != data_len {
        return Err(FhtError::BufferSizeMismatch {
            expected,
            input: data_len,
            output: data_len,
        });
    }
    Ok(())
}
