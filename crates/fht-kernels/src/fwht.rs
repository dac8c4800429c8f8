//! Butterfly network for the fast Walsh-Hadamard transform.
//!
//! `log2(m)` stages of `m/2` add/subtract pairs, no multiplications.
//! The transform is unnormalized and self-inverse up to a factor of `m`:
//! `FWHT(FWHT(x)) == m * x`.

use fht_core::Result;

use crate::scalar::Scalar;
use crate::validate::{check_length, check_vector};

/// FWHT of `input` into `output`. Both must hold exactly `length` elements.
///
/// `input` is read only by the first stage; every later stage runs on
/// `output` alone.
///
/// # Errors
/// `InvalidDimension` if `length` is zero or not a power of two,
/// `BufferSizeMismatch` if either buffer disagrees with `length`.
/// Nothing is written on error.
pub fn transform_vector<T: Scalar>(length: usize, input: &[T], output: &mut [T]) -> Result<()> {
    check_vector(length, input.len(), output.len())?;
    butterfly(input, output);
    Ok(())
}

/// FWHT where input and output are the same buffer.
pub fn transform_vector_in_place<T: Scalar>(data: &mut [T]) -> Result<()> {
    check_length(data.len())?;
    butterfly_in_place(data);
    Ok(())
}

/// Unchecked kernel. Callers guarantee equal power-of-two lengths.
#[inline]
pub(crate) fn butterfly<T: Scalar>(input: &[T], output: &mut [T]) {
    debug_assert_eq!(input.len(), output.len());
    debug_assert!(output.len().is_power_of_two());

    let m = output.len();
    if m == 1 {
        output[0] = input[0];
        return;
    }

    // Base stage (pair width 2) seeds output from input.
    for j in (0..m).step_by(2) {
        let k = j + 1;
        output[j] = input[j] + input[k];
        output[k] = input[j] - input[k];
    }
    doubling_stages(output);
}

/// Unchecked in-place kernel.
#[inline]
pub(crate) fn butterfly_in_place<T: Scalar>(data: &mut [T]) {
    debug_assert!(data.len().is_power_of_two());

    for pair in data.chunks_exact_mut(2) {
        let a = pair[0];
        pair[0] = a + pair[1];
        pair[1] = a - pair[1];
    }
    doubling_stages(data);
}

/// Stages with stride 2, 4, ... m/2. `j` is the low partner when its
/// `stride` bit is clear; its high partner is `j | stride`.
#[inline]
fn doubling_stages<T: Scalar>(out: &mut [T]) {
    let m = out.len();
    let mut stride = 2;
    while stride < m {
        for j in 0..m {
            if j & stride == 0 {
                let k = j | stride;
                let temp = out[j];
                out[j] = out[j] + out[k];
                out[k] = temp - out[k];
            }
        }
        stride <<= 1;
    }
}

/// Dense Sylvester-Hadamard matrix-vector product, O(m²).
///
/// Entry (i, j) is `+1` when `popcount(i & j)` is even and `-1` otherwise.
/// Used to cross-check the butterfly network.
pub fn hadamard_reference<T: Scalar>(input: &[T]) -> Result<Vec<T>> {
    check_length(input.len())?;
    let m = input.len();
    let mut out = vec![T::ZERO; m];
    for (i, o) in out.iter_mut().enumerate() {
        let mut acc = T::ZERO;
        for (j, &x) in input.iter().enumerate() {
            if (i & j).count_ones() % 2 == 0 {
                acc = acc + x;
            } else {
                acc = acc - x;
            }
        }
        *o = acc;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fht_core::FhtError;

    #[test]
    fn test_base_case() {
        for &(a, b) in &[(1.5f64, 0.25), (-3.0, 7.0), (0.0, 0.0)] {
            let mut out = [0.0f64; 2];
            transform_vector(2, &[a, b], &mut out).unwrap();
            assert_eq!(out, [a + b, a - b]);
        }
    }

    #[test]
    fn test_known_small_case() {
        let mut out = [0i32; 4];
        transform_vector(4, &[1, 0, 0, 0], &mut out).unwrap();
        assert_eq!(out, [1, 1, 1, 1]);
    }

    #[test]
    fn test_unit_vectors_give_hadamard_rows() {
        let expected = [[1, 1, 1, 1], [1, -1, 1, -1], [1, 1, -1, -1], [1, -1, -1, 1]];
        for (pos, row) in expected.iter().enumerate() {
            let mut input = [0i64; 4];
            input[pos] = 1;
            let mut out = [0i64; 4];
            transform_vector(4, &input, &mut out).unwrap();
            assert_eq!(&out, row, "unit vector {}", pos);
        }
    }

    #[test]
    fn test_length_one_is_copy() {
        let mut out = [0.0f32];
        transform_vector(1, &[4.5f32], &mut out).unwrap();
        assert_eq!(out, [4.5]);

        let mut data = [-9i16];
        transform_vector_in_place(&mut data).unwrap();
        assert_eq!(data, [-9]);
    }

    #[test]
    fn test_self_inverse_i32() {
        // FWHT(FWHT(x)) == N * x
        let original: Vec<i32> = vec![1, 2, 3, 4, 5, 6, 7, 8];
        let mut once = vec![0i32; 8];
        let mut twice = vec![0i32; 8];
        transform_vector(8, &original, &mut once).unwrap();
        transform_vector(8, &once, &mut twice).unwrap();
        for i in 0..8 {
            assert_eq!(twice[i], original[i] * 8, "self-inverse failed at {}", i);
        }
    }

    #[test]
    fn test_in_place_matches_out_of_place() {
        for &n in &[2usize, 4, 8, 16, 32, 64, 128, 256] {
            let input: Vec<f64> = (0..n).map(|i| (i as f64 * 0.37).sin()).collect();
            let mut out = vec![0.0f64; n];
            transform_vector(n, &input, &mut out).unwrap();

            let mut data = input.clone();
            transform_vector_in_place(&mut data).unwrap();
            assert_eq!(data, out, "size={}", n);
        }
    }

    #[test]
    fn test_matches_dense_reference() {
        for &n in &[1usize, 2, 4, 8, 16, 64] {
            let input: Vec<i64> = (0..n as i64).map(|i| (i * 7919) % 23 - 11).collect();
            let mut out = vec![0i64; n];
            transform_vector(n, &input, &mut out).unwrap();
            assert_eq!(out, hadamard_reference(&input).unwrap(), "size={}", n);
        }
    }

    #[test]
    fn test_not_power_of_two_leaves_output_untouched() {
        for &n in &[3usize, 5, 6, 7, 9, 11] {
            let input = vec![1.0f64; n];
            let mut out = vec![-1.0f64; n];
            let err = transform_vector(n, &input, &mut out).unwrap_err();
            assert!(matches!(err, FhtError::InvalidDimension { length } if length == n));
            assert!(out.iter().all(|&v| v == -1.0), "size={} was written", n);
        }
    }

    #[test]
    fn test_zero_length_rejected() {
        let input: [f32; 0] = [];
        let mut out: [f32; 0] = [];
        assert!(matches!(
            transform_vector(0, &input, &mut out),
            Err(FhtError::InvalidDimension { length: 0 })
        ));
        assert!(transform_vector_in_place::<f32>(&mut []).is_err());
    }

    #[test]
    fn test_output_length_mismatch() {
        let input = [1.0f32, 2.0, 3.0, 4.0];
        let mut out = [7.0f32; 8];
        let err = transform_vector(4, &input, &mut out).unwrap_err();
        assert!(matches!(err, FhtError::BufferSizeMismatch { expected: 4, input: 4, output: 8 }));
        assert!(out.iter().all(|&v| v == 7.0));
    }
}
