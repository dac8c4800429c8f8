//! Row-batched FWHT: the same butterfly applied independently to every row
//! of a row-major `row_count × row_length` matrix.
//!
//! Rows are split across rayon workers with `par_chunks_exact_mut`, so each
//! worker owns exactly one disjoint row of the output and reads only the
//! matching row of the input. No locks, atomics or cross-row ordering are
//! involved, and the result is bit-identical for any worker count.

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::{debug, info};

use fht_core::{FhtError, KernelConfig, Result};

use crate::axes::transform_axes;
use crate::fwht::{butterfly, butterfly_in_place};
use crate::scalar::Scalar;
use crate::validate::check_rows;

/// Row counts below this stay on the calling thread.
pub const PARALLEL_THRESHOLD: usize = 4;

/// FWHT of every row of `input` into the same row of `output`, on the
/// global rayon pool.
///
/// # Errors
/// Same conditions as [`crate::transform_vector`], checked once against
/// `row_length` before any row is dispatched.
pub fn transform_rows<T: Scalar>(
    row_count: usize,
    row_length: usize,
    input: &[T],
    output: &mut [T],
) -> Result<()> {
    check_rows(row_count, row_length, input.len(), output.len())?;
    rows_out_of_place(row_length, row_count >= PARALLEL_THRESHOLD, input, output);
    Ok(())
}

/// In-place variant of [`transform_rows`].
pub fn transform_rows_in_place<T: Scalar>(
    row_count: usize,
    row_length: usize,
    data: &mut [T],
) -> Result<()> {
    check_rows(row_count, row_length, data.len(), data.len())?;
    rows_in_place(row_length, row_count >= PARALLEL_THRESHOLD, data);
    Ok(())
}

pub(crate) fn rows_out_of_place<T: Scalar>(
    row_length: usize,
    parallel: bool,
    input: &[T],
    output: &mut [T],
) {
    if parallel {
        output
            .par_chunks_exact_mut(row_length)
            .zip(input.par_chunks_exact(row_length))
            .for_each(|(out_row, in_row)| butterfly(in_row, out_row));
    } else {
        output
            .chunks_exact_mut(row_length)
            .zip(input.chunks_exact(row_length))
            .for_each(|(out_row, in_row)| butterfly(in_row, out_row));
    }
}

pub(crate) fn rows_in_place<T: Scalar>(row_length: usize, parallel: bool, data: &mut [T]) {
    if parallel {
        data.par_chunks_exact_mut(row_length)
            .for_each(|row| butterfly_in_place(row));
    } else {
        data.chunks_exact_mut(row_length)
            .for_each(|row| butterfly_in_place(row));
    }
}

/// Row driver with an explicit degree of parallelism.
///
/// With `num_threads == 0` work runs on rayon's global pool; otherwise a
/// dedicated pool of that many workers is built once and reused.
pub struct RowTransformer {
    pool: Option<ThreadPool>,
    parallel_threshold_rows: usize,
}

impl RowTransformer {
    pub fn new(config: &KernelConfig) -> Result<Self> {
        config.validate()?;
        let pool = match config.num_threads {
            0 => None,
            n => {
                let pool = ThreadPoolBuilder::new()
                    .num_threads(n)
                    .thread_name(|i| format!("fht-row-{}", i))
                    .build()
                    .map_err(|e| FhtError::ThreadPool(e.to_string()))?;
                info!(num_threads = n, "Built dedicated row-transform pool");
                Some(pool)
            }
        };
        Ok(Self {
            pool,
            parallel_threshold_rows: config.parallel_threshold_rows,
        })
    }

    /// Workers available to this transformer.
    pub fn num_threads(&self) -> usize {
        match &self.pool {
            Some(pool) => pool.current_num_threads(),
            None => rayon::current_num_threads(),
        }
    }

    pub fn parallel_threshold_rows(&self) -> usize {
        self.parallel_threshold_rows
    }

    fn use_parallel(&self, row_count: usize) -> bool {
        row_count >= self.parallel_threshold_rows && self.num_threads() > 1
    }

    fn install<R: Send>(&self, op: impl FnOnce() -> R + Send) -> R {
        match &self.pool {
            Some(pool) => pool.install(op),
            None => op(),
        }
    }

    /// See [`transform_rows`].
    pub fn transform_rows<T: Scalar>(
        &self,
        row_count: usize,
        row_length: usize,
        input: &[T],
        output: &mut [T],
    ) -> Result<()> {
        check_rows(row_count, row_length, input.len(), output.len())?;
        let parallel = self.use_parallel(row_count);
        debug!(
            row_count,
            row_length,
            parallel,
            workers = self.num_threads(),
            "Dispatching row transform"
        );
        self.install(|| rows_out_of_place(row_length, parallel, input, output));
        Ok(())
    }

    /// See [`transform_rows_in_place`].
    pub fn transform_rows_in_place<T: Scalar>(
        &self,
        row_count: usize,
        row_length: usize,
        data: &mut [T],
    ) -> Result<()> {
        check_rows(row_count, row_length, data.len(), data.len())?;
        let parallel = self.use_parallel(row_count);
        debug!(row_count, row_length, parallel, "Dispatching in-place row transform");
        self.install(|| rows_in_place(row_length, parallel, data));
        Ok(())
    }

    /// [`transform_axes`] run on this transformer's workers.
    pub fn transform_axes<T: Scalar>(
        &self,
        shape: &[usize],
        axes: &[usize],
        data: &mut [T],
    ) -> Result<()> {
        self.install(|| transform_axes(shape, axes, data))
    }
}

impl Default for RowTransformer {
    fn default() -> Self {
        Self {
            pool: None,
            parallel_threshold_rows: PARALLEL_THRESHOLD,
        }
    }
}

impl std::fmt::Debug for RowTransformer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RowTransformer")
            .field("dedicated_pool", &self.pool.is_some())
            .field("num_threads", &self.num_threads())
            .field("parallel_threshold_rows", &self.parallel_threshold_rows)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fwht::transform_vector;

    /// Deterministic pseudo-random matrix.
    fn make_matrix(rows: usize, cols: usize) -> Vec<f64> {
        (0..rows * cols)
            .map(|i| {
                let v = (i as u32).wrapping_mul(2654435761) >> 16;
                (v % 200) as f64 / 100.0 - 1.0
            })
            .collect()
    }

    #[test]
    fn test_rows_match_single_vector() {
        for &(rows, cols) in &[(1, 2), (3, 8), (17, 64), (64, 128)] {
            let input = make_matrix(rows, cols);
            let mut output = vec![0.0f64; rows * cols];
            transform_rows(rows, cols, &input, &mut output).unwrap();

            for r in 0..rows {
                let mut expected = vec![0.0f64; cols];
                transform_vector(cols, &input[r * cols..(r + 1) * cols], &mut expected).unwrap();
                assert_eq!(
                    &output[r * cols..(r + 1) * cols],
                    &expected[..],
                    "[{}x{}] row {} differs",
                    rows,
                    cols,
                    r
                );
            }
        }
    }

    #[test]
    fn test_original_2d_cases() {
        // 2x2 matrices, row-wise transform
        let cases: [([i32; 4], [i32; 4]); 4] = [
            ([2, 0, 0, 0], [2, 2, 0, 0]),
            ([0, 2, 0, 0], [2, -2, 0, 0]),
            ([0, 0, 2, 0], [0, 0, 2, 2]),
            ([0, 0, 0, 2], [0, 0, 2, -2]),
        ];
        for (input, expected) in cases {
            let mut out = [0i32; 4];
            transform_rows(2, 2, &input, &mut out).unwrap();
            assert_eq!(out, expected);
        }
    }

    #[test]
    fn test_zero_rows_is_noop() {
        let mut out: Vec<f32> = Vec::new();
        transform_rows(0, 8, &[], &mut out).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_invalid_row_length_writes_nothing() {
        let input = vec![1i64; 12];
        let mut out = vec![5i64; 12];
        assert!(matches!(
            transform_rows(4, 3, &input, &mut out),
            Err(FhtError::InvalidDimension { length: 3 })
        ));
        assert!(out.iter().all(|&v| v == 5));
    }

    #[test]
    fn test_geometry_mismatch() {
        let input = vec![1.0f32; 16];
        let mut out = vec![0.0f32; 12];
        assert!(matches!(
            transform_rows(4, 4, &input, &mut out),
            Err(FhtError::BufferSizeMismatch { expected: 16, input: 16, output: 12 })
        ));
    }

    #[test]
    fn test_in_place_matches_out_of_place() {
        let input = make_matrix(9, 32);
        let mut out = vec![0.0f64; input.len()];
        transform_rows(9, 32, &input, &mut out).unwrap();

        let mut data = input.clone();
        transform_rows_in_place(9, 32, &mut data).unwrap();
        assert_eq!(data, out);
    }

    #[test]
    fn test_transformer_worker_counts_agree() {
        let (rows, cols) = (33, 256);
        let input = make_matrix(rows, cols);
        let mut reference = vec![0.0f64; rows * cols];
        RowTransformer::new(&KernelConfig::sequential())
            .unwrap()
            .transform_rows(rows, cols, &input, &mut reference)
            .unwrap();

        for threads in [2usize, 3, 8] {
            let transformer = RowTransformer::new(&KernelConfig {
                num_threads: threads,
                parallel_threshold_rows: 1,
            })
            .unwrap();
            assert_eq!(transformer.num_threads(), threads);

            let mut out = vec![0.0f64; rows * cols];
            transformer.transform_rows(rows, cols, &input, &mut out).unwrap();
            assert_eq!(out, reference, "{} workers", threads);
        }
    }

    #[test]
    fn test_transformer_in_place() {
        let transformer = RowTransformer::new(&KernelConfig {
            num_threads: 2,
            parallel_threshold_rows: 0,
        })
        .unwrap();
        let mut data = vec![1i32, 0, 0, 0, 0, 1, 0, 0];
        transformer.transform_rows_in_place(2, 4, &mut data).unwrap();
        assert_eq!(data, vec![1, 1, 1, 1, 1, -1, 1, -1]);
    }

    #[test]
    fn test_transformer_axes_match_free_function() {
        let transformer = RowTransformer::new(&KernelConfig {
            num_threads: 3,
            parallel_threshold_rows: 1,
        })
        .unwrap();
        let mut pooled = make_matrix(8, 16);
        let mut global = pooled.clone();
        transformer.transform_axes(&[8, 16], &[0], &mut pooled).unwrap();
        transform_axes(&[8, 16], &[0], &mut global).unwrap();
        assert_eq!(pooled, global);

        assert!(transformer.transform_axes(&[8, 16], &[2], &mut pooled).is_err());
    }

    #[test]
    fn test_default_transformer_uses_global_pool() {
        let transformer = RowTransformer::default();
        assert_eq!(transformer.num_threads(), rayon::current_num_threads());
        assert_eq!(transformer.parallel_threshold_rows(), PARALLEL_THRESHOLD);
        assert!(format!("{:?}", transformer).contains("dedicated_pool: false"));
    }
}
