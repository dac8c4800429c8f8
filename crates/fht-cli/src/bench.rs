//! `fht bench`: time the row driver over a generated matrix.

use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use fht_core::BenchConfig;
use fht_kernels::RowTransformer;

use crate::element::CliElement;

/// Timing summary for one benchmark run.
#[derive(Debug, Clone)]
pub struct BenchReport {
    pub row_count: usize,
    pub row_length: usize,
    pub iterations: usize,
    pub workers: usize,
    pub best: Duration,
    pub mean: Duration,
    /// Elements transformed per second, from the best iteration.
    pub elements_per_sec: f64,
    /// Add/subtract operations per second, from the best iteration.
    pub ops_per_sec: f64,
}

pub fn run_bench<T: CliElement>(
    config: &BenchConfig,
    transformer: &RowTransformer,
    seed: u64,
) -> anyhow::Result<BenchReport> {
    config.validate()?;
    let total = config.total_elements()?;
    let mut rng = StdRng::seed_from_u64(seed);
    let input: Vec<T> = (0..total).map(|_| T::random(&mut rng)).collect();
    let mut output = vec![T::ZERO; total];

    // Warmup
    transformer.transform_rows(config.row_count, config.row_length, &input, &mut output)?;

    let mut best = Duration::MAX;
    let mut sum = Duration::ZERO;
    for _ in 0..config.iterations {
        let start = Instant::now();
        transformer.transform_rows(config.row_count, config.row_length, &input, &mut output)?;
        let elapsed = start.elapsed();
        best = best.min(elapsed);
        sum += elapsed;
    }

    let mean = sum / u32::try_from(config.iterations)?;
    let secs = best.as_secs_f64().max(f64::MIN_POSITIVE);
    let stages = config.row_length.trailing_zeros() as f64;
    let report = BenchReport {
        row_count: config.row_count,
        row_length: config.row_length,
        iterations: config.iterations,
        workers: transformer.num_threads(),
        best,
        mean,
        elements_per_sec: total as f64 / secs,
        ops_per_sec: total as f64 * stages / secs,
    };
    info!(
        row_count = report.row_count,
        row_length = report.row_length,
        workers = report.workers,
        best_us = report.best.as_micros() as u64,
        "Benchmark completed"
    );
    Ok(report)
}
