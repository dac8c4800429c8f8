//! Runtime element-type dispatch for the CLI.

use std::fmt::Display;
use std::str::FromStr;

use rand::rngs::StdRng;
use rand::Rng;

use fht_kernels::{FloatScalar, Scalar};

/// An element type the CLI can parse, print, generate and scale.
pub trait CliElement: Scalar + FromStr + Display {
    /// Divide by `sqrt(n)`; only meaningful for float types.
    fn orthonormalize(data: &mut [Self], n: usize) -> anyhow::Result<()>;

    /// Random benchmark value. Integers stay small so long rows cannot overflow.
    fn random(rng: &mut StdRng) -> Self;
}

fn scale_float<T: FloatScalar>(data: &mut [T], n: usize) {
    let factor = 1.0 / (n as f64).sqrt();
    for v in data.iter_mut() {
        *v = v.scale(factor);
    }
}

impl CliElement for f32 {
    fn orthonormalize(data: &mut [Self], n: usize) -> anyhow::Result<()> {
        scale_float(data, n);
        Ok(())
    }

    fn random(rng: &mut StdRng) -> Self {
        rng.gen_range(-1.0..1.0)
    }
}

impl CliElement for f64 {
    fn orthonormalize(data: &mut [Self], n: usize) -> anyhow::Result<()> {
        scale_float(data, n);
        Ok(())
    }

    fn random(rng: &mut StdRng) -> Self {
        rng.gen_range(-1.0..1.0)
    }
}

impl CliElement for i32 {
    fn orthonormalize(_data: &mut [Self], _n: usize) -> anyhow::Result<()> {
        anyhow::bail!("--orthonormal requires a float element type (f32 or f64)")
    }

    fn random(rng: &mut StdRng) -> Self {
        rng.gen_range(-16..16)
    }
}

impl CliElement for i64 {
    fn orthonormalize(_data: &mut [Self], _n: usize) -> anyhow::Result<()> {
        anyhow::bail!("--orthonormal requires a float element type (f32 or f64)")
    }

    fn random(rng: &mut StdRng) -> Self {
        rng.gen_range(-16..16)
    }
}
