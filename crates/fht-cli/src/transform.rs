//! `fht transform`: text matrix in, transformed text matrix out.

use clap::ValueEnum;
use tracing::debug;

use fht_kernels::RowTransformer;

use crate::element::CliElement;
use crate::io::{format_matrix, parse_matrix};

/// Axes of the input matrix to transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AxisArg {
    /// Each row independently (axis 1).
    #[value(alias = "1")]
    Rows,
    /// Each column independently (axis 0).
    #[value(alias = "0")]
    Columns,
    /// Both axes; same as the flat transform of the whole matrix.
    All,
}

/// Output scaling for `fht transform`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scaling {
    #[default]
    None,
    /// Divide by the transform size (undoes a previous unscaled transform).
    Inverse,
    /// Divide by the square root of the transform size.
    Orthonormal,
}

#[derive(Debug, Clone, Copy)]
pub struct TransformOptions {
    pub axis: AxisArg,
    pub scaling: Scaling,
}

/// Parse `text` as a matrix of `T`, transform it, and format the result.
pub fn transform_text<T>(
    text: &str,
    options: &TransformOptions,
    transformer: &RowTransformer,
) -> anyhow::Result<String>
where
    T: CliElement,
    <T as std::str::FromStr>::Err: std::fmt::Display,
{
    let mut matrix = parse_matrix::<T>(text)?;
    if matrix.rows == 0 {
        return Ok(String::new());
    }
    debug!(rows = matrix.rows, cols = matrix.cols, axis = ?options.axis, "Parsed input matrix");

    let shape = matrix.shape();
    let n = match options.axis {
        AxisArg::Rows => {
            transformer.transform_rows_in_place(matrix.rows, matrix.cols, &mut matrix.data)?;
            matrix.cols
        }
        AxisArg::Columns => {
            transformer.transform_axes(&shape, &[0], &mut matrix.data)?;
            matrix.rows
        }
        AxisArg::All => {
            transformer.transform_axes(&shape, &[0, 1], &mut matrix.data)?;
            matrix.rows * matrix.cols
        }
    };

    match options.scaling {
        Scaling::None => {}
        Scaling::Inverse => {
            for v in matrix.data.iter_mut() {
                *v = v.div_len(n);
            }
        }
        Scaling::Orthonormal => T::orthonormalize(&mut matrix.data, n)?,
    }

    Ok(format_matrix(&matrix))
}
