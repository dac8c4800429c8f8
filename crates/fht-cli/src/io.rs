//! Plain-text matrix format: one row per line, values separated by
//! whitespace or commas. Blank lines and `#` comments are skipped.

use std::fmt::Display;
use std::io::{Read, Write};
use std::path::Path;
use std::str::FromStr;

use fht_core::{FhtError, Result};

/// Row-major matrix read from text.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix<T> {
    pub rows: usize,
    pub cols: usize,
    pub data: Vec<T>,
}

impl<T> Matrix<T> {
    pub fn shape(&self) -> [usize; 2] {
        [self.rows, self.cols]
    }
}

pub fn parse_matrix<T>(text: &str) -> Result<Matrix<T>>
where
    T: FromStr,
    T::Err: Display,
{
    let mut data = Vec::new();
    let mut rows = 0;
    let mut cols = 0;

    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }

        let before = data.len();
        for token in line.split(|c: char| c.is_whitespace() || c == ',') {
            if token.is_empty() {
                continue;
            }
            let value = token.parse::<T>().map_err(|e| FhtError::Parse {
                line: line_no,
                reason: format!("'{}': {}", token, e),
            })?;
            data.push(value);
        }

        let found = data.len() - before;
        if rows == 0 {
            cols = found;
        } else if found != cols {
            return Err(FhtError::RaggedRow {
                line: line_no,
                expected: cols,
                found,
            });
        }
        rows += 1;
    }

    Ok(Matrix { rows, cols, data })
}

pub fn format_matrix<T: Display>(matrix: &Matrix<T>) -> String {
    let mut out = String::new();
    if matrix.cols == 0 {
        return out;
    }
    for row in matrix.data.chunks(matrix.cols) {
        let line: Vec<String> = row.iter().map(|v| v.to_string()).collect();
        out.push_str(&line.join(" "));
        out.push('\n');
    }
    out
}

/// Read a whole file, or stdin when `path` is `-`.
pub fn read_source(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        return Ok(text);
    }
    Ok(std::fs::read_to_string(path)?)
}

/// Write to a file, or stdout when `path` is `-`.
pub fn write_sink(path: &Path, text: &str) -> Result<()> {
    if path.as_os_str() == "-" {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(text.as_bytes())?;
        stdout.flush()?;
        return Ok(());
    }
    std::fs::write(path, text)?;
    Ok(())
}
