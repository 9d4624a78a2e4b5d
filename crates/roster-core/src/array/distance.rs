//! Pairwise Euclidean distance matrices

use rayon::prelude::*;

use super::{ArrayError, ArrayResult};

/// Full pairwise Euclidean distance matrix between two point samples
///
/// `x` and `y` are row-major samples sharing the same feature count;
/// the result has one row per point of `x` and one column per point of
/// `y`. Uses the sum-of-squares identity, clamping negative rounding
/// residue at zero before the square root. Rows are computed in
/// parallel.
///
/// # Errors
/// Returns error if rows are ragged or feature counts differ
pub fn euclidean_distances(x: &[Vec<f64>], y: &[Vec<f64>]) -> ArrayResult<Vec<Vec<f64>>> {
    check_uniform(x)?;
    check_uniform(y)?;
    if let (Some(xr), Some(yr)) = (x.first(), y.first()) {
        if xr.len() != yr.len() {
            return Err(ArrayError::DimensionMismatch {
                left: xr.len(),
                right: yr.len(),
            });
        }
    }

    let y_sq: Vec<f64> = y.iter().map(|row| squared_norm(row)).collect();

    Ok(x.par_iter()
        .map(|xrow| {
            let x_sq = squared_norm(xrow);
            y.iter()
                .zip(&y_sq)
                .map(|(yrow, &y_norm)| {
                    let dot: f64 = xrow.iter().zip(yrow).map(|(a, b)| a * b).sum();
                    (x_sq - 2.0 * dot + y_norm).max(0.0).sqrt()
                })
                .collect()
        })
        .collect())
}

fn squared_norm(row: &[f64]) -> f64 {
    row.iter().map(|v| v * v).sum()
}

fn check_uniform(matrix: &[Vec<f64>]) -> ArrayResult<()> {
    if let Some(first) = matrix.first() {
        for (i, row) in matrix.iter().enumerate() {
            if row.len() != first.len() {
                return Err(ArrayError::RaggedMatrix {
                    row: i,
                    expected: first.len(),
                    found: row.len(),
                });
            }
        }
    }
    Ok(())
}
