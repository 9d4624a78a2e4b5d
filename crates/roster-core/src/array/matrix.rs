//! Matrix operations over row-major `Vec<Vec<_>>` data

use std::collections::HashSet;
use std::ops::Range;

use rand::Rng;

/// All combinations taking one element from each column
///
/// Output rows are in row-major order: the first column varies slowest.
/// Any empty column yields an empty product.
#[must_use]
pub fn cartesian_product<T: Clone>(columns: &[Vec<T>]) -> Vec<Vec<T>> {
    if columns.is_empty() || columns.iter().any(Vec::is_empty) {
        return Vec::new();
    }
    let mut result: Vec<Vec<T>> = vec![Vec::new()];
    for column in columns {
        let mut next = Vec::with_capacity(result.len() * column.len());
        for prefix in &result {
            for item in column {
                let mut row = prefix.clone();
                row.push(item.clone());
                next.push(row);
            }
        }
        result = next;
    }
    result
}

/// Rows of `a` containing at least one element from every row of `b`
///
/// Element order within the probe rows does not matter. Input row order
/// is preserved.
#[must_use]
pub fn rows_containing_each(a: &[Vec<i64>], b: &[Vec<i64>]) -> Vec<Vec<i64>> {
    let probes: Vec<HashSet<i64>> = b.iter().map(|row| row.iter().copied().collect()).collect();
    a.iter()
        .filter(|row| {
            probes
                .iter()
                .all(|probe| row.iter().any(|v| probe.contains(v)))
        })
        .cloned()
        .collect()
}

/// Rows whose values are not all equal
#[must_use]
pub fn rows_with_unequal_values(matrix: &[Vec<i64>]) -> Vec<Vec<i64>> {
    matrix
        .iter()
        .filter(|row| row.windows(2).any(|w| w[0] != w[1]))
        .cloned()
        .collect()
}

/// Unique rows in sorted order
#[must_use]
pub fn dedup_rows(matrix: &[Vec<i64>]) -> Vec<Vec<i64>> {
    let mut rows = matrix.to_vec();
    rows.sort();
    rows.dedup();
    rows
}

/// Product of the non-zero main diagonal elements
///
/// The diagonal of a rectangular matrix runs to the shorter dimension.
/// A matrix with an all-zero (or empty) diagonal yields 1, the empty
/// product.
#[must_use]
pub fn nonzero_diagonal_product(matrix: &[Vec<i64>]) -> i64 {
    matrix
        .iter()
        .enumerate()
        .filter_map(|(i, row)| row.get(i))
        .filter(|&&v| v != 0)
        .product()
}

/// Generate a matrix of random integers in a half-open range
#[must_use]
pub fn random_matrix(rows: usize, cols: usize, range: Range<i64>) -> Vec<Vec<i64>> {
    let mut rng = rand::thread_rng();
    (0..rows)
        .map(|_| (0..cols).map(|_| rng.gen_range(range.clone())).collect())
        .collect()
}
