//! Array operations module - stateless vector and matrix transformations
//!
//! This module provides:
//! - Vector operations: range-masked negation, max replacement,
//!   run-length encoding, max-after-zero, multiset equality
//! - Matrix operations: cartesian products, row filtering and
//!   deduplication, diagonal products
//! - Pairwise Euclidean distance matrices
//! - Random input generation helpers

mod distance;
mod matrix;
mod ops;

pub use distance::euclidean_distances;
pub use matrix::{
    cartesian_product, dedup_rows, nonzero_diagonal_product, random_matrix,
    rows_containing_each, rows_with_unequal_values,
};
pub use ops::{
    max_after_zero, multisets_equal, negate_where_between, random_vector, run_length_encode,
    zero_out_max,
};

use thiserror::Error;

/// Errors that can occur during array operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ArrayError {
    #[error("dimension mismatch: left has {left} features, right has {right}")]
    DimensionMismatch { left: usize, right: usize },

    #[error("ragged matrix: row {row} has {found} columns, expected {expected}")]
    RaggedMatrix {
        row: usize,
        expected: usize,
        found: usize,
    },
}

/// Result type for array operations
pub type ArrayResult<T> = Result<T, ArrayError>;
