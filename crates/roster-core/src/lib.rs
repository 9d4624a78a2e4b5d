//! Roster Core - analytics engine for the roster toolkit
//!
//! This crate provides:
//! - Array operations: stateless transformations on vectors and matrices
//! - Frame: a small typed column store with grouping and aggregation
//! - Census: the fixed descriptive-analysis sequence over the adult dataset
//! - Report: the load-query-export pipeline over rooms and students

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Array operations module - vector and matrix transformations
pub mod array;

/// Frame module - Series, DataFrame, and grouped aggregation
pub mod frame;

/// Census module - descriptive statistics over the adult census frame
pub mod census;

/// Report module - JSON loading, fixed queries, and JSON/XML export
pub mod report;

/// Convenience re-export of the core frame types
pub use frame::{DataFrame, Series, Value};

/// Convenience re-export of the report pipeline entry points
pub use report::{QueryOutcome, QueryRunner, ResultSet};
