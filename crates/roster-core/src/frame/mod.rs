//! Frame module - a small typed column store
//!
//! This module provides:
//! - Value: scalar cell values
//! - Series: a single named column with per-slot nulls
//! - DataFrame: an ordered collection of equal-length Series
//! - GroupedDataFrame: a DataFrame partitioned by key columns
//! - CSV input from files or URLs with type inference

mod dataframe;
mod error;
mod grouped;
pub mod io;
mod series;
mod value;

pub use dataframe::DataFrame;
pub use error::{FrameError, FrameResult};
pub use grouped::{crosstab, AggOp, AggSpec, GroupKey, GroupedDataFrame};
pub use io::{read_csv, read_csv_from, read_csv_url, CsvOptions};
pub use series::Series;
pub use value::Value;
