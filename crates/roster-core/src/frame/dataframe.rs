//! DataFrame: an ordered collection of equal-length Series

use std::sync::Arc;

use super::error::{FrameError, FrameResult};
use super::grouped::GroupedDataFrame;
use super::series::Series;

/// A table of named, equal-length columns
#[derive(Debug, Clone, PartialEq)]
pub struct DataFrame {
    columns: Vec<Series>,
}

impl DataFrame {
    /// Create a DataFrame with no columns
    #[must_use]
    pub fn empty() -> Self {
        Self { columns: Vec::new() }
    }

    /// Create a DataFrame from columns
    ///
    /// # Errors
    /// Returns error if column lengths differ or names collide
    pub fn from_series(columns: Vec<Series>) -> FrameResult<Self> {
        if let Some(first) = columns.first() {
            let expected = first.len();
            for col in &columns[1..] {
                if col.len() != expected {
                    return Err(FrameError::LengthMismatch {
                        name: col.name().to_string(),
                        expected,
                        found: col.len(),
                    });
                }
            }
            for (i, col) in columns.iter().enumerate() {
                if columns[..i].iter().any(|c| c.name() == col.name()) {
                    return Err(FrameError::DuplicateColumn(col.name().to_string()));
                }
            }
        }
        Ok(Self { columns })
    }

    /// Get the number of rows
    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.columns.first().map_or(0, Series::len)
    }

    /// Get the number of columns
    #[must_use]
    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.num_rows() == 0
    }

    /// Get the column names in order
    #[must_use]
    pub fn columns(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name().to_string()).collect()
    }

    /// Get a column by name
    ///
    /// # Errors
    /// Returns error if the column does not exist
    pub fn column(&self, name: &str) -> FrameResult<&Series> {
        self.columns
            .iter()
            .find(|c| c.name() == name)
            .ok_or_else(|| FrameError::ColumnNotFound(name.to_string()))
    }

    /// Take the first n rows
    ///
    /// # Errors
    /// Returns error only on internal index failures
    pub fn head(&self, n: usize) -> FrameResult<Self> {
        let take = n.min(self.num_rows());
        let indices: Vec<usize> = (0..take).collect();
        self.take_rows(&indices)
    }

    /// Keep only the named columns, in the given order
    ///
    /// # Errors
    /// Returns error if a column does not exist
    pub fn select(&self, names: &[&str]) -> FrameResult<Self> {
        let columns = names
            .iter()
            .map(|name| self.column(name).cloned())
            .collect::<FrameResult<Vec<_>>>()?;
        Self::from_series(columns)
    }

    /// Keep rows where the mask is true
    ///
    /// # Errors
    /// Returns error if the mask length does not match the row count
    pub fn filter(&self, mask: &[bool]) -> FrameResult<Self> {
        if mask.len() != self.num_rows() {
            return Err(FrameError::LengthMismatch {
                name: "<mask>".to_string(),
                expected: self.num_rows(),
                found: mask.len(),
            });
        }
        let indices: Vec<usize> = mask
            .iter()
            .enumerate()
            .filter_map(|(i, &keep)| keep.then_some(i))
            .collect();
        self.take_rows(&indices)
    }

    /// Build a new DataFrame from the given row indices
    ///
    /// # Errors
    /// Returns error if an index is out of bounds
    pub fn take_rows(&self, indices: &[usize]) -> FrameResult<Self> {
        let columns = self
            .columns
            .iter()
            .map(|c| c.take(indices))
            .collect::<FrameResult<Vec<_>>>()?;
        Ok(Self { columns })
    }

    /// Add a column, replacing any existing column with the same name
    ///
    /// # Errors
    /// Returns error if the column length does not match the row count
    pub fn with_column(&self, series: Series) -> FrameResult<Self> {
        if self.num_columns() > 0 && series.len() != self.num_rows() {
            return Err(FrameError::LengthMismatch {
                name: series.name().to_string(),
                expected: self.num_rows(),
                found: series.len(),
            });
        }
        let mut columns = self.columns.clone();
        if let Some(slot) = columns.iter_mut().find(|c| c.name() == series.name()) {
            *slot = series;
        } else {
            columns.push(series);
        }
        Ok(Self { columns })
    }

    /// Group by one or more key columns
    ///
    /// # Errors
    /// Returns error if a key column does not exist or has float type
    pub fn group_by(&self, columns: &[&str]) -> FrameResult<GroupedDataFrame> {
        GroupedDataFrame::new(
            Arc::new(self.clone()),
            columns.iter().map(ToString::to_string).collect(),
        )
    }

    /// Count occurrences of each value in a column
    ///
    /// # Errors
    /// Returns error if the column does not exist
    pub fn value_counts(&self, column: &str) -> FrameResult<Vec<(String, usize)>> {
        Ok(self.column(column)?.value_counts())
    }
}
