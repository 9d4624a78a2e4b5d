//! Series: a single named column with per-slot nulls

use std::collections::BTreeMap;

use super::error::{FrameError, FrameResult};
use super::value::Value;

/// Typed column storage
#[derive(Debug, Clone, PartialEq)]
enum SeriesData {
    Int(Vec<Option<i64>>),
    Float(Vec<Option<f64>>),
    Str(Vec<Option<String>>),
}

/// A named column of values sharing one type
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    name: String,
    data: SeriesData,
}

impl Series {
    /// Create an integer series without nulls
    pub fn from_ints(name: impl Into<String>, values: Vec<i64>) -> Self {
        Self {
            name: name.into(),
            data: SeriesData::Int(values.into_iter().map(Some).collect()),
        }
    }

    /// Create a float series without nulls
    pub fn from_floats(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            data: SeriesData::Float(values.into_iter().map(Some).collect()),
        }
    }

    /// Create a string series without nulls
    pub fn from_strings(name: impl Into<String>, values: Vec<&str>) -> Self {
        Self {
            name: name.into(),
            data: SeriesData::Str(values.into_iter().map(|s| Some(s.to_string())).collect()),
        }
    }

    /// Create an integer series with nulls
    pub fn from_optional_ints(name: impl Into<String>, values: Vec<Option<i64>>) -> Self {
        Self {
            name: name.into(),
            data: SeriesData::Int(values),
        }
    }

    /// Create a float series with nulls
    pub fn from_optional_floats(name: impl Into<String>, values: Vec<Option<f64>>) -> Self {
        Self {
            name: name.into(),
            data: SeriesData::Float(values),
        }
    }

    /// Create a string series with nulls
    pub fn from_optional_strings(name: impl Into<String>, values: Vec<Option<String>>) -> Self {
        Self {
            name: name.into(),
            data: SeriesData::Str(values),
        }
    }

    /// Create a series from mixed values, inferring the column type
    ///
    /// All-null input becomes an integer column. Integers widen to floats
    /// when floats are present; strings never mix with numbers.
    ///
    /// # Errors
    /// Returns error if numeric and string values are mixed
    pub fn from_values(name: impl Into<String>, values: &[Value]) -> FrameResult<Self> {
        let mut has_float = false;
        let mut has_int = false;
        let mut has_str = false;
        for v in values {
            match v {
                Value::Null => {}
                Value::Int(_) => has_int = true,
                Value::Float(_) => has_float = true,
                Value::Str(_) => has_str = true,
            }
        }

        if has_str && (has_int || has_float) {
            return Err(FrameError::TypeMismatch {
                expected: "a single column type",
                found: "mixed numeric and string values",
            });
        }

        let name = name.into();
        if has_str {
            let data = values
                .iter()
                .map(|v| v.as_str().map(ToString::to_string))
                .collect();
            Ok(Self::from_optional_strings(name, data))
        } else if has_float {
            let data = values.iter().map(Value::as_f64).collect();
            Ok(Self::from_optional_floats(name, data))
        } else {
            let data = values.iter().map(Value::as_i64).collect();
            Ok(Self::from_optional_ints(name, data))
        }
    }

    /// Get the series name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rename the series (consumes and returns self)
    #[must_use]
    pub fn rename(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Get the column type name
    #[must_use]
    pub fn dtype(&self) -> &'static str {
        match &self.data {
            SeriesData::Int(_) => "int",
            SeriesData::Float(_) => "float",
            SeriesData::Str(_) => "string",
        }
    }

    /// Get the number of slots (including nulls)
    #[must_use]
    pub fn len(&self) -> usize {
        match &self.data {
            SeriesData::Int(v) => v.len(),
            SeriesData::Float(v) => v.len(),
            SeriesData::Str(v) => v.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get the number of null slots
    #[must_use]
    pub fn null_count(&self) -> usize {
        match &self.data {
            SeriesData::Int(v) => v.iter().filter(|x| x.is_none()).count(),
            SeriesData::Float(v) => v.iter().filter(|x| x.is_none()).count(),
            SeriesData::Str(v) => v.iter().filter(|x| x.is_none()).count(),
        }
    }

    /// Get the number of non-null slots
    #[must_use]
    pub fn count(&self) -> usize {
        self.len() - self.null_count()
    }

    /// Get the value at an index
    ///
    /// # Errors
    /// Returns error if the index is out of bounds
    pub fn get(&self, index: usize) -> FrameResult<Value> {
        if index >= self.len() {
            return Err(FrameError::OutOfBounds {
                index,
                length: self.len(),
            });
        }
        Ok(match &self.data {
            SeriesData::Int(v) => v[index].map_or(Value::Null, Value::Int),
            SeriesData::Float(v) => v[index].map_or(Value::Null, Value::Float),
            SeriesData::Str(v) => v[index].clone().map_or(Value::Null, Value::Str),
        })
    }

    /// Iterate over all values, nulls included
    pub fn iter(&self) -> impl Iterator<Item = Value> + '_ {
        (0..self.len()).map(|i| match &self.data {
            SeriesData::Int(v) => v[i].map_or(Value::Null, Value::Int),
            SeriesData::Float(v) => v[i].map_or(Value::Null, Value::Float),
            SeriesData::Str(v) => v[i].clone().map_or(Value::Null, Value::Str),
        })
    }

    /// Build a new series from the given row indices
    ///
    /// # Errors
    /// Returns error if an index is out of bounds
    pub fn take(&self, indices: &[usize]) -> FrameResult<Self> {
        if let Some(&bad) = indices.iter().find(|&&i| i >= self.len()) {
            return Err(FrameError::OutOfBounds {
                index: bad,
                length: self.len(),
            });
        }
        let data = match &self.data {
            SeriesData::Int(v) => SeriesData::Int(indices.iter().map(|&i| v[i]).collect()),
            SeriesData::Float(v) => SeriesData::Float(indices.iter().map(|&i| v[i]).collect()),
            SeriesData::Str(v) => {
                SeriesData::Str(indices.iter().map(|&i| v[i].clone()).collect())
            }
        };
        Ok(Self {
            name: self.name.clone(),
            data,
        })
    }

    /// Build a boolean mask by applying a predicate to every value
    pub fn mask<F: Fn(&Value) -> bool>(&self, predicate: F) -> Vec<bool> {
        self.iter().map(|v| predicate(&v)).collect()
    }

    /// Mask of slots equal to a string
    pub fn eq_str(&self, other: &str) -> Vec<bool> {
        self.mask(|v| v.as_str() == Some(other))
    }

    /// Mask of slots equal to an integer
    pub fn eq_int(&self, other: i64) -> Vec<bool> {
        self.mask(|v| v.as_i64() == Some(other))
    }

    /// Mask of numeric slots strictly greater than a threshold
    pub fn gt(&self, threshold: f64) -> Vec<bool> {
        self.mask(|v| v.as_f64().is_some_and(|x| x > threshold))
    }

    /// Mask of string slots contained in the given set
    pub fn is_in(&self, set: &[&str]) -> Vec<bool> {
        self.mask(|v| v.as_str().is_some_and(|s| set.contains(&s)))
    }

    /// Derive a string series by mapping every value
    pub fn map_str<F: Fn(&Value) -> Option<String>>(
        &self,
        name: impl Into<String>,
        f: F,
    ) -> Series {
        let data = self.iter().map(|v| f(&v)).collect();
        Series::from_optional_strings(name, data)
    }

    /// All non-null values as floats
    ///
    /// # Errors
    /// Returns error for string columns
    pub fn numeric_values(&self) -> FrameResult<Vec<f64>> {
        match &self.data {
            SeriesData::Int(v) => Ok(v.iter().flatten().map(|&i| i as f64).collect()),
            SeriesData::Float(v) => Ok(v.iter().flatten().copied().collect()),
            SeriesData::Str(_) => Err(FrameError::TypeMismatch {
                expected: "numeric",
                found: "string",
            }),
        }
    }

    /// Sum of non-null values; Null when the column has no values
    ///
    /// # Errors
    /// Returns error for string columns
    pub fn sum(&self) -> FrameResult<Value> {
        let values = self.numeric_values()?;
        if values.is_empty() {
            return Ok(Value::Null);
        }
        match &self.data {
            SeriesData::Int(_) => Ok(Value::Int(values.iter().map(|&x| x as i64).sum())),
            _ => Ok(Value::Float(values.iter().sum())),
        }
    }

    /// Mean of non-null values; Null when the column has no values
    ///
    /// # Errors
    /// Returns error for string columns
    pub fn mean(&self) -> FrameResult<Value> {
        let values = self.numeric_values()?;
        if values.is_empty() {
            return Ok(Value::Null);
        }
        Ok(Value::Float(
            values.iter().sum::<f64>() / values.len() as f64,
        ))
    }

    /// Sample standard deviation of non-null values; Null with fewer than two
    ///
    /// # Errors
    /// Returns error for string columns
    pub fn std(&self) -> FrameResult<Value> {
        let values = self.numeric_values()?;
        if values.len() < 2 {
            return Ok(Value::Null);
        }
        let mean = values.iter().sum::<f64>() / values.len() as f64;
        let var = values.iter().map(|x| (x - mean).powi(2)).sum::<f64>()
            / (values.len() - 1) as f64;
        Ok(Value::Float(var.sqrt()))
    }

    /// Minimum non-null value; Null when the column has no values
    pub fn min(&self) -> Value {
        self.fold_extreme(false)
    }

    /// Maximum non-null value; Null when the column has no values
    pub fn max(&self) -> Value {
        self.fold_extreme(true)
    }

    fn fold_extreme(&self, want_max: bool) -> Value {
        match &self.data {
            SeriesData::Int(v) => {
                let it = v.iter().flatten().copied();
                let r = if want_max { it.max() } else { it.min() };
                r.map_or(Value::Null, Value::Int)
            }
            SeriesData::Float(v) => {
                let mut best: Option<f64> = None;
                for &x in v.iter().flatten() {
                    best = Some(match best {
                        None => x,
                        Some(b) if want_max && x > b => x,
                        Some(b) if !want_max && x < b => x,
                        Some(b) => b,
                    });
                }
                best.map_or(Value::Null, Value::Float)
            }
            SeriesData::Str(v) => {
                let it = v.iter().flatten();
                let r = if want_max { it.max() } else { it.min() };
                r.cloned().map_or(Value::Null, Value::Str)
            }
        }
    }

    /// Count occurrences of each non-null value
    ///
    /// Returns (display value, count) pairs ordered by descending count,
    /// ties broken by ascending value.
    #[must_use]
    pub fn value_counts(&self) -> Vec<(String, usize)> {
        let mut counts: BTreeMap<String, usize> = BTreeMap::new();
        for v in self.iter() {
            if !v.is_null() {
                *counts.entry(v.to_string()).or_insert(0) += 1;
            }
        }
        let mut pairs: Vec<(String, usize)> = counts.into_iter().collect();
        pairs.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        pairs
    }
}
