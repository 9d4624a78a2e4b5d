//! GroupedDataFrame: a DataFrame partitioned by key columns

use std::collections::HashMap;
use std::sync::Arc;

use super::dataframe::DataFrame;
use super::error::{FrameError, FrameResult};
use super::series::Series;
use super::value::Value;

/// Aggregation operation type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggOp {
    /// Count of rows in the group
    Count,
    /// Sum of non-null values
    Sum,
    /// Mean of non-null values
    Mean,
    /// Sample standard deviation of non-null values
    Std,
    /// Minimum non-null value
    Min,
    /// Maximum non-null value
    Max,
}

impl AggOp {
    /// Get the operation name
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            AggOp::Count => "count",
            AggOp::Sum => "sum",
            AggOp::Mean => "mean",
            AggOp::Std => "std",
            AggOp::Min => "min",
            AggOp::Max => "max",
        }
    }
}

/// Aggregation specification - describes one aggregation to perform
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggSpec {
    /// The aggregation operation
    pub op: AggOp,
    /// The source column name (None for count, which needs no column)
    pub column: Option<String>,
    /// The output column name
    pub output_name: String,
}

impl AggSpec {
    /// Create a count aggregation
    #[must_use]
    pub fn count(output_name: &str) -> Self {
        Self {
            op: AggOp::Count,
            column: None,
            output_name: output_name.to_string(),
        }
    }

    /// Create a sum aggregation
    #[must_use]
    pub fn sum(column: &str, output_name: &str) -> Self {
        Self::with_column(AggOp::Sum, column, output_name)
    }

    /// Create a mean aggregation
    #[must_use]
    pub fn mean(column: &str, output_name: &str) -> Self {
        Self::with_column(AggOp::Mean, column, output_name)
    }

    /// Create a std aggregation
    #[must_use]
    pub fn std(column: &str, output_name: &str) -> Self {
        Self::with_column(AggOp::Std, column, output_name)
    }

    /// Create a min aggregation
    #[must_use]
    pub fn min(column: &str, output_name: &str) -> Self {
        Self::with_column(AggOp::Min, column, output_name)
    }

    /// Create a max aggregation
    #[must_use]
    pub fn max(column: &str, output_name: &str) -> Self {
        Self::with_column(AggOp::Max, column, output_name)
    }

    fn with_column(op: AggOp, column: &str, output_name: &str) -> Self {
        Self {
            op,
            column: Some(column.to_string()),
            output_name: output_name.to_string(),
        }
    }
}

/// A value that can be used as a group key
///
/// Float columns are not groupable; grouping keys are null, integer,
/// or string values.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GroupKey {
    Null,
    Int(i64),
    Str(String),
}

impl GroupKey {
    fn from_value(value: &Value) -> FrameResult<Self> {
        match value {
            Value::Null => Ok(GroupKey::Null),
            Value::Int(i) => Ok(GroupKey::Int(*i)),
            Value::Str(s) => Ok(GroupKey::Str(s.clone())),
            Value::Float(_) => Err(FrameError::InvalidOperation(
                "cannot group by a float column".to_string(),
            )),
        }
    }

    /// Convert back to a cell value
    #[must_use]
    pub fn to_value(&self) -> Value {
        match self {
            GroupKey::Null => Value::Null,
            GroupKey::Int(i) => Value::Int(*i),
            GroupKey::Str(s) => Value::Str(s.clone()),
        }
    }
}

/// A grouped DataFrame - the result of calling group_by on a DataFrame
#[derive(Clone)]
pub struct GroupedDataFrame {
    /// The underlying DataFrame
    source: Arc<DataFrame>,
    /// The columns grouped by
    group_columns: Vec<String>,
    /// Group keys with their row indices, in sorted key order
    groups: Vec<(Vec<GroupKey>, Vec<usize>)>,
}

impl GroupedDataFrame {
    /// Create a new grouped DataFrame
    ///
    /// # Errors
    /// Returns error if a group column does not exist or is a float column
    pub fn new(source: Arc<DataFrame>, group_columns: Vec<String>) -> FrameResult<Self> {
        let key_series: Vec<&Series> = group_columns
            .iter()
            .map(|name| source.column(name))
            .collect::<FrameResult<Vec<_>>>()?;

        let mut map: HashMap<Vec<GroupKey>, Vec<usize>> = HashMap::new();
        for row_idx in 0..source.num_rows() {
            let mut key = Vec::with_capacity(key_series.len());
            for series in &key_series {
                key.push(GroupKey::from_value(&series.get(row_idx)?)?);
            }
            map.entry(key).or_default().push(row_idx);
        }

        // Sorted key order keeps aggregation output deterministic
        let mut groups: Vec<(Vec<GroupKey>, Vec<usize>)> = map.into_iter().collect();
        groups.sort_by(|a, b| a.0.cmp(&b.0));

        Ok(Self {
            source,
            group_columns,
            groups,
        })
    }

    /// Get the number of groups
    #[must_use]
    pub fn num_groups(&self) -> usize {
        self.groups.len()
    }

    /// Get the group columns
    #[must_use]
    pub fn group_columns(&self) -> &[String] {
        &self.group_columns
    }

    /// Apply aggregations and return a DataFrame
    ///
    /// Output rows follow sorted group-key order; the key columns come
    /// first, then one column per aggregation spec.
    ///
    /// # Errors
    /// Returns error if an aggregation references a missing or
    /// non-numeric column
    pub fn aggregate(&self, specs: &[AggSpec]) -> FrameResult<DataFrame> {
        let mut result_columns: Vec<Series> = Vec::new();

        for (col_idx, col_name) in self.group_columns.iter().enumerate() {
            let values: Vec<Value> = self
                .groups
                .iter()
                .map(|(key, _)| key[col_idx].to_value())
                .collect();
            result_columns.push(Series::from_values(col_name, &values)?);
        }

        for spec in specs {
            let mut values = Vec::with_capacity(self.groups.len());
            for (_, indices) in &self.groups {
                values.push(self.compute_one(spec, indices)?);
            }
            result_columns.push(Series::from_values(&spec.output_name, &values)?);
        }

        DataFrame::from_series(result_columns)
    }

    fn compute_one(&self, spec: &AggSpec, indices: &[usize]) -> FrameResult<Value> {
        if spec.op == AggOp::Count {
            return Ok(Value::Int(indices.len() as i64));
        }
        let column = spec.column.as_ref().ok_or_else(|| {
            FrameError::InvalidOperation(format!("{} requires a column", spec.op.name()))
        })?;
        let sub = self.source.column(column)?.take(indices)?;
        match spec.op {
            AggOp::Sum => sub.sum(),
            AggOp::Mean => sub.mean(),
            AggOp::Std => sub.std(),
            AggOp::Min => Ok(sub.min()),
            AggOp::Max => Ok(sub.max()),
            AggOp::Count => unreachable!(),
        }
    }

    /// Keep the rows of every group that satisfies the predicate
    ///
    /// The predicate sees each group as its own DataFrame. Surviving rows
    /// keep their original order.
    ///
    /// # Errors
    /// Returns error if the predicate fails
    pub fn filter_groups<F>(&self, predicate: F) -> FrameResult<DataFrame>
    where
        F: Fn(&DataFrame) -> FrameResult<bool>,
    {
        let mut keep: Vec<usize> = Vec::new();
        for (_, indices) in &self.groups {
            let group_frame = self.source.take_rows(indices)?;
            if predicate(&group_frame)? {
                keep.extend_from_slice(indices);
            }
        }
        keep.sort_unstable();
        self.source.take_rows(&keep)
    }
}

/// Build a two-key contingency table
///
/// Rows are the distinct values of `row_col`, columns the distinct values
/// of `col_col`, both in sorted order; null keys are skipped. Cells hold
/// counts, or row-relative fractions when `normalize_rows` is set.
///
/// # Errors
/// Returns error if either column does not exist
pub fn crosstab(
    df: &DataFrame,
    row_col: &str,
    col_col: &str,
    normalize_rows: bool,
) -> FrameResult<DataFrame> {
    let rows = df.column(row_col)?;
    let cols = df.column(col_col)?;

    let mut counts: HashMap<(String, String), usize> = HashMap::new();
    let mut row_keys: Vec<String> = Vec::new();
    let mut col_keys: Vec<String> = Vec::new();
    for i in 0..df.num_rows() {
        let (rv, cv) = (rows.get(i)?, cols.get(i)?);
        if rv.is_null() || cv.is_null() {
            continue;
        }
        let (rk, ck) = (rv.to_string(), cv.to_string());
        if !row_keys.contains(&rk) {
            row_keys.push(rk.clone());
        }
        if !col_keys.contains(&ck) {
            col_keys.push(ck.clone());
        }
        *counts.entry((rk, ck)).or_insert(0) += 1;
    }
    row_keys.sort();
    col_keys.sort();

    let mut result = vec![Series::from_strings(
        row_col,
        row_keys.iter().map(String::as_str).collect(),
    )];
    for ck in &col_keys {
        let mut cells = Vec::with_capacity(row_keys.len());
        for rk in &row_keys {
            let count = counts.get(&(rk.clone(), ck.clone())).copied().unwrap_or(0);
            if normalize_rows {
                let total: usize = col_keys
                    .iter()
                    .map(|c| counts.get(&(rk.clone(), c.clone())).copied().unwrap_or(0))
                    .sum();
                cells.push(Value::Float(if total == 0 {
                    0.0
                } else {
                    count as f64 / total as f64
                }));
            } else {
                cells.push(Value::Int(count as i64));
            }
        }
        result.push(Series::from_values(ck, &cells)?);
    }
    DataFrame::from_series(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_dataframe() -> DataFrame {
        let city = Series::from_strings("city", vec!["A", "B", "A", "B", "A"]);
        let sex = Series::from_strings("sex", vec!["M", "M", "F", "F", "M"]);
        let age = Series::from_ints("age", vec![30, 25, 35, 28, 40]);
        DataFrame::from_series(vec![city, sex, age]).unwrap()
    }

    #[test]
    fn test_group_count_and_mean() {
        let df = sample_dataframe();
        let grouped = df.group_by(&["city"]).unwrap();
        assert_eq!(grouped.num_groups(), 2);

        let agg = grouped
            .aggregate(&[AggSpec::count("n"), AggSpec::mean("age", "avg_age")])
            .unwrap();
        assert_eq!(agg.num_rows(), 2);
        assert_eq!(agg.columns(), vec!["city", "n", "avg_age"]);
        // Sorted group order: A first
        assert_eq!(agg.column("city").unwrap().get(0).unwrap(), Value::Str("A".into()));
        assert_eq!(agg.column("n").unwrap().get(0).unwrap(), Value::Int(3));
        assert_eq!(agg.column("avg_age").unwrap().get(0).unwrap(), Value::Float(35.0));
    }

    #[test]
    fn test_group_by_two_keys() {
        let df = sample_dataframe();
        let agg = df
            .group_by(&["city", "sex"])
            .unwrap()
            .aggregate(&[AggSpec::count("n")])
            .unwrap();
        // (A,F) (A,M) (B,F) (B,M)
        assert_eq!(agg.num_rows(), 4);
        assert_eq!(agg.column("sex").unwrap().get(0).unwrap(), Value::Str("F".into()));
        assert_eq!(agg.column("n").unwrap().get(1).unwrap(), Value::Int(2));
    }

    #[test]
    fn test_group_by_float_rejected() {
        let df = DataFrame::from_series(vec![Series::from_floats("x", vec![1.0])]).unwrap();
        assert!(df.group_by(&["x"]).is_err());
    }

    #[test]
    fn test_min_max_on_strings() {
        let df = sample_dataframe();
        let agg = df
            .group_by(&["city"])
            .unwrap()
            .aggregate(&[AggSpec::min("sex", "first_sex")])
            .unwrap();
        assert_eq!(
            agg.column("first_sex").unwrap().get(0).unwrap(),
            Value::Str("F".into())
        );
    }

    #[test]
    fn test_filter_groups() {
        let df = sample_dataframe();
        // Keep cities whose mean age is at least 30 (A: 35, B: 26.5)
        let kept = df
            .group_by(&["city"])
            .unwrap()
            .filter_groups(|g| {
                let mean = g.column("age")?.mean()?;
                Ok(mean.as_f64().is_some_and(|m| m >= 30.0))
            })
            .unwrap();
        assert_eq!(kept.num_rows(), 3);
        assert!(kept
            .column("city")
            .unwrap()
            .iter()
            .all(|v| v.as_str() == Some("A")));
    }

    #[test]
    fn test_crosstab_counts() {
        let df = sample_dataframe();
        let table = crosstab(&df, "city", "sex", false).unwrap();
        assert_eq!(table.columns(), vec!["city", "F", "M"]);
        assert_eq!(table.column("M").unwrap().get(0).unwrap(), Value::Int(2));
        assert_eq!(table.column("F").unwrap().get(1).unwrap(), Value::Int(1));
    }

    #[test]
    fn test_crosstab_normalized() {
        let df = sample_dataframe();
        let table = crosstab(&df, "city", "sex", true).unwrap();
        let m_share_a = table.column("M").unwrap().get(0).unwrap();
        let Value::Float(share) = m_share_a else {
            panic!("expected float share");
        };
        assert!((share - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_source() {
        let df = DataFrame::from_series(vec![Series::from_ints("k", vec![])]).unwrap();
        let agg = df
            .group_by(&["k"])
            .unwrap()
            .aggregate(&[AggSpec::count("n")])
            .unwrap();
        assert_eq!(agg.num_rows(), 0);
    }
}
