//! CSV input for DataFrames
//!
//! Reads delimited text from files, readers, or URLs into typed columns.
//! Column types are inferred per column: integer, then float, then string.

use std::fs::File;
use std::io::{BufReader, Cursor, Read};
use std::path::Path;

use super::dataframe::DataFrame;
use super::error::{FrameError, FrameResult};
use super::series::Series;

/// Options controlling CSV parsing
#[derive(Debug, Clone)]
pub struct CsvOptions {
    /// Whether the first row is a header
    pub has_header: bool,
    /// Column names to use; required when `has_header` is false unless
    /// generated names are acceptable
    pub column_names: Option<Vec<String>>,
    /// Markers treated as nulls (the empty string always is)
    pub na_values: Vec<String>,
    /// Trim whitespace around fields
    pub trim: bool,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            has_header: true,
            column_names: None,
            na_values: Vec::new(),
            trim: false,
        }
    }
}

/// Read a CSV file into a DataFrame
///
/// # Errors
/// Returns error if the file cannot be read or is not valid CSV
pub fn read_csv<P: AsRef<Path>>(path: P, options: &CsvOptions) -> FrameResult<DataFrame> {
    let file = File::open(path.as_ref()).map_err(|e| {
        FrameError::Io(std::io::Error::new(
            e.kind(),
            format!("failed to open '{}': {}", path.as_ref().display(), e),
        ))
    })?;
    read_csv_from(BufReader::new(file), options)
}

/// Fetch a CSV document over HTTP and read it into a DataFrame
///
/// # Errors
/// Returns error on network failure, non-success status, or invalid CSV
pub fn read_csv_url(url: &str, options: &CsvOptions) -> FrameResult<DataFrame> {
    let body = reqwest::blocking::get(url)?.error_for_status()?.text()?;
    read_csv_from(Cursor::new(body), options)
}

/// Read CSV from any reader into a DataFrame
///
/// # Errors
/// Returns error on malformed CSV or a column-name count mismatch
pub fn read_csv_from<R: Read>(reader: R, options: &CsvOptions) -> FrameResult<DataFrame> {
    let trim = if options.trim {
        csv::Trim::All
    } else {
        csv::Trim::None
    };
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(options.has_header)
        .trim(trim)
        .from_reader(reader);

    let header: Option<Vec<String>> = if options.has_header {
        Some(
            csv_reader
                .headers()?
                .iter()
                .map(ToString::to_string)
                .collect(),
        )
    } else {
        None
    };

    let records: Vec<csv::StringRecord> =
        csv_reader.records().collect::<Result<Vec<_>, _>>()?;

    let width = header
        .as_ref()
        .map(Vec::len)
        .or_else(|| records.first().map(csv::StringRecord::len))
        .unwrap_or(0);

    let names: Vec<String> = match (&options.column_names, header) {
        (Some(names), _) => names.clone(),
        (None, Some(header)) => header,
        (None, None) => (0..width).map(|i| format!("column_{i}")).collect(),
    };
    if names.len() != width && !records.is_empty() {
        return Err(FrameError::InvalidOperation(format!(
            "{} column names supplied for {} columns",
            names.len(),
            width
        )));
    }

    let mut columns = Vec::with_capacity(width);
    for (j, name) in names.iter().enumerate() {
        let cells: Vec<Option<&str>> = records
            .iter()
            .map(|record| {
                let cell = record.get(j).unwrap_or("");
                if cell.is_empty() || options.na_values.iter().any(|na| na == cell) {
                    None
                } else {
                    Some(cell)
                }
            })
            .collect();
        columns.push(infer_column(name, &cells));
    }
    DataFrame::from_series(columns)
}

/// Infer the narrowest column type that fits every non-null cell
fn infer_column(name: &str, cells: &[Option<&str>]) -> Series {
    if cells
        .iter()
        .flatten()
        .all(|cell| cell.parse::<i64>().is_ok())
    {
        let data = cells
            .iter()
            .map(|cell| cell.and_then(|c| c.parse::<i64>().ok()))
            .collect();
        return Series::from_optional_ints(name.to_string(), data);
    }
    if cells
        .iter()
        .flatten()
        .all(|cell| cell.parse::<f64>().is_ok())
    {
        let data = cells
            .iter()
            .map(|cell| cell.and_then(|c| c.parse::<f64>().ok()))
            .collect();
        return Series::from_optional_floats(name.to_string(), data);
    }
    let data = cells
        .iter()
        .map(|cell| cell.map(ToString::to_string))
        .collect();
    Series::from_optional_strings(name.to_string(), data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::Value;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_read_with_header() {
        let data = "name,age,score\nAlice,30,85.5\nBob,25,92.0\n";
        let df = read_csv_from(Cursor::new(data), &CsvOptions::default()).unwrap();
        assert_eq!(df.columns(), vec!["name", "age", "score"]);
        assert_eq!(df.column("age").unwrap().dtype(), "int");
        assert_eq!(df.column("score").unwrap().dtype(), "float");
        assert_eq!(df.column("name").unwrap().dtype(), "string");
        assert_eq!(df.num_rows(), 2);
    }

    #[test]
    fn test_headerless_with_names_and_na() {
        let data = "39, State-gov, 2174\n50, ?, 0\n";
        let options = CsvOptions {
            has_header: false,
            column_names: Some(vec![
                "age".to_string(),
                "workclass".to_string(),
                "capital-gain".to_string(),
            ]),
            na_values: vec!["?".to_string()],
            trim: true,
        };
        let df = read_csv_from(Cursor::new(data), &options).unwrap();
        assert_eq!(df.num_rows(), 2);
        assert_eq!(df.column("age").unwrap().get(1).unwrap(), Value::Int(50));
        assert_eq!(df.column("workclass").unwrap().get(1).unwrap(), Value::Null);
        assert_eq!(
            df.column("workclass").unwrap().get(0).unwrap(),
            Value::Str("State-gov".to_string())
        );
    }

    #[test]
    fn test_generated_column_names() {
        let data = "1,2\n3,4\n";
        let options = CsvOptions {
            has_header: false,
            ..CsvOptions::default()
        };
        let df = read_csv_from(Cursor::new(data), &options).unwrap();
        assert_eq!(df.columns(), vec!["column_0", "column_1"]);
    }

    #[test]
    fn test_name_count_mismatch() {
        let data = "1,2,3\n";
        let options = CsvOptions {
            has_header: false,
            column_names: Some(vec!["a".to_string()]),
            ..CsvOptions::default()
        };
        assert!(read_csv_from(Cursor::new(data), &options).is_err());
    }

    #[test]
    fn test_read_csv_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "x,y\n1,a\n2,b\n").unwrap();
        let df = read_csv(file.path(), &CsvOptions::default()).unwrap();
        assert_eq!(df.num_rows(), 2);
        assert_eq!(df.column("y").unwrap().get(1).unwrap(), Value::Str("b".into()));
    }

    #[test]
    fn test_missing_file() {
        let err = read_csv("/nonexistent/file.csv", &CsvOptions::default());
        assert!(err.is_err());
    }
}
