//! The four fixed aggregate queries over rooms and students

use chrono::{Local, NaiveDate};
use rusqlite::types::ValueRef;
use rusqlite::Connection;

use super::error::ReportResult;
use super::model::{QueryOutcome, ResultSet, Row};

/// The query names, in report order
pub const QUERY_NAMES: [&str; 4] = [
    "occupancy",
    "smallest_average_age",
    "largest_age_spread",
    "mixed_sex",
];

/// Runs the fixed read-only queries against a loaded database
///
/// Ages are computed in years relative to `as_of`, which defaults to
/// today's local date.
pub struct QueryRunner<'conn> {
    conn: &'conn Connection,
    as_of: NaiveDate,
}

impl<'conn> QueryRunner<'conn> {
    #[must_use]
    pub fn new(conn: &'conn Connection) -> Self {
        Self {
            conn,
            as_of: Local::now().date_naive(),
        }
    }

    /// Pin the reference date for age arithmetic
    #[must_use]
    pub fn with_as_of(mut self, as_of: NaiveDate) -> Self {
        self.as_of = as_of;
        self
    }

    /// Every room with how many students live in it
    ///
    /// Rooms with no students are included with a count of zero.
    ///
    /// # Errors
    /// Returns error on database failure
    pub fn occupancy(&self) -> ReportResult<Vec<Row>> {
        self.select_rows(
            "SELECT r.id AS id, r.name AS name, COUNT(s.id) AS student_count
             FROM rooms r
             LEFT JOIN students s ON s.room_id = r.id
             GROUP BY r.id, r.name
             ORDER BY r.name",
            &[],
        )
    }

    /// The five rooms with the smallest average student age
    ///
    /// Rooms with no students are excluded.
    ///
    /// # Errors
    /// Returns error on database failure
    pub fn smallest_average_age(&self) -> ReportResult<Vec<Row>> {
        self.select_rows(
            "SELECT r.id AS id, r.name AS name,
                    AVG((julianday(?1) - julianday(s.birthday)) / 365.25) AS avg_age
             FROM rooms r
             JOIN students s ON s.room_id = r.id
             GROUP BY r.id, r.name
             HAVING COUNT(s.id) > 0
             ORDER BY avg_age
             LIMIT 5",
            &[&self.as_of.to_string()],
        )
    }

    /// The five rooms with the widest gap between oldest and youngest
    ///
    /// A spread needs at least two students, so smaller rooms are
    /// excluded.
    ///
    /// # Errors
    /// Returns error on database failure
    pub fn largest_age_spread(&self) -> ReportResult<Vec<Row>> {
        self.select_rows(
            "SELECT r.id AS id, r.name AS name,
                    (MAX(julianday(?1) - julianday(s.birthday))
                     - MIN(julianday(?1) - julianday(s.birthday))) / 365.25 AS age_spread
             FROM rooms r
             JOIN students s ON s.room_id = r.id
             GROUP BY r.id, r.name
             HAVING COUNT(s.id) > 1
             ORDER BY age_spread DESC
             LIMIT 5",
            &[&self.as_of.to_string()],
        )
    }

    /// Rooms housing students of more than one sex
    ///
    /// # Errors
    /// Returns error on database failure
    pub fn mixed_sex(&self) -> ReportResult<Vec<Row>> {
        self.select_rows(
            "SELECT r.id AS id, r.name AS name
             FROM rooms r
             JOIN students s ON s.room_id = r.id
             GROUP BY r.id, r.name
             HAVING COUNT(DISTINCT s.sex) > 1
             ORDER BY r.name",
            &[],
        )
    }

    /// Run every query, capturing each failure as a tagged outcome
    ///
    /// A failed query never prevents the ones after it from running.
    #[must_use]
    pub fn run_all(&self) -> ResultSet {
        let mut results = ResultSet::new();
        let runs: [(&str, ReportResult<Vec<Row>>); 4] = [
            (QUERY_NAMES[0], self.occupancy()),
            (QUERY_NAMES[1], self.smallest_average_age()),
            (QUERY_NAMES[2], self.largest_age_spread()),
            (QUERY_NAMES[3], self.mixed_sex()),
        ];
        for (name, outcome) in runs {
            results.insert(
                name,
                match outcome {
                    Ok(rows) => QueryOutcome::Rows(rows),
                    Err(err) => QueryOutcome::Failed {
                        diagnostic: err.to_string(),
                    },
                },
            );
        }
        results
    }

    fn select_rows(&self, sql: &str, params: &[&dyn rusqlite::ToSql]) -> ReportResult<Vec<Row>> {
        let mut stmt = self.conn.prepare(sql)?;
        let column_names: Vec<String> =
            stmt.column_names().iter().map(ToString::to_string).collect();

        let mut rows = Vec::new();
        let mut cursor = stmt.query(params)?;
        while let Some(row) = cursor.next()? {
            let mut record = Row::new();
            for (idx, name) in column_names.iter().enumerate() {
                record.insert(name.clone(), json_value(row.get_ref(idx)?));
            }
            rows.push(record);
        }
        Ok(rows)
    }
}

fn json_value(value: ValueRef<'_>) -> serde_json::Value {
    match value {
        ValueRef::Null => serde_json::Value::Null,
        ValueRef::Integer(n) => serde_json::Value::from(n),
        ValueRef::Real(f) => serde_json::Number::from_f64(f)
            .map_or(serde_json::Value::Null, serde_json::Value::Number),
        ValueRef::Text(bytes) | ValueRef::Blob(bytes) => {
            serde_json::Value::from(String::from_utf8_lossy(bytes).into_owned())
        }
    }
}
