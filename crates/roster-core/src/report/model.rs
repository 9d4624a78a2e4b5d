//! Data model for the report pipeline

use chrono::NaiveDate;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// A room record, as found in the rooms JSON array
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Room {
    pub id: i64,
    pub name: String,
}

/// A student record, as found in the students JSON array
///
/// The JSON field `room` holds the room identifier; the loader does not
/// verify that it resolves to an existing room.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Student {
    pub id: i64,
    pub name: String,
    pub sex: String,
    pub birthday: NaiveDate,
    #[serde(rename = "room")]
    pub room_id: i64,
}

/// One result row: an ordered mapping from column name to scalar value
pub type Row = serde_json::Map<String, serde_json::Value>;

/// The tagged outcome of one query
///
/// Callers can tell "no matching rows" (`Rows` with an empty vector)
/// apart from "query failed" (`Failed` with its diagnostic).
#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutcome {
    Rows(Vec<Row>),
    Failed { diagnostic: String },
}

impl QueryOutcome {
    /// The rows, when the query succeeded
    #[must_use]
    pub fn rows(&self) -> Option<&[Row]> {
        match self {
            QueryOutcome::Rows(rows) => Some(rows),
            QueryOutcome::Failed { .. } => None,
        }
    }

    #[must_use]
    pub fn is_failed(&self) -> bool {
        matches!(self, QueryOutcome::Failed { .. })
    }
}

impl Serialize for QueryOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            QueryOutcome::Rows(rows) => rows.serialize(serializer),
            QueryOutcome::Failed { diagnostic } => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("error", diagnostic)?;
                map.end()
            }
        }
    }
}

/// An ordered mapping from query name to its outcome
///
/// Insertion order is preserved; serialization renders a JSON object
/// with one member per query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSet {
    entries: Vec<(String, QueryOutcome)>,
}

impl ResultSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an outcome under a query name, replacing any existing one
    pub fn insert(&mut self, name: impl Into<String>, outcome: QueryOutcome) {
        let name = name.into();
        if let Some(slot) = self.entries.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = outcome;
        } else {
            self.entries.push((name, outcome));
        }
    }

    /// Get an outcome by query name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&QueryOutcome> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, outcome)| outcome)
    }

    /// Iterate entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &QueryOutcome)> {
        self.entries.iter().map(|(n, o)| (n.as_str(), o))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for ResultSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, outcome) in &self.entries {
            map.serialize_entry(name, outcome)?;
        }
        map.end()
    }
}
