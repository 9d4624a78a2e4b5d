//! Loader: bulk insert-or-skip of rooms and students from JSON arrays

use std::fs;
use std::path::Path;

use rusqlite::{params, Connection};
use serde::de::DeserializeOwned;

use super::error::{ReportError, ReportResult};
use super::model::{Room, Student};

/// Create the rooms and students tables when absent
///
/// A no-op on an already provisioned database.
///
/// # Errors
/// Returns error on database failure
pub fn ensure_schema(conn: &Connection) -> ReportResult<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS rooms (
             id   INTEGER PRIMARY KEY,
             name TEXT NOT NULL
         );
         CREATE TABLE IF NOT EXISTS students (
             id       INTEGER PRIMARY KEY,
             name     TEXT NOT NULL,
             sex      TEXT NOT NULL,
             birthday TEXT NOT NULL,
             room_id  INTEGER NOT NULL
         );",
    )?;
    Ok(())
}

/// Outcome of one file load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadSummary {
    /// Records found in the file
    pub read: usize,
    /// Rows actually inserted (duplicates are skipped, not counted)
    pub inserted: usize,
}

impl LoadSummary {
    /// Whether the input file held no records
    #[must_use]
    pub fn is_empty_input(&self) -> bool {
        self.read == 0
    }
}

/// Load a JSON array of rooms into the rooms table
///
/// The whole file is one unit of work: on any failure nothing from the
/// file is kept. Rows whose id already exists are silently skipped.
///
/// # Errors
/// Returns `FileUnreadable` when the file cannot be read,
/// `MalformedInput` when it is not a JSON array of rooms, and
/// `Database` when the insert fails
pub fn load_rooms(conn: &mut Connection, path: &Path) -> ReportResult<LoadSummary> {
    let rooms: Vec<Room> = read_records(path)?;
    if rooms.is_empty() {
        return Ok(LoadSummary {
            read: 0,
            inserted: 0,
        });
    }

    let tx = conn.transaction()?;
    let mut inserted = 0;
    {
        let mut stmt = tx.prepare("INSERT OR IGNORE INTO rooms (id, name) VALUES (?1, ?2)")?;
        for room in &rooms {
            inserted += stmt.execute(params![room.id, room.name])?;
        }
    }
    tx.commit()?;
    Ok(LoadSummary {
        read: rooms.len(),
        inserted,
    })
}

/// Load a JSON array of students into the students table
///
/// Same unit-of-work and insert-or-skip semantics as `load_rooms`.
/// Room references are stored as given, without checking they resolve.
///
/// # Errors
/// Same taxonomy as `load_rooms`
pub fn load_students(conn: &mut Connection, path: &Path) -> ReportResult<LoadSummary> {
    let students: Vec<Student> = read_records(path)?;
    if students.is_empty() {
        return Ok(LoadSummary {
            read: 0,
            inserted: 0,
        });
    }

    let tx = conn.transaction()?;
    let mut inserted = 0;
    {
        let mut stmt = tx.prepare(
            "INSERT OR IGNORE INTO students (id, name, sex, birthday, room_id)
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )?;
        for student in &students {
            inserted += stmt.execute(params![
                student.id,
                student.name,
                student.sex,
                student.birthday.to_string(),
                student.room_id,
            ])?;
        }
    }
    tx.commit()?;
    Ok(LoadSummary {
        read: students.len(),
        inserted,
    })
}

fn read_records<T: DeserializeOwned>(path: &Path) -> ReportResult<Vec<T>> {
    let text = fs::read_to_string(path).map_err(|source| ReportError::FileUnreadable {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| ReportError::MalformedInput {
        path: path.display().to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn open_db() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        ensure_schema(&conn).unwrap();
        conn
    }

    fn json_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{content}").unwrap();
        file
    }

    #[test]
    fn test_load_rooms_and_idempotency() {
        let mut conn = open_db();
        let file = json_file(r#"[{"id":1,"name":"Room A"},{"id":2,"name":"Room B"}]"#);

        let first = load_rooms(&mut conn, file.path()).unwrap();
        assert_eq!(first, LoadSummary { read: 2, inserted: 2 });

        // Second load inserts nothing new
        let second = load_rooms(&mut conn, file.path()).unwrap();
        assert_eq!(second, LoadSummary { read: 2, inserted: 0 });

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM rooms", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 2);
    }

    #[test]
    fn test_duplicate_ids_keep_first_row() {
        let mut conn = open_db();
        let file = json_file(r#"[{"id":1,"name":"First"},{"id":1,"name":"Second"}]"#);
        let summary = load_rooms(&mut conn, file.path()).unwrap();
        assert_eq!(summary.read, 2);
        assert_eq!(summary.inserted, 1);

        let name: String = conn
            .query_row("SELECT name FROM rooms WHERE id = 1", [], |row| row.get(0))
            .unwrap();
        assert_eq!(name, "First");
    }

    #[test]
    fn test_empty_array_is_noop() {
        let mut conn = open_db();
        let file = json_file("[]");
        let summary = load_rooms(&mut conn, file.path()).unwrap();
        assert!(summary.is_empty_input());
        assert_eq!(summary.inserted, 0);
    }

    #[test]
    fn test_missing_file_is_unreadable() {
        let mut conn = open_db();
        let err = load_rooms(&mut conn, Path::new("/nonexistent/rooms.json")).unwrap_err();
        assert!(matches!(err, ReportError::FileUnreadable { .. }));
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn test_malformed_json_rolls_back() {
        let mut conn = open_db();
        let err = load_rooms(&mut conn, json_file("not json").path()).unwrap_err();
        assert!(matches!(err, ReportError::MalformedInput { .. }));

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM rooms", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn test_malformed_record_leaves_no_partial_batch() {
        let mut conn = open_db();
        // Second record is missing "name"; deserialization of the whole
        // array fails before any insert happens
        let file = json_file(r#"[{"id":1,"name":"Room A"},{"id":2}]"#);
        assert!(load_rooms(&mut conn, file.path()).is_err());

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM rooms", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn test_load_students() {
        let mut conn = open_db();
        let file = json_file(
            r#"[{"id":1,"name":"Alice","sex":"F","birthday":"2000-01-01","room":1}]"#,
        );
        let summary = load_students(&mut conn, file.path()).unwrap();
        assert_eq!(summary.inserted, 1);

        let birthday: String = conn
            .query_row("SELECT birthday FROM students WHERE id = 1", [], |row| {
                row.get(0)
            })
            .unwrap();
        assert_eq!(birthday, "2000-01-01");
    }
}
