//! Report module - the load-query-export pipeline
//!
//! This module provides:
//! - Loader: bulk insert-or-skip of rooms and students from JSON arrays
//! - QueryRunner: the four fixed read-only aggregate queries
//! - Exporter: JSON and XML rendering of the ordered result set
//!
//! The pipeline is best-effort: a failed file load rolls back only that
//! file's batch, and a failed query is captured as a tagged outcome
//! instead of aborting the run.

mod error;
mod export;
mod loader;
mod model;
mod queries;

pub use error::{ReportError, ReportResult};
pub use export::{sanitize_tag_name, to_json, to_xml};
pub use loader::{ensure_schema, load_rooms, load_students, LoadSummary};
pub use model::{QueryOutcome, ResultSet, Room, Row, Student};
pub use queries::{QueryRunner, QUERY_NAMES};
