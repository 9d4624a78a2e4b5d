//! roster - load room and student rosters, report on them

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use rusqlite::Connection;

use roster_core::report::{
    ensure_schema, load_rooms, load_students, to_json, to_xml, LoadSummary, QueryRunner,
    ReportResult,
};

#[derive(Parser)]
#[command(
    name = "roster",
    version = roster_core::VERSION,
    about = "Load student and room rosters into a local database and report on them"
)]
struct Cli {
    /// JSON file holding an array of student records
    students: PathBuf,

    /// JSON file holding an array of room records
    rooms: PathBuf,

    /// Output format for the query results
    #[arg(value_enum)]
    format: OutputFormat,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Xml,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(err.exit_code())
        }
    }
}

fn run(cli: &Cli) -> ReportResult<()> {
    let db_path = std::env::var("ROSTER_DB").unwrap_or_else(|_| "roster.db".to_string());
    let mut conn = Connection::open(&db_path)?;
    ensure_schema(&conn)?;

    load_file("rooms", &mut conn, &cli.rooms, load_rooms)?;
    load_file("students", &mut conn, &cli.students, load_students)?;

    let results = QueryRunner::new(&conn).run_all();
    let document = match cli.format {
        OutputFormat::Json => to_json(&results)?,
        OutputFormat::Xml => to_xml(&results)?,
    };
    println!("{document}");
    Ok(())
}

/// Load one input file, skipping it on recoverable failures
///
/// A malformed file or a failed batch is reported and skipped so the
/// other file and the queries still run; an unreadable file aborts.
fn load_file(
    label: &str,
    conn: &mut Connection,
    path: &PathBuf,
    loader: fn(&mut Connection, &std::path::Path) -> ReportResult<LoadSummary>,
) -> ReportResult<()> {
    match loader(conn, path) {
        Ok(summary) => {
            if summary.is_empty_input() {
                eprintln!("warning: {label} file '{}' holds no records", path.display());
            } else {
                eprintln!(
                    "loaded {label}: {} read, {} inserted",
                    summary.read, summary.inserted
                );
            }
            Ok(())
        }
        Err(err) if !err.aborts_pipeline() => {
            eprintln!("warning: skipping {label} file: {err}");
            Ok(())
        }
        Err(err) => Err(err),
    }
}
