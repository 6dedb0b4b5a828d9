//! Report persistence.
//!
//! Generated reports are stored in SQLite; structured sub-records (patient
//! info, presence flags, field bag) are kept as JSON columns since nothing
//! queries inside them.

use std::path::Path;

use rusqlite::{params, Connection, OptionalExtension};
use thiserror::Error;

use crate::models::StoredReport;

/// Database errors.
#[derive(Error, Debug)]
pub enum DbError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type DbResult<T> = Result<T, DbError>;

/// Report store schema.
const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS reports (
    report_id TEXT PRIMARY KEY,
    created_at TEXT NOT NULL,
    source_files TEXT NOT NULL DEFAULT '[]',      -- JSON array of filenames
    patient TEXT NOT NULL,                        -- JSON PatientInfo
    tests TEXT NOT NULL,                          -- JSON TestsDetected
    fields TEXT NOT NULL,                         -- JSON CanonicalFieldBag
    report_html TEXT,
    pdf_uri TEXT
);

CREATE INDEX IF NOT EXISTS idx_reports_created_at ON reports(created_at);
"#;

/// SQLite-backed report store.
pub struct ReportStore {
    conn: Connection,
}

impl ReportStore {
    /// Open a store at `path`, creating the schema if needed.
    pub fn open<P: AsRef<Path>>(path: P) -> DbResult<Self> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.initialize()?;
        Ok(store)
    }

    /// In-memory store (for testing).
    pub fn open_in_memory() -> DbResult<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.initialize()?;
        Ok(store)
    }

    fn initialize(&self) -> DbResult<()> {
        self.conn.execute_batch(SCHEMA)?;
        Ok(())
    }

    /// Persist one report record.
    pub fn insert_report(&self, report: &StoredReport) -> DbResult<()> {
        self.conn.execute(
            r#"
            INSERT INTO reports (
                report_id, created_at, source_files, patient,
                tests, fields, report_html, pdf_uri
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
            params![
                report.report_id,
                report.created_at,
                serde_json::to_string(&report.source_files)?,
                serde_json::to_string(&report.patient)?,
                serde_json::to_string(&report.tests)?,
                serde_json::to_string(&report.fields)?,
                report.report_html,
                report.pdf_uri,
            ],
        )?;
        Ok(())
    }

    /// Fetch a report by id.
    pub fn get_report(&self, report_id: &str) -> DbResult<Option<StoredReport>> {
        self.conn
            .query_row(
                r#"
                SELECT report_id, created_at, source_files, patient,
                       tests, fields, report_html, pdf_uri
                FROM reports
                WHERE report_id = ?
                "#,
                [report_id],
                Self::map_row,
            )
            .optional()?
            .map(Self::row_to_report)
            .transpose()
    }

    /// List all reports, newest first.
    pub fn list_reports(&self) -> DbResult<Vec<StoredReport>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT report_id, created_at, source_files, patient,
                   tests, fields, report_html, pdf_uri
            FROM reports
            ORDER BY created_at DESC
            "#,
        )?;

        let rows = stmt.query_map([], Self::map_row)?;

        let mut reports = Vec::new();
        for row in rows {
            reports.push(Self::row_to_report(row?)?);
        }
        Ok(reports)
    }

    fn map_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<ReportRow> {
        Ok(ReportRow {
            report_id: row.get(0)?,
            created_at: row.get(1)?,
            source_files: row.get(2)?,
            patient: row.get(3)?,
            tests: row.get(4)?,
            fields: row.get(5)?,
            report_html: row.get(6)?,
            pdf_uri: row.get(7)?,
        })
    }

    fn row_to_report(row: ReportRow) -> DbResult<StoredReport> {
        Ok(StoredReport {
            report_id: row.report_id,
            created_at: row.created_at,
            source_files: serde_json::from_str(&row.source_files)?,
            patient: serde_json::from_str(&row.patient)?,
            tests: serde_json::from_str(&row.tests)?,
            fields: serde_json::from_str(&row.fields)?,
            report_html: row.report_html,
            pdf_uri: row.pdf_uri,
        })
    }
}

struct ReportRow {
    report_id: String,
    created_at: String,
    source_files: String,
    patient: String,
    tests: String,
    fields: String,
    report_html: Option<String>,
    pdf_uri: Option<String>,
}
