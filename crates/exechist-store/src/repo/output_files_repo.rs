//! SQLite output registry

use crate::db::{self, SharedConnection};
use crate::errors::{from_rusqlite, Result};
use exechist_core::model::FileCollectionFingerprint;
use exechist_core::outputs::{output_marks, OutputFilesRepository, OutputMark};
use rusqlite::{Connection, OptionalExtension};
use std::path::{Path, PathBuf};

/// Output registry persisted in the `output_files` table
pub struct SqliteOutputFilesRepository {
    conn: SharedConnection,
}

impl SqliteOutputFilesRepository {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }

    /// Every recorded location with its mark, sorted by path
    pub fn list(&self) -> Result<Vec<(PathBuf, OutputMark)>> {
        let conn = db::lock(&self.conn)?;
        let mut stmt = conn
            .prepare("SELECT path, kind FROM output_files ORDER BY path")
            .map_err(from_rusqlite)?;
        let rows = stmt
            .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)))
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_rusqlite)?;

        Ok(rows
            .into_iter()
            .filter_map(|(path, kind)| OutputMark::parse(&kind).map(|mark| (PathBuf::from(path), mark)))
            .collect())
    }
}

fn mark_of(conn: &Connection, path: &Path) -> Result<Option<OutputMark>> {
    let kind: Option<String> = conn
        .query_row(
            "SELECT kind FROM output_files WHERE path = ?1",
            [path.to_string_lossy().into_owned()],
            |row| row.get(0),
        )
        .optional()
        .map_err(from_rusqlite)?;
    Ok(kind.as_deref().and_then(OutputMark::parse))
}

impl OutputFilesRepository for SqliteOutputFilesRepository {
    fn record_outputs(&self, outputs: &[&FileCollectionFingerprint]) -> Result<()> {
        let marks = output_marks(outputs);
        if marks.is_empty() {
            return Ok(());
        }

        let mut conn = db::lock(&self.conn)?;
        let tx = conn.transaction().map_err(from_rusqlite)?;
        let now = chrono::Utc::now().timestamp_millis();
        for (path, mark) in &marks {
            // An existing 'output' row is left as is; 'parent' may be upgraded.
            tx.execute(
                "INSERT INTO output_files (path, kind, recorded_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT(path) DO UPDATE SET kind = excluded.kind
                 WHERE excluded.kind = 'output' AND output_files.kind <> 'output'",
                rusqlite::params![path.to_string_lossy().into_owned(), mark.as_str(), now],
            )
            .map_err(from_rusqlite)?;
        }
        tx.commit().map_err(from_rusqlite)?;

        tracing::debug!(locations = marks.len(), "Recorded output locations");
        Ok(())
    }

    fn is_generated_by_tool(&self, path: &Path) -> Result<bool> {
        let conn = db::lock(&self.conn)?;
        for candidate in path.ancestors().filter(|p| !p.as_os_str().is_empty()) {
            if mark_of(&conn, candidate)? == Some(OutputMark::Output) {
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn contains_files_generated_by_tool(&self, path: &Path) -> Result<bool> {
        let conn = db::lock(&self.conn)?;
        Ok(mark_of(&conn, path)?.is_some())
    }
}
