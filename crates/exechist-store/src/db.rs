//! Database connection management
//!
//! Provides utilities for opening, migrating and sharing SQLite connections

use crate::errors::{from_rusqlite, io_error, lock_poisoned, Result};
use crate::migrations::apply_migrations;
use rusqlite::Connection;
use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

/// A connection shared by the SQLite-backed stores of one database
pub type SharedConnection = Arc<Mutex<Connection>>;

/// Open a SQLite database at the given path
pub fn open<P: AsRef<Path>>(path: P) -> Result<Connection> {
    Connection::open(path).map_err(from_rusqlite)
}

/// Open an in-memory SQLite database (for testing)
pub fn open_in_memory() -> Result<Connection> {
    Connection::open_in_memory().map_err(from_rusqlite)
}

/// Configure a connection with optimal settings
pub fn configure(conn: &Connection) -> Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")
        .map_err(from_rusqlite)?;

    // WAL lets readers proceed while a history record is written.
    // In-memory databases report "memory" and ignore the request.
    conn.query_row("PRAGMA journal_mode = WAL", [], |row| row.get::<_, String>(0))
        .map_err(from_rusqlite)?;

    Ok(())
}

/// Open, configure and migrate the database at `path`, creating its
/// parent directory when needed.
pub fn open_shared<P: AsRef<Path>>(path: P) -> Result<SharedConnection> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| io_error("create_db_dir", e))?;
    }
    let mut conn = open(path)?;
    configure(&conn)?;
    apply_migrations(&mut conn)?;
    Ok(Arc::new(Mutex::new(conn)))
}

/// Migrated in-memory database wrapped for sharing (for testing)
pub fn open_shared_in_memory() -> Result<SharedConnection> {
    let mut conn = open_in_memory()?;
    configure(&conn)?;
    apply_migrations(&mut conn)?;
    Ok(Arc::new(Mutex::new(conn)))
}

/// Lock a shared connection, mapping poisoning to a `Concurrency` error
pub fn lock(conn: &SharedConnection) -> Result<MutexGuard<'_, Connection>> {
    conn.lock().map_err(|_| lock_poisoned("sqlite_connection"))
}
