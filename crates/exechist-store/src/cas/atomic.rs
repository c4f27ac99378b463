//! Atomic blob writes
//!
//! A blob is written to a sibling temp file and renamed into place, so a
//! reader never observes a partially written record.

use crate::errors::{io_error, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::atomic::{AtomicU64, Ordering};

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Temp path unique to this process and write, next to `target_path`
fn temp_path_for(target_path: &Path) -> PathBuf {
    let sequence = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    let mut name = target_path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(format!(".{}.{}.tmp", process::id(), sequence));
    target_path.with_file_name(name)
}

/// Atomically write bytes to `target_path`, creating parent directories.
pub fn atomic_write(target_path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = target_path.parent() {
        fs::create_dir_all(parent).map_err(|e| io_error("create_cas_dir", e))?;
    }

    let temp_path = temp_path_for(target_path);
    if let Err(e) = fs::write(&temp_path, content) {
        fs::remove_file(&temp_path).ok();
        return Err(io_error("write_cas_temp", e));
    }

    if let Err(e) = fs::rename(&temp_path, target_path) {
        fs::remove_file(&temp_path).ok();
        return Err(io_error("rename_cas_temp", e));
    }

    Ok(())
}
