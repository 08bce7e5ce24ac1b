// src/snapshot/utils.rs
//! File and date helpers for snapshot export

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};

use crate::Result;

/// Write `content` to `path`, creating parent directories if needed.
///
/// The text goes to a sibling `.tmp` file first and is renamed into place,
/// so an existing export is never left half-written.
pub fn write_snapshot_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, content)?;
    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(e.into());
    }
    Ok(())
}

/// Date part used in export file names.
pub fn format_date(dt: &DateTime<Utc>) -> String {
    dt.format("%Y-%m-%d").to_string()
}

pub fn format_timestamp(dt: &DateTime<Utc>) -> String {
    dt.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}
