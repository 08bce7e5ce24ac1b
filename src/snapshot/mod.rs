// src/snapshot/mod.rs
//! Snapshot import/export
//!
//! A snapshot is the whole note collection serialized as a JSON array. It is
//! the only way a board outlives the process.

pub mod utils;

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::entity::{Note, MAX_Z_INDEX};
use crate::error::{BoardError, Result};

pub use self::utils::{format_date, format_timestamp, write_snapshot_file};

const EXPORT_PREFIX: &str = "sticky-notes";
const EXPORT_EXTENSION: &str = "json";

/// File name an export taken at `now` is saved under.
pub fn export_filename(now: &DateTime<Utc>) -> String {
    format!("{}-{}.{}", EXPORT_PREFIX, format_date(now), EXPORT_EXTENSION)
}

/// Serialize notes in the order given.
pub fn to_json(notes: &[Note]) -> Result<String> {
    Ok(serde_json::to_string_pretty(notes)?)
}

/// Write `notes` into `dir` under a dated file name and return the path.
pub fn write_export(notes: &[Note], dir: &Path, now: &DateTime<Utc>) -> Result<PathBuf> {
    let json = to_json(notes)?;
    let path = dir.join(export_filename(now));
    write_snapshot_file(&path, &json)?;
    Ok(path)
}

/// Parse snapshot text into notes.
///
/// The top level must be an array and every record must deserialize; ids
/// must be unique and z-indexes within `MAX_Z_INDEX`. Records are
/// normalized (size clamp, timestamp order).
/// Nothing is returned unless the whole payload is valid.
pub fn parse_snapshot(raw: &str) -> Result<Vec<Note>> {
    let value: Value =
        serde_json::from_str(raw).map_err(|e| BoardError::InvalidSnapshot(e.to_string()))?;

    let records = match value {
        Value::Array(records) => records,
        other => return Err(BoardError::SnapshotNotArray(json_kind(&other).to_string())),
    };

    let mut seen = HashSet::new();
    let mut notes = Vec::with_capacity(records.len());

    for (index, record) in records.into_iter().enumerate() {
        let mut note: Note = serde_json::from_value(record)
            .map_err(|e| BoardError::InvalidSnapshot(format!("note #{}: {}", index + 1, e)))?;
        if !(-MAX_Z_INDEX..=MAX_Z_INDEX).contains(&note.z_index) {
            return Err(BoardError::InvalidSnapshot(format!(
                "note #{}: zIndex {} is outside ±{}",
                index + 1,
                note.z_index,
                MAX_Z_INDEX
            )));
        }
        note.normalize();

        if !seen.insert(note.id.clone()) {
            return Err(BoardError::DuplicateNoteId(note.id.to_string()));
        }
        notes.push(note);
    }

    Ok(notes)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
