mod note;
mod style;

pub use note::{clamp_size, Note, NoteChanges};
pub use style::{FontFamily, FontSize, NoteColor};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const MIN_NOTE_WIDTH: f64 = 150.0;
pub const MIN_NOTE_HEIGHT: f64 = 100.0;
pub const DEFAULT_NOTE_WIDTH: f64 = 200.0;
pub const DEFAULT_NOTE_HEIGHT: f64 = 200.0;

/// Z-index the board counter starts from (and returns to after a clear).
pub const INITIAL_Z_INDEX: i64 = 1;

/// Largest z-index magnitude a snapshot may carry. The gap up to `i64::MAX`
/// is headroom for the counter to keep growing after an import.
pub const MAX_Z_INDEX: i64 = i64::MAX / 2;

/// Opaque note identity.
///
/// Freshly created notes get a UUID v4; imported notes keep whatever id the
/// snapshot carried.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(String);

impl NoteId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First 7 characters, for display.
    pub fn short(&self) -> &str {
        match self.0.char_indices().nth(7) {
            Some((idx, _)) => &self.0[..idx],
            None => &self.0,
        }
    }
}

impl From<String> for NoteId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for NoteId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl std::fmt::Display for NoteId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
