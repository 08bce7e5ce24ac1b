//! Advisory checks on a loaded board.
//!
//! None of these stop an import. They point at boards that will be slow to
//! search, notes the user cannot see, or stacks whose paint order is
//! ambiguous.

use std::collections::HashSet;
use std::fmt;

use crate::config::BoardConfig;
use crate::entity::Note;

/// Boards above this many notes get sluggish to search and render.
pub const CROWDED_BOARD_THRESHOLD: usize = 500;

/// Snapshot files above this size are unusual for hand-made boards.
pub const SNAPSHOT_SIZE_WARNING_BYTES: u64 = 5 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq)]
pub enum Warning {
    CrowdedBoard { count: usize },
    LargeSnapshot { bytes: u64 },
    /// Notes whose box lies entirely outside the configured canvas.
    OffCanvas { ids: Vec<String> },
    /// Notes sharing a z-index with another note.
    TiedZIndex { count: usize },
}

fn off_canvas(note: &Note, config: &BoardConfig) -> bool {
    note.x + note.width <= 0.0
        || note.y + note.height <= 0.0
        || note.x >= config.canvas_width
        || note.y >= config.canvas_height
}

/// Inspect `notes` (just parsed from `snapshot_size` bytes of text).
pub fn check_snapshot(notes: &[Note], snapshot_size: u64, config: &BoardConfig) -> Vec<Warning> {
    let mut warnings = Vec::new();

    if notes.len() > CROWDED_BOARD_THRESHOLD {
        warnings.push(Warning::CrowdedBoard { count: notes.len() });
    }
    if snapshot_size > SNAPSHOT_SIZE_WARNING_BYTES {
        warnings.push(Warning::LargeSnapshot { bytes: snapshot_size });
    }

    let ids: Vec<String> = notes
        .iter()
        .filter(|n| off_canvas(n, config))
        .map(|n| n.id.short().to_string())
        .collect();
    if !ids.is_empty() {
        warnings.push(Warning::OffCanvas { ids });
    }

    let mut seen = HashSet::new();
    let mut tied = HashSet::new();
    for note in notes {
        if !seen.insert(note.z_index) {
            tied.insert(note.z_index);
        }
    }
    let count = notes.iter().filter(|n| tied.contains(&n.z_index)).count();
    if count > 0 {
        warnings.push(Warning::TiedZIndex { count });
    }

    warnings
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::CrowdedBoard { count } => write!(
                f,
                "Warning: {} notes exceeds recommended {} - search and rendering may slow down",
                count, CROWDED_BOARD_THRESHOLD
            ),
            Warning::LargeSnapshot { bytes } => write!(
                f,
                "Warning: snapshot size ({:.1}MB) exceeds recommended {}MB",
                *bytes as f64 / (1024.0 * 1024.0),
                SNAPSHOT_SIZE_WARNING_BYTES / (1024 * 1024)
            ),
            Warning::OffCanvas { ids } => write!(
                f,
                "Warning: {} note(s) outside the canvas: {}",
                ids.len(),
                ids.join(", ")
            ),
            Warning::TiedZIndex { count } => write!(
                f,
                "Warning: {} notes share a z-index; their stacking order is arbitrary",
                count
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{NoteColor, NoteId};

    fn note(id: &str, x: f64, y: f64, z_index: i64) -> Note {
        let mut note = Note::new(x, y, NoteColor::Yellow, z_index);
        note.id = NoteId::from(id);
        note
    }

    #[test]
    fn test_tidy_board_has_no_warnings() {
        let notes = vec![note("a", 10.0, 10.0, 2), note("b", 400.0, 300.0, 3)];
        assert!(check_snapshot(&notes, 2048, &BoardConfig::default()).is_empty());
    }

    #[test]
    fn test_crowded_board() {
        let notes: Vec<Note> = (0..=CROWDED_BOARD_THRESHOLD as i64)
            .map(|i| note(&format!("n{}", i), 100.0, 100.0, i))
            .collect();
        let warnings = check_snapshot(&notes, 0, &BoardConfig::default());
        assert_eq!(warnings, vec![Warning::CrowdedBoard { count: 501 }]);
        assert!(warnings[0].to_string().contains("501 notes exceeds recommended 500"));
    }

    #[test]
    fn test_large_snapshot() {
        let warnings = check_snapshot(&[], 8 * 1024 * 1024, &BoardConfig::default());
        assert_eq!(warnings.len(), 1);
        assert_eq!(
            warnings[0].to_string(),
            "Warning: snapshot size (8.0MB) exceeds recommended 5MB"
        );
    }

    #[test]
    fn test_off_canvas_notes_are_named() {
        let notes = vec![
            note("inside", 1000.0, 700.0, 1),
            note("left", -250.0, 10.0, 2),
            note("below", 10.0, 800.0, 3),
        ];
        let warnings = check_snapshot(&notes, 0, &BoardConfig::default());
        assert_eq!(
            warnings,
            vec![Warning::OffCanvas {
                ids: vec!["left".to_string(), "below".to_string()]
            }]
        );
    }

    #[test]
    fn test_partly_visible_note_is_on_canvas() {
        // box spans x = -150..50
        let notes = vec![note("edge", -150.0, 10.0, 1)];
        assert!(check_snapshot(&notes, 0, &BoardConfig::default()).is_empty());
    }

    #[test]
    fn test_tied_z_indexes_counted() {
        let notes = vec![
            note("a", 0.0, 0.0, 4),
            note("b", 0.0, 0.0, 4),
            note("c", 0.0, 0.0, 5),
            note("d", 0.0, 0.0, 4),
        ];
        let warnings = check_snapshot(&notes, 0, &BoardConfig::default());
        assert_eq!(warnings, vec![Warning::TiedZIndex { count: 3 }]);
    }
}
