// src/board/command.rs
use crate::entity::{NoteChanges, NoteId};

/// Intent reported by a note view (or the toolbar) for the board to apply.
///
/// Views never mutate notes; they return these and the board interprets them.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Create,
    Update { id: NoteId, changes: NoteChanges },
    Delete(NoteId),
    Duplicate(NoteId),
    BringToFront(NoteId),
    Select(Option<NoteId>),
}

impl Command {
    pub fn move_to(id: NoteId, x: f64, y: f64) -> Self {
        Command::Update {
            id,
            changes: NoteChanges::position(x, y),
        }
    }

    pub fn resize(id: NoteId, width: f64, height: f64) -> Self {
        Command::Update {
            id,
            changes: NoteChanges::size(width, height),
        }
    }

    pub fn edit(id: NoteId, content: impl Into<String>) -> Self {
        Command::Update {
            id,
            changes: NoteChanges::content(content),
        }
    }
}
