// src/view/listeners.rs
use std::fmt;

use tracing::{debug, warn};

use crate::entity::NoteId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureKind {
    Drag,
    Resize,
}

impl fmt::Display for GestureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GestureKind::Drag => write!(f, "drag"),
            GestureKind::Resize => write!(f, "resize"),
        }
    }
}

/// Window-level pointer move/up listeners, one slot per gesture kind.
///
/// A slot is held by at most one note. Attaching replaces (and reports) the
/// previous holder; detaching only releases a slot the caller holds.
#[derive(Debug, Default)]
pub struct PointerListeners {
    drag: Option<NoteId>,
    resize: Option<NoteId>,
}

impl PointerListeners {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&mut self, kind: GestureKind) -> &mut Option<NoteId> {
        match kind {
            GestureKind::Drag => &mut self.drag,
            GestureKind::Resize => &mut self.resize,
        }
    }

    /// Attach listeners for `id`. Returns the note whose listeners were
    /// displaced, if another note still held the slot.
    pub fn attach(&mut self, kind: GestureKind, id: &NoteId) -> Option<NoteId> {
        let previous = self.slot(kind).replace(id.clone());
        match &previous {
            Some(prev) if prev != id => {
                warn!(%kind, displaced = %prev, id = %id, "stale gesture listener replaced");
            }
            _ => debug!(%kind, id = %id, "gesture listeners attached"),
        }
        previous.filter(|prev| prev != id)
    }

    /// Detach listeners held by `id`. Returns whether anything was released.
    pub fn detach(&mut self, kind: GestureKind, id: &NoteId) -> bool {
        let slot = self.slot(kind);
        if slot.as_ref() == Some(id) {
            *slot = None;
            debug!(%kind, id = %id, "gesture listeners detached");
            true
        } else {
            false
        }
    }

    pub fn holder(&self, kind: GestureKind) -> Option<&NoteId> {
        match kind {
            GestureKind::Drag => self.drag.as_ref(),
            GestureKind::Resize => self.resize.as_ref(),
        }
    }

    pub fn is_idle(&self) -> bool {
        self.drag.is_none() && self.resize.is_none()
    }

    /// Notes currently holding a listener slot.
    pub fn holders(&self) -> Vec<NoteId> {
        self.drag.iter().chain(self.resize.iter()).cloned().collect()
    }
}
