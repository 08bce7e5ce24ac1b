//! The board controller: single owner of the note collection.
//!
//! Every mutation goes through [`Board`]. Views hold read-only snapshots of
//! their note and report intent as [`Command`] values.

mod command;
pub mod placement;

pub use command::Command;
pub use placement::{Scatter, SpawnRegion};

use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::config::BoardConfig;
use crate::entity::{Note, NoteChanges, NoteId, INITIAL_Z_INDEX};
use crate::error::{BoardError, Result};
use crate::search::{filter_notes, SearchFilter};
use crate::snapshot;

pub struct Board {
    notes: Vec<Note>,
    selected: Option<NoteId>,
    max_z_index: i64,
    search_term: String,
    config: BoardConfig,
    scatter: Scatter,
}

impl Default for Board {
    fn default() -> Self {
        Self::new(BoardConfig::default(), None)
    }
}

impl Board {
    /// Create an empty board. `seed` makes placement and color draws
    /// reproducible.
    pub fn new(config: BoardConfig, seed: Option<u64>) -> Self {
        let scatter = Scatter::new(SpawnRegion::from_config(&config), seed);
        Self {
            notes: Vec::new(),
            selected: None,
            max_z_index: INITIAL_Z_INDEX,
            search_term: String::new(),
            config,
            scatter,
        }
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    /// All notes in canonical (insertion) order.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn get(&self, id: &NoteId) -> Option<&Note> {
        self.notes.iter().find(|n| &n.id == id)
    }

    pub fn contains(&self, id: &NoteId) -> bool {
        self.get(id).is_some()
    }

    pub fn selected(&self) -> Option<&NoteId> {
        self.selected.as_ref()
    }

    pub fn is_selected(&self, id: &NoteId) -> bool {
        self.selected.as_ref() == Some(id)
    }

    pub fn max_z_index(&self) -> i64 {
        self.max_z_index
    }

    /// Resolve a full id or unique id prefix to a note id.
    pub fn find_by_prefix(&self, prefix: &str) -> Result<NoteId> {
        if let Some(note) = self.notes.iter().find(|n| n.id.as_str() == prefix) {
            return Ok(note.id.clone());
        }

        let mut matches = self
            .notes
            .iter()
            .filter(|n| !prefix.is_empty() && n.id.as_str().starts_with(prefix));
        match (matches.next(), matches.next()) {
            (Some(note), None) => Ok(note.id.clone()),
            (Some(_), Some(_)) => Err(BoardError::InvalidArgument(format!(
                "note id prefix '{}' is ambiguous",
                prefix
            ))),
            (None, _) => Err(BoardError::NoteNotFound(prefix.to_string())),
        }
    }

    fn next_z_index(&mut self) -> i64 {
        if let Some(next) = self.max_z_index.checked_add(1) {
            self.max_z_index = next;
            return next;
        }
        self.compact_z_order();
        self.max_z_index += 1;
        self.max_z_index
    }

    /// Renumber the stack to `INITIAL_Z_INDEX + 1..` keeping relative order.
    /// Only reachable once the counter is exhausted.
    fn compact_z_order(&mut self) {
        let mut order: Vec<usize> = (0..self.notes.len()).collect();
        order.sort_by_key(|&i| self.notes[i].z_index);
        let mut z_index = INITIAL_Z_INDEX;
        for i in order {
            z_index += 1;
            self.notes[i].z_index = z_index;
        }
        self.max_z_index = z_index;
        warn!(notes = self.notes.len(), max_z_index = z_index, "z-index counter compacted");
    }

    fn fresh_id(&self) -> NoteId {
        let mut id = NoteId::generate();
        while self.contains(&id) {
            id = NoteId::generate();
        }
        id
    }

    fn get_mut(&mut self, id: &NoteId) -> Option<&mut Note> {
        self.notes.iter_mut().find(|n| &n.id == id)
    }

    // ========== Operations ==========

    /// Place a new empty note at a random spot and select it.
    pub fn create_note(&mut self) -> NoteId {
        let (x, y) = self.scatter.position();
        let color = self.scatter.color();
        let z_index = self.next_z_index();

        let mut note = Note::new(x, y, color, z_index);
        note.id = self.fresh_id();
        let (width, height) = self.config.note_size();
        note.width = width;
        note.height = height;

        let id = note.id.clone();
        debug!(id = %id, x, y, z_index, %color, "note created");
        self.notes.push(note);
        self.selected = Some(id.clone());
        id
    }

    /// Merge `changes` into a note. Returns `false` if the id is unknown or
    /// nothing usable is left once non-finite geometry is dropped.
    pub fn update_note(&mut self, id: &NoteId, changes: NoteChanges) -> bool {
        let changes = changes.finite_only();
        if changes.is_empty() {
            debug!(id = %id, "update ignored, no usable fields");
            return false;
        }
        let Some(note) = self.get_mut(id) else {
            debug!(id = %id, "update ignored, unknown note");
            return false;
        };
        note.apply(changes, Utc::now());
        debug!(id = %id, "note updated");
        true
    }

    pub fn delete_note(&mut self, id: &NoteId) -> bool {
        let Some(pos) = self.notes.iter().position(|n| &n.id == id) else {
            debug!(id = %id, "delete ignored, unknown note");
            return false;
        };
        self.notes.remove(pos);
        if self.selected.as_ref() == Some(id) {
            self.selected = None;
        }
        debug!(id = %id, "note deleted");
        true
    }

    /// Copy a note, offset so the copy is visible, and select the copy.
    pub fn duplicate_note(&mut self, id: &NoteId) -> Option<NoteId> {
        let Some(original) = self.get(id).cloned() else {
            debug!(id = %id, "duplicate ignored, unknown note");
            return None;
        };

        let offset = self.config.duplicate_offset;
        let now = Utc::now();
        let copy = Note {
            id: self.fresh_id(),
            x: original.x + offset,
            y: original.y + offset,
            z_index: self.next_z_index(),
            created_at: now,
            updated_at: now,
            ..original
        };

        let copy_id = copy.id.clone();
        debug!(source = %id, id = %copy_id, z_index = copy.z_index, "note duplicated");
        self.notes.push(copy);
        self.selected = Some(copy_id.clone());
        Some(copy_id)
    }

    /// Raise a note above every other note and select it. Only `z_index`
    /// changes; `updated_at` is left alone.
    pub fn bring_to_front(&mut self, id: &NoteId) -> bool {
        if !self.contains(id) {
            debug!(id = %id, "bring to front ignored, unknown note");
            return false;
        }
        let z_index = self.next_z_index();
        if let Some(note) = self.get_mut(id) {
            note.z_index = z_index;
        }
        self.selected = Some(id.clone());
        true
    }

    /// Set or clear the selection. Unknown ids are ignored.
    pub fn select_note(&mut self, id: Option<&NoteId>) {
        match id {
            Some(id) if self.contains(id) => self.selected = Some(id.clone()),
            Some(id) => debug!(id = %id, "select ignored, unknown note"),
            None => self.selected = None,
        }
    }

    // ========== Search ==========

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// Notes matching the active search term, in canonical order.
    pub fn visible_notes(&self) -> Vec<&Note> {
        filter_notes(&self.notes, &self.search_term)
    }

    /// Project the collection through an arbitrary term without touching the
    /// active one.
    pub fn search(&self, term: &str) -> Vec<&Note> {
        filter_notes(&self.notes, term)
    }

    pub fn filter(&self, filter: &SearchFilter) -> Vec<&Note> {
        filter.apply(&self.notes)
    }

    /// Visible notes in paint order (lowest z-index first).
    pub fn stacked_notes(&self) -> Vec<&Note> {
        let mut visible = self.visible_notes();
        visible.sort_by_key(|n| n.z_index);
        visible
    }

    // ========== Snapshots ==========

    pub fn snapshot_json(&self) -> Result<String> {
        snapshot::to_json(&self.notes)
    }

    /// Write the collection to `dir` as `sticky-notes-<date>.json`.
    pub fn export_snapshot(&self, dir: &Path) -> Result<PathBuf> {
        let path = snapshot::write_export(&self.notes, dir, &Utc::now())?;
        info!(path = %path.display(), notes = self.notes.len(), "snapshot exported");
        Ok(path)
    }

    /// Replace the whole collection with the notes in `raw`.
    ///
    /// On any error the board is left exactly as it was.
    pub fn import_snapshot(&mut self, raw: &str) -> Result<usize> {
        let notes = match snapshot::parse_snapshot(raw) {
            Ok(notes) => notes,
            Err(e) => {
                warn!(error = %e, "snapshot import rejected");
                return Err(e);
            }
        };

        self.max_z_index = notes
            .iter()
            .map(|n| n.z_index)
            .max()
            .unwrap_or(INITIAL_Z_INDEX);
        self.notes = notes;
        self.selected = None;

        info!(notes = self.notes.len(), max_z_index = self.max_z_index, "snapshot imported");
        Ok(self.notes.len())
    }

    /// Empty the board once `confirm` agrees. `confirm` receives the number
    /// of notes about to be removed. Returns whether the board was cleared.
    pub fn clear_all(&mut self, confirm: impl FnOnce(usize) -> bool) -> bool {
        if !confirm(self.notes.len()) {
            debug!("clear declined");
            return false;
        }
        let removed = self.notes.len();
        self.notes.clear();
        self.selected = None;
        self.max_z_index = INITIAL_Z_INDEX;
        info!(removed, "board cleared");
        true
    }

    // ========== Commands ==========

    /// Apply a view command. Returns the id of a note the command created.
    pub fn apply(&mut self, command: Command) -> Option<NoteId> {
        match command {
            Command::Create => Some(self.create_note()),
            Command::Update { id, changes } => {
                self.update_note(&id, changes);
                None
            }
            Command::Delete(id) => {
                self.delete_note(&id);
                None
            }
            Command::Duplicate(id) => self.duplicate_note(&id),
            Command::BringToFront(id) => {
                self.bring_to_front(&id);
                None
            }
            Command::Select(id) => {
                self.select_note(id.as_ref());
                None
            }
        }
    }
}
