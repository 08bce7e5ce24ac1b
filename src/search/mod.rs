//! Search module: pure projections over the note collection.

use crate::entity::{Note, NoteColor};

/// Filter applied to the visible notes.
///
/// The text term matches note content case-insensitively; the optional color
/// constraint is used by `inspect --color`.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SearchFilter {
    /// Substring to look for in note content
    pub term: String,
    /// Only keep notes with this fill
    pub color: Option<NoteColor>,
}

impl SearchFilter {
    /// Create an empty filter.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn term(term: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            color: None,
        }
    }

    pub fn with_color(mut self, color: NoteColor) -> Self {
        self.color = Some(color);
        self
    }

    /// Check if filter has any constraints.
    pub fn is_empty(&self) -> bool {
        self.term.is_empty() && self.color.is_none()
    }

    pub fn matches(&self, note: &Note) -> bool {
        if let Some(color) = self.color {
            if note.color != color {
                return false;
            }
        }
        content_matches(&note.content, &self.term)
    }

    /// Apply the filter, keeping canonical order.
    pub fn apply<'a>(&self, notes: &'a [Note]) -> Vec<&'a Note> {
        notes.iter().filter(|n| self.matches(n)).collect()
    }
}

/// Notes whose content contains `term`, ignoring case. An empty term keeps
/// everything.
pub fn filter_notes<'a>(notes: &'a [Note], term: &str) -> Vec<&'a Note> {
    SearchFilter::term(term).apply(notes)
}

fn content_matches(content: &str, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    content.to_lowercase().contains(&term.to_lowercase())
}
