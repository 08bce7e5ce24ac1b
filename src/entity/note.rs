// src/entity/note.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{
    FontFamily, FontSize, NoteColor, NoteId, DEFAULT_NOTE_HEIGHT, DEFAULT_NOTE_WIDTH,
    INITIAL_Z_INDEX, MIN_NOTE_HEIGHT, MIN_NOTE_WIDTH,
};

/// Clamp a requested size to the minimum note box.
pub fn clamp_size(width: f64, height: f64) -> (f64, f64) {
    (width.max(MIN_NOTE_WIDTH), height.max(MIN_NOTE_HEIGHT))
}

fn default_width() -> f64 {
    DEFAULT_NOTE_WIDTH
}

fn default_height() -> f64 {
    DEFAULT_NOTE_HEIGHT
}

fn default_z_index() -> i64 {
    INITIAL_Z_INDEX
}

/// A single sticky note. Snapshot field names are camelCase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: NoteId,
    pub content: String,
    pub x: f64,
    pub y: f64,
    #[serde(default = "default_width")]
    pub width: f64,
    #[serde(default = "default_height")]
    pub height: f64,
    #[serde(default)]
    pub color: NoteColor,
    #[serde(default = "default_z_index")]
    pub z_index: i64,
    #[serde(default)]
    pub font_size: FontSize,
    #[serde(default)]
    pub font_family: FontFamily,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl Note {
    pub fn new(x: f64, y: f64, color: NoteColor, z_index: i64) -> Self {
        let now = Utc::now();
        Self {
            id: NoteId::generate(),
            content: String::new(),
            x,
            y,
            width: DEFAULT_NOTE_WIDTH,
            height: DEFAULT_NOTE_HEIGHT,
            color,
            z_index,
            font_size: FontSize::default(),
            font_family: FontFamily::default(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Merge `changes` into this note and refresh `updated_at`.
    ///
    /// Non-finite geometry is dropped. Width and height are clamped to the
    /// minimum box. `updated_at` never moves backwards, even if the wall
    /// clock does.
    pub fn apply(&mut self, changes: NoteChanges, now: DateTime<Utc>) {
        let changes = changes.finite_only();
        if let Some(content) = changes.content {
            self.content = content;
        }
        if let Some(x) = changes.x {
            self.x = x;
        }
        if let Some(y) = changes.y {
            self.y = y;
        }
        if let Some(width) = changes.width {
            self.width = width;
        }
        if let Some(height) = changes.height {
            self.height = height;
        }
        if let Some(color) = changes.color {
            self.color = color;
        }
        if let Some(font_size) = changes.font_size {
            self.font_size = font_size;
        }
        if let Some(font_family) = changes.font_family {
            self.font_family = font_family;
        }

        let (width, height) = clamp_size(self.width, self.height);
        self.width = width;
        self.height = height;
        self.updated_at = now.max(self.updated_at);
    }

    /// Repair a record that came from outside the board: clamp its box and
    /// make sure `updated_at >= created_at`.
    pub fn normalize(&mut self) {
        let (width, height) = clamp_size(self.width, self.height);
        self.width = width;
        self.height = height;
        if self.updated_at < self.created_at {
            self.updated_at = self.created_at;
        }
    }
}

/// Partial update payload for a note. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NoteChanges {
    pub content: Option<String>,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub color: Option<NoteColor>,
    pub font_size: Option<FontSize>,
    pub font_family: Option<FontFamily>,
}

impl NoteChanges {
    pub fn content(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Default::default()
        }
    }

    pub fn position(x: f64, y: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Default::default()
        }
    }

    pub fn size(width: f64, height: f64) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
            ..Default::default()
        }
    }

    pub fn color(color: NoteColor) -> Self {
        Self {
            color: Some(color),
            ..Default::default()
        }
    }

    pub fn font_size(font_size: FontSize) -> Self {
        Self {
            font_size: Some(font_size),
            ..Default::default()
        }
    }

    pub fn font_family(font_family: FontFamily) -> Self {
        Self {
            font_family: Some(font_family),
            ..Default::default()
        }
    }

    /// Drop any position or size that is NaN or infinite. Such values have
    /// no JSON form, so keeping them would break the snapshot round trip.
    pub fn finite_only(mut self) -> Self {
        for field in [&mut self.x, &mut self.y, &mut self.width, &mut self.height] {
            if field.is_some_and(|v| !v.is_finite()) {
                *field = None;
            }
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_none()
            && self.x.is_none()
            && self.y.is_none()
            && self.width.is_none()
            && self.height.is_none()
            && self.color.is_none()
            && self.font_size.is_none()
            && self.font_family.is_none()
    }
}
