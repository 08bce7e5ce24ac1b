//! Board configuration loaded from `stickyboard.yaml`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::entity::{clamp_size, DEFAULT_NOTE_HEIGHT, DEFAULT_NOTE_WIDTH};
use crate::error::{BoardError, Result};

pub const CONFIG_FILE: &str = "stickyboard.yaml";

/// Canvas geometry and defaults used by the board controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Canvas width in pixels; new notes are scattered inside it
    pub canvas_width: f64,
    /// Canvas height in pixels
    pub canvas_height: f64,
    /// Gap kept between a freshly placed note and the canvas edge
    pub spawn_margin: f64,
    pub default_width: f64,
    pub default_height: f64,
    /// Offset applied to both axes when duplicating a note
    pub duplicate_offset: f64,
    /// Directory snapshot exports are written to
    pub export_dir: PathBuf,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            canvas_width: 1200.0,
            canvas_height: 800.0,
            spawn_margin: 50.0,
            default_width: DEFAULT_NOTE_WIDTH,
            default_height: DEFAULT_NOTE_HEIGHT,
            duplicate_offset: 20.0,
            export_dir: PathBuf::from("."),
        }
    }
}

impl BoardConfig {
    /// Load config from an explicit path. The file must exist.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        let config: BoardConfig = serde_yaml::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Load `stickyboard.yaml` from `dir`, falling back to defaults when the
    /// file is absent.
    pub fn load_or_default(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE);
        if path.exists() {
            Self::from_file(&path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> Result<()> {
        let finite = [
            self.canvas_width,
            self.canvas_height,
            self.spawn_margin,
            self.default_width,
            self.default_height,
            self.duplicate_offset,
        ];
        if finite.iter().any(|v| !v.is_finite()) {
            return Err(BoardError::Config(
                "all numeric settings must be finite".to_string(),
            ));
        }
        if self.canvas_width <= 0.0 || self.canvas_height <= 0.0 {
            return Err(BoardError::Config(format!(
                "canvas must have a positive size, got {}x{}",
                self.canvas_width, self.canvas_height
            )));
        }
        if self.spawn_margin < 0.0 {
            return Err(BoardError::Config("spawn_margin must not be negative".to_string()));
        }
        Ok(())
    }

    /// Default note size, clamped to the minimum note box.
    pub fn note_size(&self) -> (f64, f64) {
        clamp_size(self.default_width, self.default_height)
    }
}
