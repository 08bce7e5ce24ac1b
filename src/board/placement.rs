// src/board/placement.rs
//! Scatter placement and palette draws for new notes.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::config::BoardConfig;
use crate::entity::NoteColor;

/// Axis-aligned region new notes may be placed in (top-left corner range).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnRegion {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl SpawnRegion {
    /// Region that keeps a note of the configured default size fully inside
    /// the canvas, `spawn_margin` away from the edges. Collapses to the
    /// margin when the canvas is too small.
    pub fn from_config(config: &BoardConfig) -> Self {
        let (width, height) = config.note_size();
        let margin = config.spawn_margin;
        Self {
            min_x: margin,
            max_x: (config.canvas_width - width - margin).max(margin),
            min_y: margin,
            max_y: (config.canvas_height - height - margin).max(margin),
        }
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }
}

/// Random source for cosmetic choices. Seeded for reproducible sessions.
pub struct Scatter {
    rng: StdRng,
    region: SpawnRegion,
}

impl Scatter {
    pub fn new(region: SpawnRegion, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng, region }
    }

    pub fn position(&mut self) -> (f64, f64) {
        let x = sample(&mut self.rng, self.region.min_x, self.region.max_x);
        let y = sample(&mut self.rng, self.region.min_y, self.region.max_y);
        (x, y)
    }

    pub fn color(&mut self) -> NoteColor {
        NoteColor::ALL
            .choose(&mut self.rng)
            .copied()
            .unwrap_or_default()
    }
}

fn sample(rng: &mut StdRng, min: f64, max: f64) -> f64 {
    if max > min {
        rng.gen_range(min..=max)
    } else {
        min
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_from_default_config() {
        let region = SpawnRegion::from_config(&BoardConfig::default());
        assert_eq!(region.min_x, 50.0);
        assert_eq!(region.max_x, 950.0);
        assert_eq!(region.min_y, 50.0);
        assert_eq!(region.max_y, 550.0);
    }

    #[test]
    fn test_region_collapses_on_tiny_canvas() {
        let config = BoardConfig {
            canvas_width: 100.0,
            canvas_height: 100.0,
            ..Default::default()
        };
        let region = SpawnRegion::from_config(&config);
        assert_eq!(region.max_x, region.min_x);
        assert_eq!(region.max_y, region.min_y);

        let mut scatter = Scatter::new(region, Some(1));
        assert_eq!(scatter.position(), (50.0, 50.0));
    }

    #[test]
    fn test_positions_stay_inside_region() {
        let region = SpawnRegion::from_config(&BoardConfig::default());
        let mut scatter = Scatter::new(region, Some(42));
        for _ in 0..500 {
            let (x, y) = scatter.position();
            assert!(region.contains(x, y), "({}, {}) escaped {:?}", x, y, region);
        }
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let region = SpawnRegion::from_config(&BoardConfig::default());
        let mut a = Scatter::new(region, Some(7));
        let mut b = Scatter::new(region, Some(7));
        for _ in 0..10 {
            assert_eq!(a.position(), b.position());
            assert_eq!(a.color(), b.color());
        }
    }

    #[test]
    fn test_colors_come_from_palette() {
        let region = SpawnRegion::from_config(&BoardConfig::default());
        let mut scatter = Scatter::new(region, Some(3));
        for _ in 0..100 {
            assert!(NoteColor::ALL.contains(&scatter.color()));
        }
    }
}
