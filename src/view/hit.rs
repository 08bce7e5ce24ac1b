// src/view/hit.rs
//! Hit testing against a note's on-screen box.

use crate::entity::Note;

use super::Point;

/// Height of the drag handle strip across the top of a note.
pub const HANDLE_HEIGHT: f64 = 32.0;
/// Side of the square resize grip in the bottom-right corner.
pub const GRIP_SIZE: f64 = 16.0;
/// Side of the delete button at the trailing end of the handle strip.
pub const DELETE_SIZE: f64 = 24.0;

/// Part of a note a pointer landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    /// Header strip; the only place a drag may start
    Handle,
    /// Text area
    Body,
    /// Bottom-right corner, present only while the note is selected
    ResizeGrip,
    /// Trailing X in the header
    DeleteButton,
}

/// Which part of `note` contains `point`, if any.
pub fn hit_test(note: &Note, point: Point, selected: bool) -> Option<Region> {
    let right = note.x + note.width;
    let bottom = note.y + note.height;

    if point.x < note.x || point.x > right || point.y < note.y || point.y > bottom {
        return None;
    }

    if selected && point.x >= right - GRIP_SIZE && point.y >= bottom - GRIP_SIZE {
        return Some(Region::ResizeGrip);
    }

    if point.y < note.y + HANDLE_HEIGHT {
        if point.x >= right - DELETE_SIZE {
            return Some(Region::DeleteButton);
        }
        return Some(Region::Handle);
    }

    Some(Region::Body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::NoteColor;

    fn note() -> Note {
        // 100,100 → 300,300
        Note::new(100.0, 100.0, NoteColor::Yellow, 1)
    }

    #[test]
    fn test_outside_misses() {
        assert_eq!(hit_test(&note(), Point::new(99.0, 150.0), false), None);
        assert_eq!(hit_test(&note(), Point::new(150.0, 301.0), true), None);
    }

    #[test]
    fn test_regions() {
        let n = note();
        assert_eq!(hit_test(&n, Point::new(110.0, 110.0), false), Some(Region::Handle));
        assert_eq!(hit_test(&n, Point::new(290.0, 110.0), false), Some(Region::DeleteButton));
        assert_eq!(hit_test(&n, Point::new(150.0, 200.0), false), Some(Region::Body));
    }

    #[test]
    fn test_grip_only_when_selected() {
        let n = note();
        let corner = Point::new(295.0, 295.0);
        assert_eq!(hit_test(&n, corner, false), Some(Region::Body));
        assert_eq!(hit_test(&n, corner, true), Some(Region::ResizeGrip));
    }
}
