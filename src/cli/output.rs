use crate::entity::{Note, NoteColor, NoteId};
use crate::view::NoteFrame;

const PREVIEW_CHARS: usize = 40;

/// First line of `content`, shortened for a one-line listing.
pub fn preview(content: &str) -> String {
    let first = content.lines().next().unwrap_or("").trim();
    if first.is_empty() {
        return "(empty)".to_string();
    }
    let mut out: String = first.chars().take(PREVIEW_CHARS).collect();
    if first.chars().count() > PREVIEW_CHARS || content.lines().nth(1).is_some() {
        out.push('…');
    }
    out
}

#[allow(clippy::too_many_arguments)]
fn row(
    marker: char,
    id: &NoteId,
    z_index: i64,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    color: NoteColor,
    content: &str,
) -> String {
    format!(
        "{} {:<7}  z={:<4} at ({:.0}, {:.0})  {:.0}x{:.0}  {:<6}  {}",
        marker,
        id.short(),
        z_index,
        x,
        y,
        width,
        height,
        color.to_string(),
        preview(content)
    )
}

/// Listing row for a rendered frame; `*` marks the selection.
pub fn frame_row(frame: &NoteFrame) -> String {
    let marker = if frame.selected { '*' } else { ' ' };
    let mut line = row(
        marker,
        &frame.id,
        frame.z_index,
        frame.x,
        frame.y,
        frame.width,
        frame.height,
        frame.color,
        &frame.content,
    );
    if frame.mode != "viewing" {
        line.push_str(&format!("  [{}]", frame.mode));
    }
    line
}

pub fn note_row(note: &Note) -> String {
    row(
        ' ',
        &note.id,
        note.z_index,
        note.x,
        note.y,
        note.width,
        note.height,
        note.color,
        &note.content,
    )
}
