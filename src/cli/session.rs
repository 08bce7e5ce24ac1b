//! Line-oriented board session.
//!
//! Each input line is translated into the pointer, keyboard and toolbar
//! events a user would produce on the board, and fed through the surface.

use std::fs;
use std::io::{BufRead, Write};
use std::path::PathBuf;

use crate::board::Command;
use crate::entity::{FontFamily, FontSize, NoteColor, NoteId};
use crate::error::{BoardError, Result};
use crate::view::hit::HANDLE_HEIGHT;
use crate::view::{Button, Key, Modifiers, Point, Region, Surface, ToolbarAction};
use crate::warnings::check_snapshot;

use super::output::{frame_row, preview};

const HELP: &str = "\
Commands:
  new                        create a note
  list                       list visible notes (top of stack last)
  show <id>                  print a note as JSON
  edit <id> [text]           open the editor, or replace the content in one go
  type <text>                replace the open editor's text
  commit | escape            commit (Ctrl+Enter) or discard (Esc) the open editor
  drag <id> <dx> <dy>        drag a note by its handle
  resize <id> <dw> <dh>      drag a note's resize grip
  color <id> <color>         yellow pink blue green purple orange red gray
  font <id> <family>         sans serif mono handwriting
  size <id> <px>             12 14 16 18 20
  dup <id> | delete <id>     duplicate or delete a note
  front <id>                 click a note (raise and select)
  select <id> | deselect     change the selection
  menu <id> dup|delete|close use the right-click menu
  search [term]              filter visible notes; no term clears the filter
  export [dir]               write sticky-notes-<date>.json
  import <file>              replace the board with a snapshot
  clear                      remove every note (asks for confirmation)
  help | quit";

enum Flow {
    Continue,
    Quit,
}

/// Split off the first whitespace-delimited word.
fn next_word(s: &str) -> (&str, &str) {
    let s = s.trim_start();
    match s.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim_start()),
        None => (s, ""),
    }
}

fn required<'a>(word: &'a str, what: &str) -> Result<&'a str> {
    if word.is_empty() {
        Err(BoardError::InvalidArgument(format!("missing {}", what)))
    } else {
        Ok(word)
    }
}

fn parse_number(word: &str, what: &str) -> Result<f64> {
    let value: f64 = required(word, what)?.parse().map_err(|_| {
        BoardError::InvalidArgument(format!("{} must be a number, got '{}'", what, word))
    })?;
    if !value.is_finite() {
        return Err(BoardError::InvalidArgument(format!("{} must be finite", what)));
    }
    Ok(value)
}

pub struct Session<R, W> {
    surface: Surface,
    input: R,
    output: W,
    interactive: bool,
    export_dir: PathBuf,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(surface: Surface, input: R, output: W) -> Self {
        let export_dir = surface.board().config().export_dir.clone();
        Self {
            surface,
            input,
            output,
            interactive: false,
            export_dir,
        }
    }

    /// Print prompts (only useful when a person is typing).
    pub fn interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn run(&mut self) -> Result<()> {
        loop {
            if self.interactive {
                write!(self.output, "> ")?;
                self.output.flush()?;
            }
            let Some(line) = self.read_line()? else {
                break;
            };
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            match self.execute(&line) {
                Ok(Flow::Continue) => {}
                Ok(Flow::Quit) => break,
                Err(e) => writeln!(self.output, "Error: {}", e)?,
            }
        }
        Ok(())
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn execute(&mut self, line: &str) -> Result<Flow> {
        let (command, rest) = next_word(line);
        match command {
            "new" => {
                let id = self.surface.create_note();
                writeln!(self.output, "Created note {}", id.short())?;
            }
            "list" | "ls" => self.list()?,
            "show" => {
                let id = self.resolve(rest)?;
                if let Some(note) = self.surface.board().get(&id) {
                    writeln!(self.output, "{}", serde_json::to_string_pretty(note)?)?;
                    writeln!(
                        self.output,
                        "fill {}, font {}px {}",
                        note.color.hex(),
                        note.font_size.px(),
                        note.font_family.stack()
                    )?;
                }
            }
            "edit" => self.edit(rest)?,
            "type" => {
                let id = self.editing()?;
                self.surface.edit_draft(&id, rest);
            }
            "commit" => {
                let id = self.editing()?;
                self.surface.key(Key::Enter, Modifiers::ctrl());
                writeln!(self.output, "Updated {}", id.short())?;
            }
            "escape" | "esc" => {
                let id = self.editing()?;
                self.surface.key(Key::Escape, Modifiers::none());
                writeln!(self.output, "Discarded edit of {}", id.short())?;
            }
            "drag" | "move" => self.drag(rest)?,
            "resize" => self.resize(rest)?,
            "color" => {
                let (id, value) = next_word(rest);
                let id = self.resolve(id)?;
                let color: NoteColor = required(value, "color")?
                    .parse()
                    .map_err(BoardError::InvalidArgument)?;
                self.toolbar(&id, ToolbarAction::Color(color))?;
            }
            "font" => {
                let (id, value) = next_word(rest);
                let id = self.resolve(id)?;
                let family: FontFamily = required(value, "font family")?
                    .parse()
                    .map_err(BoardError::InvalidArgument)?;
                self.toolbar(&id, ToolbarAction::FontFamily(family))?;
            }
            "size" => {
                let (id, value) = next_word(rest);
                let id = self.resolve(id)?;
                let size: FontSize = required(value, "font size")?
                    .parse()
                    .map_err(BoardError::InvalidArgument)?;
                self.toolbar(&id, ToolbarAction::FontSize(size))?;
            }
            "dup" | "duplicate" => {
                let id = self.resolve(rest)?;
                self.toolbar(&id, ToolbarAction::Duplicate)?;
            }
            "delete" | "rm" => {
                let id = self.resolve(rest)?;
                let at = self.delete_button_point(&id)?;
                self.surface.press(&id, Region::DeleteButton, Button::Primary, at);
                self.surface.pointer_up(at);
                writeln!(self.output, "Deleted {}", id.short())?;
            }
            "front" => {
                let id = self.resolve(rest)?;
                self.click_body(&id)?;
                let z = self.surface.board().get(&id).map(|n| n.z_index).unwrap_or_default();
                writeln!(self.output, "Raised {} to z={}", id.short(), z)?;
            }
            "select" => {
                let id = self.resolve(rest)?;
                self.surface.dispatch(vec![Command::Select(Some(id.clone()))]);
                writeln!(self.output, "Selected {}", id.short())?;
            }
            "deselect" => {
                self.surface.dispatch(vec![Command::Select(None)]);
                writeln!(self.output, "Selection cleared")?;
            }
            "menu" => self.menu(rest)?,
            "search" => {
                self.surface.set_search_term(rest);
                let board = self.surface.board();
                writeln!(
                    self.output,
                    "{} of {} notes match",
                    board.visible_notes().len(),
                    board.len()
                )?;
            }
            "export" => {
                let dir = if rest.is_empty() {
                    self.export_dir.clone()
                } else {
                    PathBuf::from(rest)
                };
                let path = self.surface.board().export_snapshot(&dir)?;
                writeln!(
                    self.output,
                    "Exported {} notes to {}",
                    self.surface.board().len(),
                    path.display()
                )?;
            }
            "import" => {
                let path = PathBuf::from(required(rest, "snapshot file")?);
                let raw = fs::read_to_string(&path)?;
                let count = self.surface.import_snapshot(&raw)?;
                let board = self.surface.board();
                for warning in check_snapshot(board.notes(), raw.len() as u64, board.config()) {
                    writeln!(self.output, "{}", warning)?;
                }
                writeln!(self.output, "Imported {} notes", count)?;
            }
            "clear" => self.clear()?,
            "help" | "?" => writeln!(self.output, "{}", HELP)?,
            "quit" | "exit" => return Ok(Flow::Quit),
            other => {
                return Err(BoardError::InvalidArgument(format!(
                    "unknown command '{}' (try 'help')",
                    other
                )))
            }
        }
        Ok(Flow::Continue)
    }

    fn resolve(&self, word: &str) -> Result<NoteId> {
        let (id, _) = next_word(word);
        self.surface.board().find_by_prefix(required(id, "note id")?)
    }

    fn editing(&self) -> Result<NoteId> {
        self.surface
            .editing()
            .cloned()
            .ok_or_else(|| BoardError::InvalidArgument("no note is being edited".to_string()))
    }

    fn note_box(&self, id: &NoteId) -> Result<(f64, f64, f64, f64)> {
        self.surface
            .board()
            .get(id)
            .map(|n| (n.x, n.y, n.width, n.height))
            .ok_or_else(|| BoardError::NoteNotFound(id.to_string()))
    }

    fn handle_point(&self, id: &NoteId) -> Result<Point> {
        let (x, y, _, _) = self.note_box(id)?;
        Ok(Point::new(x + 8.0, y + 8.0))
    }

    fn body_point(&self, id: &NoteId) -> Result<Point> {
        let (x, y, _, _) = self.note_box(id)?;
        Ok(Point::new(x + 10.0, y + HANDLE_HEIGHT + 10.0))
    }

    fn grip_point(&self, id: &NoteId) -> Result<Point> {
        let (x, y, w, h) = self.note_box(id)?;
        Ok(Point::new(x + w - 4.0, y + h - 4.0))
    }

    fn delete_button_point(&self, id: &NoteId) -> Result<Point> {
        let (x, y, w, _) = self.note_box(id)?;
        Ok(Point::new(x + w - 8.0, y + 8.0))
    }

    fn click_body(&mut self, id: &NoteId) -> Result<()> {
        let at = self.body_point(id)?;
        self.surface.press(id, Region::Body, Button::Primary, at);
        self.surface.pointer_up(at);
        Ok(())
    }

    fn ensure_selected(&mut self, id: &NoteId) -> Result<()> {
        if !self.surface.board().is_selected(id) {
            self.click_body(id)?;
        }
        Ok(())
    }

    fn list(&mut self) -> Result<()> {
        let frames = self.surface.frames();
        let board = self.surface.board();
        if frames.is_empty() {
            if board.is_empty() {
                writeln!(self.output, "Board is empty.")?;
            } else {
                writeln!(self.output, "No notes match '{}'.", board.search_term())?;
            }
            return Ok(());
        }
        for frame in &frames {
            writeln!(self.output, "{}", frame_row(frame))?;
        }
        Ok(())
    }

    fn edit(&mut self, rest: &str) -> Result<()> {
        let (id, text) = next_word(rest);
        let id = self.resolve(id)?;
        let at = self.body_point(&id)?;

        self.surface.press(&id, Region::Body, Button::Primary, at);
        self.surface.pointer_up(at);
        self.surface.double_click_on(&id, Region::Body);

        if text.is_empty() {
            writeln!(
                self.output,
                "Editing {} (type <text>, then commit or escape)",
                id.short()
            )?;
            return Ok(());
        }

        self.surface.edit_draft(&id, text);
        self.surface.blur(&id);
        writeln!(self.output, "Updated {}: {}", id.short(), preview(text))?;
        Ok(())
    }

    fn drag(&mut self, rest: &str) -> Result<()> {
        let (id, rest) = next_word(rest);
        let (dx, rest) = next_word(rest);
        let (dy, _) = next_word(rest);
        let id = self.resolve(id)?;
        let dx = parse_number(dx, "dx")?;
        let dy = parse_number(dy, "dy")?;

        let start = self.handle_point(&id)?;
        let end = start.offset(dx, dy);
        self.surface.press(&id, Region::Handle, Button::Primary, start);
        self.surface.pointer_move(end);
        self.surface.pointer_up(end);

        let (x, y, _, _) = self.note_box(&id)?;
        writeln!(self.output, "Moved {} to ({:.0}, {:.0})", id.short(), x, y)?;
        Ok(())
    }

    fn resize(&mut self, rest: &str) -> Result<()> {
        let (id, rest) = next_word(rest);
        let (dw, rest) = next_word(rest);
        let (dh, _) = next_word(rest);
        let id = self.resolve(id)?;
        let dw = parse_number(dw, "dw")?;
        let dh = parse_number(dh, "dh")?;

        // the grip only exists on the selected note
        self.ensure_selected(&id)?;
        let start = self.grip_point(&id)?;
        let end = start.offset(dw, dh);
        self.surface.press(&id, Region::ResizeGrip, Button::Primary, start);
        self.surface.pointer_move(end);
        self.surface.pointer_up(end);

        let (_, _, w, h) = self.note_box(&id)?;
        writeln!(self.output, "Resized {} to {:.0}x{:.0}", id.short(), w, h)?;
        Ok(())
    }

    fn toolbar(&mut self, id: &NoteId, action: ToolbarAction) -> Result<()> {
        self.ensure_selected(id)?;
        self.surface.toolbar(id, action);

        match action {
            ToolbarAction::Duplicate => {
                let copy = self.surface.board().selected().cloned();
                match copy {
                    Some(copy) if &copy != id => {
                        writeln!(self.output, "Duplicated {} as {}", id.short(), copy.short())?
                    }
                    _ => writeln!(self.output, "Nothing duplicated")?,
                }
            }
            ToolbarAction::Delete => writeln!(self.output, "Deleted {}", id.short())?,
            _ => writeln!(self.output, "Updated {}", id.short())?,
        }
        Ok(())
    }

    fn menu(&mut self, rest: &str) -> Result<()> {
        let (id, item) = next_word(rest);
        let id = self.resolve(id)?;
        let at = self.body_point(&id)?;
        self.surface.press(&id, Region::Body, Button::Secondary, at);

        match next_word(item).0 {
            "dup" | "duplicate" => {
                self.surface.menu_duplicate(&id);
                let copy = self.surface.board().selected().cloned();
                if let Some(copy) = copy {
                    writeln!(self.output, "Duplicated {} as {}", id.short(), copy.short())?;
                }
            }
            "delete" => {
                self.surface.menu_delete(&id);
                writeln!(self.output, "Deleted {}", id.short())?;
            }
            "close" | "" => {
                self.surface.dismiss_menus();
                writeln!(self.output, "Menu closed")?;
            }
            other => {
                self.surface.dismiss_menus();
                return Err(BoardError::InvalidArgument(format!(
                    "unknown menu item '{}' (dup, delete, close)",
                    other
                )));
            }
        }
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        let count = self.surface.board().len();
        write!(self.output, "Clear all {} notes? [y/N] ", count)?;
        self.output.flush()?;
        let answer = self.read_line()?.unwrap_or_default();
        writeln!(self.output)?;

        let cleared = self
            .surface
            .clear_all(|_| answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes"));
        if cleared {
            writeln!(self.output, "Board cleared.")?;
        } else {
            writeln!(self.output, "Cancelled.")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use crate::config::BoardConfig;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn run(script: &str) -> (Surface, String) {
        let surface = Surface::new(Board::new(BoardConfig::default(), Some(1)));
        let mut output = Vec::new();
        let surface = {
            let mut session = Session::new(surface, Cursor::new(script.to_string()), &mut output);
            session.run().unwrap();
            session.surface
        };
        (surface, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_next_word() {
        assert_eq!(next_word("  edit abc  hello world "), ("edit", "abc  hello world "));
        assert_eq!(next_word("list"), ("list", ""));
        assert_eq!(next_word(""), ("", ""));
    }

    #[test]
    fn test_new_and_list() {
        let (surface, out) = run("new\nnew\nlist\n");
        assert_eq!(surface.board().len(), 2);
        assert_eq!(out.matches("Created note").count(), 2);
        assert!(out.contains("(empty)"));
    }

    #[test]
    fn test_edit_drag_resize_style() {
        let mut surface = Surface::new(Board::new(BoardConfig::default(), Some(1)));
        let id = surface.create_note();
        surface.dispatch(vec![Command::move_to(id.clone(), 100.0, 100.0)]);
        let short = id.as_str()[..8].to_string();

        let script = [
            "edit {s} hello board",
            "drag {s} 30 -10",
            "resize {s} -500 25",
            "color {s} purple",
            "size {s} 18",
            "font {s} mono",
        ]
        .map(|line| format!("{}\n", line.replace("{s}", &short)))
        .concat();
        let mut output = Vec::new();
        let mut session = Session::new(surface, Cursor::new(script), &mut output);
        session.run().unwrap();

        let note = session.surface().board().get(&id).unwrap().clone();
        assert_eq!(note.content, "hello board");
        assert_eq!((note.x, note.y), (130.0, 90.0));
        assert_eq!((note.width, note.height), (150.0, 225.0));
        assert_eq!(note.color, NoteColor::Purple);
        assert_eq!(note.font_size, FontSize::Px18);
        assert_eq!(note.font_family, FontFamily::Mono);
    }

    #[test]
    fn test_open_editor_then_escape() {
        let (surface, out) = run("new\nlist\n");
        let id = surface.board().notes()[0].id.clone();
        assert!(out.contains(id.short()));

        let script = format!("edit {}\ntype never saved\nescape\n", id.as_str());
        let mut output = Vec::new();
        let mut session = Session::new(surface, Cursor::new(script), &mut output);
        session.run().unwrap();
        assert_eq!(session.surface().board().get(&id).unwrap().content, "");
    }

    #[test]
    fn test_unknown_id_reports_error_and_continues() {
        let (surface, out) = run("drag nope 1 1\nnew\n");
        assert!(out.contains("Error: Note not found: nope"));
        assert_eq!(surface.board().len(), 1);
    }

    #[test]
    fn test_clear_needs_yes() {
        let (surface, out) = run("new\nnew\nclear\nn\n");
        assert_eq!(surface.board().len(), 2);
        assert!(out.contains("Clear all 2 notes? [y/N]"));
        assert!(out.contains("Cancelled."));

        let (surface, out) = run("new\nclear\ny\n");
        assert!(surface.board().is_empty());
        assert!(out.contains("Board cleared."));
    }

    #[test]
    fn test_search_counts() {
        let (surface, out) = run("new\nnew\nsearch anything\n");
        assert!(out.contains("0 of 2 notes match"));
        assert_eq!(surface.board().len(), 2);
    }

    #[test]
    fn test_export_then_import() {
        let tmp = TempDir::new().unwrap();
        let script = format!("new\nnew\nexport {}\n", tmp.path().display());
        let (first, out) = run(&script);
        assert!(out.contains("Exported 2 notes"));

        let file = fs::read_dir(tmp.path()).unwrap().next().unwrap().unwrap().path();
        let script = format!("import {}\n", file.display());
        let (second, out) = run(&script);
        assert!(out.contains("Imported 2 notes"));
        assert_eq!(second.board().notes(), first.board().notes());
    }

    #[test]
    fn test_bad_import_leaves_board() {
        let tmp = TempDir::new().unwrap();
        let bad = tmp.path().join("bad.json");
        fs::write(&bad, "{\"not\": \"an array\"}").unwrap();

        let script = format!("new\nimport {}\n", bad.display());
        let (surface, out) = run(&script);
        assert!(out.contains("Error: Invalid snapshot"));
        assert_eq!(surface.board().len(), 1);
    }

    #[test]
    fn test_menu_duplicate_and_delete() {
        let (surface, _) = run("new\n");
        let id = surface.board().notes()[0].id.clone();

        let script = format!("menu {id} dup\nmenu {id} delete\n", id = id.as_str());
        let mut output = Vec::new();
        let mut session = Session::new(surface, Cursor::new(script), &mut output);
        session.run().unwrap();

        let board = session.surface().board();
        assert_eq!(board.len(), 1);
        assert!(board.get(&id).is_none());
    }

    #[test]
    fn test_quit_stops_reading() {
        let (surface, _) = run("new\nquit\nnew\n");
        assert_eq!(surface.board().len(), 1);
    }

    #[test]
    fn test_huge_drags_still_export_cleanly() {
        let tmp = TempDir::new().unwrap();
        let (surface, _) = run("new\n");
        let id = surface.board().notes()[0].id.clone();

        let script = format!(
            "drag {id} 1e308 0\ndrag {id} 1e308 0\nexport {dir}\n",
            id = id.as_str(),
            dir = tmp.path().display()
        );
        let mut output = Vec::new();
        let mut session = Session::new(surface, Cursor::new(script), &mut output);
        session.run().unwrap();
        assert!(session.surface().board().get(&id).unwrap().x.is_finite());

        let file = fs::read_dir(tmp.path()).unwrap().next().unwrap().unwrap().path();
        let raw = fs::read_to_string(file).unwrap();
        let mut restored = Board::default();
        assert_eq!(restored.import_snapshot(&raw).unwrap(), 1);
    }

    #[test]
    fn test_show_prints_render_style() {
        let (surface, _) = run("new\n");
        let id = surface.board().notes()[0].id.clone();

        let script = format!("color {id} green\nshow {id}\n", id = id.as_str());
        let mut output = Vec::new();
        {
            let mut session = Session::new(surface, Cursor::new(script), &mut output);
            session.run().unwrap();
        }
        let out = String::from_utf8(output).unwrap();
        assert!(out.contains(&format!("fill {}", NoteColor::Green.hex())));
        assert!(out.contains("font 14px Inter"));
    }
}
