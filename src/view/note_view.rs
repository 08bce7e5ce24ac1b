// src/view/note_view.rs
//! Per-note interaction state machine.
//!
//! A `NoteView` never touches the board. It reads the note it is shown with
//! through [`NoteProps`] and answers every input with the [`Command`]s the
//! board should apply. The only state it owns is the transient [`ViewMode`].

use crate::board::Command;
use crate::entity::{clamp_size, FontFamily, FontSize, Note, NoteChanges, NoteColor, NoteId};

use super::listeners::{GestureKind, PointerListeners};
use super::{Button, Key, Modifiers, Point, Region};

/// What a view is doing right now.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewMode {
    Viewing,
    Editing {
        draft: String,
    },
    Dragging {
        start: Point,
        origin: Point,
        current: Point,
    },
    Resizing {
        start: Point,
        origin_width: f64,
        origin_height: f64,
        width: f64,
        height: f64,
    },
    ContextMenuOpen {
        at: Point,
    },
}

impl ViewMode {
    pub fn label(&self) -> &'static str {
        match self {
            ViewMode::Viewing => "viewing",
            ViewMode::Editing { .. } => "editing",
            ViewMode::Dragging { .. } => "dragging",
            ViewMode::Resizing { .. } => "resizing",
            ViewMode::ContextMenuOpen { .. } => "menu",
        }
    }
}

/// Read-only inputs a view is rendered with.
#[derive(Debug, Clone, Copy)]
pub struct NoteProps<'a> {
    pub note: &'a Note,
    pub selected: bool,
}

/// Actions on the per-note toolbar, shown while the note is selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarAction {
    Color(NoteColor),
    FontSize(FontSize),
    FontFamily(FontFamily),
    Duplicate,
    Delete,
}

#[derive(Debug, Clone)]
pub struct NoteView {
    id: NoteId,
    mode: ViewMode,
}

impl NoteView {
    pub fn new(id: NoteId) -> Self {
        Self {
            id,
            mode: ViewMode::Viewing,
        }
    }

    pub fn id(&self) -> &NoteId {
        &self.id
    }

    pub fn mode(&self) -> &ViewMode {
        &self.mode
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.mode, ViewMode::Editing { .. })
    }

    pub fn is_menu_open(&self) -> bool {
        matches!(self.mode, ViewMode::ContextMenuOpen { .. })
    }

    /// Gesture currently in progress, if any.
    pub fn active_gesture(&self) -> Option<GestureKind> {
        match self.mode {
            ViewMode::Dragging { .. } => Some(GestureKind::Drag),
            ViewMode::Resizing { .. } => Some(GestureKind::Resize),
            _ => None,
        }
    }

    /// Where the note should be drawn, including an in-flight drag.
    pub fn display_position(&self, note: &Note) -> Point {
        match self.mode {
            ViewMode::Dragging { current, .. } => current,
            _ => Point::new(note.x, note.y),
        }
    }

    /// Size the note should be drawn at, including an in-flight resize.
    pub fn display_size(&self, note: &Note) -> (f64, f64) {
        match self.mode {
            ViewMode::Resizing { width, height, .. } => (width, height),
            _ => (note.width, note.height),
        }
    }

    /// Text shown in the note body; the draft while editing.
    pub fn display_content<'a>(&'a self, note: &'a Note) -> &'a str {
        match &self.mode {
            ViewMode::Editing { draft } => draft,
            _ => &note.content,
        }
    }

    // ========== Pointer ==========

    pub fn pointer_down(
        &mut self,
        props: NoteProps<'_>,
        region: Region,
        button: Button,
        at: Point,
        listeners: &mut PointerListeners,
    ) -> Vec<Command> {
        // one gesture per note at a time
        if self.active_gesture().is_some() {
            return Vec::new();
        }

        if button == Button::Secondary {
            if !self.is_editing() {
                self.mode = ViewMode::ContextMenuOpen { at };
            }
            return Vec::new();
        }

        if self.is_menu_open() {
            self.mode = ViewMode::Viewing;
        }

        let mut commands = Vec::new();
        match region {
            Region::DeleteButton => {
                commands.push(Command::Delete(self.id.clone()));
            }
            Region::Handle => {
                commands.extend(self.commit_edit());
                commands.push(Command::BringToFront(self.id.clone()));
                listeners.attach(GestureKind::Drag, &self.id);
                let origin = Point::new(props.note.x, props.note.y);
                self.mode = ViewMode::Dragging {
                    start: at,
                    origin,
                    current: origin,
                };
            }
            Region::ResizeGrip if props.selected => {
                commands.extend(self.commit_edit());
                commands.push(Command::BringToFront(self.id.clone()));
                listeners.attach(GestureKind::Resize, &self.id);
                self.mode = ViewMode::Resizing {
                    start: at,
                    origin_width: props.note.width,
                    origin_height: props.note.height,
                    width: props.note.width,
                    height: props.note.height,
                };
            }
            Region::Body | Region::ResizeGrip => {
                commands.push(Command::BringToFront(self.id.clone()));
            }
        }
        commands
    }

    /// Track the pointer during a gesture. Returns whether the preview moved.
    pub fn pointer_move(&mut self, at: Point) -> bool {
        match &mut self.mode {
            ViewMode::Dragging {
                start,
                origin,
                current,
            } => {
                let next = Point::new(origin.x + at.x - start.x, origin.y + at.y - start.y);
                if !(next.x.is_finite() && next.y.is_finite()) {
                    return false;
                }
                *current = next;
                true
            }
            ViewMode::Resizing {
                start,
                origin_width,
                origin_height,
                width,
                height,
            } => {
                let (w, h) = clamp_size(
                    *origin_width + at.x - start.x,
                    *origin_height + at.y - start.y,
                );
                if !(w.is_finite() && h.is_finite()) {
                    return false;
                }
                *width = w;
                *height = h;
                true
            }
            _ => false,
        }
    }

    /// End the gesture at `at`, committing the final geometry.
    pub fn pointer_up(&mut self, at: Point, listeners: &mut PointerListeners) -> Vec<Command> {
        self.pointer_move(at);
        self.finish_gesture(listeners)
    }

    /// Abnormal end of a gesture (pointer capture lost, window blurred).
    /// Listeners are released and the last tracked geometry is committed.
    pub fn pointer_cancel(&mut self, listeners: &mut PointerListeners) -> Vec<Command> {
        self.finish_gesture(listeners)
    }

    fn finish_gesture(&mut self, listeners: &mut PointerListeners) -> Vec<Command> {
        match std::mem::replace(&mut self.mode, ViewMode::Viewing) {
            ViewMode::Dragging { current, .. } => {
                listeners.detach(GestureKind::Drag, &self.id);
                vec![
                    Command::move_to(self.id.clone(), current.x, current.y),
                    Command::BringToFront(self.id.clone()),
                ]
            }
            ViewMode::Resizing { width, height, .. } => {
                listeners.detach(GestureKind::Resize, &self.id);
                vec![Command::resize(self.id.clone(), width, height)]
            }
            other => {
                self.mode = other;
                Vec::new()
            }
        }
    }

    /// Double-click on the body opens the editor seeded with the content.
    pub fn double_click(&mut self, props: NoteProps<'_>, region: Region) -> Vec<Command> {
        if region != Region::Body || self.active_gesture().is_some() || self.is_editing() {
            return Vec::new();
        }
        self.mode = ViewMode::Editing {
            draft: props.note.content.clone(),
        };
        Vec::new()
    }

    // ========== Editing ==========

    /// Replace the editor text. Ignored unless editing.
    pub fn edit_draft(&mut self, text: impl Into<String>) -> bool {
        match &mut self.mode {
            ViewMode::Editing { draft } => {
                *draft = text.into();
                true
            }
            _ => false,
        }
    }

    pub fn key(&mut self, key: Key, modifiers: Modifiers) -> Vec<Command> {
        let editing = self.is_editing();
        match key {
            Key::Enter if editing && modifiers.command() => self.commit_edit(),
            Key::Escape if editing => {
                // drop the draft; the note keeps its last committed content
                self.mode = ViewMode::Viewing;
                Vec::new()
            }
            _ => Vec::new(),
        }
    }

    /// Focus left the editor: commit.
    pub fn blur(&mut self) -> Vec<Command> {
        self.commit_edit()
    }

    fn commit_edit(&mut self) -> Vec<Command> {
        if !self.is_editing() {
            return Vec::new();
        }
        match std::mem::replace(&mut self.mode, ViewMode::Viewing) {
            ViewMode::Editing { draft } => vec![Command::edit(self.id.clone(), draft)],
            _ => Vec::new(),
        }
    }

    // ========== Context menu ==========

    pub fn menu_duplicate(&mut self) -> Vec<Command> {
        if !self.is_menu_open() {
            return Vec::new();
        }
        self.mode = ViewMode::Viewing;
        vec![Command::Duplicate(self.id.clone())]
    }

    pub fn menu_delete(&mut self) -> Vec<Command> {
        if !self.is_menu_open() {
            return Vec::new();
        }
        self.mode = ViewMode::Viewing;
        vec![Command::Delete(self.id.clone())]
    }

    /// A click landed somewhere other than this note's menu.
    pub fn outside_click(&mut self) {
        if self.is_menu_open() {
            self.mode = ViewMode::Viewing;
        }
    }

    // ========== Toolbar ==========

    pub fn toolbar(&mut self, props: NoteProps<'_>, action: ToolbarAction) -> Vec<Command> {
        if !props.selected {
            return Vec::new();
        }
        let id = self.id.clone();
        let changes = match action {
            ToolbarAction::Color(color) => NoteChanges::color(color),
            ToolbarAction::FontSize(size) => NoteChanges::font_size(size),
            ToolbarAction::FontFamily(family) => NoteChanges::font_family(family),
            ToolbarAction::Duplicate => return vec![Command::Duplicate(id)],
            ToolbarAction::Delete => return vec![Command::Delete(id)],
        };
        vec![Command::Update { id, changes }]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{MIN_NOTE_HEIGHT, MIN_NOTE_WIDTH};

    fn note() -> Note {
        let mut note = Note::new(100.0, 100.0, NoteColor::Yellow, 1);
        note.content = "committed".to_string();
        note
    }

    fn props(note: &Note, selected: bool) -> NoteProps<'_> {
        NoteProps { note, selected }
    }

    #[test]
    fn test_click_on_body_brings_to_front() {
        let note = note();
        let mut view = NoteView::new(note.id.clone());
        let mut listeners = PointerListeners::new();

        let cmds = view.pointer_down(
            props(&note, false),
            Region::Body,
            Button::Primary,
            Point::new(150.0, 200.0),
            &mut listeners,
        );
        assert_eq!(cmds, vec![Command::BringToFront(note.id.clone())]);
        assert_eq!(view.mode(), &ViewMode::Viewing);
        assert!(listeners.is_idle());
    }

    #[test]
    fn test_drag_commits_position_and_raises() {
        let note = note();
        let mut view = NoteView::new(note.id.clone());
        let mut listeners = PointerListeners::new();
        let start = Point::new(120.0, 110.0);

        let cmds = view.pointer_down(
            props(&note, false),
            Region::Handle,
            Button::Primary,
            start,
            &mut listeners,
        );
        assert_eq!(cmds, vec![Command::BringToFront(note.id.clone())]);
        assert_eq!(listeners.holder(GestureKind::Drag), Some(&note.id));

        assert!(view.pointer_move(start.offset(30.0, -10.0)));
        assert_eq!(view.display_position(&note), Point::new(130.0, 90.0));

        let cmds = view.pointer_up(start.offset(50.0, 40.0), &mut listeners);
        assert_eq!(
            cmds,
            vec![
                Command::move_to(note.id.clone(), 150.0, 140.0),
                Command::BringToFront(note.id.clone()),
            ]
        );
        assert_eq!(view.mode(), &ViewMode::Viewing);
        assert!(listeners.is_idle());
    }

    #[test]
    fn test_resize_needs_selection() {
        let note = note();
        let mut view = NoteView::new(note.id.clone());
        let mut listeners = PointerListeners::new();
        let corner = Point::new(295.0, 295.0);

        view.pointer_down(
            props(&note, false),
            Region::ResizeGrip,
            Button::Primary,
            corner,
            &mut listeners,
        );
        assert_eq!(view.active_gesture(), None);

        view.pointer_down(
            props(&note, true),
            Region::ResizeGrip,
            Button::Primary,
            corner,
            &mut listeners,
        );
        assert_eq!(view.active_gesture(), Some(GestureKind::Resize));
    }

    #[test]
    fn test_resize_clamps_large_negative_delta() {
        let note = note();
        let mut view = NoteView::new(note.id.clone());
        let mut listeners = PointerListeners::new();
        let corner = Point::new(295.0, 295.0);

        view.pointer_down(
            props(&note, true),
            Region::ResizeGrip,
            Button::Primary,
            corner,
            &mut listeners,
        );
        for delta in [-10.0, -500.0, -1e9, 40.0, -75.0] {
            view.pointer_move(corner.offset(delta, delta));
            let (w, h) = view.display_size(&note);
            assert!(w >= MIN_NOTE_WIDTH && h >= MIN_NOTE_HEIGHT);
        }

        let cmds = view.pointer_up(corner.offset(-5000.0, -5000.0), &mut listeners);
        assert_eq!(cmds, vec![Command::resize(note.id.clone(), MIN_NOTE_WIDTH, MIN_NOTE_HEIGHT)]);
        assert!(listeners.is_idle());
    }

    #[test]
    fn test_no_second_gesture_while_active() {
        let note = note();
        let mut view = NoteView::new(note.id.clone());
        let mut listeners = PointerListeners::new();
        let start = Point::new(120.0, 110.0);

        view.pointer_down(
            props(&note, true),
            Region::Handle,
            Button::Primary,
            start,
            &mut listeners,
        );
        let cmds = view.pointer_down(
            props(&note, true),
            Region::ResizeGrip,
            Button::Primary,
            start,
            &mut listeners,
        );
        assert!(cmds.is_empty());
        assert_eq!(view.active_gesture(), Some(GestureKind::Drag));
        assert_eq!(listeners.holder(GestureKind::Resize), None);
    }

    #[test]
    fn test_pointer_cancel_releases_and_commits_last_preview() {
        let note = note();
        let mut view = NoteView::new(note.id.clone());
        let mut listeners = PointerListeners::new();
        let start = Point::new(120.0, 110.0);

        view.pointer_down(
            props(&note, false),
            Region::Handle,
            Button::Primary,
            start,
            &mut listeners,
        );
        view.pointer_move(start.offset(5.0, 5.0));
        let cmds = view.pointer_cancel(&mut listeners);

        assert_eq!(cmds[0], Command::move_to(note.id.clone(), 105.0, 105.0));
        assert!(listeners.is_idle());
        assert!(view.pointer_cancel(&mut listeners).is_empty());
    }

    #[test]
    fn test_double_click_on_handle_does_not_edit() {
        let note = note();
        let mut view = NoteView::new(note.id.clone());
        view.double_click(props(&note, true), Region::Handle);
        assert!(!view.is_editing());
        view.double_click(props(&note, true), Region::Body);
        assert!(view.is_editing());
        assert_eq!(view.display_content(&note), "committed");
    }

    #[test]
    fn test_editing_body_click_does_not_drag() {
        let note = note();
        let mut view = NoteView::new(note.id.clone());
        let mut listeners = PointerListeners::new();

        view.double_click(props(&note, true), Region::Body);
        view.pointer_down(
            props(&note, true),
            Region::Body,
            Button::Primary,
            Point::new(150.0, 200.0),
            &mut listeners,
        );
        assert!(view.is_editing());
        assert!(listeners.is_idle());
    }

    #[test]
    fn test_escape_discards_draft() {
        let note = note();
        let mut view = NoteView::new(note.id.clone());
        view.double_click(props(&note, true), Region::Body);
        assert!(view.edit_draft("scratch"));

        let cmds = view.key(Key::Escape, Modifiers::none());
        assert!(cmds.is_empty());
        assert_eq!(view.mode(), &ViewMode::Viewing);
        assert_eq!(view.display_content(&note), "committed");
    }

    #[test]
    fn test_command_enter_commits_plain_enter_does_not() {
        let note = note();
        let mut view = NoteView::new(note.id.clone());
        view.double_click(props(&note, true), Region::Body);
        view.edit_draft("new text");

        assert!(view.key(Key::Enter, Modifiers::none()).is_empty());
        assert!(view.is_editing());

        let cmds = view.key(Key::Enter, Modifiers::meta());
        assert_eq!(cmds, vec![Command::edit(note.id.clone(), "new text")]);
        assert!(!view.is_editing());
    }

    #[test]
    fn test_blur_commits() {
        let note = note();
        let mut view = NoteView::new(note.id.clone());
        view.double_click(props(&note, true), Region::Body);
        view.edit_draft("blurred");
        assert_eq!(view.blur(), vec![Command::edit(note.id.clone(), "blurred")]);
        assert!(view.blur().is_empty());
    }

    #[test]
    fn test_handle_press_while_editing_commits_then_drags() {
        let note = note();
        let mut view = NoteView::new(note.id.clone());
        let mut listeners = PointerListeners::new();
        view.double_click(props(&note, true), Region::Body);
        view.edit_draft("draft");

        let cmds = view.pointer_down(
            props(&note, true),
            Region::Handle,
            Button::Primary,
            Point::new(110.0, 110.0),
            &mut listeners,
        );
        assert_eq!(cmds[0], Command::edit(note.id.clone(), "draft"));
        assert_eq!(cmds[1], Command::BringToFront(note.id.clone()));
        assert_eq!(view.active_gesture(), Some(GestureKind::Drag));
    }

    #[test]
    fn test_context_menu() {
        let note = note();
        let mut view = NoteView::new(note.id.clone());
        let mut listeners = PointerListeners::new();
        let at = Point::new(150.0, 200.0);

        assert!(view.menu_delete().is_empty());

        view.pointer_down(props(&note, false), Region::Body, Button::Secondary, at, &mut listeners);
        assert!(view.is_menu_open());
        assert_eq!(view.menu_duplicate(), vec![Command::Duplicate(note.id.clone())]);
        assert!(!view.is_menu_open());

        view.pointer_down(props(&note, false), Region::Body, Button::Secondary, at, &mut listeners);
        view.outside_click();
        assert!(!view.is_menu_open());

        view.pointer_down(props(&note, false), Region::Body, Button::Secondary, at, &mut listeners);
        assert_eq!(view.menu_delete(), vec![Command::Delete(note.id.clone())]);
    }

    #[test]
    fn test_toolbar_only_when_selected() {
        let note = note();
        let mut view = NoteView::new(note.id.clone());

        assert!(view
            .toolbar(props(&note, false), ToolbarAction::Color(NoteColor::Red))
            .is_empty());
        assert_eq!(
            view.toolbar(props(&note, true), ToolbarAction::Color(NoteColor::Red)),
            vec![Command::Update {
                id: note.id.clone(),
                changes: NoteChanges::color(NoteColor::Red),
            }]
        );
        assert_eq!(
            view.toolbar(props(&note, true), ToolbarAction::Duplicate),
            vec![Command::Duplicate(note.id.clone())]
        );
    }

    #[test]
    fn test_delete_button() {
        let note = note();
        let mut view = NoteView::new(note.id.clone());
        let mut listeners = PointerListeners::new();
        let cmds = view.pointer_down(
            props(&note, false),
            Region::DeleteButton,
            Button::Primary,
            Point::new(290.0, 110.0),
            &mut listeners,
        );
        assert_eq!(cmds, vec![Command::Delete(note.id.clone())]);
    }
}
