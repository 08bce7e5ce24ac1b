// src/view/surface.rs
//! The rendering surface: one board, one view per note, shared listeners.

use std::collections::HashMap;

use tracing::debug;

use crate::board::{Board, Command};
use crate::entity::{FontFamily, FontSize, NoteColor, NoteId};
use crate::error::Result;

use super::hit::{hit_test, Region};
use super::listeners::{GestureKind, PointerListeners};
use super::note_view::{NoteProps, NoteView, ToolbarAction};
use super::{Button, Key, Modifiers, Point};

/// Everything needed to draw one note this frame.
#[derive(Debug, Clone, PartialEq)]
pub struct NoteFrame {
    pub id: NoteId,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub z_index: i64,
    pub color: NoteColor,
    /// Hex fill for `color`
    pub fill: &'static str,
    pub font_size: FontSize,
    pub font_family: FontFamily,
    /// CSS stack for `font_family`
    pub font_stack: &'static str,
    pub content: String,
    pub selected: bool,
    pub mode: &'static str,
}

pub struct Surface {
    board: Board,
    views: HashMap<NoteId, NoteView>,
    listeners: PointerListeners,
}

impl Surface {
    pub fn new(board: Board) -> Self {
        let mut surface = Self {
            board,
            views: HashMap::new(),
            listeners: PointerListeners::new(),
        };
        surface.sync_views();
        surface
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn view(&self, id: &NoteId) -> Option<&NoteView> {
        self.views.get(id)
    }

    pub fn listeners(&self) -> &PointerListeners {
        &self.listeners
    }

    /// Note whose editor is open, if any.
    pub fn editing(&self) -> Option<&NoteId> {
        self.views.values().find(|v| v.is_editing()).map(|v| v.id())
    }

    /// Mount views for new notes, drop views (and their listeners) for notes
    /// that are gone.
    fn sync_views(&mut self) {
        let board = &self.board;
        let listeners = &mut self.listeners;
        self.views.retain(|id, _| {
            let keep = board.contains(id);
            if !keep {
                listeners.detach(GestureKind::Drag, id);
                listeners.detach(GestureKind::Resize, id);
            }
            keep
        });
        for note in self.board.notes() {
            self.views
                .entry(note.id.clone())
                .or_insert_with(|| NoteView::new(note.id.clone()));
        }
    }

    /// Forget every transient view state, used when the collection is replaced.
    fn remount(&mut self) {
        self.views.clear();
        self.listeners = PointerListeners::new();
        self.sync_views();
    }

    /// Apply commands to the board in order and return them.
    pub fn dispatch(&mut self, commands: Vec<Command>) -> Vec<Command> {
        for command in &commands {
            debug!(?command, "dispatch");
            self.board.apply(command.clone());
        }
        self.sync_views();
        commands
    }

    /// End any gesture still holding listeners before a new press.
    fn release_stray_gestures(&mut self) -> Vec<Command> {
        let mut commands = Vec::new();
        for holder in self.listeners.holders() {
            match self.views.get_mut(&holder) {
                Some(view) => commands.extend(view.pointer_cancel(&mut self.listeners)),
                None => {
                    self.listeners.detach(GestureKind::Drag, &holder);
                    self.listeners.detach(GestureKind::Resize, &holder);
                }
            }
        }
        commands
    }

    /// A press anywhere but `target` blurs open editors and closes menus.
    fn defocus_others(&mut self, target: Option<&NoteId>) -> Vec<Command> {
        let mut commands = Vec::new();
        for (id, view) in self.views.iter_mut() {
            if Some(id) == target {
                continue;
            }
            commands.extend(view.blur());
            view.outside_click();
        }
        commands
    }

    // ========== Toolbar / board-level actions ==========

    /// Toolbar "New Note".
    pub fn create_note(&mut self) -> NoteId {
        let mut commands = self.release_stray_gestures();
        commands.extend(self.defocus_others(None));
        self.dispatch(commands);
        let id = self.board.create_note();
        self.sync_views();
        id
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.board.set_search_term(term);
    }

    pub fn import_snapshot(&mut self, raw: &str) -> Result<usize> {
        let count = self.board.import_snapshot(raw)?;
        self.remount();
        Ok(count)
    }

    pub fn clear_all(&mut self, confirm: impl FnOnce(usize) -> bool) -> bool {
        let cleared = self.board.clear_all(confirm);
        if cleared {
            self.remount();
        }
        cleared
    }

    // ========== Pointer ==========

    /// Topmost visible note under `at` and the region hit.
    pub fn hit(&self, at: Point) -> Option<(NoteId, Region)> {
        self.board
            .stacked_notes()
            .into_iter()
            .rev()
            .find_map(|note| {
                hit_test(note, at, self.board.is_selected(&note.id)).map(|r| (note.id.clone(), r))
            })
    }

    /// Pointer pressed at a canvas point.
    pub fn pointer_down(&mut self, at: Point, button: Button) -> Vec<Command> {
        match self.hit(at) {
            Some((id, region)) => self.press(&id, region, button, at),
            None => {
                let mut commands = self.release_stray_gestures();
                commands.extend(self.defocus_others(None));
                if button == Button::Primary {
                    commands.push(Command::Select(None));
                }
                self.dispatch(commands)
            }
        }
    }

    /// Pointer pressed on a specific part of a specific note.
    pub fn press(
        &mut self,
        id: &NoteId,
        region: Region,
        button: Button,
        at: Point,
    ) -> Vec<Command> {
        self.sync_views();
        let mut commands = self.release_stray_gestures();
        commands.extend(self.defocus_others(Some(id)));

        if let (Some(note), Some(view)) = (self.board.get(id), self.views.get_mut(id)) {
            let props = NoteProps {
                note,
                selected: self.board.is_selected(id),
            };
            commands.extend(view.pointer_down(props, region, button, at, &mut self.listeners));
        }
        self.dispatch(commands)
    }

    /// Forward a pointer move to whichever notes hold gesture listeners.
    pub fn pointer_move(&mut self, at: Point) -> bool {
        let mut moved = false;
        for holder in self.listeners.holders() {
            if let Some(view) = self.views.get_mut(&holder) {
                moved |= view.pointer_move(at);
            }
        }
        moved
    }

    pub fn pointer_up(&mut self, at: Point) -> Vec<Command> {
        let mut commands = Vec::new();
        for holder in self.listeners.holders() {
            if let Some(view) = self.views.get_mut(&holder) {
                commands.extend(view.pointer_up(at, &mut self.listeners));
            }
        }
        self.dispatch(commands)
    }

    pub fn pointer_cancel(&mut self) -> Vec<Command> {
        let commands = self.release_stray_gestures();
        self.dispatch(commands)
    }

    pub fn double_click(&mut self, at: Point) -> Vec<Command> {
        match self.hit(at) {
            Some((id, region)) => self.double_click_on(&id, region),
            None => Vec::new(),
        }
    }

    pub fn double_click_on(&mut self, id: &NoteId, region: Region) -> Vec<Command> {
        let mut commands = Vec::new();
        if let (Some(note), Some(view)) = (self.board.get(id), self.views.get_mut(id)) {
            let props = NoteProps {
                note,
                selected: self.board.is_selected(id),
            };
            commands = view.double_click(props, region);
        }
        self.dispatch(commands)
    }

    // ========== Keyboard / editor ==========

    pub fn edit_draft(&mut self, id: &NoteId, text: impl Into<String>) -> bool {
        self.views
            .get_mut(id)
            .map(|view| view.edit_draft(text))
            .unwrap_or(false)
    }

    /// Key press delivered to the focused editor.
    pub fn key(&mut self, key: Key, modifiers: Modifiers) -> Vec<Command> {
        let commands = match self.views.values_mut().find(|v| v.is_editing()) {
            Some(view) => view.key(key, modifiers),
            None => Vec::new(),
        };
        self.dispatch(commands)
    }

    pub fn blur(&mut self, id: &NoteId) -> Vec<Command> {
        let commands = self.views.get_mut(id).map(|v| v.blur()).unwrap_or_default();
        self.dispatch(commands)
    }

    // ========== Menus ==========

    pub fn menu_duplicate(&mut self, id: &NoteId) -> Vec<Command> {
        let commands = self
            .views
            .get_mut(id)
            .map(|v| v.menu_duplicate())
            .unwrap_or_default();
        self.dispatch(commands)
    }

    pub fn menu_delete(&mut self, id: &NoteId) -> Vec<Command> {
        let commands = self
            .views
            .get_mut(id)
            .map(|v| v.menu_delete())
            .unwrap_or_default();
        self.dispatch(commands)
    }

    /// Close every open context menu without selecting anything.
    pub fn dismiss_menus(&mut self) {
        for view in self.views.values_mut() {
            view.outside_click();
        }
    }

    pub fn toolbar(&mut self, id: &NoteId, action: ToolbarAction) -> Vec<Command> {
        let mut commands = Vec::new();
        if let (Some(note), Some(view)) = (self.board.get(id), self.views.get_mut(id)) {
            let props = NoteProps {
                note,
                selected: self.board.is_selected(id),
            };
            commands = view.toolbar(props, action);
        }
        self.dispatch(commands)
    }

    // ========== Rendering ==========

    /// Visible notes in paint order, with in-flight gesture previews and
    /// editor drafts applied.
    pub fn frames(&self) -> Vec<NoteFrame> {
        self.board
            .stacked_notes()
            .into_iter()
            .map(|note| {
                let view = self.views.get(&note.id);
                let position = view
                    .map(|v| v.display_position(note))
                    .unwrap_or(Point::new(note.x, note.y));
                let (width, height) = view
                    .map(|v| v.display_size(note))
                    .unwrap_or((note.width, note.height));
                let content = view
                    .map(|v| v.display_content(note))
                    .unwrap_or(&note.content)
                    .to_string();
                NoteFrame {
                    id: note.id.clone(),
                    x: position.x,
                    y: position.y,
                    width,
                    height,
                    z_index: note.z_index,
                    color: note.color,
                    fill: note.color.hex(),
                    font_size: note.font_size,
                    font_family: note.font_family,
                    font_stack: note.font_family.stack(),
                    content,
                    selected: self.board.is_selected(&note.id),
                    mode: view.map(|v| v.mode().label()).unwrap_or("viewing"),
                }
            })
            .collect()
    }
}
