//! Node types: NodeId, Element, ElementKind.
//!
//! An [`Element`] carries everything the layout, draw and event passes need.
//! Its [`ElementKind`] is the closed set of behaviours a node can have; the
//! capability methods on `Element` (`hover`, `press`, `key_down`, ...) are
//! no-ops for kinds that don't react to them.

use std::rc::Rc;

use slotmap::new_key_type;

use crate::assets::{InventoryLocation, TextureId};
use crate::event::input::{Key, KeyEvent};
use crate::geometry::{FracRect, Rect};
use crate::layout::grid::GridGeometry;
use crate::style::{Color, StyleSpec};
use crate::text::run::byte_offset;
use crate::text::TextRun;

new_key_type! {
    /// Unique identifier for an element. Copy, lightweight (u64).
    pub struct NodeId;
}

// ---------------------------------------------------------------------------
// Kind-specific state
// ---------------------------------------------------------------------------

/// Pointer state of a button.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ButtonState {
    pub hovered: bool,
    pub pressed: bool,
}

/// Editing state of a text input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    /// Char offset of the caret in the input's text.
    pub caret: usize,
    pub focused: bool,
}

impl InputState {
    /// Apply a key press to `run`. Returns whether the key did anything.
    fn edit(&mut self, run: &mut TextRun, key: &KeyEvent) -> bool {
        let len = run.char_len();
        self.caret = self.caret.min(len);
        match key.code {
            Key::Backspace => {
                if self.caret == 0 {
                    return false;
                }
                self.caret -= 1;
                remove_char(run, self.caret);
            }
            Key::Delete => {
                if self.caret >= len {
                    return false;
                }
                remove_char(run, self.caret);
            }
            Key::Enter => self.insert(run, "\n"),
            Key::Left => self.caret = self.caret.saturating_sub(1),
            Key::Right => self.caret = (self.caret + 1).min(len),
            Key::Home => self.caret = 0,
            Key::End => self.caret = len,
            Key::Char(ch) if !ch.is_control() && !key.modifiers.is_command() => {
                let mut buf = [0u8; 4];
                self.insert(run, ch.encode_utf8(&mut buf));
            }
            _ => return false,
        }
        true
    }

    fn insert(&mut self, run: &mut TextRun, s: &str) {
        let at = byte_offset(run.text(), self.caret);
        run.text_mut().insert_str(at, s);
        self.caret += s.chars().count();
    }
}

fn remove_char(run: &mut TextRun, index: usize) {
    let text = run.text_mut();
    let begin = byte_offset(text, index);
    let end = byte_offset(text, index + 1);
    text.drain(begin..end);
}

/// An inventory list laid out as a grid of slots.
#[derive(Debug, Clone, PartialEq)]
pub struct InventoryGrid {
    pub location: InventoryLocation,
    pub list: String,
    pub columns: u32,
    pub rows: u32,
    /// Cell geometry, computed during layout.
    pub geometry: Option<GridGeometry>,
}

impl InventoryGrid {
    pub fn new(location: InventoryLocation, list: impl Into<String>, columns: u32, rows: u32) -> Self {
        Self { location, list: list.into(), columns, rows, geometry: None }
    }
}

/// The behaviour a node has.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ElementKind {
    #[default]
    Container,
    Button(ButtonState),
    Input(InputState),
    Inventory(InventoryGrid),
}

impl ElementKind {
    /// Lowercase name, as written in formspec documents.
    pub fn name(&self) -> &'static str {
        match self {
            ElementKind::Container => "container",
            ElementKind::Button(_) => "button",
            ElementKind::Input(_) => "input",
            ElementKind::Inventory(_) => "inventory",
        }
    }
}

/// A node was already promoted away from `Container`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("element is already a {current}, cannot become a {requested}")]
pub struct PromoteError {
    pub current: &'static str,
    pub requested: &'static str,
}

// ---------------------------------------------------------------------------
// Element
// ---------------------------------------------------------------------------

/// A single node of the element tree.
#[derive(Debug, Clone)]
pub struct Element {
    /// Parent-relative rect.
    pub rect: FracRect,
    /// Width / height ratio the absolute rect is clamped to.
    pub aspect: Option<f32>,
    /// Absolute rect. Only meaningful after layout.
    pub absolute: Rect,
    pub background: Option<Color>,
    pub image: Option<TextureId>,
    pub text: Option<TextRun>,
    pub style: Rc<StyleSpec>,
    pub kind: ElementKind,
}

impl Element {
    /// A container covering its whole parent.
    pub fn new(style: Rc<StyleSpec>) -> Self {
        Self {
            rect: FracRect::FULL,
            aspect: None,
            absolute: Rect::EMPTY,
            background: None,
            image: None,
            text: None,
            style,
            kind: ElementKind::Container,
        }
    }

    /// Set the parent-relative rect (builder).
    pub fn with_rect(mut self, rect: FracRect) -> Self {
        self.rect = rect;
        self
    }

    /// Replace the text payload. Inputs move their caret to the end.
    pub fn set_text(&mut self, text: impl Into<String>) {
        let run = TextRun::new(text);
        if let ElementKind::Input(state) = &mut self.kind {
            state.caret = run.char_len();
        }
        self.text = Some(run);
    }

    /// Turn a container into another kind.
    ///
    /// Inputs always own a text run; promoting creates an empty one if needed.
    pub fn promote(&mut self, kind: ElementKind) -> Result<(), PromoteError> {
        if !matches!(self.kind, ElementKind::Container) {
            return Err(PromoteError { current: self.kind.name(), requested: kind.name() });
        }
        self.kind = kind;
        if let ElementKind::Input(state) = &mut self.kind {
            let run = self.text.get_or_insert_with(TextRun::default);
            state.caret = run.char_len();
        }
        Ok(())
    }

    /// Whether hit testing can stop at this node.
    pub fn is_interactive(&self) -> bool {
        matches!(self.kind, ElementKind::Button(_) | ElementKind::Input(_))
    }

    /// Re-wrap the text run into the absolute rect.
    pub fn rebuild_text(&mut self) {
        let caret = match self.kind {
            ElementKind::Input(InputState { caret, focused: true }) => Some(caret),
            _ => None,
        };
        if let Some(run) = &mut self.text {
            run.rebuild(self.absolute, &self.style, caret);
        }
    }

    // ── Capabilities ─────────────────────────────────────────────────

    /// Pointer entered (`true`) or left (`false`) the node.
    pub fn hover(&mut self, hovered: bool) {
        if let ElementKind::Button(state) = &mut self.kind {
            state.hovered = hovered;
        }
    }

    /// Primary button went down on the node.
    pub fn press(&mut self) {
        if let ElementKind::Button(state) = &mut self.kind {
            state.pressed = true;
        }
    }

    /// Primary button went up, or the press was cancelled.
    pub fn release(&mut self) {
        if let ElementKind::Button(state) = &mut self.kind {
            state.pressed = false;
        }
    }

    /// Keyboard focus moved onto (`true`) or away from (`false`) the node.
    pub fn focus_change(&mut self, focused: bool) {
        if let ElementKind::Input(state) = &mut self.kind {
            state.focused = focused;
            self.rebuild_text();
        }
    }

    /// Edit an input's text. Returns whether the key changed anything.
    pub fn key_down(&mut self, key: &KeyEvent) -> bool {
        let ElementKind::Input(state) = &mut self.kind else {
            return false;
        };
        let run = self.text.get_or_insert_with(TextRun::default);
        let changed = state.edit(run, key);
        self.rebuild_text();
        changed
    }

    /// Insert every printable character of `text` at the caret.
    pub fn paste(&mut self, text: &str) -> bool {
        let ElementKind::Input(state) = &mut self.kind else {
            return false;
        };
        let run = self.text.get_or_insert_with(TextRun::default);
        let mut changed = false;
        for ch in text.chars().filter(|c| !c.is_control()) {
            let mut buf = [0u8; 4];
            state.insert(run, ch.encode_utf8(&mut buf));
            changed = true;
        }
        self.rebuild_text();
        changed
    }

    /// Caret offset if this is an input.
    pub fn caret(&self) -> Option<usize> {
        match self.kind {
            ElementKind::Input(state) => Some(state.caret),
            _ => None,
        }
    }

    /// The logical text, or `""` when the node has none.
    pub fn text_str(&self) -> &str {
        self.text.as_ref().map_or("", TextRun::text)
    }
}
