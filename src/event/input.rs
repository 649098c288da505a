//! Input vocabulary consumed by the menu.
//!
//! Hosts built on crossterm can feed events straight in through the `From`
//! impls; everyone else constructs [`InputEvent`]s directly. Pointer
//! coordinates are pixels in the same space as the resolved layout.

use crossterm::event as ct;

use crate::geometry::Point;

// ---------------------------------------------------------------------------
// Key
// ---------------------------------------------------------------------------

/// Keyboard key. Only keys that edit text or close the menu are named.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Escape,
    Tab,
    Backspace,
    Delete,
    Left,
    Right,
    Home,
    End,
    /// Any key the menu has no use for.
    Unknown,
}

// ---------------------------------------------------------------------------
// Modifiers
// ---------------------------------------------------------------------------

/// Held modifier keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers { shift: false, ctrl: false, alt: false };
    pub const SHIFT: Modifiers = Modifiers { shift: true, ctrl: false, alt: false };
    pub const CTRL: Modifiers = Modifiers { shift: false, ctrl: true, alt: false };
    pub const ALT: Modifiers = Modifiers { shift: false, ctrl: false, alt: true };

    /// Ctrl or Alt is held, so a character key is a shortcut rather than text.
    pub fn is_command(self) -> bool {
        self.ctrl || self.alt
    }
}

// ---------------------------------------------------------------------------
// KeyEvent
// ---------------------------------------------------------------------------

/// A key transition with its modifiers.
///
/// Only presses are routed; releases are dropped by the router. Auto-repeat
/// counts as a press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub code: Key,
    pub modifiers: Modifiers,
    pub pressed: bool,
}

impl KeyEvent {
    /// Create a key press.
    pub fn new(code: Key, modifiers: Modifiers) -> Self {
        Self { code, modifiers, pressed: true }
    }

    /// Create a key release.
    pub fn release(code: Key, modifiers: Modifiers) -> Self {
        Self { code, modifiers, pressed: false }
    }

    /// A key event with no modifiers.
    pub fn plain(code: Key) -> Self {
        Self::new(code, Modifiers::NONE)
    }
}

// ---------------------------------------------------------------------------
// MouseBtn / MouseAction / MouseEvent
// ---------------------------------------------------------------------------

/// Mouse button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseBtn {
    Left,
    Right,
    Middle,
}

/// Mouse action kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseAction {
    Down(MouseBtn),
    Up(MouseBtn),
    Drag(MouseBtn),
    Moved,
    /// Any wheel movement; formspecs do not scroll.
    Scroll,
}

/// A pointer event at a pixel position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MouseEvent {
    pub kind: MouseAction,
    pub x: i32,
    pub y: i32,
    pub modifiers: Modifiers,
}

impl MouseEvent {
    /// Create a mouse event with no modifiers.
    pub fn new(kind: MouseAction, x: i32, y: i32) -> Self {
        Self { kind, x, y, modifiers: Modifiers::NONE }
    }

    /// Pointer position.
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

// ---------------------------------------------------------------------------
// InputEvent
// ---------------------------------------------------------------------------

/// Top-level input event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    /// The menu's viewport changed size.
    Resize { width: i32, height: i32 },
    FocusGained,
    FocusLost,
    /// Bracketed paste.
    Paste(String),
}

// ---------------------------------------------------------------------------
// From<crossterm> conversions
// ---------------------------------------------------------------------------

impl From<ct::KeyModifiers> for Modifiers {
    fn from(m: ct::KeyModifiers) -> Self {
        Modifiers {
            shift: m.contains(ct::KeyModifiers::SHIFT),
            ctrl: m.contains(ct::KeyModifiers::CONTROL),
            alt: m.contains(ct::KeyModifiers::ALT),
        }
    }
}

impl From<ct::KeyCode> for Key {
    fn from(code: ct::KeyCode) -> Self {
        match code {
            ct::KeyCode::Char(c) => Key::Char(c),
            ct::KeyCode::Enter => Key::Enter,
            ct::KeyCode::Esc => Key::Escape,
            ct::KeyCode::Tab => Key::Tab,
            ct::KeyCode::Backspace => Key::Backspace,
            ct::KeyCode::Delete => Key::Delete,
            ct::KeyCode::Left => Key::Left,
            ct::KeyCode::Right => Key::Right,
            ct::KeyCode::Home => Key::Home,
            ct::KeyCode::End => Key::End,
            _ => Key::Unknown,
        }
    }
}

impl From<ct::KeyEvent> for KeyEvent {
    fn from(ke: ct::KeyEvent) -> Self {
        KeyEvent {
            code: ke.code.into(),
            modifiers: ke.modifiers.into(),
            pressed: ke.kind != ct::KeyEventKind::Release,
        }
    }
}

impl From<ct::MouseButton> for MouseBtn {
    fn from(b: ct::MouseButton) -> Self {
        match b {
            ct::MouseButton::Left => MouseBtn::Left,
            ct::MouseButton::Right => MouseBtn::Right,
            ct::MouseButton::Middle => MouseBtn::Middle,
        }
    }
}

impl From<ct::MouseEventKind> for MouseAction {
    fn from(kind: ct::MouseEventKind) -> Self {
        match kind {
            ct::MouseEventKind::Down(b) => MouseAction::Down(b.into()),
            ct::MouseEventKind::Up(b) => MouseAction::Up(b.into()),
            ct::MouseEventKind::Drag(b) => MouseAction::Drag(b.into()),
            ct::MouseEventKind::Moved => MouseAction::Moved,
            ct::MouseEventKind::ScrollUp
            | ct::MouseEventKind::ScrollDown
            | ct::MouseEventKind::ScrollLeft
            | ct::MouseEventKind::ScrollRight => MouseAction::Scroll,
        }
    }
}

/// Mouse cells and resize dimensions are passed through unscaled, so this is
/// only correct for hosts whose terminal cells are the viewport's units.
/// Pixel hosts should build [`MouseEvent`]s and `Resize` events themselves.
impl From<ct::Event> for InputEvent {
    fn from(event: ct::Event) -> Self {
        match event {
            ct::Event::Key(ke) => InputEvent::Key(ke.into()),
            ct::Event::Mouse(me) => InputEvent::Mouse(MouseEvent {
                kind: me.kind.into(),
                x: i32::from(me.column),
                y: i32::from(me.row),
                modifiers: me.modifiers.into(),
            }),
            ct::Event::Resize(w, h) => InputEvent::Resize {
                width: i32::from(w),
                height: i32::from(h),
            },
            ct::Event::FocusGained => InputEvent::FocusGained,
            ct::Event::FocusLost => InputEvent::FocusLost,
            ct::Event::Paste(s) => InputEvent::Paste(s),
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
