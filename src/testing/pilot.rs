//! Pilot: programmatic interaction with a headless menu.
//!
//! The `Pilot` wraps a [`FormspecMenu`] laid out in a fixed viewport and
//! provides methods to simulate pointer and keyboard input against a manual
//! clock, then draw into a [`RecordingRenderer`] for inspection.

use std::rc::Rc;
use std::time::{Duration, Instant};

use crate::dom::NodeId;
use crate::event::{InputEvent, Key, KeyEvent, Modifiers, MouseAction, MouseBtn, MouseEvent};
use crate::geometry::Size;
use crate::menu::{FormspecMenu, MenuConfig};

use super::fakes::{MemoryInventory, MonospaceFont, RecordingRenderer, TextureMap};
use super::snapshot::tree_to_string;

// ---------------------------------------------------------------------------
// Pilot
// ---------------------------------------------------------------------------

/// A headless menu driver for testing.
///
/// Every simulated event is stamped with the pilot's clock, which only moves
/// when [`advance`](Self::advance) is called.
///
/// # Examples
///
/// ```
/// use formspec::testing::Pilot;
///
/// let mut pilot = Pilot::new("beginrect[0,0,1,1]button[]endrect[]", 800, 600);
/// pilot.click(10, 10);
/// assert!(pilot.menu().router().focused().is_some());
/// ```
pub struct Pilot {
    menu: FormspecMenu,
    inventory: MemoryInventory,
    now: Instant,
}

impl Pilot {
    /// Create a menu for `source` with a default monospace font and no
    /// textures, and lay it out at `width` x `height`.
    pub fn new(source: &str, width: i32, height: i32) -> Self {
        Self::with_textures(source, TextureMap::new(), width, height)
    }

    /// Like [`new`](Self::new) with a texture table.
    pub fn with_textures(source: &str, textures: TextureMap, width: i32, height: i32) -> Self {
        let menu = FormspecMenu::new(source, Rc::new(MonospaceFont::default()), Box::new(textures));
        Self::from_menu(menu, width, height)
    }

    /// Drive an existing menu; it is regenerated at `width` x `height`.
    pub fn from_menu(mut menu: FormspecMenu, width: i32, height: i32) -> Self {
        menu.regenerate(Size::new(width, height));
        Self { menu, inventory: MemoryInventory::new(), now: Instant::now() }
    }

    /// Replace the menu config and regenerate (builder).
    pub fn with_config(self, config: MenuConfig) -> Self {
        let viewport = self.menu.viewport();
        let mut pilot = Self::from_menu(self.menu.with_config(config), viewport.width(), viewport.height());
        pilot.inventory = self.inventory;
        pilot
    }

    /// Inventory used by [`draw`](Self::draw) (builder).
    pub fn with_inventory(mut self, inventory: MemoryInventory) -> Self {
        self.inventory = inventory;
        self
    }

    // ── Clock ────────────────────────────────────────────────────────

    /// Move the clock forward.
    pub fn advance(&mut self, by: Duration) {
        self.now += by;
    }

    pub fn now(&self) -> Instant {
        self.now
    }

    // ── Input simulation ─────────────────────────────────────────────

    /// Send any event at the current clock.
    pub fn send(&mut self, event: InputEvent) -> bool {
        self.menu.route_event_at(&event, self.now)
    }

    /// Move the pointer to (x, y).
    pub fn move_to(&mut self, x: i32, y: i32) -> bool {
        self.mouse(MouseAction::Moved, x, y)
    }

    /// Press the primary button at (x, y).
    pub fn press(&mut self, x: i32, y: i32) -> bool {
        self.mouse(MouseAction::Down(MouseBtn::Left), x, y)
    }

    /// Release the primary button at (x, y).
    pub fn release(&mut self, x: i32, y: i32) -> bool {
        self.mouse(MouseAction::Up(MouseBtn::Left), x, y)
    }

    /// Press and release at (x, y) without advancing the clock.
    pub fn click(&mut self, x: i32, y: i32) {
        self.press(x, y);
        self.release(x, y);
    }

    fn mouse(&mut self, kind: MouseAction, x: i32, y: i32) -> bool {
        self.send(InputEvent::Mouse(MouseEvent::new(kind, x, y)))
    }

    /// Simulate a key press with no modifiers.
    pub fn press_key(&mut self, key: Key) -> bool {
        self.send(InputEvent::Key(KeyEvent::plain(key)))
    }

    /// Simulate a key press with the given modifiers.
    pub fn press_key_with(&mut self, key: Key, modifiers: Modifiers) -> bool {
        self.send(InputEvent::Key(KeyEvent::new(key, modifiers)))
    }

    /// Simulate typing each character of `text` as individual key presses.
    pub fn type_text(&mut self, text: &str) {
        for ch in text.chars() {
            self.press_key(Key::Char(ch));
        }
    }

    pub fn paste(&mut self, text: &str) -> bool {
        self.send(InputEvent::Paste(text.to_owned()))
    }

    /// Simulate a viewport resize.
    pub fn resize(&mut self, width: i32, height: i32) {
        self.send(InputEvent::Resize { width, height });
    }

    // ── Query ────────────────────────────────────────────────────────

    pub fn menu(&self) -> &FormspecMenu {
        &self.menu
    }

    pub fn menu_mut(&mut self) -> &mut FormspecMenu {
        &mut self.menu
    }

    pub fn is_open(&self) -> bool {
        self.menu.is_open()
    }

    /// First node, in pre-order, whose text equals `text`.
    pub fn find_text(&self, text: &str) -> Option<NodeId> {
        let tree = self.menu.tree()?;
        tree.walk_depth_first(tree.root())
            .into_iter()
            .find(|&id| tree.get(id).is_some_and(|element| element.text.is_some() && element.text_str() == text))
    }

    /// Text of the focused node, if any.
    pub fn focused_text(&self) -> Option<&str> {
        let tree = self.menu.tree()?;
        let id = self.menu.router().focused()?;
        tree.get(id).map(|element| element.text_str())
    }

    /// Draw the menu into a fresh recorder.
    pub fn draw(&self) -> RecordingRenderer {
        let mut renderer = RecordingRenderer::new();
        self.menu.draw(&mut renderer, &self.inventory);
        renderer
    }

    /// [`tree_to_string`] of the current tree, or an empty string.
    pub fn snapshot(&self) -> String {
        self.menu.tree().map(tree_to_string).unwrap_or_default()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
