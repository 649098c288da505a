//! In-memory stand-ins for the host collaborators.

use std::collections::HashMap;

use crate::assets::{InventoryLocation, InventorySource, ItemStack, LookupError, TextureId, TextureSource};
use crate::geometry::{Rect, Size};
use crate::render::Renderer;
use crate::style::Color;
use crate::text::FontMetrics;

// ---------------------------------------------------------------------------
// MonospaceFont
// ---------------------------------------------------------------------------

/// Every character is `char_width` wide; non-empty text is `line_height`
/// tall. The caret is one character cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonospaceFont {
    pub char_width: i32,
    pub line_height: i32,
}

impl MonospaceFont {
    pub fn new(char_width: i32, line_height: i32) -> Self {
        Self { char_width, line_height }
    }
}

impl Default for MonospaceFont {
    fn default() -> Self {
        Self::new(8, 16)
    }
}

impl FontMetrics for MonospaceFont {
    fn measure(&self, text: &str) -> Size {
        let chars = text.chars().count() as i32;
        let height = if chars == 0 { 0 } else { self.line_height };
        Size::new(chars * self.char_width, height)
    }

    fn caret_size(&self) -> Size {
        Size::new(self.char_width, self.line_height)
    }
}

// ---------------------------------------------------------------------------
// TextureMap
// ---------------------------------------------------------------------------

/// Texture names mapped to fixed ids.
#[derive(Debug, Clone, Default)]
pub struct TextureMap {
    textures: HashMap<String, TextureId>,
}

impl TextureMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `name` as texture `id` (builder).
    pub fn with(mut self, name: impl Into<String>, id: u32) -> Self {
        self.insert(name, id);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, id: u32) {
        self.textures.insert(name.into(), TextureId(id));
    }
}

impl TextureSource for TextureMap {
    fn texture(&self, name: &str) -> Option<TextureId> {
        self.textures.get(name).copied()
    }
}

// ---------------------------------------------------------------------------
// MemoryInventory
// ---------------------------------------------------------------------------

/// Inventories keyed by location, each holding named lists.
#[derive(Debug, Clone, Default)]
pub struct MemoryInventory {
    inventories: HashMap<InventoryLocation, HashMap<String, Vec<ItemStack>>>,
}

impl MemoryInventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a list (builder).
    pub fn with_list(mut self, location: InventoryLocation, name: impl Into<String>, items: Vec<ItemStack>) -> Self {
        self.set_list(location, name, items);
        self
    }

    pub fn set_list(&mut self, location: InventoryLocation, name: impl Into<String>, items: Vec<ItemStack>) {
        self.inventories.entry(location).or_default().insert(name.into(), items);
    }
}

impl InventorySource for MemoryInventory {
    fn list(&self, location: &InventoryLocation, name: &str) -> Result<&[ItemStack], LookupError> {
        let lists = self
            .inventories
            .get(location)
            .ok_or_else(|| LookupError::LocationNotFound(location.clone()))?;
        lists
            .get(name)
            .map(Vec::as_slice)
            .ok_or_else(|| LookupError::ListNotFound(name.to_owned()))
    }
}

// ---------------------------------------------------------------------------
// RecordingRenderer
// ---------------------------------------------------------------------------

/// One call made on a [`Renderer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawCommand {
    FillRect { rect: Rect, color: Color },
    Texture { texture: TextureId, rect: Rect },
    Text { text: String, rect: Rect, color: Color },
    ButtonPane { rect: Rect, pressed: bool },
    Item { item: ItemStack, rect: Rect },
}

/// Renderer that records every call in order.
#[derive(Debug, Clone, Default)]
pub struct RecordingRenderer {
    pub commands: Vec<DrawCommand>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Text of every `draw_text` call, caret glyphs included.
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Every item drawn, with its slot rect.
    pub fn items(&self) -> Vec<(&ItemStack, Rect)> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                DrawCommand::Item { item, rect } => Some((item, *rect)),
                _ => None,
            })
            .collect()
    }

    /// Number of `fill_rect` calls with `color`.
    pub fn fills_of(&self, color: Color) -> usize {
        self.commands
            .iter()
            .filter(|command| matches!(command, DrawCommand::FillRect { color: c, .. } if *c == color))
            .count()
    }
}

impl Renderer for RecordingRenderer {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::FillRect { rect, color });
    }

    fn draw_texture(&mut self, texture: TextureId, rect: Rect) {
        self.commands.push(DrawCommand::Texture { texture, rect });
    }

    fn draw_text(&mut self, text: &str, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::Text { text: text.to_owned(), rect, color });
    }

    fn draw_button_pane(&mut self, rect: Rect, pressed: bool) {
        self.commands.push(DrawCommand::ButtonPane { rect, pressed });
    }

    fn draw_item(&mut self, item: &ItemStack, rect: Rect) {
        self.commands.push(DrawCommand::Item { item: item.clone(), rect });
    }
}

// ===========================================================================
// Tests
// ===========================================================================
