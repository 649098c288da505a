//! Painter's-order traversal of a laid-out element tree.
//!
//! Each node paints its own decoration, then its children, then its text, so
//! labels stay on top of nested backgrounds. Inventory slots come last.

use tracing::warn;

use crate::assets::{InventorySource, ItemStack};
use crate::dom::{ButtonState, Element, ElementKind, ElementTree, InventoryGrid, NodeId};
use crate::geometry::Rect;
use crate::style::{Color, StyleSpec};

use super::Renderer;

/// Glyph drawn at the caret rect of a focused input.
const CARET_GLYPH: &str = "_";

/// Colors used for text that styles do not cover.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub text: Color,
    pub caret: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self { text: Color::WHITE, caret: Color::RED }
    }
}

/// Draw every node of `tree`, root first.
///
/// The tree must have been resolved; absolute rects are used as-is.
pub fn draw_tree(
    tree: &ElementTree,
    renderer: &mut dyn Renderer,
    inventory: &dyn InventorySource,
    palette: &Palette,
) {
    let mut painter = Painter { tree, renderer, inventory, palette };
    painter.node(tree.root());
}

struct Painter<'a> {
    tree: &'a ElementTree,
    renderer: &'a mut dyn Renderer,
    inventory: &'a dyn InventorySource,
    palette: &'a Palette,
}

impl Painter<'_> {
    fn node(&mut self, id: NodeId) {
        let tree = self.tree;
        let Some(element) = tree.get(id) else {
            return;
        };

        match &element.kind {
            ElementKind::Button(state) => self.button(element.absolute, &element.style, *state),
            _ => self.decoration(element),
        }
        for &child in tree.children(id) {
            self.node(child);
        }
        self.text(element);
        if let ElementKind::Inventory(grid) = &element.kind {
            self.inventory(grid, &element.style);
        }
    }

    fn decoration(&mut self, element: &Element) {
        if let Some(color) = element.background {
            self.renderer.fill_rect(element.absolute, color);
        }
        if let Some(texture) = element.image {
            self.renderer.draw_texture(texture, element.absolute);
        }
    }

    /// Pressed beats hovered beats standard. A missing hover skin falls back
    /// to the standard one; a missing skin falls back to the host pane.
    fn button(&mut self, rect: Rect, style: &StyleSpec, state: ButtonState) {
        let skin = if state.pressed {
            style.button_pressed
        } else if state.hovered {
            style.button_hover.or(style.button_standard)
        } else {
            style.button_standard
        };
        match skin {
            Some(texture) => self.renderer.draw_texture(texture, rect),
            None => self.renderer.draw_button_pane(rect, state.pressed),
        }
    }

    fn text(&mut self, element: &Element) {
        let Some(run) = &element.text else {
            return;
        };
        for line in run.lines().iter().filter(|line| !line.text.is_empty()) {
            self.renderer.draw_text(&line.text, line.rect, self.palette.text);
        }
        if let Some(caret) = run.caret() {
            self.renderer.draw_text(CARET_GLYPH, caret, self.palette.caret);
        }
    }

    fn inventory(&mut self, grid: &InventoryGrid, style: &StyleSpec) {
        let Some(geometry) = grid.geometry else {
            return;
        };
        let source = self.inventory;
        let items = match source.list(&grid.location, &grid.list) {
            Ok(items) => items,
            Err(error) => {
                warn!(%error, "inventory grid not drawn");
                return;
            }
        };
        for (item, rect) in items.iter().zip(geometry.cells(items.len())) {
            self.slot(item, rect, style);
        }
    }

    /// Background inset by the border, four border strips around it, then
    /// the item.
    fn slot(&mut self, item: &ItemStack, rect: Rect, style: &StyleSpec) {
        let border = style.border_width;
        let inner = rect.shrink(border);
        self.renderer.fill_rect(inner, style.inventory_background);

        if border > 0 {
            let Rect { x0, y0, x1, y1 } = inner;
            let color = style.inventory_border;
            self.renderer.fill_rect(Rect::new(x0 - border, y0 - border, x1 + border, y0), color);
            self.renderer.fill_rect(Rect::new(x0 - border, y1, x1 + border, y1 + border), color);
            self.renderer.fill_rect(Rect::new(x0 - border, y0, x0, y1), color);
            self.renderer.fill_rect(Rect::new(x1, y0, x1 + border, y1), color);
        }

        if !item.is_empty() {
            self.renderer.draw_item(item, inner);
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
