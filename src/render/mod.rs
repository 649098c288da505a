//! Drawing: the renderer trait the host implements and the tree traversal
//! that drives it.

pub mod draw;

use crate::assets::{ItemStack, TextureId};
use crate::geometry::Rect;
use crate::style::Color;

pub use draw::{draw_tree, Palette};

/// Pixel drawing primitives provided by the host.
///
/// All rects are absolute. Calls arrive in painter's order: later calls draw
/// over earlier ones.
pub trait Renderer {
    /// Fill `rect` with a solid color.
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Draw `texture` scaled to `rect`.
    fn draw_texture(&mut self, texture: TextureId, rect: Rect);

    /// Draw a single line of text into `rect`.
    fn draw_text(&mut self, text: &str, rect: Rect, color: Color);

    /// Draw the host's default button pane, used when a button has no skin
    /// texture.
    fn draw_button_pane(&mut self, rect: Rect, pressed: bool);

    /// Draw an item stack inside an inventory slot.
    fn draw_item(&mut self, item: &ItemStack, rect: Rect);
}

impl<R: Renderer + ?Sized> Renderer for &mut R {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        (**self).fill_rect(rect, color);
    }

    fn draw_texture(&mut self, texture: TextureId, rect: Rect) {
        (**self).draw_texture(texture, rect);
    }

    fn draw_text(&mut self, text: &str, rect: Rect, color: Color) {
        (**self).draw_text(text, rect, color);
    }

    fn draw_button_pane(&mut self, rect: Rect, pressed: bool) {
        (**self).draw_button_pane(rect, pressed);
    }

    fn draw_item(&mut self, item: &ItemStack, rect: Rect) {
        (**self).draw_item(item, rect);
    }
}
