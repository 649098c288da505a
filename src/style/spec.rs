//! The per-node style record.

use std::fmt;
use std::rc::Rc;

use crate::assets::TextureId;
use crate::text::FontMetrics;

use super::align::TextAlign;
use super::color::Color;

/// Visual style shared by a node and the descendants that inherit it.
///
/// Nodes hold an `Rc<StyleSpec>`. Restyling a node clones the record and
/// installs the clone on that node only, so siblings and ancestors never see
/// the change.
#[derive(Clone)]
pub struct StyleSpec {
    /// Font used to measure and draw text.
    pub font: Rc<dyn FontMetrics>,
    pub button_standard: Option<TextureId>,
    pub button_hover: Option<TextureId>,
    pub button_pressed: Option<TextureId>,
    /// Fill color of inventory slots.
    pub inventory_background: Color,
    /// Frame color of inventory slots.
    pub inventory_border: Color,
    /// Frame thickness of inventory slots, in pixels.
    pub border_width: i32,
    pub text_align: TextAlign,
}

impl StyleSpec {
    /// Default style drawing text with `font`.
    pub fn new(font: Rc<dyn FontMetrics>) -> Self {
        Self {
            font,
            button_standard: None,
            button_hover: None,
            button_pressed: None,
            inventory_background: Color::rgb(128, 128, 128),
            inventory_border: Color::rgba(0, 0, 0, 200),
            border_width: 1,
            text_align: TextAlign::CENTER,
        }
    }

    /// Whether the visual fields of two records match. Fonts are compared by
    /// identity.
    pub fn same_as(&self, other: &StyleSpec) -> bool {
        Rc::ptr_eq(&self.font, &other.font)
            && self.button_standard == other.button_standard
            && self.button_hover == other.button_hover
            && self.button_pressed == other.button_pressed
            && self.inventory_background == other.inventory_background
            && self.inventory_border == other.inventory_border
            && self.border_width == other.border_width
            && self.text_align == other.text_align
    }
}

impl fmt::Debug for StyleSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StyleSpec")
            .field("button_standard", &self.button_standard)
            .field("button_hover", &self.button_hover)
            .field("button_pressed", &self.button_pressed)
            .field("inventory_background", &self.inventory_background)
            .field("inventory_border", &self.inventory_border)
            .field("border_width", &self.border_width)
            .field("text_align", &self.text_align)
            .finish_non_exhaustive()
    }
}
