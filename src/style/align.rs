//! Text alignment bitmask.
//!
//! Horizontal and vertical alignment are independent axes packed into one
//! byte. The empty mask means centered on both axes.

use std::ops::BitOr;

/// Two-axis text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TextAlign(pub u8);

impl TextAlign {
    pub const CENTER: TextAlign = TextAlign(0x00);
    pub const LEFT: TextAlign = TextAlign(0x01);
    pub const RIGHT: TextAlign = TextAlign(0x02);
    pub const TOP: TextAlign = TextAlign(0x04);
    pub const BOTTOM: TextAlign = TextAlign(0x08);

    /// Check whether `self` contains all the bits in `other`.
    pub fn contains(self, other: TextAlign) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Parse a `text_align` keyword.
    ///
    /// Returns `None` for anything outside the nine compass keywords.
    pub fn from_keyword(keyword: &str) -> Option<TextAlign> {
        let align = match keyword.trim() {
            "top" => TextAlign::TOP,
            "topright" => TextAlign::TOP | TextAlign::RIGHT,
            "right" => TextAlign::RIGHT,
            "bottomright" => TextAlign::BOTTOM | TextAlign::RIGHT,
            "bottom" => TextAlign::BOTTOM,
            "bottomleft" => TextAlign::BOTTOM | TextAlign::LEFT,
            "left" => TextAlign::LEFT,
            "topleft" => TextAlign::TOP | TextAlign::LEFT,
            "center" => TextAlign::CENTER,
            _ => return None,
        };
        Some(align)
    }

    /// Whether lines are flush with the left edge.
    pub fn is_left(self) -> bool {
        self.contains(TextAlign::LEFT) && !self.contains(TextAlign::RIGHT)
    }

    /// Whether lines are flush with the right edge.
    pub fn is_right(self) -> bool {
        self.contains(TextAlign::RIGHT)
    }

    /// Whether the text block hangs from the top edge.
    pub fn is_top(self) -> bool {
        self.contains(TextAlign::TOP) && !self.contains(TextAlign::BOTTOM)
    }

    /// Whether the text block sits on the bottom edge.
    pub fn is_bottom(self) -> bool {
        self.contains(TextAlign::BOTTOM)
    }
}

impl BitOr for TextAlign {
    type Output = TextAlign;
    fn bitor(self, rhs: Self) -> Self::Output {
        TextAlign(self.0 | rhs.0)
    }
}
