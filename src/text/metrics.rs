//! Font metric service consumed by text layout.

use std::fmt;

use crate::geometry::Size;

/// Measures rendered text. Implemented by the host's font engine.
pub trait FontMetrics {
    /// Pixel size of `text` rendered on a single line.
    fn measure(&self, text: &str) -> Size;

    /// Pixel size of the caret glyph drawn in focused inputs.
    fn caret_size(&self) -> Size;
}

impl fmt::Debug for dyn FontMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FontMetrics")
    }
}
