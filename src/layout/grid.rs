//! Inventory grid geometry.
//!
//! Slots are square. The cell size is the largest that fits both axes given a
//! nominal gap of 2/13 of a cell between columns and 1/4 of a cell between
//! rows; the leftover space on the looser axis is spread into the gaps.

use crate::geometry::{Point, Rect};

/// Cell size and spacing of an inventory grid, derived from its rect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridGeometry {
    /// Top-left corner of the first cell.
    pub origin: Point,
    pub columns: u32,
    pub rows: u32,
    /// Side length of a square cell, in pixels.
    pub cell: i32,
    /// Horizontal gap between cells.
    pub pad_x: f32,
    /// Vertical gap between cells.
    pub pad_y: f32,
}

impl GridGeometry {
    /// Fit `columns` x `rows` cells into `rect`.
    ///
    /// Returns `None` when either count is zero.
    pub fn compute(rect: Rect, columns: u32, rows: u32) -> Option<GridGeometry> {
        if columns == 0 || rows == 0 {
            return None;
        }
        let width = rect.width() as f32;
        let height = rect.height() as f32;
        let (x, y) = (columns as f32, rows as f32);

        let cell_h = 4.0 * height / (5.0 * y - 1.0);
        let cell_w = 13.0 * width / (15.0 * x - 2.0);

        let (cell, pad_x, pad_y) = if cell_h > cell_w {
            let cell = cell_w as i32;
            let pads = rows.saturating_sub(1).max(2) as f32;
            (cell, 2.0 * cell_w / 13.0, (height - y * cell as f32) / pads)
        } else {
            let cell = cell_h as i32;
            let pads = columns.saturating_sub(1).max(2) as f32;
            (cell, (width - x * cell as f32) / pads, cell_h / 4.0)
        };

        Some(GridGeometry { origin: rect.origin(), columns, rows, cell, pad_x, pad_y })
    }

    /// Slot rects for a list of `len` items, rows first, stopping once the
    /// items or the grid run out.
    pub fn cells(&self, len: usize) -> Vec<Rect> {
        let capacity = (self.columns as usize).saturating_mul(self.rows as usize);
        let mut rects = Vec::with_capacity(len.min(capacity));
        let mut y = self.origin.y as f32;
        'rows: for row in 0..self.rows as usize {
            let mut x = self.origin.x as f32;
            for col in 0..self.columns as usize {
                if row * self.columns as usize + col >= len {
                    break 'rows;
                }
                let (x0, y0) = (x as i32, y as i32);
                rects.push(Rect::new(x0, y0, x0 + self.cell, y0 + self.cell));
                x += self.cell as f32 + self.pad_x;
            }
            y += self.cell as f32 + self.pad_y;
        }
        rects
    }
}
