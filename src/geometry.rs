//! Core geometry types: Point, Size, Rect, FracRect.
//!
//! [`Rect`] is an absolute pixel rectangle stored as two corners, the form the
//! layout resolver produces. [`FracRect`] is the parent-relative unit-square
//! rectangle a formspec declares for each element.

use std::ops::{Add, Sub};

// ---------------------------------------------------------------------------
// Point
// ---------------------------------------------------------------------------

/// A 2D position in pixels.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    /// Create a new point.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Squared euclidean distance to `other`.
    #[inline]
    pub fn distance_squared(self, other: Point) -> i64 {
        let dx = (self.x - other.x) as i64;
        let dy = (self.y - other.y) as i64;
        dx * dx + dy * dy
    }
}

impl Add for Point {
    type Output = Point;
    #[inline]
    fn add(self, rhs: Point) -> Point {
        Point { x: self.x + rhs.x, y: self.y + rhs.y }
    }
}

impl Sub for Point {
    type Output = Point;
    #[inline]
    fn sub(self, rhs: Point) -> Point {
        Point { x: self.x - rhs.x, y: self.y - rhs.y }
    }
}

// ---------------------------------------------------------------------------
// Size
// ---------------------------------------------------------------------------

/// A 2D size in pixels (width x height).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    /// A zero-sized size.
    pub const ZERO: Size = Size { width: 0, height: 0 };

    /// Create a new size.
    #[inline]
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Whether either dimension is zero or negative.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Convert to a [`Rect`] positioned at the origin.
    #[inline]
    pub const fn to_rect(self) -> Rect {
        Rect { x0: 0, y0: 0, x1: self.width, y1: self.height }
    }
}

// ---------------------------------------------------------------------------
// Rect
// ---------------------------------------------------------------------------

/// Largest absolute pixel coordinate [`Rect::project`] produces.
pub const COORD_LIMIT: i32 = 1 << 24;

/// An absolute pixel rectangle defined by its upper-left `(x0, y0)` and
/// lower-right `(x1, y1)` corners.
///
/// The lower-right corner is exclusive for hit testing.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
}

impl Rect {
    /// An empty rect at the origin.
    pub const EMPTY: Rect = Rect { x0: 0, y0: 0, x1: 0, y1: 0 };

    /// Create a rect from its two corners.
    #[inline]
    pub const fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Create a rect from an upper-left corner and a size.
    #[inline]
    pub const fn from_origin_size(origin: Point, size: Size) -> Self {
        Self {
            x0: origin.x,
            y0: origin.y,
            x1: origin.x.saturating_add(size.width),
            y1: origin.y.saturating_add(size.height),
        }
    }

    /// Width in pixels: `x1 - x0`, saturating.
    #[inline]
    pub const fn width(self) -> i32 {
        self.x1.saturating_sub(self.x0)
    }

    /// Height in pixels: `y1 - y0`, saturating.
    #[inline]
    pub const fn height(self) -> i32 {
        self.y1.saturating_sub(self.y0)
    }

    /// The dimensions as a [`Size`].
    #[inline]
    pub const fn size(self) -> Size {
        Size { width: self.width(), height: self.height() }
    }

    /// The upper-left corner.
    #[inline]
    pub const fn origin(self) -> Point {
        Point { x: self.x0, y: self.y0 }
    }

    /// Whether the point lies inside this rect.
    #[inline]
    pub const fn contains(self, point: Point) -> bool {
        point.x >= self.x0 && point.x < self.x1 && point.y >= self.y0 && point.y < self.y1
    }

    /// Whether `other` lies entirely within this rect.
    #[inline]
    pub const fn contains_rect(self, other: Rect) -> bool {
        other.x0 >= self.x0 && other.y0 >= self.y0 && other.x1 <= self.x1 && other.y1 <= self.y1
    }

    /// Translate the rect by `(dx, dy)`.
    #[inline]
    pub const fn translate(self, dx: i32, dy: i32) -> Rect {
        Rect {
            x0: self.x0.saturating_add(dx),
            y0: self.y0.saturating_add(dy),
            x1: self.x1.saturating_add(dx),
            y1: self.y1.saturating_add(dy),
        }
    }

    /// Contract the rect inward by `amount` on every side.
    #[inline]
    pub const fn shrink(self, amount: i32) -> Rect {
        Rect {
            x0: self.x0.saturating_add(amount),
            y0: self.y0.saturating_add(amount),
            x1: self.x1.saturating_sub(amount),
            y1: self.y1.saturating_sub(amount),
        }
    }

    /// Project a fractional rect into this rect.
    ///
    /// Each coordinate is `extent * fraction + origin`, truncated to whole
    /// pixels and clamped to `±COORD_LIMIT`, so rects produced here can be
    /// added and subtracted without overflow.
    #[inline]
    pub fn project(self, frac: FracRect) -> Rect {
        let width = self.width() as f32;
        let height = self.height() as f32;
        let pixel = |v: f32| v.clamp(-(COORD_LIMIT as f32), COORD_LIMIT as f32) as i32;
        Rect {
            x0: pixel(width * frac.x0 + self.x0 as f32),
            y0: pixel(height * frac.y0 + self.y0 as f32),
            x1: pixel(width * frac.x1 + self.x0 as f32),
            y1: pixel(height * frac.y1 + self.y0 as f32),
        }
    }
}

// ---------------------------------------------------------------------------
// FracRect
// ---------------------------------------------------------------------------

/// A rectangle in parent-relative unit coordinates.
///
/// `{0, 0, 1, 1}` covers the whole parent.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FracRect {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

impl FracRect {
    /// The full parent rect.
    pub const FULL: FracRect = FracRect { x0: 0.0, y0: 0.0, x1: 1.0, y1: 1.0 };

    /// Create a fractional rect from its two corners.
    #[inline]
    pub const fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }
}

impl Default for FracRect {
    fn default() -> Self {
        Self::FULL
    }
}

// ===========================================================================
// Tests
// ===========================================================================
