//! Box model primitives: points, sizes, rectangles, padding and size bounds.

use crate::constants::DEFAULT_PADDING;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const ZERO: Size = Size::new(0.0, 0.0);

    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned rectangle with a top-left origin.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_parts(origin: Point, size: Size) -> Self {
        Self::new(origin.x, origin.y, size.width, size.height)
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Half-open containment: the right and bottom edges are outside.
    pub fn contains(&self, point: Point) -> bool {
        if self.is_empty() {
            return false;
        }
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }

    pub fn translate(&self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// Shift the rectangle so it lies inside `bounds`, preferring to keep the
    /// top-left corner visible when it is larger than `bounds`.
    pub fn clamp_within(&self, bounds: Rect) -> Self {
        let max_x = (bounds.right() - self.width).max(bounds.x);
        let max_y = (bounds.bottom() - self.height).max(bounds.y);
        Self::new(
            self.x.min(max_x).max(bounds.x),
            self.y.min(max_y).max(bounds.y),
            self.width,
            self.height,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Padding {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Padding {
    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub const fn uniform(value: f32) -> Self {
        Self::new(value, value, value, value)
    }

    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }
}

impl Default for Padding {
    fn default() -> Self {
        Self::uniform(DEFAULT_PADDING)
    }
}

/// Min/max size clamps. A zero bound leaves that side unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SizeBounds {
    pub min: Size,
    pub max: Size,
}

impl SizeBounds {
    pub const UNBOUNDED: SizeBounds = SizeBounds {
        min: Size::ZERO,
        max: Size::ZERO,
    };

    pub fn clamp_width(&self, width: f32) -> f32 {
        clamp_axis(width, self.min.width, self.max.width)
    }

    pub fn clamp_height(&self, height: f32) -> f32 {
        clamp_axis(height, self.min.height, self.max.height)
    }

    pub fn clamp(&self, size: Size) -> Size {
        Size::new(self.clamp_width(size.width), self.clamp_height(size.height))
    }
}

// min is applied last so an inverted range resolves to the minimum.
fn clamp_axis(value: f32, min: f32, max: f32) -> f32 {
    let mut value = value.max(0.0);
    if max > 0.0 && value > max {
        value = max;
    }
    if min > 0.0 && value < min {
        value = min;
    }
    value
}
