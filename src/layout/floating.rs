use crate::geometry::{Point, Rect, SizeBounds};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeEdge {
    Left,
    Right,
    Top,
    Bottom,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl ResizeEdge {
    pub fn moves_left(self) -> bool {
        matches!(
            self,
            ResizeEdge::Left | ResizeEdge::TopLeft | ResizeEdge::BottomLeft
        )
    }

    pub fn moves_right(self) -> bool {
        matches!(
            self,
            ResizeEdge::Right | ResizeEdge::TopRight | ResizeEdge::BottomRight
        )
    }

    pub fn moves_top(self) -> bool {
        matches!(
            self,
            ResizeEdge::Top | ResizeEdge::TopLeft | ResizeEdge::TopRight
        )
    }

    pub fn moves_bottom(self) -> bool {
        matches!(
            self,
            ResizeEdge::Bottom | ResizeEdge::BottomLeft | ResizeEdge::BottomRight
        )
    }

    /// Rotation, in degrees, of the double-headed resize cursor.
    pub fn cursor_rotation(self) -> f32 {
        match self {
            ResizeEdge::Left | ResizeEdge::Right => 0.0,
            ResizeEdge::Top | ResizeEdge::Bottom => 90.0,
            ResizeEdge::TopLeft | ResizeEdge::BottomRight => 45.0,
            ResizeEdge::TopRight | ResizeEdge::BottomLeft => 135.0,
        }
    }

    /// Top zones overlap the title bar; resize wins there.
    pub fn blocks_title_drag(self) -> bool {
        self.moves_top()
    }
}

/// Classify `pointer` against `bounds` into one of nine zones.
///
/// `None` is the center zone, and also what a pointer outside the bounds
/// gets. Corners take precedence over edges where the bands overlap.
pub fn classify_zone(bounds: Rect, pointer: Point, threshold: f32) -> Option<ResizeEdge> {
    if threshold <= 0.0 || !bounds.contains(pointer) {
        return None;
    }
    let near_left = pointer.x < bounds.x + threshold;
    let near_right = pointer.x >= bounds.right() - threshold;
    let near_top = pointer.y < bounds.y + threshold;
    let near_bottom = pointer.y >= bounds.bottom() - threshold;
    match (near_left, near_right, near_top, near_bottom) {
        (true, _, true, _) => Some(ResizeEdge::TopLeft),
        (_, true, true, _) => Some(ResizeEdge::TopRight),
        (true, _, _, true) => Some(ResizeEdge::BottomLeft),
        (_, true, _, true) => Some(ResizeEdge::BottomRight),
        (true, _, _, _) => Some(ResizeEdge::Left),
        (_, true, _, _) => Some(ResizeEdge::Right),
        (_, _, true, _) => Some(ResizeEdge::Top),
        (_, _, _, true) => Some(ResizeEdge::Bottom),
        _ => None,
    }
}

/// Engaged edge plus the pointer and rect captured on press.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeDrag {
    pub edge: ResizeEdge,
    pub anchor: Point,
    pub start: Rect,
}

impl ResizeDrag {
    pub fn new(edge: ResizeEdge, anchor: Point, start: Rect) -> Self {
        Self {
            edge,
            anchor,
            start,
        }
    }

    pub fn apply(&self, pointer: Point, bounds: SizeBounds) -> Rect {
        apply_resize_drag(self.start, self.edge, pointer, self.anchor, bounds)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeaderDrag {
    pub anchor: Point,
    pub start: Point,
}

impl HeaderDrag {
    pub fn new(anchor: Point, start: Point) -> Self {
        Self { anchor, start }
    }

    pub fn position_for(&self, pointer: Point) -> Point {
        self.start
            .offset(pointer.x - self.anchor.x, pointer.y - self.anchor.y)
    }
}

/// Resize `start` by the pointer travel since `anchor`.
///
/// Right/bottom edges follow the pointer. Left/top edges move the origin and
/// keep the opposite edge where it was, including when a size clamp kicks in.
pub fn apply_resize_drag(
    start: Rect,
    edge: ResizeEdge,
    pointer: Point,
    anchor: Point,
    bounds: SizeBounds,
) -> Rect {
    let dx = pointer.x - anchor.x;
    let dy = pointer.y - anchor.y;
    let mut width = start.width;
    let mut height = start.height;

    if edge.moves_left() {
        width -= dx;
    } else if edge.moves_right() {
        width += dx;
    }
    if edge.moves_top() {
        height -= dy;
    } else if edge.moves_bottom() {
        height += dy;
    }

    let width = bounds.clamp_width(width);
    let height = bounds.clamp_height(height);

    let x = if edge.moves_left() {
        start.right() - width
    } else {
        start.x
    };
    let y = if edge.moves_top() {
        start.bottom() - height
    } else {
        start.y
    };
    Rect::new(x, y, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Size;

    fn frame() -> Rect {
        Rect::new(100.0, 100.0, 200.0, 150.0)
    }

    #[test]
    fn classify_nine_zones() {
        let r = frame();
        let t = 8.0;
        assert_eq!(classify_zone(r, Point::new(200.0, 170.0), t), None);
        assert_eq!(
            classify_zone(r, Point::new(101.0, 101.0), t),
            Some(ResizeEdge::TopLeft)
        );
        assert_eq!(
            classify_zone(r, Point::new(299.0, 101.0), t),
            Some(ResizeEdge::TopRight)
        );
        assert_eq!(
            classify_zone(r, Point::new(101.0, 249.0), t),
            Some(ResizeEdge::BottomLeft)
        );
        assert_eq!(
            classify_zone(r, Point::new(299.0, 249.0), t),
            Some(ResizeEdge::BottomRight)
        );
        assert_eq!(
            classify_zone(r, Point::new(103.0, 170.0), t),
            Some(ResizeEdge::Left)
        );
        assert_eq!(
            classify_zone(r, Point::new(295.0, 170.0), t),
            Some(ResizeEdge::Right)
        );
        assert_eq!(
            classify_zone(r, Point::new(200.0, 104.0), t),
            Some(ResizeEdge::Top)
        );
        assert_eq!(
            classify_zone(r, Point::new(200.0, 245.0), t),
            Some(ResizeEdge::Bottom)
        );
    }

    #[test]
    fn classify_outside_is_idle() {
        assert_eq!(classify_zone(frame(), Point::new(50.0, 50.0), 8.0), None);
    }

    #[test]
    fn top_zones_block_title_drag() {
        assert!(ResizeEdge::Top.blocks_title_drag());
        assert!(ResizeEdge::TopRight.blocks_title_drag());
        assert!(!ResizeEdge::Left.blocks_title_drag());
        assert!(!ResizeEdge::BottomRight.blocks_title_drag());
    }

    #[test]
    fn test_resize_bottom_right_follows_pointer() {
        let start = frame();
        let out = apply_resize_drag(
            start,
            ResizeEdge::BottomRight,
            Point::new(330.0, 270.0),
            Point::new(299.0, 249.0),
            SizeBounds::UNBOUNDED,
        );
        assert_eq!(out, Rect::new(100.0, 100.0, 231.0, 171.0));
    }

    #[test]
    fn test_resize_top_left_keeps_bottom_right_corner() {
        let start = frame();
        let out = apply_resize_drag(
            start,
            ResizeEdge::TopLeft,
            Point::new(80.0, 90.0),
            Point::new(100.0, 100.0),
            SizeBounds::UNBOUNDED,
        );
        assert_eq!(out.width, 220.0);
        assert_eq!(out.height, 160.0);
        assert_eq!(out.right(), start.right());
        assert_eq!(out.bottom(), start.bottom());
    }

    #[test]
    fn test_resize_top_drag_down() {
        let start = frame();
        let out = apply_resize_drag(
            start,
            ResizeEdge::Top,
            Point::new(150.0, 130.0),
            Point::new(150.0, 100.0),
            SizeBounds::UNBOUNDED,
        );
        assert_eq!(out.y, 130.0);
        assert_eq!(out.height, 120.0);
        assert_eq!(out.x, start.x);
        assert_eq!(out.width, start.width);
    }

    #[test]
    fn test_resize_left_clamped_keeps_right_edge() {
        let start = frame();
        let bounds = SizeBounds {
            min: Size::new(150.0, 0.0),
            max: Size::ZERO,
        };
        let out = apply_resize_drag(
            start,
            ResizeEdge::Left,
            Point::new(250.0, 150.0),
            Point::new(100.0, 150.0),
            bounds,
        );
        assert_eq!(out.width, 150.0);
        assert_eq!(out.right(), start.right());
    }

    #[test]
    fn header_drag_tracks_pointer_delta() {
        let drag = HeaderDrag::new(Point::new(10.0, 5.0), Point::new(100.0, 50.0));
        assert_eq!(drag.position_for(Point::new(15.0, 2.0)), Point::new(105.0, 47.0));
    }
}
