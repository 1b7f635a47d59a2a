// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis-aligned bounding box value type.

use kurbo::{Point, Rect, Size};

/// Axis-aligned rectangle in 2D world space, described by its top-left corner and size.
///
/// The y axis grows downward: `top() <= bottom()`. Sizes are never negative;
/// [`BoundingBox2D::new`] clamps negative components to zero. A zero-size box is a
/// degenerate point and takes part in containment and intersection tests like any other.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BoundingBox2D {
    position: Point,
    size: Size,
}

impl BoundingBox2D {
    /// Create a box from its top-left corner and size.
    #[inline]
    pub fn new(position: Point, size: Size) -> Self {
        debug_assert!(
            position.is_finite(),
            "bounding box position must be finite; got {position:?}"
        );
        // Clamp finite negative values to `0.0`.
        let size = Size::new(size.width.max(0.0), size.height.max(0.0));
        Self { position, size }
    }

    /// Create a box from origin and size components.
    #[inline]
    pub fn from_xywh(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(Point::new(x, y), Size::new(width, height))
    }

    /// Left edge.
    #[inline]
    pub fn left(&self) -> f64 {
        self.position.x
    }

    /// Top edge.
    #[inline]
    pub fn top(&self) -> f64 {
        self.position.y
    }

    /// Right edge (`left + width`).
    #[inline]
    pub fn right(&self) -> f64 {
        self.position.x + self.size.width
    }

    /// Bottom edge (`top + height`).
    #[inline]
    pub fn bottom(&self) -> f64 {
        self.position.y + self.size.height
    }

    /// Top-left corner.
    #[inline]
    pub fn top_left(&self) -> Point {
        self.position
    }

    /// Width and height.
    #[inline]
    pub fn size(&self) -> Size {
        self.size
    }

    /// Center point.
    #[inline]
    pub fn center(&self) -> Point {
        Point::new(
            self.position.x + self.size.width * 0.5,
            self.position.y + self.size.height * 0.5,
        )
    }

    /// Whether `other` lies entirely inside this box.
    ///
    /// The boundary is part of the box, so a box contains itself and any box
    /// sharing one of its edges from the inside.
    ///
    /// # Examples
    ///
    /// ```
    /// use understory_quadtree::BoundingBox2D;
    ///
    /// let outer = BoundingBox2D::from_xywh(0.0, 0.0, 10.0, 10.0);
    /// assert!(outer.contains(&BoundingBox2D::from_xywh(5.0, 5.0, 5.0, 5.0)));
    /// assert!(!outer.contains(&BoundingBox2D::from_xywh(5.0, 5.0, 6.0, 5.0)));
    /// ```
    #[inline]
    pub fn contains(&self, other: &Self) -> bool {
        self.left() <= other.left()
            && self.top() <= other.top()
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Whether this box and `other` overlap.
    ///
    /// Boxes that only touch along an edge or at a corner are considered to intersect.
    ///
    /// # Examples
    ///
    /// ```
    /// use understory_quadtree::BoundingBox2D;
    ///
    /// let a = BoundingBox2D::from_xywh(0.0, 0.0, 10.0, 10.0);
    /// assert!(a.intersects(&BoundingBox2D::from_xywh(10.0, 0.0, 10.0, 10.0)));
    /// assert!(!a.intersects(&BoundingBox2D::from_xywh(11.0, 0.0, 10.0, 10.0)));
    /// ```
    #[inline]
    pub fn intersects(&self, other: &Self) -> bool {
        !(self.right() < other.left()
            || self.left() > other.right()
            || self.bottom() < other.top()
            || self.top() > other.bottom())
    }

    /// The four quadrants obtained by bisecting both axes, in
    /// north-west, north-east, south-west, south-east order.
    pub fn quadrants(&self) -> [Self; 4] {
        let mid = self.center();
        let (left, top) = (self.left(), self.top());
        let (right, bottom) = (self.right(), self.bottom());
        [
            Self::from_xywh(left, top, mid.x - left, mid.y - top),
            Self::from_xywh(mid.x, top, right - mid.x, mid.y - top),
            Self::from_xywh(left, mid.y, mid.x - left, bottom - mid.y),
            Self::from_xywh(mid.x, mid.y, right - mid.x, bottom - mid.y),
        ]
    }

    /// Convert to a Kurbo rectangle.
    #[inline]
    pub fn to_rect(&self) -> Rect {
        Rect::from_origin_size(self.position, self.size)
    }

    pub(crate) fn is_finite(&self) -> bool {
        self.position.is_finite() && self.size.is_finite()
    }
}

impl From<Rect> for BoundingBox2D {
    fn from(rect: Rect) -> Self {
        let rect = rect.abs();
        Self::new(rect.origin(), rect.size())
    }
}

#[cfg(test)]
mod tests {
    use super::BoundingBox2D;
    use kurbo::{Point, Rect, Size};

    fn corners(b: &BoundingBox2D) -> [(f64, f64); 4] {
        [
            (b.left(), b.top()),
            (b.right(), b.top()),
            (b.left(), b.bottom()),
            (b.right(), b.bottom()),
        ]
    }

    #[test]
    fn derived_edges_and_center() {
        let b = BoundingBox2D::from_xywh(-10.0, 4.0, 20.0, 6.0);
        assert_eq!(b.right(), 10.0);
        assert_eq!(b.bottom(), 10.0);
        assert_eq!(b.top_left(), Point::new(-10.0, 4.0));
        assert_eq!(b.size(), Size::new(20.0, 6.0));
        assert_eq!(b.center(), Point::new(0.0, 7.0));
    }

    #[test]
    fn negative_size_is_clamped() {
        let b = BoundingBox2D::from_xywh(1.0, 1.0, -5.0, 3.0);
        assert_eq!(b.size(), Size::new(0.0, 3.0));
        assert_eq!(b.right(), 1.0);
    }

    #[test]
    fn containment_is_closed_and_not_symmetric() {
        let outer = BoundingBox2D::from_xywh(0.0, 0.0, 10.0, 10.0);
        let edge = BoundingBox2D::from_xywh(0.0, 0.0, 10.0, 2.0);
        assert!(outer.contains(&outer));
        assert!(outer.contains(&edge));
        assert!(!edge.contains(&outer));

        // Contained boxes have all four corners within the closed interval.
        for (x, y) in corners(&edge) {
            assert!(outer.left() <= x && x <= outer.right());
            assert!(outer.top() <= y && y <= outer.bottom());
        }
    }

    #[test]
    fn degenerate_point_participates() {
        let outer = BoundingBox2D::from_xywh(0.0, 0.0, 10.0, 10.0);
        let corner = BoundingBox2D::from_xywh(10.0, 10.0, 0.0, 0.0);
        let outside = BoundingBox2D::from_xywh(10.5, 10.0, 0.0, 0.0);
        assert!(outer.contains(&corner));
        assert!(outer.intersects(&corner));
        assert!(!outer.intersects(&outside));
        assert!(corner.intersects(&corner));
    }

    #[test]
    fn intersection_is_symmetric() {
        let boxes = [
            BoundingBox2D::from_xywh(0.0, 0.0, 10.0, 10.0),
            BoundingBox2D::from_xywh(5.0, 5.0, 10.0, 10.0),
            BoundingBox2D::from_xywh(10.0, 10.0, 1.0, 1.0),
            BoundingBox2D::from_xywh(-3.0, 4.0, 2.0, 2.0),
            BoundingBox2D::from_xywh(2.0, -8.0, 1.0, 30.0),
            BoundingBox2D::from_xywh(20.0, 20.0, 0.0, 0.0),
        ];
        for a in &boxes {
            for b in &boxes {
                assert_eq!(a.intersects(b), b.intersects(a), "{a:?} vs {b:?}");
            }
        }
    }

    #[test]
    fn quadrants_tile_the_box() {
        let b = BoundingBox2D::from_xywh(-100.0, -100.0, 200.0, 200.0);
        let [nw, ne, sw, se] = b.quadrants();
        assert_eq!(nw, BoundingBox2D::from_xywh(-100.0, -100.0, 100.0, 100.0));
        assert_eq!(ne, BoundingBox2D::from_xywh(0.0, -100.0, 100.0, 100.0));
        assert_eq!(sw, BoundingBox2D::from_xywh(-100.0, 0.0, 100.0, 100.0));
        assert_eq!(se, BoundingBox2D::from_xywh(0.0, 0.0, 100.0, 100.0));
        for q in [nw, ne, sw, se] {
            assert!(b.contains(&q));
        }
    }

    #[test]
    fn rect_conversion_normalizes() {
        let b = BoundingBox2D::from(Rect::new(10.0, 8.0, 2.0, 4.0));
        assert_eq!(b, BoundingBox2D::from_xywh(2.0, 4.0, 8.0, 4.0));
        assert_eq!(b.to_rect(), Rect::new(2.0, 4.0, 10.0, 8.0));
    }
}
