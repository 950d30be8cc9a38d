use std::fmt;

use serde::{Deserialize, Serialize};

/// Width/height pair in logical units (or pixels for natural image sizes).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const ZERO: Self = Self {
        width: 0.0,
        height: 0.0,
    };

    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// True when both dimensions are finite and strictly positive.
    pub fn is_positive(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    pub fn scaled(&self, factor: f32) -> Self {
        Self::new(self.width * factor, self.height * factor)
    }

    pub fn axis(&self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.width,
            Axis::Y => self.height,
        }
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Natural pixel dimensions of a decoded image.
pub type NaturalSize = Size;

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn offset(&self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    pub fn axis(&self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }

    pub fn set_axis(&mut self, axis: Axis, value: f32) {
        match axis {
            Axis::X => self.x = value,
            Axis::Y => self.y = value,
        }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Axis-aligned rectangle: top-left origin plus size.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    pub const fn new(origin: Point, size: Size) -> Self {
        Self { origin, size }
    }

    pub fn from_center_size(center: Point, size: Size) -> Self {
        Self::new(
            Point::new(center.x - size.width / 2.0, center.y - size.height / 2.0),
            size,
        )
    }

    pub fn min_x(&self) -> f32 {
        self.origin.x
    }

    pub fn min_y(&self) -> f32 {
        self.origin.y
    }

    pub fn max_x(&self) -> f32 {
        self.origin.x + self.size.width
    }

    pub fn max_y(&self) -> f32 {
        self.origin.y + self.size.height
    }

    pub fn center(&self) -> Point {
        Point::new(
            self.origin.x + self.size.width / 2.0,
            self.origin.y + self.size.height / 2.0,
        )
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min_x() && p.x <= self.max_x() && p.y >= self.min_y() && p.y <= self.max_y()
    }

    /// Overlapping region, or `None` when the rectangles are disjoint.
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        let x0 = self.min_x().max(other.min_x());
        let y0 = self.min_y().max(other.min_y());
        let x1 = self.max_x().min(other.max_x());
        let y1 = self.max_y().min(other.max_y());
        if x1 <= x0 || y1 <= y0 {
            return None;
        }
        Some(Rect::new(Point::new(x0, y0), Size::new(x1 - x0, y1 - y0)))
    }

    /// Shift the rectangle so it lies inside `bounds`, shrinking it only when
    /// it is larger than `bounds` on an axis.
    pub fn clamped_within(&self, bounds: &Rect) -> Rect {
        let w = self.size.width.min(bounds.size.width);
        let h = self.size.height.min(bounds.size.height);
        let x = self.origin.x.clamp(bounds.min_x(), bounds.max_x() - w);
        let y = self.origin.y.clamp(bounds.min_y(), bounds.max_y() - h);
        Rect::new(Point::new(x, y), Size::new(w, h))
    }

    /// Linear interpolation between two rectangles (`t` in `[0, 1]`).
    pub fn lerp(&self, to: &Rect, t: f32) -> Rect {
        let mix = |a: f32, b: f32| a + (b - a) * t;
        Rect::new(
            Point::new(mix(self.origin.x, to.origin.x), mix(self.origin.y, to.origin.y)),
            Size::new(
                mix(self.size.width, to.size.width),
                mix(self.size.height, to.size.height),
            ),
        )
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.origin, self.size)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    pub const BOTH: [Axis; 2] = [Axis::X, Axis::Y];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intersect_disjoint() {
        let a = Rect::new(Point::ZERO, Size::new(10.0, 10.0));
        let b = Rect::new(Point::new(20.0, 20.0), Size::new(5.0, 5.0));
        assert!(a.intersect(&b).is_none());
    }

    #[test]
    fn test_clamped_within_shifts_inside() {
        let bounds = Rect::new(Point::ZERO, Size::new(100.0, 50.0));
        let r = Rect::new(Point::new(-20.0, 40.0), Size::new(30.0, 30.0));
        let c = r.clamped_within(&bounds);
        assert_eq!(c.origin, Point::new(0.0, 20.0));
        assert_eq!(c.size, Size::new(30.0, 30.0));
    }

    #[test]
    fn test_clamped_within_shrinks_oversize() {
        let bounds = Rect::new(Point::ZERO, Size::new(40.0, 40.0));
        let r = Rect::new(Point::new(5.0, 5.0), Size::new(100.0, 10.0));
        let c = r.clamped_within(&bounds);
        assert_eq!(c.size.width, 40.0);
        assert_eq!(c.origin.x, 0.0);
    }

    #[test]
    fn test_size_is_positive() {
        assert!(Size::new(1.0, 2.0).is_positive());
        assert!(!Size::new(0.0, 2.0).is_positive());
        assert!(!Size::new(3.0, -1.0).is_positive());
        assert!(!Size::new(f32::NAN, 1.0).is_positive());
    }
}
