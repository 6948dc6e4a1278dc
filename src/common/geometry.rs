//! pixel geometry for widget frames

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn area(&self) -> f64 { self.width * self.height }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const ZERO: Rect = Rect {
        x: 0.0,
        y: 0.0,
        width: 0.0,
        height: 0.0,
    };

    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn from_parts(origin: Point, size: Size) -> Self {
        Self {
            x: origin.x,
            y: origin.y,
            width: size.width,
            height: size.height,
        }
    }

    pub fn min(&self) -> Point { Point::new(self.x, self.y) }

    pub fn max(&self) -> Point { Point::new(self.x + self.width, self.y + self.height) }

    pub fn origin(&self) -> Point { self.min() }

    pub fn size(&self) -> Size { Size::new(self.width, self.height) }

    pub fn area(&self) -> f64 { self.width * self.height }

    /// Symmetric outset by `margin` on every side. A negative margin shrinks
    /// the rect; sizes never go below zero.
    pub fn expand(&self, margin: f64) -> Rect {
        Rect {
            x: self.x - margin,
            y: self.y - margin,
            width: f64::max(self.width + 2.0 * margin, 0.0),
            height: f64::max(self.height + 2.0 * margin, 0.0),
        }
    }

    /// Strict overlap test. Rects that merely share an edge do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.min().x < other.max().x
            && other.min().x < self.max().x
            && self.min().y < other.max().y
            && other.min().y < self.max().y
    }

    pub fn intersection(&self, other: &Rect) -> Rect {
        let min_x = f64::max(self.min().x, other.min().x);
        let max_x = f64::min(self.max().x, other.max().x);
        let min_y = f64::max(self.min().y, other.min().y);
        let max_y = f64::min(self.max().y, other.max().y);
        Rect {
            x: min_x,
            y: min_y,
            width: f64::max(max_x - min_x, 0.),
            height: f64::max(max_y - min_y, 0.),
        }
    }

    pub fn contains(&self, point: Point) -> bool {
        (self.min().x..=self.max().x).contains(&point.x)
            && (self.min().y..=self.max().y).contains(&point.y)
    }

    pub fn contains_rect(&self, other: Rect) -> bool {
        self.min().x <= other.min().x
            && self.min().y <= other.min().y
            && self.max().x >= other.max().x
            && self.max().y >= other.max().y
    }

    /// Translates the rect so it lies inside `bounds`. A rect larger than the
    /// bounds is pinned to the bounds' origin edge.
    pub fn clamp_within(&self, bounds: Rect) -> Rect {
        let x = f64::min(self.x, bounds.max().x - self.width);
        let y = f64::min(self.y, bounds.max().y - self.height);
        Rect {
            x: f64::max(x, bounds.min().x),
            y: f64::max(y, bounds.min().y),
            width: self.width,
            height: self.height,
        }
    }
}

pub trait Round {
    fn round(&self) -> Self;
}

impl Round for Rect {
    fn round(&self) -> Self {
        let min_rounded = self.min().round();
        let max_rounded = self.max().round();
        Rect {
            x: min_rounded.x,
            y: min_rounded.y,
            width: max_rounded.x - min_rounded.x,
            height: max_rounded.y - min_rounded.y,
        }
    }
}

impl Round for Point {
    fn round(&self) -> Self {
        Point {
            x: self.x.round(),
            y: self.y.round(),
        }
    }
}

impl Round for Size {
    fn round(&self) -> Self {
        Size {
            width: self.width.round(),
            height: self.height.round(),
        }
    }
}

pub trait IsWithin {
    fn is_within(&self, how_much: f64, other: Self) -> bool;
}

impl IsWithin for Rect {
    fn is_within(&self, how_much: f64, other: Self) -> bool {
        self.min().is_within(how_much, other.min()) && self.size().is_within(how_much, other.size())
    }
}

impl IsWithin for Point {
    fn is_within(&self, how_much: f64, other: Self) -> bool {
        self.x.is_within(how_much, other.x) && self.y.is_within(how_much, other.y)
    }
}

impl IsWithin for Size {
    fn is_within(&self, how_much: f64, other: Self) -> bool {
        self.width.is_within(how_much, other.width) && self.height.is_within(how_much, other.height)
    }
}

impl IsWithin for f64 {
    fn is_within(&self, how_much: f64, other: Self) -> bool { (self - other).abs() < how_much }
}

pub trait SameAs: IsWithin + Sized {
    fn same_as(&self, other: Self) -> bool { self.is_within(0.1, other) }
}

impl SameAs for Rect {}
impl SameAs for Point {}
impl SameAs for Size {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_rect() {
        let rect = Rect::new(10.4, 20.7, 100.0, 200.0);
        let rounded = rect.round();
        assert_eq!(rounded.x, 10.0);
        assert_eq!(rounded.y, 21.0);
        // Rect round computes size as max - min, so 100.0 stays 100.0
        assert_eq!(rounded.width, 100.0);
        assert_eq!(rounded.height, 200.0);
    }

    #[test]
    fn test_round_point() {
        let point = Point::new(10.4, 20.7);
        let rounded = point.round();
        assert_eq!(rounded.x, 10.0);
        assert_eq!(rounded.y, 21.0);
    }

    #[test]
    fn test_is_within_f64() {
        let a = 10.0;
        let b = 10.05;
        assert!(a.is_within(0.1, b));
        assert!(!a.is_within(0.01, b));
    }

    #[test]
    fn test_same_as_rect() {
        let a = Rect::new(10.0, 20.0, 100.0, 200.0);
        let b = Rect::new(10.05, 20.05, 100.05, 200.05);
        assert!(a.same_as(b));
    }

    #[test]
    fn test_expand() {
        let rect = Rect::new(20.0, 30.0, 100.0, 50.0);
        let expanded = rect.expand(10.0);
        assert_eq!(expanded, Rect::new(10.0, 20.0, 120.0, 70.0));

        let shrunk = rect.expand(-30.0);
        assert_eq!(shrunk.width, 40.0);
        assert_eq!(shrunk.height, 0.0);
    }

    #[test]
    fn test_intersects_is_strict() {
        let a = Rect::new(0.0, 0.0, 100.0, 100.0);
        let touching = Rect::new(100.0, 0.0, 100.0, 100.0);
        let overlapping = Rect::new(99.0, 0.0, 100.0, 100.0);
        let apart = Rect::new(200.0, 200.0, 100.0, 100.0);

        assert!(!a.intersects(&touching));
        assert!(a.intersects(&overlapping));
        assert!(!a.intersects(&apart));
    }

    #[test]
    fn test_intersection() {
        let rect1 = Rect::new(0.0, 0.0, 100.0, 100.0);
        let rect2 = Rect::new(50.0, 50.0, 100.0, 100.0);
        let intersection = rect1.intersection(&rect2);

        assert_eq!(intersection, Rect::new(50.0, 50.0, 50.0, 50.0));
    }

    #[test]
    fn test_no_intersection() {
        let rect1 = Rect::new(0.0, 0.0, 100.0, 100.0);
        let rect2 = Rect::new(200.0, 200.0, 100.0, 100.0);
        let intersection = rect1.intersection(&rect2);

        assert_eq!(intersection.width, 0.0);
        assert_eq!(intersection.height, 0.0);
    }

    #[test]
    fn test_contains_point() {
        let rect = Rect::new(0.0, 0.0, 100.0, 100.0);
        assert!(rect.contains(Point::new(50.0, 50.0)));
        assert!(rect.contains(Point::new(0.0, 0.0)));
        assert!(rect.contains(Point::new(100.0, 100.0)));
        assert!(!rect.contains(Point::new(101.0, 50.0)));
        assert!(!rect.contains(Point::new(-1.0, 50.0)));
    }

    #[test]
    fn test_contains_rect() {
        let rect = Rect::new(0.0, 0.0, 100.0, 100.0);
        let inner = Rect::new(10.0, 10.0, 80.0, 80.0);
        assert!(rect.contains_rect(inner));

        let outer = Rect::new(-10.0, -10.0, 120.0, 120.0);
        assert!(!rect.contains_rect(outer));
    }

    #[test]
    fn test_clamp_within() {
        let bounds = Rect::new(0.0, 0.0, 1000.0, 800.0);

        let inside = Rect::new(100.0, 100.0, 200.0, 200.0);
        assert_eq!(inside.clamp_within(bounds), inside);

        let past_left = Rect::new(-50.0, 100.0, 200.0, 200.0);
        assert_eq!(past_left.clamp_within(bounds), Rect::new(0.0, 100.0, 200.0, 200.0));

        let past_bottom_right = Rect::new(900.0, 700.0, 200.0, 200.0);
        assert_eq!(
            past_bottom_right.clamp_within(bounds),
            Rect::new(800.0, 600.0, 200.0, 200.0)
        );

        // Oversized rects pin to the origin edge.
        let oversized = Rect::new(100.0, 100.0, 1200.0, 200.0);
        assert_eq!(oversized.clamp_within(bounds).x, 0.0);
    }

    #[test]
    fn test_area() {
        let rect = Rect::new(0.0, 0.0, 100.0, 200.0);
        assert_eq!(rect.area(), 20000.0);
        assert_eq!(rect.size().area(), 20000.0);
    }
}
