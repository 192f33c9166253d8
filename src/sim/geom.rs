//! Axis-aligned rectangle geometry in screen space
//!
//! Screen space: origin top-left, +x right, +y down.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle; `y` is the top edge
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
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

    /// Rectangle whose bottom edge is centered on `anchor`
    pub fn from_bottom_center(anchor: Vec2, width: f32, height: f32) -> Self {
        Self::new(anchor.x - width / 2.0, anchor.y - height, width, height)
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Closest point on (or in) the rectangle to `p`
    pub fn closest_point(&self, p: Vec2) -> Vec2 {
        Vec2::new(
            p.x.clamp(self.left(), self.right()),
            p.y.clamp(self.top(), self.bottom()),
        )
    }

    /// Whether the horizontal extent overlaps the closed interval `[a, b]`
    pub fn overlaps_span(&self, a: f32, b: f32) -> bool {
        self.left() <= b && self.right() >= a
    }
}

/// Circle vs rectangle overlap (touching counts as a hit)
pub fn circle_rect_hit(center: Vec2, radius: f32, rect: &Rect) -> bool {
    let closest = rect.closest_point(center);
    center.distance_squared(closest) <= radius * radius
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_bottom_center() {
        let r = Rect::from_bottom_center(Vec2::new(100.0, 400.0), 20.0, 30.0);
        assert_eq!(r.left(), 90.0);
        assert_eq!(r.right(), 110.0);
        assert_eq!(r.bottom(), 400.0);
        assert_eq!(r.top(), 370.0);
    }

    #[test]
    fn test_circle_rect_hit() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        // Inside
        assert!(circle_rect_hit(Vec2::new(5.0, 5.0), 1.0, &rect));
        // Touching the right edge
        assert!(circle_rect_hit(Vec2::new(12.0, 5.0), 2.0, &rect));
        // Near a corner but outside radius
        assert!(!circle_rect_hit(Vec2::new(13.0, 13.0), 3.0, &rect));
        // Corner within radius
        assert!(circle_rect_hit(Vec2::new(12.0, 12.0), 3.0, &rect));
    }
}
