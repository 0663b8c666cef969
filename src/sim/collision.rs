//! Axis-aligned collision tests and off-screen culling
//!
//! All gameplay geometry is rectangles with constant velocities; overlap is
//! strict, so rectangles that merely share an edge do not collide.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// How far past the left/right field edges an entity may drift, in multiples
/// of its own width, before it is culled.
pub const CULL_SIDE_MARGIN_WIDTHS: f32 = 4.0;

/// An axis-aligned rectangle (top-left origin)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    #[inline]
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    /// Strict AABB overlap: both axis projections must overlap with nonzero
    /// extent, so touching edges do not count.
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.pos.x < other.pos.x + other.size.x
            && self.pos.x + self.size.x > other.pos.x
            && self.pos.y < other.pos.y + other.size.y
            && self.pos.y + self.size.y > other.pos.y
    }
}

/// Whether an entity rectangle has left the visible field (plus margin) and
/// should be removed without any side effect.
#[inline]
pub fn out_of_field(pos: Vec2, size: Vec2, tuning: &Tuning) -> bool {
    let side_margin = size.x * CULL_SIDE_MARGIN_WIDTHS;
    pos.y >= tuning.field_height
        || pos.x <= -side_margin
        || pos.x >= tuning.field_width + side_margin
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x: f32, y: f32, w: f32, h: f32) -> Rect {
        Rect::new(Vec2::new(x, y), Vec2::new(w, h))
    }

    #[test]
    fn test_overlap_partial() {
        // Entity overhangs the player's left edge
        let entity = rect(0.0, 0.0, 150.0, 150.0);
        let player = rect(100.0, 0.0, 300.0, 300.0);
        assert!(entity.overlaps(&player));
        assert!(player.overlaps(&entity));
    }

    #[test]
    fn test_overlap_miss() {
        let entity = rect(-200.0, 0.0, 150.0, 150.0);
        let player = rect(100.0, 0.0, 300.0, 300.0);
        assert!(!entity.overlaps(&player));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = rect(0.0, 0.0, 100.0, 100.0);
        let b = rect(100.0, 0.0, 100.0, 100.0);
        assert!(!a.overlaps(&b));
        let c = rect(0.0, 100.0, 100.0, 100.0);
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_contained_rect_overlaps() {
        let outer = rect(0.0, 0.0, 300.0, 300.0);
        let inner = rect(100.0, 100.0, 50.0, 50.0);
        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
    }

    #[test]
    fn test_cull_below_bottom_edge() {
        let tuning = Tuning::default();
        let size = Vec2::splat(150.0);
        assert!(!out_of_field(
            Vec2::new(100.0, tuning.field_height - 1.0),
            size,
            &tuning
        ));
        assert!(out_of_field(
            Vec2::new(100.0, tuning.field_height),
            size,
            &tuning
        ));
    }

    #[test]
    fn test_cull_side_margin() {
        let tuning = Tuning::default();
        let size = Vec2::splat(150.0);
        // Inside the 4-widths margin: kept
        assert!(!out_of_field(Vec2::new(-500.0, 100.0), size, &tuning));
        // Past it: culled
        assert!(out_of_field(Vec2::new(-601.0, 100.0), size, &tuning));
        assert!(out_of_field(
            Vec2::new(tuning.field_width + 601.0, 100.0),
            size,
            &tuning
        ));
    }
}
