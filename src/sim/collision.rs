//! Collision detection for axis-aligned rectangles
//!
//! The actor sprite carries transparent padding, so its hitbox is shrunk by
//! fractional insets before the overlap test. The hitbox ignores the sprite's
//! visual rotation.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// An axis-aligned rectangle (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Shrink by fractions of this rect's own width/height
    pub fn inset(&self, insets: &Insets) -> Rect {
        let w = self.size.x;
        let h = self.size.y;
        Rect::new(
            self.pos.x + w * insets.left,
            self.pos.y + h * insets.top,
            w - w * (insets.left + insets.right),
            h - h * (insets.top + insets.bottom),
        )
    }

    /// Strict overlap test (touching edges do not overlap)
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }
}

/// Four-sided inset, each side a fraction of the rect's size.
///
/// Callers keep each side in [0, 1) and opposing sides summing below 1.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Insets {
    pub top: f32,
    pub bottom: f32,
    pub left: f32,
    pub right: f32,
}

impl Insets {
    /// Insets applied to the actor sprite
    pub const ACTOR: Insets = Insets {
        top: HITBOX_INSET_TOP,
        bottom: HITBOX_INSET_BOTTOM,
        left: HITBOX_INSET_LEFT,
        right: HITBOX_INSET_RIGHT,
    };
}

/// Check whether `a`, shrunk by `margins_a`, overlaps `b`
pub fn overlaps(a: &Rect, b: &Rect, margins_a: Option<&Insets>) -> bool {
    match margins_a {
        Some(insets) => a.inset(insets).intersects(b),
        None => a.intersects(b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap_without_margins() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        assert!(overlaps(&a, &b, None));
        assert!(overlaps(&b, &a, None));

        // Touching edges is not an overlap
        let c = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert!(!overlaps(&a, &c, None));
    }

    #[test]
    fn test_margins_shrink_only_first_rect() {
        let actor = Rect::new(0.0, 0.0, 100.0, 100.0);
        // Obstacle grazing the transparent right padding (x in [75, 100))
        let obstacle = Rect::new(75.0, 0.0, 50.0, 100.0);
        assert!(overlaps(&actor, &obstacle, None));
        assert!(!overlaps(&actor, &obstacle, Some(&Insets::ACTOR)));

        // Same geometry with roles swapped: obstacle is not inset, actor is untouched
        assert!(overlaps(&obstacle, &actor, Some(&Insets::default())));
    }

    #[test]
    fn test_actor_inset_geometry() {
        let actor = Rect::new(150.0, 100.0, 150.0, 150.0);
        let hitbox = actor.inset(&Insets::ACTOR);
        assert!((hitbox.left() - 195.0).abs() < 1e-4);
        assert!((hitbox.top() - 145.0).abs() < 1e-4);
        assert!((hitbox.size.x - 60.0).abs() < 1e-4);
        assert!((hitbox.size.y - 75.0).abs() < 1e-4);
    }

    #[test]
    fn test_bottom_margin_is_smaller_than_top() {
        let actor = Rect::new(0.0, 0.0, 100.0, 100.0);
        // Segment just below the inset top edge (30) but above the bottom edge (80)
        let above = Rect::new(0.0, -50.0, 100.0, 79.0);
        let below = Rect::new(0.0, 79.0, 100.0, 50.0);
        assert!(!overlaps(&actor, &above, Some(&Insets::ACTOR)));
        assert!(overlaps(&actor, &below, Some(&Insets::ACTOR)));
    }
}
