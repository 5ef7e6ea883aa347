//! Gated obstacles and the obstacle sequence
//!
//! Obstacles are kept oldest-first. Each one is a top segment from the ceiling
//! to `gap_y` and a bottom segment from `gap_y + gap_height` to the floor.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::consts::*;

/// A paired top/bottom barrier with a passable gap
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Left edge
    pub x: f32,
    /// Top of the gap
    pub gap_y: f32,
    /// Gap clearance, fixed when spawned
    pub gap_height: f32,
    /// Set once the obstacle has scored
    pub passed: bool,
}

impl Obstacle {
    /// Place an obstacle at `x` with its gap chosen by `draw` in [0, 1).
    ///
    /// The gap center is interpolated between the highest and lowest centers
    /// that keep `GAP_MARGIN` clear of the ceiling and floor. Surfaces too short
    /// for the margins get a centered gap.
    pub fn with_draw(x: f32, surface_height: f32, gap_height: f32, draw: f32) -> Self {
        let min_center = GAP_MARGIN + gap_height / 2.0;
        let max_center = surface_height - GAP_MARGIN - gap_height / 2.0;
        let center = if max_center >= min_center {
            min_center + draw * (max_center - min_center)
        } else {
            surface_height / 2.0
        };
        Self {
            x,
            gap_y: center - gap_height / 2.0,
            gap_height,
            passed: false,
        }
    }

    /// Spawn at the right edge with a uniformly random gap
    pub fn spawn<R: Rng>(
        surface_width: f32,
        surface_height: f32,
        gap_height: f32,
        rng: &mut R,
    ) -> Self {
        let draw: f32 = rng.random();
        Self::with_draw(surface_width, surface_height, gap_height, draw)
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + OBSTACLE_WIDTH
    }

    /// Bottom of the gap
    #[inline]
    pub fn gap_bottom(&self) -> f32 {
        self.gap_y + self.gap_height
    }

    /// Segment from the ceiling down to the gap
    pub fn top_segment(&self) -> Rect {
        Rect::new(self.x, 0.0, OBSTACLE_WIDTH, self.gap_y)
    }

    /// Segment from the gap down to the current floor
    pub fn bottom_segment(&self, surface_height: f32) -> Rect {
        let y = self.gap_bottom();
        Rect::new(self.x, y, OBSTACLE_WIDTH, (surface_height - y).max(0.0))
    }

    /// Returns true exactly once: the first call after the right edge is left of `actor_x`
    pub fn check_passage(&mut self, actor_x: f32) -> bool {
        if !self.passed && self.right() < actor_x {
            self.passed = true;
            return true;
        }
        false
    }

    pub fn is_offscreen(&self) -> bool {
        self.x < -OBSTACLE_WIDTH - OBSTACLE_REAP_SLACK
    }
}

/// Whether an obstacle spawns on this frame
#[inline]
pub fn spawn_due(frame: u64) -> bool {
    frame == FIRST_SPAWN_FRAME
        || (frame > FIRST_SPAWN_FRAME && (frame - FIRST_SPAWN_FRAME) % SPAWN_INTERVAL_FRAMES == 0)
}

/// Scroll every obstacle left by `speed`
pub fn advance(obstacles: &mut [Obstacle], speed: f32) {
    for obstacle in obstacles {
        obstacle.x -= speed;
    }
}

/// Drop obstacles that scrolled off the left edge, returning how many went
pub fn reap_offscreen(obstacles: &mut Vec<Obstacle>) -> usize {
    // Oldest first, so offscreen ones form a prefix
    let count = obstacles.iter().take_while(|o| o.is_offscreen()).count();
    obstacles.drain(..count);
    count
}
