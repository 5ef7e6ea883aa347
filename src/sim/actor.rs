//! The player-controlled actor
//!
//! Vertical physics only: the actor holds a fixed x while obstacles scroll past.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{Insets, Rect};
use crate::consts::*;

/// Result of checking the actor against the ceiling and floor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    /// Within the play surface
    Clear,
    /// Pinned to the ceiling (velocity zeroed, round continues)
    Ceiling,
    /// Bottom edge reached the floor (round ends)
    Floor,
}

/// Player sprite physics state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    /// Top-left corner
    pub pos: Vec2,
    pub vel_y: f32,
    /// Cosmetic, re-derived from velocity every tick
    pub rotation: f32,
    pub size: Vec2,
}

impl Actor {
    /// Create an actor vertically centered on a surface of the given height
    pub fn centered(surface_height: f32) -> Self {
        Self {
            pos: Vec2::new(ACTOR_X, surface_height / 2.0 - ACTOR_HEIGHT / 2.0),
            vel_y: 0.0,
            rotation: 0.0,
            size: Vec2::new(ACTOR_WIDTH, ACTOR_HEIGHT),
        }
    }

    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }

    /// Collision hitbox (sprite padding trimmed, rotation ignored)
    pub fn hitbox(&self) -> Rect {
        self.rect().inset(&Insets::ACTOR)
    }

    /// Apply gravity (when enabled) and move by the current velocity
    pub fn integrate(&mut self, gravity_enabled: bool, gravity: f32) {
        if gravity_enabled {
            self.vel_y += gravity;
        }
        self.pos.y += self.vel_y;
    }

    /// Set upward velocity; callers gate this on phase and gravity
    pub fn apply_impulse(&mut self, impulse_velocity: f32) {
        self.vel_y = impulse_velocity;
    }

    /// Derive the tilt from vertical velocity
    pub fn clamp_rotation(&mut self) {
        self.rotation = (self.vel_y / ROTATION_DIVISOR).clamp(ROTATION_MIN, ROTATION_MAX);
    }

    /// Clamp to the play surface. The floor is checked first and wins.
    pub fn check_bounds(&mut self, surface_height: f32) -> Boundary {
        if self.pos.y + self.size.y >= surface_height {
            // A surface shorter than the actor pins it to the top
            self.pos.y = (surface_height - self.size.y).max(0.0);
            return Boundary::Floor;
        }
        if self.pos.y <= 0.0 {
            self.pos.y = 0.0;
            self.vel_y = 0.0;
            return Boundary::Ceiling;
        }
        Boundary::Clear
    }
}

/// Hover velocity during the gravity-free window at round start.
///
/// Traces half a sine period: a gentle rise that settles back to zero.
#[inline]
pub fn startup_ease(elapsed_ms: f64, delay_ms: f64) -> f32 {
    ((elapsed_ms / delay_ms * std::f64::consts::PI).sin() * -1.0) as f32
}
