//! Read-only views of the simulation for presentation

use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::state::{GamePhase, RoundState, Surface};
use crate::consts::*;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActorView {
    /// Sprite bounds (unrotated)
    pub rect: Rect,
    pub rotation: f32,
    pub vel_y: f32,
    pub hitbox: Rect,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObstacleView {
    pub x: f32,
    pub width: f32,
    pub gap_top: f32,
    pub gap_bottom: f32,
    pub passed: bool,
}

impl ObstacleView {
    pub fn gap_center(&self) -> f32 {
        (self.gap_top + self.gap_bottom) / 2.0
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub score: u32,
    pub surface: Surface,
    pub actor: ActorView,
    /// Oldest first
    pub obstacles: Vec<ObstacleView>,
}

impl Snapshot {
    pub fn capture(round: &RoundState, surface: Surface) -> Self {
        Self {
            phase: round.phase,
            score: round.score,
            surface,
            actor: ActorView {
                rect: round.actor.rect(),
                rotation: round.actor.rotation,
                vel_y: round.actor.vel_y,
                hitbox: round.actor.hitbox(),
            },
            obstacles: round
                .obstacles
                .iter()
                .map(|o| ObstacleView {
                    x: o.x,
                    width: OBSTACLE_WIDTH,
                    gap_top: o.gap_y,
                    gap_bottom: o.gap_bottom(),
                    passed: o.passed,
                })
                .collect(),
        }
    }
}
