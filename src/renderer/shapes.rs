//! Draw primitives for one frame
//!
//! Turns a `Snapshot` into a flat list of commands so the drawing backend stays
//! a thin loop over canvas calls.

use glam::Vec2;

use crate::sim::{GamePhase, Rect, Snapshot};

/// Sky color used when the background image is unavailable
pub const SKY_COLOR: &str = "#70c5ce";
/// Gate color used when the obstacle image is unavailable
pub const GATE_COLOR: &str = "#5a8f29";
/// Actor color used when the sprite is unavailable
pub const ACTOR_COLOR: &str = "#f4c542";
/// Sprite corner rounding
pub const ACTOR_CORNER_RADIUS: f32 = 30.0;

/// A single drawing step
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    /// Fill the whole surface
    Background { width: f32, height: f32 },
    /// One obstacle segment
    Gate(Rect),
    /// Actor sprite, rotated about its center and clipped to a rounded rect
    Actor {
        center: Vec2,
        size: Vec2,
        rotation: f32,
        corner_radius: f32,
    },
    /// Debug outline of the collision hitbox
    Hitbox(Rect),
    /// Score readout, top-left
    Score(String),
}

/// Build the command list for a snapshot
pub fn frame(snapshot: &Snapshot, show_hitbox: bool) -> Vec<DrawCmd> {
    let surface = snapshot.surface;
    let mut cmds = Vec::with_capacity(snapshot.obstacles.len() * 2 + 4);
    cmds.push(DrawCmd::Background {
        width: surface.width,
        height: surface.height,
    });

    for obstacle in &snapshot.obstacles {
        cmds.push(DrawCmd::Gate(Rect::new(
            obstacle.x,
            0.0,
            obstacle.width,
            obstacle.gap_top,
        )));
        let bottom_height = surface.height - obstacle.gap_bottom;
        if bottom_height > 0.0 {
            cmds.push(DrawCmd::Gate(Rect::new(
                obstacle.x,
                obstacle.gap_bottom,
                obstacle.width,
                bottom_height,
            )));
        }
    }

    let actor = &snapshot.actor;
    cmds.push(DrawCmd::Actor {
        center: actor.rect.center(),
        size: actor.rect.size,
        rotation: actor.rotation,
        corner_radius: ACTOR_CORNER_RADIUS,
    });
    if show_hitbox {
        cmds.push(DrawCmd::Hitbox(actor.hitbox));
    }

    // Start screen covers the HUD before the first round
    if snapshot.phase != GamePhase::Ready {
        cmds.push(DrawCmd::Score(score_label(snapshot.score)));
    }
    cmds
}

pub fn score_label(score: u32) -> String {
    format!("Score: {}", score)
}

/// Rounded rectangle centered on the origin.
///
/// Returns the `move_to` start point and, per corner, a line end followed by
/// the quadratic curve's control and end points.
pub fn rounded_rect_path(size: Vec2, radius: f32) -> (Vec2, Vec<(Vec2, Vec2, Vec2)>) {
    let r = radius.min(size.x / 2.0).min(size.y / 2.0);
    let x = -size.x / 2.0;
    let y = -size.y / 2.0;
    let (w, h) = (size.x, size.y);

    let start = Vec2::new(x + r, y);
    // (line end, curve control, curve end) per corner, clockwise from top-right
    let corners = vec![
        (Vec2::new(x + w - r, y), Vec2::new(x + w, y), Vec2::new(x + w, y + r)),
        (
            Vec2::new(x + w, y + h - r),
            Vec2::new(x + w, y + h),
            Vec2::new(x + w - r, y + h),
        ),
        (Vec2::new(x + r, y + h), Vec2::new(x, y + h), Vec2::new(x, y + h - r)),
        (Vec2::new(x, y + r), Vec2::new(x, y), Vec2::new(x + r, y)),
    ];
    (start, corners)
}
