//! Idle/demo mode - a simple pilot that flies through the gaps
//!
//! Works only from snapshots, so it sees exactly what a player sees.

use super::snapshot::{ObstacleView, Snapshot};
use super::state::GamePhase;

/// How far below the gap center the hitbox center may sink before flapping
const FLAP_BELOW_CENTER: f32 = 30.0;
/// Emergency clearance above the floor
const FLOOR_GUARD: f32 = 60.0;

/// The obstacle the actor must get through next
pub fn next_obstacle(snapshot: &Snapshot) -> Option<&ObstacleView> {
    let hitbox_left = snapshot.actor.hitbox.left();
    snapshot.obstacles.iter().find(|o| o.right() > hitbox_left)
}

/// Whether the pilot wants to activate this frame
pub fn should_activate(snapshot: &Snapshot) -> bool {
    match snapshot.phase {
        // Start (or restart) is left to the host
        GamePhase::Ready | GamePhase::Ended | GamePhase::Won => false,
        GamePhase::Playing => {
            let hitbox = snapshot.actor.hitbox;
            if hitbox.bottom() > snapshot.surface.height - FLOOR_GUARD {
                return true;
            }
            // Only flap once the previous flap has run out of lift
            if snapshot.actor.vel_y < 0.0 {
                return false;
            }
            let target = next_obstacle(snapshot)
                .map(ObstacleView::gap_center)
                .unwrap_or(snapshot.surface.height / 2.0);
            hitbox.center().y > target + FLAP_BELOW_CENTER
        }
    }
}
