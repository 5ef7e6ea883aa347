//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per rendered frame, spacing driven by the frame counter
//! - Seeded RNG only
//! - Obstacles kept oldest-first
//! - No rendering, audio or platform dependencies

pub mod actor;
pub mod autopilot;
pub mod collision;
pub mod obstacle;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use actor::{Actor, Boundary, startup_ease};
pub use collision::{Insets, Rect, overlaps};
pub use obstacle::{Obstacle, advance, reap_offscreen, spawn_due};
pub use snapshot::{ActorView, ObstacleView, Snapshot};
pub use state::{GameEvent, GamePhase, PhaseHooks, RoundState, Simulation, Surface};
pub use tick::tick;
