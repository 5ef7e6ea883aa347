//! Gate Flyer - A one-button arcade flyer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, obstacles, round state)
//! - `renderer`: Canvas 2D presentation of simulation snapshots
//! - `audio`: Procedural sound cues driven by phase events
//! - `settings`: Player preferences (volume, overlays)

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Downward acceleration added to velocity each tick (units/tick²)
    pub const GRAVITY: f32 = 0.5;
    /// Velocity set by an impulse (negative is up)
    pub const FLAP_VELOCITY: f32 = -10.0;

    /// Actor defaults
    pub const ACTOR_X: f32 = 150.0;
    pub const ACTOR_WIDTH: f32 = 150.0;
    pub const ACTOR_HEIGHT: f32 = 150.0;
    /// Rotation bounds (radians), derived from velocity / ROTATION_DIVISOR
    pub const ROTATION_MIN: f32 = -0.5;
    pub const ROTATION_MAX: f32 = 1.2;
    pub const ROTATION_DIVISOR: f32 = 10.0;

    /// Obstacle defaults
    pub const OBSTACLE_WIDTH: f32 = 80.0;
    pub const OBSTACLE_SPEED: f32 = 3.0;
    /// Extra distance past the left edge before an obstacle is dropped
    pub const OBSTACLE_REAP_SLACK: f32 = 50.0;
    /// Clearance kept between the gap and the ceiling/floor
    pub const GAP_MARGIN: f32 = 120.0;
    /// Gap height floor and surface-relative share
    pub const MIN_GAP_HEIGHT: f32 = 280.0;
    pub const GAP_HEIGHT_RATIO: f32 = 0.35;

    /// Spawn cadence in frames
    pub const FIRST_SPAWN_FRAME: u64 = 30;
    pub const SPAWN_INTERVAL_FRAMES: u64 = 120;

    /// Gravity-free hover window at round start (ms)
    pub const STARTUP_DELAY_MS: f64 = 1000.0;

    /// Score that wins the round
    pub const WIN_SCORE: u32 = 23;

    /// Actor hitbox insets as fractions of its size (transparent sprite padding)
    pub const HITBOX_INSET_TOP: f32 = 0.30;
    pub const HITBOX_INSET_BOTTOM: f32 = 0.20;
    pub const HITBOX_INSET_LEFT: f32 = 0.30;
    pub const HITBOX_INSET_RIGHT: f32 = 0.30;
}

/// Gap height for a play surface of the given height
#[inline]
pub fn gap_height_for(surface_height: f32) -> f32 {
    consts::MIN_GAP_HEIGHT.max(surface_height * consts::GAP_HEIGHT_RATIO)
}
