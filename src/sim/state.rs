//! Game state and core simulation types
//!
//! `RoundState` holds everything scoped to one round and is rebuilt from scratch
//! on every start. `Simulation` owns the live round, the play surface and the
//! seeded RNG that outlive rounds.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::actor::Actor;
use super::obstacle::Obstacle;
use super::snapshot::Snapshot;
use crate::consts::*;

/// Current phase of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the first activation, nothing moves
    Ready,
    /// Active gameplay
    Playing,
    /// Hit an obstacle or the floor
    Ended,
    /// Reached the winning score
    Won,
}

impl GamePhase {
    /// Whether the round may move from `self` to `to`
    pub fn can_transition(self, to: GamePhase) -> bool {
        matches!(
            (self, to),
            (GamePhase::Ready, GamePhase::Playing)
                | (GamePhase::Playing, GamePhase::Ended)
                | (GamePhase::Playing, GamePhase::Won)
        )
    }

    /// Ended or Won
    pub fn is_terminal(self) -> bool {
        matches!(self, GamePhase::Ended | GamePhase::Won)
    }
}

/// Notifications emitted for collaborators (audio, screens)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    RoundStarted,
    /// Impulse applied
    Flapped,
    Scored { score: u32 },
    Ended { score: u32 },
    Won { score: u32 },
}

impl GameEvent {
    /// Forward to the matching hook
    pub fn dispatch<H: PhaseHooks + ?Sized>(&self, hooks: &mut H) {
        match *self {
            GameEvent::RoundStarted => hooks.on_round_start(),
            GameEvent::Flapped => hooks.on_flap(),
            GameEvent::Scored { score } => hooks.on_score(score),
            GameEvent::Ended { score } => hooks.on_ended(score),
            GameEvent::Won { score } => hooks.on_won(score),
        }
    }
}

/// Fire-and-forget reactions to simulation events.
///
/// Implementors absorb their own failures; nothing flows back into the simulation.
pub trait PhaseHooks {
    fn on_round_start(&mut self) {}
    fn on_flap(&mut self) {}
    fn on_score(&mut self, _score: u32) {}
    fn on_ended(&mut self, _score: u32) {}
    fn on_won(&mut self, _score: u32) {}
}

/// Play surface dimensions in world units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Surface {
    pub width: f32,
    pub height: f32,
}

impl Surface {
    pub fn new(width: f32, height: f32) -> Self {
        debug_assert!(width > 0.0 && height > 0.0, "surface must be positive");
        Self { width, height }
    }
}

/// Everything scoped to one round
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundState {
    pub phase: GamePhase,
    /// Ticks advanced while playing
    pub frame: u64,
    /// Host timestamp (ms) when the round started playing
    pub started_at_ms: f64,
    pub score: u32,
    /// False during the startup hover
    pub gravity_enabled: bool,
    pub actor: Actor,
    /// Oldest (leftmost) first
    pub obstacles: Vec<Obstacle>,
}

impl RoundState {
    /// Fresh round in the Ready phase
    pub fn new(surface: Surface) -> Self {
        Self {
            phase: GamePhase::Ready,
            frame: 0,
            started_at_ms: 0.0,
            score: 0,
            gravity_enabled: false,
            actor: Actor::centered(surface.height),
            obstacles: Vec::new(),
        }
    }

    /// Milliseconds since the round started (never negative)
    pub fn elapsed_ms(&self, now_ms: f64) -> f64 {
        (now_ms - self.started_at_ms).max(0.0)
    }
}

/// The simulation: one live round plus state that survives restarts
#[derive(Debug, Clone)]
pub struct Simulation {
    /// Seed for reproducibility
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub surface: Surface,
    pub round: RoundState,
    pub(crate) events: Vec<GameEvent>,
}

impl Simulation {
    pub fn new(seed: u64, surface: Surface) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            surface,
            round: RoundState::new(surface),
            events: Vec::new(),
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.round.phase
    }

    /// Whether the host should keep scheduling frames
    pub fn is_running(&self) -> bool {
        self.round.phase == GamePhase::Playing
    }

    /// The single input command (tap/click/key).
    ///
    /// Starts a round from Ready, flaps while Playing (once gravity is on) and
    /// restarts from Ended/Won. Causes at most one transition per call.
    pub fn activate(&mut self, now_ms: f64) {
        match self.round.phase {
            GamePhase::Ready | GamePhase::Ended | GamePhase::Won => self.start_round(now_ms),
            GamePhase::Playing => {
                if self.round.gravity_enabled {
                    self.round.actor.apply_impulse(FLAP_VELOCITY);
                    self.events.push(GameEvent::Flapped);
                }
            }
        }
    }

    /// Update the play surface; applies to spawns and floor from the next tick on
    pub fn resize(&mut self, width: f32, height: f32) {
        self.surface = Surface::new(width, height);
        log::debug!("Surface resized to {}x{}", width, height);
    }

    /// Drain events emitted since the last call
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Read-only view for presentation
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.round, self.surface)
    }

    /// Discard the current round and start playing a new one
    fn start_round(&mut self, now_ms: f64) {
        let mut round = RoundState::new(self.surface);
        round.started_at_ms = now_ms;
        self.round = round;
        self.enter(GamePhase::Playing);
    }

    /// Move to `to` if allowed, emitting the matching event
    pub(crate) fn enter(&mut self, to: GamePhase) -> bool {
        let from = self.round.phase;
        if !from.can_transition(to) {
            log::debug!("Ignored transition {:?} -> {:?}", from, to);
            return false;
        }
        self.round.phase = to;

        let score = self.round.score;
        let event = match to {
            GamePhase::Playing => {
                log::info!("Round started (seed {})", self.seed);
                GameEvent::RoundStarted
            }
            GamePhase::Ended => {
                log::info!("Round ended with score {}", score);
                GameEvent::Ended { score }
            }
            GamePhase::Won => {
                log::info!("Round won with score {}", score);
                GameEvent::Won { score }
            }
            GamePhase::Ready => return true,
        };
        self.events.push(event);
        true
    }
}
