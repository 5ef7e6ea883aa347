//! Per-frame simulation tick
//!
//! Advances the live round exactly once per rendered frame. Obstacle spacing
//! depends on the frame count, not on wall-clock time; only the startup hover
//! reads the host timestamp.

use super::actor::{Boundary, startup_ease};
use super::collision::{Insets, overlaps};
use super::obstacle::{Obstacle, advance, reap_offscreen, spawn_due};
use super::state::{GameEvent, GamePhase, Simulation};
use crate::consts::*;
use crate::gap_height_for;

/// Advance the simulation by one frame at host time `now_ms`
pub fn tick(sim: &mut Simulation, now_ms: f64) {
    // Ready, Ended and Won are frozen
    if sim.round.phase != GamePhase::Playing {
        return;
    }
    let surface = sim.surface;

    // Startup hover, then gravity
    let elapsed = sim.round.elapsed_ms(now_ms);
    if elapsed < STARTUP_DELAY_MS {
        sim.round.gravity_enabled = false;
        sim.round.actor.vel_y = startup_ease(elapsed, STARTUP_DELAY_MS);
    } else {
        sim.round.gravity_enabled = true;
    }
    let gravity_enabled = sim.round.gravity_enabled;
    sim.round.actor.integrate(gravity_enabled, GRAVITY);
    sim.round.actor.clamp_rotation();

    if sim.round.actor.check_bounds(surface.height) == Boundary::Floor {
        sim.enter(GamePhase::Ended);
        return;
    }

    if spawn_due(sim.round.frame) {
        let gap_height = gap_height_for(surface.height);
        let obstacle = Obstacle::spawn(surface.width, surface.height, gap_height, &mut sim.rng);
        log::debug!(
            "Spawned obstacle at frame {} (gap {:.0}..{:.0})",
            sim.round.frame,
            obstacle.gap_y,
            obstacle.gap_bottom()
        );
        sim.round.obstacles.push(obstacle);
    }

    advance(&mut sim.round.obstacles, OBSTACLE_SPEED);
    let reaped = reap_offscreen(&mut sim.round.obstacles);
    if reaped > 0 {
        log::debug!("Reaped {} obstacle(s)", reaped);
    }

    let actor_x = sim.round.actor.pos.x;
    let mut won = false;
    for obstacle in sim.round.obstacles.iter_mut() {
        if obstacle.check_passage(actor_x) {
            sim.round.score += 1;
            sim.events.push(GameEvent::Scored {
                score: sim.round.score,
            });
            if sim.round.score >= WIN_SCORE {
                won = true;
                break;
            }
        }
    }
    if won {
        sim.enter(GamePhase::Won);
        return;
    }

    let actor = sim.round.actor.rect();
    let hit = sim.round.obstacles.iter().any(|obstacle| {
        overlaps(&actor, &obstacle.top_segment(), Some(&Insets::ACTOR))
            || overlaps(
                &actor,
                &obstacle.bottom_segment(surface.height),
                Some(&Insets::ACTOR),
            )
    });
    if hit {
        sim.enter(GamePhase::Ended);
        return;
    }

    sim.round.frame += 1;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Surface;

    const FRAME_MS: f64 = 1000.0 / 60.0;

    fn playing_sim(seed: u64) -> Simulation {
        let mut sim = Simulation::new(seed, Surface::new(1200.0, 800.0));
        sim.activate(0.0);
        sim.take_events();
        sim
    }

    #[test]
    fn test_ready_is_frozen() {
        let mut sim = Simulation::new(1, Surface::new(1200.0, 800.0));
        let before = sim.round.actor.pos;
        tick(&mut sim, 500.0);
        assert_eq!(sim.round.actor.pos, before);
        assert_eq!(sim.round.frame, 0);
        assert_eq!(sim.phase(), GamePhase::Ready);
    }

    #[test]
    fn test_hover_window_ignores_gravity() {
        let mut sim = playing_sim(3);
        for i in 1..=50 {
            let t = i as f64 * 16.0;
            tick(&mut sim, t);
            assert!(!sim.round.gravity_enabled);
            let expected = startup_ease(t, STARTUP_DELAY_MS);
            assert!((sim.round.actor.vel_y - expected).abs() < 1e-6);
        }
        // Hover only rises, so the actor sits above its starting point
        assert!(sim.round.actor.pos.y < 325.0);

        tick(&mut sim, 1000.0);
        assert!(sim.round.gravity_enabled);
    }

    #[test]
    fn test_gravity_after_hover() {
        let mut sim = playing_sim(3);
        sim.round.actor.vel_y = 0.0;
        tick(&mut sim, 1500.0);
        assert!(sim.round.gravity_enabled);
        assert_eq!(sim.round.actor.vel_y, GRAVITY);
    }

    #[test]
    fn test_floor_ends_round() {
        let mut sim = playing_sim(5);
        sim.round.actor.pos.y = 790.0 - ACTOR_HEIGHT;
        sim.round.actor.vel_y = 12.0;
        tick(&mut sim, 2000.0);
        assert_eq!(sim.phase(), GamePhase::Ended);
        assert_eq!(sim.round.actor.pos.y, 800.0 - ACTOR_HEIGHT);
        assert_eq!(sim.take_events(), vec![GameEvent::Ended { score: 0 }]);

        // Frozen afterwards
        tick(&mut sim, 2016.0);
        assert_eq!(sim.round.actor.pos.y, 800.0 - ACTOR_HEIGHT);
        assert!(sim.take_events().is_empty());
    }

    #[test]
    fn test_first_spawn_at_frame_30() {
        let mut sim = playing_sim(9);
        for i in 0..30 {
            tick(&mut sim, i as f64 * FRAME_MS);
            assert!(sim.round.obstacles.is_empty());
        }
        tick(&mut sim, 30.0 * FRAME_MS);
        assert_eq!(sim.round.obstacles.len(), 1);
        // Spawned at the right edge, then advanced once
        assert_eq!(sim.round.obstacles[0].x, 1200.0 - OBSTACLE_SPEED);
    }

    #[test]
    fn test_passage_scores_once() {
        let mut sim = playing_sim(11);
        sim.round.frame = 1;
        let mut obstacle = Obstacle::with_draw(72.0, 800.0, 280.0, 0.5);
        obstacle.gap_y = 0.0;
        obstacle.gap_height = 800.0;
        sim.round.obstacles.push(obstacle);

        // Right edge 152 -> 149 after advance, left of actor x 150
        tick(&mut sim, 2000.0);
        assert_eq!(sim.round.score, 1);
        for i in 1..10 {
            sim.round.actor.pos.y = 300.0;
            sim.round.actor.vel_y = 0.0;
            tick(&mut sim, 2000.0 + i as f64 * FRAME_MS);
        }
        assert_eq!(sim.round.score, 1);
        assert_eq!(sim.phase(), GamePhase::Playing);
    }

    #[test]
    fn test_win_preempts_collision() {
        let mut sim = playing_sim(13);
        sim.round.frame = 1;
        sim.round.score = WIN_SCORE - 1;
        // About to score, while a second obstacle sits on the actor
        sim.round.obstacles.push(Obstacle::with_draw(72.0, 800.0, 280.0, 0.5));
        let mut blocker = Obstacle::with_draw(200.0, 800.0, 280.0, 0.5);
        blocker.gap_y = 700.0;
        sim.round.obstacles.push(blocker);
        sim.round.actor.pos.y = 300.0;

        tick(&mut sim, 2000.0);
        assert_eq!(sim.phase(), GamePhase::Won);
        assert_eq!(sim.round.score, WIN_SCORE);
        let events = sim.take_events();
        assert_eq!(
            events,
            vec![
                GameEvent::Scored { score: WIN_SCORE },
                GameEvent::Won { score: WIN_SCORE }
            ]
        );
    }

    #[test]
    fn test_collision_ends_round() {
        let mut sim = playing_sim(17);
        sim.round.frame = 1;
        let mut blocker = Obstacle::with_draw(200.0, 800.0, 280.0, 0.5);
        blocker.gap_y = 700.0;
        sim.round.obstacles.push(blocker);
        sim.round.actor.pos.y = 300.0;

        tick(&mut sim, 2000.0);
        assert_eq!(sim.phase(), GamePhase::Ended);
        assert_eq!(sim.round.frame, 1);
    }

    #[test]
    fn test_restart_isolation() {
        let mut sim = playing_sim(19);
        for i in 0..200 {
            tick(&mut sim, i as f64 * FRAME_MS);
            sim.round.actor.pos.y = 300.0;
        }
        sim.round.score = 4;
        sim.round.actor.pos.y = 790.0;
        tick(&mut sim, 4000.0);
        assert_eq!(sim.phase(), GamePhase::Ended);

        sim.activate(5000.0);
        assert_eq!(sim.phase(), GamePhase::Playing);
        assert!(sim.round.obstacles.is_empty());
        assert_eq!(sim.round.score, 0);
        assert_eq!(sim.round.frame, 0);
        assert_eq!(sim.round.actor.pos.y, 400.0 - ACTOR_HEIGHT / 2.0);
        assert_eq!(sim.round.actor.vel_y, 0.0);
        assert!(!sim.round.gravity_enabled);
    }

    #[test]
    fn test_resize_applies_to_next_spawn() {
        let mut sim = playing_sim(23);
        sim.resize(1600.0, 1000.0);
        sim.round.frame = FIRST_SPAWN_FRAME;
        sim.round.actor.pos.y = 300.0;
        tick(&mut sim, 2000.0);
        let obstacle = &sim.round.obstacles[0];
        assert_eq!(obstacle.x, 1600.0 - OBSTACLE_SPEED);
        assert!((obstacle.gap_height - 350.0).abs() < 1e-3);
    }

    #[test]
    fn test_determinism() {
        let mut a = playing_sim(99999);
        let mut b = playing_sim(99999);
        for i in 0..400 {
            let t = i as f64 * FRAME_MS;
            if i % 25 == 0 {
                a.activate(t);
                b.activate(t);
            }
            tick(&mut a, t);
            tick(&mut b, t);
        }
        assert_eq!(a.snapshot(), b.snapshot());
    }
}
