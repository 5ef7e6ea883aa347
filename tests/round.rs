use gate_flyer::consts::*;
use gate_flyer::sim::{GameEvent, GamePhase, Simulation, Surface, autopilot, spawn_due, tick};
use proptest::prelude::*;

const FRAME_MS: f64 = 1000.0 / 60.0;

/// Fly one round with the autopilot, returning the sim and every event seen
fn autopilot_round(seed: u64, max_frames: u64) -> (Simulation, Vec<GameEvent>) {
    let mut sim = Simulation::new(seed, Surface::new(1280.0, 800.0));
    sim.activate(0.0);
    let mut events = sim.take_events();
    let mut frame = 0;
    while sim.is_running() && frame < max_frames {
        let now = frame as f64 * FRAME_MS;
        if autopilot::should_activate(&sim.snapshot()) {
            sim.activate(now);
        }
        tick(&mut sim, now);
        events.extend(sim.take_events());
        frame += 1;
    }
    (sim, events)
}

#[test]
fn test_idle_actor_hits_the_floor() {
    let mut sim = Simulation::new(1, Surface::new(1280.0, 800.0));
    sim.activate(0.0);
    assert_eq!(sim.take_events(), vec![GameEvent::RoundStarted]);
    let mut frame = 0;
    while sim.is_running() {
        tick(&mut sim, frame as f64 * FRAME_MS);
        frame += 1;
        assert!(frame < 1000, "round never ended");
    }
    assert_eq!(sim.phase(), GamePhase::Ended);
    assert_eq!(sim.round.actor.pos.y, 800.0 - ACTOR_HEIGHT);
    assert_eq!(sim.round.score, 0);
    assert_eq!(
        sim.take_events(),
        vec![GameEvent::Ended { score: 0 }],
        "ended exactly once"
    );
}

#[test]
fn test_autopilot_clears_gates() {
    let (sim, events) = autopilot_round(42, 5000);
    assert!(
        sim.round.score >= 10,
        "autopilot scored only {} ({:?})",
        sim.round.score,
        sim.phase()
    );
    assert_eq!(events.first(), Some(&GameEvent::RoundStarted));
}

#[test]
fn test_restart_after_round_is_clean() {
    let (mut sim, _) = autopilot_round(7, 600);
    // Force an ending if the pilot is still going
    if sim.is_running() {
        sim.round.actor.pos.y = 790.0;
        tick(&mut sim, 600.0 * FRAME_MS);
    }
    assert!(sim.phase().is_terminal());
    sim.take_events();

    sim.activate(20_000.0);
    assert_eq!(sim.phase(), GamePhase::Playing);
    assert_eq!(sim.round.score, 0);
    assert_eq!(sim.round.frame, 0);
    assert!(sim.round.obstacles.is_empty());
    assert_eq!(sim.round.actor.pos.y, 400.0 - ACTOR_HEIGHT / 2.0);
    assert_eq!(sim.take_events(), vec![GameEvent::RoundStarted]);
}

#[test]
fn test_restart_after_win_is_clean() {
    let (mut sim, events) = autopilot_round(42, 5000);
    assert_eq!(sim.phase(), GamePhase::Won);
    assert_eq!(sim.round.score, WIN_SCORE);
    assert_eq!(events.last(), Some(&GameEvent::Won { score: WIN_SCORE }));

    sim.activate(1_000_000.0);
    assert_eq!(sim.phase(), GamePhase::Playing);
    assert_eq!(sim.take_events(), vec![GameEvent::RoundStarted]);
    assert_eq!(sim.round.score, 0);
    assert_eq!(sim.round.frame, 0);
    assert!(sim.round.obstacles.is_empty());
    assert_eq!(sim.round.actor.pos.y, 400.0 - ACTOR_HEIGHT / 2.0);
    assert_eq!(sim.round.actor.vel_y, 0.0);
    assert!(!sim.round.gravity_enabled);
    assert_eq!(sim.round.started_at_ms, 1_000_000.0);
}

#[test]
fn test_surface_shorter_than_actor() {
    let mut sim = Simulation::new(3, Surface::new(300.0, 140.0));
    sim.activate(0.0);
    tick(&mut sim, 0.0);
    assert_eq!(sim.phase(), GamePhase::Ended);
    assert_eq!(sim.round.actor.pos.y, 0.0);
}

#[test]
fn test_same_seed_same_round() {
    let (a, a_events) = autopilot_round(2024, 3000);
    let (b, b_events) = autopilot_round(2024, 3000);
    assert_eq!(a.snapshot(), b.snapshot());
    assert_eq!(a_events, b_events);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_score_monotonic_and_once_per_obstacle(
        seed in any::<u64>(),
        taps in proptest::collection::vec(any::<bool>(), 600..1200),
    ) {
        let mut sim = Simulation::new(seed, Surface::new(1280.0, 800.0));
        sim.activate(0.0);
        sim.take_events();

        let mut last_score = 0;
        let mut spawned = 0;
        for (i, tap) in taps.iter().enumerate() {
            if !sim.is_running() {
                break;
            }
            let now = i as f64 * FRAME_MS;
            // Every 20th tap only, so the actor can actually fall
            if *tap && i % 20 == 0 {
                sim.activate(now);
            }
            if spawn_due(sim.round.frame) {
                spawned += 1;
            }
            tick(&mut sim, now);

            prop_assert!(sim.round.score >= last_score);
            prop_assert!(sim.round.score <= spawned);
            for event in sim.take_events() {
                if let GameEvent::Scored { score } = event {
                    last_score += 1;
                    prop_assert_eq!(score, last_score);
                }
            }
            prop_assert_eq!(sim.round.score, last_score);
        }
    }

    #[test]
    fn prop_actor_stays_on_surface(seed in any::<u64>(), height in 600.0f32..1400.0) {
        let mut sim = Simulation::new(seed, Surface::new(1280.0, height));
        sim.activate(0.0);
        for i in 0..800u64 {
            if !sim.is_running() {
                break;
            }
            let now = i as f64 * FRAME_MS;
            if i % 9 == 0 {
                sim.activate(now);
            }
            tick(&mut sim, now);
            let y = sim.round.actor.pos.y;
            prop_assert!(y >= 0.0);
            prop_assert!(y <= height - ACTOR_HEIGHT);
        }
    }
}
