//! End-to-end race flow through the public API

use glam::Vec2;

use track_racer::sim::{Mask, RaceEvent, RacePhase, RaceState, TickInput, tick};
use track_racer::{CarColor, Settings, TrackAssets};

fn assets(finish_position: Vec2) -> TrackAssets {
    let car = Mask::filled(20, 40);
    TrackAssets::new(
        Mask::new(800, 800),
        Mask::filled(64, 16),
        finish_position,
        std::array::from_fn(|_| car.clone()),
    )
}

fn input(forward: bool, backward: bool) -> TickInput {
    TickInput {
        throttle_forward: forward,
        throttle_backward: backward,
        ..Default::default()
    }
}

fn start() -> TickInput {
    TickInput {
        start: true,
        ..Default::default()
    }
}

/// Computer parked straight up the x = 150 column, clear of the player's lane
fn race(assets: &TrackAssets) -> RaceState {
    RaceState::with_path(
        &Settings::default(),
        assets,
        CarColor::Red,
        vec![Vec2::new(150.0, -1000.0)],
    )
}

/// Tick until an event matching `pred` shows up
fn run_until(
    state: &mut RaceState,
    assets: &TrackAssets,
    input: &TickInput,
    max_ticks: usize,
    pred: impl Fn(&RaceEvent) -> bool,
) -> Option<RaceEvent> {
    for _ in 0..max_ticks {
        tick(state, assets, input);
        if let Some(event) = state.events.iter().find(|e| pred(e)) {
            return Some(*event);
        }
    }
    None
}

#[test]
fn test_player_crossing_finish_completes_level() {
    // Finish above the player only: columns 170..234
    let assets = assets(Vec2::new(170.0, 150.0));
    let mut state = race(&assets);
    tick(&mut state, &assets, &start());

    let event = run_until(&mut state, &assets, &input(true, false), 200, |e| {
        matches!(e, RaceEvent::LevelComplete { .. })
    });
    assert!(matches!(event, Some(RaceEvent::LevelComplete { level: 1, .. })));

    assert_eq!(state.info.level, 2);
    assert_eq!(state.phase, RacePhase::NotStarted);
    assert_eq!(state.player.pos, Vec2::new(180.0, 200.0));
    assert_eq!(state.player.velocity, 0.0);
    assert!((state.computer.car.velocity - 3.2).abs() < 1e-5);
    assert_eq!(state.computer.car.pos, Vec2::new(150.0, 200.0));
    assert_eq!(state.computer.follower.current_waypoint_index(), 0);
}

#[test]
fn test_top_edge_contact_is_a_graze() {
    // Finish below the player: reversing into it touches its top row first
    let assets = assets(Vec2::new(170.0, 260.0));
    let mut state = race(&assets);
    tick(&mut state, &assets, &start());

    let event = run_until(&mut state, &assets, &input(false, true), 200, |e| {
        matches!(
            e,
            RaceEvent::FinishGraze { .. } | RaceEvent::LevelComplete { .. }
        )
    });
    assert!(matches!(event, Some(RaceEvent::FinishGraze { .. })));
    assert_eq!(state.phase, RacePhase::Running);
    assert_eq!(state.info.level, 1);
    // Bounced: now moving forward (up), away from the line
    assert!(state.player.velocity > 0.0);
}

#[test]
fn test_computer_reaching_finish_loses_race() {
    // Finish across the computer's column, above the start
    let assets = assets(Vec2::new(130.0, 100.0));
    let mut state = race(&assets);
    state.info.level = 4;
    tick(&mut state, &assets, &start());

    let event = run_until(&mut state, &assets, &TickInput::default(), 200, |e| {
        matches!(e, RaceEvent::Lost { .. })
    });
    assert_eq!(event, Some(RaceEvent::Lost { level: 4 }));
    assert_eq!(state.info.level, 1);
    assert!(!state.info.started);
    assert_eq!(state.phase, RacePhase::NotStarted);
    assert_eq!(state.computer.car.pos, Vec2::new(150.0, 200.0));
    assert_eq!(state.computer.car.velocity, 3.0);
}

#[test]
fn test_clearing_last_level_finishes_championship() {
    let assets = assets(Vec2::new(170.0, 150.0));
    let mut state = race(&assets);
    state.info.level = 10;
    tick(&mut state, &assets, &start());

    let event = run_until(&mut state, &assets, &input(true, false), 200, |e| {
        matches!(e, RaceEvent::Finished)
    });
    assert_eq!(event, Some(RaceEvent::Finished));
    assert!(
        state
            .events
            .contains(&RaceEvent::LevelComplete { level: 10, seconds: 0 })
    );
    assert_eq!(state.phase, RacePhase::Finished);
    assert!(state.info.game_finished());

    // Terminal until reset
    tick(&mut state, &assets, &start());
    assert_eq!(state.phase, RacePhase::Finished);

    state.reset();
    assert_eq!(state.phase, RacePhase::NotStarted);
    assert_eq!(state.info.level, 1);
    assert!(!state.info.started);
}

#[test]
fn test_level_clock_counts_running_ticks() {
    let assets = assets(Vec2::new(20.0, 760.0));
    let mut state = race(&assets);
    assert_eq!(state.info.get_level_time(), 0);

    tick(&mut state, &assets, &start());
    for _ in 0..179 {
        tick(&mut state, &assets, &TickInput::default());
    }
    assert_eq!(state.info.get_level_time(), 3);
}
