//! Track Racer headless runner
//!
//! Runs the simulation without a renderer: the player car idles on the grid
//! while the computer car drives the track, and race events are logged.
//!
//! Usage: `track-racer [settings.json]`

use anyhow::Context;
use glam::Vec2;

use track_racer::consts::FINISH_POSITION;
use track_racer::hud;
use track_racer::sim::{RaceEvent, RacePhase, RaceState, TickInput, tick};
use track_racer::{CarColor, Settings, TrackAssets};

/// Stand-in dimensions for the decoded images
const TRACK_SIZE: (u32, u32) = (810, 810);
const WALL: u32 = 8;
const CAR_SIZE: (u32, u32) = (20, 38);
const FINISH_SIZE: (u32, u32) = (64, 16);

/// Give up after this many simulated seconds
const MAX_SECONDS: u64 = 120;

fn main() -> anyhow::Result<()> {
    env_logger::init();
    log::info!("Track Racer (headless) starting...");

    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::load(path),
        None => Settings::default(),
    };
    settings.validate().context("invalid settings")?;

    let assets = TrackAssets::procedural(TRACK_SIZE, WALL, CAR_SIZE, FINISH_SIZE, FINISH_POSITION);
    let mut state = RaceState::new(&settings, &assets, CarColor::default());

    let start = TickInput {
        start: true,
        ..Default::default()
    };
    let idle = TickInput::default();

    let max_ticks = MAX_SECONDS * settings.tick_rate as u64;
    for i in 0..max_ticks {
        let input = if state.phase == RacePhase::NotStarted {
            &start
        } else {
            &idle
        };
        tick(&mut state, &assets, input);

        for event in &state.events {
            log::info!("tick {}: {:?}", i, event);
        }
        if state.events.iter().any(|e| matches!(e, RaceEvent::Lost { .. })) {
            break;
        }

        if i % settings.tick_rate as u64 == 0 {
            let car = &state.computer.car;
            log::debug!(
                "computer at ({:.1}, {:.1}) angle {:.1} waypoint {}/{} - player {}",
                car.pos.x,
                car.pos.y,
                car.angle,
                state.computer.follower.current_waypoint_index(),
                state.computer.follower.path().len(),
                hud::race_position(&state.player, car, assets.finish_position).as_str(),
            );
        }
    }

    let car = &state.computer.car;
    println!(
        "Finished after {} ticks: level {}, computer at {:?}, waypoint {}/{}, {} particles live",
        state.time_ticks,
        state.info.level,
        Vec2::new(car.pos.x.round(), car.pos.y.round()),
        state.computer.follower.current_waypoint_index(),
        state.computer.follower.path().len(),
        state.particles.len(),
    );
    Ok(())
}
