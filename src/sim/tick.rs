//! Fixed timestep simulation tick
//!
//! Drives the race state machine: player input, computer path following,
//! then collision outcomes against the border and finish masks.

use glam::Vec2;

use super::car::Steer;
use super::state::{RaceEvent, RacePhase, RaceState};
use crate::assets::TrackAssets;

/// Player intents for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub steer_left: bool,
    pub steer_right: bool,
    pub throttle_forward: bool,
    pub throttle_backward: bool,
    /// Start the level (any key on the start screen)
    pub start: bool,
}

/// Advance the race by one tick.
///
/// Events raised during the tick are left in `state.events`.
pub fn tick(state: &mut RaceState, assets: &TrackAssets, input: &TickInput) {
    state.events.clear();

    match state.phase {
        RacePhase::Finished => return,
        RacePhase::NotStarted => {
            if !input.start {
                return;
            }
            state.start_level();
        }
        RacePhase::Running => {}
    }

    state.time_ticks += 1;
    state.info.advance_clock();

    // Cosmetics first so this tick's spawns render at the pre-move pose
    state.particles.update();
    let player = &state.player;
    let computer = &state.computer.car;
    state
        .particles
        .add_exhaust(player.pos, player.angle, player.velocity);
    state
        .particles
        .add_exhaust(computer.pos, computer.angle, computer.velocity);
    state.particles.add_speed(player.pos, player.velocity);

    drive_player(state, input);
    state.computer.step();

    handle_collisions(state, assets);

    if state.info.game_finished() && state.phase != RacePhase::Finished {
        state.phase = RacePhase::Finished;
        state.events.push(RaceEvent::Finished);
        log::info!("All {} levels complete", state.info.levels);
    }
}

fn drive_player(state: &mut RaceState, input: &TickInput) {
    let car = &mut state.player;
    if input.steer_left {
        car.rotate(Steer::Left);
    }
    if input.steer_right {
        car.rotate(Steer::Right);
    }

    let mut moved = false;
    if input.throttle_forward {
        moved = true;
        car.accelerate_forward();
    }
    if input.throttle_backward {
        moved = true;
        car.accelerate_backward();
    }
    if !moved {
        car.decay_speed();
    }
}

fn handle_collisions(state: &mut RaceState, assets: &TrackAssets) {
    if state.player.collides_with(&assets.border, Vec2::ZERO).is_some() {
        state.player.bounce();
        state.particles.add_collision(state.player.pos);
        state.events.push(RaceEvent::BorderBounce {
            pos: state.player.pos,
        });
        log::debug!("Border bounce at ({:.1}, {:.1})", state.player.pos.x, state.player.pos.y);
    }

    if state
        .computer
        .car
        .collides_with(&assets.finish, assets.finish_position)
        .is_some()
    {
        let level = state.info.level;
        log::info!("Computer reached the finish first on level {}", level);
        state.reset();
        state.events.push(RaceEvent::Lost { level });
        return;
    }

    let Some(poi) = state
        .player
        .collides_with(&assets.finish, assets.finish_position)
    else {
        return;
    };

    if poi.y == 0 {
        // Touching the top edge of the line is a graze, not a crossing
        state.player.bounce();
        state.particles.add_collision(state.player.pos);
        state.events.push(RaceEvent::FinishGraze {
            pos: state.player.pos,
        });
        return;
    }

    let level = state.info.level;
    let seconds = state.info.get_level_time();
    log::info!("Level {} complete in {}s", level, seconds);

    state.info.next_level();
    state.player.reset();
    state.computer.next_level(state.info.level);
    state.phase = RacePhase::NotStarted;
    state.events.push(RaceEvent::LevelComplete { level, seconds });
}
