//! Race state and core simulation types

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::car::Car;
use super::particles::ParticleSystem;
use super::path::ComputerCar;
use crate::assets::{CarColor, TrackAssets};
use crate::settings::Settings;
use crate::track_path;

/// Current phase of the race
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RacePhase {
    /// Waiting for the start input at the current level
    NotStarted,
    /// Cars are driving
    Running,
    /// Every level cleared; only `reset` leaves this phase
    Finished,
}

/// Things that happened during a tick, for the renderer to react to
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum RaceEvent {
    /// Player hit the track border and was pushed back
    BorderBounce { pos: Vec2 },
    /// Player touched the finish line edge-on and was pushed back
    FinishGraze { pos: Vec2 },
    /// Computer car reached the finish first; race restarts at level 1
    Lost { level: u32 },
    /// Player crossed the finish line
    LevelComplete { level: u32, seconds: u64 },
    /// Player cleared the final level
    Finished,
}

/// Level progression and level clock
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameInfo {
    /// Current level, 1-based; above `levels` means finished
    pub level: u32,
    pub levels: u32,
    pub started: bool,
    /// Ticks since the level started
    level_ticks: u64,
    tick_rate: u32,
}

impl GameInfo {
    pub fn new(levels: u32, tick_rate: u32) -> Self {
        Self {
            level: 1,
            levels,
            started: false,
            level_ticks: 0,
            tick_rate: tick_rate.max(1),
        }
    }

    pub fn next_level(&mut self) {
        self.level += 1;
        self.started = false;
    }

    pub fn reset(&mut self) {
        self.level = 1;
        self.started = false;
        self.level_ticks = 0;
    }

    pub fn game_finished(&self) -> bool {
        self.level > self.levels
    }

    pub fn start_level(&mut self) {
        self.started = true;
        self.level_ticks = 0;
    }

    /// Advance the level clock by one tick
    pub fn advance_clock(&mut self) {
        if self.started {
            self.level_ticks += 1;
        }
    }

    /// Whole seconds since the level started (0 before start)
    pub fn get_level_time(&self) -> u64 {
        if !self.started {
            return 0;
        }
        (self.level_ticks as f64 / self.tick_rate as f64).round() as u64
    }
}

/// Complete race state
#[derive(Debug, Clone)]
pub struct RaceState {
    pub info: GameInfo,
    pub phase: RacePhase,
    pub player: Car,
    pub computer: ComputerCar,
    /// Visual particles (not gameplay-affecting)
    pub particles: ParticleSystem,
    /// Events raised by the most recent tick
    pub events: Vec<RaceEvent>,
    /// Simulation tick counter
    pub time_ticks: u64,
}

impl RaceState {
    /// Race on the fixed track path
    pub fn new(settings: &Settings, assets: &TrackAssets, player_color: CarColor) -> Self {
        Self::with_path(settings, assets, player_color, track_path())
    }

    /// Race with a custom computer path
    pub fn with_path(
        settings: &Settings,
        assets: &TrackAssets,
        player_color: CarColor,
        path: Vec<Vec2>,
    ) -> Self {
        let player = Car::new(
            settings.player,
            settings.player_start,
            assets.car_mask(player_color).clone(),
        );
        let computer = ComputerCar::new(
            settings.computer,
            settings.computer_start,
            assets.car_mask(CarColor::COMPUTER).clone(),
            path,
            settings.level_speedup,
        );

        Self {
            info: GameInfo::new(settings.levels, settings.tick_rate),
            phase: RacePhase::NotStarted,
            player,
            computer,
            particles: ParticleSystem::new(
                settings.particle_seed,
                settings.particles,
                settings.max_particles,
            ),
            events: Vec::new(),
            time_ticks: 0,
        }
    }

    /// Begin the current level if it is waiting to start
    pub fn start_level(&mut self) {
        if self.phase == RacePhase::NotStarted {
            self.info.start_level();
            self.phase = RacePhase::Running;
            log::info!("Level {} started", self.info.level);
        }
    }

    /// Back to level 1 with both cars on the grid
    pub fn reset(&mut self) {
        self.info.reset();
        self.player.reset();
        self.computer.reset();
        self.particles.clear();
        self.phase = RacePhase::NotStarted;
    }
}
