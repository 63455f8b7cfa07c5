//! Figures the HUD displays, derived from race state
//!
//! Read-only; nothing here feeds back into the simulation.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::{Car, GameInfo};

/// Colour band for the speed readout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpeedBand {
    Normal,
    Fast,
    VeryFast,
}

/// Who is closer to the finish line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RacePosition {
    Leading,
    Behind,
}

impl RacePosition {
    pub fn as_str(&self) -> &'static str {
        match self {
            RacePosition::Leading => "LEADING",
            RacePosition::Behind => "BEHIND",
        }
    }
}

/// Speed rounded to one decimal, as displayed
pub fn display_speed(car: &Car) -> f32 {
    (car.velocity * 10.0).round() / 10.0
}

/// Fraction of top speed, for the speed bar (0 while reversing)
pub fn speed_ratio(car: &Car) -> f32 {
    (car.velocity / car.tuning.max_velocity).clamp(0.0, 1.0)
}

pub fn speed_band(speed: f32) -> SpeedBand {
    if speed > 4.0 {
        SpeedBand::VeryFast
    } else if speed > 3.0 {
        SpeedBand::Fast
    } else {
        SpeedBand::Normal
    }
}

/// Straight-line comparison of each car's distance to the finish placement
pub fn race_position(player: &Car, computer: &Car, finish: Vec2) -> RacePosition {
    if player.pos.distance(finish) < computer.pos.distance(finish) {
        RacePosition::Leading
    } else {
        RacePosition::Behind
    }
}

/// Championship progress as a whole percentage
pub fn level_progress(info: &GameInfo) -> u32 {
    let levels = info.levels.max(1);
    info.level.min(levels) * 100 / levels
}
