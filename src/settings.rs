//! Race tunables
//!
//! Loaded from an optional JSON file; every field falls back to the
//! built-in game constants when missing.

use std::fmt;
use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::CarTuning;

/// Rejected tunable values
#[derive(Debug, Clone, PartialEq)]
pub enum SettingsError {
    /// A velocity, rate or acceleration that must be positive is not
    NonPositive { field: &'static str, value: f32 },
    /// Championship with no levels
    NoLevels,
    /// Simulation rate of zero
    ZeroTickRate,
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::NonPositive { field, value } => {
                write!(f, "{field} must be positive, got {value}")
            }
            SettingsError::NoLevels => write!(f, "levels must be at least 1"),
            SettingsError::ZeroTickRate => write!(f, "tick_rate must be at least 1"),
        }
    }
}

impl std::error::Error for SettingsError {}

/// Race tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Cars ===
    pub player: CarTuning,
    pub computer: CarTuning,
    pub player_start: Vec2,
    pub computer_start: Vec2,

    // === Progression ===
    /// Computer cruising speed added per level
    pub level_speedup: f32,
    /// Levels in a championship
    pub levels: u32,
    /// Simulation ticks per second (drives the level clock)
    pub tick_rate: u32,

    // === Cosmetics ===
    /// Particle effects
    pub particles: bool,
    /// Live particle cap
    pub max_particles: usize,
    /// Seed for particle randomness
    pub particle_seed: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            player: CarTuning {
                max_velocity: PLAYER_MAX_VELOCITY,
                rotation_rate: PLAYER_ROTATION_RATE,
                acceleration: ACCELERATION,
            },
            computer: CarTuning {
                max_velocity: COMPUTER_MAX_VELOCITY,
                rotation_rate: COMPUTER_ROTATION_RATE,
                acceleration: ACCELERATION,
            },
            player_start: PLAYER_START,
            computer_start: COMPUTER_START,

            level_speedup: LEVEL_SPEEDUP,
            levels: LEVELS,
            tick_rate: TICK_RATE,

            particles: true,
            max_particles: 500,
            particle_seed: 0x5eed,
        }
    }
}

impl Settings {
    /// Parse settings from JSON (missing fields use defaults)
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), SettingsError> {
        let positive = [
            ("player.max_velocity", self.player.max_velocity),
            ("player.rotation_rate", self.player.rotation_rate),
            ("player.acceleration", self.player.acceleration),
            ("computer.max_velocity", self.computer.max_velocity),
            ("computer.rotation_rate", self.computer.rotation_rate),
        ];
        for (field, value) in positive {
            if !(value > 0.0) {
                return Err(SettingsError::NonPositive { field, value });
            }
        }
        if self.levels == 0 {
            return Err(SettingsError::NoLevels);
        }
        if self.tick_rate == 0 {
            return Err(SettingsError::ZeroTickRate);
        }
        Ok(())
    }

    /// Load settings from a JSON file, falling back to defaults on any problem
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Could not read settings {}: {}", path.display(), e);
                return Self::default();
            }
        };

        match Self::from_json(&json) {
            Ok(settings) => match settings.validate() {
                Ok(()) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Invalid settings in {}: {}; using defaults", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Could not parse settings {}: {}; using defaults", path.display(), e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_game_constants() {
        let s = Settings::default();
        assert_eq!(s.player.max_velocity, 4.5);
        assert_eq!(s.player.rotation_rate, 4.5);
        assert_eq!(s.computer.max_velocity, 3.0);
        assert_eq!(s.player_start, Vec2::new(180.0, 200.0));
        assert_eq!(s.computer_start, Vec2::new(150.0, 200.0));
        assert_eq!(s.levels, 10);
        assert!(s.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let s = Settings::from_json(r#"{ "levels": 3, "particles": false }"#).unwrap();
        assert_eq!(s.levels, 3);
        assert!(!s.particles);
        assert_eq!(s.player.max_velocity, 4.5);
        assert_eq!(s.tick_rate, 60);
    }

    #[test]
    fn test_json_round_trip() {
        let mut s = Settings::default();
        s.level_speedup = 0.5;
        s.computer_start = Vec2::new(10.0, 20.0);
        let back = Settings::from_json(&s.to_json()).unwrap();
        assert_eq!(back, s);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut s = Settings::default();
        s.player.acceleration = 0.0;
        assert_eq!(
            s.validate(),
            Err(SettingsError::NonPositive {
                field: "player.acceleration",
                value: 0.0
            })
        );

        let mut s = Settings::default();
        s.levels = 0;
        assert_eq!(s.validate(), Err(SettingsError::NoLevels));

        let mut s = Settings::default();
        s.tick_rate = 0;
        assert_eq!(s.validate(), Err(SettingsError::ZeroTickRate));
    }

    #[test]
    fn test_load_missing_file_falls_back() {
        let s = Settings::load("/nonexistent/track-racer-settings.json");
        assert_eq!(s, Settings::default());
    }
}
