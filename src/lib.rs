//! Track Racer - a top-down racing game core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (mask collision, car kinematics, path following, race state)
//! - `assets`: Opacity masks handed over by the presentation layer
//! - `settings`: Data-driven tunables
//! - `hud`: Read-only figures derived from race state for display

pub mod assets;
pub mod hud;
pub mod settings;
pub mod sim;

pub use assets::{CarColor, TrackAssets};
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    use glam::Vec2;

    /// Fixed simulation rate (ticks per second)
    pub const TICK_RATE: u32 = 60;

    /// Number of levels in a championship
    pub const LEVELS: u32 = 10;

    /// Placement of the finish-line mask on the track
    pub const FINISH_POSITION: Vec2 = Vec2::new(130.0, 250.0);

    /// Start poses (top-left of the sprite, facing up)
    pub const PLAYER_START: Vec2 = Vec2::new(180.0, 200.0);
    pub const COMPUTER_START: Vec2 = Vec2::new(150.0, 200.0);

    /// Player tunables
    pub const PLAYER_MAX_VELOCITY: f32 = 4.5;
    pub const PLAYER_ROTATION_RATE: f32 = 4.5;

    /// Computer tunables (max velocity doubles as the level-1 cruising speed)
    pub const COMPUTER_MAX_VELOCITY: f32 = 3.0;
    pub const COMPUTER_ROTATION_RATE: f32 = 3.0;

    /// Shared throttle step per tick
    pub const ACCELERATION: f32 = 0.1;

    /// Computer cruising speed gained per level
    pub const LEVEL_SPEEDUP: f32 = 0.2;

    /// Waypoints the computer car drives through, in order
    pub const TRACK_PATH: [(i32, i32); 21] = [
        (164, 121),
        (68, 136),
        (68, 479),
        (294, 707),
        (392, 670),
        (419, 535),
        (539, 480),
        (606, 679),
        (654, 729),
        (731, 643),
        (739, 404),
        (458, 365),
        (417, 273),
        (688, 253),
        (732, 136),
        (665, 76),
        (350, 76),
        (287, 163),
        (276, 380),
        (192, 396),
        (166, 251),
    ];
}

/// The fixed track path as world-space points
pub fn track_path() -> Vec<Vec2> {
    consts::TRACK_PATH
        .iter()
        .map(|&(x, y)| Vec2::new(x as f32, y as f32))
        .collect()
}

/// Displacement of one unit of velocity along a heading in degrees.
///
/// Angle 0 faces screen "up" (decreasing y) and positive angles turn
/// counter-clockwise toward decreasing x.
#[inline]
pub fn heading(angle_degrees: f32) -> Vec2 {
    let (sin, cos) = angle_degrees.to_radians().sin_cos();
    Vec2::new(-sin, -cos)
}

/// Fold an angle difference (degrees) so values above 180 take the short way round
#[inline]
pub fn shortest_turn(mut diff_degrees: f32) -> f32 {
    if diff_degrees > 180.0 {
        diff_degrees -= 360.0;
    }
    diff_degrees
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_up_is_negative_y() {
        let h = heading(0.0);
        assert!(h.x.abs() < 1e-6);
        assert!((h.y + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_heading_ninety_is_negative_x() {
        let h = heading(90.0);
        assert!((h.x + 1.0).abs() < 1e-6);
        assert!(h.y.abs() < 1e-6);
    }

    #[test]
    fn test_shortest_turn() {
        assert_eq!(shortest_turn(190.0), -170.0);
        assert_eq!(shortest_turn(180.0), 180.0);
        assert_eq!(shortest_turn(-90.0), -90.0);
    }

    #[test]
    fn test_track_path_len() {
        assert_eq!(track_path().len(), 21);
        assert_eq!(track_path()[0], Vec2::new(164.0, 121.0));
    }
}
