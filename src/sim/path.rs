//! Waypoint path following for the computer car
//!
//! Steering is a clamped proportional correction: each tick the car turns
//! toward the active waypoint by at most its rotation rate, never past zero
//! error. A waypoint counts as reached once it falls inside the car's
//! bounding rectangle, so sprite size and path tuning are coupled.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::car::{Car, CarTuning};
use super::mask::Mask;
use crate::shortest_turn;

/// Ordered waypoints plus progress through them
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathFollower {
    path: Vec<Vec2>,
    current: usize,
}

impl PathFollower {
    pub fn new(path: Vec<Vec2>) -> Self {
        if path.is_empty() {
            log::warn!("Path follower created with no waypoints; car will hold position");
        }
        Self { path, current: 0 }
    }

    pub fn path(&self) -> &[Vec2] {
        &self.path
    }

    /// Index of the waypoint being chased (equals path length when done)
    pub fn current_waypoint_index(&self) -> usize {
        self.current
    }

    /// Active target, if any remain
    pub fn target(&self) -> Option<Vec2> {
        self.path.get(self.current).copied()
    }

    pub fn is_exhausted(&self) -> bool {
        self.current >= self.path.len()
    }

    pub fn restart(&mut self) {
        self.current = 0;
    }

    /// Desired heading (degrees) from `pos` toward `target`.
    ///
    /// `atan` only resolves a half turn, so targets below the car get an
    /// extra 180 degrees.
    pub fn desired_angle(pos: Vec2, target: Vec2) -> f32 {
        let diff = target - pos;
        let mut radians = if diff.y == 0.0 {
            std::f32::consts::FRAC_PI_2
        } else {
            (diff.x / diff.y).atan()
        };
        if target.y > pos.y {
            radians += std::f32::consts::PI;
        }
        radians.to_degrees()
    }

    /// Signed heading error toward the active target, folded to the short way round
    pub fn angle_error(&self, car: &Car) -> Option<f32> {
        let target = self.target()?;
        Some(shortest_turn(car.angle - Self::desired_angle(car.pos, target)))
    }

    /// Turn the car toward the active target by at most its rotation rate
    pub fn steer(&self, car: &mut Car) {
        let Some(diff) = self.angle_error(car) else {
            return;
        };
        let step = car.tuning.rotation_rate.min(diff.abs());
        if diff > 0.0 {
            car.angle -= step;
        } else {
            car.angle += step;
        }
    }

    /// Advance to the next waypoint if the car's rectangle covers the target.
    ///
    /// Returns true when the index moved.
    pub fn advance(&mut self, car: &Car) -> bool {
        match self.target() {
            Some(target) if car.bounds_contain(target) => {
                self.current += 1;
                log::debug!(
                    "Waypoint {} reached at ({:.1}, {:.1})",
                    self.current,
                    car.pos.x,
                    car.pos.y
                );
                true
            }
            _ => false,
        }
    }
}

/// The path-following opponent
#[derive(Debug, Clone)]
pub struct ComputerCar {
    pub car: Car,
    pub follower: PathFollower,
    /// Level-1 cruising speed
    base_velocity: f32,
    /// Cruising speed gained per level
    level_speedup: f32,
}

impl ComputerCar {
    pub fn new(
        tuning: CarTuning,
        start: Vec2,
        sprite: Mask,
        path: Vec<Vec2>,
        level_speedup: f32,
    ) -> Self {
        let mut car = Car::new(tuning, start, sprite);
        car.velocity = tuning.max_velocity;
        Self {
            car,
            follower: PathFollower::new(path),
            base_velocity: tuning.max_velocity,
            level_speedup,
        }
    }

    /// Cruising speed for a level (1-based)
    pub fn speed_for_level(&self, level: u32) -> f32 {
        self.base_velocity + level.saturating_sub(1) as f32 * self.level_speedup
    }

    /// One tick: steer, bookkeep waypoints, then move.
    ///
    /// Holds position once the path is exhausted.
    pub fn step(&mut self) {
        if self.follower.is_exhausted() {
            return;
        }
        self.follower.steer(&mut self.car);
        self.follower.advance(&self.car);
        self.car.integrate_position();
    }

    /// Restart the path at the given level's speed
    pub fn next_level(&mut self, level: u32) {
        self.car.reset();
        self.follower.restart();
        self.car.velocity = self.speed_for_level(level);
    }

    /// Back to the start at level-1 speed
    pub fn reset(&mut self) {
        self.next_level(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::track_path;
    use proptest::prelude::*;

    fn tuning() -> CarTuning {
        CarTuning {
            max_velocity: 3.0,
            rotation_rate: 3.0,
            acceleration: 0.1,
        }
    }

    fn computer(path: Vec<Vec2>) -> ComputerCar {
        ComputerCar::new(tuning(), Vec2::new(150.0, 200.0), Mask::filled(20, 40), path, 0.2)
    }

    #[test]
    fn test_desired_angle_quadrants() {
        let pos = Vec2::new(100.0, 100.0);
        // Straight up
        assert!(PathFollower::desired_angle(pos, Vec2::new(100.0, 50.0)).abs() < 1e-4);
        // Up-left is a positive (counter-clockwise) heading
        assert!((PathFollower::desired_angle(pos, Vec2::new(50.0, 50.0)) - 45.0).abs() < 1e-3);
        // Straight down
        assert!((PathFollower::desired_angle(pos, Vec2::new(100.0, 150.0)) - 180.0).abs() < 1e-4);
        // Same row: horizontal
        assert!((PathFollower::desired_angle(pos, Vec2::new(150.0, 100.0)) - 90.0).abs() < 1e-4);
    }

    #[test]
    fn test_steer_clamps_to_rotation_rate() {
        let mut c = computer(vec![Vec2::new(50.0, 100.0)]);
        c.follower.steer(&mut c.car);
        assert!((c.car.angle - 3.0).abs() < 1e-4);
    }

    #[test]
    fn test_steer_does_not_overshoot() {
        let mut c = computer(vec![Vec2::new(150.0, 100.0)]);
        c.car.angle = 1.0;
        c.follower.steer(&mut c.car);
        assert!(c.car.angle.abs() < 1e-4);
    }

    #[test]
    fn test_steer_takes_short_way_round() {
        // Target dead ahead but current heading is 350: turn up through 360
        let mut c = computer(vec![Vec2::new(150.0, 100.0)]);
        c.car.angle = 350.0;
        c.follower.steer(&mut c.car);
        assert!((c.car.angle - 353.0).abs() < 1e-3);
    }

    #[test]
    fn test_empty_path_holds_position() {
        let mut c = computer(Vec::new());
        let before = c.car.pose();
        for _ in 0..10 {
            c.step();
        }
        assert_eq!(c.car.pose(), before);
        assert!(c.follower.is_exhausted());
    }

    #[test]
    fn test_advance_when_waypoint_inside_rect() {
        let mut c = computer(vec![Vec2::new(155.0, 210.0), Vec2::new(155.0, 0.0)]);
        assert!(c.follower.advance(&c.car));
        assert_eq!(c.follower.current_waypoint_index(), 1);
        assert!(!c.follower.advance(&c.car));
    }

    #[test]
    fn test_follows_straight_path_to_exhaustion() {
        let path = vec![Vec2::new(155.0, 150.0), Vec2::new(155.0, 80.0)];
        let mut c = computer(path);
        let mut last = 0;
        for _ in 0..200 {
            c.step();
            let idx = c.follower.current_waypoint_index();
            assert!(idx >= last);
            last = idx;
        }
        assert_eq!(last, 2);

        let parked = c.car.pose();
        c.step();
        assert_eq!(c.car.pose(), parked);
    }

    #[test]
    fn test_laps_full_track_then_parks() {
        let path = track_path();
        let waypoints = path.len();
        let mut c =
            ComputerCar::new(tuning(), Vec2::new(150.0, 200.0), Mask::filled(20, 38), path, 0.2);

        let mut ticks = 0;
        while !c.follower.is_exhausted() && ticks < 5000 {
            c.step();
            ticks += 1;
        }
        assert!(c.follower.is_exhausted());
        assert_eq!(c.follower.current_waypoint_index(), waypoints);
        assert_eq!(c.follower.target(), None);

        let parked = c.car.pose();
        for _ in 0..10 {
            c.step();
        }
        assert_eq!(c.car.pose(), parked);
    }

    #[test]
    fn test_next_level_speed() {
        let mut c = computer(vec![Vec2::new(160.0, 150.0)]);
        c.step();
        c.next_level(4);
        assert!((c.car.velocity - 3.6).abs() < 1e-5);
        assert_eq!(c.car.pos, Vec2::new(150.0, 200.0));
        assert_eq!(c.follower.current_waypoint_index(), 0);

        c.reset();
        assert_eq!(c.car.velocity, 3.0);
    }

    proptest! {
        #[test]
        fn prop_steering_step_bounded_and_converges(
            start_angle in -179.0f32..179.0,
            tx in -300.0f32..300.0,
            ty in -300.0f32..-10.0,
        ) {
            // Stationary car, target ahead: heading error strictly shrinks
            let target = Vec2::new(150.0 + tx, 200.0 + ty);
            let mut c = computer(vec![target]);
            c.car.angle = start_angle;

            let mut err = c.follower.angle_error(&c.car).unwrap().abs();
            for _ in 0..120 {
                let before = c.car.angle;
                c.follower.steer(&mut c.car);
                prop_assert!((c.car.angle - before).abs() <= 3.0 + 1e-4);

                let next = c.follower.angle_error(&c.car).unwrap().abs();
                if err > 1e-3 {
                    prop_assert!(next < err);
                }
                err = next;
            }
            prop_assert!(err < 1e-2);
        }
    }
}
