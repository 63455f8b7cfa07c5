//! Car kinematics shared by the player and computer cars
//!
//! Cars integrate a scalar velocity along their heading once per tick.
//! The collision mask stays axis-aligned to the unrotated sprite; rotation
//! is visual only.

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

use super::mask::Mask;
use crate::heading;

/// Steering intent for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Steer {
    #[default]
    None,
    Left,
    Right,
}

/// Per-instance handling tunables
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CarTuning {
    pub max_velocity: f32,
    /// Degrees per tick
    pub rotation_rate: f32,
    /// Velocity gained per throttle tick
    pub acceleration: f32,
}

/// Position, heading and speed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    /// Top-left of the sprite bounding box
    pub pos: Vec2,
    /// Degrees, 0 = up, counter-clockwise positive
    pub angle: f32,
    pub velocity: f32,
}

impl Pose {
    /// Resting pose facing up
    pub fn at(pos: Vec2) -> Self {
        Self {
            pos,
            angle: 0.0,
            velocity: 0.0,
        }
    }
}

/// A car on the track
#[derive(Debug, Clone)]
pub struct Car {
    pub pos: Vec2,
    pub angle: f32,
    pub velocity: f32,
    pub tuning: CarTuning,
    start: Vec2,
    sprite: Mask,
}

impl Car {
    pub fn new(tuning: CarTuning, start: Vec2, sprite: Mask) -> Self {
        Self {
            pos: start,
            angle: 0.0,
            velocity: 0.0,
            tuning,
            start,
            sprite,
        }
    }

    /// Current pose snapshot
    pub fn pose(&self) -> Pose {
        Pose {
            pos: self.pos,
            angle: self.angle,
            velocity: self.velocity,
        }
    }

    pub fn start(&self) -> Vec2 {
        self.start
    }

    /// Opacity mask of the unrotated sprite
    pub fn sprite(&self) -> &Mask {
        &self.sprite
    }

    /// Sprite dimensions in pixels
    pub fn size(&self) -> Vec2 {
        self.sprite.size().as_vec2()
    }

    /// Whether a point lies inside the car's axis-aligned bounding rectangle.
    ///
    /// Left/top edges are inclusive, right/bottom exclusive.
    pub fn bounds_contain(&self, point: Vec2) -> bool {
        // Integer rectangle like a sprite rect: origin truncated toward zero
        let origin = self.pos.as_ivec2();
        let size = self.sprite.size();
        let p = point.floor().as_ivec2();
        p.x >= origin.x
            && p.x < origin.x.saturating_add(size.x)
            && p.y >= origin.y
            && p.y < origin.y.saturating_add(size.y)
    }

    pub fn rotate(&mut self, steer: Steer) {
        match steer {
            Steer::Left => self.angle += self.tuning.rotation_rate,
            Steer::Right => self.angle -= self.tuning.rotation_rate,
            Steer::None => {}
        }
    }

    /// Throttle forward, capped at max velocity, then move
    pub fn accelerate_forward(&mut self) {
        self.velocity = (self.velocity + self.tuning.acceleration).min(self.tuning.max_velocity);
        self.integrate_position();
    }

    /// Throttle backward; reverse speed is capped at half the forward max
    pub fn accelerate_backward(&mut self) {
        self.velocity =
            (self.velocity - self.tuning.acceleration).max(-self.tuning.max_velocity / 2.0);
        self.integrate_position();
    }

    /// Coast toward a stop at half the acceleration rate, then move
    pub fn decay_speed(&mut self) {
        self.velocity = (self.velocity - self.tuning.acceleration / 2.0).max(0.0);
        self.integrate_position();
    }

    /// Reverse velocity and back off by one tick of travel
    pub fn bounce(&mut self) {
        self.velocity = -self.velocity;
        self.integrate_position();
    }

    /// Move one tick along the current heading
    pub fn integrate_position(&mut self) {
        self.pos += heading(self.angle) * self.velocity;
    }

    /// Back to the start pose, at rest
    pub fn reset(&mut self) {
        self.pos = self.start;
        self.angle = 0.0;
        self.velocity = 0.0;
    }

    /// Per-pixel collision against a static mask placed at `mask_offset`.
    ///
    /// Returns the first overlapping pixel in the static mask's frame.
    pub fn collides_with(&self, mask: &Mask, mask_offset: Vec2) -> Option<IVec2> {
        let offset = (self.pos - mask_offset).as_ivec2();
        mask.overlap(&self.sprite, offset)
    }
}
