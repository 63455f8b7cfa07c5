//! Cosmetic particles (exhaust, sparks, speed streaks)
//!
//! Never read by gameplay. Randomness comes from a seeded RNG so replays
//! produce the same effects.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::heading;

pub const EXHAUST_GREY: [u8; 3] = [100, 100, 100];
pub const EXHAUST_DARK: [u8; 3] = [80, 80, 80];
pub const SPARK_YELLOW: [u8; 3] = [255, 255, 0];
pub const SPARK_ORANGE: [u8; 3] = [255, 200, 0];
pub const STREAK_WHITE: [u8; 3] = [255, 255, 255];

/// Velocity multiplier applied every tick
const FRICTION: f32 = 0.98;

/// A single particle for visual effects
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: [u8; 3],
    /// Ticks remaining
    pub life: u32,
    pub max_life: u32,
    pub size: u32,
}

impl Particle {
    pub fn update(&mut self) {
        self.pos += self.vel;
        self.life = self.life.saturating_sub(1);
        self.vel *= FRICTION;
    }

    pub fn is_alive(&self) -> bool {
        self.life > 0
    }

    /// Opacity for rendering, fading with remaining life
    pub fn alpha(&self) -> u8 {
        if self.max_life == 0 {
            return 0;
        }
        (255 * self.life / self.max_life) as u8
    }
}

/// Owns all live particles and the RNG that spawns them
#[derive(Debug, Clone)]
pub struct ParticleSystem {
    pub particles: Vec<Particle>,
    pub enabled: bool,
    pub max_particles: usize,
    rng: Pcg32,
}

impl ParticleSystem {
    pub fn new(seed: u64, enabled: bool, max_particles: usize) -> Self {
        Self {
            particles: Vec::new(),
            enabled,
            max_particles,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    fn spawn(&mut self, pos: Vec2, vel: Vec2, color: [u8; 3], life: u32) {
        if !self.enabled || self.particles.len() >= self.max_particles {
            return;
        }
        let size = self.rng.random_range(2..=5);
        self.particles.push(Particle {
            pos,
            vel,
            color,
            life,
            max_life: life,
            size,
        });
    }

    fn jitter(&mut self, spread: f32) -> Vec2 {
        Vec2::new(
            self.rng.random_range(-spread..spread),
            self.rng.random_range(-spread..spread),
        )
    }

    /// Smoke puffs behind a moving car
    pub fn add_exhaust(&mut self, pos: Vec2, angle: f32, velocity: f32) {
        if velocity <= 0.5 {
            return;
        }
        let behind = -heading(angle);
        let origin = pos + behind * 20.0;
        for _ in 0..2 {
            let vel = self.jitter(1.0) + behind * velocity * 0.3;
            let color = if self.rng.random::<f32>() > 0.5 {
                EXHAUST_GREY
            } else {
                EXHAUST_DARK
            };
            self.spawn(origin, vel, color, 30);
        }
    }

    /// Burst of sparks at an impact
    pub fn add_collision(&mut self, pos: Vec2) {
        for _ in 0..10 {
            let vel = self.jitter(3.0);
            let color = if self.rng.random::<f32>() > 0.5 {
                SPARK_YELLOW
            } else {
                SPARK_ORANGE
            };
            self.spawn(pos, vel, color, 20);
        }
    }

    /// Streaks around a car going fast
    pub fn add_speed(&mut self, pos: Vec2, velocity: f32) {
        if velocity <= 3.0 {
            return;
        }
        for _ in 0..3 {
            let offset = self.jitter(15.0);
            let vel = self.jitter(2.0);
            self.spawn(pos + offset, vel, STREAK_WHITE, 15);
        }
    }

    /// Advance every particle and compact out the dead ones
    pub fn update(&mut self) {
        let mut i = 0;
        while i < self.particles.len() {
            self.particles[i].update();
            if self.particles[i].is_alive() {
                i += 1;
            } else {
                // The swapped-in tail particle has not been updated yet
                self.particles.swap_remove(i);
            }
        }
    }
}
