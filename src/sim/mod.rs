//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Static masks are read-only; cars own their sprite masks
//! - No rendering or platform dependencies

pub mod car;
pub mod mask;
pub mod particles;
pub mod path;
pub mod state;
pub mod tick;

pub use car::{Car, CarTuning, Pose, Steer};
pub use mask::{Mask, MaskError};
pub use particles::{Particle, ParticleSystem};
pub use path::{ComputerCar, PathFollower};
pub use state::{GameInfo, RaceEvent, RacePhase, RaceState};
pub use tick::{TickInput, tick};
