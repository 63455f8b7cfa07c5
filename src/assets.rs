//! Static opacity masks shared by the core and the renderer
//!
//! The presentation layer decodes the track and sprite images and hands the
//! resulting masks over once at startup. Everything here is read-only for
//! the rest of the session.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::Mask;

/// Selectable car sprites
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CarColor {
    #[default]
    Red,
    Green,
    Grey,
    Purple,
    White,
}

impl CarColor {
    /// All colours, in selection order
    pub const ALL: [CarColor; 5] = [
        CarColor::Red,
        CarColor::Green,
        CarColor::Grey,
        CarColor::Purple,
        CarColor::White,
    ];

    /// Sprite used by the computer car
    pub const COMPUTER: CarColor = CarColor::Green;

    pub fn as_str(&self) -> &'static str {
        match self {
            CarColor::Red => "Red",
            CarColor::Green => "Green",
            CarColor::Grey => "Grey",
            CarColor::Purple => "Purple",
            CarColor::White => "White",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "red" => Some(CarColor::Red),
            "green" => Some(CarColor::Green),
            "grey" | "gray" => Some(CarColor::Grey),
            "purple" => Some(CarColor::Purple),
            "white" => Some(CarColor::White),
            _ => None,
        }
    }

    #[inline]
    fn index(self) -> usize {
        self as usize
    }
}

/// Masks for the track, finish line and every car sprite
#[derive(Debug, Clone)]
pub struct TrackAssets {
    /// Opaque where the car must not drive
    pub border: Mask,
    /// Finish-line silhouette, placed at `finish_position`
    pub finish: Mask,
    pub finish_position: Vec2,
    cars: [Mask; 5],
}

impl TrackAssets {
    /// Bundle masks; `cars` is indexed in `CarColor::ALL` order
    pub fn new(border: Mask, finish: Mask, finish_position: Vec2, cars: [Mask; 5]) -> Self {
        Self {
            border,
            finish,
            finish_position,
            cars,
        }
    }

    /// A walled rectangular arena with solid rectangular car sprites.
    ///
    /// Used by the headless runner and tests in place of decoded images.
    pub fn procedural(
        track_size: (u32, u32),
        wall: u32,
        car_size: (u32, u32),
        finish_size: (u32, u32),
        finish_position: Vec2,
    ) -> Self {
        let (w, h) = track_size;
        let mut border = Mask::new(w, h);
        border.fill_rect(0, 0, w, wall);
        border.fill_rect(0, h.saturating_sub(wall) as i32, w, wall);
        border.fill_rect(0, 0, wall, h);
        border.fill_rect(w.saturating_sub(wall) as i32, 0, wall, h);

        let car = Mask::filled(car_size.0, car_size.1);
        Self::new(
            border,
            Mask::filled(finish_size.0, finish_size.1),
            finish_position,
            std::array::from_fn(|_| car.clone()),
        )
    }

    /// Sprite mask for a car colour
    pub fn car_mask(&self, color: CarColor) -> &Mask {
        &self.cars[color.index()]
    }
}
