//! Per-pixel opacity masks and overlap testing
//!
//! A mask is a bitmap of the opaque pixels of a sprite or track image.
//! Collisions are exact-silhouette: two masks collide only where both have
//! a set bit, never merely because their bounding boxes intersect.
//!
//! Bits are packed into 64-column strips. For strip `s` and row `y`, bit `i`
//! of the word is pixel `(64 * s + i, y)`. Bits past the mask width are
//! always zero.

use std::fmt;

use glam::IVec2;

/// Pixels per packed word
const STRIP: i32 = 64;

/// Alpha values above this count as opaque
pub const DEFAULT_ALPHA_THRESHOLD: u8 = 127;

/// Error building a mask from pixel data
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MaskError {
    /// Pixel buffer length does not match `width * height * bytes_per_pixel`
    BufferSize { expected: usize, actual: usize },
}

impl fmt::Display for MaskError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MaskError::BufferSize { expected, actual } => write!(
                f,
                "pixel buffer holds {actual} bytes, expected {expected}"
            ),
        }
    }
}

impl std::error::Error for MaskError {}

/// A per-pixel opacity bitmap
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    width: i32,
    height: i32,
    strips: i32,
    /// Strip-major: `bits[strip * height + row]`
    bits: Vec<u64>,
}

impl Mask {
    /// Create a fully transparent mask
    pub fn new(width: u32, height: u32) -> Self {
        let width = width as i32;
        let height = height as i32;
        let strips = (width + STRIP - 1) / STRIP;
        Self {
            width,
            height,
            strips,
            bits: vec![0; (strips * height) as usize],
        }
    }

    /// Create a fully opaque mask
    pub fn filled(width: u32, height: u32) -> Self {
        let mut mask = Self::new(width, height);
        mask.fill_rect(0, 0, width, height);
        mask
    }

    /// Build a mask from one alpha byte per pixel (row-major)
    pub fn from_alpha(
        width: u32,
        height: u32,
        alpha: &[u8],
        threshold: u8,
    ) -> Result<Self, MaskError> {
        Self::from_pixels(width, height, alpha, 1, 0, threshold)
    }

    /// Build a mask from tightly packed RGBA8 pixels (row-major)
    pub fn from_rgba(width: u32, height: u32, rgba: &[u8]) -> Result<Self, MaskError> {
        Self::from_pixels(width, height, rgba, 4, 3, DEFAULT_ALPHA_THRESHOLD)
    }

    fn from_pixels(
        width: u32,
        height: u32,
        data: &[u8],
        stride: usize,
        alpha_index: usize,
        threshold: u8,
    ) -> Result<Self, MaskError> {
        let expected = width as usize * height as usize * stride;
        if data.len() != expected {
            return Err(MaskError::BufferSize {
                expected,
                actual: data.len(),
            });
        }

        let mut mask = Self::new(width, height);
        for (i, pixel) in data.chunks_exact(stride).enumerate() {
            if pixel[alpha_index] > threshold {
                let x = (i % width as usize) as i32;
                let y = (i / width as usize) as i32;
                mask.set(x, y, true);
            }
        }
        Ok(mask)
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width as u32
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height as u32
    }

    /// Mask dimensions as a vector
    #[inline]
    pub fn size(&self) -> IVec2 {
        IVec2::new(self.width, self.height)
    }

    #[inline]
    fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.height
    }

    /// Packed word for a strip/row; zero outside the mask
    #[inline]
    fn word(&self, strip: i32, row: i32) -> u64 {
        if strip < 0 || strip >= self.strips || row < 0 || row >= self.height {
            return 0;
        }
        self.bits[(strip * self.height + row) as usize]
    }

    /// 64 pixels of `row` starting at column `start` (may be negative)
    #[inline]
    fn row_bits(&self, row: i32, start: i32) -> u64 {
        if start >= self.width || start + STRIP <= 0 {
            return 0;
        }
        let strip = start.div_euclid(STRIP);
        let shift = start.rem_euclid(STRIP) as u32;
        let lo = self.word(strip, row) >> shift;
        if shift == 0 {
            lo
        } else {
            lo | (self.word(strip + 1, row) << (STRIP as u32 - shift))
        }
    }

    /// Whether the pixel is opaque; out-of-range pixels are transparent
    pub fn get(&self, x: i32, y: i32) -> bool {
        if !self.in_bounds(x, y) {
            return false;
        }
        let strip = x / STRIP;
        let bit = (x % STRIP) as u32;
        self.word(strip, y) & (1u64 << bit) != 0
    }

    /// Set or clear one pixel; out-of-range writes are ignored
    pub fn set(&mut self, x: i32, y: i32, opaque: bool) {
        if !self.in_bounds(x, y) {
            return;
        }
        let idx = ((x / STRIP) * self.height + y) as usize;
        let bit = 1u64 << (x % STRIP) as u32;
        if opaque {
            self.bits[idx] |= bit;
        } else {
            self.bits[idx] &= !bit;
        }
    }

    /// Mark a rectangle opaque (clipped to the mask)
    pub fn fill_rect(&mut self, x: i32, y: i32, width: u32, height: u32) {
        let x_end = x.saturating_add(width as i32).min(self.width);
        let y_end = y.saturating_add(height as i32).min(self.height);
        for py in y.max(0)..y_end {
            for px in x.max(0)..x_end {
                self.set(px, py, true);
            }
        }
    }

    /// Number of opaque pixels
    pub fn count(&self) -> u32 {
        self.bits.iter().map(|w| w.count_ones()).sum()
    }

    /// First pixel where both masks are opaque.
    ///
    /// `offset` is the position of `other`'s origin relative to this mask's
    /// origin. The returned point is in this mask's frame. Scan order is
    /// strip by strip (left to right), then row by row (top to bottom), then
    /// column within the strip. Returns `None` when the bounding rectangles
    /// do not intersect or no opaque pixels coincide.
    pub fn overlap(&self, other: &Mask, offset: IVec2) -> Option<IVec2> {
        // Offsets may be saturated from far-off float positions
        let x_start = offset.x.max(0);
        let x_end = offset.x.saturating_add(other.width).min(self.width);
        let y_start = offset.y.max(0);
        let y_end = offset.y.saturating_add(other.height).min(self.height);
        if x_start >= x_end || y_start >= y_end {
            return None;
        }

        let first_strip = x_start / STRIP;
        let last_strip = (x_end - 1) / STRIP;
        for strip in first_strip..=last_strip {
            let other_start = strip * STRIP - offset.x;
            for row in y_start..y_end {
                let hit = self.word(strip, row) & other.row_bits(row - offset.y, other_start);
                if hit != 0 {
                    let x = strip * STRIP + hit.trailing_zeros() as i32;
                    return Some(IVec2::new(x, row));
                }
            }
        }
        None
    }
}
