//! Destructible terrain mask
//!
//! One byte per screen pixel: [`OPAQUE`] where a building stands, [`CLEAR`]
//! elsewhere. Impacts erase disks; nothing ever becomes opaque again.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::skyline::Building;

pub const OPAQUE: u8 = 255;
pub const CLEAR: u8 = 0;

/// Per-pixel opacity grid covering the screen rectangle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CityMask {
    width: u32,
    height: u32,
    /// Row-major opacity, `width * height` bytes
    pixels: Vec<u8>,
}

impl CityMask {
    /// Fully transparent mask
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![CLEAR; width as usize * height as usize],
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw row-major opacity bytes
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    #[inline]
    fn index(&self, x: i64, y: i64) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            None
        } else {
            Some(y as usize * self.width as usize + x as usize)
        }
    }

    /// Opacity at a pixel; anything outside the grid is clear
    pub fn get(&self, x: i64, y: i64) -> u8 {
        self.index(x, y).map_or(CLEAR, |i| self.pixels[i])
    }

    /// Whether the pixel under `pos` (rounded) is solid terrain
    pub fn is_opaque_at(&self, pos: Vec2) -> bool {
        if !pos.x.is_finite() || !pos.y.is_finite() {
            return false;
        }
        self.get(pos.x.round() as i64, pos.y.round() as i64) != CLEAR
    }

    /// Paint a building as opaque; pixels count when their center is inside
    pub fn fill_building(&mut self, building: &Building) {
        let rect = building.rect();
        let (x0, x1) = pixel_span(rect.left(), rect.right(), self.width);
        let (y0, y1) = pixel_span(rect.top(), rect.bottom(), self.height);
        for y in y0..y1 {
            let row = y as usize * self.width as usize;
            self.pixels[row + x0 as usize..row + x1 as usize].fill(OPAQUE);
        }
    }

    /// Erase every pixel whose center lies within `radius` of `center`.
    /// Returns how many pixels changed from opaque to clear.
    pub fn erase_disk(&mut self, center: Vec2, radius: f32) -> usize {
        if radius <= 0.0 || !center.is_finite() {
            return 0;
        }
        let r2 = radius * radius;
        let (x0, x1) = pixel_span(center.x - radius, center.x + radius, self.width);
        let (y0, y1) = pixel_span(center.y - radius, center.y + radius, self.height);

        let mut erased = 0;
        for y in y0..y1 {
            let dy = y as f32 + 0.5 - center.y;
            for x in x0..x1 {
                let dx = x as f32 + 0.5 - center.x;
                if dx * dx + dy * dy <= r2 {
                    let i = y as usize * self.width as usize + x as usize;
                    if self.pixels[i] != CLEAR {
                        self.pixels[i] = CLEAR;
                        erased += 1;
                    }
                }
            }
        }
        erased
    }

    /// Number of opaque pixels
    pub fn opaque_count(&self) -> usize {
        self.pixels.iter().filter(|&&p| p != CLEAR).count()
    }
}

/// Pixel indices `[start, end)` whose centers fall in `[lo, hi)`, clamped to `[0, limit)`
fn pixel_span(lo: f32, hi: f32, limit: u32) -> (u32, u32) {
    let start = (lo - 0.5).ceil().clamp(0.0, limit as f32) as u32;
    let end = (hi - 0.5).ceil().clamp(0.0, limit as f32) as u32;
    (start, end.max(start))
}

/// Build the mask for a skyline: buildings opaque, sky clear
pub fn rasterize(skyline: &[Building], width: u32, height: u32) -> CityMask {
    let mut mask = CityMask::new(width, height);
    for building in skyline {
        mask.fill_building(building);
    }
    mask
}
