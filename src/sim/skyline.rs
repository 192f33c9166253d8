//! Procedural city skyline
//!
//! Buildings are laid left to right from x = 0 until the screen width is
//! covered. Heights follow a mean-reverting random walk so neighbouring roofs
//! vary smoothly instead of jumping between extremes.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::geom::Rect;
use crate::settings::GameSettings;

/// A building footprint; `y` is the roof and the base touches the ground line
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Building {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Building {
    /// Building standing on the ground line at `ground_y`
    pub fn on_ground(x: f32, width: f32, height: f32, ground_y: f32) -> Self {
        Self {
            x,
            y: ground_y - height,
            width,
            height,
        }
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    #[inline]
    pub fn roof_center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }
}

/// Pull toward the middle of the height range for a building of height `h`
#[inline]
pub fn height_drift(h: f32, settings: &GameSettings) -> f32 {
    let mid = (settings.building_height_min + settings.building_height_max) / 2.0;
    (mid - h) * settings.building_height_reversion
}

/// Next height in the walk: previous + bounded noise + drift, clamped to range
pub fn next_height<R: Rng>(prev: f32, settings: &GameSettings, rng: &mut R) -> f32 {
    let step = settings.building_height_step;
    let delta = if step > 0.0 {
        rng.random_range(-step..=step)
    } else {
        0.0
    };
    (prev + delta + height_drift(prev, settings))
        .clamp(settings.building_height_min, settings.building_height_max)
}

/// Generate a skyline covering `[0, screen_width)`; the last building may
/// overshoot the right edge
pub fn generate<R: Rng>(settings: &GameSettings, rng: &mut R) -> Vec<Building> {
    let screen_w = settings.screen_width as f32;
    let ground = settings.screen_height as f32;

    let mut buildings = Vec::new();
    let mut x = 0.0;
    let mut height =
        rng.random_range(settings.building_height_min..=settings.building_height_max);

    while x < screen_w {
        let width =
            rng.random_range(settings.building_width_min..=settings.building_width_max) as f32;
        buildings.push(Building::on_ground(x, width, height, ground));
        x += width;
        height = next_height(height, settings, rng);
    }

    log::debug!(
        "Generated skyline: {} buildings, {:.0}px wide",
        buildings.len(),
        x
    );
    buildings
}
