//! Skyline Gorillas - A hot-seat artillery game over a destructible city
//!
//! Core modules:
//! - `sim`: Deterministic simulation (skyline, terrain mask, physics, turns)
//! - `renderer`: Drawable geometry derived from simulation state
//! - `settings`: Data-driven game tuning
//! - `error`: Input, simulation and config errors

pub mod error;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::{ConfigError, InputError, SimError};
pub use settings::{GameSettings, WindSetting};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Playfield dimensions (pixels)
    pub const SCREEN_WIDTH: u32 = 900;
    pub const SCREEN_HEIGHT: u32 = 600;
    /// Largest configurable playfield side (the mask is one byte per pixel)
    pub const MAX_SCREEN_DIM: u32 = 4096;

    /// Downward acceleration (pixels/s²)
    pub const GRAVITY: f32 = 260.0;

    /// Building footprint ranges
    pub const BUILDING_WIDTH_MIN: u32 = 70;
    pub const BUILDING_WIDTH_MAX: u32 = 140;
    pub const BUILDING_HEIGHT_MIN: f32 = 180.0;
    pub const BUILDING_HEIGHT_MAX: f32 = 360.0;
    /// Largest random height change between neighbours
    pub const BUILDING_HEIGHT_STEP: f32 = 40.0;
    /// Fraction of the distance to the mid height pulled back each building
    pub const BUILDING_HEIGHT_REVERSION: f32 = 0.25;

    /// Rooftop clearance heuristic
    pub const CLEARANCE_WINDOW: f32 = 160.0;
    pub const WALL_MARGIN: f32 = 35.0;
    pub const FALLBACK_POOL: usize = 3;

    /// Gorilla hitbox size
    pub const GORILLA_WIDTH: f32 = 28.0;
    pub const GORILLA_HEIGHT: f32 = 32.0;

    /// Banana defaults
    pub const BANANA_RADIUS: f32 = 6.0;
    pub const BANANA_SPIN_RATE: f32 = 720.0; // degrees per second
    /// Horizontal spawn offset toward the opponent
    pub const BANANA_SPAWN_FORWARD: f32 = 4.0;
    /// Shooter cannot hit itself before this much flight time
    pub const SELF_HIT_GRACE: f32 = 0.15;

    /// Launch ranges
    pub const ANGLE_MIN: f32 = 0.0;
    pub const ANGLE_MAX: f32 = 90.0;
    pub const SPEED_MIN: f32 = 20.0;
    pub const SPEED_MAX: f32 = 800.0;
    pub const MAX_INPUT_LEN: usize = 6;

    /// Out-of-bounds margins around the screen
    pub const OOB_SIDE: f32 = 50.0;
    pub const OOB_TOP: f32 = 200.0;
    pub const OOB_BOTTOM: f32 = 50.0;

    /// Crater radius stamped into the city mask
    pub const EXPLOSION_RADIUS: f32 = 12.0;
    /// Explosion visual lifetime (seconds)
    pub const EXPLOSION_LIFETIME: f32 = 0.4;

    /// Status message durations (seconds)
    pub const TURN_MESSAGE_SECS: f32 = 1.2;
    pub const WIN_MESSAGE_SECS: f32 = 2.5;
}

/// Wrap an angle in degrees to [0, 360)
#[inline]
pub fn wrap_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Convert a launch angle (degrees above horizontal) to a unit direction in
/// screen space, where +y points down
#[inline]
pub fn launch_direction(angle_deg: f32, facing: f32) -> Vec2 {
    let a = angle_deg.to_radians();
    Vec2::new(facing * a.cos(), -a.sin())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_degrees() {
        assert_eq!(wrap_degrees(0.0), 0.0);
        assert!((wrap_degrees(370.0) - 10.0).abs() < 1e-4);
        assert!((wrap_degrees(-90.0) - 270.0).abs() < 1e-4);
        assert!(wrap_degrees(-1e-9) < 360.0);
    }

    #[test]
    fn test_launch_direction_mirrors() {
        let right = launch_direction(30.0, 1.0);
        let left = launch_direction(30.0, -1.0);
        assert!((right.x + left.x).abs() < 1e-6);
        assert!((right.y - left.y).abs() < 1e-6);
        // Upward in screen space
        assert!(right.y < 0.0);
    }
}
