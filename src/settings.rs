//! Game settings and tuning
//!
//! Every tunable defaults to its compile-time constant in [`crate::consts`].
//! A JSON file may override any subset of fields.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Horizontal wind acceleration source
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum WindSetting {
    /// Same wind every round (pixels/s²)
    Fixed(f32),
    /// Wind drawn uniformly from [-max, max] at each round start
    Random { max: f32 },
}

impl Default for WindSetting {
    fn default() -> Self {
        WindSetting::Fixed(0.0)
    }
}

/// Simulation tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    // === Playfield ===
    pub screen_width: u32,
    pub screen_height: u32,
    /// Seed for the whole game; `None` picks one from the clock
    pub seed: Option<u64>,

    // === Physics ===
    pub gravity: f32,
    pub wind: WindSetting,

    // === Skyline ===
    pub building_width_min: u32,
    pub building_width_max: u32,
    pub building_height_min: f32,
    pub building_height_max: f32,
    pub building_height_step: f32,
    pub building_height_reversion: f32,

    // === Rooftops ===
    pub clearance_window: f32,
    pub wall_margin: f32,
    pub fallback_pool: usize,
    pub gorilla_width: f32,
    pub gorilla_height: f32,

    // === Banana ===
    pub banana_radius: f32,
    pub banana_spin_rate: f32,
    pub banana_spawn_forward: f32,
    pub self_hit_grace: f32,

    // === Launch input ===
    pub angle_min: f32,
    pub angle_max: f32,
    pub speed_min: f32,
    pub speed_max: f32,
    pub max_input_len: usize,

    // === Bounds and impacts ===
    pub oob_side: f32,
    pub oob_top: f32,
    pub oob_bottom: f32,
    pub explosion_radius: f32,
    pub explosion_lifetime: f32,

    // === HUD ===
    pub turn_message_secs: f32,
    pub win_message_secs: f32,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            seed: None,

            gravity: GRAVITY,
            wind: WindSetting::default(),

            building_width_min: BUILDING_WIDTH_MIN,
            building_width_max: BUILDING_WIDTH_MAX,
            building_height_min: BUILDING_HEIGHT_MIN,
            building_height_max: BUILDING_HEIGHT_MAX,
            building_height_step: BUILDING_HEIGHT_STEP,
            building_height_reversion: BUILDING_HEIGHT_REVERSION,

            clearance_window: CLEARANCE_WINDOW,
            wall_margin: WALL_MARGIN,
            fallback_pool: FALLBACK_POOL,
            gorilla_width: GORILLA_WIDTH,
            gorilla_height: GORILLA_HEIGHT,

            banana_radius: BANANA_RADIUS,
            banana_spin_rate: BANANA_SPIN_RATE,
            banana_spawn_forward: BANANA_SPAWN_FORWARD,
            self_hit_grace: SELF_HIT_GRACE,

            angle_min: ANGLE_MIN,
            angle_max: ANGLE_MAX,
            speed_min: SPEED_MIN,
            speed_max: SPEED_MAX,
            max_input_len: MAX_INPUT_LEN,

            oob_side: OOB_SIDE,
            oob_top: OOB_TOP,
            oob_bottom: OOB_BOTTOM,
            explosion_radius: EXPLOSION_RADIUS,
            explosion_lifetime: EXPLOSION_LIFETIME,

            turn_message_secs: TURN_MESSAGE_SECS,
            win_message_secs: WIN_MESSAGE_SECS,
        }
    }
}

impl GameSettings {
    /// Parse settings from JSON; missing keys keep their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load and validate settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.as_ref().display());
        Ok(settings)
    }

    /// Serialize to pretty JSON (used to dump a starter config)
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn check(
            name: &'static str,
            value: f32,
            ok: bool,
            safe_range: &'static str,
        ) -> Result<(), ConfigError> {
            if ok {
                Ok(())
            } else {
                Err(ConfigError::UnsafeValue {
                    name,
                    value,
                    safe_range,
                })
            }
        }
        fn positive(v: f32) -> bool {
            v.is_finite() && v > 0.0
        }
        fn non_negative(v: f32) -> bool {
            v.is_finite() && v >= 0.0
        }

        let w = self.screen_width as f32;
        let h = self.screen_height as f32;
        check(
            "screen_width",
            w,
            (100..=MAX_SCREEN_DIM).contains(&self.screen_width),
            "[100, 4096]",
        )?;
        check(
            "screen_height",
            h,
            (100..=MAX_SCREEN_DIM).contains(&self.screen_height),
            "[100, 4096]",
        )?;
        check("gravity", self.gravity, self.gravity.is_finite() && self.gravity > 0.0, "(0, ∞)")?;
        match self.wind {
            WindSetting::Fixed(ax) => check("wind", ax, ax.is_finite(), "finite")?,
            WindSetting::Random { max } => {
                check("wind.max", max, max.is_finite() && max >= 0.0, "[0, ∞)")?
            }
        }
        check(
            "building_width_min",
            self.building_width_min as f32,
            self.building_width_min > 0 && self.building_width_min <= self.building_width_max,
            "(0, building_width_max]",
        )?;
        check(
            "building_height_min",
            self.building_height_min,
            self.building_height_min > 0.0 && self.building_height_min <= self.building_height_max,
            "(0, building_height_max]",
        )?;
        check(
            "building_height_max",
            self.building_height_max,
            self.building_height_max < h,
            "(building_height_min, screen_height)",
        )?;
        check(
            "building_height_step",
            self.building_height_step,
            non_negative(self.building_height_step),
            "[0, ∞)",
        )?;
        check(
            "building_height_reversion",
            self.building_height_reversion,
            (0.0..=1.0).contains(&self.building_height_reversion),
            "[0, 1]",
        )?;
        check(
            "clearance_window",
            self.clearance_window,
            non_negative(self.clearance_window),
            "[0, ∞)",
        )?;
        check("wall_margin", self.wall_margin, non_negative(self.wall_margin), "[0, ∞)")?;
        check(
            "fallback_pool",
            self.fallback_pool as f32,
            self.fallback_pool > 0,
            "[1, ∞)",
        )?;
        check("gorilla_width", self.gorilla_width, positive(self.gorilla_width), "(0, ∞)")?;
        check("gorilla_height", self.gorilla_height, positive(self.gorilla_height), "(0, ∞)")?;
        check("banana_radius", self.banana_radius, positive(self.banana_radius), "(0, ∞)")?;
        check(
            "banana_spin_rate",
            self.banana_spin_rate,
            non_negative(self.banana_spin_rate),
            "[0, ∞)",
        )?;
        check(
            "banana_spawn_forward",
            self.banana_spawn_forward,
            non_negative(self.banana_spawn_forward),
            "[0, ∞)",
        )?;
        check(
            "self_hit_grace",
            self.self_hit_grace,
            non_negative(self.self_hit_grace),
            "[0, ∞)",
        )?;
        // Launch limits may narrow the classic ranges but never widen them
        check(
            "angle_min",
            self.angle_min,
            (ANGLE_MIN..=ANGLE_MAX).contains(&self.angle_min),
            "[0, 90]",
        )?;
        check(
            "angle_max",
            self.angle_max,
            (self.angle_min..=ANGLE_MAX).contains(&self.angle_max),
            "[angle_min, 90]",
        )?;
        check(
            "speed_min",
            self.speed_min,
            (SPEED_MIN..=SPEED_MAX).contains(&self.speed_min),
            "[20, 800]",
        )?;
        check(
            "speed_max",
            self.speed_max,
            (self.speed_min..=SPEED_MAX).contains(&self.speed_max),
            "[speed_min, 800]",
        )?;
        check(
            "max_input_len",
            self.max_input_len as f32,
            self.max_input_len > 0,
            "[1, ∞)",
        )?;
        check("oob_side", self.oob_side, non_negative(self.oob_side), "[0, ∞)")?;
        check("oob_top", self.oob_top, non_negative(self.oob_top), "[0, ∞)")?;
        check("oob_bottom", self.oob_bottom, non_negative(self.oob_bottom), "[0, ∞)")?;
        check(
            "explosion_radius",
            self.explosion_radius,
            non_negative(self.explosion_radius),
            "[0, ∞)",
        )?;
        check(
            "explosion_lifetime",
            self.explosion_lifetime,
            non_negative(self.explosion_lifetime),
            "[0, ∞)",
        )?;
        check(
            "turn_message_secs",
            self.turn_message_secs,
            non_negative(self.turn_message_secs),
            "[0, ∞)",
        )?;
        check(
            "win_message_secs",
            self.win_message_secs,
            non_negative(self.win_message_secs),
            "[0, ∞)",
        )?;
        Ok(())
    }
}
