//! Error types for input validation, entity construction and settings.
//!
//! None of these are fatal during play: the state machine recovers from
//! `InputError` locally and the binary falls back to default settings on a
//! `ConfigError`.

use std::fmt;

/// Rejected numeric text entry.
#[derive(Debug, Clone, PartialEq)]
pub enum InputError {
    /// Submit pressed with nothing typed
    Empty,
    /// Buffer is not a decimal number
    Unparseable(String),
    /// Parsed value lies outside the phase's accepted range
    OutOfRange {
        value: f32,
        min: f32,
        max: f32,
    },
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputError::Empty => write!(f, "no value entered"),
            InputError::Unparseable(text) => write!(f, "'{}' is not a number", text),
            InputError::OutOfRange { value, min, max } => {
                write!(f, "{} is outside [{}, {}]", value, min, max)
            }
        }
    }
}

impl std::error::Error for InputError {}

/// Invalid simulation entity parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum SimError {
    /// Projectile radius must be strictly positive
    InvalidRadius(f32),
    /// Launch angle outside the accepted range (degrees)
    AngleOutOfRange { angle: f32, min: f32, max: f32 },
    /// Launch speed outside the accepted range (pixels/s)
    SpeedOutOfRange { speed: f32, min: f32, max: f32 },
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::InvalidRadius(r) => write!(f, "projectile radius {} must be > 0", r),
            SimError::AngleOutOfRange { angle, min, max } => {
                write!(f, "launch angle {}° is outside [{}, {}]", angle, min, max)
            }
            SimError::SpeedOutOfRange { speed, min, max } => {
                write!(f, "launch speed {} is outside [{}, {}]", speed, min, max)
            }
        }
    }
}

impl std::error::Error for SimError {}

/// Failure to load or validate [`crate::GameSettings`].
#[derive(Debug)]
pub enum ConfigError {
    /// Settings file could not be read
    Io(std::io::Error),
    /// Settings file is not valid JSON for `GameSettings`
    Parse(serde_json::Error),
    /// A tunable is outside the range the simulation supports
    UnsafeValue {
        name: &'static str,
        value: f32,
        safe_range: &'static str,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "failed to read settings: {}", e),
            ConfigError::Parse(e) => write!(f, "failed to parse settings: {}", e),
            ConfigError::UnsafeValue {
                name,
                value,
                safe_range,
            } => write!(
                f,
                "setting '{}' = {} is outside safe range {}",
                name, value, safe_range
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            ConfigError::UnsafeValue { .. } => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}
