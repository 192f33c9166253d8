//! Numeric text entry for angle and velocity prompts

use serde::{Deserialize, Serialize};

use crate::error::InputError;

/// Typed-so-far buffer: digits and at most one decimal point
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputBuffer {
    text: String,
}

impl InputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Append `c` if it is allowed; returns whether it was accepted
    pub fn push(&mut self, c: char, max_len: usize) -> bool {
        if self.text.len() >= max_len {
            return false;
        }
        let accepted = c.is_ascii_digit() || (c == '.' && !self.text.contains('.'));
        if accepted {
            self.text.push(c);
        }
        accepted
    }

    pub fn backspace(&mut self) {
        self.text.pop();
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }

    /// Parse the buffer and check it against `[min, max]`
    pub fn parse_in_range(&self, min: f32, max: f32) -> Result<f32, InputError> {
        parse_in_range(&self.text, min, max)
    }
}

/// Parse a decimal number and require it to lie in `[min, max]`
pub fn parse_in_range(text: &str, min: f32, max: f32) -> Result<f32, InputError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(InputError::Empty);
    }
    let value: f32 = trimmed
        .parse()
        .map_err(|_| InputError::Unparseable(trimmed.to_string()))?;
    if !value.is_finite() {
        return Err(InputError::Unparseable(trimmed.to_string()));
    }
    if value < min || value > max {
        return Err(InputError::OutOfRange { value, min, max });
    }
    Ok(value)
}
