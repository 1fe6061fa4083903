//! Directional bias applied to raw wind samples.
//!
//! A bias is a constant offset `±strength * cos(direction)` or
//! `strength * sin(direction)`, with `direction` in radians.

use serde::{Deserialize, Serialize};

use crate::error::{Result, WindFieldError};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BiasConfig {
    #[serde(default = "default_strength")]
    pub strength: f64,
    #[serde(default = "default_direction")]
    pub direction: f64,
}

fn default_strength() -> f64 {
    3.0
}

fn default_direction() -> f64 {
    0.2
}

impl Default for BiasConfig {
    fn default() -> Self {
        Self {
            strength: default_strength(),
            direction: default_direction(),
        }
    }
}

impl BiasConfig {
    pub fn new(strength: f64, direction: f64) -> Self {
        Self {
            strength,
            direction,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.strength.is_finite() || !self.direction.is_finite() {
            return Err(WindFieldError::config(format!(
                "bias strength and direction must be finite (got {}, {})",
                self.strength, self.direction
            )));
        }
        Ok(())
    }

    pub fn cos_offset(&self) -> f64 {
        self.strength * self.direction.cos()
    }

    pub fn sin_offset(&self) -> f64 {
        self.strength * self.direction.sin()
    }

    pub fn positive_cos(&self, x: f64) -> f64 {
        x + self.cos_offset()
    }

    pub fn positive_sin(&self, x: f64) -> f64 {
        x + self.sin_offset()
    }

    pub fn negative_cos(&self, x: f64) -> f64 {
        x - self.cos_offset()
    }

    /// Apply `transform` to every element of `values` in place.
    pub fn apply(&self, values: &mut [f64], transform: fn(&Self, f64) -> f64) {
        for value in values.iter_mut() {
            *value = transform(self, *value);
        }
    }
}
