//! Geographic bounds and axis sizing.

use serde::{Deserialize, Serialize};

use crate::error::{Result, WindFieldError};

/// Slack allowed when deciding whether a span is a whole number of cells.
const SPAN_TOLERANCE: f64 = 1e-9;

/// Number of grid cells along one axis: `floor(|max - min| / resolution)`.
///
/// Never fails. A ratio that sits within floating-point noise of the next
/// integer counts as that integer, so `0.3 / 0.1` yields 3 rather than 2.
pub fn axis_size(min: f64, max: f64, resolution: f64) -> usize {
    let ratio = (max - min).abs() / resolution;
    if !ratio.is_finite() || ratio <= 0.0 {
        return 0;
    }
    (ratio + SPAN_TOLERANCE).floor() as usize
}

fn check_axis(name: &str, min: f64, max: f64, resolution: f64) -> Result<()> {
    if !min.is_finite() || !max.is_finite() {
        return Err(WindFieldError::config(format!(
            "{name} bounds must be finite (got {min}..{max})"
        )));
    }
    let ratio = (max - min).abs() / resolution;
    if ratio < 1.0 - SPAN_TOLERANCE {
        return Err(WindFieldError::config(format!(
            "{name} span {min}..{max} is smaller than one cell of {resolution}"
        )));
    }
    if (ratio - ratio.round()).abs() > SPAN_TOLERANCE * ratio.max(1.0) {
        return Err(WindFieldError::config(format!(
            "{name} span {min}..{max} is not a multiple of resolution {resolution}"
        )));
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeographicBounds {
    pub lat_min: f64,
    pub lat_max: f64,
    pub lon_min: f64,
    pub lon_max: f64,
    pub resolution: f64,
}

impl GeographicBounds {
    /// Build bounds, rejecting a non-positive resolution or spans that are
    /// not whole multiples of it.
    pub fn new(lat_min: f64, lat_max: f64, lon_min: f64, lon_max: f64, resolution: f64) -> Result<Self> {
        let bounds = Self {
            lat_min,
            lat_max,
            lon_min,
            lon_max,
            resolution,
        };
        bounds.validate()?;
        Ok(bounds)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.resolution.is_finite() || self.resolution <= 0.0 {
            return Err(WindFieldError::config(format!(
                "resolution must be a positive number of degrees (got {})",
                self.resolution
            )));
        }
        check_axis("latitude", self.lat_min, self.lat_max, self.resolution)?;
        check_axis("longitude", self.lon_min, self.lon_max, self.resolution)
    }

    pub fn lat_size(&self) -> usize {
        axis_size(self.lat_min, self.lat_max, self.resolution)
    }

    pub fn lon_size(&self) -> usize {
        axis_size(self.lon_min, self.lon_max, self.resolution)
    }
}

impl Default for GeographicBounds {
    /// Vancouver Island at quarter-degree spacing.
    fn default() -> Self {
        Self {
            lat_min: 48.5,
            lat_max: 50.75,
            lon_min: -123.0,
            lon_max: -128.5,
            resolution: 0.25,
        }
    }
}
