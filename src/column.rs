//! Multi-level atmospheric column.
//!
//! A column owns one [`LevelGrid`] per configured pressure level. Levels are
//! generated in the order the pressure heights are listed, each consuming the
//! next `(u, v)` seed pair from the caller's [`SeedAllocator`].

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::bias::BiasConfig;
use crate::error::{Result, WindFieldError};
use crate::grid::GeographicBounds;
use crate::level::{LevelGrid, Regime};
use crate::rng::SeedAllocator;

/// Number of pressure levels in every column.
pub const LEVEL_COUNT: usize = 10;

pub const REFERENCE_PRESSURE_LEVELS: [u32; LEVEL_COUNT] = [600, 450, 300, 200, 150, 100, 50, 30, 15, 7];

/// Exactly [`LEVEL_COUNT`] pressure heights in hPa, in generation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<u32>", into = "Vec<u32>")]
pub struct PressureLevels([u32; LEVEL_COUNT]);

impl PressureLevels {
    pub fn new(heights: [u32; LEVEL_COUNT]) -> Self {
        Self(heights)
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.0.iter().copied()
    }
}

impl Default for PressureLevels {
    fn default() -> Self {
        Self(REFERENCE_PRESSURE_LEVELS)
    }
}

impl TryFrom<Vec<u32>> for PressureLevels {
    type Error = WindFieldError;

    fn try_from(value: Vec<u32>) -> Result<Self> {
        let count = value.len();
        let heights: [u32; LEVEL_COUNT] = value.try_into().map_err(|_| {
            WindFieldError::config(format!(
                "expected exactly {LEVEL_COUNT} pressure levels, got {count}"
            ))
        })?;
        Ok(Self(heights))
    }
}

impl From<PressureLevels> for Vec<u32> {
    fn from(value: PressureLevels) -> Self {
        value.0.to_vec()
    }
}

/// How a level is placed relative to the tropopause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum TropopauseRule {
    /// Compare the level's position in the list against the tropopause
    /// height. With ten levels and a tropopause of 264 every level ends up
    /// below the tropopause.
    #[default]
    LevelIndex,
    /// Compare the level's pressure in hPa: higher pressure than the
    /// tropopause means below it.
    PressureHeight,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tropopause {
    /// Approximate tropopause for Vancouver Island latitudes, in hPa.
    #[serde(default = "default_tropopause_height")]
    pub height: f64,
    #[serde(default)]
    pub rule: TropopauseRule,
}

fn default_tropopause_height() -> f64 {
    264.0
}

impl Default for Tropopause {
    fn default() -> Self {
        Self {
            height: default_tropopause_height(),
            rule: TropopauseRule::default(),
        }
    }
}

impl Tropopause {
    pub fn regime(&self, index: usize, pressure_height: u32) -> Regime {
        let above = match self.rule {
            TropopauseRule::LevelIndex => index as f64 > self.height,
            TropopauseRule::PressureHeight => f64::from(pressure_height) < self.height,
        };
        if above {
            Regime::AboveTropopause
        } else {
            Regime::BelowTropopause
        }
    }
}

/// Everything a column needs apart from its standard deviation and seeds.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ColumnSettings {
    pub pressure_levels: PressureLevels,
    pub bounds: GeographicBounds,
    pub bias: BiasConfig,
    pub tropopause: Tropopause,
}

impl ColumnSettings {
    pub fn validate(&self) -> Result<()> {
        self.bounds.validate()?;
        self.bias.validate()?;
        if !self.tropopause.height.is_finite() {
            return Err(WindFieldError::config(format!(
                "tropopause height must be finite (got {})",
                self.tropopause.height
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AtmosphericColumn {
    pub bounds: GeographicBounds,
    pub standard_deviation: f64,
    pub pressure_heights: PressureLevels,
    pub regimes: Vec<Regime>,
    pub levels: Vec<LevelGrid>,
}

impl AtmosphericColumn {
    /// Generate every level, leaving `seeds` advanced by two per level.
    ///
    /// Settings are validated first, so a failed call consumes no seeds.
    pub fn generate(
        settings: &ColumnSettings,
        standard_deviation: f64,
        seeds: &mut SeedAllocator,
    ) -> Result<Self> {
        settings.validate()?;
        if !standard_deviation.is_finite() || standard_deviation < 0.0 {
            return Err(WindFieldError::InvalidStandardDeviation {
                value: standard_deviation,
            });
        }

        let first_seed = seeds.peek();
        let mut levels = Vec::with_capacity(LEVEL_COUNT);
        let mut regimes = Vec::with_capacity(LEVEL_COUNT);
        for (index, pressure_height) in settings.pressure_levels.iter().enumerate() {
            let (seed_u, seed_v) = seeds.next_pair();
            let mut level = LevelGrid::create(
                pressure_height,
                settings.bounds,
                standard_deviation,
                seed_u,
                seed_v,
            )?;
            let regime = settings.tropopause.regime(index, pressure_height);
            level.apply_bias(regime, &settings.bias);
            debug!(
                index,
                pressure_height,
                seed_u,
                seed_v,
                regime = ?regime,
                "generated level"
            );
            levels.push(level);
            regimes.push(regime);
        }

        info!(
            levels = levels.len(),
            standard_deviation,
            first_seed,
            next_seed = seeds.peek(),
            "generated atmospheric column"
        );

        Ok(Self {
            bounds: settings.bounds,
            standard_deviation,
            pressure_heights: settings.pressure_levels,
            regimes,
            levels,
        })
    }

    pub fn level(&self, pressure_height: u32) -> Option<&LevelGrid> {
        self.levels
            .iter()
            .find(|level| level.pressure_height == pressure_height)
    }
}
