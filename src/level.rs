//! Wind components for a single pressure level.

use serde::Serialize;

use crate::bias::BiasConfig;
use crate::error::Result;
use crate::grid::GeographicBounds;
use crate::rng::generate_field;

/// Which side of the tropopause a level was biased for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Regime {
    BelowTropopause,
    AboveTropopause,
}

/// One pressure level of the synthetic wind field.
///
/// `u_component` runs along the latitude axis and `v_component` along the
/// longitude axis. The two are sized independently and are not a 2D grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LevelGrid {
    pub pressure_height: u32,
    pub bounds: GeographicBounds,
    pub standard_deviation: f64,
    pub seeds: (u64, u64),
    pub u_component: Vec<f64>,
    pub v_component: Vec<f64>,
}

impl LevelGrid {
    /// Sample raw, unbiased components. `seed_u` and `seed_v` must differ.
    pub fn create(
        pressure_height: u32,
        bounds: GeographicBounds,
        standard_deviation: f64,
        seed_u: u64,
        seed_v: u64,
    ) -> Result<Self> {
        let u_component = generate_field(seed_u, bounds.lat_size(), standard_deviation)?;
        let v_component = generate_field(seed_v, bounds.lon_size(), standard_deviation)?;
        Ok(Self {
            pressure_height,
            bounds,
            standard_deviation,
            seeds: (seed_u, seed_v),
            u_component,
            v_component,
        })
    }

    pub fn apply_bias_below_tropopause(&mut self, bias: &BiasConfig) {
        bias.apply(&mut self.u_component, BiasConfig::positive_cos);
        bias.apply(&mut self.v_component, BiasConfig::positive_sin);
    }

    pub fn apply_bias_above_tropopause(&mut self, bias: &BiasConfig) {
        bias.apply(&mut self.u_component, BiasConfig::negative_cos);
        bias.apply(&mut self.v_component, BiasConfig::negative_cos);
    }

    pub fn apply_bias(&mut self, regime: Regime, bias: &BiasConfig) {
        match regime {
            Regime::BelowTropopause => self.apply_bias_below_tropopause(bias),
            Regime::AboveTropopause => self.apply_bias_above_tropopause(bias),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn raw_level() -> LevelGrid {
        LevelGrid::create(600, GeographicBounds::default(), 2.0, 1234, 1235).unwrap()
    }

    fn assert_shifted(after: &[f64], before: &[f64], shift: f64) {
        assert_eq!(after.len(), before.len());
        for (a, b) in after.iter().zip(before) {
            assert!((a - b - shift).abs() < EPS, "{a} - {b} != {shift}");
        }
    }

    #[test]
    fn test_component_lengths_follow_axes() {
        let level = raw_level();
        assert_eq!(level.u_component.len(), 9);
        assert_eq!(level.v_component.len(), 22);
        assert_eq!(level.seeds, (1234, 1235));
    }

    #[test]
    fn test_components_come_from_distinct_streams() {
        let level = raw_level();
        assert_ne!(&level.u_component[..], &level.v_component[..9]);
    }

    #[test]
    fn test_below_bias_shift() {
        let bias = BiasConfig::default();
        let raw = raw_level();
        let mut level = raw.clone();

        level.apply_bias_below_tropopause(&bias);

        assert_shifted(&level.u_component, &raw.u_component, bias.cos_offset());
        assert_shifted(&level.v_component, &raw.v_component, bias.sin_offset());
    }

    #[test]
    fn test_below_bias_is_additive() {
        let bias = BiasConfig::default();
        let raw = raw_level();
        let mut level = raw.clone();

        level.apply_bias_below_tropopause(&bias);
        level.apply_bias_below_tropopause(&bias);

        assert_shifted(&level.u_component, &raw.u_component, 2.0 * bias.cos_offset());
        assert_shifted(&level.v_component, &raw.v_component, 2.0 * bias.sin_offset());
    }

    #[test]
    fn test_above_bias_shift() {
        let bias = BiasConfig::default();
        let raw = raw_level();
        let mut level = raw.clone();

        level.apply_bias(Regime::AboveTropopause, &bias);

        assert_shifted(&level.u_component, &raw.u_component, -bias.cos_offset());
        assert_shifted(&level.v_component, &raw.v_component, -bias.cos_offset());
    }
}
