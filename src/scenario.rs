use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::{
    bias::BiasConfig,
    column::{ColumnSettings, PressureLevels, Tropopause},
    error::WindFieldError,
    grid::GeographicBounds,
};

fn default_name() -> String {
    "vancouver_island".to_string()
}

fn default_seed() -> u64 {
    1234
}

fn default_base_stdev() -> f64 {
    2.0
}

fn default_stdev_increment() -> f64 {
    0.05
}

fn default_intervals() -> usize {
    30
}

fn default_interval_hours() -> u32 {
    6
}

#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    #[serde(default = "default_name")]
    pub name: String,
    pub description: Option<String>,
    #[serde(default = "default_seed")]
    pub seed: u64,
    #[serde(default)]
    pub bounds: GeographicBounds,
    #[serde(default)]
    pub pressure_levels: PressureLevels,
    #[serde(default)]
    pub tropopause: Tropopause,
    #[serde(default)]
    pub bias: BiasConfig,
    #[serde(default)]
    pub standard_deviation: StdDevSchedule,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            name: default_name(),
            description: None,
            seed: default_seed(),
            bounds: GeographicBounds::default(),
            pressure_levels: PressureLevels::default(),
            tropopause: Tropopause::default(),
            bias: BiasConfig::default(),
            standard_deviation: StdDevSchedule::default(),
        }
    }
}

/// Wind spread per forecast interval. Later forecasts are less certain, so
/// each interval widens the base deviation by a fixed increment.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct StdDevSchedule {
    #[serde(default = "default_base_stdev")]
    pub base: f64,
    #[serde(default = "default_stdev_increment")]
    pub increment_per_interval: f64,
    #[serde(default = "default_intervals")]
    pub intervals: usize,
    #[serde(default = "default_interval_hours")]
    pub interval_hours: u32,
}

impl Default for StdDevSchedule {
    fn default() -> Self {
        Self {
            base: default_base_stdev(),
            increment_per_interval: default_stdev_increment(),
            intervals: default_intervals(),
            interval_hours: default_interval_hours(),
        }
    }
}

impl StdDevSchedule {
    fn deviation(&self, interval: usize) -> f64 {
        if interval == 0 {
            self.base
        } else {
            self.base + interval as f64 * self.increment_per_interval
        }
    }

    pub fn table(&self) -> Vec<f64> {
        (0..self.intervals).map(|i| self.deviation(i)).collect()
    }

    pub fn at(&self, interval: usize) -> crate::Result<f64> {
        if interval >= self.intervals {
            return Err(WindFieldError::config(format!(
                "interval {interval} is past the {}-entry deviation schedule",
                self.intervals
            )));
        }
        Ok(self.deviation(interval))
    }

    pub fn offset_hours(&self, interval: usize) -> crate::Result<u32> {
        u32::try_from(interval)
            .ok()
            .and_then(|interval| self.interval_hours.checked_mul(interval))
            .ok_or_else(|| {
                WindFieldError::config(format!(
                    "offset of interval {interval} at {} hours per interval does not fit in u32 hours",
                    self.interval_hours
                ))
            })
    }

    pub fn validate(&self) -> crate::Result<()> {
        if self.intervals == 0 {
            return Err(WindFieldError::config(
                "deviation schedule needs at least one interval",
            ));
        }
        let last = self.intervals - 1;
        self.offset_hours(last)?;
        for value in [self.base, self.deviation(last)] {
            if !value.is_finite() || value < 0.0 {
                return Err(WindFieldError::InvalidStandardDeviation { value });
            }
        }
        Ok(())
    }
}

impl Scenario {
    pub fn column_settings(&self) -> ColumnSettings {
        ColumnSettings {
            pressure_levels: self.pressure_levels,
            bounds: self.bounds,
            bias: self.bias,
            tropopause: self.tropopause,
        }
    }

    pub fn validate(&self) -> crate::Result<()> {
        self.column_settings().validate()?;
        self.standard_deviation.validate()
    }
}

pub struct ScenarioLoader {
    base_dir: PathBuf,
}

impl ScenarioLoader {
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    pub fn load(&self, file: impl AsRef<Path>) -> Result<Scenario> {
        let path = self.base_dir.join(file);
        let data = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read scenario file {}", path.display()))?;
        let scenario: Scenario = serde_yaml::from_str(&data)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        scenario
            .validate()
            .with_context(|| format!("Invalid scenario {}", path.display()))?;
        Ok(scenario)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::TropopauseRule;

    #[test]
    fn test_empty_document_uses_reference_configuration() {
        let scenario: Scenario = serde_yaml::from_str("{}").unwrap();

        assert_eq!(scenario.name, "vancouver_island");
        assert_eq!(scenario.seed, 1234);
        assert_eq!(scenario.bounds, GeographicBounds::default());
        assert_eq!(scenario.pressure_levels, PressureLevels::default());
        assert_eq!(scenario.tropopause.rule, TropopauseRule::LevelIndex);
        scenario.validate().unwrap();
    }

    #[test]
    fn test_schedule_table_widens_per_interval() {
        let table = StdDevSchedule::default().table();

        assert_eq!(table.len(), 30);
        assert_eq!(table[0], 2.0);
        assert!((table[1] - 2.05).abs() < 1e-12);
        assert!((table[29] - 3.45).abs() < 1e-12);
    }

    #[test]
    fn test_schedule_rejects_interval_past_table() {
        let schedule = StdDevSchedule::default();
        assert!(schedule.at(29).is_ok());
        assert!(schedule.at(30).is_err());
        assert_eq!(schedule.offset_hours(2).unwrap(), 12);
    }

    #[test]
    fn test_oversized_interval_hours_are_rejected() {
        let yaml = "standard_deviation:\n  interval_hours: 3000000000\n";
        let scenario: Scenario = serde_yaml::from_str(yaml).unwrap();

        assert!(scenario.standard_deviation.offset_hours(2).is_err());
        let err = scenario.validate().unwrap_err();
        assert!(err.to_string().contains("does not fit"), "{err}");
    }

    #[test]
    fn test_single_entry_schedule_ignores_increment() {
        let schedule = StdDevSchedule {
            base: 2.0,
            increment_per_interval: f64::INFINITY,
            intervals: 1,
            ..StdDevSchedule::default()
        };

        schedule.validate().unwrap();
        assert_eq!(schedule.table(), vec![2.0]);
        assert_eq!(schedule.at(0).unwrap(), 2.0);
    }

    #[test]
    fn test_wrong_level_count_fails_to_parse() {
        let yaml = "pressure_levels: [600, 450, 300]\n";
        let err = serde_yaml::from_str::<Scenario>(yaml).unwrap_err();
        assert!(err.to_string().contains("exactly 10"), "{err}");
    }

    #[test]
    fn test_negative_schedule_is_rejected() {
        let scenario = Scenario {
            standard_deviation: StdDevSchedule {
                base: 1.0,
                increment_per_interval: -0.5,
                ..StdDevSchedule::default()
            },
            ..Scenario::default()
        };
        assert!(scenario.validate().is_err());
    }
}
