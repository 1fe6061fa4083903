use serde::Serialize;
use tracing::info;

use crate::{
    column::{AtmosphericColumn, ColumnSettings},
    error::{Result, WindFieldError},
    rng::SeedAllocator,
    scenario::{Scenario, StdDevSchedule},
};

pub struct EngineSettings {
    pub scenario_name: String,
    pub seed: u64,
    pub column: ColumnSettings,
    pub schedule: StdDevSchedule,
}

impl EngineSettings {
    pub fn from_scenario(scenario: &Scenario) -> Self {
        Self {
            scenario_name: scenario.name.clone(),
            seed: scenario.seed,
            column: scenario.column_settings(),
            schedule: scenario.standard_deviation,
        }
    }
}

pub struct EngineBuilder {
    settings: EngineSettings,
}

impl EngineBuilder {
    pub fn new(settings: EngineSettings) -> Self {
        Self { settings }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.settings.seed = seed;
        self
    }

    pub fn with_column(mut self, column: ColumnSettings) -> Self {
        self.settings.column = column;
        self
    }

    pub fn build(self) -> Result<Engine> {
        self.settings.column.validate()?;
        self.settings.schedule.validate()?;
        Ok(Engine {
            seeds: SeedAllocator::new(self.settings.seed),
            settings: self.settings,
        })
    }
}

/// Produces successive columns ("now", "+6h", ...) from one seed stream.
pub struct Engine {
    seeds: SeedAllocator,
    settings: EngineSettings,
}

impl Engine {
    /// Generate the first `instants` entries of the deviation schedule.
    pub fn run(&mut self, instants: usize) -> Result<Forecast> {
        if instants > self.settings.schedule.intervals {
            return Err(WindFieldError::config(format!(
                "requested {instants} instants but the deviation schedule has {}",
                self.settings.schedule.intervals
            )));
        }
        let mut entries = Vec::with_capacity(instants);
        for interval in 0..instants {
            let standard_deviation = self.settings.schedule.at(interval)?;
            let offset_hours = self.settings.schedule.offset_hours(interval)?;
            let first_seed = self.seeds.peek();
            let column =
                AtmosphericColumn::generate(&self.settings.column, standard_deviation, &mut self.seeds)?;
            info!(
                scenario = %self.settings.scenario_name,
                offset_hours,
                first_seed,
                standard_deviation,
                "forecast instant ready"
            );
            entries.push(ForecastInstant {
                offset_hours,
                first_seed,
                column,
            });
        }
        Ok(Forecast {
            scenario: self.settings.scenario_name.clone(),
            instants: entries,
        })
    }

    pub fn next_seed(&self) -> u64 {
        self.seeds.peek()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastInstant {
    pub offset_hours: u32,
    pub first_seed: u64,
    pub column: AtmosphericColumn,
}

impl ForecastInstant {
    pub fn label(&self) -> String {
        if self.offset_hours == 0 {
            "now".to_string()
        } else {
            format!("+{}h", self.offset_hours)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Forecast {
    pub scenario: String,
    pub instants: Vec<ForecastInstant>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(seed: u64) -> Engine {
        let settings = EngineSettings::from_scenario(&Scenario::default());
        EngineBuilder::new(settings).with_seed(seed).build().unwrap()
    }

    #[test]
    fn test_successive_instants_use_disjoint_seeds() {
        let forecast = engine(1234).run(2).unwrap();

        assert_eq!(forecast.instants[0].first_seed, 1234);
        assert_eq!(forecast.instants[1].first_seed, 1254);
        assert_ne!(
            forecast.instants[0].column.levels[0].u_component,
            forecast.instants[1].column.levels[0].u_component
        );
    }

    #[test]
    fn test_instants_follow_schedule() {
        let forecast = engine(1).run(3).unwrap();
        let labels: Vec<String> = forecast.instants.iter().map(|i| i.label()).collect();

        assert_eq!(labels, vec!["now", "+6h", "+12h"]);
        assert_eq!(forecast.instants[0].column.standard_deviation, 2.0);
        assert!((forecast.instants[2].column.standard_deviation - 2.1).abs() < 1e-12);
    }

    #[test]
    fn test_run_past_schedule_fails() {
        assert!(engine(1).run(31).is_err());
    }

    #[test]
    fn test_huge_interval_hours_fail_at_build() {
        let mut scenario = Scenario::default();
        scenario.standard_deviation.interval_hours = 3_000_000_000;

        assert!(EngineBuilder::new(EngineSettings::from_scenario(&scenario))
            .build()
            .is_err());
    }

    #[test]
    fn test_engine_advances_across_runs() {
        let mut engine = engine(100);
        engine.run(1).unwrap();
        assert_eq!(engine.next_seed(), 120);
    }
}
