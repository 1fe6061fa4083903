//! Rendering finished columns for display.

use std::io::Write;

use anyhow::Result;
use clap::ValueEnum;

use crate::column::AtmosphericColumn;
use crate::engine::Forecast;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

pub struct ReportWriter {
    format: ReportFormat,
    precision: usize,
}

impl ReportWriter {
    pub fn new(format: ReportFormat, precision: usize) -> Self {
        Self { format, precision }
    }

    pub fn write(&self, forecast: &Forecast, out: &mut impl Write) -> Result<()> {
        match self.format {
            ReportFormat::Json => {
                serde_json::to_writer_pretty(&mut *out, forecast)?;
                writeln!(out)?;
            }
            ReportFormat::Text => {
                let labelled = forecast.instants.len() > 1;
                for instant in &forecast.instants {
                    if labelled {
                        writeln!(
                            out,
                            "# {} ({}, stdev {})",
                            instant.label(),
                            forecast.scenario,
                            instant.column.standard_deviation
                        )?;
                    }
                    write_column(&instant.column, self.precision, out)?;
                }
            }
        }
        Ok(())
    }
}

impl Default for ReportWriter {
    fn default() -> Self {
        Self::new(ReportFormat::Text, 6)
    }
}

/// Two lines per level: `"<h> hPa ugrid : ..."` then `"<h> hPa vgrid : ..."`.
pub fn write_column(column: &AtmosphericColumn, precision: usize, out: &mut impl Write) -> Result<()> {
    for level in &column.levels {
        write!(out, "{} hPa ugrid : ", level.pressure_height)?;
        write_values(&level.u_component, precision, out)?;
        write!(out, "\n{} hPa vgrid : ", level.pressure_height)?;
        write_values(&level.v_component, precision, out)?;
        writeln!(out)?;
    }
    Ok(())
}

fn write_values(values: &[f64], precision: usize, out: &mut impl Write) -> Result<()> {
    for value in values {
        write!(out, "{value:.precision$} ")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{EngineBuilder, EngineSettings};
    use crate::scenario::Scenario;

    fn forecast(instants: usize) -> Forecast {
        let settings = EngineSettings::from_scenario(&Scenario::default());
        EngineBuilder::new(settings)
            .build()
            .unwrap()
            .run(instants)
            .unwrap()
    }

    #[test]
    fn test_text_report_lists_every_level() {
        let mut buf = Vec::new();
        ReportWriter::new(ReportFormat::Text, 3)
            .write(&forecast(1), &mut buf)
            .unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 20);
        assert!(lines[0].starts_with("600 hPa ugrid : "));
        assert!(lines[1].starts_with("600 hPa vgrid : "));
        assert!(lines[19].starts_with("7 hPa vgrid : "));
        assert!(lines[0].ends_with(' '));
        let values = lines[0].trim_start_matches("600 hPa ugrid : ").split_whitespace();
        assert_eq!(values.count(), 9);
        let values = lines[1].trim_start_matches("600 hPa vgrid : ").split_whitespace();
        assert_eq!(values.count(), 22);
    }

    #[test]
    fn test_text_report_labels_multiple_instants() {
        let mut buf = Vec::new();
        ReportWriter::default().write(&forecast(2), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert!(text.starts_with("# now"));
        assert!(text.contains("# +6h"));
    }

    #[test]
    fn test_json_report_round_trips_structure() {
        let mut buf = Vec::new();
        ReportWriter::new(ReportFormat::Json, 6)
            .write(&forecast(1), &mut buf)
            .unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();

        assert_eq!(value["scenario"], "vancouver_island");
        let levels = value["instants"][0]["column"]["levels"].as_array().unwrap();
        assert_eq!(levels.len(), 10);
        assert_eq!(levels[0]["pressure_height"], 600);
        assert_eq!(value["instants"][0]["column"]["pressure_heights"][9], 7);
        assert_eq!(value["instants"][0]["column"]["regimes"][0], "below_tropopause");
    }
}
