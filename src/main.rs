use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use windfield::{
    engine::{EngineBuilder, EngineSettings},
    logging::{init_tracing, log_timed_operation},
    report::{ReportFormat, ReportWriter},
    scenario::{Scenario, ScenarioLoader},
    TropopauseRule,
};

#[derive(Debug, Parser)]
#[command(author, version, about = "Synthetic multi-level wind field generator")]
struct Cli {
    /// Path to a scenario YAML file (reference configuration when omitted)
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Override the scenario seed
    #[arg(long)]
    seed: Option<u64>,

    /// Number of forecast instants to generate ("now", "+6h", ...)
    #[arg(long, default_value_t = 1)]
    instants: usize,

    /// Override how levels are placed relative to the tropopause
    #[arg(long, value_enum)]
    tropopause_rule: Option<TropopauseRule>,

    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    format: ReportFormat,

    /// Decimal places in text output
    #[arg(long, default_value_t = 6)]
    precision: usize,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    let mut scenario = match &cli.scenario {
        Some(path) => ScenarioLoader::new(".").load(path)?,
        None => Scenario::default(),
    };
    if let Some(rule) = cli.tropopause_rule {
        scenario.tropopause.rule = rule;
    }

    let mut builder = EngineBuilder::new(EngineSettings::from_scenario(&scenario));
    if let Some(seed) = cli.seed {
        builder = builder.with_seed(seed);
    }
    let mut engine = builder.build()?;
    let forecast = log_timed_operation("generate_forecast", || engine.run(cli.instants))?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    ReportWriter::new(cli.format, cli.precision).write(&forecast, &mut out)?;
    out.flush()?;
    Ok(())
}
