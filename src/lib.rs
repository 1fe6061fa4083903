pub mod bias;
pub mod column;
pub mod engine;
pub mod error;
pub mod grid;
pub mod level;
pub mod logging;
pub mod report;
pub mod rng;
pub mod scenario;

pub use column::{AtmosphericColumn, ColumnSettings, PressureLevels, Tropopause, TropopauseRule};
pub use engine::{Engine, EngineBuilder, EngineSettings, Forecast};
pub use error::{Result, WindFieldError};
pub use grid::{axis_size, GeographicBounds};
pub use level::{LevelGrid, Regime};
pub use rng::{generate_field, SeedAllocator};
pub use scenario::{Scenario, ScenarioLoader};
