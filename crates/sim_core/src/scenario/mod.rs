//! Scenario setup: initial events from a file or a seeded generator, and the
//! world they are built into.

mod build;
mod generate;
mod params;
mod parse;

pub use build::{build_scenario, init_world};
pub use generate::generate_scenario;
pub use params::{ScenarioParams, SimConfig};
pub use parse::{load_scenario, parse_scenario, ScenarioEvent};
