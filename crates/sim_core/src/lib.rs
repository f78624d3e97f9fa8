pub mod clock;
pub mod dispatcher;
pub mod ecs;
pub mod error;
pub mod runner;
pub mod scenario;
pub mod simulation;
pub mod spatial;
pub mod speed;
pub mod systems;
pub mod telemetry;
pub mod telemetry_export;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;

pub use error::{SimError, SimResult};
pub use simulation::{run_scenario, Simulation};
