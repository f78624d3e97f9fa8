use bevy_ecs::prelude::Resource;

use crate::speed::RoundingPolicy;

/// Upper bound on executed events before a run is declared runaway.
const DEFAULT_MAX_STEPS: usize = 10_000_000;

/// Run-wide settings read by the event handlers and the runner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Resource)]
pub struct SimConfig {
    /// Rounding applied to every travel-time computation.
    pub rounding: RoundingPolicy,
    /// The runner fails with `StepLimitExceeded` past this many events.
    pub max_steps: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            rounding: RoundingPolicy::default(),
            max_steps: DEFAULT_MAX_STEPS,
        }
    }
}

impl SimConfig {
    pub fn with_rounding(mut self, rounding: RoundingPolicy) -> Self {
        self.rounding = rounding;
        self
    }

    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }
}

/// Parameters for generating a random scenario.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioParams {
    pub num_riders: usize,
    pub num_drivers: usize,
    /// Grid extent: positions are drawn from `[0, grid_rows) x [0, grid_cols)`.
    pub grid_rows: i64,
    pub grid_cols: i64,
    /// Riders request uniformly in `[0, request_window]`.
    pub request_window: u64,
    /// Drivers come online uniformly in `[0, driver_spread]`.
    pub driver_spread: u64,
    pub min_speed: u64,
    pub max_speed: u64,
    pub min_patience: u64,
    pub max_patience: u64,
    pub seed: Option<u64>,
}

impl Default for ScenarioParams {
    fn default() -> Self {
        Self {
            num_riders: 50,
            num_drivers: 10,
            grid_rows: 20,
            grid_cols: 20,
            request_window: 100,
            driver_spread: 10,
            min_speed: 1,
            max_speed: 3,
            min_patience: 5,
            max_patience: 30,
            seed: None,
        }
    }
}

impl ScenarioParams {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_counts(mut self, num_drivers: usize, num_riders: usize) -> Self {
        self.num_drivers = num_drivers;
        self.num_riders = num_riders;
        self
    }

    pub fn with_grid(mut self, rows: i64, cols: i64) -> Self {
        self.grid_rows = rows;
        self.grid_cols = cols;
        self
    }

    pub fn with_request_window(mut self, window: u64) -> Self {
        self.request_window = window;
        self
    }

    pub fn with_driver_spread(mut self, spread: u64) -> Self {
        self.driver_spread = spread;
        self
    }

    /// Speeds drawn from `min..=max`; a minimum of zero is raised to one.
    pub fn with_speed_range(mut self, min: u64, max: u64) -> Self {
        self.min_speed = min;
        self.max_speed = max;
        self
    }

    pub fn with_patience_range(mut self, min: u64, max: u64) -> Self {
        self.min_patience = min;
        self.max_patience = max;
        self
    }
}
