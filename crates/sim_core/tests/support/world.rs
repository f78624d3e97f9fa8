#![allow(dead_code)]

use bevy_ecs::prelude::World;
use sim_core::scenario::{init_world, SimConfig};
use sim_core::speed::RoundingPolicy;

/// Builder configuration for reproducible test worlds.
#[derive(Clone, Debug, Default)]
pub struct TestWorldConfig {
    pub rounding: RoundingPolicy,
    pub max_steps: Option<usize>,
}

/// Helper that populates the ECS world with all shared resources used in integration tests.
#[derive(Debug, Default)]
pub struct TestWorldBuilder {
    config: TestWorldConfig,
}

impl TestWorldBuilder {
    /// Create a new builder with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Choose how travel times are rounded.
    pub fn with_rounding(mut self, rounding: RoundingPolicy) -> Self {
        self.config.rounding = rounding;
        self
    }

    /// Cap the number of events a full run may execute.
    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.config.max_steps = Some(max_steps);
        self
    }

    /// Build the ECS world with the configured resources.
    pub fn build(self) -> World {
        let TestWorldConfig {
            rounding,
            max_steps,
        } = self.config;

        let mut config = SimConfig::default().with_rounding(rounding);
        if let Some(max_steps) = max_steps {
            config = config.with_max_steps(max_steps);
        }

        let mut world = World::new();
        init_world(&mut world, config);
        world
    }
}
