//! The run contract: initial events in, report out.

use bevy_ecs::prelude::{Schedule, World};
use tracing::info;

use crate::clock::{Event, SimulationClock};
use crate::dispatcher::Dispatcher;
use crate::error::{SimError, SimResult};
use crate::runner::{run_until_empty_with_hook, simulation_schedule};
use crate::scenario::{build_scenario, init_world, ScenarioEvent, SimConfig};
use crate::telemetry::{Monitor, SimReport};

/// Owns the world (entities, clock, dispatcher, monitor) and the handler schedule.
///
/// A simulation runs once; build a new one for every scenario.
pub struct Simulation {
    world: World,
    schedule: Schedule,
    started: bool,
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new(SimConfig::default())
    }
}

impl Simulation {
    pub fn new(config: SimConfig) -> Self {
        let mut world = World::new();
        init_world(&mut world, config);
        Self {
            world,
            schedule: simulation_schedule(),
            started: false,
        }
    }

    /// Loads `events` and runs until the event queue drains.
    pub fn run(&mut self, events: &[ScenarioEvent]) -> SimResult<SimReport> {
        self.run_with_hook(events, |_, _| {})
    }

    /// Like [Simulation::run], calling `hook` after every executed event.
    ///
    /// Fails with [SimError::AlreadyRun] once a scenario has been loaded.
    pub fn run_with_hook<F>(&mut self, events: &[ScenarioEvent], hook: F) -> SimResult<SimReport>
    where
        F: FnMut(&World, &Event),
    {
        if self.started {
            return Err(SimError::AlreadyRun);
        }
        // A rejected scenario leaves the world untouched and may be retried.
        build_scenario(&mut self.world, events)?;
        self.started = true;
        let max_steps = self.world.resource::<SimConfig>().max_steps;
        info!(initial_events = events.len(), "simulation started");

        let steps = run_until_empty_with_hook(&mut self.world, &mut self.schedule, max_steps, hook)?;
        if !self.world.resource::<SimulationClock>().is_empty() {
            return Err(SimError::StepLimitExceeded(steps));
        }

        let report = self.report();
        info!(
            steps,
            end_time = self.world.resource::<SimulationClock>().now(),
            riders_served = report.riders_served,
            riders_cancelled = report.riders_cancelled,
            "simulation finished"
        );
        Ok(report)
    }

    pub fn report(&self) -> SimReport {
        self.monitor().report()
    }

    pub fn monitor(&self) -> &Monitor {
        self.world.resource::<Monitor>()
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        self.world.resource::<Dispatcher>()
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }
}

/// One-shot convenience: a fresh simulation over `events`.
pub fn run_scenario(events: &[ScenarioEvent], config: SimConfig) -> SimResult<SimReport> {
    Simulation::new(config).run(events)
}
