//! Simulation runner: advances the clock and routes events into the ECS.
//!
//! Clock progression and event routing happen here, outside systems. Each step
//! pops the next event from [SimulationClock], inserts it as [CurrentEvent],
//! then runs the schedule. Exactly one handler system runs per event.

use bevy_ecs::prelude::{In, IntoSystem, Res, ResMut, Resource, Schedule, World};
use bevy_ecs::schedule::{ExecutorKind, IntoSystemConfigs};
use tracing::debug;

use crate::clock::{CurrentEvent, Event, EventKind, SimulationClock};
use crate::error::{SimError, SimResult};
use crate::systems::{
    cancellation::cancellation_system, driver_request::driver_request_system,
    dropoff::dropoff_system, pickup::pickup_system, rider_request::rider_request_system,
};

/// The first error raised by a handler during the current step.
#[derive(Debug, Default, Resource)]
pub struct SimFault(Option<SimError>);

impl SimFault {
    pub fn record(&mut self, error: SimError) {
        if self.0.is_none() {
            self.0 = Some(error);
        }
    }

    pub fn take(&mut self) -> Option<SimError> {
        self.0.take()
    }
}

/// Pipe target for handler systems.
fn record_fault(In(result): In<SimResult<()>>, mut fault: ResMut<SimFault>) {
    if let Err(error) = result {
        fault.record(error);
    }
}

// Condition functions for each event kind
fn is_rider_request(event: Option<Res<CurrentEvent>>) -> bool {
    event.is_some_and(|e| matches!(e.0.kind, EventKind::RiderRequest { .. }))
}

fn is_driver_request(event: Option<Res<CurrentEvent>>) -> bool {
    event.is_some_and(|e| matches!(e.0.kind, EventKind::DriverRequest { .. }))
}

fn is_cancellation(event: Option<Res<CurrentEvent>>) -> bool {
    event.is_some_and(|e| matches!(e.0.kind, EventKind::Cancellation { .. }))
}

fn is_pickup(event: Option<Res<CurrentEvent>>) -> bool {
    event.is_some_and(|e| matches!(e.0.kind, EventKind::Pickup { .. }))
}

fn is_dropoff(event: Option<Res<CurrentEvent>>) -> bool {
    event.is_some_and(|e| matches!(e.0.kind, EventKind::Dropoff { .. }))
}

/// Builds the simulation schedule: one conditionally-run handler per event kind.
///
/// The schedule uses the single-threaded executor; handlers share the clock,
/// dispatcher and entities and must never overlap.
pub fn simulation_schedule() -> Schedule {
    let mut schedule = Schedule::default();
    schedule.set_executor_kind(ExecutorKind::SingleThreaded);

    schedule.add_systems((
        rider_request_system.pipe(record_fault).run_if(is_rider_request),
        driver_request_system.pipe(record_fault).run_if(is_driver_request),
        cancellation_system.pipe(record_fault).run_if(is_cancellation),
        pickup_system.pipe(record_fault).run_if(is_pickup),
        dropoff_system.pipe(record_fault).run_if(is_dropoff),
    ));

    schedule
}

/// Runs one simulation step: pops the next event, inserts it as [CurrentEvent], then runs the schedule.
/// Returns `Ok(true)` if an event was processed and `Ok(false)` if the clock was empty.
pub fn run_next_event(world: &mut World, schedule: &mut Schedule) -> SimResult<bool> {
    run_next_event_with_hook(world, schedule, |_, _| {})
}

/// Runs one simulation step and invokes `hook` after the handler completes.
pub fn run_next_event_with_hook<F>(
    world: &mut World,
    schedule: &mut Schedule,
    mut hook: F,
) -> SimResult<bool>
where
    F: FnMut(&World, &Event),
{
    let event = {
        let mut clock = world.resource_mut::<SimulationClock>();
        if clock.is_empty() {
            return Ok(false);
        }
        clock.pop_next()?
    };
    debug!(timestamp = event.timestamp, kind = event.kind.label(), "executing event");
    world.insert_resource(CurrentEvent(event));

    schedule.run(world);

    let fault = world
        .get_resource_mut::<SimFault>()
        .and_then(|mut fault| fault.take());
    if let Some(source) = fault {
        return Err(SimError::EventFailed {
            timestamp: event.timestamp,
            event: event.kind.label(),
            source: Box::new(source),
        });
    }

    hook(world, &event);
    Ok(true)
}

/// Runs simulation steps until the event queue is empty or `max_steps` is reached.
/// Returns the number of steps executed.
pub fn run_until_empty(world: &mut World, schedule: &mut Schedule, max_steps: usize) -> SimResult<usize> {
    run_until_empty_with_hook(world, schedule, max_steps, |_, _| {})
}

/// Runs simulation steps until empty and invokes `hook` after each step.
pub fn run_until_empty_with_hook<F>(
    world: &mut World,
    schedule: &mut Schedule,
    max_steps: usize,
    mut hook: F,
) -> SimResult<usize>
where
    F: FnMut(&World, &Event),
{
    let mut steps = 0;
    while steps < max_steps && run_next_event_with_hook(world, schedule, &mut hook)? {
        steps += 1;
    }
    Ok(steps)
}
