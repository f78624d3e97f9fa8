use bevy_ecs::prelude::{Query, Res, ResMut};
use tracing::debug;

use crate::clock::{CurrentEvent, EventKind, SimulationClock};
use crate::dispatcher::Dispatcher;
use crate::ecs::{Driver, Rider};
use crate::error::{SimError, SimResult};
use crate::scenario::SimConfig;
use crate::telemetry::{Action, ActorKind, Monitor};

/// A driver becomes available (new, or just finished) and asks for a rider.
///
/// Registers the driver with the dispatcher. If a rider is waiting, the driver
/// heads to the oldest one and a Pickup is emitted.
pub fn driver_request_system(
    event: Res<CurrentEvent>,
    config: Res<SimConfig>,
    mut clock: ResMut<SimulationClock>,
    mut dispatcher: ResMut<Dispatcher>,
    mut monitor: ResMut<Monitor>,
    riders: Query<&Rider>,
    mut drivers: Query<&mut Driver>,
) -> SimResult<()> {
    let EventKind::DriverRequest {
        driver: driver_entity,
    } = event.0.kind
    else {
        return Ok(());
    };
    let mut driver = drivers
        .get_mut(driver_entity)
        .map_err(|_| SimError::UnknownEntity(driver_entity))?;
    let now = clock.now();
    monitor.notify(now, ActorKind::Driver, Action::Request, &driver.id, driver.position);

    let Some(rider_entity) = dispatcher.request_rider(driver_entity) else {
        return Ok(());
    };
    let rider = riders
        .get(rider_entity)
        .map_err(|_| SimError::UnknownEntity(rider_entity))?;
    let travel_time = driver.start_drive(rider.origin, config.rounding)?;
    debug!(rider = %rider.id, driver = %driver.id, travel_time, "driver took waiting rider");
    clock.schedule_in(
        travel_time,
        EventKind::Pickup {
            rider: rider_entity,
            driver: driver_entity,
        },
    );
    Ok(())
}
