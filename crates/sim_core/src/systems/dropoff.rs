use bevy_ecs::prelude::{Query, Res, ResMut};
use tracing::debug;

use crate::clock::{CurrentEvent, EventKind, SimulationClock};
use crate::ecs::{Driver, Rider};
use crate::error::{SimError, SimResult};
use crate::telemetry::{Action, ActorKind, Monitor};

/// The driver delivers the rider, goes idle and immediately asks for a new rider.
pub fn dropoff_system(
    event: Res<CurrentEvent>,
    mut clock: ResMut<SimulationClock>,
    mut monitor: ResMut<Monitor>,
    riders: Query<&Rider>,
    mut drivers: Query<&mut Driver>,
) -> SimResult<()> {
    let EventKind::Dropoff {
        rider: rider_entity,
        driver: driver_entity,
    } = event.0.kind
    else {
        return Ok(());
    };
    let rider = riders
        .get(rider_entity)
        .map_err(|_| SimError::UnknownEntity(rider_entity))?;
    let mut driver = drivers
        .get_mut(driver_entity)
        .map_err(|_| SimError::UnknownEntity(driver_entity))?;

    driver.end_ride()?;
    let now = clock.now();
    monitor.notify(now, ActorKind::Driver, Action::Dropoff, &driver.id, driver.position);
    debug!(rider = %rider.id, driver = %driver.id, "rider dropped off");

    clock.schedule_in(
        0,
        EventKind::DriverRequest {
            driver: driver_entity,
        },
    );
    Ok(())
}
