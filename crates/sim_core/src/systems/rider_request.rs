use bevy_ecs::prelude::{Query, Res, ResMut};
use tracing::debug;

use crate::clock::{CurrentEvent, EventKind, SimulationClock};
use crate::dispatcher::Dispatcher;
use crate::ecs::{Driver, Rider};
use crate::error::{SimError, SimResult};
use crate::scenario::SimConfig;
use crate::telemetry::{Action, ActorKind, Monitor};

/// A rider arrives and asks for a driver.
///
/// Emits a Pickup when an idle driver is found, and always a Cancellation at
/// `now + patience`. The Pickup is scheduled first so that it wins a tie with
/// the Cancellation.
pub fn rider_request_system(
    event: Res<CurrentEvent>,
    config: Res<SimConfig>,
    mut clock: ResMut<SimulationClock>,
    mut dispatcher: ResMut<Dispatcher>,
    mut monitor: ResMut<Monitor>,
    riders: Query<&Rider>,
    mut drivers: Query<&mut Driver>,
) -> SimResult<()> {
    let EventKind::RiderRequest { rider: rider_entity } = event.0.kind else {
        return Ok(());
    };
    let rider = riders
        .get(rider_entity)
        .map_err(|_| SimError::UnknownEntity(rider_entity))?;
    let now = clock.now();
    monitor.notify(now, ActorKind::Rider, Action::Request, &rider.id, rider.origin);

    let matched = dispatcher.request_driver(rider_entity, |candidate| {
        drivers
            .get(candidate)
            .ok()
            .filter(|driver| driver.is_idle())
            .map(|driver| driver.travel_time(rider.origin, config.rounding))
    });

    if let Some(driver_entity) = matched {
        let mut driver = drivers
            .get_mut(driver_entity)
            .map_err(|_| SimError::UnknownEntity(driver_entity))?;
        let travel_time = driver.start_drive(rider.origin, config.rounding)?;
        debug!(rider = %rider.id, driver = %driver.id, travel_time, "driver dispatched to rider");
        clock.schedule_in(
            travel_time,
            EventKind::Pickup {
                rider: rider_entity,
                driver: driver_entity,
            },
        );
    }

    clock.schedule_in(
        rider.patience,
        EventKind::Cancellation {
            rider: rider_entity,
        },
    );
    Ok(())
}
