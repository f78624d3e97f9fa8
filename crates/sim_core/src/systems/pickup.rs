use bevy_ecs::prelude::{Query, Res, ResMut};
use tracing::{debug, warn};

use crate::clock::{CurrentEvent, EventKind, SimulationClock};
use crate::ecs::{Driver, Rider, RiderStatus};
use crate::error::{SimError, SimResult};
use crate::scenario::SimConfig;
use crate::telemetry::{Action, ActorKind, Monitor};

/// The driver reaches the rider's origin.
///
/// A waiting rider is picked up and a Dropoff is emitted. If the rider gave up
/// in the meantime the driver is free again and asks for a new rider at once.
pub fn pickup_system(
    event: Res<CurrentEvent>,
    config: Res<SimConfig>,
    mut clock: ResMut<SimulationClock>,
    mut monitor: ResMut<Monitor>,
    mut riders: Query<&mut Rider>,
    mut drivers: Query<&mut Driver>,
) -> SimResult<()> {
    let EventKind::Pickup {
        rider: rider_entity,
        driver: driver_entity,
    } = event.0.kind
    else {
        return Ok(());
    };
    let mut rider = riders
        .get_mut(rider_entity)
        .map_err(|_| SimError::UnknownEntity(rider_entity))?;
    let mut driver = drivers
        .get_mut(driver_entity)
        .map_err(|_| SimError::UnknownEntity(driver_entity))?;

    driver.end_drive()?;
    let now = clock.now();

    match rider.status {
        RiderStatus::Waiting => {
            monitor.notify(now, ActorKind::Rider, Action::Pickup, &rider.id, rider.origin);
            monitor.notify(now, ActorKind::Driver, Action::Pickup, &driver.id, driver.position);
            let ride_time = driver.start_ride(&rider, config.rounding)?;
            rider.status = RiderStatus::Satisfied;
            debug!(rider = %rider.id, driver = %driver.id, ride_time, "rider picked up");
            clock.schedule_in(
                ride_time,
                EventKind::Dropoff {
                    rider: rider_entity,
                    driver: driver_entity,
                },
            );
        }
        RiderStatus::Cancelled => {
            debug!(rider = %rider.id, driver = %driver.id, "rider gone at pickup, driver freed");
            clock.schedule_in(
                0,
                EventKind::DriverRequest {
                    driver: driver_entity,
                },
            );
        }
        RiderStatus::Satisfied => {
            warn!(rider = %rider.id, driver = %driver.id, "pickup for a rider already served");
        }
    }
    Ok(())
}
