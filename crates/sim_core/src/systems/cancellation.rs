use bevy_ecs::prelude::{Query, Res, ResMut};
use tracing::{debug, trace};

use crate::clock::{CurrentEvent, EventKind, SimulationClock};
use crate::dispatcher::Dispatcher;
use crate::ecs::{Rider, RiderStatus};
use crate::error::{SimError, SimResult};
use crate::telemetry::{Action, ActorKind, Monitor};

/// A rider's patience runs out.
///
/// Scheduled unconditionally at request time, so the rider's status is only
/// checked now: a rider already picked up is left alone.
pub fn cancellation_system(
    event: Res<CurrentEvent>,
    clock: Res<SimulationClock>,
    mut dispatcher: ResMut<Dispatcher>,
    mut monitor: ResMut<Monitor>,
    mut riders: Query<&mut Rider>,
) -> SimResult<()> {
    let EventKind::Cancellation { rider: rider_entity } = event.0.kind else {
        return Ok(());
    };
    let mut rider = riders
        .get_mut(rider_entity)
        .map_err(|_| SimError::UnknownEntity(rider_entity))?;

    match rider.status {
        RiderStatus::Waiting => {
            dispatcher.cancel_ride(rider_entity);
            rider.status = RiderStatus::Cancelled;
            monitor.notify(clock.now(), ActorKind::Rider, Action::Cancel, &rider.id, rider.origin);
            debug!(rider = %rider.id, "rider cancelled");
        }
        RiderStatus::Satisfied | RiderStatus::Cancelled => {
            trace!(rider = %rider.id, status = ?rider.status, "stale cancellation ignored");
        }
    }
    Ok(())
}
