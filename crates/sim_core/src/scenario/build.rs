use std::collections::HashSet;

use bevy_ecs::prelude::World;
use tracing::info;

use crate::clock::{EventKind, SimulationClock};
use crate::dispatcher::Dispatcher;
use crate::ecs::{Driver, Rider};
use crate::error::ScenarioError;
use crate::runner::SimFault;
use crate::scenario::params::SimConfig;
use crate::scenario::parse::ScenarioEvent;
use crate::telemetry::Monitor;

/// Inserts every resource the simulation schedule reads.
pub fn init_world(world: &mut World, config: SimConfig) {
    world.insert_resource(config);
    world.insert_resource(SimulationClock::default());
    world.insert_resource(Dispatcher::default());
    world.insert_resource(Monitor::default());
    world.insert_resource(SimFault::default());
}

/// Spawns one entity per scenario actor and schedules its initial request.
///
/// Identities must be unique per actor kind. Validation happens before the
/// world is touched, so a rejected scenario leaves the world unchanged.
/// Events are scheduled in input order, which is also their tie-break order.
pub fn build_scenario(world: &mut World, events: &[ScenarioEvent]) -> Result<(), ScenarioError> {
    let mut driver_ids = HashSet::new();
    let mut rider_ids = HashSet::new();
    for event in events {
        let (seen, kind) = match event {
            ScenarioEvent::DriverRequest { .. } => (&mut driver_ids, "driver"),
            ScenarioEvent::RiderRequest { .. } => (&mut rider_ids, "rider"),
        };
        if !seen.insert(event.id()) {
            return Err(ScenarioError::DuplicateIdentity {
                kind,
                id: event.id().to_string(),
            });
        }
    }

    for event in events {
        let (timestamp, kind) = match event {
            ScenarioEvent::DriverRequest {
                timestamp,
                id,
                position,
                speed,
            } => {
                let driver = world.spawn(Driver::new(id.clone(), *position, *speed)).id();
                (*timestamp, EventKind::DriverRequest { driver })
            }
            ScenarioEvent::RiderRequest {
                timestamp,
                id,
                origin,
                destination,
                patience,
            } => {
                let rider = world
                    .spawn(Rider::new(id.clone(), *origin, *destination, *patience))
                    .id();
                (*timestamp, EventKind::RiderRequest { rider })
            }
        };
        world
            .resource_mut::<SimulationClock>()
            .schedule_at(timestamp, kind);
    }

    info!(
        drivers = driver_ids.len(),
        riders = rider_ids.len(),
        "scenario built"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroU64;

    use super::*;
    use crate::spatial::Position;

    fn driver(timestamp: u64, id: &str) -> ScenarioEvent {
        ScenarioEvent::DriverRequest {
            timestamp,
            id: id.into(),
            position: Position::new(0, 0),
            speed: NonZeroU64::new(1).expect("speed"),
        }
    }

    fn rider(timestamp: u64, id: &str) -> ScenarioEvent {
        ScenarioEvent::RiderRequest {
            timestamp,
            id: id.into(),
            origin: Position::new(0, 1),
            destination: Position::new(0, 2),
            patience: 5,
        }
    }

    #[test]
    fn spawns_entities_and_schedules_requests() {
        let mut world = World::new();
        init_world(&mut world, SimConfig::default());
        build_scenario(&mut world, &[rider(3, "r1"), driver(0, "d1")]).expect("valid");

        assert_eq!(world.query::<&Driver>().iter(&world).count(), 1);
        assert_eq!(world.query::<&Rider>().iter(&world).count(), 1);

        let pending = world.resource::<SimulationClock>().pending();
        assert_eq!(pending.len(), 2);
        assert!(matches!(pending[0].kind, EventKind::DriverRequest { .. }));
        assert_eq!(pending[1].timestamp, 3);
    }

    #[test]
    fn same_id_for_driver_and_rider_is_allowed() {
        let mut world = World::new();
        init_world(&mut world, SimConfig::default());
        assert!(build_scenario(&mut world, &[driver(0, "x"), rider(0, "x")]).is_ok());
    }

    #[test]
    fn duplicate_identity_leaves_world_untouched() {
        let mut world = World::new();
        init_world(&mut world, SimConfig::default());
        let err = build_scenario(&mut world, &[driver(0, "d1"), rider(1, "r1"), driver(2, "d1")])
            .expect_err("duplicate driver");
        assert!(matches!(
            err,
            ScenarioError::DuplicateIdentity { kind: "driver", .. }
        ));
        assert!(world.resource::<SimulationClock>().is_empty());
        assert_eq!(world.query::<&Rider>().iter(&world).count(), 0);
    }
}
