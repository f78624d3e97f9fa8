//! Test helpers for common test setup and utilities.
//!
//! This module provides shared test utilities to reduce duplication across test files.

use std::num::NonZeroU64;

use bevy_ecs::prelude::{Entity, World};

use crate::clock::{CurrentEvent, Event, EventKind, SimulationClock};
use crate::ecs::{Driver, Rider};
use crate::scenario::{init_world, SimConfig};
use crate::spatial::Position;

/// Create a world with every resource the handler systems read.
pub fn create_test_world() -> World {
    let mut world = World::new();
    init_world(&mut world, SimConfig::default());
    world
}

/// Spawn an idle driver at `(row, col)`.
///
/// # Panics
///
/// Panics if `speed` is zero.
pub fn spawn_driver(world: &mut World, id: &str, (row, col): (i64, i64), speed: u64) -> Entity {
    let speed = NonZeroU64::new(speed).expect("driver speed must be positive");
    world.spawn(Driver::new(id, Position::new(row, col), speed)).id()
}

/// Spawn a waiting rider travelling from `origin` to `destination`.
pub fn spawn_rider(
    world: &mut World,
    id: &str,
    origin: (i64, i64),
    destination: (i64, i64),
    patience: u64,
) -> Entity {
    world
        .spawn(Rider::new(id, origin.into(), destination.into(), patience))
        .id()
}

/// Schedule `kind` at `timestamp`, pop it and make it the current event, as the
/// runner would before running the schedule.
///
/// # Panics
///
/// Panics if an earlier event is already queued.
pub fn make_current(world: &mut World, timestamp: u64, kind: EventKind) -> Event {
    let event = {
        let mut clock = world.resource_mut::<SimulationClock>();
        clock.schedule_at(timestamp, kind);
        clock.pop_next().expect("event just scheduled")
    };
    assert_eq!(event.kind, kind, "an earlier event was already queued");
    world.insert_resource(CurrentEvent(event));
    event
}

/// Pending events in execution order as `(timestamp, kind)` pairs.
pub fn pending_events(world: &World) -> Vec<(u64, EventKind)> {
    world
        .resource::<SimulationClock>()
        .pending()
        .into_iter()
        .map(|e| (e.timestamp, e.kind))
        .collect()
}
