//! Simulation clock: the time-ordered queue of pending events.
//!
//! Events are popped by ascending timestamp. Events sharing a timestamp pop in
//! the order they were scheduled, using a sequence number the clock assigns on
//! insertion, so a run is fully reproducible from its initial events.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::fmt;

use bevy_ecs::prelude::{Entity, Resource, World};

use crate::ecs::{Driver, Rider};
use crate::error::{SimError, SimResult};

/// The closed set of simulation steps, each carrying the entities it touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    RiderRequest { rider: Entity },
    DriverRequest { driver: Entity },
    Cancellation { rider: Entity },
    Pickup { rider: Entity, driver: Entity },
    Dropoff { rider: Entity, driver: Entity },
}

impl EventKind {
    pub fn label(&self) -> &'static str {
        match self {
            EventKind::RiderRequest { .. } => "RiderRequest",
            EventKind::DriverRequest { .. } => "DriverRequest",
            EventKind::Cancellation { .. } => "Cancellation",
            EventKind::Pickup { .. } => "Pickup",
            EventKind::Dropoff { .. } => "Dropoff",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Event {
    pub timestamp: u64,
    /// Insertion order within the clock; breaks timestamp ties.
    pub seq: u64,
    pub kind: EventKind,
}

impl Event {
    /// One-line human description, resolving entity ids through `world`.
    pub fn describe(&self, world: &World) -> String {
        let rider = |entity: Entity| {
            world
                .get::<Rider>(entity)
                .map_or_else(|| format!("{entity:?}"), |r| r.id.clone())
        };
        let driver = |entity: Entity| {
            world
                .get::<Driver>(entity)
                .map_or_else(|| format!("{entity:?}"), |d| d.id.clone())
        };
        let t = self.timestamp;
        match self.kind {
            EventKind::RiderRequest { rider: r } => format!("{t} -- {}: Request a driver", rider(r)),
            EventKind::DriverRequest { driver: d } => {
                format!("{t} -- {}: Request a rider", driver(d))
            }
            EventKind::Cancellation { rider: r } => {
                format!("{t} -- {}: Cancelled their ride.", rider(r))
            }
            EventKind::Pickup { rider: r, driver: d } => {
                format!("{t} -- {}: Picked up {}", driver(d), rider(r))
            }
            EventKind::Dropoff { rider: r, driver: d } => {
                format!("{t} -- {}: Dropped off {}", driver(d), rider(r))
            }
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.kind, self.timestamp)
    }
}

impl Ord for Event {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering to make BinaryHeap a min-heap by (timestamp, seq).
        other
            .timestamp
            .cmp(&self.timestamp)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Event {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// The event currently being executed by the schedule.
#[derive(Debug, Clone, Copy, Resource)]
pub struct CurrentEvent(pub Event);

#[derive(Debug, Default, Resource)]
pub struct SimulationClock {
    now: u64,
    next_seq: u64,
    events: BinaryHeap<Event>,
}

impl SimulationClock {
    /// Timestamp of the most recently popped event.
    pub fn now(&self) -> u64 {
        self.now
    }

    /// Schedules `kind` at an absolute timestamp and returns the stored event.
    pub fn schedule_at(&mut self, timestamp: u64, kind: EventKind) -> Event {
        debug_assert!(
            timestamp >= self.now,
            "event timestamp must be >= current time"
        );
        let event = Event {
            timestamp,
            seq: self.next_seq,
            kind,
        };
        self.next_seq += 1;
        self.events.push(event);
        event
    }

    /// Schedules `kind` `delay` ticks after the current time.
    pub fn schedule_in(&mut self, delay: u64, kind: EventKind) -> Event {
        self.schedule_at(self.now.saturating_add(delay), kind)
    }

    /// Removes the earliest event and advances the clock to it.
    pub fn pop_next(&mut self) -> SimResult<Event> {
        let event = self.events.pop().ok_or(SimError::EmptyQueue)?;
        self.now = event.timestamp;
        Ok(event)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Pending events in execution order, without consuming them.
    pub fn pending(&self) -> Vec<Event> {
        let mut events = self.events.clone().into_sorted_vec();
        // into_sorted_vec is ascending by Ord, which is reversed here.
        events.reverse();
        events
    }
}
