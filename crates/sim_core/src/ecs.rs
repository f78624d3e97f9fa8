//! Entity components: drivers and riders.
//!
//! Both live in the ECS [World](bevy_ecs::prelude::World) for the whole run and
//! are addressed by [Entity](bevy_ecs::prelude::Entity) from events and the
//! dispatcher, so every handler sees the latest state of each record.

use std::fmt;
use std::num::NonZeroU64;

use bevy_ecs::prelude::Component;
use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};
use crate::spatial::Position;
use crate::speed::{travel_time, RoundingPolicy};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiderStatus {
    Waiting,
    Cancelled,
    Satisfied,
}

impl RiderStatus {
    /// Cancelled and Satisfied admit no further transitions.
    pub fn is_terminal(self) -> bool {
        !matches!(self, RiderStatus::Waiting)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Component)]
pub struct Rider {
    pub id: String,
    pub origin: Position,
    pub destination: Position,
    /// Ticks the rider waits after requesting before cancelling.
    pub patience: u64,
    pub status: RiderStatus,
}

impl Rider {
    pub fn new(id: impl Into<String>, origin: Position, destination: Position, patience: u64) -> Self {
        Self {
            id: id.into(),
            origin,
            destination,
            patience,
            status: RiderStatus::Waiting,
        }
    }
}

impl fmt::Display for Rider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Rider {} origin={} destination={} patience={} status={:?}",
            self.id, self.origin, self.destination, self.patience, self.status
        )
    }
}

/// What a driver is doing. The destination lives inside the busy states, so a
/// driver has a destination exactly when it is not idle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DriverState {
    Idle,
    /// Driving empty towards a rider's origin.
    EnRoute { destination: Position },
    /// Carrying a rider to their destination.
    OnTrip { destination: Position },
}

#[derive(Debug, Clone, PartialEq, Eq, Component)]
pub struct Driver {
    pub id: String,
    pub position: Position,
    /// Grid units covered per tick.
    pub speed: NonZeroU64,
    pub state: DriverState,
}

impl Driver {
    pub fn new(id: impl Into<String>, position: Position, speed: NonZeroU64) -> Self {
        Self {
            id: id.into(),
            position,
            speed,
            state: DriverState::Idle,
        }
    }

    pub fn is_idle(&self) -> bool {
        self.state == DriverState::Idle
    }

    pub fn destination(&self) -> Option<Position> {
        match self.state {
            DriverState::Idle => None,
            DriverState::EnRoute { destination } | DriverState::OnTrip { destination } => {
                Some(destination)
            }
        }
    }

    /// Ticks from the current position to `target`.
    pub fn travel_time(&self, target: Position, rounding: RoundingPolicy) -> u64 {
        travel_time(self.position, target, self.speed, rounding)
    }

    /// Heads towards `target` (normally a rider's origin) and returns the travel time.
    pub fn start_drive(&mut self, target: Position, rounding: RoundingPolicy) -> SimResult<u64> {
        self.require_idle("start a drive")?;
        let time = self.travel_time(target, rounding);
        self.state = DriverState::EnRoute { destination: target };
        Ok(time)
    }

    /// Arrives at the drive target and goes idle.
    pub fn end_drive(&mut self) -> SimResult<()> {
        let DriverState::EnRoute { destination } = self.state else {
            return Err(self.violation("end a drive"));
        };
        self.arrive(destination);
        Ok(())
    }

    /// Starts carrying `rider` to their destination and returns the ride time.
    pub fn start_ride(&mut self, rider: &Rider, rounding: RoundingPolicy) -> SimResult<u64> {
        self.require_idle("start a ride")?;
        let time = self.travel_time(rider.destination, rounding);
        self.state = DriverState::OnTrip {
            destination: rider.destination,
        };
        Ok(time)
    }

    /// Arrives at the rider's destination and goes idle.
    pub fn end_ride(&mut self) -> SimResult<()> {
        let DriverState::OnTrip { destination } = self.state else {
            return Err(self.violation("end a ride"));
        };
        self.arrive(destination);
        Ok(())
    }

    fn arrive(&mut self, destination: Position) {
        self.position = destination;
        self.state = DriverState::Idle;
    }

    fn require_idle(&self, action: &str) -> SimResult<()> {
        if self.is_idle() {
            Ok(())
        } else {
            Err(self.violation(action))
        }
    }

    fn violation(&self, action: &str) -> SimError {
        SimError::invariant(
            format!("driver '{}'", self.id),
            format!("cannot {action} while {:?}", self.state),
        )
    }
}

impl fmt::Display for Driver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Driver {} at {} speed={}", self.id, self.position, self.speed)?;
        match self.destination() {
            Some(destination) => write!(f, " heading to {destination}"),
            None => f.write_str(" idle"),
        }
    }
}
