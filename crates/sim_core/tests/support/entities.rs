#![allow(dead_code)]

use std::num::NonZeroU64;

use bevy_ecs::prelude::{Entity, World};
use sim_core::clock::{EventKind, SimulationClock};
use sim_core::ecs::{Driver, DriverState, Rider, RiderStatus};
use sim_core::spatial::Position;

/// Builder for simple rider fixtures.
#[derive(Clone, Debug)]
pub struct RiderBuilder {
    id: String,
    origin: Position,
    destination: Position,
    patience: u64,
    status: RiderStatus,
}

impl Default for RiderBuilder {
    fn default() -> Self {
        Self {
            id: "rider".into(),
            origin: Position::new(0, 3),
            destination: Position::new(0, 10),
            patience: 100,
            status: RiderStatus::Waiting,
        }
    }
}

impl RiderBuilder {
    /// Create a fresh builder.
    pub fn new(id: &str) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn with_origin(mut self, row: i64, col: i64) -> Self {
        self.origin = Position::new(row, col);
        self
    }

    pub fn with_destination(mut self, row: i64, col: i64) -> Self {
        self.destination = Position::new(row, col);
        self
    }

    pub fn with_patience(mut self, patience: u64) -> Self {
        self.patience = patience;
        self
    }

    pub fn with_status(mut self, status: RiderStatus) -> Self {
        self.status = status;
        self
    }

    /// Spawn the rider fixture into the provided world.
    pub fn spawn(self, world: &mut World) -> Entity {
        let mut rider = Rider::new(self.id, self.origin, self.destination, self.patience);
        rider.status = self.status;
        world.spawn(rider).id()
    }

    /// Spawn the rider and schedule its request at `timestamp`.
    pub fn request_at(self, world: &mut World, timestamp: u64) -> Entity {
        let rider = self.spawn(world);
        world
            .resource_mut::<SimulationClock>()
            .schedule_at(timestamp, EventKind::RiderRequest { rider });
        rider
    }
}

/// Builder for simple driver fixtures.
#[derive(Clone, Debug)]
pub struct DriverBuilder {
    id: String,
    position: Position,
    speed: u64,
    state: DriverState,
}

impl Default for DriverBuilder {
    fn default() -> Self {
        Self {
            id: "driver".into(),
            position: Position::new(0, 0),
            speed: 1,
            state: DriverState::Idle,
        }
    }
}

impl DriverBuilder {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn with_position(mut self, row: i64, col: i64) -> Self {
        self.position = Position::new(row, col);
        self
    }

    pub fn with_speed(mut self, speed: u64) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_state(mut self, state: DriverState) -> Self {
        self.state = state;
        self
    }

    /// Spawn the driver fixture into the provided world.
    pub fn spawn(self, world: &mut World) -> Entity {
        let speed = NonZeroU64::new(self.speed).expect("speed must be positive");
        let mut driver = Driver::new(self.id, self.position, speed);
        driver.state = self.state;
        world.spawn(driver).id()
    }

    /// Spawn the driver and schedule its first request at `timestamp`.
    pub fn request_at(self, world: &mut World, timestamp: u64) -> Entity {
        let driver = self.spawn(world);
        world
            .resource_mut::<SimulationClock>()
            .schedule_at(timestamp, EventKind::DriverRequest { driver });
        driver
    }
}

pub fn rider(world: &World, entity: Entity) -> &Rider {
    world.get::<Rider>(entity).expect("rider entity")
}

pub fn driver(world: &World, entity: Entity) -> &Driver {
    world.get::<Driver>(entity).expect("driver entity")
}
