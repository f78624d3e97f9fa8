//! Dispatcher: pairs riders with drivers.
//!
//! The two request paths are asymmetric:
//!
//! - **Rider asks for a driver**: the idle registered driver with the shortest
//!   travel time to the rider's origin wins. Ties go to the driver registered
//!   first.
//! - **Driver asks for a rider**: the longest-waiting rider wins (FIFO).
//!
//! The dispatcher only stores entity ids. Driver state needed for the nearest
//! driver search is supplied by the caller.

use std::collections::VecDeque;

use bevy_ecs::prelude::{Entity, Resource};
use tracing::trace;

#[derive(Debug, Default, Resource)]
pub struct Dispatcher {
    /// Riders without a driver, oldest first.
    waiting_list: VecDeque<Entity>,
    /// Drivers in registration order. Registration is permanent.
    registry: Vec<Entity>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Finds the closest idle driver for `rider`, or waitlists the rider.
    ///
    /// `idle_travel_time` returns the travel time from a driver to the rider's
    /// origin, or `None` when that driver is busy. The chosen driver's state is
    /// left untouched; the caller starts the drive.
    pub fn request_driver<F>(&mut self, rider: Entity, mut idle_travel_time: F) -> Option<Entity>
    where
        F: FnMut(Entity) -> Option<u64>,
    {
        let mut best: Option<(Entity, u64)> = None;
        for &driver in &self.registry {
            let Some(time) = idle_travel_time(driver) else {
                continue;
            };
            // Strict comparison keeps the earliest registered driver on ties.
            if best.map_or(true, |(_, best_time)| time < best_time) {
                best = Some((driver, time));
            }
        }

        match best {
            Some((driver, time)) => {
                trace!(?rider, ?driver, travel_time = time, "matched rider to nearest idle driver");
                Some(driver)
            }
            None => {
                if !self.waiting_list.contains(&rider) {
                    self.waiting_list.push_back(rider);
                }
                trace!(?rider, waiting = self.waiting_list.len(), "no idle driver, rider waitlisted");
                None
            }
        }
    }

    /// Registers `driver` if new, then hands it the longest-waiting rider.
    pub fn request_rider(&mut self, driver: Entity) -> Option<Entity> {
        if !self.registry.contains(&driver) {
            self.registry.push(driver);
            trace!(?driver, registered = self.registry.len(), "driver registered");
        }
        let rider = self.waiting_list.pop_front();
        if let Some(rider) = rider {
            trace!(?driver, ?rider, "assigned waiting rider to driver");
        }
        rider
    }

    /// Drops `rider` from the waiting list. A no-op if it is not there.
    pub fn cancel_ride(&mut self, rider: Entity) {
        if let Some(index) = self.waiting_list.iter().position(|&r| r == rider) {
            self.waiting_list.remove(index);
        }
    }

    pub fn waiting_list(&self) -> impl Iterator<Item = Entity> + '_ {
        self.waiting_list.iter().copied()
    }

    pub fn registry(&self) -> &[Entity] {
        &self.registry
    }

    pub fn is_waiting(&self, rider: Entity) -> bool {
        self.waiting_list.contains(&rider)
    }

    pub fn is_registered(&self, driver: Entity) -> bool {
        self.registry.contains(&driver)
    }
}
