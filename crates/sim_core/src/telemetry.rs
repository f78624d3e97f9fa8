//! Telemetry / KPIs: the activity log written by event handlers and the
//! summary report derived from it at the end of a run.

use std::collections::BTreeMap;
use std::fmt;

use bevy_ecs::prelude::Resource;
use serde::{Deserialize, Serialize};

use crate::spatial::{manhattan_distance, Position};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ActorKind {
    Rider,
    Driver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Request,
    Cancel,
    Pickup,
    Dropoff,
}

/// One domain occurrence, as reported by an event handler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub timestamp: u64,
    pub actor: ActorKind,
    pub action: Action,
    pub id: String,
    pub position: Position,
}

/// Collects activities in the order they happen. Insert as a resource.
#[derive(Debug, Default, Resource)]
pub struct Monitor {
    activities: Vec<Activity>,
}

impl Monitor {
    pub fn notify(
        &mut self,
        timestamp: u64,
        actor: ActorKind,
        action: Action,
        id: &str,
        position: Position,
    ) {
        self.activities.push(Activity {
            timestamp,
            actor,
            action,
            id: id.to_string(),
            position,
        });
    }

    pub fn activities(&self) -> &[Activity] {
        &self.activities
    }

    /// Summarizes everything recorded so far.
    pub fn report(&self) -> SimReport {
        let mut riders: BTreeMap<&str, RiderLog> = BTreeMap::new();
        let mut drivers: BTreeMap<&str, DriverLog> = BTreeMap::new();

        for activity in &self.activities {
            match activity.actor {
                ActorKind::Rider => riders
                    .entry(activity.id.as_str())
                    .or_default()
                    .record(activity),
                ActorKind::Driver => drivers
                    .entry(activity.id.as_str())
                    .or_default()
                    .record(activity),
            }
        }

        let waits: Vec<u64> = riders.values().filter_map(RiderLog::wait_time).collect();
        let riders_total = riders.values().filter(|r| r.requested_at.is_some()).count();
        let riders_served = waits.len();
        let riders_cancelled = riders.values().filter(|r| r.cancelled).count();

        SimReport {
            rider_wait_time: mean(waits.iter().map(|&w| w as f64), riders_served),
            driver_total_distance: mean(drivers.values().map(|d| d.total_distance as f64), drivers.len()),
            driver_ride_distance: mean(drivers.values().map(|d| d.ride_distance as f64), drivers.len()),
            riders_total,
            riders_served,
            riders_cancelled,
            percent_served: if riders_total == 0 {
                0.0
            } else {
                100.0 * riders_served as f64 / riders_total as f64
            },
            drivers_total: drivers.len(),
        }
    }
}

fn mean(values: impl Iterator<Item = f64>, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        values.sum::<f64>() / count as f64
    }
}

#[derive(Debug, Default)]
struct RiderLog {
    requested_at: Option<u64>,
    picked_up_at: Option<u64>,
    cancelled: bool,
}

impl RiderLog {
    fn record(&mut self, activity: &Activity) {
        match activity.action {
            Action::Request => self.requested_at = Some(activity.timestamp),
            Action::Pickup => self.picked_up_at = Some(activity.timestamp),
            Action::Cancel => self.cancelled = true,
            Action::Dropoff => {}
        }
    }

    fn wait_time(&self) -> Option<u64> {
        let requested = self.requested_at?;
        let picked_up = self.picked_up_at?;
        Some(picked_up.saturating_sub(requested))
    }
}

#[derive(Debug, Default)]
struct DriverLog {
    last_position: Option<Position>,
    pickup_position: Option<Position>,
    total_distance: u64,
    ride_distance: u64,
}

impl DriverLog {
    fn record(&mut self, activity: &Activity) {
        if let Some(last) = self.last_position {
            self.total_distance += manhattan_distance(last, activity.position);
        }
        self.last_position = Some(activity.position);
        match activity.action {
            Action::Pickup => self.pickup_position = Some(activity.position),
            Action::Dropoff => {
                if let Some(pickup) = self.pickup_position.take() {
                    self.ride_distance += manhattan_distance(pickup, activity.position);
                }
            }
            Action::Request | Action::Cancel => {}
        }
    }
}

/// End-of-run statistics. Averages over an empty population are zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimReport {
    /// Mean ticks from request to pickup, over riders that were picked up.
    pub rider_wait_time: f64,
    /// Mean grid distance travelled per driver.
    pub driver_total_distance: f64,
    /// Mean grid distance travelled with a rider on board, per driver.
    pub driver_ride_distance: f64,
    pub riders_total: usize,
    pub riders_served: usize,
    pub riders_cancelled: usize,
    pub percent_served: f64,
    pub drivers_total: usize,
}

impl SimReport {
    /// The report as a flat name → value mapping.
    pub fn to_map(&self) -> BTreeMap<&'static str, f64> {
        BTreeMap::from([
            ("rider_wait_time", self.rider_wait_time),
            ("driver_total_distance", self.driver_total_distance),
            ("driver_ride_distance", self.driver_ride_distance),
            ("riders_total", self.riders_total as f64),
            ("riders_served", self.riders_served as f64),
            ("riders_cancelled", self.riders_cancelled as f64),
            ("percent_served", self.percent_served),
            ("drivers_total", self.drivers_total as f64),
        ])
    }
}

impl fmt::Display for SimReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, value) in self.to_map() {
            writeln!(f, "{name:<22} {value:.2}")?;
        }
        Ok(())
    }
}
