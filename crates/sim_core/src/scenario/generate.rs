use std::num::NonZeroU64;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::scenario::params::ScenarioParams;
use crate::scenario::parse::ScenarioEvent;
use crate::spatial::Position;

/// Maximum draws when looking for a destination distinct from the origin.
const MAX_DESTINATION_ATTEMPTS: usize = 32;

/// Draws a random scenario. The same seed always yields the same events.
///
/// Events are returned sorted by timestamp; ties keep generation order
/// (drivers before riders).
pub fn generate_scenario(params: &ScenarioParams) -> Vec<ScenarioEvent> {
    let mut rng = match params.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let rows = params.grid_rows.max(1);
    let cols = params.grid_cols.max(1);
    let min_speed = params.min_speed.max(1);
    let max_speed = params.max_speed.max(min_speed);
    let max_patience = params.max_patience.max(params.min_patience);

    let mut events = Vec::with_capacity(params.num_drivers + params.num_riders);

    for i in 0..params.num_drivers {
        let speed = rng.gen_range(min_speed..=max_speed);
        events.push(ScenarioEvent::DriverRequest {
            timestamp: rng.gen_range(0..=params.driver_spread),
            id: format!("driver-{i}"),
            position: random_position(&mut rng, rows, cols),
            // min_speed is at least one.
            speed: NonZeroU64::new(speed).unwrap_or(NonZeroU64::MIN),
        });
    }

    for i in 0..params.num_riders {
        let origin = random_position(&mut rng, rows, cols);
        let destination = random_destination(&mut rng, origin, rows, cols);
        events.push(ScenarioEvent::RiderRequest {
            timestamp: rng.gen_range(0..=params.request_window),
            id: format!("rider-{i}"),
            origin,
            destination,
            patience: rng.gen_range(params.min_patience..=max_patience),
        });
    }

    events.sort_by_key(ScenarioEvent::timestamp);
    events
}

fn random_position<R: Rng>(rng: &mut R, rows: i64, cols: i64) -> Position {
    Position::new(rng.gen_range(0..rows), rng.gen_range(0..cols))
}

/// A destination different from `origin` when the grid allows it.
fn random_destination<R: Rng>(rng: &mut R, origin: Position, rows: i64, cols: i64) -> Position {
    for _ in 0..MAX_DESTINATION_ATTEMPTS {
        let candidate = random_position(rng, rows, cols);
        if candidate != origin {
            return candidate;
        }
    }
    origin
}
