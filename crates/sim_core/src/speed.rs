//! Travel-time model: grid distance divided by driver speed, rounded to whole ticks.

use std::fmt;
use std::num::NonZeroU64;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::spatial::{manhattan_distance, Position};

/// How `distance / speed` is rounded when the quotient lands exactly on a half.
///
/// Non-half quotients always round to the nearest integer. One policy applies
/// to a whole run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RoundingPolicy {
    /// Ties go to the even neighbour: 2.5 -> 2, 3.5 -> 4.
    #[default]
    HalfEven,
    /// Ties go up: 2.5 -> 3.
    HalfUp,
}

impl RoundingPolicy {
    /// Rounds `numerator / denominator` using integer arithmetic only.
    pub fn divide(self, numerator: u64, denominator: NonZeroU64) -> u64 {
        let denominator = denominator.get();
        let quotient = numerator / denominator;
        let remainder = numerator % denominator;
        // Compare remainder with what is left to the next multiple; 2 * remainder may overflow.
        let gap = denominator - remainder;
        match remainder.cmp(&gap) {
            std::cmp::Ordering::Less => quotient,
            std::cmp::Ordering::Greater => quotient + 1,
            std::cmp::Ordering::Equal => match self {
                RoundingPolicy::HalfEven => quotient + (quotient & 1),
                RoundingPolicy::HalfUp => quotient + 1,
            },
        }
    }
}

impl fmt::Display for RoundingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoundingPolicy::HalfEven => f.write_str("half-even"),
            RoundingPolicy::HalfUp => f.write_str("half-up"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown rounding policy '{0}', expected 'half-even' or 'half-up'")]
pub struct UnknownRoundingPolicy(pub String);

impl FromStr for RoundingPolicy {
    type Err = UnknownRoundingPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "half-even" => Ok(RoundingPolicy::HalfEven),
            "half-up" => Ok(RoundingPolicy::HalfUp),
            other => Err(UnknownRoundingPolicy(other.to_string())),
        }
    }
}

/// Ticks needed to cover the grid distance between `from` and `to` at `speed`.
pub fn travel_time(from: Position, to: Position, speed: NonZeroU64, rounding: RoundingPolicy) -> u64 {
    rounding.divide(manhattan_distance(from, to), speed)
}
