//! Spatial operations: integer grid positions and the Manhattan metric.
//!
//! The grid is unbounded in both directions; rows and columns may be negative.
//! There is no routing: the travel distance between two positions is always
//! the Manhattan distance, regardless of what lies between them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PositionParseError;

/// A cell on the grid, addressed by row and column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: i64,
    pub col: i64,
}

impl Position {
    pub const fn new(row: i64, col: i64) -> Self {
        Self { row, col }
    }

    /// Manhattan distance to `other`.
    pub fn distance_to(self, other: Position) -> u64 {
        manhattan_distance(self, other)
    }
}

/// Sum of absolute row and column differences.
pub fn manhattan_distance(a: Position, b: Position) -> u64 {
    a.row.abs_diff(b.row).saturating_add(a.col.abs_diff(b.col))
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

/// Parses the scenario-file form `row,col` (no parentheses, no spaces).
impl FromStr for Position {
    type Err = PositionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || PositionParseError(s.to_string());
        let (row, col) = s.split_once(',').ok_or_else(invalid)?;
        let row = row.parse::<i64>().map_err(|_| invalid())?;
        let col = col.parse::<i64>().map_err(|_| invalid())?;
        Ok(Self { row, col })
    }
}

impl From<(i64, i64)> for Position {
    fn from((row, col): (i64, i64)) -> Self {
        Self { row, col }
    }
}
