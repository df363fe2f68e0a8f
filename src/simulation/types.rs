//! Core types for the intersection simulation
//!
//! Roads, movements and the vehicles queued on them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Index, IndexMut};
use std::str::FromStr;

/// One of the four approaches to the intersection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Road {
    North,
    East,
    South,
    West,
}

impl Road {
    /// All roads, in the order used by [`PerRoad`]
    pub const ALL: [Road; 4] = [Road::North, Road::East, Road::South, Road::West];

    fn index(self) -> usize {
        match self {
            Road::North => 0,
            Road::East => 1,
            Road::South => 2,
            Road::West => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Road::North => "north",
            Road::East => "east",
            Road::South => "south",
            Road::West => "west",
        }
    }
}

impl fmt::Display for Road {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when text does not name one of the four roads
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseRoadError(pub String);

impl fmt::Display for ParseRoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid road '{}', expected one of north, east, south, west",
            self.0
        )
    }
}

impl std::error::Error for ParseRoadError {}

impl FromStr for Road {
    type Err = ParseRoadError;

    /// Road names are matched exactly and case-sensitively
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Road::ALL
            .into_iter()
            .find(|road| road.as_str() == s)
            .ok_or_else(|| ParseRoadError(s.to_string()))
    }
}

/// A movement through the intersection: entry road and exit road
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Direction {
    pub start: Road,
    pub end: Road,
}

impl Direction {
    pub const fn new(start: Road, end: Road) -> Self {
        Self { start, end }
    }

    pub fn is_u_turn(&self) -> bool {
        self.start == self.end
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{}", self.start, self.end)
    }
}

/// A vehicle waiting at the intersection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vehicle {
    pub id: String,
    pub direction: Direction,
    /// Step counter value when the vehicle was added
    pub arrived_at_step: u32,
}

impl Vehicle {
    pub fn new(id: impl Into<String>, direction: Direction, arrived_at_step: u32) -> Self {
        Self {
            id: id.into(),
            direction,
            arrived_at_step,
        }
    }

    /// Steps spent at the intersection as of `current_step`
    pub fn waiting_time(&self, current_step: u32) -> u64 {
        u64::from(current_step.saturating_sub(self.arrived_at_step))
    }
}

/// A value for each of the four roads
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerRoad<T>([T; 4]);

impl<T> PerRoad<T> {
    pub fn from_fn(mut f: impl FnMut(Road) -> T) -> Self {
        Self(Road::ALL.map(&mut f))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Road, &T)> {
        Road::ALL.into_iter().zip(self.0.iter())
    }
}

impl<T> Index<Road> for PerRoad<T> {
    type Output = T;

    fn index(&self, road: Road) -> &T {
        &self.0[road.index()]
    }
}

impl<T> IndexMut<Road> for PerRoad<T> {
    fn index_mut(&mut self, road: Road) -> &mut T {
        &mut self.0[road.index()]
    }
}
