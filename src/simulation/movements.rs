//! Conflict table for a four-way, right-hand-drive intersection
//!
//! Each entry lists movements that may proceed at the same time without
//! crossing paths. The entries are authored, not derived from geometry, and
//! the scheduler depends on their exact contents and order.

use std::sync::LazyLock;

use super::types::{Direction, Road};

use Road::{East, North, South, West};

/// Right turns never cross another movement and are part of every set
pub const RIGHT_TURNS: [Direction; 4] = [
    Direction::new(North, West),
    Direction::new(West, South),
    Direction::new(South, East),
    Direction::new(East, North),
];

const BASE_SETS: [&[Direction]; 8] = [
    &[
        Direction::new(West, North),
        Direction::new(West, West),
        Direction::new(West, East),
    ],
    &[
        Direction::new(West, North),
        Direction::new(West, West),
        Direction::new(East, South),
        Direction::new(East, East),
    ],
    &[Direction::new(West, East), Direction::new(East, West)],
    &[
        Direction::new(South, North),
        Direction::new(South, West),
        Direction::new(South, South),
    ],
    &[Direction::new(South, North), Direction::new(North, South)],
    &[
        Direction::new(South, West),
        Direction::new(South, South),
        Direction::new(North, East),
        Direction::new(North, North),
    ],
    &[
        Direction::new(East, West),
        Direction::new(East, South),
        Direction::new(East, East),
    ],
    &[
        Direction::new(North, South),
        Direction::new(North, East),
        Direction::new(North, North),
    ],
];

static CONFLICT_TABLE: LazyLock<Vec<MovementSet>> = LazyLock::new(|| {
    BASE_SETS
        .iter()
        .map(|base| MovementSet::with_right_turns(base))
        .collect()
});

static NO_MOVEMENTS: MovementSet = MovementSet {
    directions: Vec::new(),
};

/// Movements that may be released together in one step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovementSet {
    directions: Vec<Direction>,
}

impl MovementSet {
    /// A set that releases nothing
    pub fn empty() -> &'static MovementSet {
        &NO_MOVEMENTS
    }

    fn with_right_turns(base: &[Direction]) -> Self {
        let directions = base.iter().chain(RIGHT_TURNS.iter()).copied().collect();
        Self { directions }
    }

    pub fn directions(&self) -> &[Direction] {
        &self.directions
    }

    pub fn contains(&self, direction: &Direction) -> bool {
        self.directions.contains(direction)
    }

    pub fn len(&self) -> usize {
        self.directions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.directions.is_empty()
    }
}

/// The eight movement sets, in scoring order
pub fn conflict_table() -> &'static [MovementSet] {
    &CONFLICT_TABLE
}
