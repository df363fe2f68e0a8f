//! Step scheduler
//!
//! Each step picks the conflict-free movement set that serves the most
//! accumulated waiting time, then lets at most one vehicle leave per road.

use log::debug;

use super::movements::{conflict_table, MovementSet};
use super::state::IntersectionState;
use super::types::{PerRoad, Vehicle};

/// A movement set from the conflict table together with its score
#[derive(Debug, Clone, Copy)]
pub struct ScoredMovementSet {
    /// Position of the set in the conflict table
    pub index: usize,
    pub set: &'static MovementSet,
    pub score: u64,
}

/// Result of running one step
#[derive(Debug, Clone)]
pub struct StepReport {
    /// State after the step, with the step counter already advanced
    pub state: IntersectionState,
    /// Vehicles that left the intersection, in release order
    pub departed: Vec<Vehicle>,
    /// The movement set that was given right of way
    pub green: &'static MovementSet,
}

impl StepReport {
    pub fn departed_ids(&self) -> Vec<String> {
        self.departed.iter().map(|v| v.id.clone()).collect()
    }
}

/// Summed waiting time of every vehicle queued on each road
pub fn road_waiting_times(state: &IntersectionState) -> PerRoad<u64> {
    PerRoad::from_fn(|road| {
        state
            .queue(road)
            .map(|v| v.waiting_time(state.current_step))
            .sum()
    })
}

/// Score of every conflict table entry, in table order
///
/// A direction scores its road's waiting time only when it is the movement
/// of the vehicle at the front of that road.
pub fn score_movement_sets(state: &IntersectionState) -> Vec<ScoredMovementSet> {
    let waiting_times = road_waiting_times(state);
    let heads = state.head_movements();

    conflict_table()
        .iter()
        .enumerate()
        .map(|(index, set)| {
            let score = set
                .directions()
                .iter()
                .filter(|direction| heads[direction.start] == Some(**direction))
                .map(|direction| waiting_times[direction.start])
                .sum();
            ScoredMovementSet { index, set, score }
        })
        .collect()
}

/// The highest scoring movement set; ties go to the earlier table entry
pub fn select_best_movement_set(state: &IntersectionState) -> Option<ScoredMovementSet> {
    let mut best: Option<ScoredMovementSet> = None;
    for candidate in score_movement_sets(state) {
        // Strictly greater: an equal score never displaces an earlier set.
        if best.map_or(true, |b| candidate.score > b.score) {
            best = Some(candidate);
        }
    }
    best
}

/// The movement set given right of way for `state`
///
/// Exposed so renderers can show which movements are green. With nothing
/// queued every set scores zero and the first table entry is returned.
pub fn compute_best_movement_set(state: &IntersectionState) -> &'static MovementSet {
    match select_best_movement_set(state) {
        Some(best) => best.set,
        None => MovementSet::empty(),
    }
}

/// Advance the step counter and release vehicles
///
/// Vehicles are scanned in queue order. A vehicle leaves when its movement is
/// in the selected set and nothing has left its road yet during this step.
pub fn process_step(state: &IntersectionState) -> StepReport {
    let mut next = state.clone();
    next.current_step += 1;

    let selected = select_best_movement_set(&next);
    let green = selected.map_or(MovementSet::empty(), |s| s.set);

    let mut released = PerRoad::<bool>::default();
    let mut departed = Vec::new();
    for vehicle in &state.vehicles {
        let road = vehicle.direction.start;
        if released[road] || !green.contains(&vehicle.direction) {
            continue;
        }
        if let Some(removed) = next.remove_vehicle(&vehicle.id) {
            departed.push(removed);
        }
        released[road] = true;
    }

    if let Some(selected) = selected {
        debug!(
            "Step {}: movement set {} (score {}) released {} vehicle(s)",
            next.current_step,
            selected.index,
            selected.score,
            departed.len()
        );
    }

    StepReport {
        state: next,
        departed,
        green,
    }
}
