//! State of a single intersection

use super::types::{Direction, PerRoad, Road, Vehicle};

/// Step counter and the ordered queue of vehicles present at the intersection
///
/// Sequence order is queue order: among vehicles sharing a start road, the
/// earlier entry is ahead, regardless of `arrived_at_step`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntersectionState {
    pub current_step: u32,
    pub vehicles: Vec<Vehicle>,
}

impl IntersectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a vehicle behind everything already present
    pub fn push_vehicle(&mut self, vehicle: Vehicle) {
        self.vehicles.push(vehicle);
    }

    /// Remove the first vehicle in sequence order carrying `id`
    pub fn remove_vehicle(&mut self, id: &str) -> Option<Vehicle> {
        let position = self.vehicles.iter().position(|v| v.id == id)?;
        Some(self.vehicles.remove(position))
    }

    /// Vehicles entering from `road`, front of the queue first
    pub fn queue(&self, road: Road) -> impl Iterator<Item = &Vehicle> {
        self.vehicles
            .iter()
            .filter(move |v| v.direction.start == road)
    }

    /// Movement of the first queued vehicle on each road, if any
    pub fn head_movements(&self) -> PerRoad<Option<Direction>> {
        PerRoad::from_fn(|road| self.queue(road).next().map(|v| v.direction))
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }
}
