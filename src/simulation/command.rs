//! Input commands and the command processor

use serde::{Deserialize, Serialize};

use super::scheduler::{process_step, StepReport};
use super::state::IntersectionState;
use super::types::{Direction, Road, Vehicle};

/// A single entry of the command log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Command {
    #[serde(rename_all = "camelCase")]
    AddVehicle {
        vehicle_id: String,
        start_road: Road,
        end_road: Road,
    },
    Step,
    /// Any command type this processor does not know about
    #[serde(other)]
    Unknown,
}

impl Command {
    pub fn add_vehicle(vehicle_id: impl Into<String>, start_road: Road, end_road: Road) -> Self {
        Command::AddVehicle {
            vehicle_id: vehicle_id.into(),
            start_road,
            end_road,
        }
    }
}

/// The `{"commands": [...]}` document read by the driver
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandLog {
    pub commands: Vec<Command>,
}

/// Outcome of applying one command
#[derive(Debug, Clone)]
pub enum Transition {
    /// A vehicle joined the back of its road's queue
    Added(IntersectionState),
    Stepped(StepReport),
    /// The command was not recognised and the state is unchanged
    Ignored(IntersectionState),
}

impl Transition {
    pub fn state(&self) -> &IntersectionState {
        match self {
            Transition::Added(state) | Transition::Ignored(state) => state,
            Transition::Stepped(report) => &report.state,
        }
    }

    pub fn into_state(self) -> IntersectionState {
        match self {
            Transition::Added(state) | Transition::Ignored(state) => state,
            Transition::Stepped(report) => report.state,
        }
    }
}

/// Apply `command` to `state`, leaving `state` untouched
pub fn process_command(state: &IntersectionState, command: &Command) -> Transition {
    match command {
        Command::AddVehicle {
            vehicle_id,
            start_road,
            end_road,
        } => {
            let mut next = state.clone();
            next.push_vehicle(Vehicle::new(
                vehicle_id.as_str(),
                Direction::new(*start_road, *end_road),
                state.current_step,
            ));
            Transition::Added(next)
        }
        Command::Step => Transition::Stepped(process_step(state)),
        Command::Unknown => Transition::Ignored(state.clone()),
    }
}

/// Apply `command` and return only the resulting state
pub fn apply_command(state: &IntersectionState, command: &Command) -> IntersectionState {
    process_command(state, command).into_state()
}
