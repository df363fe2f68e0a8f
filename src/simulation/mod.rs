//! Right-of-way scheduling for a single four-way intersection
//!
//! The command processor and step scheduler are pure: every transition
//! returns a new [`IntersectionState`]. Only the driver touches files.

mod command;
mod driver;
mod generator;
mod movements;
mod scheduler;
mod state;
mod types;

pub use command::{apply_command, process_command, Command, CommandLog, Transition};
pub use driver::{
    duplicate_vehicle_ids, parse_commands, read_commands, simulate, validate_commands,
    write_commands, write_output, Simulation, SimulationOptions, SimulationOutput,
    SimulationStats, StepStatus,
};
pub use generator::{CommandGenerator, GeneratorConfig};
pub use movements::{conflict_table, MovementSet, RIGHT_TURNS};
pub use scheduler::{
    compute_best_movement_set, process_step, road_waiting_times, score_movement_sets,
    select_best_movement_set, ScoredMovementSet, StepReport,
};
pub use state::IntersectionState;
pub use types::{Direction, ParseRoadError, PerRoad, Road, Vehicle};
