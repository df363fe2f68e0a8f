//! Simulation driver
//!
//! Folds a command log through the command processor, records which vehicles
//! left on every step and handles the JSON files on either side.

use anyhow::{bail, Context, Result};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use super::command::{process_command, Command, CommandLog, Transition};
use super::scheduler::StepReport;
use super::state::IntersectionState;
use super::types::Direction;

/// Outcome of one `step` command as written to the output file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepStatus {
    pub left_vehicles: Vec<String>,
    /// Movements that had right of way, when requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub green_directions: Option<Vec<Direction>>,
}

/// The `{"stepStatuses": [...]}` document written by the driver
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationOutput {
    pub step_statuses: Vec<StepStatus>,
}

/// Options controlling a simulation run
#[derive(Debug, Clone, Copy, Default)]
pub struct SimulationOptions {
    /// Include the selected movement set in every step status
    pub record_green_directions: bool,
    /// Refuse logs that add two vehicles with the same id
    pub reject_duplicate_ids: bool,
}

/// Counters gathered over a run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimulationStats {
    pub commands_processed: usize,
    pub commands_ignored: usize,
    pub vehicles_added: usize,
    pub vehicles_departed: usize,
    pub steps: usize,
    /// Longest wait of any departed vehicle, in steps
    pub longest_wait: u64,
    total_wait: u64,
}

impl SimulationStats {
    /// Mean steps between arrival and departure over departed vehicles
    pub fn mean_wait(&self) -> f64 {
        if self.vehicles_departed == 0 {
            0.0
        } else {
            self.total_wait as f64 / self.vehicles_departed as f64
        }
    }

    pub fn vehicles_waiting(&self) -> usize {
        self.vehicles_added - self.vehicles_departed
    }

    fn record_step(&mut self, report: &StepReport) {
        self.steps += 1;
        for vehicle in &report.departed {
            let wait = vehicle.waiting_time(report.state.current_step);
            self.vehicles_departed += 1;
            self.total_wait += wait;
            self.longest_wait = self.longest_wait.max(wait);
        }
    }

    pub fn log_summary(&self) {
        info!("=== SIMULATION COMPLETE ===");
        info!("Commands processed: {}", self.commands_processed);
        info!("Unknown commands ignored: {}", self.commands_ignored);
        info!("Steps: {}", self.steps);
        info!("Vehicles added: {}", self.vehicles_added);
        info!("Vehicles departed: {}", self.vehicles_departed);
        info!("Vehicles still waiting: {}", self.vehicles_waiting());
        info!("Longest wait: {} steps", self.longest_wait);
        info!("Mean wait: {:.2} steps", self.mean_wait());
    }
}

/// A running simulation over one intersection
#[derive(Debug, Clone, Default)]
pub struct Simulation {
    state: IntersectionState,
    output: SimulationOutput,
    stats: SimulationStats,
    options: SimulationOptions,
}

impl Simulation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: SimulationOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn state(&self) -> &IntersectionState {
        &self.state
    }

    pub fn output(&self) -> &SimulationOutput {
        &self.output
    }

    pub fn stats(&self) -> &SimulationStats {
        &self.stats
    }

    /// Apply a single command, recording a step status for `step` commands
    pub fn apply(&mut self, command: &Command) {
        self.stats.commands_processed += 1;
        let transition = process_command(&self.state, command);

        match &transition {
            Transition::Added(_) => self.stats.vehicles_added += 1,
            Transition::Stepped(report) => {
                self.stats.record_step(report);
                self.output.step_statuses.push(StepStatus {
                    left_vehicles: report.departed_ids(),
                    green_directions: self
                        .options
                        .record_green_directions
                        .then(|| report.green.directions().to_vec()),
                });
            }
            Transition::Ignored(_) => {
                self.stats.commands_ignored += 1;
                warn!(
                    "Ignoring unknown command at position {}",
                    self.stats.commands_processed - 1
                );
            }
        }

        self.state = transition.into_state();
    }

    /// Apply every command in order
    pub fn run<'a>(&mut self, commands: impl IntoIterator<Item = &'a Command>) {
        for command in commands {
            self.apply(command);
        }
    }

    pub fn into_output(self) -> SimulationOutput {
        self.output
    }
}

/// Ids that are added more than once in `commands`, in order of first repeat
pub fn duplicate_vehicle_ids(commands: &[Command]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut duplicates = Vec::new();
    for command in commands {
        if let Command::AddVehicle { vehicle_id, .. } = command {
            if !seen.insert(vehicle_id.as_str()) && !duplicates.contains(vehicle_id) {
                duplicates.push(vehicle_id.clone());
            }
        }
    }
    duplicates
}

/// Check a command log before running it
///
/// Duplicate ids are only logged unless `reject_duplicate_ids` is set, since
/// departures are matched by id and a repeated id may release the wrong vehicle.
pub fn validate_commands(commands: &[Command], options: &SimulationOptions) -> Result<()> {
    let duplicates = duplicate_vehicle_ids(commands);
    if duplicates.is_empty() {
        return Ok(());
    }
    if options.reject_duplicate_ids {
        bail!("Duplicate vehicle ids in command log: {}", duplicates.join(", "));
    }
    warn!(
        "Command log reuses vehicle ids, departures may be misattributed: {}",
        duplicates.join(", ")
    );
    Ok(())
}

pub fn parse_commands(json: &str) -> Result<Vec<Command>> {
    let log: CommandLog = serde_json::from_str(json).context("Invalid command log")?;
    Ok(log.commands)
}

pub fn read_commands(path: &Path) -> Result<Vec<Command>> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read command log {}", path.display()))?;
    parse_commands(&json).with_context(|| format!("Failed to parse {}", path.display()))
}

pub fn write_output(path: &Path, output: &SimulationOutput) -> Result<()> {
    let json = serde_json::to_string_pretty(output).context("Failed to serialize output")?;
    fs::write(path, json).with_context(|| format!("Failed to write output {}", path.display()))
}

pub fn write_commands(path: &Path, commands: &[Command]) -> Result<()> {
    let log = CommandLog {
        commands: commands.to_vec(),
    };
    let json = serde_json::to_string_pretty(&log).context("Failed to serialize command log")?;
    fs::write(path, json)
        .with_context(|| format!("Failed to write command log {}", path.display()))
}

/// Run the command log at `input_path` and write step statuses to `output_path`
pub fn simulate(
    input_path: &Path,
    output_path: &Path,
    options: SimulationOptions,
) -> Result<SimulationStats> {
    let commands = read_commands(input_path)?;
    info!(
        "Loaded {} commands from {}",
        commands.len(),
        input_path.display()
    );
    validate_commands(&commands, &options)?;

    let mut simulation = Simulation::with_options(options);
    simulation.run(&commands);

    let stats = simulation.stats().clone();
    write_output(output_path, simulation.output())?;
    info!(
        "Wrote {} step statuses to {}",
        simulation.output().step_statuses.len(),
        output_path.display()
    );
    stats.log_summary();
    Ok(stats)
}
