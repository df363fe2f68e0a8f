//! Random command logs for demos and soak runs

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};

use super::command::{apply_command, Command};
use super::state::IntersectionState;
use super::types::{Direction, Road};

/// Shape of a generated command log
#[derive(Debug, Clone, Copy)]
pub struct GeneratorConfig {
    /// Total vehicles to add
    pub vehicles: usize,
    /// Upper bound on vehicles added before each step
    pub max_arrivals_per_step: usize,
    pub allow_u_turns: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            vehicles: 20,
            max_arrivals_per_step: 2,
            allow_u_turns: true,
        }
    }
}

/// Builds command logs from a seedable RNG
pub struct CommandGenerator {
    rng: StdRng,
    config: GeneratorConfig,
}

impl CommandGenerator {
    /// Create a generator; the same seed always yields the same log
    pub fn new(config: GeneratorConfig, seed: Option<u64>) -> Self {
        let seed = seed.unwrap_or_else(|| rand::random());
        Self {
            rng: StdRng::seed_from_u64(seed),
            config,
        }
    }

    fn random_road(&mut self) -> Road {
        *Road::ALL
            .choose(&mut self.rng)
            .unwrap_or(&Road::North)
    }

    fn random_exit(&mut self, start: Road) -> Road {
        if self.config.allow_u_turns {
            return self.random_road();
        }
        let exits: Vec<Road> = Road::ALL
            .into_iter()
            .filter(|end| !Direction::new(start, *end).is_u_turn())
            .collect();
        *exits.choose(&mut self.rng).unwrap_or(&start)
    }

    /// Generate a full log
    ///
    /// Arrivals are interleaved with steps until every vehicle has been added.
    /// Trailing steps follow until the intersection is empty, at most one per
    /// vehicle.
    pub fn generate(&mut self) -> Vec<Command> {
        let mut commands = Vec::new();
        let mut state = IntersectionState::new();
        let mut added = 0;
        let max_arrivals = self.config.max_arrivals_per_step.max(1);

        while added < self.config.vehicles {
            let arrivals = self
                .rng
                .random_range(0..=max_arrivals)
                .min(self.config.vehicles - added);
            for _ in 0..arrivals {
                added += 1;
                let start = self.random_road();
                let end = self.random_exit(start);
                let command = Command::add_vehicle(format!("vehicle{}", added), start, end);
                state = apply_command(&state, &command);
                commands.push(command);
            }
            state = apply_command(&state, &Command::Step);
            commands.push(Command::Step);
        }

        let mut trailing = 0;
        while !state.is_empty() && trailing < self.config.vehicles {
            state = apply_command(&state, &Command::Step);
            commands.push(Command::Step);
            trailing += 1;
        }
        commands
    }
}
