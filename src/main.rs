use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use log::info;

use intersection_scheduler::simulation::{
    self, CommandGenerator, GeneratorConfig, SimulationOptions,
};

#[derive(Parser)]
#[command(name = "intersection_scheduler")]
#[command(about = "Right-of-way scheduling for a four-way intersection")]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Used when no subcommand is given
    #[command(flatten)]
    simulate: SimulateArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a command log and write the vehicles that left on each step
    Simulate(SimulateArgs),

    /// Write a random command log
    Generate(GenerateArgs),
}

#[derive(Args)]
struct SimulateArgs {
    /// JSON file with a `commands` array
    #[arg(long, alias = "inputFile", default_value = "input.json")]
    input_file: PathBuf,

    /// Where to write the `stepStatuses` JSON
    #[arg(long, alias = "outputFile", default_value = "output.json")]
    output_file: PathBuf,

    /// Include the movements that had right of way in every step status
    #[arg(long)]
    green_directions: bool,

    /// Fail instead of warning when a vehicle id is added twice
    #[arg(long)]
    reject_duplicate_ids: bool,
}

#[derive(Args)]
struct GenerateArgs {
    /// Where to write the generated log
    #[arg(long, alias = "outputFile", default_value = "input.json")]
    output_file: PathBuf,

    /// Number of vehicles to add
    #[arg(long, default_value = "20")]
    vehicles: usize,

    /// Seed for a reproducible log
    #[arg(long)]
    seed: Option<u64>,

    /// Most vehicles added between two steps
    #[arg(long, default_value = "2")]
    max_arrivals_per_step: usize,

    /// Never generate vehicles that leave by the road they came in on
    #[arg(long)]
    no_u_turns: bool,
}

fn run_simulate(args: SimulateArgs) -> Result<()> {
    let options = SimulationOptions {
        record_green_directions: args.green_directions,
        reject_duplicate_ids: args.reject_duplicate_ids,
    };
    simulation::simulate(&args.input_file, &args.output_file, options)?;
    Ok(())
}

fn run_generate(args: GenerateArgs) -> Result<()> {
    let config = GeneratorConfig {
        vehicles: args.vehicles,
        max_arrivals_per_step: args.max_arrivals_per_step,
        allow_u_turns: !args.no_u_turns,
    };
    let commands = CommandGenerator::new(config, args.seed).generate();
    simulation::write_commands(&args.output_file, &commands)?;
    info!(
        "Generated {} commands for {} vehicles into {}",
        commands.len(),
        args.vehicles,
        args.output_file.display()
    );
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Simulate(args)) => run_simulate(args),
        Some(Commands::Generate(args)) => run_generate(args),
        None => run_simulate(cli.simulate),
    }
}
