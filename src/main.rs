/*
 * Off-Lattice Flocking Simulation
 *
 * Thin command-line entry point: load a scenario file, build the initial
 * Space, drive the simulation loop, and write the recorded state history
 * to the configured output files.
 */

use vicsek::output::{write_json_file, write_xyz_file};
use vicsek::{ScenarioConfig, SimulationLoop, Space, SpaceState};

use anyhow::{Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(about = "Off-lattice Vicsek simulation")]
struct Args {
    /// Scenario YAML file
    #[arg(short, long, default_value = "scenario.yaml")]
    file: PathBuf,
}

fn load_scenario(path: &PathBuf) -> Result<ScenarioConfig> {
    let file = File::open(path).with_context(|| format!("opening scenario {}", path.display()))?;
    let reader = BufReader::new(file);
    let scenario = serde_yaml::from_reader(reader)
        .with_context(|| format!("parsing scenario {}", path.display()))?;
    Ok(scenario)
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let scenario = load_scenario(&args.file)?;

    let config = scenario.run.to_simulation_config();
    let mut sim = SimulationLoop::new(config)?;

    // The initial placement draws from its own source so the run's noise
    // stream depends only on the configured seed
    let mut init_rng = match scenario.run.seed {
        Some(seed) => StdRng::seed_from_u64(seed ^ 0x5eed),
        None => StdRng::from_entropy(),
    };
    let space = Space::random(
        scenario.space.side_length,
        scenario.space.particle_count,
        scenario.space.speed,
        &mut init_rng,
    )?;

    let states = sim.run(space)?;

    let final_order = states.last().map(SpaceState::order_parameter).unwrap_or(0.0);
    log::info!(
        "finished: {} states recorded, final order parameter {:.4}",
        states.len(),
        final_order,
    );

    if let Some(path) = &scenario.output.xyz {
        write_xyz_file(&states, path).with_context(|| format!("writing {}", path.display()))?;
        log::info!("wrote trajectory to {}", path.display());
    }
    if let Some(path) = &scenario.output.json {
        write_json_file(&states, path).with_context(|| format!("writing {}", path.display()))?;
        log::info!("wrote state history to {}", path.display());
    }

    Ok(())
}
