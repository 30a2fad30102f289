/*
 * Off-Lattice Flocking Simulation - Module Definitions
 *
 * This file defines the module structure for the Vicsek simulation crate.
 * It organizes the code into logical components for better maintainability.
 */

// Re-export key components for easier access
pub use cell_index::CellIndexMethod;
pub use config::ScenarioConfig;
pub use error::SimulationError;
pub use particle::{Particle, ParticleState};
pub use simulation::{SimulationConfig, SimulationLoop};
pub use space::{Space, SpaceState};
pub use updater::OrientationUpdater;

// Define modules
pub mod cell_index;
pub mod config;
pub mod error;
pub mod output;
pub mod particle;
pub mod simulation;
pub mod space;
pub mod updater;

// Constants
pub const DEFAULT_INTERACTION_RADIUS: f64 = 1.0;
pub const DEFAULT_SPEED: f64 = 0.03;
pub const DEFAULT_DT: f64 = 1.0;
