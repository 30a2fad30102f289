//! Scenario configuration loaded from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! simulation scenario, kept separate from the runtime types: the loop only
//! ever sees an immutable [`SimulationConfig`] value.
//!
//! # YAML format
//!
//! ```yaml
//! space:
//!   side_length: 20.0
//!   particle_count: 400
//!   speed: 0.03          # optional, defaults to 0.03
//!
//! run:
//!   iterations: 1000
//!   eta: 0.5             # noise amplitude in radians
//!   m: 20                # cell index grid resolution
//!   interaction_radius: 1.0   # optional, defaults to 1.0
//!   dt: 1.0              # optional, defaults to 1.0
//!   seed: 42             # optional; omit for an entropy-seeded run
//!
//! output:
//!   xyz: history.xyz     # optional OVITO-compatible trajectory
//!   json: history.json   # optional JSON state history
//! ```

use serde::Deserialize;
use std::path::PathBuf;

use crate::simulation::SimulationConfig;
use crate::{DEFAULT_DT, DEFAULT_INTERACTION_RADIUS, DEFAULT_SPEED};

/// Initial domain and population.
#[derive(Deserialize, Debug, Clone)]
pub struct SpaceConfig {
    pub side_length: f64,
    pub particle_count: usize,
    #[serde(default = "default_speed")]
    pub speed: f64,
}

/// Run parameters: iteration count, noise, grid resolution.
#[derive(Deserialize, Debug, Clone)]
pub struct RunConfig {
    pub iterations: usize,
    pub eta: f64,
    pub m: usize,
    #[serde(default = "default_interaction_radius")]
    pub interaction_radius: f64,
    #[serde(default = "default_dt")]
    pub dt: f64,
    pub seed: Option<u64>,
}

/// Where to write the recorded state history. Both targets are optional.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct OutputConfig {
    pub xyz: Option<PathBuf>,
    pub json: Option<PathBuf>,
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone)]
pub struct ScenarioConfig {
    pub space: SpaceConfig,
    pub run: RunConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl RunConfig {
    /// Maps the file representation onto the immutable runtime value the
    /// simulation loop consumes.
    pub fn to_simulation_config(&self) -> SimulationConfig {
        SimulationConfig {
            iterations: self.iterations,
            eta: self.eta,
            m: self.m,
            interaction_radius: self.interaction_radius,
            dt: self.dt,
            seed: self.seed,
        }
    }
}

fn default_speed() -> f64 {
    DEFAULT_SPEED
}

fn default_interaction_radius() -> f64 {
    DEFAULT_INTERACTION_RADIUS
}

fn default_dt() -> f64 {
    DEFAULT_DT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a_minimal_scenario_fills_in_defaults() {
        let yaml = "
space:
  side_length: 10.0
  particle_count: 300
run:
  iterations: 500
  eta: 0.5
  m: 10
";
        let scenario: ScenarioConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(scenario.space.speed, DEFAULT_SPEED);
        assert_eq!(scenario.run.interaction_radius, DEFAULT_INTERACTION_RADIUS);
        assert_eq!(scenario.run.dt, DEFAULT_DT);
        assert_eq!(scenario.run.seed, None);
        assert!(scenario.output.xyz.is_none());

        let config = scenario.run.to_simulation_config();
        assert_eq!(config.iterations, 500);
        assert_eq!(config.m, 10);
        config.validate().unwrap();
    }

    #[test]
    fn a_full_scenario_round_trips_every_field() {
        let yaml = "
space:
  side_length: 20.0
  particle_count: 400
  speed: 0.1
run:
  iterations: 1000
  eta: 2.0
  m: 20
  interaction_radius: 0.5
  dt: 0.5
  seed: 42
output:
  xyz: out.xyz
";
        let scenario: ScenarioConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(scenario.space.speed, 0.1);
        assert_eq!(scenario.run.seed, Some(42));
        assert_eq!(scenario.run.interaction_radius, 0.5);
        assert_eq!(scenario.output.xyz, Some(PathBuf::from("out.xyz")));
    }
}
