/*
 * Simulation Loop Module
 *
 * This module drives the run: a fixed number of iterations, each one
 * computing the full neighbor map, applying the orientation update, and
 * recording a snapshot of the resulting Space. The initial Space is
 * snapshotted as well, so a run of N iterations yields N + 1 states.
 */

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::cell_index::CellIndexMethod;
use crate::error::SimulationError;
use crate::space::{Space, SpaceState};
use crate::updater::OrientationUpdater;
use crate::{DEFAULT_DT, DEFAULT_INTERACTION_RADIUS};

/// Immutable run parameters, supplied once at startup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationConfig {
    /// Number of iterations to run.
    pub iterations: usize,
    /// Noise amplitude η: each new heading is perturbed by a uniform draw
    /// from [−η/2, +η/2]. Zero yields deterministic pure alignment.
    pub eta: f64,
    /// Grid resolution M for the cell index method (cells per side).
    pub m: usize,
    /// Interaction radius for neighbor discovery.
    pub interaction_radius: f64,
    /// Integration time step.
    pub dt: f64,
    /// RNG seed; `None` seeds from entropy (non-reproducible run).
    pub seed: Option<u64>,
}

impl SimulationConfig {
    pub fn new(iterations: usize, eta: f64, m: usize) -> Self {
        Self {
            iterations,
            eta,
            m,
            interaction_radius: DEFAULT_INTERACTION_RADIUS,
            dt: DEFAULT_DT,
            seed: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<(), SimulationError> {
        if self.iterations == 0 {
            return Err(SimulationError::ZeroIterations);
        }
        if self.m == 0 {
            return Err(SimulationError::ZeroGridResolution);
        }
        if !(self.eta >= 0.0) {
            return Err(SimulationError::NegativeNoise(self.eta));
        }
        if !(self.interaction_radius > 0.0) {
            return Err(SimulationError::InvalidInteractionRadius(
                self.interaction_radius,
            ));
        }
        if !(self.dt > 0.0) {
            return Err(SimulationError::InvalidTimeStep(self.dt));
        }
        Ok(())
    }
}

#[derive(Debug)]
pub struct SimulationLoop {
    config: SimulationConfig,
    cell_index: CellIndexMethod,
    updater: OrientationUpdater,
    rng: StdRng,
}

impl SimulationLoop {
    /// Validates the configuration and seeds the run's single logical
    /// random source. Grid/radius compatibility against the actual domain
    /// is checked in `run`, before the first iteration.
    pub fn new(config: SimulationConfig) -> Result<Self, SimulationError> {
        config.validate()?;
        let cell_index = CellIndexMethod::new(config.m, config.interaction_radius)?;
        let updater = OrientationUpdater::new(config.eta, config.dt)?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self {
            config,
            cell_index,
            updater,
            rng,
        })
    }

    /// Runs the configured number of iterations from the given initial
    /// Space, returning one snapshot per state (initial state included).
    /// The only termination path is the iteration count; any domain or
    /// configuration error aborts the run.
    pub fn run(&mut self, initial: Space) -> Result<Vec<SpaceState>, SimulationError> {
        // Fail before the loop starts, not mid-run
        self.cell_index.check_grid(initial.side_length())?;

        log::info!(
            "running {} iterations: {} particles, L = {}, M = {}, eta = {}",
            self.config.iterations,
            initial.len(),
            initial.side_length(),
            self.config.m,
            self.config.eta,
        );

        let mut states = Vec::with_capacity(self.config.iterations + 1);
        states.push(initial.save_state());

        let mut space = initial;
        for iteration in 0..self.config.iterations {
            let neighbors = self.cell_index.neighbors(&space)?;
            space = self.updater.step(&space, &neighbors, &mut self.rng)?;
            states.push(space.save_state());

            if (iteration + 1) % 100 == 0 {
                log::debug!(
                    "iteration {}: order parameter {:.4}",
                    iteration + 1,
                    states.last().map(SpaceState::order_parameter).unwrap_or(0.0),
                );
            }
        }

        Ok(states)
    }
}
