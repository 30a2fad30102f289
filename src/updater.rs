/*
 * Orientation Updater Module
 *
 * This module computes the next-iteration Space from the current one and
 * its neighbor sets. Each particle adopts the circular mean of its own and
 * its neighbors' headings, perturbed by bounded uniform noise, then
 * advances at fixed speed along the new heading with periodic wrap.
 *
 * The update is synchronous: every new state is computed purely from the
 * previous step's Space, so no particle ever observes another particle's
 * already-updated state within the same step. Noise draws are taken from
 * the caller's RNG in particle-index order before the parallel phase,
 * which keeps seeded runs bit-reproducible.
 */

use rand::Rng;
use rayon::prelude::*;

use crate::error::SimulationError;
use crate::particle::Particle;
use crate::space::Space;

#[derive(Debug)]
pub struct OrientationUpdater {
    eta: f64,
    dt: f64,
}

impl OrientationUpdater {
    pub fn new(eta: f64, dt: f64) -> Result<Self, SimulationError> {
        if !(eta >= 0.0) {
            return Err(SimulationError::NegativeNoise(eta));
        }
        if !(dt > 0.0) {
            return Err(SimulationError::InvalidTimeStep(dt));
        }
        Ok(Self { eta, dt })
    }

    /// Produces the next Space. `neighbors[i]` must hold the indices of the
    /// particles within interaction range of particle `i` in `space`, as
    /// returned by the cell index method for that same space.
    pub fn step<R: Rng>(
        &self,
        space: &Space,
        neighbors: &[Vec<usize>],
        rng: &mut R,
    ) -> Result<Space, SimulationError> {
        let side_length = space.side_length();
        let particles = space.particles();

        // Canonical per-particle draw order: one noise term per particle,
        // consumed sequentially before any update runs
        let noise: Vec<f64> = (0..particles.len())
            .map(|_| rng.gen_range(-self.eta / 2.0..=self.eta / 2.0))
            .collect();

        let dt = self.dt;
        let next: Vec<Particle> = particles
            .par_iter()
            .enumerate()
            .map(|(i, p)| {
                // Circular mean over {i} ∪ neighbors(i): the angle of the
                // vector sum of unit headings, immune to the 0/2π seam
                let mut sin_sum = p.theta.sin();
                let mut cos_sum = p.theta.cos();
                for &j in &neighbors[i] {
                    sin_sum += particles[j].theta.sin();
                    cos_sum += particles[j].theta.cos();
                }
                let theta = sin_sum.atan2(cos_sum) + noise[i];
                p.advanced(theta, dt, side_length)
            })
            .collect();

        // Wrap arithmetic keeps every coordinate in [0, L), but the domain
        // invariant is still enforced on every construction
        Space::new(side_length, next)
    }
}
