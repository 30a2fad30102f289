/*
 * Space Module
 *
 * This module defines the Space struct: the bounded, periodic square
 * domain and the particles currently inside it. A Space validates its
 * invariants at construction time (positive side length, every particle
 * inside [0, L] on both axes) and is immutable afterwards; evolving the
 * simulation means building a new Space each iteration.
 */

use rand::Rng;
use serde::Serialize;
use std::f64::consts::TAU;

use crate::error::SimulationError;
use crate::particle::{Particle, ParticleState};

#[derive(Debug, Clone)]
pub struct Space {
    side_length: f64,
    particles: Vec<Particle>,
}

impl Space {
    /// Builds a space, failing if the side length is not positive or if any
    /// particle lies outside [0, side_length] on either axis. Both checks run
    /// here, at construction time, never lazily.
    pub fn new(side_length: f64, particles: Vec<Particle>) -> Result<Self, SimulationError> {
        // The negated comparison also rejects NaN
        if !(side_length > 0.0) {
            return Err(SimulationError::InvalidSideLength(side_length));
        }
        if particles.is_empty() {
            return Err(SimulationError::EmptyParticleList);
        }
        for p in &particles {
            if !(0.0..=side_length).contains(&p.x) || !(0.0..=side_length).contains(&p.y) {
                return Err(SimulationError::ParticleOutOfBounds {
                    x: p.x,
                    y: p.y,
                    side_length,
                });
            }
        }
        Ok(Self {
            side_length,
            particles,
        })
    }

    /// Builds a space populated with `count` particles at uniformly random
    /// positions and headings, all moving at the given speed.
    pub fn random<R: Rng>(
        side_length: f64,
        count: usize,
        speed: f64,
        rng: &mut R,
    ) -> Result<Self, SimulationError> {
        if !(side_length > 0.0) {
            return Err(SimulationError::InvalidSideLength(side_length));
        }
        let particles = (0..count)
            .map(|_| {
                let x = rng.gen_range(0.0..side_length);
                let y = rng.gen_range(0.0..side_length);
                let theta = rng.gen_range(0.0..TAU);
                Particle::new(x, y, theta, speed)
            })
            .collect();
        Self::new(side_length, particles)
    }

    pub fn side_length(&self) -> f64 {
        self.side_length
    }

    /// The particles in this space. The returned slice is read-only, so no
    /// collaborator can reach through it to alter the domain.
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Captures an immutable snapshot of the domain at this instant. Later
    /// iterations build new Space values, so a snapshot taken here is never
    /// affected by anything that happens afterwards.
    pub fn save_state(&self) -> SpaceState {
        SpaceState {
            side_length: self.side_length,
            particles: self.particles.iter().map(Particle::save_state).collect(),
        }
    }
}

/// Immutable snapshot of a Space: the side length plus the captured state of
/// every particle, in the same stable order the Space holds them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpaceState {
    pub side_length: f64,
    pub particles: Vec<ParticleState>,
}

impl SpaceState {
    /// The Vicsek order parameter v_a = |Σ e^{iθ}| / N: 1 when every heading
    /// is aligned, near 0 for fully disordered headings.
    pub fn order_parameter(&self) -> f64 {
        if self.particles.is_empty() {
            return 0.0;
        }
        let (sin_sum, cos_sum) = self
            .particles
            .iter()
            .fold((0.0, 0.0), |(s, c), p| (s + p.theta.sin(), c + p.theta.cos()));
        sin_sum.hypot(cos_sum) / self.particles.len() as f64
    }
}
