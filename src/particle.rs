/*
 * Particle Module
 *
 * This module defines the Particle value type. A particle is a
 * self-propelled point: a position inside the square domain, a heading
 * angle, and a fixed scalar speed. Particles are never mutated in place;
 * each simulation step replaces every particle with a freshly computed
 * value, so snapshots of earlier steps stay valid as the run proceeds.
 */

use serde::Serialize;
use std::f64::consts::TAU;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub theta: f64,
    pub speed: f64,
}

// Normalize a heading into [0, 2π). For a tiny negative input rem_euclid
// can round up to the modulus itself, so that case folds back to zero.
fn wrap_angle(theta: f64) -> f64 {
    let t = theta.rem_euclid(TAU);
    if t >= TAU {
        0.0
    } else {
        t
    }
}

impl Particle {
    /// Creates a particle, normalizing the heading into [0, 2π).
    pub fn new(x: f64, y: f64, theta: f64, speed: f64) -> Self {
        Self {
            x,
            y,
            theta: wrap_angle(theta),
            speed,
        }
    }

    /// Returns the particle after one time step: it adopts `theta` as its
    /// new heading and advances `speed * dt` along it, with each coordinate
    /// wrapped modulo `side_length` so it re-enters the domain on the
    /// opposite side when it crosses a boundary.
    pub fn advanced(&self, theta: f64, dt: f64, side_length: f64) -> Particle {
        let theta = wrap_angle(theta);
        let x = (self.x + self.speed * theta.cos() * dt).rem_euclid(side_length);
        let y = (self.y + self.speed * theta.sin() * dt).rem_euclid(side_length);
        Particle {
            x,
            y,
            theta,
            speed: self.speed,
        }
    }

    // Capture position and heading at this instant
    pub fn save_state(&self) -> ParticleState {
        ParticleState {
            x: self.x,
            y: self.y,
            theta: self.theta,
        }
    }
}

/// Immutable snapshot of one particle at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ParticleState {
    pub x: f64,
    pub y: f64,
    pub theta: f64,
}
