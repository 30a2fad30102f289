//! Error types for the off-lattice simulation.

use thiserror::Error;

/// Errors raised while validating the domain, its particles, or the
/// simulation configuration. All of these are fatal: a corrupted domain
/// state invalidates every subsequent step, so callers are expected to
/// abort the run rather than recover.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimulationError {
    #[error("side length must be positive, got {0}")]
    InvalidSideLength(f64),

    #[error("particle at ({x}, {y}) lies outside [0, {side_length}]")]
    ParticleOutOfBounds { x: f64, y: f64, side_length: f64 },

    #[error("the space must contain at least one particle")]
    EmptyParticleList,

    #[error("grid resolution M must be positive")]
    ZeroGridResolution,

    #[error("interaction radius must be positive, got {0}")]
    InvalidInteractionRadius(f64),

    #[error(
        "cell size {cell_size} (side length {side_length} / M {m}) is smaller than \
         interaction radius {radius}; neighbor search would miss valid pairs"
    )]
    CellTooSmall {
        m: usize,
        cell_size: f64,
        radius: f64,
        side_length: f64,
    },

    #[error("iteration count must be positive")]
    ZeroIterations,

    #[error("noise amplitude eta must be non-negative, got {0}")]
    NegativeNoise(f64),

    #[error("time step must be positive, got {0}")]
    InvalidTimeStep(f64),
}
