/*
 * Cell Index Module
 *
 * This module implements the cell index method for efficient neighbor
 * lookups under periodic boundaries. It divides the square domain into an
 * M x M grid of cells sized to the interaction radius, allowing expected
 * O(N) neighbor queries instead of the O(N²) all-pairs scan.
 *
 * Correctness precondition: the cell side (L / M) must be at least the
 * interaction radius, otherwise a valid neighbor can sit two cells away
 * and the 9-cell scan would miss it. That is checked up front and treated
 * as a fatal configuration error, never silently degraded.
 */

use rayon::prelude::*;

use crate::error::SimulationError;
use crate::particle::Particle;
use crate::space::Space;

#[derive(Debug)]
pub struct CellIndexMethod {
    m: usize,
    interaction_radius: f64,
}

impl CellIndexMethod {
    pub fn new(m: usize, interaction_radius: f64) -> Result<Self, SimulationError> {
        if m == 0 {
            return Err(SimulationError::ZeroGridResolution);
        }
        if !(interaction_radius > 0.0) {
            return Err(SimulationError::InvalidInteractionRadius(interaction_radius));
        }
        Ok(Self {
            m,
            interaction_radius,
        })
    }

    /// Verifies the grid is compatible with the interaction radius for a
    /// domain of the given side length.
    pub fn check_grid(&self, side_length: f64) -> Result<(), SimulationError> {
        let cell_size = side_length / self.m as f64;
        if cell_size < self.interaction_radius {
            return Err(SimulationError::CellTooSmall {
                m: self.m,
                cell_size,
                radius: self.interaction_radius,
                side_length,
            });
        }
        Ok(())
    }

    /// Computes, for every particle, the indices of the particles within the
    /// interaction radius (inclusive), honoring periodic wrap-around. A
    /// particle is never its own neighbor. The result is recomputed fresh on
    /// every call since particles move continuously.
    pub fn neighbors(&self, space: &Space) -> Result<Vec<Vec<usize>>, SimulationError> {
        let side_length = space.side_length();
        self.check_grid(side_length)?;

        let m = self.m;
        let cell_size = side_length / m as f64;
        let particles = space.particles();

        // Assign every particle to exactly one cell
        let mut grid: Vec<Vec<usize>> = vec![Vec::new(); m * m];
        for (i, p) in particles.iter().enumerate() {
            grid[cell_of(p, cell_size, m)].push(i);
        }

        // Each particle's query is independent, so the scan runs in parallel;
        // indexed collection keeps the output order deterministic.
        let result = particles
            .par_iter()
            .enumerate()
            .map(|(i, p)| {
                let cx = cell_coord(p.x, cell_size, m);
                let cy = cell_coord(p.y, cell_size, m);

                // For M < 3 the wrapped 3x3 neighborhood revisits cells, so
                // track which ones were already scanned
                let mut visited = [usize::MAX; 9];
                let mut visited_len = 0;
                let mut found = Vec::new();

                for dy in -1isize..=1 {
                    for dx in -1isize..=1 {
                        let gx = (cx + dx).rem_euclid(m as isize) as usize;
                        let gy = (cy + dy).rem_euclid(m as isize) as usize;
                        let cell = gy * m + gx;
                        if visited[..visited_len].contains(&cell) {
                            continue;
                        }
                        visited[visited_len] = cell;
                        visited_len += 1;

                        for &j in &grid[cell] {
                            if j != i
                                && minimum_image_distance(p, &particles[j], side_length)
                                    <= self.interaction_radius
                            {
                                found.push(j);
                            }
                        }
                    }
                }

                found.sort_unstable();
                found
            })
            .collect();

        Ok(result)
    }
}

// Convert one world coordinate to a grid coordinate. A coordinate exactly at
// the far boundary (x == L) belongs to the last cell.
#[inline]
fn cell_coord(coord: f64, cell_size: f64, m: usize) -> isize {
    ((coord / cell_size) as isize).min(m as isize - 1)
}

#[inline]
fn cell_of(p: &Particle, cell_size: f64, m: usize) -> usize {
    let cx = cell_coord(p.x, cell_size, m) as usize;
    let cy = cell_coord(p.y, cell_size, m) as usize;
    cy * m + cx
}

/// Euclidean distance between two particles under the minimum-image
/// convention: on each axis the shorter of the direct and the wrap-around
/// difference is taken.
pub fn minimum_image_distance(a: &Particle, b: &Particle, side_length: f64) -> f64 {
    let dx = (a.x - b.x).abs();
    let dx = dx.min(side_length - dx);
    let dy = (a.y - b.y).abs();
    let dy = dy.min(side_length - dy);
    dx.hypot(dy)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn particle(x: f64, y: f64) -> Particle {
        Particle::new(x, y, 0.0, 0.03)
    }

    #[test]
    fn the_method_is_debug_formattable() {
        // unwrap_err on Result<CellIndexMethod, _> needs this
        let method = CellIndexMethod::new(5, 1.0).unwrap();
        assert!(format!("{method:?}").contains("interaction_radius"));
    }

    #[test]
    fn rejects_a_zero_grid_resolution() {
        assert_eq!(
            CellIndexMethod::new(0, 1.0).unwrap_err(),
            SimulationError::ZeroGridResolution
        );
    }

    #[test]
    fn rejects_a_cell_smaller_than_the_radius() {
        // L = 10, M = 20 -> cell size 0.5 < radius 1
        let method = CellIndexMethod::new(20, 1.0).unwrap();
        let space = Space::new(10.0, vec![particle(1.0, 1.0)]).unwrap();
        let err = method.neighbors(&space).unwrap_err();
        assert!(matches!(err, SimulationError::CellTooSmall { .. }));
    }

    #[test]
    fn finds_neighbors_across_the_periodic_boundary() {
        // Raw coordinate difference is large, wrap distance is 0.8
        let space = Space::new(10.0, vec![particle(0.5, 0.5), particle(9.7, 0.5)]).unwrap();
        let method = CellIndexMethod::new(5, 1.0).unwrap();
        let neighbors = method.neighbors(&space).unwrap();
        assert_eq!(neighbors[0], vec![1]);
        assert_eq!(neighbors[1], vec![0]);
    }

    #[test]
    fn excludes_self_and_out_of_range_particles() {
        let space = Space::new(
            10.0,
            vec![particle(2.0, 2.0), particle(2.5, 2.0), particle(7.0, 7.0)],
        )
        .unwrap();
        let method = CellIndexMethod::new(5, 1.0).unwrap();
        let neighbors = method.neighbors(&space).unwrap();
        assert_eq!(neighbors[0], vec![1]);
        assert_eq!(neighbors[1], vec![0]);
        assert!(neighbors[2].is_empty());
    }

    #[test]
    fn the_radius_boundary_is_inclusive() {
        let space = Space::new(10.0, vec![particle(2.0, 2.0), particle(3.0, 2.0)]).unwrap();
        let method = CellIndexMethod::new(5, 1.0).unwrap();
        let neighbors = method.neighbors(&space).unwrap();
        assert_eq!(neighbors[0], vec![1]);
    }

    #[test]
    fn a_coarse_grid_does_not_double_count() {
        // M = 1: every wrapped 3x3 offset lands on the single cell
        let space = Space::new(10.0, vec![particle(4.0, 4.0), particle(4.5, 4.0)]).unwrap();
        let method = CellIndexMethod::new(1, 1.0).unwrap();
        let neighbors = method.neighbors(&space).unwrap();
        assert_eq!(neighbors[0], vec![1]);
        assert_eq!(neighbors[1], vec![0]);
    }

    #[test]
    fn a_particle_on_the_far_boundary_is_assigned_to_the_last_cell() {
        // x == L must not index past the grid
        let space = Space::new(10.0, vec![particle(10.0, 10.0), particle(0.2, 0.2)]).unwrap();
        let method = CellIndexMethod::new(5, 1.0).unwrap();
        let neighbors = method.neighbors(&space).unwrap();
        // (10, 10) wraps onto (0, 0): distance to (0.2, 0.2) is ~0.28
        assert_eq!(neighbors[0], vec![1]);
    }

    #[test]
    fn minimum_image_takes_the_shorter_path_per_axis() {
        let a = particle(0.5, 5.0);
        let b = particle(9.7, 5.0);
        assert!((minimum_image_distance(&a, &b, 10.0) - 0.8).abs() < 1e-12);

        let c = particle(5.0, 0.1);
        let d = particle(5.0, 9.9);
        assert!((minimum_image_distance(&c, &d, 10.0) - 0.2).abs() < 1e-12);
    }
}
