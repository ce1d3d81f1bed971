//! Uniform spatial hash broad-phase
//!
//! Cells are one particle diameter wide, so two disks that overlap always sit
//! in the same cell or in adjacent ones. Looking at the 3x3 block around a
//! particle's cell is enough to find every partner it can touch.

use std::collections::HashMap;

use glam::Vec2;

use super::state::Particle;

/// Integer grid coordinates of a bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// This cell and its 8 neighbors, x-major
    pub fn neighborhood(self) -> impl Iterator<Item = Cell> {
        (self.x - 1..=self.x + 1)
            .flat_map(move |x| (self.y - 1..=self.y + 1).map(move |y| Cell::new(x, y)))
    }
}

/// Particle indices bucketed by cell. Built from scratch every step.
#[derive(Debug, Clone)]
pub struct SpatialHashGrid {
    cell_size: f32,
    half: f32,
    buckets: HashMap<Cell, Vec<usize>>,
}

impl SpatialHashGrid {
    /// Bucket every particle by its current position
    pub fn build(particles: &[Particle], cell_size: f32, half: f32) -> Self {
        let mut grid = Self {
            cell_size,
            half,
            buckets: HashMap::with_capacity(particles.len() * 2),
        };
        for (i, p) in particles.iter().enumerate() {
            let cell = grid.cell_of(p.pos);
            grid.buckets.entry(cell).or_default().push(i);
        }
        grid
    }

    /// Cell containing `pos`, measured from the domain's lower-left corner
    #[inline]
    pub fn cell_of(&self, pos: Vec2) -> Cell {
        Cell::new(
            ((pos.x + self.half) / self.cell_size).floor() as i32,
            ((pos.y + self.half) / self.cell_size).floor() as i32,
        )
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Indices in one cell, in insertion (index) order
    pub fn bucket(&self, cell: Cell) -> &[usize] {
        self.buckets.get(&cell).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every index stored in the 3x3 block around `cell`
    pub fn neighbors(&self, cell: Cell) -> impl Iterator<Item = usize> + '_ {
        cell.neighborhood()
            .filter_map(|c| self.buckets.get(&c))
            .flat_map(|bucket| bucket.iter().copied())
    }

    /// Number of non-empty cells
    pub fn occupied_cells(&self) -> usize {
        self.buckets.len()
    }

    /// Total indices stored (equals the particle count it was built from)
    pub fn len(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;

    fn at(x: f32, y: f32) -> Particle {
        Particle::new(Vec2::new(x, y), Vec2::ZERO)
    }

    #[test]
    fn test_cell_of_measures_from_corner() {
        let grid = SpatialHashGrid::build(&[], 2.0, 10.0);
        assert_eq!(grid.cell_of(Vec2::new(-10.0, -10.0)), Cell::new(0, 0));
        assert_eq!(grid.cell_of(Vec2::new(-8.5, -7.9)), Cell::new(0, 1));
        assert_eq!(grid.cell_of(Vec2::new(0.0, 0.0)), Cell::new(5, 5));
        assert_eq!(grid.cell_of(Vec2::new(10.0, 9.99)), Cell::new(10, 9));
        // Outside the domain still hashes, to negative coordinates
        assert_eq!(grid.cell_of(Vec2::new(-10.5, 0.0)), Cell::new(-1, 5));
    }

    #[test]
    fn test_build_buckets_every_particle_once() {
        let ps = [at(0.0, 0.0), at(0.5, 0.5), at(5.0, 5.0), at(-9.0, 9.0)];
        let grid = SpatialHashGrid::build(&ps, 2.0, 10.0);
        assert_eq!(grid.cell_size(), 2.0);
        assert_eq!(grid.len(), ps.len());
        assert_eq!(grid.occupied_cells(), 3);
        assert_eq!(grid.bucket(Cell::new(5, 5)), &[0, 1]);
        assert_eq!(grid.bucket(Cell::new(7, 7)), &[2]);
        assert!(grid.bucket(Cell::new(3, 3)).is_empty());
    }

    #[test]
    fn test_neighborhood_order() {
        let cells: Vec<_> = Cell::new(0, 0).neighborhood().collect();
        assert_eq!(cells.len(), 9);
        assert_eq!(cells[0], Cell::new(-1, -1));
        assert_eq!(cells[1], Cell::new(-1, 0));
        assert_eq!(cells[3], Cell::new(0, -1));
        assert_eq!(cells[8], Cell::new(1, 1));
    }

    #[test]
    fn test_neighbors_skip_empty_and_far_cells() {
        let ps = [at(0.1, 0.1), at(2.5, 0.1), at(-1.5, -1.5), at(6.0, 6.0)];
        let grid = SpatialHashGrid::build(&ps, 2.0, 10.0);
        let mut found: Vec<_> = grid.neighbors(grid.cell_of(ps[0].pos)).collect();
        found.sort_unstable();
        assert_eq!(found, vec![0, 1, 2]);
    }

    #[test]
    fn test_empty_grid() {
        let grid = SpatialHashGrid::build(&[], 2.0, 10.0);
        assert!(grid.is_empty());
        assert_eq!(grid.neighbors(Cell::new(0, 0)).count(), 0);
    }

    #[test]
    fn test_every_overlapping_pair_is_a_neighbor() {
        let radius = 0.5;
        let half = 10.0;
        let mut rng = Pcg32::seed_from_u64(77);
        let ps: Vec<_> = (0..400)
            .map(|_| at(rng.random_range(-half..half), rng.random_range(-half..half)))
            .collect();
        let grid = SpatialHashGrid::build(&ps, 2.0 * radius, half);

        let min_dist_sq = (2.0 * radius) * (2.0 * radius);
        let mut overlapping = 0;
        for i in 0..ps.len() {
            let near: Vec<_> = grid.neighbors(grid.cell_of(ps[i].pos)).collect();
            for j in (i + 1)..ps.len() {
                if ps[i].pos.distance_squared(ps[j].pos) < min_dist_sq {
                    overlapping += 1;
                    assert!(near.contains(&j), "pair ({i}, {j}) missed by broad-phase");
                }
            }
        }
        assert!(overlapping > 0);
    }
}
