//! Narrow-phase disk collision detection and response
//!
//! Pairs come from the spatial hash in a single pass. Each overlapping pair is
//! pushed apart and has its velocities exchanged right away, so later pairs
//! see the corrected state. This is not a global solver: a particle can still
//! overlap a third one after its pair is fixed.

use glam::Vec2;
use rand::Rng;

use super::grid::SpatialHashGrid;
use super::state::Particle;
use crate::consts::COINCIDENT_NUDGE;
use crate::settings::WorldConfig;

/// Per-world collision constants
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactParams {
    /// Uniform disk radius
    pub radius: f32,
    /// Full width of the uniform velocity jitter; 0 gives an exact swap
    pub perturbation: f32,
}

impl ContactParams {
    pub fn from_config(config: &WorldConfig) -> Self {
        Self {
            radius: config.radius,
            perturbation: config.perturbation,
        }
    }

    /// Center distance below which two disks overlap
    #[inline]
    pub fn min_dist(&self) -> f32 {
        2.0 * self.radius
    }
}

/// Counters from one resolution pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContactStats {
    /// Pairs tested after broad-phase
    pub candidates: usize,
    /// Pairs found overlapping and resolved
    pub contacts: usize,
}

/// Resolve every overlapping pair once, in increasing `(i, j)` order
pub fn resolve_pairs<R: Rng + ?Sized>(
    particles: &mut [Particle],
    grid: &SpatialHashGrid,
    params: &ContactParams,
    rng: &mut R,
) -> ContactStats {
    resolve_pairs_observed(particles, grid, params, rng, |_, _| {})
}

/// Same as [`resolve_pairs`], calling `observe(i, j)` for each candidate pair
/// before it is tested
pub fn resolve_pairs_observed<R, F>(
    particles: &mut [Particle],
    grid: &SpatialHashGrid,
    params: &ContactParams,
    rng: &mut R,
    mut observe: F,
) -> ContactStats
where
    R: Rng + ?Sized,
    F: FnMut(usize, usize),
{
    let min_dist = params.min_dist();
    let min_dist_sq = min_dist * min_dist;
    let mut stats = ContactStats::default();

    for i in 0..particles.len() {
        // Uses the current position, which earlier pairs may have corrected
        let cell = grid.cell_of(particles[i].pos);
        for j in grid.neighbors(cell) {
            // Skips self and pairs already seen from the other side
            if j <= i {
                continue;
            }
            observe(i, j);
            stats.candidates += 1;

            if particles[i].pos.distance_squared(particles[j].pos) < min_dist_sq {
                let (a, b) = pair_mut(particles, i, j);
                separate(a, b, min_dist);
                exchange(a, b, params.perturbation, rng);
                stats.contacts += 1;
            }
        }
    }

    stats
}

/// Push two overlapping disks apart along the line of centers, half each
fn separate(a: &mut Particle, b: &mut Particle, min_dist: f32) {
    let mut delta = b.pos - a.pos;
    let mut dist_sq = delta.length_squared();
    if dist_sq == 0.0 {
        delta = Vec2::new(COINCIDENT_NUDGE, 0.0);
        dist_sq = delta.length_squared();
    }

    let dist = dist_sq.sqrt();
    let normal = delta / dist;
    let correction = normal * (0.5 * (min_dist - dist));
    a.pos -= correction;
    b.pos += correction;
}

/// Equal-mass exchange: swap velocities, then jitter both
fn exchange<R: Rng + ?Sized>(a: &mut Particle, b: &mut Particle, perturbation: f32, rng: &mut R) {
    std::mem::swap(&mut a.vel, &mut b.vel);

    if perturbation > 0.0 {
        for vel in [&mut a.vel, &mut b.vel] {
            vel.x += (rng.random::<f32>() - 0.5) * perturbation;
            vel.y += (rng.random::<f32>() - 0.5) * perturbation;
        }
    }
}

/// Two distinct mutable particles, `i < j`
fn pair_mut(particles: &mut [Particle], i: usize, j: usize) -> (&mut Particle, &mut Particle) {
    debug_assert!(i < j);
    let (head, tail) = particles.split_at_mut(j);
    (&mut head[i], &mut tail[0])
}
