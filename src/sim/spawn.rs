//! Initial particle distribution
//!
//! Positions are uniform over the whole square, headings uniform over the
//! circle, and every particle starts at the same speed. Placement does not
//! avoid overlaps; the first step's collision pass separates them.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

use super::state::Particle;
use crate::polar_to_cartesian;
use crate::settings::WorldConfig;

/// Generate `config.particle_count` particles from `rng`
pub fn scatter<R: Rng + ?Sized>(config: &WorldConfig, rng: &mut R) -> Vec<Particle> {
    let half = config.half_extent();
    (0..config.particle_count)
        .map(|_| {
            let x = rng.random::<f32>() * config.area_size - half;
            let y = rng.random::<f32>() * config.area_size - half;
            let heading = rng.random::<f32>() * TAU;
            Particle {
                pos: Vec2::new(x, y),
                vel: polar_to_cartesian(config.initial_speed, heading),
            }
        })
        .collect()
}
