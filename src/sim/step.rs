//! Fixed timestep simulation step
//!
//! Core loop that advances the world deterministically. The phase order is
//! fixed: integrate, rebuild the grid, resolve contacts, contain.

use super::collision::{ContactParams, resolve_pairs};
use super::grid::SpatialHashGrid;
use super::integrate::{advance, contain};
use super::state::{StepStats, World};

/// Advance the world by one step of length `dt`
pub fn step(world: &mut World, dt: f32) {
    let config = world.config();
    let radius = config.radius;
    let half = config.half_extent();
    let cell_size = config.cell_size();
    let params = ContactParams::from_config(config);

    let particles = world.particles.as_mut_slice();

    advance(particles, dt, radius, half);

    // Step-scoped: reflects post-integration positions and is dropped below
    let grid = SpatialHashGrid::build(particles, cell_size, half);
    let contacts = resolve_pairs(particles, &grid, &params, &mut world.rng);
    drop(grid);

    let contained = contain(particles, half);

    world.time_ticks += 1;
    world.last_stats = StepStats {
        tick: world.time_ticks,
        candidates: contacts.candidates,
        contacts: contacts.contacts,
        contained,
    };

    if contained > 0 {
        log::warn!(
            "Tick {}: {} particles pushed past the walls by contact correction",
            world.time_ticks,
            contained
        );
    }
    log::debug!(
        "Tick {}: {} candidate pairs, {} contacts",
        world.time_ticks,
        contacts.candidates,
        contacts.contacts
    );
}
