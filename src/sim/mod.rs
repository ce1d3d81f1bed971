//! Deterministic simulation module
//!
//! All physics lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by particle index, never reordered)
//! - No rendering or platform dependencies

pub mod collision;
pub mod grid;
pub mod integrate;
pub mod spawn;
pub mod state;
pub mod step;

pub use collision::{ContactParams, ContactStats, resolve_pairs, resolve_pairs_observed};
pub use grid::{Cell, SpatialHashGrid};
pub use integrate::{advance, contain};
pub use spawn::scatter;
pub use state::{Particle, ParticleStore, Snapshot, StepStats, World};
pub use step::step;
