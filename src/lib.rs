//! Disk Box - real-time 2D elastic disk simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (integration, broad-phase, collisions, stepping)
//! - `settings`: World configuration, presets, JSON load/save
//! - `clock`: Fixed timestep accumulator for frame-locked drivers
//! - `error`: Configuration and I/O errors

pub mod clock;
pub mod error;
pub mod settings;
pub mod sim;

pub use clock::FrameClock;
pub use error::{Error, Result};
pub use settings::{WorldConfig, WorldPreset};
pub use sim::{Particle, Snapshot, StepStats, World};

use glam::Vec2;

/// Simulation configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one step per rendered frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame the clock will try to catch up on (seconds)
    pub const MAX_FRAME_TIME: f32 = 0.1;

    /// Default population
    pub const PARTICLE_COUNT: usize = 800;
    /// Default disk radius (world units)
    pub const PARTICLE_RADIUS: f32 = 4.0;
    /// Default square domain side length (world units)
    pub const AREA_SIZE: f32 = 600.0;
    /// Launch speed for every particle (world units/s)
    pub const INITIAL_SPEED: f32 = 80.0;

    /// Velocity jitter added after each exchange (full width of the uniform range)
    pub const PERTURBATION: f32 = 0.01;
    /// Upper bound on grid cells along one side of the domain
    pub const MAX_GRID_CELLS_PER_SIDE: f32 = i32::MAX as f32 / 2.0;
    /// Direction substituted when two centers coincide exactly
    pub const COINCIDENT_NUDGE: f32 = 1e-3;

    /// Default RNG seed
    pub const DEFAULT_SEED: u64 = 0x5EED;
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}
