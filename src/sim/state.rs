//! World state and core simulation types
//!
//! The particle array is the only mutable state; everything else is derived
//! per step.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::spawn::scatter;
use crate::error::Result;
use crate::settings::WorldConfig;

/// A disk. Identity is its index in the [`ParticleStore`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
}

impl Particle {
    pub fn new(pos: Vec2, vel: Vec2) -> Self {
        Self { pos, vel }
    }

    /// Kinetic energy at unit mass
    #[inline]
    pub fn kinetic_energy(&self) -> f32 {
        0.5 * self.vel.length_squared()
    }
}

/// Owned, fixed-length particle array. Never reorders or resizes.
#[derive(Debug, Clone, Default)]
pub struct ParticleStore {
    particles: Vec<Particle>,
}

impl ParticleStore {
    pub fn from_vec(particles: Vec<Particle>) -> Self {
        Self { particles }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[Particle] {
        &self.particles
    }

    /// Mutable view; the slice type keeps the length fixed
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    /// Positions in index order
    pub fn positions(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.particles.iter().map(|p| p.pos)
    }
}

/// What the last step did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepStats {
    /// Tick number the stats belong to (1 after the first step)
    pub tick: u64,
    /// Pairs that passed the broad-phase and `j > i` filter
    pub candidates: usize,
    /// Pairs that actually overlapped and were resolved
    pub contacts: usize,
    /// Particles pulled back inside by the containment guard
    pub contained: usize,
}

/// Positions at a given tick, for external consumers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub tick: u64,
    pub positions: Vec<[f32; 2]>,
}

/// Complete simulation world (deterministic for a given config)
#[derive(Debug, Clone)]
pub struct World {
    config: WorldConfig,
    pub(crate) particles: ParticleStore,
    pub(crate) rng: Pcg32,
    pub(crate) time_ticks: u64,
    pub(crate) last_stats: StepStats,
}

impl World {
    /// Create a world with a seeded random particle distribution
    pub fn new(config: WorldConfig) -> Result<Self> {
        config.validate()?;
        let mut rng = Pcg32::seed_from_u64(config.seed);
        let particles = scatter(&config, &mut rng);
        log::info!(
            "Spawned {} particles (radius {}, area {}, seed {})",
            particles.len(),
            config.radius,
            config.area_size,
            config.seed
        );
        Ok(Self::assemble(config, particles, rng))
    }

    /// Create a world from an explicit initial state.
    ///
    /// `particle_count` is taken from `particles`; the RNG is still seeded from
    /// the config and only feeds the collision jitter.
    pub fn from_particles(mut config: WorldConfig, particles: Vec<Particle>) -> Result<Self> {
        config.particle_count = particles.len();
        config.validate()?;
        let rng = Pcg32::seed_from_u64(config.seed);
        Ok(Self::assemble(config, particles, rng))
    }

    fn assemble(config: WorldConfig, particles: Vec<Particle>, rng: Pcg32) -> Self {
        Self {
            config,
            particles: ParticleStore::from_vec(particles),
            rng,
            time_ticks: 0,
            last_stats: StepStats::default(),
        }
    }

    /// Advance one step of length `dt`
    pub fn step(&mut self, dt: f32) {
        super::step::step(self, dt);
    }

    /// Advance one step of the configured length
    pub fn step_fixed(&mut self) {
        let dt = self.config.dt;
        self.step(dt);
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// Read-only particle view
    pub fn particles(&self) -> &[Particle] {
        self.particles.as_slice()
    }

    /// Lazy position stream for renderers
    pub fn positions(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.particles.positions()
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Steps taken so far
    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    pub fn last_stats(&self) -> StepStats {
        self.last_stats
    }

    /// Total kinetic energy at unit mass
    pub fn kinetic_energy(&self) -> f32 {
        self.particles().iter().map(Particle::kinetic_energy).sum()
    }

    pub fn mean_speed(&self) -> f32 {
        if self.is_empty() {
            return 0.0;
        }
        let total: f32 = self.particles().iter().map(|p| p.vel.length()).sum();
        total / self.len() as f32
    }

    /// Copy the current positions out
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            tick: self.time_ticks,
            positions: self.positions().map(|p| p.to_array()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> WorldConfig {
        WorldConfig {
            particle_count: 50,
            radius: 1.0,
            area_size: 100.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_new_world_has_configured_count() {
        let world = World::new(small_config()).unwrap();
        assert_eq!(world.len(), 50);
        assert_eq!(world.positions().count(), 50);
        assert_eq!(world.time_ticks(), 0);
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = WorldConfig { radius: -1.0, ..small_config() };
        assert!(World::new(config).is_err());
    }

    #[test]
    fn test_from_particles_overrides_count() {
        let particles = vec![Particle::new(Vec2::ZERO, Vec2::X); 3];
        let world = World::from_particles(small_config(), particles).unwrap();
        assert_eq!(world.config().particle_count, 3);
        assert_eq!(world.len(), 3);
    }

    #[test]
    fn test_kinetic_energy_and_mean_speed() {
        let particles = vec![
            Particle::new(Vec2::ZERO, Vec2::new(3.0, 4.0)),
            Particle::new(Vec2::ONE, Vec2::new(0.0, 1.0)),
        ];
        let world = World::from_particles(small_config(), particles).unwrap();
        assert!((world.kinetic_energy() - 13.0).abs() < 1e-6);
        assert!((world.mean_speed() - 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_empty_world_stats() {
        let world = World::from_particles(small_config(), Vec::new()).unwrap();
        assert!(world.is_empty());
        assert_eq!(world.mean_speed(), 0.0);
        assert_eq!(world.kinetic_energy(), 0.0);
    }

    #[test]
    fn test_snapshot_matches_positions() {
        let world = World::new(small_config()).unwrap();
        let snap = world.snapshot();
        assert_eq!(snap.tick, 0);
        assert_eq!(snap.positions.len(), world.len());
        for (s, p) in snap.positions.iter().zip(world.positions()) {
            assert_eq!(*s, [p.x, p.y]);
        }
    }
}
