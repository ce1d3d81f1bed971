//! Fixed timestep accumulator
//!
//! Drivers report how much wall time passed since the last frame; the clock
//! turns that into whole simulation steps and carries the remainder.

use crate::consts::{MAX_FRAME_TIME, MAX_SUBSTEPS};
use crate::sim::World;

#[derive(Debug, Clone)]
pub struct FrameClock {
    dt: f32,
    max_substeps: u32,
    accumulator: f32,
}

impl FrameClock {
    pub fn new(dt: f32, max_substeps: u32) -> Self {
        Self {
            dt,
            max_substeps,
            accumulator: 0.0,
        }
    }

    /// Clock for a world's configured `dt` with the default substep cap
    pub fn for_world(world: &World) -> Self {
        Self::new(world.config().dt, MAX_SUBSTEPS)
    }

    /// Unconsumed time carried into the next frame
    pub fn pending(&self) -> f32 {
        self.accumulator
    }

    /// Feed `elapsed` seconds and run as many whole steps as fit.
    ///
    /// Returns the number of steps taken. When the cap is hit the leftover
    /// backlog is dropped instead of snowballing into later frames.
    pub fn advance(&mut self, elapsed: f32, world: &mut World) -> u32 {
        let elapsed = elapsed.clamp(0.0, MAX_FRAME_TIME);
        self.accumulator += elapsed;

        let mut substeps = 0;
        while self.accumulator >= self.dt && substeps < self.max_substeps {
            world.step(self.dt);
            self.accumulator -= self.dt;
            substeps += 1;
        }

        if substeps == self.max_substeps && self.accumulator >= self.dt {
            log::debug!(
                "Frame clock hit {} substeps, dropping {:.4}s of backlog",
                substeps,
                self.accumulator
            );
            self.accumulator %= self.dt;
        }

        substeps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::WorldConfig;

    fn world() -> World {
        World::new(WorldConfig { particle_count: 10, ..Default::default() }).unwrap()
    }

    #[test]
    fn test_carries_remainder() {
        let mut world = world();
        let mut clock = FrameClock::new(0.01, 8);

        assert_eq!(clock.advance(0.025, &mut world), 2);
        assert!((clock.pending() - 0.005).abs() < 1e-6);
        assert_eq!(clock.advance(0.006, &mut world), 1);
        assert_eq!(world.time_ticks(), 3);
    }

    #[test]
    fn test_substep_cap() {
        let mut world = world();
        let mut clock = FrameClock::new(0.001, 4);

        assert_eq!(clock.advance(0.05, &mut world), 4);
        assert!(clock.pending() < 0.001);
        assert_eq!(world.time_ticks(), 4);
    }

    #[test]
    fn test_negative_or_huge_frames_are_clamped() {
        let mut world = world();
        let mut clock = FrameClock::new(0.01, 100);

        assert_eq!(clock.advance(-1.0, &mut world), 0);
        // 0.1s cap: ten steps, not a thousand
        let steps = clock.advance(10.0, &mut world);
        assert!((9..=10).contains(&steps));
    }

    #[test]
    fn test_for_world_uses_configured_dt() {
        let mut world = world();
        let mut clock = FrameClock::for_world(&world);
        let dt = world.config().dt;
        assert_eq!(clock.advance(dt * 1.5, &mut world), 1);
    }
}
