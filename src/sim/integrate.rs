//! Velocity integration and wall handling
//!
//! Walls are the four sides of the square `[-half, half]²`. A disk touches a
//! wall when its edge (center ± radius) crosses it.

use glam::Vec2;

use super::state::Particle;

/// Move every particle by `vel * dt`, then reflect off walls.
///
/// Each axis is handled independently: the center is clamped so the disk sits
/// against the wall and only that axis' velocity component flips.
pub fn advance(particles: &mut [Particle], dt: f32, radius: f32, half: f32) {
    for p in particles.iter_mut() {
        p.pos += p.vel * dt;

        if p.pos.x - radius < -half {
            p.pos.x = -half + radius;
            p.vel.x = -p.vel.x;
        } else if p.pos.x + radius > half {
            p.pos.x = half - radius;
            p.vel.x = -p.vel.x;
        }

        if p.pos.y - radius < -half {
            p.pos.y = -half + radius;
            p.vel.y = -p.vel.y;
        } else if p.pos.y + radius > half {
            p.pos.y = half - radius;
            p.vel.y = -p.vel.y;
        }
    }
}

/// Clamp centers pushed past `±half` by positional correction.
///
/// Velocities are left alone; the next `advance` reflects them. Returns how
/// many particles were moved.
pub fn contain(particles: &mut [Particle], half: f32) -> usize {
    let mut moved = 0;
    for p in particles.iter_mut() {
        let clamped = p.pos.clamp(Vec2::splat(-half), Vec2::splat(half));
        if clamped != p.pos {
            p.pos = clamped;
            moved += 1;
        }
    }
    moved
}
