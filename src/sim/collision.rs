//! Collision and boundary helpers for the rectangular arena
//!
//! Everything is axis-aligned: entities are points anchored at their sprite's
//! top-left corner, valid over [0, W-size] x [0, H-size].

use glam::Vec2;

use crate::consts::{ARENA_HEIGHT, ARENA_WIDTH};

/// Clamp a position into the arena for a sprite of the given size
pub fn clamp_to_arena(pos: Vec2, size: f32) -> Vec2 {
    Vec2::new(
        pos.x.clamp(0.0, ARENA_WIDTH - size),
        pos.y.clamp(0.0, ARENA_HEIGHT - size),
    )
}

/// Euclidean proximity check between two entity positions
pub fn within_reach(a: Vec2, b: Vec2, range: f32) -> bool {
    a.distance(b) < range
}

/// Advance one step with reflective walls: the velocity component that would
/// leave the arena is inverted first, then the position is clamped into
/// bounds. Returns the new position and (possibly flipped) velocity.
pub fn advance_with_bounce(pos: Vec2, vel: Vec2, size: f32) -> (Vec2, Vec2) {
    let next = pos + vel;
    let mut vel = vel;
    if next.x < 0.0 || next.x > ARENA_WIDTH - size {
        vel.x = -vel.x;
    }
    if next.y < 0.0 || next.y > ARENA_HEIGHT - size {
        vel.y = -vel.y;
    }
    (clamp_to_arena(next, size), vel)
}
