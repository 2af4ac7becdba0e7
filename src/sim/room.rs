//! Room generation
//!
//! A room is the treasure/enemy set for one difficulty level. Generation is
//! wholesale: the previous collections are replaced, never merged.

use glam::Vec2;
use rand::Rng;

use crate::consts::*;
use crate::sim::state::{Enemy, GameState, Treasure, TreasureKind};

/// Treasures in a room at the given level
pub fn treasure_count(level: u32) -> usize {
    (BASE_TREASURES + level).min(MAX_TREASURES) as usize
}

/// Enemies in a room at the given level
pub fn enemy_count(level: u32) -> usize {
    (BASE_ENEMIES + level / 2).min(MAX_ENEMIES) as usize
}

/// Generate a fresh room for the player's current level
///
/// Positions are uniform over the arena minus the sprite size. Each treasure
/// is independently special with a fixed chance; each enemy starts with both
/// velocity components uniform in [-1,1) scaled by `ENEMY_SPEED_SCALE`.
pub fn generate_room(state: &mut GameState) {
    let level = state.player.level;

    let treasures = (0..treasure_count(level))
        .map(|_| Treasure {
            pos: random_pos(state, TREASURE_SIZE),
            kind: if state.rng.random_bool(SPECIAL_TREASURE_CHANCE) {
                TreasureKind::Special
            } else {
                TreasureKind::Normal
            },
            collected: false,
        })
        .collect();

    let enemies = (0..enemy_count(level))
        .map(|_| Enemy {
            pos: random_pos(state, ENEMY_SIZE),
            vel: Vec2::new(random_unit(state), random_unit(state)) * ENEMY_SPEED_SCALE,
            alive: true,
        })
        .collect();

    state.treasures = treasures;
    state.enemies = enemies;

    log::debug!(
        "Room for level {}: {} treasures, {} enemies",
        level,
        state.treasures.len(),
        state.enemies.len()
    );
}

fn random_pos(state: &mut GameState, size: f32) -> Vec2 {
    Vec2::new(
        state.rng.random_range(0.0..ARENA_WIDTH - size),
        state.rng.random_range(0.0..ARENA_HEIGHT - size),
    )
}

fn random_unit(state: &mut GameState) -> f32 {
    state.rng.random_range(-1.0..1.0)
}
