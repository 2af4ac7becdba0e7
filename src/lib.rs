//! Relic Rush - an arena treasure chase with an AI oracle side channel
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, room generation, tick engine)
//! - `driver`: Fixed-period loop driver, renderer seam, narrative handoff
//! - `oracle`: Fire-and-forget narrative client for the chat-completion API

pub mod driver;
pub mod oracle;
pub mod sim;

pub use driver::{Renderer, Session};
pub use oracle::{OracleClient, OracleConfig};

/// Game configuration constants
pub mod consts {
    /// Fixed tick period in milliseconds (~60 updates per second)
    pub const TICK_PERIOD_MS: u64 = 16;

    /// Arena dimensions
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 500.0;

    /// Sprite sizes (positions are top-left anchored)
    pub const PLAYER_SIZE: f32 = 20.0;
    pub const ENEMY_SIZE: f32 = 18.0;
    pub const TREASURE_SIZE: f32 = 14.0;

    /// Player movement per tick per held direction
    pub const PLAYER_STEP: f32 = 3.0;

    /// Proximity threshold for pickups and contact damage
    pub const CONTACT_RANGE: f32 = PLAYER_SIZE;

    /// Enemy velocity components are uniform in [-1,1) scaled by this
    pub const ENEMY_SPEED_SCALE: f32 = 2.0;

    /// Room composition: min(BASE + level, MAX) treasures,
    /// min(BASE + level/2, MAX) enemies
    pub const BASE_TREASURES: u32 = 3;
    pub const MAX_TREASURES: u32 = 8;
    pub const BASE_ENEMIES: u32 = 2;
    pub const MAX_ENEMIES: u32 = 6;

    /// Chance a generated treasure is special
    pub const SPECIAL_TREASURE_CHANCE: f64 = 0.3;

    /// Score awards
    pub const SCORE_NORMAL: u64 = 10;
    pub const SCORE_SPECIAL: u64 = 50;

    /// Pickup burst: particles spawned per collected treasure
    pub const PARTICLES_PER_PICKUP: usize = 5;
    /// Ticks a pickup particle lives
    pub const PARTICLE_LIFE: u32 = 30;
    /// Particle velocity components are uniform in this half-open range
    pub const PARTICLE_SPEED: f32 = 2.0;

    /// Chance a cleared room prompts the oracle for flavor text
    pub const ORACLE_NUDGE_CHANCE: f64 = 0.3;

    /// Player vitals
    pub const MAX_HEALTH: i32 = 100;
}
