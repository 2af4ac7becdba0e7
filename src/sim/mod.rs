//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only, owned by the game state
//! - No IO: oracle-worthy moments are returned as events, never performed
//! - No rendering or platform dependencies

pub mod collision;
pub mod room;
pub mod state;
pub mod tick;

pub use collision::{advance_with_bounce, clamp_to_arena, within_reach};
pub use room::{enemy_count, generate_room, treasure_count};
pub use state::{Enemy, GamePhase, GameState, Particle, Player, Treasure, TreasureKind};
pub use tick::{TickEvent, TickInput, tick};
