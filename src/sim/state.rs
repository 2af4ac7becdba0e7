//! Game state and core entity types
//!
//! The session object: everything the engine mutates and the renderer reads.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::consts::*;
use crate::sim::room::generate_room;

/// Current phase of gameplay
///
/// Pausing and game over both land back in `Menu`; the driver only ever
/// ticks the engine while the phase is `Playing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GamePhase {
    #[default]
    Menu,
    Playing,
}

/// The player avatar
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    /// Top-left anchored position, clamped to the arena
    pub pos: Vec2,
    /// Clamped to [0, MAX_HEALTH]
    pub health: i32,
    pub score: u64,
    /// Starts at 1, never decreases within a session
    pub level: u32,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec2::new(
                (ARENA_WIDTH - PLAYER_SIZE) / 2.0,
                (ARENA_HEIGHT - PLAYER_SIZE) / 2.0,
            ),
            health: MAX_HEALTH,
            score: 0,
            level: 1,
        }
    }
}

/// A wandering enemy
#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Reserved; the set is replaced wholesale on room regeneration and no
    /// current rule clears this flag
    pub alive: bool,
}

/// Treasure variants; specials are rarer and worth more
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreasureKind {
    Normal,
    Special,
}

/// A collectible treasure
#[derive(Debug, Clone, PartialEq)]
pub struct Treasure {
    pub pos: Vec2,
    pub kind: TreasureKind,
    pub collected: bool,
}

/// A short-lived pickup spark (visual only, never gameplay-affecting)
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Remaining ticks; strictly decreasing, removed at 0
    pub life: u32,
    /// Color tag for the renderer
    pub color: TreasureKind,
}

/// Complete session state, owned by the loop driver
///
/// Deterministic: the whole session replays from `seed` given the same
/// input sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    /// Session seed for reproducibility
    pub seed: u64,
    pub phase: GamePhase,
    pub player: Player,
    /// Rooms completed this session
    pub rooms_cleared: u32,
    /// Active treasures; replaced wholesale on regeneration
    pub treasures: Vec<Treasure>,
    /// Active enemies; replaced wholesale on regeneration
    pub enemies: Vec<Enemy>,
    /// Pickup sparks
    pub particles: Vec<Particle>,
    /// Tick counter
    pub time_ticks: u64,
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Create a fresh session in the menu
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            phase: GamePhase::Menu,
            player: Player::default(),
            rooms_cleared: 0,
            treasures: Vec::new(),
            enemies: Vec::new(),
            particles: Vec::new(),
            time_ticks: 0,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Enter (or restart) a run: reset everything, seed the level-1 room
    pub fn start(&mut self) {
        self.player = Player::default();
        self.rooms_cleared = 0;
        self.particles.clear();
        self.time_ticks = 0;
        self.rng = Pcg32::seed_from_u64(self.seed);
        generate_room(self);
        self.phase = GamePhase::Playing;
        log::info!("Run started (seed {})", self.seed);
    }

    /// Treasures still on the floor
    pub fn remaining_treasures(&self) -> usize {
        self.treasures.iter().filter(|t| !t.collected).count()
    }
}
