//! Fixed-period game loop driver
//!
//! Owns the session state, serializes engine ticks on one logical thread,
//! and hands oracle replies back onto that thread over a channel. Oracle
//! tasks are fire-and-forget: their only effect is a send into the
//! narrative channel, drained here before each tick. Last write wins.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{MissedTickBehavior, interval};

use crate::consts::TICK_PERIOD_MS;
use crate::oracle::OracleClient;
use crate::sim::{GamePhase, GameState, TickEvent, TickInput, tick};

/// Read-only consumer of the game state, invoked whenever it changes
pub trait Renderer {
    fn draw(&mut self, state: &GameState, narrative: &str);
}

/// A game session: state, current input, and the narrative side channel
pub struct Session {
    pub state: GameState,
    /// Held intents, updated by the input mapper between ticks
    pub input: TickInput,
    narrative: String,
    oracle: Option<OracleClient>,
    narrative_tx: mpsc::UnboundedSender<String>,
    narrative_rx: mpsc::UnboundedReceiver<String>,
}

impl Session {
    pub fn new(seed: u64, oracle: Option<OracleClient>) -> Self {
        let (narrative_tx, narrative_rx) = mpsc::unbounded_channel();
        Self {
            state: GameState::new(seed),
            input: TickInput::default(),
            narrative: String::new(),
            oracle,
            narrative_tx,
            narrative_rx,
        }
    }

    /// The latest oracle reply (display-only)
    pub fn narrative(&self) -> &str {
        &self.narrative
    }

    /// Enter (or restart) a run
    pub fn start(&mut self) {
        self.input = TickInput::default();
        self.state.start();
    }

    /// Drain pending oracle replies into the display slot.
    /// Returns whether the slot changed.
    pub fn pump(&mut self) -> bool {
        let mut changed = false;
        while let Ok(text) = self.narrative_rx.try_recv() {
            self.narrative = text;
            changed = true;
        }
        changed
    }

    /// One driver iteration: drain replies, run one engine tick while
    /// playing, dispatch any advisory events. Returns whether observable
    /// state changed (the caller redraws on true).
    pub fn step(&mut self) -> bool {
        let mut changed = self.pump();
        if self.state.phase == GamePhase::Playing {
            for event in tick(&mut self.state, &self.input) {
                self.dispatch(&event);
            }
            changed = true;
        }
        changed
    }

    /// Tick at a fixed period until the run ends, redrawing on change.
    /// Returns as soon as the phase leaves `Playing`; no partial tick.
    pub async fn run(&mut self, renderer: &mut dyn Renderer) {
        let mut ticker = interval(Duration::from_millis(TICK_PERIOD_MS));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        while self.state.phase == GamePhase::Playing {
            ticker.tick().await;
            if self.step() {
                renderer.draw(&self.state, &self.narrative);
            }
        }
    }

    /// Fire-and-forget oracle consultation for an advisory event
    fn dispatch(&self, event: &TickEvent) {
        let Some(oracle) = self.oracle.clone() else {
            return;
        };
        let prompt = prompt_for(event);
        let tx = self.narrative_tx.clone();
        tokio::spawn(async move {
            match oracle.consult(&prompt).await {
                // The receiver may be gone after the session is dropped
                Ok(text) => {
                    let _ = tx.send(text);
                }
                Err(err) => log::warn!("Dropped oracle request: {err}"),
            }
        });
    }
}

fn prompt_for(event: &TickEvent) -> String {
    match event {
        TickEvent::RoomCleared {
            level,
            rooms_cleared,
            score,
        } => format!(
            "The adventurer has cleared {rooms_cleared} rooms and now walks \
             level {level} with {score} points. Offer brief encouragement \
             for the road ahead."
        ),
        TickEvent::PlayerDied {
            level,
            rooms_cleared,
            score,
        } => format!(
            "The adventurer has fallen on level {level} after clearing \
             {rooms_cleared} rooms, with {score} points. Offer brief, \
             mysterious comfort and a hint to try again."
        ),
    }
}
