//! Relic Rush entry point
//!
//! Runs a headless autopilot demo: the engine chases treasures on its own
//! while a logging renderer reports progress. Wire a real input mapper and
//! renderer against `Session` for an interactive build.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use anyhow::Context;
use relic_rush::driver::{Renderer, Session};
use relic_rush::oracle::{OracleClient, OracleConfig};
use relic_rush::sim::GameState;

/// Logs a status line about once a second and narrative text on change
#[derive(Default)]
struct LogRenderer {
    last_narrative: String,
}

impl Renderer for LogRenderer {
    fn draw(&mut self, state: &GameState, narrative: &str) {
        if state.time_ticks % 60 == 0 {
            log::info!(
                "tick {}: level {}, {} points, {} hp, {} treasures left",
                state.time_ticks,
                state.player.level,
                state.player.score,
                state.player.health,
                state.remaining_treasures(),
            );
        }
        if narrative != self.last_narrative {
            log::info!("Oracle: {narrative}");
            self.last_narrative = narrative.to_string();
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let seed = match std::env::var("RELIC_RUSH_SEED") {
        Ok(raw) => raw.parse().context("RELIC_RUSH_SEED must be a u64")?,
        Err(_) => SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or_default(),
    };

    let config = OracleConfig::from_env();
    let oracle = if config.is_configured() {
        Some(OracleClient::new(config))
    } else {
        log::info!("TOGETHER_API_KEY not set; the oracle stays silent");
        None
    };
    let has_oracle = oracle.is_some();

    log::info!("Relic Rush demo starting (seed {seed})");
    let mut session = Session::new(seed, oracle);
    session.input.autopilot = true;
    session.start();

    let mut renderer = LogRenderer::default();
    tokio::select! {
        _ = session.run(&mut renderer) => {}
        _ = tokio::time::sleep(Duration::from_secs(demo_seconds())) => {
            log::info!("Demo time up");
        }
    }

    if has_oracle {
        // Grace period for a late reply to the final consultation
        tokio::time::sleep(Duration::from_secs(2)).await;
        if session.pump() {
            log::info!("Oracle: {}", session.narrative());
        }
    }

    log::info!(
        "Run over: level {}, {} rooms cleared, {} points",
        session.state.player.level,
        session.state.rooms_cleared,
        session.state.player.score,
    );
    Ok(())
}

fn demo_seconds() -> u64 {
    std::env::var("RELIC_RUSH_DEMO_SECS")
        .ok()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(60)
}
