//! Configuration struct definitions.
//!
//! All config structs with serde deserialization support and default values.

use crate::defaults;
use serde::Deserialize;
use std::time::Duration;

// ============================================================================
// Serde default functions (required for #[serde(default = "...")])
// These call the accessor functions from defaults module
// ============================================================================

fn d_log_level() -> String {
    defaults::log_level().into()
}
fn d_num_sims() -> u32 {
    defaults::num_simulations()
}
fn d_exploration() -> f64 {
    defaults::exploration_constant()
}
fn d_time_limit_ms() -> u64 {
    defaults::time_limit_ms()
}
fn d_human_player() -> String {
    defaults::human_player().into()
}
fn d_color() -> bool {
    defaults::color()
}
fn d_arena_games() -> u32 {
    defaults::arena_games()
}
fn d_opponent_sims() -> u32 {
    defaults::opponent_simulations()
}

// ============================================================================
// Configuration Structs
// ============================================================================

/// Root configuration structure matching config.toml
#[derive(Debug, Deserialize, Default, Clone)]
pub struct CentralConfig {
    #[serde(default)]
    pub common: CommonConfig,
    #[serde(default)]
    pub mcts: MctsConfig,
    #[serde(default)]
    pub play: PlayConfig,
    #[serde(default)]
    pub arena: ArenaConfig,
}

/// Settings shared by every subcommand
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct CommonConfig {
    /// Used when RUST_LOG is unset
    #[serde(default = "d_log_level")]
    pub log_level: String,
}

impl Default for CommonConfig {
    fn default() -> Self {
        Self {
            log_level: defaults::log_level().into(),
        }
    }
}

/// Search settings for the AI player
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct MctsConfig {
    #[serde(default = "d_num_sims")]
    pub num_simulations: u32,
    #[serde(default = "d_exploration")]
    pub exploration_constant: f64,
    /// Wall-clock budget per move in milliseconds (0 = none)
    #[serde(default = "d_time_limit_ms")]
    pub time_limit_ms: u64,
    /// Fixed RNG seed for reproducible games (None = OS entropy)
    #[serde(default)]
    pub seed: Option<u64>,
}

impl MctsConfig {
    pub fn time_limit(&self) -> Option<Duration> {
        (self.time_limit_ms > 0).then(|| Duration::from_millis(self.time_limit_ms))
    }
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            num_simulations: defaults::num_simulations(),
            exploration_constant: defaults::exploration_constant(),
            time_limit_ms: defaults::time_limit_ms(),
            seed: None,
        }
    }
}

/// Interactive game settings
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct PlayConfig {
    /// Token of the human side: "R" or "Y"
    #[serde(default = "d_human_player")]
    pub human_player: String,
    /// Colour the discs with ANSI escapes
    #[serde(default = "d_color")]
    pub color: bool,
}

impl Default for PlayConfig {
    fn default() -> Self {
        Self {
            human_player: defaults::human_player().into(),
            color: defaults::color(),
        }
    }
}

/// Engine-versus-engine evaluation settings
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ArenaConfig {
    #[serde(default = "d_arena_games")]
    pub games: u32,
    /// Simulation budget of the opponent (0 = random player)
    #[serde(default = "d_opponent_sims")]
    pub opponent_simulations: u32,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            games: defaults::arena_games(),
            opponent_simulations: defaults::opponent_simulations(),
        }
    }
}
