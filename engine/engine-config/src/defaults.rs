//! Default configuration values loaded from config.defaults.toml.
//!
//! The TOML file is embedded at compile time so the binary, the file shipped
//! next to it and the serde defaults below never disagree.

use once_cell::sync::Lazy;
use serde::Deserialize;

/// The embedded defaults TOML file (loaded at compile time)
const DEFAULTS_TOML: &str = include_str!("../../../config.defaults.toml");

/// Parsed defaults structure (parsed once at first use)
static DEFAULTS: Lazy<DefaultsConfig> = Lazy::new(|| {
    toml::from_str(DEFAULTS_TOML).expect("config.defaults.toml should be valid TOML")
});

// ============================================================================
// Internal structs for parsing config.defaults.toml
// ============================================================================

#[derive(Debug, Deserialize)]
struct DefaultsConfig {
    common: CommonDefaults,
    mcts: MctsDefaults,
    play: PlayDefaults,
    arena: ArenaDefaults,
}

#[derive(Debug, Deserialize)]
struct CommonDefaults {
    log_level: String,
}

#[derive(Debug, Deserialize)]
struct MctsDefaults {
    num_simulations: u32,
    exploration_constant: f64,
    time_limit_ms: u64,
}

#[derive(Debug, Deserialize)]
struct PlayDefaults {
    human_player: String,
    color: bool,
}

#[derive(Debug, Deserialize)]
struct ArenaDefaults {
    games: u32,
    opponent_simulations: u32,
}

// ============================================================================
// Public accessor functions
// ============================================================================

// Common
pub fn log_level() -> &'static str {
    &DEFAULTS.common.log_level
}

// MCTS
pub fn num_simulations() -> u32 {
    DEFAULTS.mcts.num_simulations
}
pub fn exploration_constant() -> f64 {
    DEFAULTS.mcts.exploration_constant
}
pub fn time_limit_ms() -> u64 {
    DEFAULTS.mcts.time_limit_ms
}

// Play
pub fn human_player() -> &'static str {
    &DEFAULTS.play.human_player
}
pub fn color() -> bool {
    DEFAULTS.play.color
}

// Arena
pub fn arena_games() -> u32 {
    DEFAULTS.arena.games
}
pub fn opponent_simulations() -> u32 {
    DEFAULTS.arena.opponent_simulations
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_parse() {
        // Just accessing these will verify the TOML parses correctly
        assert_eq!(log_level(), "warn");
        assert_eq!(human_player(), "R");
        assert!(color());
    }

    #[test]
    fn test_mcts_defaults() {
        assert_eq!(num_simulations(), 1000);
        assert!((exploration_constant() - 1.0).abs() < f64::EPSILON);
        assert_eq!(time_limit_ms(), 0);
    }

    #[test]
    fn test_arena_defaults() {
        assert_eq!(arena_games(), 20);
        assert_eq!(opponent_simulations(), 0);
    }
}
