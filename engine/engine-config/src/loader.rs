//! Configuration loading logic.
//!
//! Handles loading config from files and applying environment variable overrides.

use crate::CentralConfig;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "CONNECT4_CONFIG";

/// Standard locations to search for config.toml
pub const CONFIG_SEARCH_PATHS: &[&str] = &[
    "config.toml",    // Current directory
    "../config.toml", // Parent directory (when running from subdirectory)
];

/// Load the central configuration from config.toml.
///
/// Searches for config.toml in the following order:
/// 1. Path specified by the CONNECT4_CONFIG environment variable
/// 2. Current directory (config.toml)
/// 3. Parent directory (../config.toml)
///
/// After loading, environment variable overrides are applied.
pub fn load_config() -> CentralConfig {
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        let path = PathBuf::from(&path);
        if path.exists() {
            info!("Loading config from {}: {}", CONFIG_ENV_VAR, path.display());
            return load_from_path(&path);
        }
        warn!(
            "{}={} not found, searching defaults",
            CONFIG_ENV_VAR,
            path.display()
        );
    }

    for path_str in CONFIG_SEARCH_PATHS {
        let path = Path::new(path_str);
        if path.exists() {
            info!("Loading config from {}", path.display());
            return load_from_path(path);
        }
    }

    debug!("No config.toml found, using built-in defaults");
    apply_env_overrides(CentralConfig::default())
}

/// Load configuration from a specific path.
///
/// Unreadable or malformed files fall back to the built-in defaults.
pub fn load_from_path(path: &Path) -> CentralConfig {
    match std::fs::read_to_string(path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(config) => apply_env_overrides(config),
            Err(e) => {
                warn!("Failed to parse {}: {}, using defaults", path.display(), e);
                apply_env_overrides(CentralConfig::default())
            }
        },
        Err(e) => {
            warn!("Failed to read {}: {}, using defaults", path.display(), e);
            apply_env_overrides(CentralConfig::default())
        }
    }
}

/// Macro to reduce env override boilerplate
macro_rules! env_override {
    // String field
    ($config:expr, $section:ident . $field:ident, $key:expr) => {
        if let Ok(v) = std::env::var($key) {
            $config.$section.$field = v;
        }
    };
    // Parseable field (u32, f64, bool, etc.)
    ($config:expr, $section:ident . $field:ident, $key:expr, parse) => {
        match std::env::var($key).map(|s| s.parse()) {
            Ok(Ok(v)) => $config.$section.$field = v,
            Ok(Err(_)) => warn!("Ignoring unparseable {}", $key),
            Err(_) => {}
        }
    };
    // Optional parseable field (Option<u64>, etc.)
    ($config:expr, $section:ident . $field:ident, $key:expr, optional_parse) => {
        match std::env::var($key).map(|s| s.parse()) {
            Ok(Ok(v)) => $config.$section.$field = Some(v),
            Ok(Err(_)) => warn!("Ignoring unparseable {}", $key),
            Err(_) => {}
        }
    };
}

/// Apply environment variable overrides to a configuration.
///
/// Environment variables follow the pattern: CONNECT4_<SECTION>_<KEY>
pub fn apply_env_overrides(mut config: CentralConfig) -> CentralConfig {
    // Common
    env_override!(config, common.log_level, "CONNECT4_COMMON_LOG_LEVEL");

    // MCTS
    env_override!(
        config,
        mcts.num_simulations,
        "CONNECT4_MCTS_NUM_SIMULATIONS",
        parse
    );
    env_override!(
        config,
        mcts.exploration_constant,
        "CONNECT4_MCTS_EXPLORATION_CONSTANT",
        parse
    );
    env_override!(
        config,
        mcts.time_limit_ms,
        "CONNECT4_MCTS_TIME_LIMIT_MS",
        parse
    );
    env_override!(config, mcts.seed, "CONNECT4_MCTS_SEED", optional_parse);

    // Play
    env_override!(config, play.human_player, "CONNECT4_PLAY_HUMAN_PLAYER");
    env_override!(config, play.color, "CONNECT4_PLAY_COLOR", parse);

    // Arena
    env_override!(config, arena.games, "CONNECT4_ARENA_GAMES", parse);
    env_override!(
        config,
        arena.opponent_simulations,
        "CONNECT4_ARENA_OPPONENT_SIMULATIONS",
        parse
    );

    config
}
