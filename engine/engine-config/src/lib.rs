//! Centralized configuration loading from config.toml.
//!
//! This crate provides the configuration structs and loading logic used by
//! the `connect4` binary.
//!
//! # Configuration Priority
//!
//! Settings are loaded with the following priority (highest to lowest):
//! 1. Command-line flags (applied by the binary)
//! 2. Environment variables (`CONNECT4_<SECTION>_<KEY>`)
//! 3. config.toml file
//! 4. Built-in defaults (config.defaults.toml, embedded at compile time)
//!
//! # Environment Variable Override Pattern
//!
//! ```text
//! CONNECT4_<SECTION>_<KEY>=value
//!
//! Examples:
//!     CONNECT4_COMMON_LOG_LEVEL=debug
//!     CONNECT4_MCTS_NUM_SIMULATIONS=5000
//!     CONNECT4_MCTS_SEED=42
//!     CONNECT4_PLAY_HUMAN_PLAYER=Y
//!     CONNECT4_ARENA_GAMES=100
//! ```

mod defaults;
mod loader;
mod structs;

pub use defaults::*;
pub use loader::{
    apply_env_overrides, load_config, load_from_path, CONFIG_ENV_VAR, CONFIG_SEARCH_PATHS,
};
pub use structs::*;
