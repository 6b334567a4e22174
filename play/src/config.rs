//! Command-line configuration for the connect4 binary
//!
//! Configuration is loaded from config.toml with environment variable overrides.
//! CLI arguments take highest priority, followed by env vars, then config.toml.

use std::time::Duration;

use anyhow::{anyhow, Result};
use clap::{Args, Parser, Subcommand};
use engine_config::{load_config, CentralConfig};
use games_connect4::Player;
use mcts::MctsConfig;
use once_cell::sync::Lazy;
use tracing::level_filters::LevelFilter;

use crate::input::parse_player;

// Load central config once at startup
static CENTRAL_CONFIG: Lazy<CentralConfig> = Lazy::new(load_config);

// Default value functions that read from central config
fn default_log_level() -> String {
    CENTRAL_CONFIG.common.log_level.clone()
}

fn default_num_simulations() -> u32 {
    CENTRAL_CONFIG.mcts.num_simulations
}

fn default_exploration() -> f64 {
    CENTRAL_CONFIG.mcts.exploration_constant
}

fn default_time_limit_ms() -> u64 {
    CENTRAL_CONFIG.mcts.time_limit_ms
}

fn default_games() -> u32 {
    CENTRAL_CONFIG.arena.games
}

fn default_opponent_simulations() -> u32 {
    CENTRAL_CONFIG.arena.opponent_simulations
}

#[derive(Parser, Debug, Clone)]
#[command(name = "connect4")]
#[command(about = "Connect 4 against a Monte Carlo Tree Search opponent")]
#[command(
    long_about = "Play Connect 4 in the terminal against an MCTS engine, or pit the engine
against a weaker opponent to measure its strength.

Configuration is loaded from config.toml with environment variable overrides.
CLI arguments take highest priority."
)]
pub struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value_t = default_log_level())]
    pub log_level: String,

    #[command(flatten)]
    pub search: SearchArgs,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Play an interactive game (the default)
    Play(PlayArgs),
    /// Play the engine against a weaker opponent and report the results
    Arena(ArenaArgs),
}

/// Search settings shared by every subcommand
#[derive(Args, Debug, Clone)]
pub struct SearchArgs {
    /// Number of MCTS simulations per move
    #[arg(long, global = true, default_value_t = default_num_simulations())]
    pub simulations: u32,

    /// UCT exploration constant
    #[arg(long, global = true, default_value_t = default_exploration())]
    pub exploration: f64,

    /// Wall-clock limit per move in milliseconds (0 to disable)
    #[arg(long, global = true, default_value_t = default_time_limit_ms())]
    pub time_limit_ms: u64,

    /// Seed for reproducible games
    #[arg(long, global = true)]
    pub seed: Option<u64>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct PlayArgs {
    /// Side for the human player: R (moves first) or Y. Asked for when omitted.
    #[arg(long)]
    pub human: Option<String>,

    /// Disable coloured discs
    #[arg(long)]
    pub no_color: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ArenaArgs {
    /// Number of games to play
    #[arg(long, default_value_t = default_games())]
    pub games: u32,

    /// Simulation budget of the opponent (0 for a random player)
    #[arg(long, default_value_t = default_opponent_simulations())]
    pub opponent_simulations: u32,

    /// Print the results as JSON
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    pub fn validate(&self) -> Result<()> {
        if self.log_level.parse::<LevelFilter>().is_err() {
            return Err(anyhow!(
                "invalid log level '{}', expected one of trace, debug, info, warn, error",
                self.log_level
            ));
        }

        self.search.validate()?;

        match &self.command {
            Some(Command::Play(args)) => args.validate(),
            Some(Command::Arena(args)) => args.validate(),
            None => Ok(()),
        }
    }

    /// The subcommand to run, defaulting to an interactive game.
    pub fn command(&self) -> Command {
        self.command
            .clone()
            .unwrap_or_else(|| Command::Play(PlayArgs::default()))
    }
}

impl SearchArgs {
    pub fn validate(&self) -> Result<()> {
        if self.simulations == 0 {
            return Err(anyhow!("simulations must be greater than 0"));
        }

        if !self.exploration.is_finite() || self.exploration < 0.0 {
            return Err(anyhow!(
                "exploration must be a non-negative number, got {}",
                self.exploration
            ));
        }

        Ok(())
    }

    pub fn time_limit(&self) -> Option<Duration> {
        (self.time_limit_ms > 0).then(|| Duration::from_millis(self.time_limit_ms))
    }

    pub fn mcts_config(&self) -> MctsConfig {
        let config = MctsConfig::new(self.simulations, self.exploration);
        match self.time_limit() {
            Some(limit) => config.with_time_limit(limit),
            None => config,
        }
    }

    /// CLI seed, falling back to the configured one.
    pub fn seed(&self) -> Option<u64> {
        self.seed.or(CENTRAL_CONFIG.mcts.seed)
    }
}

impl PlayArgs {
    pub fn validate(&self) -> Result<()> {
        if let Some(human) = &self.human {
            if parse_player(human).is_none() {
                return Err(anyhow!("human must be R or Y, got '{}'", human));
            }
        }
        Ok(())
    }

    /// Side given with --human, if any.
    pub fn human_player(&self) -> Option<Player> {
        self.human.as_deref().and_then(parse_player)
    }

    pub fn use_color(&self) -> bool {
        !self.no_color && CENTRAL_CONFIG.play.color
    }
}

/// Side offered when the human just presses enter at the side prompt.
pub fn default_human_player() -> Player {
    parse_player(&CENTRAL_CONFIG.play.human_player).unwrap_or(Player::Red)
}

impl ArenaArgs {
    pub fn validate(&self) -> Result<()> {
        if self.games == 0 {
            return Err(anyhow!("games must be greater than 0"));
        }
        Ok(())
    }
}
