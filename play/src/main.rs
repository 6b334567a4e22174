//! connect4 - Connect 4 against a Monte Carlo Tree Search opponent
//!
//! Subcommands:
//! 1. `play` (default): an interactive game in the terminal
//! 2. `arena`: the engine against a random or weaker MCTS opponent

use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

mod arena;
mod config;
mod display;
mod input;
mod policy;
mod session;

use crate::config::{default_human_player, ArenaArgs, Cli, Command, PlayArgs};
use crate::display::Renderer;
use crate::policy::{MctsPolicy, Policy, RandomPolicy};
use crate::session::Session;

fn init_tracing(level: &str) -> Result<()> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // stderr keeps log lines out of the rendered board
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();

    Ok(())
}

fn run_play(cli: &Cli, args: &PlayArgs) -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let renderer = Renderer::new(args.use_color(), true);
    let mut session = Session::new(stdin.lock(), stdout.lock(), renderer);

    let human = match args.human_player() {
        Some(player) => player,
        None => session.choose_side(default_human_player())?,
    };

    let mut ai = MctsPolicy::new(cli.search.mcts_config(), cli.search.seed());
    let summary = session.play(human, &mut ai)?;

    info!(
        winner = ?summary.winner,
        moves = summary.moves,
        "Session finished"
    );
    Ok(())
}

fn run_arena(cli: &Cli, args: &ArenaArgs) -> Result<()> {
    let config = cli.search.mcts_config();
    let seed = cli.search.seed();

    let mut engine = MctsPolicy::new(config.clone(), seed);
    let opponent_seed = seed.map(|s| s.wrapping_add(1));
    let mut opponent: Box<dyn Policy> = if args.opponent_simulations == 0 {
        Box::new(match opponent_seed {
            Some(s) => RandomPolicy::with_seed(s),
            None => RandomPolicy::new(),
        })
    } else {
        Box::new(MctsPolicy::new(
            config.with_simulations(args.opponent_simulations),
            opponent_seed,
        ))
    };

    info!(
        engine = %engine.name(),
        opponent = %opponent.name(),
        games = args.games,
        "Starting arena"
    );
    let stats = arena::play_match(&mut engine, opponent.as_mut(), args.games);

    if args.json {
        let json = serde_json::to_string_pretty(&stats).context("serializing match stats")?;
        println!("{}", json);
    } else {
        println!("{} vs {} over {} games", stats.engine, stats.opponent, stats.games);
        println!(
            "  wins {} (as Red {}), losses {}, draws {}",
            stats.wins, stats.wins_as_red, stats.losses, stats.draws
        );
        println!(
            "  score {:.3}, average length {:.1} moves",
            stats.score(),
            stats.avg_game_length()
        );
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.validate()?;

    init_tracing(&cli.log_level)?;
    info!(log_level = %cli.log_level, "Tracing initialized");

    match cli.command() {
        Command::Play(args) => run_play(&cli, &args),
        Command::Arena(args) => run_arena(&cli, &args),
    }
}
