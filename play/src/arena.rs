//! Engine-versus-opponent matches for measuring search strength.
//!
//! The engine alternates colours every game so neither side keeps the
//! first-move advantage.

use games_connect4::{GameState, Player};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::policy::Policy;

/// Aggregated match results from the engine's point of view.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchStats {
    pub engine: String,
    pub opponent: String,
    pub games: u32,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    /// Wins with the engine moving first
    pub wins_as_red: u32,
    pub total_moves: u64,
}

impl MatchStats {
    pub fn new(engine: String, opponent: String) -> Self {
        Self {
            engine,
            opponent,
            ..Self::default()
        }
    }

    /// Record one finished game.
    pub fn record(&mut self, engine_side: Player, winner: Option<Player>, moves: usize) {
        self.games += 1;
        self.total_moves += moves as u64;
        match winner {
            Some(w) if w == engine_side => {
                self.wins += 1;
                if engine_side == Player::Red {
                    self.wins_as_red += 1;
                }
            }
            Some(_) => self.losses += 1,
            None => self.draws += 1,
        }
    }

    /// Wins count 1, draws 0.5.
    pub fn score(&self) -> f64 {
        if self.games == 0 {
            return 0.0;
        }
        (self.wins as f64 + 0.5 * self.draws as f64) / self.games as f64
    }

    pub fn avg_game_length(&self) -> f64 {
        if self.games == 0 {
            return 0.0;
        }
        self.total_moves as f64 / self.games as f64
    }
}

/// Play a single game and return the winner (None for a draw) and the
/// number of moves made.
pub fn play_game<'a>(
    red: &'a mut dyn Policy,
    yellow: &'a mut dyn Policy,
) -> (Option<Player>, usize) {
    let mut state = GameState::new();

    while !state.is_terminal() {
        let policy = match state.current_player() {
            Player::Red => &mut *red,
            Player::Yellow => &mut *yellow,
        };
        let Some(column) = policy.select_move(&state) else {
            break;
        };
        if !state.apply_move(column) {
            // A policy that returns an unplayable column forfeits
            debug!(column, player = %state.current_player(), "Illegal move");
            return (Some(state.current_player().opponent()), state.turn());
        }
    }

    (state.check_terminal_state(), state.turn())
}

/// Play `games` games between `engine` and `opponent`, alternating colours.
pub fn play_match(engine: &mut dyn Policy, opponent: &mut dyn Policy, games: u32) -> MatchStats {
    let mut stats = MatchStats::new(engine.name(), opponent.name());

    for game in 0..games {
        let engine_side = if game % 2 == 0 { Player::Red } else { Player::Yellow };
        let (winner, moves) = match engine_side {
            Player::Red => play_game(engine, opponent),
            Player::Yellow => play_game(opponent, engine),
        };
        stats.record(engine_side, winner, moves);

        info!(
            game = game + 1,
            engine_side = %engine_side,
            winner = ?winner,
            moves,
            "Arena game finished"
        );
    }

    stats
}
