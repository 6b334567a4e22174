//! Interactive human-versus-AI game loop
//!
//! The session reads from any `BufRead` and writes to any `Write`, so the
//! binary drives it with the terminal and the tests with in-memory buffers.

use std::io::{BufRead, Write};

use anyhow::{bail, Result};
use games_connect4::{GameState, Player};
use tracing::{debug, info, warn};

use crate::display::Renderer;
use crate::input::{parse_column, parse_player};
use crate::policy::Policy;

/// How an interactive game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameSummary {
    /// None for a draw
    pub winner: Option<Player>,
    pub moves: usize,
}

pub struct Session<R, W> {
    input: R,
    output: W,
    renderer: Renderer,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(input: R, output: W, renderer: Renderer) -> Self {
        Self {
            input,
            output,
            renderer,
        }
    }

    /// Ask which side the human wants. An empty answer picks `default`,
    /// anything unrecognised picks Red.
    pub fn choose_side(&mut self, default: Player) -> Result<Player> {
        write!(
            self.output,
            "Do you want to play as Red (First) or Yellow (Second)? (R/Y) [{}]: ",
            default.symbol()
        )?;
        self.output.flush()?;

        let answer = self.read_line()?;
        if answer.trim().is_empty() {
            return Ok(default);
        }
        Ok(parse_player(&answer).unwrap_or(Player::Red))
    }

    /// Play one game from the initial position with `human` against `ai`.
    pub fn play(&mut self, human: Player, ai: &mut dyn Policy) -> Result<GameSummary> {
        let ai_player = human.opponent();
        writeln!(self.output, "Welcome to Connect 4 vs AI!")?;
        writeln!(self.output, "Using {} as the AI.", ai.name())?;
        writeln!(
            self.output,
            "You are {}. AI is {}.",
            self.renderer.disc(human),
            self.renderer.disc(ai_player)
        )?;
        info!(human = %human, ai = %ai.name(), "Game started");

        let mut state = GameState::new();

        while !state.is_terminal() {
            self.show(&state)?;

            if state.current_player() == human {
                let column = self.read_human_move(&state, human)?;
                if !state.apply_move(column) {
                    bail!("column {} could not be played", column + 1);
                }
                debug!(column, "Human moved");
            } else {
                writeln!(
                    self.output,
                    "AI ({}) is thinking...",
                    self.renderer.disc(ai_player)
                )?;
                self.output.flush()?;

                let Some(column) = ai.select_move(&state) else {
                    writeln!(self.output, "No valid moves for AI. It's a draw.")?;
                    return self.finish(&state, None);
                };
                if !state.apply_move(column) {
                    // Same rule as the arena: an unplayable column forfeits
                    warn!(column, "AI chose an unplayable column");
                    writeln!(self.output, "AI chose an unplayable column. You win!")?;
                    return self.finish(&state, Some(human));
                }
                debug!(column, "AI moved");
            }

            if let Some(winner) = state.check_terminal_state() {
                self.show(&state)?;
                writeln!(
                    self.output,
                    "Game Over! Winner: {}",
                    self.renderer.disc(winner)
                )?;
                if winner == human {
                    writeln!(self.output, "Congratulations! You won!")?;
                } else {
                    writeln!(self.output, "AI won. Better luck next time!")?;
                }
                return self.finish(&state, Some(winner));
            }
        }

        self.show(&state)?;
        writeln!(self.output, "Game Over! It's a draw.")?;
        self.finish(&state, None)
    }

    /// Prompt until the human types a playable column.
    fn read_human_move(&mut self, state: &GameState, human: Player) -> Result<usize> {
        loop {
            write!(
                self.output,
                "Your turn ({}). Enter column (1-7): ",
                self.renderer.disc(human)
            )?;
            self.output.flush()?;

            let line = self.read_line()?;
            match parse_column(&line, state) {
                Ok(column) => return Ok(column),
                Err(e) => writeln!(self.output, "{}", e)?,
            }
        }
    }

    fn read_line(&mut self) -> Result<String> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            bail!("input closed before the game finished");
        }
        Ok(line)
    }

    fn show(&mut self, state: &GameState) -> Result<()> {
        write!(self.output, "{}", self.renderer.render(state.board()))?;
        Ok(())
    }

    fn finish(&mut self, state: &GameState, winner: Option<Player>) -> Result<GameSummary> {
        self.output.flush()?;
        let summary = GameSummary {
            winner,
            moves: state.turn(),
        };
        info!(winner = ?summary.winner, moves = summary.moves, "Game finished");
        Ok(summary)
    }
}
