//! Connect 4 game state for the MCTS engine
//!
//! Connect 4 is a two-player connection game where players drop colored discs
//! into a 7-column, 6-row vertically suspended grid. The objective is to be
//! the first to form a horizontal, vertical, or diagonal line of four discs.
//!
//! # Board Layout
//!
//! The board is stored row by row with row 0 at the top, so a disc dropped
//! into an empty column lands in row 5:
//! ```text
//! Row 0: [ ][ ][ ][ ][ ][ ][ ]  <- Top
//! Row 1: [ ][ ][ ][ ][ ][ ][ ]
//! Row 2: [ ][ ][ ][ ][ ][ ][ ]
//! Row 3: [ ][ ][ ][ ][ ][ ][ ]
//! Row 4: [ ][ ][ ][ ][ ][ ][ ]
//! Row 5: [ ][ ][ ][ ][ ][ ][ ]  <- Bottom
//!        Col 0  1  2  3  4  5  6
//! ```
//!
//! # Usage
//!
//! ```rust
//! use games_connect4::{GameState, Outcome, Player};
//!
//! let mut state = GameState::new();
//! assert!(state.apply_move(3));
//! assert_eq!(state.current_player(), Player::Yellow);
//! assert_eq!(state.outcome(), Outcome::InProgress);
//! ```

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Board dimensions
pub const COLS: usize = 7;
pub const ROWS: usize = 6;

/// Discs in a line needed to win
pub const CONNECT: usize = 4;

/// One of the two sides. Red always moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    Red,
    Yellow,
}

impl Player {
    /// The other side.
    #[inline]
    pub fn opponent(self) -> Player {
        match self {
            Player::Red => Player::Yellow,
            Player::Yellow => Player::Red,
        }
    }

    /// Single-character token used in text boards.
    pub fn symbol(self) -> char {
        match self {
            Player::Red => 'R',
            Player::Yellow => 'Y',
        }
    }

    /// Parse a token character (case-insensitive).
    pub fn from_symbol(c: char) -> Option<Player> {
        match c.to_ascii_uppercase() {
            'R' => Some(Player::Red),
            'Y' => Some(Player::Yellow),
            _ => None,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::Red => f.write_str("Red"),
            Player::Yellow => f.write_str("Yellow"),
        }
    }
}

/// A board cell: `None` is empty.
pub type Cell = Option<Player>;

/// Reasons a move can be rejected.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum MoveError {
    #[error("Column {0} is out of range (0-{max})", max = COLS - 1)]
    OutOfRange(usize),

    #[error("Column {0} is full")]
    ColumnFull(usize),
}

/// Errors from parsing a text board.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("Expected {expected} rows, got {0}", expected = ROWS)]
    InvalidRowCount(usize),

    #[error("Row {row} has {len} cells, expected {expected}", expected = COLS)]
    InvalidRowLength { row: usize, len: usize },

    #[error("Invalid cell '{ch}' at row {row}, column {col}")]
    InvalidCell { ch: char, row: usize, col: usize },

    #[error("Floating piece at row {row}, column {col}")]
    FloatingPiece { row: usize, col: usize },
}

/// Final or ongoing result of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    InProgress,
    Win(Player),
    Draw,
}

/// Direction vectors as (row step, col step): horizontal, vertical,
/// diagonal down-right, diagonal up-right
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (-1, 1)];

/// The 6x7 grid. `Board` is `Copy`, so every assignment is an independent
/// snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Board {
    cells: [[Cell; COLS]; ROWS],
}

impl Board {
    /// Create an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row][col]
    }

    /// Read-only access to all rows, top row first.
    pub fn rows(&self) -> &[[Cell; COLS]; ROWS] {
        &self.cells
    }

    /// Whether a disc can still be dropped into `col`.
    #[inline]
    pub fn has_space(&self, col: usize) -> bool {
        col < COLS && self.cells[0][col].is_none()
    }

    /// Columns with an empty top cell, ascending.
    pub fn available_moves(&self) -> Vec<usize> {
        (0..COLS).filter(|&col| self.has_space(col)).collect()
    }

    pub fn is_full(&self) -> bool {
        self.cells[0].iter().all(Option::is_some)
    }

    /// Number of discs on the board.
    pub fn piece_count(&self) -> usize {
        self.cells
            .iter()
            .flat_map(|row| row.iter())
            .filter(|cell| cell.is_some())
            .count()
    }

    /// Row a disc dropped into `col` would land in.
    pub fn landing_row(&self, col: usize) -> Option<usize> {
        if col >= COLS {
            return None;
        }
        (0..ROWS).rev().find(|&row| self.cells[row][col].is_none())
    }

    /// Drop a disc in place and return the row it landed in.
    fn drop_piece(&mut self, col: usize, player: Player) -> Option<usize> {
        let row = self.landing_row(col)?;
        self.cells[row][col] = Some(player);
        Some(row)
    }

    /// Return a copy with `player`'s disc dropped into `col`.
    ///
    /// A full or out-of-range column yields an unchanged copy.
    pub fn with_move(&self, col: usize, player: Player) -> Board {
        let mut next = *self;
        next.drop_piece(col, player);
        next
    }

    /// Scan every 4-cell window in all four orientations and return the
    /// owner of a winning line, if any.
    pub fn check_win(&self) -> Option<Player> {
        for (dr, dc) in DIRECTIONS {
            for row in 0..ROWS {
                for col in 0..COLS {
                    if let Some(player) = self.line_owner(row, col, dr, dc) {
                        return Some(player);
                    }
                }
            }
        }
        None
    }

    /// Owner of the window starting at (row, col) in direction (dr, dc), if
    /// it fits on the board and all four cells match.
    fn line_owner(&self, row: usize, col: usize, dr: isize, dc: isize) -> Option<Player> {
        let player = self.cells[row][col]?;
        for step in 1..CONNECT as isize {
            let r = row as isize + dr * step;
            let c = col as isize + dc * step;
            if !Self::in_bounds(r, c) || self.cells[r as usize][c as usize] != Some(player) {
                return None;
            }
        }
        Some(player)
    }

    /// Check whether the disc at (row, col) is part of a winning line.
    fn wins_through(&self, row: usize, col: usize) -> bool {
        let Some(player) = self.cells[row][col] else {
            return false;
        };

        DIRECTIONS.iter().any(|&(dr, dc)| {
            let count = 1
                + self.run_length(row, col, dr, dc, player)
                + self.run_length(row, col, -dr, -dc, player);
            count >= CONNECT
        })
    }

    /// Count consecutive `player` discs from (row, col), exclusive.
    fn run_length(&self, row: usize, col: usize, dr: isize, dc: isize, player: Player) -> usize {
        let (mut r, mut c) = (row as isize + dr, col as isize + dc);
        let mut count = 0;
        while Self::in_bounds(r, c) && self.cells[r as usize][c as usize] == Some(player) {
            count += 1;
            r += dr;
            c += dc;
        }
        count
    }

    #[inline]
    fn in_bounds(r: isize, c: isize) -> bool {
        r >= 0 && r < ROWS as isize && c >= 0 && c < COLS as isize
    }
}

/// Six lines of `.`, `R` or `Y`, top row first.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.cells.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for cell in row {
                let ch = cell.map_or('.', Player::symbol);
                write!(f, "{}", ch)?;
            }
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = BoardError;

    /// Parse the `Display` format. Blank lines and surrounding whitespace
    /// are ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lines: Vec<&str> = s
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();

        if lines.len() != ROWS {
            return Err(BoardError::InvalidRowCount(lines.len()));
        }

        let mut board = Board::new();
        for (row, line) in lines.iter().enumerate() {
            let chars: Vec<char> = line.chars().collect();
            if chars.len() != COLS {
                return Err(BoardError::InvalidRowLength {
                    row,
                    len: chars.len(),
                });
            }
            for (col, &ch) in chars.iter().enumerate() {
                board.cells[row][col] = match ch {
                    '.' => None,
                    _ => Some(
                        Player::from_symbol(ch).ok_or(BoardError::InvalidCell { ch, row, col })?,
                    ),
                };
            }
        }

        // Gravity: nothing may sit above an empty cell
        for col in 0..COLS {
            for row in 0..ROWS - 1 {
                if board.cells[row][col].is_some() && board.cells[row + 1][col].is_none() {
                    return Err(BoardError::FloatingPiece { row, col });
                }
            }
        }

        Ok(board)
    }
}

/// Connect 4 game state
///
/// Owns the board, the turn index and the ordered pair of player tokens.
/// The side to move is `players[turn % 2]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    /// Moves played so far
    turn: usize,
    players: [Player; 2],
    /// Set once a line of four exists or the board is full
    terminal: bool,
}

impl GameState {
    /// Create a new initial game state
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            turn: 0,
            players: [Player::Red, Player::Yellow],
            terminal: false,
        }
    }

    /// Build a state from an arbitrary position.
    ///
    /// The turn index is the number of discs on the board, so Red is to move
    /// whenever both sides have the same number of discs.
    pub fn from_board(board: Board) -> Self {
        Self {
            board,
            turn: board.piece_count(),
            players: [Player::Red, Player::Yellow],
            terminal: board.check_win().is_some() || board.is_full(),
        }
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn turn(&self) -> usize {
        self.turn
    }

    pub fn players(&self) -> [Player; 2] {
        self.players
    }

    /// Player whose turn it is
    #[inline]
    pub fn current_player(&self) -> Player {
        self.players[self.turn % 2]
    }

    /// Player who made the previous move (Yellow before the first move)
    #[inline]
    pub fn last_player(&self) -> Player {
        self.players[(self.turn + 1) % 2]
    }

    /// Whether the game has ended by a win or a full board
    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.terminal
    }

    /// Columns with an empty top cell, ascending. Empty means the board is
    /// full and the state is terminal.
    pub fn available_moves(&self) -> Vec<usize> {
        self.board.available_moves()
    }

    /// Drop the current player's disc into `column`.
    ///
    /// Returns the row the disc landed in. On error nothing changes.
    pub fn try_move(&mut self, column: usize) -> Result<usize, MoveError> {
        if column >= COLS {
            return Err(MoveError::OutOfRange(column));
        }

        let player = self.current_player();
        let row = self
            .board
            .drop_piece(column, player)
            .ok_or(MoveError::ColumnFull(column))?;
        self.turn += 1;

        if self.board.wins_through(row, column) || self.board.is_full() {
            self.terminal = true;
        }

        Ok(row)
    }

    /// Boolean form of [`try_move`](Self::try_move).
    pub fn apply_move(&mut self, column: usize) -> bool {
        self.try_move(column).is_ok()
    }

    /// Board after the current player drops into `column`. Nothing is
    /// mutated and the turn does not advance.
    pub fn simulate_move(&self, column: usize) -> Board {
        self.board.with_move(column, self.current_player())
    }

    /// Board after `player` drops into `column` on `board`.
    pub fn simulate_move_as(&self, board: &Board, column: usize, player: Player) -> Board {
        board.with_move(column, player)
    }

    /// Winner on an arbitrary board.
    pub fn check_win(board: &Board) -> Option<Player> {
        board.check_win()
    }

    /// Winner on the live board; marks the state terminal when there is one.
    pub fn check_terminal_state(&mut self) -> Option<Player> {
        let winner = self.board.check_win();
        if winner.is_some() {
            self.terminal = true;
        }
        winner
    }

    /// A line of four takes precedence over a full board.
    pub fn outcome(&self) -> Outcome {
        match self.board.check_win() {
            Some(player) => Outcome::Win(player),
            None if self.board.is_full() => Outcome::Draw,
            None => Outcome::InProgress,
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests;
