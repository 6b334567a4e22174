//! Terminal rendering of the board

use colored::Colorize;
use games_connect4::{Board, Player, COLS};

const TITLE: &str = "___CONNECT_4___";
const CLEAR_SCREEN: &str = "\x1B[2J\x1B[H";

#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    color: bool,
    clear: bool,
}

impl Renderer {
    /// `clear` wipes the terminal before each board.
    pub fn new(color: bool, clear: bool) -> Self {
        Self { color, clear }
    }

    /// Uncoloured, non-clearing output.
    #[cfg(test)]
    pub fn plain() -> Self {
        Self::new(false, false)
    }

    /// A player's token, coloured when enabled.
    pub fn disc(&self, player: Player) -> String {
        let token = player.symbol().to_string();
        if !self.color {
            return token;
        }
        match player {
            Player::Red => token.red().to_string(),
            Player::Yellow => token.yellow().to_string(),
        }
    }

    /// Title, one `|R|Y| |` line per row (top first), a divider and the
    /// 1-indexed column footer.
    pub fn render(&self, board: &Board) -> String {
        let width = 2 * COLS + 1;
        let mut out = String::new();
        if self.clear {
            out.push_str(CLEAR_SCREEN);
        }
        out.push_str(TITLE);
        out.push('\n');

        for row in board.rows() {
            out.push('|');
            for cell in row {
                match cell {
                    Some(player) => out.push_str(&self.disc(*player)),
                    None => out.push(' '),
                }
                out.push('|');
            }
            out.push('\n');
        }

        out.push_str(&"-".repeat(width));
        out.push('\n');
        out.push('|');
        for col in 1..=COLS {
            out.push_str(&col.to_string());
            out.push('|');
        }
        out.push('\n');
        out
    }
}
