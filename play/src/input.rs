//! Parsing of what the human types at the prompts

use games_connect4::{GameState, Player, COLS};
use thiserror::Error;

/// Why a typed column was rejected. The messages are shown verbatim before
/// prompting again.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("Please enter a number.")]
    NotANumber(String),

    #[error("Invalid column. Enter 1-{}.", COLS)]
    OutOfRange(i64),

    #[error("Column full! Try another.")]
    ColumnFull(usize),
}

/// Parse a 1-indexed column typed by the human into a playable 0-indexed
/// column.
pub fn parse_column(line: &str, state: &GameState) -> Result<usize, InputError> {
    let trimmed = line.trim();
    let number: i64 = trimmed
        .parse()
        .map_err(|_| InputError::NotANumber(trimmed.to_string()))?;

    if !(1..=COLS as i64).contains(&number) {
        return Err(InputError::OutOfRange(number));
    }

    let column = (number - 1) as usize;
    if !state.board().has_space(column) {
        return Err(InputError::ColumnFull(column));
    }
    Ok(column)
}

/// "R", "Y", "red" or "yellow" in any case.
pub fn parse_player(s: &str) -> Option<Player> {
    match s.trim().to_ascii_lowercase().as_str() {
        "red" => Some(Player::Red),
        "yellow" => Some(Player::Yellow),
        token => {
            let mut chars = token.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Player::from_symbol(c),
                _ => None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_column_is_one_indexed() {
        let state = GameState::new();
        assert_eq!(parse_column("1", &state), Ok(0));
        assert_eq!(parse_column(" 7 \n", &state), Ok(6));
        assert_eq!(parse_column("+4", &state), Ok(3));
    }

    #[test]
    fn test_parse_column_rejects_non_numbers() {
        let state = GameState::new();
        assert_eq!(
            parse_column("four", &state),
            Err(InputError::NotANumber("four".into()))
        );
        assert!(matches!(parse_column("", &state), Err(InputError::NotANumber(_))));
        assert!(matches!(parse_column("2.5", &state), Err(InputError::NotANumber(_))));
    }

    #[test]
    fn test_parse_column_rejects_out_of_range() {
        let state = GameState::new();
        assert_eq!(parse_column("0", &state), Err(InputError::OutOfRange(0)));
        assert_eq!(parse_column("8", &state), Err(InputError::OutOfRange(8)));
        assert_eq!(parse_column("-3", &state), Err(InputError::OutOfRange(-3)));
    }

    #[test]
    fn test_parse_column_rejects_full_column() {
        let mut state = GameState::new();
        for _ in 0..6 {
            assert!(state.apply_move(2));
        }
        assert_eq!(parse_column("3", &state), Err(InputError::ColumnFull(2)));
        assert_eq!(parse_column("4", &state), Ok(3));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            InputError::NotANumber("x".into()).to_string(),
            "Please enter a number."
        );
        assert_eq!(
            InputError::OutOfRange(9).to_string(),
            "Invalid column. Enter 1-7."
        );
        assert_eq!(
            InputError::ColumnFull(0).to_string(),
            "Column full! Try another."
        );
    }

    #[test]
    fn test_parse_player() {
        assert_eq!(parse_player("R"), Some(Player::Red));
        assert_eq!(parse_player(" y\n"), Some(Player::Yellow));
        assert_eq!(parse_player("Yellow"), Some(Player::Yellow));
        assert_eq!(parse_player("red"), Some(Player::Red));
        assert_eq!(parse_player("RY"), None);
        assert_eq!(parse_player(""), None);
        assert_eq!(parse_player("x"), None);
    }
}
