//! One- and two-ply tactical checks run before the search.
//!
//! These short-circuit the search when a win is available and prune root
//! moves that hand the opponent an immediate win.

use games_connect4::GameState;

/// First legal column that wins on the spot for the side to move.
pub fn winning_move(state: &GameState) -> Option<usize> {
    let mover = state.current_player();
    state
        .available_moves()
        .into_iter()
        .find(|&col| state.simulate_move(col).check_win() == Some(mover))
}

/// Whether the opponent has a winning reply after the side to move plays
/// `column`.
pub fn opponent_can_win_after(state: &GameState, column: usize) -> bool {
    let opponent = state.current_player().opponent();
    let board = state.simulate_move(column);

    board.available_moves().into_iter().any(|reply| {
        state.simulate_move_as(&board, reply, opponent).check_win() == Some(opponent)
    })
}

/// Legal columns that leave the opponent no immediate win, ascending.
pub fn safe_moves(state: &GameState) -> Vec<usize> {
    state
        .available_moves()
        .into_iter()
        .filter(|&col| !opponent_can_win_after(state, col))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use games_connect4::Board;

    fn state(s: &str) -> GameState {
        GameState::from_board(s.parse::<Board>().unwrap())
    }

    #[test]
    fn test_winning_move_horizontal() {
        let s = state(
            "
            .......
            .......
            .......
            .......
            .....Y.
            RRR..YY
            ",
        );
        assert_eq!(winning_move(&s), Some(3));
    }

    #[test]
    fn test_winning_move_only_for_side_to_move() {
        // Yellow threatens column 4 but Red is to move
        let s = state(
            "
            .......
            .......
            .......
            .......
            .......
            RYYY.RR
            ",
        );
        assert_eq!(winning_move(&s), None);
        assert!(opponent_can_win_after(&s, 0));
        assert!(!opponent_can_win_after(&s, 4));
    }

    #[test]
    fn test_no_winning_move_on_empty_board() {
        assert_eq!(winning_move(&GameState::new()), None);
        assert_eq!(safe_moves(&GameState::new()), (0..7).collect::<Vec<_>>());
    }

    #[test]
    fn test_safe_moves_single_block() {
        let s = state(
            "
            .......
            .......
            .......
            .......
            .RR....
            RYYY...
            ",
        );
        assert_eq!(safe_moves(&s), vec![4]);
    }

    #[test]
    fn test_safe_moves_avoids_enabling_a_threat_above() {
        // Yellow's row-4 threats at columns 0 and 4 only become playable
        // once those columns have a disc underneath
        let s = state(
            "
            .......
            .......
            .......
            .......
            .YYY..R
            .RRY..R
            ",
        );
        assert!(opponent_can_win_after(&s, 0));
        assert!(opponent_can_win_after(&s, 4));
        assert_eq!(safe_moves(&s), vec![1, 2, 3, 5, 6]);
    }

    #[test]
    fn test_safe_moves_empty_when_loss_is_forced() {
        // Yellow threatens both ends of the bottom row
        let s = state(
            "
            .......
            .......
            .......
            .......
            .R....R
            .YYY..R
            ",
        );
        assert!(safe_moves(&s).is_empty());
    }
}
