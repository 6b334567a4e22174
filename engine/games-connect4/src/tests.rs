use super::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

fn board(s: &str) -> Board {
    s.parse().expect("test board should parse")
}

#[test]
fn test_initial_state() {
    let state = GameState::new();
    assert_eq!(*state.board(), Board::new());
    assert_eq!(state.turn(), 0);
    assert_eq!(state.players(), [Player::Red, Player::Yellow]);
    assert_eq!(state.current_player(), Player::Red);
    assert!(!state.is_terminal());
    assert_eq!(state.outcome(), Outcome::InProgress);
}

#[test]
fn test_available_moves() {
    let state = GameState::new();
    assert_eq!(state.available_moves(), (0..COLS).collect::<Vec<_>>());

    let mut state = state;
    assert!(state.apply_move(3));
    assert_eq!(state.available_moves().len(), COLS);
}

#[test]
fn test_apply_move_lands_at_bottom() {
    let mut state = GameState::new();
    assert_eq!(state.try_move(3), Ok(ROWS - 1));

    assert_eq!(state.board().get(ROWS - 1, 3), Some(Player::Red));
    assert_eq!(state.turn(), 1);
    assert_eq!(state.current_player(), Player::Yellow);
    assert_eq!(state.last_player(), Player::Red);

    // Yellow stacks on top
    assert_eq!(state.try_move(3), Ok(ROWS - 2));
    assert_eq!(state.board().get(ROWS - 2, 3), Some(Player::Yellow));
}

#[test]
fn test_stacking_fills_column() {
    let mut state = GameState::new();

    for i in 0..ROWS {
        assert!(state.apply_move(0));
        assert_eq!(state.board().landing_row(0), (i + 1 < ROWS).then(|| ROWS - 2 - i));
    }

    assert!(!state.available_moves().contains(&0));
    assert!(!state.board().has_space(0));
}

#[test]
fn test_full_column_is_rejected_without_mutation() {
    let mut state = GameState::new();
    for _ in 0..ROWS {
        state.apply_move(0);
    }

    let before = state.clone();
    assert_eq!(state.try_move(0), Err(MoveError::ColumnFull(0)));
    assert!(!state.apply_move(0));
    assert_eq!(before, state);
}

#[test]
fn test_out_of_range_is_rejected_without_mutation() {
    let mut state = GameState::new();
    let before = state.clone();
    assert_eq!(state.try_move(COLS), Err(MoveError::OutOfRange(COLS)));
    assert!(!state.apply_move(99));
    assert_eq!(before, state);
}

#[test]
fn test_horizontal_win() {
    let mut state = GameState::new();

    // Red: 0, 1, 2, 3 (bottom row), Yellow stacks on top of them
    for col in [0, 0, 1, 1, 2, 2] {
        state.apply_move(col);
    }
    assert!(!state.is_terminal());
    state.apply_move(3);

    assert!(state.is_terminal());
    assert_eq!(state.check_terminal_state(), Some(Player::Red));
    assert_eq!(state.outcome(), Outcome::Win(Player::Red));
}

#[test]
fn test_vertical_win() {
    let mut state = GameState::new();

    for col in [0, 1, 0, 1, 0, 1, 0] {
        state.apply_move(col);
    }

    assert!(state.is_terminal());
    assert_eq!(state.check_terminal_state(), Some(Player::Red));
}

#[test]
fn test_diagonal_win_ascending() {
    let b = board(
        "
        .......
        .......
        ...R...
        ..RY...
        .RYY...
        RYYR...
        ",
    );
    assert_eq!(b.check_win(), Some(Player::Red));
}

#[test]
fn test_diagonal_win_descending() {
    let b = board(
        "
        .......
        .......
        Y......
        RY.....
        RRY....
        RRYY...
        ",
    );
    assert_eq!(b.check_win(), Some(Player::Yellow));
}

#[test]
fn test_diagonal_win_detected_on_move() {
    let mut state = GameState::new();

    // Red builds (5,0) (4,1) (3,2) (2,3) going up to the right
    for col in [0, 1, 1, 2, 2, 3, 2, 3, 3, 6, 3] {
        assert!(state.apply_move(col));
    }

    assert_eq!(state.outcome(), Outcome::Win(Player::Red));
    assert!(state.is_terminal());
}

#[test]
fn test_three_in_a_row_is_not_a_win() {
    let b = board(
        "
        .......
        .......
        .......
        .......
        YYY....
        RRR....
        ",
    );
    assert_eq!(b.check_win(), None);
}

#[test]
fn test_empty_board_has_no_winner() {
    assert_eq!(Board::new().check_win(), None);
    assert_eq!(GameState::check_win(&Board::new()), None);
}

#[test]
fn test_draw_board() {
    // Pattern that avoids 4-in-a-row on a full board
    let b = board(
        "
        RYRYRYR
        RYRYRYR
        YRYRYRY
        YRYRYRY
        RYRYRYR
        RYRYRYR
        ",
    );

    assert!(b.is_full());
    assert_eq!(b.check_win(), None);

    let mut state = GameState::from_board(b);
    assert!(state.is_terminal());
    assert!(state.available_moves().is_empty());
    assert_eq!(state.check_terminal_state(), None);
    assert_eq!(state.outcome(), Outcome::Draw);
}

#[test]
fn test_win_takes_precedence_over_full_board() {
    let b = board(
        "
        RYRYRYR
        RYRYRYR
        YRYRYRY
        YRYRYRY
        RYRYRYR
        RRRRYYY
        ",
    );

    assert!(b.is_full());
    assert_eq!(GameState::from_board(b).outcome(), Outcome::Win(Player::Red));
}

#[test]
fn test_simulate_move_is_pure() {
    let mut state = GameState::new();
    state.apply_move(2);
    let before = state.clone();

    let first = state.simulate_move(4);
    let second = state.simulate_move(4);

    assert_eq!(first, second);
    assert_eq!(state, before);
    assert_eq!(first.get(ROWS - 1, 4), Some(Player::Yellow));
    assert_eq!(state.board().get(ROWS - 1, 4), None);
}

#[test]
fn test_simulate_move_as_uses_given_board_and_player() {
    let state = GameState::new();
    let base = state.simulate_move(0);
    let next = state.simulate_move_as(&base, 0, Player::Yellow);

    assert_eq!(base.get(ROWS - 1, 0), Some(Player::Red));
    assert_eq!(base.get(ROWS - 2, 0), None);
    assert_eq!(next.get(ROWS - 2, 0), Some(Player::Yellow));
    assert_eq!(state.turn(), 0);
}

#[test]
fn test_simulate_move_on_full_column_returns_copy() {
    let mut state = GameState::new();
    for _ in 0..ROWS {
        state.apply_move(5);
    }
    assert_eq!(state.simulate_move(5), *state.board());
}

#[test]
fn test_copy_is_independent() {
    let mut original = GameState::new();
    original.apply_move(3);

    let mut copy = original.clone();
    copy.apply_move(3);
    copy.apply_move(4);

    assert_eq!(original.turn(), 1);
    assert_eq!(original.board().get(ROWS - 2, 3), None);
    assert_eq!(copy.turn(), 3);
}

#[test]
fn test_from_board_derives_turn() {
    let b = board(
        "
        .......
        .......
        .......
        .......
        .......
        RRRYY.Y
        ",
    );
    let state = GameState::from_board(b);
    assert_eq!(state.turn(), 6);
    assert_eq!(state.current_player(), Player::Red);
    assert!(!state.is_terminal());
}

#[test]
fn test_board_display_matches_parse_format() {
    let mut state = GameState::new();
    state.apply_move(0);
    state.apply_move(6);

    let text = state.board().to_string();
    assert_eq!(text.lines().count(), ROWS);
    assert_eq!(text.lines().last(), Some("R.....Y"));
    assert_eq!(text.parse::<Board>(), Ok(*state.board()));
}

#[test]
fn test_board_parse_errors() {
    assert_eq!(
        "RRR".parse::<Board>(),
        Err(BoardError::InvalidRowCount(1))
    );

    let short = ".......\n.......\n.......\n.......\n.......\nRR";
    assert_eq!(
        short.parse::<Board>(),
        Err(BoardError::InvalidRowLength { row: 5, len: 2 })
    );

    let bad_char = ".......\n.......\n.......\n.......\n.......\nRRX....";
    assert_eq!(
        bad_char.parse::<Board>(),
        Err(BoardError::InvalidCell {
            ch: 'X',
            row: 5,
            col: 2
        })
    );

    let floating = ".......\n.......\n.......\n.......\nR......\n.......";
    assert_eq!(
        floating.parse::<Board>(),
        Err(BoardError::FloatingPiece { row: 4, col: 0 })
    );
}

#[test]
fn test_player_tokens() {
    assert_eq!(Player::Red.opponent(), Player::Yellow);
    assert_eq!(Player::Yellow.opponent(), Player::Red);
    assert_eq!(Player::from_symbol('y'), Some(Player::Yellow));
    assert_eq!(Player::from_symbol('.'), None);
    assert_eq!(Player::Red.to_string(), "Red");
}

#[test]
fn test_random_games_invariants() {
    for seed in 0..20 {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let mut state = GameState::new();

        while !state.is_terminal() {
            let legal = state.available_moves();
            assert!(
                !legal.is_empty(),
                "Non-terminal game must have legal moves (seed={})",
                seed
            );

            // Legal moves are exactly the columns with an empty top cell
            let expected: Vec<usize> = (0..COLS)
                .filter(|&col| state.board().get(0, col).is_none())
                .collect();
            assert_eq!(legal, expected, "seed={}", seed);

            let mover = state.current_player();
            let col = legal[rng.gen_range(0..legal.len())];
            assert!(state.apply_move(col));
            assert_eq!(state.last_player(), mover);

            // The incremental check agrees with the full scan
            let scanned = state.board().check_win();
            assert_eq!(
                state.is_terminal(),
                scanned.is_some() || state.board().is_full(),
                "seed={}",
                seed
            );
            if let Some(winner) = scanned {
                assert_eq!(winner, mover, "Only the mover can complete a line");
            }
        }

        assert!(state.turn() <= ROWS * COLS);
        assert_ne!(state.outcome(), Outcome::InProgress);
    }
}
