//! Tests for move notation and agent output parsing.

use strictly_puzzles::{AgentMove, Board, Player, Position, TicTacToe};

#[test]
fn test_every_token_form_round_trips() {
    for pos in Position::ALL {
        let label = pos.label();
        let mut chars = label.chars();
        let (row, col) = (chars.next().unwrap(), chars.next().unwrap());
        for token in [
            format!("{}{}", row, col),
            format!("{}{}", col, row),
            format!("{}{}", row.to_ascii_lowercase(), col),
            format!("{}{}", col, row.to_ascii_lowercase()),
        ] {
            let parsed = Position::parse(&token).unwrap();
            assert_eq!(parsed, pos);
            assert_eq!(Position::parse(parsed.label()).unwrap(), pos);
        }
    }
}

#[test]
fn test_a1_and_1a_are_index_zero() {
    assert_eq!(Position::parse("A1").unwrap().to_index(), 0);
    assert_eq!(Position::parse("1A").unwrap().to_index(), 0);
    assert_eq!(Position::parse("C3").unwrap().to_index(), 8);
}

#[test]
fn test_agent_output_normalizes_digit_first() {
    let text = "The opponent threatens the left column.\nMovement: 1b";
    let parsed = TicTacToe::parse_agent_output(text);
    assert_eq!(parsed, AgentMove::Move(Position::MiddleLeft));
    assert_eq!(parsed.token(), Some("B1"));
}

#[test]
fn test_agent_output_missing_label() {
    assert_eq!(TicTacToe::parse_agent_output("B1"), AgentMove::Invalid);
    assert_eq!(TicTacToe::parse_agent_output(""), AgentMove::Invalid);
}

#[test]
fn test_valid_moves_filters_occupied() {
    let mut board = Board::new();
    board.place(Position::TopLeft, Player::X).unwrap();
    board.place(Position::Center, Player::O).unwrap();

    let valid = Position::valid_moves(&board);
    assert_eq!(valid.len(), 7);
    assert!(!valid.contains(&Position::TopLeft));
    assert!(!valid.contains(&Position::Center));
    assert!(valid.contains(&Position::BottomRight));
}
