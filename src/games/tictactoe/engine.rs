//! Live-play referee for tic-tac-toe.
//!
//! One [`TicTacToe`] is one game between a scripted bot and an opponent
//! (a human or the agent under test). The opponent's moves arrive as
//! tokens; the bot's come from [`Minimax`]. Rejected moves never touch the
//! board: they only set [`GameStatus::InvalidMove`].

use super::action::MoveError;
use super::minimax::Minimax;
use super::rules::{Classification, classify};
use super::{Board, GameStatus, Player, Position};
use crate::config::BenchConfig;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Points per accepted opponent move.
const POINTS_PER_MOVE: u32 = 10;
/// Bonus when the opponent wins.
const WIN_BONUS: u32 = 50;
/// Bonus when the game is tied.
const TIE_BONUS: u32 = 20;

/// What happens to an `INVALID_MOVE` status on the next move.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum InvalidMovePolicy {
    /// The next move is processed as if the game were in progress.
    #[default]
    Revert,
    /// Every later move also returns `INVALID_MOVE` until [`TicTacToe::reset`].
    Freeze,
}

/// A move extracted from free-form agent output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AgentMove {
    /// A well-formed move.
    Move(Position),
    /// No `Movement:` label with a valid token was found.
    Invalid,
}

impl AgentMove {
    /// Canonical token, if a move was found.
    pub fn token(self) -> Option<&'static str> {
        match self {
            AgentMove::Move(pos) => Some(pos.label()),
            AgentMove::Invalid => None,
        }
    }
}

impl std::fmt::Display for AgentMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AgentMove::Move(pos) => write!(f, "{}", pos),
            AgentMove::Invalid => write!(f, "{}", GameStatus::InvalidMove),
        }
    }
}

/// Tic-tac-toe game engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicTacToe {
    board: Board,
    bot: Player,
    opponent: Player,
    status: GameStatus,
    winner: Option<Player>,
    history: Vec<String>,
    player_first: bool,
    /// Mark that made the first move on this board.
    first: Player,
    policy: InvalidMovePolicy,
}

impl TicTacToe {
    /// Starts a game with randomly assigned marks.
    ///
    /// When `player_first` is false the bot plays its opening move before
    /// this returns.
    #[instrument(skip(rng))]
    pub fn new<R: Rng + ?Sized>(player_first: bool, policy: InvalidMovePolicy, rng: &mut R) -> Self {
        let opponent = if rng.random_bool(0.5) {
            Player::X
        } else {
            Player::O
        };
        let mut game = Self::with_marks(opponent, policy);
        game.player_first = player_first;
        if !player_first {
            game.first = game.bot;
            game.bot_move();
        }
        info!(bot = %game.bot, opponent = %game.opponent, player_first, "New game");
        game
    }

    /// Starts a game using the engine settings from `config`.
    pub fn from_config<R: Rng + ?Sized>(config: &BenchConfig, rng: &mut R) -> Self {
        Self::new(*config.player_first(), *config.invalid_move_policy(), rng)
    }

    /// Starts a game on an empty board with fixed marks; the opponent moves
    /// first.
    pub fn with_marks(opponent: Player, policy: InvalidMovePolicy) -> Self {
        Self {
            board: Board::new(),
            bot: opponent.opponent(),
            opponent,
            status: GameStatus::InProgress,
            winner: None,
            history: Vec::new(),
            player_first: true,
            first: opponent,
            policy,
        }
    }

    /// Resumes a game from an arbitrary board with fixed marks.
    ///
    /// The status is derived from the board, so a won or full board starts
    /// out terminal. X is taken to have moved first.
    #[instrument(skip(board))]
    pub fn with_board(board: Board, opponent: Player, policy: InvalidMovePolicy) -> Self {
        let mut game = Self::with_marks(opponent, policy);
        game.board = board;
        game.first = Player::X;
        game.refresh_status();
        game
    }

    /// Applies the opponent's move.
    ///
    /// Returns the status after the move. A finished game returns its
    /// status unchanged. `INVALID_MOVE` is cleared first under
    /// [`InvalidMovePolicy::Revert`] and returned unchanged under
    /// [`InvalidMovePolicy::Freeze`].
    #[instrument(skip(self), fields(status = %self.status))]
    pub fn apply_move(&mut self, token: &str) -> GameStatus {
        if self.status == GameStatus::InvalidMove {
            match self.policy {
                InvalidMovePolicy::Revert => {
                    debug!("Reverting invalid-move status");
                    self.status = GameStatus::InProgress;
                }
                InvalidMovePolicy::Freeze => return self.status,
            }
        }

        match self.try_apply(token) {
            Ok(()) => {}
            Err(MoveError::GameOver) => debug!(status = %self.status, "Move after game end ignored"),
            Err(error) => {
                warn!(%error, "Move rejected");
                self.status = GameStatus::InvalidMove;
            }
        }
        self.status
    }

    fn try_apply(&mut self, token: &str) -> Result<(), MoveError> {
        if self.status.is_terminal() {
            return Err(MoveError::GameOver);
        }
        let pos = Position::parse(token)?;
        self.board.place(pos, self.opponent)?;
        self.history.push(token.to_string());
        self.refresh_status();
        debug!(position = %pos, status = %self.status, "Opponent moved");
        Ok(())
    }

    /// Plays the bot's move.
    ///
    /// Returns the position played, or `None` if the game is over or it is
    /// not the bot's turn.
    #[instrument(skip(self), fields(bot = %self.bot))]
    pub fn bot_move(&mut self) -> Option<Position> {
        if self.status.is_terminal() {
            return None;
        }
        if self.to_move() != Some(self.bot) {
            debug!("Not the bot's turn");
            return None;
        }
        let pos = Minimax::new(self.bot).find_best_move(&self.board)?;
        if let Err(error) = self.board.place(pos, self.bot) {
            warn!(%error, "Search returned an occupied cell");
            return None;
        }
        self.refresh_status();
        debug!(position = %pos, status = %self.status, "Bot moved");
        Some(pos)
    }

    /// `10` per accepted opponent move, plus `50` for a win or `20` for a tie.
    pub fn score(&self) -> u32 {
        let bonus = match self.status {
            GameStatus::Win => WIN_BONUS,
            GameStatus::Tie => TIE_BONUS,
            _ => 0,
        };
        POINTS_PER_MOVE * self.history.len() as u32 + bonus
    }

    /// Extracts a `Movement: <token>` move from free-form agent output.
    pub fn parse_agent_output(text: &str) -> AgentMove {
        match Position::from_agent_output(text) {
            Some(pos) => AgentMove::Move(pos),
            None => AgentMove::Invalid,
        }
    }

    /// Clears the board and history and re-draws the marks.
    #[instrument(skip(self, rng))]
    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        *self = Self::new(self.player_first, self.policy, rng);
    }

    /// Side to move, counting from the mark that opened the board.
    ///
    /// `None` when the piece counts cannot come from alternating play.
    pub fn to_move(&self) -> Option<Player> {
        let second = self.first.opponent();
        let first_count = self.board.count(self.first);
        let second_count = self.board.count(second);
        if first_count == second_count {
            Some(self.first)
        } else if first_count == second_count + 1 {
            Some(second)
        } else {
            None
        }
    }

    /// Re-classifies the board after a mark was written.
    fn refresh_status(&mut self) {
        match classify(&self.board) {
            Classification::Winner(player) => {
                self.winner = Some(player);
                self.status = if player == self.opponent {
                    GameStatus::Win
                } else {
                    GameStatus::Lose
                };
                info!(winner = %player, status = %self.status, "Game over");
            }
            Classification::Tie => {
                self.status = GameStatus::Tie;
                info!("Game tied");
            }
            Classification::Ongoing => {}
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the bot's mark.
    pub fn bot(&self) -> Player {
        self.bot
    }

    /// Returns the opponent's mark.
    pub fn opponent(&self) -> Player {
        self.opponent
    }

    /// Returns the game status.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Returns the winning mark, once there is one.
    pub fn winner(&self) -> Option<Player> {
        self.winner
    }

    /// Returns the accepted opponent move tokens.
    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Returns the invalid-move policy.
    pub fn policy(&self) -> InvalidMovePolicy {
        self.policy
    }

    /// True once the game is won, lost or tied.
    pub fn is_finished(&self) -> bool {
        self.status.is_terminal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn test_center_move() {
        let mut game = TicTacToe::with_marks(Player::O, InvalidMovePolicy::Revert);
        assert_eq!(game.apply_move("B2"), GameStatus::InProgress);
        assert_eq!(game.board().get(Position::Center), crate::Cell::Mark(Player::O));
        assert_eq!(game.history(), ["B2"]);
    }

    #[test]
    fn test_invalid_move_leaves_board() {
        let mut game = TicTacToe::with_marks(Player::X, InvalidMovePolicy::Revert);
        game.apply_move("A1");
        let before = *game.board();
        assert_eq!(game.apply_move("a1"), GameStatus::InvalidMove);
        assert_eq!(game.apply_move("Z9"), GameStatus::InvalidMove);
        assert_eq!(game.board(), &before);
        assert_eq!(game.history().len(), 1);
    }

    #[test]
    fn test_revert_policy_recovers() {
        let mut game = TicTacToe::with_marks(Player::X, InvalidMovePolicy::Revert);
        assert_eq!(game.apply_move("??"), GameStatus::InvalidMove);
        assert_eq!(game.apply_move("C3"), GameStatus::InProgress);
        assert_eq!(game.history(), ["C3"]);
    }

    #[test]
    fn test_freeze_policy_sticks() {
        let mut game = TicTacToe::with_marks(Player::X, InvalidMovePolicy::Freeze);
        assert_eq!(game.apply_move("??"), GameStatus::InvalidMove);
        assert_eq!(game.apply_move("C3"), GameStatus::InvalidMove);
        assert!(game.history().is_empty());
        assert!(game.board().is_empty(Position::BottomRight));
    }

    #[test]
    fn test_bot_wins_is_lose() {
        let board: Board = "OO_/XX_/X__".parse().unwrap();
        let mut game = TicTacToe::with_board(board, Player::X, InvalidMovePolicy::Revert);
        assert_eq!(game.bot_move(), Some(Position::TopRight));
        assert_eq!(game.status(), GameStatus::Lose);
        assert_eq!(game.winner(), Some(Player::O));
        assert_eq!(game.score(), 0);
        assert_eq!(game.bot_move(), None);
        assert_eq!(game.apply_move("B3"), GameStatus::Lose);
    }

    #[test]
    fn test_finished_game_rejects_with_game_over() {
        let board: Board = "XXX/OO_/___".parse().unwrap();
        let mut game = TicTacToe::with_board(board, Player::X, InvalidMovePolicy::Revert);
        assert_eq!(game.status(), GameStatus::Win);
        assert_eq!(game.try_apply("B3"), Err(MoveError::GameOver));
        assert_eq!(game.apply_move("B3"), GameStatus::Win);
        assert!(game.board().is_empty(Position::MiddleRight));
        assert!(game.history().is_empty());
    }

    #[test]
    fn test_bot_waits_for_its_turn() {
        let mut game = TicTacToe::with_marks(Player::X, InvalidMovePolicy::Revert);
        assert_eq!(game.bot_move(), None);
        assert_eq!(game.board(), &Board::new());

        game.apply_move("B2");
        assert_eq!(game.to_move(), Some(Player::O));
        assert!(game.bot_move().is_some());
        assert_eq!(game.bot_move(), None);
        assert_eq!(game.board().count(Player::O), 1);
        assert_eq!(game.to_move(), Some(Player::X));
    }

    #[test]
    fn test_bot_opening_as_o() {
        let mut game = TicTacToe::with_marks(Player::X, InvalidMovePolicy::Revert);
        game.first = Player::O;
        assert_eq!(game.to_move(), Some(Player::O));
        assert_eq!(game.bot_move(), Some(Position::TopLeft));
        assert_eq!(game.bot_move(), None);
        assert_eq!(game.apply_move("C3"), GameStatus::InProgress);
        assert_eq!(game.to_move(), Some(Player::O));
    }

    #[test]
    fn test_score_bonuses() {
        let board: Board = "XX_/OO_/___".parse().unwrap();
        let mut game = TicTacToe::with_board(board, Player::X, InvalidMovePolicy::Revert);
        assert_eq!(game.apply_move("3a"), GameStatus::Win);
        assert_eq!(game.score(), 60);
        assert_eq!(game.score(), game.score());
    }

    #[test]
    fn test_bot_opens_when_not_player_first() {
        let mut rng = SmallRng::seed_from_u64(1);
        let game = TicTacToe::new(false, InvalidMovePolicy::Revert, &mut rng);
        assert_eq!(game.board().count(game.bot()), 1);
        assert_ne!(game.bot(), game.opponent());
    }

    #[test]
    fn test_reset_clears_state() {
        let mut rng = SmallRng::seed_from_u64(2);
        let mut game = TicTacToe::new(true, InvalidMovePolicy::Freeze, &mut rng);
        game.apply_move("bad");
        game.reset(&mut rng);
        assert_eq!(game.status(), GameStatus::InProgress);
        assert!(game.history().is_empty());
        assert_eq!(game.board(), &Board::new());
        assert_eq!(game.policy(), InvalidMovePolicy::Freeze);
    }

    #[test]
    fn test_parse_agent_output() {
        assert_eq!(
            TicTacToe::parse_agent_output("Thinking...\nmovement: 2c"),
            AgentMove::Move(Position::BottomCenter)
        );
        assert_eq!(TicTacToe::parse_agent_output("no idea"), AgentMove::Invalid);
        assert_eq!(AgentMove::Move(Position::BottomCenter).token(), Some("C2"));
        assert_eq!(AgentMove::Invalid.to_string(), "INVALID_MOVE");
    }
}
