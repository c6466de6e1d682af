//! Game session management.
//!
//! The [`Game`] struct owns one board, the move history, the side to move
//! and the result, plus the active rule module. Every operation goes
//! through the rule module; a failed call leaves the session exactly as
//! it was.

use tabletop_core::{Color, Move, Point};
use thiserror::Error;

use crate::board::{Board, BoardError, MAX_SIZE, MIN_SIZE};
use crate::config::SessionConfig;
use crate::rules::{GameResult, Reversi, RuleSet, Rules, Score, Variant, WinReason};
use crate::state::GameState;

/// Error type for game operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GameError {
    /// The point is not on the board.
    #[error("point {0} is outside the board")]
    OutOfBounds(Point),
    /// The point already holds a stone.
    #[error("point {0} is already occupied")]
    CellOccupied(Point),
    /// Requested board size is outside 8..=19.
    #[error("board size must be between 8 and 19, got {0}")]
    InvalidBoardSize(u8),
    /// The placed stone's group would have no liberty and nothing is captured.
    #[error("playing at {0} would be suicide")]
    SuicideMove(Point),
    /// The placement would recreate an earlier position.
    #[error("playing at {0} repeats an earlier position")]
    RepeatedPosition(Point),
    /// The placement flips nothing (Reversi).
    #[error("playing at {0} does not flip any stone")]
    IllegalMove(Point),
    /// Only Go allows passing.
    #[error("{0} does not allow passing")]
    PassNotSupported(Variant),
    /// The history is empty.
    #[error("no move to undo")]
    NoMoveToUndo,
    /// The game has already ended.
    #[error("game has already ended")]
    GameAlreadyOver,
    /// A replayed move was made by the wrong player.
    #[error("expected a move by {expected}, found one by {found}")]
    WrongPlayer { expected: Color, found: Color },
    /// Variant name not recognized.
    #[error("unknown game variant: {0}")]
    UnknownVariant(String),
    /// Board text could not be parsed.
    #[error("invalid board notation: {0}")]
    InvalidNotation(String),
}

impl From<BoardError> for GameError {
    fn from(e: BoardError) -> Self {
        match e {
            BoardError::InvalidSize(size) => GameError::InvalidBoardSize(size),
            BoardError::OutOfBounds(point) => GameError::OutOfBounds(point),
            BoardError::Occupied(point) => GameError::CellOccupied(point),
            BoardError::Notation(e) => GameError::InvalidNotation(e.to_string()),
        }
    }
}

/// A single game of Gomoku, Go or Reversi.
///
/// Operations on one session must not overlap; wrap it in a mutex if it
/// is shared between threads. Separate sessions are fully independent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    state: GameState,
    rules: Rules,
}

impl Game {
    /// Starts a game on an empty board.
    ///
    /// `size` must be in 8..=19. Reversi always uses 8 and logs a warning
    /// when another size is requested.
    pub fn new(variant: Variant, size: u8) -> Result<Self, GameError> {
        if !(MIN_SIZE..=MAX_SIZE).contains(&size) {
            return Err(GameError::InvalidBoardSize(size));
        }
        let rules = Rules::new(variant);
        let mut board = Board::new(rules.board_size(size))?;
        rules.setup(&mut board);
        tracing::debug!("Started {} on a {}x{} board", variant, board.size(), board.size());
        Ok(Game {
            state: GameState::new(board),
            rules,
        })
    }

    /// Starts a game described by a [`SessionConfig`].
    pub fn from_config(config: &SessionConfig) -> Result<Self, GameError> {
        Self::new(config.variant, config.size())
    }

    /// Plays `moves` in order from a fresh board.
    ///
    /// Each move must be by the player whose turn it is.
    pub fn replay(variant: Variant, size: u8, moves: &[Move]) -> Result<Self, GameError> {
        let mut game = Self::new(variant, size)?;
        for &mov in moves {
            game.apply(mov)?;
        }
        Ok(game)
    }

    /// A fresh session holding only the first `ply` moves of this one.
    pub fn replay_to(&self, ply: usize) -> Result<Self, GameError> {
        let moves = self.history();
        let ply = ply.min(moves.len());
        Self::replay(self.variant(), self.board().size(), &moves[..ply])
    }

    pub(crate) fn from_parts(state: GameState, rules: Rules) -> Self {
        Game { state, rules }
    }

    pub(crate) fn into_parts(self) -> (GameState, Rules) {
        (self.state, self.rules)
    }

    pub(crate) fn rules(&self) -> &Rules {
        &self.rules
    }

    pub(crate) fn state(&self) -> &GameState {
        &self.state
    }

    /// Which game is being played.
    pub fn variant(&self) -> Variant {
        self.rules.variant()
    }

    /// The current board.
    pub fn board(&self) -> &Board {
        &self.state.board
    }

    /// The player to move next.
    pub fn to_move(&self) -> Color {
        self.state.to_move
    }

    /// Moves played so far, oldest first.
    pub fn history(&self) -> &[Move] {
        self.state.history.as_slice()
    }

    /// Number of moves played, passes included.
    pub fn ply_count(&self) -> usize {
        self.state.history.len()
    }

    /// Returns the game result if the game is over.
    pub fn outcome(&self) -> Option<GameResult> {
        self.rules.outcome(&self.state)
    }

    /// Returns true if the game has ended.
    pub fn is_over(&self) -> bool {
        self.rules.is_terminal(&self.state)
    }

    /// Places a stone for the side to move.
    pub fn play(&mut self, point: Point) -> Result<(), GameError> {
        if self.is_over() {
            return Err(GameError::GameAlreadyOver);
        }
        self.rules.play(&mut self.state, point)
    }

    /// Passes for the side to move (Go only).
    pub fn pass(&mut self) -> Result<(), GameError> {
        if self.is_over() {
            return Err(GameError::GameAlreadyOver);
        }
        self.rules.pass(&mut self.state)
    }

    /// Applies a recorded move, checking that it is by the side to move.
    pub fn apply(&mut self, mov: Move) -> Result<(), GameError> {
        if self.is_over() {
            return Err(GameError::GameAlreadyOver);
        }
        if mov.color() != self.state.to_move {
            return Err(GameError::WrongPlayer {
                expected: self.state.to_move,
                found: mov.color(),
            });
        }
        match mov {
            Move::Place { point, .. } => self.play(point),
            Move::Pass { .. } => self.pass(),
        }
    }

    /// Takes back the most recent move.
    ///
    /// Not available once the game has ended.
    pub fn undo(&mut self) -> Result<Move, GameError> {
        if self.is_over() {
            return Err(GameError::GameAlreadyOver);
        }
        self.rules.undo(&mut self.state)
    }

    /// Clears the board and history, keeping variant and size.
    pub fn restart(&mut self) {
        let mut board = self.state.board.clone();
        board.clear();
        self.rules.setup(&mut board);
        self.rules.reset();
        self.state = GameState::new(board);
        tracing::debug!("Restarted {}", self.variant());
    }

    /// The side to move resigns; the opponent wins.
    pub fn resign(&mut self) -> Result<(), GameError> {
        if self.is_over() {
            return Err(GameError::GameAlreadyOver);
        }
        let loser = self.state.to_move;
        self.state.finish(GameResult::Win {
            winner: loser.opposite(),
            reason: WinReason::Resignation,
        });
        Ok(())
    }

    /// Every point the side to move may play. Empty once the game is over.
    pub fn legal_moves(&self) -> Vec<Point> {
        if self.is_over() {
            return Vec::new();
        }
        self.rules.legal_moves(&self.state)
    }

    /// Returns true if the side to move may play at `point`.
    pub fn is_legal(&self, point: Point) -> bool {
        !self.is_over() && self.rules.is_legal(&self.state, point)
    }

    /// Go score (territory plus captures). `None` for other variants.
    pub fn score(&self) -> Option<Score> {
        match &self.rules {
            Rules::Go(go) => Some(go.score(&self.state.board)),
            Rules::Gomoku(_) | Rules::Reversi(_) => None,
        }
    }

    /// Stones captured by `color` in Go; zero for other variants.
    pub fn captures(&self, color: Color) -> u32 {
        match &self.rules {
            Rules::Go(go) => go.captures(color),
            Rules::Gomoku(_) | Rules::Reversi(_) => 0,
        }
    }

    /// Number of positions recorded for Go's repetition check.
    pub fn snapshot_count(&self) -> usize {
        match &self.rules {
            Rules::Go(go) => go.snapshot_count(),
            Rules::Gomoku(_) | Rules::Reversi(_) => 0,
        }
    }

    /// Stones of each color on the board.
    pub fn stone_counts(&self) -> Score {
        Reversi::stone_counts(&self.state.board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::DrawReason;

    #[test]
    fn new_game() {
        let game = Game::new(Variant::Gomoku, 15).unwrap();
        assert_eq!(game.ply_count(), 0);
        assert!(!game.is_over());
        assert_eq!(game.to_move(), Color::Black);
        assert_eq!(game.board().size(), 15);
    }

    #[test]
    fn invalid_board_size() {
        for variant in Variant::ALL {
            assert_eq!(
                Game::new(variant, 7),
                Err(GameError::InvalidBoardSize(7))
            );
            assert_eq!(
                Game::new(variant, 20),
                Err(GameError::InvalidBoardSize(20))
            );
        }
    }

    #[test]
    fn reversi_size_is_corrected() {
        let game = Game::new(Variant::Reversi, 12).unwrap();
        assert_eq!(game.board().size(), 8);
        assert_eq!(game.stone_counts(), Score { black: 2, white: 2 });
    }

    #[test]
    fn gomoku_row_win() {
        let mut game = Game::new(Variant::Gomoku, 15).unwrap();
        for x in 0..4 {
            game.play(Point::new(x, 0)).unwrap();
            game.play(Point::new(x, 1)).unwrap();
            assert!(!game.is_over());
        }
        game.play(Point::new(4, 0)).unwrap();
        assert!(game.is_over());
        assert_eq!(
            game.outcome(),
            Some(GameResult::Win {
                winner: Color::Black,
                reason: WinReason::FiveInARow
            })
        );
    }

    #[test]
    fn cannot_move_after_game_over() {
        let mut game = Game::new(Variant::Go, 9).unwrap();
        game.resign().unwrap();
        assert_eq!(game.play(Point::new(0, 0)), Err(GameError::GameAlreadyOver));
        assert_eq!(game.pass(), Err(GameError::GameAlreadyOver));
        assert_eq!(game.undo(), Err(GameError::GameAlreadyOver));
        assert_eq!(game.resign(), Err(GameError::GameAlreadyOver));
        assert!(game.legal_moves().is_empty());
    }

    #[test]
    fn resign() {
        let mut game = Game::new(Variant::Gomoku, 9).unwrap();
        game.play(Point::new(4, 4)).unwrap();
        game.resign().unwrap();
        assert_eq!(
            game.outcome(),
            Some(GameResult::Win {
                winner: Color::Black,
                reason: WinReason::Resignation
            })
        );
    }

    #[test]
    fn pass_only_in_go() {
        let mut gomoku = Game::new(Variant::Gomoku, 9).unwrap();
        assert_eq!(
            gomoku.pass(),
            Err(GameError::PassNotSupported(Variant::Gomoku))
        );
        let mut go = Game::new(Variant::Go, 9).unwrap();
        go.pass().unwrap();
        go.pass().unwrap();
        assert_eq!(
            go.outcome(),
            Some(GameResult::Draw(DrawReason::EqualScore))
        );
    }

    #[test]
    fn undo_empty() {
        let mut game = Game::new(Variant::Reversi, 8).unwrap();
        assert_eq!(game.undo(), Err(GameError::NoMoveToUndo));
    }

    #[test]
    fn restart_keeps_variant_and_size() {
        let mut game = Game::new(Variant::Go, 13).unwrap();
        game.play(Point::new(3, 3)).unwrap();
        game.pass().unwrap();
        game.restart();
        assert_eq!(game, Game::new(Variant::Go, 13).unwrap());

        let mut reversi = Game::new(Variant::Reversi, 8).unwrap();
        reversi.play(Point::new(2, 3)).unwrap();
        reversi.resign().unwrap();
        reversi.restart();
        assert_eq!(reversi, Game::new(Variant::Reversi, 8).unwrap());
    }

    #[test]
    fn replay_checks_turn_order() {
        let moves = [
            Move::place(Point::new(0, 0), Color::Black),
            Move::place(Point::new(1, 0), Color::Black),
        ];
        assert_eq!(
            Game::replay(Variant::Gomoku, 9, &moves),
            Err(GameError::WrongPlayer {
                expected: Color::White,
                found: Color::Black
            })
        );
    }

    #[test]
    fn replay_to_prefix() {
        let mut game = Game::new(Variant::Go, 9).unwrap();
        game.play(Point::new(2, 2)).unwrap();
        game.play(Point::new(6, 6)).unwrap();
        let after_one = {
            let mut g = Game::new(Variant::Go, 9).unwrap();
            g.play(Point::new(2, 2)).unwrap();
            g
        };
        assert_eq!(game.replay_to(1).unwrap(), after_one);
        assert_eq!(game.replay_to(99).unwrap(), game);
        assert_eq!(game.replay_to(0).unwrap(), Game::new(Variant::Go, 9).unwrap());
    }

    #[test]
    fn score_and_captures_only_for_go() {
        let gomoku = Game::new(Variant::Gomoku, 9).unwrap();
        assert_eq!(gomoku.score(), None);
        assert_eq!(gomoku.captures(Color::Black), 0);

        let go = Game::new(Variant::Go, 9).unwrap();
        assert_eq!(go.score(), Some(Score::default()));
    }

    #[test]
    fn is_legal_matches_legal_moves() {
        let game = Game::new(Variant::Reversi, 8).unwrap();
        let legal = game.legal_moves();
        for p in game.board().points() {
            assert_eq!(game.is_legal(p), legal.contains(&p), "at {}", p);
        }
    }
}
