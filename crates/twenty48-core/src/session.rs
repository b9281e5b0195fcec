//! One player's game: owns the board, score and win flag, and runs the
//! move/spawn/classify cycle on top of the pure engine.

use log::{debug, info};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::engine::{Board, DEFAULT_TARGET, Direction, MoveOutcome, Score, Tile};
use crate::error::EngineError;
use crate::rng::TileSource;

/// Classification of a single `apply_move` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Move accepted; play goes on.
    Continue,
    /// Move changed nothing; board and score untouched, no tile spawned.
    Rejected,
    /// Move accepted and reached the target for the first time this game.
    Won,
    /// Move accepted and left no possible moves.
    Over,
}

/// Coarse lifecycle of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    Playing,
    Won,
    Over,
}

/// Everything a presentation layer needs after one move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveResult {
    pub board: Board,
    pub score_delta: Score,
    pub score: Score,
    pub outcome: Outcome,
}

/// Summary for a finished (or abandoned) game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSummary {
    pub moves: u64,
    pub score: Score,
    pub highest_tile: Tile,
    pub won: bool,
}

/// A single game of 2048.
///
/// The random source is owned by the session, so two sessions built from the
/// same seed play out identically:
/// ```
/// use twenty48_core::engine::Direction;
/// use twenty48_core::session::{Outcome, Session};
///
/// let mut a = Session::with_seed(4, 42).unwrap();
/// let mut b = Session::with_seed(4, 42).unwrap();
/// assert_eq!(a.board(), b.board());
/// for dir in [Direction::Left, Direction::Up, Direction::Right] {
///     assert_eq!(a.apply_move(dir), b.apply_move(dir));
/// }
/// assert_ne!(a.apply_move(Direction::Down).outcome, Outcome::Over);
/// ```
#[derive(Debug, Clone)]
pub struct Session<S: TileSource = StdRng> {
    board: Board,
    score: Score,
    won: bool,
    moves: u64,
    target: Tile,
    source: S,
}

impl Session<StdRng> {
    /// New session seeded from OS entropy.
    pub fn new(size: usize) -> Result<Self, EngineError> {
        Self::with_rng(size, StdRng::from_entropy())
    }

    /// New session whose tile spawns are fully determined by `seed`.
    pub fn with_seed(size: usize, seed: u64) -> Result<Self, EngineError> {
        Self::with_rng(size, StdRng::seed_from_u64(seed))
    }
}

impl<S: TileSource> Session<S> {
    /// New session drawing spawns from `source`.
    pub fn with_rng(size: usize, mut source: S) -> Result<Self, EngineError> {
        let board = fresh_board(size, &mut source)?;
        Ok(Self {
            board,
            score: 0,
            won: false,
            moves: 0,
            target: DEFAULT_TARGET,
            source,
        })
    }

    /// Use `target` instead of 2048 as the win threshold. It must be a power
    /// of two of at least 4; anything lower is met by the opening spawn.
    pub fn with_target(mut self, target: Tile) -> Result<Self, EngineError> {
        if target < 4 || !target.is_power_of_two() {
            return Err(EngineError::InvalidTarget { target });
        }
        self.target = target;
        Ok(self)
    }

    /// Apply one move: shift, and if anything changed, score it, spawn a tile
    /// and classify the result.
    pub fn apply_move(&mut self, direction: Direction) -> MoveResult {
        let MoveOutcome { board, score_delta } = self.board.shift(direction);

        if board == self.board {
            debug_assert_eq!(score_delta, 0, "unchanged board cannot have merged");
            debug!("{direction:?} rejected: board unchanged");
            return MoveResult {
                board: self.board.clone(),
                score_delta: 0,
                score: self.score,
                outcome: Outcome::Rejected,
            };
        }

        self.score += score_delta;
        self.moves += 1;
        self.board = board.with_random_tile(&mut self.source);

        let outcome = if !self.won && self.board.has_reached(self.target) {
            self.won = true;
            info!(
                "reached {} after {} moves, score {}",
                self.target, self.moves, self.score
            );
            Outcome::Won
        } else if self.board.is_game_over() {
            info!(
                "no moves left after {} moves, final score {}",
                self.moves, self.score
            );
            Outcome::Over
        } else {
            Outcome::Continue
        };
        debug!("{direction:?} accepted: +{score_delta} -> {} ({outcome:?})", self.score);

        MoveResult {
            board: self.board.clone(),
            score_delta,
            score: self.score,
            outcome,
        }
    }

    /// Start over with a fresh board of the same size; score, win flag and
    /// move count reset.
    pub fn restart(&mut self) {
        info!(
            "restarting {}x{} game (score was {})",
            self.size(),
            self.size(),
            self.score
        );
        let n = self.size();
        let empty = Board::from_cells(n, vec![0; n * n]);
        self.board = spawn_two(&empty, &mut self.source);
        self.score = 0;
        self.won = false;
        self.moves = 0;
    }

    /// Current board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn size(&self) -> usize {
        self.board.size()
    }

    /// Whether the win notification has already been issued this game.
    pub fn has_won(&self) -> bool {
        self.won
    }

    pub fn target(&self) -> Tile {
        self.target
    }

    /// Accepted moves since the last (re)start.
    pub fn moves(&self) -> u64 {
        self.moves
    }

    /// `Over` whenever no move is possible, else `Won` once the target was hit.
    pub fn state(&self) -> GameState {
        if self.board.is_game_over() {
            GameState::Over
        } else if self.won {
            GameState::Won
        } else {
            GameState::Playing
        }
    }

    pub fn summary(&self) -> GameSummary {
        GameSummary {
            moves: self.moves,
            score: self.score,
            highest_tile: self.board.highest_tile(),
            won: self.won,
        }
    }
}

fn fresh_board<S: TileSource + ?Sized>(size: usize, source: &mut S) -> Result<Board, EngineError> {
    Ok(spawn_two(&Board::new(size)?, source))
}

fn spawn_two<S: TileSource + ?Sized>(board: &Board, source: &mut S) -> Board {
    board.with_random_tile(source).with_random_tile(source)
}
