//! twenty48-core: a size-parametric 2048 board engine + game session
//!
//! This crate provides:
//! - A square `Board` with pure transforms (`shift`, `with_random_tile`, `can_move`, ...)
//! - `compress_line`, the single merge primitive all four directions reduce to
//! - A `Session` that owns one game's board, score and win flag and classifies
//!   every move as `Continue`, `Rejected`, `Won` or `Over`
//! - A `TileSource` abstraction so spawns can be seeded for reproducible play
//!
//! Quick start:
//! ```
//! use twenty48_core::engine::{Board, Direction};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! // Deterministic board initialization with a seeded RNG
//! let mut rng = StdRng::seed_from_u64(42);
//! let b0 = Board::new(4).unwrap().with_random_tile(&mut rng).with_random_tile(&mut rng);
//! let b1 = b0.shift(Direction::Left);
//! assert_eq!(b1.board.tile_sum(), b0.tile_sum());
//! ```
//!
//! Full loop (simplest possible)
//! ```
//! use twenty48_core::engine::Direction;
//! use twenty48_core::session::{Outcome, Session};
//!
//! // 1) Start a seeded 4x4 game with two random tiles
//! let mut game = Session::with_seed(4, 123).unwrap();
//!
//! // 2) Cycle through directions until the board locks up (or we give up)
//! let mut turns = 0;
//! while turns < 10_000 {
//!     let result = game.apply_move(Direction::ALL[turns % 4]);
//!     turns += 1;
//!     if result.outcome == Outcome::Over {
//!         break;
//!     }
//! }
//!
//! // 3) Inspect final state
//! let summary = game.summary();
//! assert_eq!(summary.score, game.score());
//! assert!(summary.moves > 0);
//! ```
pub mod engine;
pub mod error;
pub mod rng;
pub mod session;

pub use crate::engine::{Board, Direction, MoveOutcome, Score, Tile, compress_line};
pub use crate::error::EngineError;
pub use crate::rng::TileSource;
pub use crate::session::{GameState, GameSummary, MoveResult, Outcome, Session};
