//! Engine module: size-parametric 2048 board and the pure transforms over it.
//!
//! - `Board` is the square N x N state with useful methods.
//! - Free functions mirror the methods when convenient (e.g., `shift`).
//! - `compress_line` is the one merge primitive; every direction is derived
//!   from it by reversing rows and transposing.

mod line;
pub mod ops;
pub mod state;

pub use line::compress_line;
pub use state::{Board, Direction, MoveOutcome, Score, Tile};

pub use ops::{
    can_move, create_empty_board, empty_cells, has_reached_target, is_game_over, move_down,
    move_left, move_right, move_up, reverse_rows, shift, spawn_random_tile, transpose,
};

/// Smallest supported side length.
pub const MIN_SIZE: usize = 2;
/// Side length used when none is given.
pub const DEFAULT_SIZE: usize = 4;
/// Conventional win threshold.
pub const DEFAULT_TARGET: Tile = 2048;
