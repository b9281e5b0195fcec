use crate::engine::Tile;

/// Errors raised when constructing a board or session from caller input.
///
/// Engine transforms themselves are total; only construction can fail.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("board size must be at least {min}, got {size}", min = crate::engine::MIN_SIZE)]
    InvalidSize { size: usize },
    #[error("row {row} has {len} cells, expected {expected} for a square board")]
    NotSquare {
        row: usize,
        len: usize,
        expected: usize,
    },
    #[error("cell ({row}, {col}) holds {value}, which is neither 0 nor a power of two >= 2")]
    InvalidTile { row: usize, col: usize, value: Tile },
    #[error("target must be a power of two >= 4, got {target}")]
    InvalidTarget { target: Tile },
}
