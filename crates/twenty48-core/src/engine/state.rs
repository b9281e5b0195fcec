use std::fmt;

use serde::{Deserialize, Serialize};

use super::{MIN_SIZE, ops};
use crate::error::EngineError;
use crate::rng::TileSource;

/// Value held by one cell: 0 for empty, otherwise a power of two >= 2.
pub type Tile = u64;
/// Points awarded by merges.
pub type Score = u64;

/// A direction to move/merge tiles.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All four directions, in Up, Down, Left, Right order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];
}

/// Result of one directional move attempt: the resulting board and the sum of
/// every merge produced along the way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    pub board: Board,
    pub score_delta: Score,
}

/// Square N x N grid of tiles stored row-major.
///
/// Every transform returns a new `Board`; the receiver is never mutated, so a
/// caller can always compare a pre-move snapshot with its result.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<Tile>>", into = "Vec<Vec<Tile>>")]
pub struct Board {
    size: usize,
    cells: Vec<Tile>,
}

impl Board {
    /// Empty `size` x `size` board.
    ///
    /// ```
    /// use twenty48_core::engine::Board;
    /// let b = Board::new(4).unwrap();
    /// assert_eq!(b.count_empty(), 16);
    /// assert!(Board::new(1).is_err());
    /// ```
    pub fn new(size: usize) -> Result<Self, EngineError> {
        if size < MIN_SIZE {
            return Err(EngineError::InvalidSize { size });
        }
        Ok(Board {
            size,
            cells: vec![0; size * size],
        })
    }

    /// Build a board from explicit rows, validating shape and tile values.
    ///
    /// ```
    /// use twenty48_core::engine::Board;
    /// let b = Board::from_rows(vec![vec![2, 4], vec![8, 16]]).unwrap();
    /// assert_eq!(b.get(1, 0), 8);
    /// assert!(Board::from_rows(vec![vec![2, 3], vec![0, 0]]).is_err());
    /// ```
    pub fn from_rows(rows: Vec<Vec<Tile>>) -> Result<Self, EngineError> {
        let size = rows.len();
        if size < MIN_SIZE {
            return Err(EngineError::InvalidSize { size });
        }
        let mut cells = Vec::with_capacity(size * size);
        for (row, line) in rows.into_iter().enumerate() {
            if line.len() != size {
                return Err(EngineError::NotSquare {
                    row,
                    len: line.len(),
                    expected: size,
                });
            }
            for (col, &value) in line.iter().enumerate() {
                if value != 0 && (value < 2 || !value.is_power_of_two()) {
                    return Err(EngineError::InvalidTile { row, col, value });
                }
            }
            cells.extend(line);
        }
        Ok(Board { size, cells })
    }

    /// Internal constructor for rows already known to be well formed.
    pub(crate) fn from_cells(size: usize, cells: Vec<Tile>) -> Self {
        debug_assert_eq!(cells.len(), size * size);
        Board { size, cells }
    }

    /// Side length N.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Tile at (`row`, `col`). Panics when out of bounds, like slice indexing.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Tile {
        assert!(row < self.size && col < self.size, "({row}, {col}) is off the board");
        self.cells[row * self.size + col]
    }

    /// Iterate rows top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Tile]> + '_ {
        self.cells.chunks(self.size)
    }

    /// Copy out the grid as nested rows.
    pub fn to_rows(&self) -> Vec<Vec<Tile>> {
        self.rows().map(<[Tile]>::to_vec).collect()
    }

    /// Iterate tile values in row-major order.
    #[inline]
    pub fn tiles(&self) -> impl Iterator<Item = Tile> + '_ {
        self.cells.iter().copied()
    }

    /// Slide/merge tiles in `dir` (no random insert).
    ///
    /// ```
    /// use twenty48_core::engine::{Board, Direction};
    /// let b = Board::from_rows(vec![vec![2, 2], vec![0, 4]]).unwrap();
    /// let out = b.shift(Direction::Left);
    /// assert_eq!(out.board.to_rows(), vec![vec![4, 0], vec![4, 0]]);
    /// assert_eq!(out.score_delta, 4);
    /// ```
    #[inline]
    pub fn shift(&self, dir: Direction) -> MoveOutcome {
        ops::shift(self, dir)
    }

    /// Insert a random 2 (90%) or 4 (10%) tile into a random empty slot.
    ///
    /// Deterministic example using a seeded RNG:
    /// ```
    /// use twenty48_core::engine::Board;
    /// use rand::{SeedableRng, rngs::StdRng};
    /// let mut rng = StdRng::seed_from_u64(123);
    /// let b = Board::new(4).unwrap().with_random_tile(&mut rng).with_random_tile(&mut rng);
    /// assert_eq!(b.count_empty(), 14);
    /// ```
    #[inline]
    pub fn with_random_tile<S: TileSource + ?Sized>(&self, source: &mut S) -> Self {
        ops::spawn_random_tile(self, source)
    }

    /// Coordinates of every empty cell, row-major.
    #[inline]
    pub fn empty_cells(&self) -> Vec<(usize, usize)> {
        ops::empty_cells(self)
    }

    /// True if some direction would change the board.
    #[inline]
    pub fn can_move(&self) -> bool {
        ops::can_move(self)
    }

    /// Return true if no legal moves remain.
    #[inline]
    pub fn is_game_over(&self) -> bool {
        ops::is_game_over(self)
    }

    /// True if any cell holds exactly `target`.
    #[inline]
    pub fn has_reached(&self, target: Tile) -> bool {
        ops::has_reached_target(self, target)
    }

    /// Count the number of empty cells on the board.
    #[inline]
    pub fn count_empty(&self) -> usize {
        self.cells.iter().filter(|&&t| t == 0).count()
    }

    /// Return the highest tile value present (0 for an empty board).
    #[inline]
    pub fn highest_tile(&self) -> Tile {
        self.tiles().max().unwrap_or(0)
    }

    /// Sum of all tile values. Unchanged by a move; only spawns increase it.
    #[inline]
    pub fn tile_sum(&self) -> Tile {
        self.tiles().sum()
    }

    pub(crate) fn cells(&self) -> &[Tile] {
        &self.cells
    }

    pub(crate) fn with_cell(&self, row: usize, col: usize, value: Tile) -> Self {
        let mut cells = self.cells.clone();
        cells[row * self.size + col] = value;
        Board::from_cells(self.size, cells)
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.rows()).finish()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let separator = "-".repeat(self.size * 8);
        for (idx, row) in self.rows().enumerate() {
            if idx > 0 {
                writeln!(f, "{separator}")?;
            }
            let cells: Vec<String> = row.iter().map(format_val).collect();
            writeln!(f, "{}", cells.join("|"))?;
        }
        Ok(())
    }
}

impl TryFrom<Vec<Vec<Tile>>> for Board {
    type Error = EngineError;

    fn try_from(rows: Vec<Vec<Tile>>) -> Result<Self, Self::Error> {
        Board::from_rows(rows)
    }
}

impl From<Board> for Vec<Vec<Tile>> {
    fn from(b: Board) -> Self {
        b.to_rows()
    }
}

/// Center a tile value in a seven character cell; blank for empty.
fn format_val(val: &Tile) -> String {
    match val {
        0 => String::from("       "),
        x => format!("{x:^7}"),
    }
}
