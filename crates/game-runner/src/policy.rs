use rand::Rng;
use rand::rngs::StdRng;
use twenty48_core::engine::{Board, Direction};

use crate::config::PolicyKind;

const CYCLE: [Direction; 4] = [
    Direction::Left,
    Direction::Down,
    Direction::Right,
    Direction::Up,
];

/// Chooses the next direction for an autoplayed game.
pub struct Policy {
    kind: PolicyKind,
    rng: StdRng,
    next: usize,
}

impl Policy {
    pub fn new(kind: PolicyKind, rng: StdRng) -> Self {
        Self { kind, rng, next: 0 }
    }

    /// Pick a direction for `board`. `Cycle` skips directions that would be
    /// rejected; `Random` may return one, which the session simply ignores.
    pub fn select(&mut self, board: &Board) -> Direction {
        match self.kind {
            PolicyKind::Random => Direction::ALL[self.rng.gen_range(0..Direction::ALL.len())],
            PolicyKind::Cycle => {
                for _ in 0..CYCLE.len() {
                    let dir = CYCLE[self.next % CYCLE.len()];
                    self.next += 1;
                    if board.shift(dir).board != *board {
                        return dir;
                    }
                }
                CYCLE[self.next % CYCLE.len()]
            }
        }
    }
}
