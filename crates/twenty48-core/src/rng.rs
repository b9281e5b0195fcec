use rand::Rng;

use crate::engine::Tile;

/// Probability that a spawned tile is a 4 instead of a 2.
pub const SPAWN_FOUR_PROBABILITY: f64 = 0.1;

/// Source of the randomness needed to spawn tiles.
///
/// Any `rand::Rng` is a `TileSource`, so a seeded `StdRng` gives reproducible
/// games:
/// ```
/// use rand::{SeedableRng, rngs::StdRng};
/// use twenty48_core::rng::TileSource;
///
/// let mut a = StdRng::seed_from_u64(7);
/// let mut b = StdRng::seed_from_u64(7);
/// assert_eq!(a.pick(16), b.pick(16));
/// ```
pub trait TileSource {
    /// Uniform pick in `0..n`. `n` must be non-zero.
    fn pick(&mut self, n: usize) -> usize;

    /// True with probability `p`.
    fn chance(&mut self, p: f64) -> bool;
}

impl<R: Rng + ?Sized> TileSource for R {
    #[inline]
    fn pick(&mut self, n: usize) -> usize {
        self.gen_range(0..n)
    }

    #[inline]
    fn chance(&mut self, p: f64) -> bool {
        self.gen_bool(p)
    }
}

/// Draw the value of a freshly spawned tile: 2 (90%) or 4 (10%).
pub(crate) fn spawn_value<S: TileSource + ?Sized>(source: &mut S) -> Tile {
    if source.chance(SPAWN_FOUR_PROBABILITY) { 4 } else { 2 }
}

/// Scripted source for exercising exact spawn decisions in tests.
#[cfg(test)]
pub(crate) struct Fixed {
    pub pick: usize,
    pub four: bool,
}

#[cfg(test)]
impl TileSource for Fixed {
    fn pick(&mut self, n: usize) -> usize {
        self.pick.min(n - 1)
    }
    fn chance(&mut self, _p: f64) -> bool {
        self.four
    }
}
