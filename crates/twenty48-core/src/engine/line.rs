//! The single line-merge primitive every direction reduces to.

use super::state::{Score, Tile};

/// Compact and merge one line toward its start.
///
/// Zeros are dropped, then a single left-to-right pass merges each pair of
/// equal neighbours; a freshly merged tile never merges again in the same
/// pass. The result is padded with zeros back to the input length. Returns the
/// new line and the sum of the merged values.
///
/// ```
/// use twenty48_core::engine::compress_line;
/// assert_eq!(compress_line(&[2, 2, 2, 0]), (vec![4, 2, 0, 0], 4));
/// ```
pub fn compress_line(line: &[Tile]) -> (Vec<Tile>, Score) {
    let mut out = Vec::with_capacity(line.len());
    let mut score = 0;
    let mut pending: Option<Tile> = None;

    for &tile in line.iter().filter(|&&t| t != 0) {
        match pending {
            Some(prev) if prev == tile => {
                let merged = prev + tile;
                out.push(merged);
                score += merged;
                pending = None;
            }
            Some(prev) => {
                out.push(prev);
                pending = Some(tile);
            }
            None => pending = Some(tile),
        }
    }
    out.extend(pending);
    out.resize(line.len(), 0);
    (out, score)
}
