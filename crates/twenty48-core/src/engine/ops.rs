use super::line::compress_line;
use super::state::{Board, Direction, MoveOutcome, Tile};
use crate::error::EngineError;
use crate::rng::{TileSource, spawn_value};

/// All-zero `size` x `size` board. Fails for sizes below 2.
pub fn create_empty_board(size: usize) -> Result<Board, EngineError> {
    Board::new(size)
}

/// Coordinates of every zero cell in row-major scan order.
pub fn empty_cells(board: &Board) -> Vec<(usize, usize)> {
    let n = board.size();
    board
        .tiles()
        .enumerate()
        .filter(|&(_, t)| t == 0)
        .map(|(idx, _)| (idx / n, idx % n))
        .collect()
}

/// Place a 2 (90%) or 4 (10%) on a uniformly chosen empty cell.
///
/// A full board comes back unchanged.
pub fn spawn_random_tile<S: TileSource + ?Sized>(board: &Board, source: &mut S) -> Board {
    let empty = empty_cells(board);
    if empty.is_empty() {
        return board.clone();
    }
    let (row, col) = empty[source.pick(empty.len())];
    board.with_cell(row, col, spawn_value(source))
}

/// Slide/merge tiles in the given direction. No randomness.
pub fn shift(board: &Board, direction: Direction) -> MoveOutcome {
    match direction {
        Direction::Up => move_up(board),
        Direction::Down => move_down(board),
        Direction::Left => move_left(board),
        Direction::Right => move_right(board),
    }
}

/// Compress every row toward column 0.
pub fn move_left(board: &Board) -> MoveOutcome {
    let n = board.size();
    let mut cells = Vec::with_capacity(n * n);
    let mut score_delta = 0;
    for row in board.rows() {
        let (line, score) = compress_line(row);
        cells.extend(line);
        score_delta += score;
    }
    MoveOutcome {
        board: Board::from_cells(n, cells),
        score_delta,
    }
}

/// Mirror, move left, mirror back.
pub fn move_right(board: &Board) -> MoveOutcome {
    let MoveOutcome { board, score_delta } = move_left(&reverse_rows(board));
    MoveOutcome {
        board: reverse_rows(&board),
        score_delta,
    }
}

/// Transpose, move left, transpose back.
pub fn move_up(board: &Board) -> MoveOutcome {
    let MoveOutcome { board, score_delta } = move_left(&transpose(board));
    MoveOutcome {
        board: transpose(&board),
        score_delta,
    }
}

/// Transpose, move right, transpose back.
pub fn move_down(board: &Board) -> MoveOutcome {
    let MoveOutcome { board, score_delta } = move_right(&transpose(board));
    MoveOutcome {
        board: transpose(&board),
        score_delta,
    }
}

/// Swap rows and columns.
pub fn transpose(board: &Board) -> Board {
    let n = board.size();
    let src = board.cells();
    let cells = (0..n * n).map(|idx| src[(idx % n) * n + idx / n]).collect();
    Board::from_cells(n, cells)
}

/// Reverse the order of cells within every row.
pub fn reverse_rows(board: &Board) -> Board {
    let cells = board
        .rows()
        .flat_map(|row| row.iter().rev().copied())
        .collect();
    Board::from_cells(board.size(), cells)
}

/// True if any empty cell exists or any two orthogonal neighbours are equal.
///
/// Equivalent to "some direction changes the board" without running the movers.
pub fn can_move(board: &Board) -> bool {
    let n = board.size();
    let cells = board.cells();
    if cells.contains(&0) {
        return true;
    }
    let horizontal = board.rows().any(|row| row.windows(2).any(|w| w[0] == w[1]));
    let vertical = (0..n * (n - 1)).any(|idx| cells[idx] == cells[idx + n]);
    horizontal || vertical
}

/// True iff some cell equals `target`.
pub fn has_reached_target(board: &Board, target: Tile) -> bool {
    board.tiles().any(|t| t == target)
}

/// True if no move in any direction changes the board.
pub fn is_game_over(board: &Board) -> bool {
    !can_move(board)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::Fixed;
    use rand::{Rng, SeedableRng, rngs::StdRng};

    fn board(rows: &[&[Tile]]) -> Board {
        Board::from_rows(rows.iter().map(|r| r.to_vec()).collect()).unwrap()
    }

    /// Random board mixing empties and small tiles; `fill` is the chance a cell is occupied.
    fn random_board(rng: &mut StdRng, size: usize, fill: f64) -> Board {
        let rows: Vec<Vec<Tile>> = (0..size)
            .map(|_| {
                (0..size)
                    .map(|_| {
                        if rng.gen_bool(fill) {
                            Tile::pow(2, rng.gen_range(1..6))
                        } else {
                            0
                        }
                    })
                    .collect()
            })
            .collect();
        Board::from_rows(rows).unwrap()
    }

    #[test]
    fn test_move_left() {
        let game = board(&[&[2, 4, 8, 16], &[2, 8, 8, 4], &[4, 0, 0, 4], &[2, 0, 0, 4]]);
        let out = move_left(&game);
        assert_eq!(
            out.board,
            board(&[&[2, 4, 8, 16], &[2, 16, 4, 0], &[8, 0, 0, 0], &[2, 4, 0, 0]])
        );
        assert_eq!(out.score_delta, 24);
    }

    #[test]
    fn test_move_right() {
        let game = board(&[&[2, 4, 8, 16], &[2, 8, 8, 4], &[4, 0, 0, 4], &[2, 0, 0, 4]]);
        let out = move_right(&game);
        assert_eq!(
            out.board,
            board(&[&[2, 4, 8, 16], &[0, 2, 16, 4], &[0, 0, 0, 8], &[0, 0, 2, 4]])
        );
        assert_eq!(out.score_delta, 24);
    }

    #[test]
    fn test_move_up() {
        let game = board(&[&[2, 2, 4, 2], &[4, 8, 0, 0], &[8, 8, 0, 0], &[16, 4, 4, 4]]);
        let out = move_up(&game);
        assert_eq!(
            out.board,
            board(&[&[2, 2, 8, 2], &[4, 16, 0, 4], &[8, 4, 0, 0], &[16, 0, 0, 0]])
        );
        assert_eq!(out.score_delta, 24);
    }

    #[test]
    fn test_move_down() {
        let game = board(&[&[2, 2, 4, 2], &[4, 8, 0, 0], &[8, 8, 0, 0], &[16, 4, 4, 4]]);
        let out = move_down(&game);
        assert_eq!(
            out.board,
            board(&[&[2, 0, 0, 0], &[4, 2, 0, 0], &[8, 16, 0, 2], &[16, 4, 8, 4]])
        );
        assert_eq!(out.score_delta, 24);
    }

    #[test]
    fn shift_dispatches_by_direction() {
        let game = board(&[&[0, 2, 0], &[2, 0, 2], &[0, 0, 4]]);
        assert_eq!(shift(&game, Direction::Left), move_left(&game));
        assert_eq!(shift(&game, Direction::Right), move_right(&game));
        assert_eq!(shift(&game, Direction::Up), move_up(&game));
        assert_eq!(shift(&game, Direction::Down), move_down(&game));
    }

    #[test]
    fn move_leaves_input_untouched() {
        let game = board(&[&[2, 2], &[0, 4]]);
        let snapshot = game.clone();
        let _ = move_left(&game);
        let _ = move_down(&game);
        assert_eq!(game, snapshot);
    }

    #[test]
    fn blocked_move_is_identity() {
        let game = board(&[&[2, 4], &[8, 16]]);
        for dir in Direction::ALL {
            let out = shift(&game, dir);
            assert_eq!(out.board, game);
            assert_eq!(out.score_delta, 0);
        }
    }

    #[test]
    fn slide_without_merge_changes_board_with_zero_score() {
        let game = board(&[&[0, 2], &[0, 4]]);
        let out = move_left(&game);
        assert_ne!(out.board, game);
        assert_eq!(out.score_delta, 0);
    }

    #[test]
    fn it_transpose_and_reverse() {
        let game = board(&[&[2, 4, 8], &[16, 32, 64], &[0, 0, 2]]);
        assert_eq!(
            transpose(&game),
            board(&[&[2, 16, 0], &[4, 32, 0], &[8, 64, 2]])
        );
        assert_eq!(
            reverse_rows(&game),
            board(&[&[8, 4, 2], &[64, 32, 16], &[2, 0, 0]])
        );
        assert_eq!(transpose(&transpose(&game)), game);
        assert_eq!(reverse_rows(&reverse_rows(&game)), game);
    }

    #[test]
    fn orientation_symmetry() {
        let mut rng = StdRng::seed_from_u64(7);
        for size in 2..7 {
            for _ in 0..100 {
                let b = random_board(&mut rng, size, 0.6);

                let right = move_right(&b);
                let via_left = move_left(&reverse_rows(&b));
                assert_eq!(right.board, reverse_rows(&via_left.board));
                assert_eq!(right.score_delta, via_left.score_delta);

                let up = move_up(&b);
                let via_left = move_left(&transpose(&b));
                assert_eq!(up.board, transpose(&via_left.board));
                assert_eq!(up.score_delta, via_left.score_delta);

                let down = move_down(&b);
                let via_right = move_right(&transpose(&b));
                assert_eq!(down.board, transpose(&via_right.board));
                assert_eq!(down.score_delta, via_right.score_delta);
            }
        }
    }

    #[test]
    fn moves_conserve_tile_sum() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..500 {
            let b = random_board(&mut rng, 4, 0.7);
            for dir in Direction::ALL {
                assert_eq!(shift(&b, dir).board.tile_sum(), b.tile_sum());
            }
        }
    }

    #[test]
    fn can_move_matches_movers() {
        let mut rng = StdRng::seed_from_u64(2048);
        for size in 2..6 {
            for fill in [0.5, 0.9, 1.0] {
                for _ in 0..300 {
                    let b = random_board(&mut rng, size, fill);
                    let any_change = Direction::ALL.iter().any(|&d| shift(&b, d).board != b);
                    assert_eq!(can_move(&b), any_change, "{b:?}");
                    assert_eq!(is_game_over(&b), !any_change);
                }
            }
        }
    }

    #[test]
    fn can_move_on_full_boards() {
        let stuck = board(&[&[2, 4, 2], &[4, 2, 4], &[2, 4, 2]]);
        assert!(!can_move(&stuck));
        assert!(is_game_over(&stuck));

        let horizontal = board(&[&[2, 4, 2], &[4, 8, 8], &[2, 4, 2]]);
        assert!(can_move(&horizontal));

        let vertical = board(&[&[2, 4, 2], &[4, 2, 8], &[2, 4, 8]]);
        assert!(can_move(&vertical));
    }

    #[test]
    fn terminal_loss_two_by_two() {
        let b = board(&[&[2, 4], &[8, 16]]);
        assert!(is_game_over(&b));
        assert!(!is_game_over(&board(&[&[2, 4], &[8, 0]])));
    }

    #[test]
    fn it_has_reached_target() {
        let b = board(&[&[2, 4], &[2048, 0]]);
        assert!(has_reached_target(&b, 2048));
        assert!(!has_reached_target(&b, 4096));
        assert!(!has_reached_target(&board(&[&[1024, 4096], &[0, 0]]), 2048));
    }

    #[test]
    fn it_empty_cells_row_major() {
        let b = board(&[&[0, 2, 0], &[4, 0, 8], &[2, 2, 0]]);
        assert_eq!(empty_cells(&b), vec![(0, 0), (0, 2), (1, 1), (2, 2)]);
        assert!(empty_cells(&board(&[&[2, 4], &[8, 16]])).is_empty());
        assert_eq!(empty_cells(&create_empty_board(2).unwrap()).len(), 4);
        assert!(create_empty_board(1).is_err());
    }

    #[test]
    fn spawn_uses_picked_empty_cell() {
        let b = board(&[&[0, 2, 0], &[4, 0, 8], &[2, 2, 0]]);
        let out = spawn_random_tile(&b, &mut Fixed { pick: 2, four: false });
        assert_eq!(out, board(&[&[0, 2, 0], &[4, 2, 8], &[2, 2, 0]]));
        let out = spawn_random_tile(&b, &mut Fixed { pick: 0, four: true });
        assert_eq!(out, board(&[&[4, 2, 0], &[4, 0, 8], &[2, 2, 0]]));
    }

    #[test]
    fn spawn_on_full_board_is_noop() {
        let b = board(&[&[2, 4], &[8, 16]]);
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(spawn_random_tile(&b, &mut rng), b);
    }

    #[test]
    fn spawn_preserves_existing_tiles() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..500 {
            let b = random_board(&mut rng, 4, 0.5);
            let out = spawn_random_tile(&b, &mut rng);
            let changed: Vec<(Tile, Tile)> = b
                .tiles()
                .zip(out.tiles())
                .filter(|(before, after)| before != after)
                .collect();
            if b.count_empty() == 0 {
                assert!(changed.is_empty());
            } else {
                assert_eq!(changed.len(), 1);
                let (before, after) = changed[0];
                assert_eq!(before, 0);
                assert!(after == 2 || after == 4);
            }
        }
    }

    #[test]
    fn it_test_insert_random_tile() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut game = create_empty_board(4).unwrap();
        for _ in 0..16 {
            game = spawn_random_tile(&game, &mut rng);
        }
        assert_eq!(game.count_empty(), 0);
    }
}
