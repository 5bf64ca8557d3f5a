//! Knight's Tour with Warnsdorff's rule.

use algotrace_core::{
    BoardSnapshot, CellVisual, Coord, Grid, Result, StepKind, Trace, TraceError, TraceRecorder,
};

/// Knight offsets `(row, col)`, in the order candidates are evaluated.
pub const KNIGHT_MOVES: [(isize, isize); 8] = [
    (2, 1),
    (1, 2),
    (-1, 2),
    (-2, 1),
    (-2, -1),
    (-1, -2),
    (1, -2),
    (2, -1),
];

/// Smallest and largest tour boards accepted.
pub const TOUR_SIZES: std::ops::RangeInclusive<usize> = 5..=8;

/// How the next square is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KnightHeuristic {
    /// Move to the square with the fewest onward moves; the first candidate
    /// in [`KNIGHT_MOVES`] order wins ties. Never backtracks, so it can get
    /// stuck.
    #[default]
    Warnsdorff,
}

fn unvisited_moves(board: &Grid, visited: &[Vec<bool>], at: Coord) -> Vec<Coord> {
    KNIGHT_MOVES
        .iter()
        .filter_map(|&(dr, dc)| board.offset(at, dr, dc))
        .filter(|c| !visited[c.row][c.col])
        .collect()
}

/// Walk a knight from `start` until every square is visited or it is stuck.
pub fn knights_tour(
    size: usize,
    start: Coord,
    heuristic: KnightHeuristic,
) -> Result<Trace<BoardSnapshot>> {
    if !TOUR_SIZES.contains(&size) {
        return Err(TraceError::BoardSize {
            size,
            min: *TOUR_SIZES.start(),
            max: *TOUR_SIZES.end(),
        });
    }
    let board = Grid::new(size, size);
    board.check(start)?;

    let mut visited = vec![vec![false; size]; size];
    visited[start.row][start.col] = true;

    let mut initial = BoardSnapshot::from_grid(&board);
    initial.set_state(start, CellVisual::Knight);
    initial.cell_mut(start).value = Some(1);
    initial.focus = Some(start);
    initial.path = vec![start];
    initial.moves = 1;
    let mut rec = TraceRecorder::start(
        initial,
        format!("Knight's tour on {}×{} from {}", size, size, start),
    );

    let mut at = start;
    let mut number = 1u32;
    loop {
        let candidates = unvisited_moves(&board, &visited, at);
        let next = match heuristic {
            KnightHeuristic::Warnsdorff => candidates
                .iter()
                .copied()
                .min_by_key(|&c| unvisited_moves(&board, &visited, c).len()),
        };
        let Some(next) = next else { break };

        visited[next.row][next.col] = true;
        number += 1;
        let from = at;
        rec.emit_with(
            StepKind::Move,
            format!("Move {}: {} → {} ({} option(s))", number, from, next, candidates.len()),
            |b| {
                b.set_state(from, CellVisual::Visited);
                b.set_state(next, CellVisual::Knight);
                b.cell_mut(next).value = Some(number);
                b.focus = Some(next);
                b.path.push(next);
                b.moves = number;
            },
        );
        at = next;
    }

    let squares = size * size;
    let description = if number as usize == squares {
        format!("Tour complete: all {} squares visited", squares)
    } else {
        format!("No full tour from here: stuck after {} of {} squares", number, squares)
    };
    rec.emit(StepKind::Terminal, description);

    let trace = rec.finish();
    tracing::debug!(steps = trace.len(), visited = number, "knight's tour trace generated");
    Ok(trace)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eight_by_eight_corner_tour_completes() {
        let trace = knights_tour(8, Coord::new(0, 0), KnightHeuristic::Warnsdorff).unwrap();
        assert_eq!(trace.count(StepKind::Move), 63);
        assert_eq!(trace.last().payload().moves, 64);
        assert!(trace.last().description().starts_with("Tour complete"));
    }

    #[test]
    fn move_numbers_cover_the_board() {
        let trace = knights_tour(5, Coord::new(0, 0), KnightHeuristic::Warnsdorff).unwrap();
        let mut numbers: Vec<u32> = trace
            .last()
            .payload()
            .values()
            .into_iter()
            .flatten()
            .map(|v| v.unwrap())
            .collect();
        numbers.sort_unstable();
        assert_eq!(numbers, (1..=25).collect::<Vec<_>>());
    }

    #[test]
    fn five_by_five_tour_follows_warnsdorff() {
        let trace = knights_tour(5, Coord::new(0, 0), KnightHeuristic::Warnsdorff).unwrap();
        let values = trace.last().payload().values();
        assert_eq!(values[0], vec![Some(1), Some(22), Some(11), Some(16), Some(7)]);
        assert_eq!(values[2][1], Some(2));
    }

    #[test]
    fn consecutive_squares_are_a_knight_move_apart() {
        let trace = knights_tour(6, Coord::new(2, 2), KnightHeuristic::Warnsdorff).unwrap();
        let path = &trace.last().payload().path;
        assert_eq!(path.len(), 36);
        for pair in path.windows(2) {
            let dr = pair[0].row.abs_diff(pair[1].row);
            let dc = pair[0].col.abs_diff(pair[1].col);
            assert!((dr, dc) == (1, 2) || (dr, dc) == (2, 1));
        }
    }

    #[test]
    fn stuck_knight_ends_without_backtracking() {
        // Odd-colored start on 5×5 cannot tour.
        let trace = knights_tour(5, Coord::new(1, 2), KnightHeuristic::Warnsdorff).unwrap();
        assert_eq!(trace.last().payload().moves, 8);
        assert!(trace.last().description().starts_with("No full tour"));
    }

    #[test]
    fn board_and_start_are_validated() {
        assert_eq!(
            knights_tour(4, Coord::new(0, 0), KnightHeuristic::Warnsdorff).unwrap_err(),
            TraceError::BoardSize { size: 4, min: 5, max: 8 }
        );
        assert!(knights_tour(5, Coord::new(5, 0), KnightHeuristic::Warnsdorff).is_err());
    }
}
