//! N-Queens by column-wise backtracking.

use algotrace_core::{
    BoardSnapshot, CellVisual, Coord, Result, StepKind, Trace, TraceError, TraceRecorder,
};

/// Largest board accepted.
pub const MAX_QUEENS: usize = 12;

/// One move of the backtracking machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueensEvent {
    Testing { row: usize, col: usize, safe: bool },
    Placed { row: usize, col: usize },
    Removed { row: usize, col: usize },
    /// Every column holds a queen
    Solved,
    /// The first column ran out of rows
    Exhausted,
}

/// Whether a queen at `(row, col)` is safe from the queens in `placed`,
/// where `placed[c]` is the row of the queen in column `c`.
fn is_safe(placed: &[usize], row: usize, col: usize) -> bool {
    placed
        .iter()
        .enumerate()
        .all(|(c, &r)| r != row && r.abs_diff(row) != col - c)
}

/// Search for the first solution, trying rows top to bottom in each column.
pub fn queens_events(size: usize) -> Result<Vec<QueensEvent>> {
    if !(1..=MAX_QUEENS).contains(&size) {
        return Err(TraceError::BoardSize {
            size,
            min: 1,
            max: MAX_QUEENS,
        });
    }

    let mut placed: Vec<usize> = Vec::with_capacity(size);
    let mut next_row = 0;
    let mut events = Vec::new();

    loop {
        let col = placed.len();
        if col == size {
            events.push(QueensEvent::Solved);
            break;
        }
        if next_row == size {
            match placed.pop() {
                Some(row) => {
                    events.push(QueensEvent::Removed { row, col: col - 1 });
                    next_row = row + 1;
                }
                None => {
                    events.push(QueensEvent::Exhausted);
                    break;
                }
            }
            continue;
        }

        let row = next_row;
        let safe = is_safe(&placed, row, col);
        events.push(QueensEvent::Testing { row, col, safe });
        if safe {
            placed.push(row);
            events.push(QueensEvent::Placed { row, col });
            next_row = 0;
        } else {
            next_row += 1;
        }
    }

    Ok(events)
}

/// Repaint the board from the queens currently placed.
fn paint(board: &mut BoardSnapshot, placed: &[usize], testing: Option<Coord>) {
    for (r, row) in board.cells.iter_mut().enumerate() {
        for (c, cell) in row.iter_mut().enumerate() {
            let attacked = placed
                .iter()
                .enumerate()
                .any(|(qc, &qr)| qr == r || qc == c || qr.abs_diff(r) == qc.abs_diff(c));
            cell.state = if attacked { CellVisual::Attacked } else { CellVisual::Idle };
        }
    }
    for (c, &r) in placed.iter().enumerate() {
        board.set_state(Coord::new(r, c), CellVisual::Queen);
    }
    if let Some(at) = testing {
        board.set_state(at, CellVisual::Testing);
    }
    board.focus = testing;
}

/// Trace the search for the first N-Queens solution on a `size × size` board.
pub fn n_queens(size: usize) -> Result<Trace<BoardSnapshot>> {
    let events = queens_events(size)?;
    let mut rec = TraceRecorder::start(
        BoardSnapshot::empty(size, size),
        format!("Place {} queens on a {}×{} board", size, size, size),
    );
    let mut placed: Vec<usize> = Vec::with_capacity(size);

    for event in events {
        match event {
            QueensEvent::Testing { row, col, safe } => {
                let verdict = if safe { "safe" } else { "attacked" };
                rec.emit_with(
                    StepKind::Testing,
                    format!("Try row {} in column {}: {}", row, col, verdict),
                    |b| paint(b, &placed, Some(Coord::new(row, col))),
                );
            }
            QueensEvent::Placed { row, col } => {
                placed.push(row);
                rec.emit_with(
                    StepKind::Placed,
                    format!("Place queen at row {}, column {}", row, col),
                    |b| {
                        paint(b, &placed, None);
                        b.moves += 1;
                    },
                );
            }
            QueensEvent::Removed { row, col } => {
                placed.pop();
                rec.emit_with(
                    StepKind::Removed,
                    format!("Backtrack: remove queen at row {}, column {}", row, col),
                    |b| paint(b, &placed, None),
                );
            }
            QueensEvent::Solved => {
                let rows = placed.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ");
                rec.emit_with(
                    StepKind::Terminal,
                    format!("Solution found, rows by column: {}", rows),
                    |b| {
                        paint(b, &placed, None);
                        b.path = placed
                            .iter()
                            .enumerate()
                            .map(|(c, &r)| Coord::new(r, c))
                            .collect();
                    },
                );
            }
            QueensEvent::Exhausted => {
                rec.emit_with(
                    StepKind::Terminal,
                    format!("No solution exists for {} queens", size),
                    |b| paint(b, &placed, None),
                );
            }
        }
    }

    let trace = rec.finish();
    tracing::debug!(steps = trace.len(), size, "n-queens trace generated");
    Ok(trace)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solution(size: usize) -> Vec<Coord> {
        n_queens(size).unwrap().last().payload().cells_in(CellVisual::Queen)
    }

    #[test]
    fn four_queens_first_solution() {
        assert_eq!(
            solution(4),
            vec![Coord::new(0, 2), Coord::new(1, 0), Coord::new(2, 3), Coord::new(3, 1)]
        );
    }

    #[test]
    fn eight_queens_first_solution_by_column() {
        let trace = n_queens(8).unwrap();
        let rows: Vec<usize> = trace.last().payload().path.iter().map(|c| c.row).collect();
        assert_eq!(rows, vec![0, 4, 7, 5, 2, 6, 1, 3]);
    }

    #[test]
    fn two_and_three_have_no_solution() {
        for size in [2, 3] {
            let events = queens_events(size).unwrap();
            assert_eq!(events.last(), Some(&QueensEvent::Exhausted));
            assert!(solution(size).is_empty());
        }
    }

    #[test]
    fn single_queen() {
        assert_eq!(
            queens_events(1).unwrap(),
            vec![
                QueensEvent::Testing { row: 0, col: 0, safe: true },
                QueensEvent::Placed { row: 0, col: 0 },
                QueensEvent::Solved,
            ]
        );
    }

    #[test]
    fn placements_and_removals_balance() {
        let trace = n_queens(6).unwrap();
        assert_eq!(
            trace.count(StepKind::Placed) - trace.count(StepKind::Removed),
            6
        );
    }

    #[test]
    fn testing_cell_is_highlighted() {
        let trace = n_queens(4).unwrap();
        let step = trace.iter().find(|s| s.kind() == StepKind::Testing).unwrap();
        assert_eq!(step.payload().cells_in(CellVisual::Testing), vec![Coord::new(0, 0)]);
    }

    #[test]
    fn board_size_is_bounded() {
        assert!(n_queens(0).is_err());
        assert_eq!(
            n_queens(13).unwrap_err(),
            TraceError::BoardSize { size: 13, min: 1, max: 12 }
        );
    }
}
