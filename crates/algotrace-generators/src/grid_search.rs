//! Breadth- and depth-first search on boards: mazes, knight distances and
//! island counting.

use std::collections::VecDeque;

use algotrace_core::{
    BoardSnapshot, CellKind, CellVisual, Coord, Grid, Result, StepKind, Trace, TraceError,
    TraceRecorder,
};

use crate::knight::KNIGHT_MOVES;

/// Orthogonal neighbors: up, right, down, left.
pub const DIRECTIONS: [(isize, isize); 4] = [(-1, 0), (0, 1), (1, 0), (0, -1)];

/// Largest board accepted by [`min_knight_moves`].
pub const MAX_KNIGHT_BOARD: usize = 16;

/// Shortest path through a maze from its `S` cell to its `E` cell.
pub fn maze_bfs(grid: &Grid) -> Result<Trace<BoardSnapshot>> {
    let (start, end) = endpoints(grid)?;
    grid_bfs(grid, start, end)
}

/// Shortest 4-directional path between two open cells.
pub fn grid_bfs(grid: &Grid, start: Coord, end: Coord) -> Result<Trace<BoardSnapshot>> {
    check_open(grid, start)?;
    check_open(grid, end)?;
    Ok(bfs_board(grid, start, end, &DIRECTIONS, "Maze BFS"))
}

/// Fewest knight moves between two squares of an empty `size × size` board.
pub fn min_knight_moves(size: usize, start: Coord, target: Coord) -> Result<Trace<BoardSnapshot>> {
    if !(1..=MAX_KNIGHT_BOARD).contains(&size) {
        return Err(TraceError::BoardSize {
            size,
            min: 1,
            max: MAX_KNIGHT_BOARD,
        });
    }
    let board = Grid::new(size, size);
    board.check(start)?;
    board.check(target)?;
    Ok(bfs_board(&board, start, target, &KNIGHT_MOVES, "Knight BFS"))
}

fn endpoints(grid: &Grid) -> Result<(Coord, Coord)> {
    let start = grid
        .find(CellKind::Start)
        .ok_or_else(|| TraceError::InvalidInput("maze has no start cell".into()))?;
    let end = grid
        .find(CellKind::End)
        .ok_or_else(|| TraceError::InvalidInput("maze has no end cell".into()))?;
    Ok((start, end))
}

fn check_open(grid: &Grid, at: Coord) -> Result<()> {
    grid.check(at)?;
    match grid.get(at) {
        Some(kind) if kind.is_open() => Ok(()),
        _ => Err(TraceError::BlockedCell {
            row: at.row,
            col: at.col,
        }),
    }
}

fn neighbors<'a>(
    grid: &'a Grid,
    at: Coord,
    moves: &'a [(isize, isize)],
) -> impl Iterator<Item = Coord> + 'a {
    moves
        .iter()
        .filter_map(move |&(dr, dc)| grid.offset(at, dr, dc))
        .filter(move |&c| grid.get(c).is_some_and(CellKind::is_open))
}

/// Walk `parent` links back from `end`; returns cells start first.
fn reconstruct(parent: &[Vec<Option<Coord>>], start: Coord, end: Coord) -> Vec<Coord> {
    let mut path = vec![end];
    let mut at = end;
    while at != start {
        match parent[at.row][at.col] {
            Some(p) => {
                path.push(p);
                at = p;
            }
            None => break,
        }
    }
    path.reverse();
    path
}

fn finish_path(
    mut rec: TraceRecorder<BoardSnapshot>,
    name: &str,
    path: Option<Vec<Coord>>,
) -> Trace<BoardSnapshot> {
    match path {
        Some(path) => {
            let distance = path.len().saturating_sub(1) as u32;
            rec.emit_with(
                StepKind::Path,
                format!("{}: path of length {} found", name, distance),
                |b| {
                    for &c in &path {
                        b.set_state(c, CellVisual::Path);
                    }
                    b.frontier.clear();
                    b.focus = None;
                    b.path = path;
                    b.distance = Some(distance);
                },
            );
        }
        None => {
            rec.emit_with(StepKind::Terminal, format!("{}: no path", name), |b| {
                b.frontier.clear();
                b.focus = None;
            });
        }
    }
    let trace = rec.finish();
    tracing::debug!(steps = trace.len(), "{} trace generated", name);
    trace
}

/// BFS from `start` to `end` using `moves`, writing distances into cells.
fn bfs_board(
    grid: &Grid,
    start: Coord,
    end: Coord,
    moves: &[(isize, isize)],
    name: &str,
) -> Trace<BoardSnapshot> {
    let (rows, cols) = (grid.rows(), grid.cols());
    let mut dist: Vec<Vec<Option<u32>>> = vec![vec![None; cols]; rows];
    let mut parent: Vec<Vec<Option<Coord>>> = vec![vec![None; cols]; rows];
    let mut queue = VecDeque::new();

    let mut rec = TraceRecorder::start(
        BoardSnapshot::from_grid(grid),
        format!("{} from {} to {}", name, start, end),
    );

    dist[start.row][start.col] = Some(0);
    queue.push_back(start);
    rec.emit_with(StepKind::Enqueue, format!("Enqueue {}", start), |b| {
        b.set_state(start, CellVisual::Queued);
        b.cell_mut(start).value = Some(0);
        b.frontier = vec![start];
    });

    let mut found = false;
    while let Some(u) = queue.pop_front() {
        let du = dist[u.row][u.col].unwrap_or_default();
        let frontier: Vec<_> = queue.iter().copied().collect();
        rec.emit_with(
            StepKind::Dequeue,
            format!("Dequeue {} at distance {}", u, du),
            |b| {
                b.set_state(u, CellVisual::Visiting);
                b.focus = Some(u);
                b.frontier = frontier;
            },
        );
        if u == end {
            found = true;
            break;
        }

        for v in neighbors(grid, u, moves) {
            if dist[v.row][v.col].is_some() {
                continue;
            }
            dist[v.row][v.col] = Some(du + 1);
            parent[v.row][v.col] = Some(u);
            queue.push_back(v);
            let frontier: Vec<_> = queue.iter().copied().collect();
            rec.emit_with(
                StepKind::Enqueue,
                format!("Enqueue {} at distance {}", v, du + 1),
                |b| {
                    b.set_state(v, CellVisual::Queued);
                    b.cell_mut(v).value = Some(du + 1);
                    b.frontier = frontier;
                },
            );
        }

        rec.emit_with(StepKind::Finalize, format!("{} visited", u), |b| {
            b.set_state(u, CellVisual::Visited);
        });
    }

    let path = found.then(|| reconstruct(&parent, start, end));
    finish_path(rec, name, path)
}

/// Depth-first search through a maze from `S` to `E`.
///
/// Cells are marked visited when popped. The path found follows the DFS
/// tree and is not necessarily the shortest.
pub fn maze_dfs(grid: &Grid) -> Result<Trace<BoardSnapshot>> {
    let (start, end) = endpoints(grid)?;
    let (rows, cols) = (grid.rows(), grid.cols());
    let mut visited = vec![vec![false; cols]; rows];
    let mut parent: Vec<Vec<Option<Coord>>> = vec![vec![None; cols]; rows];
    let mut depth: Vec<Vec<u32>> = vec![vec![0; cols]; rows];
    let mut stack: Vec<(Coord, Option<Coord>)> = vec![(start, None)];

    let mut initial = BoardSnapshot::from_grid(grid);
    initial.set_state(start, CellVisual::Queued);
    initial.frontier = vec![start];
    let mut rec = TraceRecorder::start(initial, format!("Maze DFS from {} to {}", start, end));

    let mut found = false;
    while let Some((u, from)) = stack.pop() {
        if visited[u.row][u.col] {
            continue;
        }
        visited[u.row][u.col] = true;
        parent[u.row][u.col] = from;
        let d = from.map_or(0, |p| depth[p.row][p.col] + 1);
        depth[u.row][u.col] = d;
        let frontier: Vec<_> = stack.iter().rev().map(|&(c, _)| c).collect();
        rec.emit_with(StepKind::Dequeue, format!("Pop {} at depth {}", u, d), |b| {
            b.set_state(u, CellVisual::Visiting);
            b.cell_mut(u).value = Some(d);
            b.focus = Some(u);
            b.frontier = frontier;
        });
        if u == end {
            found = true;
            break;
        }

        let next: Vec<Coord> = neighbors(grid, u, &DIRECTIONS)
            .filter(|v| !visited[v.row][v.col])
            .collect();
        for &v in next.iter().rev() {
            stack.push((v, Some(u)));
            let frontier: Vec<_> = stack.iter().rev().map(|&(c, _)| c).collect();
            rec.emit_with(StepKind::Enqueue, format!("Push {}", v), |b| {
                b.set_state(v, CellVisual::Queued);
                b.frontier = frontier;
            });
        }

        rec.emit_with(StepKind::Finalize, format!("{} visited", u), |b| {
            b.set_state(u, CellVisual::Visited);
        });
    }

    let path = found.then(|| reconstruct(&parent, start, end));
    Ok(finish_path(rec, "Maze DFS", path))
}

/// Count 4-connected regions of land cells, numbering them from 1 in
/// row-major order of their first cell.
pub fn count_islands(grid: &Grid) -> Trace<BoardSnapshot> {
    let (rows, cols) = (grid.rows(), grid.cols());
    let is_land = |c: Coord| grid.get(c) == Some(CellKind::Land);
    let mut seen = vec![vec![false; cols]; rows];
    let mut islands = 0u32;

    let mut rec = TraceRecorder::start(
        BoardSnapshot::from_grid(grid),
        format!("Count islands on a {}×{} map", rows, cols),
    );

    for r in 0..rows {
        for c in 0..cols {
            let origin = Coord::new(r, c);
            if seen[r][c] || !is_land(origin) {
                continue;
            }
            islands += 1;
            let id = islands;
            seen[r][c] = true;
            let mut queue = VecDeque::from([origin]);
            rec.emit_with(
                StepKind::Found,
                format!("Island {} starts at {}", id, origin),
                |b| {
                    b.set_state(origin, CellVisual::Queued);
                    b.cell_mut(origin).value = Some(id);
                    b.focus = Some(origin);
                    b.frontier = vec![origin];
                    b.islands = id;
                },
            );

            while let Some(u) = queue.pop_front() {
                let frontier: Vec<_> = queue.iter().copied().collect();
                rec.emit_with(
                    StepKind::Dequeue,
                    format!("Dequeue {} from island {}", u, id),
                    |b| {
                        b.set_state(u, CellVisual::Visiting);
                        b.focus = Some(u);
                        b.frontier = frontier;
                    },
                );

                for v in neighbors(grid, u, &DIRECTIONS) {
                    if seen[v.row][v.col] || !is_land(v) {
                        continue;
                    }
                    seen[v.row][v.col] = true;
                    queue.push_back(v);
                    let frontier: Vec<_> = queue.iter().copied().collect();
                    rec.emit_with(
                        StepKind::Enqueue,
                        format!("Enqueue {} into island {}", v, id),
                        |b| {
                            b.set_state(v, CellVisual::Queued);
                            b.cell_mut(v).value = Some(id);
                            b.frontier = frontier;
                        },
                    );
                }

                rec.emit_with(StepKind::Finalize, format!("{} visited", u), |b| {
                    b.set_state(u, CellVisual::Visited);
                });
            }
        }
    }

    rec.emit_with(
        StepKind::Terminal,
        format!("{} island(s) found", islands),
        |b| {
            b.focus = None;
            b.frontier.clear();
            b.islands = islands;
        },
    );

    let trace = rec.finish();
    tracing::debug!(steps = trace.len(), islands, "island count trace generated");
    trace
}

#[cfg(test)]
mod tests {
    use super::*;

    fn maze() -> Grid {
        Grid::parse(
            "S.#
             .##
             ..E",
        )
        .unwrap()
    }

    #[test]
    fn maze_bfs_finds_shortest_route() {
        let trace = maze_bfs(&maze()).unwrap();
        let last = trace.last().payload();
        assert_eq!(trace.last().kind(), StepKind::Path);
        assert_eq!(last.distance, Some(4));
        assert_eq!(
            last.path,
            vec![
                Coord::new(0, 0),
                Coord::new(1, 0),
                Coord::new(2, 0),
                Coord::new(2, 1),
                Coord::new(2, 2)
            ]
        );
        assert_eq!(last.cell(Coord::new(2, 2)).value, Some(4));
    }

    #[test]
    fn maze_bfs_explores_up_right_down_left() {
        let trace = maze_bfs(&maze()).unwrap();
        let enqueued: Vec<Coord> = trace
            .iter()
            .filter(|s| s.kind() == StepKind::Enqueue)
            .map(|s| *s.payload().frontier.last().unwrap())
            .collect();
        assert_eq!(&enqueued[..3], &[Coord::new(0, 0), Coord::new(0, 1), Coord::new(1, 0)]);
    }

    #[test]
    fn walled_off_end_has_no_path() {
        let trace = maze_bfs(&Grid::parse("S#E").unwrap()).unwrap();
        assert_eq!(trace.last().kind(), StepKind::Terminal);
        assert_eq!(trace.last().payload().distance, None);
    }

    #[test]
    fn maze_without_markers_is_rejected() {
        assert!(maze_bfs(&Grid::parse("..\n..").unwrap()).is_err());
    }

    #[test]
    fn wall_endpoint_is_blocked() {
        let grid = Grid::parse("..#").unwrap();
        assert_eq!(
            grid_bfs(&grid, Coord::new(0, 0), Coord::new(0, 2)).unwrap_err(),
            TraceError::BlockedCell { row: 0, col: 2 }
        );
        assert!(grid_bfs(&grid, Coord::new(0, 0), Coord::new(3, 0)).is_err());
    }

    #[test]
    fn maze_dfs_follows_its_tree() {
        let trace = maze_dfs(&maze()).unwrap();
        let last = trace.last().payload();
        assert_eq!(last.path.first(), Some(&Coord::new(0, 0)));
        assert_eq!(last.path.last(), Some(&Coord::new(2, 2)));
        assert_eq!(last.distance, Some(4));
        // The dead end at (0, 1) is popped before the route down.
        let first_pop = trace
            .iter()
            .filter(|s| s.kind() == StepKind::Dequeue)
            .nth(1)
            .and_then(|s| s.payload().focus);
        assert_eq!(first_pop, Some(Coord::new(0, 1)));
    }

    #[test]
    fn knight_distance_corner_to_corner() {
        let trace = min_knight_moves(8, Coord::new(0, 0), Coord::new(7, 7)).unwrap();
        assert_eq!(trace.last().payload().distance, Some(6));
        assert_eq!(trace.last().payload().path.len(), 7);
    }

    #[test]
    fn knight_needs_four_moves_to_diagonal_neighbor_from_corner() {
        let trace = min_knight_moves(8, Coord::new(0, 0), Coord::new(1, 1)).unwrap();
        assert_eq!(trace.last().payload().distance, Some(4));
    }

    #[test]
    fn knight_cannot_reach_center_of_three_by_three() {
        let trace = min_knight_moves(3, Coord::new(0, 0), Coord::new(1, 1)).unwrap();
        assert_eq!(trace.last().kind(), StepKind::Terminal);
    }

    #[test]
    fn islands_are_numbered_in_scan_order() {
        let grid = Grid::parse(
            "11000
             11000
             00100
             00011",
        )
        .unwrap();
        let trace = count_islands(&grid);
        let last = trace.last().payload();
        assert_eq!(last.islands, 3);
        assert_eq!(trace.count(StepKind::Found), 3);
        assert_eq!(trace.count(StepKind::Dequeue), 7);
        assert_eq!(trace.count(StepKind::Finalize), 7);
        // Each island's first cell is queued by its Found step.
        assert_eq!(trace.count(StepKind::Enqueue), 4);
        assert_eq!(last.cell(Coord::new(1, 1)).value, Some(1));
        assert_eq!(last.cell(Coord::new(2, 2)).value, Some(2));
        assert_eq!(last.cell(Coord::new(3, 4)).value, Some(3));
        assert_eq!(last.cell(Coord::new(0, 4)).value, None);
    }

    #[test]
    fn island_flood_dequeues_before_enqueueing_neighbors() {
        let trace = count_islands(&Grid::parse("11\n10").unwrap());
        let kinds: Vec<_> = trace.iter().map(|s| s.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                StepKind::Initial,
                StepKind::Found,
                StepKind::Dequeue,
                StepKind::Enqueue,
                StepKind::Enqueue,
                StepKind::Finalize,
                StepKind::Dequeue,
                StepKind::Finalize,
                StepKind::Dequeue,
                StepKind::Finalize,
                StepKind::Terminal,
            ]
        );
        assert_eq!(trace[3].payload().frontier, vec![Coord::new(0, 1)]);
        assert_eq!(trace[4].payload().frontier, vec![Coord::new(0, 1), Coord::new(1, 0)]);
    }

    #[test]
    fn all_water_has_no_islands() {
        let trace = count_islands(&Grid::parse("00\n00").unwrap());
        assert_eq!(trace.len(), 2);
        assert_eq!(trace.last().payload().islands, 0);
    }
}
