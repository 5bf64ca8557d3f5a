//! Board payload for mazes, chess-board puzzles and island maps.

use crate::grid::{CellKind, Coord, Grid};

/// Visual state of a board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CellVisual {
    #[default]
    Idle,
    Queued,
    Visiting,
    Visited,
    Path,
    /// A placement under consideration
    Testing,
    Queen,
    /// Threatened by a placed queen
    Attacked,
    /// Square the knight currently stands on
    Knight,
}

/// One cell at one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellView {
    pub kind: CellKind,
    pub state: CellVisual,
    /// Distance, move number or island id
    pub value: Option<u32>,
}

/// State of a board at one step.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoardSnapshot {
    pub rows: usize,
    pub cols: usize,
    pub cells: Vec<Vec<CellView>>,
    /// Cell the algorithm is looking at
    pub focus: Option<Coord>,
    /// Queue/stack contents, front first
    pub frontier: Vec<Coord>,
    pub path: Vec<Coord>,
    /// Length of the found path, if any
    pub distance: Option<u32>,
    pub moves: u32,
    pub islands: u32,
}

impl BoardSnapshot {
    /// A board of idle empty cells.
    pub fn empty(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![vec![CellView::default(); cols]; rows],
            focus: None,
            frontier: Vec::new(),
            path: Vec::new(),
            distance: None,
            moves: 0,
            islands: 0,
        }
    }

    /// Idle snapshot of an input grid.
    pub fn from_grid(grid: &Grid) -> Self {
        let mut board = Self::empty(grid.rows(), grid.cols());
        for (r, row) in board.cells.iter_mut().enumerate() {
            for (c, cell) in row.iter_mut().enumerate() {
                cell.kind = grid.get(Coord::new(r, c)).unwrap_or_default();
            }
        }
        board
    }

    /// Get a cell.
    pub fn cell(&self, at: Coord) -> &CellView {
        &self.cells[at.row][at.col]
    }

    /// Mutable cell.
    pub fn cell_mut(&mut self, at: Coord) -> &mut CellView {
        &mut self.cells[at.row][at.col]
    }

    /// Set a cell's visual state.
    pub fn set_state(&mut self, at: Coord, state: CellVisual) {
        self.cells[at.row][at.col].state = state;
    }

    /// Cells in a visual state, row-major.
    pub fn cells_in(&self, state: CellVisual) -> Vec<Coord> {
        let mut found = Vec::new();
        for (r, row) in self.cells.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                if cell.state == state {
                    found.push(Coord::new(r, c));
                }
            }
        }
        found
    }

    /// Numeric cell values as a plain matrix.
    pub fn values(&self) -> Vec<Vec<Option<u32>>> {
        self.cells
            .iter()
            .map(|row| row.iter().map(|c| c.value).collect())
            .collect()
    }
}
