//! Rectangular board input structure.

use crate::error::{Result, TraceError};

/// A cell position on a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    /// Create a coordinate.
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// What a board cell is made of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CellKind {
    #[default]
    Empty,
    Wall,
    Start,
    End,
    Land,
    Water,
}

impl CellKind {
    /// Whether a path search may step onto this cell.
    pub fn is_open(self) -> bool {
        !matches!(self, CellKind::Wall)
    }

    fn from_char(c: char) -> Option<Self> {
        match c {
            '.' => Some(CellKind::Empty),
            '#' => Some(CellKind::Wall),
            'S' => Some(CellKind::Start),
            'E' => Some(CellKind::End),
            '1' => Some(CellKind::Land),
            '0' => Some(CellKind::Water),
            _ => None,
        }
    }
}

/// A rows × cols board stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<CellKind>,
}

impl Grid {
    /// Create a board of empty cells.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![CellKind::Empty; rows * cols],
        }
    }

    /// Build a board from rows of cells. Rows must share one length.
    pub fn from_rows(rows: Vec<Vec<CellKind>>) -> Result<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        if let Some(bad) = rows.iter().position(|r| r.len() != cols) {
            return Err(TraceError::InvalidInput(format!(
                "row {} has {} cells, expected {}",
                bad,
                rows[bad].len(),
                cols
            )));
        }
        Ok(Self {
            rows: rows.len(),
            cols,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    /// Parse a board drawn as text, one line per row.
    ///
    /// `.` empty, `#` wall, `S` start, `E` end, `1` land, `0` water.
    /// Surrounding whitespace on each line is ignored.
    pub fn parse(text: &str) -> Result<Self> {
        let rows = text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(|line| {
                line.chars()
                    .map(|c| {
                        CellKind::from_char(c).ok_or_else(|| {
                            TraceError::InvalidInput(format!("unknown cell character {:?}", c))
                        })
                    })
                    .collect::<Result<Vec<_>>>()
            })
            .collect::<Result<Vec<_>>>()?;
        Self::from_rows(rows)
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Get the cell at a coordinate.
    pub fn get(&self, at: Coord) -> Option<CellKind> {
        if at.row < self.rows && at.col < self.cols {
            Some(self.cells[at.row * self.cols + at.col])
        } else {
            None
        }
    }

    /// Overwrite the cell at a coordinate.
    pub fn set(&mut self, at: Coord, kind: CellKind) -> Result<()> {
        self.check(at)?;
        self.cells[at.row * self.cols + at.col] = kind;
        Ok(())
    }

    /// Fail unless `at` lies on the board.
    pub fn check(&self, at: Coord) -> Result<()> {
        if at.row < self.rows && at.col < self.cols {
            Ok(())
        } else {
            Err(TraceError::CellOutOfRange {
                row: at.row,
                col: at.col,
                rows: self.rows,
                cols: self.cols,
            })
        }
    }

    /// Move from `at` by a signed offset, if the result is on the board.
    pub fn offset(&self, at: Coord, dr: isize, dc: isize) -> Option<Coord> {
        let row = at.row.checked_add_signed(dr)?;
        let col = at.col.checked_add_signed(dc)?;
        (row < self.rows && col < self.cols).then_some(Coord::new(row, col))
    }

    /// First cell of a kind in row-major order.
    pub fn find(&self, kind: CellKind) -> Option<Coord> {
        self.cells
            .iter()
            .position(|&c| c == kind)
            .map(|i| Coord::new(i / self.cols, i % self.cols))
    }
}
