//! Error types for trace generation.
//!
//! These cover input rejected *before* a generator starts. An algorithm that
//! legitimately fails (target absent, no path, no tour) still produces a
//! trace whose last step says so.

use thiserror::Error;

/// Result type for trace generation.
pub type Result<T> = std::result::Result<T, TraceError>;

/// Reasons a generator refuses its input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TraceError {
    /// Generic malformed input
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A search target that is not an integer
    #[error("invalid search target {0:?}: expected an integer")]
    InvalidTarget(String),

    /// A node id outside the graph
    #[error("node {node} out of range for graph with {count} nodes")]
    NodeOutOfRange { node: usize, count: usize },

    /// A cell outside the board
    #[error("cell ({row}, {col}) out of range for {rows}x{cols} board")]
    CellOutOfRange {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    /// A cell that cannot be used as a start or end
    #[error("cell ({row}, {col}) is blocked")]
    BlockedCell { row: usize, col: usize },

    /// Binary search over unsorted values
    #[error("values must be sorted ascending (index {index} breaks the order)")]
    UnsortedInput { index: usize },

    /// Shortest-path input with a negative edge
    #[error("edge {edge} has negative weight {weight}")]
    NegativeWeight { edge: usize, weight: i64 },

    /// Board dimension outside what a generator supports
    #[error("board size {size} outside supported range {min}..={max}")]
    BoardSize { size: usize, min: usize, max: usize },

    /// Two nodes that must be connected are not
    #[error("nodes {from} and {to} are not connected")]
    Disconnected { from: usize, to: usize },

    /// Edge weights too large for the sums a generator must form
    #[error("edge weights are too large: {factor} times their total does not fit in i64")]
    WeightOverflow { factor: u32 },
}
