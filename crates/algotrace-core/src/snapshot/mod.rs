//! Rendering-ready payloads.

mod array;
mod board;
mod graph;

pub use array::{ArrayMark, ArraySnapshot};
pub use board::{BoardSnapshot, CellView, CellVisual};
pub use graph::{DistanceMatrix, EdgeView, EdgeVisual, GraphSnapshot, NodeView, NodeVisual};

/// Any payload a generator can produce.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", content = "data", rename_all = "snake_case"))]
pub enum Snapshot {
    Array(ArraySnapshot),
    Graph(GraphSnapshot),
    Board(BoardSnapshot),
}

impl Snapshot {
    /// The array payload, if this is one.
    pub fn as_array(&self) -> Option<&ArraySnapshot> {
        match self {
            Snapshot::Array(a) => Some(a),
            _ => None,
        }
    }

    /// The graph payload, if this is one.
    pub fn as_graph(&self) -> Option<&GraphSnapshot> {
        match self {
            Snapshot::Graph(g) => Some(g),
            _ => None,
        }
    }

    /// The board payload, if this is one.
    pub fn as_board(&self) -> Option<&BoardSnapshot> {
        match self {
            Snapshot::Board(b) => Some(b),
            _ => None,
        }
    }
}

impl From<ArraySnapshot> for Snapshot {
    fn from(a: ArraySnapshot) -> Self {
        Snapshot::Array(a)
    }
}

impl From<GraphSnapshot> for Snapshot {
    fn from(g: GraphSnapshot) -> Self {
        Snapshot::Graph(g)
    }
}

impl From<BoardSnapshot> for Snapshot {
    fn from(b: BoardSnapshot) -> Self {
        Snapshot::Board(b)
    }
}
