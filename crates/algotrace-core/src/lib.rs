//! Algotrace Core
//!
//! The value types every trace generator, the player and the rendering
//! surface agree on.
//!
//! # Steps and Traces
//!
//! A [`Trace`] is the ordered list of [`Step`]s one generator run produced.
//! Index 0 is the initial condition, the last index the terminal condition.
//! Steps are only ever built by a [`TraceRecorder`], which clones its working
//! payload into every new step. Nothing can reach back into a step once it
//! has been recorded, so a renderer may hold `&trace[i]` while the player
//! moves on.
//!
//! # Payloads
//!
//! - [`ArraySnapshot`]: search and sort over a row of integers
//! - [`GraphSnapshot`]: traversal, shortest path, bridges, flow, Euler tours
//! - [`BoardSnapshot`]: mazes, chess boards and island maps
//!
//! [`Snapshot`] is the sum of the three, used where traces of different
//! algorithms must share one type.

mod error;
mod graph;
mod grid;
mod snapshot;
mod step;

pub use error::{Result, TraceError};
pub use graph::{EdgeId, Graph, GraphEdge, GraphNode, NodeId, Position};
pub use grid::{CellKind, Coord, Grid};
pub use snapshot::{
    ArrayMark, ArraySnapshot, BoardSnapshot, CellView, CellVisual, DistanceMatrix, EdgeView,
    EdgeVisual, GraphSnapshot, NodeView, NodeVisual, Snapshot,
};
pub use step::{Step, StepKind, Trace, TraceRecorder};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recorded_graph_trace_converts_to_snapshot_trace() {
        let mut graph = Graph::undirected();
        let a = graph.add_node("a", Position::new(0.0, 0.0));
        let b = graph.add_node("b", Position::new(1.0, 0.0));
        graph.add_edge(a, b, 1).unwrap();

        let mut recorder = TraceRecorder::start(GraphSnapshot::from_graph(&graph), "initial");
        recorder.emit_with(StepKind::Visit, "visit a", |g| g.set_node(a, NodeVisual::Active));
        let trace = recorder.finish();

        let snapshots: Trace<Snapshot> = trace.map(Snapshot::from);
        assert_eq!(snapshots.len(), 2);
        let last = snapshots.last().payload().as_graph().unwrap();
        assert_eq!(last.node(a).state, NodeVisual::Active);
        assert_eq!(last.node(b).state, NodeVisual::Default);
    }
}
