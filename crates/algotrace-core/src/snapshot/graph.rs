//! Graph payload for traversal, shortest-path, connectivity and flow traces.
//!
//! Node and edge identities come from the input [`Graph`] and never change
//! inside one trace. The only exception is [`GraphSnapshot::push_edge`],
//! which appends new identities after the original edges (Chinese Postman
//! duplication).

use crate::graph::{EdgeId, Graph, NodeId, Position};

/// All-pairs distances; `None` is unreachable.
pub type DistanceMatrix = Vec<Vec<Option<i64>>>;

/// Visual state of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum NodeVisual {
    #[default]
    Default,
    /// Waiting in a queue, stack or open list
    Frontier,
    /// Being processed right now
    Active,
    Visited,
    /// Distance settled for good
    Finalized,
    /// On the highlighted result path
    Path,
    Articulation,
}

/// Visual state of an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum EdgeVisual {
    #[default]
    Default,
    /// Examined by a relaxation
    Relaxed,
    /// Part of the search tree
    Tree,
    Bridge,
    /// On the highlighted result path
    Path,
    /// Walked by an Euler tour
    Traversed,
    /// Added by Chinese Postman duplication
    Duplicated,
    /// No residual capacity left
    Saturated,
}

/// One node at one step.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeView {
    pub id: NodeId,
    pub label: String,
    pub position: Position,
    pub state: NodeVisual,
    /// Tentative or final distance from the source
    pub distance: Option<i64>,
    /// DFS discovery time
    pub tin: Option<usize>,
    /// DFS low-link
    pub low: Option<usize>,
    pub degree: Option<usize>,
}

/// One edge at one step.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EdgeView {
    pub id: EdgeId,
    pub from: NodeId,
    pub to: NodeId,
    pub weight: i64,
    /// Flow currently pushed along `from → to`
    pub flow: Option<i64>,
    pub state: EdgeVisual,
}

/// State of a graph at one step.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GraphSnapshot {
    pub directed: bool,
    pub nodes: Vec<NodeView>,
    pub edges: Vec<EdgeView>,
    /// Queue/stack/open-list contents, front first
    pub frontier: Vec<NodeId>,
    /// Highlighted path (shortest path, augmenting path)
    pub path: Vec<NodeId>,
    /// Euler circuit accumulated so far
    pub circuit: Vec<NodeId>,
    /// Matched odd-vertex pairs
    pub pairs: Vec<(NodeId, NodeId)>,
    pub matrix: Option<DistanceMatrix>,
    /// Path cost, flow value or route length
    pub total: Option<i64>,
}

impl GraphSnapshot {
    /// Unannotated snapshot of an input graph.
    pub fn from_graph(graph: &Graph) -> Self {
        Self {
            directed: graph.is_directed(),
            nodes: graph
                .nodes()
                .iter()
                .map(|n| NodeView {
                    id: n.id,
                    label: n.label.clone(),
                    position: n.position,
                    state: NodeVisual::Default,
                    distance: None,
                    tin: None,
                    low: None,
                    degree: None,
                })
                .collect(),
            edges: graph
                .edges()
                .iter()
                .map(|e| EdgeView {
                    id: e.id,
                    from: e.from,
                    to: e.to,
                    weight: e.weight,
                    flow: None,
                    state: EdgeVisual::Default,
                })
                .collect(),
            frontier: Vec::new(),
            path: Vec::new(),
            circuit: Vec::new(),
            pairs: Vec::new(),
            matrix: None,
            total: None,
        }
    }

    /// Get a node view.
    pub fn node(&self, id: NodeId) -> &NodeView {
        &self.nodes[id.0]
    }

    /// Mutable node view.
    pub fn node_mut(&mut self, id: NodeId) -> &mut NodeView {
        &mut self.nodes[id.0]
    }

    /// Get an edge view.
    pub fn edge(&self, id: EdgeId) -> &EdgeView {
        &self.edges[id.0]
    }

    /// Mutable edge view.
    pub fn edge_mut(&mut self, id: EdgeId) -> &mut EdgeView {
        &mut self.edges[id.0]
    }

    /// Set a node's visual state.
    pub fn set_node(&mut self, id: NodeId, state: NodeVisual) {
        self.nodes[id.0].state = state;
    }

    /// Set an edge's visual state.
    pub fn set_edge(&mut self, id: EdgeId, state: EdgeVisual) {
        self.edges[id.0].state = state;
    }

    /// Append an edge that was not part of the input graph.
    pub fn push_edge(&mut self, from: NodeId, to: NodeId, weight: i64, state: EdgeVisual) -> EdgeId {
        let id = EdgeId(self.edges.len());
        self.edges.push(EdgeView {
            id,
            from,
            to,
            weight,
            flow: None,
            state,
        });
        id
    }

    /// Nodes currently in a visual state, in id order.
    pub fn nodes_in(&self, state: NodeVisual) -> Vec<NodeId> {
        self.nodes
            .iter()
            .filter(|n| n.state == state)
            .map(|n| n.id)
            .collect()
    }

    /// Edges currently in a visual state, in id order.
    pub fn edges_in(&self, state: EdgeVisual) -> Vec<EdgeId> {
        self.edges
            .iter()
            .filter(|e| e.state == state)
            .map(|e| e.id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_mirrors_input_identities() {
        let mut graph = Graph::with_nodes(false, 3);
        graph.add_edge(NodeId(0), NodeId(2), 7).unwrap();
        let snap = GraphSnapshot::from_graph(&graph);

        assert_eq!(snap.nodes.len(), 3);
        assert_eq!(snap.edge(EdgeId(0)).to, NodeId(2));
        assert_eq!(snap.edge(EdgeId(0)).weight, 7);
        assert_eq!(snap.node(NodeId(1)).label, "1");
    }

    #[test]
    fn pushed_edges_follow_original_ones() {
        let mut graph = Graph::with_nodes(false, 2);
        graph.add_edge(NodeId(0), NodeId(1), 1).unwrap();
        let mut snap = GraphSnapshot::from_graph(&graph);
        let dup = snap.push_edge(NodeId(1), NodeId(0), 1, EdgeVisual::Duplicated);

        assert_eq!(dup, EdgeId(1));
        assert_eq!(snap.edges_in(EdgeVisual::Duplicated), vec![EdgeId(1)]);
    }

    #[test]
    fn nodes_in_filters_by_state() {
        let mut snap = GraphSnapshot::from_graph(&Graph::with_nodes(true, 4));
        snap.set_node(NodeId(1), NodeVisual::Visited);
        snap.set_node(NodeId(3), NodeVisual::Visited);
        assert_eq!(snap.nodes_in(NodeVisual::Visited), vec![NodeId(1), NodeId(3)]);
    }
}
