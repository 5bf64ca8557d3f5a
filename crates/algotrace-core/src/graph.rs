//! Graph input structure.
//!
//! Node and edge ids are dense indices assigned in insertion order. The
//! adjacency list preserves edge insertion order, which decides the visual
//! traversal order of every graph generator.

use crate::error::{Result, TraceError};

/// A node identifier (index into the graph's node list).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct NodeId(pub usize);

impl NodeId {
    /// The underlying index.
    pub const fn index(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An edge identifier (index into the graph's edge list).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct EdgeId(pub usize);

impl EdgeId {
    /// The underlying index.
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Layout position of a node, in renderer units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    /// Create a position.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Point `index` of `count` evenly spaced on a circle.
    pub fn on_circle(index: usize, count: usize, radius: f64) -> Self {
        let angle = std::f64::consts::TAU * index as f64 / count.max(1) as f64;
        Self::new(radius * angle.cos(), radius * angle.sin())
    }
}

/// A node of the input graph.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GraphNode {
    pub id: NodeId,
    pub label: String,
    pub position: Position,
}

/// An edge of the input graph. `weight` doubles as capacity in flow networks.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GraphEdge {
    pub id: EdgeId,
    pub from: NodeId,
    pub to: NodeId,
    pub weight: i64,
}

impl GraphEdge {
    /// The endpoint opposite `node`.
    pub fn other(&self, node: NodeId) -> NodeId {
        if self.from == node {
            self.to
        } else {
            self.from
        }
    }

    /// Whether both endpoints are the same node.
    pub fn is_loop(&self) -> bool {
        self.from == self.to
    }
}

/// A directed or undirected multigraph.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Graph {
    directed: bool,
    nodes: Vec<GraphNode>,
    edges: Vec<GraphEdge>,
}

impl Graph {
    /// Create an empty undirected graph.
    pub fn undirected() -> Self {
        Self {
            directed: false,
            nodes: Vec::new(),
            edges: Vec::new(),
        }
    }

    /// Create an empty directed graph.
    pub fn directed() -> Self {
        Self {
            directed: true,
            ..Self::undirected()
        }
    }

    /// Create a graph with `count` nodes labelled by index and laid out on a circle.
    pub fn with_nodes(directed: bool, count: usize) -> Self {
        let mut graph = if directed {
            Self::directed()
        } else {
            Self::undirected()
        };
        for i in 0..count {
            graph.add_node(i.to_string(), Position::on_circle(i, count, 200.0));
        }
        graph
    }

    /// Add a node and return its id.
    pub fn add_node(&mut self, label: impl Into<String>, position: Position) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(GraphNode {
            id,
            label: label.into(),
            position,
        });
        id
    }

    /// Add an edge between two existing nodes.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId, weight: i64) -> Result<EdgeId> {
        self.check_node(from)?;
        self.check_node(to)?;
        let id = EdgeId(self.edges.len());
        self.edges.push(GraphEdge {
            id,
            from,
            to,
            weight,
        });
        Ok(id)
    }

    /// Whether edges are one-way.
    pub fn is_directed(&self) -> bool {
        self.directed
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// All nodes in id order.
    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    /// All edges in id order.
    pub fn edges(&self) -> &[GraphEdge] {
        &self.edges
    }

    /// Get an edge by id.
    pub fn edge(&self, id: EdgeId) -> Option<&GraphEdge> {
        self.edges.get(id.0)
    }

    /// Fail unless `node` belongs to this graph.
    pub fn check_node(&self, node: NodeId) -> Result<()> {
        if node.0 < self.nodes.len() {
            Ok(())
        } else {
            Err(TraceError::NodeOutOfRange {
                node: node.0,
                count: self.nodes.len(),
            })
        }
    }

    /// Check the dense-id invariants. Graphs built with [`Graph::add_node`]
    /// and [`Graph::add_edge`] always pass; deserialized ones may not.
    pub fn validate(&self) -> Result<()> {
        for (i, node) in self.nodes.iter().enumerate() {
            if node.id.0 != i {
                return Err(TraceError::InvalidInput(format!(
                    "node at position {} has id {}",
                    i, node.id
                )));
            }
        }
        for (i, edge) in self.edges.iter().enumerate() {
            if edge.id.0 != i {
                return Err(TraceError::InvalidInput(format!(
                    "edge at position {} has id {}",
                    i, edge.id.0
                )));
            }
            self.check_node(edge.from)?;
            self.check_node(edge.to)?;
        }
        Ok(())
    }

    /// Total of all absolute edge weights.
    ///
    /// Fails unless `factor` times that total fits in an `i64`. Any simple
    /// path length or flow value is bounded by the total, so a generator
    /// that adds at most `factor` such quantities cannot overflow.
    pub fn check_weights(&self, factor: u32) -> Result<i64> {
        let total: i128 = self
            .edges
            .iter()
            .map(|e| i128::from(e.weight.unsigned_abs()))
            .sum();
        match total.checked_mul(i128::from(factor.max(1))) {
            Some(scaled) if scaled <= i128::from(i64::MAX) => {
                i64::try_from(total).map_err(|_| TraceError::WeightOverflow { factor })
            }
            _ => Err(TraceError::WeightOverflow { factor }),
        }
    }

    /// Outgoing `(neighbor, edge)` pairs per node, in edge insertion order.
    ///
    /// Undirected edges appear under both endpoints; a self-loop appears once.
    pub fn adjacency(&self) -> Vec<Vec<(NodeId, EdgeId)>> {
        let mut adjacency = vec![Vec::new(); self.nodes.len()];
        for edge in &self.edges {
            adjacency[edge.from.0].push((edge.to, edge.id));
            if !self.directed && !edge.is_loop() {
                adjacency[edge.to.0].push((edge.from, edge.id));
            }
        }
        adjacency
    }

    /// Undirected degree of every node; a self-loop counts twice.
    pub fn degrees(&self) -> Vec<usize> {
        let mut degrees = vec![0; self.nodes.len()];
        for edge in &self.edges {
            degrees[edge.from.0] += 1;
            degrees[edge.to.0] += 1;
        }
        degrees
    }
}
