//! Eulerian path and circuit with Hierholzer's algorithm.

use algotrace_core::{
    EdgeId, EdgeVisual, Graph, GraphSnapshot, NodeId, NodeVisual, StepKind, Trace, TraceRecorder,
};

/// Which kind of Euler tour a graph admits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EulerMode {
    /// Closed walk; every vertex has even degree
    Circuit,
    /// Open walk between the two odd-degree vertices
    Path,
}

/// One move of Hierholzer's stack machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TourEvent {
    /// Walked an unused edge and pushed `to`
    Traverse {
        from: NodeId,
        to: NodeId,
        edge: EdgeId,
    },
    /// `node` had no unused edge left and was popped into the circuit
    Backtrack { node: NodeId },
}

/// Decide whether `graph` has an Euler circuit, an Euler path, or neither.
///
/// Requires an undirected graph with at least one edge, all edges in one
/// connected component, and zero or two odd-degree vertices.
pub fn classify(graph: &Graph) -> Option<EulerMode> {
    if graph.is_directed() || graph.edge_count() == 0 {
        return None;
    }
    let degrees = graph.degrees();
    if !edges_connected(graph, &degrees) {
        return None;
    }
    match degrees.iter().filter(|&&d| d % 2 == 1).count() {
        0 => Some(EulerMode::Circuit),
        2 => Some(EulerMode::Path),
        _ => None,
    }
}

fn edges_connected(graph: &Graph, degrees: &[usize]) -> bool {
    let Some(start) = degrees.iter().position(|&d| d > 0) else {
        return false;
    };
    let adjacency = graph.adjacency();
    let mut seen = vec![false; graph.node_count()];
    let mut stack = vec![start];
    seen[start] = true;
    while let Some(u) = stack.pop() {
        for &(v, _) in &adjacency[u] {
            if !seen[v.0] {
                seen[v.0] = true;
                stack.push(v.0);
            }
        }
    }
    degrees.iter().zip(&seen).all(|(&d, &s)| d == 0 || s)
}

/// Run Hierholzer from `start`. The circuit is the reverse of the
/// backtrack order.
pub fn hierholzer(
    adjacency: &[Vec<(NodeId, EdgeId)>],
    edge_count: usize,
    start: NodeId,
) -> Vec<TourEvent> {
    let mut next = vec![0usize; adjacency.len()];
    let mut used = vec![false; edge_count];
    let mut stack = vec![start];
    let mut events = Vec::with_capacity(2 * edge_count + 1);

    while let Some(&u) = stack.last() {
        let incident = &adjacency[u.0];
        while next[u.0] < incident.len() && used[incident[next[u.0]].1 .0] {
            next[u.0] += 1;
        }
        match incident.get(next[u.0]) {
            Some(&(v, edge)) => {
                used[edge.0] = true;
                stack.push(v);
                events.push(TourEvent::Traverse { from: u, to: v, edge });
            }
            None => {
                stack.pop();
                events.push(TourEvent::Backtrack { node: u });
            }
        }
    }
    events
}

/// Vertex a tour in `mode` starts from.
fn start_vertex(degrees: &[usize], mode: EulerMode) -> NodeId {
    let pick = match mode {
        EulerMode::Path => degrees.iter().position(|&d| d % 2 == 1),
        EulerMode::Circuit => degrees.iter().position(|&d| d > 0),
    };
    NodeId(pick.unwrap_or(0))
}

/// Fold tour events into traverse/backtrack steps. Returns the finished circuit.
pub(crate) fn replay(
    rec: &mut TraceRecorder<GraphSnapshot>,
    graph: &Graph,
    events: &[TourEvent],
) -> Vec<NodeId> {
    let label = |id: NodeId| graph.nodes()[id.0].label.clone();
    let mut stack: Vec<NodeId> = Vec::new();
    let mut popped: Vec<NodeId> = Vec::new();

    for event in events {
        match *event {
            TourEvent::Traverse { from, to, edge } => {
                if stack.is_empty() {
                    stack.push(from);
                }
                stack.push(to);
                let frontier: Vec<_> = stack.iter().rev().copied().collect();
                rec.emit_with(
                    StepKind::Traverse,
                    format!("Walk {} → {}", label(from), label(to)),
                    |g| {
                        if g.node(from).state == NodeVisual::Active {
                            g.set_node(from, NodeVisual::Visited);
                        }
                        g.set_node(to, NodeVisual::Active);
                        g.set_edge(edge, EdgeVisual::Traversed);
                        g.frontier = frontier;
                    },
                );
            }
            TourEvent::Backtrack { node } => {
                stack.pop();
                popped.push(node);
                let frontier: Vec<_> = stack.iter().rev().copied().collect();
                let circuit: Vec<_> = popped.iter().rev().copied().collect();
                let top = stack.last().copied();
                rec.emit_with(
                    StepKind::Backtrack,
                    format!("{} is stuck: add it to the circuit", label(node)),
                    |g| {
                        g.set_node(node, NodeVisual::Path);
                        if let Some(top) = top {
                            g.set_node(top, NodeVisual::Active);
                        }
                        g.frontier = frontier;
                        g.circuit = circuit;
                    },
                );
            }
        }
    }

    popped.reverse();
    popped
}

/// Trace Hierholzer's algorithm on `graph`.
///
/// # Panics
///
/// When `classify(graph)` is not `Some(mode)`. Callers classify first.
pub fn euler_trace(graph: &Graph, mode: EulerMode) -> Trace<GraphSnapshot> {
    let admitted = classify(graph);
    assert!(
        admitted == Some(mode),
        "graph admits {:?}, not an Euler {:?}",
        admitted,
        mode
    );

    let degrees = graph.degrees();
    let start = start_vertex(&degrees, mode);
    let mut initial = GraphSnapshot::from_graph(graph);
    for (view, &d) in initial.nodes.iter_mut().zip(&degrees) {
        view.degree = Some(d);
    }
    initial.set_node(start, NodeVisual::Active);
    let kind = match mode {
        EulerMode::Circuit => "circuit",
        EulerMode::Path => "path",
    };
    let mut rec = TraceRecorder::start(
        initial,
        format!("Euler {} from {}", kind, graph.nodes()[start.0].label),
    );

    let events = hierholzer(&graph.adjacency(), graph.edge_count(), start);
    let circuit = replay(&mut rec, graph, &events);
    let length = graph
        .edges()
        .iter()
        .try_fold(0i64, |sum, e| sum.checked_add(e.weight));

    let listing = circuit.iter().map(ToString::to_string).collect::<Vec<_>>().join(" → ");
    rec.emit_with(
        StepKind::Terminal,
        format!("Euler {}: {}", kind, listing),
        |g| {
            g.frontier.clear();
            g.circuit = circuit;
            g.total = length;
        },
    );

    let trace = rec.finish();
    tracing::debug!(steps = trace.len(), ?mode, "euler trace generated");
    trace
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph(n: usize, edges: &[(usize, usize)]) -> Graph {
        let mut g = Graph::with_nodes(false, n);
        for &(a, b) in edges {
            g.add_edge(NodeId(a), NodeId(b), 1).unwrap();
        }
        g
    }

    fn ids(raw: &[usize]) -> Vec<NodeId> {
        raw.iter().map(|&i| NodeId(i)).collect()
    }

    /// Square 0-1-2-3 with diagonal 0-2; 0 and 2 are odd.
    fn envelope() -> Graph {
        graph(4, &[(0, 1), (1, 2), (2, 3), (3, 0), (0, 2)])
    }

    #[test]
    fn classify_counts_odd_vertices() {
        assert_eq!(classify(&graph(3, &[(0, 1), (1, 2), (2, 0)])), Some(EulerMode::Circuit));
        assert_eq!(classify(&envelope()), Some(EulerMode::Path));
        assert_eq!(classify(&graph(4, &[(0, 1), (0, 2), (0, 3)])), None);
    }

    #[test]
    fn classify_rejects_split_edges_but_ignores_isolated_nodes() {
        assert_eq!(classify(&graph(6, &[(0, 1), (1, 2), (2, 0), (3, 4)])), None);
        assert_eq!(classify(&graph(5, &[(0, 1), (1, 2), (2, 0)])), Some(EulerMode::Circuit));
        assert_eq!(classify(&Graph::with_nodes(false, 3)), None);
    }

    #[test]
    fn path_starts_at_lower_odd_vertex() {
        let trace = euler_trace(&envelope(), EulerMode::Path);
        assert_eq!(trace.last().payload().circuit, ids(&[0, 1, 2, 3, 0, 2]));
    }

    #[test]
    fn every_edge_is_walked_once() {
        let g = envelope();
        let trace = euler_trace(&g, EulerMode::Path);
        assert_eq!(trace.count(StepKind::Traverse), g.edge_count());
        assert_eq!(trace.count(StepKind::Backtrack), g.edge_count() + 1);
        assert_eq!(
            trace.last().payload().edges_in(EdgeVisual::Traversed).len(),
            g.edge_count()
        );
    }

    #[test]
    fn circuit_returns_to_start() {
        // Bowtie: two triangles sharing node 0.
        let g = graph(5, &[(0, 1), (1, 2), (2, 0), (0, 3), (3, 4), (4, 0)]);
        let trace = euler_trace(&g, EulerMode::Circuit);
        let circuit = &trace.last().payload().circuit;
        assert_eq!(circuit.len(), 7);
        assert_eq!(circuit.first(), circuit.last());
        assert_eq!(circuit, &ids(&[0, 1, 2, 0, 3, 4, 0]));
    }

    #[test]
    fn self_loops_are_walked() {
        let g = graph(2, &[(0, 1), (1, 1), (1, 0)]);
        assert_eq!(classify(&g), Some(EulerMode::Circuit));
        let trace = euler_trace(&g, EulerMode::Circuit);
        assert_eq!(trace.last().payload().circuit, ids(&[0, 1, 1, 0]));
    }

    #[test]
    #[should_panic]
    fn wrong_mode_panics() {
        euler_trace(&envelope(), EulerMode::Circuit);
    }

    #[test]
    fn huge_weights_leave_the_total_unset() {
        let mut g = Graph::with_nodes(false, 2);
        g.add_edge(NodeId(0), NodeId(1), i64::MAX).unwrap();
        g.add_edge(NodeId(1), NodeId(0), i64::MAX).unwrap();
        let trace = euler_trace(&g, EulerMode::Circuit);
        assert_eq!(trace.last().payload().circuit, ids(&[0, 1, 0]));
        assert_eq!(trace.last().payload().total, None);
    }
}
