//! Breadth-first and depth-first traversal.
//!
//! Both keep an explicit frontier of node ids and a visited set. Neighbors
//! are taken in adjacency insertion order. DFS pushes them in reverse so the
//! pops come back out in insertion order.

use std::collections::VecDeque;

use algotrace_core::{
    EdgeId, EdgeVisual, Graph, GraphSnapshot, NodeId, NodeVisual, Result, StepKind, Trace,
    TraceRecorder,
};

/// Breadth-first traversal from `start`.
///
/// Nodes are marked discovered when enqueued, so each node enters the queue
/// at most once.
pub fn bfs(graph: &Graph, start: NodeId) -> Result<Trace<GraphSnapshot>> {
    graph.validate()?;
    graph.check_node(start)?;

    let adjacency = graph.adjacency();
    let label = |n: NodeId| graph.nodes()[n.0].label.clone();
    let mut discovered = vec![false; graph.node_count()];
    let mut queue: VecDeque<NodeId> = VecDeque::new();
    let mut order = Vec::new();

    let mut rec = TraceRecorder::start(
        GraphSnapshot::from_graph(graph),
        format!("BFS from {}", label(start)),
    );

    discovered[start.0] = true;
    queue.push_back(start);
    rec.emit_with(StepKind::Enqueue, format!("Enqueue {}", label(start)), |g| {
        g.set_node(start, NodeVisual::Frontier);
        g.frontier = vec![start];
    });

    while let Some(u) = queue.pop_front() {
        order.push(u);
        let frontier: Vec<_> = queue.iter().copied().collect();
        rec.emit_with(StepKind::Dequeue, format!("Dequeue {}", label(u)), |g| {
            g.set_node(u, NodeVisual::Active);
            g.frontier = frontier;
        });

        for &(v, edge) in &adjacency[u.0] {
            if discovered[v.0] {
                continue;
            }
            discovered[v.0] = true;
            queue.push_back(v);
            let frontier: Vec<_> = queue.iter().copied().collect();
            rec.emit_with(
                StepKind::Enqueue,
                format!("Enqueue {} (neighbor of {})", label(v), label(u)),
                |g| {
                    g.set_node(v, NodeVisual::Frontier);
                    g.set_edge(edge, EdgeVisual::Tree);
                    g.frontier = frontier;
                },
            );
        }

        rec.emit_with(StepKind::Finalize, format!("{} visited", label(u)), |g| {
            g.set_node(u, NodeVisual::Visited);
        });
    }

    finish(rec, "BFS", order, graph.node_count())
}

/// Depth-first traversal from `start` with an explicit stack.
///
/// A node is marked visited when popped; a popped node that was already
/// visited is dropped without a step.
pub fn dfs(graph: &Graph, start: NodeId) -> Result<Trace<GraphSnapshot>> {
    graph.validate()?;
    graph.check_node(start)?;

    let adjacency = graph.adjacency();
    let label = |n: NodeId| graph.nodes()[n.0].label.clone();
    let mut visited = vec![false; graph.node_count()];
    let mut stack: Vec<(NodeId, Option<EdgeId>)> = Vec::new();
    let mut order = Vec::new();

    let mut rec = TraceRecorder::start(
        GraphSnapshot::from_graph(graph),
        format!("DFS from {}", label(start)),
    );

    stack.push((start, None));
    rec.emit_with(StepKind::Enqueue, format!("Push {}", label(start)), |g| {
        g.set_node(start, NodeVisual::Frontier);
        g.frontier = vec![start];
    });

    while let Some((u, via)) = stack.pop() {
        if visited[u.0] {
            continue;
        }
        visited[u.0] = true;
        order.push(u);
        let frontier = frontier_of(&stack);
        rec.emit_with(StepKind::Dequeue, format!("Pop {}", label(u)), |g| {
            g.set_node(u, NodeVisual::Active);
            if let Some(edge) = via {
                g.set_edge(edge, EdgeVisual::Tree);
            }
            g.frontier = frontier;
        });

        for &(v, edge) in adjacency[u.0].iter().rev() {
            if visited[v.0] {
                continue;
            }
            stack.push((v, Some(edge)));
            let frontier = frontier_of(&stack);
            rec.emit_with(
                StepKind::Enqueue,
                format!("Push {} (neighbor of {})", label(v), label(u)),
                |g| {
                    g.set_node(v, NodeVisual::Frontier);
                    g.frontier = frontier;
                },
            );
        }

        rec.emit_with(StepKind::Finalize, format!("{} visited", label(u)), |g| {
            g.set_node(u, NodeVisual::Visited);
        });
    }

    finish(rec, "DFS", order, graph.node_count())
}

/// Stack contents, top first.
fn frontier_of(stack: &[(NodeId, Option<EdgeId>)]) -> Vec<NodeId> {
    stack.iter().rev().map(|&(n, _)| n).collect()
}

fn finish(
    mut rec: TraceRecorder<GraphSnapshot>,
    name: &str,
    order: Vec<NodeId>,
    node_count: usize,
) -> Result<Trace<GraphSnapshot>> {
    let visited = order.len();
    let listing = order.iter().map(ToString::to_string).collect::<Vec<_>>().join(" → ");
    rec.emit_with(
        StepKind::Terminal,
        format!("{} complete: visited {} of {} nodes ({})", name, visited, node_count, listing),
        |g| {
            g.frontier.clear();
            g.path = order;
        },
    );
    let trace = rec.finish();
    tracing::debug!(steps = trace.len(), visited, "{} trace generated", name);
    Ok(trace)
}

/// Visit order recorded in a finished traversal trace.
pub fn visit_order(trace: &Trace<GraphSnapshot>) -> &[NodeId] {
    &trace.last().payload().path
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 0 - 1, 0 - 2, 1 - 3, 2 - 3, 3 - 4; node 5 isolated.
    fn sample() -> Graph {
        let mut g = Graph::with_nodes(false, 6);
        for (a, b) in [(0, 1), (0, 2), (1, 3), (2, 3), (3, 4)] {
            g.add_edge(NodeId(a), NodeId(b), 1).unwrap();
        }
        g
    }

    fn ids(raw: &[usize]) -> Vec<NodeId> {
        raw.iter().map(|&i| NodeId(i)).collect()
    }

    #[test]
    fn bfs_visits_level_by_level() {
        let trace = bfs(&sample(), NodeId(0)).unwrap();
        assert_eq!(visit_order(&trace), ids(&[0, 1, 2, 3, 4]).as_slice());
    }

    #[test]
    fn dfs_pops_neighbors_in_insertion_order() {
        let trace = dfs(&sample(), NodeId(0)).unwrap();
        assert_eq!(visit_order(&trace), ids(&[0, 1, 3, 2, 4]).as_slice());
    }

    #[test]
    fn unreachable_nodes_stay_default() {
        let trace = bfs(&sample(), NodeId(0)).unwrap();
        let last = trace.last().payload();
        assert_eq!(last.node(NodeId(5)).state, NodeVisual::Default);
        assert_eq!(last.nodes_in(NodeVisual::Visited).len(), 5);
    }

    #[test]
    fn bfs_tree_has_one_edge_per_discovered_node() {
        let trace = bfs(&sample(), NodeId(0)).unwrap();
        assert_eq!(trace.last().payload().edges_in(EdgeVisual::Tree).len(), 4);
    }

    #[test]
    fn bfs_step_count_is_bounded_by_nodes() {
        let graph = sample();
        let trace = bfs(&graph, NodeId(0)).unwrap();
        // initial + 3 per reached node + terminal
        assert_eq!(trace.len(), 2 + 3 * 5);
    }

    #[test]
    fn dfs_tree_edges_follow_pop_order() {
        let trace = dfs(&sample(), NodeId(0)).unwrap();
        let tree = trace.last().payload().edges_in(EdgeVisual::Tree);
        // 0-1, 1-3, 2-3, 3-4
        assert_eq!(tree, vec![EdgeId(0), EdgeId(2), EdgeId(3), EdgeId(4)]);
    }

    #[test]
    fn start_out_of_range_is_rejected() {
        assert!(bfs(&sample(), NodeId(9)).is_err());
        assert!(dfs(&sample(), NodeId(9)).is_err());
    }

    #[test]
    fn directed_edges_are_followed_one_way() {
        let mut g = Graph::with_nodes(true, 3);
        g.add_edge(NodeId(1), NodeId(0), 1).unwrap();
        g.add_edge(NodeId(1), NodeId(2), 1).unwrap();
        let trace = bfs(&g, NodeId(0)).unwrap();
        assert_eq!(visit_order(&trace), ids(&[0]).as_slice());
    }
}
