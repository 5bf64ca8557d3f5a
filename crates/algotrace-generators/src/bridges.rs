//! Tarjan's bridges and articulation points.
//!
//! One DFS computes discovery time `tin[u]` and low-link
//! `low[u] = min(tin[u], tin[v] over back edges, low[c] over tree children)`.
//!
//! - tree edge `(u, v)` is a bridge iff `low[v] > tin[u]`
//! - non-root `u` is an articulation point iff some child `v` has `low[v] >= tin[u]`
//! - a DFS root is an articulation point iff it has more than one child
//!
//! The edge back to the immediate parent is skipped by edge id, so a
//! parallel edge to the parent still counts as a back edge. Self-loops are
//! skipped entirely.

use algotrace_core::{
    EdgeId, EdgeVisual, Graph, GraphSnapshot, NodeId, NodeVisual, Result, StepKind, Trace,
    TraceError, TraceRecorder,
};

/// One event of the DFS, in the order it happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BridgeEvent {
    /// `node` discovered through `via` (`None` for a DFS root)
    Visit {
        node: NodeId,
        tin: usize,
        via: Option<EdgeId>,
    },
    /// Back edge `from → to` relaxed `low[from]`
    BackEdge {
        from: NodeId,
        to: NodeId,
        edge: EdgeId,
        low: usize,
    },
    /// All of `node`'s edges explored. `parent` carries the parent's low-link
    /// after absorbing `low`.
    Finish {
        node: NodeId,
        low: usize,
        parent: Option<(NodeId, usize)>,
    },
    Bridge {
        edge: EdgeId,
    },
    Articulation {
        node: NodeId,
    },
}

/// Bridges and articulation points of a graph.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BridgeReport {
    /// Bridge edges in detection order
    pub bridges: Vec<EdgeId>,
    /// Articulation points in id order
    pub articulation_points: Vec<NodeId>,
}

struct Frame {
    node: NodeId,
    via: Option<EdgeId>,
    next: usize,
    children: usize,
}

/// Run the DFS and return its events. Restarts from every unvisited node in id order.
pub fn bridge_events(graph: &Graph) -> Result<Vec<BridgeEvent>> {
    graph.validate()?;
    if graph.is_directed() {
        return Err(TraceError::InvalidInput(
            "bridges and articulation points need an undirected graph".into(),
        ));
    }

    let n = graph.node_count();
    let adjacency = graph.adjacency();
    let mut tin: Vec<Option<usize>> = vec![None; n];
    let mut low = vec![0usize; n];
    let mut is_articulation = vec![false; n];
    let mut timer = 0;
    let mut events = Vec::new();

    for root in 0..n {
        if tin[root].is_some() {
            continue;
        }
        let root = NodeId(root);
        tin[root.0] = Some(timer);
        low[root.0] = timer;
        events.push(BridgeEvent::Visit {
            node: root,
            tin: timer,
            via: None,
        });
        timer += 1;
        let mut stack = vec![Frame {
            node: root,
            via: None,
            next: 0,
            children: 0,
        }];

        while let Some(top) = stack.len().checked_sub(1) {
            let u = stack[top].node;
            if let Some(&(v, edge)) = adjacency[u.0].get(stack[top].next) {
                stack[top].next += 1;
                if v == u || Some(edge) == stack[top].via {
                    continue;
                }
                match tin[v.0] {
                    Some(tv) => {
                        // Only ancestors; a finished descendant shows the same edge from below.
                        if tv < tin[u.0].unwrap_or(0) {
                            low[u.0] = low[u.0].min(tv);
                            events.push(BridgeEvent::BackEdge {
                                from: u,
                                to: v,
                                edge,
                                low: low[u.0],
                            });
                        }
                    }
                    None => {
                        stack[top].children += 1;
                        tin[v.0] = Some(timer);
                        low[v.0] = timer;
                        events.push(BridgeEvent::Visit {
                            node: v,
                            tin: timer,
                            via: Some(edge),
                        });
                        timer += 1;
                        stack.push(Frame {
                            node: v,
                            via: Some(edge),
                            next: 0,
                            children: 0,
                        });
                    }
                }
                continue;
            }

            let Some(frame) = stack.pop() else { break };
            let Some(parent) = stack.last() else {
                // Root of this DFS tree.
                if frame.children > 1 {
                    is_articulation[u.0] = true;
                    events.push(BridgeEvent::Articulation { node: u });
                }
                events.push(BridgeEvent::Finish {
                    node: u,
                    low: low[u.0],
                    parent: None,
                });
                continue;
            };

            let p = parent.node;
            let parent_is_root = parent.via.is_none();
            low[p.0] = low[p.0].min(low[u.0]);
            events.push(BridgeEvent::Finish {
                node: u,
                low: low[u.0],
                parent: Some((p, low[p.0])),
            });

            let tin_p = tin[p.0].unwrap_or(0);
            if low[u.0] > tin_p {
                if let Some(edge) = frame.via {
                    events.push(BridgeEvent::Bridge { edge });
                }
            }
            if !parent_is_root && low[u.0] >= tin_p && !is_articulation[p.0] {
                is_articulation[p.0] = true;
                events.push(BridgeEvent::Articulation { node: p });
            }
        }
    }

    Ok(events)
}

/// Compute bridges and articulation points without recording a trace.
pub fn find_bridges(graph: &Graph) -> Result<BridgeReport> {
    let mut report = BridgeReport::default();
    for event in bridge_events(graph)? {
        match event {
            BridgeEvent::Bridge { edge } => report.bridges.push(edge),
            BridgeEvent::Articulation { node } => report.articulation_points.push(node),
            _ => {}
        }
    }
    report.articulation_points.sort();
    Ok(report)
}

/// Trace of Tarjan's DFS: visits, back edges, detections and finishes.
pub fn bridges_trace(graph: &Graph) -> Result<Trace<GraphSnapshot>> {
    let events = bridge_events(graph)?;
    let label = |id: NodeId| graph.nodes()[id.0].label.clone();

    let mut rec = TraceRecorder::start(
        GraphSnapshot::from_graph(graph),
        "Find bridges and articulation points",
    );
    let mut bridges = 0;
    let mut articulations = 0;

    for event in events {
        match event {
            BridgeEvent::Visit { node, tin, via } => {
                rec.emit_with(
                    StepKind::Visit,
                    format!("Visit {}: tin = low = {}", label(node), tin),
                    |g| {
                        let view = g.node_mut(node);
                        view.state = NodeVisual::Active;
                        view.tin = Some(tin);
                        view.low = Some(tin);
                        if let Some(edge) = via {
                            g.set_edge(edge, EdgeVisual::Tree);
                        }
                    },
                );
            }
            BridgeEvent::BackEdge { from, to, edge, low } => {
                rec.emit_with(
                    StepKind::BackEdge,
                    format!("Back edge {} → {}: low[{}] = {}", label(from), label(to), label(from), low),
                    |g| {
                        g.node_mut(from).low = Some(low);
                        g.set_edge(edge, EdgeVisual::Relaxed);
                    },
                );
            }
            BridgeEvent::Finish { node, low, parent } => {
                let description = match parent {
                    Some((p, plow)) => format!(
                        "Finish {} (low {}); low[{}] = {}",
                        label(node),
                        low,
                        label(p),
                        plow
                    ),
                    None => format!("Finish root {} (low {})", label(node), low),
                };
                rec.emit_with(StepKind::Finalize, description, |g| {
                    let view = g.node_mut(node);
                    view.low = Some(low);
                    if view.state != NodeVisual::Articulation {
                        view.state = NodeVisual::Visited;
                    }
                    if let Some((p, plow)) = parent {
                        g.node_mut(p).low = Some(plow);
                    }
                });
            }
            BridgeEvent::Bridge { edge } => {
                bridges += 1;
                let e = g_edge_label(graph, edge, &label);
                rec.emit_with(StepKind::Bridge, format!("Bridge {}", e), |g| {
                    g.set_edge(edge, EdgeVisual::Bridge);
                });
            }
            BridgeEvent::Articulation { node } => {
                articulations += 1;
                rec.emit_with(
                    StepKind::Articulation,
                    format!("{} is an articulation point", label(node)),
                    |g| g.set_node(node, NodeVisual::Articulation),
                );
            }
        }
    }

    rec.emit(
        StepKind::Terminal,
        format!(
            "Found {} bridge(s) and {} articulation point(s)",
            bridges, articulations
        ),
    );

    let trace = rec.finish();
    tracing::debug!(steps = trace.len(), bridges, articulations, "bridges trace generated");
    Ok(trace)
}

fn g_edge_label(graph: &Graph, edge: EdgeId, label: &impl Fn(NodeId) -> String) -> String {
    match graph.edge(edge) {
        Some(e) => format!("{} – {}", label(e.from), label(e.to)),
        None => format!("#{}", edge.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Triangles 0-1-2 and 3-4-5 joined by 2-3 (edge 3).
    fn two_triangles() -> Graph {
        let mut g = Graph::with_nodes(false, 6);
        for (a, b) in [(0, 1), (1, 2), (2, 0), (2, 3), (3, 4), (4, 5), (5, 3)] {
            g.add_edge(NodeId(a), NodeId(b), 1).unwrap();
        }
        g
    }

    #[test]
    fn joining_edge_is_the_only_bridge() {
        let report = find_bridges(&two_triangles()).unwrap();
        assert_eq!(report.bridges, vec![EdgeId(3)]);
        assert_eq!(report.articulation_points, vec![NodeId(2), NodeId(3)]);
    }

    #[test]
    fn trace_marks_bridge_and_articulations() {
        let trace = bridges_trace(&two_triangles()).unwrap();
        let last = trace.last().payload();
        assert_eq!(last.edges_in(EdgeVisual::Bridge), vec![EdgeId(3)]);
        assert_eq!(last.nodes_in(NodeVisual::Articulation), vec![NodeId(2), NodeId(3)]);
        assert_eq!(trace.count(StepKind::Bridge), 1);
        assert_eq!(trace.count(StepKind::Articulation), 2);
    }

    #[test]
    fn cycle_has_no_bridges() {
        let mut g = Graph::with_nodes(false, 4);
        for (a, b) in [(0, 1), (1, 2), (2, 3), (3, 0)] {
            g.add_edge(NodeId(a), NodeId(b), 1).unwrap();
        }
        assert_eq!(find_bridges(&g).unwrap(), BridgeReport::default());
    }

    #[test]
    fn path_graph_every_edge_is_a_bridge() {
        let mut g = Graph::with_nodes(false, 4);
        for (a, b) in [(0, 1), (1, 2), (2, 3)] {
            g.add_edge(NodeId(a), NodeId(b), 1).unwrap();
        }
        let report = find_bridges(&g).unwrap();
        let mut bridges = report.bridges.clone();
        bridges.sort();
        assert_eq!(bridges, vec![EdgeId(0), EdgeId(1), EdgeId(2)]);
        assert_eq!(report.articulation_points, vec![NodeId(1), NodeId(2)]);
    }

    #[test]
    fn star_root_with_several_children_is_articulation() {
        let mut g = Graph::with_nodes(false, 4);
        for leaf in 1..4 {
            g.add_edge(NodeId(0), NodeId(leaf), 1).unwrap();
        }
        assert_eq!(find_bridges(&g).unwrap().articulation_points, vec![NodeId(0)]);
    }

    #[test]
    fn parallel_edge_to_parent_is_not_a_bridge() {
        let mut g = Graph::with_nodes(false, 2);
        g.add_edge(NodeId(0), NodeId(1), 1).unwrap();
        g.add_edge(NodeId(0), NodeId(1), 1).unwrap();
        assert!(find_bridges(&g).unwrap().bridges.is_empty());
    }

    #[test]
    fn self_loop_is_ignored() {
        let mut g = Graph::with_nodes(false, 2);
        g.add_edge(NodeId(0), NodeId(1), 1).unwrap();
        g.add_edge(NodeId(1), NodeId(1), 1).unwrap();
        assert_eq!(find_bridges(&g).unwrap().bridges, vec![EdgeId(0)]);
    }

    #[test]
    fn disconnected_components_are_all_explored() {
        let mut g = Graph::with_nodes(false, 4);
        g.add_edge(NodeId(0), NodeId(1), 1).unwrap();
        g.add_edge(NodeId(2), NodeId(3), 1).unwrap();
        let events = bridge_events(&g).unwrap();
        let visits = events
            .iter()
            .filter(|e| matches!(e, BridgeEvent::Visit { .. }))
            .count();
        assert_eq!(visits, 4);
        assert_eq!(find_bridges(&g).unwrap().bridges.len(), 2);
    }

    #[test]
    fn directed_graphs_are_rejected() {
        assert!(bridge_events(&Graph::with_nodes(true, 2)).is_err());
    }
}
