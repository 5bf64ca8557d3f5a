//! Dijkstra and uniform-cost search.
//!
//! The open list is a plain vector re-sorted before every extraction, ties
//! broken by node id. That is O(V) per extraction and O(V²) overall, which
//! keeps each step easy to follow and is fine at visualization sizes.

use algotrace_core::{
    EdgeId, EdgeVisual, Graph, GraphSnapshot, NodeId, NodeVisual, Result, StepKind, Trace,
    TraceError, TraceRecorder,
};

/// Dijkstra from `source`, settling every reachable node.
///
/// With a `target`, the trace ends with a path step highlighting the
/// shortest route when one exists, or an "unreachable" terminal step when it
/// does not.
pub fn dijkstra(
    graph: &Graph,
    source: NodeId,
    target: Option<NodeId>,
) -> Result<Trace<GraphSnapshot>> {
    run(graph, source, target, false)
}

/// A* with a zero heuristic, i.e. uniform-cost search.
///
/// Same relaxation as [`dijkstra`], but stops as soon as `target` is
/// extracted from the open list.
pub fn uniform_cost_search(
    graph: &Graph,
    source: NodeId,
    target: NodeId,
) -> Result<Trace<GraphSnapshot>> {
    run(graph, source, Some(target), true)
}

fn run(
    graph: &Graph,
    source: NodeId,
    target: Option<NodeId>,
    stop_at_target: bool,
) -> Result<Trace<GraphSnapshot>> {
    graph.validate()?;
    graph.check_node(source)?;
    if let Some(t) = target {
        graph.check_node(t)?;
    }
    if let Some(e) = graph.edges().iter().find(|e| e.weight < 0) {
        return Err(TraceError::NegativeWeight {
            edge: e.id.0,
            weight: e.weight,
        });
    }
    // A distance plus one edge stays within twice the weight total.
    graph.check_weights(2)?;

    let name = if stop_at_target { "Uniform-cost search" } else { "Dijkstra" };
    let n = graph.node_count();
    let adjacency = graph.adjacency();
    let label = |id: NodeId| graph.nodes()[id.0].label.clone();

    let mut dist: Vec<Option<i64>> = vec![None; n];
    let mut prev: Vec<Option<(NodeId, EdgeId)>> = vec![None; n];
    let mut done = vec![false; n];
    let mut open: Vec<NodeId> = vec![source];
    dist[source.0] = Some(0);

    let mut initial = GraphSnapshot::from_graph(graph);
    initial.node_mut(source).distance = Some(0);
    initial.set_node(source, NodeVisual::Frontier);
    initial.frontier = vec![source];
    let mut rec = TraceRecorder::start(initial, format!("{} from {}", name, label(source)));

    loop {
        open.sort_by_key(|&id| (dist[id.0].unwrap_or(i64::MAX), id));
        if open.is_empty() {
            break;
        }
        let u = open.remove(0);
        done[u.0] = true;
        let du = dist[u.0].unwrap_or_default();

        let frontier = open.clone();
        rec.emit_with(
            StepKind::Dequeue,
            format!("Extract {} with distance {}", label(u), du),
            |g| {
                g.set_node(u, NodeVisual::Active);
                g.frontier = frontier;
            },
        );

        if stop_at_target && Some(u) == target {
            rec.emit_with(StepKind::Finalize, format!("{} reached", label(u)), |g| {
                g.set_node(u, NodeVisual::Finalized);
            });
            break;
        }

        for &(v, edge) in &adjacency[u.0] {
            let weight = graph.edges()[edge.0].weight;
            let candidate = du + weight;
            let current = dist[v.0];
            rec.emit_with(
                StepKind::Relax,
                format!(
                    "Relax {} → {} (weight {}): {} vs {}",
                    label(u),
                    label(v),
                    weight,
                    candidate,
                    current.map_or("∞".to_string(), |d| d.to_string())
                ),
                |g| {
                    if g.edge(edge).state == EdgeVisual::Default {
                        g.set_edge(edge, EdgeVisual::Relaxed);
                    }
                },
            );

            if done[v.0] || current.is_some_and(|d| candidate >= d) {
                continue;
            }
            let old_edge = prev[v.0].map(|(_, e)| e);
            dist[v.0] = Some(candidate);
            prev[v.0] = Some((u, edge));
            if !open.contains(&v) {
                open.push(v);
            }
            let frontier = open.clone();
            rec.emit_with(
                StepKind::Update,
                format!("dist[{}] = {} via {}", label(v), candidate, label(u)),
                |g| {
                    if let Some(old) = old_edge {
                        g.set_edge(old, EdgeVisual::Relaxed);
                    }
                    g.set_edge(edge, EdgeVisual::Tree);
                    let node = g.node_mut(v);
                    node.distance = Some(candidate);
                    node.state = NodeVisual::Frontier;
                    g.frontier = frontier;
                },
            );
        }

        rec.emit_with(
            StepKind::Finalize,
            format!("{} finalized at distance {}", label(u), du),
            |g| g.set_node(u, NodeVisual::Finalized),
        );
    }

    match target {
        Some(t) if dist[t.0].is_some() => {
            let (nodes, edges) = reconstruct(&prev, source, t);
            let cost = dist[t.0].unwrap_or_default();
            let route = nodes.iter().map(|&id| label(id)).collect::<Vec<_>>().join(" → ");
            rec.emit_with(
                StepKind::Path,
                format!("Shortest path {} with cost {}", route, cost),
                |g| {
                    for &id in &nodes {
                        g.set_node(id, NodeVisual::Path);
                    }
                    for &e in &edges {
                        g.set_edge(e, EdgeVisual::Path);
                    }
                    g.frontier.clear();
                    g.path = nodes;
                    g.total = Some(cost);
                },
            );
        }
        Some(t) => {
            rec.emit_with(
                StepKind::Terminal,
                format!("{} is unreachable from {}", label(t), label(source)),
                |g| g.frontier.clear(),
            );
        }
        None => {
            let settled = done.iter().filter(|&&d| d).count();
            rec.emit_with(
                StepKind::Terminal,
                format!("All distances settled ({} of {} nodes reachable)", settled, n),
                |g| g.frontier.clear(),
            );
        }
    }

    let trace = rec.finish();
    tracing::debug!(steps = trace.len(), "{} trace generated", name);
    Ok(trace)
}

/// Walk `prev` back from `target`; returns nodes source-first and the edges between them.
fn reconstruct(
    prev: &[Option<(NodeId, EdgeId)>],
    source: NodeId,
    target: NodeId,
) -> (Vec<NodeId>, Vec<EdgeId>) {
    let mut nodes = vec![target];
    let mut edges = Vec::new();
    let mut at = target;
    while at != source {
        match prev[at.0] {
            Some((p, e)) => {
                edges.push(e);
                nodes.push(p);
                at = p;
            }
            None => break,
        }
    }
    nodes.reverse();
    edges.reverse();
    (nodes, edges)
}
