//! Edmonds–Karp maximum flow.
//!
//! Every input edge `e` becomes a pair of residual arcs: `2e` runs
//! `from → to` with the edge's capacity, `2e + 1` runs back with capacity 0
//! (directed) or the same capacity (undirected). Flow is skew-symmetric:
//! `flow[2e] == -flow[2e + 1]` at all times.

use std::collections::VecDeque;

use algotrace_core::{
    EdgeId, EdgeVisual, Graph, GraphSnapshot, NodeId, NodeVisual, Result, StepKind, Trace,
    TraceError, TraceRecorder,
};

struct Residual {
    /// Arc endpoints
    head: Vec<NodeId>,
    cap: Vec<i64>,
    flow: Vec<i64>,
    /// Outgoing arcs per node, in edge insertion order
    out: Vec<Vec<usize>>,
}

impl Residual {
    fn new(graph: &Graph) -> Self {
        let m = graph.edge_count();
        let mut head = Vec::with_capacity(2 * m);
        let mut cap = Vec::with_capacity(2 * m);
        let mut out = vec![Vec::new(); graph.node_count()];
        for e in graph.edges() {
            head.push(e.to);
            cap.push(e.weight);
            head.push(e.from);
            cap.push(if graph.is_directed() { 0 } else { e.weight });
            if !e.is_loop() {
                out[e.from.0].push(2 * e.id.0);
                out[e.to.0].push(2 * e.id.0 + 1);
            }
        }
        Self {
            head,
            cap,
            flow: vec![0; 2 * m],
            out,
        }
    }

    fn residual(&self, arc: usize) -> i64 {
        self.cap[arc] - self.flow[arc]
    }

    /// BFS over arcs with spare capacity. Returns the reached set and the
    /// arc used to reach each node.
    fn search(&self, source: NodeId) -> (Vec<bool>, Vec<Option<usize>>) {
        let n = self.out.len();
        let mut reached = vec![false; n];
        let mut parent = vec![None; n];
        let mut queue = VecDeque::from([source]);
        reached[source.0] = true;
        while let Some(u) = queue.pop_front() {
            for &arc in &self.out[u.0] {
                let v = self.head[arc];
                if !reached[v.0] && self.residual(arc) > 0 {
                    reached[v.0] = true;
                    parent[v.0] = Some(arc);
                    queue.push_back(v);
                }
            }
        }
        (reached, parent)
    }

    /// Arcs from `source` to `sink`, source first.
    fn path_arcs(&self, parent: &[Option<usize>], source: NodeId, sink: NodeId) -> Vec<usize> {
        let mut arcs = Vec::new();
        let mut at = sink;
        while at != source {
            let Some(arc) = parent[at.0] else { break };
            arcs.push(arc);
            at = self.head[arc ^ 1];
        }
        arcs.reverse();
        arcs
    }

    fn push(&mut self, arc: usize, amount: i64) {
        self.flow[arc] += amount;
        self.flow[arc ^ 1] -= amount;
    }

    /// Whether edge `e` has no room left in the direction its flow runs.
    fn saturated(&self, e: usize) -> bool {
        let forward = 2 * e;
        let arc = if self.flow[forward] >= 0 { forward } else { forward + 1 };
        self.flow[arc] != 0 && self.residual(arc) == 0
    }
}

/// Maximum flow from `source` to `sink`, edge weights read as capacities.
///
/// Emits a search step per BFS and an augment step per augmenting path.
/// The terminal step marks the source side of the minimum cut and the
/// saturated edges crossing it.
pub fn edmonds_karp(graph: &Graph, source: NodeId, sink: NodeId) -> Result<Trace<GraphSnapshot>> {
    graph.validate()?;
    graph.check_node(source)?;
    graph.check_node(sink)?;
    if source == sink {
        return Err(TraceError::InvalidInput(
            "source and sink must be different nodes".into(),
        ));
    }
    if let Some(e) = graph.edges().iter().find(|e| e.weight < 0) {
        return Err(TraceError::NegativeWeight {
            edge: e.id.0,
            weight: e.weight,
        });
    }
    // Undirected residuals reach twice a capacity.
    graph.check_weights(2)?;

    let label = |id: NodeId| graph.nodes()[id.0].label.clone();
    let mut residual = Residual::new(graph);

    let mut initial = GraphSnapshot::from_graph(graph);
    for edge in &mut initial.edges {
        edge.flow = Some(0);
    }
    initial.total = Some(0);
    initial.set_node(source, NodeVisual::Active);
    let mut rec = TraceRecorder::start(
        initial,
        format!("Max flow from {} to {}", label(source), label(sink)),
    );

    let mut total = 0i64;
    let mut augmentations = 0usize;

    let reached = loop {
        let (reached, parent) = residual.search(source);
        if !reached[sink.0] {
            let count = reached.iter().filter(|&&r| r).count();
            let reached_nodes = reached.clone();
            rec.emit_with(
                StepKind::Search,
                format!("BFS reaches {} node(s) but not {}", count, label(sink)),
                |g| {
                    paint_reached(g, &reached_nodes);
                    g.path.clear();
                },
            );
            break reached;
        }

        let arcs = residual.path_arcs(&parent, source, sink);
        let bottleneck = arcs
            .iter()
            .map(|&arc| residual.residual(arc))
            .min()
            .unwrap_or(0);
        let mut nodes = vec![source];
        nodes.extend(arcs.iter().map(|&arc| residual.head[arc]));
        let route = nodes.iter().map(|&id| label(id)).collect::<Vec<_>>().join(" → ");

        let reached_nodes = reached.clone();
        let path_nodes = nodes.clone();
        let path_edges: Vec<EdgeId> = arcs.iter().map(|&arc| EdgeId(arc / 2)).collect();
        rec.emit_with(
            StepKind::Search,
            format!("Augmenting path {} with bottleneck {}", route, bottleneck),
            |g| {
                paint_reached(g, &reached_nodes);
                for e in g.edges.iter_mut() {
                    if e.state == EdgeVisual::Path {
                        e.state = EdgeVisual::Default;
                    }
                }
                for &id in &path_nodes {
                    g.set_node(id, NodeVisual::Path);
                }
                for &e in &path_edges {
                    g.set_edge(e, EdgeVisual::Path);
                }
                g.path = path_nodes;
            },
        );

        for &arc in &arcs {
            residual.push(arc, bottleneck);
        }
        total += bottleneck;
        augmentations += 1;

        let flows: Vec<(i64, bool)> = (0..graph.edge_count())
            .map(|e| (residual.flow[2 * e], residual.saturated(e)))
            .collect();
        rec.emit_with(
            StepKind::Augment,
            format!("Push {} along {}: flow is now {}", bottleneck, route, total),
            |g| {
                for (view, &(flow, saturated)) in g.edges.iter_mut().zip(&flows) {
                    view.flow = Some(flow);
                    view.state = if saturated {
                        EdgeVisual::Saturated
                    } else if flow != 0 {
                        EdgeVisual::Tree
                    } else {
                        EdgeVisual::Default
                    };
                }
                g.total = Some(total);
            },
        );
    };

    let cut: Vec<EdgeId> = graph
        .edges()
        .iter()
        .filter(|e| {
            let (a, b) = (reached[e.from.0], reached[e.to.0]);
            if graph.is_directed() { a && !b } else { a != b }
        })
        .map(|e| e.id)
        .collect();
    let cut_edges = cut.clone();
    rec.emit_with(
        StepKind::Terminal,
        format!(
            "Max flow {} after {} augmentation(s); min cut has {} edge(s)",
            total,
            augmentations,
            cut.len()
        ),
        |g| {
            for (i, view) in g.nodes.iter_mut().enumerate() {
                view.state = if reached[i] { NodeVisual::Visited } else { NodeVisual::Default };
            }
            for view in g.edges.iter_mut() {
                view.state = if view.flow.is_some_and(|f| f != 0) {
                    EdgeVisual::Tree
                } else {
                    EdgeVisual::Default
                };
            }
            for &e in &cut_edges {
                g.set_edge(e, EdgeVisual::Saturated);
            }
            g.path.clear();
            g.total = Some(total);
        },
    );

    let trace = rec.finish();
    tracing::debug!(steps = trace.len(), total, augmentations, "max flow trace generated");
    Ok(trace)
}

fn paint_reached(g: &mut GraphSnapshot, reached: &[bool]) {
    for (view, &hit) in g.nodes.iter_mut().zip(reached) {
        view.state = if hit { NodeVisual::Visited } else { NodeVisual::Default };
    }
}
