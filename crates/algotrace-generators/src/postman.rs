//! Chinese Postman (route inspection) on undirected graphs.
//!
//! Runs in four phases: find the odd-degree vertices, compute all-pairs
//! shortest paths with Floyd–Warshall, pair the odd vertices and duplicate
//! the edges along each pair's shortest path, then walk an Euler circuit of
//! the augmented multigraph.

use algotrace_core::{
    DistanceMatrix, EdgeId, EdgeVisual, Graph, GraphSnapshot, NodeId, NodeVisual, Result,
    StepKind, Trace, TraceError, TraceRecorder,
};

use crate::euler::{hierholzer, replay};

/// How odd-degree vertices are paired up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MatchingStrategy {
    /// Take the lowest unmatched odd vertex and pair it with the nearest
    /// remaining one. Fast, but not guaranteed to reach the minimum-weight
    /// perfect matching.
    #[default]
    GreedyNearest,
}

/// Floyd–Warshall tables.
struct AllPairs {
    dist: DistanceMatrix,
    /// First hop on the shortest `i → j` path
    next: Vec<Vec<Option<NodeId>>>,
    /// Cheapest direct edge between two nodes
    direct: Vec<Vec<Option<EdgeId>>>,
}

impl AllPairs {
    fn init(graph: &Graph) -> Self {
        let n = graph.node_count();
        let mut dist: DistanceMatrix = vec![vec![None; n]; n];
        let mut next = vec![vec![None; n]; n];
        let mut direct: Vec<Vec<Option<EdgeId>>> = vec![vec![None; n]; n];
        for i in 0..n {
            dist[i][i] = Some(0);
            next[i][i] = Some(NodeId(i));
        }
        for e in graph.edges().iter().filter(|e| !e.is_loop()) {
            let (a, b) = (e.from.0, e.to.0);
            if dist[a][b].map_or(true, |d| e.weight < d) {
                for (x, y) in [(a, b), (b, a)] {
                    dist[x][y] = Some(e.weight);
                    next[x][y] = Some(NodeId(y));
                    direct[x][y] = Some(e.id);
                }
            }
        }
        Self { dist, next, direct }
    }

    /// Relax every pair through `k`; returns how many pairs improved.
    fn relax_through(&mut self, k: usize) -> usize {
        let n = self.dist.len();
        let mut improved = 0;
        for i in 0..n {
            let Some(ik) = self.dist[i][k] else { continue };
            for j in 0..n {
                let Some(kj) = self.dist[k][j] else { continue };
                if self.dist[i][j].map_or(true, |d| ik + kj < d) {
                    self.dist[i][j] = Some(ik + kj);
                    self.next[i][j] = self.next[i][k];
                    improved += 1;
                }
            }
        }
        improved
    }

    /// Edges along the shortest `from → to` path.
    fn route(&self, from: NodeId, to: NodeId) -> Vec<(NodeId, NodeId, EdgeId)> {
        let mut hops = Vec::new();
        let mut at = from;
        while at != to {
            let Some(step) = self.next[at.0][to.0] else { break };
            let Some(edge) = self.direct[at.0][step.0] else { break };
            hops.push((at, step, edge));
            at = step;
        }
        hops
    }
}

/// Shortest closed walk covering every edge at least once.
///
/// Fails with [`TraceError::Disconnected`] when the edges do not form one
/// connected component.
pub fn chinese_postman(graph: &Graph, strategy: MatchingStrategy) -> Result<Trace<GraphSnapshot>> {
    graph.validate()?;
    if graph.is_directed() {
        return Err(TraceError::InvalidInput(
            "Chinese Postman needs an undirected graph".into(),
        ));
    }
    if graph.edge_count() == 0 {
        return Err(TraceError::InvalidInput("graph has no edges to walk".into()));
    }
    if let Some(e) = graph.edges().iter().find(|e| e.weight < 0) {
        return Err(TraceError::NegativeWeight {
            edge: e.id.0,
            weight: e.weight,
        });
    }
    let degrees = graph.degrees();
    check_connected(graph, &degrees)?;
    // The route is the edge total plus one shortest path per matched pair.
    let pair_count = degrees.iter().filter(|&&d| d % 2 == 1).count() / 2;
    let factor = u32::try_from(pair_count + 1).unwrap_or(u32::MAX).max(2);
    let base_length = graph.check_weights(factor)?;

    let label = |id: NodeId| graph.nodes()[id.0].label.clone();
    let n = graph.node_count();

    let mut rec = TraceRecorder::start(GraphSnapshot::from_graph(graph), "Chinese Postman");

    // Phase 1: degrees.
    let odd: Vec<NodeId> = (0..n)
        .filter(|&i| degrees[i] % 2 == 1)
        .map(NodeId)
        .collect();
    let listing = odd.iter().map(|&id| label(id)).collect::<Vec<_>>().join(", ");
    let description = if odd.is_empty() {
        "Every vertex has even degree: already Eulerian".to_string()
    } else {
        format!("Odd-degree vertices: {}", listing)
    };
    let odd_nodes = odd.clone();
    rec.emit_with(StepKind::Phase, description, |g| {
        for (view, &d) in g.nodes.iter_mut().zip(&degrees) {
            view.degree = Some(d);
        }
        for &id in &odd_nodes {
            g.set_node(id, NodeVisual::Frontier);
        }
    });

    let mut augmented = graph.clone();
    let mut extra = 0i64;

    if !odd.is_empty() {
        // Phase 2: all-pairs shortest paths.
        let mut tables = AllPairs::init(graph);
        for k in 0..n {
            let improved = tables.relax_through(k);
            if improved == 0 {
                continue;
            }
            let matrix = tables.dist.clone();
            rec.emit_with(
                StepKind::Update,
                format!("Floyd–Warshall through {}: {} pair(s) improved", label(NodeId(k)), improved),
                |g| g.matrix = Some(matrix),
            );
        }
        let matrix = tables.dist.clone();
        rec.emit_with(StepKind::Phase, "All-pairs shortest distances ready", |g| {
            g.matrix = Some(matrix);
        });

        // Phase 3: matching.
        let pairs = match strategy {
            MatchingStrategy::GreedyNearest => greedy_pairs(&odd, &tables.dist),
        };
        for (a, b) in pairs {
            let hops = tables.route(a, b);
            let mut added = Vec::with_capacity(hops.len());
            let mut cost = 0;
            for &(x, y, edge) in &hops {
                let weight = graph.edges()[edge.0].weight;
                augmented.add_edge(x, y, weight)?;
                added.push((x, y, weight));
                cost += weight;
            }
            extra += cost;
            let mut nodes = vec![a];
            nodes.extend(hops.iter().map(|&(_, y, _)| y));
            rec.emit_with(
                StepKind::Match,
                format!(
                    "Pair {} with {}: duplicate {} edge(s) costing {}",
                    label(a),
                    label(b),
                    hops.len(),
                    cost
                ),
                |g| {
                    for (x, y, weight) in added {
                        g.push_edge(x, y, weight, EdgeVisual::Duplicated);
                    }
                    g.set_node(a, NodeVisual::Visited);
                    g.set_node(b, NodeVisual::Visited);
                    g.pairs.push((a, b));
                    g.path = nodes;
                },
            );
        }
    }

    // Phase 4: Euler circuit on the augmented multigraph.
    let start = NodeId(degrees.iter().position(|&d| d > 0).unwrap_or(0));
    rec.emit_with(
        StepKind::Phase,
        format!(
            "Walk an Euler circuit of {} edge(s) from {}",
            augmented.edge_count(),
            label(start)
        ),
        |g| {
            for view in g.nodes.iter_mut() {
                view.state = NodeVisual::Default;
            }
            g.set_node(start, NodeVisual::Active);
            g.path.clear();
        },
    );
    let events = hierholzer(&augmented.adjacency(), augmented.edge_count(), start);
    let circuit = replay(&mut rec, &augmented, &events);

    let total = base_length + extra;
    let route = circuit.iter().map(|&id| label(id)).collect::<Vec<_>>().join(" → ");
    rec.emit_with(
        StepKind::Terminal,
        format!("Postman route {} with total weight {}", route, total),
        |g| {
            g.frontier.clear();
            g.circuit = circuit;
            g.total = Some(total);
        },
    );

    let trace = rec.finish();
    tracing::debug!(steps = trace.len(), total, extra, ?strategy, "postman trace generated");
    Ok(trace)
}

fn check_connected(graph: &Graph, degrees: &[usize]) -> Result<()> {
    let Some(start) = degrees.iter().position(|&d| d > 0) else {
        return Ok(());
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
    match (0..degrees.len()).find(|&i| degrees[i] > 0 && !seen[i]) {
        Some(to) => Err(TraceError::Disconnected { from: start, to }),
        None => Ok(()),
    }
}

/// Pair each lowest unmatched vertex with its nearest remaining partner;
/// ties go to the lower id.
fn greedy_pairs(odd: &[NodeId], dist: &DistanceMatrix) -> Vec<(NodeId, NodeId)> {
    let mut unmatched = odd.to_vec();
    let mut pairs = Vec::with_capacity(odd.len() / 2);
    while !unmatched.is_empty() {
        let a = unmatched.remove(0);
        let nearest = unmatched
            .iter()
            .enumerate()
            .min_by_key(|(_, b)| dist[a.0][b.0].unwrap_or(i64::MAX))
            .map(|(i, _)| i);
        let Some(i) = nearest else { break };
        pairs.push((a, unmatched.remove(i)));
    }
    pairs
}
