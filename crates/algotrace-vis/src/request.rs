//! Trace requests: which algorithm to run and on what input.

use algotrace_core::{Coord, Graph, Grid, NodeId, Result, Snapshot, Trace, TraceError};
use algotrace_generators as generators;
use serde::Deserialize;

/// Largest graph accepted over the network, in nodes.
pub const MAX_NODES: usize = 64;
/// Largest graph accepted over the network, in edges.
pub const MAX_EDGES: usize = 256;
/// Longest array accepted for search and sort.
pub const MAX_VALUES: usize = 64;
/// Largest board accepted, in cells.
pub const MAX_CELLS: usize = 400;

fn check_limit(what: &str, len: usize, max: usize) -> Result<()> {
    if len > max {
        return Err(TraceError::InvalidInput(format!(
            "{} {} exceeds the limit of {}",
            len, what, max
        )));
    }
    Ok(())
}

fn parse_board(text: &str) -> Result<Grid> {
    // Each cell is at least one byte, so oversized text is rejected unparsed.
    check_limit("board bytes", text.trim().len(), MAX_CELLS * 4)?;
    let grid = Grid::parse(text)?;
    check_limit("board cells", grid.rows() * grid.cols(), MAX_CELLS)?;
    Ok(grid)
}

/// A graph as clients send it: a node count and weighted edge triples.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphInput {
    #[serde(default)]
    pub directed: bool,
    pub nodes: usize,
    #[serde(default)]
    pub edges: Vec<(usize, usize, i64)>,
}

impl GraphInput {
    /// Build the graph, rejecting edges to missing nodes.
    pub fn build(&self) -> Result<Graph> {
        check_limit("nodes", self.nodes, MAX_NODES)?;
        check_limit("edges", self.edges.len(), MAX_EDGES)?;
        let mut graph = Graph::with_nodes(self.directed, self.nodes);
        for &(from, to, weight) in &self.edges {
            graph.add_edge(NodeId(from), NodeId(to), weight)?;
        }
        Ok(graph)
    }
}

/// One generator invocation.
///
/// Boards are sent as text, one line per row, in the notation
/// [`Grid::parse`] reads.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "algorithm", rename_all = "snake_case")]
pub enum TraceRequest {
    LinearSearch { values: Vec<i64>, target: String },
    BinarySearch { values: Vec<i64>, target: String },
    BubbleSort { values: Vec<i64> },
    Bfs { graph: GraphInput, start: usize },
    Dfs { graph: GraphInput, start: usize },
    Dijkstra {
        graph: GraphInput,
        source: usize,
        #[serde(default)]
        target: Option<usize>,
    },
    UniformCost { graph: GraphInput, source: usize, target: usize },
    Bridges { graph: GraphInput },
    MaxFlow { graph: GraphInput, source: usize, sink: usize },
    Euler { graph: GraphInput },
    ChinesePostman { graph: GraphInput },
    NQueens { size: usize },
    KnightsTour { size: usize, start: Coord },
    KnightMoves { size: usize, start: Coord, target: Coord },
    MazeBfs { board: String },
    MazeDfs { board: String },
    Islands { board: String },
}

impl TraceRequest {
    /// Name used in logs and status.
    pub fn name(&self) -> &'static str {
        match self {
            TraceRequest::LinearSearch { .. } => "linear_search",
            TraceRequest::BinarySearch { .. } => "binary_search",
            TraceRequest::BubbleSort { .. } => "bubble_sort",
            TraceRequest::Bfs { .. } => "bfs",
            TraceRequest::Dfs { .. } => "dfs",
            TraceRequest::Dijkstra { .. } => "dijkstra",
            TraceRequest::UniformCost { .. } => "uniform_cost",
            TraceRequest::Bridges { .. } => "bridges",
            TraceRequest::MaxFlow { .. } => "max_flow",
            TraceRequest::Euler { .. } => "euler",
            TraceRequest::ChinesePostman { .. } => "chinese_postman",
            TraceRequest::NQueens { .. } => "n_queens",
            TraceRequest::KnightsTour { .. } => "knights_tour",
            TraceRequest::KnightMoves { .. } => "knight_moves",
            TraceRequest::MazeBfs { .. } => "maze_bfs",
            TraceRequest::MazeDfs { .. } => "maze_dfs",
            TraceRequest::Islands { .. } => "islands",
        }
    }

    /// Run the generator. Nothing is produced when the input is rejected.
    pub fn generate(&self) -> Result<Trace<Snapshot>> {
        if let TraceRequest::LinearSearch { values, .. }
        | TraceRequest::BinarySearch { values, .. }
        | TraceRequest::BubbleSort { values } = self
        {
            check_limit("values", values.len(), MAX_VALUES)?;
        }
        let trace = match self {
            TraceRequest::LinearSearch { values, target } => {
                generators::linear_search(values, generators::parse_target(target)?).map(Snapshot::from)
            }
            TraceRequest::BinarySearch { values, target } => {
                generators::binary_search(values, generators::parse_target(target)?)?.map(Snapshot::from)
            }
            TraceRequest::BubbleSort { values } => generators::bubble_sort(values).map(Snapshot::from),
            TraceRequest::Bfs { graph, start } => {
                generators::bfs(&graph.build()?, NodeId(*start))?.map(Snapshot::from)
            }
            TraceRequest::Dfs { graph, start } => {
                generators::dfs(&graph.build()?, NodeId(*start))?.map(Snapshot::from)
            }
            TraceRequest::Dijkstra {
                graph,
                source,
                target,
            } => generators::dijkstra(&graph.build()?, NodeId(*source), target.map(NodeId))?
                .map(Snapshot::from),
            TraceRequest::UniformCost {
                graph,
                source,
                target,
            } => generators::uniform_cost_search(&graph.build()?, NodeId(*source), NodeId(*target))?
                .map(Snapshot::from),
            TraceRequest::Bridges { graph } => {
                generators::bridges_trace(&graph.build()?)?.map(Snapshot::from)
            }
            TraceRequest::MaxFlow {
                graph,
                source,
                sink,
            } => generators::edmonds_karp(&graph.build()?, NodeId(*source), NodeId(*sink))?
                .map(Snapshot::from),
            TraceRequest::Euler { graph } => {
                let graph = graph.build()?;
                let mode = generators::classify(&graph).ok_or_else(|| {
                    TraceError::InvalidInput(
                        "graph has neither an Euler circuit nor an Euler path".into(),
                    )
                })?;
                generators::euler_trace(&graph, mode).map(Snapshot::from)
            }
            TraceRequest::ChinesePostman { graph } => {
                generators::chinese_postman(&graph.build()?, generators::MatchingStrategy::GreedyNearest)?
                    .map(Snapshot::from)
            }
            TraceRequest::NQueens { size } => generators::n_queens(*size)?.map(Snapshot::from),
            TraceRequest::KnightsTour { size, start } => {
                generators::knights_tour(*size, *start, generators::KnightHeuristic::Warnsdorff)?
                    .map(Snapshot::from)
            }
            TraceRequest::KnightMoves {
                size,
                start,
                target,
            } => generators::min_knight_moves(*size, *start, *target)?.map(Snapshot::from),
            TraceRequest::MazeBfs { board } => {
                generators::maze_bfs(&parse_board(board)?)?.map(Snapshot::from)
            }
            TraceRequest::MazeDfs { board } => {
                generators::maze_dfs(&parse_board(board)?)?.map(Snapshot::from)
            }
            TraceRequest::Islands { board } => {
                generators::count_islands(&parse_board(board)?).map(Snapshot::from)
            }
        };
        Ok(trace)
    }
}
