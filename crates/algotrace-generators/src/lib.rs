//! Algotrace Generators
//!
//! One pure function per algorithm: take an input structure by reference,
//! run the algorithm to completion, and return the full [`Trace`] of what
//! happened.
//!
//! # Contract
//!
//! - Input is validated before anything is recorded. Rejected input returns
//!   a [`TraceError`] and no trace.
//! - Every trace starts with the initial condition and ends with a terminal
//!   step. "Not found", "no path" and "no tour" are terminal steps, not errors.
//! - Same input, same trace. Nothing reads clocks, randomness or hash-map
//!   iteration order.
//! - The input is never mutated.
//!
//! # Backtracking algorithms
//!
//! Tarjan, Hierholzer and N-Queens run as explicit stack machines that emit
//! plain event values ([`bridges::BridgeEvent`], [`euler::TourEvent`],
//! [`queens::QueensEvent`]). The trace functions fold those events into
//! snapshots, so the algorithms can be tested without any rendering state.
//!
//! # Heuristics
//!
//! Two generators are deliberately approximate and say so in their API:
//! [`postman::MatchingStrategy::GreedyNearest`] and
//! [`knight::KnightHeuristic::Warnsdorff`].
//!
//! [`Trace`]: algotrace_core::Trace
//! [`TraceError`]: algotrace_core::TraceError

pub mod bridges;
pub mod euler;
pub mod grid_search;
pub mod knight;
pub mod max_flow;
pub mod postman;
pub mod queens;
pub mod search;
pub mod shortest_path;
pub mod sort;
pub mod traversal;

pub use bridges::{bridge_events, bridges_trace, find_bridges, BridgeEvent, BridgeReport};
pub use euler::{classify, euler_trace, hierholzer, EulerMode, TourEvent};
pub use grid_search::{count_islands, grid_bfs, maze_bfs, maze_dfs, min_knight_moves};
pub use knight::{knights_tour, KnightHeuristic, KNIGHT_MOVES};
pub use max_flow::edmonds_karp;
pub use postman::{chinese_postman, MatchingStrategy};
pub use queens::{n_queens, queens_events, QueensEvent};
pub use search::{binary_search, linear_search, parse_target};
pub use shortest_path::{dijkstra, uniform_cost_search};
pub use sort::bubble_sort;
pub use traversal::{bfs, dfs, visit_order};
