//! Algotrace Visualization Server
//!
//! Generate algorithm traces on request and replay them to a browser.
//!
//! # Architecture
//!
//! - **Requests**: [`TraceRequest`] names an algorithm and its input
//! - **Playback**: one shared [`PlaybackDriver`] ticks through the active trace
//! - **WebSocket**: streams a frame on every cursor change
//! - **REST API**: playback controls and trace generation
//!
//! A request the generator rejects is answered with 400 and the message of
//! its [`TraceError`]; the trace already loaded keeps playing.
//!
//! # Usage
//!
//! ```ignore
//! let trace = bfs(&graph, NodeId(0))?.map(Snapshot::from);
//! let server = VisServer::new(trace, "bfs", config.tick);
//! server.serve(config.addr).await?;
//! ```
//!
//! [`PlaybackDriver`]: algotrace_player::PlaybackDriver
//! [`TraceError`]: algotrace_core::TraceError

mod config;
mod error;
mod request;
mod server;

pub use config::{ConfigError, VisConfig, DEFAULT_ADDR};
pub use error::{ApiError, ApiErrorDetail};
pub use request::{GraphInput, TraceRequest, MAX_CELLS, MAX_EDGES, MAX_NODES, MAX_VALUES};
pub use server::{AppState, FrameView, VisServer};
