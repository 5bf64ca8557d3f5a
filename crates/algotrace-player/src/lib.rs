//! Algotrace Player
//!
//! Replays a recorded [`Trace`](algotrace_core::Trace) without ever re-running
//! the algorithm that produced it.
//!
//! # Architecture
//!
//! - **Playback**: synchronous cursor state machine (`Stopped`, `Playing`,
//!   `Paused`, `Finished`) with clamped controls
//! - **PlaybackDriver**: tokio timer around a `Playback` that advances the
//!   cursor every tick and publishes frames on a watch channel
//!
//! # Usage
//!
//! ```ignore
//! let trace = algotrace_generators::bfs(&graph, NodeId(0))?;
//! let driver = PlaybackDriver::new(trace, Duration::from_millis(500));
//! let mut frames = driver.subscribe();
//! driver.start().await;
//! while frames.changed().await.is_ok() {
//!     render(frames.borrow().step());
//! }
//! ```

mod driver;
mod playback;

pub use driver::{Frame, PlaybackDriver};
pub use playback::{Playback, PlaybackState, PlaybackStatus, DEFAULT_DELAY};
