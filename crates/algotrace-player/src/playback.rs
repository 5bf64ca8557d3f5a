//! Playback controls for a recorded trace.

use std::sync::Arc;
use std::time::Duration;

use algotrace_core::{Step, Trace};
use serde::{Deserialize, Serialize};

/// Tick delay used until [`Playback::set_speed`] says otherwise.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(500);

/// Current state of playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackState {
    /// Cursor at the beginning, not playing
    Stopped,
    /// Cursor advancing on every tick
    Playing,
    /// Playback is paused
    Paused,
    /// Playback reached the last step
    Finished,
}

/// Playback controller for one trace.
///
/// The cursor always points at a real step: it lives in `[0, len - 1]` and
/// every control clamps instead of failing.
#[derive(Debug)]
pub struct Playback<P> {
    trace: Arc<Trace<P>>,
    cursor: usize,
    state: PlaybackState,
    delay: Duration,
}

impl<P> Clone for Playback<P> {
    fn clone(&self) -> Self {
        Self {
            trace: Arc::clone(&self.trace),
            cursor: self.cursor,
            state: self.state,
            delay: self.delay,
        }
    }
}

impl<P> Playback<P> {
    /// Create a new playback controller at step 0.
    pub fn new(trace: impl Into<Arc<Trace<P>>>) -> Self {
        Self {
            trace: trace.into(),
            cursor: 0,
            state: PlaybackState::Stopped,
            delay: DEFAULT_DELAY,
        }
    }

    /// Replace the trace and rewind. The tick delay is kept.
    pub fn load(&mut self, trace: impl Into<Arc<Trace<P>>>) {
        self.trace = trace.into();
        self.cursor = 0;
        self.state = PlaybackState::Stopped;
    }

    /// The trace being played.
    pub fn trace(&self) -> &Arc<Trace<P>> {
        &self.trace
    }

    /// Index of the active step.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of steps in the trace.
    pub fn len(&self) -> usize {
        self.trace.len()
    }

    /// Whether the trace has no steps.
    pub fn is_empty(&self) -> bool {
        self.trace.is_empty()
    }

    fn last_index(&self) -> usize {
        self.trace.len().saturating_sub(1)
    }

    /// Get the current playback state.
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Delay between ticks.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// The active step.
    pub fn current_step(&self) -> Option<&Step<P>> {
        self.trace.get(self.cursor)
    }

    /// Start playing. Rewinds first when already at the last step.
    pub fn start(&mut self) {
        if self.cursor >= self.last_index() {
            self.cursor = 0;
        }
        self.state = PlaybackState::Playing;
    }

    /// Pause playback. Does nothing unless playing.
    pub fn pause(&mut self) {
        if self.state == PlaybackState::Playing {
            self.state = PlaybackState::Paused;
        }
    }

    /// Resume paused playback.
    pub fn resume(&mut self) {
        if self.state == PlaybackState::Paused {
            self.state = PlaybackState::Playing;
        }
    }

    /// Stop playback and return to the beginning.
    pub fn reset(&mut self) {
        self.cursor = 0;
        self.state = PlaybackState::Stopped;
    }

    /// Change the delay between future ticks.
    pub fn set_speed(&mut self, delay: Duration) {
        self.delay = delay;
    }

    /// Step forward one step. Manual stepping pauses playback.
    ///
    /// Returns whether the cursor moved.
    pub fn step_forward(&mut self) -> bool {
        if self.cursor >= self.last_index() {
            return false;
        }
        self.cursor += 1;
        self.state = if self.cursor == self.last_index() {
            PlaybackState::Finished
        } else {
            PlaybackState::Paused
        };
        true
    }

    /// Step backward one step. Manual stepping pauses playback.
    ///
    /// Returns whether the cursor moved.
    pub fn step_backward(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        self.state = PlaybackState::Paused;
        true
    }

    /// Jump to a step, clamped to the trace.
    pub fn seek(&mut self, index: usize) {
        self.cursor = index.min(self.last_index());
        if self.state == PlaybackState::Finished && self.cursor < self.last_index() {
            self.state = PlaybackState::Paused;
        }
    }

    /// Advance one step if playing. Returns whether the cursor moved.
    ///
    /// Reaching the last step finishes playback.
    pub fn tick(&mut self) -> bool {
        if self.state != PlaybackState::Playing {
            return false;
        }
        if self.cursor >= self.last_index() {
            self.state = PlaybackState::Finished;
            return false;
        }
        self.cursor += 1;
        if self.cursor == self.last_index() {
            self.state = PlaybackState::Finished;
        }
        true
    }

    /// Calculate progress as a fraction (0.0 - 1.0).
    pub fn progress(&self) -> f64 {
        let last = self.last_index();
        if last == 0 {
            1.0
        } else {
            self.cursor as f64 / last as f64
        }
    }
}

/// Playback status for sending to a renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackStatus {
    pub cursor: usize,
    pub len: usize,
    pub state: PlaybackState,
    pub delay_ms: u64,
    pub progress: f64,
    /// Description of the active step
    pub description: String,
}

impl<P> From<&Playback<P>> for PlaybackStatus {
    fn from(playback: &Playback<P>) -> Self {
        Self {
            cursor: playback.cursor,
            len: playback.len(),
            state: playback.state,
            delay_ms: u64::try_from(playback.delay.as_millis()).unwrap_or(u64::MAX),
            progress: playback.progress(),
            description: playback
                .current_step()
                .map(|s| s.description().to_string())
                .unwrap_or_default(),
        }
    }
}
