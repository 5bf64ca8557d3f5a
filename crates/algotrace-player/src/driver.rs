//! Async timer that drives a [`Playback`] on the tokio runtime.
//!
//! At most one tick task exists at a time. Every control aborts the pending
//! task and bumps a generation counter before touching the cursor; a task
//! whose generation no longer matches exits without advancing.

use std::sync::Arc;
use std::time::Duration;

use algotrace_core::{Step, Trace};
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;

use crate::playback::{Playback, PlaybackState, PlaybackStatus};

/// The active step as published to subscribers.
#[derive(Debug)]
pub struct Frame<P> {
    trace: Arc<Trace<P>>,
    pub status: PlaybackStatus,
}

impl<P> Clone for Frame<P> {
    fn clone(&self) -> Self {
        Self {
            trace: Arc::clone(&self.trace),
            status: self.status.clone(),
        }
    }
}

impl<P> Frame<P> {
    fn of(playback: &Playback<P>) -> Self {
        Self {
            trace: Arc::clone(playback.trace()),
            status: playback.into(),
        }
    }

    /// The step under the cursor.
    pub fn step(&self) -> Option<&Step<P>> {
        self.trace.get(self.status.cursor)
    }

    /// The whole trace this frame belongs to.
    pub fn trace(&self) -> &Arc<Trace<P>> {
        &self.trace
    }
}

struct Inner<P> {
    playback: Playback<P>,
    generation: u64,
    ticker: Option<JoinHandle<()>>,
}

impl<P> Inner<P> {
    fn cancel(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        if let Some(ticker) = self.ticker.take() {
            ticker.abort();
        }
    }
}

/// Owns a [`Playback`] and advances it on a timer.
pub struct PlaybackDriver<P> {
    inner: Arc<Mutex<Inner<P>>>,
    frames: watch::Sender<Frame<P>>,
}

impl<P> Clone for PlaybackDriver<P> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            frames: self.frames.clone(),
        }
    }
}

impl<P: Send + Sync + 'static> PlaybackDriver<P> {
    /// Create a driver for a trace, stopped at step 0.
    pub fn new(trace: impl Into<Arc<Trace<P>>>, delay: Duration) -> Self {
        let mut playback = Playback::new(trace);
        playback.set_speed(delay);
        let (frames, _) = watch::channel(Frame::of(&playback));
        Self {
            inner: Arc::new(Mutex::new(Inner {
                playback,
                generation: 0,
                ticker: None,
            })),
            frames,
        }
    }

    /// Receive a new frame on every cursor or state change.
    pub fn subscribe(&self) -> watch::Receiver<Frame<P>> {
        self.frames.subscribe()
    }

    /// The most recently published frame.
    pub fn frame(&self) -> Frame<P> {
        self.frames.borrow().clone()
    }

    /// Current playback status.
    pub async fn status(&self) -> PlaybackStatus {
        PlaybackStatus::from(&self.inner.lock().await.playback)
    }

    /// Replace the trace and rewind to step 0.
    pub async fn load(&self, trace: impl Into<Arc<Trace<P>>>) {
        let trace = trace.into();
        let len = trace.len();
        self.control(move |p| p.load(trace)).await;
        tracing::info!(steps = len, "trace loaded");
    }

    /// Start playing from the cursor, or from step 0 when at the end.
    pub async fn start(&self) {
        self.control(Playback::start).await;
        tracing::info!("playback started");
    }

    /// Pause without moving the cursor.
    pub async fn pause(&self) {
        self.control(Playback::pause).await;
        tracing::info!("playback paused");
    }

    /// Resume after a pause.
    pub async fn resume(&self) {
        self.control(Playback::resume).await;
        tracing::info!("playback resumed");
    }

    /// Stop and rewind to step 0.
    pub async fn reset(&self) {
        self.control(Playback::reset).await;
        tracing::info!("playback reset");
    }

    /// Move one step forward and pause.
    pub async fn step_forward(&self) {
        self.control(|p| {
            p.step_forward();
        })
        .await;
    }

    /// Move one step back and pause.
    pub async fn step_backward(&self) {
        self.control(|p| {
            p.step_backward();
        })
        .await;
    }

    /// Jump to a step, clamped to the trace.
    pub async fn seek(&self, index: usize) {
        self.control(move |p| p.seek(index)).await;
    }

    /// Change the tick delay. Ticks already waited out are unaffected.
    pub async fn set_speed(&self, delay: Duration) {
        self.control(move |p| p.set_speed(delay)).await;
        tracing::info!(delay_ms = delay.as_millis() as u64, "playback speed changed");
    }

    /// Cancel the pending tick, apply `f`, publish, and re-arm the timer
    /// if still playing.
    async fn control<F>(&self, f: F)
    where
        F: FnOnce(&mut Playback<P>),
    {
        let mut inner = self.inner.lock().await;
        inner.cancel();
        f(&mut inner.playback);
        self.frames.send_replace(Frame::of(&inner.playback));
        if inner.playback.state() == PlaybackState::Playing {
            self.schedule(&mut inner);
        }
    }

    fn schedule(&self, inner: &mut Inner<P>) {
        let generation = inner.generation;
        let shared = Arc::clone(&self.inner);
        let frames = self.frames.clone();
        let mut delay = inner.playback.delay();

        inner.ticker = Some(tokio::spawn(async move {
            loop {
                tokio::time::sleep(delay).await;
                let mut guard = shared.lock().await;
                if guard.generation != generation {
                    return;
                }
                let moved = guard.playback.tick();
                frames.send_replace(Frame::of(&guard.playback));
                if !moved || guard.playback.state() != PlaybackState::Playing {
                    tracing::debug!(cursor = guard.playback.cursor(), "playback finished");
                    return;
                }
                delay = guard.playback.delay();
            }
        }));
    }
}
