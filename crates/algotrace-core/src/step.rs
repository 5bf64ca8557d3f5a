//! Steps, traces, and the recorder that builds them.
//!
//! A generator owns a [`TraceRecorder`] holding its *working* payload. It
//! mutates that payload as the algorithm progresses and calls
//! [`TraceRecorder::emit`] at every event worth watching; each emit clones the
//! working payload into a fresh [`Step`]. Recorded steps are never handed out
//! mutably again.

use std::ops::Index;

/// What kind of event a step records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum StepKind {
    /// The algorithm's initial condition
    Initial,
    /// Two values compared (search, sort)
    Compare,
    /// Two values exchanged
    Swap,
    /// A pass of a sort settled an index
    Sorted,
    /// A binary search midpoint probe
    Probe,
    /// A search bracket shrank
    Narrow,
    /// A node or cell entered the frontier
    Enqueue,
    /// A node or cell left the frontier and is being processed
    Dequeue,
    /// A node was discovered (Tarjan DFS)
    Visit,
    /// A node or cell is done
    Finalize,
    /// An edge was examined for relaxation
    Relax,
    /// A tentative distance improved
    Update,
    /// A back edge lowered a low-link
    BackEdge,
    /// A bridge was detected
    Bridge,
    /// An articulation point was detected
    Articulation,
    /// One residual-graph search ran (max flow)
    Search,
    /// Flow was pushed along an augmenting path
    Augment,
    /// An edge was walked (Hierholzer)
    Traverse,
    /// A search backed out of a dead end
    Backtrack,
    /// A multi-phase algorithm moved to its next phase
    Phase,
    /// Two odd vertices were paired (Chinese Postman)
    Match,
    /// A board cell is being tried
    Testing,
    /// A piece was placed
    Placed,
    /// A piece was taken back
    Removed,
    /// A piece moved
    Move,
    /// A final path was highlighted
    Path,
    /// The search target was found
    Found,
    /// The algorithm ended
    Terminal,
}

/// One immutable, self-contained point in a trace.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Step<P> {
    kind: StepKind,
    description: String,
    payload: P,
}

impl<P> Step<P> {
    /// The kind of event this step records.
    pub fn kind(&self) -> StepKind {
        self.kind
    }

    /// Human-readable description of the event.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// The rendering-ready state at this step.
    pub fn payload(&self) -> &P {
        &self.payload
    }
}

/// The full ordered list of steps one generator run produced.
///
/// Always holds at least one step: a recorder emits the initial condition
/// when it is created.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Trace<P> {
    steps: Vec<Step<P>>,
}

impl<P> Trace<P> {
    /// Number of steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Always false for recorder-built traces; kept for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Get the step at an index.
    pub fn get(&self, index: usize) -> Option<&Step<P>> {
        self.steps.get(index)
    }

    /// The initial condition.
    pub fn first(&self) -> &Step<P> {
        &self.steps[0]
    }

    /// The terminal condition.
    pub fn last(&self) -> &Step<P> {
        &self.steps[self.steps.len() - 1]
    }

    /// All steps in order.
    pub fn steps(&self) -> &[Step<P>] {
        &self.steps
    }

    /// Iterate over the steps in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Step<P>> {
        self.steps.iter()
    }

    /// Count the steps of one kind.
    pub fn count(&self, kind: StepKind) -> usize {
        self.steps.iter().filter(|s| s.kind == kind).count()
    }

    /// Convert every payload, keeping kinds and descriptions.
    pub fn map<Q, F>(self, mut f: F) -> Trace<Q>
    where
        F: FnMut(P) -> Q,
    {
        Trace {
            steps: self
                .steps
                .into_iter()
                .map(|s| Step {
                    kind: s.kind,
                    description: s.description,
                    payload: f(s.payload),
                })
                .collect(),
        }
    }
}

impl<P> Index<usize> for Trace<P> {
    type Output = Step<P>;

    fn index(&self, index: usize) -> &Step<P> {
        &self.steps[index]
    }
}

impl<'a, P> IntoIterator for &'a Trace<P> {
    type Item = &'a Step<P>;
    type IntoIter = std::slice::Iter<'a, Step<P>>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

/// Builds a trace by snapshotting a working payload.
#[derive(Debug)]
pub struct TraceRecorder<P> {
    working: P,
    steps: Vec<Step<P>>,
}

impl<P: Clone> TraceRecorder<P> {
    /// Start a trace, recording `initial` as step 0.
    pub fn start(initial: P, description: impl Into<String>) -> Self {
        let mut recorder = Self {
            working: initial,
            steps: Vec::new(),
        };
        recorder.emit(StepKind::Initial, description);
        recorder
    }

    /// The working payload.
    pub fn state(&self) -> &P {
        &self.working
    }

    /// Mutable access to the working payload. Changes become visible in the
    /// next emitted step only.
    pub fn state_mut(&mut self) -> &mut P {
        &mut self.working
    }

    /// Record the working payload as a new step.
    pub fn emit(&mut self, kind: StepKind, description: impl Into<String>) {
        self.steps.push(Step {
            kind,
            description: description.into(),
            payload: self.working.clone(),
        });
    }

    /// Apply `update` to the working payload, then record it.
    pub fn emit_with<F>(&mut self, kind: StepKind, description: impl Into<String>, update: F)
    where
        F: FnOnce(&mut P),
    {
        update(&mut self.working);
        self.emit(kind, description);
    }

    /// Number of steps recorded so far.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Never true: the initial step is recorded on construction.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Finish recording.
    pub fn finish(self) -> Trace<P> {
        Trace { steps: self.steps }
    }
}
