//! Animation Engine Boundary
//!
//! The presenter never interpolates anything itself. It asks an
//! [`AnimationEngine`] to move the panel to a target state and waits for the
//! engine to report that the transition concluded.
//!
//! # Architecture
//!
//! ```text
//! PresentationStateMachine
//!     │  animate(TransitionRequest, AnimationReporter)
//!     ▼
//! AnimationEngine ──(later)──▶ AnimationReporter::report(TransitionEvent)
//!                                   │
//!                                   ▼
//!                        per-container task queue
//!                                   │  drain() / settle()
//!                                   ▼
//!                     PresentationStateMachine::handle_animation_done
//! ```
//!
//! Reports are queued rather than dispatched inline so that teardown can
//! order its own finalization after every report already in flight.
//!
//! Timing values are opaque here: `easing` is passed through untouched and
//! only engines interpret `duration_ms`.

mod timed;

pub use timed::TimedAnimationEngine;

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use crate::state::{PresentationState, TransitionEvent};

/// Opaque timing for one transition
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionTiming {
    /// Transition length in milliseconds
    pub duration_ms: u64,
    /// Easing curve, passed to the engine verbatim
    pub easing: String,
}

impl TransitionTiming {
    /// Create a timing value
    pub fn new(duration_ms: u64, easing: impl Into<String>) -> Self {
        Self {
            duration_ms,
            easing: easing.into(),
        }
    }

    /// Entrance timing used when nothing is configured
    #[must_use]
    pub fn default_enter() -> Self {
        Self::new(225, "cubic-bezier(0.4, 0.0, 1, 1)")
    }

    /// Exit timing used when nothing is configured
    #[must_use]
    pub fn default_exit() -> Self {
        Self::new(195, "cubic-bezier(0.0, 0.0, 0.2, 1)")
    }

    /// Duration as a [`Duration`]
    #[must_use]
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}

/// A request to animate the panel between two states
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransitionRequest {
    /// Current state
    pub from: PresentationState,
    /// Target state
    pub to: PresentationState,
    /// Timing configured for this direction
    pub timing: TransitionTiming,
}

impl TransitionRequest {
    /// The event an engine reports when this request runs to completion
    #[must_use]
    pub fn finished(&self) -> TransitionEvent {
        TransitionEvent::finished(self.from, self.to)
    }

    /// The event an engine reports when it abandons this request
    #[must_use]
    pub fn interrupted(&self) -> TransitionEvent {
        TransitionEvent::interrupted(self.from, self.to)
    }
}

/// Work queued for a container's state machine
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum HostTask {
    /// The animation engine concluded a transition
    AnimationDone(TransitionEvent),
    /// Teardown finalization of the `exited` signal
    FinalizeExit,
}

pub(crate) type TaskReceiver = mpsc::UnboundedReceiver<HostTask>;

/// Create a container task queue
pub(crate) fn task_queue() -> (AnimationReporter, TaskReceiver) {
    let (tx, rx) = mpsc::unbounded_channel();
    (AnimationReporter { tx }, rx)
}

/// Handle an engine uses to report concluded transitions
///
/// Cloneable and `Send`, so engines can report from spawned tasks. Reports
/// sent after the container is gone are discarded.
#[derive(Clone, Debug)]
pub struct AnimationReporter {
    tx: mpsc::UnboundedSender<HostTask>,
}

impl AnimationReporter {
    /// Report that a transition concluded
    pub fn report(&self, event: TransitionEvent) {
        if self.tx.send(HostTask::AnimationDone(event)).is_err() {
            tracing::trace!(
                from = %event.from,
                to = %event.to,
                "Container gone, discarding animation report"
            );
        }
    }

    /// Whether the receiving container still exists
    #[must_use]
    pub fn is_connected(&self) -> bool {
        !self.tx.is_closed()
    }

    pub(crate) fn schedule_finalize_exit(&self) {
        // The receiver lives as long as the state machine that calls this
        let _ = self.tx.send(HostTask::FinalizeExit);
    }
}

/// Performs visual transitions on behalf of the state machine
///
/// Implementations must eventually call [`AnimationReporter::report`] once
/// per request, but the state machine tolerates engines that never do.
pub trait AnimationEngine {
    /// Start animating towards `request.to`
    fn animate(&mut self, request: TransitionRequest, reporter: AnimationReporter);
}

impl<E: AnimationEngine + ?Sized> AnimationEngine for Box<E> {
    fn animate(&mut self, request: TransitionRequest, reporter: AnimationReporter) {
        (**self).animate(request, reporter);
    }
}

/// Engine for surfaces that cannot animate
///
/// Every request is reported as finished right away. The report is still
/// queued, so it is dispatched on the container's next drain.
#[derive(Clone, Copy, Debug, Default)]
pub struct ImmediateAnimationEngine;

impl AnimationEngine for ImmediateAnimationEngine {
    fn animate(&mut self, request: TransitionRequest, reporter: AnimationReporter) {
        reporter.report(request.finished());
    }
}

#[derive(Default)]
struct ManualState {
    history: Vec<TransitionRequest>,
    pending: VecDeque<(TransitionRequest, AnimationReporter)>,
}

/// Engine whose transitions conclude only when told to
///
/// For hosts driven by an external animation system, and for tests. Clones
/// share state, so a clone kept outside the container can complete the
/// requests the container made.
#[derive(Clone, Default)]
pub struct ManualAnimationEngine {
    inner: Arc<Mutex<ManualState>>,
}

impl ManualAnimationEngine {
    /// Create an engine with no requests
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every request received so far, oldest first
    #[must_use]
    pub fn requests(&self) -> Vec<TransitionRequest> {
        self.inner.lock().history.clone()
    }

    /// Number of requests not yet concluded
    #[must_use]
    pub fn pending(&self) -> usize {
        self.inner.lock().pending.len()
    }

    /// Conclude the oldest pending request as finished
    pub fn finish_next(&self) -> Option<TransitionEvent> {
        self.conclude_next(true)
    }

    /// Conclude the oldest pending request as interrupted
    pub fn interrupt_next(&self) -> Option<TransitionEvent> {
        self.conclude_next(false)
    }

    /// Forget every pending request without reporting anything
    ///
    /// Returns how many requests were dropped.
    pub fn abandon_all(&self) -> usize {
        let mut inner = self.inner.lock();
        let count = inner.pending.len();
        inner.pending.clear();
        count
    }

    fn conclude_next(&self, did_finish: bool) -> Option<TransitionEvent> {
        let (request, reporter) = self.inner.lock().pending.pop_front()?;
        let event = if did_finish {
            request.finished()
        } else {
            request.interrupted()
        };
        reporter.report(event);
        Some(event)
    }
}

impl AnimationEngine for ManualAnimationEngine {
    fn animate(&mut self, request: TransitionRequest, reporter: AnimationReporter) {
        let mut inner = self.inner.lock();
        inner.history.push(request.clone());
        inner.pending.push_back((request, reporter));
    }
}

impl std::fmt::Debug for ManualAnimationEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.lock();
        f.debug_struct("ManualAnimationEngine")
            .field("requests", &inner.history.len())
            .field("pending", &inner.pending.len())
            .finish()
    }
}
