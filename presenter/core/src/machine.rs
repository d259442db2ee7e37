//! Presentation State Machine
//!
//! Sequences entrance and exit animations and reports their completion
//! through two fire-once signals, `entered` and `exited`.
//!
//! # Signals
//!
//! - `entered` fires the first time the animation engine reports a
//!   transition into [`PresentationState::Visible`] after [`enter`] has
//!   requested one. Reports into `Visible` before that are ignored.
//! - `exited` fires on the first report into [`PresentationState::Complete`]
//!   or [`PresentationState::Void`], or on [`destroy`], whichever comes
//!   first. Destruction never leaves an `exited` subscriber waiting.
//!
//! Interrupted transitions (`did_finish == false`) count as concluded.
//!
//! Once the panel has been asked to leave, by [`exit`] or [`destroy`], it
//! never enters again.
//!
//! # Task Queue
//!
//! Engine reports arrive on a per-machine queue and are dispatched by
//! [`drain`] or [`run_until`]. [`destroy`] enqueues its finalization
//! behind any reports already queued and then drains, so a report that was
//! in flight is always dispatched before teardown finalizes `exited`.
//!
//! [`destroy`]: PresentationStateMachine::destroy
//! [`enter`]: PresentationStateMachine::enter
//! [`exit`]: PresentationStateMachine::exit
//! [`drain`]: PresentationStateMachine::drain
//! [`run_until`]: PresentationStateMachine::run_until

use crate::animation::{
    task_queue, AnimationEngine, AnimationReporter, HostTask, TaskReceiver, TransitionRequest,
    TransitionTiming,
};
use crate::signal::{Completion, CompletionSignal};
use crate::state::{PresentationState, TransitionEvent};

/// Lifecycle state machine for one panel
pub struct PresentationStateMachine<E: AnimationEngine> {
    state: PresentationState,
    engine: E,
    enter_timing: TransitionTiming,
    exit_timing: TransitionTiming,
    reporter: AnimationReporter,
    tasks: TaskReceiver,
    entered: CompletionSignal,
    exited: CompletionSignal,
    entrance_requested: bool,
    exit_requested: bool,
    destroyed: bool,
}

impl<E: AnimationEngine> PresentationStateMachine<E> {
    /// Create a machine in [`PresentationState::Initial`]
    pub fn new(engine: E, enter_timing: TransitionTiming, exit_timing: TransitionTiming) -> Self {
        let (reporter, tasks) = task_queue();
        Self {
            state: PresentationState::Initial,
            engine,
            enter_timing,
            exit_timing,
            reporter,
            tasks,
            entered: CompletionSignal::new("entered"),
            exited: CompletionSignal::new("exited"),
            entrance_requested: false,
            exit_requested: false,
            destroyed: false,
        }
    }

    /// Current state
    #[must_use]
    pub fn state(&self) -> PresentationState {
        self.state
    }

    /// Whether [`destroy`](Self::destroy) has run
    #[must_use]
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// The animation engine
    #[must_use]
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Reporter feeding this machine's task queue
    ///
    /// For engines that live outside the machine and report on their own.
    #[must_use]
    pub fn reporter(&self) -> AnimationReporter {
        self.reporter.clone()
    }

    /// Animate the panel into view
    ///
    /// Does nothing if the panel is already visible, or once it has been
    /// asked to leave by [`exit`](Self::exit) or [`destroy`](Self::destroy).
    /// Completion is observed through [`on_entered`](Self::on_entered).
    pub fn enter(&mut self) {
        if self.destroyed {
            tracing::debug!("Ignoring enter on destroyed panel");
            return;
        }
        if self.exit_requested || self.exited.is_fired() {
            tracing::debug!(state = %self.state, "Ignoring enter after exit");
            return;
        }
        if self.state == PresentationState::Visible {
            return;
        }
        if !self.state.can_transition_to(PresentationState::Visible) {
            tracing::debug!(state = %self.state, "Ignoring enter while exiting");
            return;
        }

        self.entrance_requested = true;
        let timing = self.enter_timing.clone();
        self.request(PresentationState::Visible, timing);
    }

    /// Subscription to the `entered` signal
    #[must_use]
    pub fn on_entered(&self) -> Completion {
        self.entered.completion()
    }

    /// Animate the panel out of view
    ///
    /// Returns the `exited` subscription. A panel that was never shown has
    /// nothing to animate: it moves straight to [`PresentationState::Void`]
    /// and `exited` fires on the next drain.
    pub fn exit(&mut self) -> Completion {
        if self.destroyed || self.exit_requested || self.state.is_exit_target() {
            return self.on_exited();
        }
        self.exit_requested = true;

        if self.state == PresentationState::Initial {
            tracing::debug!("Panel dismissed before it was shown");
            self.state = PresentationState::Void;
            self.reporter.schedule_finalize_exit();
        } else {
            let timing = self.exit_timing.clone();
            self.request(PresentationState::Complete, timing);
        }
        self.on_exited()
    }

    /// Subscription to the `exited` signal
    #[must_use]
    pub fn on_exited(&self) -> Completion {
        self.exited.completion()
    }

    /// Handle a completion report from the animation engine
    ///
    /// Reports into `Complete` or `Void` finalize `exited`. Reports into
    /// `Visible` finalize `entered`, but only once [`enter`](Self::enter) has
    /// requested the entrance. Other reports are ignored. Repeated reports
    /// are harmless.
    pub fn handle_animation_done(&mut self, event: TransitionEvent) {
        if !event.did_finish {
            tracing::debug!(
                from = %event.from,
                to = %event.to,
                "Transition interrupted, treating as concluded"
            );
        }

        match event.to {
            PresentationState::Complete | PresentationState::Void => {
                self.exited.finalize();
            }
            PresentationState::Visible if self.entrance_requested => {
                self.entered.finalize();
            }
            PresentationState::Visible => {
                tracing::debug!(from = %event.from, "Ignoring entrance report before enter");
            }
            PresentationState::Initial => {}
        }
    }

    /// Dispatch every queued task
    ///
    /// Returns how many tasks ran. Tasks queued while draining run too.
    pub fn drain(&mut self) -> usize {
        let mut ran = 0;
        while let Ok(task) = self.tasks.try_recv() {
            self.run_task(task);
            ran += 1;
        }
        ran
    }

    /// Dispatch tasks as they arrive until `completion` has fired
    ///
    /// Returns immediately if it already fired. Waits forever if nothing
    /// ever fires it; pair with a timeout when the engine may stall.
    pub async fn run_until(&mut self, completion: &Completion) {
        self.drain();
        while !completion.is_fired() {
            // The machine owns a sender, so the queue never closes
            let Some(task) = self.tasks.recv().await else {
                return;
            };
            self.run_task(task);
            self.drain();
        }
    }

    /// Tear the panel down
    ///
    /// Finalizes `exited` after every report already queued has been
    /// dispatched. Calling this more than once is a no-op.
    pub fn destroy(&mut self) {
        if self.destroyed {
            tracing::debug!("Panel already destroyed");
            return;
        }
        self.destroyed = true;
        self.state = PresentationState::Void;
        self.reporter.schedule_finalize_exit();

        let ran = self.drain();
        tracing::debug!(tasks = ran, "Panel destroyed");
    }

    fn request(&mut self, to: PresentationState, timing: TransitionTiming) {
        let from = self.state;
        self.state = to;
        tracing::debug!(from = %from, to = %to, "Requesting transition");
        self.engine
            .animate(TransitionRequest { from, to, timing }, self.reporter.clone());
    }

    fn run_task(&mut self, task: HostTask) {
        match task {
            HostTask::AnimationDone(event) => self.handle_animation_done(event),
            HostTask::FinalizeExit => {
                self.exited.finalize();
            }
        }
    }
}

impl<E: AnimationEngine> std::fmt::Debug for PresentationStateMachine<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PresentationStateMachine")
            .field("state", &self.state)
            .field("destroyed", &self.destroyed)
            .field("entered", &self.entered)
            .field("exited", &self.exited)
            .finish_non_exhaustive()
    }
}
