//! Timer-Driven Animation Engine
//!
//! Reports each transition after its configured duration, using the tokio
//! timer. A surface that renders frames on its own clock can pair this with
//! the easing string to interpolate; the presenter only needs the report.
//!
//! Only one transition is in flight at a time. A new request interrupts the
//! previous one, which is reported with `did_finish = false` before the new
//! timer starts.

use tokio::task::AbortHandle;

use super::{AnimationEngine, AnimationReporter, TransitionRequest};

struct InFlight {
    request: TransitionRequest,
    reporter: AnimationReporter,
    abort: AbortHandle,
}

/// Animation engine backed by tokio timers
#[derive(Default)]
pub struct TimedAnimationEngine {
    in_flight: Option<InFlight>,
}

impl TimedAnimationEngine {
    /// Create an idle engine
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a transition timer is still running
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.in_flight
            .as_ref()
            .is_some_and(|flight| !flight.abort.is_finished())
    }

    fn interrupt_in_flight(&mut self) {
        let Some(flight) = self.in_flight.take() else {
            return;
        };
        if flight.abort.is_finished() {
            return;
        }
        flight.abort.abort();
        tracing::debug!(
            from = %flight.request.from,
            to = %flight.request.to,
            "Transition interrupted by a newer request"
        );
        flight.reporter.report(flight.request.interrupted());
    }
}

impl AnimationEngine for TimedAnimationEngine {
    fn animate(&mut self, request: TransitionRequest, reporter: AnimationReporter) {
        self.interrupt_in_flight();

        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            tracing::warn!(
                to = %request.to,
                "No tokio runtime available, concluding transition immediately"
            );
            reporter.report(request.finished());
            return;
        };

        let delay = request.timing.duration();
        let event = request.finished();
        let timer_reporter = reporter.clone();
        let task = runtime.spawn(async move {
            // Animation duration timer
            tokio::time::sleep(delay).await;
            timer_reporter.report(event);
        });

        tracing::trace!(
            from = %request.from,
            to = %request.to,
            duration_ms = request.timing.duration_ms,
            easing = %request.timing.easing,
            "Transition timer started"
        );

        self.in_flight = Some(InFlight {
            request,
            reporter,
            abort: task.abort_handle(),
        });
    }
}

impl Drop for TimedAnimationEngine {
    fn drop(&mut self) {
        if let Some(flight) = self.in_flight.take() {
            flight.abort.abort();
        }
    }
}

impl std::fmt::Debug for TimedAnimationEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimedAnimationEngine")
            .field("animating", &self.is_animating())
            .finish()
    }
}
