//! Fire-Once Completion Signals
//!
//! A [`CompletionSignal`] is a broadcast cell with exactly one terminal
//! event. Subscribers registered before the signal fires are queued and run
//! when it fires; subscribers registered afterwards run immediately.
//!
//! The owning state machine keeps the [`CompletionSignal`] and hands out
//! [`Completion`] views, which can subscribe and await but cannot fire.
//!
//! # Example
//!
//! ```
//! use presenter_core::signal::CompletionSignal;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use std::sync::Arc;
//!
//! let signal = CompletionSignal::new("entered");
//! let hits = Arc::new(AtomicUsize::new(0));
//!
//! let early = Arc::clone(&hits);
//! signal.completion().subscribe(move || {
//!     early.fetch_add(1, Ordering::SeqCst);
//! });
//!
//! assert!(signal.finalize());
//! assert!(!signal.finalize()); // already fired
//!
//! let late = Arc::clone(&hits);
//! signal.completion().subscribe(move || {
//!     late.fetch_add(1, Ordering::SeqCst);
//! });
//! assert_eq!(hits.load(Ordering::SeqCst), 2);
//! ```

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures::channel::oneshot;
use parking_lot::Mutex;

type Waiter = Box<dyn FnOnce() + Send + 'static>;

struct SignalState {
    fired: bool,
    waiters: Vec<Waiter>,
}

struct Shared {
    name: &'static str,
    state: Mutex<SignalState>,
}

impl Shared {
    fn is_fired(&self) -> bool {
        self.state.lock().fired
    }

    fn subscribe(&self, waiter: Waiter) {
        let mut state = self.state.lock();
        if state.fired {
            // Run outside the lock so the waiter may subscribe again
            drop(state);
            waiter();
        } else {
            state.waiters.push(waiter);
        }
    }
}

/// Owning side of a fire-once broadcast
pub struct CompletionSignal {
    shared: Arc<Shared>,
}

impl CompletionSignal {
    /// Create an unfired signal
    ///
    /// `name` only appears in logs.
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        Self {
            shared: Arc::new(Shared {
                name,
                state: Mutex::new(SignalState {
                    fired: false,
                    waiters: Vec::new(),
                }),
            }),
        }
    }

    /// Fire the signal, running and clearing every queued waiter
    ///
    /// Returns `true` if this call fired the signal, `false` if it had
    /// already fired. Finalizing twice is a no-op.
    pub fn finalize(&self) -> bool {
        let waiters = {
            let mut state = self.shared.state.lock();
            if state.fired {
                return false;
            }
            state.fired = true;
            std::mem::take(&mut state.waiters)
        };

        tracing::debug!(
            signal = self.shared.name,
            waiters = waiters.len(),
            "Completion signal fired"
        );

        for waiter in waiters {
            waiter();
        }
        true
    }

    /// Whether the signal has fired
    #[must_use]
    pub fn is_fired(&self) -> bool {
        self.shared.is_fired()
    }

    /// Number of waiters still queued
    #[must_use]
    pub fn pending_waiters(&self) -> usize {
        self.shared.state.lock().waiters.len()
    }

    /// Subscription view handed to observers
    #[must_use]
    pub fn completion(&self) -> Completion {
        Completion {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl fmt::Debug for CompletionSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompletionSignal")
            .field("name", &self.shared.name)
            .field("fired", &self.is_fired())
            .finish()
    }
}

/// Subscribe-only view of a [`CompletionSignal`]
///
/// Cheap to clone; every clone observes the same signal.
#[derive(Clone)]
pub struct Completion {
    shared: Arc<Shared>,
}

impl Completion {
    /// Register a callback for when the signal fires
    ///
    /// Runs `callback` immediately if the signal already fired.
    pub fn subscribe<F>(&self, callback: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.shared.subscribe(Box::new(callback));
    }

    /// Whether the signal has fired
    #[must_use]
    pub fn is_fired(&self) -> bool {
        self.shared.is_fired()
    }

    /// Name of the underlying signal
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.shared.name
    }

    /// Wait for the signal to fire
    ///
    /// Resolves to `true` once the signal fires, or `false` if the owning
    /// signal and every other handle were dropped without it ever firing.
    pub fn wait(&self) -> impl Future<Output = bool> + Send + 'static {
        let (tx, rx) = oneshot::channel::<()>();
        self.subscribe(move || {
            let _ = tx.send(());
        });
        async move { rx.await.is_ok() }
    }
}

impl fmt::Debug for Completion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Completion")
            .field("name", &self.shared.name)
            .field("fired", &self.is_fired())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counter(completion: &Completion) -> Arc<AtomicUsize> {
        let hits = Arc::new(AtomicUsize::new(0));
        let hits_clone = Arc::clone(&hits);
        completion.subscribe(move || {
            hits_clone.fetch_add(1, Ordering::SeqCst);
        });
        hits
    }

    #[test]
    fn test_waiters_run_on_finalize() {
        let signal = CompletionSignal::new("test");
        let hits = counter(&signal.completion());

        assert_eq!(hits.load(Ordering::SeqCst), 0);
        assert_eq!(signal.pending_waiters(), 1);

        assert!(signal.finalize());
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert_eq!(signal.pending_waiters(), 0);
    }

    #[test]
    fn test_finalize_is_idempotent() {
        let signal = CompletionSignal::new("test");
        let hits = counter(&signal.completion());

        assert!(signal.finalize());
        assert!(!signal.finalize());
        assert!(!signal.finalize());
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_late_subscriber_runs_immediately() {
        let signal = CompletionSignal::new("test");
        signal.finalize();

        let hits = counter(&signal.completion());
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert_eq!(signal.pending_waiters(), 0);
    }

    #[test]
    fn test_waiter_can_resubscribe_while_firing() {
        let signal = CompletionSignal::new("test");
        let completion = signal.completion();
        let hits = Arc::new(AtomicUsize::new(0));

        let inner_completion = completion.clone();
        let inner_hits = Arc::clone(&hits);
        completion.subscribe(move || {
            let nested_hits = Arc::clone(&inner_hits);
            inner_completion.subscribe(move || {
                nested_hits.fetch_add(1, Ordering::SeqCst);
            });
        });

        signal.finalize();
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_clones_share_state() {
        let signal = CompletionSignal::new("shared");
        let a = signal.completion();
        let b = a.clone();

        assert!(!a.is_fired());
        signal.finalize();
        assert!(a.is_fired());
        assert!(b.is_fired());
        assert_eq!(b.name(), "shared");
    }

    #[tokio::test]
    async fn test_wait_resolves_after_finalize() {
        let signal = CompletionSignal::new("test");
        let waiting = tokio::spawn(signal.completion().wait());

        tokio::task::yield_now().await;
        signal.finalize();

        assert!(waiting.await.unwrap());
    }

    #[tokio::test]
    async fn test_wait_after_fire_is_ready() {
        let signal = CompletionSignal::new("test");
        signal.finalize();
        assert!(signal.completion().wait().await);
    }

    #[tokio::test]
    async fn test_wait_reports_dropped_signal() {
        let signal = CompletionSignal::new("test");
        let wait = signal.completion().wait();
        drop(signal);
        assert!(!wait.await);
    }
}
