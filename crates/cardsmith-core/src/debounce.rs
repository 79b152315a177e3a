//! Trailing-edge debouncing
//!
//! A [`Debouncer`] owns at most one pending timer. Every call to
//! [`Debouncer::schedule`] aborts the pending timer (and any action it already
//! started) before arming a new one, so two timers for the same purpose can
//! never both fire. Only the arguments of the most recent call are ever
//! delivered.
//!
//! Timers run on the ambient Tokio runtime, which lets tests drive them with
//! Tokio's paused clock instead of real time.

use parking_lot::Mutex;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

struct DebounceState<A> {
    /// Bumped on every schedule/cancel; a timer only fires if it still owns
    /// the generation it was armed with.
    generation: u64,
    timer: Option<JoinHandle<()>>,
    last_args: Option<A>,
}

/// Cancel-then-restart timer owning `{pending timer, last arguments}`.
pub struct Debouncer<A> {
    label: &'static str,
    state: Arc<Mutex<DebounceState<A>>>,
}

impl<A: Send + 'static> Debouncer<A> {
    /// Create an idle debouncer. `label` only shows up in logs.
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            state: Arc::new(Mutex::new(DebounceState {
                generation: 0,
                timer: None,
                last_args: None,
            })),
        }
    }

    /// Arm the timer: after `delay` of quiet, `action(args)` runs.
    ///
    /// Any previously armed timer is aborted first, including an action that
    /// has already started and is still awaiting.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn schedule<F, Fut>(&self, delay: Duration, args: A, action: F)
    where
        F: FnOnce(A) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let mut state = self.state.lock();
        if let Some(timer) = state.timer.take() {
            timer.abort();
        }
        state.generation = state.generation.wrapping_add(1);
        state.last_args = Some(args);

        let generation = state.generation;
        let shared = Arc::clone(&self.state);
        let label = self.label;
        tracing::trace!(debouncer = label, delay_ms = delay.as_millis() as u64, "timer armed");

        state.timer = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let args = {
                let mut state = shared.lock();
                if state.generation != generation {
                    return;
                }
                state.last_args.take()
            };
            if let Some(args) = args {
                tracing::trace!(debouncer = label, "timer fired");
                action(args).await;
            }
        }));
    }

    /// Abort the pending timer, if any. Returns `true` when a timer was still
    /// waiting to fire.
    pub fn cancel(&self) -> bool {
        let mut state = self.state.lock();
        state.generation = state.generation.wrapping_add(1);
        let was_pending = state.last_args.take().is_some();
        if let Some(timer) = state.timer.take() {
            timer.abort();
        }
        if was_pending {
            tracing::trace!(debouncer = self.label, "timer cancelled");
        }
        was_pending
    }

    /// Whether a timer is armed and has not fired yet
    pub fn is_pending(&self) -> bool {
        self.state.lock().last_args.is_some()
    }

    /// Arguments the pending timer will fire with
    pub fn pending_args(&self) -> Option<A>
    where
        A: Clone,
    {
        self.state.lock().last_args.clone()
    }
}

impl<A> Drop for Debouncer<A> {
    fn drop(&mut self) {
        if let Some(timer) = self.state.lock().timer.take() {
            timer.abort();
        }
    }
}
