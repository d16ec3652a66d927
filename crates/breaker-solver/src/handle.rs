//! The value latch: a write-once cell coupling one root worker to
//! its waiters.
//!
//! # States
//!
//! ```text
//! Pending ──publish(v)──► Ready(v)
//!    │
//!    └────break_latch()─► Broken
//! ```
//!
//! Exactly one transition leaves `Pending`. The root worker performs
//! one of the two on exit; an external `stop` may race it with
//! `break_latch`, and whichever lands first wins while the loser is
//! a no-op. Both outcomes are valid terminal states for a cancelled
//! computation, so the race is benign - but it is still resolved
//! atomically so every waiter observes the same winner.

use crate::error::SolverError;
use tokio::sync::watch;
use tracing::error;

/// Terminal-or-not state of one latch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LatchState {
    Pending,
    Ready(bool),
    Broken,
}

/// Creates a connected setter/handle pair for one evaluation.
pub(crate) fn latch() -> (ValueSetter, ValueHandle) {
    let (tx, rx) = watch::channel(LatchState::Pending);
    (ValueSetter { tx }, ValueHandle { rx })
}

/// The waiter's half of a latch.
///
/// Cheap to clone; any number of tasks may wait on the same handle,
/// and all of them are released by the single state transition.
/// [`value`](Self::value) may be called repeatedly - a settled handle
/// answers the same way every time.
///
/// # Example
///
/// ```ignore
/// let handle = solver.solve(&circuit).await;
/// match handle.value().await {
///     Ok(v) => println!("circuit evaluated to {v}"),
///     Err(SolverError::Cancelled) => println!("solver was stopped"),
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ValueHandle {
    rx: watch::Receiver<LatchState>,
}

impl ValueHandle {
    /// Waits for the evaluation to settle.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::Cancelled`] when the computation was
    /// broken by `stop` (or refused after it), or when the root
    /// worker disappeared without settling the latch.
    pub async fn value(&self) -> Result<bool, SolverError> {
        let mut rx = self.rx.clone();
        let settled = rx.wait_for(|state| !matches!(state, LatchState::Pending)).await;
        match settled {
            Ok(state) => match *state {
                LatchState::Ready(value) => Ok(value),
                _ => Err(SolverError::Cancelled),
            },
            // Setter dropped while pending: no value is ever coming.
            Err(_) => Err(SolverError::Cancelled),
        }
    }

    /// Non-blocking probe: `None` while the evaluation is in flight.
    #[must_use]
    pub fn try_value(&self) -> Option<Result<bool, SolverError>> {
        match *self.rx.borrow() {
            LatchState::Pending => None,
            LatchState::Ready(value) => Some(Ok(value)),
            LatchState::Broken => Some(Err(SolverError::Cancelled)),
        }
    }

    /// A handle that settled as broken before anyone could wait on
    /// it. Returned by `solve` calls that arrive after `stop`.
    #[must_use]
    pub fn broken() -> Self {
        let (tx, rx) = watch::channel(LatchState::Broken);
        drop(tx);
        Self { rx }
    }
}

/// The root worker's half of a latch. Not exposed outside the crate.
#[derive(Debug)]
pub(crate) struct ValueSetter {
    tx: watch::Sender<LatchState>,
}

impl ValueSetter {
    /// Publishes the evaluated value, waking every waiter.
    ///
    /// Losing the race against [`break_latch`](Self::break_latch) is
    /// a no-op: the cancellation outcome stands. Publishing onto an
    /// already published latch is a solver bug and is logged as
    /// `SOLVER_DOUBLE_PUBLISH`.
    pub(crate) fn publish(&self, value: bool) {
        let mut double = false;
        self.tx.send_modify(|state| match state {
            LatchState::Pending => *state = LatchState::Ready(value),
            LatchState::Broken => {}
            LatchState::Ready(_) => double = true,
        });
        if double {
            error!(code = "SOLVER_DOUBLE_PUBLISH", "value published twice on one latch");
        }
    }

    /// Marks the evaluation as cancelled, waking every waiter.
    ///
    /// Idempotent, and a no-op once a value has been published.
    pub(crate) fn break_latch(&self) {
        self.tx.send_modify(|state| {
            if matches!(state, LatchState::Pending) {
                *state = LatchState::Broken;
            }
        });
    }
}
