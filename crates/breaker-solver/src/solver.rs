//! Solver lifecycle: accepting submissions until one irreversible
//! stop.
//!
//! The solver owns every root worker it has spawned. `solve` and
//! `stop` serialize on one async mutex, which is what guarantees
//! that a stop sees every accepted root and that a submission racing
//! a stop either lands before it (and gets cancelled with the rest)
//! or after it (and gets a pre-broken handle).

use crate::handle::{latch, ValueHandle};
use crate::worker::{Slot, Worker, WorkerHandle};
use breaker_circuit::Circuit;
use breaker_types::SolveId;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};

/// Parallel, cancellation-aware circuit evaluator.
///
/// A solver is an ordinary value with an explicit lifecycle; share it
/// across tasks behind an [`Arc`] if several submitters need it.
/// There are no process-wide singletons.
///
/// # Example
///
/// ```ignore
/// let solver = CircuitSolver::new();
///
/// let handle = solver.solve(&circuit).await;
/// let value = handle.value().await?;
///
/// solver.stop().await;
/// ```
pub struct CircuitSolver {
    state: Mutex<SolverState>,
}

struct SolverState {
    /// False from the first `stop` on, forever.
    accepting: bool,
    /// Every live (or not yet reaped) root worker.
    roots: Vec<RootEntry>,
}

struct RootEntry {
    id: SolveId,
    worker: WorkerHandle,
}

impl CircuitSolver {
    /// Creates a solver that accepts submissions.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Mutex::new(SolverState {
                accepting: true,
                roots: Vec::new(),
            }),
        }
    }

    /// Submits a circuit for evaluation.
    ///
    /// Returns immediately with a [`ValueHandle`]; evaluation runs on
    /// its own tasks. The handle may be awaited repeatedly and from
    /// any number of tasks.
    ///
    /// After [`stop`](Self::stop) the returned handle is already
    /// broken: its `value()` reports cancellation without waiting.
    pub async fn solve(&self, circuit: &Circuit) -> ValueHandle {
        let mut state = self.state.lock().await;
        if !state.accepting {
            debug!("submission refused, solver is stopped");
            return ValueHandle::broken();
        }

        // Keep the registry bounded across long-lived solvers.
        state.roots.retain(|entry| !entry.worker.is_finished());

        let id = SolveId::new();
        let (setter, handle) = latch();
        let worker = Worker::spawn(Arc::clone(circuit.root()), Slot::Root { setter, id });
        state.roots.push(RootEntry { id, worker });
        debug!(%id, in_flight = state.roots.len(), "circuit accepted");
        handle
    }

    /// Stops the solver: refuses further submissions and cancels
    /// every in-flight evaluation.
    ///
    /// Returns only after every root worker (and therefore its whole
    /// subtree) has terminated, at which point every handle this
    /// solver ever returned has settled. Idempotent; concurrent
    /// callers serialize, and later calls find nothing to do.
    pub async fn stop(&self) {
        let mut state = self.state.lock().await;
        if state.accepting {
            state.accepting = false;
            info!(in_flight = state.roots.len(), "solver stopping");
        }

        for entry in &state.roots {
            entry.worker.cancel();
        }
        for entry in state.roots.drain(..) {
            entry.worker.join().await;
        }
    }

    /// Whether the solver still accepts submissions.
    pub async fn is_accepting(&self) -> bool {
        self.state.lock().await.accepting
    }

    /// Number of registered root workers. Finished roots linger here
    /// until the next submission reaps them or a stop joins them.
    pub async fn in_flight(&self) -> usize {
        self.state.lock().await.roots.len()
    }
}

impl Default for CircuitSolver {
    fn default() -> Self {
        Self::new()
    }
}
