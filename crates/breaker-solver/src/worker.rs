//! Workers: one task per live circuit node.
//!
//! # Architecture
//!
//! ```text
//!                 ┌─────────────────────────────────┐
//!                 │           gate Worker           │
//!                 │                                 │
//!  cancel ──────► │  CancelToken                    │
//!                 │                                 │
//!                 │  Mailbox ◄── (index, value) ──┐ │
//!                 │     │                         │ │
//!                 │     ▼                  child  │ │
//!                 │  gate rule             Worker ┘ │
//!                 │     │                  (one per │
//!                 │     ▼                  argument)│
//!                 │  deliver up / settle latch      │
//!                 └─────────────────────────────────┘
//! ```
//!
//! A worker owns its children outright: it spawns one per argument,
//! and on every exit path - value decided or cancel observed - it
//! fires each child's cancel line and joins them all before
//! reporting. Children deliver upward through the mailbox, never
//! through a back-pointer, so ownership stays a tree.
//!
//! A cancelled worker reports nothing. For a child that silence is
//! the protocol; for a root it becomes the broken latch.

use crate::error::SolverError;
use crate::handle::ValueSetter;
use crate::mailbox::{mailbox, ChildSender};
use crate::rules;
use crate::signal::{cancel_pair, CancelSignal, CancelToken};
use breaker_circuit::CircuitNode;
use breaker_types::SolveId;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::debug;

/// Where a worker's verdict goes.
pub(crate) enum Slot {
    /// Deliver into the parent gate's mailbox under this index.
    Parent { sender: ChildSender, index: usize },
    /// Settle the latch handed out by the solver.
    Root { setter: ValueSetter, id: SolveId },
}

/// A spawned evaluation task for one subtree.
pub(crate) struct Worker {
    node: Arc<CircuitNode>,
    slot: Slot,
    cancel: CancelToken,
}

impl Worker {
    /// Spawns the worker onto the runtime and returns its handle.
    pub(crate) fn spawn(node: Arc<CircuitNode>, slot: Slot) -> WorkerHandle {
        let (signal, cancel) = cancel_pair();
        let worker = Worker { node, slot, cancel };
        let task = tokio::spawn(worker.run());
        WorkerHandle { signal, task }
    }

    async fn run(mut self) {
        let verdict = evaluate(&self.node, &mut self.cancel).await;
        match self.slot {
            Slot::Parent { sender, index } => {
                // A cancelled child publishes nothing; silence is the
                // protocol.
                if let Ok(value) = verdict {
                    sender.deliver(index, value);
                }
            }
            Slot::Root { setter, id } => match verdict {
                Ok(value) => {
                    debug!(%id, value, "circuit settled");
                    setter.publish(value);
                }
                Err(_) => {
                    debug!(%id, "circuit broken by cancellation");
                    setter.break_latch();
                }
            },
        }
    }
}

/// Owner's view of a spawned worker: a cancel line plus the join.
pub(crate) struct WorkerHandle {
    signal: CancelSignal,
    task: JoinHandle<()>,
}

impl WorkerHandle {
    /// Fires the worker's cancel line. Idempotent, non-blocking.
    pub(crate) fn cancel(&self) {
        self.signal.fire();
    }

    /// Waits for the worker task to terminate.
    ///
    /// A join error means the worker panicked; its silence already
    /// reads as cancellation downstream, so it is swallowed here.
    pub(crate) async fn join(self) {
        let _ = self.task.await;
    }

    /// Whether the task has already terminated.
    pub(crate) fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

/// Evaluates one node with cancellation semantics.
///
/// Leaves race the read against the cancel line. Gates fan out one
/// child worker per argument and drive the operator rule over the
/// mailbox; the rule returning (either way) makes the remaining
/// children unnecessary, so they are cancelled and joined before the
/// verdict moves up.
async fn evaluate(node: &CircuitNode, cancel: &mut CancelToken) -> Result<bool, SolverError> {
    match node {
        CircuitNode::Leaf { source, .. } => {
            tokio::select! {
                biased;

                () = cancel.cancelled() => Err(SolverError::Cancelled),
                value = source.read() => Ok(value),
            }
        }
        CircuitNode::Gate { op, args, .. } => {
            let arity = args.len();
            let (mut inbox, sender) = mailbox(arity);

            let mut children = Vec::with_capacity(arity);
            for (index, arg) in args.iter().enumerate() {
                let slot = Slot::Parent {
                    sender: sender.clone(),
                    index,
                };
                children.push(Worker::spawn(Arc::clone(arg), slot));
            }
            // Only children hold senders now, so a child that dies
            // without a verdict closes the mailbox instead of
            // stranding the rule.
            drop(sender);

            let verdict = rules::drive(*op, arity, &mut inbox, cancel).await;

            for child in &children {
                child.cancel();
            }
            for child in children {
                child.join().await;
            }
            verdict
        }
    }
}
