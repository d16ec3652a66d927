//! Parallel, cancellation-aware evaluator for boolean gate circuits.
//!
//! Breaker evaluates a circuit by giving every node its own task and
//! letting gates short-circuit: the moment enough children have
//! reported to decide a gate's value, the remaining children are
//! cancelled, all the way down their subtrees. A slow input that
//! turns out to be irrelevant costs nothing but the time it took to
//! become irrelevant.
//!
//! # Crate Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  breaker-solver                               ◄── HERE   │
//! │                                                          │
//! │  CircuitSolver ──solve()──► root Worker                  │
//! │       │                        │ spawns per argument     │
//! │       │ stop()                 ▼                         │
//! │       └──cancel──►  Worker  Worker  Worker               │
//! │                        │       │      │                  │
//! │                        └───(index, value)──► parent      │
//! │                                              mailbox     │
//! │                                                          │
//! │  root verdict ──► ValueHandle (write-once latch)         │
//! ├──────────────────────────────────────────────────────────┤
//! │  breaker-circuit : gate tree, leaf sources               │
//! ├──────────────────────────────────────────────────────────┤
//! │  breaker-types   : SolveId, ErrorCode                    │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! # Evaluation Model
//!
//! - **One worker per live node.** A gate worker spawns one child
//!   worker per argument and consumes their verdicts in completion
//!   order through a bounded mailbox.
//! - **Short-circuit.** Each operator rule returns as soon as the
//!   multiset of verdicts seen so far determines the value
//!   ([`GateOp`](breaker_circuit::GateOp) semantics; `if` is the one
//!   rule that also looks at which child spoke).
//! - **Cancellation cascades.** Deciding a gate cancels its
//!   unfinished children; `stop` cancels every root. Cancellation
//!   lands at a suspension point (leaf read, mailbox receive), and a
//!   cancelled worker reports nothing.
//! - **No leaks.** A worker joins every child it spawned on every
//!   exit path; `stop` joins every root. Nothing outlives its owner.
//!
//! # Waiting for Results
//!
//! [`CircuitSolver::solve`] returns a [`ValueHandle`], a write-once
//! latch. Awaiting it yields the boolean, or
//! [`SolverError::Cancelled`] if the solver was stopped first.
//!
//! ```ignore
//! let solver = CircuitSolver::new();
//! let handle = solver.solve(&circuit).await;
//!
//! match handle.value().await {
//!     Ok(v) => println!("evaluated to {v}"),
//!     Err(SolverError::Cancelled) => println!("stopped before settling"),
//! }
//! ```
//!
//! # Error Handling
//!
//! The only externally observable failure is cancellation; see
//! [`SolverError`]. Codes follow the workspace
//! [`ErrorCode`](breaker_types::ErrorCode) contract.

mod error;
mod handle;
mod mailbox;
mod rules;
mod signal;
mod solver;
mod worker;

pub use error::SolverError;
pub use handle::ValueHandle;
pub use solver::CircuitSolver;

// Re-export from breaker_circuit for convenience
pub use breaker_circuit::{Circuit, CircuitNode};
