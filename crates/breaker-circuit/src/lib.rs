//! Boolean gate circuit data model for the Breaker solver.
//!
//! A circuit is a rooted tree: internal nodes are logical operators,
//! leaves are boolean sources that may take arbitrarily long to read.
//! This crate defines that tree and nothing about how it is
//! evaluated; the parallel, short-circuiting evaluator lives in
//! `breaker-solver`.
//!
//! # Crate Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  breaker-solver  : workers, latches, lifecycle      │
//! ├─────────────────────────────────────────────────────┤
//! │  breaker-circuit : gate tree, leaf sources ◄── HERE │
//! ├─────────────────────────────────────────────────────┤
//! │  breaker-types   : SolveId, ErrorCode               │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Gate Kinds
//!
//! | Operator | Arity | Semantics |
//! |----------|-------|-----------|
//! | [`GateOp::Not`] | 1 | negation |
//! | [`GateOp::And`] | ≥ 1 | every argument true |
//! | [`GateOp::Or`] | ≥ 1 | any argument true |
//! | [`GateOp::If`] | 3 | condition selects then/else |
//! | [`GateOp::GreaterThan`]\(k\) | ≥ 1 | more than k arguments true |
//! | [`GateOp::LessThan`]\(k\) | ≥ 1 | fewer than k arguments true |
//!
//! Shapes are validated at construction. A node that exists is
//! well-formed, so evaluators never re-check arity.
//!
//! # Building Circuits
//!
//! ```
//! use breaker_circuit::{Circuit, CircuitNode};
//!
//! // and(true, if(false, true, not(false)))
//! let root = CircuitNode::and(vec![
//!     CircuitNode::value(true),
//!     CircuitNode::if_gate(
//!         CircuitNode::value(false),
//!         CircuitNode::value(true),
//!         CircuitNode::not(CircuitNode::value(false)),
//!     ),
//! ])
//! .unwrap();
//!
//! let circuit = Circuit::new(root);
//! assert_eq!(circuit.root().arity(), 2);
//! ```
//!
//! # Leaves Are Behavior
//!
//! Leaves implement [`LeafSource`], an async read that the evaluator
//! may cancel at any await point. [`ConstLeaf`] and [`DelayedLeaf`]
//! cover the common cases; the [`testing`] module adds probes for
//! short-circuit and cancellation behavior.

mod error;
mod leaf;
mod node;
mod op;
pub mod testing;

pub use error::CircuitError;
pub use leaf::{ConstLeaf, DelayedLeaf, LeafSource};
pub use node::{Circuit, CircuitNode};
pub use op::GateOp;
