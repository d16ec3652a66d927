//! Foundation types for the Breaker circuit solver.
//!
//! This crate is the bottom of the workspace stack:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  breaker-solver  : workers, latches, lifecycle      │
//! ├─────────────────────────────────────────────────────┤
//! │  breaker-circuit : gate tree, leaf sources          │
//! ├─────────────────────────────────────────────────────┤
//! │  breaker-types   : SolveId, ErrorCode  ◄── HERE     │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! It carries only what every other crate needs:
//!
//! - [`SolveId`] - identifier minted for each submitted circuit,
//!   used for registry bookkeeping and log correlation
//! - [`ErrorCode`] - the machine-readable error contract that all
//!   Breaker error types implement
//! - [`assert_error_code`] / [`assert_error_codes`] - test helpers
//!   that keep error codes well-formed across the workspace

mod error;
mod id;

pub use error::{assert_error_code, assert_error_codes, ErrorCode};
pub use id::SolveId;
