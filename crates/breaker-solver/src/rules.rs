//! Gate rules: per-operator early termination.
//!
//! A rule consumes child verdicts in completion order and returns the
//! gate's value the moment it is determined, which is what lets the
//! worker cancel the siblings still running. Every rule is written
//! against arrival order; none of them may assume that argument 0
//! reports first.
//!
//! # Termination Bounds
//!
//! | Rule | Returns early when |
//! |------|--------------------|
//! | `and` | any verdict is false |
//! | `or` | any verdict is true |
//! | `gt(k)` | trues exceed k, or cannot anymore |
//! | `lt(k)` | trues reach k, or cannot anymore |
//! | `if` | condition known, or both branches agree |

use crate::error::SolverError;
use crate::mailbox::Mailbox;
use crate::signal::CancelToken;
use breaker_circuit::GateOp;

/// Drives the rule for `op` over a gate of the given arity.
///
/// # Errors
///
/// Propagates [`SolverError::Cancelled`] out of the mailbox; the
/// caller owns cleanup of the children.
pub(crate) async fn drive(
    op: GateOp,
    arity: usize,
    mailbox: &mut Mailbox,
    cancel: &mut CancelToken,
) -> Result<bool, SolverError> {
    match op {
        GateOp::Not => not(mailbox, cancel).await,
        GateOp::And => and(arity, mailbox, cancel).await,
        GateOp::Or => or(arity, mailbox, cancel).await,
        GateOp::If => if_else(mailbox, cancel).await,
        GateOp::GreaterThan(threshold) => greater_than(threshold, arity, mailbox, cancel).await,
        GateOp::LessThan(threshold) => less_than(threshold, arity, mailbox, cancel).await,
    }
}

async fn not(mailbox: &mut Mailbox, cancel: &mut CancelToken) -> Result<bool, SolverError> {
    Ok(!mailbox.recv(cancel).await?.value)
}

async fn and(
    arity: usize,
    mailbox: &mut Mailbox,
    cancel: &mut CancelToken,
) -> Result<bool, SolverError> {
    for _ in 0..arity {
        if !mailbox.recv(cancel).await?.value {
            return Ok(false);
        }
    }
    Ok(true)
}

async fn or(
    arity: usize,
    mailbox: &mut Mailbox,
    cancel: &mut CancelToken,
) -> Result<bool, SolverError> {
    for _ in 0..arity {
        if mailbox.recv(cancel).await?.value {
            return Ok(true);
        }
    }
    Ok(false)
}

async fn greater_than(
    threshold: usize,
    arity: usize,
    mailbox: &mut Mailbox,
    cancel: &mut CancelToken,
) -> Result<bool, SolverError> {
    // More trues than exist arguments: decided before any verdict.
    if threshold >= arity {
        return Ok(false);
    }
    let mut trues = 0;
    for seen in 0..arity {
        if mailbox.recv(cancel).await?.value {
            trues += 1;
        }
        let remaining = arity - seen - 1;
        if trues > threshold {
            return Ok(true);
        }
        if trues + remaining <= threshold {
            return Ok(false);
        }
    }
    // The bounds settle on or before the final verdict.
    Ok(false)
}

async fn less_than(
    threshold: usize,
    arity: usize,
    mailbox: &mut Mailbox,
    cancel: &mut CancelToken,
) -> Result<bool, SolverError> {
    // Fewer trues than the argument count allows: always satisfied.
    if threshold > arity {
        return Ok(true);
    }
    let mut trues = 0;
    for seen in 0..arity {
        if mailbox.recv(cancel).await?.value {
            trues += 1;
        }
        let remaining = arity - seen - 1;
        if trues >= threshold {
            return Ok(false);
        }
        if trues + remaining < threshold {
            return Ok(true);
        }
    }
    // The bounds settle on or before the final verdict.
    Ok(false)
}

/// The only index-sensitive rule. The condition is argument 0, the
/// branches are arguments 1 and 2.
async fn if_else(mailbox: &mut Mailbox, cancel: &mut CancelToken) -> Result<bool, SolverError> {
    let mut known: [Option<bool>; 3] = [None; 3];
    loop {
        let verdict = mailbox.recv(cancel).await?;
        known[verdict.index] = Some(verdict.value);

        if let Some(condition) = known[0] {
            // The losing branch is dead; drain anything it may still
            // say while waiting for the chosen one.
            let chosen = if condition { 1 } else { 2 };
            loop {
                if let Some(value) = known[chosen] {
                    return Ok(value);
                }
                let verdict = mailbox.recv(cancel).await?;
                known[verdict.index] = Some(verdict.value);
            }
        }

        if let (Some(then_value), Some(else_value)) = (known[1], known[2]) {
            if then_value == else_value {
                // Both branches agree, the condition is irrelevant.
                return Ok(then_value);
            }
        }
    }
}
