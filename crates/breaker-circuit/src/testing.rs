//! Test helpers shared by the workspace and by embedders.
//!
//! These are real implementations, not mocks of convenience: the
//! solver's own test suites lean on them to observe short-circuit
//! behavior ([`CountingLeaf`]), cancellation ([`PendingLeaf`]) and
//! correctness ([`eval_sequential`]).

use crate::leaf::LeafSource;
use crate::node::CircuitNode;
use async_trait::async_trait;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Wraps a leaf and counts reads that ran to completion.
///
/// A read that is cancelled mid-way does not bump the counter, which
/// is exactly what makes the counter a short-circuit witness: a gate
/// that decided early leaves some siblings uncounted.
///
/// # Example
///
/// ```ignore
/// let reads = Arc::new(AtomicUsize::new(0));
/// let leaf = CountingLeaf::new(ConstLeaf::new(true), Arc::clone(&reads));
/// leaf.read().await;
/// assert_eq!(reads.load(Ordering::SeqCst), 1);
/// ```
pub struct CountingLeaf {
    inner: Arc<dyn LeafSource>,
    completed: Arc<AtomicUsize>,
}

impl CountingLeaf {
    /// Wraps `inner`, bumping `completed` after each finished read.
    #[must_use]
    pub fn new(inner: impl LeafSource + 'static, completed: Arc<AtomicUsize>) -> Self {
        Self {
            inner: Arc::new(inner),
            completed,
        }
    }
}

#[async_trait]
impl LeafSource for CountingLeaf {
    async fn read(&self) -> bool {
        let value = self.inner.read().await;
        self.completed.fetch_add(1, Ordering::SeqCst);
        value
    }
}

/// A leaf whose read never resolves.
///
/// The only way out of a `PendingLeaf` is cancellation, which makes
/// it the sharpest probe for "this subtree was pruned".
#[derive(Debug, Clone, Copy, Default)]
pub struct PendingLeaf;

impl PendingLeaf {
    /// Creates a never-resolving leaf.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl LeafSource for PendingLeaf {
    async fn read(&self) -> bool {
        std::future::pending().await
    }
}

/// Sequential reference semantics of a circuit.
///
/// Reads every leaf, depth-first and one at a time, and folds the
/// gates with [`GateOp::apply`](crate::GateOp::apply). This is the
/// oracle the parallel solver is tested against; it is deliberately
/// not an evaluation strategy the solver offers.
pub fn eval_sequential(node: &CircuitNode) -> Pin<Box<dyn Future<Output = bool> + Send + '_>> {
    Box::pin(async move {
        match node {
            CircuitNode::Leaf { source } => source.read().await,
            CircuitNode::Gate { op, args } => {
                let mut values = Vec::with_capacity(args.len());
                for arg in args {
                    values.push(eval_sequential(arg).await);
                }
                op.apply(&values)
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::leaf::ConstLeaf;
    use std::time::Duration;

    #[tokio::test]
    async fn counting_leaf_counts_completed_reads() {
        let reads = Arc::new(AtomicUsize::new(0));
        let leaf = CountingLeaf::new(ConstLeaf::new(true), Arc::clone(&reads));

        assert!(leaf.read().await);
        assert!(leaf.read().await);
        assert_eq!(reads.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn pending_leaf_never_resolves() {
        let leaf = PendingLeaf::new();
        let outcome = tokio::time::timeout(Duration::from_millis(20), leaf.read()).await;
        assert!(outcome.is_err());
    }

    #[tokio::test]
    async fn sequential_eval_matches_truth_tables() {
        // not(and(true, or(false, true))) == false
        let node = CircuitNode::not(
            CircuitNode::and(vec![
                CircuitNode::value(true),
                CircuitNode::or(vec![CircuitNode::value(false), CircuitNode::value(true)])
                    .unwrap(),
            ])
            .unwrap(),
        );
        assert!(!eval_sequential(&node).await);

        // if(false, _, gt(1)(true, true)) == true
        let node = CircuitNode::if_gate(
            CircuitNode::value(false),
            CircuitNode::value(false),
            CircuitNode::greater_than(1, vec![CircuitNode::value(true), CircuitNode::value(true)])
                .unwrap(),
        );
        assert!(eval_sequential(&node).await);
    }
}
