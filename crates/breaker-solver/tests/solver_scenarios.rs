//! End-to-end scenarios for the parallel solver: short-circuiting,
//! cancellation, and the stop lifecycle.

use breaker_circuit::testing::{eval_sequential, CountingLeaf, PendingLeaf};
use breaker_circuit::{Circuit, CircuitNode, ConstLeaf, DelayedLeaf};
use breaker_solver::{CircuitSolver, SolverError};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Leaf that resolves to `value` after `ms` milliseconds.
fn delayed(value: bool, ms: u64) -> Arc<CircuitNode> {
    CircuitNode::leaf(Arc::new(DelayedLeaf::new(value, Duration::from_millis(ms))))
}

/// Leaf that only ever resolves by being cancelled.
fn pending() -> Arc<CircuitNode> {
    CircuitNode::leaf(Arc::new(PendingLeaf::new()))
}

/// Leaf that bumps `reads` when (and only when) a read completes.
fn counting(value: bool, ms: u64, reads: &Arc<AtomicUsize>) -> Arc<CircuitNode> {
    CircuitNode::leaf(Arc::new(CountingLeaf::new(
        DelayedLeaf::new(value, Duration::from_millis(ms)),
        Arc::clone(reads),
    )))
}

#[tokio::test]
async fn and_of_trues_is_true() {
    let solver = CircuitSolver::new();
    let circuit = Circuit::new(
        CircuitNode::and(vec![
            CircuitNode::value(true),
            CircuitNode::value(true),
            CircuitNode::value(true),
        ])
        .unwrap(),
    );

    assert_eq!(solver.solve(&circuit).await.value().await, Ok(true));
    solver.stop().await;
}

#[tokio::test]
async fn and_short_circuits_past_a_slow_sibling() {
    let solver = CircuitSolver::new();
    let reads = Arc::new(AtomicUsize::new(0));
    // One false argument decides; the 10s leaf must be cancelled, not
    // awaited.
    let circuit = Circuit::new(
        CircuitNode::and(vec![
            counting(true, 50, &reads),
            counting(false, 0, &reads),
            counting(true, 10_000, &reads),
        ])
        .unwrap(),
    );

    let started = Instant::now();
    assert_eq!(solver.solve(&circuit).await.value().await, Ok(false));
    assert!(started.elapsed() < Duration::from_secs(2));
    // At most the deciding leaf and the fast sibling completed.
    assert!(reads.load(Ordering::SeqCst) <= 2);
    solver.stop().await;
}

#[tokio::test]
async fn if_prunes_the_untaken_branch() {
    let solver = CircuitSolver::new();
    // if(true, false, <10s leaf>): the else branch is dead on arrival.
    let circuit = Circuit::new(CircuitNode::if_gate(
        CircuitNode::value(true),
        CircuitNode::value(false),
        delayed(true, 10_000),
    ));

    let started = Instant::now();
    assert_eq!(solver.solve(&circuit).await.value().await, Ok(false));
    assert!(started.elapsed() < Duration::from_secs(2));
    solver.stop().await;
}

#[tokio::test]
async fn if_with_agreeing_branches_drops_the_condition() {
    let solver = CircuitSolver::new();
    // The condition never resolves; the agreeing branches decide
    // without it and it gets cancelled.
    let circuit = Circuit::new(CircuitNode::if_gate(
        pending(),
        CircuitNode::value(true),
        CircuitNode::value(true),
    ));

    let started = Instant::now();
    assert_eq!(solver.solve(&circuit).await.value().await, Ok(true));
    assert!(started.elapsed() < Duration::from_secs(2));
    solver.stop().await;
}

#[tokio::test]
async fn threshold_gate_cancels_a_redundant_leaf() {
    let solver = CircuitSolver::new();
    // Three trues already exceed gt(2); the unresolved leaf is moot.
    let circuit = Circuit::new(
        CircuitNode::greater_than(
            2,
            vec![
                CircuitNode::value(true),
                CircuitNode::value(true),
                CircuitNode::value(true),
                pending(),
            ],
        )
        .unwrap(),
    );

    let started = Instant::now();
    assert_eq!(solver.solve(&circuit).await.value().await, Ok(true));
    assert!(started.elapsed() < Duration::from_secs(2));
    solver.stop().await;
}

#[tokio::test]
async fn unattainable_thresholds_decide_without_reading() {
    let solver = CircuitSolver::new();

    let gt = Circuit::new(
        CircuitNode::greater_than(5, vec![pending(), pending(), pending()]).unwrap(),
    );
    assert_eq!(solver.solve(&gt).await.value().await, Ok(false));

    let lt = Circuit::new(CircuitNode::less_than(5, vec![pending(), pending()]).unwrap());
    assert_eq!(solver.solve(&lt).await.value().await, Ok(true));

    solver.stop().await;
}

#[tokio::test]
async fn stop_between_submissions() {
    let solver = CircuitSolver::new();

    let first = solver.solve(&Circuit::new(pending())).await;
    solver.stop().await;
    let second = solver.solve(&Circuit::new(CircuitNode::value(true))).await;

    assert_eq!(first.value().await, Err(SolverError::Cancelled));
    // Refused submissions settle without waiting.
    assert_eq!(second.try_value(), Some(Err(SolverError::Cancelled)));
}

#[tokio::test]
async fn stop_settles_every_outstanding_handle() {
    let solver = CircuitSolver::new();
    let mut handles = Vec::new();
    for _ in 0..8 {
        handles.push(solver.solve(&Circuit::new(pending())).await);
    }

    solver.stop().await;

    // stop() returning means every root terminated; every handle
    // must already be settled.
    for handle in &handles {
        assert_eq!(handle.try_value(), Some(Err(SolverError::Cancelled)));
    }
}

#[tokio::test]
async fn stop_is_prompt_for_waiters() {
    let solver = Arc::new(CircuitSolver::new());
    let handle = solver.solve(&Circuit::new(pending())).await;

    let waiter = tokio::spawn(async move { handle.value().await });
    tokio::time::sleep(Duration::from_millis(20)).await;

    solver.stop().await;
    let outcome = tokio::time::timeout(Duration::from_secs(2), waiter)
        .await
        .expect("waiter must be released by stop");
    assert_eq!(outcome.unwrap(), Err(SolverError::Cancelled));
}

#[tokio::test]
async fn repeated_stop_is_a_no_op() {
    let solver = CircuitSolver::new();
    let handle = solver.solve(&Circuit::new(pending())).await;

    solver.stop().await;
    solver.stop().await;
    solver.stop().await;

    assert_eq!(handle.value().await, Err(SolverError::Cancelled));
}

#[tokio::test]
async fn settled_handles_answer_every_waiter_the_same() {
    let solver = CircuitSolver::new();
    let circuit = Circuit::new(
        CircuitNode::or(vec![CircuitNode::value(false), CircuitNode::value(true)]).unwrap(),
    );
    let handle = solver.solve(&circuit).await;

    let mut waiters = Vec::new();
    for _ in 0..4 {
        let h = handle.clone();
        waiters.push(tokio::spawn(async move { h.value().await }));
    }
    for waiter in waiters {
        assert_eq!(waiter.await.unwrap(), Ok(true));
    }
    // And again, after it settled.
    assert_eq!(handle.value().await, Ok(true));
    solver.stop().await;
}

#[tokio::test]
async fn completion_order_does_not_change_the_value() {
    let solver = CircuitSolver::new();

    // The same or-gate with the true argument finishing first, in the
    // middle, and last.
    for true_delay in [0, 20, 40] {
        let mut args = vec![delayed(false, 20), delayed(false, 40)];
        args.insert(0, delayed(true, true_delay));
        let circuit = Circuit::new(CircuitNode::or(args).unwrap());
        assert_eq!(solver.solve(&circuit).await.value().await, Ok(true));
    }

    // gt(1) over two trues and two falses, under shuffled delays.
    for delays in [[0, 10, 20, 30], [30, 20, 10, 0], [10, 30, 0, 20]] {
        let circuit = Circuit::new(
            CircuitNode::greater_than(
                1,
                vec![
                    delayed(true, delays[0]),
                    delayed(true, delays[1]),
                    delayed(false, delays[2]),
                    delayed(false, delays[3]),
                ],
            )
            .unwrap(),
        );
        assert_eq!(solver.solve(&circuit).await.value().await, Ok(true));
    }

    solver.stop().await;
}

#[tokio::test]
async fn parallel_value_matches_the_sequential_oracle() {
    let solver = CircuitSolver::new();

    let circuits = vec![
        CircuitNode::not(CircuitNode::value(false)),
        CircuitNode::and(vec![
            CircuitNode::value(true),
            CircuitNode::or(vec![CircuitNode::value(false), CircuitNode::value(true)]).unwrap(),
            CircuitNode::not(CircuitNode::value(false)),
        ])
        .unwrap(),
        CircuitNode::if_gate(
            CircuitNode::less_than(2, vec![CircuitNode::value(true), CircuitNode::value(false)])
                .unwrap(),
            CircuitNode::greater_than(
                0,
                vec![CircuitNode::value(false), CircuitNode::value(true)],
            )
            .unwrap(),
            CircuitNode::value(false),
        ),
        CircuitNode::or(vec![
            CircuitNode::and(vec![CircuitNode::value(true), CircuitNode::value(false)]).unwrap(),
            CircuitNode::less_than(
                1,
                vec![CircuitNode::value(false), CircuitNode::value(false)],
            )
            .unwrap(),
        ])
        .unwrap(),
    ];

    for root in circuits {
        let expected = eval_sequential(&root).await;
        let handle = solver.solve(&Circuit::new(Arc::clone(&root))).await;
        assert_eq!(handle.value().await, Ok(expected));
    }

    solver.stop().await;
}

#[tokio::test]
async fn solver_is_shareable_across_tasks() {
    let solver = Arc::new(CircuitSolver::new());

    let mut submitters = Vec::new();
    for i in 0..6 {
        let solver = Arc::clone(&solver);
        submitters.push(tokio::spawn(async move {
            let circuit = Circuit::new(
                CircuitNode::and(vec![
                    CircuitNode::value(true),
                    CircuitNode::value(i % 2 == 0),
                ])
                .unwrap(),
            );
            solver.solve(&circuit).await.value().await
        }));
    }

    for (i, submitter) in submitters.into_iter().enumerate() {
        assert_eq!(submitter.await.unwrap(), Ok(i % 2 == 0));
    }
    solver.stop().await;
}

#[tokio::test]
async fn deep_circuits_settle() {
    let solver = CircuitSolver::new();

    // A 64-deep chain of not-gates over a counting leaf.
    let reads = Arc::new(AtomicUsize::new(0));
    let mut node = CircuitNode::leaf(Arc::new(CountingLeaf::new(
        ConstLeaf::new(true),
        Arc::clone(&reads),
    )));
    for _ in 0..64 {
        node = CircuitNode::not(node);
    }

    let handle = solver.solve(&Circuit::new(node)).await;
    assert_eq!(handle.value().await, Ok(true));
    assert_eq!(reads.load(Ordering::SeqCst), 1);
    solver.stop().await;
}
