//! The child mailbox: how a gate worker hears from its children.
//!
//! One mailbox per gate, capacity equal to the gate's arity. Each
//! child delivers exactly one verdict, so a delivery can never block,
//! and a parent that has already decided can simply drop the mailbox;
//! late deliveries fall into the void and the late child observes its
//! cancel line instead.
//!
//! Delivery order is completion order, not argument order. Rules that
//! care which child spoke (only `if`) read the index off the message.

use crate::error::SolverError;
use crate::signal::CancelToken;
use tokio::sync::mpsc;

/// One child's verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ChildValue {
    /// The child's position among the gate's arguments.
    pub(crate) index: usize,
    /// The child's evaluated value.
    pub(crate) value: bool,
}

/// Creates a mailbox for a gate of the given arity.
pub(crate) fn mailbox(arity: usize) -> (Mailbox, ChildSender) {
    let (tx, rx) = mpsc::channel(arity);
    (Mailbox { rx }, ChildSender { tx })
}

/// A child's handle for delivering its verdict upward.
#[derive(Debug, Clone)]
pub(crate) struct ChildSender {
    tx: mpsc::Sender<ChildValue>,
}

impl ChildSender {
    /// Delivers one verdict. Never blocks: capacity covers every
    /// child, and a dropped mailbox means the parent already decided,
    /// so the verdict is simply discarded.
    pub(crate) fn deliver(&self, index: usize, value: bool) {
        let _ = self.tx.try_send(ChildValue { index, value });
    }
}

/// The gate worker's receiving end.
#[derive(Debug)]
pub(crate) struct Mailbox {
    rx: mpsc::Receiver<ChildValue>,
}

impl Mailbox {
    /// Receives the next verdict in completion order.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::Cancelled`] when the cancel line fires,
    /// which takes priority over buffered verdicts. Every sender
    /// having vanished without a verdict is reported the same way; a
    /// healthy worker keeps its children alive past the rule loop, so
    /// that case only arises when a child died abnormally.
    pub(crate) async fn recv(&mut self, cancel: &mut CancelToken) -> Result<ChildValue, SolverError> {
        tokio::select! {
            biased;

            () = cancel.cancelled() => Err(SolverError::Cancelled),
            message = self.rx.recv() => message.ok_or(SolverError::Cancelled),
        }
    }
}
