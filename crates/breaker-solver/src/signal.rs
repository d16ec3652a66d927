//! Cancel lines between a worker and the things it owns.
//!
//! Cancellation is not a flag that workers poll. Every suspension
//! point in the solver selects against its [`CancelToken`], so the
//! interrupt lands at the current or next await, whichever comes
//! first. The line only ever latches one way: once fired it stays
//! fired.

use tokio::sync::watch;

/// Creates a connected signal/token pair.
pub(crate) fn cancel_pair() -> (CancelSignal, CancelToken) {
    let (tx, rx) = watch::channel(false);
    (CancelSignal { tx }, CancelToken { rx })
}

/// The owner's half of a cancel line.
///
/// Held by whoever is responsible for the cancellable party: a parent
/// worker for each child, the solver for each root.
#[derive(Debug)]
pub(crate) struct CancelSignal {
    tx: watch::Sender<bool>,
}

impl CancelSignal {
    /// Latches the line. Idempotent; delivery failures mean the
    /// other side is already gone, which is the desired end state.
    pub(crate) fn fire(&self) {
        let _ = self.tx.send(true);
    }
}

/// The cancellable party's half of a cancel line.
#[derive(Debug)]
pub(crate) struct CancelToken {
    rx: watch::Receiver<bool>,
}

impl CancelToken {
    /// Resolves once the line is fired.
    ///
    /// Also resolves when the signal half has been dropped: a worker
    /// whose owner lost interest must not keep running.
    pub(crate) async fn cancelled(&mut self) {
        let _ = self.rx.wait_for(|fired| *fired).await;
    }

    /// Non-blocking probe.
    pub(crate) fn is_cancelled(&self) -> bool {
        *self.rx.borrow()
    }
}
