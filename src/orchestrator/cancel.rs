//! Cooperative cancellation for orchestrator runs.
//!
//! A [`LivenessSource`] belongs to one orchestrator; every run holds a [`Liveness`] token and
//! consults it before each stage commits. Cancellation is one-way.

use tokio::sync::watch;

/// Control side. Cancelling it is observed by every derived token.
#[derive(Debug)]
pub(crate) struct LivenessSource {
    tx: watch::Sender<bool>,
}

/// Cloneable observer of a [`LivenessSource`].
#[derive(Clone, Debug)]
pub(crate) struct Liveness {
    rx: watch::Receiver<bool>,
}

impl LivenessSource {
    pub(crate) fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx }
    }

    pub(crate) fn token(&self) -> Liveness {
        Liveness {
            rx: self.tx.subscribe(),
        }
    }

    /// Returns `true` only for the call that performed the cancellation.
    pub(crate) fn cancel(&self) -> bool {
        !self.tx.send_replace(true)
    }

    pub(crate) fn is_cancelled(&self) -> bool {
        *self.tx.borrow()
    }
}

impl Liveness {
    #[inline]
    pub(crate) fn is_cancelled(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolves once the source is cancelled.
    pub(crate) async fn cancelled(&mut self) {
        // The source outlives every run, so a closed channel only happens during teardown.
        let _ = self.rx.wait_for(|cancelled| *cancelled).await;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/orchestrator/cancel.rs"]
mod tests;
