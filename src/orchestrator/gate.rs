use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Single-flight gate: at most one run per orchestrator holds it.
#[derive(Clone, Debug, Default)]
pub(crate) struct BusyGate {
    busy: Arc<AtomicBool>,
}

/// Proof of holding the gate; releases it on drop.
#[derive(Debug)]
pub(crate) struct GatePermit {
    busy: Arc<AtomicBool>,
}

impl BusyGate {
    pub(crate) fn try_acquire(&self) -> Option<GatePermit> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()?;
        Some(GatePermit {
            busy: Arc::clone(&self.busy),
        })
    }

    pub(crate) fn is_held(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Release regardless of any outstanding permit.
    pub(crate) fn force_release(&self) {
        self.busy.store(false, Ordering::Release);
    }
}

impl Drop for GatePermit {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/orchestrator/gate.rs"]
mod tests;
