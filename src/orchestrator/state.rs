use serde::Serialize;

/// Stage of the current run. At most one run per orchestrator is ever past `Idle`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "reason", rename_all = "snake_case")]
pub enum RunState {
    #[default]
    Idle,
    /// `force_show` waiting for the host to become ready.
    ReadinessPolling,
    Resolving,
    Capturing,
    Rendering,
    Presenting,
    Done,
    Failed(RunFailure),
}

impl RunState {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}

/// Why a run did not reach presentation. All are recoverable by a later call.
#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunFailure {
    #[error("a run is already in flight")]
    AlreadyInFlight,
    #[error("tutorial was already shown")]
    AlreadyShown,
    #[error("host not ready after {attempts} attempts")]
    ReadinessTimeout { attempts: u32 },
    #[error("no step resolved to an on-screen target")]
    NoTargetsResolved,
    #[error("snapshot capture failed")]
    CaptureFailure,
    #[error("presentation rejected: {0}")]
    PresentationRejected(String),
    #[error("orchestrator was destroyed")]
    Destroyed,
}

/// How a started run ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    /// Presented, then dismissed by the user.
    Dismissed,
    Failed(RunFailure),
    /// Stopped by `destroy()` (or the presentation was dropped undismissed).
    Cancelled,
}
