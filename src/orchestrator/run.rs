use std::sync::{Arc, Mutex};

use tokio::runtime::Handle;
use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;

use crate::foundation::error::{SpotlightError, SpotlightResult};
use crate::model::config::{Tutorial, TutorialConfig};
use crate::model::step::Step;
use crate::orchestrator::cancel::{Liveness, LivenessSource};
use crate::orchestrator::gate::{BusyGate, GatePermit};
use crate::orchestrator::host::{
    DismissHandle, HostSurface, PRESENTATION_TAG, PresentationRequest, PresentationSink,
    SnapshotProvider, TutorialStateStore,
};
use crate::orchestrator::state::{RunFailure, RunOutcome, RunState};
use crate::render::compositor::render_overlay;
use crate::resolve::resolver::{StepResolution, TargetInfo, resolve_each};

/// Host-side collaborators of an [`OverlayOrchestrator`].
#[derive(Clone)]
pub struct HostBindings {
    pub host: Arc<dyn HostSurface>,
    pub snapshots: Arc<dyn SnapshotProvider>,
    pub sink: Arc<dyn PresentationSink>,
    pub store: Arc<dyn TutorialStateStore>,
}

/// Runs the resolve → capture → render → present pipeline for one tutorial, one run at a time.
///
/// Cloning yields another handle to the same orchestrator.
#[derive(Clone)]
pub struct OverlayOrchestrator {
    inner: Arc<Inner>,
}

struct Inner {
    config: TutorialConfig,
    steps: Vec<Step>,
    bindings: HostBindings,
    gate: BusyGate,
    liveness: LivenessSource,
    state: watch::Sender<RunState>,
    task: Mutex<Option<JoinHandle<()>>>,
    runtime: Handle,
}

/// Handle to a started run.
#[derive(Debug)]
pub struct RunHandle {
    outcome: oneshot::Receiver<RunOutcome>,
}

impl RunHandle {
    /// Wait for the run to end.
    pub async fn outcome(self) -> RunOutcome {
        self.outcome.await.unwrap_or(RunOutcome::Cancelled)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Entry {
    /// Wait the settle delay, then run.
    Settle,
    /// Poll host readiness, then run.
    Readiness,
}

enum Halt {
    Failed(RunFailure),
    Cancelled,
}

impl From<RunFailure> for Halt {
    fn from(f: RunFailure) -> Self {
        Self::Failed(f)
    }
}

impl OverlayOrchestrator {
    /// Bind `tutorial` to a host. Must be called from within a tokio runtime.
    pub fn new(tutorial: Tutorial, bindings: HostBindings) -> SpotlightResult<Self> {
        tutorial.config.validate()?;
        let runtime = Handle::try_current().map_err(|e| SpotlightError::Other(e.into()))?;
        let (state, _rx) = watch::channel(RunState::Idle);
        Ok(Self {
            inner: Arc::new(Inner {
                config: tutorial.config,
                steps: tutorial.steps,
                bindings,
                gate: BusyGate::default(),
                liveness: LivenessSource::new(),
                state,
                task: Mutex::new(None),
                runtime,
            }),
        })
    }

    pub fn config(&self) -> &TutorialConfig {
        &self.inner.config
    }

    /// Start a run unless one is in flight or the tutorial was already shown to `user_id`.
    pub fn show(&self, user_id: Option<&str>) -> Result<RunHandle, RunFailure> {
        let permit = self.admit()?;
        let config = &self.inner.config;
        if config.show_only_once
            && self
                .inner
                .bindings
                .store
                .is_shown(&config.tutorial_id, user_id)
        {
            tracing::info!(
                tutorial = %config.tutorial_id,
                user = ?user_id,
                "tutorial already shown, skipping"
            );
            return Err(RunFailure::AlreadyShown);
        }
        Ok(self.spawn_run(permit, Entry::Settle, user_id))
    }

    /// Start a run regardless of the shown flag, once the host reports ready.
    pub fn force_show(&self, user_id: Option<&str>) -> Result<RunHandle, RunFailure> {
        let permit = self.admit()?;
        Ok(self.spawn_run(permit, Entry::Readiness, user_id))
    }

    /// Stop any in-flight run and refuse later ones. Idempotent; never writes the state store.
    pub fn destroy(&self) {
        if !self.inner.liveness.cancel() {
            return;
        }
        let task = self
            .inner
            .task
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take();
        if let Some(task) = task {
            task.abort();
        }
        self.inner.gate.force_release();
        self.inner.state.send_replace(RunState::Idle);
        tracing::info!(tutorial = %self.inner.config.tutorial_id, "orchestrator destroyed");
    }

    pub fn state(&self) -> RunState {
        self.inner.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<RunState> {
        self.inner.state.subscribe()
    }

    fn admit(&self) -> Result<GatePermit, RunFailure> {
        if self.inner.liveness.is_cancelled() {
            tracing::debug!(tutorial = %self.inner.config.tutorial_id, "show after destroy ignored");
            return Err(RunFailure::Destroyed);
        }
        self.inner.gate.try_acquire().ok_or_else(|| {
            tracing::info!(tutorial = %self.inner.config.tutorial_id, "run already in flight");
            RunFailure::AlreadyInFlight
        })
    }

    fn spawn_run(&self, permit: GatePermit, entry: Entry, user_id: Option<&str>) -> RunHandle {
        let (tx, rx) = oneshot::channel();
        let inner = Arc::clone(&self.inner);
        let user_id = user_id.map(str::to_owned);
        let task = self.inner.runtime.spawn(async move {
            let outcome = inner.run(permit, entry, user_id).await;
            let _ = tx.send(outcome);
        });
        *self.inner.task.lock().unwrap_or_else(|e| e.into_inner()) = Some(task);
        RunHandle { outcome: rx }
    }
}

impl Inner {
    async fn run(&self, permit: GatePermit, entry: Entry, user_id: Option<String>) -> RunOutcome {
        let mut live = self.liveness.token();
        let result = tokio::select! {
            biased;
            _ = live.cancelled() => Err(Halt::Cancelled),
            r = self.pipeline(permit, entry, user_id.as_deref(), self.liveness.token()) => r,
        };

        let outcome = match result {
            Ok(()) => {
                self.set_state(RunState::Done);
                RunOutcome::Dismissed
            }
            Err(Halt::Failed(failure)) => {
                tracing::warn!(
                    tutorial = %self.config.tutorial_id,
                    stage = ?self.state.borrow().clone(),
                    %failure,
                    "tutorial run failed"
                );
                self.set_state(RunState::Failed(failure.clone()));
                RunOutcome::Failed(failure)
            }
            Err(Halt::Cancelled) => {
                tracing::debug!(tutorial = %self.config.tutorial_id, "tutorial run cancelled");
                RunOutcome::Cancelled
            }
        };
        if !self.liveness.is_cancelled() {
            self.set_state(RunState::Idle);
        }
        outcome
    }

    fn set_state(&self, state: RunState) {
        tracing::debug!(tutorial = %self.config.tutorial_id, ?state, "run state");
        self.state.send_replace(state);
    }

    #[tracing::instrument(skip_all, fields(tutorial = %self.config.tutorial_id, ?entry))]
    async fn pipeline(
        &self,
        permit: GatePermit,
        entry: Entry,
        user_id: Option<&str>,
        live: Liveness,
    ) -> Result<(), Halt> {
        let timing = self.config.timing;
        let host = &self.bindings.host;

        match entry {
            Entry::Settle => tokio::time::sleep(timing.settle_delay()).await,
            Entry::Readiness => self.await_readiness().await?,
        }
        commit(&live)?;

        if has_zero_size(host.surface_size()) {
            tracing::debug!("surface not laid out yet, waiting for layout pass");
            host.next_layout().await;
        }
        tokio::time::sleep(timing.frame_delay()).await;
        commit(&live)?;

        self.set_state(RunState::Resolving);
        let targets = self.resolve_targets()?;
        commit(&live)?;

        self.set_state(RunState::Capturing);
        let provider = Arc::clone(&self.bindings.snapshots);
        let snapshot = tokio::task::spawn_blocking(move || provider.capture_root_snapshot())
            .await
            .ok()
            .flatten()
            .ok_or(RunFailure::CaptureFailure)?;
        commit(&live)?;

        self.set_state(RunState::Rendering);
        let (tx, rx) = oneshot::channel();
        let overlay_color = self.config.overlay_color;
        let style = self.config.style.clone();
        let density = host.density();
        rayon::spawn(move || {
            let image = render_overlay(snapshot, &targets, overlay_color, &style, density);
            let _ = tx.send(image);
        });
        let Ok(image) = rx.await else {
            tracing::error!("render worker dropped its result");
            return Err(Halt::Cancelled);
        };
        commit(&live)?;

        if host.is_finishing() || host.is_destroyed() {
            tracing::debug!("host finishing or destroyed, discarding overlay");
            return Err(RunFailure::PresentationRejected(
                "host is finishing or destroyed".to_owned(),
            )
            .into());
        }

        self.set_state(RunState::Presenting);
        let sink = &self.bindings.sink;
        sink.dismiss_existing(PRESENTATION_TAG);
        let image = Arc::new(image);
        let (dismiss_tx, dismiss_rx) = oneshot::channel();
        sink.present(
            Arc::clone(&image),
            PresentationRequest::for_config(&self.config),
            DismissHandle::new(dismiss_tx),
        )
        .map_err(|e| RunFailure::PresentationRejected(e.reason))?;

        if dismiss_rx.await.is_err() {
            tracing::warn!("presentation dropped without dismissal");
            return Err(Halt::Cancelled);
        }
        drop(image);

        // Persist while the gate is still held.
        if self.config.show_only_once
            && let Err(e) = self
                .bindings
                .store
                .set_shown(&self.config.tutorial_id, true, user_id)
        {
            tracing::warn!(error = %e, "failed to persist shown flag");
        }
        drop(permit);
        tracing::info!(user = ?user_id, "tutorial dismissed");
        Ok(())
    }

    /// Checks the host, then waits up to `readiness_attempts` intervals, checking after each.
    async fn await_readiness(&self) -> Result<(), RunFailure> {
        self.set_state(RunState::ReadinessPolling);
        let timing = self.config.timing;
        let attempts = timing.readiness_attempts;
        for waited in 0..=attempts {
            if self.host_ready() {
                tracing::debug!(waited, "host ready");
                return Ok(());
            }
            if waited < attempts {
                tokio::time::sleep(timing.readiness_interval()).await;
            }
        }
        Err(RunFailure::ReadinessTimeout { attempts })
    }

    fn host_ready(&self) -> bool {
        let host = &self.bindings.host;
        !has_zero_size(host.surface_size())
            && host.has_input_focus()
            && !host.is_finishing()
            && !host.is_destroyed()
    }

    fn resolve_targets(&self) -> Result<Vec<TargetInfo>, RunFailure> {
        let tree = self.bindings.host.ui_tree();
        let resolutions = resolve_each(&tree, &self.steps);
        let targets: Vec<TargetInfo> = resolutions
            .iter()
            .filter_map(StepResolution::target)
            .cloned()
            .collect();
        if targets.is_empty() {
            for (index, (step, outcome)) in self.steps.iter().zip(&resolutions).enumerate() {
                tracing::warn!(
                    step = index,
                    selector = %step.selector(),
                    outcome = outcome.label(),
                    "step did not resolve"
                );
            }
            return Err(RunFailure::NoTargetsResolved);
        }
        tracing::debug!(resolved = targets.len(), steps = self.steps.len(), "targets resolved");
        Ok(targets)
    }
}

fn has_zero_size((w, h): (u32, u32)) -> bool {
    w == 0 || h == 0
}

fn commit(live: &Liveness) -> Result<(), Halt> {
    if live.is_cancelled() {
        Err(Halt::Cancelled)
    } else {
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/orchestrator/run.rs"]
mod tests;
