use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use super::*;
use crate::foundation::core::{Density, PixelRect};
use crate::orchestrator::host::PresentRejected;
use crate::orchestrator::store::MemoryStateStore;
use crate::render::frame::{OverlayImage, Snapshot};
use crate::resolve::tree::UiNode;

/// Host that never lays out and counts readiness probes.
#[derive(Default)]
struct NeverReadyHost {
    size_probes: AtomicUsize,
    trees: AtomicUsize,
}

#[async_trait::async_trait]
impl HostSurface for NeverReadyHost {
    fn surface_size(&self) -> (u32, u32) {
        self.size_probes.fetch_add(1, Ordering::SeqCst);
        (0, 0)
    }
    fn has_input_focus(&self) -> bool {
        true
    }
    fn is_finishing(&self) -> bool {
        false
    }
    fn is_destroyed(&self) -> bool {
        false
    }
    fn density(&self) -> Density {
        Density::IDENTITY
    }
    fn ui_tree(&self) -> UiNode {
        self.trees.fetch_add(1, Ordering::SeqCst);
        UiNode::new(PixelRect::new(0, 0, 0, 0))
    }
    async fn next_layout(&self) {
        std::future::pending::<()>().await
    }
}

struct NoSnapshots;

impl SnapshotProvider for NoSnapshots {
    fn capture_root_snapshot(&self) -> Option<Snapshot> {
        None
    }
}

struct RejectingSink;

impl PresentationSink for RejectingSink {
    fn dismiss_existing(&self, _tag: &str) {}
    fn present(
        &self,
        _image: Arc<OverlayImage>,
        _request: PresentationRequest,
        _on_dismiss: DismissHandle,
    ) -> Result<(), PresentRejected> {
        Err(PresentRejected::new("test sink"))
    }
}

fn orchestrator(host: Arc<NeverReadyHost>, store: Arc<MemoryStateStore>) -> OverlayOrchestrator {
    let tutorial = Tutorial {
        config: TutorialConfig::default(),
        steps: vec![Step::with_tag("search", "Search here")],
    };
    OverlayOrchestrator::new(
        tutorial,
        HostBindings {
            host,
            snapshots: Arc::new(NoSnapshots),
            sink: Arc::new(RejectingSink),
            store,
        },
    )
    .unwrap()
}

#[tokio::test(start_paused = true)]
async fn readiness_times_out_after_the_configured_intervals() {
    let host = Arc::new(NeverReadyHost::default());
    let orch = orchestrator(Arc::clone(&host), Arc::new(MemoryStateStore::new()));

    let started = tokio::time::Instant::now();
    let run = orch.force_show(None).unwrap();
    assert_eq!(
        run.outcome().await,
        RunOutcome::Failed(RunFailure::ReadinessTimeout { attempts: 10 })
    );
    // One check up front, then one after each of the ten intervals.
    assert_eq!(host.size_probes.load(Ordering::SeqCst), 11);
    let elapsed = started.elapsed();
    assert!(elapsed >= Duration::from_millis(1000), "{elapsed:?}");
    assert!(elapsed < Duration::from_millis(1100), "{elapsed:?}");
    assert_eq!(host.trees.load(Ordering::SeqCst), 0);
    assert!(orch.state().is_idle());
}

#[tokio::test(start_paused = true)]
async fn a_second_show_is_rejected_while_the_first_is_in_flight() {
    let host = Arc::new(NeverReadyHost::default());
    let orch = orchestrator(host, Arc::new(MemoryStateStore::new()));

    let first = orch.force_show(None).unwrap();
    assert_eq!(orch.show(None).unwrap_err(), RunFailure::AlreadyInFlight);
    assert_eq!(orch.force_show(None).unwrap_err(), RunFailure::AlreadyInFlight);

    assert!(matches!(first.outcome().await, RunOutcome::Failed(_)));
    // The gate is free again once the run failed.
    let second = orch.force_show(None).unwrap();
    assert!(matches!(second.outcome().await, RunOutcome::Failed(_)));
}

#[tokio::test(start_paused = true)]
async fn shown_tutorials_are_skipped_before_any_work() {
    let host = Arc::new(NeverReadyHost::default());
    let store = Arc::new(MemoryStateStore::new());
    store.set_shown("default_tutorial", true, Some("u1")).unwrap();
    let orch = orchestrator(Arc::clone(&host), Arc::clone(&store));

    assert_eq!(orch.show(Some("u1")).unwrap_err(), RunFailure::AlreadyShown);
    assert_eq!(host.size_probes.load(Ordering::SeqCst), 0);
    assert_eq!(host.trees.load(Ordering::SeqCst), 0);
    assert!(orch.state().is_idle());
    // Other users and force_show are unaffected.
    assert!(orch.show(Some("u2")).is_ok());
}

#[tokio::test(start_paused = true)]
async fn destroy_cancels_the_run_and_refuses_new_ones() {
    let host = Arc::new(NeverReadyHost::default());
    let store = Arc::new(MemoryStateStore::new());
    let orch = orchestrator(Arc::clone(&host), Arc::clone(&store));

    // Zero-sized host: the run parks waiting for a layout pass that never comes.
    let run = orch.show(None).unwrap();
    tokio::time::sleep(Duration::from_millis(400)).await;
    assert!(orch.inner.gate.is_held());

    orch.destroy();
    orch.destroy();
    assert_eq!(run.outcome().await, RunOutcome::Cancelled);
    assert!(!orch.inner.gate.is_held());
    assert!(orch.state().is_idle());
    assert!(!store.is_shown("default_tutorial", None));
    assert_eq!(orch.show(None).unwrap_err(), RunFailure::Destroyed);
    assert_eq!(orch.force_show(None).unwrap_err(), RunFailure::Destroyed);
}

#[tokio::test(start_paused = true)]
async fn subscribers_see_readiness_polling() {
    let host = Arc::new(NeverReadyHost::default());
    let orch = orchestrator(host, Arc::new(MemoryStateStore::new()));
    let mut states = orch.subscribe();

    let run = orch.force_show(None).unwrap();
    states
        .wait_for(|s| *s == RunState::ReadinessPolling)
        .await
        .unwrap();
    run.outcome().await;
    assert_eq!(orch.state(), RunState::Idle);
}

#[test]
fn new_requires_a_runtime() {
    let host = Arc::new(NeverReadyHost::default());
    let tutorial = Tutorial::default();
    let res = OverlayOrchestrator::new(
        tutorial,
        HostBindings {
            host,
            snapshots: Arc::new(NoSnapshots),
            sink: Arc::new(RejectingSink),
            store: Arc::new(MemoryStateStore::new()),
        },
    );
    assert!(matches!(res, Err(SpotlightError::Other(_))));
}
