//! Seams between the orchestrator and the host application.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::oneshot;

use crate::foundation::core::Density;
use crate::foundation::error::SpotlightResult;
use crate::model::color::Color;
use crate::model::config::{AnimationConfig, TutorialConfig};
use crate::model::style::DismissButton;
use crate::render::frame::{OverlayImage, Snapshot};
use crate::resolve::tree::UiNode;

/// Tag shared by every overlay presentation; a new one replaces the previous.
pub const PRESENTATION_TAG: &str = "TutorialDialog";

/// The window the overlay is shown over.
#[async_trait]
pub trait HostSurface: Send + Sync {
    /// Current surface size in pixels; `(0, 0)` before the first layout pass.
    fn surface_size(&self) -> (u32, u32);
    fn has_input_focus(&self) -> bool;
    fn is_finishing(&self) -> bool;
    fn is_destroyed(&self) -> bool;
    fn density(&self) -> Density;
    /// Snapshot of the view hierarchy, in root coordinates.
    fn ui_tree(&self) -> UiNode;
    /// Resolves after the next layout pass completes.
    async fn next_layout(&self);
}

/// Captures the current root surface.
pub trait SnapshotProvider: Send + Sync {
    /// `None` when the surface is not ready or capture failed.
    fn capture_root_snapshot(&self) -> Option<Snapshot>;
}

/// Displays finished overlays modally.
pub trait PresentationSink: Send + Sync {
    fn dismiss_existing(&self, tag: &str);

    /// Show `image`. The sink calls [`DismissHandle::dismiss`] once the user closes it.
    fn present(
        &self,
        image: Arc<OverlayImage>,
        request: PresentationRequest,
        on_dismiss: DismissHandle,
    ) -> Result<(), PresentRejected>;
}

/// Persistent "already shown" flags, keyed per tutorial and optional user.
pub trait TutorialStateStore: Send + Sync {
    fn is_shown(&self, tutorial_id: &str, user_id: Option<&str>) -> bool;
    fn set_shown(
        &self,
        tutorial_id: &str,
        shown: bool,
        user_id: Option<&str>,
    ) -> SpotlightResult<()>;
    fn clear(&self, tutorial_id: &str, user_id: Option<&str>) -> SpotlightResult<()>;
    fn clear_all(&self) -> SpotlightResult<()>;
}

/// Everything a sink needs besides the pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct PresentationRequest {
    pub tag: String,
    pub button: DismissButton,
    /// Button background, resolved from the button style.
    pub button_colors: Vec<Color>,
    pub animation: AnimationConfig,
}

impl PresentationRequest {
    pub fn for_config(config: &TutorialConfig) -> Self {
        let button = config.style.dismiss_button.clone();
        Self {
            tag: PRESENTATION_TAG.to_owned(),
            button_colors: button.style.colors(&config.style),
            button,
            animation: config.animation,
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("presentation rejected: {reason}")]
pub struct PresentRejected {
    pub reason: String,
}

impl PresentRejected {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// One-shot dismissal callback. Consumed on use.
#[derive(Debug)]
pub struct DismissHandle {
    tx: oneshot::Sender<()>,
}

impl DismissHandle {
    pub(crate) fn new(tx: oneshot::Sender<()>) -> Self {
        Self { tx }
    }

    pub fn dismiss(self) {
        if self.tx.send(()).is_err() {
            tracing::debug!("overlay dismissed after its run ended");
        }
    }
}
