//! Spotlight draws onboarding overlays: a dimmed copy of the screen with holes cut around the
//! highlighted widgets, a border around each hole, and a stack of tooltip panels connected to
//! their targets.
//!
//! The public API has three layers:
//!
//! - Load and validate a [`Tutorial`] (steps plus [`TutorialConfig`])
//! - Resolve steps against a [`UiNode`] tree and render with [`render_overlay`]
//! - Or bind everything to a host with an [`OverlayOrchestrator`], which runs the
//!   resolve → capture → render → present pipeline one run at a time
#![forbid(unsafe_code)]

mod foundation;

pub(crate) mod model;
pub(crate) mod orchestrator;
pub(crate) mod render;
pub(crate) mod resolve;

pub use crate::foundation::core::{Density, PixelRect, Point, Rect, Rgba8Premul};
pub use crate::foundation::error::{SpotlightError, SpotlightResult};

pub use crate::model::color::Color;
pub use crate::model::config::{AnimationConfig, PipelineTiming, Tutorial, TutorialConfig};
pub use crate::model::step::{HighlightShape, Selector, Step};
pub use crate::model::style::{
    ButtonStyle, DismissButton, FontBytes, LineStyle, StyleConfig, TooltipFill,
};

pub use crate::orchestrator::host::{
    DismissHandle, HostSurface, PRESENTATION_TAG, PresentRejected, PresentationRequest,
    PresentationSink, SnapshotProvider, TutorialStateStore,
};
pub use crate::orchestrator::run::{HostBindings, OverlayOrchestrator, RunHandle};
pub use crate::orchestrator::state::{RunFailure, RunOutcome, RunState};
pub use crate::orchestrator::store::{JsonFileStateStore, MemoryStateStore, state_key};

pub use crate::render::compositor::render_overlay;
pub use crate::render::frame::{OverlayImage, Snapshot};
pub use crate::render::layout::{
    DEFAULT_MAX_WIDTH_DP, TOOLTIP_SPACING_DP, TOOLTIP_START_DP, centered_panel,
    connector_endpoints, stack_panels,
};
pub use crate::render::shapes::{HoleOutline, expand};

pub use crate::resolve::resolver::{
    StepResolution, TargetInfo, find_by_id, find_by_tag, resolve_all, resolve_each,
};
pub use crate::resolve::tree::{PreOrder, UiNode};
