use crate::foundation::core::PixelRect;
use crate::model::step::{HighlightShape, Selector, Step};
use crate::resolve::tree::UiNode;

/// A step whose target was located on screen. Lives for a single run.
#[derive(Clone, Debug, PartialEq)]
pub struct TargetInfo {
    /// Index of the originating step.
    pub step_index: usize,
    pub rect: PixelRect,
    pub text: String,
    pub max_width_dp: Option<f32>,
    pub shape: HighlightShape,
}

/// What happened when resolving one step.
#[derive(Clone, Debug, PartialEq)]
pub enum StepResolution {
    Resolved(TargetInfo),
    /// No node carries the selector (for tags: no *visible* node does).
    NotFound,
    /// A node matched but it is not currently shown.
    NotShown,
    /// A node matched but its bounds cover no pixels.
    EmptyBounds(PixelRect),
}

impl StepResolution {
    pub fn target(&self) -> Option<&TargetInfo> {
        match self {
            Self::Resolved(t) => Some(t),
            _ => None,
        }
    }

    /// Short label for diagnostics.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Resolved(_) => "resolved",
            Self::NotFound => "not found",
            Self::NotShown => "not shown",
            Self::EmptyBounds(_) => "empty bounds",
        }
    }
}

/// All nodes tagged `tag`, in depth-first pre-order.
pub fn find_by_tag<'a>(root: &'a UiNode, tag: &str) -> Vec<&'a UiNode> {
    root.pre_order()
        .filter(|n| n.tag.as_deref() == Some(tag))
        .collect()
}

/// First node (depth-first pre-order) whose identifier is `id`.
pub fn find_by_id(root: &UiNode, id: i64) -> Option<&UiNode> {
    root.pre_order().find(|n| n.id == Some(id))
}

fn find_target<'a>(root: &'a UiNode, selector: &Selector) -> Option<&'a UiNode> {
    match selector {
        Selector::Tag(tag) => {
            let candidates = find_by_tag(root, tag);
            tracing::debug!(%tag, count = candidates.len(), "tag candidates");
            candidates.into_iter().find(|n| n.visible)
        }
        Selector::Id(id) => find_by_id(root, *id),
    }
}

/// Resolve every step, keeping one outcome per step in step order.
pub fn resolve_each(root: &UiNode, steps: &[Step]) -> Vec<StepResolution> {
    steps
        .iter()
        .enumerate()
        .map(|(index, step)| {
            let outcome = match find_target(root, step.selector()) {
                None => StepResolution::NotFound,
                Some(node) if !node.shown => StepResolution::NotShown,
                Some(node) if node.bounds.is_empty() => StepResolution::EmptyBounds(node.bounds),
                Some(node) => StepResolution::Resolved(TargetInfo {
                    step_index: index,
                    rect: node.bounds,
                    text: step.text().to_owned(),
                    max_width_dp: step.max_width_dp(),
                    shape: step.highlight_shape(),
                }),
            };
            tracing::debug!(
                step = index,
                selector = %step.selector(),
                outcome = outcome.label(),
                "resolve step"
            );
            outcome
        })
        .collect()
}

/// Resolve every step and keep only the ones with an on-screen target, in step order.
pub fn resolve_all(root: &UiNode, steps: &[Step]) -> Vec<TargetInfo> {
    resolve_each(root, steps)
        .into_iter()
        .filter_map(|r| match r {
            StepResolution::Resolved(t) => Some(t),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/resolve/resolver.rs"]
mod tests;
