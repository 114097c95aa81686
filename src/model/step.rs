use crate::foundation::error::{SpotlightError, SpotlightResult};
use serde::{Deserialize, Serialize};

/// How a step locates its target node in the UI tree.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Selector {
    /// Match on the node's string tag.
    Tag(String),
    /// Match on the node's integer identifier.
    Id(i64),
}

impl std::fmt::Display for Selector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Tag(tag) => write!(f, "tag={tag:?}"),
            Self::Id(id) => write!(f, "id={id}"),
        }
    }
}

/// Shape of the spotlight hole cut around a target.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HighlightShape {
    /// Circle centered on the padded target, radius = half its larger side.
    Circle,
    /// Axis-aligned rectangle.
    Rect,
    /// Rectangle with the style's highlight corner radius.
    #[default]
    RoundedRect,
}

/// One walkthrough step: which region to spotlight and what to say about it.
///
/// Built through [`Step::new`] (or the `with_*` shorthands), which enforces that exactly one
/// selector is set.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StepDef", into = "StepDef")]
pub struct Step {
    selector: Selector,
    text: String,
    max_width_dp: Option<f32>,
    shape: HighlightShape,
}

impl Step {
    /// Create a step from an optional tag and an optional identifier.
    ///
    /// Fails with [`SpotlightError::InvalidStep`] unless exactly one of them is set.
    pub fn new(
        tag: Option<String>,
        id: Option<i64>,
        text: impl Into<String>,
    ) -> SpotlightResult<Self> {
        let selector = match (tag, id) {
            (Some(tag), None) => Selector::Tag(tag),
            (None, Some(id)) => Selector::Id(id),
            (None, None) => {
                return Err(SpotlightError::invalid_step(
                    "step must set exactly one of tag or id (none set)",
                ));
            }
            (Some(_), Some(_)) => {
                return Err(SpotlightError::invalid_step(
                    "step must set exactly one of tag or id (both set)",
                ));
            }
        };
        Ok(Self {
            selector,
            text: text.into(),
            max_width_dp: None,
            shape: HighlightShape::default(),
        })
    }

    /// Step targeting the node tagged `tag`.
    pub fn with_tag(tag: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            selector: Selector::Tag(tag.into()),
            text: text.into(),
            max_width_dp: None,
            shape: HighlightShape::default(),
        }
    }

    /// Step targeting the node with identifier `id`.
    pub fn with_id(id: i64, text: impl Into<String>) -> Self {
        Self {
            selector: Selector::Id(id),
            text: text.into(),
            max_width_dp: None,
            shape: HighlightShape::default(),
        }
    }

    /// Return a copy with a different highlight shape.
    pub fn shape(mut self, shape: HighlightShape) -> Self {
        self.shape = shape;
        self
    }

    /// Return a copy with a tooltip max width (dp).
    ///
    /// Non-finite or non-positive widths are rejected.
    pub fn max_width(mut self, width_dp: f32) -> SpotlightResult<Self> {
        if !width_dp.is_finite() || width_dp <= 0.0 {
            return Err(SpotlightError::invalid_step(
                "max tooltip width must be finite and > 0",
            ));
        }
        self.max_width_dp = Some(width_dp);
        Ok(self)
    }

    pub fn selector(&self) -> &Selector {
        &self.selector
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn max_width_dp(&self) -> Option<f32> {
        self.max_width_dp
    }

    pub fn highlight_shape(&self) -> HighlightShape {
        self.shape
    }
}

/// Serde-facing mirror of [`Step`] with both selector slots exposed.
#[derive(Clone, Debug, Serialize, Deserialize)]
struct StepDef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    tag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<i64>,
    text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    max_width_dp: Option<f32>,
    #[serde(default)]
    shape: HighlightShape,
}

impl TryFrom<StepDef> for Step {
    type Error = SpotlightError;

    fn try_from(def: StepDef) -> Result<Self, Self::Error> {
        let step = Step::new(def.tag, def.id, def.text)?.shape(def.shape);
        match def.max_width_dp {
            Some(w) => step.max_width(w),
            None => Ok(step),
        }
    }
}

impl From<Step> for StepDef {
    fn from(step: Step) -> Self {
        let (tag, id) = match step.selector {
            Selector::Tag(tag) => (Some(tag), None),
            Selector::Id(id) => (None, Some(id)),
        };
        Self {
            tag,
            id,
            text: step.text,
            max_width_dp: step.max_width_dp,
            shape: step.shape,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/step.rs"]
mod tests;
