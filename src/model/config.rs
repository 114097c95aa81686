use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use crate::foundation::error::{SpotlightError, SpotlightResult};
use crate::model::color::Color;
use crate::model::step::Step;
use crate::model::style::StyleConfig;
use serde::{Deserialize, Serialize};

/// Overlay animation timings. Carried through to the presentation sink; the core never animates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    pub fade_in_ms: u64,
    pub fade_out_ms: u64,
    pub highlight_pulse_ms: u64,
    pub enable_pulse: bool,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            fade_in_ms: 300,
            fade_out_ms: 200,
            highlight_pulse_ms: 1000,
            enable_pulse: false,
        }
    }
}

/// Delays and bounds used by the run pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineTiming {
    /// Delay between `show()` and the start of the pipeline.
    pub settle_delay_ms: u64,
    /// One frame, waited before resolving targets so layout can settle.
    pub frame_delay_ms: u64,
    /// Number of readiness checks `force_show()` performs before giving up.
    pub readiness_attempts: u32,
    /// Delay between two readiness checks.
    pub readiness_interval_ms: u64,
}

impl Default for PipelineTiming {
    fn default() -> Self {
        Self {
            settle_delay_ms: 300,
            frame_delay_ms: 16,
            readiness_attempts: 10,
            readiness_interval_ms: 100,
        }
    }
}

impl PipelineTiming {
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    pub fn frame_delay(&self) -> Duration {
        Duration::from_millis(self.frame_delay_ms)
    }

    pub fn readiness_interval(&self) -> Duration {
        Duration::from_millis(self.readiness_interval_ms)
    }
}

/// Per-tutorial configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TutorialConfig {
    /// Key under which the "already shown" flag is stored.
    pub tutorial_id: String,
    /// When set, `show()` is a no-op once the tutorial was dismissed for the user.
    pub show_only_once: bool,
    /// Dim layer color, alpha included.
    pub overlay_color: Color,
    pub style: StyleConfig,
    pub animation: AnimationConfig,
    pub timing: PipelineTiming,
}

impl Default for TutorialConfig {
    fn default() -> Self {
        Self {
            tutorial_id: "default_tutorial".to_owned(),
            show_only_once: true,
            overlay_color: Color::from_argb(0xD000_0000),
            style: StyleConfig::default(),
            animation: AnimationConfig::default(),
            timing: PipelineTiming::default(),
        }
    }
}

impl TutorialConfig {
    pub fn validate(&self) -> SpotlightResult<()> {
        if self.tutorial_id.trim().is_empty() {
            return Err(SpotlightError::validation("tutorial_id must be non-empty"));
        }
        if self.timing.readiness_attempts == 0 {
            return Err(SpotlightError::validation(
                "timing.readiness_attempts must be >= 1",
            ));
        }
        self.style.validate()
    }
}

/// A tutorial document: configuration plus its ordered steps.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Tutorial {
    #[serde(default)]
    pub config: TutorialConfig,
    pub steps: Vec<Step>,
}

impl Tutorial {
    /// Parse and validate a tutorial from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> SpotlightResult<Self> {
        let tutorial: Tutorial = serde_json::from_reader(r)
            .map_err(|e| SpotlightError::serde(format!("parse tutorial JSON: {e}")))?;
        tutorial.config.validate()?;
        Ok(tutorial)
    }

    /// Parse and validate a tutorial from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> SpotlightResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            SpotlightError::io(format!("open tutorial JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/config.rs"]
mod tests;
