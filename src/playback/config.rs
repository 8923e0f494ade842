use std::path::Path;

use anyhow::Context;

use crate::foundation::error::{SvgaError, SvgaResult};

/// Terminal frame policy once finite-loop playback completes (or `stop` is called).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FillMode {
    /// Rest on the last frame of the range.
    #[default]
    Forward,
    /// Return to the first frame of the range.
    Backward,
    /// Clear the canvas (current frame becomes `-1`).
    Clear,
}

/// Inclusive frame range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "RangeRepr", into = "RangeRepr")]
pub struct FrameRange {
    start: i32,
    end: i32,
}

#[derive(serde::Serialize, serde::Deserialize)]
struct RangeRepr {
    start: i32,
    end: i32,
}

impl TryFrom<RangeRepr> for FrameRange {
    type Error = SvgaError;

    fn try_from(r: RangeRepr) -> Result<Self, Self::Error> {
        Self::new(r.start, r.end)
    }
}

impl From<FrameRange> for RangeRepr {
    fn from(r: FrameRange) -> Self {
        Self {
            start: r.start,
            end: r.end,
        }
    }
}

impl FrameRange {
    pub fn new(start: i32, end: i32) -> SvgaResult<Self> {
        if start < 0 || end < 0 {
            return Err(SvgaError::validation(format!(
                "frame range bounds must be non-negative, got {start}..={end}"
            )));
        }
        if start > end {
            return Err(SvgaError::validation(format!(
                "frame range start must be <= end, got {start}..={end}"
            )));
        }
        Ok(Self { start, end })
    }

    pub fn start(self) -> i32 {
        self.start
    }

    pub fn end(self) -> i32 {
        self.end
    }

    /// Number of frames covered, always at least one.
    pub fn frame_count(self) -> i32 {
        self.end - self.start + 1
    }
}

/// Playback options, loadable from JSON.
///
/// ```json
/// { "loops": 2, "fill_mode": "backward", "range": { "start": 0, "end": 9 }, "auto_play": true }
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// `0` plays forever.
    pub loops: u32,
    pub fill_mode: FillMode,
    pub range: Option<FrameRange>,
    pub auto_play: bool,
}

impl PlaybackConfig {
    pub fn from_json_str(s: &str) -> SvgaResult<Self> {
        serde_json::from_str(s)
            .map_err(|e| SvgaError::validation(format!("invalid playback config: {e}")))
    }

    pub fn from_json_path(path: &Path) -> SvgaResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read playback config '{}'", path.display()))?;
        Self::from_json_str(&text)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/config.rs"]
mod tests;
