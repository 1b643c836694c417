use std::path::Path;

use crate::foundation::core::FrameIndex;
use crate::foundation::error::{RoadsError, RoadsResult};
use crate::palette::Palette;
use crate::render::frame::Frame;

/// Configuration provided to a [`FrameSink`] before any frame is pushed.
#[derive(Debug, Clone)]
pub struct SinkConfig {
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// Palette the frame indices refer to; its last entry is the transparency sentinel.
    pub palette: Palette,
    /// Display time of each frame in milliseconds.
    pub frame_delay_ms: u32,
}

impl SinkConfig {
    pub(crate) fn validate(&self) -> RoadsResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(RoadsError::canvas_size("sink width/height must be non-zero"));
        }
        Ok(())
    }
}

/// Sink contract for consuming optimized frames.
///
/// Ordering contract: `push_frame` is called in strictly increasing `FrameIndex` order, starting
/// with the full-canvas first frame.
pub trait FrameSink {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> RoadsResult<()>;
    /// Push one frame in strictly increasing order.
    fn push_frame(&mut self, idx: FrameIndex, frame: &Frame) -> RoadsResult<()>;
    /// Called once after the last frame is pushed.
    fn end(&mut self) -> RoadsResult<()>;
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<(FrameIndex, Frame)>,
    ended: bool,
}

impl InMemorySink {
    /// Create a new in-memory sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the sink configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<&SinkConfig> {
        self.cfg.as_ref()
    }

    /// Borrow the captured frames.
    pub fn frames(&self) -> &[(FrameIndex, Frame)] {
        &self.frames
    }

    /// Whether `end` has been called.
    pub fn is_ended(&self) -> bool {
        self.ended
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> RoadsResult<()> {
        cfg.validate()?;
        self.cfg = Some(cfg);
        self.frames.clear();
        self.ended = false;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &Frame) -> RoadsResult<()> {
        check_order(self.frames.last().map(|(i, _)| *i), idx)?;
        self.frames.push((idx, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> RoadsResult<()> {
        self.ended = true;
        Ok(())
    }
}

pub(crate) fn check_order(last: Option<FrameIndex>, idx: FrameIndex) -> RoadsResult<()> {
    if let Some(last) = last
        && idx <= last
    {
        return Err(RoadsError::validation(format!(
            "frames must be pushed in increasing order ({} after {})",
            idx.0, last.0
        )));
    }
    Ok(())
}

/// Create the parent directory of `path` when it has one.
pub fn ensure_parent_dir(path: &Path) -> RoadsResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
