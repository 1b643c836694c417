use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{RoadsError, RoadsResult};
use crate::palette::Palette;
use crate::render::context::RenderContext;
use crate::render::delta::optimize_frames;
use crate::render::frame::Frame;
use crate::render::synth::{FrameSynthesizer, RenderThreading};
use crate::track::model::Activity;

/// Default display time of one frame, in milliseconds.
pub const DEFAULT_FRAME_DELAY_MS: u32 = 40;

/// Options for [`render_activities`].
#[derive(Clone, Debug)]
pub struct RenderOpts {
    /// Output canvas width in pixels; the height follows from the activities' aspect ratio.
    pub width: u32,
    /// Number of frames in the animation.
    pub frames: u32,
    /// Frame synthesis threading.
    pub threading: RenderThreading,
}

impl Default for RenderOpts {
    fn default() -> Self {
        Self {
            width: 500,
            frames: 100,
            threading: RenderThreading::default(),
        }
    }
}

/// A finished animation: the first frame is full, every later frame is a delta.
#[derive(Clone, Debug)]
pub struct FrameSequence {
    pub width: u32,
    pub height: u32,
    pub frames: Vec<Frame>,
    pub palette: Palette,
}

impl FrameSequence {
    pub fn transparent_index(&self) -> u8 {
        self.palette.transparent_index()
    }
}

/// Fit, project and synthesize full (non-delta) frames for `activities`.
#[tracing::instrument(skip_all, fields(activities = activities.len(), width = opts.width, frames = opts.frames))]
pub fn render_raw_frames(
    activities: &[Activity],
    palette: &Palette,
    opts: &RenderOpts,
) -> RoadsResult<FrameSequence> {
    if opts.width == 0 {
        return Err(RoadsError::canvas_size("width must be > 0"));
    }
    if opts.frames == 0 {
        return Err(RoadsError::canvas_size("frame count must be > 0"));
    }
    if activities.is_empty() {
        return Err(RoadsError::empty_input("no activities to render"));
    }

    let ctx = RenderContext::new(activities, opts.width)?;
    tracing::debug!(
        width = ctx.width(),
        height = ctx.height(),
        scale = ctx.scale(),
        "fitted canvas"
    );
    let tracks = ctx.project_all(activities);
    let synth = FrameSynthesizer::new(&tracks, palette, ctx.width(), ctx.height(), opts.frames)?;
    let frames = synth.synthesize_all(&opts.threading)?;

    Ok(FrameSequence {
        width: ctx.width(),
        height: ctx.height(),
        frames,
        palette: palette.clone(),
    })
}

/// Render `activities` into a delta-optimized frame sequence.
pub fn render_activities(
    activities: &[Activity],
    palette: &Palette,
    opts: &RenderOpts,
) -> RoadsResult<FrameSequence> {
    let mut seq = render_raw_frames(activities, palette, opts)?;
    let transparent = seq.transparent_index();
    optimize_frames(&mut seq.frames, transparent)?;
    tracing::info!(
        width = seq.width,
        height = seq.height,
        frames = seq.frames.len(),
        "rendered animation"
    );
    Ok(seq)
}

/// Stream `seq` into `sink` in frame order.
pub fn render_to_sink(
    seq: &FrameSequence,
    sink: &mut dyn FrameSink,
    frame_delay_ms: u32,
) -> RoadsResult<()> {
    sink.begin(SinkConfig {
        width: seq.width,
        height: seq.height,
        palette: seq.palette.clone(),
        frame_delay_ms,
    })?;
    for (i, frame) in seq.frames.iter().enumerate() {
        sink.push_frame(FrameIndex(i as u64), frame)?;
    }
    sink.end()
}

#[cfg(test)]
#[path = "../tests/unit/pipeline.rs"]
mod tests;
