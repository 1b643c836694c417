use rayon::prelude::*;

use crate::foundation::error::{RoadsError, RoadsResult};
use crate::palette::Palette;
use crate::render::canvas::{Canvas, PixelSink};
use crate::render::context::ProjectedTrack;
use crate::render::frame::Frame;
use crate::render::raster::{GlowBrush, draw_line};

/// The animation clock runs 20% past completion so the last frames hold the finished trails.
pub const CLOCK_OVERSHOOT: f64 = 1.2;

/// Threading controls for multi-frame synthesis.
#[derive(Clone, Debug, Default)]
pub struct RenderThreading {
    /// Render frames on a rayon pool when `true`.
    pub parallel: bool,
    /// Optional explicit worker thread count.
    pub threads: Option<usize>,
}

/// Global progress threshold of frame `f` out of `frame_count`.
pub fn frame_clock(f: u32, frame_count: u32) -> f64 {
    CLOCK_OVERSHOOT * f64::from(f + 1) / f64::from(frame_count)
}

/// Draws comet-trail frames from projected tracks.
pub struct FrameSynthesizer<'a> {
    tracks: &'a [ProjectedTrack],
    palette: &'a Palette,
    width: u32,
    height: u32,
    frame_count: u32,
}

impl<'a> FrameSynthesizer<'a> {
    pub fn new(
        tracks: &'a [ProjectedTrack],
        palette: &'a Palette,
        width: u32,
        height: u32,
        frame_count: u32,
    ) -> RoadsResult<Self> {
        if width == 0 || height == 0 {
            return Err(RoadsError::canvas_size("canvas width/height must be > 0"));
        }
        if frame_count == 0 {
            return Err(RoadsError::canvas_size("frame count must be > 0"));
        }
        if tracks.is_empty() || tracks.iter().any(|t| t.points.is_empty()) {
            return Err(RoadsError::empty_input(
                "every rendered activity needs at least one point",
            ));
        }
        Ok(Self {
            tracks,
            palette,
            width,
            height,
            frame_count,
        })
    }

    pub fn frame_count(&self) -> u32 {
        self.frame_count
    }

    /// Synthesize frame `f` onto a fresh background canvas.
    pub fn synthesize_frame(&self, f: u32) -> Frame {
        let threshold = frame_clock(f, self.frame_count);
        let mut canvas = Canvas::new(self.width, self.height, self.palette.background_index());
        for track in self.tracks {
            self.draw_track(&mut canvas, track, threshold);
        }
        tracing::debug!(frame = f, threshold, "synthesized frame");
        canvas.into_frame()
    }

    fn draw_track(&self, canvas: &mut Canvas, track: &ProjectedTrack, threshold: f64) {
        let glow_limit = self.palette.glow_limit();
        let mut prev: Option<(i32, i32)> = None;
        for pt in &track.points {
            let age = threshold - pt.p;
            if age < 0.0 {
                // Points are time ordered; the rest of the track lies in the future.
                break;
            }
            let here = (pt.x, pt.y);
            if age > 1.0 || prev == Some(here) {
                prev = Some(here);
                continue;
            }

            let color = self.palette.ink_index(age);
            let mut brush = GlowBrush::new(canvas, color, glow_limit);
            match prev {
                Some(from) if (here.0 - from.0).abs() > 1 || (here.1 - from.1).abs() > 1 => {
                    draw_line(&mut brush, from, here);
                }
                _ => brush.plot(here.0, here.1),
            }
            prev = Some(here);
        }
    }

    /// Synthesize every frame in index order.
    #[tracing::instrument(skip(self), fields(frames = self.frame_count))]
    pub fn synthesize_all(&self, threading: &RenderThreading) -> RoadsResult<Vec<Frame>> {
        if !threading.parallel {
            return Ok((0..self.frame_count)
                .map(|f| self.synthesize_frame(f))
                .collect());
        }

        let pool = build_thread_pool(threading.threads)?;
        Ok(pool.install(|| {
            (0..self.frame_count)
                .into_par_iter()
                .map(|f| self.synthesize_frame(f))
                .collect()
        }))
    }
}

fn build_thread_pool(threads: Option<usize>) -> RoadsResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(RoadsError::validation(
            "render threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| RoadsError::validation(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/render/synth.rs"]
mod tests;
