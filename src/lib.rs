//! rainbow-roads renders collections of geo-tagged activity tracks as animated "comet trail"
//! frame sequences.
//!
//! The pipeline is:
//!
//! - Load [`Activity`] tracks ([`load_activities`]) and narrow them with an [`ActivityFilter`]
//! - Sample a [`ColorScheme`] into a [`Palette`]
//! - [`render_activities`] fits a canvas, synthesizes every frame and delta-optimizes the sequence
//! - Stream the resulting [`FrameSequence`] into a [`FrameSink`] ([`GifSink`], [`PngSequenceSink`])
#![forbid(unsafe_code)]

mod foundation;

/// Output sinks.
pub mod encode;
pub(crate) mod palette;
pub(crate) mod pipeline;
pub(crate) mod render;
pub(crate) mod track;

pub use crate::foundation::core::{FrameIndex, GeoPoint, PixelRect, Point, Rect, Rgba8};
pub use crate::foundation::error::{RoadsError, RoadsResult};

pub use crate::encode::composite::{Compositor, frame_region_rgba};
pub use crate::encode::gif::{GifSink, GifSinkOpts};
pub use crate::encode::png::PngSequenceSink;
pub use crate::encode::sink::{FrameSink, InMemorySink, SinkConfig};
pub use crate::palette::{ColorScheme, DEFAULT_COLOR_SCHEME, DEFAULT_LEVELS, Palette, parse_color};
pub use crate::pipeline::{
    DEFAULT_FRAME_DELAY_MS, FrameSequence, RenderOpts, render_activities, render_raw_frames,
    render_to_sink,
};
pub use crate::render::context::{MAX_CANVAS_HEIGHT, ProjectedPoint, ProjectedTrack, RenderContext};
pub use crate::render::delta::optimize_frames;
pub use crate::render::frame::Frame;
pub use crate::render::synth::{CLOCK_OVERSHOOT, FrameSynthesizer, RenderThreading, frame_clock};
pub use crate::track::filter::{ActivityFilter, Region, parse_date, parse_distance, parse_duration};
pub use crate::track::input::{LoadReport, load_activities, parse_track_json};
pub use crate::track::model::{Activity, TrackPoint};
pub use crate::track::summary::{ActivitySummary, period_parts};
