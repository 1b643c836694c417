use std::borrow::Cow;
use std::fs::File;
use std::io::{BufWriter, Write as _};
use std::path::PathBuf;

use gif::{DisposalMethod, Encoder, Repeat};

use crate::encode::sink::{FrameSink, SinkConfig, check_order, ensure_parent_dir};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{RoadsError, RoadsResult};
use crate::palette::Palette;
use crate::render::frame::Frame;

/// Options for [`GifSink`].
#[derive(Clone, Debug)]
pub struct GifSinkOpts {
    /// Output GIF path.
    pub out_path: PathBuf,
    /// Overwrite output file if it already exists.
    pub overwrite: bool,
}

impl GifSinkOpts {
    /// Create options for writing a GIF to `out_path`.
    pub fn new(out_path: impl Into<PathBuf>) -> Self {
        Self {
            out_path: out_path.into(),
            overwrite: true,
        }
    }
}

/// Writes an infinitely looping animated GIF.
///
/// The palette becomes the global color table and frames are written as raw indices. Each frame
/// contributes only its bounds sub-image, placed at the bounds origin and kept on screen for the
/// next frame; sentinel pixels are transparent so the previous frame shows through.
pub struct GifSink {
    opts: GifSinkOpts,
    encoder: Option<Encoder<BufWriter<File>>>,
    cfg: Option<SinkConfig>,
    last_idx: Option<FrameIndex>,
}

impl GifSink {
    pub fn new(opts: GifSinkOpts) -> Self {
        Self {
            opts,
            encoder: None,
            cfg: None,
            last_idx: None,
        }
    }
}

impl FrameSink for GifSink {
    fn begin(&mut self, cfg: SinkConfig) -> RoadsResult<()> {
        cfg.validate()?;
        if cfg.width > u32::from(u16::MAX) || cfg.height > u32::from(u16::MAX) {
            return Err(RoadsError::canvas_size(format!(
                "gif canvas {}x{} exceeds 65535x65535",
                cfg.width, cfg.height
            )));
        }
        ensure_parent_dir(&self.opts.out_path)?;
        if !self.opts.overwrite && self.opts.out_path.exists() {
            return Err(RoadsError::validation(format!(
                "output file \"{}\" already exists",
                self.opts.out_path.display()
            )));
        }

        let file = File::create(&self.opts.out_path)?;
        let mut encoder = Encoder::new(
            BufWriter::new(file),
            cfg.width as u16,
            cfg.height as u16,
            &global_color_table(&cfg.palette),
        )
        .map_err(|e| RoadsError::encode(format!("gif header: {e}")))?;
        encoder
            .set_repeat(Repeat::Infinite)
            .map_err(|e| RoadsError::encode(format!("gif repeat: {e}")))?;

        self.encoder = Some(encoder);
        self.cfg = Some(cfg);
        self.last_idx = None;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &Frame) -> RoadsResult<()> {
        let (Some(encoder), Some(cfg)) = (self.encoder.as_mut(), self.cfg.as_ref()) else {
            return Err(RoadsError::encode("gif sink used before begin()"));
        };
        check_order(self.last_idx, idx)?;
        if frame.width() != cfg.width || frame.height() != cfg.height {
            return Err(RoadsError::validation(format!(
                "frame {} is {}x{}, gif canvas is {}x{}",
                idx.0,
                frame.width(),
                frame.height(),
                cfg.width,
                cfg.height
            )));
        }

        let b = frame.bounds();
        let gif_frame = gif::Frame {
            left: b.x0 as u16,
            top: b.y0 as u16,
            width: b.width() as u16,
            height: b.height() as u16,
            buffer: Cow::Owned(region_indices(frame)?),
            delay: delay_centis(cfg.frame_delay_ms),
            dispose: DisposalMethod::Keep,
            transparent: Some(cfg.palette.transparent_index()),
            ..gif::Frame::default()
        };
        encoder
            .write_frame(&gif_frame)
            .map_err(|e| RoadsError::encode(format!("gif frame {}: {e}", idx.0)))?;
        self.last_idx = Some(idx);
        Ok(())
    }

    fn end(&mut self) -> RoadsResult<()> {
        let Some(encoder) = self.encoder.take() else {
            return Err(RoadsError::encode("gif sink ended before begin()"));
        };
        encoder
            .into_inner()
            .map_err(|e| RoadsError::encode(format!("gif trailer: {e}")))?
            .flush()?;
        tracing::info!(path = %self.opts.out_path.display(), "wrote gif");
        Ok(())
    }
}

/// Flat `[r, g, b, ...]` table; GIF has no alpha, the sentinel is flagged per frame instead.
fn global_color_table(palette: &Palette) -> Vec<u8> {
    palette
        .colors()
        .iter()
        .flat_map(|c| [c.r, c.g, c.b])
        .collect()
}

/// Row-major palette indices inside `frame.bounds()`.
fn region_indices(frame: &Frame) -> RoadsResult<Vec<u8>> {
    let b = frame.bounds();
    if b.is_empty() || b.x1 > frame.width() || b.y1 > frame.height() {
        return Err(RoadsError::encode(format!(
            "frame bounds {b:?} do not fit a {}x{} canvas",
            frame.width(),
            frame.height()
        )));
    }
    let w = frame.width() as usize;
    let mut out = Vec::with_capacity(b.width() as usize * b.height() as usize);
    for y in b.y0..b.y1 {
        let row = y as usize * w;
        out.extend_from_slice(&frame.pixels()[row + b.x0 as usize..row + b.x1 as usize]);
    }
    Ok(out)
}

/// GIF delays count hundredths of a second.
fn delay_centis(ms: u32) -> u16 {
    (ms / 10).min(u32::from(u16::MAX)) as u16
}

#[cfg(test)]
#[path = "../../tests/unit/encode/gif.rs"]
mod tests;
