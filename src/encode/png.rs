use std::path::PathBuf;

use crate::encode::composite::Compositor;
use crate::encode::sink::{FrameSink, SinkConfig, check_order};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{RoadsError, RoadsResult};
use crate::render::frame::Frame;

/// Writes every frame as a full, composited PNG (`00000.png`, `00001.png`, ...) into a directory.
pub struct PngSequenceSink {
    dir: PathBuf,
    compositor: Option<Compositor>,
    last_idx: Option<FrameIndex>,
    written: usize,
}

impl PngSequenceSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            compositor: None,
            last_idx: None,
            written: 0,
        }
    }

    pub fn frame_path(&self, idx: FrameIndex) -> PathBuf {
        self.dir.join(format!("{:05}.png", idx.0))
    }
}

impl FrameSink for PngSequenceSink {
    fn begin(&mut self, cfg: SinkConfig) -> RoadsResult<()> {
        cfg.validate()?;
        std::fs::create_dir_all(&self.dir)?;
        self.compositor = Some(Compositor::new(cfg.width, cfg.height, cfg.palette));
        self.last_idx = None;
        self.written = 0;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &Frame) -> RoadsResult<()> {
        check_order(self.last_idx, idx)?;
        let path = self.frame_path(idx);
        let Some(compositor) = self.compositor.as_mut() else {
            return Err(RoadsError::encode("png sink used before begin()"));
        };
        compositor.apply(frame)?;
        compositor
            .to_image()?
            .save_with_format(&path, image::ImageFormat::Png)
            .map_err(|e| RoadsError::encode(format!("write png '{}': {e}", path.display())))?;
        self.last_idx = Some(idx);
        self.written += 1;
        Ok(())
    }

    fn end(&mut self) -> RoadsResult<()> {
        if self.compositor.take().is_none() {
            return Err(RoadsError::encode("png sink ended before begin()"));
        }
        tracing::info!(dir = %self.dir.display(), frames = self.written, "wrote png sequence");
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/png.rs"]
mod tests;
