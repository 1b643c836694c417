use image::RgbaImage;

use crate::foundation::error::{RoadsError, RoadsResult};
use crate::palette::Palette;
use crate::render::frame::Frame;

/// Accumulates delta frames into a full straight-alpha RGBA8 canvas, the way an animated-image
/// decoder with "keep previous frame" disposal does.
#[derive(Clone, Debug)]
pub struct Compositor {
    width: u32,
    height: u32,
    palette: Palette,
    rgba: Vec<u8>,
}

impl Compositor {
    pub fn new(width: u32, height: u32, palette: Palette) -> Self {
        Self {
            width,
            height,
            palette,
            rgba: vec![0; width as usize * height as usize * 4],
        }
    }

    /// Paint the non-transparent pixels inside `frame.bounds()` over the current canvas.
    pub fn apply(&mut self, frame: &Frame) -> RoadsResult<()> {
        if frame.width() != self.width || frame.height() != self.height {
            return Err(RoadsError::validation(format!(
                "frame is {}x{}, compositor is {}x{}",
                frame.width(),
                frame.height(),
                self.width,
                self.height
            )));
        }
        let transparent = self.palette.transparent_index();
        let b = frame.bounds();
        let w = self.width as usize;
        for y in b.y0..b.y1 {
            let row = y as usize * w;
            for x in b.x0..b.x1 {
                let i = row + x as usize;
                let idx = frame.pixels()[i];
                if idx == transparent {
                    continue;
                }
                self.rgba[i * 4..i * 4 + 4].copy_from_slice(&self.palette.color(idx).to_array());
            }
        }
        Ok(())
    }

    /// Tightly packed row-major RGBA8 bytes.
    pub fn rgba(&self) -> &[u8] {
        &self.rgba
    }

    pub fn to_image(&self) -> RoadsResult<RgbaImage> {
        RgbaImage::from_raw(self.width, self.height, self.rgba.clone())
            .ok_or_else(|| RoadsError::encode("compositor buffer does not match its dimensions"))
    }
}

/// Expand the `bounds` sub-region of `frame` into RGBA8, mapping the sentinel to alpha 0.
pub fn frame_region_rgba(frame: &Frame, palette: &Palette) -> RoadsResult<RgbaImage> {
    let b = frame.bounds();
    if b.is_empty() || b.x1 > frame.width() || b.y1 > frame.height() {
        return Err(RoadsError::encode(format!(
            "frame bounds {b:?} do not fit a {}x{} canvas",
            frame.width(),
            frame.height()
        )));
    }
    let w = frame.width() as usize;
    let mut out = Vec::with_capacity(b.width() as usize * b.height() as usize * 4);
    for y in b.y0..b.y1 {
        let row = &frame.pixels()[y as usize * w..(y as usize + 1) * w];
        for &idx in &row[b.x0 as usize..b.x1 as usize] {
            out.extend_from_slice(&palette.color(idx).to_array());
        }
    }
    RgbaImage::from_raw(b.width(), b.height(), out)
        .ok_or_else(|| RoadsError::encode("frame region buffer does not match its dimensions"))
}

#[cfg(test)]
#[path = "../../tests/unit/encode/composite.rs"]
mod tests;
