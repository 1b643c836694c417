use crate::foundation::core::PixelRect;
use crate::foundation::error::{RoadsError, RoadsResult};

/// One finished animation frame of palette indices.
///
/// The pixel buffer always covers the whole canvas. `bounds` names the sub-region a consumer must
/// read; after delta optimization pixels outside it carry no meaning.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    width: u32,
    height: u32,
    pix: Vec<u8>,
    bounds: PixelRect,
    optimized: bool,
}

impl Frame {
    pub(crate) fn full(width: u32, height: u32, pix: Vec<u8>) -> Self {
        Self {
            width,
            height,
            pix,
            bounds: PixelRect::full(width, height),
            optimized: false,
        }
    }

    /// Wrap a row-major index buffer as an unoptimized full-canvas frame.
    pub fn from_pixels(width: u32, height: u32, pix: Vec<u8>) -> RoadsResult<Self> {
        if width == 0 || height == 0 {
            return Err(RoadsError::canvas_size("frame width/height must be > 0"));
        }
        if pix.len() != width as usize * height as usize {
            return Err(RoadsError::validation(format!(
                "frame buffer holds {} pixels, expected {}x{}",
                pix.len(),
                width,
                height
            )));
        }
        Ok(Self::full(width, height, pix))
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn bounds(&self) -> PixelRect {
        self.bounds
    }

    /// Row-major palette indices for the whole canvas.
    pub fn pixels(&self) -> &[u8] {
        &self.pix
    }

    /// Palette index at `(x, y)`, or `None` outside the canvas.
    pub fn index_at(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pix[y as usize * self.width as usize + x as usize])
    }

    /// Whether the delta optimizer has already processed this frame.
    pub fn is_optimized(&self) -> bool {
        self.optimized
    }

    pub(crate) fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.pix
    }

    pub(crate) fn set_bounds(&mut self, bounds: PixelRect) {
        self.bounds = bounds;
    }

    pub(crate) fn mark_optimized(&mut self) {
        self.optimized = true;
    }
}
