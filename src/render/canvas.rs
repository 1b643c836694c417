use crate::render::frame::Frame;

/// Receives the pixels produced by a rasterizer.
pub trait PixelSink {
    /// Consider writing at `(x, y)`; coordinates may fall outside the target.
    fn plot(&mut self, x: i32, y: i32);
}

/// A palette-indexed pixel grid with an only-darken update rule.
///
/// Lower indices are more vivid, so a pixel only ever moves towards index 0 while a frame is
/// being drawn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Canvas {
    width: u32,
    height: u32,
    pix: Vec<u8>,
}

impl Canvas {
    pub fn new(width: u32, height: u32, background: u8) -> Self {
        Self {
            width,
            height,
            pix: vec![background; width as usize * height as usize],
        }
    }

    fn offset(&self, x: i32, y: i32) -> Option<usize> {
        let (x, y) = (u32::try_from(x).ok()?, u32::try_from(y).ok()?);
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    pub fn index_at(&self, x: i32, y: i32) -> Option<u8> {
        self.offset(x, y).map(|i| self.pix[i])
    }

    /// Write `index` at `(x, y)` if it is strictly lower than the current value.
    ///
    /// Returns `false` for out-of-bounds positions and for writes that would not darken.
    pub fn darken(&mut self, x: i32, y: i32, index: u8) -> bool {
        match self.offset(x, y) {
            Some(i) if index < self.pix[i] => {
                self.pix[i] = index;
                true
            }
            _ => false,
        }
    }

    pub fn into_frame(self) -> Frame {
        Frame::full(self.width, self.height, self.pix)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/canvas.rs"]
mod tests;
