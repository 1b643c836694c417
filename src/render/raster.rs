use crate::render::canvas::{Canvas, PixelSink};

const ORTHOGONAL: [(i32, i32); 4] = [(-1, 0), (0, -1), (1, 0), (0, 1)];
const DIAGONAL: [(i32, i32); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// Integer Bresenham walk from `from` to `to`, both endpoints included.
pub fn draw_line<S: PixelSink + ?Sized>(sink: &mut S, from: (i32, i32), to: (i32, i32)) {
    let (mut x, mut y) = from;
    let (x1, y1) = to;
    let dx = (x1 - x).abs();
    let dy = -(y1 - y).abs();
    let sx = if x < x1 { 1 } else { -1 };
    let sy = if y < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        sink.plot(x, y);
        if x == x1 && y == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

/// Darkens plotted pixels with one ink index and spreads a two-ring falloff around every pixel
/// that actually changed.
///
/// The orthogonal ring receives double the index, the diagonal ring double again, each only while
/// the index is still below `glow_limit`.
pub struct GlowBrush<'a> {
    canvas: &'a mut Canvas,
    color: u8,
    glow_limit: u16,
}

impl<'a> GlowBrush<'a> {
    pub fn new(canvas: &'a mut Canvas, color: u8, glow_limit: u16) -> Self {
        Self {
            canvas,
            color,
            glow_limit,
        }
    }

    fn ring(&mut self, x: i32, y: i32, offsets: &[(i32, i32)], color: u16) {
        let color = color.min(u16::from(u8::MAX)) as u8;
        for &(ox, oy) in offsets {
            self.canvas.darken(x + ox, y + oy, color);
        }
    }
}

impl PixelSink for GlowBrush<'_> {
    fn plot(&mut self, x: i32, y: i32) {
        if !self.canvas.darken(x, y, self.color) {
            return;
        }
        let mut c = u16::from(self.color);
        if c < self.glow_limit {
            c *= 2;
            self.ring(x, y, &ORTHOGONAL, c);
        }
        if c < self.glow_limit {
            c *= 2;
            self.ring(x, y, &DIAGONAL, c);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
