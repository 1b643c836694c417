use super::*;

#[derive(Default)]
struct Recorder(Vec<(i32, i32)>);

impl PixelSink for Recorder {
    fn plot(&mut self, x: i32, y: i32) {
        self.0.push((x, y));
    }
}

fn line(from: (i32, i32), to: (i32, i32)) -> Vec<(i32, i32)> {
    let mut r = Recorder::default();
    draw_line(&mut r, from, to);
    r.0
}

#[test]
fn horizontal_and_vertical_lines_include_endpoints() {
    assert_eq!(line((0, 0), (3, 0)), vec![(0, 0), (1, 0), (2, 0), (3, 0)]);
    assert_eq!(line((2, 3), (2, 0)), vec![(2, 3), (2, 2), (2, 1), (2, 0)]);
    assert_eq!(line((5, 5), (5, 5)), vec![(5, 5)]);
}

#[test]
fn diagonal_and_shallow_lines_are_connected() {
    assert_eq!(line((0, 0), (3, 3)), vec![(0, 0), (1, 1), (2, 2), (3, 3)]);

    for (from, to) in [((0, 0), (7, 2)), ((7, 2), (0, 0)), ((-3, 4), (2, -6))] {
        let pts = line(from, to);
        assert_eq!(pts.first(), Some(&from));
        assert_eq!(pts.last(), Some(&to));
        let steps = (to.0 - from.0).abs().max((to.1 - from.1).abs()) as usize;
        assert_eq!(pts.len(), steps + 1);
        for w in pts.windows(2) {
            assert!((w[1].0 - w[0].0).abs() <= 1 && (w[1].1 - w[0].1).abs() <= 1);
        }
    }
}

#[test]
fn vivid_pixels_glow_on_both_rings() {
    let mut canvas = Canvas::new(5, 5, 254);
    GlowBrush::new(&mut canvas, 10, 127).plot(2, 2);
    assert_eq!(canvas.index_at(2, 2), Some(10));
    for (x, y) in [(1, 2), (3, 2), (2, 1), (2, 3)] {
        assert_eq!(canvas.index_at(x, y), Some(20));
    }
    for (x, y) in [(1, 1), (3, 1), (1, 3), (3, 3)] {
        assert_eq!(canvas.index_at(x, y), Some(40));
    }
    assert_eq!(canvas.index_at(0, 0), Some(254));
}

#[test]
fn mid_intensity_glows_only_orthogonally() {
    let mut canvas = Canvas::new(3, 3, 254);
    GlowBrush::new(&mut canvas, 100, 127).plot(1, 1);
    assert_eq!(canvas.index_at(1, 0), Some(200));
    assert_eq!(canvas.index_at(0, 0), Some(254));
}

#[test]
fn faint_pixels_do_not_glow() {
    let mut canvas = Canvas::new(3, 3, 254);
    GlowBrush::new(&mut canvas, 127, 127).plot(1, 1);
    assert_eq!(canvas.index_at(1, 1), Some(127));
    assert_eq!(canvas.index_at(1, 0), Some(254));
}

#[test]
fn default_palette_glows_up_to_index_127() {
    let pal = crate::palette::ColorScheme::default()
        .palette(crate::palette::DEFAULT_LEVELS)
        .unwrap();
    // Start above every ink so each ring write is observable.
    let mut canvas = Canvas::new(3, 3, u8::MAX);
    GlowBrush::new(&mut canvas, 127, pal.glow_limit()).plot(1, 1);
    assert_eq!(canvas.index_at(1, 0), Some(254));
    assert_eq!(canvas.index_at(0, 0), Some(u8::MAX));

    let mut canvas = Canvas::new(3, 3, u8::MAX);
    GlowBrush::new(&mut canvas, 128, pal.glow_limit()).plot(1, 1);
    assert_eq!(canvas.index_at(1, 1), Some(128));
    assert_eq!(canvas.index_at(1, 0), Some(u8::MAX));
}

#[test]
fn glow_never_dulls_brighter_ink() {
    let mut canvas = Canvas::new(3, 3, 254);
    canvas.darken(1, 0, 5);
    GlowBrush::new(&mut canvas, 10, 127).plot(1, 1);
    assert_eq!(canvas.index_at(1, 0), Some(5));
}

#[test]
fn no_glow_when_pixel_was_not_darkened() {
    let mut canvas = Canvas::new(3, 3, 254);
    canvas.darken(1, 1, 3);
    GlowBrush::new(&mut canvas, 10, 127).plot(1, 1);
    assert_eq!(canvas.index_at(0, 1), Some(254));
}

#[test]
fn glow_is_clipped_at_canvas_edges() {
    let mut canvas = Canvas::new(2, 2, 254);
    GlowBrush::new(&mut canvas, 0, 127).plot(0, 0);
    assert_eq!(canvas.index_at(0, 0), Some(0));
    assert_eq!(canvas.index_at(1, 0), Some(0));
    assert_eq!(canvas.index_at(1, 1), Some(0));
}
