use crate::foundation::core::PixelRect;
use crate::foundation::error::{RoadsError, RoadsResult};
use crate::render::frame::Frame;

/// Collapse every frame after the first into a delta against its predecessor.
///
/// Pixels equal to the predecessor's *original* value become `transparent`; the frame bounds
/// shrink to the tightest rectangle around the remaining changes, or to a 1x1 placeholder at the
/// origin when nothing changed. Buffers are never cropped. Frame 0 is left as is.
///
/// This must run exactly once per sequence: a second pass would compare against sentinel data,
/// so it is rejected with [`RoadsError::Validation`].
#[tracing::instrument(skip(frames), fields(frames = frames.len()))]
pub fn optimize_frames(frames: &mut [Frame], transparent: u8) -> RoadsResult<()> {
    if frames.iter().any(Frame::is_optimized) {
        return Err(RoadsError::validation(
            "frame sequence has already been delta optimized",
        ));
    }
    let Some((first, rest)) = frames.split_first_mut() else {
        return Ok(());
    };
    let (width, height) = (first.width(), first.height());
    if rest
        .iter()
        .any(|f| f.width() != width || f.height() != height)
    {
        return Err(RoadsError::validation(
            "all frames must share the same dimensions",
        ));
    }

    // Original pixels of the previous frame, refreshed in place as each frame is rewritten.
    let mut prev = first.pixels().to_vec();
    first.mark_optimized();

    let w = width as usize;
    for (i, frame) in rest.iter_mut().enumerate() {
        let mut changed: Option<PixelRect> = None;
        for (offset, (cur, old)) in frame.pixels_mut().iter_mut().zip(&mut prev).enumerate() {
            if *cur == *old {
                *cur = transparent;
                continue;
            }
            *old = *cur;
            let (x, y) = ((offset % w) as u32, (offset / w) as u32);
            changed = Some(match changed {
                None => PixelRect::new(x, y, x + 1, y + 1),
                Some(r) => PixelRect::new(r.x0.min(x), r.y0.min(y), r.x1.max(x + 1), r.y1.max(y + 1)),
            });
        }

        let bounds = changed.unwrap_or(PixelRect::new(0, 0, 1, 1));
        tracing::debug!(
            frame = i + 1,
            x0 = bounds.x0,
            y0 = bounds.y0,
            x1 = bounds.x1,
            y1 = bounds.y1,
            "optimized frame"
        );
        frame.set_bounds(bounds);
        frame.mark_optimized();
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/delta.rs"]
mod tests;
