//! Rectangle transfers that keep the colour and animation buffers in step.

use crate::{
    blitter::target::RenderTarget,
    colour::{palette::Palette, pixel::Colour},
    foundation::{
        core::Rect,
        error::{BlitError, BlitResult},
    },
};

/// Bytes per pixel in a region buffer: a 4-byte colour plus the animation byte.
pub const REGION_BYTES_PER_PIXEL: usize = 5;

/// Bytes needed to save a `width x height` region.
pub fn buffer_size(width: usize, height: usize) -> usize {
    REGION_BYTES_PER_PIXEL * width * height
}

/// Saved copy of a screen rectangle.
///
/// Per row: `width` colours (little-endian packed words) followed by that row's `width`
/// animation bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegionBuffer {
    width: usize,
    height: usize,
    bytes: Vec<u8>,
}

impl RegionBuffer {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// Copy `rect` out of the target into `dst`.
///
/// Without an animation buffer the animation bytes are written as zero.
pub fn copy_to_buffer(target: &RenderTarget<'_>, rect: Rect, dst: &mut [u8]) -> BlitResult<()> {
    target.check_rect(&rect, "copy")?;
    check_len(dst.len(), rect)?;

    let row_bytes = REGION_BYTES_PER_PIXEL * rect.width;
    for (y, out) in (rect.top..rect.bottom()).zip(dst.chunks_exact_mut(row_bytes.max(1))) {
        let start = target.offset(rect.left, y);
        let (px_out, anim_out) = out.split_at_mut(4 * rect.width);
        for (chunk, c) in px_out
            .chunks_exact_mut(4)
            .zip(&target.colour()[start..start + rect.width])
        {
            chunk.copy_from_slice(&c.to_le_bytes());
        }
        match target.anim() {
            Some(anim) => anim_out.copy_from_slice(&anim[start..start + rect.width]),
            None => anim_out.fill(0),
        }
    }
    Ok(())
}

/// Write a buffer produced by [`copy_to_buffer`] back into `rect`.
///
/// Without an animation buffer the animation bytes are ignored.
pub fn copy_from_buffer(target: &mut RenderTarget<'_>, rect: Rect, src: &[u8]) -> BlitResult<()> {
    target.check_rect(&rect, "copy")?;
    check_len(src.len(), rect)?;

    let row_bytes = REGION_BYTES_PER_PIXEL * rect.width;
    let (colour, mut anim, pitch) = target.parts_mut();
    for (y, row) in (rect.top..rect.bottom()).zip(src.chunks_exact(row_bytes.max(1))) {
        let start = y * pitch + rect.left;
        let (px_in, anim_in) = row.split_at(4 * rect.width);
        for (c, chunk) in colour[start..start + rect.width]
            .iter_mut()
            .zip(px_in.chunks_exact(4))
        {
            *c = Colour::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        }
        if let Some(anim) = anim.as_deref_mut() {
            anim[start..start + rect.width].copy_from_slice(anim_in);
        }
    }
    Ok(())
}

/// Save `rect` so transient overlays can later be erased with [`restore_region`].
#[tracing::instrument(level = "trace", skip(target))]
pub fn capture_region(target: &RenderTarget<'_>, rect: Rect) -> BlitResult<RegionBuffer> {
    target.check_rect(&rect, "capture")?;
    let mut bytes = vec![0u8; buffer_size(rect.width, rect.height)];
    copy_to_buffer(target, rect, &mut bytes)?;
    Ok(RegionBuffer {
        width: rect.width,
        height: rect.height,
        bytes,
    })
}

/// Put a captured region back with its top-left corner at `(left, top)`.
#[tracing::instrument(level = "trace", skip(target, saved), fields(w = saved.width, h = saved.height))]
pub fn restore_region(
    target: &mut RenderTarget<'_>,
    saved: &RegionBuffer,
    left: usize,
    top: usize,
) -> BlitResult<()> {
    let rect = Rect::new(left, top, saved.width, saved.height);
    copy_from_buffer(target, rect, &saved.bytes)
}

/// Shift the content of `rect` by `(dx, dy)` inside the target.
///
/// The animation buffer moves first, then the colour buffer, with identical geometry.
/// Returns the rectangle that received moved pixels, or `None` when the shift moves
/// everything out of `rect`. Strips exposed by the shift keep stale content and must be
/// redrawn by the caller.
#[tracing::instrument(level = "trace", skip(target))]
pub fn scroll_region(
    target: &mut RenderTarget<'_>,
    rect: Rect,
    dx: i64,
    dy: i64,
) -> BlitResult<Option<Rect>> {
    target.check_rect(&rect, "scroll")?;
    let Some(window) = ScrollWindow::new(rect, dx, dy) else {
        return Ok(None);
    };

    let (colour, anim, pitch) = target.parts_mut();
    if let Some(anim) = anim {
        window.apply(anim, pitch);
    }
    window.apply(colour, pitch);
    Ok(Some(window.dst))
}

/// Source and destination of a scroll, both `dst.width x dst.height`.
#[derive(Clone, Copy, Debug)]
struct ScrollWindow {
    src_left: usize,
    src_top: usize,
    dst: Rect,
    bottom_up: bool,
}

impl ScrollWindow {
    fn new(rect: Rect, dx: i64, dy: i64) -> Option<Self> {
        let ax = usize::try_from(dx.unsigned_abs()).ok()?;
        let ay = usize::try_from(dy.unsigned_abs()).ok()?;
        if ax >= rect.width || ay >= rect.height {
            return None;
        }
        let (src_left, dst_left) = if dx >= 0 {
            (rect.left, rect.left + ax)
        } else {
            (rect.left + ax, rect.left)
        };
        let (src_top, dst_top) = if dy >= 0 {
            (rect.top, rect.top + ay)
        } else {
            (rect.top + ay, rect.top)
        };
        Some(Self {
            src_left,
            src_top,
            dst: Rect::new(dst_left, dst_top, rect.width - ax, rect.height - ay),
            // Moving down overwrites rows we still need unless we start at the bottom.
            bottom_up: dy > 0,
        })
    }

    fn apply<T: Copy>(&self, buf: &mut [T], pitch: usize) {
        let w = self.dst.width;
        let row = |r: usize| {
            let src = (self.src_top + r) * pitch + self.src_left;
            let dst = (self.dst.top + r) * pitch + self.dst.left;
            (src, dst)
        };
        if self.bottom_up {
            for r in (0..self.dst.height).rev() {
                let (src, dst) = row(r);
                buf.copy_within(src..src + w, dst);
            }
        } else {
            for r in 0..self.dst.height {
                let (src, dst) = row(r);
                buf.copy_within(src..src + w, dst);
            }
        }
    }
}

/// Copy `rect` into a plain colour buffer.
///
/// With a palette, animated pixels are realized through it. Without one the colour buffer
/// is copied as is, which is what the screen shows when animation is off.
pub fn copy_image_to_buffer(
    target: &RenderTarget<'_>,
    palette: Option<&Palette>,
    rect: Rect,
    dst: &mut [Colour],
    dst_pitch: usize,
) -> BlitResult<()> {
    target.check_rect(&rect, "image copy")?;
    let needed = match rect.height {
        0 => Some(0),
        h => (h - 1)
            .checked_mul(dst_pitch)
            .and_then(|n| n.checked_add(rect.width)),
    };
    if dst_pitch < rect.width || needed.is_none_or(|n| dst.len() < n) {
        return Err(BlitError::region(format!(
            "destination of {} pixels at pitch {dst_pitch} cannot hold {}x{}",
            dst.len(),
            rect.width,
            rect.height
        )));
    }
    copy_image_rows(target, palette, rect, dst, dst_pitch);
    Ok(())
}

/// The whole target as the colours currently visible on screen.
pub fn realize_image(target: &RenderTarget<'_>, palette: Option<&Palette>) -> Vec<Colour> {
    let mut out = vec![Colour::BLACK; target.width() * target.height()];
    copy_image_rows(target, palette, target.bounds(), &mut out, target.width());
    out
}

fn copy_image_rows(
    target: &RenderTarget<'_>,
    palette: Option<&Palette>,
    rect: Rect,
    dst: &mut [Colour],
    dst_pitch: usize,
) {
    for (r, y) in (rect.top..rect.bottom()).enumerate() {
        let start = target.offset(rect.left, y);
        let out = &mut dst[r * dst_pitch..r * dst_pitch + rect.width];
        let src = &target.colour()[start..start + rect.width];
        match (target.anim(), palette) {
            (Some(anim), Some(palette)) => {
                for ((o, c), a) in out.iter_mut().zip(src).zip(&anim[start..start + rect.width]) {
                    *o = palette.realize(*a, *c);
                }
            }
            _ => out.copy_from_slice(src),
        }
    }
}

fn check_len(len: usize, rect: Rect) -> BlitResult<()> {
    let needed = buffer_size(rect.width, rect.height);
    if len != needed {
        return Err(BlitError::region(format!(
            "region buffer has {len} bytes, {}x{} needs {needed}",
            rect.width, rect.height
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/blitter/region.rs"]
mod tests;
