//! Non-sprite drawing: single pixels, filled rectangles, lines and colour-mapping
//! rectangles.
//!
//! With an animation buffer a palette index is stored there and the colour buffer gets
//! a black carrier (default brightness). Without one the palette colour is written.

use crate::{
    blitter::{params::RemapTable, target::RenderTarget},
    colour::{
        compose::{colour_brightness, make_grey, make_transparent},
        palette::Palette,
        pixel::Colour,
    },
    foundation::core::Rect,
};

/// Recolouring applied by [`draw_colour_mapping_rect`].
#[derive(Clone, Copy, Debug)]
pub enum ColourMapping<'a> {
    /// Darken to 154/256 brightness.
    Transparent,
    /// Grey static pixels, remap animated ones.
    Newspaper(&'a RemapTable),
    /// Remap animated pixels only.
    Recolour(&'a RemapTable),
}

#[inline]
fn put(
    colour: &mut [Colour],
    anim: Option<&mut [u8]>,
    at: usize,
    index: u8,
    palette: &Palette,
) {
    match anim {
        Some(anim) => {
            colour[at] = Colour::BLACK;
            anim[at] = index;
        }
        None => colour[at] = palette.lookup(index),
    }
}

pub(crate) fn set_pixel(
    target: &mut RenderTarget<'_>,
    x: usize,
    y: usize,
    index: u8,
    palette: &Palette,
    animated: bool,
) {
    let at = target.offset(x, y);
    let (colour, anim, _) = target.parts_mut();
    put(colour, anim.filter(|_| animated), at, index, palette);
}

pub(crate) fn draw_rect(
    target: &mut RenderTarget<'_>,
    rect: Rect,
    index: u8,
    palette: &Palette,
    animated: bool,
) {
    let (colour, anim, pitch) = target.parts_mut();
    let mut anim = anim.filter(|_| animated);
    for y in rect.top..rect.bottom() {
        let row = y * pitch + rect.left..y * pitch + rect.right();
        match anim.as_deref_mut() {
            Some(anim) => {
                colour[row.clone()].fill(Colour::BLACK);
                anim[row].fill(index);
            }
            None => colour[row].fill(palette.lookup(index)),
        }
    }
}

/// Stroke of [`draw_line`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LineStyle {
    /// Thickness in pixels across the major axis; 0 draws like 1.
    pub width: usize,
    /// Length of the drawn and skipped segments; 0 draws a solid line.
    pub dash: usize,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self { width: 1, dash: 0 }
    }
}

/// Line from `from` to `to` stepped along its major axis, clipped to the target.
///
/// Only steps that can touch the target are walked, so far-away endpoints cost nothing
/// extra. Dash phase is counted from `from` whatever the clipping.
pub(crate) fn draw_line(
    target: &mut RenderTarget<'_>,
    from: (i64, i64),
    to: (i64, i64),
    index: u8,
    style: LineStyle,
    palette: &Palette,
    animated: bool,
) {
    let bounds = target.bounds();
    let (colour, anim, pitch) = target.parts_mut();
    let mut anim = anim.filter(|_| animated);

    let line = LineWalk::new(from, to);
    let width = style.width.max(1) as i64;
    let (below, above) = ((width - 1) / 2, width / 2);
    let (major_limit, minor_limit) = if line.steep {
        (bounds.height as i64, bounds.width as i64)
    } else {
        (bounds.width as i64, bounds.height as i64)
    };
    let Some((first, last)) = line.visible_steps(major_limit, -above, minor_limit - 1 + below)
    else {
        return;
    };

    for t in first..=last {
        if style.dash != 0 && (t as u64 / style.dash as u64) % 2 == 1 {
            continue;
        }
        let (major, minor) = line.point(t);
        for k in -below..=above {
            let (x, y) = if line.steep {
                (minor + k, major)
            } else {
                (major, minor + k)
            };
            if x >= 0 && y >= 0 && bounds.contains(x as usize, y as usize) {
                put(colour, anim.as_deref_mut(), y as usize * pitch + x as usize, index, palette);
            }
        }
    }
}

/// A line in major/minor axis form: step `t` is one pixel along the major axis and the
/// minor axis follows `round(t * d_minor / d_major)`, halves rounding up.
#[derive(Clone, Copy, Debug)]
struct LineWalk {
    steep: bool,
    major0: i64,
    minor0: i64,
    s_major: i64,
    s_minor: i64,
    d_major: i64,
    d_minor: i64,
}

impl LineWalk {
    fn new(from: (i64, i64), to: (i64, i64)) -> Self {
        let (dx, dy) = (to.0 - from.0, to.1 - from.1);
        let steep = dy.abs() > dx.abs();
        let ((major0, minor0), (d_major, d_minor)) = if steep {
            ((from.1, from.0), (dy, dx))
        } else {
            ((from.0, from.1), (dx, dy))
        };
        Self {
            steep,
            major0,
            minor0,
            s_major: d_major.signum(),
            s_minor: d_minor.signum(),
            d_major: d_major.abs(),
            d_minor: d_minor.abs(),
        }
    }

    fn minor_offset(&self, t: i64) -> i64 {
        if self.d_major == 0 {
            return 0;
        }
        let (dm, dj) = (i128::from(self.d_minor), i128::from(self.d_major));
        ((2 * i128::from(t) * dm + dj) / (2 * dj)) as i64
    }

    /// `(major, minor)` coordinates of step `t`.
    fn point(&self, t: i64) -> (i64, i64) {
        (
            self.major0 + self.s_major * t,
            self.minor0 + self.s_minor * self.minor_offset(t),
        )
    }

    /// Steps whose major coordinate lies in `0..major_limit` and whose minor coordinate
    /// lies in `minor_lo..=minor_hi`.
    fn visible_steps(
        &self,
        major_limit: i64,
        minor_lo: i64,
        minor_hi: i64,
    ) -> Option<(i64, i64)> {
        let (mut first, mut last) = (0i128, i128::from(self.d_major));

        let (m0, limit) = (i128::from(self.major0), i128::from(major_limit));
        let (lo, hi) = if self.s_major >= 0 {
            (-m0, limit - 1 - m0)
        } else {
            (m0 - (limit - 1), m0)
        };
        first = first.max(lo);
        last = last.min(hi);

        // Minor offset range that keeps the minor coordinate in bounds.
        let n0 = i128::from(self.minor0);
        let (a, b) = if self.s_minor >= 0 {
            (i128::from(minor_lo) - n0, i128::from(minor_hi) - n0)
        } else {
            (n0 - i128::from(minor_hi), n0 - i128::from(minor_lo))
        };
        if self.d_minor == 0 {
            if a > 0 || b < 0 {
                return None;
            }
        } else {
            let (dm, dj) = (i128::from(self.d_minor), i128::from(self.d_major));
            let q = 2 * dm;
            // offset(t) >= a  <=>  t >= ceil((2a - 1) * dj / q)
            first = first.max(-(-((2 * a - 1) * dj)).div_euclid(q));
            // offset(t) <= b  <=>  t <= floor(((2b + 1) * dj - 1) / q)
            last = last.min(((2 * b + 1) * dj - 1).div_euclid(q));
        }

        (first <= last).then_some((first as i64, last as i64))
    }
}

pub(crate) fn draw_colour_mapping_rect(
    target: &mut RenderTarget<'_>,
    rect: Rect,
    mapping: ColourMapping<'_>,
    animated: bool,
) {
    let (colour, anim, pitch) = target.parts_mut();

    let Some(anim) = anim.filter(|_| animated) else {
        if let ColourMapping::Recolour(_) = mapping {
            tracing::debug!("recolour mapping needs an animation buffer, ignored");
            return;
        }
        for y in rect.top..rect.bottom() {
            for c in &mut colour[y * pitch + rect.left..y * pitch + rect.right()] {
                *c = match mapping {
                    ColourMapping::Transparent => make_transparent(*c, 154, 256),
                    _ => make_grey(*c),
                };
            }
        }
        return;
    };

    for y in rect.top..rect.bottom() {
        let span = y * pitch + rect.left..y * pitch + rect.right();
        let pixels = colour[span.clone()].iter_mut().zip(anim[span].iter_mut());
        match mapping {
            ColourMapping::Transparent => {
                for (c, a) in pixels {
                    let below = if *a != 0 {
                        Colour::new(colour_brightness(*c), 0, 0)
                    } else {
                        *c
                    };
                    *c = make_transparent(below, 154, 256);
                }
            }
            ColourMapping::Newspaper(remap) => {
                for (c, a) in pixels {
                    if *a == 0 {
                        *c = make_grey(*c);
                    } else {
                        *a = remap[usize::from(*a)];
                    }
                }
            }
            ColourMapping::Recolour(remap) => {
                for (_, a) in pixels {
                    if *a != 0 {
                        *a = remap[usize::from(*a)];
                    }
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/blitter/primitives.rs"]
mod tests;
