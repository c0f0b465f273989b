//! Sprite drawing onto a colour buffer only.
//!
//! Used when the target has no animation buffer or animation is disabled. Opaque mapped
//! pixels are turned into their palette colour at draw time, using the brightness stored
//! in the remap stream; translucent ones blend the plain palette entry, as the animated
//! path does.

use crate::{
    blitter::{
        params::{BlitterMode, BlitterParams, ModeTag, RemapTable},
        target::RenderTarget,
        walk::for_each_visible_run,
    },
    colour::{
        compose::{
            adjust_brightness, compose_colour_pa_no_check, compose_colour_rgba,
            compose_colour_rgba_no_check, make_dark_value, make_transparent,
        },
        palette::Palette,
        pixel::Colour,
    },
    sprite::{cursor::SpriteCursor, encode::EncodedLevel},
};

pub(crate) fn draw<M: ModeTag>(
    target: &mut RenderTarget<'_>,
    bp: &BlitterParams<'_>,
    palette: &Palette,
) {
    let Some(level) = bp.sprite.level(bp.zoom) else {
        tracing::warn!(zoom = ?bp.zoom, "sprite has no data at requested zoom level, draw skipped");
        return;
    };
    let (colour, _, pitch) = target.parts_mut();
    draw_level::<M>(colour, pitch, &level, bp, palette);
}

pub(crate) fn draw_level<M: ModeTag>(
    colour: &mut [Colour],
    pitch: usize,
    level: &EncodedLevel<'_>,
    bp: &BlitterParams<'_>,
    palette: &Palette,
) {
    let remap = bp.remap_table();
    for_each_visible_run(level, bp, |y, x, n, cur| {
        let at = (bp.top + y) * pitch + bp.left + x;
        compose_run::<M>(&mut colour[at..at + n], cur, remap, palette);
    });
}

/// Palette colour of record `i`, at the brightness the record carries.
#[inline]
fn mapped_colour(palette: &Palette, index: u8, cur: &SpriteCursor<'_>, i: usize) -> Colour {
    adjust_brightness(palette.lookup(index), cur.brightness(i))
}

#[inline(always)]
fn compose_run<M: ModeTag>(
    dst: &mut [Colour],
    cur: &SpriteCursor<'_>,
    remap: &RemapTable,
    palette: &Palette,
) {
    let alpha = cur.pixel(0).a;

    match M::MODE {
        BlitterMode::ColourRemap | BlitterMode::CrashRemap => {
            let crash = M::MODE == BlitterMode::CrashRemap;
            for (i, d) in dst.iter_mut().enumerate() {
                let m = cur.class(i);
                let px = cur.pixel(i);
                if m == 0 {
                    *d = if crash {
                        let g = make_dark_value(px.r, px.g, px.b);
                        compose_colour_rgba(g, g, g, px.a, *d)
                    } else if alpha == 255 {
                        px
                    } else {
                        compose_colour_rgba_no_check(px.r, px.g, px.b, px.a, *d)
                    };
                } else {
                    let r = remap[usize::from(m)];
                    if r != 0 {
                        *d = if alpha == 255 {
                            mapped_colour(palette, r, cur, i)
                        } else {
                            compose_colour_pa_no_check(palette.lookup(r), px.a, *d)
                        };
                    }
                }
            }
        }

        BlitterMode::BlackRemap => dst.fill(Colour::BLACK),

        BlitterMode::Transparent => {
            if alpha == 255 {
                for d in dst.iter_mut() {
                    *d = make_transparent(*d, 3, 4);
                }
            } else {
                for (i, d) in dst.iter_mut().enumerate() {
                    *d = make_transparent(*d, 256 * 4 - u32::from(cur.pixel(i).a), 256 * 4);
                }
            }
        }

        BlitterMode::TransparentRemap => {
            for d in dst.iter_mut() {
                *d = palette.lookup(remap[usize::from(palette.nearest_colour_index(*d))]);
            }
        }

        BlitterMode::Normal => {
            if alpha == 255 {
                for (i, d) in dst.iter_mut().enumerate() {
                    let m = cur.class(i);
                    *d = if m != 0 {
                        mapped_colour(palette, m, cur, i)
                    } else {
                        cur.pixel(i)
                    };
                }
            } else {
                for (i, d) in dst.iter_mut().enumerate() {
                    let m = cur.class(i);
                    let px = cur.pixel(i);
                    *d = if m != 0 {
                        compose_colour_pa_no_check(palette.lookup(m), px.a, *d)
                    } else {
                        compose_colour_rgba_no_check(px.r, px.g, px.b, px.a, *d)
                    };
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/blitter/plain.rs"]
mod tests;
