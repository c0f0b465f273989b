//! Sprite drawing onto a colour buffer plus its animation buffer.
//!
//! Animated pixels keep their palette index in the animation buffer and a brightness
//! carrier in the colour buffer, so cycling the palette recolours them without a redraw.
//! Alpha blending produces a final colour, so blended pixels always end up static.

use crate::{
    blitter::{
        params::{BlitterMode, BlitterParams, ModeTag, RemapTable},
        plain,
        target::RenderTarget,
        walk::for_each_visible_run,
    },
    colour::{
        compose::{
            colour_brightness, compose_colour_pa_no_check, compose_colour_rgba_no_check,
            make_dark, make_transparent,
        },
        palette::Palette,
        pixel::Colour,
    },
    sprite::cursor::SpriteCursor,
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
    let (colour, anim, pitch) = target.parts_mut();
    let Some(anim) = anim else {
        plain::draw_level::<M>(colour, pitch, &level, bp, palette);
        return;
    };

    let remap = bp.remap_table();
    for_each_visible_run(&level, bp, |y, x, n, cur| {
        let at = (bp.top + y) * pitch + bp.left + x;
        compose_run::<M>(&mut colour[at..at + n], &mut anim[at..at + n], cur, remap, palette);
    });
}

#[inline(always)]
fn compose_run<M: ModeTag>(
    dst: &mut [Colour],
    anim: &mut [u8],
    cur: &SpriteCursor<'_>,
    remap: &RemapTable,
    palette: &Palette,
) {
    let alpha = cur.pixel(0).a;

    match M::MODE {
        BlitterMode::ColourRemap | BlitterMode::CrashRemap => {
            let crash = M::MODE == BlitterMode::CrashRemap;
            if alpha == 255 {
                for (i, (d, a)) in dst.iter_mut().zip(anim.iter_mut()).enumerate() {
                    let m = cur.class(i);
                    if m == 0 {
                        let px = cur.pixel(i);
                        *d = if crash { make_dark(px) } else { px };
                        *a = 0;
                    } else {
                        let r = remap[usize::from(m)];
                        if r != 0 {
                            *d = cur.pixel(i);
                            *a = r;
                        }
                    }
                }
            } else {
                for (i, (d, a)) in dst.iter_mut().zip(anim.iter_mut()).enumerate() {
                    let m = cur.class(i);
                    let px = cur.pixel(i);
                    let below = palette.realize(*a, *d);
                    if m == 0 {
                        let c = if crash { make_dark(px) } else { px };
                        *d = compose_colour_rgba_no_check(c.r, c.g, c.b, px.a, below);
                        *a = 0;
                    } else {
                        let r = remap[usize::from(m)];
                        if r != 0 {
                            *d = compose_colour_pa_no_check(palette.lookup(r), px.a, below);
                            *a = 0;
                        }
                    }
                }
            }
        }

        BlitterMode::BlackRemap => {
            dst.fill(Colour::BLACK);
            anim.fill(0);
        }

        BlitterMode::Transparent => {
            if alpha == 255 {
                // An animated pixel only contributes its brightness, so darkening the
                // carrier darkens the animated colour too.
                for (d, a) in dst.iter_mut().zip(anim.iter()) {
                    let below = if *a != 0 {
                        Colour::new(colour_brightness(*d), 0, 0)
                    } else {
                        *d
                    };
                    *d = make_transparent(below, 3, 4);
                }
            } else {
                for (i, (d, a)) in dst.iter_mut().zip(anim.iter_mut()).enumerate() {
                    let below = palette.realize(*a, *d);
                    *d = make_transparent(below, 256 * 4 - u32::from(cur.pixel(i).a), 256 * 4);
                    *a = 0;
                }
            }
        }

        BlitterMode::TransparentRemap => {
            for (d, a) in dst.iter_mut().zip(anim.iter_mut()) {
                if *a != 0 {
                    *a = remap[usize::from(*a)];
                } else {
                    *d = palette.lookup(remap[usize::from(palette.nearest_colour_index(*d))]);
                }
            }
        }

        BlitterMode::Normal => {
            if alpha == 255 {
                for (i, (d, a)) in dst.iter_mut().zip(anim.iter_mut()).enumerate() {
                    *a = cur.class(i);
                    *d = cur.pixel(i);
                }
            } else {
                for (i, (d, a)) in dst.iter_mut().zip(anim.iter_mut()).enumerate() {
                    let m = cur.class(i);
                    let px = cur.pixel(i);
                    let below = palette.realize(*a, *d);
                    *d = if m == 0 {
                        compose_colour_rgba_no_check(px.r, px.g, px.b, px.a, below)
                    } else {
                        compose_colour_pa_no_check(palette.lookup(m), px.a, below)
                    };
                    *a = 0;
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/blitter/animated.rs"]
mod tests;
