//! Per-channel colour transforms used by the blitters.
//!
//! The numerators and denominators here are part of the visual contract: golden images
//! depend on them bit for bit.

use crate::colour::pixel::Colour;

/// Brightness value that leaves a palette colour unchanged.
pub const DEFAULT_BRIGHTNESS: u8 = 128;

/// Blend `(r, g, b)` over `current` with coverage `a`, without range checks.
///
/// Each channel is `((src - dst) * a) / 256 + dst` in signed arithmetic, truncating toward
/// zero. Dividing by 256 instead of 255 means `a == 255` never fully reaches the source,
/// so callers route opaque pixels around this function. The result is opaque.
#[inline]
pub fn compose_colour_rgba_no_check(r: u8, g: u8, b: u8, a: u8, current: Colour) -> Colour {
    let a = i32::from(a);
    let mix = |s: u8, d: u8| -> u8 {
        let d = i32::from(d);
        ((i32::from(s) - d) * a / 256 + d) as u8
    };
    Colour::new(mix(r, current.r), mix(g, current.g), mix(b, current.b))
}

/// Checked variant of [`compose_colour_rgba_no_check`].
#[inline]
pub fn compose_colour_rgba(r: u8, g: u8, b: u8, a: u8, current: Colour) -> Colour {
    match a {
        0 => current,
        255 => Colour::new(r, g, b),
        _ => compose_colour_rgba_no_check(r, g, b, a, current),
    }
}

/// Blend a palette-derived colour over `current` with coverage `a`.
#[inline]
pub fn compose_colour_pa_no_check(colour: Colour, a: u8, current: Colour) -> Colour {
    compose_colour_rgba_no_check(colour.r, colour.g, colour.b, a, current)
}

/// `src` over `dst` weighted by `alpha / 256`.
#[inline]
pub fn alpha_blend(src: Colour, dst: Colour, alpha: u8) -> Colour {
    compose_colour_rgba_no_check(src.r, src.g, src.b, alpha, dst)
}

/// Scale all channels by `nom / denom`; the result is opaque.
#[inline]
pub fn make_transparent(colour: Colour, nom: u32, denom: u32) -> Colour {
    let scale = |c: u8| (u32::from(c) * nom / denom) as u8;
    Colour::new(scale(colour.r), scale(colour.g), scale(colour.b))
}

/// Darkened luminance, roughly two thirds of [`make_grey`].
#[inline]
pub fn make_dark_value(r: u8, g: u8, b: u8) -> u8 {
    ((u32::from(r) * 13063 + u32::from(g) * 25647 + u32::from(b) * 4981) / 65536) as u8
}

#[inline]
pub fn make_dark(colour: Colour) -> Colour {
    let d = make_dark_value(colour.r, colour.g, colour.b);
    Colour::new(d, d, d)
}

/// Luminance as an opaque grey.
#[inline]
pub fn make_grey(colour: Colour) -> Colour {
    let grey = ((u32::from(colour.r) * 19595
        + u32::from(colour.g) * 38470
        + u32::from(colour.b) * 7471)
        / 65536) as u8;
    Colour::new(grey, grey, grey)
}

/// Brightest channel; black counts as [`DEFAULT_BRIGHTNESS`].
#[inline]
pub fn colour_brightness(colour: Colour) -> u8 {
    match colour.r.max(colour.g).max(colour.b) {
        0 => DEFAULT_BRIGHTNESS,
        max => max,
    }
}

/// Scale `colour` by `brightness / 128`, spilling overbright channels into the others.
#[inline]
pub fn adjust_brightness(colour: Colour, brightness: u8) -> Colour {
    if brightness == DEFAULT_BRIGHTNESS {
        return colour;
    }
    really_adjust_brightness(colour, brightness)
}

fn really_adjust_brightness(colour: Colour, brightness: u8) -> Colour {
    // Three 16-bit lanes; each product fits because 255 * 255 < 65536.
    let mut combined =
        (u64::from(colour.r) << 32) | (u64::from(colour.g) << 16) | u64::from(colour.b);
    combined *= u64::from(brightness);

    let r = ((combined >> 39) & 0x1ff) as u16;
    let g = ((combined >> 23) & 0x1ff) as u16;
    let b = ((combined >> 7) & 0x1ff) as u16;

    if combined & 0x8000_8000_8000 == 0 {
        return Colour::with_alpha(r as u8, g as u8, b as u8, colour.a);
    }

    let mut ob: u16 = 0;
    for c in [r, g, b] {
        if c > 255 {
            ob += c - 255;
        }
    }
    ob /= 2;

    let spill = |c: u16| -> u8 {
        if c >= 255 {
            255
        } else {
            (c + ob * (255 - c) / 256).min(255) as u8
        }
    };
    Colour::with_alpha(spill(r), spill(g), spill(b), colour.a)
}

#[cfg(test)]
#[path = "../../tests/unit/colour/compose.rs"]
mod tests;
