use crate::{
    colour::{
        compose::{adjust_brightness, colour_brightness},
        pixel::Colour,
    },
    foundation::error::{BlitError, BlitResult},
};

/// First palette index of the animated (cycling) range.
pub const PALETTE_ANIM_START: usize = 227;
/// Number of animated palette entries.
pub const PALETTE_ANIM_SIZE: usize = 28;
/// Number of entries in a palette.
pub const PALETTE_SIZE: usize = 256;

/// Index-to-colour lookup table shared by palette sprites and the animation buffer.
///
/// Animation bytes are indices into this table; cycling an animated range and then
/// realizing the screen makes every animated pixel follow without re-blitting.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    colours: [Colour; PALETTE_SIZE],
}

impl Palette {
    pub fn new(colours: [Colour; PALETTE_SIZE]) -> Self {
        Self { colours }
    }

    /// Build from `[r, g, b]` triplets; missing trailing entries stay black.
    pub fn from_rgb_triplets(rgb: &[[u8; 3]]) -> BlitResult<Self> {
        if rgb.len() > PALETTE_SIZE {
            return Err(BlitError::config(format!(
                "palette has {} entries, at most {PALETTE_SIZE} allowed",
                rgb.len()
            )));
        }
        let mut colours = [Colour::BLACK; PALETTE_SIZE];
        for (slot, &[r, g, b]) in colours.iter_mut().zip(rgb) {
            *slot = Colour::new(r, g, b);
        }
        Ok(Self { colours })
    }

    #[inline]
    pub fn lookup(&self, index: u8) -> Colour {
        self.colours[usize::from(index)]
    }

    pub fn set(&mut self, index: u8, colour: Colour) {
        self.colours[usize::from(index)] = colour;
    }

    pub fn colours(&self) -> &[Colour; PALETTE_SIZE] {
        &self.colours
    }

    /// Current on-screen colour of a pixel holding `colour` with animation class `anim`.
    #[inline]
    pub fn realize(&self, anim: u8, colour: Colour) -> Colour {
        realize_blended_colour(anim, colour, self)
    }

    /// Closest static palette entry to `colour`.
    ///
    /// Only indices `1..PALETTE_ANIM_START` are candidates: index 0 is reserved and the
    /// animated range changes over time. Distance is the "redmean" weighted squared RGB
    /// distance; ties keep the lowest index.
    pub fn nearest_colour_index(&self, colour: Colour) -> u8 {
        let mut best_index = 0usize;
        let mut best_distance = u32::MAX;
        for (i, candidate) in self
            .colours
            .iter()
            .enumerate()
            .take(PALETTE_ANIM_START)
            .skip(1)
        {
            let distance = colour_distance(*candidate, colour);
            if distance < best_distance {
                best_distance = distance;
                best_index = i;
            }
        }
        best_index as u8
    }

    /// Rotate `len` entries starting at `start` one step towards the start.
    pub fn cycle_range(&mut self, start: usize, len: usize) {
        let end = (start + len).min(PALETTE_SIZE);
        if start < end {
            self.colours[start..end].rotate_left(1);
        }
    }

    /// Advance the whole animated range by one step.
    pub fn cycle_animated(&mut self) {
        self.cycle_range(PALETTE_ANIM_START, PALETTE_ANIM_SIZE);
    }
}

impl Default for Palette {
    /// Deterministic palette: a 6x6x6 colour cube, a grey ramp, then water and fire
    /// gradients in the animated range.
    fn default() -> Self {
        let mut colours = [Colour::BLACK; PALETTE_SIZE];
        for (k, slot) in colours[1..217].iter_mut().enumerate() {
            let level = |v: usize| (v * 51) as u8;
            *slot = Colour::new(level(k / 36), level(k / 6 % 6), level(k % 6));
        }
        for (k, slot) in colours[217..PALETTE_ANIM_START].iter_mut().enumerate() {
            let v = (k * 255 / 9) as u8;
            *slot = Colour::new(v, v, v);
        }
        let water = PALETTE_ANIM_SIZE / 2;
        for k in 0..PALETTE_ANIM_SIZE {
            let t = (k % water * 255 / (water - 1)) as u8;
            colours[PALETTE_ANIM_START + k] = if k < water {
                Colour::new(t / 4, t / 2, 128 + t / 2)
            } else {
                Colour::new(255, t, t / 5)
            };
        }
        Self { colours }
    }
}

/// On-screen colour for a pixel: static pixels are final, animated ones take the
/// current palette entry scaled by the brightness carried in `colour`.
#[inline]
pub fn realize_blended_colour(anim: u8, colour: Colour, palette: &Palette) -> Colour {
    if anim == 0 {
        colour
    } else {
        adjust_brightness(palette.lookup(anim), colour_brightness(colour))
    }
}

fn colour_distance(a: Colour, b: Colour) -> u32 {
    let rmean = (u32::from(a.r) + u32::from(b.r)) / 2;
    let dr = u32::from(a.r.abs_diff(b.r));
    let dg = u32::from(a.g.abs_diff(b.g));
    let db = u32::from(a.b.abs_diff(b.b));
    (((512 + rmean) * dr * dr) >> 8) + 4 * dg * dg + (((767 - rmean) * db * db) >> 8)
}

#[cfg(test)]
#[path = "../../tests/unit/colour/palette.rs"]
mod tests;
