use crate::{
    colour::pixel::Colour,
    foundation::{
        core::Rect,
        error::{BlitError, BlitResult},
    },
};

/// Borrowed colour buffer plus optional animation buffer sharing one pitch.
///
/// The blitter never allocates or keeps these buffers; a target lives for one call
/// sequence of the render thread. Without an animation buffer every operation degrades
/// to plain colour output.
#[derive(Debug)]
pub struct RenderTarget<'a> {
    colour: &'a mut [Colour],
    anim: Option<&'a mut [u8]>,
    width: usize,
    height: usize,
    pitch: usize,
}

impl<'a> RenderTarget<'a> {
    pub fn new(
        colour: &'a mut [Colour],
        width: usize,
        height: usize,
        pitch: usize,
    ) -> BlitResult<Self> {
        if pitch < width {
            return Err(BlitError::region(format!(
                "pitch {pitch} is smaller than width {width}"
            )));
        }
        let needed = required_len(width, height, pitch);
        if colour.len() < needed {
            return Err(BlitError::region(format!(
                "colour buffer holds {} pixels, {width}x{height} at pitch {pitch} needs {needed}",
                colour.len()
            )));
        }
        Ok(Self {
            colour,
            anim: None,
            width,
            height,
            pitch,
        })
    }

    /// Attach the animation buffer; it is addressed with the colour buffer's pitch.
    pub fn with_animation(mut self, anim: &'a mut [u8]) -> BlitResult<Self> {
        let needed = required_len(self.width, self.height, self.pitch);
        if anim.len() < needed {
            return Err(BlitError::region(format!(
                "animation buffer holds {} bytes, needs {needed}",
                anim.len()
            )));
        }
        self.anim = Some(anim);
        Ok(self)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pitch(&self) -> usize {
        self.pitch
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }

    pub fn has_animation(&self) -> bool {
        self.anim.is_some()
    }

    pub fn colour(&self) -> &[Colour] {
        &*self.colour
    }

    pub fn anim(&self) -> Option<&[u8]> {
        self.anim.as_deref()
    }

    #[inline]
    pub fn offset(&self, x: usize, y: usize) -> usize {
        y * self.pitch + x
    }

    pub fn pixel(&self, x: usize, y: usize) -> Colour {
        self.colour[self.offset(x, y)]
    }

    /// Animation byte at `(x, y)`; 0 when there is no animation buffer.
    pub fn anim_at(&self, x: usize, y: usize) -> u8 {
        let at = self.offset(x, y);
        self.anim.as_deref().map_or(0, |a| a[at])
    }

    /// Whether `rect` lies inside the target; edges that overflow `usize` never do.
    pub fn contains_rect(&self, rect: &Rect) -> bool {
        let fits = |start: usize, len: usize, limit: usize| {
            start.checked_add(len).is_some_and(|end| end <= limit)
        };
        fits(rect.left, rect.width, self.width) && fits(rect.top, rect.height, self.height)
    }

    pub(crate) fn parts_mut(&mut self) -> (&mut [Colour], Option<&mut [u8]>, usize) {
        (&mut *self.colour, self.anim.as_deref_mut(), self.pitch)
    }

    pub(crate) fn check_rect(&self, rect: &Rect, what: &str) -> BlitResult<()> {
        if self.contains_rect(rect) {
            return Ok(());
        }
        Err(BlitError::region(format!(
            "{what} rect {rect:?} exceeds {}x{} target",
            self.width, self.height
        )))
    }
}

fn required_len(width: usize, height: usize, pitch: usize) -> usize {
    if width == 0 || height == 0 {
        0
    } else {
        (height - 1) * pitch + width
    }
}

/// Owned screen buffers standing in for a video backend's framebuffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScreenBuffers {
    pub width: usize,
    pub height: usize,
    pub pitch: usize,
    pub colour: Vec<Colour>,
    pub anim: Vec<u8>,
}

impl ScreenBuffers {
    pub fn new(width: usize, height: usize) -> Self {
        Self::with_pitch(width, height, width)
    }

    pub fn with_pitch(width: usize, height: usize, pitch: usize) -> Self {
        let pitch = pitch.max(width);
        Self {
            width,
            height,
            pitch,
            colour: vec![Colour::BLACK; pitch * height],
            anim: vec![0; pitch * height],
        }
    }

    pub fn fill(&mut self, colour: Colour) {
        self.colour.fill(colour);
        self.anim.fill(0);
    }

    /// Target over both buffers.
    pub fn target(&mut self) -> RenderTarget<'_> {
        RenderTarget {
            colour: &mut self.colour,
            anim: Some(&mut self.anim),
            width: self.width,
            height: self.height,
            pitch: self.pitch,
        }
    }

    /// Target over the colour buffer only, as for off-screen rendering.
    pub fn colour_target(&mut self) -> RenderTarget<'_> {
        RenderTarget {
            colour: &mut self.colour,
            anim: None,
            width: self.width,
            height: self.height,
            pitch: self.pitch,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/blitter/target.rs"]
mod tests;
