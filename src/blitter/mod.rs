//! The 40bpp animated blitter.
//!
//! [`Blitter`] is the entry point. It owns the palette and settings, answers the
//! capability queries a video backend asks before allocating buffers, and routes every
//! drawing call either to the animation-aware path or to the plain colour path.

mod animated;
pub mod params;
mod plain;
pub mod primitives;
pub mod region;
pub mod target;
mod walk;

use crate::{
    colour::{palette::Palette, pixel::Colour},
    foundation::{
        core::Rect,
        error::{BlitError, BlitResult},
    },
    settings::BlitterSettings,
};

pub use params::{BlitterMode, BlitterParams, IDENTITY_REMAP, RemapTable};
pub use primitives::{ColourMapping, LineStyle};
pub use region::{RegionBuffer, buffer_size};
pub use target::{RenderTarget, ScreenBuffers};

use params::{
    BlackRemapTag, ColourRemapTag, CrashRemapTag, NormalTag, TransparentRemapTag,
    TransparentTag,
};

/// Who performs palette animation for a blitter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaletteAnimation {
    /// Palette animation is not supported.
    None,
    /// The blitter redraws animated pixels itself.
    Blitter,
    /// The video backend realizes the animation buffer after each palette change.
    VideoBackend,
}

/// A sprite draw strategy.
///
/// Implementations are stateless; one is picked per call from the target's capabilities.
pub trait SpriteBlitter: Sync {
    fn name(&self) -> &'static str;

    fn draw(
        &self,
        target: &mut RenderTarget<'_>,
        bp: &BlitterParams<'_>,
        mode: BlitterMode,
        palette: &Palette,
    );
}

macro_rules! dispatch_mode {
    ($mode:expr, $module:ident, $($arg:expr),* $(,)?) => {
        match $mode {
            BlitterMode::Normal => $module::draw::<NormalTag>($($arg),*),
            BlitterMode::ColourRemap => $module::draw::<ColourRemapTag>($($arg),*),
            BlitterMode::Transparent => $module::draw::<TransparentTag>($($arg),*),
            BlitterMode::TransparentRemap => $module::draw::<TransparentRemapTag>($($arg),*),
            BlitterMode::CrashRemap => $module::draw::<CrashRemapTag>($($arg),*),
            BlitterMode::BlackRemap => $module::draw::<BlackRemapTag>($($arg),*),
        }
    };
}

/// Writes colour and animation buffers together.
#[derive(Clone, Copy, Debug, Default)]
pub struct AnimatedBlitter;

impl SpriteBlitter for AnimatedBlitter {
    fn name(&self) -> &'static str {
        "animated"
    }

    fn draw(
        &self,
        target: &mut RenderTarget<'_>,
        bp: &BlitterParams<'_>,
        mode: BlitterMode,
        palette: &Palette,
    ) {
        dispatch_mode!(mode, animated, target, bp, palette);
    }
}

/// Writes the colour buffer only, resolving mapped pixels at draw time.
#[derive(Clone, Copy, Debug, Default)]
pub struct PlainBlitter;

impl SpriteBlitter for PlainBlitter {
    fn name(&self) -> &'static str {
        "plain"
    }

    fn draw(
        &self,
        target: &mut RenderTarget<'_>,
        bp: &BlitterParams<'_>,
        mode: BlitterMode,
        palette: &Palette,
    ) {
        dispatch_mode!(mode, plain, target, bp, palette);
    }
}

static ANIMATED: AnimatedBlitter = AnimatedBlitter;
static PLAIN: PlainBlitter = PlainBlitter;

/// 32bpp colour output plus an 8bpp animation buffer.
#[derive(Clone, Debug)]
pub struct Blitter {
    settings: BlitterSettings,
    palette: Palette,
}

impl Blitter {
    pub fn new(settings: BlitterSettings) -> BlitResult<Self> {
        let palette = settings.build_palette()?;
        tracing::debug!(animation = settings.animation, "blitter created");
        Ok(Self { settings, palette })
    }

    pub fn settings(&self) -> &BlitterSettings {
        &self.settings
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Palette for cycling animated entries between frames.
    pub fn palette_mut(&mut self) -> &mut Palette {
        &mut self.palette
    }

    pub fn name(&self) -> &'static str {
        "40bpp-anim"
    }

    /// Bits per pixel of the colour buffer.
    pub fn screen_depth(&self) -> u8 {
        32
    }

    pub fn needs_animation_buffer(&self) -> bool {
        true
    }

    /// Bytes of animation buffer for a `width x height` screen.
    pub fn animation_buffer_size(&self, width: usize, height: usize) -> usize {
        width * height
    }

    /// Bytes needed to capture a `width x height` region.
    pub fn buffer_size(&self, width: usize, height: usize) -> usize {
        buffer_size(width, height)
    }

    pub fn palette_animation(&self) -> PaletteAnimation {
        PaletteAnimation::VideoBackend
    }

    /// Whether calls on `target` go through the animation-aware path.
    pub fn animates(&self, target: &RenderTarget<'_>) -> bool {
        self.settings.animation && target.has_animation()
    }

    /// Draw strategy for `target`.
    pub fn strategy(&self, target: &RenderTarget<'_>) -> &'static dyn SpriteBlitter {
        if self.animates(target) {
            &ANIMATED
        } else {
            &PLAIN
        }
    }

    /// Draw one sprite.
    ///
    /// Parameters are trusted: the destination must lie inside the target and the skip
    /// and extent must lie inside the sprite.
    pub fn draw(&self, target: &mut RenderTarget<'_>, bp: &BlitterParams<'_>, mode: BlitterMode) {
        let strategy = self.strategy(target);
        tracing::trace!(
            strategy = strategy.name(),
            %mode,
            left = bp.left,
            top = bp.top,
            width = bp.width,
            height = bp.height,
            "draw sprite"
        );
        strategy.draw(target, bp, mode, &self.palette);
    }

    pub fn set_pixel(
        &self,
        target: &mut RenderTarget<'_>,
        x: usize,
        y: usize,
        index: u8,
    ) -> BlitResult<()> {
        if !target.bounds().contains(x, y) {
            return Err(BlitError::region(format!(
                "pixel ({x}, {y}) outside {}x{} target",
                target.width(),
                target.height()
            )));
        }
        let animated = self.animates(target);
        primitives::set_pixel(target, x, y, index, &self.palette, animated);
        Ok(())
    }

    pub fn draw_rect(&self, target: &mut RenderTarget<'_>, rect: Rect, index: u8) -> BlitResult<()> {
        target.check_rect(&rect, "fill")?;
        let animated = self.animates(target);
        primitives::draw_rect(target, rect, index, &self.palette, animated);
        Ok(())
    }

    /// Line from `from` to `to`; parts outside the target are clipped.
    pub fn draw_line(
        &self,
        target: &mut RenderTarget<'_>,
        from: (i64, i64),
        to: (i64, i64),
        index: u8,
        style: LineStyle,
    ) {
        let animated = self.animates(target);
        primitives::draw_line(target, from, to, index, style, &self.palette, animated);
    }

    pub fn draw_colour_mapping_rect(
        &self,
        target: &mut RenderTarget<'_>,
        rect: Rect,
        mapping: ColourMapping<'_>,
    ) -> BlitResult<()> {
        target.check_rect(&rect, "colour mapping")?;
        let animated = self.animates(target);
        primitives::draw_colour_mapping_rect(target, rect, mapping, animated);
        Ok(())
    }

    pub fn capture_region(&self, target: &RenderTarget<'_>, rect: Rect) -> BlitResult<RegionBuffer> {
        region::capture_region(target, rect)
    }

    pub fn restore_region(
        &self,
        target: &mut RenderTarget<'_>,
        saved: &RegionBuffer,
        left: usize,
        top: usize,
    ) -> BlitResult<()> {
        region::restore_region(target, saved, left, top)
    }

    /// Shift `rect` by `(dx, dy)`; see [`region::scroll_region`].
    pub fn scroll_region(
        &self,
        target: &mut RenderTarget<'_>,
        rect: Rect,
        dx: i64,
        dy: i64,
    ) -> BlitResult<Option<Rect>> {
        region::scroll_region(target, rect, dx, dy)
    }

    /// Copy `rect` as visible colours into `dst`, e.g. for screenshots.
    pub fn copy_image_to_buffer(
        &self,
        target: &RenderTarget<'_>,
        rect: Rect,
        dst: &mut [Colour],
        dst_pitch: usize,
    ) -> BlitResult<()> {
        region::copy_image_to_buffer(target, self.realizing_palette(target), rect, dst, dst_pitch)
    }

    /// The whole target as visible colours, using the current palette.
    ///
    /// With animation off the colour buffer is returned as drawn; animation bytes left on
    /// the target are ignored.
    pub fn realize(&self, target: &RenderTarget<'_>) -> Vec<Colour> {
        region::realize_image(target, self.realizing_palette(target))
    }

    fn realizing_palette(&self, target: &RenderTarget<'_>) -> Option<&Palette> {
        self.animates(target).then_some(&self.palette)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/blitter/mod.rs"]
mod tests;
