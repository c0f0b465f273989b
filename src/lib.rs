//! `animblit` is a 40bpp software blitter for palette-animated 2D graphics.
//!
//! A screen is a 32-bit colour buffer paired with an 8-bit animation buffer. Pixels whose
//! animation byte is non-zero show a palette entry scaled by the brightness stored in the
//! colour buffer, so cycling palette entries animates them without redrawing sprites.
//!
//! Typical flow:
//! 1. Build a [`RawSprite`] (or decode one from PNG) and [`encode_sprite`] it.
//! 2. Create a [`Blitter`] from [`BlitterSettings`].
//! 3. Draw into a [`RenderTarget`] with [`BlitterParams`] and a [`BlitterMode`].
//! 4. Cycle the palette and [`Blitter::realize`] the screen for display.
#![forbid(unsafe_code)]

pub mod blitter;
pub mod colour;
pub mod fingerprint;
pub mod foundation;
pub mod settings;
pub mod sprite;

pub use blitter::{
    AnimatedBlitter, Blitter, BlitterMode, BlitterParams, ColourMapping, IDENTITY_REMAP,
    LineStyle, PaletteAnimation, PlainBlitter, RegionBuffer, RemapTable, RenderTarget,
    ScreenBuffers, SpriteBlitter,
};
pub use colour::{palette::Palette, pixel::Colour};
pub use fingerprint::{BufferFingerprint, fingerprint_target};
pub use foundation::core::{Rect, ZoomLevel};
pub use foundation::error::{BlitError, BlitResult};
pub use settings::BlitterSettings;
pub use sprite::{
    decode::{decode_sprite, decode_sprite_with_mask},
    encode::{EncodedSprite, RawSprite, SourcePixel, SpriteCollection, encode_sprite},
};
