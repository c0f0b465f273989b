//! Run-length sprite encoding.
//!
//! Each zoom level is stored as two streams inside one byte blob:
//!
//! - pixel stream: per line a `u32` byte length (prefix included), then one [`Colour`]
//!   (4 bytes, little-endian packed word) per opaque or translucent pixel and a single
//!   placeholder colour per transparent run.
//! - remap stream: per line a `u32` byte length, then runs. A run is a `u16` pixel count
//!   followed by `u16` records (`m | brightness << 8`): one per pixel for opaque and
//!   translucent runs, a single placeholder for transparent runs. Lines are padded to
//!   4 bytes.
//!
//! Runs group pixels of the same alpha class (transparent, translucent, opaque) and are
//! capped at `u16::MAX` pixels.

use crate::{
    colour::{compose::colour_brightness, pixel::Colour},
    foundation::{
        core::{ZOOM_LVL_COUNT, ZoomLevel},
        error::{BlitError, BlitResult},
    },
};

/// Size of the per-line length prefix in both streams.
pub const LINE_PREFIX_BYTES: usize = 4;

/// One source pixel: straight RGBA plus the mapping channel `m`.
///
/// `m == 0` means a plain RGB pixel; otherwise `m` is a palette index that recolour
/// remaps and palette animation act on, and the RGB part only carries brightness.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SourcePixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
    pub m: u8,
}

impl SourcePixel {
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a, m: 0 }
    }

    /// Opaque palette-mapped pixel at default brightness.
    pub const fn mapped(m: u8) -> Self {
        Self {
            r: 0,
            g: 0,
            b: 0,
            a: 255,
            m,
        }
    }
}

/// Unencoded raster for one zoom level.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawSprite {
    pub width: u16,
    pub height: u16,
    pub x_offs: i16,
    pub y_offs: i16,
    pub pixels: Vec<SourcePixel>,
}

impl RawSprite {
    pub fn new(width: u16, height: u16, pixels: Vec<SourcePixel>) -> BlitResult<Self> {
        let expected = usize::from(width) * usize::from(height);
        if pixels.len() != expected {
            return Err(BlitError::encode(format!(
                "raw sprite {width}x{height} expects {expected} pixels, got {}",
                pixels.len()
            )));
        }
        Ok(Self {
            width,
            height,
            x_offs: 0,
            y_offs: 0,
            pixels,
        })
    }

    /// Build from straight RGBA8 bytes with an empty mapping channel.
    pub fn from_rgba8(width: u16, height: u16, rgba: &[u8]) -> BlitResult<Self> {
        if rgba.len() % 4 != 0 {
            return Err(BlitError::encode("rgba8 buffer length must be a multiple of 4"));
        }
        let pixels = rgba
            .chunks_exact(4)
            .map(|px| SourcePixel::rgba(px[0], px[1], px[2], px[3]))
            .collect::<Vec<_>>();
        Self::new(width, height, pixels)
    }

    /// Replace the mapping channel, one byte per pixel.
    pub fn with_mapping(mut self, m: &[u8]) -> BlitResult<Self> {
        if m.len() != self.pixels.len() {
            return Err(BlitError::encode(format!(
                "mapping channel has {} bytes for {} pixels",
                m.len(),
                self.pixels.len()
            )));
        }
        for (px, &m) in self.pixels.iter_mut().zip(m) {
            px.m = m;
        }
        Ok(self)
    }

    pub fn with_offsets(mut self, x_offs: i16, y_offs: i16) -> Self {
        self.x_offs = x_offs;
        self.y_offs = y_offs;
        self
    }
}

/// Raw rasters for each zoom level a sprite is available at.
#[derive(Clone, Debug, Default)]
pub struct SpriteCollection {
    levels: [Option<RawSprite>; ZOOM_LVL_COUNT],
}

impl SpriteCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collection holding a single [`ZoomLevel::Normal`] raster.
    pub fn single(sprite: RawSprite) -> Self {
        let mut out = Self::default();
        out.insert(ZoomLevel::Normal, sprite);
        out
    }

    pub fn insert(&mut self, zoom: ZoomLevel, sprite: RawSprite) -> &mut Self {
        self.levels[zoom.index()] = Some(sprite);
        self
    }

    pub fn get(&self, zoom: ZoomLevel) -> Option<&RawSprite> {
        self.levels[zoom.index()].as_ref()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct LevelLayout {
    width: u16,
    height: u16,
    px_start: usize,
    px_end: usize,
    n_start: usize,
    n_end: usize,
}

/// Encoded sprite, immutable once built and shared read-only by draw calls.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodedSprite {
    x_offs: i16,
    y_offs: i16,
    levels: [Option<LevelLayout>; ZOOM_LVL_COUNT],
    data: Vec<u8>,
}

/// Borrowed view of one zoom level of an [`EncodedSprite`].
#[derive(Clone, Copy, Debug)]
pub struct EncodedLevel<'s> {
    pub width: usize,
    pub height: usize,
    pub px: &'s [u8],
    pub n: &'s [u8],
}

impl EncodedSprite {
    pub fn level(&self, zoom: ZoomLevel) -> Option<EncodedLevel<'_>> {
        self.levels[zoom.index()].map(|l| EncodedLevel {
            width: usize::from(l.width),
            height: usize::from(l.height),
            px: &self.data[l.px_start..l.px_end],
            n: &self.data[l.n_start..l.n_end],
        })
    }

    /// Size at `zoom`, if the sprite carries that level.
    pub fn size(&self, zoom: ZoomLevel) -> Option<(usize, usize)> {
        self.levels[zoom.index()].map(|l| (usize::from(l.width), usize::from(l.height)))
    }

    pub fn offsets(&self) -> (i16, i16) {
        (self.x_offs, self.y_offs)
    }

    /// Total encoded bytes over all levels.
    pub fn data_len(&self) -> usize {
        self.data.len()
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum AlphaClass {
    Transparent,
    Translucent,
    Opaque,
}

impl AlphaClass {
    fn of(a: u8) -> Self {
        match a {
            0 => Self::Transparent,
            255 => Self::Opaque,
            _ => Self::Translucent,
        }
    }
}

/// Encode all available zoom levels of `sprites`.
#[tracing::instrument(level = "debug", skip_all)]
pub fn encode_sprite(sprites: &SpriteCollection) -> BlitResult<EncodedSprite> {
    let mut data = Vec::new();
    let mut levels = [None; ZOOM_LVL_COUNT];

    for zoom in ZoomLevel::ALL {
        let Some(raw) = sprites.get(zoom) else {
            continue;
        };
        let expected = usize::from(raw.width) * usize::from(raw.height);
        if raw.pixels.len() != expected {
            return Err(BlitError::encode(format!(
                "zoom level {zoom:?}: {}x{} raster holds {} pixels",
                raw.width,
                raw.height,
                raw.pixels.len()
            )));
        }

        let row_len = usize::from(raw.width).max(1);
        let px_start = data.len();
        for row in raw.pixels.chunks(row_len) {
            encode_px_line(&mut data, row);
        }
        let px_end = data.len();
        for row in raw.pixels.chunks(row_len) {
            encode_n_line(&mut data, row);
        }
        let n_end = data.len();

        levels[zoom.index()] = Some(LevelLayout {
            width: raw.width,
            height: raw.height,
            px_start,
            px_end,
            n_start: px_end,
            n_end,
        });
    }

    if levels.iter().all(Option::is_none) {
        return Err(BlitError::encode("sprite collection has no zoom levels"));
    }

    let (x_offs, y_offs) = sprites
        .get(ZoomLevel::Normal)
        .or_else(|| ZoomLevel::ALL.iter().find_map(|&z| sprites.get(z)))
        .map(|s| (s.x_offs, s.y_offs))
        .unwrap_or_default();

    tracing::debug!(bytes = data.len(), "encoded sprite");
    Ok(EncodedSprite {
        x_offs,
        y_offs,
        levels,
        data,
    })
}

fn encode_px_line(out: &mut Vec<u8>, row: &[SourcePixel]) {
    let line_start = out.len();
    out.extend_from_slice(&[0; LINE_PREFIX_BYTES]);

    let mut last: Option<AlphaClass> = None;
    let mut len = 0usize;
    for px in row {
        let class = AlphaClass::of(px.a);
        if last != Some(class) || len == usize::from(u16::MAX) {
            last = Some(class);
            len = 0;
        }
        len += 1;

        if class != AlphaClass::Transparent {
            out.extend_from_slice(&Colour::with_alpha(px.r, px.g, px.b, px.a).to_le_bytes());
        } else if len == 1 {
            out.extend_from_slice(&Colour::TRANSPARENT.to_le_bytes());
        }
    }

    patch_line_len(out, line_start);
}

fn encode_n_line(out: &mut Vec<u8>, row: &[SourcePixel]) {
    let line_start = out.len();
    out.extend_from_slice(&[0; LINE_PREFIX_BYTES]);

    let mut last: Option<AlphaClass> = None;
    let mut len = 0usize;
    let mut len_at = 0usize;
    for px in row {
        let class = AlphaClass::of(px.a);
        if last != Some(class) || len == usize::from(u16::MAX) {
            if last.is_some() {
                write_u16_at(out, len_at, len as u16);
            }
            len_at = out.len();
            out.extend_from_slice(&[0, 0]);
            last = Some(class);
            len = 0;
        }
        len += 1;

        if class != AlphaClass::Transparent {
            out.extend_from_slice(&mapping_record(px).to_le_bytes());
        } else if len == 1 {
            out.extend_from_slice(&u16::from(px.m).to_le_bytes());
        }
    }
    if last.is_some() {
        write_u16_at(out, len_at, len as u16);
    }

    while (out.len() - line_start) % 4 != 0 {
        out.push(0);
    }
    patch_line_len(out, line_start);
}

/// `m` in the low byte, source brightness in the high byte (zero when unmapped).
fn mapping_record(px: &SourcePixel) -> u16 {
    if px.m == 0 {
        return 0;
    }
    let brightness = colour_brightness(Colour::new(px.r, px.g, px.b));
    u16::from(px.m) | u16::from(brightness) << 8
}

fn write_u16_at(out: &mut [u8], at: usize, v: u16) {
    out[at..at + 2].copy_from_slice(&v.to_le_bytes());
}

fn patch_line_len(out: &mut [u8], line_start: usize) {
    let len = (out.len() - line_start) as u32;
    out[line_start..line_start + LINE_PREFIX_BYTES].copy_from_slice(&len.to_le_bytes());
}

#[cfg(test)]
#[path = "../../tests/unit/sprite/encode.rs"]
mod tests;
