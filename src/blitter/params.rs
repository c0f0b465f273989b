use std::{fmt, str::FromStr};

use crate::{
    foundation::{
        core::{Rect, ZoomLevel},
        error::{BlitError, BlitResult},
    },
    sprite::encode::EncodedSprite,
};

/// Caller-supplied lookup from one palette / animation index to another.
pub type RemapTable = [u8; 256];

/// Remap table that maps every index onto itself.
pub const IDENTITY_REMAP: RemapTable = identity_remap();

const fn identity_remap() -> RemapTable {
    let mut t = [0u8; 256];
    let mut i = 0;
    while i < 256 {
        t[i] = i as u8;
        i += 1;
    }
    t
}

/// Pixel composition policy of a draw call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlitterMode {
    /// Copy opaque pixels, blend translucent ones.
    Normal,
    /// Recolour mapped pixels through the remap table.
    ColourRemap,
    /// Darken the destination under the sprite footprint.
    Transparent,
    /// Recolour the destination under the sprite footprint.
    TransparentRemap,
    /// Like [`BlitterMode::ColourRemap`], with unmapped pixels drawn darkened.
    CrashRemap,
    /// Solid black silhouette.
    BlackRemap,
}

impl BlitterMode {
    pub const ALL: [BlitterMode; 6] = [
        BlitterMode::Normal,
        BlitterMode::ColourRemap,
        BlitterMode::Transparent,
        BlitterMode::TransparentRemap,
        BlitterMode::CrashRemap,
        BlitterMode::BlackRemap,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::ColourRemap => "colour_remap",
            Self::Transparent => "transparent",
            Self::TransparentRemap => "transparent_remap",
            Self::CrashRemap => "crash_remap",
            Self::BlackRemap => "black_remap",
        }
    }
}

impl TryFrom<u8> for BlitterMode {
    type Error = BlitError;

    fn try_from(raw: u8) -> BlitResult<Self> {
        Self::ALL
            .get(usize::from(raw))
            .copied()
            .ok_or_else(|| BlitError::config(format!("unknown blitter mode {raw}")))
    }
}

impl FromStr for BlitterMode {
    type Err = BlitError;

    fn from_str(s: &str) -> BlitResult<Self> {
        let s = s.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|m| m.as_str() == s || (s == "color_remap" && *m == Self::ColourRemap))
            .ok_or_else(|| BlitError::config(format!("unknown blitter mode '{s}'")))
    }
}

impl fmt::Display for BlitterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Compile-time mode tag; each draw loop is instantiated once per tag.
pub(crate) trait ModeTag {
    const MODE: BlitterMode;
}

macro_rules! mode_tags {
    ($($tag:ident => $mode:ident),* $(,)?) => {
        $(
            pub(crate) struct $tag;
            impl ModeTag for $tag {
                const MODE: BlitterMode = BlitterMode::$mode;
            }
        )*
    };
}

mode_tags! {
    NormalTag => Normal,
    ColourRemapTag => ColourRemap,
    TransparentTag => Transparent,
    TransparentRemapTag => TransparentRemap,
    CrashRemapTag => CrashRemap,
    BlackRemapTag => BlackRemap,
}

/// A single draw request.
///
/// `left`/`top` address the destination inside the render target; `skip_left`/`skip_top`
/// clip the sprite; `width`/`height` is the drawn extent. The caller guarantees
/// `skip_left + width <= sprite width`, `skip_top + height <= sprite height` and that the
/// destination rectangle lies inside the target.
#[derive(Clone, Copy, Debug)]
pub struct BlitterParams<'a> {
    pub sprite: &'a EncodedSprite,
    pub zoom: ZoomLevel,
    pub left: usize,
    pub top: usize,
    pub skip_left: usize,
    pub skip_top: usize,
    pub width: usize,
    pub height: usize,
    pub remap: Option<&'a RemapTable>,
}

impl<'a> BlitterParams<'a> {
    /// Unclipped draw of the whole sprite level at `(left, top)`.
    pub fn full(sprite: &'a EncodedSprite, zoom: ZoomLevel, left: usize, top: usize) -> Self {
        let (width, height) = sprite.size(zoom).unwrap_or((0, 0));
        Self {
            sprite,
            zoom,
            left,
            top,
            skip_left: 0,
            skip_top: 0,
            width,
            height,
            remap: None,
        }
    }

    /// Place the sprite with its top-left corner at `(x, y)`, clipped to `clip`.
    ///
    /// Returns `None` when nothing of the sprite is visible.
    pub fn placed(
        sprite: &'a EncodedSprite,
        zoom: ZoomLevel,
        x: i64,
        y: i64,
        clip: Rect,
    ) -> Option<Self> {
        let (sw, sh) = sprite.size(zoom)?;
        let clip_axis = |pos: i64, len: usize, lo: usize, extent: usize| -> Option<(usize, usize, usize)> {
            let lo = lo as i64;
            let hi = lo + extent as i64;
            let start = pos.max(lo);
            let end = (pos + len as i64).min(hi);
            if start >= end {
                return None;
            }
            Some((start as usize, (start - pos) as usize, (end - start) as usize))
        };
        let (left, skip_left, width) = clip_axis(x, sw, clip.left, clip.width)?;
        let (top, skip_top, height) = clip_axis(y, sh, clip.top, clip.height)?;
        Some(Self {
            sprite,
            zoom,
            left,
            top,
            skip_left,
            skip_top,
            width,
            height,
            remap: None,
        })
    }

    pub fn with_remap(mut self, remap: &'a RemapTable) -> Self {
        self.remap = Some(remap);
        self
    }

    /// Destination rectangle covered by this draw.
    pub fn dest_rect(&self) -> Rect {
        Rect::new(self.left, self.top, self.width, self.height)
    }

    /// Remap table for remapping modes; identity when none was supplied.
    pub(crate) fn remap_table(&self) -> &'a RemapTable {
        self.remap.unwrap_or(&IDENTITY_REMAP)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/blitter/params.rs"]
mod tests;
