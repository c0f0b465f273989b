use std::str::FromStr;

use crate::foundation::error::{BlitError, BlitResult};

/// Discrete scale at which a sprite carries a pre-encoded variant.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ZoomLevel {
    /// Zoomed in 4 times.
    In4x = 0,
    /// Zoomed in 2 times.
    In2x = 1,
    /// The unscaled sprite size.
    Normal = 2,
    /// Zoomed out 2 times.
    Out2x = 3,
    /// Zoomed out 4 times.
    Out4x = 4,
    /// Zoomed out 8 times.
    Out8x = 5,
}

/// Number of zoom levels a sprite can carry.
pub const ZOOM_LVL_COUNT: usize = 6;

impl ZoomLevel {
    /// All zoom levels, most zoomed in first.
    pub const ALL: [ZoomLevel; ZOOM_LVL_COUNT] = [
        ZoomLevel::In4x,
        ZoomLevel::In2x,
        ZoomLevel::Normal,
        ZoomLevel::Out2x,
        ZoomLevel::Out4x,
        ZoomLevel::Out8x,
    ];

    /// Slot of this level in per-zoom tables.
    pub fn index(self) -> usize {
        self as usize
    }
}

impl FromStr for ZoomLevel {
    type Err = BlitError;

    fn from_str(s: &str) -> BlitResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "in4x" | "in_4x" => Ok(Self::In4x),
            "in2x" | "in_2x" => Ok(Self::In2x),
            "normal" | "1x" => Ok(Self::Normal),
            "out2x" | "out_2x" => Ok(Self::Out2x),
            "out4x" | "out_4x" => Ok(Self::Out4x),
            "out8x" | "out_8x" => Ok(Self::Out8x),
            other => Err(BlitError::config(format!("unknown zoom level '{other}'"))),
        }
    }
}

/// Axis-aligned rectangle in buffer pixel coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rect {
    pub left: usize,
    pub top: usize,
    pub width: usize,
    pub height: usize,
}

impl Rect {
    pub fn new(left: usize, top: usize, width: usize, height: usize) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Exclusive right edge.
    pub fn right(&self) -> usize {
        self.left + self.width
    }

    /// Exclusive bottom edge.
    pub fn bottom(&self) -> usize {
        self.top + self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn contains(&self, x: usize, y: usize) -> bool {
        x >= self.left && x < self.right() && y >= self.top && y < self.bottom()
    }

    pub fn area(&self) -> usize {
        self.width * self.height
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
