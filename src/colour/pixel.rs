/// 32bpp screen colour: four 8-bit channels packed as `a << 24 | r << 16 | g << 8 | b`.
///
/// `a == 0` is fully transparent, `a == 255` fully opaque; anything in between is
/// alpha-composited against the destination.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Colour {
    /// Opaque black.
    pub const BLACK: Colour = Colour::new(0, 0, 0);
    /// Fully transparent black, the placeholder in transparent runs.
    pub const TRANSPARENT: Colour = Colour::with_alpha(0, 0, 0, 0);

    /// Opaque colour from RGB.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn with_alpha(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Packed 32-bit word.
    pub const fn data(self) -> u32 {
        (self.a as u32) << 24 | (self.r as u32) << 16 | (self.g as u32) << 8 | self.b as u32
    }

    pub const fn from_data(data: u32) -> Self {
        Self {
            a: (data >> 24) as u8,
            r: (data >> 16) as u8,
            g: (data >> 8) as u8,
            b: data as u8,
        }
    }

    /// Encoded stream / region buffer representation.
    pub const fn to_le_bytes(self) -> [u8; 4] {
        self.data().to_le_bytes()
    }

    pub const fn from_le_bytes(bytes: [u8; 4]) -> Self {
        Self::from_data(u32::from_le_bytes(bytes))
    }

    /// Straight RGBA byte order, as used by image files.
    pub const fn to_rgba8(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    pub const fn from_rgba8(px: [u8; 4]) -> Self {
        Self::with_alpha(px[0], px[1], px[2], px[3])
    }
}

impl From<u32> for Colour {
    fn from(data: u32) -> Self {
        Self::from_data(data)
    }
}

impl From<Colour> for u32 {
    fn from(c: Colour) -> Self {
        c.data()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/colour/pixel.rs"]
mod tests;
