use anyhow::Context;

use crate::{
    foundation::error::{BlitError, BlitResult},
    sprite::encode::RawSprite,
};

/// Decode an encoded image (PNG, BMP, ...) into a raw sprite with no mapping channel.
pub fn decode_sprite(bytes: &[u8]) -> BlitResult<RawSprite> {
    let rgba = image::load_from_memory(bytes)
        .context("decode sprite image from memory")?
        .to_rgba8();
    let (width, height) = checked_dimensions(rgba.dimensions())?;
    RawSprite::from_rgba8(width, height, rgba.as_raw())
}

/// Decode a colour image plus a same-sized mask whose red channel is the mapping channel.
pub fn decode_sprite_with_mask(bytes: &[u8], mask: &[u8]) -> BlitResult<RawSprite> {
    let sprite = decode_sprite(bytes)?;
    let mask = image::load_from_memory(mask)
        .context("decode mapping mask from memory")?
        .to_rgba8();
    if mask.dimensions() != (u32::from(sprite.width), u32::from(sprite.height)) {
        return Err(BlitError::decode(format!(
            "mask is {}x{}, sprite is {}x{}",
            mask.width(),
            mask.height(),
            sprite.width,
            sprite.height
        )));
    }
    let m = mask.pixels().map(|px| px.0[0]).collect::<Vec<_>>();
    sprite.with_mapping(&m)
}

fn checked_dimensions((w, h): (u32, u32)) -> BlitResult<(u16, u16)> {
    let w = u16::try_from(w).map_err(|_| BlitError::decode(format!("sprite width {w} too large")))?;
    let h =
        u16::try_from(h).map_err(|_| BlitError::decode(format!("sprite height {h} too large")))?;
    Ok((w, h))
}

#[cfg(test)]
#[path = "../../tests/unit/sprite/decode.rs"]
mod tests;
