use super::*;
use crate::{
    blitter::{
        params::{
            BlackRemapTag, ColourRemapTag, CrashRemapTag, IDENTITY_REMAP, NormalTag,
            TransparentRemapTag, TransparentTag,
        },
        target::ScreenBuffers,
    },
    foundation::core::ZoomLevel,
    sprite::encode::{EncodedSprite, RawSprite, SourcePixel, SpriteCollection, encode_sprite},
};

fn row_sprite(pixels: Vec<SourcePixel>) -> EncodedSprite {
    let w = pixels.len() as u16;
    encode_sprite(&SpriteCollection::single(RawSprite::new(w, 1, pixels).unwrap())).unwrap()
}

fn run<M: ModeTag>(sprite: &EncodedSprite, screen: &mut ScreenBuffers, remap: &RemapTable) {
    let palette = Palette::default();
    let bp = BlitterParams::full(sprite, ZoomLevel::Normal, 0, 0).with_remap(remap);
    draw::<M>(&mut screen.colour_target(), &bp, &palette);
}

#[test]
fn normal_resolves_mapped_pixels_at_their_brightness() {
    let mut bright = SourcePixel::mapped(40);
    bright.r = 255;
    let sprite = row_sprite(vec![SourcePixel::mapped(40), bright]);
    let mut screen = ScreenBuffers::new(2, 1);
    run::<NormalTag>(&sprite, &mut screen, &IDENTITY_REMAP);

    let palette = Palette::default();
    assert_eq!(screen.colour[0], palette.lookup(40));
    assert_eq!(
        screen.colour[1],
        adjust_brightness(palette.lookup(40), 255)
    );
    assert!(screen.anim.iter().all(|&a| a == 0));
}

#[test]
fn normal_blends_translucent_pixels() {
    let sprite = row_sprite(vec![SourcePixel::rgba(200, 100, 0, 128)]);
    let mut screen = ScreenBuffers::new(1, 1);
    run::<NormalTag>(&sprite, &mut screen, &IDENTITY_REMAP);
    assert_eq!(screen.colour[0], Colour::new(100, 50, 0));
}

#[test]
fn colour_remap_resolves_through_the_palette() {
    let sprite = row_sprite(vec![SourcePixel::mapped(5), SourcePixel::mapped(6)]);
    let mut remap = IDENTITY_REMAP;
    remap[5] = 0;
    remap[6] = 41;
    let mut screen = ScreenBuffers::new(2, 1);
    screen.fill(Colour::new(1, 2, 3));
    run::<ColourRemapTag>(&sprite, &mut screen, &remap);

    assert_eq!(screen.colour[0], Colour::new(1, 2, 3));
    assert_eq!(screen.colour[1], Palette::default().lookup(41));
}

#[test]
fn crash_remap_greys_unmapped_pixels() {
    let sprite = row_sprite(vec![SourcePixel::rgba(255, 255, 255, 255)]);
    let mut screen = ScreenBuffers::new(1, 1);
    run::<CrashRemapTag>(&sprite, &mut screen, &IDENTITY_REMAP);
    assert_eq!(screen.colour[0], Colour::new(170, 170, 170));
}

#[test]
fn black_remap_and_transparent() {
    let sprite = row_sprite(vec![SourcePixel::rgba(9, 9, 9, 255)]);

    let mut screen = ScreenBuffers::new(1, 1);
    screen.fill(Colour::new(200, 100, 40));
    run::<BlackRemapTag>(&sprite, &mut screen, &IDENTITY_REMAP);
    assert_eq!(screen.colour[0], Colour::BLACK);

    screen.fill(Colour::new(200, 100, 40));
    run::<TransparentTag>(&sprite, &mut screen, &IDENTITY_REMAP);
    assert_eq!(screen.colour[0], Colour::new(150, 75, 30));
}

#[test]
fn transparent_remap_goes_through_the_nearest_palette_index() {
    let sprite = row_sprite(vec![SourcePixel::rgba(9, 9, 9, 255)]);
    let palette = Palette::default();
    let mut remap = IDENTITY_REMAP;
    remap[40] = 41;

    let mut screen = ScreenBuffers::new(1, 1);
    screen.colour[0] = palette.lookup(40);
    run::<TransparentRemapTag>(&sprite, &mut screen, &remap);
    assert_eq!(screen.colour[0], palette.lookup(41));
}

#[test]
fn translucent_mapped_pixels_blend_the_plain_palette_entry() {
    let mut px = SourcePixel::mapped(230);
    px.r = 40;
    px.a = 160;
    let sprite = row_sprite(vec![px]);

    let mut screen = ScreenBuffers::new(1, 1);
    screen.fill(Colour::new(10, 20, 30));
    run::<NormalTag>(&sprite, &mut screen, &IDENTITY_REMAP);
    // Palette entry 230 is (14, 29, 157); the record brightness of 40 is not applied.
    assert_eq!(screen.colour[0], Colour::new(12, 25, 109));

    let mut remap = IDENTITY_REMAP;
    remap[230] = 40;
    screen.fill(Colour::new(10, 20, 30));
    run::<ColourRemapTag>(&sprite, &mut screen, &remap);
    assert_eq!(
        screen.colour[0],
        compose_colour_pa_no_check(Palette::default().lookup(40), 160, Colour::new(10, 20, 30))
    );
}
