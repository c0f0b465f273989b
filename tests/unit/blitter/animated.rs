use super::*;
use crate::{
    blitter::{
        params::{
            BlackRemapTag, ColourRemapTag, CrashRemapTag, IDENTITY_REMAP, NormalTag,
            TransparentRemapTag, TransparentTag,
        },
        target::ScreenBuffers,
    },
    colour::compose::adjust_brightness,
    foundation::core::ZoomLevel,
    sprite::encode::{EncodedSprite, RawSprite, SourcePixel, SpriteCollection, encode_sprite},
};

fn row_sprite(pixels: Vec<SourcePixel>) -> EncodedSprite {
    let w = pixels.len() as u16;
    encode_sprite(&SpriteCollection::single(RawSprite::new(w, 1, pixels).unwrap())).unwrap()
}

const RED: SourcePixel = SourcePixel::rgba(255, 0, 0, 255);
const GREEN: SourcePixel = SourcePixel::rgba(0, 255, 0, 255);
const BLUE: SourcePixel = SourcePixel::rgba(0, 0, 255, 255);
const YELLOW: SourcePixel = SourcePixel::rgba(255, 255, 0, 255);
const CLEAR: SourcePixel = SourcePixel::rgba(0, 0, 0, 0);

#[test]
fn normal_opaque_copies_colours_and_clears_animation() {
    let sprite = row_sprite(vec![RED, GREEN, BLUE, YELLOW]);
    let mut screen = ScreenBuffers::new(4, 1);
    screen.anim.fill(231);
    let palette = Palette::default();

    let bp = BlitterParams::full(&sprite, ZoomLevel::Normal, 0, 0);
    draw::<NormalTag>(&mut screen.target(), &bp, &palette);

    assert_eq!(
        screen.colour,
        vec![
            Colour::new(255, 0, 0),
            Colour::new(0, 255, 0),
            Colour::new(0, 0, 255),
            Colour::new(255, 255, 0),
        ]
    );
    assert_eq!(screen.anim, vec![0, 0, 0, 0]);
}

#[test]
fn normal_opaque_mapped_pixel_stores_its_class() {
    let sprite = row_sprite(vec![SourcePixel::mapped(230)]);
    let mut screen = ScreenBuffers::new(1, 1);
    let palette = Palette::default();

    draw::<NormalTag>(
        &mut screen.target(),
        &BlitterParams::full(&sprite, ZoomLevel::Normal, 0, 0),
        &palette,
    );

    assert_eq!(screen.anim[0], 230);
    assert_eq!(screen.colour[0], Colour::BLACK);
    assert_eq!(palette.realize(screen.anim[0], screen.colour[0]), palette.lookup(230));
}

#[test]
fn normal_translucent_blends_over_the_realized_destination() {
    let sprite = row_sprite(vec![SourcePixel::rgba(200, 0, 0, 128)]);
    let mut palette = Palette::default();
    palette.set(230, Colour::new(0, 0, 200));

    let mut screen = ScreenBuffers::new(1, 1);
    screen.anim[0] = 230;
    draw::<NormalTag>(
        &mut screen.target(),
        &BlitterParams::full(&sprite, ZoomLevel::Normal, 0, 0),
        &palette,
    );

    assert_eq!(screen.colour[0], Colour::new(100, 0, 100));
    assert_eq!(screen.anim[0], 0);
}

#[test]
fn normal_translucent_mapped_pixel_ends_up_static() {
    let mut px = SourcePixel::mapped(40);
    px.a = 128;
    let sprite = row_sprite(vec![px]);
    let palette = Palette::default();

    let mut screen = ScreenBuffers::new(1, 1);
    draw::<NormalTag>(
        &mut screen.target(),
        &BlitterParams::full(&sprite, ZoomLevel::Normal, 0, 0),
        &palette,
    );

    // Palette entry 40 is (51, 0, 153); half of it over black.
    assert_eq!(screen.colour[0], Colour::new(25, 0, 76));
    assert_eq!(screen.anim[0], 0);
}

#[test]
fn transparent_runs_leave_the_destination_alone() {
    let sprite = row_sprite(vec![RED, CLEAR, CLEAR, BLUE]);
    let mut screen = ScreenBuffers::new(4, 1);
    screen.fill(Colour::new(7, 7, 7));
    screen.anim[1] = 240;
    let palette = Palette::default();

    draw::<NormalTag>(
        &mut screen.target(),
        &BlitterParams::full(&sprite, ZoomLevel::Normal, 0, 0),
        &palette,
    );

    assert_eq!(screen.colour[1], Colour::new(7, 7, 7));
    assert_eq!(screen.colour[2], Colour::new(7, 7, 7));
    assert_eq!(screen.anim[1], 240);
    assert_eq!(screen.colour[3], Colour::new(0, 0, 255));
}

#[test]
fn colour_remap_with_zero_entry_skips_the_pixel() {
    let sprite = row_sprite(vec![SourcePixel::mapped(5), SourcePixel::mapped(6)]);
    let mut remap = IDENTITY_REMAP;
    remap[5] = 0;
    remap[6] = 229;
    let palette = Palette::default();

    let mut screen = ScreenBuffers::new(2, 1);
    screen.fill(Colour::new(9, 8, 7));
    screen.anim[0] = 233;
    let bp = BlitterParams::full(&sprite, ZoomLevel::Normal, 0, 0).with_remap(&remap);
    draw::<ColourRemapTag>(&mut screen.target(), &bp, &palette);

    assert_eq!(screen.colour[0], Colour::new(9, 8, 7));
    assert_eq!(screen.anim[0], 233);
    assert_eq!(screen.colour[1], Colour::BLACK);
    assert_eq!(screen.anim[1], 229);
}

#[test]
fn colour_remap_copies_unmapped_pixels() {
    let sprite = row_sprite(vec![GREEN]);
    let palette = Palette::default();
    let mut screen = ScreenBuffers::new(1, 1);
    screen.anim[0] = 240;

    let bp = BlitterParams::full(&sprite, ZoomLevel::Normal, 0, 0);
    draw::<ColourRemapTag>(&mut screen.target(), &bp, &palette);

    assert_eq!(screen.colour[0], Colour::new(0, 255, 0));
    assert_eq!(screen.anim[0], 0);
}

#[test]
fn crash_remap_darkens_unmapped_pixels() {
    let sprite = row_sprite(vec![SourcePixel::rgba(255, 255, 255, 255)]);
    let palette = Palette::default();
    let mut screen = ScreenBuffers::new(1, 1);

    let bp = BlitterParams::full(&sprite, ZoomLevel::Normal, 0, 0);
    draw::<CrashRemapTag>(&mut screen.target(), &bp, &palette);

    assert_eq!(screen.colour[0], Colour::new(170, 170, 170));
    assert_eq!(screen.anim[0], 0);
}

#[test]
fn black_remap_paints_the_silhouette() {
    let sprite = row_sprite(vec![RED, CLEAR, SourcePixel::rgba(1, 2, 3, 40)]);
    let palette = Palette::default();
    let mut screen = ScreenBuffers::new(3, 1);
    screen.fill(Colour::new(50, 50, 50));
    screen.anim.fill(235);

    let bp = BlitterParams::full(&sprite, ZoomLevel::Normal, 0, 0);
    draw::<BlackRemapTag>(&mut screen.target(), &bp, &palette);

    assert_eq!(screen.colour[0], Colour::BLACK);
    assert_eq!(screen.colour[1], Colour::new(50, 50, 50));
    assert_eq!(screen.colour[2], Colour::BLACK);
    assert_eq!(screen.anim, vec![0, 235, 0]);
}

#[test]
fn transparent_darkens_static_and_animated_pixels() {
    let sprite = row_sprite(vec![RED, RED]);
    let palette = Palette::default();
    let mut screen = ScreenBuffers::new(2, 1);
    screen.colour[0] = Colour::new(200, 100, 40);
    screen.anim[1] = 230;

    let bp = BlitterParams::full(&sprite, ZoomLevel::Normal, 0, 0);
    draw::<TransparentTag>(&mut screen.target(), &bp, &palette);

    assert_eq!(screen.colour[0], Colour::new(150, 75, 30));
    assert_eq!(screen.anim[0], 0);
    // Animated pixel keeps its class; only the brightness carrier is darkened.
    assert_eq!(screen.colour[1], Colour::new(96, 0, 0));
    assert_eq!(screen.anim[1], 230);
    assert_eq!(
        palette.realize(screen.anim[1], screen.colour[1]),
        adjust_brightness(palette.lookup(230), 96)
    );
}

#[test]
fn transparent_translucent_scales_by_alpha_and_freezes_animation() {
    let sprite = row_sprite(vec![SourcePixel::rgba(0, 0, 0, 128)]);
    let palette = Palette::default();
    let mut screen = ScreenBuffers::new(1, 1);
    screen.colour[0] = Colour::new(200, 100, 40);

    let bp = BlitterParams::full(&sprite, ZoomLevel::Normal, 0, 0);
    draw::<TransparentTag>(&mut screen.target(), &bp, &palette);

    assert_eq!(screen.colour[0], Colour::new(175, 87, 35));
    assert_eq!(screen.anim[0], 0);
}

#[test]
fn transparent_remap_recolours_the_footprint() {
    let sprite = row_sprite(vec![RED, RED]);
    let palette = Palette::default();
    let mut remap = IDENTITY_REMAP;
    remap[40] = 41;
    remap[230] = 231;

    let mut screen = ScreenBuffers::new(2, 1);
    screen.colour[0] = palette.lookup(40);
    screen.anim[1] = 230;

    let bp = BlitterParams::full(&sprite, ZoomLevel::Normal, 0, 0).with_remap(&remap);
    draw::<TransparentRemapTag>(&mut screen.target(), &bp, &palette);

    assert_eq!(screen.colour[0], palette.lookup(41));
    assert_eq!(screen.anim[0], 0);
    assert_eq!(screen.colour[1], Colour::BLACK);
    assert_eq!(screen.anim[1], 231);
}

#[test]
fn clipped_draw_writes_only_the_visible_window() {
    let sprite = row_sprite(vec![RED, GREEN, BLUE, YELLOW]);
    let palette = Palette::default();
    let mut screen = ScreenBuffers::new(4, 1);

    let mut bp = BlitterParams::full(&sprite, ZoomLevel::Normal, 1, 0);
    bp.skip_left = 1;
    bp.width = 2;
    draw::<NormalTag>(&mut screen.target(), &bp, &palette);

    assert_eq!(
        screen.colour,
        vec![
            Colour::BLACK,
            Colour::new(0, 255, 0),
            Colour::new(0, 0, 255),
            Colour::BLACK,
        ]
    );
}

#[test]
fn missing_zoom_level_draws_nothing() {
    let sprite = row_sprite(vec![RED]);
    let palette = Palette::default();
    let mut screen = ScreenBuffers::new(1, 1);

    let mut bp = BlitterParams::full(&sprite, ZoomLevel::Normal, 0, 0);
    bp.zoom = ZoomLevel::Out8x;
    draw::<NormalTag>(&mut screen.target(), &bp, &palette);

    assert_eq!(screen.colour[0], Colour::BLACK);
}

#[test]
fn target_without_animation_buffer_falls_back_to_plain_output() {
    let sprite = row_sprite(vec![SourcePixel::mapped(230)]);
    let palette = Palette::default();
    let mut screen = ScreenBuffers::new(1, 1);

    let bp = BlitterParams::full(&sprite, ZoomLevel::Normal, 0, 0);
    draw::<NormalTag>(&mut screen.colour_target(), &bp, &palette);

    assert_eq!(screen.colour[0], palette.lookup(230));
    assert_eq!(screen.anim[0], 0);
}
