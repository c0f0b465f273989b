use super::*;

#[test]
fn realize_static_pixel_is_identity() {
    let pal = Palette::default();
    let c = Colour::new(1, 2, 3);
    assert_eq!(realize_blended_colour(0, c, &pal), c);
}

#[test]
fn realize_animated_pixel_uses_palette_at_carried_brightness() {
    let mut pal = Palette::default();
    pal.set(230, Colour::new(40, 80, 120));

    // Black carrier means default brightness, so the palette entry is used as is.
    assert_eq!(
        realize_blended_colour(230, Colour::new(0, 0, 0), &pal),
        Colour::new(40, 80, 120)
    );
    // Brightness 64 halves it.
    assert_eq!(pal.realize(230, Colour::new(64, 0, 0)), Colour::new(20, 40, 60));
}

#[test]
fn from_rgb_triplets_pads_with_black_and_rejects_oversize() {
    let pal = Palette::from_rgb_triplets(&[[1, 2, 3], [4, 5, 6]]).unwrap();
    assert_eq!(pal.lookup(1), Colour::new(4, 5, 6));
    assert_eq!(pal.lookup(200), Colour::BLACK);

    let too_many = vec![[0u8; 3]; PALETTE_SIZE + 1];
    assert!(Palette::from_rgb_triplets(&too_many).is_err());
}

#[test]
fn nearest_colour_skips_reserved_and_animated_entries() {
    let mut colours = [Colour::new(0, 0, 0); PALETTE_SIZE];
    colours[0] = Colour::new(250, 0, 0);
    colours[PALETTE_ANIM_START] = Colour::new(250, 0, 0);
    colours[7] = Colour::new(200, 10, 10);
    let pal = Palette::new(colours);

    assert_eq!(pal.nearest_colour_index(Colour::new(250, 0, 0)), 7);
}

#[test]
fn nearest_colour_finds_exact_match_in_default_palette() {
    let pal = Palette::default();
    for idx in [1u8, 43, 120, 216, 220] {
        let c = pal.lookup(idx);
        assert_eq!(pal.lookup(pal.nearest_colour_index(c)), c);
    }
}

#[test]
fn cycle_range_rotates_one_step() {
    let mut pal = Palette::default();
    let before = *pal.colours();
    pal.cycle_animated();
    for k in 0..PALETTE_ANIM_SIZE - 1 {
        assert_eq!(
            pal.lookup((PALETTE_ANIM_START + k) as u8),
            before[PALETTE_ANIM_START + k + 1]
        );
    }
    assert_eq!(pal.lookup(255), before[PALETTE_ANIM_START]);
    assert_eq!(pal.lookup(5), before[5]);
}

#[test]
fn cycle_range_clamps_at_palette_end() {
    let mut pal = Palette::default();
    let before = pal.clone();
    pal.cycle_range(250, 100);
    assert_eq!(pal.lookup(250), before.lookup(251));
    assert_eq!(pal.lookup(255), before.lookup(250));
}
