use crate::{
    blitter::params::BlitterParams,
    sprite::{cursor::SpriteCursor, encode::EncodedLevel},
};

/// Walk the clipped part of a sprite level, one visible run piece at a time.
///
/// `compose(y, x, n, cursor)` receives the destination row and column relative to
/// `(bp.top, bp.left)`, the number of pixels to compose and a cursor on the first of them.
/// Transparent runs are never handed out; they only move the cursors. Every call is for
/// an opaque or a translucent run, never a mix.
pub(crate) fn for_each_visible_run<'s, F>(
    level: &EncodedLevel<'s>,
    bp: &BlitterParams<'_>,
    mut compose: F,
) where
    F: FnMut(usize, usize, usize, &SpriteCursor<'s>),
{
    if bp.width == 0 || bp.height == 0 {
        return;
    }

    let mut cur = SpriteCursor::new(level);
    cur.skip_lines(bp.skip_top);

    for y in 0..bp.height {
        let mut line = cur;
        walk_line(&mut line, bp, y, &mut compose);
        cur.advance_line();
    }
}

fn walk_line<'s, F>(line: &mut SpriteCursor<'s>, bp: &BlitterParams<'_>, y: usize, compose: &mut F)
where
    F: FnMut(usize, usize, usize, &SpriteCursor<'s>),
{
    let skip = bp.skip_left;
    let width = bp.width;

    // Source columns consumed so far.
    let mut x = 0usize;
    while x < skip {
        let n = line.next_run_len();
        if line.pixel(0).a == 0 {
            x += n;
            line.skip_transparent_run();
        } else if x + n > skip {
            // Run straddles the left clip edge: draw its visible tail.
            let d = skip - x;
            line.advance(d);
            let n = (n - d).min(width);
            compose(y, 0, n, line);
            line.advance(n);
            x = skip + n;
        } else {
            x += n;
            line.advance(n);
        }
    }

    // A transparent run may have carried us past the clip edge.
    let mut dx = x - skip;
    while dx < width {
        let n = line.next_run_len().min(width - dx);
        if line.pixel(0).a == 0 {
            line.skip_transparent_run();
        } else {
            compose(y, dx, n, line);
            line.advance(n);
        }
        dx += n;
    }
}
