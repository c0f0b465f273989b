use crate::{
    colour::pixel::Colour,
    sprite::encode::{EncodedLevel, LINE_PREFIX_BYTES},
};

/// Position inside one length-prefixed stream.
#[derive(Clone, Copy, Debug)]
struct LineStream<'s> {
    data: &'s [u8],
    line_start: usize,
    line_len: usize,
    pos: usize,
}

impl<'s> LineStream<'s> {
    fn new(data: &'s [u8]) -> Self {
        let mut s = Self {
            data,
            line_start: 0,
            line_len: 0,
            pos: 0,
        };
        s.enter_line();
        s
    }

    fn enter_line(&mut self) {
        let prefix = self
            .data
            .get(self.line_start..self.line_start + LINE_PREFIX_BYTES);
        // Past the last line there is no prefix; the caller never reads from there.
        self.line_len = prefix.map_or(0, |p| u32::from_le_bytes([p[0], p[1], p[2], p[3]]) as usize);
        self.pos = self.line_start + LINE_PREFIX_BYTES;
    }

    fn advance_line(&mut self) {
        self.line_start += self.line_len;
        self.enter_line();
    }
}

/// Lockstep cursor over the pixel and remap streams of one encoded zoom level.
///
/// Lines are left with [`SpriteCursor::advance_line`], which jumps by the stored line
/// length no matter how far the cursor got inside the line.
#[derive(Clone, Copy, Debug)]
pub struct SpriteCursor<'s> {
    px: LineStream<'s>,
    n: LineStream<'s>,
}

impl<'s> SpriteCursor<'s> {
    pub fn new(level: &EncodedLevel<'s>) -> Self {
        Self {
            px: LineStream::new(level.px),
            n: LineStream::new(level.n),
        }
    }

    pub fn advance_line(&mut self) {
        self.px.advance_line();
        self.n.advance_line();
    }

    pub fn skip_lines(&mut self, lines: usize) {
        for _ in 0..lines {
            self.advance_line();
        }
    }

    /// Read the pixel count of the next run.
    #[inline]
    pub fn next_run_len(&mut self) -> usize {
        let at = self.n.pos;
        self.n.pos += 2;
        usize::from(u16::from_le_bytes([self.n.data[at], self.n.data[at + 1]]))
    }

    /// Pixel `i` positions ahead of the cursor.
    #[inline]
    pub fn pixel(&self, i: usize) -> Colour {
        let at = self.px.pos + i * 4;
        let d = self.px.data;
        Colour::from_le_bytes([d[at], d[at + 1], d[at + 2], d[at + 3]])
    }

    /// Mapping record `i` positions ahead of the cursor.
    #[inline]
    pub fn record(&self, i: usize) -> u16 {
        let at = self.n.pos + i * 2;
        u16::from_le_bytes([self.n.data[at], self.n.data[at + 1]])
    }

    /// Remap / animation class of record `i`.
    #[inline]
    pub fn class(&self, i: usize) -> u8 {
        self.record(i) as u8
    }

    /// Brightness carried by record `i`.
    #[inline]
    pub fn brightness(&self, i: usize) -> u8 {
        (self.record(i) >> 8) as u8
    }

    /// Consume `count` pixels and their records.
    #[inline]
    pub fn advance(&mut self, count: usize) {
        self.px.pos += count * 4;
        self.n.pos += count * 2;
    }

    /// Consume the placeholder pixel and record of a transparent run.
    #[inline]
    pub fn skip_transparent_run(&mut self) {
        self.advance(1);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sprite/cursor.rs"]
mod tests;
