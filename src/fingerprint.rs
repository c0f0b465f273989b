use xxhash_rust::xxh3::Xxh3;

use crate::blitter::target::RenderTarget;

const XXH3_SEED: u64 = 0x40b9_a11e_7c3d_5e21;

/// Stable digest of a target's visible pixels, separately for each buffer.
///
/// Padding between `width` and `pitch` is not hashed, so equal images compare equal
/// whatever their pitch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BufferFingerprint {
    pub colour: u64,
    /// Digest of the animation buffer; a target without one hashes as all zeros.
    pub anim: u64,
}

pub fn fingerprint_target(target: &RenderTarget<'_>) -> BufferFingerprint {
    let mut colour = StableHasher::new();
    let mut anim = StableHasher::new();
    colour.write_dims(target.width(), target.height());
    anim.write_dims(target.width(), target.height());

    let zeros = vec![0u8; target.width()];
    for y in 0..target.height() {
        let start = target.offset(0, y);
        for c in &target.colour()[start..start + target.width()] {
            colour.write_bytes(&c.to_le_bytes());
        }
        match target.anim() {
            Some(a) => anim.write_bytes(&a[start..start + target.width()]),
            None => anim.write_bytes(&zeros),
        }
    }

    BufferFingerprint {
        colour: colour.finish(),
        anim: anim.finish(),
    }
}

struct StableHasher {
    inner: Xxh3,
}

impl StableHasher {
    fn new() -> Self {
        Self {
            inner: Xxh3::with_seed(XXH3_SEED),
        }
    }

    fn write_bytes(&mut self, b: &[u8]) {
        self.inner.update(b);
    }

    fn write_dims(&mut self, width: usize, height: usize) {
        self.write_bytes(&(width as u64).to_le_bytes());
        self.write_bytes(&(height as u64).to_le_bytes());
    }

    fn finish(&self) -> u64 {
        self.inner.digest()
    }
}

#[cfg(test)]
#[path = "../tests/unit/fingerprint.rs"]
mod tests;
