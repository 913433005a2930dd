//! Integer hashing and the generator's sequential pseudorandom draws.
//!
//! [`mix`] is the multiply-xorshift hash behind [`SeedSequence`]. It wraps at
//! 64 bits. The draws only read the low 20 bits of the final hash, and those
//! depend on the low 40 bits of the state, so the sequence is identical to one
//! computed with unbounded integers.
//!
//! The simplex permutation shuffle reads every bit of a state that is fed back
//! into the hash, so it uses [`mix_unbounded`] on arbitrary-precision integers.
use num_bigint::BigUint;

/// Odd multiplier used by [`mix`].
pub const HASH_MULTIPLIER: u64 = 1_103_515_245;

/// Increment applied to the [`SeedSequence`] state before every draw.
pub const SEQUENCE_INCREMENT: u64 = 12_345;

const DRAW_BITS: u32 = 20;

/// Multiply-xorshift integer hash.
#[inline]
pub fn mix(i: u64) -> u64 {
    let r = HASH_MULTIPLIER.wrapping_mul((i >> 1) ^ i);
    let r = HASH_MULTIPLIER.wrapping_mul(r ^ (r >> 3));
    r ^ (r >> 16)
}

/// [`mix`] without the 64-bit wrap. The result grows by about 60 bits per call.
pub fn mix_unbounded(i: &BigUint) -> BigUint {
    let r = ((i >> 1u32) ^ i) * HASH_MULTIPLIER;
    let r = (&r ^ (&r >> 3u32)) * HASH_MULTIPLIER;
    &r ^ (&r >> 16u32)
}

/// Independent random streams derived from one user seed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stream {
    /// Gradient directions of [`crate::noise::GradientNoise`].
    Gradients,
    /// Candidate positions drawn while searching for a restart point.
    Restarts,
}

impl Stream {
    fn salt(self) -> u64 {
        match self {
            Stream::Gradients => 0x9E37_79B9_7F4A_7C15,
            Stream::Restarts => 0xBF58_476D_1CE4_E5B9,
        }
    }
}

/// Derives a decorrelated 64-bit seed for `stream` from `base_seed`.
pub fn seed_for_stream(base_seed: u64, stream: Stream) -> u64 {
    mix_u64(base_seed ^ stream.salt())
}

#[inline]
fn mix_u64(mut x: u64) -> u64 {
    x ^= x >> 30;
    x = x.wrapping_mul(0xBF58476D1CE4E5B9);
    x ^= x >> 27;
    x = x.wrapping_mul(0x94D049BB133111EB);
    x ^ (x >> 31)
}

/// Sequential draws in `[0, 1)` with a resolution of 2^-20.
///
/// The state only advances by [`SEQUENCE_INCREMENT`]. The hashed value is not
/// fed back.
#[derive(Clone, Debug)]
pub struct SeedSequence {
    state: u64,
}

impl SeedSequence {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Current raw state.
    pub fn state(&self) -> u64 {
        self.state
    }

    /// Next raw 20-bit draw.
    pub fn next_bits(&mut self) -> u32 {
        self.state = self.state.wrapping_add(SEQUENCE_INCREMENT);
        (mix(self.state) & ((1 << DRAW_BITS) - 1)) as u32
    }

    /// Next draw in `[0, 1)`.
    pub fn next_unit(&mut self) -> f64 {
        self.next_bits() as f64 / (1u64 << DRAW_BITS) as f64
    }

    /// Maps the next draw `v` to `v * min + (1 - v) * max`.
    ///
    /// The draw weights `min`: a draw of 0 gives exactly `max`, and draws close
    /// to 1 approach `min`. The result always lies between the two bounds.
    pub fn range(&mut self, min: f64, max: f64) -> f64 {
        let v = self.next_unit();
        v * min + (1.0 - v) * max
    }
}
