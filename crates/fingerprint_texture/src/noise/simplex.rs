//! 2D simplex noise over a seeded permutation table.
use glam::DVec2;
use num_bigint::BigUint;

use crate::noise::hash::mix_unbounded;

/// Skew factor for 2D: `(sqrt(3) - 1) / 2`.
const F2: f64 = 0.366_025_403_784_438_6;
/// Unskew factor for 2D: `(3 - sqrt(3)) / 6`.
const G2: f64 = 0.211_324_865_405_187_13;

/// x,y parts of the 12 edge gradients of a cube.
const GRAD: [[f64; 2]; 12] = [
    [1.0, 1.0],
    [-1.0, 1.0],
    [1.0, -1.0],
    [-1.0, -1.0],
    [1.0, 0.0],
    [-1.0, 0.0],
    [1.0, 0.0],
    [-1.0, 0.0],
    [0.0, 1.0],
    [0.0, -1.0],
    [0.0, 1.0],
    [0.0, -1.0],
];

/// Simplex noise generator. Pure once constructed.
#[derive(Clone)]
pub struct SimplexNoise {
    perm: [u8; 512],
}

impl std::fmt::Debug for SimplexNoise {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimplexNoise")
            .field("perm", &&self.perm[..8])
            .finish_non_exhaustive()
    }
}

impl SimplexNoise {
    /// Builds the permutation table by a hash-driven Fisher-Yates shuffle.
    ///
    /// The shuffle state is fed back through the hash without wrapping.
    pub fn new(seed: u64) -> Self {
        let mut perm = [0u8; 512];
        for (i, p) in perm.iter_mut().enumerate() {
            *p = (i & 255) as u8;
        }

        let mut state = BigUint::from(seed);
        for i in 0..255usize {
            state = mix_unbounded(&(state + i as u64));
            let offset = &state % (256 - i) as u64;
            let r = offset.to_u64_digits().first().copied().unwrap_or(0) as usize + i;
            let swp = perm[i];
            perm[i] = perm[r];
            perm[i + 256] = perm[r];
            perm[r] = swp;
            perm[r + 256] = swp;
        }

        Self { perm }
    }

    /// The 512-entry table; entry `i + 256` mirrors entry `i`.
    pub fn permutation(&self) -> &[u8; 512] {
        &self.perm
    }

    #[inline]
    fn gradient(&self, i: usize, j: usize) -> DVec2 {
        let g = GRAD[self.perm[i + self.perm[j] as usize] as usize % 12];
        DVec2::new(g[0], g[1])
    }

    #[inline]
    fn corner(&self, offset: DVec2, i: usize, j: usize) -> f64 {
        let t = 0.5 - offset.length_squared();
        if t <= 0.0 {
            0.0
        } else {
            t.powi(4) * self.gradient(i, j).dot(offset)
        }
    }

    /// Noise value at `p`, roughly within `[-1, 1]`.
    pub fn noise(&self, p: DVec2) -> f64 {
        let s = (p.x + p.y) * F2;
        let cx = (p.x + s).floor();
        let cy = (p.y + s).floor();
        let i = (cx as i64 & 255) as usize;
        let j = (cy as i64 & 255) as usize;
        let t = (cx + cy) * G2;

        let p0 = p - DVec2::new(cx - t, cy - t);
        let (o0, o1) = if p0.x > p0.y { (1, 0) } else { (0, 1) };
        let p1 = p0 - DVec2::new(o0 as f64, o1 as f64) + DVec2::splat(G2);
        let p2 = p0 - DVec2::splat(1.0 - 2.0 * G2);

        let n = self.corner(p0, i, j)
            + self.corner(p1, i + o0, j + o1)
            + self.corner(p2, i + 1, j + 1);

        70.0 * n
    }
}
