//! Position-derived pseudorandomness. Every draw is a pure function of
//! coordinates, the world seed, and a per-purpose salt.

pub const SALT_ORE: u32 = 0x0A7E_5EED;
pub const SALT_LEAVES: u32 = 0x1EAF_0001;
pub const SALT_BUSH: u32 = 0xB05C_0002;
pub const SALT_ROCK: u32 = 0x0C0C_0003;
pub const SALT_COVER: u32 = 0xC0DE_0004;
pub const SALT_COVER_KIND: u32 = 0xC0DE_0005;
pub const SALT_FEATURE: u32 = 0xFEA7_0006;

#[inline]
pub fn hash2(ix: i32, iz: i32, seed: u32) -> u32 {
    let h = (ix as u32).wrapping_mul(0x85eb_ca6b)
        ^ (iz as u32).wrapping_mul(0xc2b2_ae35)
        ^ seed.wrapping_mul(0x27d4_eb2d);
    finalize(h)
}

#[inline]
pub fn hash3(ix: i32, iy: i32, iz: i32, seed: u32) -> u32 {
    let h = (ix as u32).wrapping_mul(0x85eb_ca6b)
        ^ (iy as u32).wrapping_mul(0x1656_67b1)
        ^ (iz as u32).wrapping_mul(0xc2b2_ae35)
        ^ seed.wrapping_mul(0x27d4_eb2d);
    finalize(h)
}

#[inline]
fn finalize(mut h: u32) -> u32 {
    h ^= h >> 16;
    h = h.wrapping_mul(0x7feb_352d);
    h ^= h >> 15;
    h = h.wrapping_mul(0x846c_a68b);
    h ^= h >> 16;
    h
}

#[inline]
fn unit(h: u32) -> f32 {
    ((h & 0x00FF_FFFF) as f32) / 16_777_216.0
}

#[inline]
fn salted(seed: u32, salt: u32) -> u32 {
    (seed ^ salt).wrapping_add(0x9E37_79B9)
}

/// Uniform draw in `[0, 1)` for a column.
#[inline]
pub fn rand01(seed: u32, ix: i32, iz: i32, salt: u32) -> f32 {
    unit(hash2(ix, iz, salted(seed, salt)))
}

/// Uniform draw in `[0, 1)` for a voxel.
#[inline]
pub fn rand01_3(seed: u32, ix: i32, iy: i32, iz: i32, salt: u32) -> f32 {
    unit(hash3(ix, iy, iz, salted(seed, salt)))
}

/// Smooth value noise in `[0, 1)`: lattice hashes blended with a smoothstep
/// trilinear filter. Continuous across any integer boundary.
pub fn value_noise3(x: f32, y: f32, z: f32, seed: u32) -> f32 {
    let (x0, y0, z0) = (x.floor(), y.floor(), z.floor());
    let (ix, iy, iz) = (x0 as i32, y0 as i32, z0 as i32);
    let (tx, ty, tz) = (smooth(x - x0), smooth(y - y0), smooth(z - z0));
    let c = |dx: i32, dy: i32, dz: i32| unit(hash3(ix + dx, iy + dy, iz + dz, seed));
    let x00 = lerp(c(0, 0, 0), c(1, 0, 0), tx);
    let x10 = lerp(c(0, 1, 0), c(1, 1, 0), tx);
    let x01 = lerp(c(0, 0, 1), c(1, 0, 1), tx);
    let x11 = lerp(c(0, 1, 1), c(1, 1, 1), tx);
    lerp(lerp(x00, x10, ty), lerp(x01, x11, ty), tz)
}

#[inline]
fn smooth(t: f32) -> f32 {
    t * t * (3.0 - 2.0 * t)
}

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Small deterministic generator for per-feature shape parameters.
#[derive(Clone, Debug)]
pub struct FeatureRng {
    state: u32,
}

impl FeatureRng {
    pub fn new(seed: u32, wx: i32, wz: i32, salt: u32) -> Self {
        let state = hash2(wx, wz, salted(seed, salt));
        // xorshift has a fixed point at zero.
        Self {
            state: if state == 0 { 0x6D2B_79F5 } else { state },
        }
    }

    #[inline]
    pub fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }

    #[inline]
    pub fn next_f32(&mut self) -> f32 {
        unit(self.next_u32())
    }

    /// Inclusive integer range.
    #[inline]
    pub fn range(&mut self, lo: i32, hi: i32) -> i32 {
        if hi <= lo {
            return lo;
        }
        let span = (hi - lo + 1) as u32;
        lo + (self.next_u32() % span) as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draws_are_stable_and_in_range() {
        for i in -50..50 {
            let a = rand01(42, i, i * 3, SALT_ORE);
            assert_eq!(a, rand01(42, i, i * 3, SALT_ORE));
            assert!((0.0..1.0).contains(&a));
            let b = rand01_3(42, i, 7, -i, SALT_LEAVES);
            assert!((0.0..1.0).contains(&b));
        }
        assert_ne!(hash2(1, 2, 3), hash2(2, 1, 3));
    }

    #[test]
    fn value_noise_matches_lattice_at_integers() {
        let v = value_noise3(3.0, -2.0, 5.0, 9);
        assert_eq!(v, unit(hash3(3, -2, 5, 9)));
        let near = value_noise3(3.0001, -2.0, 5.0, 9);
        assert!((v - near).abs() < 1e-3);
    }

    #[test]
    fn rng_range_is_inclusive() {
        let mut rng = FeatureRng::new(7, 10, -4, SALT_FEATURE);
        let mut seen = [false; 4];
        for _ in 0..200 {
            let r = rng.range(2, 5);
            assert!((2..=5).contains(&r));
            seen[(r - 2) as usize] = true;
        }
        assert!(seen.iter().all(|s| *s));
        assert_eq!(rng.range(3, 3), 3);
    }
}
