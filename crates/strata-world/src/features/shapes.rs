use strata_blocks::BlockType;

use super::{Feature, FeatureTarget};
use crate::hash::{FeatureRng, SALT_BUSH, SALT_LEAVES, SALT_ROCK, rand01_3};

#[derive(Clone, Copy, PartialEq, Eq)]
enum Replace {
    /// Only air and ground cover.
    Soft,
    /// Anything except wood.
    Hard,
}

fn place<T: FeatureTarget + ?Sized>(t: &mut T, x: i32, y: i32, z: i32, b: BlockType, rule: Replace) {
    let Some(cur) = t.get(x, y, z) else {
        return;
    };
    let ok = match rule {
        Replace::Soft => cur.is_air() || cur.is_ground_cover(),
        Replace::Hard => cur != BlockType::Wood,
    };
    if ok {
        t.set(x, y, z, b);
    }
}

const CROSS: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Disc of leaves at one canopy layer.
#[allow(clippy::too_many_arguments)]
fn leaf_disc<T: FeatureTarget + ?Sized>(
    t: &mut T,
    seed: u32,
    cx: i32,
    y: i32,
    cz: i32,
    r: i32,
    density: f32,
    jitter: f32,
) {
    let r2 = (r * r) as f32;
    for dz in -r..=r {
        for dx in -r..=r {
            let (x, z) = (cx + dx, cz + dz);
            let d2 = (dx * dx + dz * dz) as f32;
            let edge = 1.0 - jitter + jitter * rand01_3(seed, x, y, z, SALT_LEAVES ^ 0x55);
            if d2 > r2 * edge {
                continue;
            }
            if rand01_3(seed, x, y, z, SALT_LEAVES) < density {
                place(t, x, y, z, BlockType::Leaves, Replace::Soft);
            }
        }
    }
}

pub(super) fn large_tree<T: FeatureTarget + ?Sized>(
    t: &mut T,
    seed: u32,
    f: &Feature,
    base: i32,
    rng: &mut FeatureRng,
) {
    let h = rng.range(15, 24);
    let trunk = (h as f32 * 0.7) as i32;
    let thick_until = trunk * 2 / 3;
    let bend_from = trunk / 2;
    let lean = if rng.next_f32() < 0.5 {
        (0, 0)
    } else {
        CROSS[rng.range(0, 3) as usize]
    };
    for dy in 0..trunk {
        let (ox, oz) = if dy >= bend_from { lean } else { (0, 0) };
        let (x, y, z) = (f.wx + ox, base + dy, f.wz + oz);
        place(t, x, y, z, BlockType::Wood, Replace::Hard);
        if dy < thick_until {
            for (dx, dz) in CROSS {
                place(t, x + dx, y, z + dz, BlockType::Wood, Replace::Hard);
            }
        }
    }
    let leaf_r = (h as f32 * 0.4) as i32 + 2;
    let (cx, cz) = (f.wx + lean.0, f.wz + lean.1);
    let bottom = base + trunk - 5;
    for y in bottom..=base + h {
        let r = leaf_r - (y - bottom) / 3;
        if r > 0 {
            leaf_disc(t, seed, cx, y, cz, r, 0.7, 0.0);
        }
    }
}

pub(super) fn small_tree<T: FeatureTarget + ?Sized>(
    t: &mut T,
    seed: u32,
    f: &Feature,
    base: i32,
    rng: &mut FeatureRng,
) {
    let h = rng.range(5, 9);
    let trunk = (h as f32 * 0.6) as i32;
    for dy in 0..trunk {
        place(t, f.wx, base + dy, f.wz, BlockType::Wood, Replace::Hard);
    }
    let leaf_r = (h as f32 * 0.5) as i32 + 1;
    let bottom = base + trunk - 2;
    for y in bottom..=base + h {
        let r = leaf_r - (y - bottom) / 3;
        if r > 0 {
            leaf_disc(t, seed, f.wx, y, f.wz, r, 0.5, 0.2);
        }
    }
}

pub(super) fn bush<T: FeatureTarget + ?Sized>(
    t: &mut T,
    seed: u32,
    f: &Feature,
    base: i32,
    rng: &mut FeatureRng,
) {
    let size = rng.range(2, 3);
    for y in base..base + size {
        for dz in -1..=1 {
            for dx in -1..=1 {
                let (x, z) = (f.wx + dx, f.wz + dz);
                if rand01_3(seed, x, y, z, SALT_BUSH) < 0.7 {
                    place(t, x, y, z, BlockType::Leaves, Replace::Soft);
                }
            }
        }
    }
}

pub(super) fn rock<T: FeatureTarget + ?Sized>(
    t: &mut T,
    seed: u32,
    f: &Feature,
    base: i32,
    rng: &mut FeatureRng,
) {
    let h = rng.range(2, 5);
    let r = (h as f32 * 0.7) as i32 + 1;
    let material = if rng.next_f32() < 0.5 {
        BlockType::Stone
    } else {
        BlockType::Slate
    };
    // Sunk one block so the rock sits in the ground rather than on it.
    for dy in 0..h {
        let y = base - 1 + dy;
        let layer_r = (r - dy / 2).max(1);
        let r2 = (layer_r * layer_r) as f32;
        for dz in -layer_r..=layer_r {
            for dx in -layer_r..=layer_r {
                let (x, z) = (f.wx + dx, f.wz + dz);
                let d2 = (dx * dx + dz * dz) as f32;
                let jitter = 0.7 + 0.3 * rand01_3(seed, x, y, z, SALT_ROCK);
                if d2 <= r2 * jitter {
                    place(t, x, y, z, material, Replace::Hard);
                }
            }
        }
    }
}
