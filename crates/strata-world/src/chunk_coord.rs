use serde::{Deserialize, Serialize};
use strata_geom::Vec3;

use crate::CHUNK_SIZE;

/// Horizontal chunk address. Chunks span the full world height, so there is
/// no vertical component.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChunkCoord {
    pub cx: i32,
    pub cz: i32,
}

impl ChunkCoord {
    #[inline]
    pub const fn new(cx: i32, cz: i32) -> Self {
        Self { cx, cz }
    }

    /// Chunk owning the world column `(wx, wz)`.
    #[inline]
    pub fn from_world(wx: i32, wz: i32) -> Self {
        let s = CHUNK_SIZE as i32;
        Self::new(wx.div_euclid(s), wz.div_euclid(s))
    }

    /// Chunk under a floating-point world position (floor division).
    #[inline]
    pub fn from_world_pos(p: Vec3) -> Self {
        let s = CHUNK_SIZE as f32;
        Self::new((p.x / s).floor() as i32, (p.z / s).floor() as i32)
    }

    #[inline]
    pub fn offset(self, dx: i32, dz: i32) -> Self {
        Self::new(self.cx + dx, self.cz + dz)
    }

    #[inline]
    pub fn distance_sq(self, other: ChunkCoord) -> i64 {
        let dx = i64::from(self.cx - other.cx);
        let dz = i64::from(self.cz - other.cz);
        dx * dx + dz * dz
    }

    /// Distance in the rectangular (max-norm) sense used by streaming windows.
    #[inline]
    pub fn chebyshev(self, other: ChunkCoord) -> i32 {
        (self.cx - other.cx).abs().max((self.cz - other.cz).abs())
    }

    /// World `(x, z)` of local block `(0, 0)`.
    #[inline]
    pub fn origin(self) -> (i32, i32) {
        let s = CHUNK_SIZE as i32;
        (self.cx * s, self.cz * s)
    }

    #[inline]
    pub fn contains_world(self, wx: i32, wz: i32) -> bool {
        Self::from_world(wx, wz) == self
    }

    /// The 3x3 block of chunks centred on `self`, row-major in `z` then `x`.
    pub fn neighborhood(self) -> impl Iterator<Item = ChunkCoord> {
        (-1..=1).flat_map(move |dz| (-1..=1).map(move |dx| self.offset(dx, dz)))
    }
}

impl From<(i32, i32)> for ChunkCoord {
    fn from(value: (i32, i32)) -> Self {
        Self::new(value.0, value.1)
    }
}

impl From<ChunkCoord> for (i32, i32) {
    fn from(value: ChunkCoord) -> Self {
        (value.cx, value.cz)
    }
}

impl std::fmt::Display for ChunkCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.cx, self.cz)
    }
}
