use strata_blocks::BlockType;
use strata_chunk::ChunkBuf;
use strata_world::{CHUNK_HEIGHT, CHUNK_SIZE};

/// The eight chunks around the one being meshed. Missing entries are chunks
/// that are not resident yet.
#[derive(Clone, Copy, Debug, Default)]
pub struct NeighborVolumes<'a> {
    slots: [Option<&'a ChunkBuf>; 9],
}

#[inline]
fn slot(dx: i32, dz: i32) -> usize {
    ((dz + 1) * 3 + (dx + 1)) as usize
}

impl<'a> NeighborVolumes<'a> {
    #[inline]
    pub const fn none() -> Self {
        Self { slots: [None; 9] }
    }

    /// Fills every slot from `lookup(dx, dz)` with `dx, dz` in `-1..=1`.
    pub fn from_fn(mut lookup: impl FnMut(i32, i32) -> Option<&'a ChunkBuf>) -> Self {
        let mut out = Self::none();
        for dz in -1..=1 {
            for dx in -1..=1 {
                if dx != 0 || dz != 0 {
                    out.slots[slot(dx, dz)] = lookup(dx, dz);
                }
            }
        }
        out
    }

    #[inline]
    pub fn with(mut self, dx: i32, dz: i32, buf: &'a ChunkBuf) -> Self {
        if (dx, dz) != (0, 0) && dx.abs() <= 1 && dz.abs() <= 1 {
            self.slots[slot(dx, dz)] = Some(buf);
        }
        self
    }

    #[inline]
    pub fn get(&self, dx: i32, dz: i32) -> Option<&'a ChunkBuf> {
        if (dx, dz) == (0, 0) || dx.abs() > 1 || dz.abs() > 1 {
            return None;
        }
        self.slots[slot(dx, dz)]
    }

    pub fn loaded_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }
}

/// Block lookups in chunk-local coordinates that may step one chunk out in
/// x or z. Below the world is solid, above it is open sky, and unloaded
/// neighbours read as stone so no faces open onto missing data.
pub(crate) struct Sampler<'a, 'n> {
    center: &'a ChunkBuf,
    neighbors: &'a NeighborVolumes<'n>,
}

#[inline]
fn split(v: i32) -> (i32, usize) {
    let s = CHUNK_SIZE as i32;
    if v < 0 {
        (-1, (v + s) as usize)
    } else if v >= s {
        (1, (v - s) as usize)
    } else {
        (0, v as usize)
    }
}

impl<'a, 'n> Sampler<'a, 'n> {
    pub(crate) fn new(center: &'a ChunkBuf, neighbors: &'a NeighborVolumes<'n>) -> Self {
        Self { center, neighbors }
    }

    #[inline]
    pub(crate) fn at(&self, lx: i32, y: i32, lz: i32) -> BlockType {
        if y < 0 {
            return BlockType::Stone;
        }
        if y >= CHUNK_HEIGHT as i32 {
            return BlockType::Air;
        }
        let (dx, x) = split(lx);
        let (dz, z) = split(lz);
        let y = y as usize;
        if dx == 0 && dz == 0 {
            return self.center.get_local(x, y, z);
        }
        match self.neighbors.get(dx, dz) {
            Some(buf) => buf.get_local(x, y, z),
            None => BlockType::Stone,
        }
    }

    #[inline]
    pub(crate) fn opaque(&self, lx: i32, y: i32, lz: i32) -> bool {
        self.at(lx, y, lz).is_opaque()
    }
}
