use hashbrown::{HashMap, HashSet};
use strata_blocks::BlockType;
use strata_chunk::ChunkBuf;
use strata_world::{CHUNK_SIZE, ChunkCoord};

/// Lifecycle of one chunk coordinate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ChunkState {
    #[default]
    Unrequested,
    Loading,
    Loaded,
    Meshed,
}

/// Authoritative block data for resident chunks plus per-coordinate state
/// and the set of chunks whose geometry is out of date.
#[derive(Default)]
pub struct ChunkStore {
    chunks: HashMap<ChunkCoord, ChunkBuf>,
    states: HashMap<ChunkCoord, ChunkState>,
    dirty: HashSet<ChunkCoord>,
}

impl ChunkStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn get(&self, coord: ChunkCoord) -> Option<&ChunkBuf> {
        self.chunks.get(&coord)
    }

    #[inline]
    pub fn contains(&self, coord: ChunkCoord) -> bool {
        self.chunks.contains_key(&coord)
    }

    /// Makes a finished volume resident (state `Loaded`, needs a mesh) and
    /// returns the volume it replaced, if any.
    pub fn put(&mut self, buf: ChunkBuf) -> Option<ChunkBuf> {
        let coord = buf.coord;
        self.states.insert(coord, ChunkState::Loaded);
        self.dirty.insert(coord);
        self.chunks.insert(coord, buf)
    }

    /// Forgets everything about the coordinate.
    pub fn remove(&mut self, coord: ChunkCoord) -> Option<ChunkBuf> {
        self.states.remove(&coord);
        self.dirty.remove(&coord);
        self.chunks.remove(&coord)
    }

    /// Air for unloaded chunks and out-of-range heights.
    pub fn block_at(&self, wx: i32, wy: i32, wz: i32) -> BlockType {
        self.chunks
            .get(&ChunkCoord::from_world(wx, wz))
            .and_then(|c| c.get_world(wx, wy, wz))
            .unwrap_or(BlockType::Air)
    }

    /// Writes into a resident chunk and marks it, plus every resident chunk
    /// whose border touches the written column, for re-meshing. No-op
    /// (returns false) for unloaded chunks and out-of-range heights.
    pub fn set_block(&mut self, wx: i32, wy: i32, wz: i32, b: BlockType) -> bool {
        let coord = ChunkCoord::from_world(wx, wz);
        let Some(chunk) = self.chunks.get_mut(&coord) else {
            return false;
        };
        if !chunk.set_world(wx, wy, wz, b) {
            return false;
        }
        self.dirty.insert(coord);

        let (ox, oz) = coord.origin();
        let edge = |l: i32| -> i32 {
            if l == 0 {
                -1
            } else if l == CHUNK_SIZE as i32 - 1 {
                1
            } else {
                0
            }
        };
        let (ex, ez) = (edge(wx - ox), edge(wz - oz));
        for (dx, dz) in [(ex, 0), (0, ez), (ex, ez)] {
            if (dx, dz) != (0, 0) {
                self.mark_dirty(coord.offset(dx, dz));
            }
        }
        true
    }

    pub fn state(&self, coord: ChunkCoord) -> ChunkState {
        self.states.get(&coord).copied().unwrap_or_default()
    }

    pub fn set_state(&mut self, coord: ChunkCoord, state: ChunkState) {
        match state {
            ChunkState::Unrequested => {
                self.states.remove(&coord);
            }
            _ => {
                self.states.insert(coord, state);
            }
        }
    }

    /// Flags a resident chunk for re-meshing; ignored for anything else.
    pub fn mark_dirty(&mut self, coord: ChunkCoord) -> bool {
        if self.chunks.contains_key(&coord) {
            self.dirty.insert(coord)
        } else {
            false
        }
    }

    /// Flags every resident chunk around `coord` (cardinal and diagonal).
    pub fn mark_neighbors_dirty(&mut self, coord: ChunkCoord) -> usize {
        coord
            .neighborhood()
            .filter(|&n| n != coord)
            .filter(|&n| self.mark_dirty(n))
            .count()
    }

    pub fn take_dirty(&mut self) -> Vec<ChunkCoord> {
        self.dirty.drain().collect()
    }

    #[inline]
    pub fn dirty_count(&self) -> usize {
        self.dirty.len()
    }

    #[inline]
    pub fn is_dirty(&self, coord: ChunkCoord) -> bool {
        self.dirty.contains(&coord)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    pub fn coords(&self) -> impl Iterator<Item = ChunkCoord> + '_ {
        self.chunks.keys().copied()
    }
}
