//! Chunk block volumes and the full per-chunk generation pass.
#![forbid(unsafe_code)]

use std::time::Instant;

use strata_blocks::BlockType;
use strata_world::{
    CHUNK_HEIGHT, CHUNK_SIZE, ChunkCoord, FeaturePass, FeatureTarget, Terrain, apply_ground_cover,
};
use thiserror::Error;

/// Blocks per chunk volume.
pub const CHUNK_VOLUME: usize = CHUNK_SIZE * CHUNK_SIZE * CHUNK_HEIGHT;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChunkBufError {
    #[error("chunk volume has {got} blocks, expected {CHUNK_VOLUME}")]
    WrongLength { got: usize },
    #[error("unknown block id {id} at index {index}")]
    UnknownBlock { id: u8, index: usize },
}

/// Fully generated block volume for one chunk, indexed
/// `x + z * CHUNK_SIZE + y * CHUNK_SIZE * CHUNK_SIZE`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChunkBuf {
    pub coord: ChunkCoord,
    pub blocks: Vec<BlockType>,
}

impl ChunkBuf {
    pub fn new_air(coord: ChunkCoord) -> Self {
        Self {
            coord,
            blocks: vec![BlockType::Air; CHUNK_VOLUME],
        }
    }

    pub fn from_blocks(coord: ChunkCoord, blocks: Vec<BlockType>) -> Result<Self, ChunkBufError> {
        if blocks.len() != CHUNK_VOLUME {
            return Err(ChunkBufError::WrongLength { got: blocks.len() });
        }
        Ok(Self { coord, blocks })
    }

    /// Decodes the one-byte-per-block wire form.
    pub fn from_bytes(coord: ChunkCoord, bytes: &[u8]) -> Result<Self, ChunkBufError> {
        if bytes.len() != CHUNK_VOLUME {
            return Err(ChunkBufError::WrongLength { got: bytes.len() });
        }
        let blocks = bytes
            .iter()
            .enumerate()
            .map(|(index, &id)| BlockType::from_id(id).ok_or(ChunkBufError::UnknownBlock { id, index }))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { coord, blocks })
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        self.blocks.iter().map(|b| b.id()).collect()
    }

    #[inline]
    pub fn idx(x: usize, y: usize, z: usize) -> usize {
        x + z * CHUNK_SIZE + y * CHUNK_SIZE * CHUNK_SIZE
    }

    #[inline]
    pub fn get_local(&self, x: usize, y: usize, z: usize) -> BlockType {
        self.blocks[Self::idx(x, y, z)]
    }

    #[inline]
    pub fn set_local(&mut self, x: usize, y: usize, z: usize, b: BlockType) {
        self.blocks[Self::idx(x, y, z)] = b;
    }

    /// Local coordinates of a world position, if it lies in this chunk.
    #[inline]
    pub fn local_of(&self, wx: i32, wy: i32, wz: i32) -> Option<(usize, usize, usize)> {
        if wy < 0 || wy >= CHUNK_HEIGHT as i32 || !self.coord.contains_world(wx, wz) {
            return None;
        }
        let (ox, oz) = self.coord.origin();
        Some(((wx - ox) as usize, wy as usize, (wz - oz) as usize))
    }

    #[inline]
    pub fn contains_world(&self, wx: i32, wy: i32, wz: i32) -> bool {
        self.local_of(wx, wy, wz).is_some()
    }

    #[inline]
    pub fn get_world(&self, wx: i32, wy: i32, wz: i32) -> Option<BlockType> {
        self.local_of(wx, wy, wz)
            .map(|(x, y, z)| self.get_local(x, y, z))
    }

    /// Returns `false` and leaves the volume untouched when out of bounds.
    #[inline]
    pub fn set_world(&mut self, wx: i32, wy: i32, wz: i32, b: BlockType) -> bool {
        match self.local_of(wx, wy, wz) {
            Some((x, y, z)) => {
                self.set_local(x, y, z, b);
                true
            }
            None => false,
        }
    }

    /// Highest non-air `y` in a local column.
    pub fn top_non_air_y(&self, x: usize, z: usize) -> Option<usize> {
        (0..CHUNK_HEIGHT).rev().find(|&y| !self.get_local(x, y, z).is_air())
    }

    #[inline]
    pub fn has_non_air(&self) -> bool {
        self.blocks.iter().any(|b| !b.is_air())
    }
}

impl FeatureTarget for ChunkBuf {
    fn chunk(&self) -> ChunkCoord {
        self.coord
    }

    fn get(&self, wx: i32, y: i32, wz: i32) -> Option<BlockType> {
        self.get_world(wx, y, wz)
    }

    fn set(&mut self, wx: i32, y: i32, wz: i32, block: BlockType) {
        self.set_world(wx, y, wz, block);
    }
}

/// Per-stage timings and counts from one generation pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GenStats {
    pub t_terrain_us: u32,
    pub t_features_us: u32,
    pub features_applied: u32,
    pub features_suppressed: u32,
    pub ground_cover: u32,
}

#[derive(Clone, Debug)]
pub struct GeneratedChunk {
    pub buf: ChunkBuf,
    pub stats: GenStats,
}

fn micros_since(t0: Instant) -> u32 {
    t0.elapsed().as_micros().min(u128::from(u32::MAX)) as u32
}

/// Terrain columns, then features from the 3x3 neighbourhood, then ground
/// cover. The result depends only on the terrain's seed and parameters.
pub fn generate_chunk_buffer(terrain: &Terrain, coord: ChunkCoord) -> GeneratedChunk {
    let t0 = Instant::now();
    let mut buf = ChunkBuf::new_air(coord);
    let (ox, oz) = coord.origin();
    for z in 0..CHUNK_SIZE {
        for x in 0..CHUNK_SIZE {
            let (wx, wz) = (ox + x as i32, oz + z as i32);
            let col = terrain.column(wx, wz);
            for y in 0..CHUNK_HEIGHT {
                let b = terrain.block_at(wx, y as i32, wz, col.height, col.biome);
                if !b.is_air() {
                    buf.set_local(x, y, z, b);
                }
            }
        }
    }
    let t_terrain_us = micros_since(t0);

    let t1 = Instant::now();
    let pass = FeaturePass::new(terrain).run(&mut buf);
    let ground_cover = apply_ground_cover(&mut buf, terrain);
    let t_features_us = micros_since(t1);

    GeneratedChunk {
        buf,
        stats: GenStats {
            t_terrain_us,
            t_features_us,
            features_applied: pass.applied,
            features_suppressed: pass.suppressed,
            ground_cover,
        },
    }
}
