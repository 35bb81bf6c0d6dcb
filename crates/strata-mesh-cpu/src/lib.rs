//! CPU geometry builder: face culling, ambient occlusion, and billboards.
#![forbid(unsafe_code)]

mod build;
mod color;
mod constants;
mod face;
mod mesh_build;
mod neighbors;

pub use build::face_visible;
pub use color::{ColorCache, ColorCacheStats, block_color};
pub use constants::{AO_STEP, AO_STRENGTH};
pub use face::Face;
pub use mesh_build::{ChunkMesh, FoliageBuffers, SolidBuffers, WaterBuffers};
pub use neighbors::NeighborVolumes;

use strata_chunk::ChunkBuf;
use strata_world::ChunkCoord;

/// Geometry builder that keeps memoized block colors between builds.
#[derive(Default)]
pub struct ChunkMesher {
    colors: ColorCache,
}

impl ChunkMesher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn build(&mut self, buf: &ChunkBuf, neighbors: &NeighborVolumes<'_>) -> ChunkMesh {
        build::build_chunk(buf, neighbors, &mut self.colors)
    }

    /// Drops cached decoration for an evicted chunk.
    pub fn forget(&mut self, coord: ChunkCoord) {
        self.colors.forget(coord);
    }

    pub fn cache_stats(&self) -> ColorCacheStats {
        self.colors.stats()
    }
}

/// One-off build without a persistent color cache.
pub fn build_chunk_mesh(buf: &ChunkBuf, neighbors: &NeighborVolumes<'_>) -> ChunkMesh {
    build::build_chunk(buf, neighbors, &mut ColorCache::default())
}
