use strata_mesh_cpu::ChunkMesh;
use strata_world::ChunkCoord;

/// Receiver of finished geometry, normally the renderer.
///
/// An upload supersedes any buffers previously uploaded for the same
/// coordinate. `release` is called exactly once when a meshed chunk leaves
/// residency.
pub trait RenderSink {
    fn upload(&mut self, mesh: ChunkMesh);
    fn release(&mut self, coord: ChunkCoord);
}

/// Discards everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl RenderSink for NullSink {
    fn upload(&mut self, _mesh: ChunkMesh) {}
    fn release(&mut self, _coord: ChunkCoord) {}
}
