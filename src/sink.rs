use hashbrown::HashMap;
use strata_mesh_cpu::ChunkMesh;
use strata_stream::RenderSink;
use strata_world::ChunkCoord;

#[derive(Clone, Copy, Debug, Default)]
struct LiveMesh {
    vertices: usize,
    indices: usize,
}

/// Stands in for a renderer: keeps sizes of the live buffers so leaks and
/// double releases show up in the summary.
#[derive(Debug, Default)]
pub struct CountingSink {
    live: HashMap<ChunkCoord, LiveMesh>,
    pub uploads: usize,
    pub replaced: usize,
    pub releases: usize,
    pub bad_releases: usize,
    pub peak_live: usize,
}

impl CountingSink {
    pub fn live_chunks(&self) -> usize {
        self.live.len()
    }

    pub fn live_vertices(&self) -> usize {
        self.live.values().map(|m| m.vertices).sum()
    }

    pub fn live_indices(&self) -> usize {
        self.live.values().map(|m| m.indices).sum()
    }
}

impl RenderSink for CountingSink {
    fn upload(&mut self, mesh: ChunkMesh) {
        self.uploads += 1;
        let entry = LiveMesh {
            vertices: mesh.vertex_count(),
            indices: mesh.index_count(),
        };
        if self.live.insert(mesh.coord, entry).is_some() {
            self.replaced += 1;
        }
        self.peak_live = self.peak_live.max(self.live.len());
    }

    fn release(&mut self, coord: ChunkCoord) {
        self.releases += 1;
        if self.live.remove(&coord).is_none() {
            self.bad_releases += 1;
            log::warn!("release of {coord} without live buffers");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reupload_replaces_and_release_frees() {
        let mut sink = CountingSink::default();
        let c = ChunkCoord::new(1, 2);
        sink.upload(ChunkMesh::empty(c));
        sink.upload(ChunkMesh::empty(c));
        assert_eq!(sink.live_chunks(), 1);
        assert_eq!(sink.replaced, 1);
        sink.release(c);
        sink.release(c);
        assert_eq!(sink.live_chunks(), 0);
        assert_eq!(sink.bad_releases, 1);
        assert_eq!(sink.peak_live, 1);
    }
}
