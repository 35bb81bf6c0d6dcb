use strata_geom::{Aabb, Vec3};
use strata_world::ChunkCoord;

use crate::constants::BILLBOARD_HALF;

/// Opaque geometry with per-vertex color.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SolidBuffers {
    pub positions: Vec<f32>,
    pub normals: Vec<f32>,
    pub colors: Vec<f32>,
    pub indices: Vec<u32>,
}

impl SolidBuffers {
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Appends a quad given counter-clockwise corners. `flip` splits the quad
    /// along the 1-3 diagonal instead of 0-2.
    pub fn push_quad(&mut self, corners: [Vec3; 4], n: Vec3, colors: [[f32; 3]; 4], flip: bool) {
        let base = self.vertex_count() as u32;
        let mut vs = corners;
        let mut cs = colors;
        let cross = (vs[1] - vs[0]).cross(vs[2] - vs[0]);
        if cross.dot(n) < 0.0 {
            vs.swap(1, 3);
            cs.swap(1, 3);
        }
        for i in 0..4 {
            self.positions.extend_from_slice(&[vs[i].x, vs[i].y, vs[i].z]);
            self.normals.extend_from_slice(&[n.x, n.y, n.z]);
            self.colors.extend_from_slice(&cs[i]);
        }
        self.indices.extend_from_slice(&quad_indices(base, flip));
    }
}

/// Liquid surfaces. Color is supplied by the water material at draw time.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WaterBuffers {
    pub positions: Vec<f32>,
    pub normals: Vec<f32>,
    pub indices: Vec<u32>,
}

impl WaterBuffers {
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn push_quad(&mut self, corners: [Vec3; 4], n: Vec3) {
        let base = self.vertex_count() as u32;
        for c in corners {
            self.positions.extend_from_slice(&[c.x, c.y, c.z]);
            self.normals.extend_from_slice(&[n.x, n.y, n.z]);
        }
        self.indices.extend_from_slice(&quad_indices(base, false));
    }
}

/// Camera-facing quads: each vertex stores the quad center and its 2D corner
/// offset, and the renderer expands it in view space.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FoliageBuffers {
    pub centers: Vec<f32>,
    pub offsets: Vec<f32>,
    pub colors: Vec<f32>,
    pub indices: Vec<u32>,
}

const BILLBOARD_CORNERS: [[f32; 2]; 4] = [
    [-BILLBOARD_HALF, -BILLBOARD_HALF],
    [BILLBOARD_HALF, -BILLBOARD_HALF],
    [BILLBOARD_HALF, BILLBOARD_HALF],
    [-BILLBOARD_HALF, BILLBOARD_HALF],
];

impl FoliageBuffers {
    #[inline]
    pub fn quad_count(&self) -> usize {
        self.centers.len() / 12
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.centers.len() / 3
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn push_billboard(&mut self, center: Vec3, color: [f32; 3]) {
        let base = self.vertex_count() as u32;
        for offset in BILLBOARD_CORNERS {
            self.centers.extend_from_slice(&[center.x, center.y, center.z]);
            self.offsets.extend_from_slice(&offset);
            self.colors.extend_from_slice(&color);
        }
        self.indices.extend_from_slice(&quad_indices(base, false));
    }
}

#[inline]
fn quad_indices(base: u32, flip: bool) -> [u32; 6] {
    if flip {
        [base + 1, base + 2, base + 3, base + 1, base + 3, base]
    } else {
        [base, base + 1, base + 2, base, base + 2, base + 3]
    }
}

/// Render-ready geometry for one chunk, in world-space coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct ChunkMesh {
    pub coord: ChunkCoord,
    pub bbox: Aabb,
    pub solid: SolidBuffers,
    pub water: WaterBuffers,
    pub foliage: FoliageBuffers,
}

impl ChunkMesh {
    pub fn empty(coord: ChunkCoord) -> Self {
        Self {
            coord,
            bbox: Aabb::empty(),
            solid: SolidBuffers::default(),
            water: WaterBuffers::default(),
            foliage: FoliageBuffers::default(),
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.solid.vertex_count() + self.water.vertex_count() + self.foliage.vertex_count()
    }

    pub fn index_count(&self) -> usize {
        self.solid.indices.len() + self.water.indices.len() + self.foliage.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.solid.is_empty() && self.water.is_empty() && self.foliage.is_empty()
    }
}
