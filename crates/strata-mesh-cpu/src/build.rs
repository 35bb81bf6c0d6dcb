use strata_blocks::BlockType;
use strata_chunk::ChunkBuf;
use strata_geom::{Aabb, Vec3};
use strata_world::{CHUNK_HEIGHT, CHUNK_SIZE};

use crate::color::ColorCache;
use crate::constants::{AO_STEP, AO_STRENGTH};
use crate::face::Face;
use crate::mesh_build::ChunkMesh;
use crate::neighbors::{NeighborVolumes, Sampler};

/// Whether `block` shows its face toward `neighbor`. Water only opens onto
/// air; everything else opens onto any transparent block, water included.
#[inline]
pub fn face_visible(block: BlockType, neighbor: BlockType) -> bool {
    if block.is_liquid() {
        neighbor.is_air()
    } else {
        neighbor.is_transparent()
    }
}

#[inline]
fn on_border(x: usize, z: usize) -> bool {
    x == 0 || z == 0 || x == CHUNK_SIZE - 1 || z == CHUNK_SIZE - 1
}

/// Occlusion in `[0, 1]` for one face corner from the side, side and
/// diagonal blocks in the layer just outside the face.
fn corner_ao(s: &Sampler<'_, '_>, p: [i32; 3], face: Face, corner: [i32; 3]) -> f32 {
    let (dx, dy, dz) = face.delta();
    let out = [p[0] + dx, p[1] + dy, p[2] + dz];
    let (u, v) = face.tangent_axes();
    let su = if corner[u] == 1 { 1 } else { -1 };
    let sv = if corner[v] == 1 { 1 } else { -1 };
    let mut a = out;
    a[u] += su;
    let mut b = out;
    b[v] += sv;
    let mut c = a;
    c[v] += sv;
    let occupied = [a, b, c]
        .into_iter()
        .filter(|q| s.opaque(q[0], q[1], q[2]))
        .count();
    (occupied as f32 * AO_STEP).min(1.0)
}

#[inline]
fn shade(rgb: [f32; 3], ao: f32) -> [f32; 3] {
    let k = 1.0 - ao * AO_STRENGTH;
    [rgb[0] * k, rgb[1] * k, rgb[2] * k]
}

pub(crate) fn build_chunk(
    buf: &ChunkBuf,
    neighbors: &NeighborVolumes<'_>,
    colors: &mut ColorCache,
) -> ChunkMesh {
    let s = Sampler::new(buf, neighbors);
    let mut mesh = ChunkMesh::empty(buf.coord);
    let (ox, oz) = buf.coord.origin();

    for y in 0..CHUNK_HEIGHT {
        for z in 0..CHUNK_SIZE {
            for x in 0..CHUNK_SIZE {
                let block = buf.get_local(x, y, z);
                if block.is_air() {
                    continue;
                }
                let p = [x as i32, y as i32, z as i32];
                let (wx, wy, wz) = (ox + p[0], p[1], oz + p[2]);
                let around = Face::ALL.map(|f| {
                    let (dx, dy, dz) = f.delta();
                    s.at(p[0] + dx, p[1] + dy, p[2] + dz)
                });

                if block.is_foliage() {
                    if around.iter().any(|b| b.is_air()) {
                        let rgb = colors.color(buf.coord, ChunkBuf::idx(x, y, z), block, (wx, wy, wz));
                        let center = Vec3::new(wx as f32 + 0.5, wy as f32 + 0.5, wz as f32 + 0.5);
                        mesh.foliage.push_billboard(center, rgb);
                        let cell = [wx, wy, wz];
                        mesh.bbox = mesh.bbox.union(Aabb::from_block_span(cell, cell));
                    }
                    continue;
                }
                if !on_border(x, z) && around.iter().all(|b| b.is_opaque()) {
                    continue;
                }

                let rgb = if block.is_liquid() {
                    None
                } else {
                    Some(colors.color(buf.coord, ChunkBuf::idx(x, y, z), block, (wx, wy, wz)))
                };
                for (face, neighbor) in Face::ALL.into_iter().zip(around) {
                    if !face_visible(block, neighbor) {
                        continue;
                    }
                    let corners = face.corners();
                    let verts = corners.map(|c| {
                        Vec3::new(
                            (wx + c[0]) as f32,
                            (wy + c[1]) as f32,
                            (wz + c[2]) as f32,
                        )
                    });
                    for v in verts {
                        mesh.bbox.include_point(v);
                    }
                    match rgb {
                        None => mesh.water.push_quad(verts, face.normal()),
                        Some(rgb) => {
                            let ao = corners.map(|c| corner_ao(&s, p, face, c));
                            // Split along the less occluded diagonal.
                            let flip = ao[0] + ao[2] > ao[1] + ao[3];
                            mesh.solid
                                .push_quad(verts, face.normal(), ao.map(|a| shade(rgb, a)), flip);
                        }
                    }
                }
            }
        }
    }
    log::trace!(
        target: "mesh",
        "chunk {} meshed ({} neighbours): solid={} water={} foliage={}",
        buf.coord,
        neighbors.loaded_count(),
        mesh.solid.vertex_count(),
        mesh.water.vertex_count(),
        mesh.foliage.quad_count()
    );
    mesh
}
