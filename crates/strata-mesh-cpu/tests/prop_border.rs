use proptest::prelude::*;
use strata_blocks::BlockType;
use strata_chunk::ChunkBuf;
use strata_mesh_cpu::{ChunkMesh, NeighborVolumes, build_chunk_mesh, face_visible};
use strata_world::ChunkCoord;

fn edge_block() -> impl Strategy<Value = BlockType> {
    prop_oneof![
        Just(BlockType::Air),
        Just(BlockType::Stone),
        Just(BlockType::Grass),
        Just(BlockType::Water),
        Just(BlockType::Leaves),
    ]
}

/// Quads on the plane `x = 16` whose normal points along `nx`.
fn faces_on_seam(m: &ChunkMesh, nx: f32) -> usize {
    let count = |positions: &[f32], normals: &[f32]| {
        (0..positions.len() / 12)
            .filter(|q| {
                let v = q * 12;
                normals[v] == nx && (0..4).all(|k| positions[v + k * 3] == 16.0)
            })
            .count()
    };
    count(&m.solid.positions, &m.solid.normals) + count(&m.water.positions, &m.water.normals)
}

fn shows(block: BlockType, neighbor: BlockType) -> bool {
    !block.is_air() && !block.is_foliage() && face_visible(block, neighbor)
}

proptest! {
    #[test]
    fn seam_culling_agrees_from_both_sides(
        column in prop::collection::vec((edge_block(), edge_block()), 8)
    ) {
        let mut west = ChunkBuf::new_air(ChunkCoord::new(0, 0));
        let mut east = ChunkBuf::new_air(ChunkCoord::new(1, 0));
        for (i, (a, b)) in column.iter().enumerate() {
            let y = 40 + 2 * i;
            west.set_local(15, y, 5, *a);
            east.set_local(0, y, 5, *b);
        }
        let wm = build_chunk_mesh(&west, &NeighborVolumes::none().with(1, 0, &east));
        let em = build_chunk_mesh(&east, &NeighborVolumes::none().with(-1, 0, &west));

        let expect_west = column.iter().filter(|(a, b)| shows(*a, *b)).count();
        let expect_east = column.iter().filter(|(a, b)| shows(*b, *a)).count();
        prop_assert_eq!(faces_on_seam(&wm, 1.0), expect_west);
        prop_assert_eq!(faces_on_seam(&em, -1.0), expect_east);

        // Same decisions when each side is rebuilt.
        let wm2 = build_chunk_mesh(&west, &NeighborVolumes::none().with(1, 0, &east));
        prop_assert_eq!(wm, wm2);
    }
}
