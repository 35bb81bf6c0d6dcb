use proptest::prelude::*;
use strata_blocks::BlockType;
use strata_chunk::{CHUNK_VOLUME, ChunkBuf};
use strata_world::{CHUNK_HEIGHT, CHUNK_SIZE, ChunkCoord};

fn local() -> impl Strategy<Value = (usize, usize, usize)> {
    (0..CHUNK_SIZE, 0..CHUNK_HEIGHT, 0..CHUNK_SIZE)
}

fn chunk_coord() -> impl Strategy<Value = ChunkCoord> {
    (-10_000i32..10_000, -10_000i32..10_000).prop_map(|(cx, cz)| ChunkCoord::new(cx, cz))
}

fn block() -> impl Strategy<Value = BlockType> {
    (0u8..BlockType::COUNT as u8).prop_map(|id| BlockType::from_id(id).unwrap())
}

#[test]
fn idx_is_a_bijection() {
    let mut seen = vec![false; CHUNK_VOLUME];
    for y in 0..CHUNK_HEIGHT {
        for z in 0..CHUNK_SIZE {
            for x in 0..CHUNK_SIZE {
                let i = ChunkBuf::idx(x, y, z);
                assert_eq!(i, x + z * CHUNK_SIZE + y * CHUNK_SIZE * CHUNK_SIZE);
                assert!(!seen[i]);
                seen[i] = true;
            }
        }
    }
    assert!(seen.into_iter().all(|b| b));
}

proptest! {
    #[test]
    fn world_and_local_addressing_agree(coord in chunk_coord(), (x, y, z) in local(), b in block()) {
        let mut buf = ChunkBuf::new_air(coord);
        let (ox, oz) = coord.origin();
        let (wx, wy, wz) = (ox + x as i32, y as i32, oz + z as i32);
        prop_assert!(buf.set_world(wx, wy, wz, b));
        prop_assert_eq!(buf.get_local(x, y, z), b);
        prop_assert_eq!(buf.get_world(wx, wy, wz), Some(b));
        prop_assert_eq!(buf.blocks[ChunkBuf::idx(x, y, z)], b);
    }

    #[test]
    fn out_of_bounds_writes_are_ignored(coord in chunk_coord(), (x, _y, z) in local(), b in block()) {
        let mut buf = ChunkBuf::new_air(coord);
        let (ox, oz) = coord.origin();
        let (wx, wz) = (ox + x as i32, oz + z as i32);
        prop_assert!(!buf.set_world(wx, -1, wz, b));
        prop_assert!(!buf.set_world(wx, CHUNK_HEIGHT as i32, wz, b));
        prop_assert!(!buf.set_world(wx + CHUNK_SIZE as i32, 10, wz, b));
        prop_assert!(!buf.set_world(wx, 10, wz - CHUNK_SIZE as i32, b));
        prop_assert_eq!(buf.get_world(wx, -1, wz), None);
        prop_assert!(!buf.has_non_air());
    }
}

#[test]
fn wire_bytes_reject_bad_input() {
    let coord = ChunkCoord::new(1, 1);
    assert!(ChunkBuf::from_bytes(coord, &[0u8; 10]).is_err());
    let mut bytes = vec![0u8; CHUNK_VOLUME];
    bytes[17] = 200;
    assert_eq!(
        ChunkBuf::from_bytes(coord, &bytes),
        Err(strata_chunk::ChunkBufError::UnknownBlock { id: 200, index: 17 })
    );
    bytes[17] = BlockType::Wood.id();
    let buf = ChunkBuf::from_bytes(coord, &bytes).unwrap();
    assert_eq!(buf.blocks[17], BlockType::Wood);
    assert_eq!(buf.to_bytes(), bytes);
}
