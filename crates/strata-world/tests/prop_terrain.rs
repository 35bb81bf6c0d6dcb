use proptest::prelude::*;
use strata_blocks::BlockType;
use strata_world::{CHUNK_HEIGHT, ChunkCoord, Terrain, WATER_LEVEL, WorldGenParams};

fn world_xz() -> impl Strategy<Value = (i32, i32)> {
    (-100_000i32..100_000, -100_000i32..100_000)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn height_and_biome_are_pure((wx, wz) in world_xz(), seed in any::<i32>()) {
        let a = Terrain::new(seed, WorldGenParams::default());
        let b = Terrain::new(seed, WorldGenParams::default());
        let h = a.height(wx, wz);
        prop_assert_eq!(h, a.height(wx, wz));
        prop_assert_eq!(h, b.height(wx, wz));
        prop_assert_eq!(a.biome(wx, wz), b.biome(wx, wz));
        prop_assert!(h >= 1 && h < CHUNK_HEIGHT as i32);
    }

    #[test]
    fn default_height_spans_water_level_to_ceiling((wx, wz) in world_xz(), seed in any::<i32>()) {
        let h = Terrain::new(seed, WorldGenParams::default()).height(wx, wz);
        prop_assert!(h >= WATER_LEVEL, "height {} below water level", h);
        prop_assert!(h < CHUNK_HEIGHT as i32);
    }

    #[test]
    fn column_is_layered((wx, wz) in world_xz()) {
        let t = Terrain::new(42, WorldGenParams::default());
        let col = t.column(wx, wz);
        for y in 0..CHUNK_HEIGHT as i32 {
            let b = t.block_at(wx, y, wz, col.height, col.biome);
            prop_assert_eq!(b, t.block_at(wx, y, wz, col.height, col.biome));
            if y < col.height {
                prop_assert!(b.is_opaque(), "hole at y={} below height {}", y, col.height);
            } else if y <= WATER_LEVEL {
                prop_assert_eq!(b, BlockType::Water);
            } else {
                prop_assert_eq!(b, BlockType::Air);
            }
        }
    }

    #[test]
    fn chunk_lookup_floors((wx, wz) in world_xz()) {
        let c = ChunkCoord::from_world(wx, wz);
        let (ox, oz) = c.origin();
        prop_assert!(wx >= ox && wx < ox + 16);
        prop_assert!(wz >= oz && wz < oz + 16);
        prop_assert!(c.contains_world(wx, wz));
    }
}
