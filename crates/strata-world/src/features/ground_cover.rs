use strata_blocks::BlockType;

use super::FeatureTarget;
use crate::CHUNK_SIZE;
use crate::hash::{SALT_COVER, SALT_COVER_KIND, rand01};
use crate::terrain::Terrain;

const FLOWERS: [BlockType; 3] = [
    BlockType::RedFlower,
    BlockType::OrangeFlower,
    BlockType::WhiteFlower,
];

/// Scatters flowers and grass tufts on exposed grass. Runs after features so
/// trunks and rocks are never topped with plants. Returns the number placed.
pub fn apply_ground_cover<T: FeatureTarget + ?Sized>(target: &mut T, terrain: &Terrain) -> u32 {
    let p = terrain.params();
    if !p.ground_cover_enable {
        return 0;
    }
    let seed = terrain.hash_seed();
    let (ox, oz) = target.chunk().origin();
    let mut placed = 0;
    for lz in 0..CHUNK_SIZE as i32 {
        for lx in 0..CHUNK_SIZE as i32 {
            let (wx, wz) = (ox + lx, oz + lz);
            let col = terrain.column(wx, wz);
            let density = p.ground_cover_for(col.biome);
            if density <= 0.0 || rand01(seed, wx, wz, SALT_COVER) >= density {
                continue;
            }
            let y = col.height - 1;
            if target.get(wx, y, wz) != Some(BlockType::Grass)
                || target.get(wx, y + 1, wz) != Some(BlockType::Air)
            {
                continue;
            }
            let k = rand01(seed, wx, wz, SALT_COVER_KIND);
            let block = if k < p.flower_share {
                let i = ((k / p.flower_share) * FLOWERS.len() as f32) as usize;
                FLOWERS[i.min(FLOWERS.len() - 1)]
            } else {
                BlockType::GrassFoliage
            };
            target.set(wx, y + 1, wz, block);
            placed += 1;
        }
    }
    placed
}
