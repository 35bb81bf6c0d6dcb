use std::collections::HashMap;

use strata_blocks::BlockType;
use strata_world::ChunkCoord;
use strata_world::hash::value_noise3;

use crate::constants::COLOR_SEED;

/// Base material color perturbed by a smooth field over world coordinates.
/// Pure, so adjacent chunks agree at their shared border.
pub fn block_color(block: BlockType, wx: i32, y: i32, wz: i32) -> [f32; 3] {
    let m = block.material();
    let base = m.rgb();
    let Some(v) = m.variation else {
        return base;
    };
    let seed = COLOR_SEED ^ (u32::from(block.id()) << 24);
    let n = value_noise3(
        wx as f32 * v.scale,
        y as f32 * v.scale,
        wz as f32 * v.scale,
        seed,
    ) * 2.0
        - 1.0;
    let mut out = [0.0; 3];
    for c in 0..3 {
        out[c] = (base[c] + n * v.intensity * v.channel_bias[c]).clamp(0.0, 1.0);
    }
    out
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ColorCacheStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub entries: usize,
}

/// Memoized per-block colors, grouped by chunk so an evicted chunk's entries
/// can be dropped at once. Entries are keyed by volume index and remember
/// the block type they were computed for, so edits invalidate naturally.
#[derive(Default)]
pub struct ColorCache {
    chunks: HashMap<ChunkCoord, HashMap<u32, (BlockType, [f32; 3])>>,
    hits: u64,
    misses: u64,
    evictions: u64,
}

impl ColorCache {
    pub fn color(
        &mut self,
        coord: ChunkCoord,
        index: usize,
        block: BlockType,
        (wx, y, wz): (i32, i32, i32),
    ) -> [f32; 3] {
        let entries = self.chunks.entry(coord).or_default();
        if let Some((cached, rgb)) = entries.get(&(index as u32)) {
            if *cached == block {
                self.hits += 1;
                return *rgb;
            }
        }
        self.misses += 1;
        let rgb = block_color(block, wx, y, wz);
        entries.insert(index as u32, (block, rgb));
        rgb
    }

    pub fn forget(&mut self, coord: ChunkCoord) {
        if let Some(entries) = self.chunks.remove(&coord) {
            self.evictions += entries.len() as u64;
        }
    }

    pub fn contains_chunk(&self, coord: ChunkCoord) -> bool {
        self.chunks.contains_key(&coord)
    }

    pub fn stats(&self) -> ColorCacheStats {
        ColorCacheStats {
            hits: self.hits,
            misses: self.misses,
            evictions: self.evictions,
            entries: self.chunks.values().map(HashMap::len).sum(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_hits_until_block_changes() {
        let mut cache = ColorCache::default();
        let c = ChunkCoord::new(0, 0);
        let a = cache.color(c, 5, BlockType::Grass, (5, 40, 0));
        let b = cache.color(c, 5, BlockType::Grass, (5, 40, 0));
        assert_eq!(a, b);
        assert_eq!(cache.stats().hits, 1);
        let _ = cache.color(c, 5, BlockType::Dirt, (5, 40, 0));
        assert_eq!(cache.stats().misses, 2);
        assert_eq!(cache.stats().entries, 1);
        cache.forget(c);
        assert!(!cache.contains_chunk(c));
        assert_eq!(cache.stats().evictions, 1);
        assert_eq!(cache.stats().entries, 0);
    }

    #[test]
    fn unvaried_materials_keep_base_color() {
        assert_eq!(
            block_color(BlockType::Water, 3, 4, 5),
            BlockType::Water.material().rgb()
        );
    }

    #[test]
    fn variation_stays_in_range() {
        for i in -40..40 {
            let rgb = block_color(BlockType::Sand, i, i * 2, -i);
            assert!(rgb.iter().all(|c| (0.0..=1.0).contains(c)));
        }
    }
}
