//! Multi-block features (trees, bushes, rocks) and ground cover.
//!
//! Feature origins are sampled per chunk, but a feature's footprint may reach
//! into neighbouring chunks. Generating a chunk therefore evaluates the
//! features of its 3x3 neighbourhood and writes only the voxels that fall
//! inside the target chunk. Application order is the global `(wx, wz)` order,
//! so every chunk resolves overlaps the same way.

mod ground_cover;
mod shapes;

use std::collections::HashMap;

use strata_blocks::BlockType;

use crate::biome::Biome;
use crate::chunk_coord::ChunkCoord;
use crate::terrain::Terrain;
use crate::{CHUNK_HEIGHT, CHUNK_SIZE, FEATURE_GRID_STEP, WATER_LEVEL};

pub use ground_cover::apply_ground_cover;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FeatureKind {
    LargeTree,
    SmallTree,
    Bush,
    LargeRock,
}

impl FeatureKind {
    /// Picks a feature from the biome's probability bands for a feature-noise
    /// sample in `[-1, 1]`.
    pub fn select(biome: Biome, n: f32) -> Option<FeatureKind> {
        use FeatureKind::*;
        match biome {
            Biome::DenseForest if n > 0.3 => Some(SmallTree),
            Biome::DenseForest if n > -0.3 => Some(Bush),
            Biome::Forest if n > 0.8 => Some(LargeTree),
            Biome::Forest if n > 0.6 => Some(SmallTree),
            Biome::Forest if n > -0.2 => Some(Bush),
            Biome::Plains if n > 0.8 => Some(LargeTree),
            Biome::Plains if n > 0.5 => Some(Bush),
            Biome::Rocky if n > 0.7 => Some(LargeRock),
            Biome::Barren if n > 0.9 => Some(LargeRock),
            _ => None,
        }
    }

    #[inline]
    pub fn is_tree(self) -> bool {
        matches!(self, FeatureKind::LargeTree | FeatureKind::SmallTree)
    }

    fn salt(self) -> u32 {
        match self {
            FeatureKind::LargeTree => 0x7EE1,
            FeatureKind::SmallTree => 0x7EE2,
            FeatureKind::Bush => 0xB054,
            FeatureKind::LargeRock => 0x20C4,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Feature {
    pub kind: FeatureKind,
    pub wx: i32,
    pub wz: i32,
}

/// Block storage a feature can be stamped into. `get` returns `None` for any
/// position outside the target, and writes there are ignored.
pub trait FeatureTarget {
    fn chunk(&self) -> ChunkCoord;
    fn get(&self, wx: i32, y: i32, wz: i32) -> Option<BlockType>;
    fn set(&mut self, wx: i32, y: i32, wz: i32, block: BlockType);
}

/// Trees closer than this (max-norm) to an earlier tree are dropped so two
/// trunks never share a base column.
const TRUNK_CLEARANCE: i32 = 2;

impl Terrain {
    /// Feature origins sampled on the sub-grid of one chunk.
    pub fn features_in_chunk(&self, coord: ChunkCoord) -> Vec<Feature> {
        if !self.params().features_enable {
            return Vec::new();
        }
        let (ox, oz) = coord.origin();
        let mut out = Vec::new();
        for lz in (0..CHUNK_SIZE).step_by(FEATURE_GRID_STEP) {
            for lx in (0..CHUNK_SIZE).step_by(FEATURE_GRID_STEP) {
                let (wx, wz) = (ox + lx as i32, oz + lz as i32);
                let biome = self.biome(wx, wz);
                if let Some(kind) = FeatureKind::select(biome, self.feature_noise(wx, wz)) {
                    out.push(Feature { kind, wx, wz });
                }
            }
        }
        out
    }
}

/// Stamps one feature into `target`, clipped to its bounds. Returns `false`
/// when the origin column cannot host the feature.
pub fn apply_feature<T: FeatureTarget + ?Sized>(
    target: &mut T,
    terrain: &Terrain,
    feature: &Feature,
) -> bool {
    let col = terrain.column(feature.wx, feature.wz);
    let base = col.height;
    if base <= WATER_LEVEL || base >= CHUNK_HEIGHT as i32 - 1 {
        return false;
    }
    if feature.kind.is_tree() {
        let ground = terrain.block_at(feature.wx, base - 1, feature.wz, base, col.biome);
        if !matches!(ground, BlockType::Grass | BlockType::Dirt) {
            return false;
        }
        if target.get(feature.wx, base, feature.wz) == Some(BlockType::Wood) {
            return false;
        }
    }
    let mut rng = crate::hash::FeatureRng::new(
        terrain.hash_seed(),
        feature.wx,
        feature.wz,
        crate::hash::SALT_FEATURE ^ feature.kind.salt(),
    );
    let seed = terrain.hash_seed();
    match feature.kind {
        FeatureKind::LargeTree => shapes::large_tree(target, seed, feature, base, &mut rng),
        FeatureKind::SmallTree => shapes::small_tree(target, seed, feature, base, &mut rng),
        FeatureKind::Bush => shapes::bush(target, seed, feature, base, &mut rng),
        FeatureKind::LargeRock => shapes::rock(target, seed, feature, base, &mut rng),
    }
    true
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FeaturePassStats {
    pub applied: u32,
    pub suppressed: u32,
}

/// Applies every feature that can touch one chunk. Per-chunk feature lists
/// are memoized for the lifetime of the pass.
pub struct FeaturePass<'t> {
    terrain: &'t Terrain,
    cache: HashMap<ChunkCoord, Vec<Feature>>,
}

impl<'t> FeaturePass<'t> {
    pub fn new(terrain: &'t Terrain) -> Self {
        Self {
            terrain,
            cache: HashMap::new(),
        }
    }

    fn features(&mut self, coord: ChunkCoord) -> &[Feature] {
        let terrain = self.terrain;
        self.cache
            .entry(coord)
            .or_insert_with(|| terrain.features_in_chunk(coord))
    }

    /// Features of the 3x3 neighbourhood in global application order.
    pub fn candidates(&mut self, center: ChunkCoord) -> Vec<Feature> {
        let mut all = Vec::new();
        for c in center.neighborhood() {
            all.extend_from_slice(self.features(c));
        }
        all.sort_by_key(|f| (f.wx, f.wz));
        all
    }

    /// Whether an earlier tree sits too close to this one's base. Depends
    /// only on feature origins, so every chunk reaches the same answer.
    pub fn is_suppressed(&mut self, f: &Feature) -> bool {
        if !f.kind.is_tree() {
            return false;
        }
        let lo = ChunkCoord::from_world(f.wx - TRUNK_CLEARANCE, f.wz - TRUNK_CLEARANCE);
        let hi = ChunkCoord::from_world(f.wx + TRUNK_CLEARANCE, f.wz + TRUNK_CLEARANCE);
        for cz in lo.cz..=hi.cz {
            for cx in lo.cx..=hi.cx {
                let blocked = self.features(ChunkCoord::new(cx, cz)).iter().any(|e| {
                    e.kind.is_tree()
                        && (e.wx, e.wz) < (f.wx, f.wz)
                        && (e.wx - f.wx).abs() <= TRUNK_CLEARANCE
                        && (e.wz - f.wz).abs() <= TRUNK_CLEARANCE
                });
                if blocked {
                    return true;
                }
            }
        }
        false
    }

    pub fn run<T: FeatureTarget + ?Sized>(&mut self, target: &mut T) -> FeaturePassStats {
        let mut stats = FeaturePassStats::default();
        for f in self.candidates(target.chunk()) {
            if self.is_suppressed(&f) {
                stats.suppressed += 1;
                continue;
            }
            if apply_feature(target, self.terrain, &f) {
                stats.applied += 1;
            }
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_bands() {
        assert_eq!(FeatureKind::select(Biome::DenseForest, 0.5), Some(FeatureKind::SmallTree));
        assert_eq!(FeatureKind::select(Biome::DenseForest, 0.0), Some(FeatureKind::Bush));
        assert_eq!(FeatureKind::select(Biome::DenseForest, -0.5), None);
        assert_eq!(FeatureKind::select(Biome::Forest, 0.9), Some(FeatureKind::LargeTree));
        assert_eq!(FeatureKind::select(Biome::Forest, 0.7), Some(FeatureKind::SmallTree));
        assert_eq!(FeatureKind::select(Biome::Plains, 0.6), Some(FeatureKind::Bush));
        assert_eq!(FeatureKind::select(Biome::Plains, 0.2), None);
        assert_eq!(FeatureKind::select(Biome::Rocky, 0.75), Some(FeatureKind::LargeRock));
        assert_eq!(FeatureKind::select(Biome::Barren, 0.75), None);
        assert_eq!(FeatureKind::select(Biome::Barren, 0.95), Some(FeatureKind::LargeRock));
    }
}
