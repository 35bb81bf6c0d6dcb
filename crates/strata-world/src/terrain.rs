use std::sync::Arc;

use fastnoise_lite::{FastNoiseLite, NoiseType};
use strata_blocks::BlockType;

use crate::biome::Biome;
use crate::hash::{self, SALT_ORE};
use crate::worldgen::WorldGenParams;
use crate::{BEACH_LEVEL, CHUNK_HEIGHT, WATER_LEVEL};

/// Seeded noise state for every terrain channel.
struct NoiseChannels {
    base: FastNoiseLite,
    detail: FastNoiseLite,
    biome: FastNoiseLite,
    feature: FastNoiseLite,
    grass: FastNoiseLite,
    slate: FastNoiseLite,
    limestone: FastNoiseLite,
}

fn channel(seed: i32, salt: i32, frequency: f32) -> FastNoiseLite {
    let mut n = FastNoiseLite::with_seed(seed ^ salt);
    n.set_noise_type(Some(NoiseType::OpenSimplex2));
    n.set_frequency(Some(frequency));
    n
}

impl NoiseChannels {
    fn new(seed: i32, p: &WorldGenParams) -> Self {
        Self {
            base: channel(seed, 0, p.base_frequency),
            detail: channel(seed, 0x0000_3C6E, p.detail_frequency),
            biome: channel(seed, 0x1203_5F31, p.biome_frequency),
            feature: channel(seed, 0x2545_F491, p.feature_frequency),
            grass: channel(seed, 0x5851_F42D, p.grass_frequency),
            slate: channel(seed, 0x0B5A_D4EC, p.ore_frequency),
            limestone: channel(seed, 0x6C07_8965, p.ore_frequency),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColumnSample {
    /// First block above the surface; the surface block sits at `height - 1`.
    pub height: i32,
    pub biome: Biome,
}

/// Noise and biome generator. Every query is a pure function of the seed,
/// the parameters and world coordinates, so any instance built from the same
/// inputs answers identically regardless of which chunk asks.
pub struct Terrain {
    seed: i32,
    params: Arc<WorldGenParams>,
    noise: NoiseChannels,
}

impl Clone for Terrain {
    // Rebuilds the noise channels so each clone owns independent state.
    fn clone(&self) -> Self {
        Self::with_shared_params(self.seed, Arc::clone(&self.params))
    }
}

impl std::fmt::Debug for Terrain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Terrain")
            .field("seed", &self.seed)
            .field("params", &self.params)
            .finish()
    }
}

impl Terrain {
    pub fn new(seed: i32, params: WorldGenParams) -> Self {
        Self::with_shared_params(seed, Arc::new(params))
    }

    pub fn with_shared_params(seed: i32, params: Arc<WorldGenParams>) -> Self {
        let noise = NoiseChannels::new(seed, &params);
        Self {
            seed,
            params,
            noise,
        }
    }

    #[inline]
    pub fn seed(&self) -> i32 {
        self.seed
    }

    /// Seed reinterpreted for the integer hash functions.
    #[inline]
    pub fn hash_seed(&self) -> u32 {
        self.seed as u32
    }

    #[inline]
    pub fn params(&self) -> &WorldGenParams {
        &self.params
    }

    pub fn height(&self, wx: i32, wz: i32) -> i32 {
        let p = &self.params;
        let (x, z) = (wx as f32, wz as f32);
        let base = (self.noise.base.get_noise_2d(x, z) + 1.0) * 0.5;
        let detail = (self.noise.detail.get_noise_2d(x, z) + 1.0) * 0.5;
        let blend = (base * p.base_weight + detail * (1.0 - p.base_weight)).clamp(0.0, 1.0);
        let span = (CHUNK_HEIGHT as i32 - WATER_LEVEL) as f32;
        let h = p.height_offset + (blend * span).floor() as i32;
        h.clamp(1, CHUNK_HEIGHT as i32 - 1)
    }

    pub fn biome(&self, wx: i32, wz: i32) -> Biome {
        let n = self.noise.biome.get_noise_2d(wx as f32, wz as f32);
        Biome::from_noise(n, &self.params.biome_thresholds)
    }

    #[inline]
    pub fn column(&self, wx: i32, wz: i32) -> ColumnSample {
        ColumnSample {
            height: self.height(wx, wz),
            biome: self.biome(wx, wz),
        }
    }

    /// Raw feature-noise sample used by the feature placer.
    #[inline]
    pub fn feature_noise(&self, wx: i32, wz: i32) -> f32 {
        self.noise.feature.get_noise_2d(wx as f32, wz as f32)
    }

    /// Block at a world position given the column's precomputed height and
    /// biome.
    pub fn block_at(&self, wx: i32, y: i32, wz: i32, height: i32, biome: Biome) -> BlockType {
        if y < 0 || y >= CHUNK_HEIGHT as i32 {
            return BlockType::Air;
        }
        let p = &self.params;
        if y < height - 1 - p.dirt_depth {
            return self.deep_block(wx, y, wz);
        }
        if y < height - 1 {
            return BlockType::Dirt;
        }
        if y < height {
            return self.surface_block(wx, y, wz, biome);
        }
        if y <= WATER_LEVEL {
            BlockType::Water
        } else {
            BlockType::Air
        }
    }

    fn deep_block(&self, wx: i32, y: i32, wz: i32) -> BlockType {
        let p = &self.params;
        let lower = y < CHUNK_HEIGHT as i32 / 2;
        let (noise, ore) = if lower {
            (&self.noise.slate, BlockType::Slate)
        } else {
            (&self.noise.limestone, BlockType::Limestone)
        };
        let n = noise.get_noise_3d(wx as f32, y as f32, wz as f32);
        if n > p.ore_threshold && hash::rand01_3(self.hash_seed(), wx, y, wz, SALT_ORE) < p.ore_chance
        {
            ore
        } else {
            BlockType::Stone
        }
    }

    fn surface_block(&self, wx: i32, y: i32, wz: i32, biome: Biome) -> BlockType {
        if y <= BEACH_LEVEL {
            return BlockType::Sand;
        }
        let p = &self.params;
        // The third axis separates biomes by ten noise units after frequency
        // scaling.
        let w = biome.index() as f32 * 10.0 / p.grass_frequency;
        let n = self.noise.grass.get_noise_3d(wx as f32, wz as f32, w);
        if n < p.grass_threshold_for(biome) {
            BlockType::Grass
        } else {
            BlockType::Dirt
        }
    }

    /// Topmost non-air `y` of the pristine terrain column, ignoring features.
    pub fn surface_y(&self, wx: i32, wz: i32) -> i32 {
        let h = self.height(wx, wz);
        (h - 1).max(WATER_LEVEL)
    }
}
