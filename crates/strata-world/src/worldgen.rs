use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::WATER_LEVEL;
use crate::biome::Biome;

#[derive(Debug, Error)]
pub enum WorldGenError {
    #[error("failed to read worldgen config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid worldgen config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct WorldGenConfig {
    #[serde(default)]
    pub height: Height,
    #[serde(default)]
    pub biomes: Biomes,
    #[serde(default)]
    pub ores: Ores,
    #[serde(default)]
    pub surface: Surface,
    #[serde(default)]
    pub features: Features,
    #[serde(default)]
    pub ground_cover: GroundCover,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Height {
    #[serde(default = "default_base_freq")]
    pub base_frequency: f32,
    #[serde(default = "default_detail_freq")]
    pub detail_frequency: f32,
    /// Share of the low-frequency channel in the blend; detail gets the rest.
    #[serde(default = "default_base_weight")]
    pub base_weight: f32,
    #[serde(default = "default_height_offset")]
    pub offset: i32,
}
fn default_base_freq() -> f32 {
    0.0025
}
fn default_detail_freq() -> f32 {
    0.01
}
fn default_base_weight() -> f32 {
    0.8
}
fn default_height_offset() -> i32 {
    WATER_LEVEL
}
impl Default for Height {
    fn default() -> Self {
        Self {
            base_frequency: default_base_freq(),
            detail_frequency: default_detail_freq(),
            base_weight: default_base_weight(),
            offset: default_height_offset(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Biomes {
    #[serde(default = "default_biome_freq")]
    pub frequency: f32,
    #[serde(default = "default_biome_thresholds")]
    pub thresholds: [f32; 4],
}
fn default_biome_freq() -> f32 {
    0.005
}
fn default_biome_thresholds() -> [f32; 4] {
    [-0.6, -0.2, 0.2, 0.6]
}
impl Default for Biomes {
    fn default() -> Self {
        Self {
            frequency: default_biome_freq(),
            thresholds: default_biome_thresholds(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Ores {
    #[serde(default = "default_ore_freq")]
    pub frequency: f32,
    #[serde(default = "default_ore_threshold")]
    pub threshold: f32,
    #[serde(default = "default_ore_chance")]
    pub chance: f32,
}
fn default_ore_freq() -> f32 {
    0.025
}
fn default_ore_threshold() -> f32 {
    0.3
}
fn default_ore_chance() -> f32 {
    0.7
}
impl Default for Ores {
    fn default() -> Self {
        Self {
            frequency: default_ore_freq(),
            threshold: default_ore_threshold(),
            chance: default_ore_chance(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Surface {
    #[serde(default = "default_dirt_depth")]
    pub dirt_depth: i32,
    #[serde(default = "default_grass_freq")]
    pub grass_frequency: f32,
    #[serde(default = "default_grass_threshold")]
    pub grass_threshold: f32,
    #[serde(default = "default_barren_grass_threshold")]
    pub barren_grass_threshold: f32,
}
fn default_dirt_depth() -> i32 {
    4
}
fn default_grass_freq() -> f32 {
    0.1
}
fn default_grass_threshold() -> f32 {
    0.8
}
fn default_barren_grass_threshold() -> f32 {
    0.2
}
impl Default for Surface {
    fn default() -> Self {
        Self {
            dirt_depth: default_dirt_depth(),
            grass_frequency: default_grass_freq(),
            grass_threshold: default_grass_threshold(),
            barren_grass_threshold: default_barren_grass_threshold(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Features {
    #[serde(default = "default_true")]
    pub enable: bool,
    #[serde(default = "default_feature_freq")]
    pub frequency: f32,
}
fn default_true() -> bool {
    true
}
fn default_feature_freq() -> f32 {
    0.05
}
impl Default for Features {
    fn default() -> Self {
        Self {
            enable: true,
            frequency: default_feature_freq(),
        }
    }
}

/// Chance per grass column of receiving a plant, by biome.
#[derive(Clone, Debug, Deserialize)]
pub struct GroundCover {
    #[serde(default = "default_true")]
    pub enable: bool,
    #[serde(default)]
    pub barren: f32,
    #[serde(default = "default_cover_rocky")]
    pub rocky: f32,
    #[serde(default = "default_cover_plains")]
    pub plains: f32,
    #[serde(default = "default_cover_forest")]
    pub forest: f32,
    #[serde(default = "default_cover_dense")]
    pub dense_forest: f32,
    /// Share of placed plants that are flowers rather than grass tufts.
    #[serde(default = "default_flower_share")]
    pub flower_share: f32,
}
fn default_cover_rocky() -> f32 {
    0.03
}
fn default_cover_plains() -> f32 {
    0.12
}
fn default_cover_forest() -> f32 {
    0.08
}
fn default_cover_dense() -> f32 {
    0.05
}
fn default_flower_share() -> f32 {
    0.2
}
impl Default for GroundCover {
    fn default() -> Self {
        Self {
            enable: true,
            barren: 0.0,
            rocky: default_cover_rocky(),
            plains: default_cover_plains(),
            forest: default_cover_forest(),
            dense_forest: default_cover_dense(),
            flower_share: default_flower_share(),
        }
    }
}

/// Flattened, validated parameters consumed by [`crate::Terrain`].
#[derive(Clone, Debug, PartialEq)]
pub struct WorldGenParams {
    pub base_frequency: f32,
    pub detail_frequency: f32,
    pub base_weight: f32,
    pub height_offset: i32,
    pub biome_frequency: f32,
    pub biome_thresholds: [f32; 4],
    pub ore_frequency: f32,
    pub ore_threshold: f32,
    pub ore_chance: f32,
    pub dirt_depth: i32,
    pub grass_frequency: f32,
    pub grass_threshold: f32,
    pub barren_grass_threshold: f32,
    pub features_enable: bool,
    pub feature_frequency: f32,
    pub ground_cover_enable: bool,
    pub ground_cover_density: [f32; 5],
    pub flower_share: f32,
}

impl Default for WorldGenParams {
    fn default() -> Self {
        Self::from_config(&WorldGenConfig::default())
    }
}

impl WorldGenParams {
    pub fn from_config(cfg: &WorldGenConfig) -> Self {
        let mut thresholds = cfg.biomes.thresholds;
        thresholds.sort_by(f32::total_cmp);
        let gc = &cfg.ground_cover;
        Self {
            base_frequency: cfg.height.base_frequency,
            detail_frequency: cfg.height.detail_frequency,
            base_weight: cfg.height.base_weight.clamp(0.0, 1.0),
            height_offset: cfg.height.offset,
            biome_frequency: cfg.biomes.frequency,
            biome_thresholds: thresholds,
            ore_frequency: cfg.ores.frequency,
            ore_threshold: cfg.ores.threshold,
            ore_chance: cfg.ores.chance.clamp(0.0, 1.0),
            dirt_depth: cfg.surface.dirt_depth.max(0),
            grass_frequency: cfg.surface.grass_frequency,
            grass_threshold: cfg.surface.grass_threshold,
            barren_grass_threshold: cfg.surface.barren_grass_threshold,
            features_enable: cfg.features.enable,
            feature_frequency: cfg.features.frequency,
            ground_cover_enable: gc.enable,
            ground_cover_density: [
                gc.barren,
                gc.rocky,
                gc.plains,
                gc.forest,
                gc.dense_forest,
            ],
            flower_share: gc.flower_share.clamp(0.0, 1.0),
        }
    }

    /// Barren ground favours dirt over grass.
    #[inline]
    pub fn grass_threshold_for(&self, biome: Biome) -> f32 {
        if biome == Biome::Barren {
            self.barren_grass_threshold
        } else {
            self.grass_threshold
        }
    }

    #[inline]
    pub fn ground_cover_for(&self, biome: Biome) -> f32 {
        self.ground_cover_density[biome.index()]
    }
}

pub fn parse_params(toml_str: &str) -> Result<WorldGenParams, WorldGenError> {
    let cfg: WorldGenConfig = toml::from_str(toml_str)?;
    Ok(WorldGenParams::from_config(&cfg))
}

pub fn load_params_from_path(path: &Path) -> Result<WorldGenParams, WorldGenError> {
    let s = fs::read_to_string(path).map_err(|source| WorldGenError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let params = parse_params(&s)?;
    log::info!(target: "worldgen", "loaded worldgen params from {}", path.display());
    Ok(params)
}
