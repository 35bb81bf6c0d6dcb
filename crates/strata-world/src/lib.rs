//! World dimensions, procedural terrain, and feature placement.
#![forbid(unsafe_code)]

pub mod biome;
pub mod chunk_coord;
pub mod features;
pub mod hash;
pub mod terrain;
pub mod worldgen;

pub use biome::Biome;
pub use chunk_coord::ChunkCoord;
pub use features::{
    Feature, FeatureKind, FeaturePass, FeaturePassStats, FeatureTarget, apply_feature,
    apply_ground_cover,
};
pub use terrain::{ColumnSample, Terrain};
pub use worldgen::{WorldGenConfig, WorldGenError, WorldGenParams, load_params_from_path};

/// Horizontal edge length of a chunk in blocks.
pub const CHUNK_SIZE: usize = 16;
/// Vertical extent of the world; every chunk spans all of it.
pub const CHUNK_HEIGHT: usize = 128;
pub const WATER_LEVEL: i32 = 24;
pub const BEACH_LEVEL: i32 = WATER_LEVEL + 2;
/// Features are sampled on this sub-grid of every chunk.
pub const FEATURE_GRID_STEP: usize = 3;
/// Largest horizontal reach of any feature from its origin column.
pub const MAX_FEATURE_RADIUS: i32 = 12;

// A 3x3 neighbourhood pass only sees every overlapping feature when no
// feature reaches further than one chunk.
const _: () = assert!(MAX_FEATURE_RADIUS <= CHUNK_SIZE as i32);
