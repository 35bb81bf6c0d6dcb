/// Occlusion added by each opaque sample around a vertex.
pub const AO_STEP: f32 = 0.4;
/// Darkening at full occlusion: `color * (1 - ao * AO_STRENGTH)`.
pub const AO_STRENGTH: f32 = 0.5;
/// Half extent of a foliage billboard.
pub const BILLBOARD_HALF: f32 = 0.5;
/// Base seed of the color variation field; salted per block type.
pub const COLOR_SEED: u32 = 0xC01D_F00D;
