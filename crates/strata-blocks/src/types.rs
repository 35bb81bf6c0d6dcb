use crate::material::{MATERIALS, Material};

/// Block identifier stored one byte per voxel. Discriminants are the wire ids
/// used by serialized chunk volumes and must stay stable.
#[repr(u8)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BlockType {
    #[default]
    Air = 0,
    Grass = 1,
    Dirt = 2,
    Stone = 3,
    Sand = 4,
    Water = 5,
    Wood = 6,
    Leaves = 7,
    Slate = 8,
    Limestone = 9,
    RedFlower = 10,
    OrangeFlower = 11,
    WhiteFlower = 12,
    GrassFoliage = 13,
}

impl BlockType {
    pub const COUNT: usize = 14;

    pub const ALL: [BlockType; Self::COUNT] = [
        BlockType::Air,
        BlockType::Grass,
        BlockType::Dirt,
        BlockType::Stone,
        BlockType::Sand,
        BlockType::Water,
        BlockType::Wood,
        BlockType::Leaves,
        BlockType::Slate,
        BlockType::Limestone,
        BlockType::RedFlower,
        BlockType::OrangeFlower,
        BlockType::WhiteFlower,
        BlockType::GrassFoliage,
    ];

    #[inline]
    pub const fn id(self) -> u8 {
        self as u8
    }

    #[inline]
    pub fn from_id(id: u8) -> Option<BlockType> {
        Self::ALL.get(id as usize).copied()
    }

    #[inline]
    pub fn material(self) -> &'static Material {
        &MATERIALS[self as usize]
    }

    #[inline]
    pub fn name(self) -> &'static str {
        self.material().name
    }

    #[inline]
    pub fn is_air(self) -> bool {
        self == BlockType::Air
    }

    /// Light passes through and neighbouring faces stay visible.
    #[inline]
    pub fn is_transparent(self) -> bool {
        self.material().transparent
    }

    #[inline]
    pub fn is_opaque(self) -> bool {
        !self.is_transparent()
    }

    #[inline]
    pub fn is_liquid(self) -> bool {
        self.material().liquid
    }

    /// Rendered as crossed billboards instead of cube faces.
    #[inline]
    pub fn is_foliage(self) -> bool {
        self.material().foliage
    }

    #[inline]
    pub fn slows_movement(self) -> bool {
        self.material().slows_movement
    }

    /// Small plants placed on top of grass that may be replaced by features.
    #[inline]
    pub fn is_ground_cover(self) -> bool {
        matches!(
            self,
            BlockType::RedFlower
                | BlockType::OrangeFlower
                | BlockType::WhiteFlower
                | BlockType::GrassFoliage
        )
    }
}
