/// Render-only color perturbation profile.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Variation {
    /// World-space frequency of the variation field.
    pub scale: f32,
    pub intensity: f32,
    pub channel_bias: [f32; 3],
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    pub name: &'static str,
    /// `0xRRGGBB`.
    pub color: u32,
    pub transparent: bool,
    pub liquid: bool,
    pub foliage: bool,
    pub slows_movement: bool,
    pub variation: Option<Variation>,
}

impl Material {
    /// Base color as linear `[r, g, b]` in `0.0..=1.0`.
    #[inline]
    pub fn rgb(&self) -> [f32; 3] {
        [
            ((self.color >> 16) & 0xFF) as f32 / 255.0,
            ((self.color >> 8) & 0xFF) as f32 / 255.0,
            (self.color & 0xFF) as f32 / 255.0,
        ]
    }
}

const fn solid(name: &'static str, color: u32, variation: Variation) -> Material {
    Material {
        name,
        color,
        transparent: false,
        liquid: false,
        foliage: false,
        slows_movement: false,
        variation: Some(variation),
    }
}

const fn plant(name: &'static str, color: u32, variation: Variation) -> Material {
    Material {
        name,
        color,
        transparent: true,
        liquid: false,
        foliage: true,
        slows_movement: true,
        variation: Some(variation),
    }
}

const fn var(scale: f32, intensity: f32, channel_bias: [f32; 3]) -> Variation {
    Variation {
        scale,
        intensity,
        channel_bias,
    }
}

const PLANT_VARIATION: Variation = var(0.1, 0.2, [0.8, 1.2, 0.7]);
const ROCK_VARIATION: Variation = var(0.3, 0.15, [0.9, 0.95, 1.1]);

/// Indexed by `BlockType as usize`.
pub static MATERIALS: [Material; 14] = [
    Material {
        name: "air",
        color: 0x000000,
        transparent: true,
        liquid: false,
        foliage: false,
        slows_movement: false,
        variation: None,
    },
    solid("grass", 0x6CC66C, var(0.2, 0.06, [0.9, 1.1, 0.9])),
    solid("dirt", 0x997260, var(0.4, 0.15, [1.0, 0.95, 0.9])),
    solid("stone", 0x888888, var(0.3, 0.1, [1.0, 1.0, 1.0])),
    solid("sand", 0xFAF5B6, var(1.0, 0.05, [1.1, 1.05, 0.95])),
    Material {
        name: "water",
        color: 0x5782E6,
        transparent: true,
        liquid: true,
        foliage: false,
        slows_movement: true,
        variation: None,
    },
    solid("wood", 0x7B6E65, var(2.0, 0.15, [0.95, 0.9, 0.85])),
    plant("leaves", 0x163B16, PLANT_VARIATION),
    solid("slate", 0x3B4044, ROCK_VARIATION),
    solid("limestone", 0xFFFFFF, ROCK_VARIATION),
    plant("red_flower", 0x701F16, var(0.15, 0.15, [1.3, 0.7, 0.7])),
    plant("orange_flower", 0xB58B3F, PLANT_VARIATION),
    plant("white_flower", 0x755E6F, PLANT_VARIATION),
    plant("grass_foliage", 0x305C30, PLANT_VARIATION),
];
