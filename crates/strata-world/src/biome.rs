/// Horizontal region classification, ordered from the lowest biome-noise band
/// to the highest.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Biome {
    Barren,
    Rocky,
    Plains,
    Forest,
    DenseForest,
}

impl Biome {
    pub const ALL: [Biome; 5] = [
        Biome::Barren,
        Biome::Rocky,
        Biome::Plains,
        Biome::Forest,
        Biome::DenseForest,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Buckets a biome-noise sample using four ascending band edges.
    pub fn from_noise(n: f32, thresholds: &[f32; 4]) -> Biome {
        thresholds
            .iter()
            .position(|t| n < *t)
            .map(|i| Self::ALL[i])
            .unwrap_or(Biome::DenseForest)
    }

    pub fn name(self) -> &'static str {
        match self {
            Biome::Barren => "barren",
            Biome::Rocky => "rocky",
            Biome::Plains => "plains",
            Biome::Forest => "forest",
            Biome::DenseForest => "dense_forest",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bands_follow_thresholds() {
        let t = [-0.6, -0.2, 0.2, 0.6];
        assert_eq!(Biome::from_noise(-0.9, &t), Biome::Barren);
        assert_eq!(Biome::from_noise(-0.6, &t), Biome::Rocky);
        assert_eq!(Biome::from_noise(0.0, &t), Biome::Plains);
        assert_eq!(Biome::from_noise(0.59, &t), Biome::Forest);
        assert_eq!(Biome::from_noise(0.6, &t), Biome::DenseForest);
        assert_eq!(Biome::from_noise(1.0, &t), Biome::DenseForest);
    }
}
