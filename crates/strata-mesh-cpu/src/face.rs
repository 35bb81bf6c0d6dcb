use strata_geom::Vec3;

#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Face {
    PosY = 0,
    NegY = 1,
    PosX = 2,
    NegX = 3,
    PosZ = 4,
    NegZ = 5,
}

impl Face {
    pub const ALL: [Face; 6] = [
        Face::PosY,
        Face::NegY,
        Face::PosX,
        Face::NegX,
        Face::PosZ,
        Face::NegZ,
    ];

    /// Returns the `[0..6)` index of this face.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Converts a face index back into a `Face`. Falls back to `PosY` for
    /// out-of-range indices.
    #[inline]
    pub fn from_index(i: usize) -> Face {
        Self::ALL.get(i).copied().unwrap_or(Face::PosY)
    }

    /// Integer step `(dx, dy, dz)` to the block this face looks at.
    #[inline]
    pub fn delta(self) -> (i32, i32, i32) {
        match self {
            Face::PosY => (0, 1, 0),
            Face::NegY => (0, -1, 0),
            Face::PosX => (1, 0, 0),
            Face::NegX => (-1, 0, 0),
            Face::PosZ => (0, 0, 1),
            Face::NegZ => (0, 0, -1),
        }
    }

    #[inline]
    pub fn normal(self) -> Vec3 {
        let (x, y, z) = self.delta();
        Vec3::new(x as f32, y as f32, z as f32)
    }

    /// Axis index (0 = x, 1 = y, 2 = z) the face is perpendicular to.
    #[inline]
    pub fn axis(self) -> usize {
        match self {
            Face::PosX | Face::NegX => 0,
            Face::PosY | Face::NegY => 1,
            Face::PosZ | Face::NegZ => 2,
        }
    }

    /// The two in-plane axes.
    #[inline]
    pub fn tangent_axes(self) -> (usize, usize) {
        match self.axis() {
            0 => (1, 2),
            1 => (0, 2),
            _ => (0, 1),
        }
    }

    /// Unit-cube corners of this face, counter-clockwise when seen from
    /// outside the block.
    #[inline]
    pub fn corners(self) -> [[i32; 3]; 4] {
        match self {
            Face::PosY => [[0, 1, 1], [1, 1, 1], [1, 1, 0], [0, 1, 0]],
            Face::NegY => [[0, 0, 0], [1, 0, 0], [1, 0, 1], [0, 0, 1]],
            Face::PosX => [[1, 0, 0], [1, 1, 0], [1, 1, 1], [1, 0, 1]],
            Face::NegX => [[0, 0, 1], [0, 1, 1], [0, 1, 0], [0, 0, 0]],
            Face::PosZ => [[0, 0, 1], [1, 0, 1], [1, 1, 1], [0, 1, 1]],
            Face::NegZ => [[1, 0, 0], [0, 0, 0], [0, 1, 0], [1, 1, 0]],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corners_wind_outward() {
        for f in Face::ALL {
            let c = f.corners().map(|p| Vec3::new(p[0] as f32, p[1] as f32, p[2] as f32));
            let n = (c[1] - c[0]).cross(c[2] - c[0]);
            assert!(n.dot(f.normal()) > 0.0, "{f:?} winds inward");
            for p in f.corners() {
                let (dx, dy, dz) = f.delta();
                let outer = [dx, dy, dz][f.axis()] > 0;
                assert_eq!(p[f.axis()] == 1, outer);
            }
        }
    }

    #[test]
    fn index_round_trip() {
        for f in Face::ALL {
            assert_eq!(Face::from_index(f.index()), f);
        }
        assert_eq!(Face::from_index(99), Face::PosY);
    }
}
