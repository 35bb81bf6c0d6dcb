use clap::ValueEnum;
use strata_geom::Vec3;

const ORBIT_RADIUS: f32 = 48.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum PathKind {
    /// Stay at the spawn point.
    Still,
    /// Fly along +X.
    Line,
    /// Circle the spawn point.
    Orbit,
}

/// Scripted viewpoint motion for the headless driver.
#[derive(Clone, Copy, Debug)]
pub struct FlyPath {
    pub kind: PathKind,
    pub start: Vec3,
    /// Blocks per second.
    pub speed: f32,
}

impl FlyPath {
    pub fn at(&self, t: f32) -> Vec3 {
        match self.kind {
            PathKind::Still => self.start,
            PathKind::Line => self.start + Vec3::new(self.speed * t, 0.0, 0.0),
            PathKind::Orbit => {
                let a = self.speed * t / ORBIT_RADIUS;
                self.start + Vec3::new(a.cos() - 1.0, 0.0, a.sin()) * ORBIT_RADIUS
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_start_at_spawn() {
        let start = Vec3::new(8.5, 40.0, 8.5);
        for kind in [PathKind::Still, PathKind::Line, PathKind::Orbit] {
            let p = FlyPath { kind, start, speed: 10.0 };
            assert!((p.at(0.0) - start).length() < 1e-4);
        }
    }

    #[test]
    fn line_moves_at_speed_and_orbit_stays_on_circle() {
        let start = Vec3::new(0.0, 40.0, 0.0);
        let line = FlyPath { kind: PathKind::Line, start, speed: 10.0 };
        assert!((line.at(2.0).x - 20.0).abs() < 1e-4);

        let orbit = FlyPath { kind: PathKind::Orbit, start, speed: 10.0 };
        let center = start - Vec3::new(ORBIT_RADIUS, 0.0, 0.0);
        for t in [0.5, 3.0, 17.0] {
            let d = (orbit.at(t) - center).length();
            assert!((d - ORBIT_RADIUS).abs() < 1e-2);
        }
    }
}
