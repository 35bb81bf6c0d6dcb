use proptest::prelude::*;
use strata_geom::{Aabb, Vec3};

fn coord() -> impl Strategy<Value = f32> {
    -1.0e4f32..1.0e4f32
}

fn arb_vec3() -> impl Strategy<Value = Vec3> {
    (coord(), coord(), coord()).prop_map(|(x, y, z)| Vec3::new(x, y, z))
}

proptest! {
    #[test]
    fn add_commutes(a in arb_vec3(), b in arb_vec3()) {
        prop_assert_eq!(a + b, b + a);
    }

    #[test]
    fn cross_is_orthogonal(a in arb_vec3(), b in arb_vec3()) {
        let c = a.cross(b);
        let scale = a.length() * b.length() * c.length() + 1.0;
        prop_assert!(c.dot(a).abs() <= 1e-3 * scale);
        prop_assert!(c.dot(b).abs() <= 1e-3 * scale);
    }

    #[test]
    fn included_points_are_contained(pts in prop::collection::vec(arb_vec3(), 1..16)) {
        let mut bb = Aabb::empty();
        for p in &pts {
            bb.include_point(*p);
        }
        for p in &pts {
            prop_assert!(bb.contains(*p));
        }
        let e = bb.extent();
        prop_assert!(e.x >= 0.0 && e.y >= 0.0 && e.z >= 0.0);
    }

    #[test]
    fn union_contains_both(a in arb_vec3(), b in arb_vec3(), c in arb_vec3(), d in arb_vec3()) {
        let mut x = Aabb::empty();
        x.include_point(a);
        x.include_point(b);
        let mut y = Aabb::empty();
        y.include_point(c);
        y.include_point(d);
        let u = x.union(y);
        for p in [a, b, c, d] {
            prop_assert!(u.contains(p));
        }
    }
}
