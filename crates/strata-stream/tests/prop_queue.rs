use proptest::prelude::*;
use strata_stream::LoadQueue;
use strata_world::ChunkCoord;

fn coord() -> impl Strategy<Value = ChunkCoord> {
    (-8i32..=8, -8i32..=8).prop_map(|(x, z)| ChunkCoord::new(x, z))
}

proptest! {
    #[test]
    fn dequeue_is_nearest_first(
        center in coord(),
        bound in 0i32..6,
        coords in proptest::collection::vec(coord(), 0..80),
    ) {
        let mut q = LoadQueue::new(center, bound);
        let mut expected = std::collections::HashSet::new();
        for &c in &coords {
            let fresh = c.chebyshev(center) <= bound && expected.insert(c);
            prop_assert_eq!(q.enqueue(c), fresh);
        }
        prop_assert_eq!(q.len(), expected.len());

        let out = q.dequeue_batch(usize::MAX);
        prop_assert_eq!(out.len(), expected.len());
        for w in out.windows(2) {
            prop_assert!(w[0].distance_sq(center) <= w[1].distance_sq(center));
        }
        prop_assert!(q.is_empty());
    }

    #[test]
    fn recenter_keeps_order_and_bound(
        first in coord(),
        second in coord(),
        coords in proptest::collection::vec(coord(), 0..80),
        take in 0usize..10,
    ) {
        let mut q = LoadQueue::new(first, 4);
        for &c in &coords {
            q.enqueue(c);
        }
        let served = q.dequeue_batch(take);
        q.recenter(second);
        for c in q.iter() {
            prop_assert!(c.chebyshev(second) <= 4);
            prop_assert!(!served.contains(&c));
        }
        let out = q.dequeue_batch(usize::MAX);
        for w in out.windows(2) {
            prop_assert!(w[0].distance_sq(second) <= w[1].distance_sq(second));
        }
    }
}
