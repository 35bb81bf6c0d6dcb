use std::cmp::Reverse;
use std::collections::BinaryHeap;

use hashbrown::HashSet;
use strata_world::ChunkCoord;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct Entry {
    dist_sq: i64,
    // Insertion order; breaks distance ties first-in first-out.
    seq: u64,
    coord: ChunkCoord,
}

/// Chunks waiting for generation, nearest to the viewpoint chunk first.
///
/// Each coordinate appears at most once, and coordinates farther than
/// `bound` (Chebyshev) from the current center are refused on enqueue and
/// dropped on recenter.
#[derive(Debug)]
pub struct LoadQueue {
    heap: BinaryHeap<Reverse<Entry>>,
    members: HashSet<ChunkCoord>,
    center: ChunkCoord,
    bound: i32,
    next_seq: u64,
}

impl LoadQueue {
    pub fn new(center: ChunkCoord, bound: i32) -> Self {
        Self {
            heap: BinaryHeap::new(),
            members: HashSet::new(),
            center,
            bound: bound.max(0),
            next_seq: 0,
        }
    }

    #[inline]
    pub fn center(&self) -> ChunkCoord {
        self.center
    }

    #[inline]
    pub fn bound(&self) -> i32 {
        self.bound
    }

    #[inline]
    pub fn in_bounds(&self, coord: ChunkCoord) -> bool {
        coord.chebyshev(self.center) <= self.bound
    }

    /// Returns false when the coordinate is already queued or out of bounds.
    pub fn enqueue(&mut self, coord: ChunkCoord) -> bool {
        if !self.in_bounds(coord) || !self.members.insert(coord) {
            return false;
        }
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Reverse(Entry {
            dist_sq: coord.distance_sq(self.center),
            seq,
            coord,
        }));
        true
    }

    pub fn peek(&self) -> Option<ChunkCoord> {
        self.heap.peek().map(|Reverse(e)| e.coord)
    }

    pub fn pop(&mut self) -> Option<ChunkCoord> {
        let Reverse(e) = self.heap.pop()?;
        self.members.remove(&e.coord);
        Some(e.coord)
    }

    /// Removes up to `max` entries, nearest first.
    pub fn dequeue_batch(&mut self, max: usize) -> Vec<ChunkCoord> {
        let mut out = Vec::with_capacity(max.min(self.heap.len()));
        while out.len() < max {
            match self.pop() {
                Some(c) => out.push(c),
                None => break,
            }
        }
        out
    }

    /// Moves the center, re-keys every entry and drops the ones now out of
    /// bounds. Returns how many were dropped.
    pub fn recenter(&mut self, center: ChunkCoord) -> usize {
        if center == self.center {
            return 0;
        }
        self.center = center;
        let old = std::mem::take(&mut self.heap).into_vec();
        let mut dropped = 0;
        let mut kept = Vec::with_capacity(old.len());
        for Reverse(mut e) in old {
            if e.coord.chebyshev(center) > self.bound {
                self.members.remove(&e.coord);
                dropped += 1;
                continue;
            }
            e.dist_sq = e.coord.distance_sq(center);
            kept.push(Reverse(e));
        }
        self.heap = BinaryHeap::from(kept);
        dropped
    }

    pub fn remove(&mut self, coord: ChunkCoord) -> bool {
        if !self.members.remove(&coord) {
            return false;
        }
        self.heap.retain(|Reverse(e)| e.coord != coord);
        true
    }

    #[inline]
    pub fn contains(&self, coord: ChunkCoord) -> bool {
        self.members.contains(&coord)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = ChunkCoord> + '_ {
        self.heap.iter().map(|Reverse(e)| e.coord)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(cx: i32, cz: i32) -> ChunkCoord {
        ChunkCoord::new(cx, cz)
    }

    #[test]
    fn duplicate_enqueue_is_a_no_op() {
        let mut q = LoadQueue::new(c(0, 0), 4);
        assert!(q.enqueue(c(1, 1)));
        assert!(!q.enqueue(c(1, 1)));
        assert_eq!(q.len(), 1);
        assert!(q.contains(c(1, 1)));
    }

    #[test]
    fn out_of_bounds_is_refused() {
        let mut q = LoadQueue::new(c(0, 0), 2);
        assert!(q.enqueue(c(2, -2)));
        assert!(!q.enqueue(c(3, 0)));
        assert!(!q.contains(c(3, 0)));
    }

    #[test]
    fn equal_distance_is_first_in_first_out() {
        let mut q = LoadQueue::new(c(0, 0), 4);
        for coord in [c(0, 1), c(1, 0), c(-1, 0), c(0, -1)] {
            q.enqueue(coord);
        }
        q.enqueue(c(0, 0));
        assert_eq!(
            q.dequeue_batch(10),
            vec![c(0, 0), c(0, 1), c(1, 0), c(-1, 0), c(0, -1)]
        );
        assert!(q.is_empty());
    }

    #[test]
    fn recenter_rekeys_and_drops() {
        let mut q = LoadQueue::new(c(0, 0), 1);
        q.enqueue(c(-1, 0));
        q.enqueue(c(1, 0));
        q.enqueue(c(0, 0));
        assert_eq!(q.recenter(c(1, 0)), 1);
        assert!(!q.contains(c(-1, 0)));
        assert_eq!(q.dequeue_batch(2), vec![c(1, 0), c(0, 0)]);
        // Dropped entries can come back once in range again.
        assert_eq!(q.recenter(c(0, 0)), 0);
        assert!(q.enqueue(c(-1, 0)));
    }

    #[test]
    fn remove_and_peek() {
        let mut q = LoadQueue::new(c(0, 0), 3);
        q.enqueue(c(2, 2));
        q.enqueue(c(1, 0));
        assert_eq!(q.peek(), Some(c(1, 0)));
        assert!(q.remove(c(1, 0)));
        assert!(!q.remove(c(1, 0)));
        assert_eq!(q.peek(), Some(c(2, 2)));
        assert_eq!(q.iter().count(), 1);
    }
}
