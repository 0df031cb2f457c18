use hashbrown::HashSet;

use crate::coord::ChunkCoord;
use crate::mask::{BoundingBox, ChunkMask};

/// Chunk coordinates still waiting to be processed. Each coordinate pops once.
#[derive(Clone, Debug, Default)]
pub struct ChunkPool {
    remaining: HashSet<ChunkCoord>,
    bounds: Option<BoundingBox>,
}

impl ChunkPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collects `coords`, dropping any the mask excludes.
    pub fn from_coords<I>(coords: I, mask: &ChunkMask) -> Self
    where
        I: IntoIterator<Item = ChunkCoord>,
    {
        let mut pool = Self::new();
        for c in coords {
            if mask.contains(c) {
                pool.insert(c);
            }
        }
        pool
    }

    pub fn insert(&mut self, coord: ChunkCoord) {
        match self.bounds.as_mut() {
            Some(b) => b.include(coord),
            None => self.bounds = Some(BoundingBox::at(coord)),
        }
        self.remaining.insert(coord);
    }

    /// Removes `coord`; `false` if it was never present or already popped.
    #[inline]
    pub fn pop(&mut self, coord: ChunkCoord) -> bool {
        self.remaining.remove(&coord)
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.remaining.len()
    }

    #[inline]
    pub fn contains(&self, coord: ChunkCoord) -> bool {
        self.remaining.contains(&coord)
    }

    /// Bounds of every coordinate ever inserted.
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        self.bounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pops_once() {
        let mut pool = ChunkPool::from_coords(
            [(0, 0), (1, 0), (5, 5)].map(ChunkCoord::from),
            &ChunkMask::Rect { x0: 0, z0: 0, x1: 4, z1: 4 },
        );
        assert_eq!(pool.remaining(), 2);
        assert!(!pool.pop(ChunkCoord::new(5, 5)));
        assert!(pool.pop(ChunkCoord::new(1, 0)));
        assert!(!pool.pop(ChunkCoord::new(1, 0)));
        assert_eq!(pool.remaining(), 1);
        let bb = pool.bounding_box().unwrap();
        assert_eq!((bb.min, bb.max), (ChunkCoord::new(0, 0), ChunkCoord::new(1, 0)));
    }
}
