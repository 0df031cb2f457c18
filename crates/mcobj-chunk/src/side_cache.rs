use hashbrown::HashMap;
use mcobj_world::{Chunk, ChunkCoord};

use crate::enclosed::EnclosedChunk;
use crate::side::{ChunkSide, Edge, EnclosePolicy, SideSlice};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SideCacheStats {
    /// Sides served from cached neighbour data.
    pub hits: u64,
    /// Sides served as the fixed default.
    pub defaults: u64,
    /// Entries dropped after their last side was taken.
    pub evictions: u64,
    pub peak_entries: usize,
}

/// Boundary slices of decoded chunks, kept until each neighbour has taken its side.
///
/// Owned by the single scheduling thread; workers only ever see the
/// [`EnclosedChunk`]s it hands out.
#[derive(Debug)]
pub struct SideCache {
    entries: HashMap<ChunkCoord, [Option<SideSlice>; 4]>,
    policy: EnclosePolicy,
    stats: SideCacheStats,
}

impl SideCache {
    pub fn new(policy: EnclosePolicy) -> Self {
        Self {
            entries: HashMap::new(),
            policy,
            stats: SideCacheStats::default(),
        }
    }

    pub fn policy(&self) -> EnclosePolicy {
        self.policy
    }

    /// Stores the four edges of `chunk`. Existing entries are left untouched.
    pub fn add_chunk(&mut self, chunk: &Chunk) {
        if self.entries.contains_key(&chunk.coord) {
            return;
        }
        let slots = Edge::ALL.map(|e| Some(SideSlice::from_chunk(chunk, e)));
        self.entries.insert(chunk.coord, slots);
        self.stats.peak_entries = self.stats.peak_entries.max(self.entries.len());
    }

    #[inline]
    pub fn has_side(&self, coord: ChunkCoord) -> bool {
        self.entries.contains_key(&coord)
    }

    /// Takes one edge of the chunk at `coord`, or the default side when none is cached.
    pub fn get_side(&mut self, coord: ChunkCoord, edge: Edge) -> ChunkSide {
        let Some(slots) = self.entries.get_mut(&coord) else {
            self.stats.defaults += 1;
            return ChunkSide::Fixed(self.policy.default_side.block());
        };
        let taken = slots[edge.index()].take();
        if slots.iter().all(Option::is_none) {
            self.entries.remove(&coord);
            self.stats.evictions += 1;
        }
        match taken {
            Some(slice) => {
                self.stats.hits += 1;
                ChunkSide::Slice(slice)
            }
            None => {
                self.stats.defaults += 1;
                ChunkSide::Fixed(self.policy.default_side.block())
            }
        }
    }

    /// Surrounds `chunk` with whatever neighbour sides are available.
    pub fn enclose(&mut self, chunk: Chunk) -> EnclosedChunk {
        let coord = chunk.coord;
        let sides = Edge::ALL.map(|e| {
            let (dx, dz) = e.neighbor_offset();
            self.get_side(coord.offset(dx, dz), e.opposite())
        });
        EnclosedChunk::new(chunk, sides, self.policy.hide_bottom)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> SideCacheStats {
        self.stats
    }
}
