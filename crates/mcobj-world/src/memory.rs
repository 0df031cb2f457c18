use hashbrown::HashMap;

use crate::chunk::Chunk;
use crate::coord::ChunkCoord;
use crate::error::WorldError;
use crate::mask::ChunkMask;
use crate::pool::ChunkPool;
use crate::WorldStore;

/// World held entirely in memory.
#[derive(Clone, Debug, Default)]
pub struct MemoryWorld {
    chunks: HashMap<ChunkCoord, Chunk>,
}

impl MemoryWorld {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, chunk: Chunk) {
        self.chunks.insert(chunk.coord, chunk);
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }
}

impl FromIterator<Chunk> for MemoryWorld {
    fn from_iter<T: IntoIterator<Item = Chunk>>(iter: T) -> Self {
        let mut world = MemoryWorld::new();
        for chunk in iter {
            world.insert(chunk);
        }
        world
    }
}

impl WorldStore for MemoryWorld {
    fn load_chunk(&self, coord: ChunkCoord) -> Result<Chunk, WorldError> {
        self.chunks
            .get(&coord)
            .cloned()
            .ok_or(WorldError::NotFound(coord))
    }

    fn chunk_pool(&self, mask: &ChunkMask) -> Result<ChunkPool, WorldError> {
        Ok(ChunkPool::from_coords(self.chunks.keys().copied(), mask))
    }
}
