use mcobj_blocks::BlockId;
use mcobj_world::{CHUNK_SIZE, Chunk, ChunkCoord};

use crate::side::{ChunkSide, Edge};

const EDGE: i32 = CHUNK_SIZE as i32;

/// A chunk together with the four neighbour sides it needs for face culling.
#[derive(Clone, Debug)]
pub struct EnclosedChunk {
    chunk: Chunk,
    /// Indexed by [`Edge`]: what lies across `x = -1`, `x = 16`, `z = -1`, `z = 16`.
    sides: [ChunkSide; 4],
    hide_bottom: bool,
}

impl EnclosedChunk {
    pub fn new(chunk: Chunk, sides: [ChunkSide; 4], hide_bottom: bool) -> Self {
        Self {
            chunk,
            sides,
            hide_bottom,
        }
    }

    /// Encloses `chunk` with the same fixed block on every side.
    pub fn isolated(chunk: Chunk, side: BlockId, hide_bottom: bool) -> Self {
        Self::new(chunk, [(); 4].map(|_| ChunkSide::Fixed(side)), hide_bottom)
    }

    #[inline]
    pub fn coord(&self) -> ChunkCoord {
        self.chunk.coord
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.chunk.height
    }

    #[inline]
    pub fn chunk(&self) -> &Chunk {
        &self.chunk
    }

    pub fn side(&self, edge: Edge) -> &ChunkSide {
        &self.sides[edge.index()]
    }

    pub fn into_chunk(self) -> Chunk {
        self.chunk
    }

    /// Block at chunk-local `(x, y, z)` for `x, z` in `-1..=16`.
    ///
    /// Below the world reads bedrock when the bottom is hidden, otherwise air.
    /// Above the chunk is air. The four diagonal corners are never stitched and
    /// read as air.
    #[inline]
    pub fn get(&self, x: i32, y: i32, z: i32) -> BlockId {
        if y < 0 {
            return if self.hide_bottom {
                BlockId::BEDROCK
            } else {
                BlockId::AIR
            };
        }
        let y = y as usize;
        if y >= self.chunk.height {
            return BlockId::AIR;
        }
        let inside = |v: i32| (0..EDGE).contains(&v);
        match (x, z) {
            (-1, z) if inside(z) => self.sides[Edge::MinX.index()].get(z as usize, y),
            (EDGE, z) if inside(z) => self.sides[Edge::MaxX.index()].get(z as usize, y),
            (x, -1) if inside(x) => self.sides[Edge::MinZ.index()].get(x as usize, y),
            (x, EDGE) if inside(x) => self.sides[Edge::MaxZ.index()].get(x as usize, y),
            (x, z) if inside(x) && inside(z) => self.chunk.get(x as usize, y, z as usize),
            _ => BlockId::AIR,
        }
    }
}
