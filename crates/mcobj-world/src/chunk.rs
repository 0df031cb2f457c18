use mcobj_blocks::BlockId;

use crate::coord::ChunkCoord;

/// Width of a chunk along x and z.
pub const CHUNK_SIZE: usize = 16;

/// Decoded chunk: `16 x 16` columns of `height` blocks, stored x-major then z then y.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Chunk {
    pub coord: ChunkCoord,
    pub height: usize,
    pub blocks: Vec<BlockId>,
}

impl Chunk {
    /// Air-filled chunk.
    pub fn new(coord: ChunkCoord, height: usize) -> Self {
        Self {
            coord,
            height,
            blocks: vec![BlockId::AIR; CHUNK_SIZE * CHUNK_SIZE * height],
        }
    }

    /// Wraps an existing block vector, padding or truncating to the expected size.
    pub fn from_blocks(coord: ChunkCoord, height: usize, blocks: Vec<BlockId>) -> Self {
        let mut b = blocks;
        let expect = CHUNK_SIZE * CHUNK_SIZE * height;
        if b.len() != expect {
            b.resize(expect, BlockId::AIR);
        }
        Self {
            coord,
            height,
            blocks: b,
        }
    }

    #[inline]
    pub fn idx(&self, x: usize, y: usize, z: usize) -> usize {
        y + self.height * (z + CHUNK_SIZE * x)
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize, z: usize) -> BlockId {
        self.blocks[self.idx(x, y, z)]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, z: usize, id: BlockId) {
        let i = self.idx(x, y, z);
        self.blocks[i] = id;
    }

    /// The `height` blocks of one column, bottom first.
    #[inline]
    pub fn column(&self, x: usize, z: usize) -> &[BlockId] {
        let start = self.height * (z + CHUNK_SIZE * x);
        &self.blocks[start..start + self.height]
    }

    /// Fills the box `[x0,x1) x [y0,y1) x [z0,z1)` with `id`.
    pub fn fill(&mut self, x: (usize, usize), y: (usize, usize), z: (usize, usize), id: BlockId) {
        for xi in x.0..x.1 {
            for zi in z.0..z.1 {
                for yi in y.0..y.1 {
                    self.set(xi, yi, zi, id);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_layout_is_y_innermost() {
        let mut c = Chunk::new(ChunkCoord::new(0, 0), 8);
        c.set(2, 5, 3, BlockId::STONE);
        assert_eq!(c.idx(2, 5, 3), 5 + 8 * (3 + 16 * 2));
        assert_eq!(c.column(2, 3)[5], BlockId::STONE);
        assert_eq!(c.column(2, 4)[5], BlockId::AIR);
    }

    #[test]
    fn from_blocks_pads_short_input() {
        let c = Chunk::from_blocks(ChunkCoord::new(1, 1), 4, vec![BlockId::STONE; 3]);
        assert_eq!(c.blocks.len(), 16 * 16 * 4);
        assert_eq!(c.get(0, 2, 0), BlockId::STONE);
        assert_eq!(c.get(0, 3, 0), BlockId::AIR);
    }
}
