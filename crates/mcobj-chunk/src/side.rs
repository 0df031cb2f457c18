use mcobj_blocks::BlockId;
use mcobj_world::{CHUNK_SIZE, Chunk};
use serde::Deserialize;

/// One of the four vertical boundary slices of a chunk.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Edge {
    /// The `x = 0` column row.
    MinX = 0,
    /// The `x = 15` column row.
    MaxX = 1,
    /// The `z = 0` column row.
    MinZ = 2,
    /// The `z = 15` column row.
    MaxZ = 3,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::MinX, Edge::MaxX, Edge::MinZ, Edge::MaxZ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    #[inline]
    pub fn opposite(self) -> Edge {
        match self {
            Edge::MinX => Edge::MaxX,
            Edge::MaxX => Edge::MinX,
            Edge::MinZ => Edge::MaxZ,
            Edge::MaxZ => Edge::MinZ,
        }
    }

    /// Chunk offset of the neighbour that sits across this edge.
    #[inline]
    pub fn neighbor_offset(self) -> (i32, i32) {
        match self {
            Edge::MinX => (-1, 0),
            Edge::MaxX => (1, 0),
            Edge::MinZ => (0, -1),
            Edge::MaxZ => (0, 1),
        }
    }
}

/// `16 x height` ids of one edge, indexed `y + i * height` where `i` runs along the edge.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SideSlice {
    height: usize,
    blocks: Vec<BlockId>,
}

impl SideSlice {
    pub fn from_chunk(chunk: &Chunk, edge: Edge) -> Self {
        let h = chunk.height;
        let mut blocks = Vec::with_capacity(CHUNK_SIZE * h);
        for i in 0..CHUNK_SIZE {
            let column = match edge {
                Edge::MinX => chunk.column(0, i),
                Edge::MaxX => chunk.column(CHUNK_SIZE - 1, i),
                Edge::MinZ => chunk.column(i, 0),
                Edge::MaxZ => chunk.column(i, CHUNK_SIZE - 1),
            };
            blocks.extend_from_slice(column);
        }
        Self { height: h, blocks }
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Block at position `i` along the edge; air above the slice's height.
    #[inline]
    pub fn get(&self, i: usize, y: usize) -> BlockId {
        if y >= self.height {
            return BlockId::AIR;
        }
        self.blocks[y + i * self.height]
    }
}

/// What an enclosed chunk sees across one of its edges.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChunkSide {
    Slice(SideSlice),
    /// Neighbour data is unavailable; every position reads as this block.
    Fixed(BlockId),
}

impl ChunkSide {
    #[inline]
    pub fn get(&self, i: usize, y: usize) -> BlockId {
        match self {
            ChunkSide::Slice(s) => s.get(i, y),
            ChunkSide::Fixed(id) => *id,
        }
    }

    pub fn is_fixed(&self) -> bool {
        matches!(self, ChunkSide::Fixed(_))
    }
}

/// Stand-in for a missing neighbour.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DefaultSide {
    /// Stone: world edges stay closed.
    #[default]
    Solid,
    /// Air: world edges show the underground.
    Empty,
}

impl DefaultSide {
    pub fn block(self) -> BlockId {
        match self {
            DefaultSide::Solid => BlockId::STONE,
            DefaultSide::Empty => BlockId::AIR,
        }
    }
}

/// How enclosed chunks fill in data that no chunk provides.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct EnclosePolicy {
    pub default_side: DefaultSide,
    /// Read bedrock below `y = 0` so the world floor produces no faces.
    pub hide_bottom: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use mcobj_world::ChunkCoord;

    #[test]
    fn slices_follow_edges() {
        let mut c = Chunk::new(ChunkCoord::new(0, 0), 4);
        c.set(0, 1, 7, BlockId(10));
        c.set(15, 2, 3, BlockId(11));
        c.set(9, 3, 0, BlockId(12));
        c.set(5, 0, 15, BlockId(13));
        assert_eq!(SideSlice::from_chunk(&c, Edge::MinX).get(7, 1), BlockId(10));
        assert_eq!(SideSlice::from_chunk(&c, Edge::MaxX).get(3, 2), BlockId(11));
        assert_eq!(SideSlice::from_chunk(&c, Edge::MinZ).get(9, 3), BlockId(12));
        assert_eq!(SideSlice::from_chunk(&c, Edge::MaxZ).get(5, 0), BlockId(13));
        assert_eq!(SideSlice::from_chunk(&c, Edge::MaxZ).get(5, 4), BlockId::AIR);
    }

    #[test]
    fn opposite_edges_pair_up() {
        for e in Edge::ALL {
            assert_eq!(e.opposite().opposite(), e);
            let (dx, dz) = e.neighbor_offset();
            let (ox, oz) = e.opposite().neighbor_offset();
            assert_eq!((dx + ox, dz + oz), (0, 0));
        }
    }
}
