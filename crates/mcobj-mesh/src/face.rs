use mcobj_blocks::BlockId;

/// Chunk-local vertex position on the `17 x (H+1) x 17` lattice.
pub type Corner = [usize; 3];

/// A quad: the block it belongs to and four [`VertexGrid`](crate::VertexGrid) cell indices.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Face {
    pub block: BlockId,
    pub corners: [usize; 4],
}

/// The four side directions a block face can point in.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Wall {
    NegX = 0,
    PosX = 1,
    NegZ = 2,
    PosZ = 3,
}

impl Wall {
    pub const ALL: [Wall; 4] = [Wall::NegX, Wall::PosX, Wall::NegZ, Wall::PosZ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Neighbour offset `(dx, dz)` this wall faces.
    #[inline]
    pub fn offset(self) -> (i32, i32) {
        match self {
            Wall::NegX => (-1, 0),
            Wall::PosX => (1, 0),
            Wall::NegZ => (0, -1),
            Wall::PosZ => (0, 1),
        }
    }

    /// Quad for the block at `(x, y, z)`, wound to face outwards.
    #[inline]
    pub fn quad(self, x: usize, y: usize, z: usize) -> [Corner; 4] {
        match self {
            Wall::NegX => [[x, y, z], [x, y, z + 1], [x, y + 1, z + 1], [x, y + 1, z]],
            Wall::PosX => [
                [x + 1, y, z],
                [x + 1, y + 1, z],
                [x + 1, y + 1, z + 1],
                [x + 1, y, z + 1],
            ],
            Wall::NegZ => [[x, y, z], [x, y + 1, z], [x + 1, y + 1, z], [x + 1, y, z]],
            Wall::PosZ => [
                [x, y, z + 1],
                [x + 1, y, z + 1],
                [x + 1, y + 1, z + 1],
                [x, y + 1, z + 1],
            ],
        }
    }

    /// Which two corners of [`Wall::quad`] lie on the top edge.
    #[inline]
    pub fn top_corners(self) -> [usize; 2] {
        match self {
            Wall::NegX | Wall::PosZ => [2, 3],
            Wall::PosX | Wall::NegZ => [1, 2],
        }
    }
}

#[inline]
pub fn bottom_quad(x: usize, y: usize, z: usize) -> [Corner; 4] {
    [[x, y, z], [x + 1, y, z], [x + 1, y, z + 1], [x, y, z + 1]]
}

#[inline]
pub fn top_quad(x: usize, y: usize, z: usize) -> [Corner; 4] {
    let y = y + 1;
    [[x, y, z], [x, y, z + 1], [x + 1, y, z + 1], [x + 1, y, z]]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_corners_sit_one_above() {
        for w in Wall::ALL {
            let q = w.quad(3, 5, 7);
            let [a, b] = w.top_corners();
            assert_eq!(q[a][1], 6);
            assert_eq!(q[b][1], 6);
            let low = (0..4).filter(|i| q[*i][1] == 5).count();
            assert_eq!(low, 2, "{w:?}");
        }
    }

    #[test]
    fn walls_lie_on_the_faced_plane() {
        for w in Wall::ALL {
            let (dx, dz) = w.offset();
            for c in w.quad(3, 5, 7) {
                if dx != 0 {
                    assert_eq!(c[0], if dx < 0 { 3 } else { 4 });
                }
                if dz != 0 {
                    assert_eq!(c[2], if dz < 0 { 7 } else { 8 });
                }
            }
        }
    }
}
