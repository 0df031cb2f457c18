use std::io::{self, Write};

use mcobj_world::{CHUNK_SIZE, ChunkCoord};

use crate::face::Corner;

/// Block height mapped to world-space zero.
pub const Y_ORIGIN: i64 = 64;

const SPAN: usize = CHUNK_SIZE + 1;

/// Reference-counted vertex lattice of one chunk, `17 x (H+1) x 17` cells.
///
/// Extraction first counts uses per cell; [`VertexGrid::number`] then assigns
/// 1-based numbers to every used cell in index order (y fastest, then z, then
/// x). Unused cells keep the number 0. Vertex output walks the same order.
#[derive(Clone, Debug)]
pub struct VertexGrid {
    height: usize,
    refs: Vec<u16>,
    numbers: Vec<u32>,
    count: u32,
}

impl VertexGrid {
    pub fn new(height: usize) -> Self {
        let len = SPAN * SPAN * (height + 1);
        Self {
            height,
            refs: vec![0; len],
            numbers: vec![0; len],
            count: 0,
        }
    }

    /// Clears all counts, keeping the allocation when the height is unchanged.
    pub fn reset(&mut self, height: usize) {
        let len = SPAN * SPAN * (height + 1);
        self.height = height;
        self.refs.clear();
        self.refs.resize(len, 0);
        self.numbers.clear();
        self.numbers.resize(len, 0);
        self.count = 0;
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.refs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.refs.is_empty()
    }

    #[inline]
    pub fn index(&self, [x, y, z]: Corner) -> usize {
        y + (z + x * SPAN) * (self.height + 1)
    }

    #[inline]
    pub fn corner(&self, index: usize) -> Corner {
        let layer = self.height + 1;
        let y = index % layer;
        let zx = index / layer;
        [zx / SPAN, y, zx % SPAN]
    }

    /// Records one use of the cell at `corner` and returns its index.
    #[inline]
    pub fn use_corner(&mut self, corner: Corner) -> usize {
        let i = self.index(corner);
        self.refs[i] = self.refs[i].saturating_add(1);
        i
    }

    #[inline]
    pub fn refs(&self, index: usize) -> u16 {
        self.refs[index]
    }

    /// Count of cells with a nonzero reference count.
    pub fn referenced(&self) -> usize {
        self.refs.iter().filter(|&&r| r > 0).count()
    }

    /// Compacts the used cells into sequential numbers starting at 1.
    pub fn number(&mut self) -> u32 {
        let mut n = 0u32;
        for (num, &r) in self.numbers.iter_mut().zip(&self.refs) {
            if r > 0 {
                n += 1;
                *num = n;
            } else {
                *num = 0;
            }
        }
        self.count = n;
        n
    }

    /// Number assigned by the last [`VertexGrid::number`], 0 if unused.
    #[inline]
    pub fn number_of(&self, index: usize) -> u32 {
        self.numbers[index]
    }

    #[inline]
    pub fn vertex_count(&self) -> u32 {
        self.count
    }

    /// Numbered cells in number order.
    pub fn numbered(&self) -> impl Iterator<Item = Corner> + '_ {
        self.numbers
            .iter()
            .enumerate()
            .filter(|(_, n)| **n != 0)
            .map(|(i, _)| self.corner(i))
    }

    /// Writes one `v x y z` line per numbered cell in world coordinates.
    pub fn write_vertices<W: Write>(&self, coord: ChunkCoord, w: &mut W) -> io::Result<()> {
        let bx = i64::from(coord.x) * CHUNK_SIZE as i64;
        let bz = i64::from(coord.z) * CHUNK_SIZE as i64;
        for [x, y, z] in self.numbered() {
            w.write_all(b"v ")?;
            write_coord(w, x as i64 + bx)?;
            w.write_all(b" ")?;
            write_coord(w, y as i64 - Y_ORIGIN)?;
            w.write_all(b" ")?;
            write_coord(w, z as i64 + bz)?;
            w.write_all(b"\n")?;
        }
        Ok(())
    }
}

/// Writes a block coordinate scaled by 0.05 with exactly two decimals.
#[inline]
pub fn write_coord<W: Write>(w: &mut W, v: i64) -> io::Result<()> {
    let sign = if v < 0 { "-" } else { "" };
    let a = v.unsigned_abs();
    write!(w, "{sign}{}.{:02}", a / 20, (a % 20) * 5)
}
