use mcobj_blocks::BoundaryLocator;
use mcobj_chunk::EnclosedChunk;
use mcobj_world::CHUNK_SIZE;

use crate::vertex_grid::Y_ORIGIN;

/// Size of one particle record: three `f32` position components and an `i32` block id.
pub const PARTICLE_BYTES: usize = 16;

const NEIGHBORS: [(i32, i32, i32); 6] = [
    (0, -1, 0),
    (0, 1, 0),
    (-1, 0, 0),
    (1, 0, 0),
    (0, 0, -1),
    (0, 0, 1),
];

/// Appends one little-endian particle per block that shows any face.
///
/// Positions are in half-block units with x mirrored and y/z swapped into
/// `(x, z, y)` order. Returns the number of particles written.
pub fn collect_particles(
    chunk: &EnclosedChunk,
    locator: &BoundaryLocator,
    y_min: usize,
    out: &mut Vec<u8>,
) -> u64 {
    let coord = chunk.coord();
    let bx = i64::from(coord.x) * CHUNK_SIZE as i64;
    let bz = i64::from(coord.z) * CHUNK_SIZE as i64;
    let mut count = 0;
    for x in 0..CHUNK_SIZE {
        for z in 0..CHUNK_SIZE {
            let column = chunk.chunk().column(x, z);
            for y in y_min..column.len() {
                let block = column[y];
                let (xi, yi, zi) = (x as i32, y as i32, z as i32);
                let visible = NEIGHBORS
                    .iter()
                    .any(|&(dx, dy, dz)| locator.is_boundary(block, chunk.get(xi + dx, yi + dy, zi + dz)));
                if !visible {
                    continue;
                }
                let px = -(x as i64 + bx) * 2;
                let py = (z as i64 + bz) * 2;
                let pz = (y as i64 - Y_ORIGIN) * 2;
                out.extend_from_slice(&(px as f32).to_le_bytes());
                out.extend_from_slice(&(py as f32).to_le_bytes());
                out.extend_from_slice(&(pz as f32).to_le_bytes());
                out.extend_from_slice(&i32::from(block.0).to_le_bytes());
                count += 1;
            }
        }
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use mcobj_blocks::{BlockId, BlockRegistry};
    use mcobj_world::{Chunk, ChunkCoord};

    fn f32_at(buf: &[u8], at: usize) -> f32 {
        f32::from_le_bytes([buf[at], buf[at + 1], buf[at + 2], buf[at + 3]])
    }

    #[test]
    fn buried_blocks_emit_nothing() {
        let mut c = Chunk::new(ChunkCoord::new(1, -1), 4);
        c.fill((0, 16), (0, 4), (0, 16), BlockId::STONE);
        c.set(5, 2, 6, BlockId::new(14, 3));
        let locator = BoundaryLocator::new(&BlockRegistry::builtin(), false);
        let enclosed = EnclosedChunk::isolated(c, BlockId::STONE, true);
        let mut out = Vec::new();
        // Top layer only: 256 stone blocks under open sky.
        assert_eq!(collect_particles(&enclosed, &locator, 0, &mut out), 256);
        assert_eq!(out.len(), 256 * PARTICLE_BYTES);
    }

    #[test]
    fn record_layout() {
        let mut c = Chunk::new(ChunkCoord::new(1, -1), 70);
        c.set(2, 66, 3, BlockId::new(14, 3));
        let locator = BoundaryLocator::new(&BlockRegistry::builtin(), false);
        let enclosed = EnclosedChunk::isolated(c, BlockId::AIR, false);
        let mut out = Vec::new();
        assert_eq!(collect_particles(&enclosed, &locator, 0, &mut out), 1);
        assert_eq!(f32_at(&out, 0), -36.0);
        assert_eq!(f32_at(&out, 4), -26.0);
        assert_eq!(f32_at(&out, 8), 4.0);
        assert_eq!(i32::from_le_bytes([out[12], out[13], out[14], out[15]]), 14 + 3 * 256);
    }
}
