use std::io::{self, Write};
use std::sync::Arc;

use mcobj_blocks::{BlockId, BoundaryLocator};
use mcobj_chunk::EnclosedChunk;
use mcobj_world::{CHUNK_SIZE, ChunkCoord};

use crate::config::{MergePolicy, MeshingConfig};
use crate::face::{Corner, Face, Wall, bottom_quad, top_quad};
use crate::vertex_grid::VertexGrid;

/// Open wall quad of the current column, grown upwards while the block repeats.
#[derive(Copy, Clone, Debug)]
struct Run {
    block: BlockId,
    corners: [Corner; 4],
    open: bool,
}

impl Run {
    const CLOSED: Run = Run {
        block: BlockId::AIR,
        corners: [[0; 3]; 4],
        open: false,
    };
}

/// Greedy face extractor with scratch state reused across chunks.
#[derive(Debug)]
pub struct MeshExtractor {
    locator: Arc<BoundaryLocator>,
    config: MeshingConfig,
    grid: VertexGrid,
    faces: Vec<Face>,
    groups: Vec<BlockId>,
    coord: ChunkCoord,
}

impl MeshExtractor {
    pub fn new(locator: Arc<BoundaryLocator>, config: MeshingConfig) -> Self {
        Self {
            locator,
            config,
            grid: VertexGrid::new(0),
            faces: Vec::new(),
            groups: Vec::new(),
            coord: ChunkCoord::default(),
        }
    }

    pub fn config(&self) -> &MeshingConfig {
        &self.config
    }

    pub fn extract(&mut self, chunk: &EnclosedChunk) -> ChunkMesh<'_> {
        let height = chunk.height();
        self.grid.reset(height);
        self.faces.clear();
        self.groups.clear();
        self.coord = chunk.coord();

        for x in 0..CHUNK_SIZE {
            for z in 0..CHUNK_SIZE {
                self.scan_column(chunk, x, z);
            }
        }

        // Group faces by block in first-seen order; the sort is stable.
        let groups = &self.groups;
        self.faces.sort_by_key(|f| {
            groups
                .iter()
                .position(|g| *g == f.block)
                .unwrap_or(usize::MAX)
        });
        self.grid.number();

        ChunkMesh {
            coord: self.coord,
            grid: &self.grid,
            faces: &self.faces,
            groups: &self.groups,
        }
    }

    fn scan_column(&mut self, chunk: &EnclosedChunk, x: usize, z: usize) {
        let column = chunk.chunk().column(x, z);
        let mut runs = [Run::CLOSED; 4];
        let (xi, zi) = (x as i32, z as i32);

        for y in self.config.y_min..column.len() {
            let block = column[y];
            let yi = y as i32;

            if self.locator.is_boundary(block, chunk.get(xi, yi - 1, zi)) {
                self.add_face(block, bottom_quad(x, y, z));
            }
            if self.locator.is_boundary(block, chunk.get(xi, yi + 1, zi)) {
                self.add_face(block, top_quad(x, y, z));
            }

            for wall in Wall::ALL {
                let (dx, dz) = wall.offset();
                let boundary = self
                    .locator
                    .is_boundary(block, chunk.get(xi + dx, yi, zi + dz));
                let run = &mut runs[wall.index()];
                if !boundary {
                    let closed = std::mem::replace(run, Run::CLOSED);
                    self.finish(closed);
                    continue;
                }
                let quad = wall.quad(x, y, z);
                match self.config.merge {
                    MergePolicy::PerBlock => self.add_face(block, quad),
                    MergePolicy::Greedy => {
                        if run.open && run.block == block {
                            for c in wall.top_corners() {
                                run.corners[c] = quad[c];
                            }
                        } else {
                            let next = Run {
                                block,
                                corners: quad,
                                open: true,
                            };
                            let prev = std::mem::replace(run, next);
                            self.finish(prev);
                        }
                    }
                }
            }
        }

        for run in runs {
            self.finish(run);
        }
    }

    #[inline]
    fn finish(&mut self, run: Run) {
        if run.open {
            self.add_face(run.block, run.corners);
        }
    }

    fn add_face(&mut self, block: BlockId, quad: [Corner; 4]) {
        let corners = quad.map(|c| self.grid.use_corner(c));
        if !self.groups.contains(&block) {
            self.groups.push(block);
        }
        self.faces.push(Face { block, corners });
    }
}

/// Extraction result borrowed from the extractor's scratch state.
#[derive(Copy, Clone, Debug)]
pub struct ChunkMesh<'a> {
    coord: ChunkCoord,
    grid: &'a VertexGrid,
    faces: &'a [Face],
    groups: &'a [BlockId],
}

impl<'a> ChunkMesh<'a> {
    #[inline]
    pub fn coord(&self) -> ChunkCoord {
        self.coord
    }

    #[inline]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    #[inline]
    pub fn vertex_count(&self) -> u32 {
        self.grid.vertex_count()
    }

    pub fn grid(&self) -> &'a VertexGrid {
        self.grid
    }

    /// Faces ordered by material group.
    pub fn faces(&self) -> &'a [Face] {
        self.faces
    }

    /// Blocks in first-seen order, one per material group.
    pub fn block_order(&self) -> &'a [BlockId] {
        self.groups
    }

    /// `(block, faces)` per material group.
    pub fn groups(&self) -> impl Iterator<Item = (BlockId, &'a [Face])> + 'a {
        self.faces
            .chunk_by(|a, b| a.block == b.block)
            .map(|run| (run[0].block, run))
    }

    /// 1-based vertex numbers of a face's corners.
    #[inline]
    pub fn numbers(&self, face: &Face) -> [u32; 4] {
        face.corners.map(|i| self.grid.number_of(i))
    }

    pub fn write_vertices<W: Write>(&self, w: &mut W) -> io::Result<()> {
        self.grid.write_vertices(self.coord, w)
    }
}
