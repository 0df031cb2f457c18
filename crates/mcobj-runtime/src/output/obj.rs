use std::io::{self, BufWriter, Seek, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use mcobj_blocks::{BlockId, BoundaryLocator, MaterialCatalog, MaterialNaming};
use mcobj_chunk::EnclosedChunk;
use mcobj_mesh::{MeshExtractor, MeshingConfig};
use mcobj_world::ChunkCoord;
use tempfile::NamedTempFile;

use super::{mtl_path, persist, temp_beside};
use crate::buffer_pool::{ChunkBuffer, DeferredFace};
use crate::pipeline::{ChunkEncoder, ChunkSink};

const WRITE_BUFFER_BYTES: usize = 1024 * 1024;

/// How `f` statements refer to vertices.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum FaceIndexing {
    /// Negative indices relative to the end of the chunk's own vertex block.
    #[default]
    Relative,
    /// 1-based indices into the whole file; faces follow all vertices.
    Absolute,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ObjOptions {
    pub indexing: FaceIndexing,
    pub naming: MaterialNaming,
    /// Emit `usemtl` statements.
    pub colors: bool,
}

impl Default for ObjOptions {
    fn default() -> Self {
        Self {
            indexing: FaceIndexing::Relative,
            naming: MaterialNaming::Names,
            colors: true,
        }
    }
}

fn write_usemtl(w: &mut impl Write, materials: &MaterialCatalog, naming: MaterialNaming, block: BlockId) -> io::Result<()> {
    writeln!(w, "usemtl {}", materials.name_for(block, naming))
}

/// Meshes one chunk into `v`/`usemtl`/`f` text.
pub struct ObjEncoder {
    locator: Arc<BoundaryLocator>,
    meshing: MeshingConfig,
    materials: Arc<MaterialCatalog>,
    options: ObjOptions,
}

impl ObjEncoder {
    pub fn new(
        locator: Arc<BoundaryLocator>,
        meshing: MeshingConfig,
        materials: Arc<MaterialCatalog>,
        options: ObjOptions,
    ) -> Self {
        Self {
            locator,
            meshing,
            materials,
            options,
        }
    }
}

impl ChunkEncoder for ObjEncoder {
    type Scratch = MeshExtractor;

    fn scratch(&self) -> MeshExtractor {
        MeshExtractor::new(Arc::clone(&self.locator), self.meshing)
    }

    fn encode(&self, extractor: &mut MeshExtractor, chunk: &EnclosedChunk, out: &mut ChunkBuffer) -> io::Result<u64> {
        let mesh = extractor.extract(chunk);
        mesh.write_vertices(&mut out.bytes)?;
        out.vertices = mesh.vertex_count();

        let vc = i64::from(mesh.vertex_count());
        for (block, faces) in mesh.groups() {
            match self.options.indexing {
                FaceIndexing::Relative => {
                    if self.options.colors {
                        write_usemtl(&mut out.bytes, &self.materials, self.options.naming, block)?;
                    }
                    for face in faces {
                        let [a, b, c, d] = mesh.numbers(face).map(|n| i64::from(n) - vc - 1);
                        writeln!(out.bytes, "f {a} {b} {c} {d}")?;
                    }
                }
                FaceIndexing::Absolute => {
                    out.deferred.extend(faces.iter().map(|face| DeferredFace {
                        block,
                        numbers: mesh.numbers(face),
                    }));
                }
            }
        }
        Ok(mesh.face_count() as u64)
    }
}

/// Writes chunk blocks into a temp file that replaces the target on [`ChunkSink::finish`].
///
/// Dropping the sink without finishing removes every temp file it created.
pub struct ObjSink {
    out: BufWriter<NamedTempFile>,
    /// Face statements held back until all vertices are written.
    faces: Option<BufWriter<NamedTempFile>>,
    mtl: NamedTempFile,
    target: PathBuf,
    materials: Arc<MaterialCatalog>,
    options: ObjOptions,
    vertex_base: u64,
    written: u64,
}

impl ObjSink {
    /// Opens the output and writes the `mtllib` header and the material library.
    pub fn create(target: impl AsRef<Path>, materials: Arc<MaterialCatalog>, options: ObjOptions) -> io::Result<Self> {
        let target = target.as_ref().to_path_buf();
        let mtl_target = mtl_path(&target);

        let mut mtl = BufWriter::new(temp_beside(&mtl_target)?);
        materials.write_mtl(&mut mtl, options.naming)?;
        let mtl = mtl.into_inner().map_err(|e| e.into_error())?;

        let mut out = BufWriter::with_capacity(WRITE_BUFFER_BYTES, temp_beside(&target)?);
        let mtl_name = mtl_target
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        writeln!(out, "mtllib {mtl_name}")?;

        let faces = match options.indexing {
            FaceIndexing::Relative => None,
            FaceIndexing::Absolute => Some(BufWriter::with_capacity(WRITE_BUFFER_BYTES, temp_beside(&target)?)),
        };

        Ok(Self {
            out,
            faces,
            mtl,
            target,
            materials,
            options,
            vertex_base: 0,
            written: 0,
        })
    }

    pub fn target(&self) -> &Path {
        &self.target
    }

    fn write_deferred(&mut self, chunk: &ChunkBuffer) -> io::Result<()> {
        let Some(w) = self.faces.as_mut() else {
            return Ok(());
        };
        let mut current: Option<BlockId> = None;
        for face in &chunk.deferred {
            if self.options.colors && current != Some(face.block) {
                write_usemtl(w, &self.materials, self.options.naming, face.block)?;
                current = Some(face.block);
            }
            let [a, b, c, d] = face.numbers.map(|n| u64::from(n) + self.vertex_base);
            writeln!(w, "f {a} {b} {c} {d}")?;
        }
        self.vertex_base += u64::from(chunk.vertices);
        Ok(())
    }
}

impl ChunkSink for ObjSink {
    const ITEMS: &'static str = "Faces";

    fn write_chunk(&mut self, _coord: ChunkCoord, chunk: &ChunkBuffer) -> io::Result<()> {
        self.out.write_all(&chunk.bytes)?;
        self.written += chunk.bytes.len() as u64;
        self.write_deferred(chunk)
    }

    fn written(&self) -> u64 {
        self.written
    }

    fn finish(mut self, _items: u64) -> io::Result<()> {
        if let Some(faces) = self.faces.take() {
            let mut faces = faces.into_inner().map_err(|e| e.into_error())?;
            faces.rewind()?;
            io::copy(&mut faces, &mut self.out)?;
        }
        let out = self.out.into_inner().map_err(|e| e.into_error())?;
        persist(self.mtl, &mtl_path(&self.target))?;
        persist(out, &self.target)
    }
}
