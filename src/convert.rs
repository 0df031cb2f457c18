use std::path::{Path, PathBuf};
use std::sync::Arc;

use mcobj_blocks::{BlockRegistry, BoundaryLocator};
use mcobj_chunk::EnclosePolicy;
use mcobj_mesh::MeshingConfig;
use mcobj_runtime::{
    Budget, FaceIndexing, ObjEncoder, ObjOptions, ObjSink, Pipeline, PrtEncoder, PrtSink, RunSummary, RuntimeError,
    TraversalConfig,
};
use mcobj_world::{ChunkCoord, ChunkMask, WorldStore, open_world, read_spawn};

use crate::settings::{OutputFormat, RunSettings};

/// Area of the world to convert.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Region {
    /// Falls back to the spawn chunk from `level.dat`.
    pub center: Option<ChunkCoord>,
    /// Square side in chunks; takes precedence over `width`/`depth`.
    pub square: Option<i32>,
    pub width: Option<i32>,
    pub depth: Option<i32>,
}

impl Region {
    /// Mask around `center` and the chunk limit it implies.
    pub fn mask(&self, center: ChunkCoord) -> (ChunkMask, Option<u64>) {
        if let Some(s) = self.square {
            return (ChunkMask::square(center, s), Some(area(s, s)));
        }
        let limit = match (self.width, self.depth) {
            (Some(w), Some(d)) => Some(area(w, d)),
            _ => None,
        };
        (ChunkMask::rect(center, self.width, self.depth), limit)
    }
}

fn area(w: i32, d: i32) -> u64 {
    u64::from(w.unsigned_abs()) * u64::from(d.unsigned_abs())
}

fn min_limit(a: Option<u64>, b: Option<u64>) -> Option<u64> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, b) => a.or(b),
    }
}

/// Output path for one world of a batch: `out.obj` becomes `out.<world>.obj`.
pub fn output_for_world(output: &Path, world: &Path, batch: bool) -> PathBuf {
    let Some(name) = world.file_name().filter(|_| batch) else {
        return output.to_path_buf();
    };
    let stem = output
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let mut file = format!("{stem}.{}", name.to_string_lossy());
    if let Some(ext) = output.extension() {
        file.push('.');
        file.push_str(&ext.to_string_lossy());
    }
    output.with_file_name(file)
}

fn resolve_center(dir: &Path, world: &dyn WorldStore, region: &Region) -> Result<ChunkCoord, RuntimeError> {
    if let Some(center) = region.center {
        return Ok(center);
    }
    match read_spawn(dir) {
        Ok(spawn) => Ok(spawn),
        Err(e) => {
            let center = world
                .chunk_pool(&ChunkMask::All)?
                .bounding_box()
                .map(|b| b.center())
                .unwrap_or_default();
            log::warn!("{}: no spawn point ({e}); centring on {center}", dir.display());
            Ok(center)
        }
    }
}

/// Converts the world at `dir` into `output`.
pub fn convert_world(
    dir: &Path,
    output: &Path,
    settings: &RunSettings,
    registry: &BlockRegistry,
    region: &Region,
) -> Result<RunSummary, RuntimeError> {
    let world = open_world(dir)?;
    let center = resolve_center(dir, &*world, region)?;
    let (mask, chunk_limit) = region.mask(center);
    let pool = world.chunk_pool(&mask)?;
    log::info!(
        "{}: {} chunks available, centre {center}",
        dir.display(),
        pool.remaining()
    );

    let traversal = TraversalConfig {
        center,
        mask,
        budget: Budget {
            max_chunks: min_limit(chunk_limit, settings.max_chunks),
            max_faces: settings.max_faces,
        },
        policy: EnclosePolicy {
            default_side: settings.default_side,
            hide_bottom: settings.hide_bottom,
        },
    };
    let locator = Arc::new(BoundaryLocator::new(registry, settings.hide_stone));
    let pipeline = Pipeline::new(settings.workers);

    let summary = match settings.format {
        OutputFormat::Obj => {
            let materials = Arc::new(registry.materials.clone());
            let options = ObjOptions {
                indexing: if settings.absolute_indices {
                    FaceIndexing::Absolute
                } else {
                    FaceIndexing::Relative
                },
                naming: settings.naming,
                colors: settings.colors,
            };
            let meshing = MeshingConfig {
                y_min: settings.y_min,
                merge: settings.merge,
            };
            let sink = ObjSink::create(output, Arc::clone(&materials), options)?;
            let encoder = ObjEncoder::new(locator, meshing, materials, options);
            pipeline.run(&*world, pool, traversal, encoder, sink)?
        }
        OutputFormat::Prt => {
            let sink = PrtSink::create(output)?;
            let encoder = PrtEncoder::new(locator, settings.y_min);
            pipeline.run(&*world, pool, traversal, encoder, sink)?
        }
    };

    log::info!(
        "{}: wrote {} chunks, {} items, {:.1}MB to {} ({} chunks skipped, side cache peak {})",
        dir.display(),
        summary.written,
        summary.items,
        summary.bytes as f64 / 1024.0 / 1024.0,
        output.display(),
        summary.decode_failures,
        summary.sides.peak_entries
    );
    Ok(summary)
}
