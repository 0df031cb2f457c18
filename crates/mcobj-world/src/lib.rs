//! World access: chunk coordinates, decoded chunks, masks, pools and save-format stores.
#![forbid(unsafe_code)]

pub mod alpha;
pub mod chunk;
pub mod coord;
pub mod error;
pub mod level;
pub mod mask;
pub mod memory;
mod nbt;
pub mod pool;
pub mod region;

use std::fs;
use std::path::Path;

pub use alpha::AlphaWorld;
pub use chunk::{CHUNK_SIZE, Chunk};
pub use coord::ChunkCoord;
pub use error::WorldError;
pub use level::read_spawn;
pub use mask::{BoundingBox, ChunkMask};
pub use memory::MemoryWorld;
pub use pool::ChunkPool;
pub use region::RegionWorld;

/// Source of decoded chunks.
pub trait WorldStore {
    fn load_chunk(&self, coord: ChunkCoord) -> Result<Chunk, WorldError>;

    /// Every available chunk coordinate that `mask` does not exclude.
    fn chunk_pool(&self, mask: &ChunkMask) -> Result<ChunkPool, WorldError>;
}

impl<W: WorldStore + ?Sized> WorldStore for Box<W> {
    fn load_chunk(&self, coord: ChunkCoord) -> Result<Chunk, WorldError> {
        (**self).load_chunk(coord)
    }

    fn chunk_pool(&self, mask: &ChunkMask) -> Result<ChunkPool, WorldError> {
        (**self).chunk_pool(mask)
    }
}

/// Opens a save directory, picking the region layout when `region/` exists.
pub fn open_world(dir: impl AsRef<Path>) -> Result<Box<dyn WorldStore>, WorldError> {
    let dir = dir.as_ref();
    let meta = fs::metadata(dir)?;
    if !meta.is_dir() {
        return Err(WorldError::NotADirectory(dir.to_path_buf()));
    }
    let region = dir.join("region");
    if region.is_dir() {
        log::debug!("{}: region layout", dir.display());
        Ok(Box::new(RegionWorld::open(region)?))
    } else {
        log::debug!("{}: alpha layout", dir.display());
        Ok(Box::new(AlphaWorld::new(dir)))
    }
}
