use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::coord::ChunkCoord;

#[derive(Error, Debug)]
pub enum WorldError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("NBT error: {0}")]
    Nbt(#[from] fastnbt::error::Error),
    #[error("chunk {0} not found")]
    NotFound(ChunkCoord),
    #[error("corrupt chunk {coord}: {reason}")]
    Corrupt { coord: ChunkCoord, reason: String },
    #[error("chunk {0} uses an unsupported format")]
    Unsupported(ChunkCoord),
    #[error("{} is not a directory", .0.display())]
    NotADirectory(PathBuf),
}

impl WorldError {
    /// Missing chunks are routine at world edges and are not worth a warning.
    pub fn is_not_found(&self) -> bool {
        match self {
            WorldError::NotFound(_) => true,
            WorldError::Io(e) => e.kind() == io::ErrorKind::NotFound,
            _ => false,
        }
    }
}
