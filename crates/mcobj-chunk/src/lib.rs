//! Cross-chunk stitching: boundary slices, the side cache and enclosed chunks.
#![forbid(unsafe_code)]

mod enclosed;
mod side;
mod side_cache;

pub use enclosed::EnclosedChunk;
pub use side::{ChunkSide, DefaultSide, Edge, EnclosePolicy, SideSlice};
pub use side_cache::{SideCache, SideCacheStats};
