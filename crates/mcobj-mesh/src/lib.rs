//! Per-chunk geometry: greedy face extraction, vertex numbering and particle records.
#![forbid(unsafe_code)]

pub mod config;
pub mod extract;
pub mod face;
pub mod particles;
pub mod vertex_grid;

pub use config::{MergePolicy, MeshingConfig};
pub use extract::{ChunkMesh, MeshExtractor};
pub use face::{Face, Wall};
pub use particles::{PARTICLE_BYTES, collect_particles};
pub use vertex_grid::{VertexGrid, Y_ORIGIN, write_coord};
