//! Block ids, block type classification, face-culling and materials.
#![forbid(unsafe_code)]

pub mod boundary;
pub mod builtin;
pub mod config;
pub mod material;
pub mod registry;
pub mod types;

pub use boundary::BoundaryLocator;
pub use config::ConfigError;
pub use material::{Material, MaterialCatalog, MaterialNaming};
pub use registry::BlockRegistry;
pub use types::{BlockId, BlockType};
