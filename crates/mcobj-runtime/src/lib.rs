//! Conversion runtime: spiral scheduling, the worker/writer pipeline and output formats.
#![forbid(unsafe_code)]

pub mod buffer_pool;
pub mod output;
pub mod pipeline;
pub mod scheduler;

use std::io;

use mcobj_world::{ChunkCoord, WorldError};
use thiserror::Error;

pub use buffer_pool::{BufferPool, BufferPoolStats, ChunkBuffer, DeferredFace};
pub use output::{FaceIndexing, ObjEncoder, ObjOptions, ObjSink, PrtEncoder, PrtSink};
pub use pipeline::{ChunkEncoder, ChunkSink, Pipeline, RunSummary};
pub use scheduler::{Budget, ChunkJob, Traversal, TraversalConfig, WalkStats, unzigzag};

#[derive(Error, Debug)]
pub enum RuntimeError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("world error: {0}")]
    World(#[from] WorldError),
    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
    #[error("chunk {coord}: {message}")]
    Worker { coord: ChunkCoord, message: String },
    #[error("all workers stopped before the walk finished")]
    WorkersGone,
    #[error("writer thread panicked")]
    WriterPanicked,
}
