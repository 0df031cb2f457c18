use std::any::Any;
use std::io;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread;

use crossbeam_channel::{Receiver, Sender, bounded};
use mcobj_chunk::{EnclosedChunk, SideCacheStats};
use mcobj_world::{ChunkCoord, ChunkPool, WorldStore};
use rayon::ThreadPoolBuilder;

use crate::RuntimeError;
use crate::buffer_pool::{BufferPool, BufferPoolStats, ChunkBuffer};
use crate::scheduler::{ChunkJob, Traversal, TraversalConfig};

/// Worker-side half of an output format.
pub trait ChunkEncoder: Send + Sync + 'static {
    /// Per-worker state reused across chunks.
    type Scratch: Send + 'static;

    fn scratch(&self) -> Self::Scratch;

    /// Serializes one chunk into `out`; returns the number of items emitted.
    fn encode(&self, scratch: &mut Self::Scratch, chunk: &EnclosedChunk, out: &mut ChunkBuffer) -> io::Result<u64>;
}

/// Writer-side half of an output format. Owned by the single writer thread.
///
/// Dropping a sink without calling [`ChunkSink::finish`] must discard any
/// partial output.
pub trait ChunkSink: Send + Sized + 'static {
    /// Label for progress lines.
    const ITEMS: &'static str;

    fn write_chunk(&mut self, coord: ChunkCoord, chunk: &ChunkBuffer) -> io::Result<()>;

    /// Output bytes so far.
    fn written(&self) -> u64;

    fn finish(self, items: u64) -> io::Result<()>;
}

/// Posted by a worker once a chunk is fully serialized.
struct Completion {
    coord: ChunkCoord,
    items: u64,
    buffer: ChunkBuffer,
    last: bool,
    outcome: Result<(), String>,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub dispatched: u64,
    pub written: u64,
    pub items: u64,
    pub bytes: u64,
    pub decode_failures: u64,
    pub sides: SideCacheStats,
    pub buffers: BufferPoolStats,
}

#[derive(Copy, Clone, Debug, Default)]
struct WriterSummary {
    chunks: u64,
    items: u64,
    bytes: u64,
}

/// Worker pool plus one ordered writer.
#[derive(Copy, Clone, Debug)]
pub struct Pipeline {
    workers: usize,
}

impl Pipeline {
    pub fn new(workers: usize) -> Self {
        Self {
            workers: workers.max(1),
        }
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Walks `pool` and writes every enclosed chunk through `encoder` into `sink`.
    ///
    /// The sink is finished only when every dispatched chunk was written;
    /// on any failure it is dropped, which discards its temp output.
    pub fn run<W, E, S>(
        &self,
        world: &W,
        mut pool: ChunkPool,
        traversal: TraversalConfig,
        encoder: E,
        sink: S,
    ) -> Result<RunSummary, RuntimeError>
    where
        W: WorldStore + ?Sized,
        E: ChunkEncoder,
        S: ChunkSink,
    {
        let workers = self.workers;
        let total = pool.remaining();
        let (job_tx, job_rx) = bounded::<ChunkJob>(workers * 2);
        let (done_tx, done_rx) = bounded::<Completion>(workers * 2);
        let (last_tx, last_rx) = bounded::<()>(1);
        let buffers = Arc::new(BufferPool::for_workers(workers));
        let encoder = Arc::new(encoder);
        let items = Arc::new(AtomicU64::new(0));

        let threads = ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("mcobj-worker-{i}"))
            .build()?;
        for _ in 0..workers {
            let rx = job_rx.clone();
            let tx = done_tx.clone();
            let encoder = Arc::clone(&encoder);
            let buffers = Arc::clone(&buffers);
            let items = Arc::clone(&items);
            threads.spawn(move || {
                let mut scratch = encoder.scratch();
                while let Ok(job) = rx.recv() {
                    let done = encode_job(&*encoder, &mut scratch, job, &buffers);
                    items.fetch_add(done.items, Ordering::Relaxed);
                    if tx.send(done).is_err() {
                        break;
                    }
                }
            });
        }
        drop(job_rx);
        drop(done_tx);

        let writer = {
            let buffers = Arc::clone(&buffers);
            thread::Builder::new()
                .name("mcobj-writer".into())
                .spawn(move || write_completions(sink, done_rx, last_tx, &buffers, total))?
        };

        let mut walker = Traversal::new(world, traversal);
        let walk = walker.walk(&mut pool, &items, |job| {
            job_tx.send(job).map_err(|_| RuntimeError::WorkersGone)
        });
        if matches!(&walk, Ok(stats) if stats.dispatched > 0) {
            // Returns early if the writer exits without seeing the flag.
            let _ = last_rx.recv();
        }
        drop(job_tx);

        let written = writer.join().map_err(|_| RuntimeError::WriterPanicked)?;
        let walk = walk?;
        let written = written?;

        Ok(RunSummary {
            dispatched: walk.dispatched,
            written: written.chunks,
            items: written.items,
            bytes: written.bytes,
            decode_failures: walk.failed,
            sides: walk.sides,
            buffers: buffers.stats(),
        })
    }
}

fn encode_job<E: ChunkEncoder>(encoder: &E, scratch: &mut E::Scratch, job: ChunkJob, buffers: &BufferPool) -> Completion {
    let coord = job.enclosed.coord();
    let mut buffer = buffers.get();
    let result = panic::catch_unwind(AssertUnwindSafe(|| encoder.encode(scratch, &job.enclosed, &mut buffer)));
    let (items, outcome) = match result {
        Ok(Ok(n)) => (n, Ok(())),
        Ok(Err(e)) => (0, Err(format!("encode failed: {e}"))),
        Err(payload) => (0, Err(format!("worker panicked: {}", panic_message(&*payload)))),
    };
    Completion {
        coord,
        items,
        buffer,
        last: job.last,
        outcome,
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        *s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "unknown panic"
    }
}

/// Drains completions in posting order until every worker has hung up.
///
/// Keeps draining after a failure so no worker blocks on a full queue; the
/// sink is then dropped instead of finished.
fn write_completions<S: ChunkSink>(
    mut sink: S,
    rx: Receiver<Completion>,
    last_tx: Sender<()>,
    buffers: &BufferPool,
    total: usize,
) -> Result<WriterSummary, RuntimeError> {
    let mut summary = WriterSummary::default();
    let mut failure: Option<RuntimeError> = None;

    for done in rx.iter() {
        match done.outcome {
            Ok(()) if failure.is_none() => match sink.write_chunk(done.coord, &done.buffer) {
                Ok(()) => {
                    summary.chunks += 1;
                    summary.items += done.items;
                    log::info!(
                        "{}/{} ({},{}) {}: {} Size: {:.1}MB",
                        summary.chunks,
                        total,
                        done.coord.x,
                        done.coord.z,
                        S::ITEMS,
                        done.items,
                        sink.written() as f64 / 1024.0 / 1024.0
                    );
                }
                Err(e) => {
                    log::error!("write failed at chunk {}: {e}", done.coord);
                    failure = Some(e.into());
                }
            },
            Ok(()) => {}
            Err(message) => {
                log::error!("chunk {}: {message}", done.coord);
                if failure.is_none() {
                    failure = Some(RuntimeError::Worker {
                        coord: done.coord,
                        message,
                    });
                }
            }
        }
        buffers.recycle(done.buffer);
        if done.last {
            let _ = last_tx.try_send(());
        }
    }

    if let Some(e) = failure {
        return Err(e);
    }
    summary.bytes = sink.written();
    sink.finish(summary.items)?;
    Ok(summary)
}
