use std::sync::atomic::{AtomicU64, Ordering};

use crossbeam_channel::{Receiver, Sender, bounded};
use mcobj_blocks::BlockId;

/// First allocation for a fresh buffer's byte storage.
pub const INITIAL_BUFFER_BYTES: usize = 128 * 1024;

/// Face whose vertex numbers are resolved against the whole output, not the chunk.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DeferredFace {
    pub block: BlockId,
    /// 1-based chunk-local vertex numbers.
    pub numbers: [u32; 4],
}

/// Serialized output of one chunk.
#[derive(Debug, Default)]
pub struct ChunkBuffer {
    pub bytes: Vec<u8>,
    /// Only filled when faces are written with absolute indices.
    pub deferred: Vec<DeferredFace>,
    /// Vertices defined by this chunk.
    pub vertices: u32,
}

impl ChunkBuffer {
    pub fn with_capacity(bytes: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(bytes),
            deferred: Vec::new(),
            vertices: 0,
        }
    }

    pub fn clear(&mut self) {
        self.bytes.clear();
        self.deferred.clear();
        self.vertices = 0;
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct BufferPoolStats {
    pub allocated: u64,
    pub reused: u64,
    /// Buffers released while the free-list was full.
    pub dropped: u64,
}

/// Bounded free-list of [`ChunkBuffer`]s shared by workers and the writer.
///
/// Never blocks: `get` allocates when the list is empty and `recycle` drops
/// the buffer when it is full.
pub struct BufferPool {
    free_tx: Sender<ChunkBuffer>,
    free_rx: Receiver<ChunkBuffer>,
    allocated: AtomicU64,
    reused: AtomicU64,
    dropped: AtomicU64,
}

impl BufferPool {
    pub fn new(capacity: usize) -> Self {
        let (free_tx, free_rx) = bounded(capacity.max(1));
        Self {
            free_tx,
            free_rx,
            allocated: AtomicU64::new(0),
            reused: AtomicU64::new(0),
            dropped: AtomicU64::new(0),
        }
    }

    /// Free-list sized for `workers` threads.
    pub fn for_workers(workers: usize) -> Self {
        Self::new(workers.max(1) * 2)
    }

    pub fn get(&self) -> ChunkBuffer {
        match self.free_rx.try_recv() {
            Ok(buf) => {
                self.reused.fetch_add(1, Ordering::Relaxed);
                buf
            }
            Err(_) => {
                self.allocated.fetch_add(1, Ordering::Relaxed);
                ChunkBuffer::with_capacity(INITIAL_BUFFER_BYTES)
            }
        }
    }

    pub fn recycle(&self, mut buf: ChunkBuffer) {
        buf.clear();
        if self.free_tx.try_send(buf).is_err() {
            self.dropped.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Buffers currently waiting on the free-list.
    pub fn idle(&self) -> usize {
        self.free_rx.len()
    }

    pub fn stats(&self) -> BufferPoolStats {
        BufferPoolStats {
            allocated: self.allocated.load(Ordering::Relaxed),
            reused: self.reused.load(Ordering::Relaxed),
            dropped: self.dropped.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recycled_buffers_come_back_cleared() {
        let pool = BufferPool::new(2);
        let mut buf = pool.get();
        buf.bytes.extend_from_slice(b"v 1 2 3\n");
        buf.vertices = 1;
        pool.recycle(buf);
        assert_eq!(pool.idle(), 1);

        let buf = pool.get();
        assert!(buf.bytes.is_empty());
        assert_eq!(buf.vertices, 0);
        assert!(buf.bytes.capacity() >= INITIAL_BUFFER_BYTES);
        assert_eq!(
            pool.stats(),
            BufferPoolStats {
                allocated: 1,
                reused: 1,
                dropped: 0
            }
        );
    }

    #[test]
    fn overflow_drops_instead_of_blocking() {
        let pool = BufferPool::new(1);
        let a = pool.get();
        let b = pool.get();
        pool.recycle(a);
        pool.recycle(b);
        assert_eq!(pool.idle(), 1);
        assert_eq!(pool.stats().dropped, 1);
    }

    #[test]
    fn sized_for_workers() {
        let pool = BufferPool::for_workers(0);
        for _ in 0..3 {
            pool.recycle(ChunkBuffer::default());
        }
        assert_eq!(pool.idle(), 2);
    }
}
