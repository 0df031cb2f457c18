use std::sync::atomic::{AtomicU64, Ordering};

use hashbrown::HashSet;
use mcobj_chunk::{EnclosePolicy, EnclosedChunk, Edge, SideCache, SideCacheStats};
use mcobj_world::{Chunk, ChunkCoord, ChunkMask, ChunkPool, WorldStore};

/// Maps 0, 1, 2, 3, 4, ... to 0, -1, 1, -2, 2, ...
#[inline]
pub fn unzigzag(n: u32) -> i32 {
    ((n >> 1) as i32) ^ -((n & 1) as i32)
}

/// Cells added by ring `i` of the spiral, in scan order.
///
/// Ring `i` covers `[0, i) x [0, i)`; everything but the last row and column
/// was already visited by the smaller rings.
fn ring_cells(i: u32) -> impl Iterator<Item = (u32, u32)> {
    let edge = i.saturating_sub(1);
    (0..i).flat_map(move |x| {
        let zs = if x == edge { 0..i } else { edge..i };
        zs.map(move |z| (x, z))
    })
}

/// Limits checked before every spiral candidate.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Budget {
    pub max_chunks: Option<u64>,
    /// Counts emitted items: faces for OBJ output, particles for PRT.
    pub max_faces: Option<u64>,
}

impl Budget {
    pub const UNLIMITED: Budget = Budget {
        max_chunks: None,
        max_faces: None,
    };

    #[inline]
    pub fn allows(&self, chunks: u64, faces: u64) -> bool {
        self.max_chunks.is_none_or(|max| chunks < max) && self.max_faces.is_none_or(|max| faces < max)
    }
}

#[derive(Clone, Debug)]
pub struct TraversalConfig {
    pub center: ChunkCoord,
    pub mask: ChunkMask,
    pub budget: Budget,
    pub policy: EnclosePolicy,
}

impl Default for TraversalConfig {
    fn default() -> Self {
        Self {
            center: ChunkCoord::default(),
            mask: ChunkMask::All,
            budget: Budget::UNLIMITED,
            policy: EnclosePolicy::default(),
        }
    }
}

/// One enclosed chunk on its way to a worker.
#[derive(Debug)]
pub struct ChunkJob {
    pub enclosed: EnclosedChunk,
    /// Set on exactly one job: the last one the scheduler dispatches.
    pub last: bool,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct WalkStats {
    pub dispatched: u64,
    /// Coordinates whose decode failed, targets and neighbours alike.
    pub failed: u64,
    pub rings: u32,
    pub sides: SideCacheStats,
}

/// Single-threaded spiral walk over a chunk pool.
///
/// Owns the [`SideCache`]; every chunk is enclosed before its own sides are
/// published, and only then handed to `dispatch`.
pub struct Traversal<'w, W: WorldStore + ?Sized> {
    world: &'w W,
    config: TraversalConfig,
    sides: SideCache,
    failed: HashSet<ChunkCoord>,
    accepted: u64,
}

impl<'w, W: WorldStore + ?Sized> Traversal<'w, W> {
    pub fn new(world: &'w W, config: TraversalConfig) -> Self {
        let sides = SideCache::new(config.policy);
        Self {
            world,
            config,
            sides,
            failed: HashSet::new(),
            accepted: 0,
        }
    }

    pub fn side_cache(&self) -> &SideCache {
        &self.sides
    }

    /// Walks the spiral until the pool is empty or a budget runs out.
    ///
    /// `faces` is read before each candidate; workers add to it as they
    /// finish. One job is held back so the job flagged `last` is always one
    /// that really went out, even when the final candidates fail to decode.
    pub fn walk<E, F>(&mut self, pool: &mut ChunkPool, faces: &AtomicU64, mut dispatch: F) -> Result<WalkStats, E>
    where
        F: FnMut(ChunkJob) -> Result<(), E>,
    {
        let mut held: Option<EnclosedChunk> = None;
        let mut stats = WalkStats::default();

        'rings: for ring in 0u32.. {
            stats.rings = ring;
            if !self.more(pool, faces) {
                break;
            }
            for (x, z) in ring_cells(ring) {
                if !self.more(pool, faces) {
                    break 'rings;
                }
                let coord = self.config.center.offset(unzigzag(x), unzigzag(z));
                if !pool.pop(coord) {
                    continue;
                }
                let Some(enclosed) = self.accept(coord) else {
                    continue;
                };
                if let Some(prev) = held.replace(enclosed) {
                    dispatch(ChunkJob {
                        enclosed: prev,
                        last: false,
                    })?;
                    stats.dispatched += 1;
                }
            }
        }

        if let Some(enclosed) = held.take() {
            dispatch(ChunkJob { enclosed, last: true })?;
            stats.dispatched += 1;
        }

        stats.failed = self.failed.len() as u64;
        stats.sides = self.sides.stats();
        log::debug!(
            "walk done: {} dispatched, {} failed, {} rings, side cache peak {}",
            stats.dispatched,
            stats.failed,
            stats.rings,
            stats.sides.peak_entries
        );
        Ok(stats)
    }

    fn more(&self, pool: &ChunkPool, faces: &AtomicU64) -> bool {
        pool.remaining() > 0 && self.config.budget.allows(self.accepted, faces.load(Ordering::Relaxed))
    }

    fn accept(&mut self, coord: ChunkCoord) -> Option<EnclosedChunk> {
        for edge in Edge::ALL {
            let (dx, dz) = edge.neighbor_offset();
            self.load_side(coord.offset(dx, dz));
        }
        let chunk = self.load(coord)?;
        let enclosed = self.sides.enclose(chunk);
        self.sides.add_chunk(enclosed.chunk());
        self.accepted += 1;
        Some(enclosed)
    }

    fn load_side(&mut self, coord: ChunkCoord) {
        if self.sides.has_side(coord) || self.config.mask.is_masked(coord.x, coord.z) || self.failed.contains(&coord) {
            return;
        }
        if let Some(chunk) = self.load(coord) {
            self.sides.add_chunk(&chunk);
        }
    }

    fn load(&mut self, coord: ChunkCoord) -> Option<Chunk> {
        if self.failed.contains(&coord) {
            return None;
        }
        match self.world.load_chunk(coord) {
            Ok(chunk) => Some(chunk),
            Err(e) => {
                if e.is_not_found() {
                    log::debug!("chunk {coord} not present");
                } else {
                    log::warn!("skipping chunk {coord}: {e}");
                }
                self.failed.insert(coord);
                None
            }
        }
    }
}
