use std::convert::Infallible;
use std::sync::Mutex;
use std::sync::atomic::AtomicU64;

use hashbrown::HashMap;
use mcobj_blocks::BlockId;
use mcobj_runtime::{Budget, ChunkJob, Traversal, TraversalConfig, WalkStats};
use mcobj_world::{Chunk, ChunkCoord, ChunkMask, ChunkPool, MemoryWorld, WorldError, WorldStore};

fn ground(coord: ChunkCoord, height: usize) -> Chunk {
    let mut c = Chunk::new(coord, height);
    c.fill((0, 16), (0, 1), (0, 16), BlockId::STONE);
    c
}

/// `n x n` chunks centred on the origin.
fn square_world(n: i32, height: usize) -> MemoryWorld {
    let lo = -(n / 2);
    (lo..lo + n)
        .flat_map(|x| (lo..lo + n).map(move |z| ground(ChunkCoord::new(x, z), height)))
        .collect()
}

/// Counts loads and fails the listed coordinates.
struct Flaky {
    inner: MemoryWorld,
    broken: Vec<ChunkCoord>,
    loads: Mutex<HashMap<ChunkCoord, usize>>,
}

impl Flaky {
    fn new(inner: MemoryWorld, broken: Vec<ChunkCoord>) -> Self {
        Self {
            inner,
            broken,
            loads: Mutex::new(HashMap::new()),
        }
    }

    fn loads_of(&self, coord: ChunkCoord) -> usize {
        self.loads.lock().unwrap().get(&coord).copied().unwrap_or(0)
    }
}

impl WorldStore for Flaky {
    fn load_chunk(&self, coord: ChunkCoord) -> Result<Chunk, WorldError> {
        *self.loads.lock().unwrap().entry(coord).or_default() += 1;
        if self.broken.contains(&coord) {
            return Err(WorldError::Corrupt {
                coord,
                reason: "bad sector".into(),
            });
        }
        self.inner.load_chunk(coord)
    }

    fn chunk_pool(&self, mask: &ChunkMask) -> Result<ChunkPool, WorldError> {
        self.inner.chunk_pool(mask)
    }
}

fn walk<W: WorldStore + ?Sized>(world: &W, config: TraversalConfig) -> (Vec<(ChunkCoord, bool)>, WalkStats) {
    let mut pool = world.chunk_pool(&config.mask).unwrap();
    let faces = AtomicU64::new(0);
    let mut jobs = Vec::new();
    let stats = Traversal::new(world, config)
        .walk(&mut pool, &faces, |job: ChunkJob| {
            jobs.push((job.enclosed.coord(), job.last));
            Ok::<_, Infallible>(())
        })
        .unwrap();
    (jobs, stats)
}

fn limited(max_chunks: u64) -> TraversalConfig {
    TraversalConfig {
        budget: Budget {
            max_chunks: Some(max_chunks),
            max_faces: None,
        },
        ..TraversalConfig::default()
    }
}

fn coords(jobs: &[(ChunkCoord, bool)]) -> Vec<(i32, i32)> {
    jobs.iter().map(|(c, _)| (c.x, c.z)).collect()
}

#[test]
fn chunk_budget_follows_spiral_order() {
    let world = square_world(5, 4);
    let (jobs, stats) = walk(&world, limited(5));
    assert_eq!(coords(&jobs), vec![(0, 0), (0, -1), (-1, 0), (-1, -1), (0, 1)]);
    assert_eq!(stats.dispatched, 5);
    let flagged: Vec<bool> = jobs.iter().map(|(_, last)| *last).collect();
    assert_eq!(flagged, vec![false, false, false, false, true]);
}

#[test]
fn budget_expiring_mid_ring_drops_the_rest_of_the_ring() {
    let world = square_world(5, 4);
    let (jobs, _) = walk(&world, limited(3));
    // Ring two holds (0,-1), (-1,0) and (-1,-1); the last one must not appear.
    assert_eq!(coords(&jobs), vec![(0, 0), (0, -1), (-1, 0)]);
    assert!(jobs[2].1);
}

#[test]
fn budget_larger_than_world_takes_everything() {
    let world = square_world(3, 4);
    let (jobs, stats) = walk(&world, limited(100));
    assert_eq!(jobs.len(), 9);
    assert_eq!(stats.dispatched, 9);
    assert_eq!(jobs.iter().filter(|(_, last)| *last).count(), 1);
    assert!(jobs.last().unwrap().1);
}

#[test]
fn exhausted_face_budget_dispatches_nothing() {
    let world = square_world(3, 4);
    let config = TraversalConfig {
        budget: Budget {
            max_chunks: None,
            max_faces: Some(10),
        },
        ..TraversalConfig::default()
    };
    let mut pool = world.chunk_pool(&config.mask).unwrap();
    let faces = AtomicU64::new(10);
    let mut jobs = 0;
    let stats = Traversal::new(&world, config)
        .walk(&mut pool, &faces, |_| {
            jobs += 1;
            Ok::<_, Infallible>(())
        })
        .unwrap();
    assert_eq!(jobs, 0);
    assert_eq!(stats.dispatched, 0);
    assert_eq!(pool.remaining(), 9);
}

#[test]
fn last_flag_lands_on_a_dispatched_job_when_the_final_decode_fails() {
    let world: MemoryWorld = [ground(ChunkCoord::new(0, 0), 4), ground(ChunkCoord::new(0, -1), 4)]
        .into_iter()
        .collect();
    let flaky = Flaky::new(world, vec![ChunkCoord::new(0, -1)]);
    let (jobs, stats) = walk(&flaky, TraversalConfig::default());
    assert_eq!(jobs, vec![(ChunkCoord::new(0, 0), true)]);
    assert!(stats.failed >= 1);
}

#[test]
fn failed_chunks_are_not_fetched_again() {
    let broken = ChunkCoord::new(1, 1);
    let flaky = Flaky::new(square_world(4, 4), vec![broken]);
    let (jobs, stats) = walk(&flaky, TraversalConfig::default());
    assert_eq!(jobs.len(), 15);
    assert!(!coords(&jobs).contains(&(1, 1)));
    assert_eq!(flaky.loads_of(broken), 1);
    // Absent neighbours outside the world count as failures too.
    assert!(stats.failed > 1);
}

#[test]
fn masked_neighbours_are_never_decoded() {
    let flaky = Flaky::new(square_world(5, 4), Vec::new());
    let config = TraversalConfig {
        mask: ChunkMask::square(ChunkCoord::new(0, 0), 1),
        ..TraversalConfig::default()
    };
    let (jobs, _) = walk(&flaky, config);
    assert_eq!(coords(&jobs), vec![(0, 0)]);
    assert_eq!(flaky.loads_of(ChunkCoord::new(1, 0)), 0);
    assert_eq!(flaky.loads_of(ChunkCoord::new(0, -1)), 0);
    assert_eq!(flaky.loads_of(ChunkCoord::new(0, 0)), 1);
}

#[test]
fn walk_centre_can_be_moved() {
    let world = square_world(6, 4);
    let config = TraversalConfig {
        center: ChunkCoord::new(2, -2),
        ..limited(2)
    };
    let (jobs, _) = walk(&world, config);
    assert_eq!(coords(&jobs), vec![(2, -2), (2, -3)]);
}

#[test]
fn side_cache_stays_on_the_frontier() {
    let n = 48;
    let world = square_world(n, 1);
    let (jobs, stats) = walk(&world, TraversalConfig::default());
    let total = (n * n) as usize;
    assert_eq!(jobs.len(), total);
    let peak = stats.sides.peak_entries;
    assert!(peak <= 10 * n as usize, "peak {peak}");
    assert!(peak < total / 4, "peak {peak} of {total}");
}

#[test]
fn neighbours_enclosed_from_cached_sides() {
    let world = square_world(3, 4);
    let mut pool = world.chunk_pool(&ChunkMask::All).unwrap();
    let faces = AtomicU64::new(0);
    let mut fixed_sides = Vec::new();
    Traversal::new(&world, TraversalConfig::default())
        .walk(&mut pool, &faces, |job| {
            let fixed = mcobj_chunk::Edge::ALL
                .iter()
                .filter(|e| job.enclosed.side(**e).is_fixed())
                .count();
            fixed_sides.push((job.enclosed.coord(), fixed));
            Ok::<_, Infallible>(())
        })
        .unwrap();
    // The centre chunk sees real data on every edge; corners border the void on two.
    assert_eq!(fixed_sides[0], (ChunkCoord::new(0, 0), 0));
    for (coord, fixed) in fixed_sides {
        let expected = usize::from(coord.x.abs() == 1) + usize::from(coord.z.abs() == 1);
        assert_eq!(fixed, expected, "{coord}");
    }
}
