use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::chunk::Chunk;
use crate::coord::ChunkCoord;
use crate::error::WorldError;
use crate::mask::ChunkMask;
use crate::nbt::{Compression, decode_chunk, inflate};
use crate::pool::ChunkPool;
use crate::WorldStore;

/// Legacy world: one gzip file per chunk, sharded into `x mod 64` / `z mod 64` folders.
#[derive(Clone, Debug)]
pub struct AlphaWorld {
    dir: PathBuf,
}

impl AlphaWorld {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn chunk_path(&self, coord: ChunkCoord) -> PathBuf {
        self.dir
            .join(base36(i64::from(coord.x.rem_euclid(64))))
            .join(base36(i64::from(coord.z.rem_euclid(64))))
            .join(format!(
                "c.{}.{}.dat",
                base36(i64::from(coord.x)),
                base36(i64::from(coord.z))
            ))
    }
}

/// Lowercase base-36 with a leading `-` for negatives.
pub fn base36(n: i64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return "0".to_string();
    }
    let mut v = n.unsigned_abs();
    let mut out = Vec::new();
    while v > 0 {
        out.push(DIGITS[(v % 36) as usize]);
        v /= 36;
    }
    if n < 0 {
        out.push(b'-');
    }
    out.reverse();
    String::from_utf8_lossy(&out).into_owned()
}

fn parse_chunk_name(name: &str) -> Option<ChunkCoord> {
    let rest = name.strip_prefix("c.")?.strip_suffix(".dat")?;
    let (x, z) = rest.split_once('.')?;
    let x = i64::from_str_radix(x, 36).ok()?;
    let z = i64::from_str_radix(z, 36).ok()?;
    Some(ChunkCoord::new(i32::try_from(x).ok()?, i32::try_from(z).ok()?))
}

impl WorldStore for AlphaWorld {
    fn load_chunk(&self, coord: ChunkCoord) -> Result<Chunk, WorldError> {
        let bytes = match fs::read(self.chunk_path(coord)) {
            Ok(b) => b,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(WorldError::NotFound(coord));
            }
            Err(e) => return Err(e.into()),
        };
        let nbt = inflate(&bytes, Compression::Gzip, coord)?;
        decode_chunk(&nbt, coord)
    }

    fn chunk_pool(&self, mask: &ChunkMask) -> Result<ChunkPool, WorldError> {
        let mut pool = ChunkPool::new();
        for entry in WalkDir::new(&self.dir).min_depth(3).max_depth(3) {
            let entry = entry.map_err(|e| match e.into_io_error() {
                Some(io) => WorldError::Io(io),
                None => WorldError::Io(io::Error::other("filesystem loop")),
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            if let Some(coord) = parse_chunk_name(&entry.file_name().to_string_lossy()) {
                if mask.contains(coord) {
                    pool.insert(coord);
                }
            }
        }
        Ok(pool)
    }
}
