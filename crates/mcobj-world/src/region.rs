use std::fs::{self, File};
use std::io::{self, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use crate::chunk::Chunk;
use crate::coord::ChunkCoord;
use crate::error::WorldError;
use crate::mask::ChunkMask;
use crate::nbt::{Compression, decode_chunk, inflate};
use crate::pool::ChunkPool;
use crate::WorldStore;

const SECTOR_BYTES: u64 = 4096;
const REGION_CHUNKS: usize = 1024;

/// Region-file world: 32 x 32 chunks per `r.<rx>.<rz>.<ext>` file.
#[derive(Clone, Debug)]
pub struct RegionWorld {
    dir: PathBuf,
    ext: &'static str,
}

impl RegionWorld {
    /// Uses `.mca` files when any exist in `dir`, otherwise `.mcr`.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, WorldError> {
        let dir = dir.into();
        let mut ext = "mcr";
        for entry in fs::read_dir(&dir)? {
            let entry = entry?;
            if parse_region_name(&entry.file_name().to_string_lossy(), "mca").is_some() {
                ext = "mca";
                break;
            }
        }
        Ok(Self { dir, ext })
    }

    pub fn with_extension(dir: impl Into<PathBuf>, ext: &'static str) -> Self {
        Self {
            dir: dir.into(),
            ext,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn region_path(&self, rx: i32, rz: i32) -> PathBuf {
        self.dir.join(format!("r.{}.{}.{}", rx, rz, self.ext))
    }
}

/// Index of a chunk inside its region's location table.
#[inline]
pub fn location_index(coord: ChunkCoord) -> usize {
    ((coord.x & 31) + (coord.z & 31) * 32) as usize
}

fn parse_region_name(name: &str, ext: &str) -> Option<(i32, i32)> {
    let rest = name.strip_prefix("r.")?.strip_suffix(ext)?.strip_suffix('.')?;
    let (rx, rz) = rest.split_once('.')?;
    Some((rx.parse().ok()?, rz.parse().ok()?))
}

fn read_locations(file: &mut File) -> io::Result<Vec<u32>> {
    let mut header = vec![0u8; REGION_CHUNKS * 4];
    file.read_exact(&mut header)?;
    Ok(header
        .chunks_exact(4)
        .map(|b| u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
        .collect())
}

impl WorldStore for RegionWorld {
    fn load_chunk(&self, coord: ChunkCoord) -> Result<Chunk, WorldError> {
        let path = self.region_path(coord.x >> 5, coord.z >> 5);
        let mut file = match File::open(&path) {
            Ok(f) => f,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(WorldError::NotFound(coord));
            }
            Err(e) => return Err(e.into()),
        };
        let loc = read_locations(&mut file)?[location_index(coord)];
        if loc == 0 {
            return Err(WorldError::NotFound(coord));
        }
        let offset = u64::from(loc >> 8) * SECTOR_BYTES;
        let sectors = u64::from(loc & 0xff);
        file.seek(SeekFrom::Start(offset))?;

        let mut head = [0u8; 5];
        file.read_exact(&mut head)?;
        let length = u32::from_be_bytes([head[0], head[1], head[2], head[3]]) as u64;
        if length == 0 || length + 4 > sectors * SECTOR_BYTES {
            return Err(WorldError::Corrupt {
                coord,
                reason: format!("length {length} exceeds {sectors} sectors"),
            });
        }
        let compression = match head[4] {
            1 => Compression::Gzip,
            2 => Compression::Zlib,
            other => {
                return Err(WorldError::Corrupt {
                    coord,
                    reason: format!("compression type {other}"),
                });
            }
        };
        let mut payload = vec![0u8; (length - 1) as usize];
        file.read_exact(&mut payload)?;
        let nbt = inflate(&payload, compression, coord)?;
        decode_chunk(&nbt, coord)
    }

    fn chunk_pool(&self, mask: &ChunkMask) -> Result<ChunkPool, WorldError> {
        let mut pool = ChunkPool::new();
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            let name = entry.file_name();
            let Some((rx, rz)) = parse_region_name(&name.to_string_lossy(), self.ext) else {
                continue;
            };
            let mut file = File::open(entry.path())?;
            let locations = match read_locations(&mut file) {
                Ok(l) => l,
                Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                    log::warn!("{}: truncated region header", entry.path().display());
                    continue;
                }
                Err(e) => return Err(e.into()),
            };
            for (i, &loc) in locations.iter().enumerate() {
                if loc == 0 {
                    continue;
                }
                let coord = ChunkCoord::new(rx * 32 + (i % 32) as i32, rz * 32 + (i / 32) as i32);
                if mask.contains(coord) {
                    pool.insert(coord);
                }
            }
        }
        Ok(pool)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_names() {
        assert_eq!(parse_region_name("r.0.-1.mcr", "mcr"), Some((0, -1)));
        assert_eq!(parse_region_name("r.-12.3.mca", "mca"), Some((-12, 3)));
        assert_eq!(parse_region_name("r.0.-1.mca", "mcr"), None);
        assert_eq!(parse_region_name("level.dat", "mcr"), None);
        assert_eq!(parse_region_name("r.a.b.mcr", "mcr"), None);
    }

    #[test]
    fn location_index_wraps_negative_coords() {
        assert_eq!(location_index(ChunkCoord::new(0, 0)), 0);
        assert_eq!(location_index(ChunkCoord::new(31, 1)), 63);
        assert_eq!(location_index(ChunkCoord::new(-1, -1)), 1023);
        assert_eq!(location_index(ChunkCoord::new(-32, 33)), 32);
    }
}
