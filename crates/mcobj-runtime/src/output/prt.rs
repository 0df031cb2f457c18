use std::io::{self, BufWriter, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use flate2::Compression;
use flate2::write::ZlibEncoder;
use mcobj_blocks::BoundaryLocator;
use mcobj_chunk::EnclosedChunk;
use mcobj_mesh::collect_particles;
use mcobj_world::ChunkCoord;
use tempfile::NamedTempFile;

use super::{persist, temp_beside};
use crate::buffer_pool::ChunkBuffer;
use crate::pipeline::{ChunkEncoder, ChunkSink};

const MAGIC: [u8; 8] = [192, b'P', b'R', b'T', b'\r', b'\n', 26, b'\n'];
const SIGNATURE: &str = "Extensible Particle Format";
const HEADER_LENGTH: u32 = 56;
const COUNT_OFFSET: u64 = 0x30;
const CHANNEL_DEFINITION_BYTES: i32 = 44;

const DATA_TYPE_INT32: i32 = 1;
const DATA_TYPE_FLOAT32: i32 = 4;

/// Bytes before the compressed particle stream: fixed header, reserved word and channel table.
pub const PRT_HEADER_BYTES: usize = 56 + 4 + 8 + 2 * 44;

struct Channel {
    name: &'static str,
    data_type: i32,
    arity: i32,
    offset: i32,
}

const CHANNELS: [Channel; 2] = [
    Channel {
        name: "Position",
        data_type: DATA_TYPE_FLOAT32,
        arity: 3,
        offset: 0,
    },
    Channel {
        name: "BlockID",
        data_type: DATA_TYPE_INT32,
        arity: 1,
        offset: 12,
    },
];

fn name_field(name: &str) -> [u8; 32] {
    let mut field = [0u8; 32];
    let n = name.len().min(31);
    field[..n].copy_from_slice(&name.as_bytes()[..n]);
    field
}

/// Writes the uncompressed header with the given particle count (`-1` when unknown).
pub fn write_prt_header<W: Write>(w: &mut W, particle_count: i64) -> io::Result<()> {
    w.write_all(&MAGIC)?;
    w.write_all(&HEADER_LENGTH.to_le_bytes())?;
    w.write_all(&name_field(SIGNATURE))?;
    w.write_all(&1u32.to_le_bytes())?;
    w.write_all(&particle_count.to_le_bytes())?;
    // Reserved.
    w.write_all(&4i32.to_le_bytes())?;
    w.write_all(&(CHANNELS.len() as i32).to_le_bytes())?;
    w.write_all(&CHANNEL_DEFINITION_BYTES.to_le_bytes())?;
    for ch in &CHANNELS {
        w.write_all(&name_field(ch.name))?;
        w.write_all(&ch.data_type.to_le_bytes())?;
        w.write_all(&ch.arity.to_le_bytes())?;
        w.write_all(&ch.offset.to_le_bytes())?;
    }
    Ok(())
}

/// Emits one particle per visible block.
pub struct PrtEncoder {
    locator: Arc<BoundaryLocator>,
    y_min: usize,
}

impl PrtEncoder {
    pub fn new(locator: Arc<BoundaryLocator>, y_min: usize) -> Self {
        Self { locator, y_min }
    }
}

impl ChunkEncoder for PrtEncoder {
    type Scratch = ();

    fn scratch(&self) -> Self::Scratch {}

    fn encode(&self, _scratch: &mut (), chunk: &EnclosedChunk, out: &mut ChunkBuffer) -> io::Result<u64> {
        Ok(collect_particles(chunk, &self.locator, self.y_min, &mut out.bytes))
    }
}

/// Zlib-framed particle stream; the count is patched into the header on finish.
pub struct PrtSink {
    body: ZlibEncoder<BufWriter<NamedTempFile>>,
    target: PathBuf,
    written: u64,
}

impl PrtSink {
    pub fn create(target: impl AsRef<Path>) -> io::Result<Self> {
        let target = target.as_ref().to_path_buf();
        let mut w = BufWriter::new(temp_beside(&target)?);
        write_prt_header(&mut w, -1)?;
        Ok(Self {
            body: ZlibEncoder::new(w, Compression::none()),
            target,
            written: PRT_HEADER_BYTES as u64,
        })
    }

    pub fn target(&self) -> &Path {
        &self.target
    }
}

impl ChunkSink for PrtSink {
    const ITEMS: &'static str = "Particles";

    fn write_chunk(&mut self, _coord: ChunkCoord, chunk: &ChunkBuffer) -> io::Result<()> {
        self.body.write_all(&chunk.bytes)?;
        self.written += chunk.bytes.len() as u64;
        Ok(())
    }

    fn written(&self) -> u64 {
        self.written
    }

    fn finish(self, items: u64) -> io::Result<()> {
        let w = self.body.finish()?;
        let mut file = w.into_inner().map_err(|e| e.into_error())?;
        file.seek(SeekFrom::Start(COUNT_OFFSET))?;
        file.write_all(&(items as i64).to_le_bytes())?;
        persist(file, &self.target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_layout() {
        let mut buf = Vec::new();
        write_prt_header(&mut buf, -1).unwrap();
        assert_eq!(buf.len(), PRT_HEADER_BYTES);
        assert_eq!(&buf[..8], &MAGIC);
        assert_eq!(u32::from_le_bytes(buf[8..12].try_into().unwrap()), 56);
        assert!(buf[12..44].starts_with(b"Extensible Particle Format\0"));
        assert_eq!(u32::from_le_bytes(buf[44..48].try_into().unwrap()), 1);
        assert_eq!(i64::from_le_bytes(buf[48..56].try_into().unwrap()), -1);
        assert_eq!(i32::from_le_bytes(buf[60..64].try_into().unwrap()), 2);
        assert_eq!(i32::from_le_bytes(buf[64..68].try_into().unwrap()), 44);
        assert!(buf[68..100].starts_with(b"Position\0"));
        assert_eq!(i32::from_le_bytes(buf[100..104].try_into().unwrap()), DATA_TYPE_FLOAT32);
        assert!(buf[112..144].starts_with(b"BlockID\0"));
        assert_eq!(i32::from_le_bytes(buf[152..156].try_into().unwrap()), 12);
    }
}
