use std::io::Read;

use fastnbt::ByteArray;
use flate2::read::{GzDecoder, ZlibDecoder};
use mcobj_blocks::BlockId;
use serde::Deserialize;

use crate::chunk::{CHUNK_SIZE, Chunk};
use crate::coord::ChunkCoord;
use crate::error::WorldError;

/// Column height of chunks that store one flat `Blocks` array.
pub(crate) const LEGACY_HEIGHT: usize = 128;
/// Column height of chunks stored as 16-block sections.
pub(crate) const SECTION_HEIGHT: usize = 256;
const SECTION_BLOCKS: usize = 16 * 16 * 16;

#[derive(Deserialize)]
struct ChunkRoot {
    #[serde(rename = "Level")]
    level: Option<Level>,
}

#[derive(Deserialize)]
struct Level {
    #[serde(rename = "xPos")]
    x_pos: i32,
    #[serde(rename = "zPos")]
    z_pos: i32,
    #[serde(rename = "Blocks")]
    blocks: Option<ByteArray>,
    #[serde(rename = "Data")]
    data: Option<ByteArray>,
    #[serde(rename = "Sections")]
    sections: Option<Vec<Section>>,
}

#[derive(Deserialize)]
struct Section {
    #[serde(rename = "Y")]
    y: i8,
    #[serde(rename = "Blocks")]
    blocks: Option<ByteArray>,
    #[serde(rename = "Data")]
    data: Option<ByteArray>,
}

/// Compression used for one stored chunk payload.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Compression {
    Gzip,
    Zlib,
}

pub(crate) fn inflate(
    bytes: &[u8],
    compression: Compression,
    coord: ChunkCoord,
) -> Result<Vec<u8>, WorldError> {
    let mut out = Vec::with_capacity(bytes.len() * 4);
    let res = match compression {
        Compression::Gzip => GzDecoder::new(bytes).read_to_end(&mut out),
        Compression::Zlib => ZlibDecoder::new(bytes).read_to_end(&mut out),
    };
    res.map_err(|e| WorldError::Corrupt {
        coord,
        reason: format!("inflate: {e}"),
    })?;
    Ok(out)
}

#[inline]
fn nibble(data: &[i8], i: usize) -> u8 {
    match data.get(i / 2) {
        Some(&b) if i % 2 == 0 => b as u8 & 0x0f,
        Some(&b) => (b as u8) >> 4,
        None => 0,
    }
}

/// Decodes an uncompressed NBT chunk, checking it sits at `expected`.
pub(crate) fn decode_chunk(nbt: &[u8], expected: ChunkCoord) -> Result<Chunk, WorldError> {
    let root: ChunkRoot = fastnbt::from_bytes(nbt)?;
    let level = root.level.ok_or(WorldError::Unsupported(expected))?;
    let found = ChunkCoord::new(level.x_pos, level.z_pos);
    if found != expected {
        return Err(WorldError::Corrupt {
            coord: expected,
            reason: format!("stored position {found}"),
        });
    }

    if let Some(blocks) = level.blocks {
        let ids = blocks.into_inner();
        let data = level.data.map(ByteArray::into_inner).unwrap_or_default();
        // Same x, z, y ordering as `Chunk`.
        let out = ids
            .iter()
            .enumerate()
            .map(|(i, &b)| BlockId::new(b as u8, nibble(&data, i)))
            .collect();
        return Ok(Chunk::from_blocks(expected, LEGACY_HEIGHT, out));
    }

    let sections = level.sections.ok_or(WorldError::Unsupported(expected))?;
    let mut chunk = Chunk::new(expected, SECTION_HEIGHT);
    for section in sections {
        let Some(blocks) = section.blocks else {
            continue;
        };
        if section.y < 0 || section.y as usize >= SECTION_HEIGHT / 16 {
            continue;
        }
        let ids = blocks.into_inner();
        if ids.len() < SECTION_BLOCKS {
            return Err(WorldError::Corrupt {
                coord: expected,
                reason: format!("section {} has {} blocks", section.y, ids.len()),
            });
        }
        let data = section.data.map(ByteArray::into_inner).unwrap_or_default();
        let base_y = section.y as usize * 16;
        // Sections are y, z, x ordered.
        for (i, &b) in ids.iter().take(SECTION_BLOCKS).enumerate() {
            let x = i % CHUNK_SIZE;
            let z = (i / CHUNK_SIZE) % CHUNK_SIZE;
            let y = i / (CHUNK_SIZE * CHUNK_SIZE);
            chunk.set(x, base_y + y, z, BlockId::new(b as u8, nibble(&data, i)));
        }
    }
    Ok(chunk)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nibbles_low_then_high() {
        let data = [0x21u8 as i8, 0xf3u8 as i8];
        assert_eq!(nibble(&data, 0), 1);
        assert_eq!(nibble(&data, 1), 2);
        assert_eq!(nibble(&data, 2), 3);
        assert_eq!(nibble(&data, 3), 15);
        assert_eq!(nibble(&data, 4), 0);
    }

    #[test]
    fn garbage_inflate_is_corrupt() {
        let err = inflate(b"not gzip", Compression::Gzip, ChunkCoord::new(0, 0)).unwrap_err();
        assert!(matches!(err, WorldError::Corrupt { .. }));
    }
}
