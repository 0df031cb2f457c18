use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::coord::ChunkCoord;
use crate::error::WorldError;
use crate::nbt::{Compression, inflate};

#[derive(Deserialize)]
struct LevelDat {
    #[serde(rename = "Data")]
    data: LevelData,
}

#[derive(Deserialize)]
struct LevelData {
    #[serde(rename = "SpawnX")]
    spawn_x: i32,
    #[serde(rename = "SpawnZ")]
    spawn_z: i32,
}

/// Chunk containing the world spawn point from `level.dat`.
pub fn read_spawn(world_dir: impl AsRef<Path>) -> Result<ChunkCoord, WorldError> {
    let bytes = fs::read(world_dir.as_ref().join("level.dat"))?;
    let nbt = inflate(&bytes, Compression::Gzip, ChunkCoord::default())?;
    let level: LevelDat = fastnbt::from_bytes(&nbt)?;
    Ok(ChunkCoord::containing_block(
        i64::from(level.data.spawn_x),
        i64::from(level.data.spawn_z),
    ))
}
