use crate::coord::ChunkCoord;

/// Region of chunks to convert.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ChunkMask {
    #[default]
    All,
    /// Half-open rectangle `[x0, x1) x [z0, z1)` in chunk units.
    Rect { x0: i32, z0: i32, x1: i32, z1: i32 },
}

impl ChunkMask {
    /// `size x size` chunks around `center`.
    pub fn square(center: ChunkCoord, size: i32) -> Self {
        Self::rect(center, Some(size), Some(size))
    }

    /// `width x depth` chunks around `center`; a `None` axis is unbounded.
    pub fn rect(center: ChunkCoord, width: Option<i32>, depth: Option<i32>) -> Self {
        if width.is_none() && depth.is_none() {
            return ChunkMask::All;
        }
        let (x0, x1) = match width {
            Some(w) => {
                let h = w / 2;
                (center.x - h, center.x - h + w)
            }
            None => (i32::MIN, i32::MAX),
        };
        let (z0, z1) = match depth {
            Some(d) => {
                let h = d / 2;
                (center.z - h, center.z - h + d)
            }
            None => (i32::MIN, i32::MAX),
        };
        ChunkMask::Rect { x0, z0, x1, z1 }
    }

    #[inline]
    pub fn is_masked(&self, x: i32, z: i32) -> bool {
        match *self {
            ChunkMask::All => false,
            ChunkMask::Rect { x0, z0, x1, z1 } => x < x0 || x >= x1 || z < z0 || z >= z1,
        }
    }

    #[inline]
    pub fn contains(&self, coord: ChunkCoord) -> bool {
        !self.is_masked(coord.x, coord.z)
    }
}

/// Inclusive chunk bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoundingBox {
    pub min: ChunkCoord,
    pub max: ChunkCoord,
}

impl BoundingBox {
    pub fn at(coord: ChunkCoord) -> Self {
        Self {
            min: coord,
            max: coord,
        }
    }

    pub fn include(&mut self, coord: ChunkCoord) {
        self.min.x = self.min.x.min(coord.x);
        self.min.z = self.min.z.min(coord.z);
        self.max.x = self.max.x.max(coord.x);
        self.max.z = self.max.z.max(coord.z);
    }

    pub fn center(&self) -> ChunkCoord {
        ChunkCoord::new(
            ((self.min.x as i64 + self.max.x as i64).div_euclid(2)) as i32,
            ((self.min.z as i64 + self.max.z as i64).div_euclid(2)) as i32,
        )
    }
}
