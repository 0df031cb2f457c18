use std::fmt;

/// Composite 16-bit block value: low byte is the type id, high byte the metadata.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockId(pub u16);

impl BlockId {
    pub const AIR: BlockId = BlockId(0);
    pub const STONE: BlockId = BlockId(1);
    pub const BEDROCK: BlockId = BlockId(7);

    #[inline]
    pub const fn new(type_id: u8, metadata: u8) -> Self {
        BlockId(type_id as u16 | ((metadata as u16) << 8))
    }

    #[inline]
    pub const fn type_id(self) -> u8 {
        (self.0 & 0xff) as u8
    }

    #[inline]
    pub const fn metadata(self) -> u8 {
        (self.0 >> 8) as u8
    }
}

impl From<u8> for BlockId {
    fn from(type_id: u8) -> Self {
        BlockId(type_id as u16)
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.metadata() == 0 {
            write!(f, "{}", self.type_id())
        } else {
            write!(f, "{}:{}", self.type_id(), self.metadata())
        }
    }
}

/// Classification of one of the 256 block type ids.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockType {
    pub id: u8,
    pub name: String,
    /// Singular object (flower, torch, door) rather than a solid mass.
    pub item: bool,
    pub transparent: bool,
    /// Never produces geometry of its own.
    pub empty: bool,
}

impl BlockType {
    pub fn mass(id: u8, name: &str, transparent: bool) -> Self {
        Self {
            id,
            name: name.to_string(),
            item: false,
            transparent,
            empty: false,
        }
    }

    pub fn item(id: u8, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            item: true,
            transparent: true,
            empty: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packs_type_and_metadata() {
        let id = BlockId::new(35, 14);
        assert_eq!(id.type_id(), 35);
        assert_eq!(id.metadata(), 14);
        assert_eq!(id.0, 35 + 14 * 256);
        assert_eq!(id.to_string(), "35:14");
        assert_eq!(BlockId::from(7u8), BlockId::BEDROCK);
    }
}
