use crate::registry::BlockRegistry;
use crate::types::BlockId;

const MASS: u8 = 1;
const TRANSPARENT: u8 = 2;
const EMPTY: u8 = 4;

/// Face-culling predicate over the 256 block type ids.
///
/// Only the type id (low byte of a [`BlockId`]) takes part; metadata never
/// creates or removes a face.
#[derive(Clone, Debug)]
pub struct BoundaryLocator {
    info: [u8; 256],
}

impl BoundaryLocator {
    /// Classifies every type id. Ids without a descriptor are opaque masses.
    /// With `hide_stone`, stone counts as empty so only caves and ores remain.
    pub fn new(registry: &BlockRegistry, hide_stone: bool) -> Self {
        let mut info = [MASS; 256];
        for (i, slot) in info.iter_mut().enumerate() {
            let id = i as u8;
            let mut v = match registry.get(id) {
                Some(ty) => {
                    let mut v = 0;
                    if !ty.item {
                        v |= MASS;
                    }
                    if ty.transparent {
                        v |= TRANSPARENT;
                    }
                    if ty.empty {
                        v |= EMPTY;
                    }
                    v
                }
                None => MASS,
            };
            if id == 0 || (hide_stone && id == 1) {
                v |= EMPTY;
            }
            *slot = v;
        }
        Self { info }
    }

    #[inline]
    fn info(&self, id: BlockId) -> u8 {
        self.info[id.type_id() as usize]
    }

    #[inline]
    pub fn is_empty(&self, id: BlockId) -> bool {
        self.info(id) & EMPTY != 0
    }

    #[inline]
    pub fn is_item(&self, id: BlockId) -> bool {
        self.info(id) & MASS == 0
    }

    #[inline]
    pub fn is_transparent(&self, id: BlockId) -> bool {
        self.info(id) & TRANSPARENT != 0
    }

    /// Whether `block` shows a face towards its neighbour `other`.
    #[inline]
    pub fn is_boundary(&self, block: BlockId, other: BlockId) -> bool {
        if self.is_empty(block) {
            return false;
        }
        self.is_empty(other)
            || self.is_item(block)
            || (self.is_transparent(other)
                && (self.is_item(other) || block.type_id() != other.type_id()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn locator() -> BoundaryLocator {
        BoundaryLocator::new(&BlockRegistry::builtin(), false)
    }

    const WATER: BlockId = BlockId(8);
    const GLASS: BlockId = BlockId(20);
    const TORCH: BlockId = BlockId(50);

    #[test]
    fn solid_against_air_and_solid() {
        let b = locator();
        assert!(b.is_boundary(BlockId::STONE, BlockId::AIR));
        assert!(!b.is_boundary(BlockId::AIR, BlockId::STONE));
        assert!(!b.is_boundary(BlockId::STONE, BlockId(3)));
    }

    #[test]
    fn transparent_neighbours() {
        let b = locator();
        assert!(b.is_boundary(BlockId::STONE, WATER));
        assert!(!b.is_boundary(WATER, WATER));
        assert!(!b.is_boundary(WATER, BlockId::STONE));
        assert!(b.is_boundary(WATER, GLASS));
        assert!(!b.is_boundary(GLASS, GLASS));
    }

    #[test]
    fn items_always_draw() {
        let b = locator();
        assert!(b.is_boundary(TORCH, BlockId::STONE));
        assert!(b.is_boundary(TORCH, TORCH));
        assert!(b.is_boundary(BlockId::STONE, TORCH));
    }

    #[test]
    fn unknown_ids_are_opaque_masses() {
        let b = locator();
        assert!(!b.is_empty(BlockId(200)));
        assert!(!b.is_transparent(BlockId(200)));
        assert!(!b.is_boundary(BlockId(200), BlockId::STONE));
        assert!(b.is_boundary(BlockId(200), BlockId::AIR));
    }

    #[test]
    fn hide_stone_empties_stone() {
        let b = BoundaryLocator::new(&BlockRegistry::builtin(), true);
        assert!(b.is_empty(BlockId::STONE));
        assert!(b.is_boundary(BlockId(16), BlockId::STONE));
        assert!(!b.is_boundary(BlockId::STONE, BlockId::AIR));
    }
}
