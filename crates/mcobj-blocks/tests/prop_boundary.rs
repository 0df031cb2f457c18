use mcobj_blocks::{BlockId, BlockRegistry, BoundaryLocator};
use proptest::prelude::*;

fn any_block() -> impl Strategy<Value = BlockId> {
    any::<u16>().prop_map(BlockId)
}

proptest! {
    #[test]
    fn metadata_never_changes_culling(a in any_block(), b in any_block(), ma in any::<u8>(), mb in any::<u8>()) {
        let loc = BoundaryLocator::new(&BlockRegistry::builtin(), false);
        let a2 = BlockId::new(a.type_id(), ma);
        let b2 = BlockId::new(b.type_id(), mb);
        prop_assert_eq!(loc.is_boundary(a, b), loc.is_boundary(a2, b2));
    }

    #[test]
    fn empty_blocks_never_draw(other in any_block(), meta in any::<u8>()) {
        let loc = BoundaryLocator::new(&BlockRegistry::builtin(), false);
        prop_assert!(!loc.is_boundary(BlockId::new(0, meta), other));
    }

    #[test]
    fn anything_solid_faces_air(block in any_block()) {
        let loc = BoundaryLocator::new(&BlockRegistry::builtin(), false);
        prop_assume!(block.type_id() != 0);
        prop_assert!(loc.is_boundary(block, BlockId::AIR));
    }

    #[test]
    fn opaque_masses_hide_each_other(a in any::<u8>(), b in any::<u8>()) {
        let reg = BlockRegistry::builtin();
        let loc = BoundaryLocator::new(&reg, false);
        let (a, b) = (BlockId::from(a), BlockId::from(b));
        prop_assume!(!loc.is_empty(a) && !loc.is_item(a));
        prop_assume!(!loc.is_empty(b) && !loc.is_transparent(b));
        prop_assert!(!loc.is_boundary(a, b));
    }
}
