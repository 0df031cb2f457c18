use mcobj_blocks::BlockId;
use mcobj_chunk::{EnclosePolicy, SideCache};
use mcobj_world::{Chunk, ChunkCoord};
use proptest::prelude::*;

const H: usize = 3;

fn chunk_at(coord: ChunkCoord) -> impl Strategy<Value = Chunk> {
    prop::collection::vec(0u16..600, 16 * 16 * H)
        .prop_map(move |ids| Chunk::from_blocks(coord, H, ids.into_iter().map(BlockId).collect()))
}

proptest! {
    #[test]
    fn enclosed_edges_mirror_neighbours(
        west in chunk_at(ChunkCoord::new(-1, 0)),
        east in chunk_at(ChunkCoord::new(1, 0)),
        north in chunk_at(ChunkCoord::new(0, -1)),
        south in chunk_at(ChunkCoord::new(0, 1)),
        center in chunk_at(ChunkCoord::new(0, 0)),
    ) {
        let mut cache = SideCache::new(EnclosePolicy::default());
        for c in [&west, &east, &north, &south] {
            cache.add_chunk(c);
        }
        let enclosed = cache.enclose(center.clone());
        for i in 0..16 {
            for y in 0..H {
                prop_assert_eq!(enclosed.get(-1, y as i32, i as i32), west.get(15, y, i));
                prop_assert_eq!(enclosed.get(16, y as i32, i as i32), east.get(0, y, i));
                prop_assert_eq!(enclosed.get(i as i32, y as i32, -1), north.get(i, y, 15));
                prop_assert_eq!(enclosed.get(i as i32, y as i32, 16), south.get(i, y, 0));
                prop_assert_eq!(enclosed.get(i as i32, y as i32, 15 - i as i32), center.get(i, y, 15 - i));
            }
        }
        prop_assert_eq!(cache.len(), 4);
    }
}
