/*!
 * Conservation Property Tests
 * Buddy accounting stays exact under arbitrary allocate/free sequences
 */

use pool_allocators::memory::{AllocatorKind, BuddyAllocator, MemoryAllocator, PoolAllocator};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Allocate(usize),
    Free(usize),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (1usize..3000).prop_map(Op::Allocate),
        2 => any::<usize>().prop_map(Op::Free),
    ]
}

proptest! {
    #[test]
    fn buddy_used_plus_free_equals_total(ops in prop::collection::vec(op_strategy(), 1..200)) {
        let mut p2 = BuddyAllocator::new(16 * 1024).unwrap();
        let total = p2.total_size();
        let mut live: Vec<(usize, usize)> = Vec::new();

        for op in ops {
            match op {
                Op::Allocate(size) => {
                    if let Ok(addr) = p2.allocate(size) {
                        live.push((addr, size));
                    }
                }
                Op::Free(pick) => {
                    if !live.is_empty() {
                        let (addr, size) = live.swap_remove(pick % live.len());
                        p2.free(addr, size);
                    }
                }
            }
            prop_assert_eq!(p2.used_size() + p2.free_bytes(), total);
        }

        for (addr, size) in live.drain(..) {
            p2.free(addr, size);
        }
        prop_assert_eq!(p2.used_size(), 0);
        prop_assert_eq!(p2.free_blocks(p2.max_order()), vec![0]);
    }

    #[test]
    fn used_size_never_exceeds_total(sizes in prop::collection::vec(1usize..5000, 1..150)) {
        for kind in AllocatorKind::ALL {
            let mut allocator = MemoryAllocator::create(kind, 32 * 1024).unwrap();
            let mut live = Vec::new();
            for &size in &sizes {
                if let Ok(addr) = allocator.allocate(size) {
                    live.push((addr, size));
                }
                prop_assert!(allocator.used_size() <= allocator.total_size());
            }
            for (addr, size) in live {
                allocator.free(addr, size);
            }
            prop_assert_eq!(allocator.used_size(), 0);
        }
    }
}
