/*!
 * Buddy Allocator Tests
 * Splitting, coalescing and the free-path guards
 */

use pool_allocators::memory::{BuddyAllocator, MemoryError};
use pretty_assertions::assert_eq;

fn snapshot(p2: &BuddyAllocator) -> Vec<Vec<usize>> {
    (0..=p2.max_order()).map(|order| p2.free_blocks(order)).collect()
}

#[test]
fn test_pool_is_rounded_up() {
    let p2 = BuddyAllocator::new(1000).expect("Failed to create allocator");
    assert_eq!(p2.total_size(), 1024);
    assert_eq!(p2.max_order(), 10);
    assert_eq!(p2.free_blocks(10), vec![0]);
}

#[test]
fn test_exact_split_scenario() {
    let mut p2 = BuddyAllocator::new(1024).expect("Failed to create allocator");

    let addr = p2.allocate(10).expect("Allocation should succeed");
    assert_eq!(addr, 16);
    assert_eq!(p2.used_size(), 32);
    assert_eq!(p2.block_order(addr), Some(5));

    // One free sibling left at every level of the split
    for order in 5..10 {
        assert_eq!(p2.free_blocks(order), vec![1usize << order], "order {}", order);
    }
    assert!(p2.free_blocks(10).is_empty());
}

#[test]
fn test_round_trip_restores_single_block() {
    let mut p2 = BuddyAllocator::new(1024).expect("Failed to create allocator");
    let addr = p2.allocate(100).expect("Allocation should succeed");
    p2.free(addr, 100);

    assert_eq!(p2.used_size(), 0);
    assert_eq!(p2.free_blocks(10), vec![0]);
    for order in 0..10 {
        assert_eq!(p2.free_list_len(order), 0);
    }
}

#[test]
fn test_coalescing_is_order_independent() {
    let build = || {
        let mut p2 = BuddyAllocator::new(1024).expect("Failed to create allocator");
        let a = p2.allocate(10).expect("Allocation should succeed");
        let b = p2.allocate(10).expect("Allocation should succeed");
        (p2, a, b)
    };

    let (mut forward, a, b) = build();
    // a and b are buddies at order 5
    assert_eq!((a - 16) ^ 32, b - 16);
    forward.free(a, 10);
    forward.free(b, 10);

    let (mut reverse, a, b) = build();
    reverse.free(b, 10);
    reverse.free(a, 10);

    assert_eq!(snapshot(&forward), snapshot(&reverse));
    assert_eq!(forward.free_blocks(10), vec![0]);
}

#[test]
fn test_double_free_is_ignored() {
    let mut p2 = BuddyAllocator::new(1024).expect("Failed to create allocator");
    let keep = p2.allocate(10).expect("Allocation should succeed");
    let addr = p2.allocate(40).expect("Allocation should succeed");

    p2.free(addr, 40);
    let used = p2.used_size();
    let lists = snapshot(&p2);

    p2.free(addr, 40);
    assert_eq!(p2.used_size(), used);
    assert_eq!(snapshot(&p2), lists);

    p2.free(keep, 10);
    assert_eq!(p2.used_size(), 0);
}

#[test]
fn test_free_outside_pool_is_ignored() {
    let mut p2 = BuddyAllocator::new(1024).expect("Failed to create allocator");
    p2.allocate(10).expect("Allocation should succeed");

    p2.free(0, 10);
    p2.free(8, 10);
    p2.free(1024, 10);
    p2.free(usize::MAX, 10);
    assert_eq!(p2.used_size(), 32);
}

#[test]
fn test_free_of_unserved_address_is_ignored() {
    let mut p2 = BuddyAllocator::new(1024).expect("Failed to create allocator");
    let keep = p2.allocate(10).expect("Allocation should succeed");

    // Inside the free upper half; never returned by allocate
    p2.free(600, 10);
    assert_eq!(p2.used_size(), 32);

    p2.free(keep, 10);
    assert_eq!(p2.used_size(), 0);
    assert_eq!(p2.used_size() + p2.free_bytes(), p2.total_size());
    assert_eq!(snapshot(&p2)[..10].iter().map(Vec::len).sum::<usize>(), 0);
    assert_eq!(p2.free_blocks(10), vec![0]);
}

#[test]
fn test_request_larger_than_pool_fails() {
    let mut p2 = BuddyAllocator::new(1024).expect("Failed to create allocator");

    assert!(matches!(
        p2.allocate(2048),
        Err(MemoryError::OrderTooLarge { order: 12, max_order: 10, .. })
    ));
    // Header overhead pushes a full-pool request past the largest block
    assert!(p2.allocate(1024).is_err());
    assert!(p2.allocate(usize::MAX).is_err());
    assert_eq!(p2.used_size(), 0);
}

#[test]
fn test_exhaustion_then_recovery() {
    let mut p2 = BuddyAllocator::new(1024).expect("Failed to create allocator");
    let big = p2.allocate(1000).expect("Whole pool should be available");
    assert_eq!(p2.used_size(), 1024);
    assert!(matches!(
        p2.allocate(1),
        Err(MemoryError::Exhausted { order: 5, .. })
    ));

    p2.free(big, 1000);
    assert!(p2.allocate(1).is_ok());
}

#[test]
fn test_invalid_pool_sizes() {
    assert!(matches!(
        BuddyAllocator::new(0),
        Err(MemoryError::InvalidPoolSize { .. })
    ));
    assert!(matches!(
        BuddyAllocator::new(8),
        Err(MemoryError::InvalidPoolSize { .. })
    ));
    assert!(matches!(
        BuddyAllocator::new(usize::MAX),
        Err(MemoryError::InvalidPoolSize { .. })
    ));
}
