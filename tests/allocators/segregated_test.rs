/*!
 * Segregated Allocator Tests
 * Class table construction, per-class exhaustion and caller-sized frees
 */

use pool_allocators::memory::{MemoryError, SegregatedAllocator};
use pretty_assertions::assert_eq;

#[test]
fn test_class_table_for_small_pool() {
    let mk = SegregatedAllocator::new(1024).expect("Failed to create allocator");

    assert_eq!(mk.class_sizes(), &[16, 32, 64, 128, 256, 512]);
    let carved: Vec<usize> = (0..mk.class_count()).map(|i| mk.carved_blocks(i)).collect();
    assert_eq!(carved, vec![6, 3, 1, 1, 1, 0]);
}

#[test]
fn test_class_table_for_default_pool() {
    let mk = SegregatedAllocator::new(1 << 20).expect("Failed to create allocator");

    // 16 << 15 would exceed half the pool
    assert_eq!(mk.class_count(), 16);
    assert_eq!(mk.class_sizes().last(), Some(&(512 * 1024)));
    // Small classes are capped at 100 blocks
    assert_eq!(mk.carved_blocks(0), 100);
    assert_eq!(mk.carved_blocks(12), 1);
}

#[test]
fn test_segregated_ceiling() {
    let mut mk = SegregatedAllocator::new(1024).expect("Failed to create allocator");

    assert_eq!(
        mk.allocate(600),
        Err(MemoryError::ExceedsLargestClass {
            requested: 600,
            largest: 512
        })
    );
    assert_eq!(mk.used_size(), 0);
}

#[test]
fn test_no_over_allocation() {
    let mut mk = SegregatedAllocator::new(4096).expect("Failed to create allocator");
    let result = mk.allocate(4096 * 2);
    assert!(result.is_err());
    assert!(result.unwrap_err().is_allocation_failure());
}

#[test]
fn test_class_exhaustion_without_fallback() {
    let mut mk = SegregatedAllocator::new(1024).expect("Failed to create allocator");

    // 32-byte class holds three blocks
    for _ in 0..3 {
        mk.allocate(20).expect("32-byte class should have room");
    }
    assert!(matches!(
        mk.allocate(20),
        Err(MemoryError::ClassExhausted { class_size: 32, .. })
    ));
    assert_eq!(mk.used_size(), 96);
}

#[test]
fn test_allocations_are_distinct_and_aligned() {
    let mut mk = SegregatedAllocator::new(1 << 16).expect("Failed to create allocator");
    let mut addresses = Vec::new();
    for size in [8, 16, 24, 40, 100, 200, 500, 1000] {
        let addr = mk.allocate(size).expect("Allocation should succeed");
        assert_eq!(addr % std::mem::size_of::<usize>(), 0);
        addresses.push(addr);
    }

    addresses.sort_unstable();
    addresses.dedup();
    assert_eq!(addresses.len(), 8);
}

#[test]
fn test_freed_block_is_reused_first() {
    let mut mk = SegregatedAllocator::new(4096).expect("Failed to create allocator");
    let first = mk.allocate(100).expect("Allocation should succeed");
    let _second = mk.allocate(100).expect("Allocation should succeed");

    mk.free(first, 100);
    assert_eq!(mk.allocate(100), Ok(first));
}

#[test]
fn test_free_with_wrong_size_misclassifies() {
    let mut mk = SegregatedAllocator::new(1024).expect("Failed to create allocator");
    let addr = mk.allocate(100).expect("Allocation should succeed");
    assert_eq!(mk.used_size(), 128);

    // Caller lies about the size: block lands in the 16-byte class
    mk.free(addr, 10);
    assert_eq!(mk.free_blocks(0)[0], addr);
    assert!(mk.free_blocks(3).is_empty());
    assert_eq!(mk.used_size(), 112);
}

#[test]
fn test_status_reports_class_count() {
    let mut mk = SegregatedAllocator::new(1024).expect("Failed to create allocator");
    mk.allocate(200).expect("Allocation should succeed");

    let status = mk.status();
    assert_eq!(status.total_size, 1024);
    assert_eq!(status.used_size, 256);
    assert_eq!(status.free_size, 768);
    assert_eq!(status.detail.count(), 6);
    assert!((status.utilization_percent - 25.0).abs() < f64::EPSILON);

    let rendered = status.to_string();
    assert!(rendered.contains("Algorithm: McKusick-Karels"));
    assert!(rendered.contains("Number of Size Classes: 6"));
}
