/*!
 * Benchmark Runner Tests
 * Two-phase accounting against both engines
 */

use pool_allocators::benchmark::{generate_sizes, run_two_phase};
use pool_allocators::memory::{AllocatorKind, MemoryAllocator, PoolAllocator};
use pool_allocators::{benchmark_algorithm, compare_algorithms};
use pretty_assertions::assert_eq;

#[test]
fn test_segregated_fragmentation_accounting() {
    let mut allocator =
        MemoryAllocator::create(AllocatorKind::Segregated, 1024).expect("Failed to create");
    // 10 -> 16, 20 -> 32, 600 has no class
    let result = run_two_phase(&mut allocator, &[10, 20, 600]);

    assert_eq!(result.successful_allocations, 2);
    assert_eq!(result.failed_allocations, 1);
    assert_eq!(result.requested_bytes, 30);
    assert_eq!(result.allocated_bytes, 48);
    assert_eq!(result.internal_fragmentation, 18);
    assert_eq!(result.external_fragmentation, 0);
    assert!((result.memory_efficiency - 62.5).abs() < 1e-9);
    // Everything was handed back
    assert_eq!(allocator.used_size(), 0);
}

#[test]
fn test_buddy_fragmentation_includes_header() {
    let mut allocator =
        MemoryAllocator::create(AllocatorKind::Buddy, 1024).expect("Failed to create");
    let result = run_two_phase(&mut allocator, &[10, 100]);

    // 10 + 16 -> 32, 100 + 16 -> 128
    assert_eq!(result.allocated_bytes, 160);
    assert_eq!(result.internal_fragmentation, 50);
    assert_eq!(allocator.status().used_size, 0);
    assert_eq!(
        allocator.as_buddy().map(|p2| p2.free_blocks(10)),
        Some(vec![0])
    );
}

#[test]
fn test_all_failures_leave_efficiency_zero() {
    let result = benchmark_algorithm(AllocatorKind::Buddy, 64, &[100, 200, 300])
        .expect("Pool should be created");
    assert_eq!(result.successful_allocations, 0);
    assert_eq!(result.failed_allocations, 3);
    assert_eq!(result.memory_efficiency, 0.0);
    assert_eq!(result.avg_deallocation_time, 0.0);
}

#[test]
fn test_compare_runs_both_engines_in_order() {
    let sizes = generate_sizes(200, 16, 4096, Some(7));
    let results = compare_algorithms(1 << 20, &sizes).expect("Comparison should run");

    let kinds: Vec<_> = results.iter().map(|r| r.algorithm).collect();
    assert_eq!(kinds, AllocatorKind::ALL.to_vec());
    for entry in &results {
        let r = &entry.result;
        assert_eq!(r.successful_allocations + r.failed_allocations, 200);
        assert!(r.memory_efficiency <= 100.0);
        assert!(r.allocated_bytes >= r.requested_bytes);
    }
}

#[test]
fn test_outcomes_are_deterministic_for_a_seed() {
    let sizes = generate_sizes(300, 16, 4096, Some(1234));
    let first = compare_algorithms(1 << 18, &sizes).expect("Comparison should run");
    let second = compare_algorithms(1 << 18, &sizes).expect("Comparison should run");

    for (a, b) in first.iter().zip(&second) {
        assert_eq!(a.result.failed_allocations, b.result.failed_allocations);
        assert_eq!(a.result.allocated_bytes, b.result.allocated_bytes);
        assert_eq!(a.result.internal_fragmentation, b.result.internal_fragmentation);
    }
}

#[test]
fn test_invalid_pool_is_an_error() {
    assert!(compare_algorithms(0, &[16]).is_err());
}
