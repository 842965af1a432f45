/*!
 * Benchmark Runner
 *
 * Two-phase protocol: every allocation of the run is issued before any free.
 * Each call is timed individually; fragmentation is accounted from the block
 * size the engine reports for each successful request.
 */

use super::result::{AlgorithmResult, BenchmarkResult};
use crate::core::types::{Address, Size};
use crate::memory::{AllocatorKind, MemoryAllocator, MemoryResult, PoolAllocator};
use std::time::Instant;
use tracing::{debug, info, info_span};

/// Run the allocate-all-then-free-all protocol against any allocator
pub fn run_two_phase<A: PoolAllocator>(allocator: &mut A, sizes: &[Size]) -> BenchmarkResult {
    let mut result = BenchmarkResult::default();
    let mut allocations: Vec<Option<(Address, Size)>> = Vec::with_capacity(sizes.len());

    let run_start = Instant::now();
    let mut alloc_secs = 0.0;

    for &size in sizes {
        let start = Instant::now();
        let outcome = allocator.allocate(size);
        alloc_secs += start.elapsed().as_secs_f64();

        match outcome {
            Ok(address) => {
                result.successful_allocations += 1;
                result.requested_bytes += size;
                result.allocated_bytes += allocator.allocated_size(size).unwrap_or(size);
                allocations.push(Some((address, size)));
            }
            Err(err) => {
                debug!(size, error = %err, "Allocation failed");
                result.failed_allocations += 1;
                allocations.push(None);
            }
        }
    }

    if !sizes.is_empty() {
        result.avg_allocation_time = alloc_secs / sizes.len() as f64;
    }
    if result.requested_bytes > 0 && result.allocated_bytes > 0 {
        result.internal_fragmentation = result.allocated_bytes - result.requested_bytes;
        result.memory_efficiency =
            result.requested_bytes as f64 / result.allocated_bytes as f64 * 100.0;
    }

    let mut dealloc_secs = 0.0;
    for (address, size) in allocations.into_iter().flatten() {
        let start = Instant::now();
        allocator.free(address, size);
        dealloc_secs += start.elapsed().as_secs_f64();
    }

    if result.successful_allocations > 0 {
        result.avg_deallocation_time = dealloc_secs / result.successful_allocations as f64;
    }
    result.total_time = run_start.elapsed().as_secs_f64();
    result
}

/// Benchmark one engine over a fresh pool
pub fn benchmark_algorithm(
    kind: AllocatorKind,
    pool_size: Size,
    sizes: &[Size],
) -> MemoryResult<BenchmarkResult> {
    let span = info_span!("benchmark", algorithm = %kind, pool_size, requests = sizes.len());
    let _enter = span.enter();

    let mut allocator = MemoryAllocator::create(kind, pool_size)?;
    let result = run_two_phase(&mut allocator, sizes);
    allocator.destroy();

    info!(
        failed = result.failed_allocations,
        efficiency = result.memory_efficiency,
        internal_fragmentation = result.internal_fragmentation,
        total_time = result.total_time,
        "Benchmark complete"
    );
    Ok(result)
}

/// Benchmark both engines on the same size sequence, segregated first
pub fn compare_algorithms(pool_size: Size, sizes: &[Size]) -> MemoryResult<Vec<AlgorithmResult>> {
    AllocatorKind::ALL
        .iter()
        .map(|&kind| {
            benchmark_algorithm(kind, pool_size, sizes)
                .map(|result| AlgorithmResult::new(kind, result))
        })
        .collect()
}
