/*!
 * Pool Allocators Library
 * Segregated size-class and buddy allocators over a fixed pool, plus the
 * benchmark harness that compares them
 */

pub mod benchmark;
pub mod core;
pub mod memory;
pub mod monitoring;

// Re-exports
pub use benchmark::{
    benchmark_algorithm, compare_algorithms, AlgorithmResult, BenchConfig, BenchmarkResult,
};
pub use crate::core::{Address, BenchError, BenchResult, Size};
pub use memory::{
    AllocatorKind, AllocatorStatus, BuddyAllocator, EngineDetail, MemoryAllocator, MemoryError,
    MemoryPressure, MemoryResult, PoolAllocator, SegregatedAllocator,
};
pub use monitoring::init_tracing;
