/*!
 * Benchmark Results
 */

use crate::core::types::Size;
use crate::memory::AllocatorKind;
use serde::{Deserialize, Serialize};

/// Outcome of one two-phase allocate/free run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkResult {
    /// Mean seconds per allocation attempt
    pub avg_allocation_time: f64,
    /// Mean seconds per free of a successful allocation
    pub avg_deallocation_time: f64,
    /// Bytes reserved beyond what was requested
    pub internal_fragmentation: Size,
    /// Not measured; kept so the record layout matches the report format
    pub external_fragmentation: Size,
    pub failed_allocations: usize,
    pub successful_allocations: usize,
    pub requested_bytes: Size,
    pub allocated_bytes: Size,
    /// Wall time of the whole run in seconds
    pub total_time: f64,
    /// `requested / allocated * 100`, 0 when nothing was allocated
    pub memory_efficiency: f64,
}

/// A result tagged with the engine that produced it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlgorithmResult {
    pub algorithm: AllocatorKind,
    pub result: BenchmarkResult,
}

impl AlgorithmResult {
    pub fn new(algorithm: AllocatorKind, result: BenchmarkResult) -> Self {
        Self { algorithm, result }
    }

    /// Name used in tables and CSV rows
    pub fn name(&self) -> &'static str {
        self.algorithm.short_name()
    }
}
