/*!
 * Allocator Limits and Constants
 *
 * Centralized location for size-class geometry, buddy header layout and
 * benchmark defaults. Grouped by the component that consumes them.
 */

// =============================================================================
// SEGREGATED SIZE-CLASS ENGINE
// =============================================================================

/// Smallest size class (16 bytes); class `i` serves `MIN_CLASS_SIZE << i`
pub const MIN_CLASS_SIZE: usize = 16;

/// Maximum number of size classes
pub const MAX_SIZE_CLASSES: usize = 32;

/// Doubling steps allowed before the class table stops growing
/// Guards `MIN_CLASS_SIZE << i` against shifting past the word width
pub const MAX_CLASS_SHIFT: usize = 60;

/// Share of the pool used to size each class's carve (1/10 of the pool)
pub const CLASS_CARVE_DIVISOR: usize = 10;

/// Upper bound on blocks carved per class
/// Keeps one small class from swallowing the whole pool
pub const MAX_BLOCKS_PER_CLASS: usize = 100;

/// Alignment of carved blocks (pointer width)
pub const BLOCK_ALIGNMENT: usize = std::mem::size_of::<usize>();

/// Width of an in-pool free-list link
pub const LINK_SIZE: usize = std::mem::size_of::<u64>();

// =============================================================================
// BUDDY ENGINE
// =============================================================================

/// In-place block header: order (u32), flags (u32), next link (u64)
pub const BUDDY_HEADER_SIZE: usize = 16;

/// Sentinel stored in a link slot when there is no next block
pub const NIL_LINK: u64 = u64::MAX;

// =============================================================================
// MEMORY PRESSURE
// =============================================================================

/// Utilization (percent) reported as medium pressure
pub const PRESSURE_MEDIUM_PERCENT: f64 = 60.0;

/// Utilization (percent) reported as high pressure
pub const PRESSURE_HIGH_PERCENT: f64 = 80.0;

/// Utilization (percent) reported as critical pressure
pub const PRESSURE_CRITICAL_PERCENT: f64 = 95.0;

// =============================================================================
// BENCHMARK DEFAULTS
// =============================================================================

/// Default benchmark pool (1MB)
pub const DEFAULT_POOL_SIZE: usize = 1024 * 1024;

/// Default number of allocation requests per run
pub const DEFAULT_ALLOCATIONS: usize = 1000;

/// Default smallest request size
pub const DEFAULT_MIN_REQUEST: usize = 16;

/// Default exclusive upper bound on request sizes
pub const DEFAULT_MAX_REQUEST: usize = 4096;

/// Default CSV output path
pub const DEFAULT_CSV_PATH: &str = "benchmark_results.csv";
