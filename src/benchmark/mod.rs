/*!
 * Benchmark Harness
 * Timed two-phase runs over the allocator facade, reporting and export
 */

pub mod config;
pub mod export;
pub mod report;
pub mod result;
pub mod runner;
pub mod sizes;

// Re-export for convenience
pub use config::BenchConfig;
pub use export::{export_csv, write_csv, CSV_HEADER};
pub use report::{analysis, render_comparison, render_result, ComparisonReport, ResultReport};
pub use result::{AlgorithmResult, BenchmarkResult};
pub use runner::{benchmark_algorithm, compare_algorithms, run_two_phase};
pub use sizes::generate_sizes;
