/*!
 * Error Types
 * Driver-level error handling with thiserror and miette
 */

use miette::Diagnostic;
use thiserror::Error;

// Re-export MemoryError from memory module
pub use crate::memory::MemoryError;

/// Benchmark driver errors
#[derive(Error, Debug, Diagnostic)]
pub enum BenchError {
    #[error("Memory error: {0}")]
    #[diagnostic(transparent)]
    Memory(#[from] MemoryError),

    #[error("Configuration error: {0}")]
    #[diagnostic(
        code(bench::configuration_error),
        help("Check the ALLOCBENCH_* environment variables.")
    )]
    Config(String),

    #[error("I/O error: {0}")]
    #[diagnostic(
        code(bench::io_error),
        help("Check that the output directory exists and is writable.")
    )]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    #[diagnostic(code(bench::serialization_error))]
    Serialization(#[from] serde_json::Error),
}

/// Result type for driver operations
pub type BenchResult<T> = Result<T, BenchError>;
