/*!
 * Memory Types
 * Common types for the pool allocators
 */

use crate::core::limits::{
    PRESSURE_CRITICAL_PERCENT, PRESSURE_HIGH_PERCENT, PRESSURE_MEDIUM_PERCENT,
};
use crate::core::types::Size;
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Memory operation result
pub type MemoryResult<T> = Result<T, MemoryError>;

/// Memory errors
///
/// Construction variants abort `create`; the remaining variants are the
/// expected, countable allocation failures.
#[derive(Error, Debug, Clone, PartialEq, Eq, Diagnostic)]
pub enum MemoryError {
    #[error("Invalid pool size: {size} bytes ({reason})")]
    #[diagnostic(
        code(memory::invalid_pool_size),
        help("Use a pool large enough to hold at least one block.")
    )]
    InvalidPoolSize { size: Size, reason: &'static str },

    #[error("Failed to reserve a {size} byte pool")]
    #[diagnostic(
        code(memory::pool_allocation_failed),
        help("The host could not provide the pool buffer. Try a smaller pool.")
    )]
    PoolAllocationFailed { size: Size },

    #[error("Zero-sized allocation requested")]
    #[diagnostic(code(memory::zero_size))]
    ZeroSize,

    #[error("Request of {requested} bytes exceeds the largest size class ({largest} bytes)")]
    #[diagnostic(code(memory::exceeds_largest_class))]
    ExceedsLargestClass { requested: Size, largest: Size },

    #[error("Size class {class_size} exhausted (requested {requested} bytes)")]
    #[diagnostic(
        code(memory::class_exhausted),
        help("Segregated classes never borrow from larger classes.")
    )]
    ClassExhausted { requested: Size, class_size: Size },

    #[error("Request of {requested} bytes needs order {order}, above max order {max_order}")]
    #[diagnostic(code(memory::order_too_large))]
    OrderTooLarge {
        requested: Size,
        order: u32,
        max_order: u32,
    },

    #[error("No free block at order {order} or above (requested {requested} bytes)")]
    #[diagnostic(code(memory::exhausted))]
    Exhausted { requested: Size, order: u32 },
}

impl MemoryError {
    /// True for the failures a benchmark run counts rather than aborts on
    pub fn is_allocation_failure(&self) -> bool {
        !matches!(
            self,
            MemoryError::InvalidPoolSize { .. } | MemoryError::PoolAllocationFailed { .. }
        )
    }
}

/// Allocation strategy selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllocatorKind {
    /// McKusick-Karels segregated size classes
    Segregated,
    /// Binary buddy system
    Buddy,
}

impl AllocatorKind {
    /// Both strategies, in reporting order
    pub const ALL: [AllocatorKind; 2] = [AllocatorKind::Segregated, AllocatorKind::Buddy];

    /// Long display name
    pub fn name(self) -> &'static str {
        match self {
            AllocatorKind::Segregated => "McKusick-Karels",
            AllocatorKind::Buddy => "Power-of-2 (Buddy System)",
        }
    }

    /// Short name used in tables and CSV rows
    pub fn short_name(self) -> &'static str {
        match self {
            AllocatorKind::Segregated => "McKusick-Karels",
            AllocatorKind::Buddy => "Power-of-2 (Buddy)",
        }
    }
}

impl std::fmt::Display for AllocatorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Engine-specific part of a status report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum EngineDetail {
    /// Number of size classes built at creation
    SizeClasses(usize),
    /// Largest buddy order (pool size = 2^max_order)
    MaxOrder(u32),
}

impl EngineDetail {
    /// The raw class-or-order count
    pub fn count(&self) -> usize {
        match self {
            EngineDetail::SizeClasses(n) => *n,
            EngineDetail::MaxOrder(n) => *n as usize,
        }
    }
}

impl std::fmt::Display for EngineDetail {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            EngineDetail::SizeClasses(n) => write!(f, "Number of Size Classes: {}", n),
            EngineDetail::MaxOrder(n) => write!(f, "Max Order: {}", n),
        }
    }
}

/// Allocator status snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocatorStatus {
    pub algorithm: AllocatorKind,
    pub total_size: Size,
    pub used_size: Size,
    pub free_size: Size,
    pub utilization_percent: f64,
    pub detail: EngineDetail,
}

impl AllocatorStatus {
    pub fn new(
        algorithm: AllocatorKind,
        total_size: Size,
        used_size: Size,
        detail: EngineDetail,
    ) -> Self {
        let utilization_percent = if total_size == 0 {
            0.0
        } else {
            used_size as f64 / total_size as f64 * 100.0
        };
        Self {
            algorithm,
            total_size,
            used_size,
            free_size: total_size.saturating_sub(used_size),
            utilization_percent,
            detail,
        }
    }

    pub fn memory_pressure(&self) -> MemoryPressure {
        if self.utilization_percent >= PRESSURE_CRITICAL_PERCENT {
            MemoryPressure::Critical
        } else if self.utilization_percent >= PRESSURE_HIGH_PERCENT {
            MemoryPressure::High
        } else if self.utilization_percent >= PRESSURE_MEDIUM_PERCENT {
            MemoryPressure::Medium
        } else {
            MemoryPressure::Low
        }
    }
}

impl std::fmt::Display for AllocatorStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        writeln!(f, "=== Memory Status ===")?;
        writeln!(f, "Algorithm: {}", self.algorithm)?;
        writeln!(f, "Total Size: {} bytes", self.total_size)?;
        writeln!(f, "Used Size: {} bytes", self.used_size)?;
        writeln!(f, "Free Size: {} bytes", self.free_size)?;
        writeln!(f, "Utilization: {:.2}%", self.utilization_percent)?;
        writeln!(f, "{}", self.detail)?;
        write!(f, "====================")
    }
}

/// Memory pressure levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MemoryPressure {
    Low,
    Medium,
    High,
    Critical,
}

impl std::fmt::Display for MemoryPressure {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            MemoryPressure::Low => write!(f, "LOW"),
            MemoryPressure::Medium => write!(f, "MEDIUM"),
            MemoryPressure::High => write!(f, "HIGH"),
            MemoryPressure::Critical => write!(f, "CRITICAL"),
        }
    }
}
