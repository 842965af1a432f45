/*!
 * Memory Traits
 * Allocator abstractions shared by both engines and the facade
 */

use super::types::*;
use crate::core::types::{Address, Size};

/// Fixed-pool allocator interface
pub trait PoolAllocator {
    /// Allocate `size` bytes, returning the block's offset in the pool
    fn allocate(&mut self, size: Size) -> MemoryResult<Address>;

    /// Return a block; invalid targets are ignored
    ///
    /// `size` must be the size originally requested. The buddy engine
    /// ignores it, the segregated engine uses it to find the class.
    fn free(&mut self, address: Address, size: Size);

    /// Snapshot of pool usage
    fn status(&self) -> AllocatorStatus;

    /// Bytes the engine reserves for a request of `size`, if it could serve it
    fn allocated_size(&self, size: Size) -> Option<Size>;

    /// Get memory pressure level
    fn pressure(&self) -> MemoryPressure {
        self.status().memory_pressure()
    }
}
