/*!
 * Memory Module
 * Fixed-pool allocation engines behind one facade
 *
 * - **Segregated** (McKusick-Karels): power-of-2 size classes carved at
 *   creation, one free list per class, no splitting or merging
 * - **Buddy** (Power-of-2): binary splitting on allocation, XOR-buddy
 *   coalescing on free
 *
 * Both engines hand out byte offsets into a pool they own exclusively and
 * keep their free lists inside the pool bytes.
 */

pub mod allocator;
pub mod buddy;
pub mod pool;
pub mod segregated;
pub mod traits;
pub mod types;

// Re-export for convenience
pub use allocator::MemoryAllocator;
pub use buddy::BuddyAllocator;
pub use pool::Pool;
pub use segregated::SegregatedAllocator;
pub use traits::*;
pub use types::*;
