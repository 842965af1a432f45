/*!
 * Core Types
 * Common types used across the allocators and the harness
 */

/// Byte offset into an allocator's pool
///
/// Allocators hand out offsets rather than raw pointers; offset `0` is the
/// first byte of the pool and is a valid address for the segregated engine.
pub type Address = usize;

/// Size type for memory operations
pub type Size = usize;
