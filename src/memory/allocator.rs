/*!
 * Allocator Facade
 * One create/destroy/allocate/free/status contract over both engines
 */

use super::buddy::BuddyAllocator;
use super::segregated::SegregatedAllocator;
use super::traits::PoolAllocator;
use super::types::{AllocatorKind, AllocatorStatus, MemoryError, MemoryResult};
use crate::core::types::{Address, Size};
use tracing::{debug, info};

/// Tagged allocator: exactly one engine, owning its pool
#[derive(Debug)]
pub enum MemoryAllocator {
    Segregated(SegregatedAllocator),
    Buddy(BuddyAllocator),
}

impl MemoryAllocator {
    /// Construct the chosen engine over a fresh pool
    ///
    /// On failure nothing is retained: every partially built resource is an
    /// owned value dropped on the way out.
    pub fn create(kind: AllocatorKind, total_size: Size) -> MemoryResult<Self> {
        let allocator = match kind {
            AllocatorKind::Segregated => Self::Segregated(SegregatedAllocator::new(total_size)?),
            AllocatorKind::Buddy => Self::Buddy(BuddyAllocator::new(total_size)?),
        };

        info!(
            algorithm = %kind,
            requested = total_size,
            pool = allocator.total_size(),
            "Allocator created"
        );
        Ok(allocator)
    }

    /// Release the pool and all bookkeeping
    pub fn destroy(self) {
        debug!(algorithm = %self.kind(), used = self.used_size(), "Allocator destroyed");
        drop(self);
    }

    pub fn kind(&self) -> AllocatorKind {
        match self {
            Self::Segregated(_) => AllocatorKind::Segregated,
            Self::Buddy(_) => AllocatorKind::Buddy,
        }
    }

    pub fn name(&self) -> &'static str {
        self.kind().name()
    }

    /// Managed pool size (rounded for the buddy engine)
    pub fn total_size(&self) -> Size {
        match self {
            Self::Segregated(mk) => mk.total_size(),
            Self::Buddy(p2) => p2.total_size(),
        }
    }

    pub fn used_size(&self) -> Size {
        match self {
            Self::Segregated(mk) => mk.used_size(),
            Self::Buddy(p2) => p2.used_size(),
        }
    }

    pub fn as_segregated(&self) -> Option<&SegregatedAllocator> {
        match self {
            Self::Segregated(mk) => Some(mk),
            Self::Buddy(_) => None,
        }
    }

    pub fn as_buddy(&self) -> Option<&BuddyAllocator> {
        match self {
            Self::Buddy(p2) => Some(p2),
            Self::Segregated(_) => None,
        }
    }

    /// Mutable caller view of an allocated block's bytes
    pub fn data_mut(&mut self, address: Address, len: Size) -> Option<&mut [u8]> {
        match self {
            Self::Segregated(mk) => mk.data_mut(address, len),
            Self::Buddy(p2) => p2.data_mut(address, len),
        }
    }

    /// Caller view of an allocated block's bytes
    pub fn data(&self, address: Address, len: Size) -> Option<&[u8]> {
        match self {
            Self::Segregated(mk) => mk.data(address, len),
            Self::Buddy(p2) => p2.data(address, len),
        }
    }
}

impl PoolAllocator for MemoryAllocator {
    fn allocate(&mut self, size: Size) -> MemoryResult<Address> {
        if size == 0 {
            return Err(MemoryError::ZeroSize);
        }
        match self {
            Self::Segregated(mk) => mk.allocate(size),
            Self::Buddy(p2) => p2.allocate(size),
        }
    }

    fn free(&mut self, address: Address, size: Size) {
        match self {
            Self::Segregated(mk) => mk.free(address, size),
            Self::Buddy(p2) => p2.free(address, size),
        }
    }

    fn status(&self) -> AllocatorStatus {
        match self {
            Self::Segregated(mk) => mk.status(),
            Self::Buddy(p2) => p2.status(),
        }
    }

    fn allocated_size(&self, size: Size) -> Option<Size> {
        match self {
            Self::Segregated(mk) => mk.allocated_size(size),
            Self::Buddy(p2) => p2.allocated_size(size),
        }
    }
}
