/*!
 * Segregated Size-Class Allocator (McKusick-Karels)
 *
 * The pool is carved once, at creation, into fixed-size blocks for each
 * power-of-2 size class. Every class keeps a singly linked free list threaded
 * through the first 8 bytes of its free blocks.
 *
 * ## Behavior
 *
 * - **Allocation**: first class whose size covers the request; pop its list head
 * - **No fallback**: an exhausted class fails even if larger classes have room
 * - **Free**: the caller's size re-derives the class; the block is pushed back
 * - **No splitting or coalescing**: class assignment is permanent
 */

mod size_class;

use super::pool::Pool;
use super::traits::PoolAllocator;
use super::types::{AllocatorKind, AllocatorStatus, EngineDetail, MemoryError, MemoryResult};
use crate::core::types::{Address, Size};
use size_class::SizeClassTable;
use tracing::{debug, trace, warn};

/// Segregated free-list allocator over one fixed pool
#[derive(Debug)]
pub struct SegregatedAllocator {
    pool: Pool,
    classes: SizeClassTable,
    free_lists: Vec<Option<Address>>,
    carved: Vec<usize>,
    used_size: Size,
}

impl SegregatedAllocator {
    /// Build the class table and carve the pool
    pub fn new(total_size: Size) -> MemoryResult<Self> {
        if total_size == 0 {
            return Err(MemoryError::InvalidPoolSize {
                size: total_size,
                reason: "pool must not be empty",
            });
        }

        let mut pool = Pool::new(total_size)?;
        let classes = SizeClassTable::build(total_size);
        let plan = classes.carve(total_size);

        let mut free_lists = vec![None; classes.len()];
        let mut carved = Vec::with_capacity(classes.len());
        for (class_idx, blocks) in plan.iter().enumerate() {
            for &offset in blocks {
                // Carved blocks lie inside the pool, so the link write lands
                pool.write_link(offset, free_lists[class_idx]);
                free_lists[class_idx] = Some(offset);
            }
            carved.push(blocks.len());
        }

        debug!(
            total_size,
            classes = classes.len(),
            largest_class = classes.largest(),
            carved_blocks = carved.iter().sum::<usize>(),
            "Segregated allocator carved"
        );

        Ok(Self {
            pool,
            classes,
            free_lists,
            carved,
            used_size: 0,
        })
    }

    /// Class sizes in increasing order
    pub fn class_sizes(&self) -> &[Size] {
        self.classes.sizes()
    }

    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    /// Blocks carved for a class at creation
    pub fn carved_blocks(&self, class_idx: usize) -> usize {
        self.carved.get(class_idx).copied().unwrap_or(0)
    }

    /// Offsets currently on a class's free list, head first
    pub fn free_blocks(&self, class_idx: usize) -> Vec<Address> {
        let mut blocks = Vec::new();
        let mut cursor = self.free_lists.get(class_idx).copied().flatten();
        // A repeated free can make the list cyclic; never walk more nodes
        // than the pool could hold
        let limit = self.pool.len() / self.classes.sizes().first().copied().unwrap_or(1) + 1;
        while let Some(offset) = cursor {
            if blocks.len() >= limit {
                break;
            }
            blocks.push(offset);
            cursor = self.pool.read_link(offset);
        }
        blocks
    }

    pub fn used_size(&self) -> Size {
        self.used_size
    }

    pub fn total_size(&self) -> Size {
        self.pool.len()
    }

    /// Caller view of an allocated block's bytes
    pub fn data(&self, address: Address, len: Size) -> Option<&[u8]> {
        self.pool.bytes(address, len)
    }

    /// Mutable caller view of an allocated block's bytes
    pub fn data_mut(&mut self, address: Address, len: Size) -> Option<&mut [u8]> {
        self.pool.bytes_mut(address, len)
    }

    pub fn allocate(&mut self, size: Size) -> MemoryResult<Address> {
        if size == 0 {
            return Err(MemoryError::ZeroSize);
        }

        let class_idx = self
            .classes
            .class_index(size)
            .ok_or(MemoryError::ExceedsLargestClass {
                requested: size,
                largest: self.classes.largest(),
            })?;
        let class_size = self.classes.size(class_idx);

        let block = self.free_lists[class_idx].ok_or(MemoryError::ClassExhausted {
            requested: size,
            class_size,
        })?;

        self.free_lists[class_idx] = self.pool.read_link(block);
        self.used_size += class_size;

        trace!(size, class_size, address = block, "Segregated allocate");
        Ok(block)
    }

    /// Return a block to the class derived from `size`
    ///
    /// The size is trusted: a block freed with the wrong size joins the wrong
    /// class. Only a link slot outside the pool is rejected.
    pub fn free(&mut self, address: Address, size: Size) {
        let Some(class_idx) = self.classes.class_index(size) else {
            debug!(address, size, "Segregated free: no class for size, ignoring");
            return;
        };
        let class_size = self.classes.size(class_idx);

        if !self.pool.write_link(address, self.free_lists[class_idx]) {
            warn!(address, size, "Segregated free: address outside pool, ignoring");
            return;
        }
        self.free_lists[class_idx] = Some(address);
        self.used_size = self.used_size.saturating_sub(class_size);

        trace!(size, class_size, address, "Segregated free");
    }

    pub fn status(&self) -> AllocatorStatus {
        AllocatorStatus::new(
            AllocatorKind::Segregated,
            self.pool.len(),
            self.used_size,
            EngineDetail::SizeClasses(self.classes.len()),
        )
    }

    /// Class size that would serve `size`
    pub fn allocated_size(&self, size: Size) -> Option<Size> {
        if size == 0 {
            return None;
        }
        self.classes
            .class_index(size)
            .map(|class_idx| self.classes.size(class_idx))
    }
}

impl PoolAllocator for SegregatedAllocator {
    fn allocate(&mut self, size: Size) -> MemoryResult<Address> {
        SegregatedAllocator::allocate(self, size)
    }

    fn free(&mut self, address: Address, size: Size) {
        SegregatedAllocator::free(self, address, size)
    }

    fn status(&self) -> AllocatorStatus {
        SegregatedAllocator::status(self)
    }

    fn allocated_size(&self, size: Size) -> Option<Size> {
        SegregatedAllocator::allocated_size(self, size)
    }
}
