/*!
 * Buddy Allocator (Power-of-2)
 *
 * The pool is rounded up to a power of two and managed as a binary tree of
 * blocks. Every block, free or allocated, starts with a 16-byte header
 * holding its order; free blocks are chained per order through the header.
 *
 * ## Behavior
 *
 * - **Allocation**: `size + header` rounded up to `2^order`; the smallest free
 *   block at or above `order` is split in halves until it fits
 * - **Free**: the header before the address gives the order; the block then
 *   merges with its buddy (`offset XOR 2^order`) while the buddy is free and
 *   of the same order
 * - **Guards**: out-of-pool addresses and already-free blocks are ignored
 */

mod free_list;
mod header;

use super::pool::Pool;
use super::traits::PoolAllocator;
use super::types::{AllocatorKind, AllocatorStatus, EngineDetail, MemoryError, MemoryResult};
use crate::core::limits::BUDDY_HEADER_SIZE;
use crate::core::types::{Address, Size};
use free_list::OrderFreeLists;
use header::BlockHeader;
use tracing::{debug, trace, warn};

/// Binary buddy allocator over one power-of-2 pool
#[derive(Debug)]
pub struct BuddyAllocator {
    pool: Pool,
    free_lists: OrderFreeLists,
    used_size: Size,
    max_order: u32,
}

impl BuddyAllocator {
    /// Round `total_size` up to a power of two and seed one free block
    pub fn new(total_size: Size) -> MemoryResult<Self> {
        if total_size == 0 {
            return Err(MemoryError::InvalidPoolSize {
                size: total_size,
                reason: "pool must not be empty",
            });
        }
        let rounded = total_size
            .checked_next_power_of_two()
            .ok_or(MemoryError::InvalidPoolSize {
                size: total_size,
                reason: "rounding to a power of two overflows",
            })?;
        if rounded < BUDDY_HEADER_SIZE {
            return Err(MemoryError::InvalidPoolSize {
                size: total_size,
                reason: "pool cannot hold a block header",
            });
        }

        let max_order = rounded.trailing_zeros();
        let mut pool = Pool::new(rounded)?;
        let mut free_lists = OrderFreeLists::new(max_order, rounded / BUDDY_HEADER_SIZE + 1);

        BlockHeader::free(max_order).write(&mut pool, 0);
        free_lists.push(&mut pool, max_order, 0);

        debug!(total_size, rounded, max_order, "Buddy allocator initialized");

        Ok(Self {
            pool,
            free_lists,
            used_size: 0,
            max_order,
        })
    }

    pub fn max_order(&self) -> u32 {
        self.max_order
    }

    pub fn used_size(&self) -> Size {
        self.used_size
    }

    /// Rounded pool size (`2^max_order`)
    pub fn total_size(&self) -> Size {
        self.pool.len()
    }

    /// Number of free blocks of `order`
    pub fn free_list_len(&self, order: u32) -> usize {
        self.free_lists.blocks(&self.pool, order).len()
    }

    /// Block offsets (header positions) free at `order`, head first
    pub fn free_blocks(&self, order: u32) -> Vec<Address> {
        self.free_lists.blocks(&self.pool, order)
    }

    /// Bytes held on all free lists
    pub fn free_bytes(&self) -> Size {
        self.free_lists.free_bytes(&self.pool)
    }

    /// Order of the block serving `address`, if its header is readable
    pub fn block_order(&self, address: Address) -> Option<u32> {
        let block = address.checked_sub(BUDDY_HEADER_SIZE)?;
        BlockHeader::read(&self.pool, block).map(|header| header.order)
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

        let order = required_order(size);
        if order > self.max_order {
            return Err(MemoryError::OrderTooLarge {
                requested: size,
                order,
                max_order: self.max_order,
            });
        }

        let mut current = (order..=self.max_order)
            .find(|&candidate| !self.free_lists.is_empty(candidate))
            .ok_or(MemoryError::Exhausted {
                requested: size,
                order,
            })?;

        while current > order {
            let block = self
                .free_lists
                .pop(&self.pool, current)
                .ok_or(MemoryError::Exhausted {
                    requested: size,
                    order,
                })?;
            current -= 1;
            let upper = block + (1usize << current);

            BlockHeader::free(current).write(&mut self.pool, upper);
            BlockHeader::free(current).write(&mut self.pool, block);
            // Lower half ends up at the head so the next split reuses it
            self.free_lists.push(&mut self.pool, current, upper);
            self.free_lists.push(&mut self.pool, current, block);

            trace!(block, upper, order = current, "Buddy split");
        }

        let block = self
            .free_lists
            .pop(&self.pool, order)
            .ok_or(MemoryError::Exhausted {
                requested: size,
                order,
            })?;
        BlockHeader {
            order,
            is_free: false,
            next: None,
        }
        .write(&mut self.pool, block);
        self.used_size += 1usize << order;

        trace!(size, order, block, "Buddy allocate");
        Ok(block + BUDDY_HEADER_SIZE)
    }

    /// Return the block behind `address`, coalescing upward
    ///
    /// `_size` is not needed: the order is recovered from the header.
    pub fn free(&mut self, address: Address, _size: Size) {
        let total = self.pool.len();
        if address < BUDDY_HEADER_SIZE || address >= total {
            warn!(address, total, "Buddy free: address outside pool, ignoring");
            return;
        }

        let mut block = address - BUDDY_HEADER_SIZE;
        let Some(header) = BlockHeader::read(&self.pool, block) else {
            warn!(address, "Buddy free: header outside pool, ignoring");
            return;
        };
        if header.is_free {
            debug!(address, "Buddy free: block already free, ignoring");
            return;
        }
        // Served blocks are at least the smallest request order and start on
        // a multiple of their own size
        if header.order < required_order(1)
            || header.order > self.max_order
            || block & ((1usize << header.order) - 1) != 0
        {
            warn!(address, order = header.order, "Buddy free: not a served block, ignoring");
            return;
        }

        let mut order = header.order;
        BlockHeader::free(order).write(&mut self.pool, block);
        self.used_size = self.used_size.saturating_sub(1usize << order);

        while order < self.max_order {
            let buddy = block ^ (1usize << order);
            if buddy >= total {
                break;
            }
            match BlockHeader::read(&self.pool, buddy) {
                Some(buddy_header) if buddy_header.is_free && buddy_header.order == order => {}
                _ => break,
            }
            if !self.free_lists.remove(&mut self.pool, order, buddy) {
                warn!(buddy, order, "Buddy free: free buddy missing from its list");
                break;
            }

            block = block.min(buddy);
            order += 1;
            BlockHeader::free(order).write(&mut self.pool, block);

            trace!(block, order, "Buddy coalesce");
        }

        self.free_lists.push(&mut self.pool, order, block);
        trace!(address, block, order, "Buddy free");
    }

    pub fn status(&self) -> AllocatorStatus {
        AllocatorStatus::new(
            AllocatorKind::Buddy,
            self.pool.len(),
            self.used_size,
            EngineDetail::MaxOrder(self.max_order),
        )
    }

    /// Block size (`2^order`) that would serve `size`
    pub fn allocated_size(&self, size: Size) -> Option<Size> {
        if size == 0 {
            return None;
        }
        let order = required_order(size);
        (order <= self.max_order).then(|| 1usize << order)
    }
}

/// Order of the smallest block holding `size` bytes plus the header
///
/// Saturates to `usize::BITS` when the rounded size is not representable.
fn required_order(size: Size) -> u32 {
    size.checked_add(BUDDY_HEADER_SIZE)
        .and_then(Size::checked_next_power_of_two)
        .map_or(usize::BITS, Size::trailing_zeros)
}

impl PoolAllocator for BuddyAllocator {
    fn allocate(&mut self, size: Size) -> MemoryResult<Address> {
        BuddyAllocator::allocate(self, size)
    }

    fn free(&mut self, address: Address, size: Size) {
        BuddyAllocator::free(self, address, size)
    }

    fn status(&self) -> AllocatorStatus {
        BuddyAllocator::status(self)
    }

    fn allocated_size(&self, size: Size) -> Option<Size> {
        BuddyAllocator::allocated_size(self, size)
    }
}
