/*!
 * Buddy Block Header
 * 16-byte in-place header at the start of every block
 *
 * Layout: `order: u32 | flags: u32 | next: u64`. The `next` link is only
 * meaningful while the block sits on a free list.
 */

use super::super::pool::Pool;
use crate::core::limits::BUDDY_HEADER_SIZE;
use crate::core::types::Address;

const ORDER_OFFSET: usize = 0;
const FLAGS_OFFSET: usize = 4;
const NEXT_OFFSET: usize = 8;

const FLAG_FREE: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct BlockHeader {
    pub order: u32,
    pub is_free: bool,
    pub next: Option<Address>,
}

impl BlockHeader {
    #[inline]
    pub fn free(order: u32) -> Self {
        Self {
            order,
            is_free: true,
            next: None,
        }
    }

    /// Decode the header at `block`; `None` if it would cross the pool end
    #[inline]
    pub fn read(pool: &Pool, block: Address) -> Option<Self> {
        let order = pool.read_u32(block.checked_add(ORDER_OFFSET)?)?;
        let flags = pool.read_u32(block.checked_add(FLAGS_OFFSET)?)?;
        // Read the raw word first so an out-of-pool slot is not mistaken for NIL
        pool.read_u64(block.checked_add(NEXT_OFFSET)?)?;
        let next = pool.read_link(block + NEXT_OFFSET);
        Some(Self {
            order,
            is_free: flags & FLAG_FREE != 0,
            next,
        })
    }

    #[inline]
    pub fn write(&self, pool: &mut Pool, block: Address) -> bool {
        if !pool.contains(block, BUDDY_HEADER_SIZE) {
            return false;
        }
        let flags = if self.is_free { FLAG_FREE } else { 0 };
        pool.write_u32(block + ORDER_OFFSET, self.order)
            && pool.write_u32(block + FLAGS_OFFSET, flags)
            && pool.write_link(block + NEXT_OFFSET, self.next)
    }

    /// Rewrite only the free-list link
    #[inline]
    pub fn set_next(pool: &mut Pool, block: Address, next: Option<Address>) -> bool {
        match block.checked_add(NEXT_OFFSET) {
            Some(slot) => pool.write_link(slot, next),
            None => false,
        }
    }
}
