/*!
 * Buddy Free Lists
 * One intrusive singly linked list per order, links stored in block headers
 */

use super::super::pool::Pool;
use super::header::BlockHeader;
use crate::core::types::{Address, Size};

#[derive(Debug)]
pub(super) struct OrderFreeLists {
    heads: Vec<Option<Address>>,
    /// Upper bound on list length; stops walks over a corrupted list
    walk_limit: usize,
}

impl OrderFreeLists {
    pub fn new(max_order: u32, walk_limit: usize) -> Self {
        Self {
            heads: vec![None; max_order as usize + 1],
            walk_limit,
        }
    }

    #[inline]
    pub fn is_empty(&self, order: u32) -> bool {
        self.heads
            .get(order as usize)
            .map_or(true, |head| head.is_none())
    }

    /// Push `block` as the new head; the header's order and flag are left as is
    pub fn push(&mut self, pool: &mut Pool, order: u32, block: Address) {
        let head = &mut self.heads[order as usize];
        if BlockHeader::set_next(pool, block, *head) {
            *head = Some(block);
        }
    }

    pub fn pop(&mut self, pool: &Pool, order: u32) -> Option<Address> {
        let head = self.heads.get_mut(order as usize)?;
        let block = (*head)?;
        *head = BlockHeader::read(pool, block).and_then(|header| header.next);
        Some(block)
    }

    /// Unlink `target` from the list for `order`; false if it was not there
    pub fn remove(&mut self, pool: &mut Pool, order: u32, target: Address) -> bool {
        let Some(head) = self.heads.get(order as usize).copied().flatten() else {
            return false;
        };

        if head == target {
            self.heads[order as usize] = BlockHeader::read(pool, target).and_then(|h| h.next);
            return true;
        }

        let mut prev = head;
        for _ in 0..self.walk_limit {
            let Some(next) = BlockHeader::read(pool, prev).and_then(|h| h.next) else {
                return false;
            };
            if next == target {
                let after = BlockHeader::read(pool, target).and_then(|h| h.next);
                return BlockHeader::set_next(pool, prev, after);
            }
            prev = next;
        }
        false
    }

    /// Blocks on the list for `order`, head first
    pub fn blocks(&self, pool: &Pool, order: u32) -> Vec<Address> {
        let mut blocks = Vec::new();
        let mut cursor = self.heads.get(order as usize).copied().flatten();
        while let Some(block) = cursor {
            if blocks.len() >= self.walk_limit {
                break;
            }
            blocks.push(block);
            cursor = BlockHeader::read(pool, block).and_then(|h| h.next);
        }
        blocks
    }

    /// Bytes held across all lists
    pub fn free_bytes(&self, pool: &Pool) -> Size {
        (0..self.heads.len() as u32)
            .map(|order| self.blocks(pool, order).len() << order)
            .sum()
    }
}
