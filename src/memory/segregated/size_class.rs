/*!
 * Size Class Table
 * Power-of-2 class geometry and initial carving plan
 */

use crate::core::limits::{
    BLOCK_ALIGNMENT, CLASS_CARVE_DIVISOR, LINK_SIZE, MAX_BLOCKS_PER_CLASS, MAX_CLASS_SHIFT,
    MAX_SIZE_CLASSES, MIN_CLASS_SIZE,
};
use crate::core::types::{Address, Size};

/// Ordered class sizes: 16, 32, 64, ... up to `total_size / 2`
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct SizeClassTable {
    sizes: Vec<Size>,
}

impl SizeClassTable {
    pub fn build(total_size: Size) -> Self {
        let max_class = total_size / 2;
        let mut sizes = Vec::with_capacity(MAX_SIZE_CLASSES);

        for shift in 0..MAX_SIZE_CLASSES.min(MAX_CLASS_SHIFT) {
            let class = match 1usize
                .checked_shl(shift as u32)
                .and_then(|factor| MIN_CLASS_SIZE.checked_mul(factor))
            {
                Some(class) if class <= max_class => class,
                _ => break,
            };
            sizes.push(class);
        }

        Self { sizes }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    #[inline]
    pub fn sizes(&self) -> &[Size] {
        &self.sizes
    }

    #[inline]
    pub fn size(&self, index: usize) -> Size {
        self.sizes[index]
    }

    pub fn largest(&self) -> Size {
        self.sizes.last().copied().unwrap_or(0)
    }

    /// First class whose size is at least `size`
    #[inline]
    pub fn class_index(&self, size: Size) -> Option<usize> {
        self.sizes.iter().position(|&class| class >= size)
    }

    /// Offsets carved for each class, in carving order
    ///
    /// Classes are laid out one after another from offset 0. Each class gets
    /// `(total_size / 10) / class_size` blocks clamped to `[1, 100]`, every
    /// block starting on a pointer-aligned offset. Carving stops once the next
    /// block would run past the pool.
    pub fn carve(&self, total_size: Size) -> Vec<Vec<Address>> {
        let mut plan = vec![Vec::new(); self.sizes.len()];
        let mut offset: Address = 0;

        for (class_idx, &block_size) in self.sizes.iter().enumerate() {
            if offset >= total_size {
                break;
            }
            if block_size < LINK_SIZE {
                continue;
            }

            let count = ((total_size / CLASS_CARVE_DIVISOR) / block_size)
                .clamp(1, MAX_BLOCKS_PER_CLASS);

            for _ in 0..count {
                let aligned = align_up(offset, BLOCK_ALIGNMENT);
                match aligned.checked_add(block_size) {
                    Some(end) if end <= total_size => {
                        plan[class_idx].push(aligned);
                        offset = end;
                    }
                    _ => break,
                }
            }
        }

        plan
    }
}

#[inline]
fn align_up(offset: Address, alignment: usize) -> Address {
    (offset + alignment - 1) & !(alignment - 1)
}
