/*!
 * Pool Buffer
 * Fixed-size byte arena owned by exactly one engine
 *
 * Free-list links and buddy headers live inside the pool bytes themselves.
 * Every access to those in-band words goes through the bounds-checked
 * accessors below, so a bad offset yields `None`/`false` instead of touching
 * memory outside the buffer.
 */

use super::types::{MemoryError, MemoryResult};
use crate::core::limits::NIL_LINK;
use crate::core::types::{Address, Size};

/// Contiguous, never-resized pool buffer
#[derive(Debug)]
pub struct Pool {
    bytes: Box<[u8]>,
}

impl Pool {
    /// Reserve a zeroed pool of `size` bytes
    ///
    /// Uses a fallible reservation so an oversized pool is reported as
    /// `PoolAllocationFailed` rather than aborting the process.
    pub fn new(size: Size) -> MemoryResult<Self> {
        let mut bytes = Vec::new();
        bytes
            .try_reserve_exact(size)
            .map_err(|_| MemoryError::PoolAllocationFailed { size })?;
        bytes.resize(size, 0);
        Ok(Self {
            bytes: bytes.into_boxed_slice(),
        })
    }

    #[inline]
    pub fn len(&self) -> Size {
        self.bytes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// True if `[offset, offset + len)` lies inside the pool
    #[inline]
    pub fn contains(&self, offset: Address, len: Size) -> bool {
        offset
            .checked_add(len)
            .map_or(false, |end| end <= self.bytes.len())
    }

    #[inline]
    pub fn read_u32(&self, offset: Address) -> Option<u32> {
        let raw = self.bytes.get(offset..offset.checked_add(4)?)?;
        Some(u32::from_ne_bytes(raw.try_into().ok()?))
    }

    #[inline]
    pub fn write_u32(&mut self, offset: Address, value: u32) -> bool {
        match offset
            .checked_add(4)
            .and_then(|end| self.bytes.get_mut(offset..end))
        {
            Some(slot) => {
                slot.copy_from_slice(&value.to_ne_bytes());
                true
            }
            None => false,
        }
    }

    #[inline]
    pub fn read_u64(&self, offset: Address) -> Option<u64> {
        let raw = self.bytes.get(offset..offset.checked_add(8)?)?;
        Some(u64::from_ne_bytes(raw.try_into().ok()?))
    }

    #[inline]
    pub fn write_u64(&mut self, offset: Address, value: u64) -> bool {
        match offset
            .checked_add(8)
            .and_then(|end| self.bytes.get_mut(offset..end))
        {
            Some(slot) => {
                slot.copy_from_slice(&value.to_ne_bytes());
                true
            }
            None => false,
        }
    }

    /// Read an in-band free-list link
    ///
    /// `None` means end of list, or a link slot outside the pool.
    #[inline]
    pub fn read_link(&self, offset: Address) -> Option<Address> {
        match self.read_u64(offset)? {
            NIL_LINK => None,
            next => Address::try_from(next).ok(),
        }
    }

    /// Write an in-band free-list link; false if the slot is outside the pool
    #[inline]
    pub fn write_link(&mut self, offset: Address, next: Option<Address>) -> bool {
        self.write_u64(offset, next.map_or(NIL_LINK, |addr| addr as u64))
    }

    /// Caller view of `len` bytes at `offset`
    pub fn bytes(&self, offset: Address, len: Size) -> Option<&[u8]> {
        self.bytes.get(offset..offset.checked_add(len)?)
    }

    /// Mutable caller view of `len` bytes at `offset`
    pub fn bytes_mut(&mut self, offset: Address, len: Size) -> Option<&mut [u8]> {
        self.bytes.get_mut(offset..offset.checked_add(len)?)
    }
}
