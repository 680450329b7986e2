//! Raw access to a table's byte buffer.

use core::cell::Cell;
use core::sync::atomic::AtomicU8;

use bit_store::{ByteCell, StoreError};

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use crate::TableError;

/// Bytes returned by [`BitTable::data`](crate::BitTable::data).
///
/// The aliased variants expose the table's live buffer: writes through them
/// change the stored bits and later lookups see them. [`RawData::Copied`]
/// owns an independent copy. No variant holds a lock.
#[derive(Debug)]
pub enum RawData<'a> {
    /// Live buffer of a plain table.
    Aliased(&'a [Cell<u8>]),

    /// Live buffer of a thread-safe table. Every byte access is atomic.
    Shared(&'a [AtomicU8]),

    /// Snapshot taken at the time of the call.
    Copied(Vec<u8>),
}

impl RawData<'_> {
    pub fn len(&self) -> usize {
        match self {
            RawData::Aliased(cells) => cells.len(),
            RawData::Shared(cells) => cells.len(),
            RawData::Copied(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_copy(&self) -> bool {
        matches!(self, RawData::Copied(_))
    }

    /// Byte at `index`, or `None` past the end.
    pub fn get(&self, index: usize) -> Option<u8> {
        match self {
            RawData::Aliased(cells) => cells.get(index).map(ByteCell::load),
            RawData::Shared(cells) => cells.get(index).map(ByteCell::load),
            RawData::Copied(v) => v.get(index).copied(),
        }
    }

    /// Overwrites the byte at `index`.
    pub fn set(&mut self, index: usize, value: u8) -> Result<(), TableError> {
        let len = self.len();
        let out_of_bounds = || TableError::from(StoreError::ByteOutOfBounds(index, len));
        match self {
            RawData::Aliased(cells) => cells.get(index).ok_or_else(out_of_bounds)?.store(value),
            RawData::Shared(cells) => {
                ByteCell::store(cells.get(index).ok_or_else(out_of_bounds)?, value)
            }
            RawData::Copied(v) => *v.get_mut(index).ok_or_else(out_of_bounds)? = value,
        }
        Ok(())
    }

    /// Overwrites every byte.
    pub fn fill(&mut self, value: u8) {
        match self {
            RawData::Aliased(cells) => cells.iter().for_each(|c| c.store(value)),
            RawData::Shared(cells) => cells.iter().for_each(|c| ByteCell::store(c, value)),
            RawData::Copied(v) => v.fill(value),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        (0..self.len()).filter_map(move |i| self.get(i))
    }

    pub fn to_vec(&self) -> Vec<u8> {
        self.iter().collect()
    }

    /// Converts into an owned buffer, copying if the data is aliased.
    pub fn into_vec(self) -> Vec<u8> {
        match self {
            RawData::Copied(v) => v,
            other => other.to_vec(),
        }
    }
}
