//! Plain, unsynchronised bitmap table.
//!
//! # Examples
//!
//! ```rust
//! use bitmaptable::Bitmaptable;
//!
//! let table = Bitmaptable::new(1000, 12).expect("failed to create table");
//! table.set(5, 11, true).unwrap();
//! assert!(table.get(5, 11).unwrap());
//! assert!(table.get(1000, 0).is_err());
//! ```
use bit_store::LocalStore;

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use crate::{RawData, Shape, TableError};

type Result<T> = core::result::Result<T, TableError>;

/// A fixed number of rows, each with a fixed number of one-bit columns,
/// packed into one byte buffer.
///
/// Writes go through `&self`, but the table is not `Sync`: it stays on one
/// thread. Use [`SyncBitmaptable`](crate::SyncBitmaptable) to share a table
/// between threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmaptable {
    shape: Shape,
    store: LocalStore,
}

impl Bitmaptable {
    /// Allocates a table of `rows * columns` bits, all unset.
    ///
    /// # Errors
    ///
    /// [`TableError::InvalidShape`] for degenerate dimensions and
    /// [`TableError::CapacityOverflow`] when the buffer cannot be addressed
    /// or allocated.
    pub fn new(rows: usize, columns: usize) -> Result<Self> {
        let shape = Shape::new(rows, columns)?;
        tracing::debug!(rows, columns, bytes = shape.byte_len(), "creating bitmap table");
        let store = LocalStore::new(shape.bits())
            .map_err(|_| TableError::CapacityOverflow { rows, columns })?;
        Ok(Self { shape, store })
    }

    /// Restores a table from a buffer previously obtained through
    /// [`Bitmaptable::data`] or [`Bitmaptable::into_bytes`].
    pub fn from_bytes(rows: usize, columns: usize, bytes: Vec<u8>) -> Result<Self> {
        let shape = Shape::new(rows, columns)?;
        let store = LocalStore::from_bytes(shape.bits(), bytes)?;
        Ok(Self { shape, store })
    }

    pub(crate) fn from_parts(shape: Shape, store: LocalStore) -> Self {
        Self { shape, store }
    }

    pub(crate) fn into_parts(self) -> (Shape, LocalStore) {
        (self.shape, self.store)
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn rows(&self) -> usize {
        self.shape.rows()
    }

    pub fn columns(&self) -> usize {
        self.shape.columns()
    }

    /// Reads cell `(row, column)`.
    ///
    /// # Errors
    ///
    /// [`TableError::IllegalIndex`] if `row >= rows` or `column >= columns`.
    pub fn get(&self, row: usize, column: usize) -> Result<bool> {
        let pos = self.shape.locate(row, column)?;
        Ok(self.store.get(pos)?)
    }

    /// Writes cell `(row, column)`. No other cell changes.
    ///
    /// # Errors
    ///
    /// [`TableError::IllegalIndex`] if `row >= rows` or `column >= columns`.
    pub fn set(&self, row: usize, column: usize, value: bool) -> Result<()> {
        let pos = self.shape.locate(row, column)?;
        self.store.set(pos, value)?;
        Ok(())
    }

    /// Raw buffer access: the live buffer when `copy` is false, an
    /// independent copy otherwise.
    pub fn data(&self, copy: bool) -> RawData<'_> {
        if copy {
            RawData::Copied(self.store.to_vec())
        } else {
            RawData::Aliased(self.store.cells())
        }
    }

    /// Number of set cells.
    pub fn count_ones(&self) -> usize {
        self.store.count_ones()
    }

    pub fn clear(&self) {
        self.store.clear();
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.store.into_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(not(feature = "std"))]
    use alloc::vec;

    #[test]
    fn configuration() {
        let bm = Bitmaptable::new(10, 5).unwrap();
        assert_eq!(bm.rows(), 10);
        assert_eq!(bm.columns(), 5);
        assert_eq!(bm.data(false).len(), 7);
    }

    #[test]
    fn data_aliases_or_copies() {
        let bm = Bitmaptable::new(10, 5).unwrap();

        let mut data = bm.data(false);
        assert!(!data.is_copy());
        data.set(1, 123).unwrap();
        assert_eq!(bm.data(true).get(1), Some(123));

        let mut copy = bm.data(true);
        assert!(copy.is_copy());
        assert_eq!(copy.get(1), Some(123));
        copy.set(1, 111).unwrap();
        assert_eq!(copy.get(1), Some(111));
        assert_eq!(data.get(1), Some(123));
        assert_eq!(bm.data(false).get(1), Some(123));
    }

    #[test]
    fn aliased_writes_are_visible_to_get() {
        let bm = Bitmaptable::new(50, 1).unwrap();
        bm.data(false).set(4, 0b1000_0000).unwrap();
        assert!(bm.get(39, 0).unwrap());
        assert!(!bm.get(38, 0).unwrap());
    }

    #[test]
    fn address_mapping() {
        let bm = Bitmaptable::new(50, 1).unwrap();
        bm.set(39, 0, true).unwrap();
        assert_eq!(bm.data(true).get(4), Some(0b1000_0000));
        assert_eq!(bm.count_ones(), 1);
    }

    #[test]
    fn get_set() {
        let b = Bitmaptable::new(1000, 12).unwrap();
        assert_eq!(
            b.set(1001, 0, true),
            Err(TableError::IllegalIndex { row: 1001, column: 0 })
        );
        b.set(5, 11, true).unwrap();
        b.set(5, 10, true).unwrap();
        assert!(b.get(5, 11).unwrap());

        b.set(5, 11, false).unwrap();
        assert!(!b.get(5, 11).unwrap());
        assert!(b.get(5, 10).unwrap());

        assert_eq!(
            b.get(1001, 0),
            Err(TableError::IllegalIndex { row: 1001, column: 0 })
        );
        b.set(999, 0, true).unwrap();
        assert!(b.get(999, 0).unwrap());
    }

    #[test]
    fn unallocatable_table_is_capacity_overflow() {
        let rows = usize::MAX / 65_535;
        assert_eq!(
            Bitmaptable::new(rows, 65_535).unwrap_err(),
            TableError::CapacityOverflow { rows, columns: 65_535 }
        );
    }

    #[test]
    fn from_bytes_round_trip() {
        let b = Bitmaptable::new(4, 4).unwrap();
        b.set(3, 3, true).unwrap();
        b.set(0, 1, true).unwrap();
        let restored = Bitmaptable::from_bytes(4, 4, b.clone().into_bytes()).unwrap();
        assert_eq!(restored, b);

        assert!(matches!(
            Bitmaptable::from_bytes(4, 4, vec![0; 3]),
            Err(TableError::Store(_))
        ));
    }

    #[test]
    fn clear_unsets_all() {
        let b = Bitmaptable::new(8, 8).unwrap();
        b.data(false).fill(0xFF);
        assert_eq!(b.count_ones(), 64);
        b.clear();
        assert_eq!(b.count_ones(), 0);
    }
}
