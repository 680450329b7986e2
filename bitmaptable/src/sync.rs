//! Thread-safe bitmap table.
//!
//! Packed cells share bytes, so two writers to neighbouring cells touch the
//! same byte. [`SyncBitmaptable`] keeps its bytes in atomics and serialises
//! every `set`, `clear` and `data` call behind one mutex. Lookups take no
//! lock and never block.
//!
//! ```rust
//! use std::sync::Arc;
//! use std::thread;
//! use bitmaptable::SyncBitmaptable;
//!
//! let table = Arc::new(SyncBitmaptable::new(64, 1).unwrap());
//! let handles: Vec<_> = (0..8)
//!     .map(|row| {
//!         let table = Arc::clone(&table);
//!         thread::spawn(move || table.set(row, 0, true).unwrap())
//!     })
//!     .collect();
//! for h in handles {
//!     h.join().unwrap();
//! }
//! assert_eq!(table.count_ones(), 8);
//! ```

use std::sync::{Mutex, MutexGuard, PoisonError};

use bit_store::AtomicStore;

use crate::{Bitmaptable, RawData, Shape, TableError};

type Result<T> = core::result::Result<T, TableError>;

/// A bitmap table that can be shared between threads.
///
/// - `set`, `clear`, `count_ones` and `data` (aliased or copied) hold the
///   mutex for the duration of the call. The returned [`RawData`] does not
///   keep it.
/// - `get`, `rows` and `columns` take no lock. A `get` racing a `set` of
///   the same cell may see either value.
/// - Writes through an aliased [`RawData`] are atomic byte stores and do not
///   take the mutex.
#[derive(Debug)]
pub struct SyncBitmaptable {
    shape: Shape,
    store: AtomicStore,
    lock: Mutex<()>,
}

impl SyncBitmaptable {
    pub fn new(rows: usize, columns: usize) -> Result<Self> {
        let shape = Shape::new(rows, columns)?;
        tracing::debug!(rows, columns, bytes = shape.byte_len(), "creating shared bitmap table");
        let store = AtomicStore::new(shape.bits())
            .map_err(|_| TableError::CapacityOverflow { rows, columns })?;
        Ok(Self {
            shape,
            store,
            lock: Mutex::new(()),
        })
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

    pub fn get(&self, row: usize, column: usize) -> Result<bool> {
        let pos = self.shape.locate(row, column)?;
        Ok(self.store.get(pos)?)
    }

    pub fn set(&self, row: usize, column: usize, value: bool) -> Result<()> {
        let pos = self.shape.locate(row, column)?;
        let _guard = self.lock();
        self.store.set(pos, value)?;
        Ok(())
    }

    /// Raw buffer access: the live buffer when `copy` is false, a snapshot
    /// taken under the mutex otherwise.
    pub fn data(&self, copy: bool) -> RawData<'_> {
        let _guard = self.lock();
        if copy {
            RawData::Copied(self.store.to_vec())
        } else {
            RawData::Shared(self.store.cells())
        }
    }

    pub fn count_ones(&self) -> usize {
        let _guard = self.lock();
        self.store.count_ones()
    }

    pub fn clear(&self) {
        let _guard = self.lock();
        self.store.clear();
    }

    pub fn into_inner(self) -> Bitmaptable {
        Bitmaptable::from_parts(self.shape, self.store.convert())
    }

    // The mutex guards no data of its own, so a poisoned lock leaves
    // nothing inconsistent behind.
    fn lock(&self) -> MutexGuard<'_, ()> {
        self.lock.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl From<Bitmaptable> for SyncBitmaptable {
    fn from(table: Bitmaptable) -> Self {
        let (shape, store) = table.into_parts();
        Self {
            shape,
            store: store.convert(),
            lock: Mutex::new(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configuration() {
        let bm = SyncBitmaptable::new(10, 5).unwrap();
        assert_eq!(bm.rows(), 10);
        assert_eq!(bm.columns(), 5);
        assert_eq!(bm.data(true).len(), 7);
    }

    #[test]
    fn data_aliases_or_copies() {
        let bm = SyncBitmaptable::new(10, 5).unwrap();

        let mut data = bm.data(false);
        assert!(!data.is_copy());
        data.set(1, 123).unwrap();

        let mut copy = bm.data(true);
        assert_eq!(copy.get(1), Some(123));
        copy.set(1, 111).unwrap();

        assert_eq!(data.get(1), Some(123));
        assert_eq!(bm.into_inner().data(true).get(1), Some(123));
    }

    #[test]
    fn aliased_writes_are_visible_to_get() {
        let bm = SyncBitmaptable::new(50, 1).unwrap();
        let mut view = bm.data(false);
        view.set(4, 0b1000_0000).unwrap();
        assert!(bm.get(39, 0).unwrap());
        assert!(!bm.get(38, 0).unwrap());
    }

    #[test]
    fn live_view_does_not_block_the_table() {
        let bm = SyncBitmaptable::new(4, 4).unwrap();
        let mut alias = bm.data(false);
        alias.set(0, 1).unwrap();

        // Lookups, copies and writes all proceed while the view is alive.
        assert!(bm.get(0, 0).unwrap());
        let mut copy = bm.data(true);
        copy.set(0, 0xFF).unwrap();
        bm.set(0, 1, true).unwrap();

        assert_eq!(alias.get(0), Some(0b0000_0011));
        assert_eq!(copy.get(0), Some(0xFF));
        assert!(!bm.get(0, 2).unwrap());
    }

    #[test]
    fn get_set() {
        let b = SyncBitmaptable::new(1000, 12).unwrap();
        assert_eq!(
            b.set(1001, 0, true),
            Err(TableError::IllegalIndex { row: 1001, column: 0 })
        );
        b.set(5, 11, true).unwrap();
        b.set(5, 10, true).unwrap();
        assert!(b.get(5, 11).unwrap());

        b.set(5, 11, false).unwrap();
        assert!(!b.get(5, 11).unwrap());

        assert_eq!(
            b.get(1001, 0),
            Err(TableError::IllegalIndex { row: 1001, column: 0 })
        );
        assert!(b.get(999, 11).is_ok());
    }

    #[test]
    fn converts_to_and_from_plain() {
        let plain = Bitmaptable::new(3, 3).unwrap();
        plain.set(2, 2, true).unwrap();
        let shared = SyncBitmaptable::from(plain.clone());
        assert!(shared.get(2, 2).unwrap());
        shared.set(0, 0, true).unwrap();

        let back = shared.into_inner();
        assert_eq!(back.count_ones(), 2);
        assert_eq!(back.shape(), plain.shape());
    }

    #[test]
    fn clear_unsets_all() {
        let b = SyncBitmaptable::new(3, 3).unwrap();
        b.set(2, 2, true).unwrap();
        b.clear();
        assert_eq!(b.count_ones(), 0);
    }
}
