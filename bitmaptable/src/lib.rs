//! # bitmaptable
//!
//! Dense in-memory bitmap tables: a fixed number of rows, each holding a
//! fixed number of boolean columns, stored one bit per cell.
//!
//! ```rust
//! const ACTIVE: usize = 0;
//! const VERIFIED: usize = 1;
//!
//! // Two flags for each of ten million accounts in 2.5 MB.
//! let accounts = bitmaptable::new(10_000_000, 2).expect("failed to create table");
//! accounts.set(123_456, ACTIVE, true).unwrap();
//! accounts.set(123_456, VERIFIED, false).unwrap();
//!
//! assert!(accounts.get(123_456, ACTIVE).unwrap());
//! assert!(!accounts.get(123_456, VERIFIED).unwrap());
//! assert_eq!(accounts.data(false).len(), 2_500_000);
//! ```
//!
//! ## Bit layout
//!
//! Cell `(row, column)` is bit `p = row * columns + column`, stored in byte
//! `p / 8` at bit `p % 8`, bit 0 being the least significant bit.
//!
//! ## Sharing between threads
//!
//! [`new`] builds a [`Bitmaptable`], which is not `Sync`. [`new_ts`] builds a
//! [`SyncBitmaptable`], which can be called concurrently through an `Arc`.
//! Both are used through the same [`BitTable`] trait.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

#[cfg(not(feature = "std"))]
use alloc::boxed::Box;

pub mod error;
pub use error::TableError;

mod raw;
pub use raw::RawData;

pub mod shape;
pub use shape::{MAX_COLUMNS, Shape};

pub mod table;
pub use table::Bitmaptable;

#[cfg(feature = "std")]
pub mod sync;

#[cfg(feature = "std")]
pub use sync::SyncBitmaptable;

/// Operations shared by every bitmap table variant.
///
/// Object safe, so callers can hold a `Box<dyn BitTable>` without caring
/// whether the table underneath is synchronised.
pub trait BitTable {
    /// Number of rows.
    fn rows(&self) -> usize;

    /// Number of columns per row.
    fn columns(&self) -> usize;

    /// Reads cell `(row, column)`; [`TableError::IllegalIndex`] when out of range.
    fn get(&self, row: usize, column: usize) -> Result<bool, TableError>;

    /// Writes cell `(row, column)`; [`TableError::IllegalIndex`] when out of range.
    fn set(&self, row: usize, column: usize, value: bool) -> Result<(), TableError>;

    /// The live buffer when `copy` is false, an independent copy otherwise.
    fn data(&self, copy: bool) -> RawData<'_>;
}

impl BitTable for Bitmaptable {
    fn rows(&self) -> usize {
        Bitmaptable::rows(self)
    }

    fn columns(&self) -> usize {
        Bitmaptable::columns(self)
    }

    fn get(&self, row: usize, column: usize) -> Result<bool, TableError> {
        Bitmaptable::get(self, row, column)
    }

    fn set(&self, row: usize, column: usize, value: bool) -> Result<(), TableError> {
        Bitmaptable::set(self, row, column, value)
    }

    fn data(&self, copy: bool) -> RawData<'_> {
        Bitmaptable::data(self, copy)
    }
}

#[cfg(feature = "std")]
impl BitTable for SyncBitmaptable {
    fn rows(&self) -> usize {
        SyncBitmaptable::rows(self)
    }

    fn columns(&self) -> usize {
        SyncBitmaptable::columns(self)
    }

    fn get(&self, row: usize, column: usize) -> Result<bool, TableError> {
        SyncBitmaptable::get(self, row, column)
    }

    fn set(&self, row: usize, column: usize, value: bool) -> Result<(), TableError> {
        SyncBitmaptable::set(self, row, column, value)
    }

    fn data(&self, copy: bool) -> RawData<'_> {
        SyncBitmaptable::data(self, copy)
    }
}

/// Creates a plain table of `rows * columns` unset bits.
pub fn new(rows: usize, columns: usize) -> Result<Box<dyn BitTable>, TableError> {
    Ok(Box::new(Bitmaptable::new(rows, columns)?))
}

/// Creates a thread-safe table of `rows * columns` unset bits.
///
/// Convert the box with `Arc::from` to share it between threads.
#[cfg(feature = "std")]
pub fn new_ts(rows: usize, columns: usize) -> Result<Box<dyn BitTable + Send + Sync>, TableError> {
    Ok(Box::new(SyncBitmaptable::new(rows, columns)?))
}
