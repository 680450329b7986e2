//! # bit_store
//!
//! Fixed-size, zero-initialised bit storage packed eight bits to a byte.
//!
//! The store only knows a total bit count and linear bit positions. Callers
//! that address bits by something richer (rows and columns, ids and flag
//! positions) flatten their coordinates before reaching this layer.
//!
//! ```rust
//! use bit_store::LocalStore;
//!
//! let store = LocalStore::new(50).unwrap();
//! assert_eq!(store.len_bytes(), 7);
//!
//! store.set(39, true).unwrap();
//! assert_eq!(store.get(39).unwrap(), true);
//! assert_eq!(store.to_vec()[4], 0b1000_0000);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

#[cfg(feature = "std")]
pub use std::vec::Vec;

#[cfg(not(feature = "std"))]
pub use alloc::vec::Vec;

pub mod bit_ops;
pub mod cell;
pub mod error;
pub mod store;

pub use bit_ops::byte_len;
pub use cell::ByteCell;
pub use error::StoreError;
pub use store::BitStore;

/// Single-threaded store.
pub type LocalStore = BitStore<core::cell::Cell<u8>>;

/// Store whose bytes may be read and written from several threads.
pub type AtomicStore = BitStore<core::sync::atomic::AtomicU8>;
