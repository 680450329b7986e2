//! Interior-mutable byte cells a [`BitStore`](crate::BitStore) is built from.
//!
//! [`Cell<u8>`] gives a single-threaded store. [`AtomicU8`] gives a store
//! whose bytes can be read and written from several threads; every bit
//! update is one atomic read-modify-write, so neighbouring bits written
//! concurrently never overwrite each other.

use core::cell::Cell;
use core::sync::atomic::{AtomicU8, Ordering};

use crate::bit_ops;

pub trait ByteCell {
    fn new(byte: u8) -> Self;

    fn load(&self) -> u8;

    /// Replaces the whole byte.
    fn store(&self, byte: u8);

    /// Writes one bit of the byte; `bit` must be below 8.
    fn write_bit(&self, bit: u32, value: bool);
}

impl ByteCell for Cell<u8> {
    #[inline]
    fn new(byte: u8) -> Self {
        Cell::new(byte)
    }

    #[inline]
    fn load(&self) -> u8 {
        self.get()
    }

    #[inline]
    fn store(&self, byte: u8) {
        self.set(byte);
    }

    #[inline]
    fn write_bit(&self, bit: u32, value: bool) {
        self.set(bit_ops::set_bit(self.get(), bit, value));
    }
}

impl ByteCell for AtomicU8 {
    #[inline]
    fn new(byte: u8) -> Self {
        AtomicU8::new(byte)
    }

    #[inline]
    fn load(&self) -> u8 {
        AtomicU8::load(self, Ordering::Acquire)
    }

    #[inline]
    fn store(&self, byte: u8) {
        AtomicU8::store(self, byte, Ordering::Release);
    }

    #[inline]
    fn write_bit(&self, bit: u32, value: bool) {
        if value {
            self.fetch_or(1 << bit, Ordering::AcqRel);
        } else {
            self.fetch_and(!(1 << bit), Ordering::AcqRel);
        }
    }
}
