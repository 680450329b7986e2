use crate::bit_ops::{self, byte_len, tail_mask};
use crate::{ByteCell, StoreError, Vec};

/// Fixed-size bit storage backed by a contiguous run of byte cells.
///
/// The buffer is allocated once, zero-filled, and never resized. It is
/// always exactly [`byte_len`]`(bits)` bytes long. Reads and writes take
/// `&self`; whether the store may be shared between threads is decided by
/// the cell type `C` (see [`LocalStore`](crate::LocalStore) and
/// [`AtomicStore`](crate::AtomicStore)).
///
/// # Examples
///
/// ```
/// use bit_store::{ByteCell, LocalStore};
///
/// let store = LocalStore::new(16).unwrap();
/// store.set(3, true).unwrap();
///
/// // Writes to the live cells are seen by the store.
/// store.cells()[1].store(0xFF);
/// assert_eq!(store.get(15).unwrap(), true);
///
/// // Copies are independent of the store.
/// let mut copy = store.to_vec();
/// copy[0] = 0;
/// assert_eq!(store.get(3).unwrap(), true);
/// ```
#[derive(Debug)]
pub struct BitStore<C: ByteCell> {
    bits: usize,
    cells: Vec<C>,
}

impl<C: ByteCell> BitStore<C> {
    /// Creates a store of `bits` bits, all unset.
    ///
    /// # Errors
    ///
    /// [`StoreError::AllocationFailed`] if the buffer cannot be allocated.
    pub fn new(bits: usize) -> Result<Self, StoreError> {
        let len = byte_len(bits);
        tracing::debug!(bits, bytes = len, "allocating bit store");
        let mut cells = Vec::new();
        cells
            .try_reserve_exact(len)
            .map_err(|_| StoreError::AllocationFailed(len))?;
        cells.extend((0..len).map(|_| C::new(0)));
        Ok(Self { bits, cells })
    }

    /// Wraps an existing buffer, e.g. one produced by [`BitStore::into_bytes`].
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::LengthMismatch`] unless `bytes.len()` equals
    /// [`byte_len`]`(bits)`.
    pub fn from_bytes(bits: usize, bytes: Vec<u8>) -> Result<Self, StoreError> {
        let expected = byte_len(bits);
        if bytes.len() != expected {
            return Err(StoreError::LengthMismatch {
                expected,
                found: bytes.len(),
            });
        }
        Ok(Self {
            bits,
            cells: bytes.into_iter().map(C::new).collect(),
        })
    }

    /// Number of addressable bits.
    pub fn bits(&self) -> usize {
        self.bits
    }

    /// Length of the backing buffer in bytes.
    pub fn len_bytes(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    #[inline]
    fn check(&self, position: usize) -> Result<(), StoreError> {
        if position >= self.bits {
            return Err(StoreError::OutOfBounds(position, self.bits));
        }
        Ok(())
    }

    /// Reads the bit at `position`.
    #[inline]
    pub fn get(&self, position: usize) -> Result<bool, StoreError> {
        self.check(position)?;
        let (byte, bit) = bit_ops::locate(position);
        Ok(bit_ops::get_bit(self.cells[byte].load(), bit))
    }

    /// Writes the bit at `position`, leaving every other bit untouched.
    #[inline]
    pub fn set(&self, position: usize, value: bool) -> Result<(), StoreError> {
        self.check(position)?;
        let (byte, bit) = bit_ops::locate(position);
        self.cells[byte].write_bit(bit, value);
        Ok(())
    }

    /// The live buffer. Writes through the cells change the stored bits.
    pub fn cells(&self) -> &[C] {
        &self.cells
    }

    /// An independent copy of the buffer.
    pub fn to_vec(&self) -> Vec<u8> {
        self.cells.iter().map(ByteCell::load).collect()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.to_vec()
    }

    /// Moves the bits into a store built from another cell type.
    pub fn convert<D: ByteCell>(self) -> BitStore<D> {
        BitStore {
            bits: self.bits,
            cells: self.cells.iter().map(|c| D::new(c.load())).collect(),
        }
    }

    /// Counts set bits, ignoring padding past the last addressable bit.
    pub fn count_ones(&self) -> usize {
        let Some((last, full)) = self.cells.split_last() else {
            return 0;
        };
        count_cells(full) + (last.load() & tail_mask(self.bits)).count_ones() as usize
    }

    /// Unsets every bit.
    pub fn clear(&self) {
        self.cells.iter().for_each(|c| c.store(0));
    }
}

impl<C: ByteCell> Clone for BitStore<C> {
    fn clone(&self) -> Self {
        Self {
            bits: self.bits,
            cells: self.cells.iter().map(|c| C::new(c.load())).collect(),
        }
    }
}

impl<C: ByteCell> PartialEq for BitStore<C> {
    fn eq(&self, other: &Self) -> bool {
        self.bits == other.bits
            && self
                .cells
                .iter()
                .zip(&other.cells)
                .all(|(a, b)| a.load() == b.load())
    }
}

impl<C: ByteCell> Eq for BitStore<C> {}

fn count_cells<C: ByteCell>(cells: &[C]) -> usize {
    let mut words = cells.chunks_exact(8);
    let mut ones = 0;
    for chunk in &mut words {
        let word: [u8; 8] = core::array::from_fn(|i| chunk[i].load());
        ones += bytemuck::cast::<[u8; 8], u64>(word).count_ones() as usize;
    }
    ones + words
        .remainder()
        .iter()
        .map(|c| c.load().count_ones() as usize)
        .sum::<usize>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AtomicStore, LocalStore};

    #[cfg(not(feature = "std"))]
    use alloc::vec;

    #[test]
    fn new_is_zeroed_and_sized() {
        let store = LocalStore::new(50).unwrap();
        assert_eq!(store.bits(), 50);
        assert_eq!(store.len_bytes(), 7);
        assert!(store.to_vec().iter().all(|&b| b == 0));
        assert_eq!(store.count_ones(), 0);
    }

    #[test]
    fn set_get_and_isolation() {
        let store = LocalStore::new(24).unwrap();
        store.set(9, true).unwrap();
        store.set(10, true).unwrap();
        assert!(store.get(9).unwrap());
        assert!(store.get(10).unwrap());
        assert!(!store.get(8).unwrap());

        store.set(9, false).unwrap();
        assert!(!store.get(9).unwrap());
        assert!(store.get(10).unwrap());
        assert_eq!(store.to_vec(), [0, 0b0000_0100, 0]);
    }

    #[test]
    fn atomic_store_matches_local() {
        let local = LocalStore::new(100).unwrap();
        let atomic = AtomicStore::new(100).unwrap();
        for pos in (0..100).step_by(7) {
            local.set(pos, true).unwrap();
            atomic.set(pos, true).unwrap();
        }
        atomic.set(14, false).unwrap();
        local.set(14, false).unwrap();
        assert_eq!(atomic.to_vec(), local.to_vec());
        assert_eq!(atomic.count_ones(), local.count_ones());

        let back: LocalStore = atomic.convert();
        assert_eq!(back, local);
    }

    #[test]
    fn out_of_bounds() {
        let store = LocalStore::new(10).unwrap();
        assert_eq!(store.get(10), Err(StoreError::OutOfBounds(10, 10)));
        assert_eq!(store.set(11, true), Err(StoreError::OutOfBounds(11, 10)));
        assert!(store.get(9).is_ok());
    }

    #[test]
    fn empty_store() {
        let store = LocalStore::new(0).unwrap();
        assert!(store.is_empty());
        assert_eq!(store.len_bytes(), 0);
        assert_eq!(store.count_ones(), 0);
        assert!(store.get(0).is_err());
    }

    #[test]
    fn huge_store_reports_allocation_failure() {
        let bits = usize::MAX;
        assert_eq!(
            LocalStore::new(bits).unwrap_err(),
            StoreError::AllocationFailed(byte_len(bits))
        );
    }

    #[test]
    fn from_bytes_checks_length() {
        let store = LocalStore::from_bytes(16, vec![0xFF, 0x01]).unwrap();
        assert!(store.get(8).unwrap());
        assert!(!store.get(9).unwrap());
        assert_eq!(
            LocalStore::from_bytes(16, vec![0; 3]).unwrap_err(),
            StoreError::LengthMismatch {
                expected: 2,
                found: 3
            }
        );
    }

    #[test]
    fn count_ones_ignores_padding() {
        // 10 bits: the top six bits of byte 1 are padding.
        let store = LocalStore::from_bytes(10, vec![0xFF, 0xFF]).unwrap();
        assert_eq!(store.count_ones(), 10);

        let big = LocalStore::new(1000).unwrap();
        for pos in (0..1000).step_by(3) {
            big.set(pos, true).unwrap();
        }
        assert_eq!(big.count_ones(), 334);
    }

    #[test]
    fn clear_resets_everything() {
        let store = LocalStore::from_bytes(64, vec![0xAA; 8]).unwrap();
        store.clear();
        assert_eq!(store.count_ones(), 0);
        assert_eq!(store.len_bytes(), 8);
    }

    #[test]
    fn clone_is_independent() {
        let a = LocalStore::new(16).unwrap();
        a.set(1, true).unwrap();
        let b = a.clone();
        assert_eq!(a, b);
        b.set(2, true).unwrap();
        assert_ne!(a, b);
        assert!(!a.get(2).unwrap());
    }
}
