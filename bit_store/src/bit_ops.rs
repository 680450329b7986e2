//! Single-bit primitives over a byte buffer.
//!
//! Bit `p` of a buffer lives in byte `p / 8` at bit `p % 8`, where bit 0 is
//! the least significant bit of its byte. Existing buffers depend on this
//! ordering, so it must not change.

/// Number of bytes needed to hold `bits` bits.
#[inline]
pub const fn byte_len(bits: usize) -> usize {
    bits.div_ceil(8)
}

/// Splits a linear bit position into `(byte index, bit index)`.
#[inline(always)]
pub const fn locate(position: usize) -> (usize, u32) {
    (position / 8, (position % 8) as u32)
}

#[inline(always)]
pub const fn get_bit(byte: u8, bit: u32) -> bool {
    byte & (1 << bit) != 0
}

/// Returns `byte` with `bit` set to `value`. `bit` must be below 8.
#[inline(always)]
pub const fn set_bit(byte: u8, bit: u32, value: bool) -> u8 {
    if value {
        byte | (1 << bit)
    } else {
        byte & !(1 << bit)
    }
}

/// Mask of the bits in the last byte that belong to a store of `bits` bits.
#[inline]
pub(crate) const fn tail_mask(bits: usize) -> u8 {
    match bits % 8 {
        0 => u8::MAX,
        used => (1u8 << used) - 1,
    }
}
