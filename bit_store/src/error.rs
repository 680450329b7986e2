#[cfg(feature = "std")]
use thiserror::Error;

/// Store errors
#[cfg_attr(feature = "std", derive(Error))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreError {
    /// Bit position at or past the end of the store
    #[cfg_attr(feature = "std", error("Bit position {0} out of bounds for {1} bits"))]
    OutOfBounds(usize, usize),

    /// Byte index at or past the end of the buffer
    #[cfg_attr(feature = "std", error("Byte index {0} out of bounds for {1} bytes"))]
    ByteOutOfBounds(usize, usize),

    /// Bulk-loaded buffer does not match the size the bit count requires
    #[cfg_attr(
        feature = "std",
        error("Buffer length mismatch: expected {expected} bytes, found {found}")
    )]
    LengthMismatch { expected: usize, found: usize },

    /// The allocator could not provide the buffer
    #[cfg_attr(feature = "std", error("Failed to allocate {0} bytes"))]
    AllocationFailed(usize),
}

#[cfg(not(feature = "std"))]
impl core::fmt::Display for StoreError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            StoreError::OutOfBounds(pos, bits) => {
                write!(f, "Bit position {} out of bounds for {} bits", pos, bits)
            }
            StoreError::ByteOutOfBounds(index, len) => {
                write!(f, "Byte index {} out of bounds for {} bytes", index, len)
            }
            StoreError::LengthMismatch { expected, found } => write!(
                f,
                "Buffer length mismatch: expected {} bytes, found {}",
                expected, found
            ),
            StoreError::AllocationFailed(bytes) => {
                write!(f, "Failed to allocate {} bytes", bytes)
            }
        }
    }
}
