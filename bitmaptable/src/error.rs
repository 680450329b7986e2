use bit_store::StoreError;
#[cfg(feature = "std")]
use thiserror::Error;

#[cfg_attr(feature = "std", derive(Error))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableError {
    #[cfg_attr(
        feature = "std",
        error("Bitmaptable: Illegal row {row} or column {column}")
    )]
    IllegalIndex { row: usize, column: usize },

    #[cfg_attr(
        feature = "std",
        error("Bitmaptable: Illegal shape {rows}x{columns}, need 1.. rows and 1..=65535 columns")
    )]
    InvalidShape { rows: usize, columns: usize },

    #[cfg_attr(
        feature = "std",
        error("Bitmaptable: {rows}x{columns} bits overflow the address space")
    )]
    CapacityOverflow { rows: usize, columns: usize },

    #[cfg_attr(feature = "std", error("storage error: {0}"))]
    Store(#[cfg_attr(feature = "std", from)] StoreError),
}

#[cfg(not(feature = "std"))]
impl core::fmt::Display for TableError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            TableError::IllegalIndex { row, column } => {
                write!(f, "Bitmaptable: Illegal row {} or column {}", row, column)
            }
            TableError::InvalidShape { rows, columns } => write!(
                f,
                "Bitmaptable: Illegal shape {}x{}, need 1.. rows and 1..=65535 columns",
                rows, columns
            ),
            TableError::CapacityOverflow { rows, columns } => write!(
                f,
                "Bitmaptable: {}x{} bits overflow the address space",
                rows, columns
            ),
            TableError::Store(e) => write!(f, "storage error: {}", e),
        }
    }
}

#[cfg(not(feature = "std"))]
impl From<StoreError> for TableError {
    fn from(err: StoreError) -> Self {
        TableError::Store(err)
    }
}
