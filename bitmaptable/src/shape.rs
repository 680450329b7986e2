//! Table dimensions and the row/column to bit position mapping.

use crate::TableError;

/// Upper bound on columns per row, the largest count a `u16` can hold.
pub const MAX_COLUMNS: usize = u16::MAX as usize;

/// Validated dimensions of a bitmap table.
///
/// Cell `(row, column)` lives at linear bit position
/// `row * columns + column`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    rows: usize,
    columns: usize,
}

impl Shape {
    /// # Errors
    ///
    /// - [`TableError::InvalidShape`] if `rows` or `columns` is zero, or
    ///   `columns` exceeds [`MAX_COLUMNS`].
    /// - [`TableError::CapacityOverflow`] if `rows * columns` does not fit
    ///   in a `usize`.
    pub fn new(rows: usize, columns: usize) -> Result<Self, TableError> {
        if rows == 0 || columns == 0 || columns > MAX_COLUMNS {
            return Err(TableError::InvalidShape { rows, columns });
        }
        if rows.checked_mul(columns).is_none() {
            return Err(TableError::CapacityOverflow { rows, columns });
        }
        Ok(Self { rows, columns })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Total number of cells.
    pub fn bits(&self) -> usize {
        self.rows * self.columns
    }

    pub fn byte_len(&self) -> usize {
        bit_store::byte_len(self.bits())
    }

    /// Linear bit position of `(row, column)`.
    #[inline]
    pub fn locate(&self, row: usize, column: usize) -> Result<usize, TableError> {
        if column >= self.columns || row >= self.rows {
            tracing::trace!(row, column, rows = self.rows, columns = self.columns, "illegal index");
            return Err(TableError::IllegalIndex { row, column });
        }
        Ok(row * self.columns + column)
    }
}
