//! The data source consumed by a stream.

use crate::types::Value;

/// A sequential, advance-then-read source of rows with named columns.
///
/// Mirrors the subset of a database result cursor that streaming needs:
/// advance to the next row, read the row into caller-provided slots, and
/// report the column names.
///
/// # Example
///
/// ```rust,ignore
/// impl Cursor for PgRows {
///     type Error = tokio_postgres::Error;
///
///     fn advance(&mut self) -> bool {
///         self.current = self.inner.next();
///         self.current.is_some()
///     }
///
///     fn scan_into(&mut self, slots: &mut [Value]) -> Result<(), Self::Error> {
///         // convert each column of self.current into slots[i]
///     }
///
///     fn column_names(&self) -> Result<Vec<String>, Self::Error> {
///         Ok(self.columns.clone())
///     }
/// }
/// ```
pub trait Cursor {
    /// Error reported by the data source.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Position the cursor on the next row.
    ///
    /// Returns `false` once the rows are exhausted.
    fn advance(&mut self) -> bool;

    /// Fill `slots` with the current row's values, in column order.
    ///
    /// `slots` has exactly as many entries as [`Cursor::column_names`]
    /// returned, each initialised to [`Value::Null`].
    ///
    /// # Errors
    ///
    /// Returns the data source's error if the row cannot be read.
    fn scan_into(&mut self, slots: &mut [Value]) -> Result<(), Self::Error>;

    /// Names of the columns, in the order values are scanned.
    ///
    /// # Errors
    ///
    /// Returns the data source's error if the columns are unavailable.
    fn column_names(&self) -> Result<Vec<String>, Self::Error>;
}

impl<C: Cursor + ?Sized> Cursor for &mut C {
    type Error = C::Error;

    fn advance(&mut self) -> bool {
        (**self).advance()
    }

    fn scan_into(&mut self, slots: &mut [Value]) -> Result<(), Self::Error> {
        (**self).scan_into(slots)
    }

    fn column_names(&self) -> Result<Vec<String>, Self::Error> {
        (**self).column_names()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Test that the trait is object-safe
    fn _assert_object_safe(_: &dyn Cursor<Error = std::io::Error>) {}
}
