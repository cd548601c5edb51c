//! Binding scanned rows into records.
//!
//! A [`RowBinder`] is the per-stream resolution of a column set against a
//! [`FieldMap`]: for every column position it holds the field that receives
//! that column's value. Lookups by name happen once, when the binder is
//! created; binding a row is a positional walk.

use crate::schema::mapping::FieldMap;
use crate::traits::record::Record;
use crate::types::Value;
use crate::{Result, StreamError};

/// Column set resolved against a field map.
pub struct RowBinder<'a, R> {
    map: &'a FieldMap<R>,
    columns: &'a [String],
    /// Field table index for each column position.
    plan: Vec<usize>,
}

impl<R> std::fmt::Debug for RowBinder<'_, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RowBinder")
            .field("columns", &self.columns)
            .field("plan", &self.plan)
            .finish_non_exhaustive()
    }
}

impl<'a, R> RowBinder<'a, R> {
    pub(crate) fn new(map: &'a FieldMap<R>, columns: &'a [String], plan: Vec<usize>) -> Self {
        debug_assert_eq!(columns.len(), plan.len());
        Self { map, columns, plan }
    }

    /// Number of values expected per row.
    #[must_use]
    pub fn width(&self) -> usize {
        self.plan.len()
    }

    /// Column names, in scan order.
    #[must_use]
    pub const fn columns(&self) -> &'a [String] {
        self.columns
    }

    /// Bind one row into `record`, in column order.
    ///
    /// `row_index` is only used for error reporting.
    ///
    /// # Errors
    ///
    /// Returns a bind error for a row of the wrong width or the first value
    /// that cannot be assigned to its field. `record` may be partially bound
    /// when an error is returned.
    pub fn bind_into(&self, record: &mut R, row: Vec<Value>, row_index: u64) -> Result<()> {
        if row.len() != self.plan.len() {
            return Err(StreamError::bind(
                Some(row_index),
                "*",
                format!("expected {} values, got {}", self.plan.len(), row.len()),
            ));
        }

        for ((value, &field), column) in row.into_iter().zip(&self.plan).zip(self.columns) {
            let spec = self.map.field_at(field);
            spec.set(record, value).map_err(|e| {
                StreamError::bind(
                    Some(row_index),
                    column.as_str(),
                    format!("field `{}`: {e}", spec.name()),
                )
            })?;
        }

        Ok(())
    }
}

impl<R: Record> RowBinder<'_, R> {
    /// Bind one row into a freshly defaulted record.
    ///
    /// # Errors
    ///
    /// See [`RowBinder::bind_into`].
    pub fn bind(&self, row: Vec<Value>, row_index: u64) -> Result<R> {
        let mut record = R::default();
        self.bind_into(&mut record, row, row_index)?;
        Ok(record)
    }
}
