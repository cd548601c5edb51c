//! In-memory cursor over pre-fetched rows.

use std::collections::VecDeque;

use thiserror::Error;

use crate::traits::cursor::Cursor;
use crate::types::Value;

/// Failure reported by a [`MemoryCursor`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MemoryCursorError {
    /// A row holds a different number of values than there are columns.
    #[error("row {row} has {actual} values, expected {expected}")]
    RowWidth {
        /// Index of the row.
        row: u64,
        /// Number of columns.
        expected: usize,
        /// Number of values in the row.
        actual: usize,
    },
    /// `scan_into` was called without a positioned row.
    #[error("no current row, call advance first")]
    NoCurrentRow,
    /// A failure injected with [`MemoryCursor::fail_scan_at`] or
    /// [`MemoryCursor::fail_columns`].
    #[error("{0}")]
    Injected(String),
}

/// A [`Cursor`] over rows held in memory.
///
/// Rows are consumed as the cursor advances. Failures can be injected to
/// exercise error paths.
///
/// # Example
///
/// ```rust,ignore
/// use rowstream::{MemoryCursor, Value};
///
/// let cursor = MemoryCursor::new(["id", "name"])
///     .with_row(vec![Value::Int(1), Value::from("ada")])
///     .with_row(vec![Value::Int(2), Value::from("grace")]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryCursor {
    columns: Vec<String>,
    pending: VecDeque<Vec<Value>>,
    current: Option<Vec<Value>>,
    /// Rows positioned so far; the current row is `advanced - 1`.
    advanced: u64,
    scan_failure: Option<(u64, String)>,
    columns_failure: Option<String>,
}

impl MemoryCursor {
    /// Create an empty cursor with the given column names.
    #[must_use]
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Append one row.
    #[must_use]
    pub fn with_row(mut self, row: Vec<Value>) -> Self {
        self.pending.push_back(row);
        self
    }

    /// Append many rows.
    #[must_use]
    pub fn with_rows(mut self, rows: impl IntoIterator<Item = Vec<Value>>) -> Self {
        self.pending.extend(rows);
        self
    }

    /// Make scanning the row at `row` (0-based) fail with `message`.
    #[must_use]
    pub fn fail_scan_at(mut self, row: u64, message: impl Into<String>) -> Self {
        self.scan_failure = Some((row, message.into()));
        self
    }

    /// Make [`Cursor::column_names`] fail with `message`.
    #[must_use]
    pub fn fail_columns(mut self, message: impl Into<String>) -> Self {
        self.columns_failure = Some(message.into());
        self
    }

    /// Rows not yet reached by the cursor.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.pending.len()
    }
}

impl Cursor for MemoryCursor {
    type Error = MemoryCursorError;

    fn advance(&mut self) -> bool {
        self.current = self.pending.pop_front();
        if self.current.is_some() {
            self.advanced += 1;
        }
        self.current.is_some()
    }

    fn scan_into(&mut self, slots: &mut [Value]) -> Result<(), Self::Error> {
        let row = self.current.take().ok_or(MemoryCursorError::NoCurrentRow)?;
        let index = self.advanced - 1;

        if let Some((failing, message)) = &self.scan_failure
            && *failing == index
        {
            return Err(MemoryCursorError::Injected(message.clone()));
        }
        if row.len() != slots.len() {
            return Err(MemoryCursorError::RowWidth {
                row: index,
                expected: slots.len(),
                actual: row.len(),
            });
        }

        for (slot, value) in slots.iter_mut().zip(row) {
            *slot = value;
        }
        Ok(())
    }

    fn column_names(&self) -> Result<Vec<String>, Self::Error> {
        match &self.columns_failure {
            Some(message) => Err(MemoryCursorError::Injected(message.clone())),
            None => Ok(self.columns.clone()),
        }
    }
}
