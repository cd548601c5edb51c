//! Error hierarchy for rowstream.
//!
//! Follows the "canonical error struct" pattern from Microsoft Rust Guidelines.
//! Exposes `is_xxx()` methods rather than internal `ErrorKind` for future-proofing.
//!
//! Every error is fatal for the stream that produced it. Errors raised by the
//! cursor, the encoder or the sink are kept as the [`source`] of the
//! [`StreamError`] so callers can inspect them unchanged.
//!
//! [`source`]: std::error::Error::source

use thiserror::Error;

/// Boxed error produced by a collaborator (cursor or encoder).
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Root error type for the rowstream crate.
///
/// # Example
///
/// ```rust,ignore
/// use rowstream::StreamError;
///
/// fn handle_error(err: StreamError) {
///     if err.is_write() {
///         eprintln!("sink is in an unknown position, reopen it");
///     } else if err.is_bind() {
///         eprintln!("record type does not match the query: {err}");
///     }
/// }
/// ```
#[derive(Error, Debug)]
#[error(transparent)]
pub struct StreamError {
    kind: ErrorKind,
}

/// Internal error classification.
///
/// This enum is `pub(crate)` to allow adding variants without breaking changes.
/// External code should use the `is_xxx()` predicate methods instead.
#[derive(Error, Debug)]
#[non_exhaustive]
pub(crate) enum ErrorKind {
    /// The destination record cannot be bound in place.
    #[error("invalid destination {record}: {reason}")]
    InvalidDestination {
        record: &'static str,
        reason: String,
    },

    /// A field annotation is malformed or lacks the mapping key.
    #[error("mapping error on field '{field}': {message}")]
    Mapping { field: String, message: String },

    /// The cursor could not report its column names.
    #[error("failed to read column names: {source}")]
    Columns {
        #[source]
        source: BoxError,
    },

    /// The cursor could not fill the value slots for a row.
    #[error("failed to scan row {row}: {source}")]
    Scan {
        row: u64,
        #[source]
        source: BoxError,
    },

    /// A scanned value could not be assigned to its field.
    #[error("bind error{} on column '{column}': {message}", row_suffix(.row))]
    Bind {
        row: Option<u64>,
        column: String,
        message: String,
    },

    /// The encoder rejected a record.
    #[error("failed to encode row {row}: {source}")]
    Encode {
        row: u64,
        #[source]
        source: BoxError,
    },

    /// The sink returned an error part way through a record.
    #[error("failed to write row {row}: {source}")]
    Write {
        row: u64,
        #[source]
        source: std::io::Error,
    },
}

fn row_suffix(row: &Option<u64>) -> String {
    row.map(|r| format!(" in row {r}")).unwrap_or_default()
}

impl StreamError {
    // ═══════════════════════════════════════════════════════════════════════
    // Constructors
    // ═══════════════════════════════════════════════════════════════════════

    /// Create error for a destination that cannot be bound.
    #[must_use]
    pub fn invalid_destination(record: &'static str, reason: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::InvalidDestination {
                record,
                reason: reason.into(),
            },
        }
    }

    /// Create error for a malformed or missing field annotation.
    #[must_use]
    pub fn mapping(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Mapping {
                field: field.into(),
                message: message.into(),
            },
        }
    }

    /// Create error for a cursor that failed to report its columns.
    #[must_use]
    pub fn columns(source: impl Into<BoxError>) -> Self {
        Self {
            kind: ErrorKind::Columns {
                source: source.into(),
            },
        }
    }

    /// Create error for a failed row scan.
    #[must_use]
    pub fn scan(row: u64, source: impl Into<BoxError>) -> Self {
        Self {
            kind: ErrorKind::Scan {
                row,
                source: source.into(),
            },
        }
    }

    /// Create error for a value that could not be bound.
    ///
    /// `row` is `None` when the failure is detected while resolving columns,
    /// before any row was scanned.
    #[must_use]
    pub fn bind(row: Option<u64>, column: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Bind {
                row,
                column: column.into(),
                message: message.into(),
            },
        }
    }

    /// Create error for an encoder failure.
    #[must_use]
    pub fn encode(row: u64, source: impl Into<BoxError>) -> Self {
        Self {
            kind: ErrorKind::Encode {
                row,
                source: source.into(),
            },
        }
    }

    /// Create error for a sink failure.
    #[must_use]
    pub const fn write(row: u64, source: std::io::Error) -> Self {
        Self {
            kind: ErrorKind::Write { row, source },
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Predicate Methods (is_xxx)
    // ═══════════════════════════════════════════════════════════════════════

    /// Returns true if the destination could not be bound.
    #[must_use]
    pub const fn is_invalid_destination(&self) -> bool {
        matches!(self.kind, ErrorKind::InvalidDestination { .. })
    }

    /// Returns true if this is a field mapping error.
    #[must_use]
    pub const fn is_mapping(&self) -> bool {
        matches!(self.kind, ErrorKind::Mapping { .. })
    }

    /// Returns true if the cursor failed to report its columns.
    #[must_use]
    pub const fn is_columns(&self) -> bool {
        matches!(self.kind, ErrorKind::Columns { .. })
    }

    /// Returns true if the cursor failed to scan a row.
    #[must_use]
    pub const fn is_scan(&self) -> bool {
        matches!(self.kind, ErrorKind::Scan { .. })
    }

    /// Returns true if a value could not be bound to its field.
    #[must_use]
    pub const fn is_bind(&self) -> bool {
        matches!(self.kind, ErrorKind::Bind { .. })
    }

    /// Returns true if the encoder failed.
    #[must_use]
    pub const fn is_encode(&self) -> bool {
        matches!(self.kind, ErrorKind::Encode { .. })
    }

    /// Returns true if the sink failed.
    ///
    /// Bytes of the failing record that reached the sink before the error are
    /// not unwritten; the sink should be treated as being in an unknown state.
    #[must_use]
    pub const fn is_write(&self) -> bool {
        matches!(self.kind, ErrorKind::Write { .. })
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Accessors
    // ═══════════════════════════════════════════════════════════════════════

    /// Index of the row being processed when the error occurred, if any.
    #[must_use]
    pub const fn row(&self) -> Option<u64> {
        match self.kind {
            ErrorKind::Scan { row, .. }
            | ErrorKind::Encode { row, .. }
            | ErrorKind::Write { row, .. } => Some(row),
            ErrorKind::Bind { row, .. } => row,
            _ => None,
        }
    }

    /// Consume the error and return the collaborator error it wraps.
    ///
    /// Returns `None` for errors raised by rowstream itself (destination,
    /// mapping and bind errors).
    #[must_use]
    pub fn into_source(self) -> Option<BoxError> {
        match self.kind {
            ErrorKind::Columns { source }
            | ErrorKind::Scan { source, .. }
            | ErrorKind::Encode { source, .. } => Some(source),
            ErrorKind::Write { source, .. } => Some(Box::new(source)),
            _ => None,
        }
    }
}

/// Result type alias for streaming operations.
pub type Result<T> = std::result::Result<T, StreamError>;
