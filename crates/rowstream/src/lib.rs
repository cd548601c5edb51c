//! Stream tabular query results into encoded records.
//!
//! This crate binds the rows of a cursor into typed records, one at a time,
//! encodes each record (e.g. as line-delimited JSON) and writes the bytes to
//! any [`std::io::Write`] sink, without holding the result set in memory.
//!
//! # Features
//!
//! - Column to field mapping from struct-tag style annotations, built once
//!   per stream
//! - Optional (`Option<T>`) and definite field shapes with null reconciliation
//! - Arbitrary per-record hydration inside the encoder
//! - Complete writes over sinks that accept short writes
//!
//! # Example
//!
//! ```rust,ignore
//! use rowstream::{JsonEncoder, MemoryCursor, Value, record_fields, stream};
//!
//! #[derive(Debug, Default, serde::Serialize)]
//! struct User {
//!     id: i64,
//!     email: Option<String>,
//! }
//!
//! record_fields!(User {
//!     id => r#"db:"id""#,
//!     email => r#"db:"email""#,
//! });
//!
//! let rows = MemoryCursor::new(["id", "email"])
//!     .with_row(vec![Value::Int(1), Value::Null]);
//!
//! let mut out = Vec::new();
//! stream(rows, &mut User::default(), JsonEncoder::lines(), &mut out)?;
//! ```
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod conversion;
pub mod cursor;
pub mod encoders;
pub mod error;
pub mod schema;
pub mod traits;
pub mod types;

// Re-export main types for convenience
pub use config::{DuplicateNames, StreamConfig};
pub use conversion::{RowBinder, StreamSummary, stream, stream_with_config, write_until_complete};
pub use cursor::{MemoryCursor, MemoryCursorError};
pub use encoders::JsonEncoder;
pub use error::{BoxError, Result, StreamError};
pub use schema::{FieldMap, Tag, TagError, Tags};
pub use traits::{Cursor, Encoder, FieldSpec, FieldValue, FromValue, Record, Shape};
pub use types::{Mismatch, Value, ValueKind};
