//! Trait definitions for row streaming.
//!
//! This module contains the core trait hierarchy:
//!
//! - [`sealed`] - Sealed conversion from scanned values into field types
//! - [`field`] - Field shapes and shape reconciliation
//! - [`record`] - Destination records and their field tables
//! - [`cursor`] - The data source a stream reads from
//! - [`encoder`] - Record to bytes transformation

pub mod cursor;
pub mod encoder;
pub mod field;
pub mod record;
pub mod sealed;

pub use cursor::Cursor;
pub use encoder::Encoder;
pub use field::{FieldValue, Shape};
pub use record::{FieldSpec, Record};
pub use sealed::FromValue;
